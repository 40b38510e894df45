//! Configuration for a bus factor computation.
//!
//! `ConfigSnapshot` is the immutable set of behavioral flags fixed when a
//! computation context is created. `FileConfig` is the optional
//! `.busfactor.toml` file; CLI flags are layered on top of it and the
//! merged result is frozen into a `ResolvedConfig`.
//!
//! Search order:
//! 1. Explicit path (`--config`)
//! 2. `.busfactor.toml` in the repository root

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use globset::{Glob, GlobSet, GlobSetBuilder};
use serde::{Deserialize, Serialize};

use crate::error::{BusFactorError, Result};
use crate::identity::UserInfo;

pub const CONFIG_FILE_NAME: &str = ".busfactor.toml";

/// History window before the anchor commit, in days (about 18 months).
pub const DEFAULT_DAYS_GAP: i64 = 547;

const DEFAULT_USE_REVIEWERS: bool = false;
const DEFAULT_WEIGHTED_AUTHORSHIP: bool = true;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigSnapshot {
    pub use_reviewers: bool,
    pub weighted_authorship: bool,
    pub ignore_extensions: HashSet<String>,
}

impl Default for ConfigSnapshot {
    fn default() -> Self {
        Self {
            use_reviewers: DEFAULT_USE_REVIEWERS,
            weighted_authorship: DEFAULT_WEIGHTED_AUTHORSHIP,
            ignore_extensions: HashSet::new(),
        }
    }
}

/// Contents of a `.busfactor.toml` file. Every field is optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    #[serde(default)]
    pub use_reviewers: Option<bool>,

    #[serde(default)]
    pub weighted_authorship: Option<bool>,

    /// Extensions (without the dot) whose files get an `ignored` status
    #[serde(default)]
    pub ignore_extensions: Vec<String>,

    /// Glob patterns removed from the file listing before aggregation
    #[serde(default)]
    pub exclude: Vec<String>,

    /// Extra name/email fragments that mark an identity as a bot
    #[serde(default)]
    pub bots: Vec<String>,

    #[serde(default)]
    pub days_gap: Option<i64>,

    /// Groups of identities known to belong to one person
    #[serde(default)]
    pub aliases: Vec<Vec<UserInfo>>,
}

impl FileConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: FileConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load the explicit config if given, otherwise look for
    /// `.busfactor.toml` under `root`. Missing default file is not an error.
    pub fn discover(root: &Path, explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }
        let candidate: PathBuf = root.join(CONFIG_FILE_NAME);
        if candidate.is_file() {
            log::debug!("loading config from {}", candidate.display());
            return Self::load(&candidate);
        }
        Ok(Self::default())
    }

    fn validate(&self) -> Result<()> {
        if let Some(days) = self.days_gap
            && days <= 0
        {
            return Err(BusFactorError::Config(format!(
                "days_gap must be positive, got {days}"
            )));
        }
        for group in &self.aliases {
            if group.is_empty() {
                return Err(BusFactorError::Config("empty alias group".to_string()));
            }
        }
        Ok(())
    }
}

/// Overrides coming from the command line. `None`/empty keeps the file value.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub use_reviewers: bool,
    pub raw_authorship: bool,
    pub ignore_extensions: Vec<String>,
    pub exclude: Vec<String>,
    pub days_gap: Option<i64>,
}

/// Config file merged with CLI overrides, globs compiled.
#[derive(Debug)]
pub struct ResolvedConfig {
    pub snapshot: ConfigSnapshot,
    pub exclude: GlobSet,
    pub bots: Vec<String>,
    pub days_gap: i64,
    pub aliases: Vec<Vec<UserInfo>>,
}

impl ResolvedConfig {
    pub fn resolve(file: FileConfig, cli: CliOverrides) -> Result<Self> {
        let use_reviewers =
            cli.use_reviewers || file.use_reviewers.unwrap_or(DEFAULT_USE_REVIEWERS);
        let weighted_authorship = !cli.raw_authorship
            && file
                .weighted_authorship
                .unwrap_or(DEFAULT_WEIGHTED_AUTHORSHIP);

        let ignore_extensions = file
            .ignore_extensions
            .iter()
            .chain(cli.ignore_extensions.iter())
            .map(|ext| ext.trim_start_matches('.').to_string())
            .filter(|ext| !ext.is_empty())
            .collect();

        let patterns: Vec<&String> = file.exclude.iter().chain(cli.exclude.iter()).collect();
        let exclude = build_globset(&patterns)?;

        let days_gap = cli.days_gap.or(file.days_gap).unwrap_or(DEFAULT_DAYS_GAP);
        if days_gap <= 0 {
            return Err(BusFactorError::Config(format!(
                "days gap must be positive, got {days_gap}"
            )));
        }

        Ok(Self {
            snapshot: ConfigSnapshot {
                use_reviewers,
                weighted_authorship,
                ignore_extensions,
            },
            exclude,
            bots: file.bots,
            days_gap,
            aliases: file.aliases,
        })
    }

    pub fn is_excluded(&self, path: &str) -> bool {
        self.exclude.is_match(path)
    }
}

fn build_globset(patterns: &[&String]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        builder.add(Glob::new(pattern)?);
    }
    Ok(builder.build()?)
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
