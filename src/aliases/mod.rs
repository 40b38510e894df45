//! `bf aliases`: identities in the history that look like one person.
//!
//! The groups can be pasted into the `aliases` key of `.busfactor.toml`
//! (`--toml`) or passed on the fly with `bf analyze --merge-aliases`.

mod report;

use std::error::Error;
use std::path::Path;

use crate::config::{CliOverrides, FileConfig, ResolvedConfig};
use crate::git::GitRepo;
use crate::identity::{BotFilter, UserMerger};
use crate::report_helpers;

use report::{print_json, print_report, print_toml};

pub fn run(
    path: &Path,
    config_path: Option<&Path>,
    days_gap: Option<i64>,
    json: bool,
    toml: bool,
    top: usize,
) -> Result<(), Box<dyn Error>> {
    let git_repo =
        GitRepo::open(path).map_err(|e| format!("not a git repository (or any parent): {e}"))?;
    let file_config = FileConfig::discover(git_repo.root(), config_path)?;
    let overrides = CliOverrides {
        days_gap,
        ..CliOverrides::default()
    };
    let config = ResolvedConfig::resolve(file_config, overrides)?;

    let commits = git_repo.commits(config.days_gap)?;
    let merger = UserMerger::new(Some(BotFilter::new(config.bots.clone())));
    let mut groups = merger.merge_commits(&commits);
    groups.sort_by(|a, b| b.len().cmp(&a.len()));

    if toml {
        groups.truncate(top);
        return print_toml(&groups);
    }
    report_helpers::output_results(&mut groups, top, json, print_json, print_report)
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
