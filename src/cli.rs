/// CLI argument definitions for the `bf` command.
///
/// Defines the subcommands, their arguments, and long help text
/// using the `clap` derive macros.
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::config::CliOverrides;

/// Top-level CLI parser with a single subcommand selector.
#[derive(Parser)]
#[command(name = "bf", version, about = "Bus factor analysis for git repositories")]
pub struct Cli {
    /// Print debug logging to stderr (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Flags layered on top of `.busfactor.toml`.
#[derive(Args, Default)]
pub struct ConfigArgs {
    /// Config file (default: .busfactor.toml in the repository root)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Parse `Reviewed-by:` trailers and credit reviewers
    #[arg(long)]
    pub use_reviewers: bool,

    /// Use the legacy authorship formula instead of the weighted one
    #[arg(long)]
    pub raw_authorship: bool,

    /// File extensions to mark as ignored (comma separated, e.g. md,lock)
    #[arg(long, value_delimiter = ',')]
    pub ignore_ext: Vec<String>,

    /// Glob patterns to drop from the file listing (repeatable)
    #[arg(long)]
    pub exclude: Vec<String>,

    /// Days of history before HEAD to read (default: 547)
    #[arg(long)]
    pub days_gap: Option<i64>,
}

impl ConfigArgs {
    pub fn overrides(&self) -> CliOverrides {
        CliOverrides {
            use_reviewers: self.use_reviewers,
            raw_authorship: self.raw_authorship,
            ignore_extensions: self.ignore_ext.clone(),
            exclude: self.exclude.clone(),
            days_gap: self.days_gap,
        }
    }
}

/// All available subcommands.
#[derive(Subcommand)]
pub enum Commands {
    /// Compute the bus factor of every file and directory
    #[command(long_about = "\
Compute the bus factor of every file and directory in a git repository.

Every commit in the history window adds a time-decayed weight to the
files it touches, with a 90 day characteristic time relative to HEAD.
Per file, each developer gets a degree-of-authorship score. Developers
above the threshold are the file's key developers.

The bus factor of a directory is the smallest number of key developers
whose departure leaves more than half of its files without any key
developer.

Statuses:
  n         -- bus factor
  ignored   -- every file has an ignored extension (--ignore-ext)
  old       -- no file was changed inside the history window

Renames are followed: history recorded under an old path counts for
the new one.

Examples:
  bf analyze                          # whole repository, one level deep
  bf analyze src --depth 3            # focus on src/, three levels
  bf analyze --ignore-ext md,lock     # skip docs and lock files
  bf analyze --merge-aliases          # merge identities of one person
  bf analyze --json                   # machine-readable output")]
    Analyze {
        /// Path inside the repository to report (default: current directory)
        path: Option<PathBuf>,

        /// Output as JSON
        #[arg(long)]
        json: bool,

        /// Directory levels to show below the focus node (default: 1)
        #[arg(long, default_value = "1")]
        depth: usize,

        /// Contributors listed per row (default: 3)
        #[arg(long, default_value = "3")]
        top: usize,

        /// Write the compact commit summaries to this JSON file
        #[arg(long)]
        summaries: Option<PathBuf>,

        /// Detect and merge identities that belong to one person
        #[arg(long)]
        merge_aliases: bool,

        #[command(flatten)]
        config: ConfigArgs,
    },

    /// List identities in the history that look like the same person
    #[command(long_about = "\
List groups of identities in the git history that look like the same
person. Name tokens and email local parts are compared by edit
distance; a pair is grouped when its two best similarities average at
least 0.95.

Bots are left out. Use --toml to print the groups as an `aliases`
entry ready to paste into .busfactor.toml.

Examples:
  bf aliases                 # table of alias groups
  bf aliases --toml          # config snippet
  bf aliases --json          # machine-readable output")]
    Aliases {
        /// Directory inside the repository (default: current directory)
        path: Option<PathBuf>,

        /// Output as JSON
        #[arg(long)]
        json: bool,

        /// Output as a .busfactor.toml `aliases` snippet
        #[arg(long, conflicts_with = "json")]
        toml: bool,

        /// Show only the top N groups (default: 50)
        #[arg(long, default_value = "50")]
        top: usize,

        /// Config file (default: .busfactor.toml in the repository root)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Days of history before HEAD to read (default: 547)
        #[arg(long)]
        days_gap: Option<i64>,
    },

    /// Generate shell completions
    Completions {
        /// Target shell
        shell: clap_complete::Shell,
    },
}

#[cfg(test)]
#[path = "cli_test.rs"]
mod tests;
