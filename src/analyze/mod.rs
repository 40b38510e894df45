//! `bf analyze`: bus factor of every directory and file of a repository.
//!
//! Reads the commit history within the configured window, feeds it to a
//! fresh computation context and aggregates the HEAD snapshot. The tree is
//! printed as a table down to `depth` levels below the analyzed path, or as
//! JSON.

mod report;

use std::error::Error;
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use crate::commits::compact::write_json;
use crate::config::{CliOverrides, FileConfig, ResolvedConfig};
use crate::context::{BusFactor, ComputationContext};
use crate::git::GitRepo;
use crate::identity::{BotFilter, UserMerger};
use crate::report_helpers;
use crate::tree::{NodeId, ROOT, Tree};

use report::print_report;

pub struct AnalyzeOptions {
    pub json: bool,
    pub depth: usize,
    pub top: usize,
    pub merge_aliases: bool,
    pub summaries: Option<PathBuf>,
}

/// Node for `path` inside the repository rooted at `root`.
fn focus_node(tree: &Tree, root: &Path, path: &Path) -> Option<NodeId> {
    let root = root.canonicalize().ok()?;
    let path = path.canonicalize().ok()?;
    let rel = path.strip_prefix(&root).ok()?;
    let rel = rel.to_string_lossy().replace('\\', "/");
    tree.find(&rel)
}

pub fn run(
    path: &Path,
    config_path: Option<&Path>,
    overrides: CliOverrides,
    options: &AnalyzeOptions,
) -> Result<(), Box<dyn Error>> {
    let git_repo =
        GitRepo::open(path).map_err(|e| format!("not a git repository (or any parent): {e}"))?;
    let file_config = FileConfig::discover(git_repo.root(), config_path)?;
    let config = ResolvedConfig::resolve(file_config, overrides)?;

    let commits = git_repo.commits(config.days_gap)?;
    let bots = BotFilter::new(config.bots.clone());

    let mut aliases = config.aliases.clone();
    if options.merge_aliases {
        let found = UserMerger::new(Some(bots.clone())).merge_commits(&commits);
        log::info!("found {} alias groups in history", found.len());
        aliases.extend(found);
    }

    let ctx = ComputationContext::new(config.snapshot.clone(), bots, &aliases);
    let mut bus_factor = BusFactor::with_context(ctx);
    let summaries = bus_factor.proceed_commits(&commits)?;

    if let Some(out) = &options.summaries {
        let writer = BufWriter::new(File::create(out)?);
        write_json(writer, &summaries)?;
        log::info!("wrote {} compact summaries to {}", summaries.len(), out.display());
    }

    let mut files = git_repo.file_sizes()?;
    files.retain(|f| !config.is_excluded(&f.path));

    let tree = bus_factor.calculate(&git_repo.name(), &files);
    let node = match focus_node(&tree, git_repo.root(), path) {
        Some(node) => node,
        None => {
            log::warn!("{} is not part of the HEAD tree, showing the whole repository", path.display());
            ROOT
        }
    };

    if options.json {
        report_helpers::print_json_stdout(&tree.view(node))
    } else {
        print_report(
            &tree,
            node,
            options.depth,
            options.top,
            bus_factor.context().anchor(),
        );
        Ok(())
    }
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
