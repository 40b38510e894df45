//! Computation context and the `BusFactor` entry point.
//!
//! All mutable state of one computation (identities, paths, ledger, anchor)
//! lives in a `ComputationContext` owned by the caller. `BusFactor` wraps a
//! context with the ingest → score → aggregate workflow.

use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;

use crate::authorship::{Formula, UserStats, compute_authorship, files_user_stats};
use crate::commits::{CommitInfo, CompactCommit, process_commit, replay};
use crate::config::ConfigSnapshot;
use crate::error::{BusFactorError, Result};
use crate::identity::{BotFilter, IdentityResolver, UserId, UserInfo};
use crate::ledger::{FileId, Ledger, PathResolver};
use crate::selector::{Selection, select};
use crate::tree::{FileEntry, Tree, UserVis};
use crate::util::to_local_date;

#[derive(Debug, Clone, Default)]
pub struct ComputationContext {
    pub config: ConfigSnapshot,
    pub identities: IdentityResolver,
    pub paths: PathResolver,
    pub ledger: Ledger,
    pub bots: BotFilter,
    anchor: Option<NaiveDate>,
    anchor_hash: Option<String>,
    started: bool,
}

impl ComputationContext {
    /// Context with `aliases` bound before any commit is seen.
    pub fn new(config: ConfigSnapshot, bots: BotFilter, aliases: &[Vec<UserInfo>]) -> Self {
        if !aliases.is_empty() {
            log::info!("binding {} alias groups", aliases.len());
        }
        Self {
            config,
            identities: IdentityResolver::with_aliases(aliases),
            bots,
            ..Self::default()
        }
    }

    pub fn anchor(&self) -> Option<NaiveDate> {
        self.anchor
    }

    pub fn anchor_hash(&self) -> Option<&str> {
        self.anchor_hash.as_deref()
    }

    /// Fix the decay reference date. Only allowed before ingestion starts.
    pub fn set_anchor(&mut self, timestamp_ms: i64, hash: Option<String>) -> Result<()> {
        if self.started {
            return Err(BusFactorError::AnchorLocked);
        }
        let date = to_local_date(timestamp_ms)?;
        log::info!(
            "anchor set to {date} ({})",
            hash.as_deref().unwrap_or("no hash")
        );
        self.anchor = Some(date);
        self.anchor_hash = hash;
        Ok(())
    }

    pub(crate) fn mark_started(&mut self) {
        self.started = true;
    }

    pub fn has_started(&self) -> bool {
        self.started
    }

    pub fn formula(&self) -> Formula {
        Formula::from_weighted(self.config.weighted_authorship)
    }

    pub fn select(&self, paths: &[String]) -> Selection {
        select(
            &self.ledger,
            &self.paths,
            &self.config.ignore_extensions,
            self.formula(),
            paths,
        )
    }

    /// Selection for `paths` together with user stats. The stats cover
    /// every known file of `paths`, ignored extensions included.
    pub fn evaluate(&self, paths: &[String]) -> (Selection, BTreeMap<UserId, UserStats>) {
        let selection = self.select(paths);
        let known: Vec<FileId> = paths
            .iter()
            .filter_map(|path| self.paths.lookup(path))
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        let stats = files_user_stats(&self.ledger, &known);
        (selection, stats)
    }
}

#[derive(Debug, Clone, Default)]
pub struct BusFactor {
    ctx: ComputationContext,
}

impl BusFactor {
    pub fn new(config: ConfigSnapshot) -> Self {
        Self::with_context(ComputationContext::new(config, BotFilter::default(), &[]))
    }

    pub fn with_context(ctx: ComputationContext) -> Self {
        Self { ctx }
    }

    pub fn context(&self) -> &ComputationContext {
        &self.ctx
    }

    pub fn into_context(self) -> ComputationContext {
        self.ctx
    }

    /// Use `commit`'s committer date as the decay anchor.
    pub fn set_anchor(&mut self, commit: &CommitInfo) -> Result<()> {
        self.ctx
            .set_anchor(commit.committer_timestamp, commit.hash.clone())
    }

    /// Process one commit. The anchor must already be set.
    pub fn consume_commit(&mut self, commit: &CommitInfo) -> Result<Option<CompactCommit>> {
        process_commit(&mut self.ctx, commit)
    }

    /// Process a newest-first commit stream. When no anchor is set yet the
    /// first commit becomes the anchor. Returns the summaries of the
    /// commits that were applied.
    pub fn proceed_commits<'a>(
        &mut self,
        commits: impl IntoIterator<Item = &'a CommitInfo>,
    ) -> Result<Vec<CompactCommit>> {
        let mut summaries = Vec::new();
        for commit in commits {
            if self.ctx.anchor().is_none() {
                self.set_anchor(commit)?;
            }
            if let Some(summary) = self.consume_commit(commit)? {
                summaries.push(summary);
            }
        }
        Ok(summaries)
    }

    pub fn replay(&mut self, summary: &CompactCommit) -> Result<()> {
        replay(&mut self.ctx, summary)
    }

    pub fn replay_all<'a>(
        &mut self,
        summaries: impl IntoIterator<Item = &'a CompactCommit>,
    ) -> Result<()> {
        let mut count = 0usize;
        for summary in summaries {
            self.replay(summary)?;
            count += 1;
        }
        log::debug!("replayed {count} compact summaries");
        Ok(())
    }

    /// Drop every recorded contribution. Identities, paths and the anchor
    /// are kept so summaries can be replayed.
    pub fn clear_results(&mut self) {
        self.ctx.ledger.clear();
    }

    /// Score the ledger and aggregate the tree of `files`.
    pub fn calculate(&mut self, name: &str, files: &[FileEntry]) -> Tree {
        let formula = self.ctx.formula();
        compute_authorship(&mut self.ctx.ledger, formula);

        let mut tree = Tree::build(name, files);
        let ctx = &self.ctx;
        tree.aggregate(|paths| {
            let (selection, stats) = ctx.evaluate(paths);
            let users = UserVis::convert(&selection.ranked, &stats, |id| ctx.identities.get(id));
            (selection.status, users)
        });
        tree
    }
}

#[cfg(test)]
#[path = "context_test.rs"]
mod tests;
