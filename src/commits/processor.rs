//! Commit ingestion.
//!
//! Merge commits and commits whose every identity is a bot are skipped.
//! Deletions carry no attribution; renames fold the old file into the new
//! one; every other change is credited to all human authors of the commit
//! at the author date. Reviewers from the `Reviewed-by` trailer are credited
//! for each file the commit touches when review tracking is on.

use std::collections::BTreeSet;

use chrono::NaiveDate;

use super::compact::{CompactCommit, CompactEntry, EntryKind};
use super::trailers::{co_authors, reviewers};
use super::{ChangeType, CommitInfo};
use crate::context::ComputationContext;
use crate::error::{BusFactorError, Result};
use crate::identity::{UserId, UserInfo};
use crate::ledger::{FileId, decay_weight};
use crate::util::to_local_date;

fn human_authors(ctx: &ComputationContext, commit: &CommitInfo) -> Vec<UserInfo> {
    let mut seen = BTreeSet::new();
    co_authors(&commit.message)
        .into_iter()
        .chain(std::iter::once(commit.author.clone()))
        .filter(|user| !ctx.bots.is_bot_user(user))
        .filter(|user| seen.insert(user.email.to_lowercase()))
        .collect()
}

/// Apply one commit to the ledger.
///
/// Returns `Ok(None)` for skipped commits and the compact summary of the
/// applied changes otherwise. Fails with `NotReady` when no anchor is set.
pub fn process_commit(
    ctx: &mut ComputationContext,
    commit: &CommitInfo,
) -> Result<Option<CompactCommit>> {
    let anchor = ctx.anchor().ok_or(BusFactorError::NotReady)?;

    if commit.is_merge() {
        log::debug!("skipping merge commit {}", commit_label(commit));
        return Ok(None);
    }

    let authors = human_authors(ctx, commit);
    if authors.is_empty() {
        log::debug!("skipping bot-only commit {}", commit_label(commit));
        return Ok(None);
    }

    let date = to_local_date(commit.author_timestamp)?;
    // reject out-of-window dates before touching any state
    decay_weight(date, anchor)?;
    ctx.mark_started();

    let user_ids: BTreeSet<UserId> = authors
        .iter()
        .map(|user| ctx.identities.resolve(&user.name, &user.email))
        .collect();
    let reviewer_ids: BTreeSet<UserId> = if ctx.config.use_reviewers {
        reviewers(&commit.message)
            .iter()
            .map(|name| ctx.identities.resolve_reviewer_name(name))
            .collect()
    } else {
        BTreeSet::new()
    };

    let mut changes = CompactEntry::new(user_ids.clone(), EntryKind::Commit);
    let mut reviews = CompactEntry::new(reviewer_ids.clone(), EntryKind::Review);

    for entry in &commit.diff_entries {
        let file = match entry.change_type {
            ChangeType::Delete => continue,
            ChangeType::Rename => {
                let (old_id, new_id) = ctx.paths.track_move(&entry.old_path, &entry.new_path);
                if old_id != new_id {
                    log::debug!(
                        "rename {} -> {} merges file {old_id} into {new_id}",
                        entry.old_path,
                        entry.new_path
                    );
                    ctx.ledger.merge_rename(old_id, new_id);
                }
                new_id
            }
            ChangeType::Add | ChangeType::Modify | ChangeType::Copy => {
                let file = ctx.paths.add(entry.path());
                for &user in &user_ids {
                    ctx.ledger.record_change(file, user, date, anchor)?;
                }
                changes.touch(file);
                file
            }
        };

        for &reviewer in &reviewer_ids {
            ctx.ledger.record_review(file, reviewer, date, anchor)?;
        }
        if !reviewer_ids.is_empty() {
            reviews.touch(file);
        }
    }

    let entries = [changes, reviews]
        .into_iter()
        .filter(|entry| !entry.is_empty())
        .collect();
    Ok(Some(CompactCommit { date, entries }))
}

/// Re-apply a compact summary. File ids recorded before a rename are
/// mapped to their surviving ids; unknown user ids abort the replay
/// before anything is recorded.
pub fn replay(ctx: &mut ComputationContext, commit: &CompactCommit) -> Result<()> {
    let anchor = ctx.anchor().ok_or(BusFactorError::NotReady)?;
    decay_weight(commit.date, anchor)?;

    for entry in &commit.entries {
        if let Some(&unknown) = entry
            .user_ids
            .iter()
            .find(|&&id| !ctx.identities.contains(id))
        {
            return Err(BusFactorError::UnknownUser(unknown));
        }
    }
    ctx.mark_started();

    for entry in &commit.entries {
        for (&compact_id, &count) in &entry.files {
            let file = ctx.paths.get_real_id(compact_id);
            for &user in &entry.user_ids {
                for _ in 0..count {
                    record(ctx, entry.kind, file, user, commit.date, anchor)?;
                }
            }
        }
    }
    Ok(())
}

fn record(
    ctx: &mut ComputationContext,
    kind: EntryKind,
    file: FileId,
    user: UserId,
    date: NaiveDate,
    anchor: NaiveDate,
) -> Result<f64> {
    match kind {
        EntryKind::Commit => ctx.ledger.record_change(file, user, date, anchor),
        EntryKind::Review => ctx.ledger.record_review(file, user, date, anchor),
    }
}

fn commit_label(commit: &CommitInfo) -> &str {
    commit.hash.as_deref().unwrap_or("<unknown>")
}

#[cfg(test)]
#[path = "processor_test.rs"]
mod tests;
