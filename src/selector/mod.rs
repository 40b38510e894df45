//! Greedy bus factor selection.
//!
//! Candidates are ranked by the number of files they are a major
//! contributor of (ties broken by ascending user id). Candidates are removed
//! one by one while at least half of the files still have a major
//! contributor; the number removed is the bus factor.

use std::collections::{BTreeMap, BTreeSet, HashSet};

use serde::Serialize;

use crate::authorship::Formula;
use crate::identity::UserId;
use crate::ledger::{FileId, Ledger, PathResolver};
use crate::util::is_valid_file_path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BusFactorStatus {
    /// Every file of the set has an ignored extension
    Ignored,
    /// No file of the set has recorded activity
    Old,
    BusFactor(u32),
}

impl BusFactorStatus {
    pub fn label(&self) -> String {
        match self {
            BusFactorStatus::Ignored => "ignored".to_string(),
            BusFactorStatus::Old => "old".to_string(),
            BusFactorStatus::BusFactor(n) => n.to_string(),
        }
    }

    pub fn value(&self) -> Option<u32> {
        match self {
            BusFactorStatus::BusFactor(n) => Some(*n),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    pub status: BusFactorStatus,
    /// Every candidate in rank order, not only the removed ones
    pub ranked: Vec<UserId>,
    /// Files that took part in the computation
    pub files: Vec<FileId>,
}

impl Selection {
    fn empty(status: BusFactorStatus) -> Self {
        Self {
            status,
            ranked: Vec::new(),
            files: Vec::new(),
        }
    }
}

/// Rank users by major-file count, descending, then by id.
pub fn rank_candidates(major: &[BTreeSet<UserId>]) -> Vec<UserId> {
    let mut counts: BTreeMap<UserId, usize> = BTreeMap::new();
    for users in major {
        for &user in users {
            *counts.entry(user).or_insert(0) += 1;
        }
    }
    let mut ranked: Vec<(UserId, usize)> = counts.into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
    ranked.into_iter().map(|(user, _)| user).collect()
}

fn count_orphans(major: &[BTreeSet<UserId>]) -> usize {
    major.iter().filter(|users| users.is_empty()).count()
}

/// Greedy removal over per-file major contributor sets.
/// Returns the bus factor and the full candidate ranking.
pub fn bus_factor(mut major: Vec<BTreeSet<UserId>>) -> (u32, Vec<UserId>) {
    let ranked = rank_candidates(&major);
    let total = major.len();
    let mut orphans = count_orphans(&major);
    let mut bus_factor = 0;

    for &candidate in &ranked {
        if total < 2 * orphans {
            break;
        }
        bus_factor += 1;
        for users in major.iter_mut() {
            users.remove(&candidate);
        }
        orphans = count_orphans(&major);
    }
    (bus_factor, ranked)
}

fn major_contributors(ledger: &Ledger, file: FileId, formula: Formula) -> BTreeSet<UserId> {
    ledger
        .contributions(file)
        .map(|ownership| {
            ownership
                .iter()
                .filter(|(_, c)| formula.is_major(c))
                .map(|(&user, _)| user)
                .collect()
        })
        .unwrap_or_default()
}

/// Resolve `paths` to files with activity, dropping ignored extensions.
/// Returns the status to report instead when nothing is left.
pub fn active_files(
    ledger: &Ledger,
    resolver: &PathResolver,
    ignore_extensions: &HashSet<String>,
    paths: &[String],
) -> Result<Vec<FileId>, BusFactorStatus> {
    let valid: Vec<&String> = paths
        .iter()
        .filter(|path| is_valid_file_path(path, ignore_extensions))
        .collect();
    if valid.is_empty() {
        return Err(BusFactorStatus::Ignored);
    }

    let known: BTreeSet<FileId> = valid.iter().filter_map(|p| resolver.lookup(p)).collect();
    if known.is_empty() {
        return Err(BusFactorStatus::Old);
    }

    let active: Vec<FileId> = known
        .into_iter()
        .filter(|&file| ledger.has_activity(file))
        .collect();
    if active.is_empty() {
        return Err(BusFactorStatus::Old);
    }
    Ok(active)
}

/// Compute the bus factor of a set of file paths. Authorship must have
/// been computed beforehand.
pub fn select(
    ledger: &Ledger,
    resolver: &PathResolver,
    ignore_extensions: &HashSet<String>,
    formula: Formula,
    paths: &[String],
) -> Selection {
    let files = match active_files(ledger, resolver, ignore_extensions, paths) {
        Ok(files) => files,
        Err(status) => return Selection::empty(status),
    };

    let major: Vec<BTreeSet<UserId>> = files
        .iter()
        .map(|&file| major_contributors(ledger, file, formula))
        .collect();
    let (count, ranked) = bus_factor(major);

    Selection {
        status: BusFactorStatus::BusFactor(count),
        ranked,
        files,
    }
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
