//! Authorship scoring.
//!
//! Every (file, user) contribution gets a score from one of two fixed
//! formulas and a per-file normalized score relative to the file's top
//! scorer. The `Weighted` formula works on decayed counts and uses the
//! owner's decay weight as ownership term; `Legacy` works on raw counts
//! with a 0/1 owner indicator.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::identity::UserId;
use crate::ledger::{Contribution, FileId, Ledger};

pub const SHIFT: f64 = 3.293;
pub const OWNERSHIP_SLOPE: f64 = 1.098;
pub const COMMITS_SLOPE: f64 = 0.164;
pub const OTHER_COMMITS_SLOPE: f64 = 0.321;
pub const REVIEWS_SLOPE: f64 = 0.082;
pub const OTHER_REVIEWS_SLOPE: f64 = 0.160;

pub const OWNERSHIP_SLOPE_NEW: f64 = 3.0;
pub const COMMITS_SLOPE_NEW: f64 = 1.0;
pub const REVIEWS_SLOPE_NEW: f64 = 0.5;
pub const OTHER_COMMITS_SLOPE_NEW: f64 = 2.4;
pub const OTHER_REVIEWS_SLOPE_NEW: f64 = 1.2;

pub const AUTHORSHIP_THRESHOLD: f64 = 3.293;
pub const AUTHORSHIP_THRESHOLD_NEW: f64 = 0.001;
pub const NORMALIZED_AUTHORSHIP_THRESHOLD: f64 = 0.75;

const MINOR_SHARE: f64 = 0.05;
const MAIN_AUTHORSHIP: f64 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Formula {
    Legacy,
    Weighted,
}

impl Formula {
    pub fn from_weighted(weighted_authorship: bool) -> Self {
        if weighted_authorship {
            Formula::Weighted
        } else {
            Formula::Legacy
        }
    }

    pub fn threshold(self) -> f64 {
        match self {
            Formula::Legacy => AUTHORSHIP_THRESHOLD,
            Formula::Weighted => AUTHORSHIP_THRESHOLD_NEW,
        }
    }

    /// Major contributor: score above the formula threshold and
    /// normalized score above 0.75.
    pub fn is_major(self, contribution: &Contribution) -> bool {
        contribution.authorship >= self.threshold()
            && contribution.normalized_authorship > NORMALIZED_AUTHORSHIP_THRESHOLD
    }
}

pub fn legacy_score(
    ownership: f64,
    commits: f64,
    other_commits: f64,
    reviews: f64,
    other_reviews: f64,
) -> f64 {
    SHIFT + OWNERSHIP_SLOPE * ownership + COMMITS_SLOPE * commits
        - OTHER_COMMITS_SLOPE * other_commits.ln_1p()
        + REVIEWS_SLOPE * reviews
        - OTHER_REVIEWS_SLOPE * other_reviews.ln_1p()
}

#[allow(clippy::too_many_arguments)]
pub fn weighted_score(
    ownership: f64,
    commits: f64,
    total_commits: f64,
    other_commits: f64,
    reviews: f64,
    total_reviews: f64,
    other_reviews: f64,
) -> f64 {
    OWNERSHIP_SLOPE_NEW * ownership
        + COMMITS_SLOPE_NEW * commits
        + REVIEWS_SLOPE_NEW * reviews
        + OTHER_COMMITS_SLOPE_NEW * (total_commits.ln_1p() - other_commits.ln_1p())
        + OTHER_REVIEWS_SLOPE_NEW * (total_reviews.ln_1p() - other_reviews.ln_1p())
}

fn score_file(
    formula: Formula,
    owner: Option<(UserId, f64)>,
    ownership: &mut BTreeMap<UserId, Contribution>,
) {
    match formula {
        Formula::Weighted => {
            let total_commits: f64 = ownership.values().map(|c| c.weighted_commits).sum();
            let total_reviews: f64 = ownership.values().map(|c| c.weighted_reviews).sum();
            for (&user, c) in ownership.iter_mut() {
                let owner_term = match owner {
                    Some((owner, weight)) if owner == user => weight,
                    _ => 0.0,
                };
                c.authorship = weighted_score(
                    owner_term,
                    c.weighted_commits,
                    total_commits,
                    total_commits - c.weighted_commits,
                    c.weighted_reviews,
                    total_reviews,
                    total_reviews - c.weighted_reviews,
                );
            }
        }
        Formula::Legacy => {
            let total_commits: u32 = ownership.values().map(|c| c.commits).sum();
            let total_reviews: u32 = ownership.values().map(|c| c.reviews).sum();
            for (&user, c) in ownership.iter_mut() {
                let owner_term = match owner {
                    Some((owner, _)) if owner == user => 1.0,
                    _ => 0.0,
                };
                c.authorship = legacy_score(
                    owner_term,
                    f64::from(c.commits),
                    f64::from(total_commits - c.commits),
                    f64::from(c.reviews),
                    f64::from(total_reviews - c.reviews),
                );
            }
        }
    }

    let max = ownership
        .values()
        .map(|c| c.authorship)
        .fold(f64::NEG_INFINITY, f64::max);
    for c in ownership.values_mut() {
        c.normalized_authorship = if max != 0.0 { c.authorship / max } else { 0.0 };
    }
}

/// Recompute authorship and normalized authorship for every file.
pub fn compute_authorship(ledger: &mut Ledger, formula: Formula) {
    let mut files = 0usize;
    for (_, owner, ownership) in ledger.files_with_owner_mut() {
        score_file(formula, owner, ownership);
        files += 1;
    }
    log::debug!("authorship recomputed for {files} files ({formula:?} formula)");
}

/// Aggregated contribution of one user over a set of files.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct UserStats {
    pub commits: u32,
    pub reviews: u32,
    pub authorship: f64,
    pub normalized_authorship: f64,
    pub main_contributor: bool,
    pub minor_contributor: bool,
}

pub fn is_minor_contributor(authorship: f64, sum_authorship: f64) -> bool {
    authorship / sum_authorship <= MINOR_SHARE
}

pub fn is_main_contributor(authorship: f64, normalized_authorship: f64) -> bool {
    normalized_authorship > NORMALIZED_AUTHORSHIP_THRESHOLD && authorship > MAIN_AUTHORSHIP
}

/// Sum every user's contributions over `files` and classify them.
///
/// The minor classification needs a share of the file's total authorship,
/// so it only applies when `files` holds a single file. A user who would be
/// both main and minor is reported as minor.
pub fn files_user_stats(ledger: &Ledger, files: &[FileId]) -> BTreeMap<UserId, UserStats> {
    let mut stats: BTreeMap<UserId, UserStats> = BTreeMap::new();
    let is_file = files.len() == 1;
    let mut sum_authorship = 0.0;

    for &file in files {
        let Some(ownership) = ledger.contributions(file) else {
            continue;
        };
        for (&user, c) in ownership {
            let entry = stats.entry(user).or_default();
            entry.commits += c.commits;
            entry.reviews += c.reviews;
            entry.authorship += c.authorship;
            if is_file {
                sum_authorship += c.authorship;
            }
        }
    }

    let max = stats
        .values()
        .map(|s| s.authorship)
        .fold(f64::NEG_INFINITY, f64::max);
    for s in stats.values_mut() {
        s.normalized_authorship = if max != 0.0 { s.authorship / max } else { 0.0 };
        let minor = is_file && is_minor_contributor(s.authorship, sum_authorship);
        let main = is_main_contributor(s.authorship, s.normalized_authorship);
        s.minor_contributor = minor;
        s.main_contributor = main && !minor;
    }
    stats
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
