//! Per-(file, user) contribution accounting with exponential time decay.
//!
//! Every recorded change or review adds 1 to a raw counter and
//! `exp(-days / 90)` to its weighted counterpart, where `days` is the
//! distance from the event date to the anchor date. Events after the
//! anchor are rejected.

pub mod paths;

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;

use crate::error::{BusFactorError, Result};
use crate::identity::UserId;
use crate::util::days_between;

pub use paths::{FileId, PathResolver};

pub const DECAY_CHARACTERISTIC_TIME: f64 = 90.0;

/// Decay weight of an event on `date` relative to `anchor`.
pub fn decay_weight(date: NaiveDate, anchor: NaiveDate) -> Result<f64> {
    if date > anchor {
        return Err(BusFactorError::InvalidDecayInput { date, anchor });
    }
    let passed_days = days_between(date, anchor) as f64;
    Ok((-passed_days / DECAY_CHARACTERISTIC_TIME).exp())
}

/// Contributions of one user to one file.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Contribution {
    pub commits: u32,
    pub weighted_commits: f64,
    pub reviews: u32,
    pub weighted_reviews: f64,
    pub authorship: f64,
    pub normalized_authorship: f64,
}

pub type OwnershipPerUser = BTreeMap<UserId, Contribution>;

#[derive(Debug, Clone, Default)]
pub struct Ledger {
    files: BTreeMap<FileId, OwnershipPerUser>,
    weighted_owner: BTreeMap<FileId, (UserId, f64)>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one change of `file` by `user`. Returns the decay weight.
    pub fn record_change(
        &mut self,
        file: FileId,
        user: UserId,
        date: NaiveDate,
        anchor: NaiveDate,
    ) -> Result<f64> {
        let weight = decay_weight(date, anchor)?;
        let contribution = self
            .files
            .entry(file)
            .or_default()
            .entry(user)
            .or_default();
        contribution.commits += 1;
        contribution.weighted_commits += weight;

        match self.weighted_owner.get(&file) {
            Some(&(_, owner_weight)) if owner_weight >= weight => {}
            _ => {
                self.weighted_owner.insert(file, (user, weight));
            }
        }
        Ok(weight)
    }

    /// Record one review of `file` by `user`. Returns the decay weight.
    pub fn record_review(
        &mut self,
        file: FileId,
        user: UserId,
        date: NaiveDate,
        anchor: NaiveDate,
    ) -> Result<f64> {
        let weight = decay_weight(date, anchor)?;
        let contribution = self
            .files
            .entry(file)
            .or_default()
            .entry(user)
            .or_default();
        contribution.reviews += 1;
        contribution.weighted_reviews += weight;
        Ok(weight)
    }

    /// Fold the contributions of a renamed file into its new id.
    ///
    /// Users missing on the target are transplanted whole; for users present
    /// on both, only commit counters are added. The source's weighted owner
    /// replaces the target's without comparing weights.
    pub fn merge_rename(&mut self, old: FileId, new: FileId) {
        if old == new {
            return;
        }
        if let Some(old_ownership) = self.files.remove(&old) {
            match self.files.get_mut(&new) {
                None => {
                    self.files.insert(new, old_ownership);
                }
                Some(target) => {
                    for (user, contribution) in old_ownership {
                        match target.get_mut(&user) {
                            None => {
                                target.insert(user, contribution);
                            }
                            Some(existing) => {
                                existing.commits += contribution.commits;
                                existing.weighted_commits += contribution.weighted_commits;
                            }
                        }
                    }
                }
            }
        }

        if let Some(owner) = self.weighted_owner.remove(&old) {
            self.weighted_owner.insert(new, owner);
        }
    }

    pub fn contributions(&self, file: FileId) -> Option<&OwnershipPerUser> {
        self.files.get(&file)
    }

    pub fn contribution(&self, file: FileId, user: UserId) -> Option<&Contribution> {
        self.files.get(&file)?.get(&user)
    }

    pub fn has_activity(&self, file: FileId) -> bool {
        self.files.get(&file).is_some_and(|o| !o.is_empty())
    }

    pub fn weighted_owner(&self, file: FileId) -> Option<(UserId, f64)> {
        self.weighted_owner.get(&file).copied()
    }

    pub fn files(&self) -> impl Iterator<Item = (&FileId, &OwnershipPerUser)> {
        self.files.iter()
    }

    /// Mutable access to every file's contributions together with its owner.
    pub fn files_with_owner_mut(
        &mut self,
    ) -> impl Iterator<Item = (FileId, Option<(UserId, f64)>, &mut OwnershipPerUser)> {
        let owners = &self.weighted_owner;
        self.files
            .iter_mut()
            .map(move |(&file, ownership)| (file, owners.get(&file).copied(), ownership))
    }

    pub fn file_count(&self) -> usize {
        self.files.len()
    }

    pub fn clear(&mut self) {
        self.files.clear();
        self.weighted_owner.clear();
    }
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
