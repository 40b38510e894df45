//! Commit records and their ingestion into the contribution ledger.
//!
//! `CommitInfo` is the structured form handed over by the extraction
//! layer. `processor` turns each record into ledger mutations and a
//! `CompactCommit` that can later be replayed without the commit text.

pub mod compact;
pub mod processor;
mod trailers;

use serde::{Deserialize, Serialize};

use crate::identity::UserInfo;

pub use compact::{CompactCommit, CompactEntry, EntryKind};
pub use processor::{process_commit, replay};
pub use trailers::{co_authors, reviewers};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ChangeType {
    Add,
    Modify,
    Copy,
    Rename,
    Delete,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffEntry {
    pub old_path: String,
    pub new_path: String,
    pub change_type: ChangeType,
}

impl DiffEntry {
    pub fn new(old_path: &str, new_path: &str, change_type: ChangeType) -> Self {
        Self {
            old_path: old_path.to_string(),
            new_path: new_path.to_string(),
            change_type,
        }
    }

    pub fn added(path: &str) -> Self {
        Self::new(path, path, ChangeType::Add)
    }

    pub fn modified(path: &str) -> Self {
        Self::new(path, path, ChangeType::Modify)
    }

    pub fn renamed(old_path: &str, new_path: &str) -> Self {
        Self::new(old_path, new_path, ChangeType::Rename)
    }

    pub fn deleted(path: &str) -> Self {
        Self::new(path, path, ChangeType::Delete)
    }

    /// Path the change applies to: the old path for deletions, the new one otherwise.
    pub fn path(&self) -> &str {
        match self.change_type {
            ChangeType::Delete => &self.old_path,
            _ => &self.new_path,
        }
    }
}

/// One commit as extracted from version control. Timestamps are epoch millis.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CommitInfo {
    pub hash: Option<String>,
    pub author: UserInfo,
    pub committer: UserInfo,
    pub author_timestamp: i64,
    pub committer_timestamp: i64,
    pub diff_entries: Vec<DiffEntry>,
    pub parent_count: usize,
    pub message: String,
}

impl CommitInfo {
    pub fn is_merge(&self) -> bool {
        self.parent_count > 1
    }
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
