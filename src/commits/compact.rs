//! Compact per-commit summaries.
//!
//! A summary keeps only what the ledger needs: the commit's local date and,
//! per entry, which users touched which files how many times. Summaries are
//! JSON-serializable and can be replayed into a cleared ledger.

use std::collections::{BTreeMap, BTreeSet};
use std::io::{Read, Write};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::identity::UserId;
use crate::ledger::FileId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum EntryKind {
    Commit,
    Review,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompactEntry {
    pub user_ids: BTreeSet<UserId>,
    pub files: BTreeMap<FileId, u32>,
    pub kind: EntryKind,
}

impl CompactEntry {
    pub fn new(user_ids: BTreeSet<UserId>, kind: EntryKind) -> Self {
        Self {
            user_ids,
            files: BTreeMap::new(),
            kind,
        }
    }

    pub fn touch(&mut self, file: FileId) {
        *self.files.entry(file).or_insert(0) += 1;
    }

    pub fn is_empty(&self) -> bool {
        self.user_ids.is_empty() || self.files.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompactCommit {
    pub date: NaiveDate,
    pub entries: Vec<CompactEntry>,
}

/// Write summaries as a JSON array.
pub fn write_json<W: Write>(writer: W, commits: &[CompactCommit]) -> Result<()> {
    serde_json::to_writer_pretty(writer, commits)?;
    Ok(())
}

pub fn read_json<R: Read>(reader: R) -> Result<Vec<CompactCommit>> {
    Ok(serde_json::from_reader(reader)?)
}

#[cfg(test)]
#[path = "compact_test.rs"]
mod tests;
