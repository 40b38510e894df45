//! File path canonicalization.
//!
//! A file keeps one id across renames. When `track_move` joins two ids the
//! old one is retired: its path now resolves to the surviving id and the
//! retired id is remembered as a successor link so ids recorded before the
//! rename (e.g. in compact summaries) can still be resolved.

use std::collections::HashMap;

pub type FileId = u32;

#[derive(Debug, Clone, Default)]
pub struct PathResolver {
    path_to_id: HashMap<String, FileId>,
    id_to_path: HashMap<FileId, String>,
    // retired id -> the id it was merged into
    successors: HashMap<FileId, FileId>,
    next_id: FileId,
}

impl PathResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the live id for `path`, creating one on first sighting.
    pub fn add(&mut self, path: &str) -> FileId {
        if let Some(&id) = self.path_to_id.get(path) {
            return self.get_real_id(id);
        }
        let id = self.next_id;
        self.next_id += 1;
        self.path_to_id.insert(path.to_string(), id);
        self.id_to_path.insert(id, path.to_string());
        id
    }

    pub fn lookup(&self, path: &str) -> Option<FileId> {
        self.path_to_id.get(path).map(|&id| self.get_real_id(id))
    }

    /// Join `old_path` into `new_path`. Returns `(old_id, new_id)`; when they
    /// differ the caller must fold the old id's contributions into the new one.
    pub fn track_move(&mut self, old_path: &str, new_path: &str) -> (FileId, FileId) {
        let old_id = self.add(old_path);
        let new_id = self.add(new_path);
        if old_id != new_id {
            self.successors.insert(old_id, new_id);
            self.id_to_path.remove(&old_id);
            self.path_to_id.insert(old_path.to_string(), new_id);
        }
        (old_id, new_id)
    }

    /// Follow rename links from a possibly retired id to the live one.
    pub fn get_real_id(&self, id: FileId) -> FileId {
        let mut current = id;
        while let Some(&next) = self.successors.get(&current) {
            current = next;
        }
        current
    }

    /// Path most recently associated with a live id.
    pub fn path(&self, id: FileId) -> Option<&str> {
        self.id_to_path.get(&id).map(String::as_str)
    }

    pub fn is_retired(&self, id: FileId) -> bool {
        self.successors.contains_key(&id)
    }

    /// Number of live ids.
    pub fn len(&self) -> usize {
        self.id_to_path.len()
    }

    pub fn is_empty(&self) -> bool {
        self.id_to_path.is_empty()
    }
}

#[cfg(test)]
#[path = "paths_test.rs"]
mod tests;
