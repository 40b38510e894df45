//! Extraction of commit records and file sizes from a git repository.

use std::path::{Path, PathBuf};

use git2::{
    Delta, DiffFindOptions, DiffOptions, ObjectType, Repository, Sort, Tree, TreeWalkMode,
    TreeWalkResult,
};

use crate::commits::{ChangeType, CommitInfo, DiffEntry};
use crate::error::Result;
use crate::identity::UserInfo;
use crate::tree::FileEntry;

const SECONDS_PER_DAY: i64 = 86_400;

pub struct GitRepo {
    repo: Repository,
    root: PathBuf,
}

fn to_change_type(delta: Delta) -> Option<ChangeType> {
    match delta {
        Delta::Added => Some(ChangeType::Add),
        Delta::Modified | Delta::Typechange => Some(ChangeType::Modify),
        Delta::Deleted => Some(ChangeType::Delete),
        Delta::Renamed => Some(ChangeType::Rename),
        Delta::Copied => Some(ChangeType::Copy),
        _ => None,
    }
}

fn user_info(signature: &git2::Signature) -> UserInfo {
    UserInfo::new(
        signature.name().unwrap_or("unknown"),
        signature.email().unwrap_or("unknown"),
    )
}

fn path_string(path: Option<&Path>) -> Option<String> {
    path.map(|p| p.to_string_lossy().replace('\\', "/"))
}

impl GitRepo {
    pub fn open(path: &Path) -> Result<Self> {
        let repo = Repository::discover(path)?;
        let root = repo
            .workdir()
            .ok_or_else(|| git2::Error::from_str("bare repositories are not supported"))?
            .to_path_buf();
        Ok(Self { repo, root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Name of the repository directory, used as the tree root name.
    pub fn name(&self) -> String {
        self.root
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| ".".to_string())
    }

    /// Commits reachable from HEAD, newest first, committed at most
    /// `days_gap` days before HEAD. An empty repository has no commits.
    pub fn commits(&self, days_gap: i64) -> Result<Vec<CommitInfo>> {
        let head = match self.repo.head() {
            Ok(head) => head.peel_to_commit()?,
            Err(e) if e.code() == git2::ErrorCode::UnbornBranch => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };
        let newest = head.time().seconds();
        let oldest = newest - days_gap * SECONDS_PER_DAY;

        let mut revwalk = self.repo.revwalk()?;
        revwalk.push(head.id())?;
        revwalk.set_sorting(Sort::TIME)?;

        let mut result = Vec::new();
        for oid in revwalk {
            let commit = self.repo.find_commit(oid?)?;
            let time = commit.time().seconds();
            if time < oldest || time > newest {
                continue;
            }
            result.push(self.commit_info(&commit)?);
        }
        log::info!("read {} commits within {days_gap} days of HEAD", result.len());
        Ok(result)
    }

    fn commit_info(&self, commit: &git2::Commit) -> Result<CommitInfo> {
        let parent_count = commit.parent_count();
        // merge commits are never attributed, skip their diff
        let diff_entries = if parent_count > 1 {
            Vec::new()
        } else {
            self.diff_entries(commit)?
        };
        Ok(CommitInfo {
            hash: Some(commit.id().to_string()),
            author: user_info(&commit.author()),
            committer: user_info(&commit.committer()),
            author_timestamp: commit.author().when().seconds() * 1000,
            committer_timestamp: commit.committer().when().seconds() * 1000,
            diff_entries,
            parent_count,
            message: commit.message().unwrap_or("").to_string(),
        })
    }

    fn diff_entries(&self, commit: &git2::Commit) -> Result<Vec<DiffEntry>> {
        let tree = commit.tree()?;
        let parent_tree = if commit.parent_count() > 0 {
            Some(commit.parent(0)?.tree()?)
        } else {
            None
        };

        let mut opts = DiffOptions::new();
        let mut diff =
            self.repo
                .diff_tree_to_tree(parent_tree.as_ref(), Some(&tree), Some(&mut opts))?;
        let mut find = DiffFindOptions::new();
        find.renames(true);
        diff.find_similar(Some(&mut find))?;

        let mut entries = Vec::new();
        for delta in diff.deltas() {
            let Some(change_type) = to_change_type(delta.status()) else {
                continue;
            };
            let old_path = path_string(delta.old_file().path());
            let new_path = path_string(delta.new_file().path());
            let (old_path, new_path) = match (old_path, new_path) {
                (Some(old), Some(new)) => (old, new),
                (Some(path), None) | (None, Some(path)) => (path.clone(), path),
                (None, None) => continue,
            };
            entries.push(DiffEntry {
                old_path,
                new_path,
                change_type,
            });
        }
        Ok(entries)
    }

    /// Every file of the HEAD snapshot with its blob size.
    pub fn file_sizes(&self) -> Result<Vec<FileEntry>> {
        let tree = match self.repo.head() {
            Ok(head) => head.peel_to_tree()?,
            Err(e) if e.code() == git2::ErrorCode::UnbornBranch => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };
        self.tree_sizes(&tree)
    }

    /// Blob sizes below `tree`. Unreadable blobs are logged and count as 0 bytes.
    fn tree_sizes(&self, tree: &Tree) -> Result<Vec<FileEntry>> {
        let mut files = Vec::new();
        tree.walk(TreeWalkMode::PreOrder, |dir, entry| {
            if entry.kind() != Some(ObjectType::Blob) {
                return TreeWalkResult::Ok;
            }
            let Some(name) = entry.name() else {
                return TreeWalkResult::Ok;
            };
            let path = format!("{dir}{name}");
            let bytes = match self.repo.find_blob(entry.id()) {
                Ok(blob) => blob.size() as u64,
                Err(e) => {
                    log::warn!("missing object for {path}: {e}, using 0 bytes");
                    0
                }
            };
            files.push(FileEntry::new(path, bytes));
            TreeWalkResult::Ok
        })?;
        Ok(files)
    }
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
