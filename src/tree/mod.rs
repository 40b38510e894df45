//! File tree aggregation.
//!
//! The tree is an arena of nodes addressed by index, built from a flat
//! `(path, bytes)` listing. Directory sizes are the sum of their files.
//! Aggregation visits every node with an explicit stack and stores the
//! bus factor status and contributor list computed for the node's files.

use std::collections::{BTreeMap, HashMap};

use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};

use crate::authorship::UserStats;
use crate::identity::UserId;
use crate::selector::BusFactorStatus;
use crate::util::round4;

pub type NodeId = usize;

pub const ROOT: NodeId = 0;
const ROOT_PATH: &str = ".";

/// One file of the analyzed snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileEntry {
    pub path: String,
    pub bytes: u64,
}

impl FileEntry {
    pub fn new(path: impl Into<String>, bytes: u64) -> Self {
        Self {
            path: path.into(),
            bytes,
        }
    }
}

/// A contributor as shown on a node.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserVis {
    pub email: String,
    pub authorship: f64,
    pub normalized_authorship: f64,
    pub commits: u32,
    pub reviews: u32,
    pub main_contributor: bool,
    pub minor_contributor: bool,
}

impl UserVis {
    pub fn new(email: &str, stats: &UserStats) -> Self {
        Self {
            email: email.to_string(),
            authorship: round4(stats.authorship),
            normalized_authorship: round4(stats.normalized_authorship),
            commits: stats.commits,
            reviews: stats.reviews,
            main_contributor: stats.main_contributor,
            minor_contributor: stats.minor_contributor,
        }
    }

    /// Ranked candidates first, in rank order, then every other user with
    /// recorded authorship.
    pub fn convert<'a>(
        ranked: &[UserId],
        stats: &BTreeMap<UserId, UserStats>,
        display: impl Fn(UserId) -> Option<&'a str>,
    ) -> Vec<UserVis> {
        let email = |id: UserId| display(id).map_or_else(|| format!("user#{id}"), str::to_string);
        let mut users: Vec<UserVis> = ranked
            .iter()
            .filter_map(|&id| stats.get(&id).map(|s| UserVis::new(&email(id), s)))
            .collect();
        users.extend(
            stats
                .iter()
                .filter(|(id, _)| !ranked.contains(*id))
                .map(|(&id, s)| UserVis::new(&email(id), s)),
        );
        users
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub name: String,
    pub path: String,
    pub bytes: u64,
    pub children: Vec<NodeId>,
    pub is_file: bool,
    pub status: Option<BusFactorStatus>,
    pub users: Vec<UserVis>,
}

impl Node {
    fn new(name: &str, path: &str, is_file: bool) -> Self {
        Self {
            name: name.to_string(),
            path: path.to_string(),
            bytes: 0,
            children: Vec::new(),
            is_file,
            status: None,
            users: Vec::new(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Tree {
    nodes: Vec<Node>,
    by_path: HashMap<String, NodeId>,
}

impl Tree {
    /// Build a tree rooted at `name` from a flat file listing.
    pub fn build<'a>(name: &str, files: impl IntoIterator<Item = &'a FileEntry>) -> Self {
        let mut tree = Tree {
            nodes: vec![Node::new(name, ROOT_PATH, false)],
            by_path: HashMap::new(),
        };
        for file in files {
            tree.insert(file);
        }
        tree
    }

    fn insert(&mut self, file: &FileEntry) {
        let parts: Vec<&str> = file.path.split('/').filter(|p| !p.is_empty()).collect();
        if parts.is_empty() {
            return;
        }
        if self.by_path.contains_key(&parts.join("/")) {
            log::debug!("duplicate path {} in listing", file.path);
            return;
        }

        let mut current = ROOT;
        let mut path = String::new();
        self.nodes[ROOT].bytes += file.bytes;
        for (i, part) in parts.iter().enumerate() {
            if !path.is_empty() {
                path.push('/');
            }
            path.push_str(part);
            let next = match self.by_path.get(&path) {
                Some(&id) => id,
                None => {
                    let id = self.nodes.len();
                    let is_file = i + 1 == parts.len();
                    self.nodes.push(Node::new(part, &path, is_file));
                    self.nodes[current].children.push(id);
                    self.by_path.insert(path.clone(), id);
                    id
                }
            };
            self.nodes[next].bytes += file.bytes;
            current = next;
        }
    }

    pub fn root(&self) -> &Node {
        &self.nodes[ROOT]
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes[ROOT].children.is_empty()
    }

    /// Node id for a slash-separated path. `"."` and `""` name the root.
    pub fn find(&self, path: &str) -> Option<NodeId> {
        let trimmed = path.trim_matches('/');
        if trimmed.is_empty() || trimmed == ROOT_PATH {
            return Some(ROOT);
        }
        self.by_path.get(trimmed).copied()
    }

    /// Paths of every file below (or at) `id`.
    pub fn file_paths(&self, id: NodeId) -> Vec<String> {
        let mut result = Vec::new();
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            let Some(node) = self.nodes.get(current) else {
                continue;
            };
            if node.is_file {
                result.push(node.path.clone());
            } else {
                stack.extend(node.children.iter().copied());
            }
        }
        result
    }

    /// Pre-order walk from `id` down to `max_depth` levels, with depths.
    pub fn descendants(&self, id: NodeId, max_depth: usize) -> Vec<(NodeId, usize)> {
        let mut result = Vec::new();
        let mut stack = vec![(id, 0)];
        while let Some((current, depth)) = stack.pop() {
            let Some(node) = self.nodes.get(current) else {
                continue;
            };
            result.push((current, depth));
            if depth < max_depth {
                stack.extend(node.children.iter().rev().map(|&c| (c, depth + 1)));
            }
        }
        result
    }

    /// Fill status and contributors of every node. `evaluate` receives the
    /// file paths below the node; visiting order is irrelevant.
    pub fn aggregate<F>(&mut self, mut evaluate: F)
    where
        F: FnMut(&[String]) -> (BusFactorStatus, Vec<UserVis>),
    {
        let mut stack = vec![ROOT];
        while let Some(id) = stack.pop() {
            stack.extend(self.nodes[id].children.iter().copied());
            let paths = self.file_paths(id);
            let (status, users) = evaluate(&paths);
            let node = &mut self.nodes[id];
            node.status = Some(status);
            node.users = users;
        }
    }

    /// Serializable view of the subtree rooted at `id`.
    pub fn view(&self, id: NodeId) -> NodeView<'_> {
        NodeView { tree: self, id }
    }
}

impl Serialize for Tree {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.view(ROOT).serialize(serializer)
    }
}

pub struct NodeView<'a> {
    tree: &'a Tree,
    id: NodeId,
}

impl Serialize for NodeView<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let node = &self.tree.nodes[self.id];
        let children: Vec<NodeView<'_>> = node
            .children
            .iter()
            .map(|&id| self.tree.view(id))
            .collect();
        let mut state = serializer.serialize_struct("Node", 6)?;
        state.serialize_field("name", &node.name)?;
        state.serialize_field("path", &node.path)?;
        state.serialize_field("bytes", &node.bytes)?;
        state.serialize_field("bus_factor_status", &node.status)?;
        state.serialize_field("users", &node.users)?;
        state.serialize_field("children", &children)?;
        state.end()
    }
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
