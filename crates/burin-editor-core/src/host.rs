//! The host boundary: node↔path lookup and host-reported snapshots.
//!
//! The rendering collaborator owns a bidirectional map between host nodes and
//! structural paths, feeding it on mount and draining it on unmount. The core
//! only ever reads that map, through the [`NodeLookup`] capability, and
//! treats every miss as "unresolvable" rather than a fault: a node may not be
//! registered yet, may already be unregistered, or may belong to content
//! outside the editor entirely.

use std::collections::HashMap;
use std::hash::Hash;

use crate::path::Path;

/// Read-only capability for resolving host nodes to paths and back.
///
/// Implementations are owned by the rendering layer; their entries are only
/// valid for the currently rendered tree.
pub trait NodeLookup {
    /// The host's node handle type.
    type Node;

    fn path_for_node(&self, node: &Self::Node) -> Option<Path>;

    fn node_for_path(&self, path: &Path) -> Option<Self::Node>;
}

/// A host-observed selection: anchor/focus node handles with char offsets, as
/// reported by a live selection query.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HostSelection<N> {
    pub anchor_node: N,
    pub anchor_offset: usize,
    pub focus_node: N,
    pub focus_offset: usize,
}

/// A host-observed range: the start/end container shape carried by input
/// events rather than live selection objects.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HostRange<N> {
    pub start_container: N,
    pub start_offset: usize,
    pub end_container: N,
    pub end_offset: usize,
}

/// Reference implementation of the collaborator's bidirectional map.
///
/// `register` on mount, `unregister` on unmount; both directions are kept
/// consistent so that resolving a path to a node and back yields the original
/// path for every mounted entry.
#[derive(Clone, Debug)]
pub struct PathRegistry<N> {
    by_node: HashMap<N, Path>,
    by_path: HashMap<Path, N>,
}

impl<N> Default for PathRegistry<N> {
    fn default() -> Self {
        Self {
            by_node: HashMap::new(),
            by_path: HashMap::new(),
        }
    }
}

impl<N: Clone + Eq + Hash> PathRegistry<N> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `node` to `path`, displacing any previous binding of either.
    pub fn register(&mut self, node: N, path: Path) {
        if let Some(old_path) = self.by_node.remove(&node) {
            self.by_path.remove(&old_path);
        }
        if let Some(old_node) = self.by_path.remove(&path) {
            self.by_node.remove(&old_node);
        }
        self.by_node.insert(node.clone(), path.clone());
        self.by_path.insert(path, node);
    }

    /// Drop the binding for `node`, if any.
    pub fn unregister(&mut self, node: &N) {
        if let Some(path) = self.by_node.remove(node) {
            self.by_path.remove(&path);
        }
    }

    /// Drop every binding, as on a full re-render.
    pub fn clear(&mut self) {
        self.by_node.clear();
        self.by_path.clear();
    }

    pub fn len(&self) -> usize {
        self.by_node.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_node.is_empty()
    }
}

impl<N: Clone + Eq + Hash> NodeLookup for PathRegistry<N> {
    type Node = N;

    fn path_for_node(&self, node: &N) -> Option<Path> {
        self.by_node.get(node).cloned()
    }

    fn node_for_path(&self, path: &Path) -> Option<N> {
        self.by_path.get(path).cloned()
    }
}
