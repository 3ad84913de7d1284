//! Lazily populated local mirror of the remote hierarchy.
//!
//! Nodes only appear as a side effect of populating their parent, so the
//! arena always forms a tree rooted at `~`, and every node has exactly one
//! DirectoryIndex entry keyed by its canonical path.

use std::collections::HashSet;
use std::path::Path;

use crate::model::{RemoteEntry, Snapshot};
use crate::remote::{ListingClient, RemoteError};

mod index;
mod naming;
mod scratch;
mod tree;

pub use self::index::DirectoryIndex;
pub use self::naming::{sanitize_component, unique_component};
pub use self::scratch::ScratchMirror;
pub use self::tree::{NodeId, VirtualNode, VirtualTree};

/// Canonical path (and component name) of the mirror root.
pub const ROOT_PATH: &str = "~";

pub struct Mirror<C> {
    client: C,
    tree: VirtualTree,
    index: DirectoryIndex,
    scratch: Option<ScratchMirror>,
    remote_calls: usize,
}

impl<C: ListingClient> Mirror<C> {
    /// Binds the mirror root to the remote container `root_id`. Nothing is
    /// fetched yet.
    pub fn new(client: C, root_id: &str, scratch: Option<ScratchMirror>) -> Self {
        let tree = VirtualTree::new(ROOT_PATH);
        let mut index = DirectoryIndex::default();
        index.insert(
            ROOT_PATH.to_string(),
            RemoteEntry::container(root_id, ROOT_PATH),
        );
        if let Some(scratch) = &scratch {
            tracing::debug!(dir = %scratch.path().display(), "scratch mirror created");
        }
        Self {
            client,
            tree,
            index,
            scratch,
            remote_calls: 0,
        }
    }

    pub fn root(&self) -> NodeId {
        self.tree.root()
    }

    pub fn tree(&self) -> &VirtualTree {
        &self.tree
    }

    pub fn index(&self) -> &DirectoryIndex {
        &self.index
    }

    /// Listing calls issued by this mirror so far.
    pub fn remote_calls(&self) -> usize {
        self.remote_calls
    }

    pub fn scratch_path(&self) -> Option<&Path> {
        self.scratch.as_ref().map(|s| s.path())
    }

    pub fn node(&self, id: NodeId) -> &VirtualNode {
        self.tree.get(id)
    }

    pub fn path(&self, id: NodeId) -> &str {
        self.tree.get(id).path()
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.tree.parent(id)
    }

    pub fn child(&self, id: NodeId, name: &str) -> Option<NodeId> {
        self.tree.child(id, name)
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.tree.get(id).children()
    }

    /// Metadata for a materialized node. A node without an index entry means
    /// the mirror is corrupt, which is not recoverable.
    pub fn entry(&self, id: NodeId) -> &RemoteEntry {
        let path = self.path(id);
        match self.index.get(path) {
            Some(entry) => entry,
            None => panic!("directory index has no entry for materialized node {}", path),
        }
    }

    /// Fetches the children of an unpopulated container. Returns whether a
    /// fetch happened; leaves and populated containers are left alone. On
    /// error the node stays unpopulated and nothing is registered.
    pub fn populate(&mut self, id: NodeId) -> Result<bool, RemoteError> {
        let node = self.tree.get(id);
        if !node.is_container() || node.is_populated() {
            return Ok(false);
        }

        let remote_id = self.entry(id).id.clone();
        self.remote_calls += 1;
        let listing = self.client.list_children(&remote_id)?;

        let mut taken = HashSet::with_capacity(listing.len());
        for entry in listing {
            let component = unique_component(&entry.name, &taken);
            taken.insert(component.clone());
            let kind = entry.kind;
            let child = self.tree.add_child(id, component, kind);
            let path = self.tree.get(child).path().to_string();
            if let Some(scratch) = &self.scratch
                && let Err(err) = scratch.materialize(&path, kind)
            {
                tracing::warn!(%path, %err, "scratch mirror write failed");
            }
            self.index.insert(path, entry);
        }
        self.tree.mark_populated(id);

        tracing::debug!(
            path = self.path(id),
            children = self.children(id).len(),
            "populated container"
        );
        Ok(true)
    }

    /// Leaf entries under `id`, keyed relative to its path.
    pub fn snapshot(&self, id: NodeId) -> Snapshot {
        self.index.snapshot_under(self.path(id))
    }

    /// Drops the mirror, removing the scratch directory if there is one.
    pub fn close(self) {
        if let Some(scratch) = self.scratch {
            let dir = scratch.path().to_path_buf();
            if let Err(err) = scratch.close() {
                tracing::warn!(dir = %dir.display(), %err, "failed to remove scratch mirror");
            }
        }
    }
}

#[cfg(test)]
#[path = "tests/mirror/mirror_tests.rs"]
mod tests;
