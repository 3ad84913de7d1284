//! Parent-indexed node arena mirroring the remote hierarchy.

use crate::model::EntryKind;

/// Handle into a [`VirtualTree`]. Only valid for the tree that issued it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

#[derive(Debug)]
pub struct VirtualNode {
    name: String,
    path: String,
    kind: EntryKind,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    populated: bool,
}

impl VirtualNode {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Canonical virtual path, also the node's DirectoryIndex key.
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn kind(&self) -> EntryKind {
        self.kind
    }

    pub fn is_container(&self) -> bool {
        self.kind.is_container()
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Whether the children of this container have been fetched.
    pub fn is_populated(&self) -> bool {
        self.populated
    }
}

#[derive(Debug)]
pub struct VirtualTree {
    nodes: Vec<VirtualNode>,
}

impl VirtualTree {
    pub fn new(root_name: &str) -> Self {
        Self {
            nodes: vec![VirtualNode {
                name: root_name.to_string(),
                path: root_name.to_string(),
                kind: EntryKind::Container,
                parent: None,
                children: Vec::new(),
                populated: false,
            }],
        }
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Panics on an id from another tree.
    pub fn get(&self, id: NodeId) -> &VirtualNode {
        &self.nodes[id.0]
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).parent
    }

    /// Exact, case-sensitive lookup among the direct children of `parent`.
    pub fn child(&self, parent: NodeId, name: &str) -> Option<NodeId> {
        self.get(parent)
            .children
            .iter()
            .copied()
            .find(|c| self.get(*c).name == name)
    }

    pub(super) fn add_child(&mut self, parent: NodeId, name: String, kind: EntryKind) -> NodeId {
        let id = NodeId(self.nodes.len());
        let path = format!("{}/{}", self.get(parent).path, name);
        self.nodes.push(VirtualNode {
            name,
            path,
            kind,
            parent: Some(parent),
            children: Vec::new(),
            populated: false,
        });
        self.nodes[parent.0].children.push(id);
        id
    }

    pub(super) fn mark_populated(&mut self, id: NodeId) {
        let node = &mut self.nodes[id.0];
        assert!(
            node.kind.is_container() && !node.populated,
            "populated flag set twice or on a leaf: {}",
            node.path
        );
        node.populated = true;
    }
}
