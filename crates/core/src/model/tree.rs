use super::location::TokenIndex;
use super::node::{Node, NodeData, NodeId};
use std::collections::HashMap;
use std::ops::Index;
use std::path::Path;
use std::sync::Arc;

/// The node forest of one snapshot plus the token index of each of its files.
///
/// Nodes live in a flat arena; parent, child and call references are arena
/// indices, so recursive calls never create ownership cycles.
#[derive(Debug, Clone, Default)]
pub struct StructuralTree {
    nodes: Vec<Node>,
    roots: Vec<NodeId>,
    tokens: HashMap<Arc<Path>, TokenIndex>,
}

impl StructuralTree {
    pub fn new() -> Self {
        Self::default()
    }

    fn next_id(&self) -> NodeId {
        NodeId(self.nodes.len() as u32)
    }

    pub fn add_root(&mut self, data: NodeData) -> NodeId {
        let id = self.next_id();
        self.nodes.push(Node::new(id, None, data));
        self.roots.push(id);
        id
    }

    /// Creates a node owned by `parent`, appended after its existing children.
    pub fn add_child(&mut self, parent: NodeId, data: NodeData) -> NodeId {
        let id = self.next_id();
        self.nodes.push(Node::new(id, Some(parent), data));
        self.nodes[parent.index()].push_child(id);
        id
    }

    /// Records that `caller` calls `callee` and returns whether a new edge was
    /// added. Repeated edges and ids from outside this tree are ignored.
    pub fn add_call(&mut self, caller: NodeId, callee: NodeId) -> bool {
        if callee.index() >= self.nodes.len() {
            tracing::warn!("Ignoring call from {} to unknown node {}", caller, callee);
            return false;
        }
        match self.nodes.get_mut(caller.index()) {
            Some(node) => node.insert_call(callee),
            None => {
                tracing::warn!("Ignoring call from unknown node {} to {}", caller, callee);
                false
            }
        }
    }

    pub fn add_tokens_for_file(&mut self, file: impl Into<Arc<Path>>, tokens: TokenIndex) {
        self.tokens.insert(file.into(), tokens);
    }

    pub fn tokens_for(&self, file: &Path) -> Option<&TokenIndex> {
        self.tokens.get(file)
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn parent(&self, id: NodeId) -> Option<&Node> {
        self.node(id).parent().map(|p| self.node(p))
    }

    /// Walks from the parent of `id` up to its root.
    pub fn ancestors(&self, id: NodeId) -> impl Iterator<Item = &Node> {
        std::iter::successors(self.parent(id), move |n| self.parent(n.id()))
    }

    /// Nodes in breadth-first order: all roots, then all of their children in
    /// order, and so on until a row comes up empty.
    pub fn iter(&self) -> BreadthFirst<'_> {
        BreadthFirst {
            tree: self,
            row: self.roots.clone(),
            pos: 0,
        }
    }
}

impl Index<NodeId> for StructuralTree {
    type Output = Node;

    fn index(&self, id: NodeId) -> &Node {
        self.node(id)
    }
}

impl<'a> IntoIterator for &'a StructuralTree {
    type Item = &'a Node;
    type IntoIter = BreadthFirst<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

pub struct BreadthFirst<'a> {
    tree: &'a StructuralTree,
    row: Vec<NodeId>,
    pos: usize,
}

impl<'a> Iterator for BreadthFirst<'a> {
    type Item = &'a Node;

    fn next(&mut self) -> Option<Self::Item> {
        if self.pos == self.row.len() {
            let tree = self.tree;
            self.row = self
                .row
                .iter()
                .flat_map(|id| tree.node(*id).children().iter().copied())
                .collect();
            self.pos = 0;
            if self.row.is_empty() {
                return None;
            }
        }
        let id = self.row[self.pos];
        self.pos += 1;
        Some(self.tree.node(id))
    }
}
