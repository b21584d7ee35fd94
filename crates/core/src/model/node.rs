use super::location::Location;
use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use smol_str::SmolStr;
use std::fmt;

/// Index of a node inside the arena of the tree that created it.
///
/// Ids are only meaningful together with their tree; the before and after
/// trees of a comparison number their nodes independently.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u32);

impl NodeId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    File,
    Class,
    Function,
}

impl NodeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeKind::File => "File",
            NodeKind::Class => "Class",
            NodeKind::Function => "Function",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Everything a parser adapter supplies for a new node.
#[derive(Debug, Clone)]
pub struct NodeData {
    pub kind: NodeKind,
    pub local_name: SmolStr,
    pub namespace: Option<SmolStr>,
    pub parameters: Option<Vec<SmolStr>>,
    pub location: Location,
}

impl NodeData {
    pub fn new(kind: NodeKind, local_name: impl Into<SmolStr>, location: Location) -> Self {
        Self {
            kind,
            local_name: local_name.into(),
            namespace: None,
            parameters: None,
            location,
        }
    }

    pub fn with_namespace(mut self, namespace: impl Into<SmolStr>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    pub fn with_parameters<I, S>(mut self, parameters: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<SmolStr>,
    {
        self.parameters = Some(parameters.into_iter().map(Into::into).collect());
        self
    }
}

/// One structural element of a snapshot.
#[derive(Debug, Clone)]
pub struct Node {
    id: NodeId,
    pub kind: NodeKind,
    pub local_name: SmolStr,
    pub namespace: Option<SmolStr>,
    pub parameters: Option<Vec<SmolStr>>,
    pub location: Location,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    calls: IndexSet<NodeId>,
}

impl Node {
    pub(crate) fn new(id: NodeId, parent: Option<NodeId>, data: NodeData) -> Self {
        Self {
            id,
            kind: data.kind,
            local_name: data.local_name,
            namespace: data.namespace,
            parameters: data.parameters,
            location: data.location,
            parent,
            children: Vec::new(),
            calls: IndexSet::new(),
        }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Nodes this node calls, in the order the calls were first recorded.
    pub fn calls(&self) -> &IndexSet<NodeId> {
        &self.calls
    }

    pub fn is_file(&self) -> bool {
        self.kind == NodeKind::File
    }

    /// Namespace and local name joined with `/`, or the bare local name.
    pub fn qualified_name(&self) -> String {
        match self.namespace.as_deref() {
            Some(ns) if !ns.is_empty() => format!("{}/{}", ns, self.local_name),
            _ => self.local_name.to_string(),
        }
    }

    pub(crate) fn push_child(&mut self, child: NodeId) {
        self.children.push(child);
    }

    pub(crate) fn insert_call(&mut self, callee: NodeId) -> bool {
        self.calls.insert(callee)
    }
}
