mod location;
mod node;
mod tree;

pub use location::{Location, TokenIndex, TokenSpan};
pub use node::{Node, NodeData, NodeId, NodeKind};
pub use tree::{BreadthFirst, StructuralTree};
