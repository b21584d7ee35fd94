pub mod config;
pub mod diff;
pub mod error;
pub mod logging;
pub mod model;
pub mod parser;
pub mod report;
pub mod util;

#[cfg(test)]
pub(crate) mod test_utils;

pub use config::FinderConfig;
pub use diff::{
    CodeSimilarity, Multiset, NodeRef, Relationship, RelationshipFinder, RelationshipType, Side,
    find_relationships, find_relationships_with,
};
pub use error::{RefDiffError, Result};
pub use model::{
    Location, Node, NodeData, NodeId, NodeKind, StructuralTree, TokenIndex, TokenSpan,
};
pub use parser::{FileContents, SourceCodeAnalyzer};
pub use report::DiffReport;
