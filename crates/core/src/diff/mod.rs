//! Relationship detection between two snapshots of a code base.

mod finder;
mod multiset;
mod relationship;
mod similarity;

pub use finder::RelationshipFinder;
pub use multiset::Multiset;
pub use relationship::{Relationship, RelationshipType};
pub use similarity::{CodeSimilarity, NodeRef, Side};

use crate::config::FinderConfig;
use crate::error::Result;
use crate::model::StructuralTree;
use crate::parser::FileContents;

/// Compares two snapshots with the default configuration.
pub fn find_relationships(
    before: &StructuralTree,
    after: &StructuralTree,
    before_files: &FileContents,
    after_files: &FileContents,
) -> Result<Vec<Relationship>> {
    find_relationships_with(before, after, before_files, after_files, FinderConfig::default())
}

pub fn find_relationships_with(
    before: &StructuralTree,
    after: &StructuralTree,
    before_files: &FileContents,
    after_files: &FileContents,
    config: FinderConfig,
) -> Result<Vec<Relationship>> {
    let finder = RelationshipFinder::new(before, after, before_files, after_files, config)?;
    Ok(finder.find_relationships())
}
