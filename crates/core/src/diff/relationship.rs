use crate::error::{RefDiffError, Result};
use crate::model::NodeId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Outcome of comparing a before node with an after node.
///
/// The declaration order is significant: `ExtractSuperType..=Inline` is the
/// contiguous range of non-matching relationships.
#[derive(
    Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord,
)]
#[serde(rename_all = "camelCase")]
pub enum RelationshipType {
    Same,
    ConvertType,
    PullUp,
    PushDown,
    ChangeSignature,
    Move,
    Rename,
    MoveAndRename,

    ExtractSuperType,
    Extract,
    ExtractAndMove,
    Inline,

    Added,
    Removed,
}

impl RelationshipType {
    /// Relationships without a one-to-one structural correspondence.
    pub fn is_non_matching(self) -> bool {
        (RelationshipType::ExtractSuperType..=RelationshipType::Inline).contains(&self)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RelationshipType::Same => "same",
            RelationshipType::ConvertType => "convertType",
            RelationshipType::PullUp => "pullUp",
            RelationshipType::PushDown => "pushDown",
            RelationshipType::ChangeSignature => "changeSignature",
            RelationshipType::Move => "move",
            RelationshipType::Rename => "rename",
            RelationshipType::MoveAndRename => "moveAndRename",
            RelationshipType::ExtractSuperType => "extractSuperType",
            RelationshipType::Extract => "extract",
            RelationshipType::ExtractAndMove => "extractAndMove",
            RelationshipType::Inline => "inline",
            RelationshipType::Added => "added",
            RelationshipType::Removed => "removed",
        }
    }
}

impl fmt::Display for RelationshipType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A classified pairing of a node of the before tree and/or a node of the after tree.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Relationship {
    before: Option<NodeId>,
    after: Option<NodeId>,
    kind: RelationshipType,
}

impl Relationship {
    pub fn new(
        before: Option<NodeId>,
        after: Option<NodeId>,
        kind: RelationshipType,
    ) -> Result<Self> {
        if before.is_none() && after.is_none() {
            return Err(RefDiffError::EmptyRelationship);
        }
        Ok(Self {
            before,
            after,
            kind,
        })
    }

    pub fn pair(before: NodeId, after: NodeId, kind: RelationshipType) -> Self {
        Self {
            before: Some(before),
            after: Some(after),
            kind,
        }
    }

    pub fn added(after: NodeId) -> Self {
        Self {
            before: None,
            after: Some(after),
            kind: RelationshipType::Added,
        }
    }

    pub fn removed(before: NodeId) -> Self {
        Self {
            before: Some(before),
            after: None,
            kind: RelationshipType::Removed,
        }
    }

    pub fn before(&self) -> Option<NodeId> {
        self.before
    }

    pub fn after(&self) -> Option<NodeId> {
        self.after
    }

    pub fn kind(&self) -> RelationshipType {
        self.kind
    }

    pub fn is_non_matching(&self) -> bool {
        self.kind.is_non_matching()
    }
}
