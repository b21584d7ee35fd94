use super::relationship::{Relationship, RelationshipType};
use super::similarity::{CodeSimilarity, NodeRef};
use crate::config::FinderConfig;
use crate::error::Result;
use crate::model::{NodeId, StructuralTree};
use crate::parser::FileContents;
use indexmap::{IndexMap, IndexSet};

/// Aligns the nodes of two snapshots and classifies every pairing.
///
/// Matching runs in greedy passes over nodes still unmatched: identical names
/// first, then token similarity, then shared matched children. Calls between
/// matched nodes and leftover nodes are then inspected for extracted and
/// inlined code. What remains is reported as added or removed.
pub struct RelationshipFinder<'a> {
    before: &'a StructuralTree,
    after: &'a StructuralTree,
    similarity: CodeSimilarity,
    config: FinderConfig,
    matches: Vec<(NodeId, NodeId)>,
    unmatched_before: IndexSet<NodeId>,
    unmatched_after: IndexSet<NodeId>,
    before_to_after: IndexMap<NodeId, NodeId>,
    after_to_before: IndexMap<NodeId, NodeId>,
}

impl<'a> RelationshipFinder<'a> {
    pub fn new(
        before: &'a StructuralTree,
        after: &'a StructuralTree,
        before_files: &FileContents,
        after_files: &FileContents,
        config: FinderConfig,
    ) -> Result<Self> {
        config.validate()?;
        let similarity = CodeSimilarity::new(before, after, before_files, after_files)?;
        Ok(Self {
            before,
            after,
            similarity,
            config,
            matches: Vec::new(),
            unmatched_before: before.iter().map(|n| n.id()).collect(),
            unmatched_after: after.iter().map(|n| n.id()).collect(),
            before_to_after: IndexMap::new(),
            after_to_before: IndexMap::new(),
        })
    }

    pub fn similarity(&self) -> &CodeSimilarity {
        &self.similarity
    }

    pub fn find_relationships(mut self) -> Vec<Relationship> {
        let mut relationships = Vec::new();

        let (before, after) = (self.before, self.after);
        self.match_by_id(before.roots(), after.roots());
        tracing::debug!("Identity pass matched {} pairs", self.matches.len());

        self.match_by_similarity();
        tracing::debug!("Similarity pass done, {} pairs matched", self.matches.len());

        self.match_by_children();
        tracing::debug!("Children pass done, {} pairs matched", self.matches.len());

        self.resolve_matches(&mut relationships);
        self.find_extracted(&mut relationships, false);
        self.find_extracted(&mut relationships, true);
        self.find_inlined(&mut relationships);

        relationships.extend(self.unmatched_before.iter().map(|&b| Relationship::removed(b)));
        relationships.extend(self.unmatched_after.iter().map(|&a| Relationship::added(a)));

        tracing::debug!(
            "Found {} relationships ({} removed, {} added)",
            relationships.len(),
            self.unmatched_before.len(),
            self.unmatched_after.len()
        );
        relationships
    }

    fn match_by_id(&mut self, before_nodes: &[NodeId], after_nodes: &[NodeId]) {
        for &b in before_nodes {
            for &a in after_nodes {
                let (bn, an) = (&self.before[b], &self.after[a]);
                if bn.namespace == an.namespace && bn.local_name == an.local_name {
                    self.add_match(b, a);
                }
            }
        }
    }

    fn match_by_similarity(&mut self) {
        let candidates: Vec<NodeId> = self.unmatched_before.iter().copied().collect();
        for b in candidates {
            if !self.unmatched_before.contains(&b) {
                continue;
            }
            let targets: Vec<NodeId> = self.unmatched_after.iter().copied().collect();
            for a in targets {
                if !self.unmatched_after.contains(&a) {
                    continue;
                }
                if self.classify(b, a).is_some() {
                    self.add_match(b, a);
                    break;
                }
            }
        }
    }

    fn match_by_children(&mut self) {
        let candidates: Vec<NodeId> = self.unmatched_before.iter().copied().collect();
        for b in candidates {
            if !self.unmatched_before.contains(&b) {
                continue;
            }
            let targets: Vec<NodeId> = self.unmatched_after.iter().copied().collect();
            for a in targets {
                if !self.unmatched_after.contains(&a) {
                    continue;
                }
                if self.matching_children(b, a) > 1
                    && self
                        .similarity
                        .name_sim(NodeRef::before(b), NodeRef::after(a))
                        > self.config.threshold
                {
                    self.add_match(b, a);
                    break;
                }
            }
        }
    }

    fn matching_children(&self, before: NodeId, after: NodeId) -> usize {
        let after_children = self.after[after].children();
        self.before[before]
            .children()
            .iter()
            .filter(|c| {
                self.before_to_after
                    .get(*c)
                    .is_some_and(|m| after_children.contains(m))
            })
            .count()
    }

    fn resolve_matches(&self, relationships: &mut Vec<Relationship>) {
        for &(b, a) in &self.matches {
            let kind = self
                .classify(b, a)
                .unwrap_or_else(|| self.classify_forced(b, a));
            tracing::trace!(
                "{} {} -> {}",
                kind,
                self.before[b].qualified_name(),
                self.after[a].qualified_name()
            );
            relationships.push(Relationship::pair(b, a, kind));
        }
    }

    fn find_extracted(&mut self, relationships: &mut Vec<Relationship>, moved: bool) {
        let kind = if moved {
            RelationshipType::ExtractAndMove
        } else {
            RelationshipType::Extract
        };
        let pairs: Vec<(NodeId, NodeId)> =
            self.before_to_after.iter().map(|(&b, &a)| (b, a)).collect();
        for (before, after) in pairs {
            let candidates: Vec<NodeId> = self
                .unmatched_after
                .iter()
                .copied()
                .filter(|c| self.after[after].calls().contains(c))
                .collect();
            for extracted in candidates {
                if !self.unmatched_after.contains(&extracted) {
                    continue;
                }
                if self.same_parent(before, extracted) == moved {
                    continue;
                }
                let score = self.similarity.extracted_sim(before, after, extracted);
                if score > self.config.threshold {
                    tracing::trace!(
                        "{} {} -> {} ({:.3})",
                        kind,
                        self.before[before].qualified_name(),
                        self.after[extracted].qualified_name(),
                        score
                    );
                    relationships.push(Relationship::pair(before, extracted, kind));
                    self.unmatched_after.shift_remove(&extracted);
                }
            }
        }
    }

    fn find_inlined(&mut self, relationships: &mut Vec<Relationship>) {
        let candidates: Vec<NodeId> = self.unmatched_before.iter().copied().collect();
        for inlined in candidates {
            let found = self.after_to_before.iter().find_map(|(&a, &b)| {
                if !self.before[b].calls().contains(&inlined) {
                    return None;
                }
                let score = self.similarity.inline_sim(b, a, inlined);
                (score > self.config.threshold).then_some((a, score))
            });
            if let Some((after, score)) = found {
                tracing::trace!(
                    "inline {} -> {} ({:.3})",
                    self.before[inlined].qualified_name(),
                    self.after[after].qualified_name(),
                    score
                );
                relationships.push(Relationship::pair(inlined, after, RelationshipType::Inline));
                self.unmatched_before.shift_remove(&inlined);
            }
        }
    }

    /// Roots share a parent when their namespaces agree; other nodes when
    /// their parents are matched to each other.
    fn same_parent(&self, before: NodeId, after: NodeId) -> bool {
        let (bn, an) = (&self.before[before], &self.after[after]);
        match (bn.parent(), an.parent()) {
            (Some(bp), Some(ap)) => self.before_to_after.get(&bp) == Some(&ap),
            (None, None) => bn.namespace == an.namespace,
            _ => false,
        }
    }

    fn same_signature(&self, before: NodeId, after: NodeId) -> bool {
        let (bn, an) = (&self.before[before], &self.after[after]);
        bn.local_name == an.local_name && bn.parameters == an.parameters
    }

    /// The gated classification used both to accept a similarity match and to
    /// type a confirmed one.
    fn classify(&self, before: NodeId, after: NodeId) -> Option<RelationshipType> {
        let (bn, an) = (&self.before[before], &self.after[after]);
        if bn.kind != an.kind {
            return None;
        }
        let same_parent = self.same_parent(before, after);
        let same_signature = self.same_signature(before, after);
        if same_signature && same_parent {
            return Some(RelationshipType::Same);
        }

        let similar = self
            .similarity
            .sim(NodeRef::before(before), NodeRef::after(after))
            > self.config.threshold;
        if !similar {
            return None;
        }
        Some(rename_or_move(bn.local_name == an.local_name, same_parent))
    }

    /// Types a confirmed match whose evidence does not pass the similarity gate.
    fn classify_forced(&self, before: NodeId, after: NodeId) -> RelationshipType {
        let (bn, an) = (&self.before[before], &self.after[after]);
        if bn.kind != an.kind {
            return RelationshipType::ConvertType;
        }
        rename_or_move(bn.local_name == an.local_name, self.same_parent(before, after))
    }

    fn add_match(&mut self, before: NodeId, after: NodeId) {
        if !self.unmatched_before.contains(&before) || !self.unmatched_after.contains(&after) {
            return;
        }
        self.unmatched_before.shift_remove(&before);
        self.unmatched_after.shift_remove(&after);
        self.before_to_after.insert(before, after);
        self.after_to_before.insert(after, before);
        self.matches.push((before, after));

        let (before_tree, after_tree) = (self.before, self.after);
        self.match_by_id(before_tree[before].children(), after_tree[after].children());
    }
}

fn rename_or_move(same_name: bool, same_parent: bool) -> RelationshipType {
    match (same_name, same_parent) {
        (true, true) => RelationshipType::ChangeSignature,
        (true, false) => RelationshipType::Move,
        (false, true) => RelationshipType::Rename,
        (false, false) => RelationshipType::MoveAndRename,
    }
}
