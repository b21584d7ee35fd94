use super::multiset::Multiset;
use crate::error::{RefDiffError, Result};
use crate::model::{NodeId, StructuralTree};
use crate::parser::FileContents;
use indexmap::IndexMap;
use lasso::{Rodeo, Spur};
use std::collections::{HashMap, HashSet};
use std::path::Path;
use std::sync::Arc;

/// Which snapshot a node belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Side {
    Before,
    After,
}

/// A node id qualified by the tree it lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeRef {
    pub side: Side,
    pub id: NodeId,
}

impl NodeRef {
    pub fn before(id: NodeId) -> Self {
        Self {
            side: Side::Before,
            id,
        }
    }

    pub fn after(id: NodeId) -> Self {
        Self {
            side: Side::After,
            id,
        }
    }
}

#[derive(Debug, Default)]
struct NodeProfile {
    tokens: Multiset<Spur>,
    body: Option<Multiset<Spur>>,
    name: Multiset<Spur>,
    parameters: Vec<Spur>,
}

#[derive(Debug, Default)]
struct TreeProfile {
    nodes: Vec<NodeProfile>,
    /// Number of nodes containing each token at least once.
    token_df: Multiset<Spur>,
    name_df: Multiset<Spur>,
}

/// Token-based similarity between the nodes of two snapshots.
///
/// Every node is reduced to three bags of interned tokens: the tokens of its
/// full extent, the tokens of its body, and the camel-case segments of its name.
/// Bags are compared with a Jaccard coefficient weighted by inverse document
/// frequency, where a document is a node.
pub struct CodeSimilarity {
    interner: Rodeo,
    before: TreeProfile,
    after: TreeProfile,
    token_idf: IndexMap<Spur, f64>,
    name_idf: IndexMap<Spur, f64>,
}

impl CodeSimilarity {
    pub fn new(
        before: &StructuralTree,
        after: &StructuralTree,
        before_files: &FileContents,
        after_files: &FileContents,
    ) -> Result<Self> {
        let mut interner = Rodeo::default();
        let before_profile = profile_tree(&mut interner, before, before_files)?;
        let after_profile = profile_tree(&mut interner, after, after_files)?;

        let documents = before.len().max(after.len()) as f64;
        let idf = |df: Multiset<Spur>| -> IndexMap<Spur, f64> {
            df.iter()
                .map(|(token, &count)| (*token, (1.0 + documents / count as f64).ln()))
                .collect()
        };
        let token_idf = idf(Multiset::max(&before_profile.token_df, &after_profile.token_df));
        let name_idf = idf(Multiset::max(&before_profile.name_df, &after_profile.name_df));

        tracing::debug!(
            "Similarity index built: {} tokens, {} name tokens, {} documents",
            token_idf.len(),
            name_idf.len(),
            documents
        );

        Ok(Self {
            interner,
            before: before_profile,
            after: after_profile,
            token_idf,
            name_idf,
        })
    }

    fn profile(&self, node: NodeRef) -> &NodeProfile {
        let tree = match node.side {
            Side::Before => &self.before,
            Side::After => &self.after,
        };
        &tree.nodes[node.id.index()]
    }

    fn body(&self, node: NodeRef) -> Multiset<Spur> {
        self.profile(node).body.clone().unwrap_or_default()
    }

    /// Weighted Jaccard over the full-extent tokens.
    pub fn sim(&self, a: NodeRef, b: NodeRef) -> f64 {
        weighted_jaccard(
            &self.token_idf,
            &self.profile(a).tokens,
            &self.profile(b).tokens,
        )
    }

    /// Weighted Jaccard over the body tokens. A node without a body has an empty body bag.
    pub fn body_sim(&self, a: NodeRef, b: NodeRef) -> f64 {
        weighted_jaccard(&self.token_idf, &self.body(a), &self.body(b))
    }

    pub fn name_sim(&self, a: NodeRef, b: NodeRef) -> f64 {
        weighted_jaccard(
            &self.name_idf,
            &self.profile(a).name,
            &self.profile(b).name,
        )
    }

    /// How much of `extracted`'s body is made of code that left `before` on the way to `after`.
    ///
    /// `return` and the parameter names of both matched nodes are ignored.
    pub fn extracted_sim(&self, before: NodeId, after: NodeId, extracted: NodeId) -> f64 {
        let before = NodeRef::before(before);
        let after = NodeRef::after(after);
        let extracted = NodeRef::after(extracted);

        let mut omitted: HashSet<Spur> = HashSet::new();
        if let Some(ret) = self.interner.get("return") {
            omitted.insert(ret);
        }
        omitted.extend(self.profile(before).parameters.iter().copied());
        omitted.extend(self.profile(after).parameters.iter().copied());

        let removed = self.body(before).sub(&self.body(after));
        contained_weighted_jaccard(
            &self.token_idf,
            &self.body(extracted).remove_keys(&omitted),
            &removed.remove_keys(&omitted),
        )
    }

    /// How much of `inlined`'s body shows up as code that `after` gained over `before`.
    pub fn inline_sim(&self, before: NodeId, after: NodeId, inlined: NodeId) -> f64 {
        let added = self
            .body(NodeRef::after(after))
            .sub(&self.body(NodeRef::before(before)));
        contained_weighted_jaccard(&self.token_idf, &self.body(NodeRef::before(inlined)), &added)
    }
}

fn profile_tree(
    interner: &mut Rodeo,
    tree: &StructuralTree,
    files: &FileContents,
) -> Result<TreeProfile> {
    let mut profile = TreeProfile {
        nodes: (0..tree.len()).map(|_| NodeProfile::default()).collect(),
        ..Default::default()
    };
    let mut file_tokens: HashMap<Arc<Path>, Vec<Spur>> = HashMap::new();

    for node in tree {
        let location = &node.location;
        let index = tree
            .tokens_for(&location.file)
            .ok_or_else(|| RefDiffError::MissingTokens {
                file: location.file.to_path_buf(),
            })?;

        if !file_tokens.contains_key(&location.file) {
            let interned = intern_file(interner, &location.file, index.tokens(), files)?;
            file_tokens.insert(location.file.clone(), interned);
        }
        let interned = &file_tokens[&location.file];

        let has_body = location.has_body();
        let mut tokens = Multiset::new();
        let mut body = Multiset::new();
        for (i, span) in index.within(location.begin, location.end) {
            tokens.add(interned[i]);
            if has_body && span.start >= location.body_begin && span.end <= location.body_end {
                body.add(interned[i]);
            }
        }

        let mut name = Multiset::new();
        let depth = tree.ancestors(node.id()).count();
        for _ in 0..=depth {
            for segment in split_name(&node.local_name) {
                name.add(interner.get_or_intern(segment));
            }
        }

        let parameters = node
            .parameters
            .iter()
            .flatten()
            .map(|p| interner.get_or_intern(p.as_str()))
            .collect();

        profile.token_df.extend(tokens.keys().copied());
        profile.name_df.extend(name.keys().copied());
        profile.nodes[node.id().index()] = NodeProfile {
            tokens,
            body: has_body.then_some(body),
            name,
            parameters,
        };
    }

    Ok(profile)
}

fn intern_file(
    interner: &mut Rodeo,
    file: &Path,
    spans: &[crate::model::TokenSpan],
    files: &FileContents,
) -> Result<Vec<Spur>> {
    let contents = files
        .get(file)
        .ok_or_else(|| RefDiffError::MissingContents {
            file: file.to_path_buf(),
        })?;
    spans
        .iter()
        .map(|span| {
            let bytes = contents
                .get(span.range())
                .ok_or_else(|| RefDiffError::TokenOutOfBounds {
                    file: file.to_path_buf(),
                    start: span.start,
                    end: span.end,
                    len: contents.len(),
                })?;
            Ok(interner.get_or_intern(String::from_utf8_lossy(bytes)))
        })
        .collect()
}

/// Splits before every uppercase letter. A name starting with an uppercase
/// letter yields a leading empty segment.
pub(crate) fn split_name(name: &str) -> Vec<&str> {
    let mut segments = Vec::new();
    let mut start = 0;
    for (i, c) in name.char_indices() {
        if is_own_uppercase(c) {
            segments.push(&name[start..i]);
            start = i;
        }
    }
    segments.push(&name[start..]);
    segments
}

/// True when upper-casing `c` leaves it unchanged, which holds for capitals
/// and for caseless characters such as `_`, `$`, `.` and digits.
fn is_own_uppercase(c: char) -> bool {
    let mut upper = c.to_uppercase();
    upper.next() == Some(c) && upper.next().is_none()
}

fn weighted_jaccard(idf: &IndexMap<Spur, f64>, a: &Multiset<Spur>, b: &Multiset<Spur>) -> f64 {
    let mut top = 0.0;
    let mut bottom = 0.0;
    for token in a.keys().chain(b.keys().filter(|k| a.get(*k) == 0)) {
        let weight = idf.get(token).copied().unwrap_or(0.0);
        let (x, y) = (a.get(token), b.get(token));
        top += x.min(y) as f64 * weight;
        bottom += x.max(y) as f64 * weight;
    }
    top / bottom
}

/// Share of `a`'s weight that is also present in `b`.
fn contained_weighted_jaccard(
    idf: &IndexMap<Spur, f64>,
    a: &Multiset<Spur>,
    b: &Multiset<Spur>,
) -> f64 {
    let mut top = 0.0;
    let mut bottom = 0.0;
    for (token, &count) in a {
        let weight = idf.get(token).copied().unwrap_or(0.0);
        top += count.min(b.get(token)) as f64 * weight;
        bottom += count as f64 * weight;
    }
    top / bottom
}
