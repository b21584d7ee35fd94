//! Presentation-neutral grouping of a relationship list by file.

use crate::diff::{Relationship, RelationshipType};
use crate::error::{RefDiffError, Result};
use crate::model::{Node, NodeId, NodeKind, StructuralTree};
use crate::parser::FileContents;
use serde::Serialize;
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct NodeSummary {
    pub name: String,
    pub kind: NodeKind,
    pub file: String,
    pub line_start: usize,
    pub line_end: usize,
    pub begin: usize,
    pub end: usize,
}

impl NodeSummary {
    fn of(node: &Node) -> Self {
        Self {
            name: node.local_name.to_string(),
            kind: node.kind,
            file: node.location.file.to_string_lossy().to_string(),
            line_start: node.location.line_start,
            line_end: node.location.line_end,
            begin: node.location.begin,
            end: node.location.end,
        }
    }
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct EntryReport {
    pub label: String,
    pub description: String,
    pub kind: RelationshipType,
    pub node_kind: NodeKind,
    pub modified: bool,
    pub before: Option<NodeSummary>,
    pub after: Option<NodeSummary>,
    /// The extracted or inlined node explaining part of this entry's change.
    pub related: Option<NodeSummary>,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct FileReport {
    pub label: String,
    pub description: String,
    pub kind: RelationshipType,
    pub modified: bool,
    pub before: Option<NodeSummary>,
    pub after: Option<NodeSummary>,
    pub entries: Vec<EntryReport>,
}

impl FileReport {
    fn is_unchanged(&self) -> bool {
        self.kind == RelationshipType::Same && !self.modified && self.entries.is_empty()
    }
}

#[derive(Serialize, Debug, Clone, Default, PartialEq)]
pub struct DiffReport {
    pub files: Vec<FileReport>,
}

struct Inputs<'a> {
    before: &'a StructuralTree,
    after: &'a StructuralTree,
    before_files: &'a FileContents,
    after_files: &'a FileContents,
}

impl Inputs<'_> {
    fn contents<'c>(files: &'c FileContents, file: &Path) -> Result<&'c [u8]> {
        files
            .get(file)
            .map(Vec::as_slice)
            .ok_or_else(|| RefDiffError::MissingContents {
                file: file.to_path_buf(),
            })
    }

    fn file_modified(&self, before: NodeId, after: NodeId) -> Result<bool> {
        let b = Self::contents(self.before_files, &self.before[before].location.file)?;
        let a = Self::contents(self.after_files, &self.after[after].location.file)?;
        Ok(b != a)
    }

    fn body_modified(&self, before: NodeId, after: NodeId) -> Result<bool> {
        let (bl, al) = (&self.before[before].location, &self.after[after].location);
        let b = Self::contents(self.before_files, &bl.file)?;
        let a = Self::contents(self.after_files, &al.file)?;
        Ok(b.get(bl.body_span()) != a.get(al.body_span()))
    }

    fn primary(&self, rel: &Relationship) -> &Node {
        match (rel.before(), rel.after()) {
            (Some(b), _) => &self.before[b],
            (None, Some(a)) => &self.after[a],
            (None, None) => unreachable!("relationships always carry a node"),
        }
    }
}

impl DiffReport {
    /// Groups `relationships` under one report per file relationship.
    ///
    /// Extract and inline relationships do not get entries of their own; they
    /// annotate the entry of the matched function they were found through.
    pub fn build(
        before: &StructuralTree,
        after: &StructuralTree,
        before_files: &FileContents,
        after_files: &FileContents,
        relationships: &[Relationship],
    ) -> Result<Self> {
        let inputs = Inputs {
            before,
            after,
            before_files,
            after_files,
        };

        let mut files = Vec::new();
        let mut before_index: HashMap<Arc<Path>, usize> = HashMap::new();
        let mut after_index: HashMap<Arc<Path>, usize> = HashMap::new();
        for rel in relationships.iter().filter(|r| inputs.primary(r).is_file()) {
            let report = file_report(&inputs, rel)?;
            if let Some(b) = rel.before() {
                before_index.insert(before[b].location.file.clone(), files.len());
            }
            if let Some(a) = rel.after() {
                after_index.insert(after[a].location.file.clone(), files.len());
            }
            files.push(report);
        }

        let mut explained_by_before: HashMap<NodeId, &Relationship> = HashMap::new();
        let mut explained_by_after: HashMap<NodeId, &Relationship> = HashMap::new();
        for rel in relationships
            .iter()
            .filter(|r| !inputs.primary(r).is_file() && r.is_non_matching())
        {
            match (rel.kind(), rel.before(), rel.after()) {
                (RelationshipType::Inline, _, Some(a)) => {
                    explained_by_after.insert(a, rel);
                }
                (RelationshipType::Extract | RelationshipType::ExtractAndMove, Some(b), _) => {
                    explained_by_before.insert(b, rel);
                }
                _ => {}
            }
        }

        for rel in relationships
            .iter()
            .filter(|r| !inputs.primary(r).is_file() && !r.is_non_matching())
        {
            let related = match (rel.before(), rel.after()) {
                (Some(b), Some(a)) => explained_by_before
                    .get(&b)
                    .or_else(|| explained_by_after.get(&a))
                    .copied(),
                _ => None,
            };

            let before_file = rel
                .before()
                .and_then(|b| before_index.get(&before[b].location.file).copied());
            let after_file = rel
                .after()
                .and_then(|a| after_index.get(&after[a].location.file).copied());

            let mut targets = Vec::with_capacity(2);
            targets.extend(before_file);
            if after_file != before_file {
                targets.extend(after_file);
            }
            if targets.is_empty() {
                tracing::warn!(
                    "No file report for {} relationship of {}",
                    rel.kind(),
                    inputs.primary(rel).qualified_name()
                );
            }
            for target in targets {
                let entry = entry_report(&inputs, &files[target], rel, related)?;
                files[target].entries.push(entry);
            }
        }

        Ok(Self { files })
    }

    /// Drops unchanged entries and files left without anything to show.
    pub fn only_changes(mut self) -> Self {
        for file in &mut self.files {
            file.entries.retain(|e| {
                e.kind != RelationshipType::Same || e.modified || e.related.is_some()
            });
        }
        self.files.retain(|f| !f.is_unchanged());
        self
    }

    pub fn entries(&self) -> impl Iterator<Item = (&FileReport, &EntryReport)> {
        self.files
            .iter()
            .flat_map(|f| f.entries.iter().map(move |e| (f, e)))
    }
}

fn file_report(inputs: &Inputs<'_>, rel: &Relationship) -> Result<FileReport> {
    let modified = match (rel.before(), rel.after()) {
        (Some(b), Some(a)) => inputs.file_modified(b, a)?,
        _ => false,
    };
    let name = |node: &Node| node.qualified_name();
    let label = match (rel.before(), rel.after()) {
        (Some(b), Some(a)) if inputs.before[b].qualified_name() != inputs.after[a].qualified_name() => {
            format!("{}->{}", name(&inputs.before[b]), name(&inputs.after[a]))
        }
        _ => name(inputs.primary(rel)),
    };

    let mut description = match rel.kind() {
        RelationshipType::Rename => "Renamed",
        RelationshipType::Added => "Added",
        RelationshipType::Removed => "Removed",
        _ => "",
    }
    .to_string();
    if modified {
        if rel.kind() != RelationshipType::Same && !description.is_empty() {
            description.push_str(", ");
        }
        description.push_str("content modified");
    }

    Ok(FileReport {
        label,
        description,
        kind: rel.kind(),
        modified,
        before: rel.before().map(|b| NodeSummary::of(&inputs.before[b])),
        after: rel.after().map(|a| NodeSummary::of(&inputs.after[a])),
        entries: Vec::new(),
    })
}

fn entry_report(
    inputs: &Inputs<'_>,
    parent: &FileReport,
    rel: &Relationship,
    related: Option<&Relationship>,
) -> Result<EntryReport> {
    let modified = match (rel.before(), rel.after()) {
        (Some(b), Some(a)) => inputs.body_modified(b, a)?,
        _ => false,
    };
    let before = rel.before().map(|b| &inputs.before[b]);
    let after = rel.after().map(|a| &inputs.after[a]);
    let inlined = related
        .filter(|r| r.kind() == RelationshipType::Inline)
        .and_then(|r| r.before())
        .map(|id| &inputs.before[id]);
    let extracted = related
        .filter(|r| r.kind() != RelationshipType::Inline)
        .and_then(|r| r.after())
        .map(|id| &inputs.after[id]);

    let label = match (before, after) {
        (Some(b), Some(a)) => {
            let mut label = b.local_name.to_string();
            if let Some(i) = inlined {
                label.push('+');
                label.push_str(&i.local_name);
            }
            label.push_str("->");
            label.push_str(&a.local_name);
            if let Some(e) = extracted {
                label.push('+');
                label.push_str(&e.local_name);
            }
            label
        }
        _ => inputs.primary(rel).local_name.to_string(),
    };

    let moved = || {
        let here = match (after, &parent.after) {
            (Some(a), Some(p)) => a.location.file.to_string_lossy() == p.file,
            _ => false,
        };
        if here { "Moved here" } else { "Moved from here" }
    };
    let mut description = match rel.kind() {
        RelationshipType::Same if modified => "Same signature".to_string(),
        RelationshipType::ChangeSignature => "Signature changed".to_string(),
        RelationshipType::Move => moved().to_string(),
        RelationshipType::Rename => "Renamed".to_string(),
        RelationshipType::MoveAndRename => format!("{} & renamed", moved()),
        RelationshipType::Added => "Added".to_string(),
        RelationshipType::Removed => "Removed".to_string(),
        _ => String::new(),
    };
    if modified {
        description.push_str(", body modified");
    }
    match (related.map(Relationship::kind), extracted, inlined) {
        (Some(RelationshipType::Extract), Some(e), _) => {
            description.push_str(&format!(", {} was extracted", e.local_name));
        }
        (Some(RelationshipType::ExtractAndMove), Some(e), _) => {
            description.push_str(&format!(", {} was extracted and moved", e.local_name));
        }
        (Some(RelationshipType::Inline), _, Some(i)) => {
            description.push_str(&format!(", {} was inlined", i.local_name));
        }
        _ => {}
    }

    Ok(EntryReport {
        label,
        description,
        kind: rel.kind(),
        node_kind: inputs.primary(rel).kind,
        modified,
        before: before.map(NodeSummary::of),
        after: after.map(NodeSummary::of),
        related: related
            .and_then(|r| match r.kind() {
                RelationshipType::Inline => inlined,
                _ => extracted,
            })
            .map(NodeSummary::of),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diff::find_relationships;
    use crate::test_utils::Snapshot;

    const BEFORE_SHOP: &str = "function foo(items) { let total = 0; \
        for (let i = 0; i < items.length; i++) { total = total + items[i].price; } \
        console.log(total); return total; }";
    const AFTER_SHOP: &str = "function foo(items) { let total = helper(items); \
        console.log(total); return total; } \
        function helper(items) { let total = 0; \
        for (let i = 0; i < items.length; i++) { total = total + items[i].price; } \
        return total; }";

    #[test]
    fn test_extract_annotates_the_extracting_entry() {
        let mut before = Snapshot::new();
        let file = before.file("shop.js", BEFORE_SHOP);
        before.function(file, "foo", &["items"], "function foo");
        let (before, before_files) = before.finish();

        let mut after = Snapshot::new();
        let file = after.file("shop.js", AFTER_SHOP);
        let foo = after.function(file, "foo", &["items"], "function foo");
        let helper = after.function(file, "helper", &["items"], "function helper");
        after.call(foo, helper);
        let (after, after_files) = after.finish();

        let relationships =
            find_relationships(&before, &after, &before_files, &after_files).unwrap();
        let report =
            DiffReport::build(&before, &after, &before_files, &after_files, &relationships)
                .unwrap();

        assert_eq!(report.files.len(), 1);
        let file = &report.files[0];
        assert_eq!(file.label, "shop.js");
        assert_eq!(file.description, "content modified");
        assert_eq!(file.entries.len(), 1);

        let entry = &file.entries[0];
        assert_eq!(entry.label, "foo->foo+helper");
        assert_eq!(entry.kind, RelationshipType::Same);
        assert_eq!(
            entry.description,
            "Same signature, body modified, helper was extracted"
        );
        assert_eq!(entry.related.as_ref().map(|r| r.name.as_str()), Some("helper"));
    }

    #[test]
    fn test_moved_entry_is_listed_under_both_files() {
        let source = "function bar(x) { return x * 42 + 7; }";
        let keep = "function keep() { return 1; }";

        let mut before = Snapshot::new();
        let a = before.file("a.js", &format!("{keep}\n{source}"));
        before.function(a, "keep", &[], "function keep");
        before.function(a, "bar", &["x"], "function bar");
        let (before, before_files) = before.finish();

        let mut after = Snapshot::new();
        let a = after.file("a.js", keep);
        after.function(a, "keep", &[], "function keep");
        let b = after.file("b.js", source);
        after.function(b, "bar", &["x"], "function bar");
        let (after, after_files) = after.finish();

        let relationships =
            find_relationships(&before, &after, &before_files, &after_files).unwrap();
        let report =
            DiffReport::build(&before, &after, &before_files, &after_files, &relationships)
                .unwrap()
                .only_changes();

        let described: Vec<(&str, &str, &str)> = report
            .entries()
            .map(|(f, e)| (f.label.as_str(), e.label.as_str(), e.description.as_str()))
            .collect();
        assert_eq!(
            described,
            vec![
                ("a.js", "bar->bar", "Moved from here"),
                ("b.js", "bar->bar", "Moved here"),
            ]
        );
        let b_report = report.files.iter().find(|f| f.label == "b.js").unwrap();
        assert_eq!(b_report.description, "Added");
    }
}
