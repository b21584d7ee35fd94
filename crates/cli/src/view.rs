use refdiff_core::report::{EntryReport, FileReport};
use refdiff_core::{Node, StructuralTree};
use tabled::Tabled;

/// One line of the diff table: a file, or an element inside it.
#[derive(Tabled)]
pub struct ReportRow {
    pub file: String,
    pub element: String,
    pub kind: String,
    pub change: String,
}

impl ReportRow {
    pub fn from_file(file: &FileReport) -> Self {
        Self {
            file: file.label.clone(),
            element: "-".to_string(),
            kind: file.kind.to_string(),
            change: file.description.clone(),
        }
    }

    pub fn from_entry(file: &FileReport, entry: &EntryReport) -> Self {
        let line = entry
            .after
            .as_ref()
            .or(entry.before.as_ref())
            .map(|n| format!(":{}", n.line_start))
            .unwrap_or_default();
        Self {
            file: file.label.clone(),
            element: format!("{} {}{}", entry.node_kind, entry.label, line),
            kind: entry.kind.to_string(),
            change: entry.description.clone(),
        }
    }
}

#[derive(Tabled)]
pub struct TreeRow {
    pub id: String,
    pub kind: String,
    pub name: String,
    pub parent: String,
    pub location: String,
    pub calls: String,
}

impl TreeRow {
    pub fn from_node(tree: &StructuralTree, node: &Node) -> Self {
        let loc = &node.location;
        let name = match &node.parameters {
            Some(params) => format!("{}({})", node.local_name, params.join(", ")),
            None => node.qualified_name(),
        };
        let calls = node
            .calls()
            .iter()
            .map(|id| tree[*id].local_name.to_string())
            .collect::<Vec<_>>()
            .join(", ");
        Self {
            id: node.id().to_string(),
            kind: node.kind.to_string(),
            name,
            parent: node
                .parent()
                .map(|p| p.to_string())
                .unwrap_or_else(|| "-".to_string()),
            location: format!(
                "{}:{}-{}",
                loc.file.display(),
                loc.line_start,
                loc.line_end
            ),
            calls,
        }
    }
}
