use crate::snapshot::load_snapshot;
use crate::view::TreeRow;
use refdiff_core::SourceCodeAnalyzer;
use refdiff_js::JsAnalyzer;
use std::path::Path;
use tabled::{settings::Style, Table};

pub fn run(path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let analyzer = JsAnalyzer::new()?;
    let files = load_snapshot(path, analyzer.supported_extensions())?;
    let tree = analyzer.parse(&files)?;

    let rows: Vec<TreeRow> = tree.iter().map(|n| TreeRow::from_node(&tree, n)).collect();
    println!("{}", Table::new(&rows).with(Style::psql()));
    println!("{} nodes in {} files", tree.len(), tree.roots().len());
    Ok(())
}
