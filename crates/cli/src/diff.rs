use crate::snapshot::load_snapshot;
use crate::view::ReportRow;
use crate::OutputFormat;
use refdiff_core::{DiffReport, FinderConfig, RelationshipFinder, SourceCodeAnalyzer};
use refdiff_js::JsAnalyzer;
use std::path::Path;
use tabled::{settings::Style, Table};

/// Settings precedence: `--threshold`, then the config file, then defaults.
pub fn resolve_config(
    path: Option<&Path>,
    threshold: Option<f64>,
) -> refdiff_core::Result<FinderConfig> {
    let mut config = match path {
        Some(path) => FinderConfig::load(path)?,
        None => FinderConfig::default(),
    };
    if let Some(threshold) = threshold {
        config = config.with_threshold(threshold);
    }
    config.validate()?;
    Ok(config)
}

/// Loads, parses and compares two snapshots.
pub fn compare(
    before: &Path,
    after: &Path,
    config: FinderConfig,
) -> Result<DiffReport, Box<dyn std::error::Error>> {
    let analyzer = JsAnalyzer::new()?;
    let extensions = analyzer.supported_extensions();
    let before_files = load_snapshot(before, extensions)?;
    let after_files = load_snapshot(after, extensions)?;

    let before_tree = analyzer.parse(&before_files)?;
    let after_tree = analyzer.parse(&after_files)?;
    tracing::info!(
        "Comparing {} nodes with {} nodes",
        before_tree.len(),
        after_tree.len()
    );

    let relationships =
        RelationshipFinder::new(&before_tree, &after_tree, &before_files, &after_files, config)?
            .find_relationships();
    let report = DiffReport::build(
        &before_tree,
        &after_tree,
        &before_files,
        &after_files,
        &relationships,
    )?;
    Ok(report)
}

pub fn render(report: &DiffReport, format: OutputFormat) -> Result<String, serde_json::Error> {
    match format {
        OutputFormat::Json => serde_json::to_string_pretty(report),
        OutputFormat::Table => {
            if report.files.is_empty() {
                return Ok("No changes.".to_string());
            }
            let mut rows = Vec::new();
            for file in &report.files {
                rows.push(ReportRow::from_file(file));
                rows.extend(file.entries.iter().map(|e| ReportRow::from_entry(file, e)));
            }
            Ok(Table::new(&rows).with(Style::psql()).to_string())
        }
    }
}

pub fn run(
    before: &Path,
    after: &Path,
    config: FinderConfig,
    format: OutputFormat,
    all: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let report = compare(before, after, config)?;
    let report = if all { report } else { report.only_changes() };
    println!("{}", render(&report, format)?);
    Ok(())
}
