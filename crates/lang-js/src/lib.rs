pub mod parser;

use refdiff_core::{FileContents, Result, SourceCodeAnalyzer, StructuralTree};
use std::sync::Arc;

/// JavaScript front end: one `File` root per source file, with functions,
/// classes and methods nested the way they are declared.
pub struct JsAnalyzer {
    parser: Arc<parser::JsParser>,
}

impl JsAnalyzer {
    pub fn new() -> Result<Self> {
        Ok(Self {
            parser: Arc::new(parser::JsParser::new()?),
        })
    }
}

impl SourceCodeAnalyzer for JsAnalyzer {
    fn name(&self) -> &str {
        "javascript"
    }

    fn supported_extensions(&self) -> &[&str] {
        &["js", "mjs", "cjs", "jsx"]
    }

    fn parse(&self, files: &FileContents) -> Result<StructuralTree> {
        let mut tree = StructuralTree::new();
        for (path, source) in files {
            self.parser.parse_file(&mut tree, path, source)?;
        }
        tracing::debug!("Parsed {} files into {} nodes", files.len(), tree.len());
        Ok(tree)
    }
}
