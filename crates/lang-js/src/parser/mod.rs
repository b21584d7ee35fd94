use refdiff_core::error::{RefDiffError, Result};
use refdiff_core::util::line_at;
use refdiff_core::{Location, NodeData, NodeKind, StructuralTree};
use std::path::Path;
use std::sync::Arc;
use tree_sitter::Parser;

mod ast;
pub(crate) mod constants;
mod tokens;

#[derive(Clone)]
pub struct JsParser {
    pub language: tree_sitter::Language,
}

impl JsParser {
    pub fn new() -> Result<Self> {
        let language: tree_sitter::Language = tree_sitter_javascript::LANGUAGE.into();
        // Fail early on an ABI mismatch instead of on the first file.
        Parser::new()
            .set_language(&language)
            .map_err(|e| RefDiffError::Parsing(e.to_string()))?;
        Ok(Self { language })
    }

    /// Adds one `File` root for `path` to `tree`, with its declarations,
    /// resolved calls and token index.
    pub fn parse_file(&self, tree: &mut StructuralTree, path: &Path, source: &[u8]) -> Result<()> {
        let mut parser = Parser::new();
        parser
            .set_language(&self.language)
            .map_err(|e| RefDiffError::Parsing(e.to_string()))?;
        let ts_tree = parser
            .parse(source, None)
            .ok_or_else(|| RefDiffError::Parsing(format!("Failed to parse {}", path.display())))?;
        let root = ts_tree.root_node();
        if root.has_error() {
            tracing::warn!("Syntax errors in {}, declarations may be incomplete", path.display());
        }

        let file: Arc<Path> = Arc::from(path);
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        let namespace = path
            .parent()
            .map(|p| p.to_string_lossy().to_string())
            .unwrap_or_default();
        let location = Location::new(
            file.clone(),
            1,
            line_at(source, source.len()),
            0,
            source.len(),
        );
        let file_node = tree.add_root(NodeData::new(NodeKind::File, name, location).with_namespace(namespace));

        tree.add_tokens_for_file(file.clone(), tokens::collect_tokens(root));
        ast::FileWalker::new(tree, file, source).walk(root, file_node);
        Ok(())
    }
}
