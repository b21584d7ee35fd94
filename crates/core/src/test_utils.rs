use crate::model::{Location, NodeData, NodeId, NodeKind, StructuralTree, TokenIndex, TokenSpan};
use crate::parser::FileContents;
use crate::util::line_at;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Splits identifiers (`[A-Za-z0-9_$]+`) and single punctuation characters.
pub fn tokenize(source: &str) -> TokenIndex {
    let bytes = source.as_bytes();
    let word = |b: u8| b.is_ascii_alphanumeric() || b == b'_' || b == b'$';
    let mut tokens = Vec::new();
    let mut i = 0;
    while i < bytes.len() {
        let b = bytes[i];
        if b.is_ascii_whitespace() {
            i += 1;
        } else if word(b) {
            let start = i;
            while i < bytes.len() && word(bytes[i]) {
                i += 1;
            }
            tokens.push(TokenSpan::new(start, i));
        } else {
            tokens.push(TokenSpan::new(i, i + 1));
            i += 1;
        }
    }
    TokenIndex::new(tokens)
}

/// Builds a hand-written snapshot, locating declarations by a unique snippet
/// of the file source.
#[derive(Default)]
pub struct Snapshot {
    tree: StructuralTree,
    files: FileContents,
}

impl Snapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn file(&mut self, path: &str, source: &str) -> NodeId {
        let file: Arc<Path> = Arc::from(Path::new(path));
        let name = file
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        let namespace = file
            .parent()
            .map(|p| p.to_string_lossy().to_string())
            .unwrap_or_default();
        let location = Location::new(
            file.clone(),
            1,
            line_at(source.as_bytes(), source.len()),
            0,
            source.len(),
        );
        let id = self
            .tree
            .add_root(NodeData::new(NodeKind::File, name, location).with_namespace(namespace));
        self.tree.add_tokens_for_file(file, tokenize(source));
        self.files.insert(PathBuf::from(path), source.as_bytes().to_vec());
        id
    }

    #[allow(dead_code)]
    pub fn class(&mut self, parent: NodeId, name: &str, snippet: &str) -> NodeId {
        let location = self.locate(parent, snippet);
        self.tree
            .add_child(parent, NodeData::new(NodeKind::Class, name, location))
    }

    pub fn function(
        &mut self,
        parent: NodeId,
        name: &str,
        params: &[&str],
        snippet: &str,
    ) -> NodeId {
        let location = self.locate(parent, snippet);
        self.tree.add_child(
            parent,
            NodeData::new(NodeKind::Function, name, location).with_parameters(params.iter().copied()),
        )
    }

    pub fn call(&mut self, caller: NodeId, callee: NodeId) {
        self.tree.add_call(caller, callee);
    }

    pub fn finish(self) -> (StructuralTree, FileContents) {
        (self.tree, self.files)
    }

    /// The declaration spans from `snippet` to the brace closing the first
    /// `{` after it; the body is that braced block.
    fn locate(&self, parent: NodeId, snippet: &str) -> Location {
        let file = self.tree[parent].location.file.clone();
        let source = &self.files[&file.to_path_buf()];
        let text = std::str::from_utf8(source).unwrap();
        let begin = text
            .find(snippet)
            .unwrap_or_else(|| panic!("{snippet:?} not found in {}", file.display()));
        let body_begin = begin + text[begin..].find('{').unwrap();
        let mut depth = 0;
        let mut end = body_begin;
        for (i, c) in text[body_begin..].char_indices() {
            match c {
                '{' => depth += 1,
                '}' => {
                    depth -= 1;
                    if depth == 0 {
                        end = body_begin + i + 1;
                        break;
                    }
                }
                _ => {}
            }
        }
        Location::new(
            file,
            line_at(source, begin),
            line_at(source, end),
            begin,
            end,
        )
        .with_body(body_begin, end)
    }
}
