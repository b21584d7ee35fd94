#![allow(dead_code)]

use refdiff_core::{FileContents, Node, SourceCodeAnalyzer, StructuralTree};
use refdiff_js::JsAnalyzer;
use std::path::PathBuf;

pub fn parse(files: &[(&str, &str)]) -> (StructuralTree, FileContents) {
    let contents: FileContents = files
        .iter()
        .map(|(path, source)| (PathBuf::from(path), source.as_bytes().to_vec()))
        .collect();
    let analyzer = JsAnalyzer::new().expect("grammar loads");
    let tree = analyzer.parse(&contents).expect("sources parse");
    (tree, contents)
}

/// The only node called `name`.
pub fn node<'t>(tree: &'t StructuralTree, name: &str) -> &'t Node {
    let mut found = tree.iter().filter(|n| n.local_name == name);
    let node = found
        .next()
        .unwrap_or_else(|| panic!("no node named {name}"));
    assert!(found.next().is_none(), "several nodes named {name}");
    node
}

pub fn names(tree: &StructuralTree, ids: &[refdiff_core::NodeId]) -> Vec<String> {
    ids.iter().map(|id| tree[*id].local_name.to_string()).collect()
}

pub fn params(node: &Node) -> Vec<&str> {
    node.parameters
        .iter()
        .flatten()
        .map(|p| p.as_str())
        .collect()
}
