use super::constants::{ATOMIC_TOKENS, COMMENT, HTML_COMMENT};
use refdiff_core::{TokenIndex, TokenSpan};
use tree_sitter::Node;

/// Every non-empty leaf except comments, in source order. Literals whose
/// grammar node has inner structure count as a single token.
pub(crate) fn collect_tokens(root: Node<'_>) -> TokenIndex {
    let mut tokens = Vec::new();
    let mut stack = vec![root];

    while let Some(node) = stack.pop() {
        let kind = node.kind();
        if kind == COMMENT || kind == HTML_COMMENT {
            continue;
        }
        if node.child_count() == 0 || ATOMIC_TOKENS.contains(&kind) {
            if node.start_byte() < node.end_byte() {
                tokens.push(TokenSpan::new(node.start_byte(), node.end_byte()));
            }
            continue;
        }

        let mut cursor = node.walk();
        let children: Vec<Node<'_>> = node.children(&mut cursor).collect();
        stack.extend(children.into_iter().rev());
    }

    TokenIndex::new(tokens)
}
