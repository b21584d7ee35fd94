use crate::parser::constants::*;
use smol_str::{SmolStr, format_smolstr};
use tree_sitter::Node;

/// The name a call refers to: `foo` for `foo()`, `Class.m` for `this.m()`
/// inside `Class`. Other callee shapes are not resolved.
pub(super) fn callee_name(node: Node<'_>, source: &[u8], class: Option<&str>) -> Option<SmolStr> {
    if node.kind() != CALL_EXPRESSION {
        return None;
    }
    let function = node.child_by_field_name(FIELD_FUNCTION)?;
    match function.kind() {
        IDENTIFIER => function.utf8_text(source).ok().map(SmolStr::from),
        MEMBER_EXPRESSION => {
            let object = function.child_by_field_name(FIELD_OBJECT)?;
            let property = function.child_by_field_name(FIELD_PROPERTY)?;
            if object.kind() != THIS || property.kind() != PROPERTY_IDENTIFIER {
                return None;
            }
            let property = property.utf8_text(source).ok()?;
            Some(format_smolstr!("{}.{}", class?, property))
        }
        _ => None,
    }
}
