use crate::parser::constants::*;
use refdiff_core::NodeKind;
use smol_str::{SmolStr, format_smolstr};
use tree_sitter::Node;

pub(super) struct Declaration<'t> {
    pub kind: NodeKind,
    pub name: SmolStr,
    /// Name used to resolve calls, `Class.method` for methods.
    pub key: SmolStr,
    pub parameters: Option<Vec<SmolStr>>,
    pub body: Option<Node<'t>>,
}

fn text<'s>(node: Node<'_>, source: &'s [u8]) -> Option<&'s str> {
    node.utf8_text(source).ok()
}

fn is_function_value(node: &Node<'_>) -> bool {
    matches!(
        node.kind(),
        FUNCTION_EXPRESSION | GENERATOR_FUNCTION | ARROW_FUNCTION
    )
}

/// Recognizes the declarations that become structural nodes.
pub(super) fn recognize<'t>(
    node: Node<'t>,
    source: &[u8],
    class: Option<&str>,
) -> Option<Declaration<'t>> {
    match node.kind() {
        FUNCTION_DECLARATION | GENERATOR_FUNCTION_DECLARATION => {
            let name = text(node.child_by_field_name(FIELD_NAME)?, source)?;
            Some(function(name.into(), node, source))
        }
        CLASS_DECLARATION => {
            let name: SmolStr = text(node.child_by_field_name(FIELD_NAME)?, source)?.into();
            Some(Declaration {
                kind: NodeKind::Class,
                key: name.clone(),
                name,
                parameters: None,
                body: node.child_by_field_name(FIELD_BODY),
            })
        }
        METHOD_DEFINITION => {
            let name = text(node.child_by_field_name(FIELD_NAME)?, source)?;
            let mut decl = function(name.into(), node, source);
            if let Some(class) = class {
                decl.key = format_smolstr!("{}.{}", class, name);
            }
            Some(decl)
        }
        VARIABLE_DECLARATOR => {
            let name = node.child_by_field_name(FIELD_NAME)?;
            let value = node.child_by_field_name(FIELD_VALUE)?;
            if name.kind() != IDENTIFIER || !is_function_value(&value) {
                return None;
            }
            Some(function(text(name, source)?.into(), value, source))
        }
        ASSIGNMENT_EXPRESSION => {
            let left = node.child_by_field_name(FIELD_LEFT)?;
            let right = node.child_by_field_name(FIELD_RIGHT)?;
            if !is_function_value(&right) {
                return None;
            }
            let name = match left.kind() {
                IDENTIFIER => left,
                MEMBER_EXPRESSION => {
                    let property = left.child_by_field_name(FIELD_PROPERTY)?;
                    if property.kind() != PROPERTY_IDENTIFIER {
                        return None;
                    }
                    property
                }
                _ => return None,
            };
            Some(function(text(name, source)?.into(), right, source))
        }
        PAIR => {
            let key = node.child_by_field_name(FIELD_KEY)?;
            let value = node.child_by_field_name(FIELD_VALUE)?;
            if key.kind() != PROPERTY_IDENTIFIER || !is_function_value(&value) {
                return None;
            }
            Some(function(text(key, source)?.into(), value, source))
        }
        _ => None,
    }
}

/// A `Function` declaration whose signature and body come from `callable`.
fn function<'t>(name: SmolStr, callable: Node<'t>, source: &[u8]) -> Declaration<'t> {
    let parameters = match callable.child_by_field_name(FIELD_PARAMETERS) {
        Some(list) => parameters(list, source),
        None => callable
            .child_by_field_name(FIELD_PARAMETER)
            .and_then(|p| text(p, source))
            .map(SmolStr::from)
            .into_iter()
            .collect(),
    };
    Declaration {
        kind: NodeKind::Function,
        key: name.clone(),
        name,
        parameters: Some(parameters),
        body: callable.child_by_field_name(FIELD_BODY),
    }
}

/// Names of the parameters that bind a plain identifier.
fn parameters(list: Node<'_>, source: &[u8]) -> Vec<SmolStr> {
    let mut cursor = list.walk();
    list.named_children(&mut cursor)
        .filter_map(|param| {
            let ident = match param.kind() {
                IDENTIFIER => Some(param),
                ASSIGNMENT_PATTERN => param
                    .child_by_field_name(FIELD_LEFT)
                    .filter(|left| left.kind() == IDENTIFIER),
                REST_PATTERN => param.named_child(0).filter(|n| n.kind() == IDENTIFIER),
                _ => None,
            }?;
            text(ident, source).map(SmolStr::from)
        })
        .collect()
}
