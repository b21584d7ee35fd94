use indexmap::{IndexMap, IndexSet};
use refdiff_core::{Location, NodeData, NodeId, NodeKind, StructuralTree};
use smol_str::SmolStr;
use std::path::Path;
use std::sync::Arc;
use tree_sitter::Node;

mod calls;
mod entities;

struct Frame<'t> {
    node: Node<'t>,
    container: NodeId,
    class: Option<SmolStr>,
}

/// Turns the syntax tree of one file into structural nodes below its `File` root.
pub(crate) struct FileWalker<'a> {
    tree: &'a mut StructuralTree,
    file: Arc<Path>,
    source: &'a [u8],
    /// Callable declarations by the name calls refer to them with.
    functions: IndexMap<SmolStr, NodeId>,
    /// Callee names per innermost enclosing declaration.
    callers: IndexMap<NodeId, IndexSet<SmolStr>>,
}

impl<'a> FileWalker<'a> {
    pub(crate) fn new(tree: &'a mut StructuralTree, file: Arc<Path>, source: &'a [u8]) -> Self {
        Self {
            tree,
            file,
            source,
            functions: IndexMap::new(),
            callers: IndexMap::new(),
        }
    }

    pub(crate) fn walk(mut self, root: Node<'_>, file_node: NodeId) {
        let mut stack = vec![Frame {
            node: root,
            container: file_node,
            class: None,
        }];

        while let Some(frame) = stack.pop() {
            let Frame {
                node,
                mut container,
                mut class,
            } = frame;

            if let Some(decl) = entities::recognize(node, self.source, class.as_deref()) {
                let mut location = Location::new(
                    self.file.clone(),
                    node.start_position().row + 1,
                    node.end_position().row + 1,
                    node.start_byte(),
                    node.end_byte(),
                );
                if let Some(body) = decl.body {
                    location = location.with_body(body.start_byte(), body.end_byte());
                }
                let mut data = NodeData::new(decl.kind, decl.name.clone(), location);
                data.parameters = decl.parameters;

                let id = self.tree.add_child(container, data);
                match decl.kind {
                    NodeKind::Class => class = Some(decl.name),
                    _ => {
                        self.functions.insert(decl.key, id);
                    }
                }
                container = id;
            } else if let Some(callee) = calls::callee_name(node, self.source, class.as_deref()) {
                self.callers.entry(container).or_default().insert(callee);
            }

            let mut cursor = node.walk();
            let children: Vec<Node<'_>> = node.named_children(&mut cursor).collect();
            stack.extend(children.into_iter().rev().map(|child| Frame {
                node: child,
                container,
                class: class.clone(),
            }));
        }

        self.resolve_calls();
    }

    fn resolve_calls(mut self) {
        for (caller, callees) in &self.callers {
            for callee in callees {
                match self.functions.get(callee) {
                    Some(&target) => {
                        self.tree.add_call(*caller, target);
                    }
                    None => tracing::trace!(
                        "Unresolved call to {} in {}",
                        callee,
                        self.file.display()
                    ),
                }
            }
        }
    }
}
