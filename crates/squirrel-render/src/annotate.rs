//! Parent back-references for every node of a tree.
//!
//! Annotations live in a side table indexed by [`NodeId`], so the tree itself
//! never holds upward pointers.

use squirrel_ast::{NodeId, SyntaxTree};

/// How a node is reached from its parent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Annotation {
    pub parent: NodeId,
    /// Field name on the parent, e.g. `declarations`.
    pub key: String,
    /// Slot number when the field is a sequence.
    pub index: Option<usize>,
}

impl Annotation {
    /// `key` for scalar fields, `key[index]` for sequence fields.
    pub fn accessor(&self) -> String {
        match self.index {
            Some(index) => format!("{}[{index}]", self.key),
            None => self.key.clone(),
        }
    }
}

/// Annotation table for one tree. The root has no entry.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Annotations {
    entries: Vec<Option<Annotation>>,
}

impl Annotations {
    pub fn get(&self, node: NodeId) -> Option<&Annotation> {
        self.entries.get(node.index()).and_then(Option::as_ref)
    }

    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.get(node).map(|a| a.parent)
    }

    /// Number of annotated nodes.
    pub fn len(&self) -> usize {
        self.entries.iter().filter(|e| e.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn insert(&mut self, node: NodeId, annotation: Annotation) {
        let index = node.index();
        if index >= self.entries.len() {
            self.entries.resize(index + 1, None);
        }
        self.entries[index] = Some(annotation);
    }
}

/// Annotate every node reachable from the root, depth-first pre-order.
///
/// Uses an explicit stack so deeply nested trees cannot exhaust the call stack.
pub fn annotate(tree: &SyntaxTree) -> Annotations {
    let mut annotations = Annotations {
        entries: vec![None; tree.len()],
    };
    let mut stack = vec![tree.root()];

    while let Some(id) = stack.pop() {
        let edges = tree[id].kind.children();
        // Reversed so the first field is popped (visited) first.
        for edge in edges.iter().rev() {
            annotations.insert(
                edge.node,
                Annotation {
                    parent: id,
                    key: edge.field.to_string(),
                    index: edge.index,
                },
            );
            stack.push(edge.node);
        }
    }

    annotations
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::*;
    use pretty_assertions::assert_eq;
    use squirrel_ast::NodeKind;

    #[test]
    fn test_root_has_no_annotation() {
        let tree = lower(program(vec![expr_stmt(ident("a"))]));
        let annotations = annotate(&tree);
        assert_eq!(annotations.get(tree.root()), None);
    }

    #[test]
    fn test_every_other_node_is_annotated_once() {
        let tree = lower(program(vec![
            const_decl("x", lit_num(1)),
            expr_stmt(call(ident("f"), vec![ident("x")])),
        ]));
        let annotations = annotate(&tree);
        assert_eq!(annotations.len(), tree.len() - 1);
    }

    #[test]
    fn test_sequence_fields_record_index() {
        let tree = lower(program(vec![expr_stmt(ident("a")), expr_stmt(ident("b"))]));
        let annotations = annotate(&tree);
        let b = find_ident(&tree, "b");
        let stmt = annotations.parent(b).unwrap();
        assert_eq!(annotations.get(b).unwrap().accessor(), "expression");
        assert_eq!(annotations.get(stmt).unwrap().accessor(), "body[1]");
        assert_eq!(annotations.parent(stmt), Some(tree.root()));
    }

    #[test]
    fn test_holes_are_skipped() {
        let tree = lower(program(vec![expr_stmt(array(vec![
            None,
            Some(ident("a")),
            None,
            Some(ident("b")),
        ]))]));
        let annotations = annotate(&tree);
        let b = find_ident(&tree, "b");
        assert_eq!(annotations.get(b).unwrap().accessor(), "elements[3]");
    }

    #[test]
    fn test_unknown_nodes_are_traversed() {
        let tree = lower(program(vec![expr_stmt(serde_json::json!({
            "type": "JSXExpressionContainer",
            "expression": ident("inner")
        }))]));
        let annotations = annotate(&tree);
        let inner = find_ident(&tree, "inner");
        let container = annotations.parent(inner).unwrap();
        assert!(matches!(tree[container].kind, NodeKind::Unknown { .. }));
        assert_eq!(annotations.get(inner).unwrap().key, "expression");
    }

    #[test]
    fn test_deep_nesting_does_not_recurse() {
        let mut expr = ident("leaf");
        for _ in 0..100 {
            expr = unary("!", expr);
        }
        let tree = lower(program(vec![expr_stmt(expr)]));
        let annotations = annotate(&tree);
        assert_eq!(annotations.len(), tree.len() - 1);
    }
}
