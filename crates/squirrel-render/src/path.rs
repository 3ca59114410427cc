//! Root-to-node paths reconstructed from annotations.

use serde::Serialize;
use squirrel_ast::{NodeId, SyntaxTree};

use crate::annotate::Annotations;

/// The two views of a node's position in the tree, root first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NodePath {
    /// Type tags from the root down to the node.
    pub type_path: Vec<String>,
    /// Field accessors (`body[0]`, `id`, ...) leading from the root to the node.
    pub field_path: Vec<String>,
}

impl NodePath {
    /// Type path joined with `separator`, e.g. `Program > Identifier`.
    pub fn ast_path(&self, separator: &str) -> String {
        self.type_path.join(separator)
    }

    /// Field path joined with `.`, e.g. `body[0].declarations[0].id`.
    pub fn array_path(&self) -> String {
        self.field_path.join(".")
    }

    /// Type of the node the path leads to.
    pub fn node_type(&self) -> Option<&str> {
        self.type_path.last().map(String::as_str)
    }
}

/// Walk parent links from `node` up to the root.
pub fn path_for(tree: &SyntaxTree, annotations: &Annotations, node: NodeId) -> NodePath {
    let mut path = NodePath::default();
    let mut current = Some(node);

    while let Some(id) = current {
        path.type_path.push(tree.type_name(id).to_string());
        current = match annotations.get(id) {
            Some(annotation) => {
                path.field_path.push(annotation.accessor());
                Some(annotation.parent)
            }
            None => None,
        };
    }

    path.type_path.reverse();
    path.field_path.reverse();
    path
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::annotate::annotate;
    use crate::test_support::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_root_path() {
        let tree = lower(program(vec![const_decl("x", lit_num(1))]));
        let annotations = annotate(&tree);
        let path = path_for(&tree, &annotations, tree.root());
        assert_eq!(path.type_path, vec!["Program"]);
        assert!(path.field_path.is_empty());
        assert_eq!(path.array_path(), "");
    }

    #[test]
    fn test_const_identifier_path() {
        let tree = lower(program(vec![const_decl("x", lit_num(1))]));
        let annotations = annotate(&tree);
        let x = find_ident(&tree, "x");
        let path = path_for(&tree, &annotations, x);
        assert_eq!(
            path.type_path,
            vec![
                "Program",
                "VariableDeclaration",
                "VariableDeclarator",
                "Identifier"
            ]
        );
        assert_eq!(path.array_path(), "body[0].declarations[0].id");
        assert_eq!(
            path.ast_path(" > "),
            "Program > VariableDeclaration > VariableDeclarator > Identifier"
        );
        assert_eq!(path.node_type(), Some("Identifier"));
    }

    #[test]
    fn test_child_path_extends_parent_path() {
        let tree = lower(program(vec![expr_stmt(call(
            ident("f"),
            vec![ident("a"), ident("b")],
        ))]));
        let annotations = annotate(&tree);
        let b = find_ident(&tree, "b");
        let parent = annotations.parent(b).unwrap();

        let child_path = path_for(&tree, &annotations, b);
        let mut expected = path_for(&tree, &annotations, parent);
        expected.type_path.push("Identifier".into());

        assert_eq!(child_path.type_path, expected.type_path);
        assert_eq!(child_path.field_path.last().unwrap(), "arguments[1]");
    }
}
