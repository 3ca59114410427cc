//! Squirrel Pie syntax tree
//!
//! A typed, arena-allocated model of the ESTree documents produced by an
//! external JavaScript parser (acorn in the browser). Parsing itself is not
//! done here: a [`SourceParser`] hands back an ESTree value, and
//! [`SyntaxTree::from_estree`] lowers it into [`NodeKind`] variants.
//!
//! # Example
//!
//! ```
//! use squirrel_ast::SyntaxTree;
//!
//! let estree = serde_json::json!({
//!     "type": "Program",
//!     "sourceType": "module",
//!     "body": []
//! });
//! let tree = SyntaxTree::from_estree(&estree).unwrap();
//! assert_eq!(tree.type_name(tree.root()), "Program");
//! ```

pub mod ast;
pub mod estree;
pub mod options;

pub use ast::{ChildEdge, NodeData, NodeId, NodeKind, Span, SyntaxTree};
pub use options::{EcmaVersion, ParseOptions, SourceType, UnknownSourceType};

use serde_json::Value;

/// The external parser boundary.
///
/// Implementations turn source text into a lowered [`SyntaxTree`], or report
/// why the text could not be parsed.
pub trait SourceParser {
    fn parse(&self, source: &str, options: &ParseOptions) -> Result<SyntaxTree, ParseError>;
}

/// Adapts any function producing an ESTree JSON value into a [`SourceParser`].
pub struct EstreeParser<F>(pub F);

impl<F> SourceParser for EstreeParser<F>
where
    F: Fn(&str, &ParseOptions) -> Result<Value, ParseError>,
{
    fn parse(&self, source: &str, options: &ParseOptions) -> Result<SyntaxTree, ParseError> {
        let estree = (self.0)(source, options)?;
        Ok(SyntaxTree::from_estree(&estree)?)
    }
}

/// Parser error, either reported by the parser or found while lowering its output.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ParseError {
    /// The source text was rejected by the parser.
    #[error("{message}")]
    Syntax {
        message: String,
        position: Option<usize>,
    },

    /// The parser produced a value that is not a well-formed ESTree document.
    #[error("Malformed syntax tree: {0}")]
    Tree(#[from] TreeError),
}

impl ParseError {
    pub fn syntax(message: impl Into<String>, position: Option<usize>) -> Self {
        Self::Syntax {
            message: message.into(),
            position,
        }
    }
}

/// Error raised while lowering an ESTree value.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TreeError {
    #[error("expected a node object with a string `type`")]
    NotANode,

    #[error("{node_type} is missing required field `{field}`")]
    MissingField { node_type: String, field: String },

    #[error("{node_type}.{field} is not {expected}")]
    InvalidField {
        node_type: String,
        field: String,
        expected: &'static str,
    },
}
