//! Clickable markup for ESTree syntax trees.
//!
//! The pipeline is: lowered [`SyntaxTree`](squirrel_ast::SyntaxTree) →
//! [`annotate`] (parent/field back references) → [`render`] (labelled units
//! plus node↔unit associations) → [`path_for`] on click. [`SquirrelPie`] ties
//! these together behind an attribute-driven component.

pub mod annotate;
pub mod association;
pub mod component;
pub mod dedent;
pub mod html;
pub mod markup;
pub mod path;
pub mod render;

#[cfg(test)]
mod test_support;

use serde::{Deserialize, Serialize};

pub use annotate::{annotate, Annotation, Annotations};
pub use association::{Associations, Generation, NodeRef, UnitRef};
pub use component::{NodeClick, SquirrelPie, OBSERVED_ATTRIBUTES};
pub use dedent::dedent;
pub use markup::{Fragment, RenderedDocument, RenderedUnit, UnitId};
pub use path::{path_for, NodePath};
pub use render::{render, render_error};

/// Presentation settings shared by the renderer and click dispatch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RenderOptions {
    /// One indentation level inside blocks.
    pub indent: String,
    /// Separator used when joining a type path into `astPath`.
    pub path_separator: String,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            indent: "  ".to_string(),
            path_separator: " > ".to_string(),
        }
    }
}
