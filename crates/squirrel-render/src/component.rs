//! The `squirrel-pie` element's state machine.
//!
//! Attribute changes trigger a render pass: parse, annotate, render. A pass is
//! built completely before it replaces the previous one, and every pass gets
//! a fresh [`Generation`]; handles from older passes stop resolving.

use log::{debug, warn};
use serde::Serialize;
use squirrel_ast::{NodeData, ParseError, ParseOptions, SourceParser, SourceType, SyntaxTree};

use crate::annotate::{annotate, Annotations};
use crate::association::{Generation, NodeRef, UnitRef};
use crate::dedent::dedent;
use crate::html;
use crate::markup::{RenderedDocument, UnitId};
use crate::path::{path_for, NodePath};
use crate::render::{render, render_error};
use crate::RenderOptions;

/// Attributes whose changes re-render the element.
pub const OBSERVED_ATTRIBUTES: [&str; 3] = ["value", "source-type", "stylesheet"];

/// Payload of the event emitted when a unit is clicked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeClick {
    pub node: NodeRef,
    /// The unit rendered for `node`.
    pub element: UnitRef,
    pub ast_path: String,
    pub array_path: String,
    pub node_type: String,
    pub type_path: Vec<String>,
    pub field_path: Vec<String>,
}

#[derive(Debug)]
enum Outcome {
    Tree {
        tree: SyntaxTree,
        annotations: Annotations,
    },
    Failed(ParseError),
}

/// Everything one render produced.
#[derive(Debug)]
struct RenderPass {
    generation: Generation,
    document: RenderedDocument,
    outcome: Outcome,
}

impl RenderPass {
    fn tree(&self) -> Option<(&SyntaxTree, &Annotations)> {
        match &self.outcome {
            Outcome::Tree { tree, annotations } => Some((tree, annotations)),
            Outcome::Failed(_) => None,
        }
    }
}

pub struct SquirrelPie<P> {
    parser: P,
    options: RenderOptions,
    value: String,
    source_type: SourceType,
    stylesheet: Option<String>,
    generation: Generation,
    pass: Option<RenderPass>,
}

impl<P: SourceParser> SquirrelPie<P> {
    pub fn new(parser: P) -> Self {
        Self::with_options(parser, RenderOptions::default())
    }

    pub fn with_options(parser: P, options: RenderOptions) -> Self {
        Self {
            parser,
            options,
            value: String::new(),
            source_type: SourceType::default(),
            stylesheet: None,
            generation: Generation::default(),
            pass: None,
        }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn source_type(&self) -> SourceType {
        self.source_type
    }

    pub fn stylesheet(&self) -> Option<&str> {
        self.stylesheet.as_deref()
    }

    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    /// Generation of the current pass; zero before the first render.
    pub fn generation(&self) -> Generation {
        self.generation
    }

    /// Called when the element is attached. Renders if nothing has been
    /// rendered yet.
    pub fn connect(&mut self) -> bool {
        if self.pass.is_some() {
            return false;
        }
        self.render();
        true
    }

    /// Apply an attribute change. Returns whether the element re-rendered;
    /// unchanged values and unobserved attributes do not.
    pub fn set_attribute(&mut self, name: &str, value: Option<&str>) -> bool {
        let changed = match name {
            "value" => {
                let value = value.unwrap_or_default();
                if self.value == value {
                    false
                } else {
                    self.value = value.to_string();
                    true
                }
            }
            "source-type" => {
                let source_type = match value {
                    None => SourceType::default(),
                    Some(text) => match text.parse() {
                        Ok(source_type) => source_type,
                        Err(err) => {
                            warn!("ignoring source-type attribute: {err}");
                            return false;
                        }
                    },
                };
                let changed = self.source_type != source_type;
                self.source_type = source_type;
                changed
            }
            "stylesheet" => {
                let stylesheet = value.map(str::to_string);
                let changed = self.stylesheet != stylesheet;
                self.stylesheet = stylesheet;
                changed
            }
            _ => false,
        };
        if changed {
            self.render();
        }
        changed
    }

    /// Take the source from slotted text content, stripping its indentation.
    pub fn value_from_slot(&mut self, text: &str) -> bool {
        let source = dedent(text);
        self.set_attribute("value", Some(&source))
    }

    /// Run a full render pass for the current attributes.
    pub fn render(&mut self) {
        let generation = self.generation.next();
        let options = ParseOptions {
            source_type: self.source_type,
            ..ParseOptions::default()
        };

        let pass = match self.parser.parse(&self.value, &options) {
            Ok(tree) => {
                let annotations = annotate(&tree);
                let document = render(&tree, &self.options);
                RenderPass {
                    generation,
                    document,
                    outcome: Outcome::Tree { tree, annotations },
                }
            }
            Err(err) => {
                warn!("render pass {} failed to parse: {err}", generation.0);
                RenderPass {
                    generation,
                    document: render_error(&err.to_string()),
                    outcome: Outcome::Failed(err),
                }
            }
        };
        debug!(
            "render pass {} produced {} units",
            generation.0,
            pass.document.unit_count()
        );

        self.generation = generation;
        self.pass = Some(pass);
    }

    /// Output of the current pass.
    pub fn document(&self) -> Option<&RenderedDocument> {
        self.pass.as_ref().map(|pass| &pass.document)
    }

    /// Tree of the current pass, if it parsed.
    pub fn tree(&self) -> Option<&SyntaxTree> {
        self.current_tree().map(|(tree, _)| tree)
    }

    /// Parse error of the current pass, if it failed.
    pub fn error(&self) -> Option<&ParseError> {
        match &self.pass.as_ref()?.outcome {
            Outcome::Failed(err) => Some(err),
            Outcome::Tree { .. } => None,
        }
    }

    /// Handle for a unit of the current pass.
    pub fn unit_ref(&self, unit: UnitId) -> Option<UnitRef> {
        let pass = self.pass.as_ref()?;
        pass.document.unit(unit)?;
        Some(UnitRef {
            generation: pass.generation,
            unit,
        })
    }

    pub fn node_for_unit(&self, unit: UnitRef) -> Option<NodeRef> {
        let pass = self.current(unit.generation)?;
        let node = pass.document.associations().node_for(unit.unit)?;
        Some(NodeRef {
            generation: pass.generation,
            node,
        })
    }

    pub fn unit_for_node(&self, node: NodeRef) -> Option<UnitRef> {
        let pass = self.current(node.generation)?;
        let unit = pass.document.associations().unit_for(node.node)?;
        Some(UnitRef {
            generation: pass.generation,
            unit,
        })
    }

    /// Data of a node of the current pass.
    pub fn node(&self, node: NodeRef) -> Option<&NodeData> {
        let (tree, _) = self.current(node.generation)?.tree()?;
        tree.get(node.node)
    }

    pub fn path(&self, node: NodeRef) -> Option<NodePath> {
        let (tree, annotations) = self.current(node.generation)?.tree()?;
        tree.get(node.node)?;
        Some(path_for(tree, annotations, node.node))
    }

    /// Resolve a click on `target`: the nearest enclosing unit with a node
    /// decides which node is reported.
    pub fn click(&self, target: UnitRef) -> Option<NodeClick> {
        let pass = self.current(target.generation)?;
        let associations = pass.document.associations();

        let mut current = Some(target.unit);
        let (unit, node) = loop {
            let unit = current?;
            if let Some(node) = associations.node_for(unit) {
                break (unit, node);
            }
            current = pass.document.unit(unit)?.parent;
        };

        let (tree, annotations) = pass.tree()?;
        let path = path_for(tree, annotations, node);
        debug!("click on unit {} resolved to {}", target.unit.0, path.array_path());

        Some(NodeClick {
            node: NodeRef {
                generation: pass.generation,
                node,
            },
            element: UnitRef {
                generation: pass.generation,
                unit,
            },
            ast_path: path.ast_path(&self.options.path_separator),
            array_path: path.array_path(),
            node_type: tree.type_name(node).to_string(),
            type_path: path.type_path,
            field_path: path.field_path,
        })
    }

    /// Current output as HTML, empty before the first render.
    pub fn html(&self) -> String {
        match &self.pass {
            Some(pass) => html::to_html(&pass.document, pass.generation, self.stylesheet()),
            None => String::new(),
        }
    }

    fn current(&self, generation: Generation) -> Option<&RenderPass> {
        self.pass
            .as_ref()
            .filter(|pass| pass.generation == generation)
    }

    fn current_tree(&self) -> Option<(&SyntaxTree, &Annotations)> {
        self.pass.as_ref()?.tree()
    }
}
