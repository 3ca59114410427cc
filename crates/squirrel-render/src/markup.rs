//! Markup tree produced by the renderer.
//!
//! A [`RenderedDocument`] is a forest of [`Fragment`]s: plain text or a
//! labelled [`RenderedUnit`] with its own fragments. Units are stored in a
//! flat arena and addressed by [`UnitId`].

use serde::Serialize;
use squirrel_ast::NodeId;

use crate::association::Associations;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct UnitId(pub u32);

impl UnitId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fragment {
    Text(String),
    Unit(UnitId),
}

/// One labelled, clickable element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedUnit {
    /// Category label, the node type for syntax units.
    pub label: String,
    /// Hover text; defaults to the label when absent.
    pub title: Option<String>,
    pub parent: Option<UnitId>,
    pub children: Vec<Fragment>,
}

impl RenderedUnit {
    pub fn title(&self) -> &str {
        self.title.as_deref().unwrap_or(&self.label)
    }
}

/// Output of one render pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RenderedDocument {
    units: Vec<RenderedUnit>,
    roots: Vec<Fragment>,
    associations: Associations,
}

impl RenderedDocument {
    pub fn unit(&self, id: UnitId) -> Option<&RenderedUnit> {
        self.units.get(id.index())
    }

    pub fn units(&self) -> impl Iterator<Item = (UnitId, &RenderedUnit)> {
        self.units
            .iter()
            .enumerate()
            .map(|(i, unit)| (UnitId(i as u32), unit))
    }

    /// Top-level fragments, in order.
    pub fn roots(&self) -> &[Fragment] {
        &self.roots
    }

    /// Units appended directly to the container.
    pub fn top_level_units(&self) -> Vec<UnitId> {
        self.roots
            .iter()
            .filter_map(|f| match f {
                Fragment::Unit(id) => Some(*id),
                Fragment::Text(_) => None,
            })
            .collect()
    }

    pub fn associations(&self) -> &Associations {
        &self.associations
    }

    pub fn unit_count(&self) -> usize {
        self.units.len()
    }

    /// Plain-text reconstruction of the whole document.
    pub fn text(&self) -> String {
        let mut out = String::new();
        for fragment in &self.roots {
            self.write_text(fragment, &mut out);
        }
        out
    }

    /// Plain text covered by one unit.
    pub fn unit_text(&self, id: UnitId) -> String {
        let mut out = String::new();
        if let Some(unit) = self.unit(id) {
            for fragment in &unit.children {
                self.write_text(fragment, &mut out);
            }
        }
        out
    }

    /// Units directly nested in `id`.
    pub fn child_units(&self, id: UnitId) -> Vec<UnitId> {
        self.unit(id)
            .map(|unit| {
                unit.children
                    .iter()
                    .filter_map(|f| match f {
                        Fragment::Unit(child) => Some(*child),
                        Fragment::Text(_) => None,
                    })
                    .collect()
            })
            .unwrap_or_default()
    }

    fn write_text(&self, fragment: &Fragment, out: &mut String) {
        match fragment {
            Fragment::Text(text) => out.push_str(text),
            Fragment::Unit(id) => {
                if let Some(unit) = self.unit(*id) {
                    for child in &unit.children {
                        self.write_text(child, out);
                    }
                }
            }
        }
    }
}

/// Sink the renderer appends into. Keeps a stack of open units; text goes to
/// the innermost one, or to the container when none is open.
#[derive(Debug, Default)]
pub struct MarkupBuilder {
    document: RenderedDocument,
    open: Vec<UnitId>,
}

impl MarkupBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a unit inside the current container. When `node` is given, the
    /// node↔unit association is recorded.
    pub fn open(&mut self, label: &str, title: Option<String>, node: Option<NodeId>) -> UnitId {
        let id = UnitId(self.document.units.len() as u32);
        self.document.units.push(RenderedUnit {
            label: label.to_string(),
            title,
            parent: self.open.last().copied(),
            children: Vec::new(),
        });
        self.container().push(Fragment::Unit(id));
        if let Some(node) = node {
            self.document.associations.insert(node, id);
        }
        self.open.push(id);
        id
    }

    /// Unit already opened for `node`, if any.
    pub fn unit_for(&self, node: NodeId) -> Option<UnitId> {
        self.document.associations.unit_for(node)
    }

    /// Resolve `node` to an existing unit without opening one.
    pub fn alias(&mut self, node: NodeId, unit: UnitId) {
        self.document.associations.alias(node, unit);
    }

    pub fn close(&mut self) {
        self.open.pop();
    }

    /// Append literal text, merging with a preceding text fragment.
    pub fn text(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        let container = self.container();
        if let Some(Fragment::Text(last)) = container.last_mut() {
            last.push_str(text);
        } else {
            container.push(Fragment::Text(text.to_string()));
        }
    }

    pub fn finish(self) -> RenderedDocument {
        self.document
    }

    fn container(&mut self) -> &mut Vec<Fragment> {
        match self.open.last() {
            Some(id) => &mut self.document.units[id.index()].children,
            None => &mut self.document.roots,
        }
    }
}
