//! Node↔unit association for one render generation.
//!
//! Handles given out to callers carry the generation they were issued in, so
//! a lookup with a handle from an older render simply finds nothing.

use std::collections::HashMap;

use serde::Serialize;
use squirrel_ast::NodeId;

use crate::markup::UnitId;

/// Render generation counter, bumped on every render pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Generation(pub u64);

impl Generation {
    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

/// A syntax node as seen from outside one render pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct NodeRef {
    pub generation: Generation,
    pub node: NodeId,
}

/// A rendered unit as seen from outside one render pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct UnitRef {
    pub generation: Generation,
    pub unit: UnitId,
}

/// Two-way map between syntax nodes and the units rendered for them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Associations {
    node_to_unit: HashMap<NodeId, UnitId>,
    unit_to_node: HashMap<UnitId, NodeId>,
}

impl Associations {
    pub(crate) fn insert(&mut self, node: NodeId, unit: UnitId) {
        self.node_to_unit.insert(node, unit);
        self.unit_to_node.insert(unit, node);
    }

    /// Point `node` at a unit rendered for another node. The unit still maps
    /// back to its own node only.
    pub(crate) fn alias(&mut self, node: NodeId, unit: UnitId) {
        self.node_to_unit.insert(node, unit);
    }

    pub fn unit_for(&self, node: NodeId) -> Option<UnitId> {
        self.node_to_unit.get(&node).copied()
    }

    pub fn node_for(&self, unit: UnitId) -> Option<NodeId> {
        self.unit_to_node.get(&unit).copied()
    }

    pub fn len(&self) -> usize {
        self.unit_to_node.len()
    }

    pub fn is_empty(&self) -> bool {
        self.unit_to_node.is_empty()
    }

    /// Nodes with a unit, aliases included.
    pub fn node_count(&self) -> usize {
        self.node_to_unit.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (NodeId, UnitId)> + '_ {
        self.node_to_unit.iter().map(|(&node, &unit)| (node, unit))
    }
}
