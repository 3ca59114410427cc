//! `<squirrel-pie>` handle for the custom element's JavaScript shell.
//!
//! The shell forwards lifecycle callbacks, writes [`SquirrelPieElement::html`]
//! into its shadow root, and on click reads `data-generation` and the nearest
//! `data-unit` to call [`SquirrelPieElement::click`].

use squirrel_ast::NodeId;
use squirrel_render::{
    Generation, NodeRef, RenderOptions, SquirrelPie, UnitId, UnitRef, OBSERVED_ATTRIBUTES,
};
use wasm_bindgen::prelude::*;

use crate::parser::AcornParser;

#[wasm_bindgen(js_name = SquirrelPie)]
pub struct SquirrelPieElement {
    inner: SquirrelPie<AcornParser>,
}

impl Default for SquirrelPieElement {
    fn default() -> Self {
        Self::new()
    }
}

#[wasm_bindgen(js_class = SquirrelPie)]
impl SquirrelPieElement {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            inner: SquirrelPie::new(AcornParser),
        }
    }

    /// Create with `{ indent, pathSeparator }` overrides.
    #[wasm_bindgen(js_name = withOptions)]
    pub fn with_options(options: JsValue) -> Result<SquirrelPieElement, JsError> {
        let options: RenderOptions = serde_wasm_bindgen::from_value(options)
            .map_err(|e| JsError::new(&e.to_string()))?;
        Ok(Self {
            inner: SquirrelPie::with_options(AcornParser, options),
        })
    }

    #[wasm_bindgen(js_name = observedAttributes)]
    pub fn observed_attributes() -> js_sys::Array {
        OBSERVED_ATTRIBUTES.iter().copied().map(JsValue::from_str).collect()
    }

    /// Returns whether the markup changed and must be written again.
    #[wasm_bindgen(js_name = attributeChanged)]
    pub fn attribute_changed(&mut self, name: &str, value: Option<String>) -> bool {
        self.inner.set_attribute(name, value.as_deref())
    }

    pub fn connected(&mut self) -> bool {
        self.inner.connect()
    }

    #[wasm_bindgen(js_name = setSlotText)]
    pub fn set_slot_text(&mut self, text: &str) -> bool {
        self.inner.value_from_slot(text)
    }

    #[wasm_bindgen(getter)]
    pub fn generation(&self) -> f64 {
        self.inner.generation().0 as f64
    }

    pub fn html(&self) -> String {
        self.inner.html()
    }

    /// The `node-click` event detail for a click on `unit`, or `null` when the
    /// unit belongs to an older render or has no node.
    pub fn click(&self, generation: f64, unit: u32) -> Result<JsValue, JsError> {
        match self.inner.click(unit_ref(generation, unit)) {
            Some(click) => {
                serde_wasm_bindgen::to_value(&click).map_err(|e| JsError::new(&e.to_string()))
            }
            None => Ok(JsValue::NULL),
        }
    }

    #[wasm_bindgen(js_name = nodeForUnit)]
    pub fn node_for_unit(&self, generation: f64, unit: u32) -> Option<u32> {
        self.inner
            .node_for_unit(unit_ref(generation, unit))
            .map(|node| node.node.index() as u32)
    }

    #[wasm_bindgen(js_name = unitForNode)]
    pub fn unit_for_node(&self, generation: f64, node: u32) -> Option<u32> {
        let node = NodeRef {
            generation: Generation(generation as u64),
            node: NodeId::new(node),
        };
        self.inner.unit_for_node(node).map(|unit| unit.unit.0)
    }
}

fn unit_ref(generation: f64, unit: u32) -> UnitRef {
    UnitRef {
        generation: Generation(generation as u64),
        unit: UnitId(unit),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unrendered_element() {
        let element = SquirrelPieElement::new();
        assert_eq!(element.html(), "");
        assert_eq!(element.generation(), 0.0);
        assert_eq!(element.node_for_unit(0.0, 0), None);
        assert_eq!(element.unit_for_node(0.0, 0), None);
    }

    #[test]
    fn test_unobserved_attribute_does_not_render() {
        let mut element = SquirrelPieElement::default();
        assert!(!element.attribute_changed("class", Some("wide".into())));
        assert_eq!(element.generation(), 0.0);
    }

    #[test]
    fn test_unit_ref_carries_generation() {
        let target = unit_ref(3.0, 7);
        assert_eq!(target.generation, Generation(3));
        assert_eq!(target.unit, UnitId(7));
    }
}
