//! `<bread-crumb>` handle.

use squirrel_widgets::breadcrumb::OBSERVED_ATTRIBUTES;
use squirrel_widgets::{Breadcrumb, Navigate};
use wasm_bindgen::prelude::*;

#[wasm_bindgen(js_name = BreadCrumb)]
#[derive(Default)]
pub struct BreadcrumbElement {
    value: Option<String>,
    separator: Option<String>,
    widget: Option<Breadcrumb>,
}

#[wasm_bindgen(js_class = BreadCrumb)]
impl BreadcrumbElement {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self::default()
    }

    #[wasm_bindgen(js_name = observedAttributes)]
    pub fn observed_attributes() -> js_sys::Array {
        OBSERVED_ATTRIBUTES.iter().copied().map(JsValue::from_str).collect()
    }

    /// Returns whether the widget re-rendered.
    #[wasm_bindgen(js_name = attributeChanged)]
    pub fn attribute_changed(&mut self, name: &str, value: Option<String>) -> bool {
        let slot = match name {
            "value" => &mut self.value,
            "separator" => &mut self.separator,
            _ => return false,
        };
        if *slot == value {
            return false;
        }
        *slot = value;
        self.render();
        true
    }

    pub fn connected(&mut self) {
        self.render();
    }

    pub fn html(&self) -> String {
        self.widget
            .as_ref()
            .map(Breadcrumb::render_html)
            .unwrap_or_default()
    }

    /// The `navigate` event detail for the crumb at `index`, or `null`.
    pub fn activate(&self, index: usize) -> Result<JsValue, JsError> {
        match self.navigate(index) {
            Some(event) => {
                serde_wasm_bindgen::to_value(&event).map_err(|e| JsError::new(&e.to_string()))
            }
            None => Ok(JsValue::NULL),
        }
    }
}

impl BreadcrumbElement {
    fn render(&mut self) {
        self.widget = Some(Breadcrumb::from_attributes(
            self.value.as_deref(),
            self.separator.as_deref(),
        ));
    }

    fn navigate(&self, index: usize) -> Option<Navigate> {
        self.widget.as_ref()?.activate(index)
    }
}
