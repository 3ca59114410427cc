//! WASM bindings for the squirrel-pie element.
//!
//! Exposes the `SquirrelPie` and `BreadCrumb` element handles to JavaScript
//! via wasm-bindgen. Source text is parsed by the page's global `acorn`.

mod breadcrumb;
mod element;
mod parser;

pub use breadcrumb::BreadcrumbElement;
pub use element::SquirrelPieElement;
pub use parser::AcornParser;

use wasm_bindgen::prelude::*;

/// Get the library version.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
