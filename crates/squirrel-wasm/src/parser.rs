//! acorn as the [`SourceParser`] behind the element.

use log::debug;
use squirrel_ast::{ParseError, ParseOptions, SourceParser, SyntaxTree};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

#[wasm_bindgen]
extern "C" {
    /// `acorn.parse` from the page's global `acorn`.
    #[wasm_bindgen(catch, js_namespace = acorn, js_name = parse)]
    fn acorn_parse(source: &str, options: &JsValue) -> Result<JsValue, JsValue>;
}

/// Parses with the global `acorn` and lowers its ESTree output.
#[derive(Debug, Default, Clone, Copy)]
pub struct AcornParser;

impl SourceParser for AcornParser {
    fn parse(&self, source: &str, options: &ParseOptions) -> Result<SyntaxTree, ParseError> {
        let js_options = serde_wasm_bindgen::to_value(options)
            .map_err(|e| ParseError::syntax(e.to_string(), None))?;
        let program = acorn_parse(source, &js_options).map_err(|err| syntax_error(&err))?;
        let estree: serde_json::Value = serde_wasm_bindgen::from_value(program)
            .map_err(|e| ParseError::syntax(format!("Unreadable parser output: {e}"), None))?;
        debug!("acorn parsed {} bytes", source.len());
        Ok(SyntaxTree::from_estree(&estree)?)
    }
}

/// acorn throws a `SyntaxError` carrying the offending offset in `pos`.
fn syntax_error(err: &JsValue) -> ParseError {
    let message = match err.dyn_ref::<js_sys::Error>() {
        Some(error) => String::from(error.message()),
        None => err.as_string().unwrap_or_else(|| "Parse error".to_string()),
    };
    let position = js_sys::Reflect::get(err, &JsValue::from_str("pos"))
        .ok()
        .and_then(|pos| pos.as_f64())
        .map(|pos| pos as usize);
    ParseError::syntax(message, position)
}
