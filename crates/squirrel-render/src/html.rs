//! HTML serialization of a rendered document.
//!
//! Every unit becomes a `<span>` whose class is its label, with a `title` for
//! hover text and a `data-unit` index so a click target can be mapped back to
//! the unit it belongs to.

use html_escape::{encode_double_quoted_attribute, encode_text};

use crate::association::Generation;
use crate::markup::{Fragment, RenderedDocument};

/// Class of the outer `<code>` element.
pub const CONTAINER_CLASS: &str = "squirrel-pie";

/// Serialize `document` inside a `<code>` container, preceded by a stylesheet
/// link when one is given.
pub fn to_html(document: &RenderedDocument, generation: Generation, stylesheet: Option<&str>) -> String {
    let mut out = String::new();
    if let Some(href) = stylesheet {
        out.push_str(&format!(
            r#"<link rel="stylesheet" href="{}">"#,
            encode_double_quoted_attribute(href)
        ));
    }
    out.push_str(&format!(
        r#"<code class="{CONTAINER_CLASS}" data-generation="{}">"#,
        generation.0
    ));
    for fragment in document.roots() {
        write_fragment(document, fragment, &mut out);
    }
    out.push_str("</code>");
    out
}

fn write_fragment(document: &RenderedDocument, fragment: &Fragment, out: &mut String) {
    match fragment {
        Fragment::Text(text) => out.push_str(&encode_text(text)),
        Fragment::Unit(id) => {
            let Some(unit) = document.unit(*id) else {
                return;
            };
            out.push_str(&format!(
                r#"<span class="{}" title="{}" data-unit="{}">"#,
                encode_double_quoted_attribute(&unit.label),
                encode_double_quoted_attribute(unit.title()),
                id.0
            ));
            for child in &unit.children {
                write_fragment(document, child, out);
            }
            out.push_str("</span>");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{render, render_error};
    use crate::test_support::*;
    use crate::RenderOptions;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_const_declaration_markup() {
        let tree = lower(program(vec![const_decl("x", lit_num(1))]));
        let doc = render(&tree, &RenderOptions::default());
        assert_eq!(
            to_html(&doc, Generation(1), None),
            concat!(
                r#"<code class="squirrel-pie" data-generation="1">"#,
                r#"<span class="VariableDeclaration" title="VariableDeclaration" data-unit="0">const "#,
                r#"<span class="VariableDeclarator" title="VariableDeclarator" data-unit="1">"#,
                r#"<span class="Identifier" title="Identifier" data-unit="2">x</span> = "#,
                r#"<span class="Literal" title="Literal" data-unit="3">1</span>"#,
                r#"</span>;</span></code>"#
            )
        );
    }

    #[test]
    fn test_text_is_escaped() {
        let tree = lower(program(vec![expr_stmt(binary(
            "<",
            ident("a"),
            lit_str("'&'"),
        ))]));
        let html = to_html(&render(&tree, &RenderOptions::default()), Generation(1), None);
        assert!(html.contains("a</span> &lt; <span"));
        assert!(html.contains(">'&amp;'</span>"));
    }

    #[test]
    fn test_stylesheet_link() {
        let doc = render_error("bad");
        let html = to_html(&doc, Generation(2), Some("theme.css?a=1&b=\"2\""));
        assert!(html.starts_with(
            r#"<link rel="stylesheet" href="theme.css?a=1&amp;b=&quot;2&quot;"><code"#
        ));
        assert!(html.contains(r#"<span class="ParseError" title="ParseError" data-unit="0">bad</span>"#));
    }
}
