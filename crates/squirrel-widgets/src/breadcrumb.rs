//! `<bread-crumb>`: a trail of `[label, url]` pairs rendered as an ordered list.

use html_escape::{encode_double_quoted_attribute, encode_text};
use log::warn;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_SEPARATOR: &str = "/";

/// Attributes whose changes re-render the widget.
pub const OBSERVED_ATTRIBUTES: [&str; 2] = ["separator", "value"];

#[derive(Debug, Error)]
pub enum BreadcrumbError {
    #[error("Invalid breadcrumb value: {0}")]
    InvalidValue(#[from] serde_json::Error),
}

/// One step of the trail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "(String, String)")]
pub struct Crumb {
    pub label: String,
    pub url: String,
}

impl From<(String, String)> for Crumb {
    fn from((label, url): (String, String)) -> Self {
        Self { label, url }
    }
}

/// Event emitted when a crumb is activated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Navigate {
    pub url: String,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Breadcrumb {
    items: Vec<Crumb>,
    separator: String,
}

impl Breadcrumb {
    /// Parse a `value` attribute: a JSON array of `[label, url]` pairs.
    /// An absent or empty value is an empty trail.
    pub fn parse(value: &str) -> Result<Vec<Crumb>, BreadcrumbError> {
        if value.trim().is_empty() {
            return Ok(Vec::new());
        }
        Ok(serde_json::from_str(value)?)
    }

    /// Build from raw attributes. An invalid `value` is logged and treated as
    /// an empty trail; a missing or empty separator falls back to `/`.
    pub fn from_attributes(value: Option<&str>, separator: Option<&str>) -> Self {
        let items = match Self::parse(value.unwrap_or_default()) {
            Ok(items) => items,
            Err(err) => {
                warn!("{err}");
                Vec::new()
            }
        };
        let separator = match separator {
            Some(s) if !s.is_empty() => s.to_string(),
            _ => DEFAULT_SEPARATOR.to_string(),
        };
        Self { items, separator }
    }

    pub fn items(&self) -> &[Crumb] {
        &self.items
    }

    pub fn separator(&self) -> &str {
        &self.separator
    }

    /// The crumb at `index` as a navigation event.
    pub fn activate(&self, index: usize) -> Option<Navigate> {
        self.items.get(index).map(|crumb| Navigate {
            url: crumb.url.clone(),
            label: crumb.label.clone(),
        })
    }

    pub fn render_html(&self) -> String {
        let divider = format!("'{}'", self.separator.replace('\'', "\\'"));
        let mut out = String::new();
        out.push_str(&format!(
            r#"<nav aria-label="breadcrumb" style="--breadcrumb-divider: {}"><ol class="breadcrumb">"#,
            encode_double_quoted_attribute(&divider)
        ));
        let last = self.items.len().saturating_sub(1);
        for (index, crumb) in self.items.iter().enumerate() {
            let (class, aria_current) = if index == last {
                ("breadcrumb-item active", r#" aria-current="page""#)
            } else {
                ("breadcrumb-item", "")
            };
            out.push_str(&format!(
                r#"<li class="{class}"{aria_current}><button data-index="{index}" data-url="{}">{}</button></li>"#,
                encode_double_quoted_attribute(&crumb.url),
                encode_text(&crumb.label)
            ));
        }
        out.push_str("</ol></nav>");
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parses_pairs() {
        let crumbs = Breadcrumb::from_attributes(
            Some(r#"[["Home", "/"], ["Docs", "/docs"]]"#),
            None,
        );
        assert_eq!(
            crumbs.items(),
            &[
                Crumb { label: "Home".into(), url: "/".into() },
                Crumb { label: "Docs".into(), url: "/docs".into() },
            ]
        );
        assert_eq!(crumbs.separator(), "/");
    }

    #[test]
    fn test_invalid_value_is_empty() {
        let crumbs = Breadcrumb::from_attributes(Some("[[\"Home\""), Some(">"));
        assert!(crumbs.items().is_empty());
        assert_eq!(crumbs.separator(), ">");
        assert!(Breadcrumb::parse("{}").is_err());
    }

    #[test]
    fn test_empty_separator_falls_back() {
        let crumbs = Breadcrumb::from_attributes(None, Some(""));
        assert_eq!(crumbs.separator(), DEFAULT_SEPARATOR);
        assert!(crumbs.items().is_empty());
    }

    #[test]
    fn test_last_item_is_current() {
        let crumbs = Breadcrumb::from_attributes(Some(r#"[["A", "/a"], ["B & C", "/b?x=1&y=2"]]"#), None);
        assert_eq!(
            crumbs.render_html(),
            concat!(
                r#"<nav aria-label="breadcrumb" style="--breadcrumb-divider: '/'"><ol class="breadcrumb">"#,
                r#"<li class="breadcrumb-item"><button data-index="0" data-url="/a">A</button></li>"#,
                r#"<li class="breadcrumb-item active" aria-current="page"><button data-index="1" data-url="/b?x=1&amp;y=2">B &amp; C</button></li>"#,
                r#"</ol></nav>"#
            )
        );
    }

    #[test]
    fn test_only_last_item_carries_aria_current() {
        let crumbs = Breadcrumb::from_attributes(
            Some(r#"[["A", "/a"], ["B", "/b"], ["C", "/c"]]"#),
            None,
        );
        let html = crumbs.render_html();
        assert_eq!(html.matches(r#"aria-current="page""#).count(), 1);
        assert_eq!(html.matches(r#"<li class="breadcrumb-item">"#).count(), 2);
        assert!(html.contains(
            r#"<li class="breadcrumb-item active" aria-current="page"><button data-index="2" data-url="/c">C</button></li>"#
        ));
    }

    #[test]
    fn test_activate() {
        let crumbs = Breadcrumb::from_attributes(Some(r#"[["Home", "/"]]"#), None);
        assert_eq!(
            crumbs.activate(0),
            Some(Navigate { url: "/".into(), label: "Home".into() })
        );
        assert_eq!(crumbs.activate(1), None);
    }
}
