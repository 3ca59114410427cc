//! Records a chain of property names, optionally with call options.
//!
//! ```
//! use serde_json::json;
//! use squirrel_widgets::ChainCollector;
//!
//! let mut chain = ChainCollector::new();
//! chain.append("users").append("find").with_options(json!({ "id": 1 }));
//! assert_eq!(chain.to_path(), "users.find");
//! ```

use std::fmt;

use serde::Serialize;
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Segment {
    Name(String),
    Call { name: String, options: Value },
}

impl Segment {
    pub fn name(&self) -> &str {
        match self {
            Segment::Name(name) | Segment::Call { name, .. } => name,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChainCollector {
    chain: Vec<Segment>,
}

impl ChainCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, name: impl Into<String>) -> &mut Self {
        self.chain.push(Segment::Name(name.into()));
        self
    }

    /// Attach options to the last segment. Does nothing when the chain is
    /// empty or the last segment already has options.
    pub fn with_options(&mut self, options: Value) -> &mut Self {
        if matches!(self.chain.last(), Some(Segment::Name(_))) {
            if let Some(Segment::Name(name)) = self.chain.pop() {
                self.chain.push(Segment::Call { name, options });
            }
        }
        self
    }

    pub fn get(&self, index: usize) -> Option<&Segment> {
        self.chain.get(index)
    }

    pub fn len(&self) -> usize {
        self.chain.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chain.is_empty()
    }

    pub fn clear(&mut self) -> &mut Self {
        self.chain.clear();
        self
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Segment> {
        self.chain.iter()
    }

    /// Copy of the recorded segments.
    pub fn to_sequence(&self) -> Vec<Segment> {
        self.chain.clone()
    }

    /// Segment names joined with `.`.
    pub fn to_path(&self) -> String {
        self.chain
            .iter()
            .map(Segment::name)
            .collect::<Vec<_>>()
            .join(".")
    }
}

impl<'a> IntoIterator for &'a ChainCollector {
    type Item = &'a Segment;
    type IntoIter = std::slice::Iter<'a, Segment>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl fmt::Display for ChainCollector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let json = serde_json::to_string_pretty(&self.chain).map_err(|_| fmt::Error)?;
        f.write_str(&json)
    }
}
