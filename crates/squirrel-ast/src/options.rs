//! Options passed to the external parser.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// ECMAScript edition requested from the parser, e.g. `2022`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EcmaVersion(pub u16);

impl Default for EcmaVersion {
    fn default() -> Self {
        Self(2022)
    }
}

/// Syntax mode of the parsed text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceType {
    #[default]
    Module,
    Script,
}

impl SourceType {
    pub fn as_str(self) -> &'static str {
        match self {
            SourceType::Module => "module",
            SourceType::Script => "script",
        }
    }
}

impl fmt::Display for SourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown source type `{0}`, expected `module` or `script`")]
pub struct UnknownSourceType(pub String);

impl FromStr for SourceType {
    type Err = UnknownSourceType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "module" => Ok(SourceType::Module),
            "script" => Ok(SourceType::Script),
            other => Err(UnknownSourceType(other.to_string())),
        }
    }
}

/// Options for one parse call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParseOptions {
    pub ecma_version: EcmaVersion,
    pub source_type: SourceType,
}
