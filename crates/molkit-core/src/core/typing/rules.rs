use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

/// One override rule: matches atoms by element symbol plus optional
/// neighbor-count and aromaticity constraints, and supplies the label to
/// assign. Omitted constraints match anything.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct TypingRule {
    pub element: String,
    pub neighbors: Option<usize>,
    pub aromatic: Option<bool>,
    pub label: String,
}

impl TypingRule {
    fn matches(&self, symbol: &str, neighbors: usize, aromatic: bool) -> bool {
        self.element == symbol
            && self.neighbors.is_none_or(|n| n == neighbors)
            && self.aromatic.is_none_or(|a| a == aromatic)
    }
}

/// A TOML-defined table of typing overrides, consulted before a typer's
/// built-in rules. First matching rule wins, in document order.
///
/// ```toml
/// [[rule]]
/// element = "C"
/// aromatic = true
/// label = "C_R2"
/// ```
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct TypingRules {
    #[serde(default, rename = "rule")]
    rules: Vec<TypingRule>,
}

#[derive(Debug, Error)]
pub enum RulesLoadError {
    #[error("File I/O error for '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),
}

impl TypingRules {
    pub fn parse(content: &str) -> Result<Self, RulesLoadError> {
        Ok(toml::from_str(content)?)
    }

    pub fn load(path: &Path) -> Result<Self, RulesLoadError> {
        let content = std::fs::read_to_string(path).map_err(|e| RulesLoadError::Io {
            path: path.to_string_lossy().to_string(),
            source: e,
        })?;
        Self::parse(&content)
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// The label of the first rule matching the given atom environment.
    pub fn match_label(&self, symbol: &str, neighbors: usize, aromatic: bool) -> Option<&str> {
        self.rules
            .iter()
            .find(|rule| rule.matches(symbol, neighbors, aromatic))
            .map(|rule| rule.label.as_str())
    }
}
