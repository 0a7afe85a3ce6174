//! Rule table loading
//!
//! The default Japanese table ships inside the binary and is compiled once on
//! first use. Custom tables are read from TOML strings or files.

use super::config::{RuleSet, RuleTableConfig};
use crate::error::{CoreError, Result};
use std::path::Path;
use std::sync::OnceLock;

static DEFAULT_RULES: OnceLock<std::result::Result<RuleSet, String>> = OnceLock::new();

const DEFAULT_RULES_TOML: &str = include_str!("../../configs/rules/japanese.toml");

impl RuleSet {
    /// Parse and compile a rule table document
    pub fn from_toml_str(toml_str: &str) -> Result<Self> {
        let config: RuleTableConfig = toml::from_str(toml_str)
            .map_err(|e| CoreError::RuleConfig(format!("failed to parse rule table: {e}")))?;
        config.compile()
    }

    /// Read, parse and compile a rule table file
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| CoreError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::from_toml_str(&content)
    }
}

/// The embedded Japanese break and whitespace tables
pub fn default_rules() -> Result<&'static RuleSet> {
    DEFAULT_RULES
        .get_or_init(|| RuleSet::from_toml_str(DEFAULT_RULES_TOML).map_err(|e| e.to_string()))
        .as_ref()
        .map_err(|e| CoreError::RuleConfig(format!("embedded rule table: {e}")))
}
