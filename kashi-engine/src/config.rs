//! Configuration types for the engine

use crate::error::{EngineError, Result};
use crate::executor::ExecutionMode;
use kashi_core::{default_rules, EnclosureConfig, RuleSet, RuleTable};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

/// Literal text replacement applied before tokenizing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Substitution {
    /// Text to look for
    pub from: String,
    /// Replacement
    pub to: String,
}

impl Substitution {
    /// Create a substitution
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }
}

/// Default substitutions: back-to-back bracket groups get a separating space
pub fn default_substitutions() -> Vec<Substitution> {
    vec![Substitution::new(")(", ") (")]
}

/// Engine configuration
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Rules deciding line breaks
    pub break_rules: RuleTable,
    /// Rules deciding visible whitespace
    pub whitespace_rules: RuleTable,
    /// Bracket and quote characters
    pub enclosures: EnclosureConfig,
    /// Suppress breaks only inside enclosures whose inner text has at most
    /// this many characters (`None` = any length)
    pub max_enclosed_chars: Option<usize>,
    /// Break after a closing bracket that is followed by non-Latin text
    pub close_enclosure_break: bool,
    /// Replacements applied, in order, to each span's text before tokenizing
    pub substitutions: Vec<Substitution>,
    /// Execution mode (None = auto)
    pub execution_mode: Option<ExecutionMode>,
    /// Minimum span count for parallel processing
    pub parallel_threshold: usize,
    /// Number of worker threads (None = rayon's global pool)
    pub threads: Option<usize>,
}

impl EngineConfig {
    /// Configuration with the embedded Japanese rule tables
    pub fn new() -> Result<Self> {
        Ok(Self::from_rules(default_rules()?.clone()))
    }

    /// Configuration with custom rule tables and default everything else
    pub fn from_rules(rules: RuleSet) -> Self {
        Self {
            break_rules: rules.break_rules,
            whitespace_rules: rules.whitespace_rules,
            enclosures: EnclosureConfig::default(),
            max_enclosed_chars: None,
            close_enclosure_break: true,
            substitutions: default_substitutions(),
            execution_mode: None,
            parallel_threshold: 64,
            threads: None,
        }
    }

    /// Create a builder
    pub fn builder() -> EngineConfigBuilder {
        EngineConfigBuilder::new()
    }

    /// Apply the substitutions to a span's text
    pub fn prepare_text<'a>(&self, text: &'a str) -> Cow<'a, str> {
        let mut prepared = Cow::Borrowed(text);
        for sub in &self.substitutions {
            if prepared.contains(sub.from.as_str()) {
                prepared = Cow::Owned(prepared.replace(sub.from.as_str(), &sub.to));
            }
        }
        prepared
    }

    /// Check the invariants the builder enforces
    pub fn validate(&self) -> Result<()> {
        if self.threads == Some(0) {
            return Err(EngineError::Configuration(
                "thread count must be greater than zero".to_string(),
            ));
        }
        if let Some(sub) = self.substitutions.iter().find(|s| s.from.is_empty()) {
            return Err(EngineError::Configuration(format!(
                "substitution with empty pattern (replacement '{}')",
                sub.to
            )));
        }
        Ok(())
    }
}

/// Builder for [`EngineConfig`]
#[derive(Debug, Default)]
pub struct EngineConfigBuilder {
    rules: Option<RuleSet>,
    break_rules: Option<RuleTable>,
    whitespace_rules: Option<RuleTable>,
    enclosures: Option<EnclosureConfig>,
    max_enclosed_chars: Option<usize>,
    close_enclosure_break: Option<bool>,
    substitutions: Option<Vec<Substitution>>,
    execution_mode: Option<ExecutionMode>,
    parallel_threshold: Option<usize>,
    threads: Option<usize>,
}

impl EngineConfigBuilder {
    /// Create a new builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Use both tables of a rule set
    pub fn rules(mut self, rules: RuleSet) -> Self {
        self.rules = Some(rules);
        self
    }

    /// Replace the break table
    pub fn break_rules(mut self, table: RuleTable) -> Self {
        self.break_rules = Some(table);
        self
    }

    /// Replace the whitespace table
    pub fn whitespace_rules(mut self, table: RuleTable) -> Self {
        self.whitespace_rules = Some(table);
        self
    }

    /// Set the bracket and quote characters
    pub fn enclosures(mut self, enclosures: EnclosureConfig) -> Self {
        self.enclosures = Some(enclosures);
        self
    }

    /// Limit containment suppression to short enclosures
    pub fn max_enclosed_chars(mut self, max: usize) -> Self {
        self.max_enclosed_chars = Some(max);
        self
    }

    /// Toggle the closing-bracket break
    pub fn close_enclosure_break(mut self, enabled: bool) -> Self {
        self.close_enclosure_break = Some(enabled);
        self
    }

    /// Replace the substitution list
    pub fn substitutions(mut self, substitutions: Vec<Substitution>) -> Self {
        self.substitutions = Some(substitutions);
        self
    }

    /// Force an execution mode
    pub fn execution_mode(mut self, mode: ExecutionMode) -> Self {
        self.execution_mode = Some(mode);
        self
    }

    /// Set the span count from which auto mode goes parallel
    pub fn parallel_threshold(mut self, threshold: usize) -> Self {
        self.parallel_threshold = Some(threshold);
        self
    }

    /// Set the worker thread count
    pub fn threads(mut self, count: usize) -> Self {
        self.threads = Some(count);
        self
    }

    /// Use sequential preset
    pub fn sequential(self) -> Self {
        self.execution_mode(ExecutionMode::Sequential)
    }

    /// Build the configuration
    ///
    /// Tables that were not given fall back to the embedded Japanese rules.
    pub fn build(self) -> Result<EngineConfig> {
        let needs_default = self.rules.is_none()
            && (self.break_rules.is_none() || self.whitespace_rules.is_none());
        let base = match self.rules {
            Some(rules) => rules,
            None if needs_default => default_rules()?.clone(),
            None => RuleSet::default(),
        };

        let mut config = EngineConfig::from_rules(base);
        if let Some(table) = self.break_rules {
            config.break_rules = table;
        }
        if let Some(table) = self.whitespace_rules {
            config.whitespace_rules = table;
        }
        if let Some(enclosures) = self.enclosures {
            config.enclosures = enclosures;
        }
        if let Some(enabled) = self.close_enclosure_break {
            config.close_enclosure_break = enabled;
        }
        if let Some(substitutions) = self.substitutions {
            config.substitutions = substitutions;
        }
        if let Some(threshold) = self.parallel_threshold {
            config.parallel_threshold = threshold;
        }
        config.max_enclosed_chars = self.max_enclosed_chars;
        config.execution_mode = self.execution_mode;
        config.threads = self.threads;

        config.validate()?;
        Ok(config)
    }
}
