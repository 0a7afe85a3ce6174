//! Segmenter entry point and builder

use crate::{
    aligner::{align, AlignedSpan},
    assembler::SpanAssembler,
    config::{EngineConfig, EngineConfigBuilder, Substitution},
    error::{EngineError, Result},
    executor::{auto_select, ExecutionMode, Executor, SequentialExecutor},
    tokenizer::Tokenizer,
};
use kashi_core::{EnclosureConfig, EnclosureSet, FeatureToken, Line, RuleSet, RuleTable, TimedSpan};
use std::sync::Arc;
use tracing::debug;

#[cfg(feature = "parallel")]
use crate::executor::ParallelExecutor;

/// Turns timed spans into segmented lines
///
/// Holds a validated configuration; cheap to clone and safe to share between
/// threads.
#[derive(Debug, Clone)]
pub struct Segmenter {
    config: Arc<EngineConfig>,
    enclosures: Arc<EnclosureSet>,
}

impl Segmenter {
    /// Segmenter with the embedded Japanese rules
    pub fn new() -> Result<Self> {
        Self::with_config(EngineConfig::new()?)
    }

    /// Segmenter with a custom configuration
    pub fn with_config(config: EngineConfig) -> Result<Self> {
        config.validate()?;
        let enclosures = EnclosureSet::new(&config.enclosures);
        Ok(Self {
            config: Arc::new(config),
            enclosures: Arc::new(enclosures),
        })
    }

    /// Create a builder
    pub fn builder() -> SegmenterBuilder {
        SegmenterBuilder::new()
    }

    /// Active configuration
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Tokenize and segment `spans`
    ///
    /// Every span is validated before the tokenizer is called. Output holds
    /// one [`Line`] per span, in input order.
    pub fn segment<T>(&self, tokenizer: &T, spans: &[TimedSpan]) -> Result<Vec<Line>>
    where
        T: Tokenizer + ?Sized,
    {
        validate_spans(spans)?;

        let prepared: Vec<String> = spans
            .iter()
            .map(|span| self.config.prepare_text(&span.text).into_owned())
            .collect();

        let token_lists = prepared
            .iter()
            .enumerate()
            .map(|(index, text)| {
                tokenizer
                    .tokenize(text)
                    .map_err(|source| EngineError::Tokenizer { index, source })
            })
            .collect::<Result<Vec<_>>>()?;

        self.assemble_all(spans, &prepared, token_lists)
    }

    /// Segment `spans` with token lists produced elsewhere
    ///
    /// `token_lists[i]` must come from the prepared text of `spans[i]` (see
    /// [`EngineConfig::prepare_text`]).
    pub fn segment_tokens(
        &self,
        spans: &[TimedSpan],
        token_lists: Vec<Vec<FeatureToken>>,
    ) -> Result<Vec<Line>> {
        if spans.len() != token_lists.len() {
            return Err(EngineError::Configuration(format!(
                "{} spans but {} token lists",
                spans.len(),
                token_lists.len()
            )));
        }
        validate_spans(spans)?;

        let prepared: Vec<String> = spans
            .iter()
            .map(|span| self.config.prepare_text(&span.text).into_owned())
            .collect();
        self.assemble_all(spans, &prepared, token_lists)
    }

    /// Mode a call with `span_count` spans runs in
    pub fn execution_mode_for(&self, span_count: usize) -> ExecutionMode {
        self.config
            .execution_mode
            .unwrap_or_else(|| auto_select(span_count, self.config.parallel_threshold))
    }

    fn assemble_all(
        &self,
        spans: &[TimedSpan],
        prepared: &[String],
        token_lists: Vec<Vec<FeatureToken>>,
    ) -> Result<Vec<Line>> {
        let aligned = align(prepared, token_lists);
        let mode = self.execution_mode_for(spans.len());

        let assembler = SpanAssembler::new(&self.config, &self.enclosures);
        let job = |index: usize| {
            let AlignedSpan { tokens, .. } = &aligned[index];
            assembler.assemble(index, &spans[index], &prepared[index], tokens)
        };

        let lines = match mode {
            ExecutionMode::Sequential => run_spans(&SequentialExecutor, spans.len(), job)?,
            #[cfg(feature = "parallel")]
            ExecutionMode::Parallel => {
                run_spans(&ParallelExecutor::new(self.config.threads), spans.len(), job)?
            }
            #[cfg(not(feature = "parallel"))]
            ExecutionMode::Parallel => run_spans(&SequentialExecutor, spans.len(), job)?,
        };

        debug!(
            spans = lines.len(),
            units = lines.iter().map(|l| l.units.len()).sum::<usize>(),
            "segmentation complete"
        );
        Ok(lines)
    }
}

/// Run one job per span on `executor`
fn run_spans<E, T, F>(executor: &E, spans: usize, job: F) -> Result<Vec<T>>
where
    E: Executor,
    T: Send,
    F: Fn(usize) -> Result<T> + Send + Sync,
{
    debug!(spans, mode = ?executor.mode(), "segmenting");
    executor.run(spans, job)
}

fn validate_spans(spans: &[TimedSpan]) -> Result<()> {
    for (index, span) in spans.iter().enumerate() {
        span.validate(index)?;
    }
    Ok(())
}

/// Builder for [`Segmenter`]
#[derive(Debug, Default)]
pub struct SegmenterBuilder {
    config_builder: EngineConfigBuilder,
}

impl SegmenterBuilder {
    /// Create a new builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Use both tables of a rule set
    pub fn rules(mut self, rules: RuleSet) -> Self {
        self.config_builder = self.config_builder.rules(rules);
        self
    }

    /// Replace the break table
    pub fn break_rules(mut self, table: RuleTable) -> Self {
        self.config_builder = self.config_builder.break_rules(table);
        self
    }

    /// Replace the whitespace table
    pub fn whitespace_rules(mut self, table: RuleTable) -> Self {
        self.config_builder = self.config_builder.whitespace_rules(table);
        self
    }

    /// Set the bracket and quote characters
    pub fn enclosures(mut self, enclosures: EnclosureConfig) -> Self {
        self.config_builder = self.config_builder.enclosures(enclosures);
        self
    }

    /// Limit containment suppression to short enclosures
    pub fn max_enclosed_chars(mut self, max: usize) -> Self {
        self.config_builder = self.config_builder.max_enclosed_chars(max);
        self
    }

    /// Toggle the closing-bracket break
    pub fn close_enclosure_break(mut self, enabled: bool) -> Self {
        self.config_builder = self.config_builder.close_enclosure_break(enabled);
        self
    }

    /// Replace the substitution list
    pub fn substitutions(mut self, substitutions: Vec<Substitution>) -> Self {
        self.config_builder = self.config_builder.substitutions(substitutions);
        self
    }

    /// Force an execution mode
    pub fn execution_mode(mut self, mode: ExecutionMode) -> Self {
        self.config_builder = self.config_builder.execution_mode(mode);
        self
    }

    /// Set the span count from which auto mode goes parallel
    pub fn parallel_threshold(mut self, threshold: usize) -> Self {
        self.config_builder = self.config_builder.parallel_threshold(threshold);
        self
    }

    /// Set the worker thread count
    pub fn threads(mut self, count: usize) -> Self {
        self.config_builder = self.config_builder.threads(count);
        self
    }

    /// Use sequential preset
    pub fn sequential(mut self) -> Self {
        self.config_builder = self.config_builder.sequential();
        self
    }

    /// Build the segmenter
    pub fn build(self) -> Result<Segmenter> {
        Segmenter::with_config(self.config_builder.build()?)
    }
}
