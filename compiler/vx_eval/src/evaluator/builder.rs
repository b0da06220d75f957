//! `EvaluatorBuilder` for creating `Evaluator` instances.

use vx_value::DispatchRegistry;

use super::Evaluator;
use crate::{EvalConfig, SharedMutableRegistry};

/// Builder for [`Evaluator`].
///
/// Without an explicit registry the evaluator gets a fresh one holding the
/// default byte and boolean records.
#[derive(Default)]
pub struct EvaluatorBuilder {
    config: EvalConfig,
    registry: Option<SharedMutableRegistry<DispatchRegistry>>,
}

impl EvaluatorBuilder {
    pub fn new() -> Self {
        EvaluatorBuilder::default()
    }

    #[must_use]
    pub fn config(mut self, config: EvalConfig) -> Self {
        self.config = config;
        self
    }

    /// Share an existing registry, e.g. between several evaluators.
    #[must_use]
    pub fn registry(mut self, registry: SharedMutableRegistry<DispatchRegistry>) -> Self {
        self.registry = Some(registry);
        self
    }

    pub fn build(self) -> Evaluator {
        let registry = self
            .registry
            .unwrap_or_else(|| SharedMutableRegistry::new(DispatchRegistry::with_defaults()));
        tracing::debug!(
            records = registry.read().len(),
            max_integer_bits = self.config.max_integer_bits,
            "evaluator built"
        );
        Evaluator {
            registry,
            config: self.config,
        }
    }
}
