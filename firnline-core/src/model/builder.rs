use crate::{
    error::FirnlineError,
    logger::HistoryLogger,
    model::engine::{MassBalanceModel, INITIAL_HEALTH_INDEX},
};
use firnline_schemas::{context::DataContext, params::ModelParameters};
use std::collections::VecDeque;

/// A fluent builder for constructing a `MassBalanceModel`.
///
/// Parameters are fixed once `build` is called; a model starts with a full
/// health index, an empty history, and a clean data context.
#[derive(Default)]
pub struct ModelBuilder {
    params: ModelParameters,
    initial_source: Option<String>,
    log_path: Option<String>,
}

impl ModelBuilder {
    /// Creates a new builder carrying the default parameters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Overrides the model's rate and threshold parameters.
    pub fn with_parameters(mut self, params: ModelParameters) -> Self {
        self.params = params;
        self
    }

    /// Sets the provenance label the model starts with (default "Observed").
    pub fn with_initial_source(mut self, source_label: &str) -> Self {
        self.initial_source = Some(source_label.to_string());
        self
    }

    /// Configures the model to append one CSV row per applied observation.
    pub fn with_history_logging_to_file(mut self, path: &str) -> Self {
        self.log_path = Some(path.to_string());
        self
    }

    /// Consumes the builder and returns a fully configured model.
    ///
    /// # Errors
    ///
    /// Returns a `FirnlineError` if the history log file cannot be created.
    pub fn build(self) -> Result<MassBalanceModel, FirnlineError> {
        let logger = match self.log_path {
            Some(path) => Some(
                HistoryLogger::new(&path).map_err(|e| FirnlineError::FileIO(path.clone(), e))?,
            ),
            None => None,
        };

        let last_source = self
            .initial_source
            .unwrap_or_else(|| "Observed".to_string());

        Ok(MassBalanceModel {
            health_index: INITIAL_HEALTH_INDEX,
            history: VecDeque::new(),
            last_source: last_source.clone(),
            data_context: DataContext {
                source_label: last_source,
                ..Default::default()
            },
            params: self.params,
            logger,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_a_fresh_model() {
        let model = ModelBuilder::new().build().unwrap();
        assert_eq!(model.health_index(), 100.0);
        assert!(model.history().is_empty());
        assert_eq!(model.last_source(), "Observed");
        assert_eq!(model.data_context().source_label, "Observed");
    }

    #[test]
    fn initial_source_flows_into_state_and_context() {
        let model = ModelBuilder::new()
            .with_initial_source("Simulated")
            .build()
            .unwrap();
        assert_eq!(model.last_source(), "Simulated");
        assert_eq!(model.data_context().source_label, "Simulated");
    }

    #[test]
    fn parameter_overrides_are_kept() {
        let params = ModelParameters {
            melt_rate: 0.09,
            ..Default::default()
        };
        let model = ModelBuilder::new().with_parameters(params).build().unwrap();
        assert_eq!(model.parameters().melt_rate, 0.09);
        assert_eq!(model.parameters().accumulation_rate, 0.1);
    }
}
