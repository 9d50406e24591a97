use serde::{Deserialize, Serialize};

/// Reliability and provenance metadata for the current observation stream.
///
/// This is a side channel next to the history: the orchestration layer
/// overwrites or merges it before each diagnostics read, and it is never
/// captured in snapshots. All flags are always present; there is no partial
/// state. Each model instance owns exactly one `DataContext`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataContext {
    pub source_label: String,
    /// Hours since the live observation was taken, when known.
    pub age_hours: Option<f64>,
    pub is_fallback: bool,
    pub is_forecast: bool,
    pub is_scenario: bool,
    pub is_stale: bool,
}

impl Default for DataContext {
    fn default() -> Self {
        Self {
            source_label: "Observed".to_string(),
            age_hours: None,
            is_fallback: false,
            is_forecast: false,
            is_scenario: false,
            is_stale: false,
        }
    }
}

impl DataContext {
    /// Overlays only the fields supplied in `update`, keeping prior values
    /// for the rest.
    pub fn merge(&mut self, update: DataContextUpdate) {
        if let Some(source_label) = update.source_label {
            self.source_label = source_label;
        }
        if let Some(age_hours) = update.age_hours {
            self.age_hours = Some(age_hours);
        }
        if let Some(is_fallback) = update.is_fallback {
            self.is_fallback = is_fallback;
        }
        if let Some(is_forecast) = update.is_forecast {
            self.is_forecast = is_forecast;
        }
        if let Some(is_scenario) = update.is_scenario {
            self.is_scenario = is_scenario;
        }
        if let Some(is_stale) = update.is_stale {
            self.is_stale = is_stale;
        }
    }
}

/// A partial overlay for [`DataContext`]; `None` fields are left unchanged
/// by [`DataContext::merge`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DataContextUpdate {
    pub source_label: Option<String>,
    pub age_hours: Option<f64>,
    pub is_fallback: Option<bool>,
    pub is_forecast: Option<bool>,
    pub is_scenario: Option<bool>,
    pub is_stale: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merge_overlays_only_supplied_fields() {
        let mut ctx = DataContext::default();
        ctx.merge(DataContextUpdate {
            source_label: Some("Forecast".to_string()),
            is_forecast: Some(true),
            ..Default::default()
        });

        assert_eq!(ctx.source_label, "Forecast");
        assert!(ctx.is_forecast);
        assert!(!ctx.is_fallback);
        assert!(!ctx.is_stale);
        assert_eq!(ctx.age_hours, None);

        ctx.merge(DataContextUpdate {
            age_hours: Some(3.5),
            is_stale: Some(true),
            ..Default::default()
        });

        // The earlier overlay survives an unrelated merge.
        assert_eq!(ctx.source_label, "Forecast");
        assert!(ctx.is_forecast);
        assert_eq!(ctx.age_hours, Some(3.5));
        assert!(ctx.is_stale);
    }
}
