use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One day's outcome as recorded by the model after applying an observation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub date: DateTime<Utc>,
    pub daily_change: f64,
    /// Health index after the update, clamped to [0, 200].
    pub health_index: f64,
    /// Provenance tag, e.g. "Observed", "Forecast", "Simulated", "Scenario: X".
    pub source_label: String,
}
