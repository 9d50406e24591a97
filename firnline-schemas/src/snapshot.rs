use crate::history::HistoryEntry;
use serde::{Deserialize, Serialize};

fn default_health_index() -> f64 {
    100.0
}

fn default_source_label() -> String {
    "Observed".to_string()
}

/// An owned copy of the model's physical state, used to roll back
/// speculative forecast or scenario runs.
///
/// The data context is deliberately not part of a snapshot; the caller
/// re-derives it on every read path. Fields absent from a serialized
/// snapshot fall back to the initial-model defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelSnapshot {
    #[serde(default = "default_health_index")]
    pub health_index: f64,
    #[serde(default)]
    pub history: Vec<HistoryEntry>,
    #[serde(default = "default_source_label")]
    pub last_source: String,
}

impl Default for ModelSnapshot {
    fn default() -> Self {
        Self {
            health_index: default_health_index(),
            history: Vec::new(),
            last_source: default_source_label(),
        }
    }
}
