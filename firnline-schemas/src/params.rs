use serde::{Deserialize, Serialize};

/// Rate and threshold configuration for the mass-balance model.
///
/// Fixed at model construction time. Any subset of fields may be given in a
/// glacier definition; the rest fall back to the defaults below.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelParameters {
    /// Weight applied to precipitation when the temperature is at or below 1 °C.
    pub accumulation_rate: f64,
    /// Weight applied to temperature when it is above 0 °C.
    pub melt_rate: f64,
    /// Weight applied to wind speed, always active.
    pub sublimation_rate: f64,
    /// Seven-day trend above this classifies the glacier as Advancing.
    pub advancing_threshold: f64,
    /// Seven-day trend below this classifies the glacier as Receding.
    pub receding_threshold: f64,
}

impl Default for ModelParameters {
    fn default() -> Self {
        Self {
            accumulation_rate: 0.1,
            melt_rate: 0.05,
            sublimation_rate: 0.01,
            advancing_threshold: 0.1,
            receding_threshold: -0.1,
        }
    }
}
