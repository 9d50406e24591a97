use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrendState {
    Advancing,
    Receding,
    Stable,
}

impl fmt::Display for TrendState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrendState::Advancing => write!(f, "Advancing"),
            TrendState::Receding => write!(f, "Receding"),
            TrendState::Stable => write!(f, "Stable"),
        }
    }
}

/// The model's externally visible state at a point in time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GlacierState {
    pub health_index: f64,
    /// The most recent history entry's daily change, or 0 with no history.
    pub daily_change: f64,
    pub seven_day_trend: f64,
    pub state: TrendState,
    pub last_source: String,
}
