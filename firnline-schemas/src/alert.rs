use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertLevel {
    Critical,
    Warning,
    Info,
}

impl fmt::Display for AlertLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AlertLevel::Critical => write!(f, "critical"),
            AlertLevel::Warning => write!(f, "warning"),
            AlertLevel::Info => write!(f, "info"),
        }
    }
}

/// A single active alert. Emission order is significant for display and is
/// preserved by the diagnostics layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Alert {
    /// Stable identifier, safe to key UI state on.
    pub id: &'static str,
    pub level: AlertLevel,
    pub label: &'static str,
    pub detail: String,
}
