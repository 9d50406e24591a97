use crate::{alert::Alert, confidence::Confidence};
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectionStatus {
    Collapsed,
    Stable,
    Declining,
}

impl fmt::Display for ProjectionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProjectionStatus::Collapsed => write!(f, "collapsed"),
            ProjectionStatus::Stable => write!(f, "stable"),
            ProjectionStatus::Declining => write!(f, "declining"),
        }
    }
}

/// Time-to-threshold projection under the current seven-day trend.
///
/// `days` and `years` are `None` when no collapse is projected, and both
/// `Some(0)` when the threshold is already crossed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Projection {
    pub status: ProjectionStatus,
    pub message: String,
    pub days: Option<u32>,
    pub years: Option<u32>,
}

/// The full diagnostics read, bundled for reporting and summary text.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DiagnosticsReport {
    pub alerts: Vec<Alert>,
    pub confidence: Confidence,
    pub projection: Projection,
}
