use crate::error::FirnlineError;
use serde::Deserialize;

/// One row of a history log, as written by `HistoryLogger`.
#[derive(Debug, Deserialize)]
pub struct LogEntry {
    pub date: String,
    pub source_label: String,
    pub temperature_c: f64,
    pub wind_speed_kmh: f64,
    pub precipitation_mm: f64,
    pub daily_change: f64,
    pub health_index: f64,
}

/// Aggregate view of a logged run, independent of the model's 30-entry
/// in-memory cap.
#[derive(Debug, Default, Clone)]
pub struct SeasonSummary {
    pub total_days: u64,
    pub gaining_days: u64,
    pub losing_days: u64,
    pub net_change: f64,
    pub min_health_index: f64,
    pub max_health_index: f64,
}

/// Re-reads a history CSV and folds it into a `SeasonSummary`.
pub fn summarize_log(log_path: &str) -> Result<SeasonSummary, FirnlineError> {
    let mut reader = csv::Reader::from_path(log_path)
        .map_err(|e| FirnlineError::CsvError(log_path.to_string(), e))?;

    let mut summary = SeasonSummary {
        min_health_index: f64::MAX,
        max_health_index: f64::MIN,
        ..Default::default()
    };

    for result in reader.deserialize() {
        let record: LogEntry =
            result.map_err(|e| FirnlineError::CsvError(log_path.to_string(), e))?;
        summary.total_days += 1;
        summary.net_change += record.daily_change;
        if record.daily_change > 0.0 {
            summary.gaining_days += 1;
        }
        if record.daily_change < 0.0 {
            summary.losing_days += 1;
        }
        summary.min_health_index = summary.min_health_index.min(record.health_index);
        summary.max_health_index = summary.max_health_index.max(record.health_index);
    }

    if summary.total_days == 0 {
        summary.min_health_index = 0.0;
        summary.max_health_index = 0.0;
    }

    Ok(summary)
}
