use csv::Writer;
use firnline_schemas::{history::HistoryEntry, observation::DailyObservation};
use serde::Serialize;
use std::fs;
use std::io;

#[derive(Debug, Serialize)]
struct LogRow {
    date: String,
    source_label: String,
    temperature_c: f64,
    wind_speed_kmh: f64,
    precipitation_mm: f64,
    daily_change: f64,
    health_index: f64,
}

/// Writes one flat CSV row per applied observation.
///
/// The log is write-only telemetry for analysis and plotting; it is not a
/// persistence mechanism and is never read back into the model.
pub struct HistoryLogger {
    writer: Writer<fs::File>,
}

impl HistoryLogger {
    pub fn new(path: &str) -> Result<Self, io::Error> {
        let writer = Writer::from_path(path)?;
        Ok(Self { writer })
    }

    pub fn log_observation(
        &mut self,
        observation: &DailyObservation,
        entry: &HistoryEntry,
    ) -> Result<(), anyhow::Error> {
        let row = LogRow {
            date: entry.date.to_rfc3339(),
            source_label: entry.source_label.clone(),
            temperature_c: observation.temperature_c,
            wind_speed_kmh: observation.wind_speed_kmh,
            precipitation_mm: observation.precipitation_mm,
            daily_change: entry.daily_change,
            health_index: entry.health_index,
        };

        self.writer.serialize(row)?;
        self.writer.flush()?;
        Ok(())
    }
}
