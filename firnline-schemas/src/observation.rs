use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single day of weather input for the mass-balance model.
///
/// Values are taken as-is from whichever collaborator produced them
/// (observed, forecast, or scenario generator); no range validation is
/// applied here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyObservation {
    pub temperature_c: f64,
    pub wind_speed_kmh: f64,
    pub precipitation_mm: f64,
    pub date: DateTime<Utc>,
}
