use serde::Deserialize;

/// Shape of a synthetic daily weather series.
///
/// The generator in the application layer turns one of these into a
/// deterministic sequence of observations: a seasonal sine temperature with
/// a per-day drift, bounded wind variation, and periodic precipitation
/// pulses.
#[derive(Debug, Clone, Deserialize)]
pub struct Scenario {
    pub scenario_id: String,
    pub scenario_name: String,
    pub notes: String,
    /// Length of the generated series, in days.
    pub days: u32,
    pub base_temperature_c: f64,
    /// Amplitude of the annual temperature cycle.
    pub seasonal_amplitude_c: f64,
    /// Linear temperature drift per day, e.g. a warming scenario.
    pub warming_trend_c_per_day: f64,
    pub base_wind_kmh: f64,
    pub wind_variation_kmh: f64,
    /// Precipitation delivered on storm days.
    pub base_precipitation_mm: f64,
    /// Days between precipitation pulses.
    pub storm_period_days: f64,
}
