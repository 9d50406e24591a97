use chrono::{DateTime, Duration, Utc};
use firnline_schemas::{
    context::DataContextUpdate, observation::DailyObservation, scenario::Scenario,
};
use std::f64::consts::PI;

/// Hours after which a live observation counts as stale.
pub const STALE_AFTER_HOURS: f64 = 2.0;

const DAYS_PER_YEAR: f64 = 365.0;

/// Generates the deterministic daily series a scenario describes, ending on
/// the day before `end`.
///
/// Temperature follows a seasonal sine plus the scenario's linear drift and
/// a short-period wobble; wind and precipitation are clamped so they never
/// go negative.
pub fn generate_series(scenario: &Scenario, end: DateTime<Utc>) -> Vec<DailyObservation> {
    let start = end - Duration::days(scenario.days as i64);

    (0..scenario.days)
        .map(|day| {
            let t = day as f64;
            let seasonal = (2.0 * PI * t / DAYS_PER_YEAR).sin();
            let wobble = (t * 0.7).sin() * 0.8;
            let temperature_c = scenario.base_temperature_c
                + scenario.seasonal_amplitude_c * seasonal
                + scenario.warming_trend_c_per_day * t
                + wobble;

            let wind_speed_kmh = (scenario.base_wind_kmh
                + scenario.wind_variation_kmh * (t * 0.9).sin())
            .max(0.0);

            let storm_phase = (2.0 * PI * t / scenario.storm_period_days).sin();
            let precipitation_mm = if storm_phase > 0.3 {
                scenario.base_precipitation_mm * storm_phase
            } else {
                0.0
            };

            DailyObservation {
                temperature_c,
                wind_speed_kmh,
                precipitation_mm,
                date: start + Duration::days(day as i64),
            }
        })
        .collect()
}

/// Extends the latest observation over a forecast horizon, decaying each
/// field back toward the scenario baseline.
pub fn forecast_from(
    last: &DailyObservation,
    scenario: &Scenario,
    horizon_days: u32,
) -> Vec<DailyObservation> {
    (1..=horizon_days)
        .map(|day| {
            let decay = 1.0 - day as f64 / (horizon_days as f64 + 1.0);
            DailyObservation {
                temperature_c: scenario.base_temperature_c
                    + (last.temperature_c - scenario.base_temperature_c) * decay,
                wind_speed_kmh: (scenario.base_wind_kmh
                    + (last.wind_speed_kmh - scenario.base_wind_kmh) * decay)
                    .max(0.0),
                precipitation_mm: last.precipitation_mm * decay,
                date: last.date + Duration::days(day as i64),
            }
        })
        .collect()
}

/// Builds the reliability overlay for a live observation taken at
/// `observed_at`, as seen from `now`. Staleness is decided here, not in the
/// model.
pub fn live_context(
    source_label: &str,
    observed_at: DateTime<Utc>,
    now: DateTime<Utc>,
) -> DataContextUpdate {
    let age_hours = (now - observed_at).num_minutes() as f64 / 60.0;
    DataContextUpdate {
        source_label: Some(source_label.to_string()),
        age_hours: Some(age_hours),
        is_stale: Some(age_hours > STALE_AFTER_HOURS),
        ..Default::default()
    }
}
