use crate::model::engine::MassBalanceModel;
use firnline_schemas::{
    alert::{Alert, AlertLevel},
    confidence::{Confidence, ConfidenceLevel},
    projection::{DiagnosticsReport, Projection, ProjectionStatus},
};

/// Health index below which the glacier is in a critical loss phase.
pub const CRITICAL_HEALTH_INDEX: f64 = 50.0;
/// Health index below which structural integrity is degrading.
pub const WARNING_HEALTH_INDEX: f64 = 70.0;
/// A single-day change below this is a high melt event.
pub const HIGH_MELT_DAILY_CHANGE: f64 = -2.5;
/// A seven-day trend below this is accelerated loss.
pub const ACCELERATED_LOSS_TREND: f64 = -1.2;

/// Default health-index threshold for the collapse projection.
pub const DEFAULT_COLLAPSE_THRESHOLD: f64 = 40.0;

// Trends at or above the dead-band are not projected forward. Unrelated to
// the trend-state thresholds, which use their own magnitudes.
const PROJECTION_DEAD_BAND: f64 = -0.05;

// Variance cutoffs feeding the confidence level. The reason-text cutoffs
// below are a separate pair; the two sets are tuned independently.
const LOW_CONFIDENCE_VARIANCE: f64 = 1.5;
const MEDIUM_CONFIDENCE_VARIANCE: f64 = 0.6;
const HIGH_VOLATILITY_REASON: f64 = 1.2;
const MODERATE_VOLATILITY_REASON: f64 = 0.6;

const DAYS_PER_YEAR: f64 = 365.0;

impl MassBalanceModel {
    /// Active alerts, in fixed display order. All checks are evaluated
    /// independently except the two health-index alerts, which are mutually
    /// exclusive.
    pub fn alerts(&self) -> Vec<Alert> {
        let mut alerts = Vec::new();
        let daily_change = self.history.back().map_or(0.0, |entry| entry.daily_change);
        let trend = self.seven_day_trend();

        if self.health_index < CRITICAL_HEALTH_INDEX {
            alerts.push(Alert {
                id: "critical-loss",
                level: AlertLevel::Critical,
                label: "Critical Loss Phase",
                detail: format!(
                    "Health index is down to {:.1}; the glacier is in a critical loss phase.",
                    self.health_index
                ),
            });
        } else if self.health_index < WARNING_HEALTH_INDEX {
            alerts.push(Alert {
                id: "integrity-warning",
                level: AlertLevel::Warning,
                label: "Integrity Warning",
                detail: format!(
                    "Health index is down to {:.1}; structural integrity is degrading.",
                    self.health_index
                ),
            });
        }

        if daily_change < HIGH_MELT_DAILY_CHANGE {
            alerts.push(Alert {
                id: "high-melt",
                level: AlertLevel::Warning,
                label: "High Melt Event",
                detail: format!(
                    "Lost {:.2} index points in a single day.",
                    daily_change.abs()
                ),
            });
        }

        if trend < ACCELERATED_LOSS_TREND {
            alerts.push(Alert {
                id: "accelerated-loss",
                level: AlertLevel::Critical,
                label: "Accelerated Loss Detected",
                detail: format!("Seven-day trend is {:.2} index points per day.", trend),
            });
        }

        if self.data_context.is_fallback || self.data_context.is_stale {
            let detail = if self.data_context.is_stale {
                "Live readings are stale; diagnostics are based on ageing data.".to_string()
            } else {
                "Running on fallback data; diagnostics may not reflect live conditions."
                    .to_string()
            };
            alerts.push(Alert {
                id: "low-reliability",
                level: AlertLevel::Info,
                label: "Low Data Reliability",
                detail,
            });
        }

        alerts
    }

    /// Reliability score for the current read. The reasons list is ordered
    /// and never empty: it always ends with exactly one variance-band
    /// reason.
    pub fn confidence(&self) -> Confidence {
        let ctx = &self.data_context;
        let variance = self.trend_variance();
        let mut reasons = Vec::new();

        if ctx.is_fallback || ctx.is_scenario {
            reasons.push("Using simulated or scenario data".to_string());
        }
        if ctx.is_forecast {
            reasons.push("Using forecast data".to_string());
        }
        if ctx.is_stale {
            reasons.push("Live data is stale".to_string());
        } else if matches!(ctx.age_hours, Some(age) if age <= 2.0) {
            reasons.push("Live data is fresh".to_string());
        }

        if variance >= HIGH_VOLATILITY_REASON {
            reasons.push("High volatility in recent mass balance".to_string());
        } else if variance >= MODERATE_VOLATILITY_REASON {
            reasons.push("Moderate volatility in recent mass balance".to_string());
        } else {
            reasons.push("Low trend variability".to_string());
        }

        let level = if ctx.is_fallback
            || ctx.is_scenario
            || ctx.is_stale
            || variance >= LOW_CONFIDENCE_VARIANCE
        {
            ConfidenceLevel::Low
        } else if ctx.is_forecast || variance >= MEDIUM_CONFIDENCE_VARIANCE {
            ConfidenceLevel::Medium
        } else {
            ConfidenceLevel::High
        };

        Confidence {
            level,
            reasons,
            variance,
        }
    }

    /// Projects when the health index crosses `collapse_threshold` under the
    /// current seven-day trend.
    ///
    /// The crossed-already check runs before the trend check, and the
    /// dead-band means a mildly negative trend is still reported as stable
    /// even when the trend-state classification disagrees.
    pub fn time_to_loss(&self, collapse_threshold: f64) -> Projection {
        let remaining = self.health_index - collapse_threshold;
        let trend = self.seven_day_trend();

        if remaining <= 0.0 {
            return Projection {
                status: ProjectionStatus::Collapsed,
                message: "Threshold already crossed.".to_string(),
                days: Some(0),
                years: Some(0),
            };
        }

        if trend >= PROJECTION_DEAD_BAND {
            return Projection {
                status: ProjectionStatus::Stable,
                message: "No collapse projected under current conditions.".to_string(),
                days: None,
                years: None,
            };
        }

        let days_left = remaining / trend.abs();
        let years = (days_left / DAYS_PER_YEAR).floor() as u32;
        let days = (days_left % DAYS_PER_YEAR).round() as u32;

        Projection {
            status: ProjectionStatus::Declining,
            message: format!(
                "Projected to cross the collapse threshold in {} years and {} days.",
                years, days
            ),
            days: Some(days),
            years: Some(years),
        }
    }

    /// Bundles the three diagnostics reads for reporting.
    pub fn diagnostics(&self, collapse_threshold: f64) -> DiagnosticsReport {
        DiagnosticsReport {
            alerts: self.alerts(),
            confidence: self.confidence(),
            projection: self.time_to_loss(collapse_threshold),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::builder::ModelBuilder;
    use chrono::{Duration, TimeZone, Utc};
    use firnline_schemas::{context::DataContextUpdate, history::HistoryEntry};

    fn model() -> MassBalanceModel {
        ModelBuilder::new().build().unwrap()
    }

    // Pushes a raw history entry so tests can pin trend and daily change
    // without reverse-engineering weather inputs.
    fn push_change(model: &mut MassBalanceModel, day: i64, daily_change: f64) {
        let start = Utc.with_ymd_and_hms(2024, 11, 1, 12, 0, 0).unwrap();
        model.history.push_back(HistoryEntry {
            date: start + Duration::days(day),
            daily_change,
            health_index: model.health_index,
            source_label: "Observed".to_string(),
        });
    }

    #[test]
    fn health_alerts_are_mutually_exclusive_at_the_boundary() {
        let mut model = model();
        model.health_index = 45.0;
        let alerts = model.alerts();
        assert!(alerts.iter().any(|a| a.id == "critical-loss"));
        assert!(!alerts.iter().any(|a| a.id == "integrity-warning"));

        model.health_index = 65.0;
        let alerts = model.alerts();
        assert!(!alerts.iter().any(|a| a.id == "critical-loss"));
        assert!(alerts.iter().any(|a| a.id == "integrity-warning"));

        model.health_index = 80.0;
        let alerts = model.alerts();
        assert!(!alerts.iter().any(|a| a.id == "critical-loss"));
        assert!(!alerts.iter().any(|a| a.id == "integrity-warning"));
    }

    #[test]
    fn one_observation_can_raise_several_alerts() {
        let mut model = model();
        model.health_index = 45.0;
        for day in 0..7 {
            push_change(&mut model, day, -2.6);
        }
        model.set_data_context(DataContextUpdate {
            is_fallback: Some(true),
            ..Default::default()
        });

        let alerts = model.alerts();
        let ids: Vec<&str> = alerts.iter().map(|a| a.id).collect();
        assert_eq!(
            ids,
            vec!["critical-loss", "high-melt", "accelerated-loss", "low-reliability"]
        );
        assert_eq!(alerts[0].level, AlertLevel::Critical);
        assert_eq!(alerts[1].level, AlertLevel::Warning);
        assert_eq!(alerts[2].level, AlertLevel::Critical);
        assert_eq!(alerts[3].level, AlertLevel::Info);
    }

    #[test]
    fn high_melt_fires_on_the_latest_day_only() {
        let mut model = model();
        push_change(&mut model, 0, -3.0);
        push_change(&mut model, 1, -0.1);
        assert!(!model.alerts().iter().any(|a| a.id == "high-melt"));

        push_change(&mut model, 2, -2.51);
        assert!(model.alerts().iter().any(|a| a.id == "high-melt"));
    }

    #[test]
    fn reliability_alert_prefers_the_stale_wording() {
        let mut model = model();
        model.set_data_context(DataContextUpdate {
            is_fallback: Some(true),
            is_stale: Some(true),
            ..Default::default()
        });
        let alerts = model.alerts();
        let alert = alerts.iter().find(|a| a.id == "low-reliability").unwrap();
        assert!(alert.detail.contains("stale"));

        let mut model = self::model();
        model.set_data_context(DataContextUpdate {
            is_fallback: Some(true),
            ..Default::default()
        });
        let alerts = model.alerts();
        let alert = alerts.iter().find(|a| a.id == "low-reliability").unwrap();
        assert!(alert.detail.contains("fallback"));
    }

    #[test]
    fn confidence_reasons_never_empty() {
        let model = model();
        let confidence = model.confidence();
        assert_eq!(confidence.reasons, vec!["Low trend variability"]);
        assert_eq!(confidence.level, ConfidenceLevel::High);
        assert_eq!(confidence.variance, 0.0);
    }

    #[test]
    fn confidence_reason_order_is_preserved() {
        let mut model = model();
        model.set_data_context(DataContextUpdate {
            is_scenario: Some(true),
            is_forecast: Some(true),
            is_stale: Some(true),
            ..Default::default()
        });
        let confidence = model.confidence();
        assert_eq!(
            confidence.reasons,
            vec![
                "Using simulated or scenario data",
                "Using forecast data",
                "Live data is stale",
                "Low trend variability"
            ]
        );
        assert_eq!(confidence.level, ConfidenceLevel::Low);
    }

    #[test]
    fn fresh_reason_requires_a_recent_age_and_no_staleness() {
        let mut model = model();
        model.set_data_context(DataContextUpdate {
            age_hours: Some(1.5),
            ..Default::default()
        });
        let confidence = model.confidence();
        assert_eq!(
            confidence.reasons,
            vec!["Live data is fresh", "Low trend variability"]
        );
        assert_eq!(confidence.level, ConfidenceLevel::High);

        model.set_data_context(DataContextUpdate {
            age_hours: Some(5.0),
            ..Default::default()
        });
        let confidence = model.confidence();
        assert_eq!(confidence.reasons, vec!["Low trend variability"]);
    }

    #[test]
    fn forecast_data_caps_confidence_at_medium() {
        let mut model = model();
        model.set_data_context(DataContextUpdate {
            is_forecast: Some(true),
            ..Default::default()
        });
        assert_eq!(model.confidence().level, ConfidenceLevel::Medium);
    }

    #[test]
    fn variance_cutoffs_for_level_and_reason_are_independent() {
        // Population std dev of alternating +/-1.3 is 1.3: past the 1.2
        // reason cutoff but short of the 1.5 level cutoff.
        let mut model = model();
        for day in 0..6 {
            let sign = if day % 2 == 0 { 1.0 } else { -1.0 };
            push_change(&mut model, day, 1.3 * sign);
        }
        let confidence = model.confidence();
        assert!((confidence.variance - 1.3).abs() < 1e-9);
        assert_eq!(
            confidence.reasons,
            vec!["High volatility in recent mass balance"]
        );
        assert_eq!(confidence.level, ConfidenceLevel::Medium);

        // At 1.6 the level drops to Low even with a clean context.
        let mut model = self::model();
        for day in 0..6 {
            let sign = if day % 2 == 0 { 1.0 } else { -1.0 };
            push_change(&mut model, day, 1.6 * sign);
        }
        assert_eq!(model.confidence().level, ConfidenceLevel::Low);
    }

    #[test]
    fn moderate_volatility_band() {
        let mut model = model();
        for day in 0..6 {
            let sign = if day % 2 == 0 { 1.0 } else { -1.0 };
            push_change(&mut model, day, 0.8 * sign);
        }
        let confidence = model.confidence();
        assert_eq!(
            confidence.reasons,
            vec!["Moderate volatility in recent mass balance"]
        );
        assert_eq!(confidence.level, ConfidenceLevel::Medium);
    }

    #[test]
    fn crossed_threshold_wins_over_any_trend() {
        let mut model = model();
        model.health_index = 38.0;
        for day in 0..7 {
            push_change(&mut model, day, 2.0);
        }
        let projection = model.time_to_loss(DEFAULT_COLLAPSE_THRESHOLD);
        assert_eq!(projection.status, ProjectionStatus::Collapsed);
        assert_eq!(projection.message, "Threshold already crossed.");
        assert_eq!(projection.days, Some(0));
        assert_eq!(projection.years, Some(0));
    }

    #[test]
    fn declining_projection_splits_years_and_days() {
        let mut model = model();
        for day in 0..7 {
            push_change(&mut model, day, -0.5);
        }
        let projection = model.time_to_loss(DEFAULT_COLLAPSE_THRESHOLD);
        assert_eq!(projection.status, ProjectionStatus::Declining);
        assert_eq!(projection.years, Some(0));
        assert_eq!(projection.days, Some(120));
        assert_eq!(
            projection.message,
            "Projected to cross the collapse threshold in 0 years and 120 days."
        );
    }

    #[test]
    fn slow_declines_project_past_a_year() {
        let mut model = model();
        for day in 0..7 {
            push_change(&mut model, day, -0.1);
        }
        // 60 remaining at 0.1/day is 600 days: 1 year and 235 days.
        let projection = model.time_to_loss(DEFAULT_COLLAPSE_THRESHOLD);
        assert_eq!(projection.years, Some(1));
        assert_eq!(projection.days, Some(235));
    }

    #[test]
    fn dead_band_trends_are_not_projected() {
        let mut model = model();
        for day in 0..7 {
            push_change(&mut model, day, -0.02);
        }
        let projection = model.time_to_loss(DEFAULT_COLLAPSE_THRESHOLD);
        assert_eq!(projection.status, ProjectionStatus::Stable);
        assert_eq!(
            projection.message,
            "No collapse projected under current conditions."
        );
        assert_eq!(projection.days, None);
        assert_eq!(projection.years, None);
    }

    #[test]
    fn projection_dead_band_and_trend_state_may_disagree() {
        // A -0.07 trend is inside the +/-0.1 state band (Stable) but past
        // the -0.05 projection dead-band (Declining). Both readings stand.
        let mut model = model();
        for day in 0..7 {
            push_change(&mut model, day, -0.07);
        }
        assert_eq!(
            model.state().state,
            firnline_schemas::state::TrendState::Stable
        );
        assert_eq!(
            model.time_to_loss(DEFAULT_COLLAPSE_THRESHOLD).status,
            ProjectionStatus::Declining
        );
    }

    #[test]
    fn diagnostics_bundles_all_three_reads() {
        let mut model = model();
        model.health_index = 60.0;
        for day in 0..7 {
            push_change(&mut model, day, -0.5);
        }
        let report = model.diagnostics(DEFAULT_COLLAPSE_THRESHOLD);
        assert!(report.alerts.iter().any(|a| a.id == "integrity-warning"));
        assert_eq!(report.projection.status, ProjectionStatus::Declining);
        assert!(!report.confidence.reasons.is_empty());
    }

    #[test]
    fn custom_collapse_threshold_is_respected() {
        let mut model = model();
        model.health_index = 55.0;
        let projection = model.time_to_loss(60.0);
        assert_eq!(projection.status, ProjectionStatus::Collapsed);

        let projection = model.time_to_loss(50.0);
        assert_eq!(projection.status, ProjectionStatus::Stable);
    }
}
