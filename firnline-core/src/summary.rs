use crate::model::engine::MassBalanceModel;
use firnline_schemas::{observation::DailyObservation, projection::DiagnosticsReport};

// Always two decimals, with an explicit sign on non-negative values so
// gains and losses line up in reports.
fn signed(value: f64) -> String {
    if value >= 0.0 {
        format!("+{:.2}", value)
    } else {
        format!("{:.2}", value)
    }
}

impl MassBalanceModel {
    /// Deterministic natural-language explanation of the current state and
    /// today's drivers, with diagnostics lines appended when a report is
    /// supplied. Presentation text, but the formatting is pinned by tests.
    pub fn summary(
        &self,
        observation: &DailyObservation,
        diagnostics: Option<&DiagnosticsReport>,
    ) -> String {
        let state = self.state();
        let drivers = self.mass_change_drivers(observation);

        let mut lines = Vec::new();
        lines.push(format!("The glacier is currently {}.", state.state));

        let mut parts = Vec::new();
        if drivers.accumulation != 0.0 {
            parts.push(format!("accumulation {}", signed(drivers.accumulation)));
        }
        if drivers.melt != 0.0 {
            parts.push(format!("melt {}", signed(-drivers.melt)));
        }
        if drivers.sublimation != 0.0 {
            parts.push(format!("sublimation {}", signed(-drivers.sublimation)));
        }

        if parts.is_empty() {
            lines.push(format!(
                "Today's mass balance is {}; conditions are mostly neutral.",
                signed(drivers.net())
            ));
        } else {
            lines.push(format!(
                "Today's mass balance is {} ({}).",
                signed(drivers.net()),
                parts.join(", ")
            ));
        }

        let window = self.trend_window_changes();
        let gaining = window.iter().filter(|change| **change > 0.0).count();
        let losing = window.iter().filter(|change| **change < 0.0).count();
        lines.push(format!(
            "Seven-day trend is {} per day ({} gaining vs {} losing days).",
            signed(state.seven_day_trend),
            gaining,
            losing
        ));

        if let Some(diagnostics) = diagnostics {
            for alert in &diagnostics.alerts {
                lines.push(format!(
                    "Alert [{}]: {} - {}",
                    alert.level, alert.label, alert.detail
                ));
            }
            lines.push(format!(
                "Confidence in this assessment is {}.",
                diagnostics.confidence.level
            ));
            lines.push(diagnostics.projection.message.clone());
        }

        lines.join("\n")
    }
}
