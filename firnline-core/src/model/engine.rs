use crate::{error::FirnlineError, logger::HistoryLogger};
use firnline_schemas::{
    context::{DataContext, DataContextUpdate},
    history::HistoryEntry,
    observation::DailyObservation,
    params::ModelParameters,
    snapshot::ModelSnapshot,
    state::{GlacierState, TrendState},
};
use std::collections::VecDeque;

/// Number of daily history entries the model retains.
pub const HISTORY_CAPACITY: usize = 30;
/// Window length for the trailing trend and its variability.
pub const TREND_WINDOW: usize = 7;

pub(crate) const INITIAL_HEALTH_INDEX: f64 = 100.0;
const HEALTH_MIN: f64 = 0.0;
const HEALTH_MAX: f64 = 200.0;

/// The three signed contributions making up one day's mass change.
///
/// Melt and sublimation are stored as the (non-negative) magnitudes that get
/// subtracted from accumulation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MassChangeDrivers {
    pub accumulation: f64,
    pub melt: f64,
    pub sublimation: f64,
}

impl MassChangeDrivers {
    pub fn net(&self) -> f64 {
        self.accumulation - self.melt - self.sublimation
    }
}

/// Day-by-day mass-balance state for a single glacier.
///
/// The model converts a stream of daily observations into a bounded health
/// index and a capped history, from which trend, classification, and the
/// diagnostics reads are derived. One instance per tracked glacier, driven
/// serially by a single caller.
pub struct MassBalanceModel {
    pub(crate) health_index: f64,
    pub(crate) history: VecDeque<HistoryEntry>,
    pub(crate) last_source: String,
    pub(crate) data_context: DataContext,
    pub(crate) params: ModelParameters,
    pub(crate) logger: Option<HistoryLogger>,
}

impl MassBalanceModel {
    /// Splits an observation into its accumulation, melt, and sublimation
    /// contributions. Pure; does not touch model state.
    ///
    /// Accumulation applies at or below 1 °C and melt above 0 °C, so both
    /// can be active in the (0, 1] band. Sublimation is always applied.
    pub fn mass_change_drivers(&self, observation: &DailyObservation) -> MassChangeDrivers {
        let accumulation = if observation.temperature_c <= 1.0 {
            observation.precipitation_mm * self.params.accumulation_rate
        } else {
            0.0
        };
        let melt = if observation.temperature_c > 0.0 {
            observation.temperature_c * self.params.melt_rate
        } else {
            0.0
        };
        let sublimation = observation.wind_speed_kmh * self.params.sublimation_rate;

        MassChangeDrivers {
            accumulation,
            melt,
            sublimation,
        }
    }

    /// Net signed mass change for one observation.
    pub fn daily_mass_change(&self, observation: &DailyObservation) -> f64 {
        self.mass_change_drivers(observation).net()
    }

    /// Applies one day of weather: updates the health index (clamped to
    /// [0, 200]), records a history entry, and evicts the oldest entry once
    /// the cap is exceeded. The only mutator of the physical state.
    ///
    /// The `Result` carries nothing but I/O failures from the optional
    /// attached history logger.
    pub fn apply_daily_observation(
        &mut self,
        observation: &DailyObservation,
        source_label: &str,
    ) -> Result<(), FirnlineError> {
        let daily_change = self.daily_mass_change(observation);
        self.health_index = (self.health_index + daily_change).clamp(HEALTH_MIN, HEALTH_MAX);
        self.last_source = source_label.to_string();

        let entry = HistoryEntry {
            date: observation.date,
            daily_change,
            health_index: self.health_index,
            source_label: source_label.to_string(),
        };

        if let Some(logger) = &mut self.logger {
            logger.log_observation(observation, &entry)?;
        }

        self.history.push_back(entry);
        if self.history.len() > HISTORY_CAPACITY {
            self.history.pop_front();
        }

        Ok(())
    }

    /// The daily changes inside the trailing trend window, oldest first.
    pub(crate) fn trend_window_changes(&self) -> Vec<f64> {
        let start = self.history.len().saturating_sub(TREND_WINDOW);
        self.history
            .iter()
            .skip(start)
            .map(|entry| entry.daily_change)
            .collect()
    }

    /// Trailing simple moving average of daily change over the last seven
    /// entries (fewer while the history is shorter; 0 when empty).
    pub fn seven_day_trend(&self) -> f64 {
        let window = self.trend_window_changes();
        if window.is_empty() {
            return 0.0;
        }
        window.iter().sum::<f64>() / window.len() as f64
    }

    /// Population standard deviation of daily change over the trend window;
    /// 0 with fewer than two entries.
    pub fn trend_variance(&self) -> f64 {
        let window = self.trend_window_changes();
        if window.len() < 2 {
            return 0.0;
        }
        let mean = window.iter().sum::<f64>() / window.len() as f64;
        let variance =
            window.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / window.len() as f64;
        variance.sqrt()
    }

    /// The externally visible state of the glacier.
    pub fn state(&self) -> GlacierState {
        let trend = self.seven_day_trend();

        // Two independent comparisons, not an else-if: with an asymmetric
        // threshold pair both can fire, and Receding wins by running last.
        let mut state = TrendState::Stable;
        if trend > self.params.advancing_threshold {
            state = TrendState::Advancing;
        }
        if trend < self.params.receding_threshold {
            state = TrendState::Receding;
        }

        GlacierState {
            health_index: self.health_index,
            daily_change: self.history.back().map_or(0.0, |entry| entry.daily_change),
            seven_day_trend: trend,
            state,
            last_source: self.last_source.clone(),
        }
    }

    /// Read-only copy of the history, oldest first.
    pub fn history(&self) -> Vec<HistoryEntry> {
        self.history.iter().cloned().collect()
    }

    pub fn health_index(&self) -> f64 {
        self.health_index
    }

    pub fn last_source(&self) -> &str {
        &self.last_source
    }

    pub fn parameters(&self) -> &ModelParameters {
        &self.params
    }

    pub fn data_context(&self) -> &DataContext {
        &self.data_context
    }

    /// Overlays the supplied fields onto the owned data context.
    pub fn set_data_context(&mut self, update: DataContextUpdate) {
        self.data_context.merge(update);
    }

    /// An owned deep copy of the physical state. The data context is
    /// excluded; callers re-derive it on each read path.
    pub fn snapshot(&self) -> ModelSnapshot {
        ModelSnapshot {
            health_index: self.health_index,
            history: self.history.iter().cloned().collect(),
            last_source: self.last_source.clone(),
        }
    }

    /// Replaces health index, history, and last source wholesale. Leaves the
    /// data context untouched.
    pub fn restore(&mut self, snapshot: ModelSnapshot) {
        self.health_index = snapshot.health_index;
        self.history = VecDeque::from(snapshot.history);
        self.last_source = snapshot.last_source;
    }

    /// Reinitializes the model to a fresh baseline, then applies the given
    /// observation if one is supplied.
    pub fn reset_with_observation(
        &mut self,
        observation: Option<&DailyObservation>,
        source_label: &str,
    ) -> Result<(), FirnlineError> {
        self.health_index = INITIAL_HEALTH_INDEX;
        self.history.clear();
        self.last_source = source_label.to_string();

        if let Some(observation) = observation {
            self.apply_daily_observation(observation, source_label)?;
        }
        Ok(())
    }
}
