//! Alert verdict evaluation

use rust_decimal::Decimal;
use tracing::{debug, warn};

use crate::error::Result;
use crate::models::{Reading, SensorReport, Verdict};

use super::thresholds::AlertThresholds;

/// Stateless classifier for a single sensor's reading history.
///
/// Rules are checked in priority order and the first match wins:
///
/// 1. **Critical**: each of the newest `critical_run_length` readings is out of
///    bounds, in either direction.
/// 2. **Attention**: the mean of the newest `attention_window` readings lies in one
///    of the inclusive bands around the low or high threshold.
///
/// Anything else, including an empty history, is [`Verdict::None`].
#[derive(Debug, Clone, Copy, Default)]
pub struct AlertEvaluator {
    thresholds: AlertThresholds,
}

impl AlertEvaluator {
    /// Create an evaluator with the fixed production parameters
    pub fn new() -> Self {
        Self {
            thresholds: AlertThresholds::DEFAULT,
        }
    }

    /// Create an evaluator with custom parameters
    pub fn with_thresholds(thresholds: AlertThresholds) -> Result<Self> {
        thresholds.validate()?;
        Ok(Self { thresholds })
    }

    /// Parameters this evaluator applies
    pub fn thresholds(&self) -> &AlertThresholds {
        &self.thresholds
    }

    /// Classify a reading history given in any order
    pub fn evaluate(&self, history: &[Reading]) -> Verdict {
        let newest = newest_first(history);
        let verdict = self.classify(&newest);

        debug!(readings = history.len(), verdict = %verdict, "Evaluated reading history");

        verdict
    }

    /// Mean of the attention window, or `None` when the history is shorter than it
    pub fn window_mean(&self, history: &[Reading]) -> Option<Decimal> {
        self.attention_mean(&newest_first(history))
    }

    /// Evaluate a sensor's history and summarize the outcome
    pub fn assess(&self, sensor_code: &str, history: &[Reading]) -> SensorReport {
        let newest = newest_first(history);
        let verdict = self.classify(&newest);

        debug!(
            sensor = sensor_code,
            readings = history.len(),
            verdict = %verdict,
            "Assessed sensor"
        );

        SensorReport {
            sensor_code: sensor_code.to_string(),
            readings_considered: history.len(),
            window_mean: self.attention_mean(&newest),
            verdict,
        }
    }

    /// Apply both rules to a history already ordered newest first
    fn classify(&self, newest: &[&Reading]) -> Verdict {
        if self.is_critical(newest) {
            return Verdict::Critical;
        }

        match self.attention_mean(newest) {
            Some(mean) if self.thresholds.in_attention_band(mean) => Verdict::Attention,
            _ => Verdict::None,
        }
    }

    fn is_critical(&self, newest: &[&Reading]) -> bool {
        let run = self.thresholds.critical_run_length;
        newest.len() >= run
            && newest[..run]
                .iter()
                .all(|r| self.thresholds.is_out_of_bounds(r.value))
    }

    fn attention_mean(&self, newest: &[&Reading]) -> Option<Decimal> {
        let window = self.thresholds.attention_window;
        if newest.len() < window {
            return None;
        }
        Some(mean(&newest[..window]))
    }
}

/// Classify a reading history with the fixed production parameters
pub fn evaluate(history: &[Reading]) -> Verdict {
    AlertEvaluator::new().evaluate(history)
}

/// Order readings by timestamp, newest first.
///
/// The sort is stable: readings sharing a timestamp keep their input order.
fn newest_first(history: &[Reading]) -> Vec<&Reading> {
    let mut sorted: Vec<&Reading> = history.iter().collect();
    sorted.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    sorted
}

/// Exact decimal mean of a non-empty window
fn mean(window: &[&Reading]) -> Decimal {
    let count = Decimal::from(window.len());

    window
        .iter()
        .try_fold(Decimal::ZERO, |sum, r| sum.checked_add(r.value))
        .and_then(|sum| sum.checked_div(count))
        .unwrap_or_else(|| {
            // Each quotient is at most MAX / count, so the sum stays in range.
            warn!(count = window.len(), "Window sum overflowed, averaging per reading");
            window
                .iter()
                .fold(Decimal::ZERO, |sum, r| sum.saturating_add(r.value / count))
        })
}
