//! Alerting system for SensorWatch
//!
//! Classifies a sensor's reading history into a [`Verdict`](crate::models::Verdict)
//! using a short strict window and a long averaged window.

mod evaluator;
mod thresholds;

pub use evaluator::{evaluate, AlertEvaluator};
pub use thresholds::{
    AlertThresholds, ATTENTION_WINDOW, CRITICAL_RUN_LENGTH, HIGH_THRESHOLD, LOW_THRESHOLD, MARGIN,
};
