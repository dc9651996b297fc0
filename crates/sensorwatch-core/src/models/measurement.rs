//! Ingested measurement and per-sensor report models

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{Reading, Verdict};

/// A reading as it arrives in a batch, tagged with the sensor that produced it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Measurement {
    /// Code identifying the sensor
    pub sensor_code: String,

    /// When the value was measured
    pub measured_at: DateTime<Utc>,

    /// Measured value
    pub value: Decimal,
}

impl Measurement {
    /// Strip the sensor code, keeping the timestamped value
    pub fn into_reading(self) -> Reading {
        Reading::new(self.value, self.measured_at)
    }
}

/// Outcome of evaluating one sensor's history
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SensorReport {
    /// Code identifying the sensor
    pub sensor_code: String,

    /// Number of readings handed to the evaluator
    pub readings_considered: usize,

    /// Mean of the attention window, when the history was long enough
    pub window_mean: Option<Decimal>,

    /// Resulting alert level
    pub verdict: Verdict,
}
