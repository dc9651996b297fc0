//! Sensor reading model

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One timestamped numeric measurement taken by a sensor.
///
/// Several readings may share a timestamp. Timestamps carrying any UTC offset are
/// normalized to UTC on deserialization, so the instant is kept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reading {
    /// Measured value
    pub value: Decimal,

    /// When the value was measured
    pub timestamp: DateTime<Utc>,
}

impl Reading {
    /// Create a new reading
    pub fn new(value: Decimal, timestamp: DateTime<Utc>) -> Self {
        Self { value, timestamp }
    }
}
