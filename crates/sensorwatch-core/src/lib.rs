//! # SensorWatch
//!
//! Alert classification for field sensor reading streams.
//!
//! SensorWatch takes the recent reading history of one sensor and classifies it
//! into an alert level using two sliding-window rules.
//!
//! ## Architecture
//!
//! - **Alerting**: the stateless [`AlertEvaluator`] producing a [`Verdict`]
//! - **Ingest**: parsing measurement batches and bounding per-sensor histories
//! - **Config**: logging and ingest settings for the CLI
//!
//! ## Quick Start
//!
//! ```bash
//! # Classify every sensor in a measurement batch
//! sensorwatch evaluate --input readings.json
//!
//! # Show the fixed alert parameters
//! sensorwatch thresholds
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod alerting;
pub mod config;
pub mod error;
pub mod ingest;
pub mod models;

pub use alerting::{evaluate, AlertEvaluator, AlertThresholds};
pub use crate::config::Config;
pub use error::{Error, Result};
pub use models::{Reading, Verdict};

/// Re-exports for convenience
pub mod prelude {
    pub use crate::alerting::{evaluate, AlertEvaluator, AlertThresholds};
    pub use crate::config::Config;
    pub use crate::error::{Error, Result};
    pub use crate::models::*;
}
