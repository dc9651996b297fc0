//! Data models for SensorWatch

mod measurement;
mod reading;
mod verdict;

pub use measurement::*;
pub use reading::*;
pub use verdict::*;
