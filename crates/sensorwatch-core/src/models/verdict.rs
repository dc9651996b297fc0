//! Alert verdict model

use serde::{Deserialize, Serialize};
use std::fmt;

/// Alert level assigned to a sensor's reading history.
///
/// Variants are declared in ascending severity, so the derived ordering gives
/// `Critical > Attention > None`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    /// No alert
    #[default]
    None,
    /// The long-window average is drifting near a limit
    Attention,
    /// The most recent readings are all out of bounds
    Critical,
}

impl Verdict {
    /// Whether this verdict should be raised to an operator
    pub fn is_alert(self) -> bool {
        self != Self::None
    }

    /// Lowercase name of the level
    pub fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Attention => "attention",
            Self::Critical => "critical",
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
