//! Fixed alert parameters

use rust_decimal::Decimal;
use serde::Serialize;

use crate::error::{Error, Result};

/// Number of newest readings that must all be out of bounds for a critical alert
pub const CRITICAL_RUN_LENGTH: usize = 6;

/// Number of newest readings averaged by the attention rule
pub const ATTENTION_WINDOW: usize = 50;

/// Readings strictly below this value are out of bounds
pub const LOW_THRESHOLD: Decimal = Decimal::ONE;

/// Readings strictly above this value are out of bounds
pub const HIGH_THRESHOLD: Decimal = Decimal::from_parts(50, 0, 0, false, 0);

/// Tolerance around each threshold that forms an attention band
pub const MARGIN: Decimal = Decimal::TWO;

/// Parameters of the two alert rules.
///
/// The defaults are fixed algorithm constants, not runtime configuration. Other
/// values are only meant for exercising the evaluator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AlertThresholds {
    /// Window size of the critical rule
    pub critical_run_length: usize,
    /// Window size of the attention rule
    pub attention_window: usize,
    /// Lower bound of the normal range
    pub low: Decimal,
    /// Upper bound of the normal range
    pub high: Decimal,
    /// Half-width of each attention band
    pub margin: Decimal,
}

impl AlertThresholds {
    /// The production parameters
    pub const DEFAULT: Self = Self {
        critical_run_length: CRITICAL_RUN_LENGTH,
        attention_window: ATTENTION_WINDOW,
        low: LOW_THRESHOLD,
        high: HIGH_THRESHOLD,
        margin: MARGIN,
    };

    /// Reject parameter sets the rules cannot be applied with
    pub fn validate(&self) -> Result<()> {
        if self.critical_run_length == 0 {
            return Err(Error::validation("critical run length must be at least 1"));
        }
        if self.attention_window == 0 {
            return Err(Error::validation("attention window must be at least 1"));
        }
        if self.low > self.high {
            return Err(Error::validation(format!(
                "low threshold {} is above high threshold {}",
                self.low, self.high
            )));
        }
        if self.margin < Decimal::ZERO {
            return Err(Error::validation(format!(
                "margin {} must not be negative",
                self.margin
            )));
        }
        Ok(())
    }

    /// Whether a single value lies outside the normal range
    pub fn is_out_of_bounds(&self, value: Decimal) -> bool {
        value < self.low || value > self.high
    }

    /// Inclusive attention band around the low threshold
    pub fn low_band(&self) -> (Decimal, Decimal) {
        (self.low - self.margin, self.low + self.margin)
    }

    /// Inclusive attention band around the high threshold
    pub fn high_band(&self) -> (Decimal, Decimal) {
        (self.high - self.margin, self.high + self.margin)
    }

    /// Whether a window mean falls inside either attention band
    pub fn in_attention_band(&self, mean: Decimal) -> bool {
        let within = |(lower, upper): (Decimal, Decimal)| mean >= lower && mean <= upper;
        within(self.low_band()) || within(self.high_band())
    }
}

impl Default for AlertThresholds {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_bands() {
        let thresholds = AlertThresholds::DEFAULT;

        assert_eq!(thresholds.low_band(), (Decimal::from(-1), Decimal::from(3)));
        assert_eq!(thresholds.high_band(), (Decimal::from(48), Decimal::from(52)));
        assert_eq!(thresholds.high, Decimal::from(50));
    }

    #[test]
    fn test_bounds_are_strict() {
        let thresholds = AlertThresholds::default();

        assert!(!thresholds.is_out_of_bounds(Decimal::ONE));
        assert!(!thresholds.is_out_of_bounds(Decimal::from(50)));
        assert!(thresholds.is_out_of_bounds(Decimal::new(99, 2)));
        assert!(thresholds.is_out_of_bounds(Decimal::new(5001, 2)));
    }

    #[test]
    fn test_validate_rejects_bad_parameters() {
        assert!(AlertThresholds::DEFAULT.validate().is_ok());

        let zero_run = AlertThresholds {
            critical_run_length: 0,
            ..AlertThresholds::DEFAULT
        };
        assert!(matches!(zero_run.validate(), Err(Error::Validation(_))));

        let zero_window = AlertThresholds {
            attention_window: 0,
            ..AlertThresholds::DEFAULT
        };
        assert!(matches!(zero_window.validate(), Err(Error::Validation(_))));

        let inverted = AlertThresholds {
            low: Decimal::from(60),
            ..AlertThresholds::DEFAULT
        };
        assert!(matches!(inverted.validate(), Err(Error::Validation(_))));

        let negative_margin = AlertThresholds {
            margin: Decimal::from(-2),
            ..AlertThresholds::DEFAULT
        };
        assert!(matches!(
            negative_margin.validate(),
            Err(Error::Validation(_))
        ));
    }
}
