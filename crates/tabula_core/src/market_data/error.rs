//! Market data error types.

use crate::types::InterpolationError;
use thiserror::Error;

/// Market data operation errors.
///
/// # Variants
///
/// - `InvalidMaturity`: Negative or otherwise unusable time
/// - `Interpolation`: Wrapped interpolation error
/// - `InsufficientData`: Not enough pillar points for construction
/// - `InvalidQuote`: Non-positive or non-finite pillar value
/// - `UnknownUnit`: Unit not present in the market data set
/// - `DuplicateUnit`: Unit inserted twice
///
/// # Examples
///
/// ```
/// use tabula_core::market_data::MarketDataError;
///
/// let err = MarketDataError::InvalidMaturity { t: -1.0 };
/// assert!(format!("{}", err).contains("-1"));
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MarketDataError {
    /// Invalid maturity (negative time).
    #[error("Invalid maturity: t = {t}")]
    InvalidMaturity {
        /// The invalid maturity value
        t: f64,
    },

    /// Interpolation error.
    #[error("Interpolation error: {0}")]
    Interpolation(#[from] InterpolationError),

    /// Insufficient data for construction.
    #[error("Insufficient data: got {got}, need {need}")]
    InsufficientData {
        /// Number of points provided
        got: usize,
        /// Minimum number of points required
        need: usize,
    },

    /// Pillar value that cannot back a curve.
    #[error("Invalid quote at t = {t}: {value}")]
    InvalidQuote {
        /// Pillar time
        t: f64,
        /// Offending value
        value: f64,
    },

    /// Unit not present in the market data set.
    #[error("Unknown unit: {unit}")]
    UnknownUnit {
        /// The requested unit identifier
        unit: String,
    },

    /// Unit already present in the market data set.
    #[error("Duplicate unit: {unit}")]
    DuplicateUnit {
        /// The repeated unit identifier
        unit: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_maturity_display() {
        let err = MarketDataError::InvalidMaturity { t: -1.5 };
        assert_eq!(format!("{}", err), "Invalid maturity: t = -1.5");
    }

    #[test]
    fn test_unknown_unit_display() {
        let err = MarketDataError::UnknownUnit {
            unit: "GBP".to_string(),
        };
        assert_eq!(err.to_string(), "Unknown unit: GBP");
    }

    #[test]
    fn test_from_interpolation_error() {
        let interp_err = InterpolationError::OutOfBounds {
            x: 5.0,
            min: 0.0,
            max: 3.0,
        };
        let mkt_err: MarketDataError = interp_err.into();
        assert!(matches!(mkt_err, MarketDataError::Interpolation(_)));
    }
}
