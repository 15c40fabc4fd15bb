//! Error types for structured error handling.
//!
//! This module provides:
//! - `PricingError`: Errors surfaced by a pricing run (configuration, numeric
//!   domain, sequencing, market data)
//! - `InterpolationError`: Errors from interpolation operations
//!
//! No error in this taxonomy is transient. A pricing run either completes or
//! aborts with one of these, and partial results are never returned.

use crate::market_data::MarketDataError;
use thiserror::Error;

/// Result alias for fallible pricing operations.
pub type Result<T> = std::result::Result<T, PricingError>;

/// Categorised pricing errors.
///
/// # Variants
/// - `Configuration`: Malformed or missing dataset/timetable fields. Raised
///   before any simulation work begins.
/// - `NumericDomain`: A parameter outside its numeric domain (negative
///   variance, non-finite value).
/// - `Sequencing`: Simulation time moving backwards, or a track read before
///   its last write.
/// - `MarketData`: Failure of a curve or provider lookup.
///
/// # Examples
/// ```
/// use tabula_core::types::PricingError;
///
/// let err = PricingError::configuration("PATHS", "must be positive");
/// assert_eq!(format!("{}", err), "Configuration error: PATHS: must be positive");
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PricingError {
    /// Malformed or missing configuration.
    #[error("Configuration error: {key}: {reason}")]
    Configuration {
        /// Offending key, event or field
        key: String,
        /// Description of the problem
        reason: String,
    },

    /// Parameter outside its numeric domain.
    #[error("Numeric domain error: {name} = {value}: {reason}")]
    NumericDomain {
        /// Parameter name
        name: String,
        /// Offending value
        value: f64,
        /// Description of the violated constraint
        reason: String,
    },

    /// Time ordering violated.
    #[error("Sequencing error at t = {time}: {reason}")]
    Sequencing {
        /// Simulation time at which the violation was detected
        time: f64,
        /// Description of the violation
        reason: String,
    },

    /// Market data lookup failure.
    #[error("Market data error: {0}")]
    MarketData(#[from] MarketDataError),
}

impl PricingError {
    /// Build a [`PricingError::Configuration`].
    pub fn configuration(key: impl Into<String>, reason: impl Into<String>) -> Self {
        PricingError::Configuration {
            key: key.into(),
            reason: reason.into(),
        }
    }

    /// Build a [`PricingError::NumericDomain`].
    pub fn numeric_domain(name: impl Into<String>, value: f64, reason: impl Into<String>) -> Self {
        PricingError::NumericDomain {
            name: name.into(),
            value,
            reason: reason.into(),
        }
    }

    /// Build a [`PricingError::Sequencing`].
    pub fn sequencing(time: f64, reason: impl Into<String>) -> Self {
        PricingError::Sequencing {
            time,
            reason: reason.into(),
        }
    }

    /// Returns true for errors that are raised before simulation starts.
    #[inline]
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            PricingError::Configuration { .. } | PricingError::NumericDomain { .. }
        )
    }
}

/// Interpolation-related errors.
///
/// # Examples
/// ```
/// use tabula_core::types::InterpolationError;
///
/// let err = InterpolationError::OutOfBounds { x: 5.0, min: 0.0, max: 3.0 };
/// assert!(format!("{}", err).contains("outside valid domain"));
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InterpolationError {
    /// Query point outside valid interpolation domain.
    #[error("Query point {x} outside valid domain [{min}, {max}]")]
    OutOfBounds {
        /// The query point that was out of bounds
        x: f64,
        /// Minimum valid value
        min: f64,
        /// Maximum valid value
        max: f64,
    },

    /// Insufficient data points for interpolation.
    #[error("Insufficient data points: got {got}, need at least {need}")]
    InsufficientData {
        /// Number of points provided
        got: usize,
        /// Minimum number of points required
        need: usize,
    },

    /// Invalid input data or parameters.
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
