//! Core error types.
//!
//! This module provides:
//! - `error`: Structured error types for pricing runs and interpolation
//!
//! # Re-exports
//!
//! [`PricingError`], [`InterpolationError`] and the crate-wide [`Result`]
//! alias are re-exported at this module level.

pub mod error;

pub use error::{InterpolationError, PricingError, Result};
