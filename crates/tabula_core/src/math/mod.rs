//! Numerical building blocks.
//!
//! - [`interpolators`]: Piecewise interpolation used by the interpolated curves

pub mod interpolators;
