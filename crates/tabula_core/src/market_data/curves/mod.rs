//! Curve abstractions for discounting and forward carry.
//!
//! This module provides:
//! - [`YieldCurve`]: Generic discount factor trait
//! - [`FlatCurve`]: Constant rate curve
//! - [`InterpolatedCurve`]: Log-linear curve through discount factor pillars
//! - [`CurveEnum`]: Static dispatch enum wrapping concrete curve implementations

mod curve_enum;
mod flat;
mod interpolated;
mod traits;

pub use curve_enum::CurveEnum;
pub use flat::FlatCurve;
pub use interpolated::InterpolatedCurve;
pub use traits::YieldCurve;
