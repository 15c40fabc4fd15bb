//! Market data: curves, forward/discount providers and the per-run market set.
//!
//! - [`curves`]: Yield curves used both for discounting and for asset carry
//! - [`ForwardProvider`]: `forward`, `rate`, `discount` contract per unit
//! - [`ForwardCurve`]: Provider for cash and asset units
//! - [`MarketData`]: Base currency plus named assets

pub mod curves;
pub mod error;
pub mod forward;
pub mod market;

pub use curves::{CurveEnum, FlatCurve, InterpolatedCurve, YieldCurve};
pub use error::MarketDataError;
pub use forward::{ForwardCurve, ForwardProvider, UnitKind};
pub use market::MarketData;
