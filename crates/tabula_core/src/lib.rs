//! # tabula_core: Foundation Layer for Timetable Pricing
//!
//! ## Layer 1 (Foundation) Role
//!
//! tabula_core is the bottom layer of the Tabula workspace and provides:
//! - Error taxonomy shared by every layer (`types::error`)
//! - Piecewise linear interpolation (`math::interpolators`)
//! - Yield curves for discounting (`market_data::curves`)
//! - The forward/discount provider contract consumed by process models
//!   (`market_data::forward`) and the per-run market data set
//!   (`market_data::market`)
//!
//! ## Zero Dependency Principle
//!
//! Layer 1 has no dependencies on other tabula_* crates, with minimal external
//! dependencies:
//! - num-traits: Traits for generic numerical computation
//! - thiserror: Structured error enums
//!
//! ## Usage Examples
//!
//! ```rust
//! use tabula_core::market_data::{CurveEnum, ForwardCurve, ForwardProvider, MarketData};
//!
//! let mut market = MarketData::new("USD", CurveEnum::flat(0.02));
//! market.insert_asset("SPX", 2900.0, CurveEnum::flat(0.01)).unwrap();
//!
//! let spx = market.provider("SPX").unwrap();
//! assert!((spx.forward(0.0).unwrap() - 2900.0).abs() < 1e-12);
//! assert!((spx.discount(1.0).unwrap() - (-0.02_f64).exp()).abs() < 1e-12);
//!
//! let usd: &ForwardCurve = market.provider("USD").unwrap();
//! assert_eq!(usd.forward(5.0).unwrap(), 1.0);
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod market_data;
pub mod math;
pub mod types;
