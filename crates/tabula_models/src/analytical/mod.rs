//! Closed-form reference prices.
//!
//! Used to check simulated prices of vanilla contracts.

mod black;
mod distributions;

pub use black::Black76;
pub use distributions::{norm_cdf, norm_pdf};
