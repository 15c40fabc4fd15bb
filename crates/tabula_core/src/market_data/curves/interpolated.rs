//! Log-linear discount curve through pillar points.

use super::YieldCurve;
use crate::market_data::error::MarketDataError;
use crate::math::interpolators::{Interpolator, LinearInterpolator};
use num_traits::Float;

/// Discount curve interpolated linearly in `ln D(t)` between pillars.
///
/// Between pillars forward rates are piecewise constant. Before the first
/// and after the last pillar the curve extrapolates flat in zero rate.
///
/// # Example
///
/// ```
/// use tabula_core::market_data::curves::{YieldCurve, InterpolatedCurve};
///
/// let curve = InterpolatedCurve::new(&[0.5, 1.0, 2.0], &[0.99, 0.975, 0.94]).unwrap();
///
/// let df = curve.discount_factor(0.75).unwrap();
/// assert!(df < 0.99 && df > 0.975);
/// ```
#[derive(Debug, Clone)]
pub struct InterpolatedCurve<T: Float> {
    log_df: LinearInterpolator<T>,
}

impl<T: Float> InterpolatedCurve<T> {
    /// Construct from discount factor pillars `D(t_i)`.
    ///
    /// # Errors
    ///
    /// * `MarketDataError::InsufficientData` - Fewer than 2 pillars or length mismatch
    /// * `MarketDataError::InvalidMaturity` - Non-positive or unsorted tenors
    /// * `MarketDataError::InvalidQuote` - Non-positive or non-finite discount factor
    pub fn new(tenors: &[T], discount_factors: &[T]) -> Result<Self, MarketDataError> {
        if tenors.len() < 2 {
            return Err(MarketDataError::InsufficientData {
                got: tenors.len(),
                need: 2,
            });
        }
        if tenors.len() != discount_factors.len() {
            return Err(MarketDataError::InsufficientData {
                got: discount_factors.len(),
                need: tenors.len(),
            });
        }

        let mut log_dfs = Vec::with_capacity(tenors.len());
        for (i, (&t, &df)) in tenors.iter().zip(discount_factors).enumerate() {
            if t <= T::zero() || (i > 0 && t <= tenors[i - 1]) {
                return Err(MarketDataError::InvalidMaturity {
                    t: t.to_f64().unwrap_or(0.0),
                });
            }
            if df <= T::zero() || !df.is_finite() {
                return Err(MarketDataError::InvalidQuote {
                    t: t.to_f64().unwrap_or(0.0),
                    value: df.to_f64().unwrap_or(f64::NAN),
                });
            }
            log_dfs.push(df.ln());
        }

        Ok(Self {
            log_df: LinearInterpolator::new(tenors, &log_dfs)?,
        })
    }
}

impl<T: Float> YieldCurve<T> for InterpolatedCurve<T> {
    fn discount_factor(&self, t: T) -> Result<T, MarketDataError> {
        if t < T::zero() {
            return Err(MarketDataError::InvalidMaturity {
                t: t.to_f64().unwrap_or(0.0),
            });
        }
        if t == T::zero() {
            return Ok(T::one());
        }

        let (xs, ys) = (self.log_df.xs(), self.log_df.ys());
        let last = xs.len() - 1;
        if t < xs[0] {
            return Ok((ys[0] / xs[0] * t).exp());
        }
        if t > xs[last] {
            return Ok((ys[last] / xs[last] * t).exp());
        }
        Ok(self.log_df.interpolate(t)?.exp())
    }
}
