//! Static dispatch over the concrete curve implementations.

use super::{FlatCurve, InterpolatedCurve, YieldCurve};
use crate::market_data::error::MarketDataError;
use num_traits::Float;

/// Static dispatch enum wrapping concrete yield curve implementations.
///
/// # Example
///
/// ```
/// use tabula_core::market_data::curves::{CurveEnum, YieldCurve};
///
/// let curve = CurveEnum::flat(0.05_f64);
/// let df = curve.discount_factor(1.0).unwrap();
/// assert!((df - 0.951229).abs() < 1e-5);
/// ```
#[derive(Debug, Clone)]
pub enum CurveEnum<T: Float> {
    /// Flat (constant rate) yield curve
    Flat(FlatCurve<T>),
    /// Log-linear curve through pillar points
    Interpolated(InterpolatedCurve<T>),
}

impl<T: Float> CurveEnum<T> {
    /// Flat curve with the given continuously compounded rate.
    #[inline]
    pub fn flat(rate: T) -> Self {
        CurveEnum::Flat(FlatCurve::new(rate))
    }

    /// Build a curve from discount factor pillars.
    ///
    /// A single pillar yields a flat curve through it; two or more yield a
    /// log-linear curve with flat zero-rate extrapolation on both sides.
    ///
    /// # Errors
    ///
    /// `InsufficientData` for no pillars, `InvalidQuote`/`InvalidMaturity`
    /// for unusable pillars.
    pub fn from_discount_pillars(tenors: &[T], discount_factors: &[T]) -> Result<Self, MarketDataError> {
        match (tenors, discount_factors) {
            ([], _) => Err(MarketDataError::InsufficientData { got: 0, need: 1 }),
            ([t], [df]) => {
                if *t <= T::zero() {
                    return Err(MarketDataError::InvalidMaturity {
                        t: t.to_f64().unwrap_or(0.0),
                    });
                }
                if *df <= T::zero() || !df.is_finite() {
                    return Err(MarketDataError::InvalidQuote {
                        t: t.to_f64().unwrap_or(0.0),
                        value: df.to_f64().unwrap_or(f64::NAN),
                    });
                }
                Ok(CurveEnum::flat(-df.ln() / *t))
            }
            _ => Ok(CurveEnum::Interpolated(InterpolatedCurve::new(
                tenors,
                discount_factors,
            )?)),
        }
    }
}

impl<T: Float> YieldCurve<T> for CurveEnum<T> {
    #[inline]
    fn discount_factor(&self, t: T) -> Result<T, MarketDataError> {
        match self {
            CurveEnum::Flat(curve) => curve.discount_factor(t),
            CurveEnum::Interpolated(curve) => curve.discount_factor(t),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_flat_dispatch() {
        let curve = CurveEnum::flat(0.04_f64);
        assert!(matches!(curve, CurveEnum::Flat(_)));
        assert_relative_eq!(curve.discount_factor(1.0).unwrap(), (-0.04_f64).exp());
    }

    #[test]
    fn test_single_pillar_is_flat() {
        let curve = CurveEnum::from_discount_pillars(&[2.0_f64], &[0.9]).unwrap();
        assert!(matches!(curve, CurveEnum::Flat(_)));
        assert_relative_eq!(curve.discount_factor(2.0).unwrap(), 0.9, epsilon = 1e-14);
        assert_relative_eq!(curve.discount_factor(1.0).unwrap(), 0.9_f64.sqrt(), epsilon = 1e-14);
    }

    #[test]
    fn test_multiple_pillars_interpolate() {
        let curve = CurveEnum::from_discount_pillars(&[1.0_f64, 2.0], &[0.98, 0.95]).unwrap();
        assert!(matches!(curve, CurveEnum::Interpolated(_)));
        assert_relative_eq!(curve.discount_factor(2.0).unwrap(), 0.95, epsilon = 1e-14);
        // Beyond the last pillar the curve stays defined
        assert!(curve.discount_factor(10.0).unwrap() > 0.0);
    }

    #[test]
    fn test_empty_pillars() {
        let result = CurveEnum::<f64>::from_discount_pillars(&[], &[]);
        assert!(matches!(result, Err(MarketDataError::InsufficientData { .. })));
    }

    #[test]
    fn test_invalid_single_pillar() {
        assert!(CurveEnum::from_discount_pillars(&[0.0_f64], &[0.9]).is_err());
        assert!(CurveEnum::from_discount_pillars(&[1.0_f64], &[0.0]).is_err());
    }
}
