//! Forward/discount provider contract.
//!
//! Process models and the timetable walker never read curves directly; they
//! ask a [`ForwardProvider`] for a unit's forward value, period growth factor
//! and discount factor. [`ForwardCurve`] is the provider used for both cash
//! (the numeraire currency) and assets.

use super::curves::{CurveEnum, YieldCurve};
use super::error::MarketDataError;

/// Forward/discount provider for one unit.
///
/// # Contract
///
/// - `forward(t)`: model-free expected value of one unit at `t`, in numeraire
///   currency
/// - `rate(t2, t1)`: period growth factor `forward(t2) / forward(t1)`
/// - `discount(t)`: discount factor applied to a flow in this unit at `t`
///
/// Implementations are read-only and shared freely between runs.
pub trait ForwardProvider: Send + Sync {
    /// Forward value of the unit at time `t`.
    fn forward(&self, t: f64) -> Result<f64, MarketDataError>;

    /// Growth factor between `t1` and `t2`.
    fn rate(&self, t2: f64, t1: f64) -> Result<f64, MarketDataError> {
        Ok(self.forward(t2)? / self.forward(t1)?)
    }

    /// Discount factor for a flow at time `t`.
    fn discount(&self, t: f64) -> Result<f64, MarketDataError>;
}

/// Kind of unit held in the market data set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnitKind {
    /// Numeraire currency: forward is identically one.
    Cash,
    /// Traded asset with spot and carry.
    Asset,
}

/// Forward curve of a unit: `F(t) = spot / C(t)` where `C` is the carry curve.
///
/// A carry curve with rate `g` gives `F(t) = spot * exp(g * t)`.
///
/// # Example
///
/// ```
/// use tabula_core::market_data::{CurveEnum, ForwardCurve, ForwardProvider};
///
/// let spx = ForwardCurve::asset(100.0, CurveEnum::flat(0.03), CurveEnum::flat(0.0)).unwrap();
/// let f1 = spx.forward(1.0).unwrap();
/// assert!((f1 - 100.0 * 0.03_f64.exp()).abs() < 1e-10);
/// assert!((spx.rate(1.0, 0.0).unwrap() - 0.03_f64.exp()).abs() < 1e-12);
/// ```
#[derive(Debug, Clone)]
pub struct ForwardCurve {
    kind: UnitKind,
    spot: f64,
    carry: CurveEnum<f64>,
    discount: CurveEnum<f64>,
}

impl ForwardCurve {
    /// Numeraire cash unit discounted on `discount`.
    pub fn cash(discount: CurveEnum<f64>) -> Self {
        Self {
            kind: UnitKind::Cash,
            spot: 1.0,
            carry: CurveEnum::flat(0.0),
            discount,
        }
    }

    /// Asset with the given spot and carry curve.
    ///
    /// # Errors
    ///
    /// `MarketDataError::InvalidQuote` if `spot` is not finite and positive.
    pub fn asset(
        spot: f64,
        carry: CurveEnum<f64>,
        discount: CurveEnum<f64>,
    ) -> Result<Self, MarketDataError> {
        if !(spot.is_finite() && spot > 0.0) {
            return Err(MarketDataError::InvalidQuote { t: 0.0, value: spot });
        }
        Ok(Self {
            kind: UnitKind::Asset,
            spot,
            carry,
            discount,
        })
    }

    /// Asset whose forward curve passes through `(tenors[i], forwards[i])`.
    ///
    /// Forwards are interpolated log-linearly; beyond the last pillar the
    /// last average growth rate is kept.
    pub fn asset_from_forwards(
        spot: f64,
        tenors: &[f64],
        forwards: &[f64],
        discount: CurveEnum<f64>,
    ) -> Result<Self, MarketDataError> {
        if tenors.len() != forwards.len() {
            return Err(MarketDataError::InsufficientData {
                got: forwards.len(),
                need: tenors.len(),
            });
        }
        let mut carry_factors = Vec::with_capacity(forwards.len());
        for (&t, &fwd) in tenors.iter().zip(forwards.iter()) {
            if !(fwd.is_finite() && fwd > 0.0) {
                return Err(MarketDataError::InvalidQuote { t, value: fwd });
            }
            carry_factors.push(spot / fwd);
        }
        let carry = CurveEnum::from_discount_pillars(tenors, &carry_factors)?;
        Self::asset(spot, carry, discount)
    }

    /// Unit kind.
    #[inline]
    pub fn kind(&self) -> UnitKind {
        self.kind
    }

    /// Discount curve backing [`ForwardProvider::discount`].
    #[inline]
    pub fn discount_curve(&self) -> &CurveEnum<f64> {
        &self.discount
    }
}

impl ForwardProvider for ForwardCurve {
    fn forward(&self, t: f64) -> Result<f64, MarketDataError> {
        if self.kind == UnitKind::Cash {
            if t < 0.0 {
                return Err(MarketDataError::InvalidMaturity { t });
            }
            return Ok(1.0);
        }
        Ok(self.spot / self.carry.discount_factor(t)?)
    }

    fn rate(&self, t2: f64, t1: f64) -> Result<f64, MarketDataError> {
        if self.kind == UnitKind::Cash {
            return Ok(1.0);
        }
        Ok(self.carry.discount_factor(t1)? / self.carry.discount_factor(t2)?)
    }

    fn discount(&self, t: f64) -> Result<f64, MarketDataError> {
        self.discount.discount_factor(t)
    }
}
