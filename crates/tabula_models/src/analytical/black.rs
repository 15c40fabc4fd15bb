//! Black (1976) forward-measure option prices.

use tabula_core::types::{PricingError, Result};

use super::distributions::norm_cdf;

/// Black formula on a forward.
///
/// Prices `df * E[(F_T - K)^+]` and `df * E[(K - F_T)^+]` for a lognormal
/// forward with mean `forward` and volatility `volatility` over `expiry`.
///
/// # Examples
///
/// ```
/// use tabula_models::analytical::Black76;
///
/// let black = Black76::new(2900.0, 0.175, 1.0).unwrap();
/// let call = black.price_call(2800.0, 1.0);
/// assert!((call - 252.69).abs() < 0.01);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Black76 {
    forward: f64,
    volatility: f64,
    discount: f64,
}

impl Black76 {
    /// Create a pricer.
    ///
    /// # Errors
    ///
    /// `NumericDomain` for a non-positive forward, negative volatility or
    /// non-positive discount factor.
    pub fn new(forward: f64, volatility: f64, discount: f64) -> Result<Self> {
        if !forward.is_finite() || forward <= 0.0 {
            return Err(PricingError::numeric_domain("forward", forward, "must be positive"));
        }
        if !volatility.is_finite() || volatility < 0.0 {
            return Err(PricingError::numeric_domain(
                "volatility",
                volatility,
                "must be non-negative",
            ));
        }
        if !discount.is_finite() || discount <= 0.0 {
            return Err(PricingError::numeric_domain("discount", discount, "must be positive"));
        }
        Ok(Self {
            forward,
            volatility,
            discount,
        })
    }

    /// Total standard deviation `vol * sqrt(expiry)`.
    #[inline]
    fn total_vol(&self, expiry: f64) -> f64 {
        self.volatility * expiry.max(0.0).sqrt()
    }

    /// Discounted call price.
    pub fn price_call(&self, strike: f64, expiry: f64) -> f64 {
        let sd = self.total_vol(expiry);
        if sd <= 0.0 || strike <= 0.0 {
            return self.discount * (self.forward - strike).max(0.0);
        }
        let d1 = ((self.forward / strike).ln() + 0.5 * sd * sd) / sd;
        let d2 = d1 - sd;
        self.discount * (self.forward * norm_cdf(d1) - strike * norm_cdf(d2))
    }

    /// Discounted put price, from put-call parity.
    pub fn price_put(&self, strike: f64, expiry: f64) -> f64 {
        self.price_call(strike, expiry) - self.discount * (self.forward - strike)
    }
}
