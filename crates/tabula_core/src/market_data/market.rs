//! Per-run market data set.

use std::collections::BTreeMap;

use super::curves::CurveEnum;
use super::error::MarketDataError;
use super::forward::{ForwardCurve, UnitKind};

/// Market data for one pricing run: the numeraire cash unit and every asset
/// the run may reference, each with its forward/discount provider.
///
/// Every unit discounts on the base currency curve. Read-only once built and
/// shared between parallel runs without locking.
#[derive(Debug, Clone)]
pub struct MarketData {
    base: String,
    units: BTreeMap<String, ForwardCurve>,
}

impl MarketData {
    /// Create a market with the base currency discounted on `discount`.
    pub fn new(base: impl Into<String>, discount: CurveEnum<f64>) -> Self {
        let base = base.into();
        let mut units = BTreeMap::new();
        units.insert(base.clone(), ForwardCurve::cash(discount));
        Self { base, units }
    }

    /// Add an asset with flat or curved carry.
    ///
    /// # Errors
    ///
    /// `InvalidQuote` for an unusable spot, `DuplicateUnit` for a name
    /// already in use.
    pub fn insert_asset(
        &mut self,
        name: impl Into<String>,
        spot: f64,
        carry: CurveEnum<f64>,
    ) -> Result<(), MarketDataError> {
        let curve = ForwardCurve::asset(spot, carry, self.base_discount().clone())?;
        self.insert(name.into(), curve)
    }

    /// Add an asset from forward pillars `(tenors[i], forwards[i])`.
    pub fn insert_asset_forwards(
        &mut self,
        name: impl Into<String>,
        spot: f64,
        tenors: &[f64],
        forwards: &[f64],
    ) -> Result<(), MarketDataError> {
        let curve =
            ForwardCurve::asset_from_forwards(spot, tenors, forwards, self.base_discount().clone())?;
        self.insert(name.into(), curve)
    }

    fn insert(&mut self, name: String, curve: ForwardCurve) -> Result<(), MarketDataError> {
        if self.units.contains_key(&name) {
            return Err(MarketDataError::DuplicateUnit { unit: name });
        }
        self.units.insert(name, curve);
        Ok(())
    }

    fn base_discount(&self) -> &CurveEnum<f64> {
        // The base entry is inserted in `new` and never removed.
        self.units[&self.base].discount_curve()
    }

    /// Numeraire currency identifier.
    #[inline]
    pub fn base(&self) -> &str {
        &self.base
    }

    /// Provider for `unit`.
    ///
    /// # Errors
    ///
    /// `MarketDataError::UnknownUnit` if the unit is not in the set.
    pub fn provider(&self, unit: &str) -> Result<&ForwardCurve, MarketDataError> {
        self.units.get(unit).ok_or_else(|| MarketDataError::UnknownUnit {
            unit: unit.to_string(),
        })
    }

    /// Kind of `unit`, if present.
    pub fn kind(&self, unit: &str) -> Option<UnitKind> {
        self.units.get(unit).map(ForwardCurve::kind)
    }

    /// Returns true if `unit` is in the set.
    #[inline]
    pub fn contains(&self, unit: &str) -> bool {
        self.units.contains_key(unit)
    }

    /// Check that every unit in `units` is present.
    ///
    /// Returns the first unknown unit as `UnknownUnit`.
    pub fn validate_units<'a, I>(&self, units: I) -> Result<(), MarketDataError>
    where
        I: IntoIterator<Item = &'a str>,
    {
        match units.into_iter().find(|unit| !self.contains(unit)) {
            Some(unit) => Err(MarketDataError::UnknownUnit {
                unit: unit.to_string(),
            }),
            None => Ok(()),
        }
    }
}
