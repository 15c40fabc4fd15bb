//! Programmatic dataset construction.

use std::collections::BTreeMap;

use tabula_core::types::{PricingError, Result};

use super::config::Dataset;
use super::schema::{AssetSpec, DatasetSpec, Flag, ParamValue};

/// Builder for [`Dataset`].
///
/// Collects the same fields a dataset file carries and validates them at
/// build time through [`Dataset::from_spec`].
///
/// # Examples
///
/// ```rust
/// use tabula_models::dataset::{Dataset, Flag};
///
/// let dataset = Dataset::builder()
///     .paths(50_000)
///     .timestep(1.0 / 250.0)
///     .seed(12345)
///     .flag(Flag::RawPv)
///     .base_rate("USD", 0.01)
///     .asset("SPX", 2900.0, 0.0)
///     .volatility(0.175)
///     .build()
///     .expect("valid dataset");
///
/// assert_eq!(dataset.seed(), 12345);
/// ```
#[derive(Clone, Debug, Default)]
pub struct DatasetBuilder {
    paths: Option<usize>,
    timestep: Option<f64>,
    seed: u64,
    flags: Vec<Flag>,
    base: Option<String>,
    assets: BTreeMap<String, AssetSpec>,
    params: BTreeMap<String, ParamValue>,
}

impl DatasetBuilder {
    /// Sets the number of simulation paths.
    #[inline]
    pub fn paths(mut self, paths: usize) -> Self {
        self.paths = Some(paths);
        self
    }

    /// Sets the maximum simulation step in years.
    #[inline]
    pub fn timestep(mut self, timestep: f64) -> Self {
        self.timestep = Some(timestep);
        self
    }

    /// Sets the run seed (default 0).
    #[inline]
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Requests an optional output.
    #[inline]
    pub fn flag(mut self, flag: Flag) -> Self {
        self.flags.push(flag);
        self
    }

    /// Sets the base currency with a flat discount rate.
    pub fn base_rate(mut self, name: impl Into<String>, rate: f64) -> Self {
        let name = name.into();
        self.assets.insert(
            name.clone(),
            AssetSpec::Cash {
                rate: Some(rate),
                table: None,
            },
        );
        self.base = Some(name);
        self
    }

    /// Sets the base currency with discount factor pillars `[t, df]`.
    pub fn base_table(mut self, name: impl Into<String>, table: Vec<[f64; 2]>) -> Self {
        let name = name.into();
        self.assets.insert(
            name.clone(),
            AssetSpec::Cash {
                rate: None,
                table: Some(table),
            },
        );
        self.base = Some(name);
        self
    }

    /// Adds an asset with flat carry `growth`.
    pub fn asset(mut self, name: impl Into<String>, spot: f64, growth: f64) -> Self {
        self.assets.insert(
            name.into(),
            AssetSpec::Asset {
                spot,
                growth: Some(growth),
                table: None,
            },
        );
        self
    }

    /// Adds an asset with forward pillars `[t, F(t)]`.
    pub fn asset_table(mut self, name: impl Into<String>, spot: f64, table: Vec<[f64; 2]>) -> Self {
        self.assets.insert(
            name.into(),
            AssetSpec::Asset {
                spot,
                growth: None,
                table: Some(table),
            },
        );
        self
    }

    /// Sets a model parameter.
    pub fn param(mut self, name: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.params.insert(name.into(), value.into());
        self
    }

    /// Sets `VOLATILITY` for every asset.
    #[inline]
    pub fn volatility(self, volatility: f64) -> Self {
        self.param("VOLATILITY", volatility)
    }

    /// Builds the dataset.
    ///
    /// # Errors
    ///
    /// `Configuration` if paths, timestep or base are not set, plus every
    /// error of [`Dataset::from_spec`].
    pub fn build(self) -> Result<Dataset> {
        let paths = self
            .paths
            .ok_or_else(|| PricingError::configuration("PATHS", "must be specified"))?;
        let timestep = self
            .timestep
            .ok_or_else(|| PricingError::configuration("TIMESTEP", "must be specified"))?;
        let base = self
            .base
            .ok_or_else(|| PricingError::configuration("BASE", "must be specified"))?;

        Dataset::from_spec(DatasetSpec {
            paths,
            timestep,
            seed: self.seed,
            flags: self.flags,
            base,
            assets: self.assets,
            params: self.params,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minimal() -> DatasetBuilder {
        Dataset::builder()
            .paths(1000)
            .timestep(0.01)
            .base_rate("USD", 0.0)
    }

    #[test]
    fn test_builder_valid() {
        let dataset = minimal()
            .seed(9)
            .asset("SPX", 2900.0, 0.0)
            .volatility(0.2)
            .build()
            .unwrap();
        assert_eq!(dataset.paths(), 1000);
        assert_eq!(dataset.timestep(), 0.01);
        assert_eq!(dataset.seed(), 9);
        assert_eq!(dataset.base(), "USD");
        assert_eq!(dataset.param("VOLATILITY"), Some(&ParamValue::Scalar(0.2)));
        assert!(dataset.flags().is_empty());
    }

    #[test]
    fn test_builder_missing_paths() {
        let result = Dataset::builder().timestep(0.01).base_rate("USD", 0.0).build();
        assert!(matches!(
            result,
            Err(PricingError::Configuration { key, .. }) if key == "PATHS"
        ));
    }

    #[test]
    fn test_builder_missing_timestep() {
        let result = Dataset::builder().paths(10).base_rate("USD", 0.0).build();
        assert!(matches!(
            result,
            Err(PricingError::Configuration { key, .. }) if key == "TIMESTEP"
        ));
    }

    #[test]
    fn test_builder_missing_base() {
        let result = Dataset::builder().paths(10).timestep(0.1).build();
        assert!(matches!(
            result,
            Err(PricingError::Configuration { key, .. }) if key == "BASE"
        ));
    }

    #[test]
    fn test_builder_tables() {
        let dataset = Dataset::builder()
            .paths(10)
            .timestep(0.1)
            .base_table("EUR", vec![[1.0, 0.98], [5.0, 0.9]])
            .asset_table("SX5E", 4000.0, vec![[1.0, 4040.0]])
            .flag(Flag::RawTracks)
            .build()
            .unwrap();
        assert!(dataset.market().contains("SX5E"));
        assert!(dataset.has_flag(Flag::RawTracks));
    }

    #[test]
    fn test_builder_validates_through_from_spec() {
        let result = minimal().paths(0).build();
        assert!(matches!(result, Err(PricingError::Configuration { .. })));
    }
}
