//! Validated per-run configuration.

use std::collections::BTreeMap;
use std::io::Read;
use std::sync::Arc;

use tabula_core::market_data::{CurveEnum, MarketData};
use tabula_core::types::{PricingError, Result};

use super::builder::DatasetBuilder;
use super::schema::{AssetSpec, DatasetSpec, Flag, ParamValue};

/// Maximum number of simulation paths allowed.
pub const MAX_PATHS: usize = 10_000_000;

/// Immutable configuration of one pricing run.
///
/// Holds the path count, time step, seed, output flags, the market data set
/// and model parameters. Market data sits behind an [`Arc`], so the
/// adjusted copies returned by [`Dataset::with_seed`] and
/// [`Dataset::with_paths`] share it.
///
/// # Examples
///
/// ```
/// use tabula_models::dataset::{Dataset, Flag};
///
/// let dataset = Dataset::from_toml_str(r#"
///     PATHS = 5000
///     TIMESTEP = 0.004
///     SEED = 1
///     FLAGS = ["RAW_PV"]
///     BASE = "USD"
///     ASSETS.USD = { kind = "cash", rate = 0.0 }
///     ASSETS.SPX = { kind = "asset", spot = 2900.0, growth = 0.0 }
///     PARAMS.VOLATILITY = 0.175
/// "#).unwrap();
///
/// assert_eq!(dataset.base(), "USD");
/// assert!(dataset.has_flag(Flag::RawPv));
/// assert_eq!(dataset.with_seed(2).seed(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct Dataset {
    paths: usize,
    timestep: f64,
    seed: u64,
    flags: Vec<Flag>,
    market: Arc<MarketData>,
    params: BTreeMap<String, ParamValue>,
}

impl Dataset {
    /// Creates a new dataset builder.
    #[inline]
    pub fn builder() -> DatasetBuilder {
        DatasetBuilder::default()
    }

    /// Validate `spec` and build its market data.
    ///
    /// # Errors
    ///
    /// - `Configuration`: `PATHS` outside `[1, MAX_PATHS]`, `BASE` not a cash
    ///   entry, a second cash entry, a curve entry with neither or both of its
    ///   alternatives, a malformed pillar table
    /// - `NumericDomain`: non-finite or non-positive `TIMESTEP`, spot or
    ///   pillar value; non-finite rate or growth
    pub fn from_spec(spec: DatasetSpec) -> Result<Self> {
        if spec.paths == 0 || spec.paths > MAX_PATHS {
            return Err(PricingError::configuration(
                "PATHS",
                format!("must be in [1, {}], got {}", MAX_PATHS, spec.paths),
            ));
        }
        if !spec.timestep.is_finite() || spec.timestep <= 0.0 {
            return Err(PricingError::numeric_domain(
                "TIMESTEP",
                spec.timestep,
                "must be finite and positive",
            ));
        }

        let discount = match spec.assets.get(&spec.base) {
            Some(AssetSpec::Cash { rate, table }) => {
                cash_curve(&spec.base, *rate, table.as_deref())?
            }
            Some(AssetSpec::Asset { .. }) => {
                return Err(PricingError::configuration(
                    "BASE",
                    format!("'{}' must be a cash entry", spec.base),
                ))
            }
            None => {
                return Err(PricingError::configuration(
                    "BASE",
                    format!("'{}' is not listed in ASSETS", spec.base),
                ))
            }
        };

        let mut market = MarketData::new(spec.base.clone(), discount);
        for (name, entry) in &spec.assets {
            match entry {
                AssetSpec::Cash { .. } if *name == spec.base => {}
                AssetSpec::Cash { .. } => {
                    return Err(PricingError::configuration(
                        format!("ASSETS.{}", name),
                        "only the base currency may be a cash entry",
                    ))
                }
                AssetSpec::Asset {
                    spot,
                    growth,
                    table,
                } => {
                    let key = format!("ASSETS.{}", name);
                    if !spot.is_finite() || *spot <= 0.0 {
                        return Err(PricingError::numeric_domain(
                            format!("{}.spot", key),
                            *spot,
                            "must be finite and positive",
                        ));
                    }
                    match (growth, table.as_deref()) {
                        (Some(g), None) => {
                            finite(&format!("{}.growth", key), *g)?;
                            market.insert_asset(name.clone(), *spot, CurveEnum::flat(*g))?;
                        }
                        (None, Some(pillars)) => {
                            let (tenors, forwards) = split_pillars(&key, pillars)?;
                            market.insert_asset_forwards(name.clone(), *spot, &tenors, &forwards)?;
                        }
                        _ => {
                            return Err(PricingError::configuration(
                                key,
                                "exactly one of 'growth' or 'table' is required",
                            ))
                        }
                    }
                }
            }
        }

        let mut flags = spec.flags;
        flags.sort();
        flags.dedup();

        Ok(Self {
            paths: spec.paths,
            timestep: spec.timestep,
            seed: spec.seed,
            flags,
            market: Arc::new(market),
            params: spec.params,
        })
    }

    /// Parse and validate a TOML dataset.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let spec: DatasetSpec = toml::from_str(source)
            .map_err(|e| PricingError::configuration("dataset", e.to_string()))?;
        Self::from_spec(spec)
    }

    /// Parse and validate a JSON dataset.
    pub fn from_json_str(source: &str) -> Result<Self> {
        let spec: DatasetSpec = serde_json::from_str(source)
            .map_err(|e| PricingError::configuration("dataset", e.to_string()))?;
        Self::from_spec(spec)
    }

    /// Read and validate a JSON dataset.
    pub fn from_json_reader<R: Read>(reader: R) -> Result<Self> {
        let spec: DatasetSpec = serde_json::from_reader(reader)
            .map_err(|e| PricingError::configuration("dataset", e.to_string()))?;
        Self::from_spec(spec)
    }

    /// Copy of this dataset with a different seed.
    pub fn with_seed(&self, seed: u64) -> Self {
        Self {
            seed,
            ..self.clone()
        }
    }

    /// Copy of this dataset with a different path count.
    ///
    /// # Errors
    ///
    /// `Configuration` if `paths` is outside `[1, MAX_PATHS]`.
    pub fn with_paths(&self, paths: usize) -> Result<Self> {
        if paths == 0 || paths > MAX_PATHS {
            return Err(PricingError::configuration(
                "PATHS",
                format!("must be in [1, {}], got {}", MAX_PATHS, paths),
            ));
        }
        Ok(Self {
            paths,
            ..self.clone()
        })
    }

    /// Copy of this dataset with `flag` set.
    pub fn with_flag(&self, flag: Flag) -> Self {
        let mut copy = self.clone();
        if !copy.flags.contains(&flag) {
            copy.flags.push(flag);
            copy.flags.sort();
        }
        copy
    }

    /// Number of simulated paths.
    #[inline]
    pub fn paths(&self) -> usize {
        self.paths
    }

    /// Maximum simulation step in years.
    #[inline]
    pub fn timestep(&self) -> f64 {
        self.timestep
    }

    /// Run seed.
    #[inline]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Requested optional outputs.
    #[inline]
    pub fn flags(&self) -> &[Flag] {
        &self.flags
    }

    /// Returns true if `flag` is set.
    #[inline]
    pub fn has_flag(&self, flag: Flag) -> bool {
        self.flags.contains(&flag)
    }

    /// Numeraire currency.
    #[inline]
    pub fn base(&self) -> &str {
        self.market.base()
    }

    /// Market data set.
    #[inline]
    pub fn market(&self) -> &MarketData {
        &self.market
    }

    /// Shared handle to the market data set.
    #[inline]
    pub fn market_handle(&self) -> Arc<MarketData> {
        Arc::clone(&self.market)
    }

    /// All model parameters.
    #[inline]
    pub fn params(&self) -> &BTreeMap<String, ParamValue> {
        &self.params
    }

    /// Model parameter `name`, if present.
    #[inline]
    pub fn param(&self, name: &str) -> Option<&ParamValue> {
        self.params.get(name)
    }
}

fn finite(key: &str, value: f64) -> Result<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(PricingError::numeric_domain(key, value, "must be finite"))
    }
}

fn cash_curve(name: &str, rate: Option<f64>, table: Option<&[[f64; 2]]>) -> Result<CurveEnum<f64>> {
    let key = format!("ASSETS.{}", name);
    match (rate, table) {
        (Some(r), None) => {
            finite(&format!("{}.rate", key), r)?;
            Ok(CurveEnum::flat(r))
        }
        (None, Some(pillars)) => {
            let (tenors, dfs) = split_pillars(&key, pillars)?;
            Ok(CurveEnum::from_discount_pillars(&tenors, &dfs)?)
        }
        _ => Err(PricingError::configuration(
            key,
            "exactly one of 'rate' or 'table' is required",
        )),
    }
}

/// Split `[t, v]` pillars into columns after checking their shape.
fn split_pillars(key: &str, pillars: &[[f64; 2]]) -> Result<(Vec<f64>, Vec<f64>)> {
    let table_key = format!("{}.table", key);
    if pillars.is_empty() {
        return Err(PricingError::configuration(
            table_key,
            "at least one pillar is required",
        ));
    }
    let mut previous = 0.0;
    for &[t, value] in pillars {
        if !t.is_finite() || t <= previous {
            return Err(PricingError::configuration(
                table_key,
                format!("pillar times must be positive and increasing, got {}", t),
            ));
        }
        if !value.is_finite() || value <= 0.0 {
            return Err(PricingError::numeric_domain(
                format!("{}[t = {}]", table_key, t),
                value,
                "must be finite and positive",
            ));
        }
        previous = t;
    }
    Ok(pillars.iter().map(|&[t, v]| (t, v)).unzip())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use tabula_core::market_data::{ForwardProvider, UnitKind};

    const BASIC: &str = r#"
        PATHS = 100
        TIMESTEP = 0.1
        SEED = 3
        BASE = "USD"

        [ASSETS.USD]
        kind = "cash"
        rate = 0.02

        [ASSETS.SPX]
        kind = "asset"
        spot = 100.0
        table = [[1.0, 101.0], [2.0, 102.0]]

        [PARAMS]
        VOLATILITY = 0.2
    "#;

    #[test]
    fn test_from_toml_builds_market() {
        let dataset = Dataset::from_toml_str(BASIC).unwrap();
        let market = dataset.market();
        assert_eq!(market.kind("USD"), Some(UnitKind::Cash));
        assert_eq!(market.kind("SPX"), Some(UnitKind::Asset));
        let spx = market.provider("SPX").unwrap();
        assert_relative_eq!(spx.forward(1.0).unwrap(), 101.0, epsilon = 1e-10);
        assert_relative_eq!(spx.discount(1.0).unwrap(), (-0.02_f64).exp(), epsilon = 1e-12);
        assert_eq!(dataset.param("VOLATILITY"), Some(&ParamValue::Scalar(0.2)));
    }

    #[test]
    fn test_paths_bounds() {
        let zero = BASIC.replace("PATHS = 100", "PATHS = 0");
        assert!(matches!(
            Dataset::from_toml_str(&zero),
            Err(PricingError::Configuration { key, .. }) if key == "PATHS"
        ));
        let huge = BASIC.replace("PATHS = 100", "PATHS = 10000001");
        assert!(Dataset::from_toml_str(&huge).is_err());
    }

    #[test]
    fn test_timestep_domain() {
        let negative = BASIC.replace("TIMESTEP = 0.1", "TIMESTEP = -0.1");
        assert!(matches!(
            Dataset::from_toml_str(&negative),
            Err(PricingError::NumericDomain { .. })
        ));
    }

    #[test]
    fn test_base_must_be_cash() {
        let wrong = BASIC.replace("BASE = \"USD\"", "BASE = \"SPX\"");
        assert!(matches!(
            Dataset::from_toml_str(&wrong),
            Err(PricingError::Configuration { key, .. }) if key == "BASE"
        ));
        let missing = BASIC.replace("BASE = \"USD\"", "BASE = \"EUR\"");
        assert!(Dataset::from_toml_str(&missing).is_err());
    }

    #[test]
    fn test_second_cash_entry_rejected() {
        let source = format!("{}\n[ASSETS.EUR]\nkind = \"cash\"\nrate = 0.01\n", BASIC);
        assert!(matches!(
            Dataset::from_toml_str(&source),
            Err(PricingError::Configuration { key, .. }) if key == "ASSETS.EUR"
        ));
    }

    #[test]
    fn test_curve_alternatives_exclusive() {
        let both = BASIC.replace("rate = 0.02", "rate = 0.02\ntable = [[1.0, 0.98]]");
        assert!(Dataset::from_toml_str(&both).is_err());
        let neither = BASIC.replace("rate = 0.02", "");
        assert!(Dataset::from_toml_str(&neither).is_err());
    }

    #[test]
    fn test_bad_pillars_rejected() {
        let unsorted = BASIC.replace("[[1.0, 101.0], [2.0, 102.0]]", "[[2.0, 101.0], [1.0, 102.0]]");
        assert!(matches!(
            Dataset::from_toml_str(&unsorted),
            Err(PricingError::Configuration { .. })
        ));
        let negative = BASIC.replace("[[1.0, 101.0], [2.0, 102.0]]", "[[1.0, -101.0]]");
        assert!(matches!(
            Dataset::from_toml_str(&negative),
            Err(PricingError::NumericDomain { .. })
        ));
        let empty = BASIC.replace("[[1.0, 101.0], [2.0, 102.0]]", "[]");
        assert!(Dataset::from_toml_str(&empty).is_err());
    }

    #[test]
    fn test_bad_spot_rejected() {
        let source = BASIC.replace("spot = 100.0", "spot = 0.0");
        assert!(matches!(
            Dataset::from_toml_str(&source),
            Err(PricingError::NumericDomain { .. })
        ));
    }

    #[test]
    fn test_malformed_source_is_configuration_error() {
        assert!(matches!(
            Dataset::from_toml_str("PATHS = \"many\""),
            Err(PricingError::Configuration { key, .. }) if key == "dataset"
        ));
        assert!(matches!(
            Dataset::from_json_str("{"),
            Err(PricingError::Configuration { .. })
        ));
    }

    #[test]
    fn test_adjusted_copies_share_market() {
        let dataset = Dataset::from_toml_str(BASIC).unwrap();
        let reseeded = dataset.with_seed(11);
        assert_eq!(reseeded.seed(), 11);
        assert_eq!(reseeded.paths(), 100);
        assert!(std::ptr::eq(dataset.market(), reseeded.market()));

        let bigger = dataset.with_paths(400).unwrap();
        assert_eq!(bigger.paths(), 400);
        assert_eq!(bigger.seed(), 3);
        assert!(dataset.with_paths(0).is_err());
    }

    #[test]
    fn test_with_flag() {
        let dataset = Dataset::from_toml_str(BASIC).unwrap();
        assert!(!dataset.has_flag(Flag::RawPv));
        let flagged = dataset.with_flag(Flag::RawPv).with_flag(Flag::RawPv);
        assert_eq!(flagged.flags(), &[Flag::RawPv]);
    }
}
