//! Serialised dataset layout.
//!
//! Keys are upper case on the wire:
//!
//! ```toml
//! PATHS = 100000
//! TIMESTEP = 0.004
//! SEED = 1
//! FLAGS = ["RAW_PV"]
//! BASE = "USD"
//!
//! [ASSETS.USD]
//! kind = "cash"
//! rate = 0.0
//!
//! [ASSETS.SPX]
//! kind = "asset"
//! spot = 2900.0
//! growth = 0.0
//!
//! [PARAMS]
//! VOLATILITY = 0.175
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Optional outputs requested from a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Flag {
    /// Attach the main track's per-path present values.
    RawPv,
    /// Attach every non-main track's final per-path vector.
    RawTracks,
}

/// One `ASSETS` entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum AssetSpec {
    /// Numeraire currency.
    Cash {
        /// Flat continuously compounded discount rate.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        rate: Option<f64>,
        /// Discount factor pillars `[t, df]`.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        table: Option<Vec<[f64; 2]>>,
    },
    /// Traded asset.
    Asset {
        /// Value at time zero.
        spot: f64,
        /// Flat carry rate: `F(t) = spot * exp(growth * t)`.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        growth: Option<f64>,
        /// Forward pillars `[t, F(t)]`.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        table: Option<Vec<[f64; 2]>>,
    },
}

/// Model parameter: one value for every unit, or a per-unit table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    /// Value shared by every unit.
    Scalar(f64),
    /// Value per unit name.
    Table(BTreeMap<String, f64>),
}

impl ParamValue {
    /// Value that applies to `unit`.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::collections::BTreeMap;
    /// use tabula_models::dataset::ParamValue;
    ///
    /// assert_eq!(ParamValue::Scalar(0.2).for_unit("SPX"), Some(0.2));
    ///
    /// let table = ParamValue::Table(BTreeMap::from([("SPX".to_string(), 0.15)]));
    /// assert_eq!(table.for_unit("SPX"), Some(0.15));
    /// assert_eq!(table.for_unit("NDX"), None);
    /// ```
    pub fn for_unit(&self, unit: &str) -> Option<f64> {
        match self {
            ParamValue::Scalar(value) => Some(*value),
            ParamValue::Table(values) => values.get(unit).copied(),
        }
    }
}

impl From<f64> for ParamValue {
    fn from(value: f64) -> Self {
        ParamValue::Scalar(value)
    }
}

/// Dataset as read from TOML or JSON, before validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE", deny_unknown_fields)]
pub struct DatasetSpec {
    /// Number of simulated paths.
    pub paths: usize,
    /// Maximum simulation step in years.
    pub timestep: f64,
    /// Run seed.
    #[serde(default)]
    pub seed: u64,
    /// Optional outputs.
    #[serde(default)]
    pub flags: Vec<Flag>,
    /// Numeraire currency; must name a cash entry.
    pub base: String,
    /// Market data per unit.
    pub assets: BTreeMap<String, AssetSpec>,
    /// Model parameters.
    #[serde(default)]
    pub params: BTreeMap<String, ParamValue>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toml_layout() {
        let spec: DatasetSpec = toml::from_str(
            r#"
            PATHS = 1000
            TIMESTEP = 0.01
            SEED = 7
            FLAGS = ["RAW_PV", "RAW_TRACKS"]
            BASE = "USD"

            [ASSETS.USD]
            kind = "cash"
            table = [[1.0, 0.99], [2.0, 0.97]]

            [ASSETS.SPX]
            kind = "asset"
            spot = 2900.0
            growth = 0.01

            [PARAMS]
            VOLATILITY = { SPX = 0.175 }
            "#,
        )
        .unwrap();
        assert_eq!(spec.paths, 1000);
        assert_eq!(spec.seed, 7);
        assert_eq!(spec.flags, vec![Flag::RawPv, Flag::RawTracks]);
        assert_eq!(
            spec.assets["USD"],
            AssetSpec::Cash {
                rate: None,
                table: Some(vec![[1.0, 0.99], [2.0, 0.97]])
            }
        );
        assert_eq!(spec.params["VOLATILITY"].for_unit("SPX"), Some(0.175));
    }

    #[test]
    fn test_json_layout_defaults() {
        let spec: DatasetSpec = serde_json::from_str(
            r#"{
                "PATHS": 10,
                "TIMESTEP": 0.5,
                "BASE": "EUR",
                "ASSETS": {"EUR": {"kind": "cash", "rate": 0.02}}
            }"#,
        )
        .unwrap();
        assert_eq!(spec.seed, 0);
        assert!(spec.flags.is_empty());
        assert!(spec.params.is_empty());
    }

    #[test]
    fn test_unknown_key_rejected() {
        let result: Result<DatasetSpec, _> = serde_json::from_str(
            r#"{"PATHS": 10, "TIMESTEP": 0.5, "BASE": "EUR", "ASSETS": {}, "STEPS": 3}"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_unknown_flag_rejected() {
        let result: Result<DatasetSpec, _> = serde_json::from_str(
            r#"{"PATHS": 10, "TIMESTEP": 0.5, "BASE": "EUR", "ASSETS": {}, "FLAGS": ["PLOT"]}"#,
        );
        assert!(result.is_err());
    }
}
