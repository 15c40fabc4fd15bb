//! Per-run configuration.
//!
//! A [`Dataset`] is read from a TOML or JSON [`DatasetSpec`] or assembled
//! with [`Dataset::builder`], and validated once on construction. It owns
//! the market data set shared by every process state built from it.

mod builder;
mod config;
mod schema;

pub use builder::DatasetBuilder;
pub use config::{Dataset, MAX_PATHS};
pub use schema::{AssetSpec, DatasetSpec, Flag, ParamValue};
