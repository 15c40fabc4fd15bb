//! Lognormal (Black-Scholes) process state.

use std::sync::Arc;

use rayon::prelude::*;
use tabula_core::market_data::{ForwardProvider, MarketData, UnitKind};
use tabula_core::types::{PricingError, Result};
use tracing::debug;

use super::{ProcessState, PATH_BLOCK, STEP_EPSILON};
use crate::dataset::Dataset;
use crate::rng::{unit_stream_key, PricerRng};
use crate::timetable::Timetable;

/// Parameter holding per-asset volatilities.
const VOLATILITY: &str = "VOLATILITY";

/// One simulated asset.
#[derive(Debug)]
struct AssetPaths {
    name: String,
    forward0: f64,
    volatility: f64,
    log_move: Vec<f64>,
    values: Vec<f64>,
    normals: Vec<f64>,
    streams: Vec<PricerRng>,
}

/// Independent lognormal paths for every asset in the timetable.
///
/// Per asset, the log-move `X` starts at zero and a step from `t` to `t'`
/// applies
///
/// ```text
/// X += ln(rate(t', t)) - vol² dt / 2 + vol √dt Z,   Z ~ N(0, 1)
/// ```
///
/// with `value = forward(0) * exp(X)`, so the mean of `value(t)` is the
/// provider forward at `t`. Cash units are never simulated.
///
/// Paths are split into blocks of [`PATH_BLOCK`]; each (asset, block) pair
/// draws from its own stream, keyed by the asset name, and blocks are
/// advanced in parallel.
#[derive(Debug)]
pub struct LognormalState {
    time: f64,
    n_paths: usize,
    market: Arc<MarketData>,
    assets: Vec<AssetPaths>,
}

impl LognormalState {
    /// Names of the simulated assets.
    pub fn simulated_units(&self) -> impl Iterator<Item = &str> {
        self.assets.iter().map(|a| a.name.as_str())
    }

    fn volatility(dataset: &Dataset, unit: &str) -> Result<f64> {
        let param = dataset.param(VOLATILITY).ok_or_else(|| {
            PricingError::configuration(
                format!("PARAMS.{}", VOLATILITY),
                "required by the lognormal model",
            )
        })?;
        let vol = param.for_unit(unit).ok_or_else(|| {
            PricingError::configuration(
                format!("PARAMS.{}.{}", VOLATILITY, unit),
                "no volatility for simulated asset",
            )
        })?;
        if !vol.is_finite() || vol < 0.0 {
            return Err(PricingError::numeric_domain(
                format!("PARAMS.{}.{}", VOLATILITY, unit),
                vol,
                "must be finite and non-negative",
            ));
        }
        Ok(vol)
    }
}

impl ProcessState for LognormalState {
    fn model_name() -> &'static str {
        "lognormal"
    }

    fn initialize(timetable: &Timetable, dataset: &Dataset) -> Result<Self> {
        let market = dataset.market_handle();
        let n_paths = dataset.paths();
        let n_blocks = n_paths.div_ceil(PATH_BLOCK);

        let mut assets = Vec::new();
        for unit in timetable.units() {
            if market.kind(unit) != Some(UnitKind::Asset) {
                continue;
            }
            let volatility = Self::volatility(dataset, unit)?;
            let forward0 = market.provider(unit)?.forward(0.0)?;
            let asset_key = unit_stream_key(unit);
            let streams = (0..n_blocks as u64)
                .map(|block| PricerRng::for_block(dataset.seed(), asset_key, block))
                .collect();
            assets.push(AssetPaths {
                name: unit.to_string(),
                forward0,
                volatility,
                log_move: vec![0.0; n_paths],
                values: vec![forward0; n_paths],
                normals: vec![0.0; n_paths],
                streams,
            });
        }

        debug!(
            model = Self::model_name(),
            n_paths,
            n_blocks,
            n_assets = assets.len(),
            "process state initialised"
        );

        Ok(Self {
            time: 0.0,
            n_paths,
            market,
            assets,
        })
    }

    fn advance(&mut self, new_time: f64) -> Result<()> {
        if !new_time.is_finite() {
            return Err(PricingError::numeric_domain(
                "time",
                new_time,
                "must be finite",
            ));
        }
        let dt = new_time - self.time;
        if dt < 0.0 {
            return Err(PricingError::sequencing(
                new_time,
                format!("cannot step back from t = {}", self.time),
            ));
        }
        if dt < STEP_EPSILON {
            return Ok(());
        }

        let sqrt_dt = dt.sqrt();
        for asset in &mut self.assets {
            let growth = self.market.provider(&asset.name)?.rate(new_time, self.time)?;
            if !(growth.is_finite() && growth > 0.0) {
                return Err(PricingError::numeric_domain(
                    format!("rate({}, {}, {})", asset.name, new_time, self.time),
                    growth,
                    "growth factor must be finite and positive",
                ));
            }
            let vol = asset.volatility;
            let drift = growth.ln() - 0.5 * vol * vol * dt;
            let diffusion = vol * sqrt_dt;
            let forward0 = asset.forward0;

            asset
                .log_move
                .par_chunks_mut(PATH_BLOCK)
                .zip(asset.values.par_chunks_mut(PATH_BLOCK))
                .zip(asset.normals.par_chunks_mut(PATH_BLOCK))
                .zip(asset.streams.par_iter_mut())
                .for_each(|(((log_move, values), normals), rng)| {
                    rng.fill_normal(normals);
                    let steps = log_move.iter_mut().zip(values.iter_mut()).zip(normals.iter());
                    for ((x, value), &z) in steps {
                        *x += drift + diffusion * z;
                        *value = forward0 * x.exp();
                    }
                });
        }

        self.time = new_time;
        Ok(())
    }

    fn value(&self, unit: &str) -> Option<&[f64]> {
        self.assets
            .iter()
            .find(|a| a.name == unit)
            .map(|a| a.values.as_slice())
    }

    #[inline]
    fn time(&self) -> f64 {
        self.time
    }

    #[inline]
    fn n_paths(&self) -> usize {
        self.n_paths
    }
}
