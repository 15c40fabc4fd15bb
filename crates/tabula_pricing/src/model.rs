//! Pricing entry point.

use std::collections::BTreeMap;
use std::marker::PhantomData;

use rayon::prelude::*;
use tabula_core::market_data::MarketDataError;
use tabula_core::types::{PricingError, Result};
use tabula_models::dataset::{Dataset, Flag};
use tabula_models::process::{LognormalState, ProcessState};
use tabula_models::timetable::Timetable;
use tracing::{debug, info, info_span};

use crate::grid::TimeGrid;
use crate::ledger::Ledger;
use crate::stats::{PricingResult, PricingStats, Summary};
use crate::walker::TimetableWalker;

/// Monte Carlo model: a process state type bound to the pricing pipeline.
///
/// `Model<S>` is a zero-sized marker; pricing is a pure function of the
/// timetable, the dataset and `S`.
///
/// # Examples
///
/// ```rust
/// use tabula_models::dataset::Dataset;
/// use tabula_models::timetable::{Event, Op, Timetable};
/// use tabula_pricing::LognormalModel;
///
/// let timetable = Timetable::new(vec![
///     Event::new("", 1.0, Op::Add, 1.0, "SPX"),
///     Event::new("", 1.0, Op::Add, -2800.0, "USD"),
///     Event::new("", 1.0, Op::Floor, 0.0, "USD"),
/// ])
/// .unwrap();
///
/// let dataset = Dataset::builder()
///     .paths(20_000)
///     .timestep(1.0 / 52.0)
///     .seed(1)
///     .base_rate("USD", 0.0)
///     .asset("SPX", 2900.0, 0.0)
///     .volatility(0.175)
///     .build()
///     .unwrap();
///
/// let result = LognormalModel::price(&timetable, &dataset).unwrap();
/// assert!((result.price - 252.69).abs() < 5.0 * result.std_error);
/// ```
pub struct Model<S: ProcessState> {
    _state: PhantomData<fn() -> S>,
}

/// Model with independent lognormal assets.
pub type LognormalModel = Model<LognormalState>;

impl<S: ProcessState> Model<S> {
    /// Price `timetable` under `dataset`.
    ///
    /// 1. Check every timetable unit against the market data
    /// 2. Build the time grid and initialise the process state
    /// 3. Walk the grid, accumulating discounted flows per track
    /// 4. Reduce the main track to price and standard error
    ///
    /// # Errors
    ///
    /// Configuration errors are raised before any path is simulated; all
    /// errors propagate unchanged and no partial result is returned.
    pub fn price(timetable: &Timetable, dataset: &Dataset) -> Result<PricingResult> {
        let span = info_span!(
            "price",
            model = S::model_name(),
            paths = dataset.paths(),
            seed = dataset.seed()
        );
        let _enter = span.enter();

        let grid = Self::prepare(timetable, dataset)?;
        let mut state = S::initialize(timetable, dataset)?;
        let mut ledger = Ledger::new(timetable.tracks().len(), dataset.paths());
        debug!(
            n_events = timetable.len(),
            n_tracks = ledger.n_tracks(),
            n_grid_points = grid.len(),
            "walking timetable"
        );

        TimetableWalker::new(timetable, dataset.market(), &grid).run(&mut state, &mut ledger)?;
        drop(state);

        let mut tracks = ledger.into_tracks().into_iter();
        // Track 0 is the main track and always exists.
        let main = tracks.next().unwrap_or_default();
        let summary = Summary::from_values(&main);

        let track_vectors = dataset.has_flag(Flag::RawTracks).then(|| {
            timetable
                .tracks()
                .iter()
                .skip(1)
                .cloned()
                .zip(tracks)
                .collect::<BTreeMap<_, _>>()
        });
        let pv_vec = dataset.has_flag(Flag::RawPv).then_some(main);

        info!(
            price = summary.mean,
            std_error = summary.std_error,
            "pricing complete"
        );

        Ok(PricingResult {
            price: summary.mean,
            std_error: summary.std_error,
            stats: PricingStats {
                mean: summary.mean,
                std_error: summary.std_error,
                std_dev: summary.std_dev,
                n_paths: dataset.paths(),
                n_grid_points: grid.len(),
                n_events: timetable.len(),
                pv_vec,
                track_vectors,
            },
        })
    }

    /// Validate `timetable` against `dataset` and build the time grid.
    ///
    /// Performs every check `price` makes before simulating: each unit must
    /// be defined in the market data and the grid must fit its limit.
    pub fn prepare(timetable: &Timetable, dataset: &Dataset) -> Result<TimeGrid> {
        dataset
            .market()
            .validate_units(timetable.units())
            .map_err(|err| match err {
                MarketDataError::UnknownUnit { unit } => PricingError::configuration(
                    format!("ASSETS.{}", unit),
                    "unit referenced by the timetable is not in the market data",
                ),
                other => other.into(),
            })?;
        TimeGrid::build(&timetable.event_times(), dataset.timestep())
    }

    /// Price `timetable` under each dataset in parallel.
    ///
    /// Runs are independent; results are in the order of `datasets`.
    pub fn price_batch(timetable: &Timetable, datasets: &[Dataset]) -> Vec<Result<PricingResult>> {
        datasets
            .par_iter()
            .map(|dataset| Self::price(timetable, dataset))
            .collect()
    }
}
