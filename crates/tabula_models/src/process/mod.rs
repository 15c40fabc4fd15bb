//! Process state contract and implementations.
//!
//! A [`ProcessState`] holds, for every path of one run, the current value of
//! each simulated unit. It is created per `price` call, moved forward in time
//! by the walker and dropped at the end of the call.
//!
//! ## Design Philosophy
//!
//! - **Static dispatch**: the engine is generic over the state type
//! - **Owned buffers**: one contiguous `Vec<f64>` per simulated unit
//! - **Per-run randomness**: streams are seeded from the dataset, never global

mod lognormal;

pub use lognormal::LognormalState;

use tabula_core::types::Result;

use crate::dataset::Dataset;
use crate::timetable::Timetable;

/// Steps shorter than this are treated as zero-length.
pub const STEP_EPSILON: f64 = 1e-10;

/// Number of paths sharing one random stream.
///
/// Fixed independently of thread count so draws are reproducible.
pub const PATH_BLOCK: usize = 1024;

/// Per-path simulation state of a stochastic model.
///
/// # Contract
///
/// - [`initialize`](ProcessState::initialize): one path per `dataset.paths()`,
///   streams seeded from `dataset.seed()`, time zero
/// - [`advance`](ProcessState::advance): one step to `new_time`; a step
///   shorter than [`STEP_EPSILON`] consumes no randomness
/// - [`value`](ProcessState::value): `None` for units the state does not
///   simulate, telling the caller to use the static forward
pub trait ProcessState: Sized + Send {
    /// Short model identifier used in logs.
    fn model_name() -> &'static str;

    /// Build the state for `timetable` from `dataset`.
    ///
    /// # Errors
    ///
    /// `Configuration` or `NumericDomain` if model parameters are missing or
    /// invalid.
    fn initialize(timetable: &Timetable, dataset: &Dataset) -> Result<Self>;

    /// Move every path to `new_time`.
    ///
    /// # Errors
    ///
    /// `Sequencing` if `new_time` is earlier than the current time.
    fn advance(&mut self, new_time: f64) -> Result<()>;

    /// Per-path values of `unit`, if simulated.
    fn value(&self, unit: &str) -> Option<&[f64]>;

    /// Current simulation time.
    fn time(&self) -> f64;

    /// Number of paths.
    fn n_paths(&self) -> usize;
}
