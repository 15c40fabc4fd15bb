//! # tabula_pricing: Monte Carlo Timetable Engine (L3)
//!
//! Prices a contract timetable by simulation:
//!
//! 1. [`grid::TimeGrid`] merges event times with regular steps
//! 2. A [`ProcessState`](tabula_models::process::ProcessState) is advanced
//!    along the grid
//! 3. [`walker::TimetableWalker`] evaluates due events into the
//!    [`ledger::Ledger`]
//! 4. [`stats`] reduces the main track to a price and standard error
//!
//! [`Model::price`] runs the whole pipeline.
//!
//! ## Concurrency
//!
//! A run is single-threaded in control flow. Path work is split into fixed
//! blocks processed with rayon, and all reductions run in path order, so
//! results do not depend on the number of threads.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod grid;
pub mod ledger;
pub mod model;
pub mod stats;
pub mod walker;

pub use model::{LognormalModel, Model};
pub use stats::{PricingResult, PricingStats};
