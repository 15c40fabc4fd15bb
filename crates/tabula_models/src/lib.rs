//! # tabula_models: Contracts, Configuration and Process Models (L2)
//!
//! This crate provides:
//! - The event timetable a contract is expressed in (`timetable`)
//! - Immutable per-run configuration and market data (`dataset`)
//! - Seeded random streams for path blocks (`rng`)
//! - The [`ProcessState`](process::ProcessState) contract and the lognormal
//!   state (`process`)
//! - Closed-form Black prices used as references (`analytical`)
//!
//! ## Example
//!
//! ```
//! use tabula_models::dataset::Dataset;
//! use tabula_models::timetable::{Event, Op, Timetable};
//!
//! let timetable = Timetable::new(vec![
//!     Event::new("", 1.0, Op::Add, 1.0, "SPX"),
//!     Event::new("", 1.0, Op::Add, -2800.0, "USD"),
//! ])
//! .unwrap();
//! assert_eq!(timetable.final_time(), 1.0);
//!
//! let dataset = Dataset::builder()
//!     .paths(1_000)
//!     .timestep(1.0 / 250.0)
//!     .seed(1)
//!     .base_rate("USD", 0.0)
//!     .asset("SPX", 2900.0, 0.0)
//!     .volatility(0.175)
//!     .build()
//!     .unwrap();
//! assert_eq!(dataset.paths(), 1_000);
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod analytical;
pub mod dataset;
pub mod process;
pub mod rng;
pub mod timetable;
