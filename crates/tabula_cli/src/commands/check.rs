//! Check command implementation
//!
//! Validates a dataset and timetable the same way `price` does, including
//! grid construction, but stops before any simulation.

use std::path::Path;

use tabula_pricing::LognormalModel;
use tracing::info;

use super::{load_dataset, load_timetable};
use crate::Result;

/// Summary of validated inputs.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckReport {
    pub events: usize,
    pub tracks: usize,
    pub units: Vec<String>,
    pub grid_points: usize,
    pub final_time: f64,
}

/// Run the check command
pub fn run(dataset: &Path, timetable: &Path) -> Result<()> {
    let report = check(dataset, timetable)?;
    println!("Inputs OK");
    println!("  Events:      {}", report.events);
    println!("  Tracks:      {}", report.tracks);
    println!("  Units:       {}", report.units.join(", "));
    println!("  Grid points: {}", report.grid_points);
    println!("  Final time:  {}", report.final_time);
    Ok(())
}

/// Validate inputs and summarise them.
pub fn check(dataset: &Path, timetable: &Path) -> Result<CheckReport> {
    let dataset = load_dataset(dataset)?;
    let timetable = load_timetable(timetable)?;

    let grid = LognormalModel::prepare(&timetable, &dataset)?;
    info!(grid_points = grid.len(), "inputs validated");

    Ok(CheckReport {
        events: timetable.len(),
        tracks: timetable.tracks().len(),
        units: timetable.units().into_iter().map(str::to_string).collect(),
        grid_points: grid.len(),
        final_time: timetable.final_time(),
    })
}
