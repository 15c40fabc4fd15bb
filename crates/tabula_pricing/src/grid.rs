//! Simulation time grid.

use tabula_core::types::{PricingError, Result};
use tabula_models::process::STEP_EPSILON;
use tracing::debug;

/// Upper bound on the number of grid points of one run.
pub const MAX_GRID_POINTS: usize = 1_000_000;

/// Strictly increasing simulation times of one run.
///
/// The grid is the union of the distinct event times and the regular steps
/// `k * timestep` (`k >= 1`) strictly before the final event. A regular step
/// closer than [`STEP_EPSILON`] to an event time is dropped, so every event
/// time is on the grid exactly and no zero-length step occurs.
///
/// # Examples
///
/// ```
/// use tabula_pricing::grid::TimeGrid;
///
/// let grid = TimeGrid::build(&[0.0, 0.25, 1.0], 0.4).unwrap();
/// assert_eq!(grid.times(), &[0.0, 0.25, 0.4, 0.8, 1.0]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct TimeGrid {
    times: Vec<f64>,
}

impl TimeGrid {
    /// Merge sorted distinct `event_times` with regular steps of `timestep`.
    ///
    /// # Errors
    ///
    /// - `Configuration` if the grid would exceed [`MAX_GRID_POINTS`]
    /// - `NumericDomain` for a non-positive timestep
    pub fn build(event_times: &[f64], timestep: f64) -> Result<Self> {
        if !timestep.is_finite() || timestep <= 0.0 {
            return Err(PricingError::numeric_domain(
                "TIMESTEP",
                timestep,
                "must be finite and positive",
            ));
        }
        let final_time = event_times.last().copied().unwrap_or(0.0);
        let n_steps = (final_time / timestep).ceil();
        if n_steps + event_times.len() as f64 > MAX_GRID_POINTS as f64 {
            return Err(PricingError::configuration(
                "TIMESTEP",
                format!(
                    "{} is too fine for a final time of {}: grid limited to {} points",
                    timestep, final_time, MAX_GRID_POINTS
                ),
            ));
        }

        let steps: Vec<f64> = (1..)
            .map(|k| k as f64 * timestep)
            .take_while(|&t| t < final_time)
            .collect();

        let mut times = Vec::with_capacity(steps.len() + event_times.len());
        let (mut e, mut s) = (0, 0);
        while e < event_times.len() || s < steps.len() {
            if s == steps.len() || (e < event_times.len() && event_times[e] <= steps[s]) {
                times.push(event_times[e]);
                e += 1;
            } else {
                let t = steps[s];
                s += 1;
                let near_previous = e > 0 && t - event_times[e - 1] < STEP_EPSILON;
                let near_next = e < event_times.len() && event_times[e] - t < STEP_EPSILON;
                if !near_previous && !near_next {
                    times.push(t);
                }
            }
        }

        debug!(
            n_events = event_times.len(),
            n_steps = steps.len(),
            n_points = times.len(),
            final_time,
            "time grid built"
        );

        Ok(Self { times })
    }

    /// Grid times in increasing order.
    #[inline]
    pub fn times(&self) -> &[f64] {
        &self.times
    }

    /// Number of grid points.
    #[inline]
    pub fn len(&self) -> usize {
        self.times.len()
    }

    /// Returns true if the grid has no points.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_single_event_daily_steps() {
        let grid = TimeGrid::build(&[1.0], 0.25).unwrap();
        assert_eq!(grid.times(), &[0.25, 0.5, 0.75, 1.0]);
        assert_eq!(grid.len(), 4);
    }

    #[test]
    fn test_steps_near_events_dropped() {
        let grid = TimeGrid::build(&[0.5 + STEP_EPSILON / 10.0, 1.0], 0.5).unwrap();
        assert_eq!(grid.times(), &[0.5 + STEP_EPSILON / 10.0, 1.0]);
    }

    #[test]
    fn test_timestep_longer_than_horizon() {
        let grid = TimeGrid::build(&[0.1, 0.3], 1.0).unwrap();
        assert_eq!(grid.times(), &[0.1, 0.3]);
    }

    #[test]
    fn test_event_at_zero_only() {
        let grid = TimeGrid::build(&[0.0], 0.1).unwrap();
        assert_eq!(grid.times(), &[0.0]);
    }

    #[test]
    fn test_grid_limit() {
        let result = TimeGrid::build(&[100.0], 1e-5);
        assert!(matches!(result, Err(PricingError::Configuration { .. })));
    }

    #[test]
    fn test_invalid_timestep() {
        assert!(matches!(
            TimeGrid::build(&[1.0], 0.0),
            Err(PricingError::NumericDomain { .. })
        ));
    }

    proptest! {
        #[test]
        fn test_grid_strictly_increasing_and_contains_events(
            raw in prop::collection::vec(0.0..5.0_f64, 1..10),
            timestep in 0.01..1.0_f64
        ) {
            let mut events = raw;
            events.sort_by(|a, b| a.total_cmp(b));
            events.dedup();
            let grid = TimeGrid::build(&events, timestep).unwrap();
            for pair in grid.times().windows(2) {
                prop_assert!(pair[0] < pair[1]);
            }
            for t in &events {
                prop_assert!(grid.times().contains(t));
            }
            prop_assert_eq!(grid.times().last().copied(), events.last().copied());
        }
    }
}
