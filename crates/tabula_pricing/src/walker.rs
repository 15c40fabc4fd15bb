//! Timetable walker.
//!
//! Steps a process state along the time grid and, at each grid time,
//! evaluates every due event into the ledger in timetable order.

use tabula_core::market_data::{ForwardProvider, MarketData};
use tabula_core::types::{PricingError, Result};
use tabula_models::process::ProcessState;
use tabula_models::timetable::{Event, Quantity, Timetable};
use tracing::trace;

use crate::grid::TimeGrid;
use crate::ledger::Ledger;

/// Evaluates a timetable against a process state.
///
/// For an event with quantity `q` in unit `u` at time `t`, the discounted
/// flow on path `i` is `df(t) * q * u_i`, where `u_i` is the state's value
/// of the unit or, for units the state does not simulate, the provider
/// forward `forward(t)`. A track-valued quantity `{"track": X}` evaluates to
/// `ledger[X]_i / df(t)`, so its flow is `ledger[X]_i * u_i`.
#[derive(Debug, Clone, Copy)]
pub struct TimetableWalker<'a> {
    timetable: &'a Timetable,
    market: &'a MarketData,
    grid: &'a TimeGrid,
}

impl<'a> TimetableWalker<'a> {
    /// Create a walker over `grid`.
    pub fn new(timetable: &'a Timetable, market: &'a MarketData, grid: &'a TimeGrid) -> Self {
        Self {
            timetable,
            market,
            grid,
        }
    }

    /// Walk `state` to the final event, accumulating into `ledger`.
    ///
    /// # Errors
    ///
    /// Propagates state, provider and sequencing errors unchanged.
    pub fn run<S: ProcessState>(&self, state: &mut S, ledger: &mut Ledger) -> Result<()> {
        let events = self.timetable.events();
        let mut flows = vec![0.0; state.n_paths()];
        let mut cursor = 0;

        for &time in self.grid.times() {
            state.advance(time)?;
            while cursor < events.len() && events[cursor].time <= time {
                self.evaluate(cursor, &events[cursor], state, ledger, &mut flows)?;
                cursor += 1;
            }
        }

        if cursor != events.len() {
            return Err(PricingError::sequencing(
                events[cursor].time,
                "event beyond the end of the time grid",
            ));
        }
        Ok(())
    }

    fn evaluate<S: ProcessState>(
        &self,
        position: usize,
        event: &Event,
        state: &S,
        ledger: &mut Ledger,
        flows: &mut [f64],
    ) -> Result<()> {
        let provider = self.market.provider(&event.unit)?;
        let df = provider.discount(event.time)?;
        let simulated = state.value(&event.unit);
        let slot = self.timetable.slot(position);

        match (&event.quantity, slot.reference) {
            (Quantity::Constant(q), _) => {
                let scale = df * q;
                match simulated {
                    Some(values) => {
                        for (flow, &u) in flows.iter_mut().zip(values) {
                            *flow = scale * u;
                        }
                    }
                    None => flows.fill(scale * provider.forward(event.time)?),
                }
            }
            (Quantity::Track { track }, Some(reference)) => {
                if ledger.writes(reference) != self.timetable.write_count(reference) {
                    return Err(PricingError::sequencing(
                        event.time,
                        format!("track '{}' is read before its last write", track),
                    ));
                }
                let referenced = ledger.track(reference);
                match simulated {
                    Some(values) => {
                        for ((flow, &x), &u) in flows.iter_mut().zip(referenced).zip(values) {
                            *flow = x * u;
                        }
                    }
                    None => {
                        let forward = provider.forward(event.time)?;
                        for (flow, &x) in flows.iter_mut().zip(referenced) {
                            *flow = x * forward;
                        }
                    }
                }
            }
            (Quantity::Track { track }, None) => {
                return Err(PricingError::configuration(
                    format!("track '{}'", track),
                    "unresolved track reference",
                ));
            }
        }

        trace!(
            position,
            time = event.time,
            track = %event.track,
            op = %event.op,
            unit = %event.unit,
            "event evaluated"
        );
        ledger.apply(slot.track, event.time, event.op, flows);
        Ok(())
    }
}
