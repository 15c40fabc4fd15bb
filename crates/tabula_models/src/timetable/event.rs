//! Timetable events: the records a contract is written in.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tabula_core::types::PricingError;

/// Name of the main ledger track.
///
/// Events with an empty (or omitted) track accumulate into the main track,
/// whose final per-path vector is the price sample.
pub const MAIN_TRACK: &str = "";

/// Combination operator of an event.
///
/// Each operator is a pure function `combine(ledger_i, flow_i)` applied per
/// path, where `flow_i` is the discounted flow of the event on path `i`.
///
/// # Wire format
///
/// `"+"`, `">"` and `"<"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Op {
    /// Add the discounted flow to the ledger.
    #[serde(rename = "+")]
    Add,
    /// Replace the ledger with the element-wise maximum of ledger and flow.
    #[serde(rename = ">")]
    Floor,
    /// Replace the ledger with the element-wise minimum of ledger and flow.
    #[serde(rename = "<")]
    Cap,
}

impl Op {
    /// Apply the operator to one path.
    ///
    /// # Examples
    ///
    /// ```
    /// use tabula_models::timetable::Op;
    ///
    /// assert_eq!(Op::Add.combine(1.0, 2.0), 3.0);
    /// assert_eq!(Op::Floor.combine(1.0, 2.0), 2.0);
    /// assert_eq!(Op::Cap.combine(1.0, 2.0), 1.0);
    /// ```
    #[inline]
    pub fn combine(self, ledger: f64, flow: f64) -> f64 {
        match self {
            Op::Add => ledger + flow,
            Op::Floor => ledger.max(flow),
            Op::Cap => ledger.min(flow),
        }
    }

    /// Wire symbol of the operator.
    #[inline]
    pub fn symbol(self) -> &'static str {
        match self {
            Op::Add => "+",
            Op::Floor => ">",
            Op::Cap => "<",
        }
    }
}

impl fmt::Display for Op {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for Op {
    type Err = PricingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "+" => Ok(Op::Add),
            ">" => Ok(Op::Floor),
            "<" => Ok(Op::Cap),
            other => Err(PricingError::configuration(
                "op",
                format!("unknown operator '{}', expected one of + > <", other),
            )),
        }
    }
}

/// Multiplier applied to the unit value of an event.
///
/// Serialised untagged: a bare number for a literal, `{"track": "<name>"}`
/// for a reference to another track's per-path value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Quantity {
    /// Literal multiplier, identical on every path.
    Constant(f64),
    /// Per-path value of another track, re-expressed at the event time.
    Track {
        /// Referenced track name
        track: String,
    },
}

impl Quantity {
    /// Reference to `track`.
    pub fn track(track: impl Into<String>) -> Self {
        Quantity::Track {
            track: track.into(),
        }
    }

    /// Referenced track, if any.
    #[inline]
    pub fn referenced_track(&self) -> Option<&str> {
        match self {
            Quantity::Constant(_) => None,
            Quantity::Track { track } => Some(track),
        }
    }
}

impl From<f64> for Quantity {
    #[inline]
    fn from(value: f64) -> Self {
        Quantity::Constant(value)
    }
}

/// One timetable record `{track, time, op, quantity, unit}`.
///
/// # Examples
///
/// ```
/// use tabula_models::timetable::{Event, Op, Quantity};
///
/// let event: Event = serde_json::from_str(
///     r#"{"time": 1.0, "op": ">", "quantity": 0.0, "unit": "USD"}"#,
/// ).unwrap();
/// assert_eq!(event.track, "");
/// assert_eq!(event.op, Op::Floor);
/// assert_eq!(event.quantity, Quantity::Constant(0.0));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    /// Ledger track written by the event; empty for the main track.
    #[serde(default)]
    pub track: String,
    /// Simulation time in years.
    pub time: f64,
    /// Combination operator.
    pub op: Op,
    /// Multiplier of the unit value.
    pub quantity: Quantity,
    /// Currency or asset identifier.
    pub unit: String,
}

impl Event {
    /// Create an event.
    pub fn new(
        track: impl Into<String>,
        time: f64,
        op: Op,
        quantity: impl Into<Quantity>,
        unit: impl Into<String>,
    ) -> Self {
        Self {
            track: track.into(),
            time,
            op,
            quantity: quantity.into(),
            unit: unit.into(),
        }
    }

    /// Returns true if the event writes the main track.
    #[inline]
    pub fn is_main(&self) -> bool {
        self.track == MAIN_TRACK
    }
}
