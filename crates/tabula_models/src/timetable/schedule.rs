//! Validated, time-ordered event timetable.

use std::collections::{BTreeSet, HashMap};
use std::io::Read;

use tabula_core::types::{PricingError, Result};

use super::event::{Event, Quantity, MAIN_TRACK};

/// Resolved track indices of one event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventSlot {
    /// Index of the written track in [`Timetable::tracks`].
    pub track: usize,
    /// Index of the referenced track, for track-valued quantities.
    pub reference: Option<usize>,
}

/// Event timetable in evaluation order.
///
/// Events are stably sorted by time on construction, so events at equal
/// times keep their declaration order. Track names are resolved to indices;
/// index 0 is always the main track.
///
/// # Examples
///
/// ```
/// use tabula_models::timetable::{Event, Op, Quantity, Timetable};
///
/// let timetable = Timetable::new(vec![
///     Event::new("", 2.0, Op::Add, Quantity::track("leg"), "USD"),
///     Event::new("leg", 1.0, Op::Add, 1.0, "SPX"),
/// ])
/// .unwrap();
///
/// assert_eq!(timetable.events()[0].track, "leg");
/// assert_eq!(timetable.tracks(), &["".to_string(), "leg".to_string()]);
/// assert_eq!(timetable.event_times(), vec![1.0, 2.0]);
/// ```
#[derive(Debug, Clone)]
pub struct Timetable {
    events: Vec<Event>,
    slots: Vec<EventSlot>,
    tracks: Vec<String>,
    write_counts: Vec<usize>,
}

impl Timetable {
    /// Validate and order `events`.
    ///
    /// # Errors
    ///
    /// - `Configuration`: empty timetable, negative or non-finite time, empty
    ///   unit, reference to a track that is never written
    /// - `NumericDomain`: non-finite literal quantity
    /// - `Sequencing`: reference evaluated before the referenced track's last
    ///   write
    pub fn new(events: Vec<Event>) -> Result<Self> {
        if events.is_empty() {
            return Err(PricingError::configuration(
                "timetable",
                "at least one event is required",
            ));
        }

        for (index, event) in events.iter().enumerate() {
            if !event.time.is_finite() || event.time < 0.0 {
                return Err(PricingError::configuration(
                    format!("events[{}].time", index),
                    format!("must be finite and non-negative, got {}", event.time),
                ));
            }
            if event.unit.is_empty() {
                return Err(PricingError::configuration(
                    format!("events[{}].unit", index),
                    "must not be empty",
                ));
            }
            if let Quantity::Constant(q) = event.quantity {
                if !q.is_finite() {
                    return Err(PricingError::numeric_domain(
                        format!("events[{}].quantity", index),
                        q,
                        "must be finite",
                    ));
                }
            }
        }

        let mut events = events;
        // -0.0 passes the sign check; fold it into 0.0 so ties stay stable.
        for event in &mut events {
            event.time += 0.0;
        }
        events.sort_by(|a, b| a.time.total_cmp(&b.time));

        let mut tracks = vec![MAIN_TRACK.to_string()];
        let mut track_ids: HashMap<String, usize> = HashMap::new();
        track_ids.insert(MAIN_TRACK.to_string(), 0);
        for event in &events {
            if !track_ids.contains_key(&event.track) {
                track_ids.insert(event.track.clone(), tracks.len());
                tracks.push(event.track.clone());
            }
        }

        let mut write_counts = vec![0usize; tracks.len()];
        let mut last_write = vec![None::<usize>; tracks.len()];
        for (position, event) in events.iter().enumerate() {
            let id = track_ids[&event.track];
            write_counts[id] += 1;
            last_write[id] = Some(position);
        }

        let mut slots = Vec::with_capacity(events.len());
        for (position, event) in events.iter().enumerate() {
            let reference = match event.quantity.referenced_track() {
                None => None,
                Some(name) => {
                    let id = match track_ids.get(name) {
                        Some(&id) if write_counts[id] > 0 => id,
                        _ => {
                            return Err(PricingError::configuration(
                                format!("track '{}'", name),
                                format!(
                                    "referenced at t = {} but never written by any event",
                                    event.time
                                ),
                            ))
                        }
                    };
                    if matches!(last_write[id], Some(last) if last >= position) {
                        return Err(PricingError::sequencing(
                            event.time,
                            format!("track '{}' is read before its last write", name),
                        ));
                    }
                    Some(id)
                }
            };
            slots.push(EventSlot {
                track: track_ids[&event.track],
                reference,
            });
        }

        Ok(Self {
            events,
            slots,
            tracks,
            write_counts,
        })
    }

    /// Parse a JSON array of events and validate it.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let events: Vec<Event> = serde_json::from_str(json)
            .map_err(|e| PricingError::configuration("timetable", e.to_string()))?;
        Self::new(events)
    }

    /// Read a JSON array of events and validate it.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let events: Vec<Event> = serde_json::from_reader(reader)
            .map_err(|e| PricingError::configuration("timetable", e.to_string()))?;
        Self::new(events)
    }

    /// Events in evaluation order.
    #[inline]
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Resolved track indices of the event at `position`.
    #[inline]
    pub fn slot(&self, position: usize) -> EventSlot {
        self.slots[position]
    }

    /// Track names; index 0 is the main track.
    #[inline]
    pub fn tracks(&self) -> &[String] {
        &self.tracks
    }

    /// Index of `track`, if any event writes it (the main track always exists).
    pub fn track_id(&self, track: &str) -> Option<usize> {
        self.tracks.iter().position(|t| t == track)
    }

    /// Number of events writing the track at `id`.
    #[inline]
    pub fn write_count(&self, id: usize) -> usize {
        self.write_counts[id]
    }

    /// Number of events.
    #[inline]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Always false: construction rejects empty timetables.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Time of the last event.
    #[inline]
    pub fn final_time(&self) -> f64 {
        self.events.last().map_or(0.0, |e| e.time)
    }

    /// Distinct event times in increasing order.
    pub fn event_times(&self) -> Vec<f64> {
        let mut times: Vec<f64> = self.events.iter().map(|e| e.time).collect();
        times.dedup();
        times
    }

    /// Distinct units in lexical order.
    pub fn units(&self) -> BTreeSet<&str> {
        self.events.iter().map(|e| e.unit.as_str()).collect()
    }
}

impl<'a> IntoIterator for &'a Timetable {
    type Item = &'a Event;
    type IntoIter = std::slice::Iter<'a, Event>;

    fn into_iter(self) -> Self::IntoIter {
        self.events.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timetable::Op;

    fn cashflow(track: &str, time: f64, quantity: f64) -> Event {
        Event::new(track, time, Op::Add, quantity, "USD")
    }

    #[test]
    fn test_stable_sort_keeps_declaration_order_on_ties() {
        let timetable = Timetable::new(vec![
            cashflow("", 2.0, 1.0),
            cashflow("", 1.0, 2.0),
            cashflow("", 1.0, 3.0),
            cashflow("", 0.0, 4.0),
        ])
        .unwrap();
        let quantities: Vec<Quantity> =
            timetable.events().iter().map(|e| e.quantity.clone()).collect();
        assert_eq!(
            quantities,
            vec![
                Quantity::Constant(4.0),
                Quantity::Constant(2.0),
                Quantity::Constant(3.0),
                Quantity::Constant(1.0)
            ]
        );
        assert_eq!(timetable.event_times(), vec![0.0, 1.0, 2.0]);
        assert_eq!(timetable.final_time(), 2.0);
    }

    #[test]
    fn test_negative_zero_time_ties_with_zero() {
        let timetable = Timetable::from_json_str(
            r#"[
                {"time": 0.0, "op": "+", "quantity": 5.0, "unit": "USD"},
                {"time": -0.0, "op": ">", "quantity": 1.0, "unit": "USD"}
            ]"#,
        )
        .unwrap();
        let ops: Vec<Op> = timetable.events().iter().map(|e| e.op).collect();
        assert_eq!(ops, vec![Op::Add, Op::Floor]);
        assert!(timetable.events()[1].time.is_sign_positive());
        assert_eq!(timetable.event_times(), vec![0.0]);
    }

    #[test]
    fn test_empty_timetable_rejected() {
        assert!(matches!(
            Timetable::new(vec![]),
            Err(PricingError::Configuration { .. })
        ));
    }

    #[test]
    fn test_invalid_time_rejected() {
        for time in [-1.0, f64::NAN, f64::INFINITY] {
            let result = Timetable::new(vec![cashflow("", time, 1.0)]);
            assert!(matches!(result, Err(PricingError::Configuration { .. })));
        }
    }

    #[test]
    fn test_empty_unit_rejected() {
        let result = Timetable::new(vec![Event::new("", 1.0, Op::Add, 1.0, "")]);
        match result {
            Err(PricingError::Configuration { key, .. }) => assert_eq!(key, "events[0].unit"),
            other => panic!("Expected Configuration, got {:?}", other),
        }
    }

    #[test]
    fn test_non_finite_quantity_rejected() {
        let result = Timetable::new(vec![cashflow("", 1.0, f64::NAN)]);
        assert!(matches!(result, Err(PricingError::NumericDomain { .. })));
    }

    #[test]
    fn test_reference_to_unwritten_track_rejected() {
        let result = Timetable::new(vec![Event::new(
            "",
            1.0,
            Op::Add,
            Quantity::track("ghost"),
            "USD",
        )]);
        assert!(matches!(result, Err(PricingError::Configuration { .. })));
    }

    #[test]
    fn test_reference_before_last_write_rejected() {
        let result = Timetable::new(vec![
            cashflow("leg", 1.0, 1.0),
            Event::new("", 1.5, Op::Add, Quantity::track("leg"), "USD"),
            cashflow("leg", 2.0, 1.0),
        ]);
        assert!(matches!(result, Err(PricingError::Sequencing { .. })));
    }

    #[test]
    fn test_reference_at_same_time_follows_declaration_order() {
        let ok = Timetable::new(vec![
            cashflow("leg", 1.0, 1.0),
            Event::new("", 1.0, Op::Add, Quantity::track("leg"), "USD"),
        ]);
        assert!(ok.is_ok());

        let late = Timetable::new(vec![
            Event::new("", 1.0, Op::Add, Quantity::track("leg"), "USD"),
            cashflow("leg", 1.0, 1.0),
        ]);
        assert!(matches!(late, Err(PricingError::Sequencing { .. })));
    }

    #[test]
    fn test_self_reference_rejected() {
        let result = Timetable::new(vec![Event::new(
            "leg",
            1.0,
            Op::Add,
            Quantity::track("leg"),
            "USD",
        )]);
        assert!(matches!(result, Err(PricingError::Sequencing { .. })));
    }

    #[test]
    fn test_slots_and_write_counts() {
        let timetable = Timetable::new(vec![
            cashflow("a", 0.5, 1.0),
            cashflow("a", 1.0, 1.0),
            Event::new("", 1.0, Op::Floor, Quantity::track("a"), "USD"),
        ])
        .unwrap();
        let a = timetable.track_id("a").unwrap();
        assert_eq!(timetable.write_count(a), 2);
        assert_eq!(timetable.write_count(0), 1);
        assert_eq!(
            timetable.slot(2),
            EventSlot {
                track: 0,
                reference: Some(a)
            }
        );
        assert_eq!(timetable.track_id("missing"), None);
    }

    #[test]
    fn test_from_json_str() {
        let timetable = Timetable::from_json_str(
            r#"[
                {"time": 1.0, "op": "+", "quantity": 1.0, "unit": "SPX"},
                {"time": 1.0, "op": "+", "quantity": -2800.0, "unit": "USD"},
                {"time": 1.0, "op": ">", "quantity": 0.0, "unit": "USD"}
            ]"#,
        )
        .unwrap();
        assert_eq!(timetable.len(), 3);
        assert_eq!(
            timetable.units().into_iter().collect::<Vec<_>>(),
            vec!["SPX", "USD"]
        );
    }

    #[test]
    fn test_from_json_str_malformed() {
        let result = Timetable::from_json_str(r#"[{"time": 1.0}]"#);
        match result {
            Err(PricingError::Configuration { key, .. }) => assert_eq!(key, "timetable"),
            other => panic!("Expected Configuration, got {:?}", other),
        }
    }
}
