//! Contract timetables.
//!
//! A contract is a list of [`Event`]s. [`Timetable`] validates the list,
//! orders it by time and resolves track names so the walker can evaluate it
//! without lookups.

mod event;
mod schedule;

pub use event::{Event, Op, Quantity, MAIN_TRACK};
pub use schedule::{EventSlot, Timetable};
