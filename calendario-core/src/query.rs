//! Date-range membership queries used to project events onto calendar cells.
//!
//! Every query reduces its inputs to calendar days on each call; nothing is
//! cached between calls.

use crate::constants::DEFAULT_PERIOD_MARKER;
use crate::event::{CalendarDay, Event};

/// Events whose inclusive `[start, end]` range contains `date`, in input order.
pub fn events_on<D: CalendarDay>(events: &[Event], date: D) -> Vec<&Event> {
    let day = date.calendar_day();
    events.iter().filter(|e| e.contains_day(day)).collect()
}

/// Whether any event covers `date`.
pub fn has_events_on<D: CalendarDay>(events: &[Event], date: D) -> bool {
    let day = date.calendar_day();
    events.iter().any(|e| e.contains_day(day))
}

/// The academic period running on `date`, if any.
///
/// A period record is one whose category or activity mentions
/// "período letivo". The first match in input order wins.
pub fn active_period_on<D: CalendarDay>(events: &[Event], date: D) -> Option<&Event> {
    active_period_with(events, date, DEFAULT_PERIOD_MARKER)
}

/// Like [`active_period_on`] with a custom marker phrase.
pub fn active_period_with<'e, D: CalendarDay>(
    events: &'e [Event],
    date: D,
    marker: &str,
) -> Option<&'e Event> {
    let day = date.calendar_day();
    events
        .iter()
        .find(|e| e.mentions(marker) && e.contains_day(day))
}
