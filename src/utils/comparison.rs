//! Utilities to compare custom types
//!
//! These can be used to sort results, e.g. the events of a given day

use std::cmp::Ordering;

use crate::Event;

/// Compare events by start time, then alphabetically.
/// Events with a malformed start time come last.
pub fn compare_events_by_start(left: &&Event, right: &&Event) -> Ordering {
    match (left.start_time_of_day(), right.start_time_of_day()) {
        (Some(l), Some(r)) => l.cmp(&r),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
    .then_with(|| Ord::cmp(&left.title().to_lowercase(), &right.title().to_lowercase()))
}
