//! Resolves on which calendar days an event occurs
//!
//! Only calendar days and weekdays are compared, never elapsed durations. This makes the result independent of time zones and DST transitions.

use chrono::{Datelike, NaiveDate};

use crate::event::{Event, Recurrence};

/// Returns whether `event` occurs on the calendar day `date`.
///
/// This never fails: an event with an unrecognized recurrence simply does not occur.
pub fn occurs_on(event: &Event, date: NaiveDate) -> bool {
    let anchor = event.anchor_date();
    match event.recurrence() {
        Recurrence::Once => date == anchor,
        Recurrence::Daily => date >= anchor,
        Recurrence::Weekly => date >= anchor && date.weekday() == anchor.weekday(),
        Recurrence::Unrecognized(other) => {
            log::debug!("Unrecognized recurrence {:?} for event {}. Ignoring it", other, event.id());
            false
        },
    }
}

/// Returns every day of the inclusive range `from..=to` on which `event` occurs
pub fn occurrences_between(event: &Event, from: NaiveDate, to: NaiveDate) -> Vec<NaiveDate> {
    let mut days = Vec::new();
    let mut day = from;
    while day <= to {
        if occurs_on(event, day) {
            days.push(day);
        }
        day = match day.succ_opt() {
            Some(next) => next,
            None => break,
        };
    }
    days
}
