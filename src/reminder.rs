//! Decides which reminders are due at a given instant
//!
//! This is a pure decision layer: it neither delivers notifications nor keeps track of what it already returned.
//! De-duplication is made explicit through a set of [`NotifiedKey`]s that the caller passes in, and that [`tick`] returns updated.

use std::collections::HashSet;
use std::convert::TryFrom;
use std::time::Duration as StdDuration;

use chrono::{Duration, NaiveDate, NaiveDateTime, Timelike};

use crate::event::{Event, EventId};
use crate::recurrence::occurs_on;

/// The default width of the tolerance window. It must be at least as large as the polling interval
pub const DEFAULT_WINDOW: StdDuration = StdDuration::from_secs(60);
/// The widest supported tolerance window. Wider windows are clamped to it
pub const MAX_WINDOW: StdDuration = StdDuration::from_secs(24 * 60 * 60);

/// Identifies a single occurrence of an event, for which a reminder has already been delivered
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct NotifiedKey {
    event_id: EventId,
    day: NaiveDate,
}

impl NotifiedKey {
    pub fn new(event_id: EventId, day: NaiveDate) -> Self {
        Self { event_id, day }
    }

    pub fn event_id(&self) -> &EventId { &self.event_id }
    /// The calendar day of the occurrence (not the day the reminder fired, which can be the day before)
    pub fn day(&self) -> NaiveDate     { self.day       }
}

/// The set of occurrences that have already been notified
pub type NotifiedKeys = HashSet<NotifiedKey>;

/// The outcome of a reminder check
#[derive(Debug)]
pub struct Tick<'a> {
    /// Events whose reminder should be delivered now, in catalog order
    pub due: Vec<&'a Event>,
    /// The notified keys, including the ones of `due`
    pub notified: NotifiedKeys,
}


/// Finds due reminders, using a tolerance window of a given width.
///
/// Times are compared at minute granularity: `now` is truncated to the minute, and an event is due iff this truncated `now`
/// lies within `(reminder_instant - window, reminder_instant]`.
/// The window is rounded up to whole minutes, is never narrower than a minute, and never wider than [`MAX_WINDOW`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ReminderScheduler {
    window_minutes: i64,
}

impl Default for ReminderScheduler {
    fn default() -> Self {
        Self::new(DEFAULT_WINDOW)
    }
}

impl ReminderScheduler {
    pub fn new(window: StdDuration) -> Self {
        let window = window.min(MAX_WINDOW);
        let minutes = (window.as_secs() + 59) / 60;
        let minutes = i64::try_from(minutes.max(1)).unwrap_or(1);
        Self { window_minutes: minutes }
    }

    pub fn window(&self) -> StdDuration {
        StdDuration::from_secs(self.window_minutes as u64 * 60)
    }

    /// Returns the events of `catalog` whose reminder should fire at `now`, excluding occurrences that are in `notified`
    pub fn due_reminders<'a>(&self, catalog: &'a [Event], now: NaiveDateTime, notified: &NotifiedKeys) -> Vec<&'a Event> {
        self.due_occurrences(catalog, now, notified)
            .into_iter()
            .map(|(event, _day)| event)
            .collect()
    }

    /// Same as [`Self::due_reminders`], but also returns `notified` updated with the due occurrences.
    ///
    /// Keys of occurrences older than the day before `now` are dropped, since they cannot be due anymore.
    pub fn tick<'a>(&self, catalog: &'a [Event], now: NaiveDateTime, notified: &NotifiedKeys) -> Tick<'a> {
        let due = self.due_occurrences(catalog, now, notified);

        let oldest_kept = now.date().pred_opt().unwrap_or(now.date());
        let mut updated: NotifiedKeys = notified.iter()
            .filter(|key| key.day >= oldest_kept)
            .cloned()
            .collect();

        let mut events = Vec::with_capacity(due.len());
        for (event, day) in due {
            updated.insert(NotifiedKey::new(event.id().clone(), day));
            events.push(event);
        }

        Tick { due: events, notified: updated }
    }

    fn due_occurrences<'a>(&self, catalog: &'a [Event], now: NaiveDateTime, notified: &NotifiedKeys) -> Vec<(&'a Event, NaiveDate)> {
        let now = truncate_to_minute(now);
        let last_reminder = match now.checked_add_signed(Duration::minutes(self.window_minutes - 1)) {
            Some(instant) => instant,
            None => return Vec::new(),
        };

        let mut due = Vec::new();
        for event in catalog {
            let minutes_before = match event.notification_time() {
                None => continue,
                Some(m) => Duration::minutes(i64::from(m)),
            };
            let (first_day, last_day) = match (now.checked_add_signed(minutes_before), last_reminder.checked_add_signed(minutes_before)) {
                (Some(first), Some(last)) => (first.date(), last.date()),
                _ => continue,
            };
            let start = match event.start_time_of_day() {
                Some(t) => t,
                None => {
                    log::debug!("Invalid start time {:?} for event {}. Skipping its reminder", event.start_time(), event.id());
                    continue;
                },
            };

            // The occurrence can be on a later day than `now` when the reminder offset crosses midnight
            let mut day = first_day;
            while day <= last_day {
                if occurs_on(event, day) {
                    let key = NotifiedKey::new(event.id().clone(), day);
                    let in_window = day.and_time(start).checked_sub_signed(minutes_before)
                        .map(|reminder_instant| now <= reminder_instant && reminder_instant <= last_reminder)
                        .unwrap_or(false);
                    if in_window && notified.contains(&key) == false {
                        due.push((event, day));
                        break;
                    }
                }
                day = match day.succ_opt() {
                    Some(next) => next,
                    None => break,
                };
            }
        }
        due
    }
}

fn truncate_to_minute(instant: NaiveDateTime) -> NaiveDateTime {
    instant
        - Duration::seconds(i64::from(instant.second()))
        - Duration::nanoseconds(i64::from(instant.nanosecond()))
}


/// Returns the events whose reminder should fire at `now`, using the default tolerance window
pub fn due_reminders<'a>(catalog: &'a [Event], now: NaiveDateTime, notified: &NotifiedKeys) -> Vec<&'a Event> {
    ReminderScheduler::default().due_reminders(catalog, now, notified)
}

/// Runs a reminder check with the default tolerance window. See [`ReminderScheduler::tick`]
pub fn tick<'a>(catalog: &'a [Event], now: NaiveDateTime, notified: &NotifiedKeys) -> Tick<'a> {
    ReminderScheduler::default().tick(catalog, now, notified)
}
