//! A module to build iCal files

use std::error::Error;

use chrono::{NaiveDateTime, Utc};
use ics::properties::{Description, DtEnd, DtStart, RRule, Summary, Trigger};
use ics::{Alarm, ICalendar};

use crate::event::{Event, Recurrence};

/// Create an iCal calendar from a list of events.
///
/// Events that cannot be expressed (malformed times, unknown recurrence) are skipped.
pub fn build_from(events: &[Event]) -> Result<String, Box<dyn Error>> {
    let s_now = Utc::now().format("%Y%m%dT%H%M%SZ").to_string();
    let mut calendar = ICalendar::new("2.0", super::default_prod_id());

    for event in events {
        let (start, end) = match (event.start_time_of_day(), event.end_time_of_day()) {
            (Some(start), Some(end)) => (start, end),
            _ => {
                log::warn!("Event {} has invalid times, it will not be exported", event.id());
                continue;
            },
        };
        let rrule = match event.recurrence() {
            Recurrence::Once => None,
            Recurrence::Daily => Some("FREQ=DAILY"),
            Recurrence::Weekly => Some("FREQ=WEEKLY"),
            Recurrence::Unrecognized(other) => {
                log::warn!("Event {} has an unsupported recurrence ({}), it will not be exported", event.id(), other);
                continue;
            },
        };

        let day = event.anchor_date();
        let mut vevent = ics::Event::new(event.id().to_string(), s_now.clone());
        vevent.push(DtStart::new(format_date_time(&day.and_time(start))));
        vevent.push(DtEnd::new(format_date_time(&day.and_time(end))));
        vevent.push(Summary::new(event.title().to_string()));
        if let Some(description) = event.description() {
            vevent.push(Description::new(description.to_string()));
        }
        if let Some(rrule) = rrule {
            vevent.push(RRule::new(rrule));
        }
        if let Some(minutes) = event.notification_time() {
            vevent.add_alarm(Alarm::display(
                Trigger::new(format!("-PT{}M", minutes)),
                Description::new(event.title().to_string()),
            ));
        }

        calendar.add_event(vevent);
    }

    Ok(calendar.to_string())
}

/// Times are floating (i.e. local to whoever reads the file), just like they are in this crate
fn format_date_time(dt: &NaiveDateTime) -> String {
    dt.format("%Y%m%dT%H%M%S").to_string()
}
