//! End-to-end scenarios of the recurrence resolver and of the reminder scheduler

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime};

use wall_calendar::month::MonthView;
use wall_calendar::recurrence::{occurrences_between, occurs_on};
use wall_calendar::reminder::{due_reminders, tick, NotifiedKey, NotifiedKeys};
use wall_calendar::{Catalog, Event, EventId, Recurrence};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn at(day: NaiveDate, h: u32, m: u32) -> NaiveDateTime {
    day.and_hms_opt(h, m, 0).unwrap()
}

fn event(id: &str, recurrence: Recurrence, anchor: NaiveDate, start: &str) -> Event {
    Event::new_with_parameters(
        EventId::from(id), format!("Event {}", id), None, anchor,
        start.to_string(), "23:00".to_string(), "#3b82f6".to_string(),
        recurrence, None,
    )
}

#[test]
fn scenario_a_weekly() {
    let _ = env_logger::builder().is_test(true).try_init();

    let e = event("a", Recurrence::Weekly, date(2024, 1, 1), "10:00");
    assert!(occurs_on(&e, date(2024, 1, 1)));
    assert!(occurs_on(&e, date(2024, 1, 8)));
    assert!(occurs_on(&e, date(2024, 1, 15)));
    assert!(!occurs_on(&e, date(2024, 1, 2)));
    assert!(!occurs_on(&e, date(2024, 1, 9)));
    assert!(!occurs_on(&e, date(2023, 12, 25)));

    // Exactly 4 occurrences in any 4-week span after the anchor
    let from = date(2024, 2, 7);
    let days = occurrences_between(&e, from, from + Duration::days(27));
    assert_eq!(days.len(), 4);
    assert!(days.iter().all(|d| d.weekday() == date(2024, 1, 1).weekday()));
}

#[test]
fn scenario_b_daily() {
    let e = event("b", Recurrence::Daily, date(2024, 3, 5), "10:00");
    assert!(!occurs_on(&e, date(2024, 3, 4)));
    assert!(!occurs_on(&e, date(2023, 3, 5)));
    let mut day = date(2024, 3, 5);
    for _ in 0..400 {
        assert!(occurs_on(&e, day));
        day = day.succ_opt().unwrap();
    }
}

#[test]
fn once_and_idempotence() {
    let e = event("once", Recurrence::Once, date(2024, 2, 29), "10:00");
    let days = occurrences_between(&e, date(2024, 1, 1), date(2025, 12, 31));
    assert_eq!(days, vec![date(2024, 2, 29)]);

    for day in [date(2024, 2, 28), date(2024, 2, 29), date(2024, 3, 1)].iter() {
        assert_eq!(occurs_on(&e, *day), occurs_on(&e, *day));
    }
}

#[test]
fn scenario_c_reminder() {
    let _ = env_logger::builder().is_test(true).try_init();

    let day = date(2024, 4, 12);
    let mut e = event("c", Recurrence::Daily, day, "09:00");
    e.set_notification_time(Some(15));
    let catalog = vec![e];

    let notified = NotifiedKeys::new();
    assert!(due_reminders(&catalog, at(day, 8, 30), &notified).is_empty());

    let first = tick(&catalog, at(day, 8, 45), &notified);
    assert_eq!(first.due.len(), 1);
    assert_eq!(first.due[0].id(), &EventId::from("c"));
    assert!(first.notified.contains(&NotifiedKey::new(EventId::from("c"), day)));

    // Already delivered for this occurrence
    assert!(due_reminders(&catalog, at(day, 8, 45) + Duration::seconds(30), &first.notified).is_empty());
    let second = tick(&catalog, at(day, 8, 46), &first.notified);
    assert!(second.due.is_empty());

    // The next occurrence fires again
    let next_day = day.succ_opt().unwrap();
    let third = tick(&catalog, at(next_day, 8, 45), &second.notified);
    assert_eq!(third.due.len(), 1);
}

#[test]
fn scenario_d_malformed_event() {
    let _ = env_logger::builder().is_test(true).try_init();

    let day = date(2024, 4, 12);
    let mut broken = event("broken", Recurrence::Daily, day, "abc");
    broken.set_notification_time(Some(15));
    let mut fine = event("fine", Recurrence::Daily, day, "09:00");
    fine.set_notification_time(Some(15));
    let mut unknown = event("unknown", Recurrence::Unrecognized("yearly".to_string()), day, "09:00");
    unknown.set_notification_time(Some(15));
    let catalog = Catalog::from_events(vec![broken, unknown, fine]);

    let due = due_reminders(catalog.events(), at(day, 8, 45), &NotifiedKeys::new());
    assert_eq!(due.len(), 1);
    assert_eq!(due[0].id(), &EventId::from("fine"));

    // The malformed time does not prevent the event from being shown, but the unknown recurrence does
    let view = MonthView::containing(day);
    let cells = view.day_cells(&catalog);
    for cell in &cells {
        let expected = if cell.date >= day { 2 } else { 0 };
        assert_eq!(cell.events.len(), expected, "on {}", cell.date);
        assert!(cell.events.iter().all(|e| e.id() != &EventId::from("unknown")));
    }
}
