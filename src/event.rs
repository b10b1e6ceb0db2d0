//! Calendar events

use std::fmt::{Display, Formatter};

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use uuid::Uuid;

use crate::error::ValidationError;

/// Default values of a freshly created event, as the "new event" form shows them
pub const DEFAULT_START_TIME: &str = "09:00";
pub const DEFAULT_END_TIME: &str = "10:00";
pub const DEFAULT_COLOR: &str = "#3b82f6";


/// The unique identifier of an event.
/// It is assigned at creation time and never changes afterwards.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventId {
    content: String,
}

impl EventId {
    /// Generate a random EventId.
    pub fn random() -> Self {
        let random = Uuid::new_v4().to_hyphenated().to_string();
        Self { content: random }
    }

    pub fn as_str(&self) -> &str {
        &self.content
    }
}

impl From<String> for EventId {
    fn from(content: String) -> Self {
        Self { content }
    }
}
impl From<&str> for EventId {
    fn from(content: &str) -> Self {
        Self { content: content.to_string() }
    }
}
impl Display for EventId {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), std::fmt::Error> {
        write!(f, "{}", self.content)
    }
}



/// How an event repeats after its anchor date
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Recurrence {
    /// Occurs on its anchor date only
    Once,
    /// Occurs every day, starting on its anchor date
    Daily,
    /// Occurs every week on the weekday of its anchor date, starting on its anchor date
    Weekly,
    /// A stored value this crate does not know about.
    /// Such events never occur, but they are kept verbatim so that they are not lost on the next save.
    Unrecognized(String),
}

impl Recurrence {
    pub fn as_str(&self) -> &str {
        match self {
            Recurrence::Once => "once",
            Recurrence::Daily => "daily",
            Recurrence::Weekly => "weekly",
            Recurrence::Unrecognized(other) => other,
        }
    }
}

impl Default for Recurrence {
    fn default() -> Self {
        Recurrence::Once
    }
}

impl From<&str> for Recurrence {
    fn from(s: &str) -> Self {
        match s {
            "once" => Recurrence::Once,
            "daily" => Recurrence::Daily,
            "weekly" => Recurrence::Weekly,
            other => Recurrence::Unrecognized(other.to_string()),
        }
    }
}

impl Display for Recurrence {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), std::fmt::Error> {
        write!(f, "{}", self.as_str())
    }
}

/// Used to support serde
impl Serialize for Recurrence {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}
/// Used to support serde
impl<'de> Deserialize<'de> for Recurrence {
    fn deserialize<D>(deserializer: D) -> Result<Recurrence, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(Recurrence::from(s.as_str()))
    }
}



/// A calendar event
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    id: EventId,

    /// The display name of the event
    title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    description: Option<String>,

    /// The occurrence date of a one-time event, or the first occurrence of a recurring one
    #[serde(alias = "date", deserialize_with = "deserialize_anchor_date")]
    anchor_date: NaiveDate,
    /// Wall-clock `HH:MM` strings, local to the device.
    /// They are kept verbatim, so that a malformed value only excludes this event from reminders, instead of failing the whole catalog.
    start_time: String,
    end_time: String,

    /// A CSS color token. This has no meaning for scheduling
    color: String,
    recurrence: Recurrence,

    /// Minutes before `start_time` at which a reminder fires. `None` means no reminder
    #[serde(default, skip_serializing_if = "Option::is_none")]
    notification_time: Option<u32>,
}

impl Event {
    /// Create a brand new event, with the default values of the "new event" form.
    /// This will pick a new (random) event ID.
    pub fn new(title: String, anchor_date: NaiveDate) -> Self {
        Self::new_with_parameters(
            EventId::random(), title, None, anchor_date,
            DEFAULT_START_TIME.to_string(), DEFAULT_END_TIME.to_string(),
            DEFAULT_COLOR.to_string(), Recurrence::Once, None,
        )
    }

    /// Create a new Event instance, e.g. to replace an existing one when it is edited
    pub fn new_with_parameters(id: EventId, title: String, description: Option<String>,
                               anchor_date: NaiveDate, start_time: String, end_time: String,
                               color: String, recurrence: Recurrence, notification_time: Option<u32>,
                            ) -> Self
    {
        Self {
            id,
            title,
            description,
            anchor_date,
            start_time,
            end_time,
            color,
            recurrence,
            notification_time,
        }
    }

    pub fn id(&self) -> &EventId                { &self.id                }
    pub fn title(&self) -> &str                 { &self.title             }
    pub fn description(&self) -> Option<&str>   { self.description.as_deref() }
    pub fn anchor_date(&self) -> NaiveDate      { self.anchor_date        }
    pub fn start_time(&self) -> &str            { &self.start_time        }
    pub fn end_time(&self) -> &str              { &self.end_time          }
    pub fn color(&self) -> &str                 { &self.color             }
    pub fn recurrence(&self) -> &Recurrence     { &self.recurrence        }
    pub fn notification_time(&self) -> Option<u32> { self.notification_time }

    /// The start time, or `None` in case it is not a valid `HH:MM` string
    pub fn start_time_of_day(&self) -> Option<NaiveTime> {
        parse_time_of_day(&self.start_time)
    }

    /// The end time, or `None` in case it is not a valid `HH:MM` string
    pub fn end_time_of_day(&self) -> Option<NaiveTime> {
        parse_time_of_day(&self.end_time)
    }

    /// Returns a copy of this event that keeps every field but uses another ID
    pub fn with_id(mut self, id: EventId) -> Self {
        self.id = id;
        self
    }

    pub fn set_title(&mut self, new_title: String) {
        self.title = new_title;
    }
    pub fn set_description(&mut self, new_description: Option<String>) {
        self.description = new_description;
    }
    pub fn set_anchor_date(&mut self, new_date: NaiveDate) {
        self.anchor_date = new_date;
    }
    /// Set both wall-clock times. Whether `start` comes before `end` is not checked.
    pub fn set_times(&mut self, start: String, end: String) {
        self.start_time = start;
        self.end_time = end;
    }
    pub fn set_color(&mut self, new_color: String) {
        self.color = new_color;
    }
    pub fn set_recurrence(&mut self, new_recurrence: Recurrence) {
        self.recurrence = new_recurrence;
    }
    pub fn set_notification_time(&mut self, minutes_before: Option<u32>) {
        self.notification_time = minutes_before;
    }

    /// Check the fields that are required before an event can be saved
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.title.trim().is_empty() {
            return Err(ValidationError::EmptyTitle);
        }
        if self.start_time_of_day().is_none() {
            return Err(ValidationError::InvalidStartTime(self.start_time.clone()));
        }
        if self.end_time_of_day().is_none() {
            return Err(ValidationError::InvalidEndTime(self.end_time.clone()));
        }
        if csscolorparser::parse(&self.color).is_err() {
            return Err(ValidationError::InvalidColor(self.color.clone()));
        }
        Ok(())
    }
}


/// Parse a 24-hour `HH:MM` string
pub fn parse_time_of_day(s: &str) -> Option<NaiveTime> {
    let bytes = s.as_bytes();
    if bytes.len() != 5 || bytes[2] != b':' {
        return None;
    }
    NaiveTime::parse_from_str(s, "%H:%M").ok()
}

/// Accept both `YYYY-MM-DD` and full ISO-8601 datetimes (e.g. `2024-01-01T10:00:00.000Z`).
/// Only the literal year, month and day are kept, the time and offset are ignored.
fn deserialize_anchor_date<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    let date_part = s.split('T').next().unwrap_or(&s);
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d")
        .map_err(|err| serde::de::Error::custom(format!("invalid date {:?}: {}", s, err)))
}


#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn new_event_has_form_defaults() {
        let event = Event::new("Standup".to_string(), date(2024, 1, 1));
        assert_eq!(event.start_time(), "09:00");
        assert_eq!(event.end_time(), "10:00");
        assert_eq!(event.color(), DEFAULT_COLOR);
        assert_eq!(event.recurrence(), &Recurrence::Once);
        assert_eq!(event.notification_time(), None);
        assert!(event.validate().is_ok());

        let other = Event::new("Standup".to_string(), date(2024, 1, 1));
        assert_ne!(event.id(), other.id());
    }

    #[test]
    fn time_of_day_parsing() {
        assert_eq!(parse_time_of_day("09:05"), NaiveTime::from_hms_opt(9, 5, 0));
        assert_eq!(parse_time_of_day("23:59"), NaiveTime::from_hms_opt(23, 59, 0));
        assert_eq!(parse_time_of_day("00:00"), NaiveTime::from_hms_opt(0, 0, 0));
        assert_eq!(parse_time_of_day("abc"), None);
        assert_eq!(parse_time_of_day("9:05"), None);
        assert_eq!(parse_time_of_day("24:00"), None);
        assert_eq!(parse_time_of_day("12:60"), None);
        assert_eq!(parse_time_of_day(""), None);
    }

    #[test]
    fn validation() {
        let mut event = Event::new("  ".to_string(), date(2024, 1, 1));
        assert_eq!(event.validate(), Err(ValidationError::EmptyTitle));

        event.set_title("Lunch".to_string());
        event.set_times("abc".to_string(), "13:00".to_string());
        assert_eq!(event.validate(), Err(ValidationError::InvalidStartTime("abc".to_string())));

        event.set_times("12:00".to_string(), "".to_string());
        assert_eq!(event.validate(), Err(ValidationError::InvalidEndTime("".to_string())));

        event.set_times("12:00".to_string(), "13:00".to_string());
        event.set_color("not a color".to_string());
        assert_eq!(event.validate(), Err(ValidationError::InvalidColor("not a color".to_string())));

        event.set_color("#22c55e".to_string());
        assert!(event.validate().is_ok());
    }

    #[test]
    fn serialized_form() {
        let event = Event::new_with_parameters(
            EventId::from("1"), "Team Meeting".to_string(), Some("Weekly team sync".to_string()),
            date(2024, 1, 1), "10:00".to_string(), "11:00".to_string(),
            "#3b82f6".to_string(), Recurrence::Weekly, Some(15));

        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json, serde_json::json!({
            "id": "1",
            "title": "Team Meeting",
            "description": "Weekly team sync",
            "anchorDate": "2024-01-01",
            "startTime": "10:00",
            "endTime": "11:00",
            "color": "#3b82f6",
            "recurrence": "weekly",
            "notificationTime": 15
        }));
    }

    #[test]
    fn legacy_serialized_form() {
        let json = r##"{
            "id": "2",
            "title": "Lunch with Sarah",
            "date": "2024-03-05T23:30:00.000Z",
            "startTime": "12:30",
            "endTime": "13:30",
            "color": "#22c55e",
            "recurrence": "monthly"
        }"##;
        let event: Event = serde_json::from_str(json).unwrap();
        assert_eq!(event.anchor_date(), date(2024, 3, 5));
        assert_eq!(event.recurrence(), &Recurrence::Unrecognized("monthly".to_string()));
        assert_eq!(serde_json::to_value(&event).unwrap()["recurrence"], "monthly");
        assert_eq!(event.description(), None);
        assert_eq!(event.notification_time(), None);
    }

    #[test]
    fn invalid_anchor_date_is_rejected() {
        let json = r##"{"id": "3", "title": "x", "anchorDate": "yesterday",
            "startTime": "12:30", "endTime": "13:30", "color": "red", "recurrence": "once"}"##;
        assert!(serde_json::from_str::<Event>(json).is_err());
    }
}
