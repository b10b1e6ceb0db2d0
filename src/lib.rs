//! This crate provides the scheduling core of a month-view calendar.
//!
//! Events are kept in a [`Catalog`], which is owned by the application. They can happen once, every day or every week.
//!
//! Two pure queries work on a snapshot of this catalog:
//! * [`occurs_on`](recurrence::occurs_on) tells whether an event happens on a given calendar day
//! * [`due_reminders`](reminder::due_reminders) (and [`tick`](reminder::tick)) tell which reminders should fire at a given instant. \
//!   They take the set of already delivered reminders as a parameter, so that a reminder fires only once per occurrence.
//!
//! The [`storage`] module persists a catalog into a key/value blob store, and the [`ticker`] module runs the reminder checks on a timer.

pub mod traits;

pub mod event;
pub use event::{Event, EventId, Recurrence};
mod error;
pub use error::ValidationError;
pub mod catalog;
pub use catalog::Catalog;
pub mod recurrence;
pub mod reminder;
pub mod month;
pub mod storage;
pub mod ticker;
pub mod ical;

pub mod config;
pub mod utils;
