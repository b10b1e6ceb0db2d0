//! Errors that are surfaced to the user when an event cannot enter the catalog

use thiserror::Error;

use crate::event::EventId;

/// Why an event was rejected by [`Event::validate`](crate::Event::validate) or by a [`Catalog`](crate::Catalog) mutation.
///
/// The `Display` output is meant to be shown as-is in a validation message.
#[derive(Error, Clone, Debug, PartialEq)]
pub enum ValidationError {
    #[error("A title is required")]
    EmptyTitle,

    #[error("Invalid start time {0:?}, expected HH:MM")]
    InvalidStartTime(String),

    #[error("Invalid end time {0:?}, expected HH:MM")]
    InvalidEndTime(String),

    #[error("Invalid color {0:?}")]
    InvalidColor(String),

    #[error("An event with id {0} already exists")]
    DuplicateId(EventId),

    #[error("No event with id {0}")]
    UnknownId(EventId),
}
