//! The catalog of events, owned and mutated by the UI layer

use chrono::NaiveDate;

use crate::error::ValidationError;
use crate::event::{Event, EventId};
use crate::recurrence::occurs_on;

/// An insertion-ordered collection of events, with unique IDs.
///
/// This is the only mutable state of a calendar. Queries ([`occurs_on`](crate::recurrence::occurs_on), [`due_reminders`](crate::reminder::due_reminders)) run on a borrowed snapshot of it.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Catalog {
    events: Vec<Event>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a catalog from already stored events.
    ///
    /// These are not validated, since a malformed stored event must not prevent the others from being displayed.
    /// In case several events share an ID, only the first one is kept.
    pub fn from_events(events: Vec<Event>) -> Self {
        let mut catalog = Self::new();
        for event in events {
            if catalog.get(event.id()).is_some() {
                log::warn!("Duplicate event id {}. Ignoring it", event.id());
                continue;
            }
            catalog.events.push(event);
        }
        catalog
    }

    pub fn events(&self) -> &[Event] { &self.events      }
    pub fn len(&self) -> usize       { self.events.len() }
    pub fn is_empty(&self) -> bool   { self.events.is_empty() }

    pub fn get(&self, id: &EventId) -> Option<&Event> {
        self.events.iter().find(|e| e.id() == id)
    }

    /// Add a new event at the end of the catalog
    pub fn add(&mut self, event: Event) -> Result<(), ValidationError> {
        event.validate()?;
        if self.get(event.id()).is_some() {
            return Err(ValidationError::DuplicateId(event.id().clone()));
        }
        self.events.push(event);
        Ok(())
    }

    /// Replace the event that has the same ID, keeping its position
    pub fn update(&mut self, event: Event) -> Result<(), ValidationError> {
        event.validate()?;
        match self.events.iter_mut().find(|e| e.id() == event.id()) {
            None => Err(ValidationError::UnknownId(event.id().clone())),
            Some(existing) => {
                *existing = event;
                Ok(())
            },
        }
    }

    /// Remove an event, and return it
    pub fn delete(&mut self, id: &EventId) -> Result<Event, ValidationError> {
        match self.events.iter().position(|e| e.id() == id) {
            None => Err(ValidationError::UnknownId(id.clone())),
            Some(index) => Ok(self.events.remove(index)),
        }
    }

    /// Returns the events that occur on a given day, in catalog order
    pub fn events_on(&self, date: NaiveDate) -> Vec<&Event> {
        self.events
            .iter()
            .filter(|e| occurs_on(e, date))
            .collect()
    }
}

impl From<Catalog> for Vec<Event> {
    fn from(catalog: Catalog) -> Self {
        catalog.events
    }
}
