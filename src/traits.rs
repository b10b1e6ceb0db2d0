use std::error::Error;

use crate::Event;

/// An opaque key/value store of text blobs, e.g. the browser local storage or a folder on disk
pub trait BlobStore {
    /// Returns the blob stored under `key`, or `None` in case nothing has been stored yet
    fn get(&self, key: &str) -> Result<Option<String>, Box<dyn Error>>;
    /// Store (or replace) the blob under `key`
    fn set(&mut self, key: &str, value: &str) -> Result<(), Box<dyn Error>>;
}

/// Something that shows reminders to the user (a desktop notification, a toast...)
///
/// Delivering is fire-and-forget. Whether the platform allows notifications is the implementor's concern.
pub trait NotificationSink {
    fn deliver(&self, event: &Event);
}
