//! This module persists the event catalog into a key/value blob store

use std::collections::HashMap;
use std::error::Error;
use std::path::{Path, PathBuf};

use crate::config::{read_setting, STORAGE_KEY};
use crate::traits::BlobStore;
use crate::Event;


/// A blob store that saves every key into its own file in a folder
#[derive(Debug, PartialEq)]
pub struct FileBlobStore {
    backing_folder: PathBuf,
}

impl FileBlobStore {
    /// The folder is created at the first write, in case it does not exist yet
    pub fn new(folder: &Path) -> Self {
        Self { backing_folder: PathBuf::from(folder) }
    }

    pub fn folder(&self) -> &Path {
        &self.backing_folder
    }

    fn file_for(&self, key: &str) -> PathBuf {
        let file_name: String = key.chars()
            .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
            .collect();
        self.backing_folder.join(format!("{}.json", file_name))
    }
}

impl BlobStore for FileBlobStore {
    fn get(&self, key: &str) -> Result<Option<String>, Box<dyn Error>> {
        let path = self.file_for(key);
        match std::fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(format!("Unable to read file {:?}: {}", path, err).into()),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), Box<dyn Error>> {
        std::fs::create_dir_all(&self.backing_folder)?;
        let path = self.file_for(key);
        std::fs::write(&path, value)
            .map_err(|err| format!("Unable to save file {:?}: {}", path, err).into())
    }
}


/// A blob store that only lives in memory
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MemoryBlobStore {
    blobs: HashMap<String, String>,
}

impl MemoryBlobStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl BlobStore for MemoryBlobStore {
    fn get(&self, key: &str) -> Result<Option<String>, Box<dyn Error>> {
        Ok(self.blobs.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), Box<dyn Error>> {
        self.blobs.insert(key.to_string(), value.to_string());
        Ok(())
    }
}


/// Loads and saves an ordered list of events, as a JSON array stored under a single key
#[derive(Debug)]
pub struct EventStorage<B: BlobStore> {
    store: B,
    key: String,
}

impl<B: BlobStore> EventStorage<B> {
    /// Use the default storage key (see [`crate::config::STORAGE_KEY`])
    pub fn new(store: B) -> Self {
        Self::with_key(store, read_setting(&STORAGE_KEY))
    }

    pub fn with_key(store: B, key: String) -> Self {
        Self { store, key }
    }

    pub fn store(&self) -> &B { &self.store }
    pub fn key(&self) -> &str { &self.key   }

    /// Load the stored events.
    ///
    /// This never fails: in case nothing is stored yet, or the stored data is not a JSON array, this returns an empty list (and logs why).
    /// Stored events that cannot be read are skipped one by one, so that they do not hide the others.
    pub fn load(&self) -> Vec<Event> {
        let content = match self.store.get(&self.key) {
            Ok(Some(content)) => content,
            Ok(None) => {
                log::debug!("No stored events under {:?}", self.key);
                return Vec::new();
            },
            Err(err) => {
                log::warn!("Unable to load stored events: {}. Using an empty calendar", err);
                return Vec::new();
            },
        };

        let values: Vec<serde_json::Value> = match serde_json::from_str(&content) {
            Ok(values) => values,
            Err(err) => {
                log::warn!("Invalid stored events: {}. Using an empty calendar", err);
                return Vec::new();
            },
        };

        let mut events = Vec::with_capacity(values.len());
        for (index, value) in values.into_iter().enumerate() {
            match serde_json::from_value::<Event>(value) {
                Ok(event) => events.push(event),
                Err(err) => log::warn!("Ignoring invalid stored event #{}: {}", index, err),
            }
        }
        events
    }

    /// Replace the stored events
    pub fn save(&mut self, events: &[Event]) -> Result<(), Box<dyn Error>> {
        let content = serde_json::to_string(events)?;
        self.store.set(&self.key, &content)
    }
}
