//! Support for library configuration options

use std::error::Error;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use once_cell::sync::Lazy;

/// The key under which [`EventStorage`](crate::storage::EventStorage) saves the catalog by default.
/// Feel free to override it when initing this library.
pub static STORAGE_KEY: Lazy<Arc<Mutex<String>>> = Lazy::new(|| Arc::new(Mutex::new("calendar-events".to_string())));

/// Part of the ProdID string of exported iCal files (example of a ProdID string: `-//ABC Corporation//My Product//EN`).
/// Feel free to override it when initing this library.
pub static ORG_NAME: Lazy<Arc<Mutex<String>>> = Lazy::new(|| Arc::new(Mutex::new("My organization".to_string())));

/// Part of the ProdID string of exported iCal files (example of a ProdID string: `-//ABC Corporation//My Product//EN`).
/// Feel free to override it when initing this library.
pub static PRODUCT_NAME: Lazy<Arc<Mutex<String>>> = Lazy::new(|| Arc::new(Mutex::new("WallCalendar".to_string())));

/// Timing of the periodic reminder checks
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ReminderSettings {
    /// How often the reminder check runs
    pub poll_interval: Duration,
    /// The width of the tolerance window of a reminder (see [`ReminderScheduler`](crate::reminder::ReminderScheduler))
    pub window: Duration,
}

impl Default for ReminderSettings {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_secs(30),
            window: crate::reminder::DEFAULT_WINDOW,
        }
    }
}

impl ReminderSettings {
    /// A window narrower than the polling interval could let reminders fall between two checks.
    /// The window must also not be wider than [`MAX_WINDOW`](crate::reminder::MAX_WINDOW).
    pub fn validate(&self) -> Result<(), Box<dyn Error>> {
        if self.poll_interval.as_millis() == 0 {
            return Err("The reminder poll interval must not be zero".into());
        }
        if self.window > crate::reminder::MAX_WINDOW {
            return Err(format!("The reminder window ({:?}) must not be wider than {:?}",
                self.window, crate::reminder::MAX_WINDOW).into());
        }
        if self.window < self.poll_interval {
            return Err(format!("The reminder window ({:?}) must not be narrower than the poll interval ({:?})",
                self.window, self.poll_interval).into());
        }
        Ok(())
    }
}

/// Returns a copy of a setting, even if another thread panicked while holding it
pub(crate) fn read_setting(setting: &Mutex<String>) -> String {
    match setting.lock() {
        Ok(value) => value.clone(),
        Err(poisoned) => poisoned.into_inner().clone(),
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_settings_are_valid() {
        assert!(ReminderSettings::default().validate().is_ok());
    }

    #[test]
    fn window_must_cover_the_poll_interval() {
        let settings = ReminderSettings {
            poll_interval: Duration::from_secs(90),
            window: Duration::from_secs(60),
        };
        assert!(settings.validate().is_err());

        let settings = ReminderSettings {
            poll_interval: Duration::from_secs(0),
            ..ReminderSettings::default()
        };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn window_has_an_upper_bound() {
        let settings = ReminderSettings {
            window: crate::reminder::MAX_WINDOW,
            ..ReminderSettings::default()
        };
        assert!(settings.validate().is_ok());

        let settings = ReminderSettings {
            window: Duration::from_secs(u64::MAX),
            ..ReminderSettings::default()
        };
        assert!(settings.validate().is_err());
    }
}
