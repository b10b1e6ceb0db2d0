//! Runs the reminder checks on a timer
//!
//! Checks run one after the other inside a single task, so that they never overlap.

use std::error::Error;
use std::sync::{Arc, Mutex};

use chrono::{Local, NaiveDateTime};
use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::catalog::Catalog;
use crate::config::ReminderSettings;
use crate::reminder::{NotifiedKeys, ReminderScheduler};
use crate::traits::NotificationSink;
use crate::Event;

/// A sink that only logs reminders
#[derive(Clone, Copy, Debug, Default)]
pub struct LogSink;

impl NotificationSink for LogSink {
    fn deliver(&self, event: &Event) {
        log::info!("Reminder: {} starts at {}", event.title(), event.start_time());
    }
}


/// A running periodic reminder check.
///
/// It is stopped by [`ReminderTicker::stop`], or when it is dropped.
#[derive(Debug)]
pub struct ReminderTicker {
    stop_sender: Option<watch::Sender<bool>>,
    handle: Option<JoinHandle<()>>,
}

impl ReminderTicker {
    /// Start checking reminders of `catalog` against the local wall-clock time.
    ///
    /// This must be called from within a tokio runtime.
    pub fn start<S>(catalog: Arc<Mutex<Catalog>>, sink: S, settings: ReminderSettings) -> Result<Self, Box<dyn Error>>
    where
        S: NotificationSink + Send + 'static,
    {
        Self::start_with_clock(catalog, sink, settings, || Local::now().naive_local())
    }

    /// Same as [`Self::start`], but the current time is given by `clock`
    pub fn start_with_clock<S, C>(catalog: Arc<Mutex<Catalog>>, sink: S, settings: ReminderSettings, clock: C) -> Result<Self, Box<dyn Error>>
    where
        S: NotificationSink + Send + 'static,
        C: Fn() -> NaiveDateTime + Send + 'static,
    {
        settings.validate()?;
        let scheduler = ReminderScheduler::new(settings.window);
        let (stop_sender, mut stop_receiver) = watch::channel(false);

        let handle = tokio::spawn(async move {
            log::info!("Reminder ticker started (every {:?})", settings.poll_interval);
            let mut interval = tokio::time::interval(settings.poll_interval);
            let mut notified = NotifiedKeys::new();
            loop {
                tokio::select! {
                    _ = interval.tick() => {
                        run_tick(&catalog, &sink, &scheduler, clock(), &mut notified);
                    },
                    _ = stop_receiver.changed() => {
                        break;
                    },
                }
            }
            log::info!("Reminder ticker stopped");
        });

        Ok(Self {
            stop_sender: Some(stop_sender),
            handle: Some(handle),
        })
    }

    pub fn is_running(&self) -> bool {
        self.stop_sender.is_some()
    }

    /// Stop the checks. Stopping an already stopped ticker does nothing.
    pub fn stop(&mut self) {
        if let Some(sender) = self.stop_sender.take() {
            let _ = sender.send(true);
        }
    }

    /// Stop the checks, and wait until the current one (if any) has completed
    pub async fn stop_and_wait(&mut self) {
        self.stop();
        if let Some(handle) = self.handle.take() {
            if let Err(err) = handle.await {
                log::warn!("Reminder ticker terminated abnormally: {}", err);
            }
        }
    }
}

impl Drop for ReminderTicker {
    fn drop(&mut self) {
        self.stop();
    }
}

fn run_tick<S: NotificationSink>(catalog: &Mutex<Catalog>, sink: &S, scheduler: &ReminderScheduler, now: NaiveDateTime, notified: &mut NotifiedKeys) {
    let catalog = match catalog.lock() {
        Ok(catalog) => catalog,
        Err(poisoned) => {
            log::warn!("The catalog lock is poisoned. Reading it anyway");
            poisoned.into_inner()
        },
    };

    let result = scheduler.tick(catalog.events(), now, notified);
    for event in &result.due {
        log::debug!("Reminder due for event {} at {}", event.id(), now);
        sink.deliver(event);
    }
    *notified = result.notified;
}
