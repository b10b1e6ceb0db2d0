//! Prints the current month and raises reminders until interrupted.
//!
//! Usage: `wall-calendar [STORAGE_FOLDER]`. Set `RUST_LOG=info` to see the reminders.

use std::error::Error;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use chrono::Local;

use wall_calendar::config::ReminderSettings;
use wall_calendar::month::MonthView;
use wall_calendar::storage::{EventStorage, FileBlobStore};
use wall_calendar::ticker::{LogSink, ReminderTicker};
use wall_calendar::traits::BlobStore;
use wall_calendar::{Catalog, Event, Recurrence};

const DEFAULT_STORAGE_FOLDER: &str = "wall_calendar_data";

#[tokio::main]
async fn main() {
    env_logger::init();

    if let Err(err) = run().await {
        log::error!("{}", err);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn Error>> {
    let folder = std::env::args().nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_STORAGE_FOLDER));
    let mut storage = EventStorage::new(FileBlobStore::new(&folder));

    // Samples are only created on the first start, so that unreadable data is never overwritten
    let first_start = storage.store().get(storage.key())?.is_none();
    let mut catalog = Catalog::from_events(storage.load());
    if first_start {
        log::info!("No stored events in {:?}, creating sample ones", folder);
        for event in sample_events() {
            catalog.add(event)?;
        }
        storage.save(catalog.events())?;
    }

    let today = Local::now().date_naive();
    wall_calendar::utils::print_month(&MonthView::containing(today), &catalog);

    let catalog = Arc::new(Mutex::new(catalog));
    let mut ticker = ReminderTicker::start(catalog, LogSink, ReminderSettings::default())?;
    println!("Waiting for reminders. Press Ctrl-C to quit.");
    tokio::signal::ctrl_c().await?;
    ticker.stop_and_wait().await;
    Ok(())
}

fn sample_events() -> Vec<Event> {
    let today = Local::now().date_naive();

    let mut meeting = Event::new("Team Meeting".to_string(), today);
    meeting.set_description(Some("Weekly team sync".to_string()));
    meeting.set_times("10:00".to_string(), "11:00".to_string());
    meeting.set_recurrence(Recurrence::Weekly);
    meeting.set_notification_time(Some(15));

    let mut lunch = Event::new("Lunch with Sarah".to_string(), today);
    lunch.set_times("12:30".to_string(), "13:30".to_string());
    lunch.set_color("#22c55e".to_string());

    vec![meeting, lunch]
}
