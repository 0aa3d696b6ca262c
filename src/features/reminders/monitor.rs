//! # Reminder Monitor
//!
//! Background loop that polls the store for due reminders and hands them to
//! the notifier in ascending due order. The loop is the only consumer of
//! the store and must never die: a crashed monitor silently disables every
//! future reminder, so every failure inside a tick is contained and logged.
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0

use chrono::Utc;
use log::{debug, error, info};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use crate::features::reminders::notifier::Notifier;
use crate::features::reminders::store::ReminderStore;

/// Fixed poll interval; a reminder fires at most one interval late.
const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Due tolerance: a reminder within this window of its due time fires now
/// rather than waiting one more tick (so it may fire up to 500ms early).
const DUE_EPSILON_MS: i64 = 500;

pub struct ReminderMonitor {
    store: ReminderStore,
    notifier: Notifier,
    poll_interval: Duration,
    running: Arc<AtomicBool>,
}

impl ReminderMonitor {
    pub fn new(store: ReminderStore, notifier: Notifier) -> Self {
        ReminderMonitor {
            store,
            notifier,
            poll_interval: POLL_INTERVAL,
            running: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Override the poll interval (tests tighten it to keep runtimes short).
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// Spawn the monitor loop. Returns false if it is already running;
    /// starting twice is a no-op, never a second loop.
    pub fn start(&self) -> bool {
        if self
            .running
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            debug!("reminder monitor already running, ignoring start");
            return false;
        }

        let store = self.store.clone();
        let notifier = self.notifier.clone();
        let poll_interval = self.poll_interval;

        tokio::spawn(async move {
            info!("Reminder monitor started (poll every {}ms)", poll_interval.as_millis());
            let mut ticker = tokio::time::interval(poll_interval);
            loop {
                ticker.tick().await;
                Self::tick(&store, &notifier).await;
            }
        });

        true
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    /// One scan: drain everything due and deliver it, earliest first.
    ///
    /// A failed delivery consumes the reminder (no retry) and never blocks
    /// the rest of the batch.
    async fn tick(store: &ReminderStore, notifier: &Notifier) {
        let due = store.drain_due(Utc::now(), chrono::Duration::milliseconds(DUE_EPSILON_MS));

        for reminder in &due {
            if let Err(e) = notifier.deliver(reminder).await {
                error!(
                    "Failed to deliver reminder {} ({}): {e}",
                    reminder.id, reminder.text
                );
            }
        }
    }
}
