//! # Reminder Store
//!
//! Thread-safe collection of pending reminders. The store is a `Clone`-able
//! handle over shared state so the voice intake, web intake, and monitor
//! loop all see the same pending set.
//!
//! `drain_due` is the one operation with a real contract: it must take a
//! consistent snapshot, remove every due item exactly once, and leave
//! anything not yet due for the next scan.
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0

use chrono::{DateTime, Duration, Utc};
use log::{debug, info};
use serde::Serialize;
use std::sync::{Arc, Mutex, PoisonError};
use thiserror::Error;
use uuid::Uuid;

/// A scheduled textual notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Reminder {
    pub id: Uuid,
    pub due_at: DateTime<Utc>,
    pub text: String,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ScheduleError {
    /// The requested due time is not in the future.
    #[error("reminder due time must be in the future")]
    InvalidSchedule,
}

/// Shared store of pending reminders.
///
/// Insertions never block on anything but the internal lock, which is held
/// only for the duration of a vector operation. All producers and the
/// monitor loop share one instance via `clone()`.
#[derive(Clone, Default)]
pub struct ReminderStore {
    inner: Arc<Mutex<Vec<Reminder>>>,
}

impl ReminderStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule a reminder for an absolute due time.
    ///
    /// Due times at or before now are rejected; nothing is inserted.
    /// Returns the stored reminder so callers can report its id and due
    /// time without re-reading the store.
    pub fn add(&self, text: &str, due_at: DateTime<Utc>) -> Result<Reminder, ScheduleError> {
        if due_at <= Utc::now() {
            return Err(ScheduleError::InvalidSchedule);
        }

        let reminder = Reminder {
            id: Uuid::new_v4(),
            due_at,
            text: text.to_string(),
        };

        self.lock().push(reminder.clone());
        info!(
            "Scheduled reminder {} for {}: {}",
            reminder.id,
            due_at.format("%H:%M:%S"),
            text
        );
        Ok(reminder)
    }

    /// Schedule a reminder `offset_minutes` from now.
    ///
    /// Both intake paths funnel through here. Non-positive offsets are
    /// rejected before any due-time math, and offsets too large to
    /// represent as a due time are rejected rather than overflowing.
    pub fn add_in_minutes(
        &self,
        text: &str,
        offset_minutes: i64,
    ) -> Result<Reminder, ScheduleError> {
        if offset_minutes <= 0 {
            return Err(ScheduleError::InvalidSchedule);
        }
        let offset = offset_minutes
            .checked_mul(60)
            .and_then(Duration::try_seconds)
            .ok_or(ScheduleError::InvalidSchedule)?;
        let due_at = Utc::now()
            .checked_add_signed(offset)
            .ok_or(ScheduleError::InvalidSchedule)?;
        self.add(text, due_at)
    }

    /// Atomically remove and return every reminder due within `epsilon` of
    /// `now`, sorted by ascending due time.
    ///
    /// Removal happens under the same lock as the scan, so a racing drain
    /// can never observe (and fire) the same reminder, and an `add` racing
    /// with the scan lands either in this batch or the next one - never
    /// nowhere.
    pub fn drain_due(&self, now: DateTime<Utc>, epsilon: Duration) -> Vec<Reminder> {
        let mut pending = self.lock();

        let mut due: Vec<Reminder> = Vec::new();
        let mut remaining: Vec<Reminder> = Vec::with_capacity(pending.len());
        for reminder in pending.drain(..) {
            if reminder.due_at - now <= epsilon {
                due.push(reminder);
            } else {
                remaining.push(reminder);
            }
        }
        *pending = remaining;
        drop(pending);

        due.sort_by_key(|r| r.due_at);
        if !due.is_empty() {
            debug!("drained {} due reminder(s)", due.len());
        }
        due
    }

    /// Snapshot of pending reminders, sorted by due time (for display).
    pub fn pending(&self) -> Vec<Reminder> {
        let mut snapshot = self.lock().clone();
        snapshot.sort_by_key(|r| r.due_at);
        snapshot
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<Reminder>> {
        // A poisoned lock only means another thread panicked mid-operation;
        // the vector itself is still valid.
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_future_reminder() {
        let store = ReminderStore::new();
        let created = store
            .add("call mom", Utc::now() + Duration::seconds(60))
            .unwrap();

        let pending = store.pending();
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].id, created.id);
        assert_eq!(pending[0].due_at, created.due_at);
        assert_eq!(pending[0].text, "call mom");
    }

    #[test]
    fn test_add_rejects_past_due_time() {
        let store = ReminderStore::new();
        let result = store.add("too late", Utc::now() - Duration::seconds(1));

        assert_eq!(result, Err(ScheduleError::InvalidSchedule));
        assert!(store.is_empty());
    }

    #[test]
    fn test_add_in_minutes_rejects_non_positive_offsets() {
        let store = ReminderStore::new();

        assert_eq!(
            store.add_in_minutes("now", 0),
            Err(ScheduleError::InvalidSchedule)
        );
        assert_eq!(
            store.add_in_minutes("yesterday", -5),
            Err(ScheduleError::InvalidSchedule)
        );
        assert!(store.is_empty());
    }

    #[test]
    fn test_add_in_minutes_rejects_oversized_offsets() {
        // Offsets too large for due-time arithmetic are rejected like any
        // other invalid schedule, not allowed to overflow
        let store = ReminderStore::new();

        assert_eq!(
            store.add_in_minutes("heat death", i64::MAX),
            Err(ScheduleError::InvalidSchedule)
        );
        assert_eq!(
            store.add_in_minutes("still too far", i64::MAX / 60),
            Err(ScheduleError::InvalidSchedule)
        );
        assert!(store.is_empty());
    }

    #[test]
    fn test_drain_due_partitions_by_epsilon() {
        let store = ReminderStore::new();
        let now = Utc::now();
        store.add("soon", now + Duration::milliseconds(200)).unwrap();
        store.add("later", now + Duration::seconds(90)).unwrap();

        // 200ms out is within the 500ms tolerance, 90s is not
        let due = store.drain_due(now, Duration::milliseconds(500));
        assert_eq!(due.len(), 1);
        assert_eq!(due[0].text, "soon");
        assert_eq!(store.len(), 1);
        assert_eq!(store.pending()[0].text, "later");
    }

    #[test]
    fn test_drain_due_sorts_ascending() {
        let store = ReminderStore::new();
        let now = Utc::now();
        store.add("b", now + Duration::milliseconds(400)).unwrap();
        store.add("a", now + Duration::milliseconds(200)).unwrap();
        store.add("c", now + Duration::milliseconds(450)).unwrap();

        let due = store.drain_due(now + Duration::seconds(1), Duration::milliseconds(500));
        let texts: Vec<&str> = due.iter().map(|r| r.text.as_str()).collect();
        assert_eq!(texts, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_drained_reminders_are_gone() {
        let store = ReminderStore::new();
        let now = Utc::now();
        store.add("once", now + Duration::milliseconds(100)).unwrap();

        let later = now + Duration::seconds(1);
        assert_eq!(store.drain_due(later, Duration::milliseconds(500)).len(), 1);
        assert!(store.drain_due(later, Duration::milliseconds(500)).is_empty());
    }

    #[test]
    fn test_concurrent_drains_deliver_each_reminder_once() {
        let store = ReminderStore::new();
        let now = Utc::now();
        for i in 0..50 {
            store
                .add(&format!("r{i}"), now + Duration::milliseconds(10))
                .unwrap();
        }

        let later = now + Duration::seconds(1);
        let epsilon = Duration::milliseconds(500);
        let mut handles = Vec::new();
        for _ in 0..4 {
            let store = store.clone();
            handles.push(std::thread::spawn(move || {
                store.drain_due(later, epsilon).len()
            }));
        }

        let total: usize = handles.into_iter().map(|h| h.join().unwrap()).sum();
        assert_eq!(total, 50);
        assert!(store.is_empty());
    }

    #[test]
    fn test_concurrent_adds_are_all_honored() {
        let store = ReminderStore::new();
        let mut handles = Vec::new();
        for t in 0..4 {
            let store = store.clone();
            handles.push(std::thread::spawn(move || {
                for i in 0..25 {
                    store.add_in_minutes(&format!("t{t} r{i}"), 5).unwrap();
                }
            }));
        }
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(store.len(), 100);
    }

    #[test]
    fn test_late_insert_with_near_due_time_still_drains() {
        // A reminder added between scans with an already-reached due time
        // must surface on the next drain rather than being skipped forever.
        let store = ReminderStore::new();
        let now = Utc::now();
        store.add("squeaker", now + Duration::milliseconds(1)).unwrap();
        std::thread::sleep(std::time::Duration::from_millis(5));

        let due = store.drain_due(Utc::now(), Duration::milliseconds(500));
        assert_eq!(due.len(), 1);
    }
}
