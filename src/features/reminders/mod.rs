//! # Reminders Feature
//!
//! In-memory scheduled reminder system: a shared [`ReminderStore`] mutated
//! by the voice and web intake paths, a background [`ReminderMonitor`] that
//! polls for due reminders, and a [`Notifier`] that serializes delivery
//! through the shared speech channel.
//!
//! Reminders are volatile, process-lifetime state: there is no persistence
//! and no cancellation once scheduled.
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0
//! - **Toggleable**: true

pub mod monitor;
pub mod notifier;
pub mod store;

pub use monitor::ReminderMonitor;
pub use notifier::Notifier;
pub use store::{Reminder, ReminderStore, ScheduleError};
