// Features layer - all feature modules

pub mod reminders;

pub use reminders::{Notifier, Reminder, ReminderMonitor, ReminderStore, ScheduleError};
