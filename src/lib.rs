// Core layer - configuration and shared state
pub mod core;

// Features layer - feature modules
pub mod features;

// Intent pipeline - classification and handler dispatch
pub mod intents;

// External service clients
pub mod services;

// Speech I/O collaborators
pub mod speech;

// Web layer - HTTP interface over the same intent pipeline
pub mod web;

// Re-export core config for convenience
pub use core::Config;

pub use features::reminders::{Notifier, Reminder, ReminderMonitor, ReminderStore, ScheduleError};

pub use intents::{AssistantContext, Dispatcher, Intent, IntentClassifier, IntentKind};

pub use speech::{ConsolePrompt, ConsoleVoice, SpeechChannel, SpeechOutput, VoiceInput};
