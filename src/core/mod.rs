//! # Core Module
//!
//! Configuration and shared conversation state for the assistant.
//!
//! - **Version**: 1.1.0
//! - **Since**: 0.1.0
//! - **Toggleable**: false
//!
//! ## Changelog
//! - 1.1.0: Add history module with bounded conversation log
//! - 1.0.0: Initial creation with config module

pub mod config;
pub mod history;

// Re-export commonly used items
pub use config::Config;
pub use history::{ConversationLog, LogEntry, Speaker};
