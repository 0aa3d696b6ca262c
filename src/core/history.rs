//! # Conversation Log
//!
//! Bounded in-memory transcript shared by the voice loop and the web
//! interface. Reminders are process-lifetime state and so is this log;
//! nothing here touches disk.
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.2.0
//! - **Toggleable**: false

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, PoisonError};

/// Default number of entries retained before the oldest are dropped.
const DEFAULT_CAPACITY: usize = 200;

/// Who produced a transcript entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Speaker {
    User,
    Assistant,
    /// Free-form notes saved via the note intent
    Note,
}

/// One transcript entry.
#[derive(Debug, Clone, Serialize)]
pub struct LogEntry {
    pub speaker: Speaker,
    pub text: String,
    pub at: DateTime<Utc>,
}

/// Shared, bounded conversation transcript.
#[derive(Clone)]
pub struct ConversationLog {
    entries: Arc<Mutex<VecDeque<LogEntry>>>,
    capacity: usize,
}

impl ConversationLog {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        ConversationLog {
            entries: Arc::new(Mutex::new(VecDeque::new())),
            capacity,
        }
    }

    pub fn record(&self, speaker: Speaker, text: &str) {
        let mut entries = self
            .entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if entries.len() == self.capacity {
            entries.pop_front();
        }
        entries.push_back(LogEntry {
            speaker,
            text: text.to_string(),
            at: Utc::now(),
        });
    }

    pub fn record_user(&self, text: &str) {
        self.record(Speaker::User, text);
    }

    pub fn record_assistant(&self, text: &str) {
        self.record(Speaker::Assistant, text);
    }

    /// Most recent `limit` entries, oldest first.
    pub fn recent(&self, limit: usize) -> Vec<LogEntry> {
        let entries = self
            .entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        let skip = entries.len().saturating_sub(limit);
        entries.iter().skip(skip).cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for ConversationLog {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_and_recent() {
        let log = ConversationLog::new();
        log.record_user("hello");
        log.record_assistant("hi there");

        let recent = log.recent(10);
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].speaker, Speaker::User);
        assert_eq!(recent[1].text, "hi there");
    }

    #[test]
    fn test_recent_returns_tail() {
        let log = ConversationLog::new();
        for i in 0..5 {
            log.record_user(&format!("msg {i}"));
        }

        let recent = log.recent(2);
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].text, "msg 3");
        assert_eq!(recent[1].text, "msg 4");
    }

    #[test]
    fn test_capacity_drops_oldest() {
        let log = ConversationLog::with_capacity(3);
        for i in 0..5 {
            log.record_user(&format!("msg {i}"));
        }

        assert_eq!(log.len(), 3);
        assert_eq!(log.recent(3)[0].text, "msg 2");
    }
}
