//! # Configuration
//!
//! Environment-backed configuration. Every value has a sane default so the
//! assistant can run from a bare shell; API-backed features degrade to a
//! "not configured" response when their key is absent.
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0
//! - **Toggleable**: false

use anyhow::Result;
use std::collections::HashMap;

/// Runtime configuration loaded from environment variables (and `.env`).
#[derive(Debug, Clone)]
pub struct Config {
    /// Display name used when speaking and in web responses
    pub assistant_name: String,
    /// Wake phrase that must prefix voice commands when wake mode is on
    pub wake_word: String,
    /// Whether voice commands must contain the wake word
    pub wake_mode_enabled: bool,
    /// OpenWeatherMap API key
    pub openweather_api_key: Option<String>,
    /// NewsAPI key for headlines
    pub news_api_key: Option<String>,
    /// Sender address reported on outbound mail
    pub sender_email: Option<String>,
    /// JSON object mapping spoken contact names to email addresses
    pub contacts_json: Option<String>,
    /// Bind address for the web interface
    pub web_bind_addr: String,
    /// Reminder monitor poll interval in milliseconds
    pub reminder_poll_ms: u64,
    /// Default log filter when RUST_LOG is unset
    pub log_level: String,
}

impl Config {
    /// Load configuration from the environment.
    pub fn from_env() -> Result<Self> {
        let assistant_name =
            std::env::var("ASSISTANT_NAME").unwrap_or_else(|_| "Aria".to_string());

        let wake_word = std::env::var("WAKE_WORD")
            .unwrap_or_else(|_| format!("hey {}", assistant_name.to_lowercase()));

        let wake_mode_enabled = std::env::var("WAKE_MODE_ENABLED")
            .map(|v| v.to_lowercase() == "true")
            .unwrap_or(false);

        Ok(Config {
            assistant_name,
            wake_word,
            wake_mode_enabled,
            openweather_api_key: non_empty_var("OPENWEATHER_API_KEY"),
            news_api_key: non_empty_var("NEWS_API_KEY"),
            sender_email: non_empty_var("SENDER_EMAIL"),
            contacts_json: non_empty_var("CONTACTS_JSON"),
            web_bind_addr: std::env::var("WEB_BIND_ADDR")
                .unwrap_or_else(|_| "127.0.0.1:5000".to_string()),
            reminder_poll_ms: std::env::var("REMINDER_POLL_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .filter(|&ms| ms > 0)
                .unwrap_or(100),
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
        })
    }

    /// Parse the configured contact book (spoken name -> email address).
    ///
    /// Invalid JSON is treated the same as no contacts at all.
    pub fn contacts(&self) -> HashMap<String, String> {
        self.contacts_json
            .as_deref()
            .and_then(|raw| serde_json::from_str(raw).ok())
            .unwrap_or_default()
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            assistant_name: "Aria".to_string(),
            wake_word: "hey aria".to_string(),
            wake_mode_enabled: false,
            openweather_api_key: None,
            news_api_key: None,
            sender_email: None,
            contacts_json: None,
            web_bind_addr: "127.0.0.1:5000".to_string(),
            reminder_poll_ms: 100,
            log_level: "info".to_string(),
        }
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contacts_parses_valid_json() {
        let config = Config {
            contacts_json: Some(r#"{"mom": "mom@example.com"}"#.to_string()),
            ..Config::default()
        };

        let contacts = config.contacts();
        assert_eq!(contacts.get("mom").map(String::as_str), Some("mom@example.com"));
    }

    #[test]
    fn test_contacts_tolerates_garbage() {
        let config = Config {
            contacts_json: Some("not json".to_string()),
            ..Config::default()
        };

        assert!(config.contacts().is_empty());
    }
}
