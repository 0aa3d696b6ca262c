//! Shared state handed to every intent handler.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::core::{Config, ConversationLog};
use crate::features::reminders::ReminderStore;
use crate::services::{LogMailer, Mailer, NewsClient, WeatherClient, WikiClient};
use crate::speech::{SpeechChannel, VoiceInput};

/// Everything a handler can touch: configuration, the speech channel,
/// voice input for follow-up prompts, the reminder store, the external
/// service clients, and the conversation log. One instance is built at
/// startup and shared by the voice loop, the reminder monitor, and the
/// web interface.
pub struct AssistantContext {
    pub config: Config,
    pub speech: SpeechChannel,
    pub input: Arc<dyn VoiceInput>,
    pub reminders: ReminderStore,
    pub weather: WeatherClient,
    pub wiki: WikiClient,
    pub news: NewsClient,
    pub mailer: Arc<dyn Mailer>,
    pub history: ConversationLog,
    pub started_at: DateTime<Utc>,
}

impl AssistantContext {
    /// Build a context with real service clients and the default
    /// log-only mailer.
    pub fn new(config: Config, speech: SpeechChannel, input: Arc<dyn VoiceInput>) -> Self {
        let http = reqwest::Client::new();
        let weather = WeatherClient::new(http.clone(), config.openweather_api_key.clone());
        let news = NewsClient::new(http.clone(), config.news_api_key.clone());
        let wiki = WikiClient::new(http);

        AssistantContext {
            config,
            speech,
            input,
            reminders: ReminderStore::new(),
            weather,
            wiki,
            news,
            mailer: Arc::new(LogMailer::new()),
            history: ConversationLog::new(),
            started_at: Utc::now(),
        }
    }

    /// Swap in a different mail transport.
    pub fn with_mailer(mut self, mailer: Arc<dyn Mailer>) -> Self {
        self.mailer = mailer;
        self
    }

    /// Contact book parsed from configuration.
    pub fn contacts(&self) -> HashMap<String, String> {
        self.config.contacts()
    }

    /// Seconds since this context was built.
    pub fn uptime_seconds(&self) -> i64 {
        (Utc::now() - self.started_at).num_seconds()
    }
}
