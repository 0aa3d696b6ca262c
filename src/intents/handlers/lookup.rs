//! Information intents: Wikipedia summaries, weather, and news.

use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use log::warn;

use crate::intents::classifier::{Intent, IntentKind};
use crate::intents::context::AssistantContext;
use crate::intents::handler::IntentHandler;
use crate::services::{locate_city, WikiError};

pub struct LookupHandler;

impl LookupHandler {
    async fn wiki(ctx: &AssistantContext, intent: &Intent) -> String {
        let topic = match intent.entity("topic") {
            Some(topic) => topic,
            None => return "What would you like to know about?".to_string(),
        };

        match ctx.wiki.summary(topic).await {
            Ok(extract) => format!("According to Wikipedia: {extract}"),
            Err(WikiError::NotFound) => {
                format!("I couldn't find information about {topic}.")
            }
            Err(WikiError::Ambiguous) => {
                format!("There are multiple results for {topic}. Could you be more specific?")
            }
            Err(e) => {
                warn!("wikipedia lookup failed: {e}");
                "I couldn't reach Wikipedia right now. Please try again later.".to_string()
            }
        }
    }

    async fn weather(ctx: &AssistantContext, intent: &Intent) -> String {
        if !ctx.weather.is_configured() {
            return "Weather lookups aren't configured. Set an OpenWeatherMap API key."
                .to_string();
        }

        let city = match intent.entity("city") {
            Some(city) => city.to_string(),
            None => match locate_city(&reqwest::Client::new()).await {
                Some(city) => city,
                None => return "Which city's weather would you like?".to_string(),
            },
        };

        match ctx.weather.current(&city).await {
            Ok(report) => report.summary(),
            Err(e) => {
                warn!("weather lookup for {city} failed: {e}");
                format!("I couldn't get the weather for {city} right now.")
            }
        }
    }

    async fn news(ctx: &AssistantContext) -> String {
        if !ctx.news.is_configured() {
            return "News lookups aren't configured. Set a NewsAPI key.".to_string();
        }

        match ctx.news.top_headlines().await {
            Ok(headlines) if headlines.is_empty() => {
                "There are no headlines right now.".to_string()
            }
            Ok(headlines) => {
                let mut lines = vec!["Here are the top headlines:".to_string()];
                for (i, title) in headlines.iter().enumerate() {
                    lines.push(format!("{}. {}", i + 1, title));
                }
                lines.join("\n")
            }
            Err(e) => {
                warn!("news lookup failed: {e}");
                "I couldn't get the news right now.".to_string()
            }
        }
    }
}

#[async_trait]
impl IntentHandler for LookupHandler {
    fn intent_kinds(&self) -> &'static [IntentKind] {
        &[IntentKind::Wiki, IntentKind::Weather, IntentKind::News]
    }

    fn name(&self) -> &'static str {
        "lookup"
    }

    async fn handle(&self, ctx: Arc<AssistantContext>, intent: &Intent) -> Result<String> {
        let reply = match intent.kind {
            IntentKind::Wiki => Self::wiki(&ctx, intent).await,
            IntentKind::Weather => Self::weather(&ctx, intent).await,
            _ => Self::news(&ctx).await,
        };
        Ok(reply)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Config;
    use crate::speech::testing::{RecordingVoice, ScriptedInput};
    use crate::speech::SpeechChannel;
    use std::collections::HashMap;

    fn ctx() -> Arc<AssistantContext> {
        let voice = RecordingVoice::new();
        Arc::new(AssistantContext::new(
            Config::default(),
            SpeechChannel::new(Box::new(voice)),
            ScriptedInput::new(&[]),
        ))
    }

    #[tokio::test]
    async fn test_wiki_without_topic_asks_for_one() {
        let intent = Intent {
            kind: IntentKind::Wiki,
            confidence: 0.95,
            entities: HashMap::new(),
            raw_text: "tell me about".to_string(),
        };
        let reply = LookupHandler.handle(ctx(), &intent).await.unwrap();
        assert!(reply.contains("What would you like to know"));
    }

    #[tokio::test]
    async fn test_weather_unconfigured_message() {
        let intent = Intent {
            kind: IntentKind::Weather,
            confidence: 0.9,
            entities: HashMap::from([("city".to_string(), "london".to_string())]),
            raw_text: "weather in london".to_string(),
        };
        let reply = LookupHandler.handle(ctx(), &intent).await.unwrap();
        assert!(reply.contains("aren't configured"));
    }

    #[tokio::test]
    async fn test_news_unconfigured_message() {
        let intent = Intent {
            kind: IntentKind::News,
            confidence: 0.9,
            entities: HashMap::new(),
            raw_text: "news".to_string(),
        };
        let reply = LookupHandler.handle(ctx(), &intent).await.unwrap();
        assert!(reply.contains("aren't configured"));
    }
}
