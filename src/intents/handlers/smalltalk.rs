//! Greetings, clock, calendar, help, and the unknown-intent fallback.

use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use chrono::{Local, Timelike};

use crate::intents::classifier::{Intent, IntentKind};
use crate::intents::context::AssistantContext;
use crate::intents::handler::IntentHandler;

pub struct SmalltalkHandler;

impl SmalltalkHandler {
    fn greeting(ctx: &AssistantContext) -> String {
        let part_of_day = match Local::now().hour() {
            5..=11 => "Good morning",
            12..=16 => "Good afternoon",
            17..=21 => "Good evening",
            _ => "Hello",
        };
        format!(
            "{part_of_day}! I'm {}. How can I help you?",
            ctx.config.assistant_name
        )
    }

    fn help_text() -> String {
        [
            "Here's what I can do:",
            "- tell you the time or date",
            "- look things up: 'tell me about the Eiffel Tower'",
            "- weather: 'what's the weather in London'",
            "- news: 'read me the headlines'",
            "- reminders: 'remind me to stretch in 20 minutes'",
            "- email: 'send an email'",
            "- open websites, play videos, take notes, and do arithmetic",
        ]
        .join("\n")
    }
}

#[async_trait]
impl IntentHandler for SmalltalkHandler {
    fn intent_kinds(&self) -> &'static [IntentKind] {
        &[
            IntentKind::Greet,
            IntentKind::Time,
            IntentKind::Date,
            IntentKind::Help,
            IntentKind::Exit,
            IntentKind::Unknown,
        ]
    }

    fn name(&self) -> &'static str {
        "smalltalk"
    }

    async fn handle(&self, ctx: Arc<AssistantContext>, intent: &Intent) -> Result<String> {
        let reply = match intent.kind {
            IntentKind::Greet => Self::greeting(&ctx),
            IntentKind::Time => format!("It's {}", Local::now().format("%I:%M %p")),
            IntentKind::Date => format!("Today is {}", Local::now().format("%A, %B %d, %Y")),
            IntentKind::Help => Self::help_text(),
            IntentKind::Exit => "Goodbye! Have a great day.".to_string(),
            _ => "I didn't understand that. You can say 'help' to hear what I can do.".to_string(),
        };
        Ok(reply)
    }
}
