//! # Reminder Intake (voice)
//!
//! Conversational reminder creation. One-shot requests like "remind me to
//! call mom in 10 minutes" are parsed inline; otherwise the handler asks
//! for the text and the delay in two follow-up prompts. Either way the
//! reminder lands in the shared [`ReminderStore`], which enforces the
//! future-due-time rule.
//!
//! - **Version**: 1.1.0
//! - **Since**: 0.2.0

use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use log::info;
use regex::Regex;

use crate::features::reminders::ReminderStore;
use crate::intents::classifier::{Intent, IntentKind};
use crate::intents::context::AssistantContext;
use crate::intents::handler::IntentHandler;

/// Parse "remind me to <text> in <n> minutes/hours" in one utterance.
/// Returns the reminder text and the offset in minutes.
pub fn parse_inline_request(text: &str) -> Option<(String, i64)> {
    let re = Regex::new(r"(?i)remind me to\s+(.+?)\s+in\s+(\d+)\s+(minute|minutes|hour|hours)\b")
        .ok()?;
    let captures = re.captures(text)?;

    let what = captures.get(1)?.as_str().trim().to_string();
    let amount: i64 = captures.get(2)?.as_str().parse().ok()?;
    let minutes = if captures.get(3)?.as_str().starts_with("hour") {
        amount * 60
    } else {
        amount
    };
    Some((what, minutes))
}

/// Parse a spoken delay into minutes. Digits win ("5", "in 15 minutes");
/// small number words are accepted as a fallback ("five").
pub fn parse_offset_minutes(input: &str) -> Option<i64> {
    if let Some(m) = Regex::new(r"\d+").ok()?.find(input) {
        return m.as_str().parse().ok();
    }

    let words = [
        ("one", 1),
        ("two", 2),
        ("three", 3),
        ("four", 4),
        ("five", 5),
        ("six", 6),
        ("seven", 7),
        ("eight", 8),
        ("nine", 9),
        ("ten", 10),
    ];
    let input = input.to_lowercase();
    words
        .iter()
        .find(|(word, _)| input.split_whitespace().any(|token| token == *word))
        .map(|(_, n)| *n)
}

fn confirmation(what: &str, minutes: i64) -> String {
    let unit = if minutes == 1 { "minute" } else { "minutes" };
    format!("Okay, I'll remind you to {what} in {minutes} {unit}.")
}

/// Schedule a reminder and render the spoken confirmation. A rejected
/// delay becomes a correction prompt, never an error.
pub fn schedule_spoken(store: &ReminderStore, what: &str, minutes: i64) -> String {
    match store.add_in_minutes(what, minutes) {
        Ok(reminder) => {
            info!("scheduled reminder {} in {minutes} minute(s)", reminder.id);
            confirmation(what, minutes)
        }
        Err(_) => "Please give me a positive number of minutes.".to_string(),
    }
}

pub struct RemindHandler;

#[async_trait]
impl IntentHandler for RemindHandler {
    fn intent_kinds(&self) -> &'static [IntentKind] {
        &[IntentKind::Reminder]
    }

    fn name(&self) -> &'static str {
        "remind"
    }

    async fn handle(&self, ctx: Arc<AssistantContext>, intent: &Intent) -> Result<String> {
        if let Some((what, minutes)) = parse_inline_request(&intent.raw_text) {
            return Ok(schedule_spoken(&ctx.reminders, &what, minutes));
        }

        ctx.speech.say("What should I remind you about?").await?;
        let what = match ctx.input.listen().await? {
            Some(text) if !text.trim().is_empty() => text,
            _ => return Ok("I didn't catch that. Please try again.".to_string()),
        };

        ctx.speech.say("In how many minutes?").await?;
        let answer = match ctx.input.listen().await? {
            Some(text) => text,
            None => return Ok("I didn't catch that. Please try again.".to_string()),
        };

        match parse_offset_minutes(&answer) {
            Some(minutes) => Ok(schedule_spoken(&ctx.reminders, &what, minutes)),
            None => Ok("I didn't understand the delay. Please say a number of minutes.".to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Config;
    use crate::speech::testing::{RecordingVoice, ScriptedInput};
    use crate::speech::SpeechChannel;
    use std::collections::HashMap;

    fn ctx_with_input(lines: &[&str]) -> Arc<AssistantContext> {
        let voice = RecordingVoice::new();
        Arc::new(AssistantContext::new(
            Config::default(),
            SpeechChannel::new(Box::new(voice)),
            ScriptedInput::new(lines),
        ))
    }

    fn reminder_intent(text: &str) -> Intent {
        Intent {
            kind: IntentKind::Reminder,
            confidence: 0.9,
            entities: HashMap::new(),
            raw_text: text.to_string(),
        }
    }

    #[test]
    fn test_inline_minutes() {
        assert_eq!(
            parse_inline_request("remind me to call mom in 10 minutes"),
            Some(("call mom".to_string(), 10))
        );
    }

    #[test]
    fn test_inline_hours_convert_to_minutes() {
        assert_eq!(
            parse_inline_request("remind me to check the oven in 2 hours"),
            Some(("check the oven".to_string(), 120))
        );
    }

    #[test]
    fn test_inline_requires_delay() {
        assert_eq!(parse_inline_request("remind me to call mom"), None);
    }

    #[test]
    fn test_offset_digits() {
        assert_eq!(parse_offset_minutes("15"), Some(15));
        assert_eq!(parse_offset_minutes("in 5 minutes"), Some(5));
    }

    #[test]
    fn test_offset_words() {
        assert_eq!(parse_offset_minutes("five"), Some(5));
        assert_eq!(parse_offset_minutes("about ten minutes"), Some(10));
    }

    #[test]
    fn test_offset_digits_beat_words() {
        assert_eq!(parse_offset_minutes("3 not four"), Some(3));
    }

    #[test]
    fn test_offset_unparseable() {
        assert_eq!(parse_offset_minutes("whenever"), None);
    }

    #[tokio::test]
    async fn test_inline_request_schedules() {
        let ctx = ctx_with_input(&[]);
        let reply = RemindHandler
            .handle(ctx.clone(), &reminder_intent("remind me to stretch in 5 minutes"))
            .await
            .unwrap();

        assert!(reply.contains("stretch"));
        assert_eq!(ctx.reminders.pending().len(), 1);
    }

    #[tokio::test]
    async fn test_conversational_flow_schedules() {
        let ctx = ctx_with_input(&["water the plants", "ten"]);
        let reply = RemindHandler
            .handle(ctx.clone(), &reminder_intent("set a reminder"))
            .await
            .unwrap();

        assert!(reply.contains("water the plants"));
        assert!(reply.contains("10"));
        assert_eq!(ctx.reminders.pending().len(), 1);
    }

    #[tokio::test]
    async fn test_zero_minutes_rejected() {
        let ctx = ctx_with_input(&["stretch", "0"]);
        let reply = RemindHandler
            .handle(ctx.clone(), &reminder_intent("set a reminder"))
            .await
            .unwrap();

        assert!(reply.contains("positive"));
        assert!(ctx.reminders.pending().is_empty());
    }

    #[tokio::test]
    async fn test_silence_aborts_cleanly() {
        let ctx = ctx_with_input(&[]);
        let reply = RemindHandler
            .handle(ctx.clone(), &reminder_intent("set a reminder"))
            .await
            .unwrap();

        assert!(reply.contains("try again"));
        assert!(ctx.reminders.pending().is_empty());
    }
}
