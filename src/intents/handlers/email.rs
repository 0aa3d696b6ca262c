//! # Email Composition
//!
//! Composes an outbound message and hands it to the configured
//! [`Mailer`]. One-shot requests that carry recipient, subject, and body
//! are parsed inline; otherwise the handler collects the three fields in
//! follow-up prompts. Spoken recipients resolve through the contact book.
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.3.0

use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use log::warn;

use crate::intents::classifier::{Intent, IntentKind};
use crate::intents::context::AssistantContext;
use crate::intents::handler::IntentHandler;
use crate::services::{parse_email_request, resolve_recipient, OutboundMail};

pub struct EmailHandler;

impl EmailHandler {
    async fn send(ctx: &AssistantContext, mail: OutboundMail) -> String {
        let recipient = mail.recipient.clone();
        match ctx.mailer.send(mail).await {
            Ok(()) => format!("Email sent successfully to {recipient}!"),
            Err(e) => {
                warn!("mail send to {recipient} failed: {e}");
                "Sorry, I couldn't send the email.".to_string()
            }
        }
    }
}

#[async_trait]
impl IntentHandler for EmailHandler {
    fn intent_kinds(&self) -> &'static [IntentKind] {
        &[IntentKind::Email]
    }

    fn name(&self) -> &'static str {
        "email"
    }

    async fn handle(&self, ctx: Arc<AssistantContext>, intent: &Intent) -> Result<String> {
        if ctx.config.sender_email.is_none() {
            return Ok(
                "Email isn't configured. Set a sender address to enable it.".to_string(),
            );
        }

        if let Some(mail) = parse_email_request(&intent.raw_text) {
            return Ok(Self::send(&ctx, mail).await);
        }

        let contacts = ctx.contacts();

        ctx.speech.say("Who should I send it to?").await?;
        let recipient = match ctx.input.listen().await? {
            Some(said) => match resolve_recipient(&said, &contacts) {
                Some(address) => address,
                None => {
                    return Ok(
                        "I couldn't find that contact. Say a name from your contacts or a full address."
                            .to_string(),
                    )
                }
            },
            None => return Ok("I didn't catch that. Please try again.".to_string()),
        };

        ctx.speech.say("What's the subject?").await?;
        let subject = match ctx.input.listen().await? {
            Some(text) if !text.trim().is_empty() => text,
            _ => "No Subject".to_string(),
        };

        ctx.speech.say("What should the message say?").await?;
        let body = match ctx.input.listen().await? {
            Some(text) if !text.trim().is_empty() => text,
            _ => return Ok("I can't send an empty message.".to_string()),
        };

        Ok(Self::send(
            &ctx,
            OutboundMail {
                recipient,
                subject,
                body,
            },
        )
        .await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Config;
    use crate::services::{LogMailer, Mailer};
    use crate::speech::testing::{RecordingVoice, ScriptedInput};
    use crate::speech::SpeechChannel;
    use std::collections::HashMap;

    fn ctx_with(
        lines: &[&str],
        sender: Option<&str>,
    ) -> (Arc<AssistantContext>, Arc<LogMailer>) {
        let mailer = Arc::new(LogMailer::new());
        let config = Config {
            sender_email: sender.map(|s| s.to_string()),
            contacts_json: Some(r#"{"mom": "mom@example.com"}"#.to_string()),
            ..Config::default()
        };
        let ctx = AssistantContext::new(
            config,
            SpeechChannel::new(Box::new(RecordingVoice::new())),
            ScriptedInput::new(lines),
        )
        .with_mailer(mailer.clone() as Arc<dyn Mailer>);
        (Arc::new(ctx), mailer)
    }

    fn email_intent(text: &str) -> Intent {
        Intent {
            kind: IntentKind::Email,
            confidence: 0.9,
            entities: HashMap::new(),
            raw_text: text.to_string(),
        }
    }

    #[tokio::test]
    async fn test_unconfigured_sender() {
        let (ctx, mailer) = ctx_with(&[], None);
        let reply = EmailHandler
            .handle(ctx, &email_intent("send an email"))
            .await
            .unwrap();
        assert!(reply.contains("isn't configured"));
        assert!(mailer.sent().is_empty());
    }

    #[tokio::test]
    async fn test_inline_request_sends() {
        let (ctx, mailer) = ctx_with(&[], Some("me@example.com"));
        let reply = EmailHandler
            .handle(
                ctx,
                &email_intent(
                    "send email to john@example.com with subject Lunch and message noon works",
                ),
            )
            .await
            .unwrap();

        assert!(reply.contains("sent successfully"));
        assert_eq!(mailer.sent().len(), 1);
        assert_eq!(mailer.sent()[0].recipient, "john@example.com");
    }

    #[tokio::test]
    async fn test_conversational_flow_resolves_contact() {
        let (ctx, mailer) = ctx_with(
            &["mom", "dinner plans", "see you at seven"],
            Some("me@example.com"),
        );
        let reply = EmailHandler
            .handle(ctx, &email_intent("send an email"))
            .await
            .unwrap();

        assert!(reply.contains("mom@example.com"));
        assert_eq!(mailer.sent().len(), 1);
        assert_eq!(mailer.sent()[0].subject, "dinner plans");
    }

    #[tokio::test]
    async fn test_unknown_contact_aborts() {
        let (ctx, mailer) = ctx_with(&["stranger"], Some("me@example.com"));
        let reply = EmailHandler
            .handle(ctx, &email_intent("send an email"))
            .await
            .unwrap();

        assert!(reply.contains("couldn't find that contact"));
        assert!(mailer.sent().is_empty());
    }
}
