//! # Intent Pipeline
//!
//! Classify an utterance, route it to its handler, and contain every
//! failure so the assistant always answers with something speakable.
//! Both the voice loop and the web interface feed text through the same
//! [`Dispatcher`] over the same shared [`AssistantContext`].
//!
//! - **Version**: 1.1.0
//! - **Since**: 0.1.0

pub mod classifier;
pub mod context;
pub mod handler;
pub mod handlers;
pub mod registry;

pub use classifier::{Intent, IntentClassifier, IntentKind};
pub use context::AssistantContext;
pub use handler::IntentHandler;
pub use registry::HandlerRegistry;

use std::sync::Arc;

use log::{error, info};
use uuid::Uuid;

pub struct Dispatcher {
    classifier: IntentClassifier,
    registry: HandlerRegistry,
    ctx: Arc<AssistantContext>,
}

impl Dispatcher {
    /// Dispatcher over the built-in handler set.
    pub fn new(ctx: Arc<AssistantContext>) -> Self {
        Dispatcher {
            classifier: IntentClassifier::new(),
            registry: handlers::default_registry(),
            ctx,
        }
    }

    pub fn with_registry(ctx: Arc<AssistantContext>, registry: HandlerRegistry) -> Self {
        Dispatcher {
            classifier: IntentClassifier::new(),
            registry,
            ctx,
        }
    }

    pub fn context(&self) -> Arc<AssistantContext> {
        self.ctx.clone()
    }

    /// Classify without dispatching. The web layer uses this to
    /// special-case conversational intents it cannot prompt for.
    pub fn classify(&self, text: &str) -> Intent {
        self.classifier.classify(text)
    }

    /// Answer one utterance. Handler errors are logged and replaced with
    /// an apology; this never fails and never panics the caller.
    pub async fn respond(&self, text: &str) -> String {
        let request_id = Uuid::new_v4();
        self.ctx.history.record_user(text);

        let intent = self.classifier.classify(text);
        info!(
            "[{request_id}] intent={} confidence={:.2}",
            intent.kind.as_str(),
            intent.confidence
        );

        let reply = match self.registry.get(intent.kind) {
            Some(handler) => match handler.handle(self.ctx.clone(), &intent).await {
                Ok(reply) => reply,
                Err(e) => {
                    error!("[{request_id}] handler {} failed: {e:#}", handler.name());
                    "I encountered an error while processing your request. Please try again."
                        .to_string()
                }
            },
            None => {
                "I didn't understand that. You can say 'help' to hear what I can do.".to_string()
            }
        };

        self.ctx.history.record_assistant(&reply);
        reply
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Config;
    use crate::speech::testing::{RecordingVoice, ScriptedInput};
    use crate::speech::SpeechChannel;
    use anyhow::{anyhow, Result};
    use async_trait::async_trait;

    fn ctx() -> Arc<AssistantContext> {
        Arc::new(AssistantContext::new(
            Config::default(),
            SpeechChannel::new(Box::new(RecordingVoice::new())),
            ScriptedInput::new(&[]),
        ))
    }

    struct FailingHandler;

    #[async_trait]
    impl IntentHandler for FailingHandler {
        fn intent_kinds(&self) -> &'static [IntentKind] {
            &[IntentKind::Greet]
        }

        fn name(&self) -> &'static str {
            "failing"
        }

        async fn handle(&self, _ctx: Arc<AssistantContext>, _intent: &Intent) -> Result<String> {
            Err(anyhow!("boom"))
        }
    }

    #[tokio::test]
    async fn test_respond_records_both_sides() {
        let dispatcher = Dispatcher::new(ctx());
        let reply = dispatcher.respond("hello").await;

        assert!(!reply.is_empty());
        let entries = dispatcher.context().history.recent(10);
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].text, "hello");
        assert_eq!(entries[1].text, reply);
    }

    #[tokio::test]
    async fn test_handler_error_is_contained() {
        let mut registry = HandlerRegistry::new();
        registry.register(Arc::new(FailingHandler));
        let dispatcher = Dispatcher::with_registry(ctx(), registry);

        let reply = dispatcher.respond("hello").await;
        assert!(reply.contains("error"));
        assert!(!reply.contains("boom"));
    }

    #[tokio::test]
    async fn test_unroutable_intent_gets_fallback() {
        let dispatcher = Dispatcher::with_registry(ctx(), HandlerRegistry::new());
        let reply = dispatcher.respond("hello").await;
        assert!(reply.contains("help"));
    }

    #[tokio::test]
    async fn test_smalltalk_time_routes() {
        let dispatcher = Dispatcher::new(ctx());
        let reply = dispatcher.respond("what is the time").await;
        assert!(reply.starts_with("It's "));
    }
}
