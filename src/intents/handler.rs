//! The trait every intent handler implements.

use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;

use super::classifier::{Intent, IntentKind};
use super::context::AssistantContext;

/// One handler serves one or more intent kinds. `handle` returns the
/// assistant's spoken reply; errors are contained by the dispatcher and
/// never reach the user raw.
#[async_trait]
pub trait IntentHandler: Send + Sync {
    /// The intent kinds this handler answers for.
    fn intent_kinds(&self) -> &'static [IntentKind];

    /// A short name for logging.
    fn name(&self) -> &'static str;

    async fn handle(&self, ctx: Arc<AssistantContext>, intent: &Intent) -> Result<String>;
}
