//! # Handler Registry
//!
//! Maps intent kinds to their handlers. Registration happens once at
//! startup; lookups are read-only afterwards.
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0

use std::collections::HashMap;
use std::sync::Arc;

use log::{debug, warn};

use super::classifier::IntentKind;
use super::handler::IntentHandler;

#[derive(Default)]
pub struct HandlerRegistry {
    handlers: HashMap<IntentKind, Arc<dyn IntentHandler>>,
}

impl HandlerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler for every intent kind it declares. A duplicate
    /// registration replaces the previous handler and logs a warning.
    pub fn register(&mut self, handler: Arc<dyn IntentHandler>) {
        for kind in handler.intent_kinds() {
            if let Some(previous) = self.handlers.insert(*kind, handler.clone()) {
                warn!(
                    "handler {} replaces {} for intent {}",
                    handler.name(),
                    previous.name(),
                    kind.as_str()
                );
            } else {
                debug!("registered {} for intent {}", handler.name(), kind.as_str());
            }
        }
    }

    pub fn get(&self, kind: IntentKind) -> Option<Arc<dyn IntentHandler>> {
        self.handlers.get(&kind).cloned()
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}
