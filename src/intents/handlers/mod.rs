//! Built-in intent handlers.

pub mod browse;
pub mod email;
pub mod lookup;
pub mod remind;
pub mod smalltalk;
pub mod utility;

use std::sync::Arc;

use super::registry::HandlerRegistry;

/// Registry with every built-in handler registered.
pub fn default_registry() -> HandlerRegistry {
    let mut registry = HandlerRegistry::new();
    registry.register(Arc::new(smalltalk::SmalltalkHandler));
    registry.register(Arc::new(remind::RemindHandler));
    registry.register(Arc::new(lookup::LookupHandler));
    registry.register(Arc::new(browse::BrowseHandler));
    registry.register(Arc::new(email::EmailHandler));
    registry.register(Arc::new(utility::UtilityHandler));
    registry
}
