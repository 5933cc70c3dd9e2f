//! Command handlers and the registry that resolves them by key.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;

use crate::bag::ArgumentBag;
use crate::types::BoxError;

/// Async handler invoked when its command is the deepest match.
///
/// Implementations read resolved values from the bag and perform the
/// command's work. Returned errors are wrapped with the command verb before
/// surfacing to the caller.
///
/// # Examples
///
/// ```
/// use async_trait::async_trait;
/// use console_args::{ArgumentBag, BoxError, CommandHandler};
///
/// struct GreetHandler;
///
/// #[async_trait]
/// impl CommandHandler for GreetHandler {
///     async fn handle(&self, arguments: &ArgumentBag) -> Result<(), BoxError> {
///         println!("hello, {}", arguments.value_by_name("name").unwrap_or("world"));
///         Ok(())
///     }
/// }
/// ```
#[async_trait]
pub trait CommandHandler: Send + Sync {
    /// Runs the command against its resolved arguments.
    async fn handle(&self, arguments: &ArgumentBag) -> Result<(), BoxError>;
}

/// Maps opaque string keys to command handlers.
///
/// Commands reference handlers by key at configuration time; the registry
/// supplies the instances at dispatch time, keeping the schema free of
/// handler construction concerns. A key with no registered handler is not an
/// error at registration or configuration time; dispatch falls back to the
/// default handler.
#[derive(Default)]
pub struct HandlerRegistry {
    handlers: HashMap<String, Arc<dyn CommandHandler>>,
}

impl HandlerRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a handler under a key, replacing any previous entry.
    pub fn register<H>(&mut self, key: &str, handler: H) -> &mut Self
    where
        H: CommandHandler + 'static,
    {
        self.handlers.insert(key.to_string(), Arc::new(handler));
        self
    }

    /// Looks up a handler by key.
    pub fn get(&self, key: &str) -> Option<Arc<dyn CommandHandler>> {
        self.handlers.get(key).cloned()
    }

    /// Whether a handler is registered under this key.
    pub fn contains(&self, key: &str) -> bool {
        self.handlers.contains_key(key)
    }

    /// Number of registered handlers.
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl fmt::Debug for HandlerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut keys: Vec<&str> = self.handlers.keys().map(String::as_str).collect();
        keys.sort_unstable();
        f.debug_struct("HandlerRegistry").field("keys", &keys).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct RecordingHandler;

    #[async_trait]
    impl CommandHandler for RecordingHandler {
        async fn handle(&self, _arguments: &ArgumentBag) -> Result<(), BoxError> {
            Ok(())
        }
    }

    #[test]
    fn test_register_and_lookup() {
        let mut registry = HandlerRegistry::new();
        registry.register("group.create", RecordingHandler);

        assert!(registry.contains("group.create"));
        assert!(registry.get("group.create").is_some());
        assert!(registry.get("group.delete").is_none());
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_reregistration_replaces() {
        let mut registry = HandlerRegistry::new();
        registry.register("key", RecordingHandler);
        registry.register("key", RecordingHandler);

        assert_eq!(registry.len(), 1);
    }

    #[tokio::test]
    async fn test_handler_invocation() {
        let mut registry = HandlerRegistry::new();
        registry.register("key", RecordingHandler);

        let handler = registry.get("key").unwrap();
        assert!(handler.handle(&ArgumentBag::new()).await.is_ok());
    }
}
