//! Flat command registry.
//!
//! Associates command names with handlers and their optional completion and
//! validation engines. Registrations are immutable once inserted;
//! re-registering a name silently replaces the earlier entry.

use std::collections::BTreeMap;
use std::sync::Arc;

use argshell_core::{Completer, Validator};
use tracing::debug;

/// Error type handlers may return; the message is what the user sees.
pub type HandlerError = Box<dyn std::error::Error + Send + Sync>;

/// Command handler: receives the full token list, command name at index 0.
///
/// Handlers are shared (`Arc`) so an invocation can run them on a worker
/// thread while the registration stays in the registry.
pub type Handler = Arc<dyn Fn(&[String]) -> Result<(), HandlerError> + Send + Sync>;

/// One registered command: name, description, handler, and optional
/// completion/validation engines.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use argshell_engine::CommandRegistration;
///
/// let reg = CommandRegistration::new(
///     "status",
///     "Show service status",
///     Arc::new(|_args| Ok(())),
/// );
/// assert_eq!(reg.name, "status");
/// assert!(reg.completer.is_none());
/// ```
#[derive(Clone)]
pub struct CommandRegistration {
    /// Command name as typed at the prompt.
    pub name: String,
    /// One-line description shown by `help`.
    pub description: String,
    /// Handler invoked after validation passes.
    pub handler: Handler,
    /// Tab-completion engine for this command's arguments.
    pub completer: Option<Completer>,
    /// Argument validator; runs before the handler.
    pub validator: Option<Validator>,
}

impl CommandRegistration {
    /// Creates a registration with no completion or validation engines.
    pub fn new(name: impl Into<String>, description: impl Into<String>, handler: Handler) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            handler,
            completer: None,
            validator: None,
        }
    }

    /// Attaches a completion/validation engine pair, typically from
    /// [`argshell_core::schema_engines`].
    pub fn with_engines(mut self, completer: Completer, validator: Validator) -> Self {
        self.completer = Some(completer);
        self.validator = Some(validator);
        self
    }
}

impl std::fmt::Debug for CommandRegistration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommandRegistration")
            .field("name", &self.name)
            .field("description", &self.description)
            .field("has_completer", &self.completer.is_some())
            .field("has_validator", &self.validator.is_some())
            .finish()
    }
}

/// Name-keyed command table.
///
/// Kept sorted by name so the `help` listing and command-name completion
/// come out in a stable order.
#[derive(Debug, Default)]
pub struct CommandRegistry {
    commands: BTreeMap<String, CommandRegistration>,
}

impl CommandRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a registration, silently replacing any existing command with
    /// the same name.
    pub fn register(&mut self, registration: CommandRegistration) {
        if self.commands.contains_key(&registration.name) {
            debug!(command = %registration.name, "replacing existing registration");
        }
        self.commands
            .insert(registration.name.clone(), registration);
    }

    /// Looks up a command by exact name.
    pub fn get(&self, name: &str) -> Option<&CommandRegistration> {
        self.commands.get(name)
    }

    /// All command names, sorted.
    pub fn names(&self) -> Vec<&str> {
        self.commands.keys().map(String::as_str).collect()
    }

    /// Iterates registrations in name order.
    pub fn iter(&self) -> impl Iterator<Item = &CommandRegistration> {
        self.commands.values()
    }

    /// Number of registered commands.
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// True when no commands are registered.
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn noop(name: &str, description: &str) -> CommandRegistration {
        CommandRegistration::new(name, description, Arc::new(|_args| Ok(())))
    }

    #[test]
    fn test_register_and_lookup() {
        let mut registry = CommandRegistry::new();
        registry.register(noop("status", "Show status"));

        let reg = registry.get("status").unwrap();
        assert_eq!(reg.description, "Show status");
        assert!(registry.get("stat").is_none());
    }

    #[test]
    fn test_reregister_silently_replaces() {
        let mut registry = CommandRegistry::new();
        registry.register(noop("status", "old"));
        registry.register(noop("status", "new"));

        assert_eq!(registry.len(), 1);
        assert_eq!(registry.get("status").unwrap().description, "new");
    }

    #[test]
    fn test_names_are_sorted() {
        let mut registry = CommandRegistry::new();
        registry.register(noop("stop", ""));
        registry.register(noop("help", ""));
        registry.register(noop("start", ""));

        assert_eq!(registry.names(), vec!["help", "start", "stop"]);
    }
}
