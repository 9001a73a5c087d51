// The command registry - the single name -> handler mapping.
//
// Built once at startup, read-only afterwards (shared behind an Arc), so no
// locking is needed on the dispatch path. There is deliberately no removal
// operation: the command set is static for the life of the process.

use super::descriptor::CommandDescriptor;
use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use thiserror::Error;

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// A command handler: borrows the invocation context for the duration of the
/// call. Plain fn pointers keep the registry `Copy`-friendly and testable.
pub type HandlerFn<C> =
    for<'a> fn(&'a C) -> BoxFuture<'a, Result<(), crate::core::dispatch::CommandError>>;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("command name `{0}` is already registered")]
    DuplicateName(String),
}

pub struct RegisteredCommand<C> {
    pub descriptor: CommandDescriptor,
    pub handler: HandlerFn<C>,
}

/// Insertion-ordered mapping from lowercase command name to descriptor and
/// handler. Insertion order matters: the category index derives its grouping
/// order from iteration order here.
pub struct CommandRegistry<C> {
    commands: Vec<RegisteredCommand<C>>,
    by_name: HashMap<String, usize>,
}

impl<C> CommandRegistry<C> {
    pub fn new() -> Self {
        Self {
            commands: Vec::new(),
            by_name: HashMap::new(),
        }
    }

    /// Register a command. Names are normalized to lowercase here, so
    /// `resolve` is case-insensitive by construction.
    pub fn register(
        &mut self,
        descriptor: CommandDescriptor,
        handler: HandlerFn<C>,
    ) -> Result<(), RegistryError> {
        let name = descriptor.name.to_lowercase();
        if self.by_name.contains_key(&name) {
            return Err(RegistryError::DuplicateName(name));
        }

        let descriptor = CommandDescriptor {
            name: name.clone(),
            ..descriptor
        };
        self.commands.push(RegisteredCommand { descriptor, handler });
        self.by_name.insert(name, self.commands.len() - 1);
        Ok(())
    }

    /// Case-insensitive lookup. `None` means the dispatcher fails closed.
    pub fn resolve(&self, name: &str) -> Option<&RegisteredCommand<C>> {
        let idx = *self.by_name.get(&name.to_lowercase())?;
        self.commands.get(idx)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(&name.to_lowercase())
    }

    /// Commands in registration order.
    pub fn commands(&self) -> impl Iterator<Item = &RegisteredCommand<C>> {
        self.commands.iter()
    }

    pub fn descriptors(&self) -> impl Iterator<Item = &CommandDescriptor> {
        self.commands.iter().map(|c| &c.descriptor)
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

impl<C> Default for CommandRegistry<C> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::dispatch::CommandError;
    use crate::core::registry::Category;

    fn noop(_cx: &()) -> BoxFuture<'_, Result<(), CommandError>> {
        Box::pin(async { Ok(()) })
    }

    fn descriptor(name: &str) -> CommandDescriptor {
        CommandDescriptor::new(name, "test command", Category::Information)
    }

    #[test]
    fn resolve_is_case_insensitive() {
        let mut registry: CommandRegistry<()> = CommandRegistry::new();
        registry.register(descriptor("Ping"), noop).unwrap();

        for variant in ["ping", "PING", "Ping", "pInG"] {
            assert!(registry.resolve(variant).is_some(), "variant {variant}");
            assert_eq!(registry.resolve(variant).unwrap().descriptor.name, "ping");
        }
    }

    #[test]
    fn duplicate_name_is_rejected() {
        let mut registry: CommandRegistry<()> = CommandRegistry::new();
        registry.register(descriptor("ping"), noop).unwrap();

        let err = registry.register(descriptor("PING"), noop).unwrap_err();
        assert_eq!(err, RegistryError::DuplicateName("ping".to_string()));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn resolve_unknown_returns_none() {
        let registry: CommandRegistry<()> = CommandRegistry::new();
        assert!(registry.resolve("pong").is_none());
        assert!(!registry.contains("pong"));
    }

    #[test]
    fn iteration_preserves_registration_order() {
        let mut registry: CommandRegistry<()> = CommandRegistry::new();
        for name in ["zebra", "apple", "mango"] {
            registry.register(descriptor(name), noop).unwrap();
        }

        let names: Vec<_> = registry.descriptors().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["zebra", "apple", "mango"]);
    }
}
