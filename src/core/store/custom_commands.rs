// Guild custom commands - short named text snippets members can define and
// recall. The store is a plain get/set/delete contract so handlers never
// touch a concrete map; the in-memory implementation lives in infra and a
// database-backed one can slot in behind the same trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;

pub const MAX_NAME_LEN: usize = 32;
pub const MAX_BODY_LEN: usize = 1500;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CustomCommandError {
    #[error("storage error: {0}")]
    Storage(String),

    #[error("custom command names must be 1-{MAX_NAME_LEN} characters: letters, digits, `-` or `_`")]
    InvalidName,

    #[error("custom command text must be 1-{MAX_BODY_LEN} characters")]
    InvalidBody,

    #[error("`{0}` is a built-in command name")]
    ReservedName(String),

    #[error("a custom command named `{0}` already exists")]
    AlreadyExists(String),

    #[error("no custom command named `{0}` here")]
    NotFound(String),
}

/// One stored snippet, keyed by (guild, lowercase name).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomCommand {
    pub guild_id: u64,
    pub name: String,
    pub body: String,
    pub author_id: u64,
    pub created_at: DateTime<Utc>,
}

/// Persistence contract for custom commands.
#[async_trait]
pub trait CustomCommandStore: Send + Sync {
    async fn get(
        &self,
        guild_id: u64,
        name: &str,
    ) -> Result<Option<CustomCommand>, CustomCommandError>;

    /// Insert or overwrite. The service decides whether overwriting is legal.
    async fn set(&self, command: CustomCommand) -> Result<(), CustomCommandError>;

    /// Returns whether anything was removed.
    async fn delete(&self, guild_id: u64, name: &str) -> Result<bool, CustomCommandError>;

    async fn list(&self, guild_id: u64) -> Result<Vec<CustomCommand>, CustomCommandError>;
}

/// Validating service over a [`CustomCommandStore`].
///
/// Holds the built-in command names so a custom command can never shadow a
/// registered slash command.
pub struct CustomCommandService<S: CustomCommandStore> {
    store: S,
    reserved: Vec<String>,
}

impl<S: CustomCommandStore> CustomCommandService<S> {
    pub fn new(store: S, reserved: Vec<String>) -> Self {
        Self { store, reserved }
    }

    fn validate_name(&self, raw: &str) -> Result<String, CustomCommandError> {
        let name = raw.trim().to_lowercase();
        if name.is_empty() || name.len() > MAX_NAME_LEN {
            return Err(CustomCommandError::InvalidName);
        }
        if !name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        {
            return Err(CustomCommandError::InvalidName);
        }
        if self.reserved.iter().any(|r| r == &name) {
            return Err(CustomCommandError::ReservedName(name));
        }
        Ok(name)
    }

    pub async fn define(
        &self,
        guild_id: u64,
        name: &str,
        body: &str,
        author_id: u64,
    ) -> Result<CustomCommand, CustomCommandError> {
        let name = self.validate_name(name)?;

        let body = body.trim();
        if body.is_empty() || body.len() > MAX_BODY_LEN {
            return Err(CustomCommandError::InvalidBody);
        }

        if self.store.get(guild_id, &name).await?.is_some() {
            return Err(CustomCommandError::AlreadyExists(name));
        }

        let command = CustomCommand {
            guild_id,
            name,
            body: body.to_string(),
            author_id,
            created_at: Utc::now(),
        };
        self.store.set(command.clone()).await?;
        Ok(command)
    }

    pub async fn fetch(
        &self,
        guild_id: u64,
        name: &str,
    ) -> Result<CustomCommand, CustomCommandError> {
        let name = name.trim().to_lowercase();
        self.store
            .get(guild_id, &name)
            .await?
            .ok_or(CustomCommandError::NotFound(name))
    }

    pub async fn remove(&self, guild_id: u64, name: &str) -> Result<(), CustomCommandError> {
        let name = name.trim().to_lowercase();
        if self.store.delete(guild_id, &name).await? {
            Ok(())
        } else {
            Err(CustomCommandError::NotFound(name))
        }
    }

    /// All snippets for a guild, name-sorted for stable display.
    pub async fn list(&self, guild_id: u64) -> Result<Vec<CustomCommand>, CustomCommandError> {
        let mut commands = self.store.list(guild_id).await?;
        commands.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(commands)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dashmap::DashMap;

    #[derive(Default)]
    struct MockStore {
        data: DashMap<(u64, String), CustomCommand>,
    }

    #[async_trait]
    impl CustomCommandStore for MockStore {
        async fn get(
            &self,
            guild_id: u64,
            name: &str,
        ) -> Result<Option<CustomCommand>, CustomCommandError> {
            Ok(self
                .data
                .get(&(guild_id, name.to_string()))
                .map(|e| e.clone()))
        }

        async fn set(&self, command: CustomCommand) -> Result<(), CustomCommandError> {
            self.data
                .insert((command.guild_id, command.name.clone()), command);
            Ok(())
        }

        async fn delete(&self, guild_id: u64, name: &str) -> Result<bool, CustomCommandError> {
            Ok(self.data.remove(&(guild_id, name.to_string())).is_some())
        }

        async fn list(&self, guild_id: u64) -> Result<Vec<CustomCommand>, CustomCommandError> {
            Ok(self
                .data
                .iter()
                .filter(|e| e.key().0 == guild_id)
                .map(|e| e.value().clone())
                .collect())
        }
    }

    fn service() -> CustomCommandService<MockStore> {
        CustomCommandService::new(
            MockStore::default(),
            vec!["ping".to_string(), "help".to_string()],
        )
    }

    #[tokio::test]
    async fn define_then_fetch_round_trips() {
        let service = service();

        let defined = service.define(1, "Greet", "Hello there!", 42).await.unwrap();
        assert_eq!(defined.name, "greet");

        let fetched = service.fetch(1, "GREET").await.unwrap();
        assert_eq!(fetched.body, "Hello there!");
        assert_eq!(fetched.author_id, 42);
    }

    #[tokio::test]
    async fn built_in_names_are_reserved() {
        let service = service();
        let err = service.define(1, "ping", "pong", 42).await.unwrap_err();
        assert_eq!(err, CustomCommandError::ReservedName("ping".to_string()));
    }

    #[tokio::test]
    async fn duplicate_definitions_are_rejected() {
        let service = service();
        service.define(1, "greet", "hi", 42).await.unwrap();

        let err = service.define(1, "greet", "hello", 43).await.unwrap_err();
        assert_eq!(err, CustomCommandError::AlreadyExists("greet".to_string()));

        // Same name in another guild is fine.
        service.define(2, "greet", "hello", 43).await.unwrap();
    }

    #[tokio::test]
    async fn bad_names_and_bodies_are_validation_errors() {
        let service = service();

        for bad in ["", "has space", "wa!t", &"x".repeat(MAX_NAME_LEN + 1)] {
            let err = service.define(1, bad, "body", 42).await.unwrap_err();
            assert_eq!(err, CustomCommandError::InvalidName, "name {bad:?}");
        }

        let err = service.define(1, "ok", "", 42).await.unwrap_err();
        assert_eq!(err, CustomCommandError::InvalidBody);
        let err = service
            .define(1, "ok", &"x".repeat(MAX_BODY_LEN + 1), 42)
            .await
            .unwrap_err();
        assert_eq!(err, CustomCommandError::InvalidBody);
    }

    #[tokio::test]
    async fn remove_missing_is_not_found() {
        let service = service();
        let err = service.remove(1, "ghost").await.unwrap_err();
        assert_eq!(err, CustomCommandError::NotFound("ghost".to_string()));

        service.define(1, "greet", "hi", 42).await.unwrap();
        service.remove(1, "greet").await.unwrap();
        assert!(service.fetch(1, "greet").await.is_err());
    }

    #[tokio::test]
    async fn list_is_name_sorted_and_guild_scoped() {
        let service = service();
        service.define(1, "zeta", "z", 1).await.unwrap();
        service.define(1, "alpha", "a", 1).await.unwrap();
        service.define(2, "other", "o", 1).await.unwrap();

        let listed = service.list(1).await.unwrap();
        let names: Vec<_> = listed.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["alpha", "zeta"]);
    }
}
