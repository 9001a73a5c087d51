// In-memory implementations of the core store traits, backed by DashMap so
// concurrent handlers can touch them without an outer lock.
//
// These are intentionally non-persistent: custom commands and reminders are
// process-local and vanish on restart. A database-backed store would
// implement the same traits.

use crate::core::store::{
    CustomCommand, CustomCommandError, CustomCommandStore, Reminder, ReminderError, ReminderStore,
};
use async_trait::async_trait;
use dashmap::DashMap;

/// Key for a guild-scoped custom command. Name is stored lowercase.
#[derive(Hash, Eq, PartialEq, Clone, Debug)]
struct GuildNameKey {
    guild_id: u64,
    name: String,
}

pub struct InMemoryCustomCommandStore {
    data: DashMap<GuildNameKey, CustomCommand>,
}

impl InMemoryCustomCommandStore {
    pub fn new() -> Self {
        Self {
            data: DashMap::new(),
        }
    }
}

impl Default for InMemoryCustomCommandStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CustomCommandStore for InMemoryCustomCommandStore {
    async fn get(
        &self,
        guild_id: u64,
        name: &str,
    ) -> Result<Option<CustomCommand>, CustomCommandError> {
        let key = GuildNameKey {
            guild_id,
            name: name.to_string(),
        };
        Ok(self.data.get(&key).map(|entry| entry.clone()))
    }

    async fn set(&self, command: CustomCommand) -> Result<(), CustomCommandError> {
        let key = GuildNameKey {
            guild_id: command.guild_id,
            name: command.name.clone(),
        };
        self.data.insert(key, command);
        Ok(())
    }

    async fn delete(&self, guild_id: u64, name: &str) -> Result<bool, CustomCommandError> {
        let key = GuildNameKey {
            guild_id,
            name: name.to_string(),
        };
        Ok(self.data.remove(&key).is_some())
    }

    async fn list(&self, guild_id: u64) -> Result<Vec<CustomCommand>, CustomCommandError> {
        Ok(self
            .data
            .iter()
            .filter(|entry| entry.key().guild_id == guild_id)
            .map(|entry| entry.value().clone())
            .collect())
    }
}

pub struct InMemoryReminderStore {
    data: DashMap<u64, Reminder>,
}

impl InMemoryReminderStore {
    pub fn new() -> Self {
        Self {
            data: DashMap::new(),
        }
    }
}

impl Default for InMemoryReminderStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ReminderStore for InMemoryReminderStore {
    async fn add(&self, reminder: Reminder) -> Result<(), ReminderError> {
        self.data.insert(reminder.id, reminder);
        Ok(())
    }

    async fn list_for_user(&self, user_id: u64) -> Result<Vec<Reminder>, ReminderError> {
        Ok(self
            .data
            .iter()
            .filter(|entry| entry.value().user_id == user_id)
            .map(|entry| entry.value().clone())
            .collect())
    }

    async fn remove(&self, id: u64) -> Result<Option<Reminder>, ReminderError> {
        Ok(self.data.remove(&id).map(|(_, reminder)| reminder))
    }
}
