// Discord commands module.
// Each feature gets its own command file; this file owns the shared context
// types and assembles the registry the dispatcher runs against.

pub mod custom;
pub mod fun;
pub mod help;
pub mod info;
pub mod moderation;
pub mod remind;

use crate::config::BotConfig;
use crate::core::dispatch::{Invocation, InvocationCtx, ReplyHandle};
use crate::core::registry::{CommandRegistry, RegistryError};
use crate::core::store::{CustomCommandService, ReminderService};
use crate::infra::store::{InMemoryCustomCommandStore, InMemoryReminderStore};
use chrono::{DateTime, Utc};
use serenity::all::CommandInteraction;
use std::sync::Arc;

/// Shared services handed to every command handler.
pub struct BotData {
    pub config: Arc<BotConfig>,
    /// The registry rides along so help can build its category index.
    pub registry: Arc<CommandRegistry<CommandCtx>>,
    pub custom: Arc<CustomCommandService<InMemoryCustomCommandStore>>,
    pub reminders: Arc<ReminderService<InMemoryReminderStore>>,
    pub started_at: DateTime<Utc>,
}

/// Everything one invocation carries: the serenity context for SDK calls,
/// the raw interaction (needed by the selection driver), the normalized
/// invocation, the single-use reply handle, and the shared services.
pub struct CommandCtx {
    pub serenity: serenity::prelude::Context,
    pub interaction: CommandInteraction,
    pub invocation: Invocation,
    pub reply: ReplyHandle,
    pub data: Arc<BotData>,
}

impl InvocationCtx for CommandCtx {
    fn invocation(&self) -> &Invocation {
        &self.invocation
    }

    fn reply(&self) -> &ReplyHandle {
        &self.reply
    }
}

/// Build the full command registry. Fails only on a duplicate name, which is
/// a programming error caught at startup.
pub fn build_registry() -> Result<CommandRegistry<CommandCtx>, RegistryError> {
    let mut registry = CommandRegistry::new();

    // Information
    registry.register(info::ping_descriptor(), |cx| Box::pin(info::ping(cx)))?;
    registry.register(info::info_descriptor(), |cx| Box::pin(info::info(cx)))?;
    registry.register(help::descriptor(), |cx| Box::pin(help::run(cx)))?;

    // Moderation
    registry.register(moderation::lock_descriptor(), |cx| {
        Box::pin(moderation::lock(cx))
    })?;
    registry.register(moderation::unlock_descriptor(), |cx| {
        Box::pin(moderation::unlock(cx))
    })?;
    registry.register(moderation::purge_descriptor(), |cx| {
        Box::pin(moderation::purge(cx))
    })?;

    // Fun
    registry.register(fun::eightball_descriptor(), |cx| {
        Box::pin(fun::eightball(cx))
    })?;
    registry.register(fun::coinflip_descriptor(), |cx| {
        Box::pin(fun::coinflip(cx))
    })?;
    registry.register(fun::roll_descriptor(), |cx| Box::pin(fun::roll(cx)))?;
    registry.register(fun::quiz_descriptor(), |cx| Box::pin(fun::quiz(cx)))?;

    // Utility
    registry.register(remind::descriptor(), |cx| Box::pin(remind::run(cx)))?;
    registry.register(custom::descriptor(), |cx| Box::pin(custom::run(cx)))?;

    Ok(registry)
}
