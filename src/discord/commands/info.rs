// Informational commands: ping and a bot overview.

use crate::core::dispatch::CommandError;
use crate::core::registry::{Category, CommandDescriptor};
use crate::core::timeparse::format_duration;
use crate::discord::commands::CommandCtx;
use std::time::Duration;

// First second of 2015, the epoch Discord snowflakes count from.
const DISCORD_EPOCH_MS: u64 = 1_420_070_400_000;

pub fn ping_descriptor() -> CommandDescriptor {
    CommandDescriptor::new("ping", "Check that the bot is alive.", Category::Information)
}

pub async fn ping(cx: &CommandCtx) -> Result<(), CommandError> {
    // Age of the interaction snowflake approximates the inbound leg.
    let created_ms = (cx.interaction.id.get() >> 22) + DISCORD_EPOCH_MS;
    let now_ms = chrono::Utc::now().timestamp_millis().max(0) as u64;
    let inbound_ms = now_ms.saturating_sub(created_ms);

    cx.reply
        .say(format!("Pong! Received in ~{inbound_ms} ms."))
        .await?;
    Ok(())
}

pub fn info_descriptor() -> CommandDescriptor {
    CommandDescriptor::new(
        "info",
        "Show what this bot is and what it can do.",
        Category::Information,
    )
}

pub async fn info(cx: &CommandCtx) -> Result<(), CommandError> {
    let uptime = chrono::Utc::now()
        .signed_duration_since(cx.data.started_at)
        .to_std()
        .unwrap_or(Duration::ZERO);

    let scope = if cx.data.config.guild_id.is_some() {
        "this server"
    } else {
        "all servers"
    };

    let content = format!(
        "**Commandery** v{version}\n\
         Moderation, fun, and info commands - see `/help` for the full list.\n\n\
         Commands registered: **{count}** (in {scope})\n\
         Up for: **{uptime}**",
        version = env!("CARGO_PKG_VERSION"),
        count = cx.data.registry.len(),
        scope = scope,
        uptime = format_duration(uptime),
    );

    cx.reply.say(content).await?;
    Ok(())
}
