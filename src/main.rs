// Entry point of the Discord bot.
//
// **Architecture Overview:**
// - `core/` = Registry, dispatch, selection, and store logic (platform-agnostic)
// - `infra/` = Implementations of the core store traits
// - `discord/` = Serenity adapters (gateway, reply transport, command handlers)
//
// This file's job is to:
// 1. Load configuration
// 2. Build the command registry and shared services
// 3. Start the gateway client

// These attrs point each module declaration at a more descriptive root file
// so we don't end up with a pile of identical-looking mod.rs files.
#[path = "core/core_layer.rs"]
mod core;
#[path = "discord/discord_layer.rs"]
mod discord;
#[path = "infra/infra_layer.rs"]
mod infra;

mod config;

use crate::config::BotConfig;
use crate::core::dispatch::Dispatcher;
use crate::core::store::{CustomCommandService, ReminderService};
use crate::discord::commands::{build_registry, BotData};
use crate::discord::gateway::Handler;
use crate::infra::store::{InMemoryCustomCommandStore, InMemoryReminderStore};
use serenity::all::ApplicationId;
use serenity::prelude::GatewayIntents;
use std::sync::Arc;

#[tokio::main]
async fn main() {
    // Initialize logging so we can see what's happening
    tracing_subscriber::fmt::init();

    // Load environment variables from .env file (if it exists)
    dotenv::dotenv().ok();

    let config = Arc::new(BotConfig::from_env().expect(
        "Invalid configuration! Set DISCORD_TOKEN (and optionally APPLICATION_ID, \
         GUILD_ID, STAFF_LOG_CHANNEL_ID) in the environment or a .env file.",
    ));

    // ========================================================================
    // DEPENDENCY INJECTION
    // ========================================================================
    // Build the registry once, then wire the services that command handlers
    // receive through their context.

    let registry = Arc::new(build_registry().expect("Duplicate command name in registry"));

    // Custom commands may never shadow a built-in, so the service gets the
    // registered names up front.
    let reserved: Vec<String> = registry.descriptors().map(|d| d.name.clone()).collect();
    let custom = Arc::new(CustomCommandService::new(
        InMemoryCustomCommandStore::new(),
        reserved,
    ));
    let reminders = Arc::new(ReminderService::new(InMemoryReminderStore::new()));

    let data = Arc::new(BotData {
        config: Arc::clone(&config),
        registry: Arc::clone(&registry),
        custom,
        reminders,
        started_at: chrono::Utc::now(),
    });

    tracing::info!(
        commands = registry.len(),
        guild_scoped = config.guild_id.is_some(),
        staff_log = config.staff_log_channel_id.is_some(),
        "starting bot"
    );

    // ========================================================================
    // GATEWAY CLIENT
    // ========================================================================
    // Slash commands arrive as interactions; no message-content intent needed.

    let handler = Handler {
        dispatcher: Dispatcher::new(registry),
        data,
    };

    let intents = GatewayIntents::GUILDS;
    let mut builder =
        serenity::prelude::Client::builder(&config.token, intents).event_handler(handler);
    if let Some(application_id) = config.application_id {
        builder = builder.application_id(ApplicationId::new(application_id));
    }

    let mut client = builder.await.expect("Error creating client");
    client.start().await.expect("Error running bot");
}
