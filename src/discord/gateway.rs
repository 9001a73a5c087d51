// Gateway adapter: receives interaction events from serenity, normalizes
// them into core invocations, and hands them to the dispatcher. Events reach
// this boundary in arrival order; handler completion order is up to the
// runtime.

use crate::core::dispatch::{Dispatcher, Invocation, OptionValue, ReplyHandle};
use crate::discord::commands::{BotData, CommandCtx};
use crate::discord::registrar;
use crate::discord::reply::InteractionReplyTransport;
use serenity::all::{
    Command, CommandDataOption, CommandDataOptionValue, CommandInteraction, GuildId, Interaction,
    Ready,
};
use serenity::async_trait;
use serenity::prelude::{Context, EventHandler};
use std::sync::Arc;

pub struct Handler {
    pub dispatcher: Dispatcher<CommandCtx>,
    pub data: Arc<BotData>,
}

#[async_trait]
impl EventHandler for Handler {
    async fn ready(&self, ctx: Context, ready: Ready) {
        tracing::info!(
            user = %ready.user.name,
            guilds = ready.guilds.len(),
            "gateway session ready"
        );

        let payloads = registrar::registration_payloads(self.dispatcher.registry().as_ref());
        let registered = match self.data.config.guild_id {
            Some(guild_id) => {
                GuildId::new(guild_id)
                    .set_commands(&ctx.http, payloads)
                    .await
            }
            None => Command::set_global_commands(&ctx.http, payloads).await,
        };

        match registered {
            Ok(commands) => {
                tracing::info!(count = commands.len(), "slash commands registered");
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to register slash commands");
            }
        }
    }

    async fn interaction_create(&self, ctx: Context, interaction: Interaction) {
        let Interaction::Command(command) = interaction else {
            // Component interactions are collected by whichever prompt owns
            // them; everything else is not ours.
            return;
        };

        let invocation = normalize(&command);
        let transport = Arc::new(InteractionReplyTransport::new(
            ctx.http.clone(),
            command.clone(),
        ));

        let cx = CommandCtx {
            serenity: ctx,
            interaction: command,
            invocation,
            reply: ReplyHandle::new(transport),
            data: Arc::clone(&self.data),
        };

        let outcome = self.dispatcher.dispatch(&cx).await;
        tracing::debug!(
            command = %cx.invocation.command,
            outcome = ?outcome,
            "interaction dispatched"
        );
    }
}

/// Flatten a slash-command interaction into a core invocation. One level of
/// subcommand is supported; this bot registers nothing deeper.
fn normalize(command: &CommandInteraction) -> Invocation {
    let mut invocation = Invocation::new(
        &command.data.name,
        command.user.id.get(),
        command.channel_id.get(),
    )
    .with_user_name(&command.user.name);

    if let Some(guild_id) = command.guild_id {
        invocation = invocation.with_guild(guild_id.get());
    }

    if let Some(first) = command.data.options.first() {
        if let CommandDataOptionValue::SubCommand(nested) = &first.value {
            invocation = invocation.with_subcommand(&first.name);
            for option in nested {
                invocation = push_option(invocation, option);
            }
            return invocation;
        }
    }

    for option in &command.data.options {
        invocation = push_option(invocation, option);
    }
    invocation
}

fn push_option(invocation: Invocation, option: &CommandDataOption) -> Invocation {
    let value = match &option.value {
        CommandDataOptionValue::String(s) => OptionValue::String(s.clone()),
        CommandDataOptionValue::Integer(i) => OptionValue::Integer(*i),
        CommandDataOptionValue::Boolean(b) => OptionValue::Boolean(*b),
        CommandDataOptionValue::User(id) => OptionValue::User(id.get()),
        CommandDataOptionValue::Channel(id) => OptionValue::Channel(id.get()),
        other => {
            tracing::debug!(option = %option.name, value = ?other, "skipping unsupported option kind");
            return invocation;
        }
    };
    invocation.with_option(&option.name, value)
}
