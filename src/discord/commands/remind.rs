// The remind command: set / list / cancel. Pending reminders live in the
// in-memory store; delivery is a spawned timer that claims the reminder
// before pinging, so a cancelled reminder never fires.

use crate::core::dispatch::CommandError;
use crate::core::registry::{Category, CommandDescriptor, ParamKind, ParamSpec, SubcommandSpec};
use crate::core::store::Reminder;
use crate::core::timeparse::{format_duration, parse_duration};
use crate::discord::commands::{BotData, CommandCtx};
use serenity::all::{ChannelId, CreateAllowedMentions, CreateMessage, UserId};
use serenity::http::Http;
use std::sync::Arc;
use std::time::Duration;

const DEFAULT_LEAD: Duration = Duration::from_secs(60);

pub fn descriptor() -> CommandDescriptor {
    CommandDescriptor::new("remind", "Reminders: the bot pings you later.", Category::Utility)
        .subcommand(SubcommandSpec {
            name: "set",
            description: "Set a reminder.",
            params: vec![
                ParamSpec::required("message", "What to remind you about", ParamKind::String),
                ParamSpec::optional(
                    "in",
                    "When, e.g. '30 minutes', '2h', '1 day' (default 1 minute)",
                    ParamKind::String,
                ),
            ],
        })
        .subcommand(SubcommandSpec {
            name: "list",
            description: "List your pending reminders.",
            params: vec![],
        })
        .subcommand(SubcommandSpec {
            name: "cancel",
            description: "Cancel one of your reminders.",
            params: vec![ParamSpec::required(
                "id",
                "Reminder number from /remind list",
                ParamKind::Integer,
            )],
        })
}

pub async fn run(cx: &CommandCtx) -> Result<(), CommandError> {
    match cx.invocation.subcommand.as_deref() {
        Some("set") => set(cx).await,
        Some("list") => list(cx).await,
        Some("cancel") => cancel(cx).await,
        _ => Err(CommandError::validation(
            "Use `/remind set`, `/remind list`, or `/remind cancel`.",
        )),
    }
}

async fn set(cx: &CommandCtx) -> Result<(), CommandError> {
    let message = cx
        .invocation
        .str_opt("message")
        .ok_or_else(|| CommandError::validation("A reminder message is required."))?;

    let lead = match cx.invocation.str_opt("in") {
        None => DEFAULT_LEAD,
        Some(raw) => parse_duration(raw).ok_or_else(|| {
            CommandError::validation(
                "I couldn't read that time. Try `30 seconds`, `5m`, `2 hours`, or `1 day`.",
            )
        })?,
    };

    let reminder = cx
        .data
        .reminders
        .schedule(
            cx.invocation.user_id,
            cx.invocation.channel_id,
            cx.invocation.guild_id,
            message,
            lead,
        )
        .await?;

    spawn_delivery(cx.serenity.http.clone(), Arc::clone(&cx.data), reminder.clone(), lead);

    cx.reply
        .say_ephemeral(format!(
            "⏰ Reminder #{} set - I'll ping you in {}.",
            reminder.id,
            format_duration(lead)
        ))
        .await?;
    Ok(())
}

/// Timer task for one reminder. Claims the reminder from the store after the
/// sleep; a cancelled reminder yields nothing to claim and nothing is sent.
fn spawn_delivery(http: Arc<Http>, data: Arc<BotData>, reminder: Reminder, lead: Duration) {
    tokio::spawn(async move {
        tokio::time::sleep(lead).await;

        let claimed = match data.reminders.claim(reminder.id).await {
            Ok(claimed) => claimed,
            Err(err) => {
                tracing::error!(reminder_id = reminder.id, error = %err, "failed to claim reminder");
                return;
            }
        };
        let Some(reminder) = claimed else {
            return; // cancelled in the meantime
        };

        let content = format!("<@{}> ⏰ Reminder: {}", reminder.user_id, reminder.message);
        let builder = CreateMessage::new().content(content).allowed_mentions(
            CreateAllowedMentions::new().users(vec![UserId::new(reminder.user_id)]),
        );

        if let Err(err) = ChannelId::new(reminder.channel_id)
            .send_message(&http, builder)
            .await
        {
            tracing::error!(
                reminder_id = reminder.id,
                channel_id = reminder.channel_id,
                error = %err,
                "failed to deliver reminder"
            );
        }
    });
}

async fn list(cx: &CommandCtx) -> Result<(), CommandError> {
    let pending = cx.data.reminders.pending_for(cx.invocation.user_id).await?;
    if pending.is_empty() {
        cx.reply
            .say_ephemeral("You have no pending reminders.")
            .await?;
        return Ok(());
    }

    let now = chrono::Utc::now();
    let mut lines = vec!["**Your pending reminders**".to_string()];
    for reminder in &pending {
        let until = reminder
            .due_at
            .signed_duration_since(now)
            .to_std()
            .unwrap_or(Duration::ZERO);
        lines.push(format!(
            "`#{}` in {} - {}",
            reminder.id,
            format_duration(until),
            reminder.message
        ));
    }

    cx.reply.say_ephemeral(lines.join("\n")).await?;
    Ok(())
}

async fn cancel(cx: &CommandCtx) -> Result<(), CommandError> {
    let id = cx
        .invocation
        .int_opt("id")
        .filter(|id| *id > 0)
        .ok_or_else(|| CommandError::validation("A reminder number is required."))?;

    let cancelled = cx
        .data
        .reminders
        .cancel(cx.invocation.user_id, id as u64)
        .await?;

    cx.reply
        .say_ephemeral(format!(
            "🗑️ Cancelled reminder #{}: {}",
            cancelled.id, cancelled.message
        ))
        .await?;
    Ok(())
}
