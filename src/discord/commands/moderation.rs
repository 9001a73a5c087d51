// Moderation commands: lock/unlock the current channel and purge recent
// messages. All three are permission-gated twice: registration-time default
// member permissions, and a runtime check against the invoking member.
// Every completed action is echoed to the staff-log channel.

use crate::core::dispatch::CommandError;
use crate::core::registry::{Category, CommandDescriptor, ParamKind, ParamSpec};
use crate::discord::commands::CommandCtx;
use crate::discord::staff_log;
use serenity::all::{
    GetMessages, MessageId, PermissionOverwrite, PermissionOverwriteType, Permissions, RoleId,
};

pub const MIN_PURGE: i64 = 1;
pub const MAX_PURGE: i64 = 100;

pub fn lock_descriptor() -> CommandDescriptor {
    CommandDescriptor::new(
        "lock",
        "Stop everyone from sending messages in this channel.",
        Category::Moderation,
    )
    .moderator_only()
}

pub fn unlock_descriptor() -> CommandDescriptor {
    CommandDescriptor::new(
        "unlock",
        "Let everyone send messages in this channel again.",
        Category::Moderation,
    )
    .moderator_only()
}

pub fn purge_descriptor() -> CommandDescriptor {
    CommandDescriptor::new(
        "purge",
        "Bulk-delete recent messages in this channel.",
        Category::Moderation,
    )
    .param(ParamSpec::required(
        "amount",
        "How many messages to delete (1-100)",
        ParamKind::Integer,
    ))
    .moderator_only()
}

/// Guild id, or a validation error for DM invocations.
fn require_guild(cx: &CommandCtx) -> Result<u64, CommandError> {
    cx.invocation
        .guild_id
        .ok_or_else(|| CommandError::validation("This command only works in servers."))
}

/// Runtime permission check. Interaction payloads carry the member's
/// resolved permissions in the invoking channel.
fn require_permission(cx: &CommandCtx, needed: Permissions) -> Result<(), CommandError> {
    let allowed = cx
        .interaction
        .member
        .as_ref()
        .and_then(|member| member.permissions)
        .map_or(false, |perms| {
            perms.administrator() || perms.contains(needed)
        });

    if allowed {
        Ok(())
    } else {
        Err(CommandError::validation(format!(
            "You need the **{needed}** permission to do that."
        )))
    }
}

pub async fn lock(cx: &CommandCtx) -> Result<(), CommandError> {
    let guild_id = require_guild(cx)?;
    require_permission(cx, Permissions::MANAGE_CHANNELS)?;

    // The @everyone role id equals the guild id.
    let overwrite = PermissionOverwrite {
        allow: Permissions::empty(),
        deny: Permissions::SEND_MESSAGES,
        kind: PermissionOverwriteType::Role(RoleId::new(guild_id)),
    };

    cx.interaction
        .channel_id
        .create_permission(&cx.serenity.http, overwrite)
        .await
        .map_err(CommandError::upstream)?;

    cx.reply.say("🔒 Channel locked.").await?;
    staff_log::post(
        cx,
        format!(
            "🔒 <#{}> locked by {}",
            cx.interaction.channel_id.get(),
            cx.invocation.user_name
        ),
    )
    .await;
    Ok(())
}

pub async fn unlock(cx: &CommandCtx) -> Result<(), CommandError> {
    let guild_id = require_guild(cx)?;
    require_permission(cx, Permissions::MANAGE_CHANNELS)?;

    cx.interaction
        .channel_id
        .delete_permission(
            &cx.serenity.http,
            PermissionOverwriteType::Role(RoleId::new(guild_id)),
        )
        .await
        .map_err(CommandError::upstream)?;

    cx.reply.say("🔓 Channel unlocked.").await?;
    staff_log::post(
        cx,
        format!(
            "🔓 <#{}> unlocked by {}",
            cx.interaction.channel_id.get(),
            cx.invocation.user_name
        ),
    )
    .await;
    Ok(())
}

pub async fn purge(cx: &CommandCtx) -> Result<(), CommandError> {
    require_guild(cx)?;
    require_permission(cx, Permissions::MANAGE_MESSAGES)?;

    let amount = cx
        .invocation
        .int_opt("amount")
        .ok_or_else(|| CommandError::validation("Amount is required."))?;
    if !(MIN_PURGE..=MAX_PURGE).contains(&amount) {
        return Err(CommandError::validation(format!(
            "Amount must be between {MIN_PURGE} and {MAX_PURGE}."
        )));
    }

    let channel_id = cx.interaction.channel_id;
    let messages = channel_id
        .messages(&cx.serenity.http, GetMessages::new().limit(amount as u8))
        .await
        .map_err(CommandError::upstream)?;
    let message_ids: Vec<MessageId> = messages.iter().map(|m| m.id).collect();

    match message_ids.len() {
        0 => {
            cx.reply.say_ephemeral("Nothing to delete.").await?;
            return Ok(());
        }
        1 => {
            channel_id
                .delete_message(&cx.serenity.http, message_ids[0])
                .await
                .map_err(CommandError::upstream)?;
        }
        _ => {
            // Bulk delete caps at 100, which the amount bound already enforces.
            channel_id
                .delete_messages(&cx.serenity.http, message_ids.iter())
                .await
                .map_err(CommandError::upstream)?;
        }
    }

    let deleted = message_ids.len();
    cx.reply
        .say_ephemeral(format!("🧹 Deleted {deleted} message(s)."))
        .await?;
    staff_log::post(
        cx,
        format!(
            "🧹 {} purged {} message(s) in <#{}>",
            cx.invocation.user_name,
            deleted,
            channel_id.get()
        ),
    )
    .await;
    Ok(())
}
