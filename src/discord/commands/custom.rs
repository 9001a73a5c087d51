// Guild custom commands: short named snippets anyone can define and recall.
// All validation lives in the core service; this file only translates
// between the interaction and the store.

use crate::core::dispatch::CommandError;
use crate::core::registry::{Category, CommandDescriptor, ParamKind, ParamSpec, SubcommandSpec};
use crate::discord::commands::CommandCtx;

pub fn descriptor() -> CommandDescriptor {
    CommandDescriptor::new(
        "custom",
        "Define and recall this server's custom text commands.",
        Category::Utility,
    )
    .subcommand(SubcommandSpec {
        name: "add",
        description: "Define a new custom command.",
        params: vec![
            ParamSpec::required("name", "Name of the command", ParamKind::String),
            ParamSpec::required("text", "What the command should say", ParamKind::String),
        ],
    })
    .subcommand(SubcommandSpec {
        name: "show",
        description: "Post a custom command's text.",
        params: vec![ParamSpec::required(
            "name",
            "Name of the command",
            ParamKind::String,
        )],
    })
    .subcommand(SubcommandSpec {
        name: "remove",
        description: "Delete a custom command.",
        params: vec![ParamSpec::required(
            "name",
            "Name of the command",
            ParamKind::String,
        )],
    })
    .subcommand(SubcommandSpec {
        name: "list",
        description: "List this server's custom commands.",
        params: vec![],
    })
}

fn require_guild(cx: &CommandCtx) -> Result<u64, CommandError> {
    cx.invocation
        .guild_id
        .ok_or_else(|| CommandError::validation("Custom commands only exist inside servers."))
}

pub async fn run(cx: &CommandCtx) -> Result<(), CommandError> {
    let guild_id = require_guild(cx)?;

    match cx.invocation.subcommand.as_deref() {
        Some("add") => add(cx, guild_id).await,
        Some("show") => show(cx, guild_id).await,
        Some("remove") => remove(cx, guild_id).await,
        Some("list") => list(cx, guild_id).await,
        _ => Err(CommandError::validation(
            "Use `/custom add`, `/custom show`, `/custom remove`, or `/custom list`.",
        )),
    }
}

fn name_opt<'a>(cx: &'a CommandCtx) -> Result<&'a str, CommandError> {
    cx.invocation
        .str_opt("name")
        .ok_or_else(|| CommandError::validation("A command name is required."))
}

async fn add(cx: &CommandCtx, guild_id: u64) -> Result<(), CommandError> {
    let name = name_opt(cx)?;
    let text = cx
        .invocation
        .str_opt("text")
        .ok_or_else(|| CommandError::validation("The command text is required."))?;

    let defined = cx
        .data
        .custom
        .define(guild_id, name, text, cx.invocation.user_id)
        .await?;

    cx.reply
        .say(format!(
            "✅ Custom command **{}** saved. Recall it with `/custom show name:{}`.",
            defined.name, defined.name
        ))
        .await?;
    Ok(())
}

async fn show(cx: &CommandCtx, guild_id: u64) -> Result<(), CommandError> {
    let command = cx.data.custom.fetch(guild_id, name_opt(cx)?).await?;
    cx.reply.say(command.body).await?;
    Ok(())
}

async fn remove(cx: &CommandCtx, guild_id: u64) -> Result<(), CommandError> {
    let name = name_opt(cx)?;
    cx.data.custom.remove(guild_id, name).await?;
    cx.reply
        .say_ephemeral(format!("🗑️ Custom command **{}** removed.", name.to_lowercase()))
        .await?;
    Ok(())
}

async fn list(cx: &CommandCtx, guild_id: u64) -> Result<(), CommandError> {
    let commands = cx.data.custom.list(guild_id).await?;
    if commands.is_empty() {
        cx.reply
            .say_ephemeral("This server has no custom commands yet. Try `/custom add`.")
            .await?;
        return Ok(());
    }

    let names: Vec<String> = commands.iter().map(|c| format!("`{}`", c.name)).collect();
    cx.reply
        .say_ephemeral(format!(
            "**{} custom command(s):** {}",
            names.len(),
            names.join(", ")
        ))
        .await?;
    Ok(())
}
