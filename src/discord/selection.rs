// Drives a core selection prompt against Discord components.
//
// The state machine in core owns every transition; this driver only feeds it
// events: one component interaction at a time from the collector, or the
// deadline. Because the loop is sequential, the machine sees at most one
// resolving event even if a click and the timeout race.

use crate::core::dispatch::{CommandError, ReplyMessage, SelectMenuSpec};
use crate::core::selection::{PromptEvent, Resolution, SelectionPrompt, Transition};
use crate::discord::commands::CommandCtx;
use serenity::all::{
    ComponentInteraction, ComponentInteractionCollector, ComponentInteractionDataKind,
    CreateInteractionResponse, CreateInteractionResponseMessage,
};
use std::time::{Duration, Instant};

/// Show a select menu, wait for the invoker's choice or the deadline, then
/// close the prompt (disable the menu, append a timeout notice if nobody
/// answered). Returns how the prompt resolved.
pub async fn run_prompt(
    cx: &CommandCtx,
    content: &str,
    menu: SelectMenuSpec,
    deadline: Duration,
) -> Result<Resolution, CommandError> {
    cx.reply
        .send(ReplyMessage::text(content).with_menu(menu.clone()))
        .await?;

    // The collector filters on the prompt message so concurrent prompts in
    // the same channel cannot steal each other's events.
    let prompt_message = cx
        .interaction
        .get_response(&cx.serenity.http)
        .await
        .map_err(CommandError::upstream)?;

    let started = Instant::now();
    let mut prompt = SelectionPrompt::new(cx.invocation.user_id, deadline.as_secs());

    while !prompt.is_resolved() {
        let remaining = deadline.saturating_sub(started.elapsed());

        let collected = ComponentInteractionCollector::new(&cx.serenity)
            .message_id(prompt_message.id)
            .timeout(remaining)
            .await;

        match collected {
            None => {
                prompt.apply(PromptEvent::DeadlineElapsed);
            }
            Some(component) => {
                let event = PromptEvent::Selection {
                    user: component.user.id.get(),
                    value: selected_value(&component),
                    at: started.elapsed().as_secs(),
                };
                match prompt.apply(event) {
                    Transition::Collected(_) => {
                        // Plain ack; the outcome lands via reply edits.
                        let _ = component
                            .create_response(
                                &cx.serenity.http,
                                CreateInteractionResponse::Acknowledge,
                            )
                            .await;
                    }
                    Transition::Ignored => {
                        let _ = component
                            .create_response(
                                &cx.serenity.http,
                                CreateInteractionResponse::Message(
                                    CreateInteractionResponseMessage::new()
                                        .content("This menu belongs to someone else.")
                                        .ephemeral(true),
                                ),
                            )
                            .await;
                    }
                    Transition::Expired => {}
                }
            }
        }
    }

    let Some(resolution) = prompt.close() else {
        return Err(CommandError::upstream(anyhow::anyhow!(
            "selection prompt resolved without an outcome"
        )));
    };

    let closing_content = match &resolution {
        Resolution::Selected(_) => content.to_string(),
        Resolution::TimedOut => format!("{content}\n\n*Selection timed out.*"),
    };
    cx.reply
        .edit(ReplyMessage::text(closing_content).with_menu(menu.disabled()))
        .await?;

    Ok(resolution)
}

fn selected_value(component: &ComponentInteraction) -> String {
    match &component.data.kind {
        ComponentInteractionDataKind::StringSelect { values } => {
            values.first().cloned().unwrap_or_default()
        }
        _ => String::new(),
    }
}
