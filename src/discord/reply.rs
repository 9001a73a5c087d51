// Reply transport over a slash-command interaction: the initial reply maps
// to `create_response`, every edit to `edit_response`. Discord pins the
// ephemeral flag at the initial response; edits keep it.

use crate::core::dispatch::{ReplyError, ReplyMessage, ReplyTransport, SelectMenuSpec};
use async_trait::async_trait;
use serenity::all::{
    CommandInteraction, CreateActionRow, CreateInteractionResponse,
    CreateInteractionResponseMessage, CreateSelectMenu, CreateSelectMenuKind,
    CreateSelectMenuOption, EditInteractionResponse,
};
use serenity::http::Http;
use std::sync::Arc;

pub struct InteractionReplyTransport {
    http: Arc<Http>,
    interaction: CommandInteraction,
}

impl InteractionReplyTransport {
    pub fn new(http: Arc<Http>, interaction: CommandInteraction) -> Self {
        Self { http, interaction }
    }
}

#[async_trait]
impl ReplyTransport for InteractionReplyTransport {
    async fn send_initial(&self, message: ReplyMessage) -> Result<(), ReplyError> {
        let mut payload = CreateInteractionResponseMessage::new()
            .content(message.content)
            .ephemeral(message.ephemeral);
        if let Some(menu) = &message.menu {
            payload = payload.components(vec![menu_row(menu)]);
        }

        self.interaction
            .create_response(&self.http, CreateInteractionResponse::Message(payload))
            .await
            .map_err(|err| ReplyError::Transport(err.to_string()))
    }

    async fn edit(&self, message: ReplyMessage) -> Result<(), ReplyError> {
        let rows = match &message.menu {
            Some(menu) => vec![menu_row(menu)],
            None => Vec::new(),
        };
        let payload = EditInteractionResponse::new()
            .content(message.content)
            .components(rows);

        self.interaction
            .edit_response(&self.http, payload)
            .await
            .map(|_| ())
            .map_err(|err| ReplyError::Transport(err.to_string()))
    }
}

/// Render the core menu spec into a serenity component row.
pub fn menu_row(menu: &SelectMenuSpec) -> CreateActionRow {
    let options = menu
        .options
        .iter()
        .map(|option| {
            let mut built = CreateSelectMenuOption::new(option.label.clone(), option.value.clone());
            if let Some(description) = &option.description {
                built = built.description(description.clone());
            }
            built
        })
        .collect();

    let select = CreateSelectMenu::new(
        menu.custom_id.clone(),
        CreateSelectMenuKind::String { options },
    )
    .placeholder(menu.placeholder.clone())
    .disabled(menu.disabled);

    CreateActionRow::SelectMenu(select)
}
