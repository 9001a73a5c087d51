// The help command: builds the category index from the live registry, lets
// the invoker pick a category from a select menu, then shows that category's
// commands. The index is recomputed on every invocation; the registry never
// changes after startup so there is nothing to cache.

use crate::core::dispatch::{CommandError, ReplyMessage, SelectMenuSpec, SelectOptionSpec};
use crate::core::registry::{Category, CategoryGroup, CategoryIndex, CommandDescriptor};
use crate::core::selection::Resolution;
use crate::discord::commands::CommandCtx;
use crate::discord::selection::run_prompt;
use std::time::Duration;

const HELP_DEADLINE: Duration = Duration::from_secs(60);

pub fn descriptor() -> CommandDescriptor {
    CommandDescriptor::new(
        "help",
        "Browse the bot's commands by category.",
        Category::Information,
    )
}

pub async fn run(cx: &CommandCtx) -> Result<(), CommandError> {
    let index = CategoryIndex::build(&cx.data.registry);
    if index.is_empty() {
        cx.reply.say_ephemeral("No commands are registered.").await?;
        return Ok(());
    }

    let overview = render_overview(&index);
    let menu = category_menu(&index);

    match run_prompt(cx, &overview, menu, HELP_DEADLINE).await? {
        Resolution::TimedOut => Ok(()),
        Resolution::Selected(label) => {
            let Some(group) = Category::from_label(&label).and_then(|c| index.group(c)) else {
                // Menu values come from the index itself, so this only
                // happens if the payload was tampered with.
                cx.reply
                    .edit(ReplyMessage::text("That category no longer exists."))
                    .await?;
                return Ok(());
            };

            cx.reply
                .edit(ReplyMessage::text(render_group(group)))
                .await?;
            Ok(())
        }
    }
}

fn render_overview(index: &CategoryIndex) -> String {
    let mut lines = vec![
        "**Command Guide**".to_string(),
        "Pick a category below to see its commands.".to_string(),
        String::new(),
    ];
    for group in index.groups() {
        lines.push(format!(
            "**{}** - {} command{}",
            group.category.label(),
            group.commands.len(),
            if group.commands.len() == 1 { "" } else { "s" }
        ));
    }
    lines.join("\n")
}

fn category_menu(index: &CategoryIndex) -> SelectMenuSpec {
    SelectMenuSpec {
        custom_id: "help_category".to_string(),
        placeholder: "Choose a category".to_string(),
        options: index
            .groups()
            .iter()
            .map(|group| SelectOptionSpec {
                label: group.category.label().to_string(),
                value: group.category.label().to_string(),
                description: Some(format!("{} commands", group.commands.len())),
            })
            .collect(),
        disabled: false,
    }
}

fn render_group(group: &CategoryGroup) -> String {
    let mut lines = vec![format!("**{} commands**", group.category.label()), String::new()];
    for command in &group.commands {
        lines.push(format!("`/{}` - {}", command.name, command.description));
        for sub in &command.subcommands {
            lines.push(format!("  `/{} {}` - {}", command.name, sub.name, sub.description));
        }
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::discord::commands::build_registry;

    #[test]
    fn overview_and_menu_agree_on_categories() {
        let registry = build_registry().unwrap();
        let index = CategoryIndex::build(&registry);

        let overview = render_overview(&index);
        let menu = category_menu(&index);

        assert_eq!(menu.options.len(), index.groups().len());
        for option in &menu.options {
            assert!(overview.contains(&option.label), "missing {}", option.label);
            // Menu values must survive the label round-trip used on selection.
            assert!(Category::from_label(&option.value).is_some());
        }
    }

    #[test]
    fn group_rendering_lists_subcommands() {
        let registry = build_registry().unwrap();
        let index = CategoryIndex::build(&registry);
        let utility = index.group(Category::Utility).unwrap();

        let rendered = render_group(utility);
        assert!(rendered.contains("`/remind`"));
        assert!(rendered.contains("`/remind set`"));
        assert!(rendered.contains("`/custom add`"));
    }
}
