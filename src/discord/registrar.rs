// Turns registry descriptors into Discord registration payloads.

use crate::core::registry::{CommandDescriptor, CommandRegistry, ParamKind, ParamSpec};
use serenity::all::{CommandOptionType, CreateCommand, CreateCommandOption, Permissions};

pub fn registration_payloads<C>(registry: &CommandRegistry<C>) -> Vec<CreateCommand> {
    registry.descriptors().map(create_command).collect()
}

fn create_command(descriptor: &CommandDescriptor) -> CreateCommand {
    let mut command =
        CreateCommand::new(descriptor.name.as_str()).description(descriptor.description);

    if descriptor.moderator_only {
        command = command.default_member_permissions(Permissions::MANAGE_MESSAGES);
    }

    for sub in &descriptor.subcommands {
        let mut option =
            CreateCommandOption::new(CommandOptionType::SubCommand, sub.name, sub.description);
        for param in &sub.params {
            option = option.add_sub_option(create_option(param));
        }
        command = command.add_option(option);
    }

    for param in &descriptor.params {
        command = command.add_option(create_option(param));
    }

    command
}

fn create_option(param: &ParamSpec) -> CreateCommandOption {
    CreateCommandOption::new(option_type(param.kind), param.name, param.description)
        .required(param.required)
}

fn option_type(kind: ParamKind) -> CommandOptionType {
    match kind {
        ParamKind::String => CommandOptionType::String,
        ParamKind::Integer => CommandOptionType::Integer,
        ParamKind::Boolean => CommandOptionType::Boolean,
        ParamKind::User => CommandOptionType::User,
        ParamKind::Channel => CommandOptionType::Channel,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::discord::commands::build_registry;

    #[test]
    fn one_payload_per_registered_command() {
        let registry = build_registry().unwrap();
        let payloads = registration_payloads(&registry);
        assert_eq!(payloads.len(), registry.len());
    }
}
