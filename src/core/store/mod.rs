// In-memory store contracts used by command handlers. Traits live here so
// the handlers depend on behavior, not on a concrete map; implementations
// are in the infra layer.

pub mod custom_commands;
pub mod reminders;

pub use custom_commands::{
    CustomCommand, CustomCommandError, CustomCommandService, CustomCommandStore,
};
pub use reminders::{Reminder, ReminderError, ReminderService, ReminderStore};
