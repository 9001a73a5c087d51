// Discord layer - gateway adapter, reply transport, and command handlers.

#[path = "commands/command_catalog.rs"]
pub mod commands;

#[path = "gateway.rs"]
pub mod gateway;

#[path = "registrar.rs"]
pub mod registrar;

#[path = "reply.rs"]
pub mod reply;

#[path = "selection.rs"]
pub mod selection;

#[path = "staff_log.rs"]
pub mod staff_log;

pub use commands::{BotData, CommandCtx};
