// Command failure taxonomy.
//
// Handlers never surface raw SDK errors to users. Validation and not-found
// problems carry a user-facing message verbatim; everything upstream is
// logged in full at the dispatch boundary and replaced with a generic notice.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CommandError {
    /// Malformed or out-of-range user input. Message is shown to the invoker.
    #[error("{0}")]
    Validation(String),

    /// A referenced entity (custom command, reminder, ...) does not exist.
    #[error("{0}")]
    NotFound(String),

    /// The platform SDK call failed (permissions, network). Logged with full
    /// detail server-side, surfaced as a generic failure message.
    #[error("upstream platform call failed: {0}")]
    Upstream(#[source] anyhow::Error),
}

impl CommandError {
    pub fn validation(message: impl Into<String>) -> Self {
        CommandError::Validation(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        CommandError::NotFound(message.into())
    }

    pub fn upstream(err: impl Into<anyhow::Error>) -> Self {
        CommandError::Upstream(err.into())
    }
}

impl From<super::reply::ReplyError> for CommandError {
    fn from(err: super::reply::ReplyError) -> Self {
        CommandError::Upstream(anyhow::Error::new(err))
    }
}

impl From<crate::core::store::CustomCommandError> for CommandError {
    fn from(err: crate::core::store::CustomCommandError) -> Self {
        use crate::core::store::CustomCommandError as E;
        match &err {
            E::Storage(msg) => CommandError::Upstream(anyhow::anyhow!("custom command storage: {msg}")),
            E::NotFound(_) => CommandError::NotFound(err.to_string()),
            _ => CommandError::Validation(err.to_string()),
        }
    }
}

impl From<crate::core::store::ReminderError> for CommandError {
    fn from(err: crate::core::store::ReminderError) -> Self {
        use crate::core::store::ReminderError as E;
        match &err {
            E::Storage(msg) => CommandError::Upstream(anyhow::anyhow!("reminder storage: {msg}")),
            E::NotFound(_) => CommandError::NotFound(err.to_string()),
            _ => CommandError::Validation(err.to_string()),
        }
    }
}
