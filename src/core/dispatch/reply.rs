// The reply capability handed to command handlers.
//
// Each interaction supports exactly one initial reply and any number of
// edits. That invariant is enforced here, in one place, instead of trusting
// every handler: `ReplyHandle` wraps a transport (the Discord adapter in
// production, a mock in tests) and tracks whether the initial reply has been
// claimed.

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use thiserror::Error;

/// One option in a select menu.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectOptionSpec {
    pub label: String,
    pub value: String,
    pub description: Option<String>,
}

/// A single-choice select menu attached to a reply.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectMenuSpec {
    pub custom_id: String,
    pub placeholder: String,
    pub options: Vec<SelectOptionSpec>,
    /// Rendered greyed-out; set when a prompt closes.
    pub disabled: bool,
}

impl SelectMenuSpec {
    pub fn disabled(mut self) -> Self {
        self.disabled = true;
        self
    }
}

/// Content of one reply or edit.
#[derive(Debug, Clone, PartialEq)]
pub struct ReplyMessage {
    pub content: String,
    /// Visible only to the invoker.
    pub ephemeral: bool,
    pub menu: Option<SelectMenuSpec>,
}

impl ReplyMessage {
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            ephemeral: false,
            menu: None,
        }
    }

    pub fn ephemeral_text(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            ephemeral: true,
            menu: None,
        }
    }

    pub fn with_menu(mut self, menu: SelectMenuSpec) -> Self {
        self.menu = Some(menu);
        self
    }
}

#[derive(Debug, Error)]
pub enum ReplyError {
    #[error("interaction already has an initial reply")]
    AlreadyReplied,

    #[error("cannot edit a reply before the initial reply is sent")]
    NoInitialReply,

    #[error("reply transport failed: {0}")]
    Transport(String),
}

/// Platform seam for delivering replies. Implemented by the Discord adapter
/// and by mocks in tests.
#[async_trait]
pub trait ReplyTransport: Send + Sync {
    async fn send_initial(&self, message: ReplyMessage) -> Result<(), ReplyError>;
    async fn edit(&self, message: ReplyMessage) -> Result<(), ReplyError>;
}

/// Single-use-then-edit reply capability for one interaction.
pub struct ReplyHandle {
    transport: Arc<dyn ReplyTransport>,
    replied: AtomicBool,
}

impl ReplyHandle {
    pub fn new(transport: Arc<dyn ReplyTransport>) -> Self {
        Self {
            transport,
            replied: AtomicBool::new(false),
        }
    }

    pub fn has_replied(&self) -> bool {
        self.replied.load(Ordering::Acquire)
    }

    /// Send the initial reply. Fails with [`ReplyError::AlreadyReplied`] on
    /// the second call. The claim is released again if the transport fails,
    /// so the dispatch boundary can still deliver a failure notice.
    pub async fn send(&self, message: ReplyMessage) -> Result<(), ReplyError> {
        if self
            .replied
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return Err(ReplyError::AlreadyReplied);
        }

        let result = self.transport.send_initial(message).await;
        if result.is_err() {
            self.replied.store(false, Ordering::Release);
        }
        result
    }

    /// Edit the already-sent reply. Any number of edits is allowed.
    pub async fn edit(&self, message: ReplyMessage) -> Result<(), ReplyError> {
        if !self.has_replied() {
            return Err(ReplyError::NoInitialReply);
        }
        self.transport.edit(message).await
    }

    pub async fn say(&self, content: impl Into<String>) -> Result<(), ReplyError> {
        self.send(ReplyMessage::text(content)).await
    }

    pub async fn say_ephemeral(&self, content: impl Into<String>) -> Result<(), ReplyError> {
        self.send(ReplyMessage::ephemeral_text(content)).await
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::RecordingTransport;
    use super::*;

    #[tokio::test]
    async fn initial_reply_is_single_use() {
        let transport = Arc::new(RecordingTransport::default());
        let handle = ReplyHandle::new(transport.clone());

        handle.say("pong").await.unwrap();
        let err = handle.say("pong again").await.unwrap_err();
        assert!(matches!(err, ReplyError::AlreadyReplied));
        assert_eq!(transport.sent.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn edit_requires_an_initial_reply() {
        let transport = Arc::new(RecordingTransport::default());
        let handle = ReplyHandle::new(transport.clone());

        let err = handle.edit(ReplyMessage::text("late")).await.unwrap_err();
        assert!(matches!(err, ReplyError::NoInitialReply));

        handle.say("first").await.unwrap();
        handle.edit(ReplyMessage::text("second")).await.unwrap();
        handle.edit(ReplyMessage::text("third")).await.unwrap();
        assert_eq!(transport.edits.lock().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn failed_send_releases_the_claim() {
        let transport = Arc::new(RecordingTransport::default());
        transport.fail_next_send.store(true, Ordering::Release);
        let handle = ReplyHandle::new(transport.clone());

        assert!(handle.say("will fail").await.is_err());
        assert!(!handle.has_replied());

        handle.say("retry works").await.unwrap();
        assert_eq!(transport.sent.lock().unwrap().len(), 1);
    }
}
