// The dispatch boundary.
//
// One inbound invocation goes in; exactly one of three things comes out:
// the handler ran, the name was unknown (fail closed, tell the invoker), or
// the handler failed (log the detail, tell the invoker something generic).
// Nothing thrown by a handler ever propagates past `dispatch` - a broken
// command must not take the event loop down with it.

use super::error::CommandError;
use super::invocation::Invocation;
use super::reply::{ReplyHandle, ReplyMessage};
use crate::core::registry::CommandRegistry;
use std::sync::Arc;

const GENERIC_FAILURE: &str = "Something went wrong while running that command. Try again later.";

/// What the invocation context must expose to the dispatcher. The Discord
/// layer's `CommandCtx` implements this; tests use a bare struct.
pub trait InvocationCtx: Send + Sync {
    fn invocation(&self) -> &Invocation;
    fn reply(&self) -> &ReplyHandle;
}

/// Result of one dispatch, for logging and tests. User-facing messaging has
/// already happened by the time this is returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// Handler ran to completion (including handled validation rejections).
    Completed,
    /// No such command; fail-closed message sent, no handler invoked.
    NotFound,
    /// Handler failed upstream; generic failure message sent.
    Failed,
}

pub struct Dispatcher<C> {
    registry: Arc<CommandRegistry<C>>,
}

impl<C: InvocationCtx> Dispatcher<C> {
    pub fn new(registry: Arc<CommandRegistry<C>>) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &Arc<CommandRegistry<C>> {
        &self.registry
    }

    pub async fn dispatch(&self, cx: &C) -> DispatchOutcome {
        let invocation = cx.invocation();
        let name = invocation.command.clone();

        let Some(command) = self.registry.resolve(&name) else {
            tracing::warn!(
                command = %name,
                user_id = invocation.user_id,
                "dispatch: unknown command"
            );
            self.deliver(cx, format!("Unknown command `/{name}`."))
                .await;
            return DispatchOutcome::NotFound;
        };

        match (command.handler)(cx).await {
            Ok(()) => {
                tracing::debug!(command = %name, user_id = invocation.user_id, "command completed");
                DispatchOutcome::Completed
            }
            Err(CommandError::Validation(message) | CommandError::NotFound(message)) => {
                tracing::debug!(
                    command = %name,
                    user_id = invocation.user_id,
                    %message,
                    "command rejected input"
                );
                self.deliver(cx, message).await;
                DispatchOutcome::Completed
            }
            Err(err @ CommandError::Upstream(_)) => {
                tracing::error!(
                    command = %name,
                    user_id = invocation.user_id,
                    error = ?err,
                    "command handler failed"
                );
                self.deliver(cx, GENERIC_FAILURE.to_string()).await;
                DispatchOutcome::Failed
            }
        }
    }

    /// Deliver a boundary message to the invoker, ephemeral, through whatever
    /// channel the interaction still has open. Best effort: a reply failure
    /// here is logged and dropped, never bubbled.
    async fn deliver(&self, cx: &C, content: String) {
        let reply = cx.reply();
        let message = ReplyMessage::ephemeral_text(content);

        let result = if reply.has_replied() {
            reply.edit(message).await
        } else {
            reply.send(message).await
        };

        if let Err(err) = result {
            tracing::error!(error = %err, "failed to deliver dispatch notice");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::dispatch::reply::test_support::RecordingTransport;
    use crate::core::registry::registry::BoxFuture;
    use crate::core::registry::{Category, CommandDescriptor};
    use std::sync::atomic::{AtomicU32, Ordering};

    struct TestCtx {
        invocation: Invocation,
        reply: ReplyHandle,
        transport: Arc<RecordingTransport>,
        ping_runs: AtomicU32,
    }

    impl TestCtx {
        fn new(invocation: Invocation) -> Self {
            let transport = Arc::new(RecordingTransport::default());
            Self {
                invocation,
                reply: ReplyHandle::new(transport.clone()),
                transport,
                ping_runs: AtomicU32::new(0),
            }
        }
    }

    impl InvocationCtx for TestCtx {
        fn invocation(&self) -> &Invocation {
            &self.invocation
        }

        fn reply(&self) -> &ReplyHandle {
            &self.reply
        }
    }

    fn ping(cx: &TestCtx) -> BoxFuture<'_, Result<(), CommandError>> {
        Box::pin(async move {
            cx.ping_runs.fetch_add(1, Ordering::AcqRel);
            cx.reply().say("Pong!").await?;
            Ok(())
        })
    }

    fn rejects(cx: &TestCtx) -> BoxFuture<'_, Result<(), CommandError>> {
        Box::pin(async move {
            let _ = cx;
            Err(CommandError::validation("Amount must be between 1 and 100."))
        })
    }

    fn explodes(cx: &TestCtx) -> BoxFuture<'_, Result<(), CommandError>> {
        Box::pin(async move {
            let _ = cx;
            Err(CommandError::upstream(anyhow::anyhow!("gateway fell over")))
        })
    }

    fn dispatcher() -> Dispatcher<TestCtx> {
        let mut registry = CommandRegistry::new();
        registry
            .register(
                CommandDescriptor::new("ping", "latency", Category::Information),
                ping,
            )
            .unwrap();
        registry
            .register(
                CommandDescriptor::new("purge", "bulk delete", Category::Moderation),
                rejects,
            )
            .unwrap();
        registry
            .register(
                CommandDescriptor::new("broken", "always fails", Category::Utility),
                explodes,
            )
            .unwrap();
        Dispatcher::new(Arc::new(registry))
    }

    #[tokio::test]
    async fn unknown_command_fails_closed_without_touching_handlers() {
        let dispatcher = dispatcher();
        let cx = TestCtx::new(Invocation::new("pong", 1, 2));

        let outcome = dispatcher.dispatch(&cx).await;

        assert_eq!(outcome, DispatchOutcome::NotFound);
        assert_eq!(cx.ping_runs.load(Ordering::Acquire), 0);

        let sent = cx.transport.sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert!(sent[0].content.contains("Unknown command"));
        assert!(sent[0].ephemeral);
    }

    #[tokio::test]
    async fn known_command_runs_and_replies() {
        let dispatcher = dispatcher();
        let cx = TestCtx::new(Invocation::new("PING", 1, 2));

        let outcome = dispatcher.dispatch(&cx).await;

        assert_eq!(outcome, DispatchOutcome::Completed);
        assert_eq!(cx.ping_runs.load(Ordering::Acquire), 1);
        assert_eq!(cx.transport.sent.lock().unwrap()[0].content, "Pong!");
    }

    #[tokio::test]
    async fn validation_errors_reach_the_invoker_verbatim() {
        let dispatcher = dispatcher();
        let cx = TestCtx::new(Invocation::new("purge", 1, 2));

        let outcome = dispatcher.dispatch(&cx).await;

        assert_eq!(outcome, DispatchOutcome::Completed);
        let sent = cx.transport.sent.lock().unwrap();
        assert_eq!(sent[0].content, "Amount must be between 1 and 100.");
        assert!(sent[0].ephemeral);
    }

    #[tokio::test]
    async fn upstream_failures_become_a_generic_notice() {
        let dispatcher = dispatcher();
        let cx = TestCtx::new(Invocation::new("broken", 1, 2));

        let outcome = dispatcher.dispatch(&cx).await;

        assert_eq!(outcome, DispatchOutcome::Failed);
        let sent = cx.transport.sent.lock().unwrap();
        assert_eq!(sent[0].content, GENERIC_FAILURE);
        assert!(!sent[0].content.contains("gateway fell over"));
    }

    #[tokio::test]
    async fn boundary_notice_uses_edit_when_reply_already_sent() {
        fn replied_then_failed(cx: &TestCtx) -> BoxFuture<'_, Result<(), CommandError>> {
            Box::pin(async move {
                cx.reply().say("working on it...").await?;
                Err(CommandError::upstream(anyhow::anyhow!("later failure")))
            })
        }

        let mut registry = CommandRegistry::new();
        registry
            .register(
                CommandDescriptor::new("flaky", "fails late", Category::Utility),
                replied_then_failed,
            )
            .unwrap();
        let dispatcher = Dispatcher::new(Arc::new(registry));
        let cx = TestCtx::new(Invocation::new("flaky", 1, 2));

        let outcome = dispatcher.dispatch(&cx).await;

        assert_eq!(outcome, DispatchOutcome::Failed);
        assert_eq!(cx.transport.sent.lock().unwrap().len(), 1);
        let edits = cx.transport.edits.lock().unwrap();
        assert_eq!(edits.len(), 1);
        assert_eq!(edits[0].content, GENERIC_FAILURE);
    }
}
