// Dispatch: normalized invocations, the single-use reply capability, and the
// fail-closed dispatch boundary.

pub mod dispatcher;
pub mod error;
pub mod invocation;
pub mod reply;

pub use dispatcher::{DispatchOutcome, Dispatcher, InvocationCtx};
pub use error::CommandError;
pub use invocation::{Invocation, OptionValue};
pub use reply::{
    ReplyError, ReplyHandle, ReplyMessage, ReplyTransport, SelectMenuSpec, SelectOptionSpec,
};
