// Command registry: static descriptors, the name -> handler mapping, and the
// derived category grouping used by the help flow.

pub mod category_index;
pub mod descriptor;
pub mod registry;

pub use category_index::{CategoryGroup, CategoryIndex};
pub use descriptor::{Category, CommandDescriptor, ParamKind, ParamSpec, SubcommandSpec};
pub use registry::{BoxFuture, CommandRegistry, HandlerFn, RegisteredCommand, RegistryError};
