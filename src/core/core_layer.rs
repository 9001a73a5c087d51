// The core module contains all business logic.
// Nothing in here depends on the Discord SDK.

#[path = "dispatch/mod.rs"]
pub mod dispatch;

#[path = "registry/mod.rs"]
pub mod registry;

#[path = "selection/mod.rs"]
pub mod selection;

#[path = "store/mod.rs"]
pub mod store;

#[path = "timeparse.rs"]
pub mod timeparse;
