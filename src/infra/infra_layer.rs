// The infra module contains implementations of core traits.

#[path = "store/mod.rs"]
pub mod store;
