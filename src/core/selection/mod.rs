pub mod prompt;

pub use prompt::{PromptEvent, PromptState, Resolution, SelectionPrompt, Transition};
