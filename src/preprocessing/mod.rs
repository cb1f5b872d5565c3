//! Prompt assembly for both endpoints.

pub mod form;
pub mod history;

pub use form::{FormAnswers, GenerationPrompt, ImageAttachment};
pub use history::{EditPrompt, HistoryTurn};
