//! Suggestion client and response cleanup for the chat-completions API.

pub mod client;
pub mod response;

pub use client::SuggestionClient;
pub use response::clean_suggestion;
