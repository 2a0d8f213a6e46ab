//! grafis - A CLI tool that suggests commit messages for uncommitted changes.
//!
//! # Overview
//!
//! grafis collects the pending diff of the current git working tree, sends it
//! to a chat-completions API together with a configurable prompt template, and
//! offers to commit with the suggested message after confirmation.

pub mod config;
pub mod error;
pub mod git;
pub mod llm;

// Re-export commonly used types
pub use config::{CONFIG_FILE, Config, PromptMessage};
pub use error::{CommitError, ConfigError, GitError, SuggestError};
pub use git::DiffSummary;
pub use llm::SuggestionClient;
