//! Error types for grafis modules using thiserror.

use thiserror::Error;

/// Errors from config file operations.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration file {0} not found. Initialize it with: grafis -i")]
    NotFound(String),

    #[error("Failed to read configuration file: {0}")]
    ReadFailed(#[source] std::io::Error),

    #[error("Configuration file is not valid JSON: {0}")]
    ParseFailed(#[source] serde_json::Error),

    #[error("Failed to write configuration file: {0}")]
    WriteFailed(#[source] std::io::Error),
}

/// Errors from diff collection against the working tree.
#[derive(Error, Debug)]
pub enum GitError {
    #[error("Not a git repository. Run grafis from within a git repository.")]
    NotARepository(#[source] git2::Error),

    #[error("git not found on PATH. Install git and try again.")]
    GitNotInstalled,

    #[error("No uncommitted changes found")]
    NoChanges,

    #[error("Failed to collect diff: {0}")]
    DiffFailed(#[source] git2::Error),
}

/// Errors from the confirm-and-commit step.
#[derive(Error, Debug)]
pub enum CommitError {
    #[error("Failed to read confirmation: {0}")]
    ConfirmFailed(#[source] std::io::Error),

    #[error("Failed to spawn git: {0}")]
    SpawnFailed(#[source] std::io::Error),

    #[error("git commit exited with {}: {stderr}",
        code.map_or("unknown status".to_string(), |c| format!("code {c}")))]
    NonZeroExit { code: Option<i32>, stderr: String },
}

/// Errors from the suggestion request.
#[derive(Error, Debug)]
pub enum SuggestError {
    #[error(
        "API key is not configured. Edit the apiKey field of {0} before requesting suggestions."
    )]
    ApiKeyNotConfigured(String),

    #[error("Suggestion request failed: {0}")]
    RequestFailed(#[source] reqwest::Error),

    #[error("Suggestion API returned HTTP {status}: {body}")]
    HttpStatus { status: u16, body: String },

    #[error("Suggestion API returned an unexpected body: {0}")]
    InvalidResponse(#[source] reqwest::Error),

    #[error("Suggestion API returned no choices")]
    EmptyResponse,
}
