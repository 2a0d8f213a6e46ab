//! Commit creation by shelling out to the system `git` binary.
//!
//! The commit runs through the real `git` executable rather than git2 so the
//! user's hooks, commit signing, and credential setup all apply. The message
//! is passed as a discrete argv element, never through shell interpolation,
//! so quotes or backticks in a suggested message cannot break the command.

use std::path::Path;
use std::process::Command;

use crate::error::{CommitError, GitError};

/// Check that `git` is available on PATH.
///
/// Uses the `which` crate for cross-platform executable detection.
pub fn check_git_installed() -> Result<(), GitError> {
    if which::which("git").is_err() {
        return Err(GitError::GitNotInstalled);
    }
    Ok(())
}

/// Outcome of the confirm-and-commit step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommitOutcome {
    /// Dry run: the suggestion was shown, nothing reaches git.
    DryRun,
    /// The operator declined the suggestion.
    Cancelled,
    /// The commit was created; carries git's one-line summary.
    Committed(String),
}

/// Gate a suggested message behind the confirmation prompt and commit on
/// acceptance, in the current directory.
pub fn confirm_and_commit<F>(
    suggestion: &str,
    dry_run: bool,
    confirm: F,
) -> Result<CommitOutcome, CommitError>
where
    F: FnOnce() -> std::io::Result<bool>,
{
    confirm_and_commit_in(Path::new("."), suggestion, dry_run, confirm)
}

/// Gate a suggested message behind the confirmation prompt and commit on
/// acceptance, inside `dir`.
///
/// `confirm` is only invoked when a decision is actually needed: with
/// `dry_run` the suggestion never reaches the prompt or git, and a declined
/// confirmation commits nothing.
pub fn confirm_and_commit_in<F>(
    dir: &Path,
    suggestion: &str,
    dry_run: bool,
    confirm: F,
) -> Result<CommitOutcome, CommitError>
where
    F: FnOnce() -> std::io::Result<bool>,
{
    if dry_run {
        return Ok(CommitOutcome::DryRun);
    }

    if !confirm().map_err(CommitError::ConfirmFailed)? {
        return Ok(CommitOutcome::Cancelled);
    }

    let summary = commit_all_in(dir, suggestion)?;
    Ok(CommitOutcome::Committed(summary))
}

/// Run `git commit -am <message>` in the current directory, committing all
/// tracked modified files.
pub fn commit_all(message: &str) -> Result<String, CommitError> {
    commit_all_in(Path::new("."), message)
}

/// Run `git commit -am <message>` inside `dir`.
///
/// Returns git's stdout (the usual one-line commit summary) on success.
pub fn commit_all_in(dir: &Path, message: &str) -> Result<String, CommitError> {
    let output = Command::new("git")
        .args(["commit", "-am", message])
        .current_dir(dir)
        .output()
        .map_err(CommitError::SpawnFailed)?;

    if !output.status.success() {
        return Err(CommitError::NonZeroExit {
            code: output.status.code(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }

    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
}
