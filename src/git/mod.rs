//! Git integration: diff collection via git2, commits via the system git.

pub mod commit;
pub mod diff;

pub use commit::{
    CommitOutcome, check_git_installed, commit_all, commit_all_in, confirm_and_commit,
    confirm_and_commit_in,
};
pub use diff::{DiffSummary, collect_diff};
