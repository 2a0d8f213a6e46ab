//! Diff collection from the working tree using git2.

use git2::{Diff, DiffFormat, ErrorCode, Repository, Tree};
use tracing::warn;

use crate::error::GitError;

/// Maximum characters for the unified diff text before truncation. Large
/// changesets are cut at this budget rather than chunked.
const MAX_DIFF_LENGTH: usize = 30_000;

/// Pending changes of the working tree, ready to hand to the suggestion
/// client.
#[derive(Debug, Clone)]
pub struct DiffSummary {
    /// Unified diff text, trimmed, possibly truncated.
    pub diff_text: String,
    /// Number of files touched across the staged and unstaged diffs.
    pub files_changed: usize,
    pub additions: usize,
    pub deletions: usize,
    pub truncated: bool,
}

/// Resolve the HEAD tree, distinguishing empty-repo errors from real failures.
///
/// Returns `Ok(None)` for repos with no commits (unborn branch / not found),
/// so the first commit of a repository still produces a diff.
fn resolve_head_tree(repo: &Repository) -> Result<Option<Tree<'_>>, GitError> {
    let head_ref = match repo.head() {
        Ok(r) => r,
        Err(e) if e.code() == ErrorCode::UnbornBranch || e.code() == ErrorCode::NotFound => {
            return Ok(None);
        }
        Err(e) => return Err(GitError::DiffFailed(e)),
    };

    let tree = head_ref.peel_to_tree().map_err(GitError::DiffFailed)?;
    Ok(Some(tree))
}

/// Collect the diff of staged and unstaged tracked changes.
///
/// Untracked files are deliberately excluded: the commit step runs
/// `git commit -am`, which only picks up tracked files, and the suggestion
/// should describe exactly what the commit will contain.
///
/// Returns `GitError::NoChanges` when the working tree has nothing pending.
pub fn collect_diff(repo: &Repository) -> Result<DiffSummary, GitError> {
    let head_tree = resolve_head_tree(repo)?;

    let staged = repo
        .diff_tree_to_index(head_tree.as_ref(), None, None)
        .map_err(GitError::DiffFailed)?;
    let unstaged = repo
        .diff_index_to_workdir(None, None)
        .map_err(GitError::DiffFailed)?;

    let files_changed = count_files(&staged, &unstaged);

    let mut diff_text = String::new();
    let mut additions = 0usize;
    let mut deletions = 0usize;
    let mut truncated = false;

    append_diff_text(&staged, &mut diff_text, &mut additions, &mut deletions, &mut truncated);
    if !truncated {
        append_diff_text(&unstaged, &mut diff_text, &mut additions, &mut deletions, &mut truncated);
    }

    let diff_text = diff_text.trim().to_string();
    if diff_text.is_empty() {
        return Err(GitError::NoChanges);
    }

    Ok(DiffSummary {
        diff_text,
        files_changed,
        additions,
        deletions,
        truncated,
    })
}

/// Count distinct file paths across both diffs.
fn count_files(staged: &Diff<'_>, unstaged: &Diff<'_>) -> usize {
    let mut paths: Vec<String> = Vec::new();
    for diff in [staged, unstaged] {
        for delta in diff.deltas() {
            if let Some(p) = delta.new_file().path().or_else(|| delta.old_file().path()) {
                paths.push(p.to_string_lossy().to_string());
            }
        }
    }
    paths.sort();
    paths.dedup();
    paths.len()
}

/// Append unified diff text from a diff object, respecting the max length.
fn append_diff_text(
    diff: &Diff<'_>,
    text: &mut String,
    additions: &mut usize,
    deletions: &mut usize,
    truncated: &mut bool,
) {
    if *truncated {
        return;
    }

    if let Err(e) = diff.print(DiffFormat::Patch, |_delta, _hunk, line| {
        if *truncated {
            return true;
        }

        let content = std::str::from_utf8(line.content()).unwrap_or("");

        // Lines past the budget are dropped, so they must not be counted
        if text.len() + content.len() + 2 > MAX_DIFF_LENGTH {
            *truncated = true;
            return true;
        }

        match line.origin() {
            '+' => *additions += 1,
            '-' => *deletions += 1,
            _ => {}
        }

        let origin = line.origin();
        if origin == '+' || origin == '-' || origin == ' ' {
            text.push(origin);
        }
        text.push_str(content);

        true
    }) {
        warn!("Failed to collect diff text: {e}");
        *truncated = true;
    }
}
