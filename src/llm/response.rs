//! Cleanup of model replies.
//!
//! Chat models like to wrap short answers in markdown code fences. The commit
//! message should be the bare text, so fences are stripped before the
//! suggestion is shown to the operator.

/// Strip a surrounding markdown code fence from a model reply and trim it.
///
/// Handles ` ```plaintext `, ` ```text `, and bare ` ``` ` fences. Replies
/// without a fence come back trimmed but otherwise unchanged.
pub fn clean_suggestion(response: &str) -> String {
    let trimmed = response.trim();

    for marker in ["```plaintext", "```text", "```"] {
        if let Some(rest) = trimmed.strip_prefix(marker) {
            let inner = rest.strip_suffix("```").unwrap_or(rest);
            return inner.trim().to_string();
        }
    }

    trimmed.to_string()
}
