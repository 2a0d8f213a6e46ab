//! Chat-completions client for commit message suggestions.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::{CONFIG_FILE, Config};
use crate::error::SuggestError;
use crate::llm::response::clean_suggestion;

/// Default API endpoint base.
const DEFAULT_BASE_URL: &str = "https://api.openai.com";

/// Model used when the config leaves `model` empty. Deliberately not the same
/// as the model the initializer writes; both defaults match the tool's
/// historical behavior.
const FALLBACK_MODEL: &str = "gpt-4o-mini";

/// Chat-completions request message.
#[derive(Serialize)]
struct Message {
    role: String,
    content: String,
}

/// Chat-completions request body.
#[derive(Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<Message>,
    max_tokens: u32,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: String,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

/// Chat-completions response body, reduced to the fields we read.
#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

/// Client for requesting commit message suggestions.
pub struct SuggestionClient {
    http: reqwest::Client,
    base_url: String,
    config: Config,
}

impl SuggestionClient {
    /// Create a client against the default API endpoint.
    pub fn new(config: Config) -> Self {
        Self::with_base_url(config, DEFAULT_BASE_URL)
    }

    /// Create a client against a custom endpoint base (used by tests).
    pub fn with_base_url(config: Config, base_url: impl Into<String>) -> Self {
        SuggestionClient {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
            config,
        }
    }

    /// Request one commit message suggestion for `diff`.
    ///
    /// The message list is the configured prompt template followed by a single
    /// user message holding the diff and, when given, the additional context
    /// on its own line. No retries: a network or HTTP failure surfaces as a
    /// [`SuggestError`] after one attempt.
    pub async fn suggest(
        &self,
        diff: &str,
        additional_context: Option<&str>,
    ) -> Result<String, SuggestError> {
        if !self.config.has_usable_api_key() {
            return Err(SuggestError::ApiKeyNotConfigured(CONFIG_FILE.to_string()));
        }

        let model = if self.config.model.trim().is_empty() {
            FALLBACK_MODEL.to_string()
        } else {
            self.config.model.clone()
        };

        let mut messages: Vec<Message> = self
            .config
            .prompt
            .iter()
            .map(|m| Message {
                role: m.role.clone(),
                content: m.content.clone(),
            })
            .collect();
        messages.push(Message {
            role: "user".to_string(),
            content: build_user_content(diff, additional_context),
        });

        let request = ChatRequest {
            model,
            messages,
            max_tokens: self.config.max_tokens,
        };

        debug!(
            "Requesting suggestion: model={}, diff={} chars, context={}",
            request.model,
            diff.len(),
            additional_context.is_some()
        );

        let response = self
            .http
            .post(format!("{}/v1/chat/completions", self.base_url))
            .bearer_auth(&self.config.api_key)
            .json(&request)
            .send()
            .await
            .map_err(SuggestError::RequestFailed)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SuggestError::HttpStatus {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: ChatResponse = response
            .json()
            .await
            .map_err(SuggestError::InvalidResponse)?;

        let content = parsed
            .choices
            .first()
            .map(|c| c.message.content.as_str())
            .ok_or(SuggestError::EmptyResponse)?;

        Ok(clean_suggestion(content))
    }
}

/// Build the user message content: the diff, then the context line if any.
fn build_user_content(diff: &str, additional_context: Option<&str>) -> String {
    match additional_context {
        Some(ctx) if !ctx.trim().is_empty() => {
            format!("{diff}\nAdditional context: {ctx}")
        }
        _ => diff.to_string(),
    }
}
