//! Config file handling: `.grafis.json` in the working directory.
//!
//! The config holds the API key, the model name, and the prompt template that
//! is sent ahead of the diff. grafis never rewrites the file after `init`;
//! the operator edits it by hand.

use std::io::Write;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;

use crate::error::ConfigError;

/// Fixed config filename, resolved relative to the working directory.
pub const CONFIG_FILE: &str = ".grafis.json";

/// Placeholder API key written by `init`. Requests are refused while the
/// config still carries it.
pub const PLACEHOLDER_API_KEY: &str = "your-openai-api-key";

/// Model name written by `init`.
const DEFAULT_MODEL: &str = "gpt-4";

/// `max_tokens` sent when the config does not override it.
const DEFAULT_MAX_TOKENS: u32 = 50;

/// One role/content pair of the prompt template.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromptMessage {
    pub role: String,
    pub content: String,
}

/// Parsed `.grafis.json`.
///
/// Field names are camelCase on disk to match the documented config shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    pub api_key: String,
    pub model: String,
    pub prompt: Vec<PromptMessage>,
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
}

fn default_max_tokens() -> u32 {
    DEFAULT_MAX_TOKENS
}

impl Config {
    /// The default config written by `init`: placeholder key, `gpt-4`, and a
    /// single system message asking for concise commit messages.
    pub fn template() -> Self {
        Config {
            api_key: PLACEHOLDER_API_KEY.to_string(),
            model: DEFAULT_MODEL.to_string(),
            prompt: vec![PromptMessage {
                role: "system".to_string(),
                content: "You are an assistant that suggests concise and descriptive commit \
                          messages for git diffs."
                    .to_string(),
            }],
            max_tokens: DEFAULT_MAX_TOKENS,
        }
    }

    /// Whether the API key is usable for a request.
    pub fn has_usable_api_key(&self) -> bool {
        !self.api_key.trim().is_empty() && self.api_key != PLACEHOLDER_API_KEY
    }
}

/// Write the default config to `.grafis.json` in the current directory,
/// overwriting any existing file.
pub fn init() -> Result<(), ConfigError> {
    init_at(Path::new("."))
}

/// Write the default config into `dir`, overwriting any existing file.
///
/// The write goes through a temp file in the same directory and is persisted
/// with a rename, so a crash mid-write cannot leave a half-written config.
pub fn init_at(dir: &Path) -> Result<(), ConfigError> {
    let json = serde_json::to_string_pretty(&Config::template())
        .expect("default config serializes");

    let mut tmp = NamedTempFile::new_in(dir).map_err(ConfigError::WriteFailed)?;
    tmp.write_all(json.as_bytes())
        .and_then(|()| tmp.write_all(b"\n"))
        .map_err(ConfigError::WriteFailed)?;
    tmp.persist(dir.join(CONFIG_FILE))
        .map_err(|e| ConfigError::WriteFailed(e.error))?;

    Ok(())
}

/// Load `.grafis.json` from the current directory.
pub fn load() -> Result<Config, ConfigError> {
    load_from(Path::new("."))
}

/// Load the config from `dir`, distinguishing a missing file from invalid JSON.
pub fn load_from(dir: &Path) -> Result<Config, ConfigError> {
    let path = dir.join(CONFIG_FILE);

    let content = match std::fs::read_to_string(&path) {
        Ok(c) => c,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(ConfigError::NotFound(CONFIG_FILE.to_string()));
        }
        Err(e) => return Err(ConfigError::ReadFailed(e)),
    };

    serde_json::from_str(&content).map_err(ConfigError::ParseFailed)
}
