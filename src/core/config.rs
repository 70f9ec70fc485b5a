//! Assistant configuration
//!
//! All tunable values are collected here. The config is constructed once at
//! startup (from defaults, environment variables, or a TOML file) and passed
//! into the classifier, dispatcher, and handler constructors; there is no
//! ambient global state.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Connection settings for one LLM chat-completions endpoint
///
/// Both the Anthropic and OpenAI-compatible wire formats are supported;
/// the format is detected from the URL.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmEndpoint {
    /// API key; when empty the endpoint is treated as unavailable
    pub api_key: String,

    /// Chat-completions URL
    pub api_url: String,

    /// Model identifier
    pub model: String,

    /// Request timeout in seconds
    ///
    /// Classification is a single short round trip. Anything slower than
    /// this is treated as a classifier failure and recovered by the
    /// keyword fallback rules.
    pub timeout_secs: u64,

    /// Completion budget per call
    ///
    /// The decision list for one utterance is a handful of short phrases,
    /// so the classifier default is deliberately small. Chat replies get a
    /// larger budget.
    pub max_tokens: u32,
}

impl Default for LlmEndpoint {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            api_url: "https://api.anthropic.com/v1/messages".into(),
            model: "claude-3-haiku-20240307".into(),
            timeout_secs: 10,
            max_tokens: 256,
        }
    }
}

impl LlmEndpoint {
    /// True when an API key is configured
    pub fn available(&self) -> bool {
        !self.api_key.is_empty()
    }
}

/// Configuration for one assistant instance
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AssistantConfig {
    /// How the assistant addresses the user
    pub user_name: String,

    /// The assistant's own name; exit phrasing addressed to this name
    /// ("bye vesper") is recognized by the classifier fast path
    pub assistant_name: String,

    /// Maximum retained exchanges in the rolling conversation buffers
    ///
    /// Bounds prompt growth. Old exchanges are evicted front-first.
    pub history_limit: usize,

    /// Root directory for relative file-command targets
    pub files_root: PathBuf,

    /// Directory where authored content is written before the editor opens
    pub notes_dir: PathBuf,

    /// Editor command for the content and edit-file handlers
    ///
    /// Split on whitespace; the file path is appended as the last argument.
    pub editor_command: String,

    /// Endpoint used by the intent classifier
    pub classifier: LlmEndpoint,

    /// Endpoint used by the chat and realtime responders
    pub chat: LlmEndpoint,
}

impl Default for AssistantConfig {
    fn default() -> Self {
        let chat = LlmEndpoint {
            max_tokens: 1024,
            ..LlmEndpoint::default()
        };

        Self {
            user_name: "User".into(),
            assistant_name: "Vesper".into(),
            classifier: LlmEndpoint::default(),
            chat,
            history_limit: 16,
            files_root: PathBuf::from("."),
            notes_dir: PathBuf::from("Data"),
            editor_command: default_editor().into(),
        }
    }
}

#[cfg(target_os = "windows")]
fn default_editor() -> &'static str {
    "notepad"
}

#[cfg(target_os = "macos")]
fn default_editor() -> &'static str {
    "open -e"
}

#[cfg(all(unix, not(target_os = "macos")))]
fn default_editor() -> &'static str {
    "xdg-open"
}

impl AssistantConfig {
    /// Build a config from defaults plus environment variables
    ///
    /// Recognized: VESPER_API_KEY, VESPER_API_URL, VESPER_MODEL (classifier
    /// endpoint, shared with chat unless the VESPER_CHAT_* variants are
    /// set), VESPER_USER, VESPER_NAME, VESPER_EDITOR.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(key) = std::env::var("VESPER_API_KEY") {
            config.classifier.api_key = key.clone();
            config.chat.api_key = key;
        }
        if let Ok(url) = std::env::var("VESPER_API_URL") {
            config.classifier.api_url = url.clone();
            config.chat.api_url = url;
        }
        if let Ok(model) = std::env::var("VESPER_MODEL") {
            config.classifier.model = model.clone();
            config.chat.model = model;
        }
        if let Ok(key) = std::env::var("VESPER_CHAT_API_KEY") {
            config.chat.api_key = key;
        }
        if let Ok(model) = std::env::var("VESPER_CHAT_MODEL") {
            config.chat.model = model;
        }
        if let Ok(user) = std::env::var("VESPER_USER") {
            config.user_name = user;
        }
        if let Ok(name) = std::env::var("VESPER_NAME") {
            config.assistant_name = name;
        }
        if let Ok(editor) = std::env::var("VESPER_EDITOR") {
            config.editor_command = editor;
        }

        config
    }

    /// Load a config from a TOML file
    pub fn from_file(path: &Path) -> crate::core::error::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| {
            crate::core::error::VesperError::Config(format!("{}: {}", path.display(), e))
        })
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<(), String> {
        if self.assistant_name.trim().is_empty() {
            return Err("assistant_name must not be empty".into());
        }
        if self.history_limit == 0 {
            return Err("history_limit must be at least 1".into());
        }
        if self.classifier.timeout_secs == 0 || self.chat.timeout_secs == 0 {
            return Err("endpoint timeout_secs must be positive".into());
        }
        if self.editor_command.trim().is_empty() {
            return Err("editor_command must not be empty".into());
        }
        Ok(())
    }
}
