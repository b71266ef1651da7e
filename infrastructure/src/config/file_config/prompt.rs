//! System prompt configuration from TOML (`[prompt]` section)

use crate::prompt::DEFAULT_SYSTEM_PROMPT;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use twin_domain::PromptConfig;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FilePromptConfig {
    /// Inline prompt text.
    pub text: Option<String>,
    /// File to read the prompt from; wins over `text`.
    pub file: Option<PathBuf>,
}

impl FilePromptConfig {
    pub fn resolve(&self) -> PromptConfig {
        match (&self.file, &self.text) {
            (Some(path), _) => PromptConfig::File(path.clone()),
            (None, Some(text)) if !text.trim().is_empty() => PromptConfig::Text(text.clone()),
            _ => PromptConfig::Text(DEFAULT_SYSTEM_PROMPT.to_string()),
        }
    }
}
