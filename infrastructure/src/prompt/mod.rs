//! System prompt sources.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;
use twin_application::{StaticPrompt, SystemPromptSource};
use twin_domain::{ConfigError, PromptConfig};

/// Prompt used when no text or file is configured.
pub const DEFAULT_SYSTEM_PROMPT: &str = "You are a digital twin. Answer as the person you represent would: \
stay in character, be professional and engaging, and say so plainly when you do not know something.";

/// Prompt text read from a file once at startup.
#[derive(Debug, Clone)]
pub struct FilePrompt {
    path: PathBuf,
    text: String,
}

impl FilePrompt {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| {
            ConfigError::Invalid(format!("Cannot read prompt file {}: {}", path.display(), e))
        })?;
        Ok(Self {
            path: path.to_path_buf(),
            text: text.trim_end().to_string(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SystemPromptSource for FilePrompt {
    fn system_prompt(&self) -> String {
        self.text.clone()
    }
}

/// Construct the configured prompt source.
pub fn build_prompt_source(config: &PromptConfig) -> Result<Arc<dyn SystemPromptSource>, ConfigError> {
    match config {
        PromptConfig::Text(text) => Ok(Arc::new(StaticPrompt::new(text.clone()))),
        PromptConfig::File(path) => {
            let prompt = FilePrompt::load(path)?;
            info!(path = %prompt.path().display(), "Loaded system prompt");
            Ok(Arc::new(prompt))
        }
    }
}
