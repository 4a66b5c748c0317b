//! LLM Client: the single point of entry for all model completions.
//!
//! ARCHITECTURAL RULE: No other module may spawn the model process or call the
//! model's HTTP API directly. Everything goes through `ModelClient`.
//!
//! Backends:
//! - `SubprocessModelClient`: `ollama run <model> <prompt>` per call
//! - `OllamaHttpClient`: Ollama `/api/generate` over HTTP
//!
//! Expected failures (timeout, non-zero exit, HTTP errors) are `Completion`
//! variants, never `Err`.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::{Serialize, Serializer};

use crate::config::{Config, ModelBackend};

pub mod ollama;
pub mod prompts;
pub mod subprocess;

pub use ollama::OllamaHttpClient;
pub use subprocess::SubprocessModelClient;

/// Outcome of a single completion call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Completion {
    /// Model output, trimmed. May be empty.
    Success { text: String },
    Timeout,
    ProcessError { message: String },
}

impl Completion {
    /// Builds a success from raw model output.
    pub fn from_output(raw: &str) -> Self {
        Completion::Success {
            text: raw.trim().to_string(),
        }
    }

    #[allow(dead_code)]
    pub fn text(&self) -> Option<&str> {
        match self {
            Completion::Success { text } => Some(text.as_str()),
            _ => None,
        }
    }

    pub fn status(&self) -> &'static str {
        match self {
            Completion::Success { .. } => "success",
            Completion::Timeout => "timeout",
            Completion::ProcessError { .. } => "process_error",
        }
    }

    /// Text shown to the user: the output itself, or a description of the failure.
    pub fn display_text(&self) -> String {
        match self {
            Completion::Success { text } => text.clone(),
            Completion::Timeout => "Command timed out.".to_string(),
            Completion::ProcessError { message } => {
                format!("Command failed with error: {message}")
            }
        }
    }
}

/// Serialized as `{"status": ..., "response": <display text>}`.
impl Serialize for Completion {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        #[derive(Serialize)]
        struct Body<'a> {
            status: &'a str,
            response: String,
        }

        Body {
            status: self.status(),
            response: self.display_text(),
        }
        .serialize(serializer)
    }
}

/// Synchronous-style text completion with a bounded wait.
/// Carried as `Arc<dyn ModelClient>`; swap backends without touching callers.
#[async_trait]
pub trait ModelClient: Send + Sync {
    async fn complete(&self, prompt: &str, timeout: Duration) -> Completion;

    /// Short label for logs.
    fn backend_name(&self) -> &'static str;
}

/// Builds the configured backend.
pub fn from_config(config: &Config) -> anyhow::Result<Arc<dyn ModelClient>> {
    let client: Arc<dyn ModelClient> = match config.model_backend {
        ModelBackend::Subprocess => Arc::new(SubprocessModelClient::new(
            config.ollama_bin.clone(),
            config.model_name.clone(),
        )),
        ModelBackend::Http => Arc::new(OllamaHttpClient::new(
            config.ollama_url.clone(),
            config.model_name.clone(),
        )?),
    };
    Ok(client)
}
