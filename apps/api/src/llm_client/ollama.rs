use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::{Completion, ModelClient};

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    response: String,
}

#[derive(Debug, Deserialize)]
struct OllamaError {
    error: String,
}

/// Model client for a running Ollama server (`POST /api/generate`, non-streaming).
#[derive(Clone)]
pub struct OllamaHttpClient {
    client: Client,
    base_url: String,
    model: String,
}

impl OllamaHttpClient {
    pub fn new(base_url: String, model: String) -> anyhow::Result<Self> {
        let client = Client::builder()
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            model,
        })
    }

    fn generate_url(&self) -> String {
        format!("{}/api/generate", self.base_url)
    }
}

#[async_trait]
impl ModelClient for OllamaHttpClient {
    async fn complete(&self, prompt: &str, timeout: Duration) -> Completion {
        let body = GenerateRequest {
            model: &self.model,
            prompt,
            stream: false,
        };

        let response = self
            .client
            .post(self.generate_url())
            .timeout(timeout)
            .json(&body)
            .send()
            .await;

        let response = match response {
            Ok(r) => r,
            Err(e) if e.is_timeout() => {
                warn!("Ollama call timed out after {}s", timeout.as_secs_f64());
                return Completion::Timeout;
            }
            Err(e) => {
                warn!("Ollama request failed: {e}");
                return Completion::ProcessError {
                    message: e.to_string(),
                };
            }
        };

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<OllamaError>(&body)
                .map(|e| e.error)
                .unwrap_or(body);
            warn!("Ollama returned {status}: {message}");
            return Completion::ProcessError { message };
        }

        match response.json::<GenerateResponse>().await {
            Ok(parsed) => {
                debug!("Ollama returned {} bytes", parsed.response.len());
                Completion::from_output(&parsed.response)
            }
            Err(e) if e.is_timeout() => Completion::Timeout,
            Err(e) => Completion::ProcessError {
                message: format!("invalid Ollama response: {e}"),
            },
        }
    }

    fn backend_name(&self) -> &'static str {
        "ollama-http"
    }
}
