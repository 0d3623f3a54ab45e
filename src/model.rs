//! Generative model client for the sitelens crate
//!
//! Talks to an OpenAI-compatible completions endpoint (llama-server, vLLM,
//! TGI) serving an instruction-tuned model. Prompts use the Mistral
//! `[INST]` template; replies are stripped of any echoed prompt by taking
//! only the text after the last `[/INST]` marker.

use crate::error::{Error, Result};
use reqwest::{Client as ReqwestClient, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, error, instrument};

/// Default timeout for model inference requests in seconds
const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Sampling configuration for a generation request
#[derive(Debug, Clone, Copy, Serialize)]
pub struct GenerationConfig {
    /// Maximum number of tokens to generate
    pub max_tokens: u32,

    /// Sampling temperature
    pub temperature: f32,
}

impl GenerationConfig {
    /// Near-deterministic sampling for structured output (keyword lists)
    pub fn structured() -> Self {
        Self {
            max_tokens: 100,
            temperature: 0.3,
        }
    }

    /// Looser sampling for advisory prose (summaries, suggestions)
    pub fn prose() -> Self {
        Self {
            max_tokens: 256,
            temperature: 0.7,
        }
    }
}

#[derive(Debug, Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    choices: Vec<CompletionChoice>,
}

#[derive(Debug, Deserialize)]
struct CompletionChoice {
    text: String,
}

/// Client for a completions-style model backend
///
/// Built once at startup and injected into request handlers; cloning is
/// cheap since the underlying `reqwest` client is reference counted.
#[derive(Clone)]
pub struct ModelClient {
    client: ReqwestClient,
    base_url: String,
    model: String,
}

impl ModelClient {
    /// Create a client for the given backend URL and model name
    pub fn new(base_url: impl Into<String>, model: impl Into<String>) -> Result<Self> {
        Self::with_timeout(base_url, model, Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    /// Create a client with a custom inference timeout
    pub fn with_timeout(
        base_url: impl Into<String>,
        model: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self> {
        let client = ReqwestClient::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            model: model.into(),
        })
    }

    /// Wrap raw text in the Mistral instruction template
    pub fn instruction_prompt(instruction: &str) -> String {
        format!("<s>[INST]{}[/INST]", instruction)
    }

    /// Generate text for a prompt
    ///
    /// Returns only the newly generated text: if the backend echoes the
    /// prompt, everything up to and including the last `[/INST]` marker is
    /// discarded.
    #[instrument(skip(self, prompt), level = "debug")]
    pub async fn generate(&self, prompt: &str, config: GenerationConfig) -> Result<String> {
        let request = CompletionRequest {
            model: &self.model,
            prompt,
            max_tokens: config.max_tokens,
            temperature: config.temperature,
        };

        let url = format!("{}/v1/completions", self.base_url);
        debug!("Sending completion request to {}", url);

        let response = self.client.post(&url).json(&request).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            error!("Model backend error: {} - {}", status, body);
            return if status == StatusCode::UNAUTHORIZED {
                Err(Error::Other("Model backend rejected credentials".to_string()))
            } else {
                Err(Error::Model {
                    status_code: status.as_u16(),
                    message: body,
                })
            };
        }

        let completion: CompletionResponse = serde_json::from_str(&body).map_err(|e| {
            error!("Failed to parse completion response: {}", e);
            Error::UnexpectedResponse(format!("Failed to parse completion response: {}", e))
        })?;

        let text = completion
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.text)
            .ok_or_else(|| {
                Error::UnexpectedResponse("Completion response had no choices".to_string())
            })?;

        Ok(strip_instruction_echo(&text).to_string())
    }

    /// The model name this client generates with
    pub fn model(&self) -> &str {
        &self.model
    }
}

#[cfg(test)]
impl ModelClient {
    /// Set the base URL (for testing only)
    pub fn set_base_url(&mut self, url: String) {
        self.base_url = url.trim_end_matches('/').to_string();
    }
}

/// Take only the text after the last `[/INST]` marker, trimmed
fn strip_instruction_echo(text: &str) -> &str {
    match text.rfind("[/INST]") {
        Some(idx) => text[idx + "[/INST]".len()..].trim(),
        None => text.trim(),
    }
}
