//! Remote text refiner over an OpenAI-compatible completion endpoint.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use docbay_core::config::RefinerConfig;
use docbay_core::error::{DocbayError, DocbayResult};
use docbay_core::traits::Refine;

use crate::prompt::build_prompt;

/// Fixed socket timeout for the single outbound request.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Sampling temperature, fixed by contract.
const TEMPERATURE: f32 = 0.3;

/// Generous output ceiling (1024 * 130 tokens).
const MAX_TOKENS: u32 = 133_120;

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    #[serde(default)]
    content: String,
}

/// Client for the configured completion endpoint/model pair.
///
/// One request per invocation; no retry, no streaming. Failures never reach
/// the caller: they degrade into short diagnostic strings.
pub struct TextRefiner {
    client: reqwest::Client,
    base_url: String,
    model: String,
}

impl TextRefiner {
    /// Create a refiner for the configured endpoint and model.
    pub fn new(config: RefinerConfig) -> DocbayResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| DocbayError::Configuration(format!("Failed to build HTTP client: {}", e)))?;

        info!(base_url = %config.base_url, model = %config.model, "text refiner initialized");

        Ok(Self {
            client,
            base_url: config.base_url,
            model: config.model,
        })
    }

    async fn request(&self, prompt: String) -> Result<reqwest::Response, reqwest::Error> {
        let request = ChatRequest {
            model: self.model.clone(),
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
            temperature: TEMPERATURE,
            max_tokens: MAX_TOKENS,
        };

        self.client
            .post(format!("{}/chat/completions", self.base_url))
            .json(&request)
            .send()
            .await
    }
}

#[async_trait]
impl Refine for TextRefiner {
    async fn refine(&self, text: &str, extra: Option<&str>) -> String {
        if text.trim().is_empty() {
            warn!("refiner called with empty text");
            return String::new();
        }

        let prompt = build_prompt(text, extra);
        info!(model = %self.model, prompt_len = prompt.len(), "sending refinement request");

        let response = match self.request(prompt).await {
            Ok(response) => response,
            Err(e) => {
                warn!(error = %e, "refinement request failed");
                return format!("Failed to refine text: {}", e);
            }
        };

        let status = response.status();
        if !status.is_success() {
            warn!(status = status.as_u16(), "refinement returned non-success status");
            return format!("AI refinement failed: HTTP {}", status.as_u16());
        }

        match response.json::<ChatResponse>().await {
            Ok(body) => {
                let content = body
                    .choices
                    .into_iter()
                    .next()
                    .map(|c| c.message.content)
                    .unwrap_or_default();
                info!(output_len = content.len(), "refinement succeeded");
                content
            }
            Err(e) => {
                warn!(error = %e, "failed to parse refinement response");
                format!("Failed to refine text: {}", e)
            }
        }
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}
