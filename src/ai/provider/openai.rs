//! OpenAI-compatible Chat Completions provider
//!
//! Serves both OpenAI and OpenRouter, which speak the same protocol.

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

use super::{
    LlmProvider, LlmResponse, ProviderConfig, ResponseMetadata, ResponseTiming, TokenUsage,
    prompt_utils,
};
use crate::ai::timeout::TimeoutConfig;
use crate::ai::validation::extract_json_from_response;
use crate::types::{ErrorClassifier, Result, TowerError};

const SYSTEM_PROMPT: &str =
    "You are an expert document analyst for agent performance evaluation. Always respond with valid JSON.";

/// Endpoint flavor, decides defaults and the API key variable
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flavor {
    OpenAi,
    OpenRouter,
}

impl Flavor {
    fn name(&self) -> &'static str {
        match self {
            Self::OpenAi => "openai",
            Self::OpenRouter => "openrouter",
        }
    }

    fn default_api_base(&self) -> &'static str {
        match self {
            Self::OpenAi => "https://api.openai.com/v1",
            Self::OpenRouter => "https://openrouter.ai/api/v1",
        }
    }

    fn default_model(&self) -> &'static str {
        match self {
            Self::OpenAi => "gpt-4o-mini",
            Self::OpenRouter => "openai/gpt-4o-mini",
        }
    }

    fn key_var(&self) -> &'static str {
        match self {
            Self::OpenAi => "OPENAI_API_KEY",
            Self::OpenRouter => "OPENROUTER_KEY",
        }
    }
}

/// Chat Completions provider with secure API key handling
pub struct OpenAiProvider {
    flavor: Flavor,
    api_key: SecretString,
    api_base: String,
    model: String,
    temperature: f32,
    max_tokens: usize,
    client: reqwest::Client,
}

impl std::fmt::Debug for OpenAiProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAiProvider")
            .field("flavor", &self.flavor)
            .field("api_key", &"[REDACTED]")
            .field("api_base", &self.api_base)
            .field("model", &self.model)
            .field("temperature", &self.temperature)
            .field("max_tokens", &self.max_tokens)
            .finish()
    }
}

impl OpenAiProvider {
    pub fn new(config: ProviderConfig) -> Result<Self> {
        Self::with_flavor(config, Flavor::OpenAi)
    }

    /// OpenRouter endpoint, keyed by `OPENROUTER_KEY`
    pub fn openrouter(config: ProviderConfig) -> Result<Self> {
        Self::with_flavor(config, Flavor::OpenRouter)
    }

    fn with_flavor(config: ProviderConfig, flavor: Flavor) -> Result<Self> {
        let api_key = config
            .api_key
            .or_else(|| std::env::var(flavor.key_var()).ok())
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| {
                TowerError::Config(format!(
                    "{} API key not found. Set {} env var",
                    flavor.name(),
                    flavor.key_var()
                ))
            })?;

        let api_base = config
            .api_base
            .unwrap_or_else(|| flavor.default_api_base().to_string());
        let api_base = api_base.trim_end_matches('/').to_string();

        let model = config
            .model
            .unwrap_or_else(|| flavor.default_model().to_string());

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(TimeoutConfig::default().connection)
            .build()
            .map_err(|e| TowerError::LlmApi(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            flavor,
            api_key: SecretString::from(api_key),
            api_base,
            model,
            temperature: config.temperature,
            max_tokens: config.max_tokens,
            client,
        })
    }

    fn build_request(&self, prompt: &str, schema: &Value) -> ChatCompletionRequest {
        ChatCompletionRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: SYSTEM_PROMPT.to_string(),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: prompt_utils::build_schema_prompt(prompt, schema),
                },
            ],
            temperature: self.temperature,
            max_tokens: Some(self.max_tokens),
            response_format: Some(ResponseFormat {
                format_type: "json_object".to_string(),
            }),
        }
    }
}

#[async_trait]
impl LlmProvider for OpenAiProvider {
    async fn generate(&self, prompt: &str, schema: &Value) -> Result<LlmResponse> {
        let provider = self.flavor.name();
        info!(
            "Generating with {} (model: {}, temperature: {})",
            provider, self.model, self.temperature
        );

        let start_time = Instant::now();
        let request = self.build_request(prompt, schema);
        let url = format!("{}/chat/completions", self.api_base);

        debug!("Sending request to {}", url);

        let response = self
            .client
            .post(&url)
            .bearer_auth(self.api_key.expose_secret())
            .json(&request)
            .send()
            .await
            .map_err(|e| ErrorClassifier::classify(&e.to_string(), provider))?;

        let elapsed = start_time.elapsed();

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(ErrorClassifier::classify_http_status(status.as_u16(), &body, provider).into());
        }

        let response_body: ChatCompletionResponse = response.json().await.map_err(|e| {
            TowerError::LlmApi(format!("Failed to parse {} response: {}", provider, e))
        })?;

        let usage = response_body
            .usage
            .map(|u| TokenUsage::new(u.prompt_tokens, u.completion_tokens))
            .unwrap_or_default();

        let content_str = response_body
            .choices
            .first()
            .and_then(|c| c.message.content.as_ref())
            .ok_or_else(|| TowerError::LlmApi(format!("No content in {} response", provider)))?;

        debug!(
            tokens = usage.total(),
            "Received response from {}, parsing JSON", provider
        );
        let content = extract_json_from_response(content_str)?;

        Ok(LlmResponse {
            content,
            usage,
            timing: ResponseTiming::from_duration(elapsed),
            metadata: ResponseMetadata {
                model: self.model.clone(),
                provider: provider.to_string(),
            },
        })
    }

    fn name(&self) -> &str {
        self.flavor.name()
    }

    fn model(&self) -> &str {
        &self.model
    }

    async fn health_check(&self) -> Result<bool> {
        let url = format!("{}/models", self.api_base);

        let response = self
            .client
            .get(&url)
            .bearer_auth(self.api_key.expose_secret())
            .send()
            .await;

        match response {
            Ok(resp) if resp.status().is_success() => {
                info!("{} API is available", self.flavor.name());
                Ok(true)
            }
            Ok(resp) => {
                warn!("{} API check failed: {}", self.flavor.name(), resp.status());
                Ok(false)
            }
            Err(e) => {
                warn!("{} API check failed: {}", self.flavor.name(), e);
                Ok(false)
            }
        }
    }
}

// Request/Response types

#[derive(Debug, Serialize)]
struct ChatCompletionRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<ResponseFormat>,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Debug, Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    format_type: String,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
    usage: Option<UsageInfo>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct UsageInfo {
    prompt_tokens: u32,
    completion_tokens: u32,
}
