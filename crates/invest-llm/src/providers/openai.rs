//! OpenAI-compatible chat-completions backend
//!
//! Any server speaking the `/chat/completions` protocol works (OpenAI,
//! llama.cpp, vLLM, LM Studio) by pointing `api_base` at it.
//!
//! ```no_run
//! use invest_llm::{CompletionRequest, LLMProvider};
//! use invest_llm::providers::{OpenAIConfig, OpenAIProvider};
//!
//! # async fn run() -> invest_llm::Result<()> {
//! let config = OpenAIConfig::new("not-needed").with_api_base("http://localhost:1234/v1");
//! let provider = OpenAIProvider::new(config)?;
//!
//! let request = CompletionRequest::new("gpt-4o-mini").with_question("ما هي السندات؟");
//! let response = provider.complete(request).await?;
//! println!("{}", response.text());
//! # Ok(())
//! # }
//! ```

use crate::{
    CompletionRequest, CompletionResponse, LLMError, LLMProvider, Message, Result, StopReason,
    TokenUsage,
};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, instrument, warn};

const DEFAULT_API_BASE: &str = "https://api.openai.com/v1";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

/// Connection settings for an OpenAI-compatible endpoint
#[derive(Debug, Clone)]
pub struct OpenAIConfig {
    pub api_key: String,

    /// Base URL without the `/chat/completions` suffix
    pub api_base: String,

    pub timeout: Duration,

    /// Models the client may request; empty accepts any
    pub allowed_models: Vec<String>,
}

impl Default for OpenAIConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            api_base: DEFAULT_API_BASE.to_string(),
            timeout: DEFAULT_TIMEOUT,
            allowed_models: Vec::new(),
        }
    }
}

impl OpenAIConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            ..Default::default()
        }
    }

    /// Read `OPENAI_API_KEY` (required) and `OPENAI_API_BASE` (optional)
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("OPENAI_API_KEY")
            .map_err(|_| LLMError::NotConfigured("OPENAI_API_KEY is not set".to_string()))?;

        let mut config = Self::new(api_key);
        if let Ok(api_base) = std::env::var("OPENAI_API_BASE") {
            config = config.with_api_base(api_base);
        }
        Ok(config)
    }

    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Restrict requests to the given model (may be called repeatedly)
    pub fn allow_model(mut self, model: impl Into<String>) -> Self {
        self.allowed_models.push(model.into());
        self
    }

    pub fn accepts(&self, model: &str) -> bool {
        self.allowed_models.is_empty() || self.allowed_models.iter().any(|m| m == model)
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.api_base)
    }
}

/// [`LLMProvider`] backed by an OpenAI-compatible HTTP endpoint
pub struct OpenAIProvider {
    client: Client,
    config: OpenAIConfig,
}

impl OpenAIProvider {
    pub fn new(config: OpenAIConfig) -> Result<Self> {
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self { client, config })
    }

    pub fn from_env() -> Result<Self> {
        Self::new(OpenAIConfig::from_env()?)
    }

    pub fn config(&self) -> &OpenAIConfig {
        &self.config
    }
}

#[async_trait]
impl LLMProvider for OpenAIProvider {
    #[instrument(skip(self, request), fields(model = %request.model, api_base = %self.config.api_base))]
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse> {
        if !self.config.accepts(&request.model) {
            return Err(LLMError::UnknownModel(request.model));
        }

        let body = ChatRequest::from_request(&request);
        debug!(messages = body.messages.len(), "Posting chat completion");

        let response = self
            .client
            .post(self.config.endpoint())
            .bearer_auth(&self.config.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;
        if !status.is_success() {
            warn!(%status, "Completion service refused the request");
            return Err(status_error(status, text, &request.model));
        }

        serde_json::from_str::<ChatResponse>(&text)?.into_completion()
    }

    fn name(&self) -> &'static str {
        "openai"
    }
}

fn status_error(status: StatusCode, body: String, model: &str) -> LLMError {
    match status {
        StatusCode::UNAUTHORIZED => LLMError::Unauthorized,
        StatusCode::TOO_MANY_REQUESTS => LLMError::RateLimited(body),
        StatusCode::BAD_REQUEST => LLMError::BadRequest(body),
        StatusCode::NOT_FOUND => LLMError::UnknownModel(model.to_string()),
        other => LLMError::Service {
            status: other.as_u16(),
            body,
        },
    }
}

// Wire format

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<WireMessage<'a>>,
    max_tokens: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

#[derive(Debug, Serialize)]
struct WireMessage<'a> {
    role: &'static str,
    content: &'a str,
}

impl<'a> ChatRequest<'a> {
    /// The system prompt travels as the first message
    fn from_request(request: &'a CompletionRequest) -> Self {
        let system = request.system.as_deref().map(|content| WireMessage {
            role: "system",
            content,
        });
        let context = request.messages.iter().map(|message| WireMessage {
            role: message.role.as_str(),
            content: message.text(),
        });

        Self {
            model: &request.model,
            messages: system.into_iter().chain(context).collect(),
            max_tokens: request.max_tokens,
            temperature: request.temperature,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
    #[serde(default)]
    usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ReplyMessage,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ReplyMessage {
    role: String,
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Usage {
    prompt_tokens: usize,
    completion_tokens: usize,
}

impl ChatResponse {
    fn into_completion(self) -> Result<CompletionResponse> {
        let Some(choice) = self.choices.into_iter().next() else {
            return Err(LLMError::MalformedReply("no choices".to_string()));
        };
        if choice.message.role != "assistant" {
            return Err(LLMError::MalformedReply(format!(
                "reply attributed to {:?}",
                choice.message.role
            )));
        }

        // Some local servers omit usage entirely.
        let usage = self.usage.map_or_else(TokenUsage::default, |u| TokenUsage {
            input_tokens: u.prompt_tokens,
            output_tokens: u.completion_tokens,
        });
        let stop_reason = stop_reason(choice.finish_reason.as_deref());
        debug!(?stop_reason, tokens = usage.total(), "Completion received");

        Ok(CompletionResponse {
            message: Message::assistant(choice.message.content.unwrap_or_default()),
            stop_reason,
            usage,
        })
    }
}

fn stop_reason(finish_reason: Option<&str>) -> StopReason {
    match finish_reason {
        Some("length") => StopReason::Truncated,
        Some("content_filter") => StopReason::Filtered,
        _ => StopReason::Finished,
    }
}
