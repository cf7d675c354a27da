//! Completion request and reply types

use crate::messages::{Message, Role};
use serde::{Deserialize, Serialize};
use std::ops::AddAssign;

/// Reply length cap used when the caller sets none
pub const DEFAULT_MAX_TOKENS: usize = 512;

/// A question for the advisor together with its dialogue context
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionRequest {
    /// Model identifier (provider-specific)
    pub model: String,

    /// Instructions sent ahead of the context
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system: Option<String>,

    /// Context followed by the question, oldest first
    pub messages: Vec<Message>,

    pub max_tokens: usize,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
}

impl CompletionRequest {
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            system: None,
            messages: Vec::new(),
            max_tokens: DEFAULT_MAX_TOKENS,
            temperature: None,
        }
    }

    pub fn with_system(mut self, prompt: impl Into<String>) -> Self {
        self.system = Some(prompt.into());
        self
    }

    /// Append earlier dialogue messages
    pub fn with_context(mut self, messages: impl IntoIterator<Item = Message>) -> Self {
        self.messages.extend(messages);
        self
    }

    /// Append the user's question; call after [`Self::with_context`]
    pub fn with_question(mut self, question: impl Into<String>) -> Self {
        self.messages.push(Message::user(question));
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: usize) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// The most recent user message
    pub fn question(&self) -> Option<&str> {
        self.messages
            .iter()
            .rev()
            .find(|message| message.role == Role::User)
            .map(Message::text)
    }
}

/// The advisor's answer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionResponse {
    pub message: Message,
    pub stop_reason: StopReason,
    pub usage: TokenUsage,
}

impl CompletionResponse {
    pub fn text(&self) -> &str {
        self.message.text()
    }

    /// Whether the answer was cut off by the token cap
    pub fn was_truncated(&self) -> bool {
        self.stop_reason == StopReason::Truncated
    }
}

/// Why the service stopped generating
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    /// The model ended its answer
    Finished,
    /// `max_tokens` reached
    Truncated,
    /// Output withheld by the provider's content filter
    Filtered,
}

/// Token accounting for one call, or a running total
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenUsage {
    pub input_tokens: usize,
    pub output_tokens: usize,
}

impl TokenUsage {
    pub fn total(&self) -> usize {
        self.input_tokens + self.output_tokens
    }
}

impl AddAssign for TokenUsage {
    fn add_assign(&mut self, other: Self) {
        self.input_tokens += other.input_tokens;
        self.output_tokens += other.output_tokens;
    }
}
