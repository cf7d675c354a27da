//! Chat-completion abstraction for the advisor mode
//!
//! This crate provides a provider-agnostic way to send a dialogue to a
//! conversational completion service and get a reply back. It includes:
//!
//! - Message types for the dialogue context
//! - Completion request/response types with token accounting
//! - The [`LLMProvider`] trait
//! - An OpenAI-compatible provider implementation

pub mod completion;
pub mod error;
pub mod messages;
pub mod provider;
pub mod providers;

// Re-export main types
pub use completion::{CompletionRequest, CompletionResponse, StopReason, TokenUsage};
pub use error::{LLMError, Result};
pub use messages::{Message, Role};
pub use provider::LLMProvider;
