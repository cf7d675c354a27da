//! Concrete completion backends

pub mod openai;

pub use openai::{OpenAIConfig, OpenAIProvider};
