//! Conversational investment helper
//!
//! This crate walks a user through a short chat dialogue and projects the
//! profit of a chosen investment:
//!
//! - Salary intake from free-form text (Arabic or ASCII digits, optional currency)
//! - Target selection from a catalog of asset classes and companies
//! - Amount and duration intake with re-prompts on bad input
//! - Compound-interest projection
//! - Slash commands next to the dialogue (`/options`, `/status`, `/calc`, ...)
//! - Optional advisor mode backed by an OpenAI-compatible completion service
//!
//! # Architecture
//!
//! [`dialogue::DialogueEngine`] is synchronous and holds no per-session data.
//! Each session owns a [`interface::Session`] (state, transcript, token count)
//! and hands it to the engine one turn at a time. [`bot::AdvisorBot`] wraps
//! both with command handling and the optional [`invest_llm::LLMProvider`].
//!
//! # Example
//!
//! ```rust,ignore
//! use invest_core::bot::{AdvisorBot, BotConfig};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let mut bot = AdvisorBot::new(BotConfig::from_env()?)?;
//!     println!("{}", bot.start());
//!     Ok(())
//! }
//! ```

pub mod bot;
pub mod calculator;
pub mod catalog;
pub mod config;
pub mod dialogue;
pub mod error;
pub mod intake;
pub mod interface;

pub use bot::{AdvisorBot, BotConfig, BotOutput, Command};
pub use calculator::calculate_profit;
pub use catalog::{CatalogEntry, InvestmentCatalog, TargetId, TargetKind};
pub use config::AdvisorConfig;
pub use dialogue::{ConversationState, DialogueEngine, DialogueStage, TurnError, TurnOutcome};
pub use error::{AdvisorError, Result};
pub use intake::{extract_financial_info, Income};
