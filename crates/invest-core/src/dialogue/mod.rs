//! Multi-turn dialogue: salary → target → amount → duration → projection
//!
//! [`DialogueEngine::handle_turn`] takes the session's [`ConversationState`]
//! by `&mut`, fills in at most one field and returns the bot messages to
//! show. Parsing failures and unknown targets never abort the session; they
//! become re-prompts and are reported in [`TurnOutcome::error`].
//!
//! # Example
//!
//! ```
//! use invest_core::dialogue::{ConversationState, DialogueEngine, DialogueStage};
//!
//! let engine = DialogueEngine::default();
//! let mut state = ConversationState::new();
//!
//! engine.handle_turn(&mut state, "5000 جنيه");
//! engine.handle_turn(&mut state, "Apple");
//! engine.handle_turn(&mut state, "1000");
//! let outcome = engine.handle_turn(&mut state, "2");
//!
//! assert_eq!(state.stage(), DialogueStage::Complete);
//! assert!(outcome.replies[0].contains("254.40"));
//! ```

pub mod engine;
pub mod replies;
pub mod state;

pub use engine::{DialogueEngine, Expected, TurnError, TurnOutcome};
pub use state::{ConversationState, DialogueStage};
