//! Per-session state owned by the surface

use crate::dialogue::{ConversationState, DialogueEngine, TurnOutcome};
use crate::interface::message::{ChatMessage, Transcript};
use chrono::{DateTime, Utc};
use invest_llm::TokenUsage;
use tracing::info;
use uuid::Uuid;

/// One interactive session: dialogue state, transcript and advisor token count.
///
/// The surface holds one `Session` per active user and passes it by `&mut`
/// into each call; sessions share nothing with each other.
#[derive(Debug, Clone)]
pub struct Session {
    id: Uuid,
    created_at: DateTime<Utc>,
    state: ConversationState,
    transcript: Transcript,
    usage: TokenUsage,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            state: ConversationState::new(),
            transcript: Transcript::new(),
            usage: TokenUsage::default(),
        }
    }

    /// Post the engine's opening question
    pub fn start(&mut self, engine: &DialogueEngine) {
        info!(session = %self.id, "Session started");
        self.transcript.push(ChatMessage::bot(engine.opening()));
    }

    /// Run one dialogue turn and record both sides of it
    pub fn submit(&mut self, engine: &DialogueEngine, input: &str) -> TurnOutcome {
        self.transcript.push(ChatMessage::user(input));
        let outcome = engine.handle_turn(&mut self.state, input);
        for reply in &outcome.replies {
            self.transcript.push(ChatMessage::bot(reply.clone()));
        }
        outcome
    }

    /// Start a fresh dialogue cycle. The transcript is kept.
    pub fn reset(&mut self, engine: &DialogueEngine) {
        info!(session = %self.id, stage = %self.state.stage(), "Dialogue reset");
        self.state = ConversationState::new();
        self.transcript.push(ChatMessage::bot(engine.opening()));
    }

    /// Record an advisor question, its answer and the tokens it cost
    pub fn record_exchange(&mut self, question: &str, answer: &str, usage: TokenUsage) {
        self.transcript.push(ChatMessage::user(question));
        self.transcript.push(ChatMessage::bot(answer));
        self.usage += usage;
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn state(&self) -> &ConversationState {
        &self.state
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    /// Tokens spent on advisor calls so far
    pub fn token_count(&self) -> usize {
        self.usage.total()
    }

    pub fn usage(&self) -> TokenUsage {
        self.usage
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialogue::DialogueStage;
    use crate::interface::message::Origin;

    #[test]
    fn test_start_posts_greeting() {
        let engine = DialogueEngine::default();
        let mut session = Session::new();
        session.start(&engine);

        assert_eq!(session.transcript().len(), 1);
        assert_eq!(session.transcript().messages()[0].origin, Origin::Bot);
    }

    #[test]
    fn test_submit_records_both_sides() {
        let engine = DialogueEngine::default();
        let mut session = Session::new();

        let outcome = session.submit(&engine, "5000 جنيه");

        assert_eq!(session.transcript().len(), 1 + outcome.replies.len());
        assert_eq!(session.transcript().messages()[0].text, "5000 جنيه");
        assert_eq!(session.state().stage(), DialogueStage::AwaitingTarget);
    }

    #[test]
    fn test_reset_keeps_transcript() {
        let engine = DialogueEngine::default();
        let mut session = Session::new();
        session.submit(&engine, "5000");
        let before = session.transcript().len();

        session.reset(&engine);

        assert_eq!(session.state().stage(), DialogueStage::AwaitingSalary);
        assert_eq!(session.transcript().len(), before + 1);
    }

    #[test]
    fn test_token_count_accumulates() {
        let mut session = Session::new();
        session.record_exchange(
            "q",
            "a",
            TokenUsage {
                input_tokens: 10,
                output_tokens: 5,
            },
        );
        session.record_exchange(
            "q2",
            "a2",
            TokenUsage {
                input_tokens: 1,
                output_tokens: 1,
            },
        );
        assert_eq!(session.token_count(), 17);
        assert_eq!(session.transcript().len(), 4);
    }

    #[test]
    fn test_sessions_are_independent() {
        let engine = DialogueEngine::default();
        let mut first = Session::new();
        let second = Session::new();

        first.submit(&engine, "5000");

        assert_ne!(first.id(), second.id());
        assert_eq!(second.state().stage(), DialogueStage::AwaitingSalary);
    }
}
