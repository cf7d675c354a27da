//! Dialogue progression engine
//!
//! One handler per stage. A turn only ever fills the field the current stage
//! waits for; anything else is answered with a re-prompt and leaves the
//! state as it was.

use super::replies;
use super::state::{ConversationState, DialogueStage};
use crate::calculator::calculate_profit;
use crate::catalog::InvestmentCatalog;
use crate::intake::{self, DEFAULT_CURRENCY};
use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, warn};

/// What a failed parse was looking for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Expected {
    /// A salary figure somewhere in the text
    Salary,
    /// A plain decimal amount
    Amount,
    /// A whole number of years
    Years,
}

/// Recoverable problems within a turn. Each one becomes a chat message.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TurnError {
    /// The message did not contain what the stage asked for
    #[error("could not read {expected:?} from {input:?}")]
    ParseFailure {
        /// What the stage was waiting for
        expected: Expected,
        /// Raw user input
        input: String,
    },

    /// Target name not in the catalog
    #[error("unsupported target: {0}")]
    UnrecognizedTarget(String),

    /// Accepted target had no rate at calculation time
    #[error("no rate available for target {0:?}")]
    CalculatorMiss(String),
}

/// Result of one turn
#[derive(Debug, Clone, PartialEq)]
pub struct TurnOutcome {
    /// Bot messages to append, in order
    pub replies: Vec<String>,
    /// Stage before the turn
    pub from: DialogueStage,
    /// Stage after the turn
    pub to: DialogueStage,
    /// Projected profit, when this turn produced one
    pub profit: Option<f64>,
    /// Recoverable error reported to the user, if any
    pub error: Option<TurnError>,
}

impl TurnOutcome {
    fn new(from: DialogueStage) -> Self {
        Self {
            replies: Vec::new(),
            from,
            to: from,
            profit: None,
            error: None,
        }
    }

    /// Whether the turn moved the dialogue forward
    pub fn advanced(&self) -> bool {
        self.to != self.from
    }
}

/// Drives a [`ConversationState`] one user message at a time.
///
/// The engine holds no per-session data; a single engine serves any number
/// of sessions, each passing in its own state.
#[derive(Debug, Clone)]
pub struct DialogueEngine {
    catalog: Arc<InvestmentCatalog>,
    default_currency: String,
}

impl Default for DialogueEngine {
    fn default() -> Self {
        Self::new(Arc::new(InvestmentCatalog::builtin()))
    }
}

impl DialogueEngine {
    /// Create an engine over a catalog
    pub fn new(catalog: Arc<InvestmentCatalog>) -> Self {
        Self {
            catalog,
            default_currency: DEFAULT_CURRENCY.to_string(),
        }
    }

    /// Currency label used when a salary message names none
    pub fn with_default_currency(mut self, currency: impl Into<String>) -> Self {
        self.default_currency = currency.into();
        self
    }

    pub fn default_currency(&self) -> &str {
        &self.default_currency
    }

    /// The catalog targets are matched against
    pub fn catalog(&self) -> &InvestmentCatalog {
        &self.catalog
    }

    /// Shared handle to the catalog
    pub fn catalog_handle(&self) -> Arc<InvestmentCatalog> {
        Arc::clone(&self.catalog)
    }

    /// First bot message of a session
    pub fn opening(&self) -> String {
        replies::greeting()
    }

    /// Apply one user message to `state`
    pub fn handle_turn(&self, state: &mut ConversationState, input: &str) -> TurnOutcome {
        let mut outcome = TurnOutcome::new(state.stage());

        let result = match outcome.from {
            DialogueStage::AwaitingSalary => self.on_salary(state, input, &mut outcome),
            DialogueStage::AwaitingTarget => self.on_target(state, input, &mut outcome),
            DialogueStage::AwaitingAmount => Self::on_amount(state, input, &mut outcome),
            DialogueStage::AwaitingDuration => self.on_duration(state, input, &mut outcome),
            DialogueStage::Complete => {
                outcome.replies.push(replies::already_complete());
                Ok(())
            }
        };

        if let Err(error) = result {
            warn!(stage = %outcome.from, %error, "Turn rejected");
            outcome.replies.push(replies::for_error(&error, &self.catalog));
            outcome.error = Some(error);
        }

        outcome.to = state.stage();
        debug!(from = %outcome.from, to = %outcome.to, replies = outcome.replies.len(), "Turn handled");
        outcome
    }

    fn on_salary(
        &self,
        state: &mut ConversationState,
        input: &str,
        outcome: &mut TurnOutcome,
    ) -> Result<(), TurnError> {
        let income = intake::extract_financial_info(input, &self.default_currency).ok_or_else(
            || TurnError::ParseFailure {
                expected: Expected::Salary,
                input: input.to_string(),
            },
        )?;

        outcome.replies.push(replies::salary_ack(&income));
        outcome.replies.push(replies::catalog_overview(&self.catalog));
        outcome.replies.push(replies::choose_target());
        state.record_income(income);
        Ok(())
    }

    fn on_target(
        &self,
        state: &mut ConversationState,
        input: &str,
        outcome: &mut TurnOutcome,
    ) -> Result<(), TurnError> {
        let name = input.trim();
        let id = self
            .catalog
            .lookup(name)
            .ok_or_else(|| TurnError::UnrecognizedTarget(name.to_string()))?;
        let entry = self
            .catalog
            .get(&id)
            .ok_or_else(|| TurnError::UnrecognizedTarget(name.to_string()))?;

        outcome.replies.push(replies::target_details(entry));
        outcome.replies.push(replies::ask_amount());
        state.record_target(id);
        Ok(())
    }

    fn on_amount(
        state: &mut ConversationState,
        input: &str,
        outcome: &mut TurnOutcome,
    ) -> Result<(), TurnError> {
        let amount = intake::parse_amount(input).ok_or_else(|| TurnError::ParseFailure {
            expected: Expected::Amount,
            input: input.to_string(),
        })?;

        outcome.replies.push(replies::ask_years());
        state.record_amount(amount);
        Ok(())
    }

    fn on_duration(
        &self,
        state: &mut ConversationState,
        input: &str,
        outcome: &mut TurnOutcome,
    ) -> Result<(), TurnError> {
        let years = intake::parse_years(input).ok_or_else(|| TurnError::ParseFailure {
            expected: Expected::Years,
            input: input.to_string(),
        })?;
        state.record_years(years);

        let projection = state.target().zip(state.amount()).and_then(|(target, amount)| {
            let profit = calculate_profit(&self.catalog, amount, target.as_str(), years)?;
            let entry = self.catalog.get(target)?;
            Some((entry, amount, profit))
        });
        let Some((entry, amount, profit)) = projection else {
            let target = state.target().map(ToString::to_string).unwrap_or_default();
            return Err(TurnError::CalculatorMiss(target));
        };

        let currency = state.currency().unwrap_or(&self.default_currency);
        outcome
            .replies
            .push(replies::profit_summary(entry, amount, currency, years, profit));
        outcome.profit = Some(profit);
        Ok(())
    }
}
