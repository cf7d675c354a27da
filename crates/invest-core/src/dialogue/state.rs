//! Conversation state and the stage derived from it

use crate::catalog::TargetId;
use crate::intake::Income;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Where the dialogue currently is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DialogueStage {
    /// Waiting for a salary figure
    AwaitingSalary,
    /// Salary known, waiting for an investment target
    AwaitingTarget,
    /// Target chosen, waiting for the amount to invest
    AwaitingAmount,
    /// Amount known, waiting for the number of years
    AwaitingDuration,
    /// Everything collected and the projection has been given
    Complete,
}

impl DialogueStage {
    /// Position in the progression, 0-based
    pub fn index(&self) -> usize {
        match self {
            Self::AwaitingSalary => 0,
            Self::AwaitingTarget => 1,
            Self::AwaitingAmount => 2,
            Self::AwaitingDuration => 3,
            Self::Complete => 4,
        }
    }

    /// Stable label used in logs and status output
    pub fn label(&self) -> &'static str {
        match self {
            Self::AwaitingSalary => "awaiting_salary",
            Self::AwaitingTarget => "awaiting_target",
            Self::AwaitingAmount => "awaiting_amount",
            Self::AwaitingDuration => "awaiting_duration",
            Self::Complete => "complete",
        }
    }
}

impl fmt::Display for DialogueStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Everything collected so far in one session.
///
/// Fields fill in strictly in order salary, target, amount, years. The
/// setters are crate-private and only the engine calls them, each from the
/// handler of the matching stage, so a set field is never cleared. Starting
/// over means replacing the whole value.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ConversationState {
    salary: Option<f64>,
    currency: Option<String>,
    target: Option<TargetId>,
    amount: Option<f64>,
    years: Option<u32>,
}

impl ConversationState {
    /// Empty state at the start of a session
    pub fn new() -> Self {
        Self::default()
    }

    /// Current stage, derived from which fields are set
    pub fn stage(&self) -> DialogueStage {
        if self.salary.is_none() {
            DialogueStage::AwaitingSalary
        } else if self.target.is_none() {
            DialogueStage::AwaitingTarget
        } else if self.amount.is_none() {
            DialogueStage::AwaitingAmount
        } else if self.years.is_none() {
            DialogueStage::AwaitingDuration
        } else {
            DialogueStage::Complete
        }
    }

    /// Recorded salary
    pub fn salary(&self) -> Option<f64> {
        self.salary
    }

    /// Currency label recorded with the salary
    pub fn currency(&self) -> Option<&str> {
        self.currency.as_deref()
    }

    /// Chosen target
    pub fn target(&self) -> Option<&TargetId> {
        self.target.as_ref()
    }

    /// Amount to invest
    pub fn amount(&self) -> Option<f64> {
        self.amount
    }

    /// Investment duration in years
    pub fn years(&self) -> Option<u32> {
        self.years
    }

    pub(crate) fn record_income(&mut self, income: Income) {
        debug_assert_eq!(self.stage(), DialogueStage::AwaitingSalary);
        self.salary = Some(income.amount);
        self.currency = Some(income.currency);
    }

    pub(crate) fn record_target(&mut self, target: TargetId) {
        debug_assert_eq!(self.stage(), DialogueStage::AwaitingTarget);
        self.target = Some(target);
    }

    pub(crate) fn record_amount(&mut self, amount: f64) {
        debug_assert_eq!(self.stage(), DialogueStage::AwaitingAmount);
        self.amount = Some(amount);
    }

    pub(crate) fn record_years(&mut self, years: u32) {
        debug_assert_eq!(self.stage(), DialogueStage::AwaitingDuration);
        self.years = Some(years);
    }
}
