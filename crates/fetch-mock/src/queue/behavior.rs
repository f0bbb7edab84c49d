//! What a mocked call does.

use crate::predicate::MatchRule;
use crate::response::{MockOutcome, Rejection, ResponseInit};

/// Behavior selected for a mocked call.
#[derive(Debug, Clone)]
pub enum Behavior {
    /// Synthesize `outcome` with `init` overrides.
    Respond {
        outcome: MockOutcome,
        init: ResponseInit,
    },
    /// Like `Respond` for requests matching `rule`; other requests go to the
    /// real call.
    RespondIf {
        rule: MatchRule,
        outcome: MockOutcome,
        init: ResponseInit,
    },
    /// Fail the call.
    Reject(Rejection),
    /// Fail the call as cancelled, whatever the request's own signal says.
    Abort,
}

impl Behavior {
    pub fn respond(outcome: impl Into<MockOutcome>, init: Option<ResponseInit>) -> Self {
        Behavior::Respond {
            outcome: outcome.into(),
            init: init.unwrap_or_default(),
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Behavior::Respond { .. } => "respond",
            Behavior::RespondIf { .. } => "respond-if",
            Behavior::Reject(_) => "reject",
            Behavior::Abort => "abort",
        }
    }
}

/// Empty-body response.
impl Default for Behavior {
    fn default() -> Self {
        Behavior::Respond {
            outcome: MockOutcome::empty(),
            init: ResponseInit::default(),
        }
    }
}
