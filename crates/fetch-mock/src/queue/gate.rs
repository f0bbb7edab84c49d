//! Entries of the decision queue.

use super::behavior::Behavior;
use crate::predicate::Decision;

/// A decision, optionally paired with the behavior registered alongside it.
///
/// A paired behavior is used only if its decision mocks the call; otherwise it
/// is dropped together with the decision. It never reaches the behavior queue.
#[derive(Debug, Clone, Default)]
pub struct Gate {
    pub decision: Decision,
    pub paired: Option<Behavior>,
}

impl Gate {
    pub fn paired(decision: Decision, behavior: Behavior) -> Self {
        Self {
            decision,
            paired: Some(behavior),
        }
    }
}

impl From<Decision> for Gate {
    fn from(decision: Decision) -> Self {
        Self {
            decision,
            paired: None,
        }
    }
}
