//! Request matching.
//!
//! - `rule` - `MatchRule`: constant, exact URL, regex pattern or predicate
//! - `decision` - `Decision`: a rule plus negation, used by the decision queue

mod decision;
mod rule;

pub use decision::Decision;
pub use rule::{MatchRule, PredicateFn};
