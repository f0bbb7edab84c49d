//! "Should this call be mocked" decisions.

use super::rule::MatchRule;
use crate::error::FetchError;
use crate::request::Request;

/// A match rule, optionally negated.
///
/// `doMock*` registrations produce plain decisions, `dontMock*` ones produce
/// negated decisions over the same rule shapes.
#[derive(Debug, Clone)]
pub struct Decision {
    rule: MatchRule,
    negated: bool,
}

impl Decision {
    /// Mock every call.
    pub fn always() -> Self {
        Self::mock_if(MatchRule::Always(true))
    }

    /// Mock no call.
    pub fn never() -> Self {
        Self::mock_if(MatchRule::Always(false))
    }

    /// Mock calls matching `rule`.
    pub fn mock_if(rule: impl Into<MatchRule>) -> Self {
        Self {
            rule: rule.into(),
            negated: false,
        }
    }

    /// Mock calls not matching `rule`.
    pub fn skip_if(rule: impl Into<MatchRule>) -> Self {
        Self {
            rule: rule.into(),
            negated: true,
        }
    }

    pub fn rule(&self) -> &MatchRule {
        &self.rule
    }

    pub fn is_negated(&self) -> bool {
        self.negated
    }

    pub fn evaluate(&self, request: &Request) -> Result<bool, FetchError> {
        Ok(self.rule.matches(request)? != self.negated)
    }
}

impl Default for Decision {
    fn default() -> Self {
        Self::always()
    }
}
