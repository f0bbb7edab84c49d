//! Declarative registrations loaded from config files.

use crate::engine::FetchMock;
use crate::error::RejectValue;
use crate::predicate::MatchRule;
use crate::response::{MockOutcome, Rejection, ResponseDescriptor};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Request matcher of a fixture: exactly one of `url` or `pattern`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct FixtureMatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
}

impl FixtureMatch {
    pub fn to_rule(&self) -> Result<MatchRule, anyhow::Error> {
        match (&self.url, &self.pattern) {
            (Some(url), None) => Ok(MatchRule::url(url.clone())),
            (None, Some(pattern)) => MatchRule::pattern(pattern)
                .map_err(|e| anyhow::anyhow!("Invalid match.pattern '{}': {}", pattern, e)),
            (Some(_), Some(_)) => anyhow::bail!("match must set only one of 'url' or 'pattern'"),
            (None, None) => anyhow::bail!("match must set 'url' or 'pattern'"),
        }
    }
}

/// One registration. Exactly one of `respond`, `reject`, `abort` or
/// `passthrough` must be set.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Fixture {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Without a matcher the fixture applies to every call.
    #[serde(default, rename = "match", skip_serializing_if = "Option::is_none")]
    pub matcher: Option<FixtureMatch>,
    /// One-shot instead of persistent.
    #[serde(default)]
    pub once: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub respond: Option<ResponseDescriptor>,
    /// Raw rejection value. `reject: null` counts as unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reject: Option<serde_json::Value>,
    #[serde(default)]
    pub abort: bool,
    #[serde(default)]
    pub passthrough: bool,
}

/// The single action a fixture performs.
#[derive(Debug, Clone, PartialEq)]
pub enum FixtureAction<'a> {
    Respond(&'a ResponseDescriptor),
    Reject(&'a serde_json::Value),
    Abort,
    Passthrough,
}

impl Fixture {
    /// Name for log and error messages.
    pub fn label(&self, index: usize) -> String {
        match &self.name {
            Some(name) => format!("fixture '{name}'"),
            None => format!("fixture #{index}"),
        }
    }

    pub fn action(&self) -> Result<FixtureAction<'_>, anyhow::Error> {
        let mut actions = Vec::new();
        if let Some(descriptor) = &self.respond {
            actions.push(FixtureAction::Respond(descriptor));
        }
        if let Some(value) = &self.reject {
            actions.push(FixtureAction::Reject(value));
        }
        if self.abort {
            actions.push(FixtureAction::Abort);
        }
        if self.passthrough {
            actions.push(FixtureAction::Passthrough);
        }

        match actions.len() {
            0 => anyhow::bail!("no action: set one of respond, reject, abort or passthrough"),
            1 => Ok(actions.remove(0)),
            n => anyhow::bail!("{n} actions set; respond, reject, abort and passthrough are exclusive"),
        }
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        self.action()?;
        if let Some(matcher) = &self.matcher {
            matcher.to_rule()?;
        }
        Ok(())
    }

    /// Apply this fixture to `mock`.
    pub fn register(&self, mock: &FetchMock, index: usize) -> Result<(), anyhow::Error> {
        let rule = self.matcher.as_ref().map(FixtureMatch::to_rule).transpose()?;
        let action = self.action()?;
        debug!("Registering {} ({:?}, once={})", self.label(index), action, self.once);

        match action {
            FixtureAction::Respond(descriptor) => {
                let outcome = MockOutcome::Descriptor(descriptor.clone());
                match (rule, self.once) {
                    (Some(rule), true) => mock.mock_response_once_if(rule, outcome, None),
                    (Some(rule), false) => mock.mock_response_if(rule, outcome, None),
                    (None, true) => mock.mock_response_once(outcome, None),
                    (None, false) => mock.mock_response(outcome, None),
                };
            }
            FixtureAction::Reject(value) => {
                self.warn_unused_match(index);
                let rejection = Rejection::Value(RejectValue::Raw(value.clone()));
                if self.once {
                    mock.mock_reject_once(rejection);
                } else {
                    mock.mock_reject(rejection);
                }
            }
            FixtureAction::Abort => {
                self.warn_unused_match(index);
                if self.once {
                    mock.mock_abort_once();
                } else {
                    mock.mock_abort();
                }
            }
            FixtureAction::Passthrough => match (rule, self.once) {
                (Some(rule), true) => {
                    mock.dont_mock_once_if(rule);
                }
                (Some(rule), false) => {
                    mock.dont_mock_if(rule);
                }
                (None, true) => {
                    mock.dont_mock_once();
                }
                (None, false) => {
                    mock.dont_mock();
                }
            },
        }
        Ok(())
    }

    fn warn_unused_match(&self, index: usize) {
        if self.matcher.is_some() {
            warn!(
                "{} has a match but rejects/aborts unconditionally; match is ignored",
                self.label(index)
            );
        }
    }
}
