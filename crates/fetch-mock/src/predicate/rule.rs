//! Match rules over canonical requests.

use crate::error::{BoxError, FetchError};
use crate::request::Request;
use regex::Regex;
use std::fmt;
use std::sync::Arc;

/// User predicate over a request. Failures are propagated to the call.
pub type PredicateFn = Arc<dyn Fn(&Request) -> Result<bool, BoxError> + Send + Sync>;

/// Rule deciding whether a request matches.
///
/// URL rules compare against the request's resolved URL. There is no prefix
/// or substring matching; use a pattern for that.
#[derive(Clone)]
pub enum MatchRule {
    /// Constant result.
    Always(bool),
    /// Exact string equality with the request URL.
    Url(String),
    /// Regex test against the request URL.
    Pattern(Regex),
    /// Arbitrary predicate.
    Predicate(PredicateFn),
}

impl MatchRule {
    pub fn url(url: impl Into<String>) -> Self {
        MatchRule::Url(url.into())
    }

    /// Compile a pattern rule.
    pub fn pattern(pattern: &str) -> Result<Self, regex::Error> {
        Ok(MatchRule::Pattern(Regex::new(pattern)?))
    }

    /// Infallible predicate.
    pub fn predicate<F>(f: F) -> Self
    where
        F: Fn(&Request) -> bool + Send + Sync + 'static,
    {
        MatchRule::Predicate(Arc::new(move |req: &Request| Ok(f(req))))
    }

    /// Predicate that may fail.
    pub fn try_predicate<F>(f: F) -> Self
    where
        F: Fn(&Request) -> Result<bool, BoxError> + Send + Sync + 'static,
    {
        MatchRule::Predicate(Arc::new(f))
    }

    pub fn matches(&self, request: &Request) -> Result<bool, FetchError> {
        match self {
            MatchRule::Always(value) => Ok(*value),
            MatchRule::Url(url) => Ok(request.url() == url),
            MatchRule::Pattern(regex) => Ok(regex.is_match(request.url())),
            MatchRule::Predicate(f) => f(request).map_err(FetchError::Predicate),
        }
    }
}

impl fmt::Debug for MatchRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchRule::Always(value) => write!(f, "Always({value})"),
            MatchRule::Url(url) => write!(f, "Url({url:?})"),
            MatchRule::Pattern(regex) => write!(f, "Pattern({:?})", regex.as_str()),
            MatchRule::Predicate(_) => f.write_str("Predicate(..)"),
        }
    }
}

impl From<&str> for MatchRule {
    fn from(value: &str) -> Self {
        MatchRule::Url(value.to_string())
    }
}

impl From<String> for MatchRule {
    fn from(value: String) -> Self {
        MatchRule::Url(value)
    }
}

impl From<Regex> for MatchRule {
    fn from(value: Regex) -> Self {
        MatchRule::Pattern(value)
    }
}
