//! Turning call inputs into canonical requests.

use super::types::{FetchInput, Request, RequestInit};
use crate::error::FetchError;
use url::Url;

/// Ambient context used to resolve relative URLs.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum ExecutionContext {
    /// Document with a base URL.
    Document { base_url: Url },
    /// Worker resolving against its origin.
    Worker { origin: Url },
    /// No ambient base: relative URLs stay unresolved.
    #[default]
    Detached,
}

impl ExecutionContext {
    pub fn base(&self) -> Option<&Url> {
        match self {
            ExecutionContext::Document { base_url } => Some(base_url),
            ExecutionContext::Worker { origin } => Some(origin),
            ExecutionContext::Detached => None,
        }
    }

    /// Resolve a raw URL string against this context.
    ///
    /// Absolute URLs are returned in serialized form. Relative URLs are joined
    /// onto the context base, or returned unchanged when there is none.
    pub fn resolve(&self, raw: &str) -> Result<String, FetchError> {
        match Url::parse(raw) {
            Ok(url) => Ok(url.into()),
            Err(url::ParseError::RelativeUrlWithoutBase) => match self.base() {
                Some(base) => base
                    .join(raw)
                    .map(String::from)
                    .map_err(|e| FetchError::Normalization(format!("{raw:?}: {e}"))),
                None => Ok(raw.to_string()),
            },
            Err(e) => Err(FetchError::Normalization(format!("{raw:?}: {e}"))),
        }
    }
}

/// Build the canonical request for a call, including the cancellation check.
///
/// A pre-built request is returned as-is (its options are ignored) unless its
/// own signal already fired. For every other input an already-fired signal in
/// `init` fails the call before the URL is even looked at.
pub fn normalize_request(
    input: &FetchInput,
    init: Option<&RequestInit>,
    context: &ExecutionContext,
) -> Result<Request, FetchError> {
    match input {
        FetchInput::Request(request) if request.is_aborted() => Err(FetchError::Aborted),
        FetchInput::Request(_) => build_request(input, init, context),
        _ if init.is_some_and(RequestInit::is_aborted) => Err(FetchError::Aborted),
        _ => build_request(input, init, context),
    }
}

/// Build the canonical request without looking at cancellation.
pub(crate) fn build_request(
    input: &FetchInput,
    init: Option<&RequestInit>,
    context: &ExecutionContext,
) -> Result<Request, FetchError> {
    let raw = match input {
        FetchInput::Request(request) => return Ok(request.clone()),
        FetchInput::Url(url) => context.resolve(url)?,
        FetchInput::Parsed(url) => url.to_string(),
        FetchInput::Display(value) => context.resolve(&value.to_string())?,
    };

    Request::new(raw, init.cloned().unwrap_or_default())
}
