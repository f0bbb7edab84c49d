//! Request-side value types: call input, request options and the canonical request.

use super::signal::AbortSignal;
use crate::error::FetchError;
use bytes::Bytes;
use http::header::{HeaderMap, HeaderName, HeaderValue};
use http::Method;
use std::fmt;
use std::sync::Arc;

/// Options passed alongside a call input.
#[derive(Debug, Clone, Default)]
pub struct RequestInit {
    pub method: Option<String>,
    pub headers: Vec<(String, String)>,
    pub body: Option<Bytes>,
    pub signal: Option<AbortSignal>,
}

impl RequestInit {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_method(mut self, method: impl Into<String>) -> Self {
        self.method = Some(method.into());
        self
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn with_body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = Some(body.into());
        self
    }

    pub fn with_signal(mut self, signal: AbortSignal) -> Self {
        self.signal = Some(signal);
        self
    }

    pub(crate) fn is_aborted(&self) -> bool {
        self.signal.as_ref().is_some_and(AbortSignal::is_aborted)
    }
}

#[derive(Debug)]
struct RequestParts {
    method: Method,
    url: String,
    headers: HeaderMap,
    body: Option<Bytes>,
    signal: Option<AbortSignal>,
}

/// Canonical request seen by matchers, providers and the call record.
///
/// Immutable once built. Cloning shares the underlying parts.
#[derive(Debug, Clone)]
pub struct Request {
    inner: Arc<RequestParts>,
}

impl Request {
    /// Build a request for an already-resolved URL.
    ///
    /// Fails when the method, a header, or a body on GET/HEAD is invalid.
    pub fn new(url: impl Into<String>, init: RequestInit) -> Result<Self, FetchError> {
        let method = parse_method(init.method.as_deref())?;

        let mut headers = HeaderMap::new();
        for (name, value) in &init.headers {
            let name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|_| FetchError::Normalization(format!("invalid header name {name:?}")))?;
            let value = HeaderValue::from_str(value).map_err(|_| {
                FetchError::Normalization(format!("invalid value for header {name}"))
            })?;
            headers.append(name, value);
        }

        if init.body.is_some() && (method == Method::GET || method == Method::HEAD) {
            return Err(FetchError::Normalization(format!(
                "request with {method} method cannot have a body"
            )));
        }

        Ok(Self {
            inner: Arc::new(RequestParts {
                method,
                url: url.into(),
                headers,
                body: init.body,
                signal: init.signal,
            }),
        })
    }

    /// GET request with no options.
    pub fn get(url: impl Into<String>) -> Result<Self, FetchError> {
        Self::new(url, RequestInit::default())
    }

    pub fn method(&self) -> &Method {
        &self.inner.method
    }

    pub fn url(&self) -> &str {
        &self.inner.url
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.inner.headers
    }

    /// First value of a header, if present and valid UTF-8.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.inner.headers.get(name).and_then(|v| v.to_str().ok())
    }

    pub fn body(&self) -> Option<&Bytes> {
        self.inner.body.as_ref()
    }

    /// Body decoded as UTF-8 (lossy).
    pub fn text(&self) -> Option<String> {
        self.inner
            .body
            .as_ref()
            .map(|b| String::from_utf8_lossy(b).into_owned())
    }

    pub fn signal(&self) -> Option<&AbortSignal> {
        self.inner.signal.as_ref()
    }

    pub fn is_aborted(&self) -> bool {
        self.inner.signal.as_ref().is_some_and(AbortSignal::is_aborted)
    }
}

/// Requests compare by content. The cancellation token is not part of equality.
impl PartialEq for Request {
    fn eq(&self, other: &Self) -> bool {
        self.inner.method == other.inner.method
            && self.inner.url == other.inner.url
            && self.inner.headers == other.inner.headers
            && self.inner.body == other.inner.body
    }
}

fn parse_method(method: Option<&str>) -> Result<Method, FetchError> {
    let Some(raw) = method else {
        return Ok(Method::GET);
    };

    // Standard methods are matched case-insensitively and upper-cased,
    // everything else is kept byte-for-byte.
    let upper = raw.to_ascii_uppercase();
    let normalized = match upper.as_str() {
        "DELETE" | "GET" | "HEAD" | "OPTIONS" | "POST" | "PUT" => upper.as_str(),
        _ => raw,
    };

    Method::from_bytes(normalized.as_bytes())
        .map_err(|_| FetchError::Normalization(format!("invalid method {raw:?}")))
}

/// Input of a single call.
#[derive(Clone)]
pub enum FetchInput {
    /// Raw URL string, absolute or relative.
    Url(String),
    /// Parsed URL value.
    Parsed(url::Url),
    /// Any value whose string form is the URL.
    Display(Arc<dyn fmt::Display + Send + Sync>),
    /// A request that is already complete. Options passed with it are ignored.
    Request(Request),
}

impl FetchInput {
    pub fn display<T>(value: T) -> Self
    where
        T: fmt::Display + Send + Sync + 'static,
    {
        FetchInput::Display(Arc::new(value))
    }
}

impl fmt::Debug for FetchInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchInput::Url(url) => f.debug_tuple("Url").field(url).finish(),
            FetchInput::Parsed(url) => f.debug_tuple("Parsed").field(&url.as_str()).finish(),
            FetchInput::Display(value) => f.debug_tuple("Display").field(&value.to_string()).finish(),
            FetchInput::Request(req) => f.debug_tuple("Request").field(&req.url()).finish(),
        }
    }
}

impl From<&str> for FetchInput {
    fn from(value: &str) -> Self {
        FetchInput::Url(value.to_string())
    }
}

impl From<String> for FetchInput {
    fn from(value: String) -> Self {
        FetchInput::Url(value)
    }
}

impl From<&String> for FetchInput {
    fn from(value: &String) -> Self {
        FetchInput::Url(value.clone())
    }
}

impl From<url::Url> for FetchInput {
    fn from(value: url::Url) -> Self {
        FetchInput::Parsed(value)
    }
}

impl From<Request> for FetchInput {
    fn from(value: Request) -> Self {
        FetchInput::Request(value)
    }
}

impl From<&Request> for FetchInput {
    fn from(value: &Request) -> Self {
        FetchInput::Request(value.clone())
    }
}
