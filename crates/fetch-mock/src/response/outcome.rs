//! Declared outcomes of mocked calls.

use super::types::{Response, ResponseDescriptor};
use crate::error::RejectValue;
use crate::request::Request;
use futures::future::BoxFuture;
use futures::FutureExt;
use std::fmt;
use std::future::Future;
use std::sync::Arc;

/// Deferred result of a provider or a dynamic rejection.
pub type ProviderFuture = BoxFuture<'static, Result<ProvidedOutcome, RejectValue>>;

/// What a provider may produce. There is no provider variant here, so a
/// provider can never hand back another provider.
#[derive(Debug, Clone, PartialEq)]
pub enum ProvidedOutcome {
    Literal(Option<String>),
    Descriptor(ResponseDescriptor),
    Prebuilt(Response),
}

impl From<&str> for ProvidedOutcome {
    fn from(value: &str) -> Self {
        ProvidedOutcome::Literal(Some(value.to_string()))
    }
}

impl From<String> for ProvidedOutcome {
    fn from(value: String) -> Self {
        ProvidedOutcome::Literal(Some(value))
    }
}

impl From<Option<String>> for ProvidedOutcome {
    fn from(value: Option<String>) -> Self {
        ProvidedOutcome::Literal(value)
    }
}

impl From<ResponseDescriptor> for ProvidedOutcome {
    fn from(value: ResponseDescriptor) -> Self {
        ProvidedOutcome::Descriptor(value)
    }
}

impl From<Response> for ProvidedOutcome {
    fn from(value: Response) -> Self {
        ProvidedOutcome::Prebuilt(value)
    }
}

/// Function computing an outcome from the call's request.
#[derive(Clone)]
pub struct ResponseProvider(Arc<dyn Fn(Request) -> ProviderFuture + Send + Sync>);

impl ResponseProvider {
    pub fn call(&self, request: Request) -> ProviderFuture {
        (self.0)(request)
    }
}

impl fmt::Debug for ResponseProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ResponseProvider(..)")
    }
}

/// Declared result of a mocked call.
#[derive(Debug, Clone)]
pub enum MockOutcome {
    /// Body text; `None` is a response without a body.
    Literal(Option<String>),
    Descriptor(ResponseDescriptor),
    /// Returned as-is. Overrides are not applied.
    Prebuilt(Response),
    Provider(ResponseProvider),
}

impl MockOutcome {
    /// Empty-string body, the initial default of every engine.
    pub fn empty() -> Self {
        MockOutcome::Literal(Some(String::new()))
    }

    /// Synchronous provider.
    pub fn provider<F, O>(f: F) -> Self
    where
        F: Fn(&Request) -> O + Send + Sync + 'static,
        O: Into<ProvidedOutcome>,
    {
        MockOutcome::Provider(ResponseProvider(Arc::new(
            move |req: Request| -> ProviderFuture {
                let outcome: ProvidedOutcome = f(&req).into();
                futures::future::ready(Ok(outcome)).boxed()
            },
        )))
    }

    /// Asynchronous provider. An `Err` fails the call with that rejection value.
    pub fn async_provider<F, Fut, O>(f: F) -> Self
    where
        F: Fn(Request) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<O, RejectValue>> + Send + 'static,
        O: Into<ProvidedOutcome>,
    {
        MockOutcome::Provider(ResponseProvider(Arc::new(
            move |req: Request| -> ProviderFuture {
                f(req).map(|settled| settled.map(Into::into)).boxed()
            },
        )))
    }

    pub fn kind(&self) -> &'static str {
        match self {
            MockOutcome::Literal(_) => "literal",
            MockOutcome::Descriptor(_) => "descriptor",
            MockOutcome::Prebuilt(_) => "prebuilt",
            MockOutcome::Provider(_) => "provider",
        }
    }
}

impl Default for MockOutcome {
    fn default() -> Self {
        Self::empty()
    }
}

impl From<&str> for MockOutcome {
    fn from(value: &str) -> Self {
        MockOutcome::Literal(Some(value.to_string()))
    }
}

impl From<String> for MockOutcome {
    fn from(value: String) -> Self {
        MockOutcome::Literal(Some(value))
    }
}

impl From<Option<String>> for MockOutcome {
    fn from(value: Option<String>) -> Self {
        MockOutcome::Literal(value)
    }
}

impl From<ResponseDescriptor> for MockOutcome {
    fn from(value: ResponseDescriptor) -> Self {
        MockOutcome::Descriptor(value)
    }
}

impl From<Response> for MockOutcome {
    fn from(value: Response) -> Self {
        MockOutcome::Prebuilt(value)
    }
}

impl From<ResponseProvider> for MockOutcome {
    fn from(value: ResponseProvider) -> Self {
        MockOutcome::Provider(value)
    }
}

impl From<ProvidedOutcome> for MockOutcome {
    fn from(value: ProvidedOutcome) -> Self {
        match value {
            ProvidedOutcome::Literal(body) => MockOutcome::Literal(body),
            ProvidedOutcome::Descriptor(d) => MockOutcome::Descriptor(d),
            ProvidedOutcome::Prebuilt(r) => MockOutcome::Prebuilt(r),
        }
    }
}

/// Declared failure of a mocked call.
#[derive(Clone)]
pub enum Rejection {
    /// Fail with this value.
    Value(RejectValue),
    /// Call the function; its result is synthesized like a provider's.
    Dynamic(Arc<dyn Fn() -> ProviderFuture + Send + Sync>),
}

impl Rejection {
    /// Rejection carrying no value (`null`).
    pub fn none() -> Self {
        Rejection::Value(RejectValue::Raw(serde_json::Value::Null))
    }

    pub fn error<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Rejection::Value(RejectValue::error(err))
    }

    pub fn dynamic<F, Fut, O>(f: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<O, RejectValue>> + Send + 'static,
        O: Into<ProvidedOutcome>,
    {
        Rejection::Dynamic(Arc::new(move || -> ProviderFuture {
            f().map(|settled| settled.map(Into::into)).boxed()
        }))
    }
}

impl fmt::Debug for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rejection::Value(value) => f.debug_tuple("Value").field(value).finish(),
            Rejection::Dynamic(_) => f.write_str("Dynamic(..)"),
        }
    }
}

impl From<RejectValue> for Rejection {
    fn from(value: RejectValue) -> Self {
        Rejection::Value(value)
    }
}

impl From<&str> for Rejection {
    fn from(value: &str) -> Self {
        Rejection::Value(value.into())
    }
}

impl From<String> for Rejection {
    fn from(value: String) -> Self {
        Rejection::Value(value.into())
    }
}

impl From<serde_json::Value> for Rejection {
    fn from(value: serde_json::Value) -> Self {
        Rejection::Value(value.into())
    }
}
