//! The fetch call contract and the slot real and mocked implementations are
//! installed into.

use crate::error::FetchError;
use crate::request::{FetchInput, RequestInit};
use crate::response::Response;
use async_trait::async_trait;
use once_cell::sync::Lazy;
use parking_lot::RwLock;
use std::future::Future;
use std::sync::Arc;

/// An asynchronous fetch implementation.
#[async_trait]
pub trait Fetch: Send + Sync {
    async fn fetch(
        &self,
        input: FetchInput,
        init: Option<RequestInit>,
    ) -> Result<Response, FetchError>;
}

/// Read/replace access to a call hook.
pub trait Installer: Send + Sync {
    /// The implementation currently installed.
    fn current(&self) -> Arc<dyn Fetch>;

    /// Replace the installed implementation.
    fn install(&self, hook: Arc<dyn Fetch>);
}

/// A replaceable fetch hook. Code under test calls through the slot.
pub struct FetchSlot {
    current: RwLock<Arc<dyn Fetch>>,
}

impl FetchSlot {
    pub fn new(initial: Arc<dyn Fetch>) -> Self {
        Self {
            current: RwLock::new(initial),
        }
    }

    /// Call whatever is installed.
    pub async fn fetch(
        &self,
        input: impl Into<FetchInput>,
        init: Option<RequestInit>,
    ) -> Result<Response, FetchError> {
        // Clone out of the lock so it is not held across the await.
        let hook = self.current.read().clone();
        hook.fetch(input.into(), init).await
    }
}

impl Default for FetchSlot {
    fn default() -> Self {
        Self::new(Arc::new(Unavailable))
    }
}

impl Installer for FetchSlot {
    fn current(&self) -> Arc<dyn Fetch> {
        self.current.read().clone()
    }

    fn install(&self, hook: Arc<dyn Fetch>) {
        *self.current.write() = hook;
    }
}

static GLOBAL_SLOT: Lazy<Arc<FetchSlot>> = Lazy::new(|| Arc::new(FetchSlot::default()));

/// Process-wide slot. Starts out holding [`Unavailable`].
pub fn global_slot() -> Arc<FetchSlot> {
    GLOBAL_SLOT.clone()
}

/// Fails every call. Stands in for a real implementation where there is none.
#[derive(Debug, Clone, Copy, Default)]
pub struct Unavailable;

#[async_trait]
impl Fetch for Unavailable {
    async fn fetch(
        &self,
        input: FetchInput,
        _init: Option<RequestInit>,
    ) -> Result<Response, FetchError> {
        Err(FetchError::delegation(format!(
            "no fetch implementation available for {input:?}"
        )))
    }
}

/// Adapter turning a closure into a [`Fetch`].
pub struct FnFetch<F>(F);

#[async_trait]
impl<F, Fut> Fetch for FnFetch<F>
where
    F: Fn(FetchInput, Option<RequestInit>) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<Response, FetchError>> + Send + 'static,
{
    async fn fetch(
        &self,
        input: FetchInput,
        init: Option<RequestInit>,
    ) -> Result<Response, FetchError> {
        (self.0)(input, init).await
    }
}

/// Wrap a closure as a shareable [`Fetch`].
pub fn fetch_fn<F, Fut>(f: F) -> Arc<dyn Fetch>
where
    F: Fn(FetchInput, Option<RequestInit>) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<Response, FetchError>> + Send + 'static,
{
    Arc::new(FnFetch(f))
}
