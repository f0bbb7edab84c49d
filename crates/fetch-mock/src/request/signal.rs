//! Cancellation tokens attached to requests.

use tokio_util::sync::CancellationToken;

/// Owner side of a cancellation token.
#[derive(Debug, Clone, Default)]
pub struct AbortController {
    token: CancellationToken,
}

impl AbortController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Signal handed to requests.
    pub fn signal(&self) -> AbortSignal {
        AbortSignal {
            token: self.token.clone(),
        }
    }

    /// Signal cancellation. Calling this more than once is a no-op.
    pub fn abort(&self) {
        self.token.cancel();
    }
}

/// Observer side of a cancellation token.
#[derive(Debug, Clone)]
pub struct AbortSignal {
    token: CancellationToken,
}

impl AbortSignal {
    /// A signal that is already aborted.
    pub fn aborted_signal() -> Self {
        let controller = AbortController::new();
        controller.abort();
        controller.signal()
    }

    pub fn is_aborted(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Resolves once the signal fires.
    pub async fn aborted(&self) {
        self.token.cancelled().await
    }
}
