//! Call recording.

use crate::request::Request;
use parking_lot::RwLock;

/// Append-only log of the requests that reached an engine.
#[derive(Debug, Default)]
pub struct CallRecorder {
    calls: RwLock<Vec<Request>>,
}

impl CallRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a request
    pub fn record(&self, request: &Request) {
        self.calls.write().push(request.clone());
    }

    /// Recorded requests, in call order
    pub fn snapshot(&self) -> Vec<Request> {
        self.calls.read().clone()
    }

    pub fn last(&self) -> Option<Request> {
        self.calls.read().last().cloned()
    }

    pub fn len(&self) -> usize {
        self.calls.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.calls.read().is_empty()
    }

    /// Clear recorded requests
    pub fn clear(&self) {
        self.calls.write().clear();
    }
}
