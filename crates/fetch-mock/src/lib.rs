//! Controllable stand-in for an asynchronous HTTP fetch call.
//!
//! A [`FetchMock`] intercepts calls, decides per call whether to mock it, and
//! either synthesizes a declared outcome or hands the call to the original
//! implementation. Registrations come in two layers: one-shot entries,
//! consumed in registration order, over a persistent default.
//!
//! ```no_run
//! use fetch_mock::{global_slot, FetchMock, ResponseInit};
//!
//! # async fn demo() -> Result<(), fetch_mock::FetchError> {
//! let mock = FetchMock::new(global_slot());
//! mock.enable_mocks()
//!     .mock_response("default", None)
//!     .once("first", Some(ResponseInit::new().with_status(201)))
//!     .dont_mock_if("https://api.test/health");
//!
//! let resp = global_slot().fetch("https://api.test/users", None).await?;
//! assert_eq!(resp.text(), "first");
//! assert_eq!(mock.requests().len(), 1);
//! # Ok(())
//! # }
//! ```

// ===== Call inputs and matching =====
pub mod predicate;
pub mod request;

// ===== Outcomes and queues =====
pub mod queue;
pub mod recording;
pub mod response;

// ===== Engine =====
pub mod config;
pub mod engine;
pub mod error;
pub mod logging;

pub use config::MockConfig;
pub use engine::{fetch_fn, global_slot, Fetch, FetchMock, FetchSlot, Installer, MockReply, Unavailable};
pub use error::{BoxError, FetchError, RejectValue};
pub use predicate::{Decision, MatchRule};
pub use request::{AbortController, AbortSignal, ExecutionContext, FetchInput, Request, RequestInit};
pub use response::{
    MockOutcome, ProvidedOutcome, Rejection, Response, ResponseDescriptor, ResponseInit,
};
