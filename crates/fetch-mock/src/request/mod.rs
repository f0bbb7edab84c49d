//! Request normalization.
//!
//! Every call input (URL string, parsed URL, stringifiable value or a
//! pre-built request) is turned into one canonical [`Request`] before
//! anything else looks at it.
//!
//! # Module Structure
//!
//! - `signal` - Cancellation tokens (`AbortController`, `AbortSignal`)
//! - `types` - Call input, request options and the canonical request
//! - `normalize` - Execution context and the normalizer itself

mod normalize;
mod signal;
mod types;

pub use normalize::{normalize_request, ExecutionContext};
pub(crate) use normalize::build_request;
pub use signal::{AbortController, AbortSignal};
pub use types::{FetchInput, Request, RequestInit};
