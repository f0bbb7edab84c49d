//! Response synthesis.
//!
//! # Module Structure
//!
//! - `types` - `Response`, `ResponseInit` overrides and `ResponseDescriptor`
//! - `outcome` - Declared outcomes, providers and rejections
//! - `synthesize` - Provider resolution, late cancellation and rendering

mod outcome;
mod synthesize;
mod types;

pub use outcome::{MockOutcome, ProvidedOutcome, ProviderFuture, Rejection, ResponseProvider};
pub use synthesize::{reject, render, synthesize};
pub use types::{Response, ResponseDescriptor, ResponseInit};
