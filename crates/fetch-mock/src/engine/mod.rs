//! The mock-resolution engine.
//!
//! ## Module Structure
//!
//! - `install`: The `Fetch` contract, `Installer` capability and `FetchSlot`
//! - `core`: `FetchMock`, registration methods and per-call resolution

mod core;
mod install;


pub use core::{FetchFuture, FetchMock, MockReply};
pub use install::{fetch_fn, global_slot, Fetch, FetchSlot, FnFetch, Installer, Unavailable};
