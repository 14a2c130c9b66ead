//! Socket readiness.
//!
//! - [`handle`]: socket handles, readiness flags, caller socket objects
//! - [`select`]: bounded three-way readiness polling over a socket set

pub mod handle;
pub mod select;

pub use handle::{Pollable, Readiness, SocketHandle, TrackedSocket};
pub use select::{poll, poll_sockets, PollResult, ReadinessSet};
