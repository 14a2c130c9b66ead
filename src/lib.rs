//! # hostnet
//!
//! Host-level network introspection and lookup.
//!
//! `hostnet` resolves host names and reverse DNS pointers with explicit
//! found / not-found / error outcomes, polls sets of sockets for readiness
//! under a bounded wait, lists the machine's active network adapters,
//! decomposes URLs and reports local and public addresses.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use hostnet::{dns::ResolutionOutcome, NetworkContext};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), hostnet::NetError> {
//!     let ctx = NetworkContext::acquire()?;
//!     let resolver = ctx.resolver();
//!
//!     match resolver.reverse("8.8.8.8").await? {
//!         ResolutionOutcome::Found(host) => println!("{host}"),
//!         ResolutionOutcome::NotFound => println!("no PTR record"),
//!         ResolutionOutcome::Error(code) => println!("lookup failed ({code})"),
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Modules
//!
//! - [`base`] - Error codes, error context, address families
//! - [`config`] - Resolver and probe configuration
//! - [`context`] - Shared, reference-counted network context
//! - [`dns`] - Reverse names, forward/reverse resolution, outcome classification
//! - [`socket`] - Socket handles and readiness polling (unix)
//! - [`interface`] - Active adapter enumeration
//! - [`urlparse`] - URL decomposition
//! - [`host`] - Host name, local/public address, connectivity

pub mod base;
pub mod config;
pub mod context;
pub mod dns;
pub mod host;
pub mod interface;
#[cfg(unix)]
pub mod socket;
pub mod urlparse;

pub use base::{family::AddressFamily, neterror::NetError};
pub use config::NetConfig;
pub use context::NetworkContext;
