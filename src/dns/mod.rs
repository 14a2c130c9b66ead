//! DNS Resolution Module
//!
//! Forward (A/AAAA) and reverse (PTR) lookups with explicit outcome
//! classification:
//! - [`reverse_name`]: builds `IN-ADDR.ARPA` / `IP6.ARPA` query names
//! - [`DnsResolver`]: resolve, lookup and reverse, classified into
//!   [`ResolutionOutcome`]
//! - [`HickoryProvider`]: hickory-dns backed provider
//! - [`gai`]: system getaddrinfo lookups for the local host
//!
//! # Architecture
//!
//! The `DnsProvider` trait is the seam between name construction and
//! classification (this crate) and the transport that actually asks a
//! nameserver. A provider returns either the records it got back or a
//! non-zero [`DnsStatus`]; [`classify`] turns that into `Found`,
//! `NotFound` or `Error(code)`.
//!
//! # Example
//!
//! ```rust,ignore
//! use hostnet::dns::{DnsResolver, ResolutionOutcome};
//!
//! let resolver = DnsResolver::system()?;
//! match resolver.reverse("192.0.2.5").await? {
//!     ResolutionOutcome::Found(host) => println!("{host}"),
//!     ResolutionOutcome::NotFound => println!("no PTR record"),
//!     ResolutionOutcome::Error(code) => println!("lookup failed: {code}"),
//! }
//! ```

pub mod gai;
mod hickory;
mod name;
mod outcome;
mod record;
mod resolve;
mod reverse;

pub use hickory::HickoryProvider;
pub use name::{QueryName, MAX_LABEL_LEN, MAX_NAME_LEN};
pub use outcome::{classify, DnsStatus, ResolutionOutcome};
pub use record::{RecordData, RecordList, RecordType};
pub use resolve::{literal, Answering, DnsProvider, DnsResolver, OverrideProvider};
pub use reverse::{parse_reverse_name, reverse_name, reverse_name_for, IPV4_ZONE, IPV6_ZONE};
