//! Base types and error handling.
//!
//! Provides foundational types:
//! - [`NetError`](neterror::NetError): Network error codes matching `net_error_list.h`
//! - [`IoResultExt`](context::IoResultExt): context helpers for `io::Result`
//! - [`AddressFamily`](family::AddressFamily): IPv4/IPv6 selector

pub mod context;
pub mod family;
pub mod neterror;
