//! System host lookup using getaddrinfo.
//!
//! Used for questions about the local host, where the answer should come
//! from the same place every other program on the machine gets it (hosts
//! file, NSS, mDNS, ...) rather than from a nameserver.
//!
//! # When to Use
//!
//! - Resolving the machine's own host name
//! - Names only the local system configuration knows (`localhost`)

use super::resolve::literal;
use crate::base::{context::IoResultExt, family::AddressFamily, neterror::NetError};
use std::{
    io,
    net::{IpAddr, ToSocketAddrs},
};

/// Resolves `host` with the system resolver in a blocking task.
///
/// Returns every address in resolver order, both families, duplicates
/// removed. Address literals are returned without calling getaddrinfo.
pub async fn lookup_host(host: &str) -> Result<Vec<IpAddr>, NetError> {
    if let Some(addr) =
        literal(host, AddressFamily::Ipv4).or_else(|| literal(host, AddressFamily::Ipv6))
    {
        return Ok(vec![addr]);
    }

    let owned = host.to_string();
    let result = tokio::task::spawn_blocking(move || {
        tracing::debug!(host = %owned, "resolving via getaddrinfo");
        (owned.as_str(), 0u16)
            .to_socket_addrs()
            .map(|iter| iter.map(|addr| addr.ip()).collect::<Vec<_>>())
    })
    .await;

    // Handle task join error (cancellation, panic)
    let addrs = result
        .map_err(|e| {
            tracing::error!(error = %e, "DNS resolution task failed");
            NetError::NameNotResolved
        })?
        .dns_context(host)?;

    let mut unique: Vec<IpAddr> = Vec::with_capacity(addrs.len());
    for addr in addrs {
        if !unique.contains(&addr) {
            unique.push(addr);
        }
    }

    if unique.is_empty() {
        return Err(io::Error::new(
            io::ErrorKind::NotFound,
            "No addresses returned by getaddrinfo",
        ))
        .dns_context(host);
    }

    tracing::debug!(host = %host, count = unique.len(), "getaddrinfo resolution complete");
    Ok(unique)
}

/// First address of `family` that `host` resolves to through the system resolver.
pub async fn first_address(host: &str, family: AddressFamily) -> Result<IpAddr, NetError> {
    lookup_host(host)
        .await?
        .into_iter()
        .find(|addr| family.matches(addr))
        .ok_or_else(|| {
            NetError::dns_failed(
                host,
                io::Error::new(io::ErrorKind::NotFound, format!("no {family} address")),
            )
        })
}
