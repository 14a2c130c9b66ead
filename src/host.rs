//! Local host status: host name, local and public addresses, connectivity.

use crate::{
    base::{context::IoResultExt, family::AddressFamily, neterror::NetError},
    config::NetConfig,
    dns::{gai, DnsResolver, HickoryProvider, QueryName, RecordType, ResolutionOutcome},
    interface::adapters,
};
use std::{ffi::OsString, io, net::IpAddr};

/// The local host name.
///
/// A name that is not valid UTF-8 is an error, not a lossy conversion.
pub fn hostname() -> Result<String, NetError> {
    utf8_host_name(::hostname::get().os_context("gethostname")?)
}

fn utf8_host_name(raw: OsString) -> Result<String, NetError> {
    raw.into_string().map_err(|raw| {
        NetError::os_failed(
            "gethostname",
            io::Error::new(
                io::ErrorKind::InvalidData,
                format!("host name {raw:?} is not valid UTF-8"),
            ),
        )
    })
}

/// First IPv4 address the host name resolves to through the system resolver.
pub async fn local_ip() -> Result<IpAddr, NetError> {
    let name = hostname()?;
    gai::first_address(&name, AddressFamily::Ipv4).await
}

/// First IPv6 address `localhost` resolves to through the system resolver.
pub async fn local_ipv6() -> Result<IpAddr, NetError> {
    gai::first_address("localhost", AddressFamily::Ipv6).await
}

/// Public IPv4 address of this host as seen by an echo nameserver.
///
/// Resolves `config.public_ip_resolver` with the system resolver, then asks
/// that server directly, uncached, for the A record of
/// `config.public_ip_probe`. A resolver that cannot be reached shows up as
/// `Error(code)`.
pub async fn public_ip(config: &NetConfig) -> Result<ResolutionOutcome, NetError> {
    let probe = QueryName::new(config.public_ip_probe.as_str())?;
    let echo = gai::first_address(&config.public_ip_resolver, AddressFamily::Ipv4).await?;
    tracing::debug!(resolver = %echo, probe = %probe, "querying public address");

    let resolver = DnsResolver::new(HickoryProvider::with_nameservers(&[echo], 53, config));
    Ok(resolver.resolve(&probe, RecordType::A).await)
}

/// True when any up, non-loopback adapter carries an address.
pub fn is_network_alive() -> bool {
    let alive = adapters(AddressFamily::Ipv4).next().is_some()
        || adapters(AddressFamily::Ipv6).next().is_some();
    tracing::trace!(alive, "network liveness check");
    alive
}
