//! DNS provider backed by hickory-dns.
//!
//! Issues one typed query per call (A, AAAA or PTR) through a hickory
//! `TokioResolver` and maps hickory's errors onto [`DnsStatus`] so the
//! resolver can tell "does not exist" apart from "lookup failed".
//!
//! The resolver is built with its answer cache disabled; every call goes
//! to a nameserver.

use super::{
    name::QueryName,
    outcome::DnsStatus,
    record::{RecordData, RecordType},
    resolve::{Answering, DnsProvider},
};
use crate::{base::neterror::NetError, config::NetConfig};
use hickory_resolver::{
    config::{NameServerConfigGroup, ResolverConfig, ResolverOpts},
    name_server::TokioConnectionProvider,
    proto::{
        rr::{RData, RecordType as WireType},
        ProtoErrorKind,
    },
    ResolveError, ResolveErrorKind, TokioResolver,
};
use std::{io, net::IpAddr, sync::Arc};

/// DNS provider backed by a hickory `TokioResolver`.
///
/// Cloning is cheap; clones share the underlying resolver and its
/// nameserver connections.
///
/// # Example
///
/// ```rust,ignore
/// use hostnet::dns::{DnsResolver, HickoryProvider};
/// use hostnet::NetConfig;
///
/// let resolver = DnsResolver::new(HickoryProvider::system(&NetConfig::default()));
/// let outcome = resolver.reverse("192.0.2.5").await?;
/// ```
#[derive(Debug, Clone)]
pub struct HickoryProvider {
    resolver: Arc<TokioResolver>,
}

impl HickoryProvider {
    /// Builds a provider from `config`.
    ///
    /// With no explicit nameservers the system configuration is read; if that
    /// fails, hickory's default upstreams are used instead. Explicit
    /// nameservers must have a concrete address and a non-zero port, and at
    /// least one attempt must be allowed.
    pub fn from_config(config: &NetConfig) -> Result<Self, NetError> {
        if config.attempts == 0 {
            return Err(NetError::ResolverConfig(
                "at least one query attempt is required".to_string(),
            ));
        }
        if config.uses_system_nameservers() {
            return Ok(Self::system(config));
        }

        let mut group = NameServerConfigGroup::new();
        for server in &config.nameservers {
            if server.ip().is_unspecified() || server.port() == 0 {
                return Err(NetError::ResolverConfig(format!(
                    "unusable nameserver {server}"
                )));
            }
            group.merge(NameServerConfigGroup::from_ips_clear(
                &[server.ip()],
                server.port(),
                true,
            ));
        }
        tracing::debug!(nameservers = ?config.nameservers, "Using explicit DNS nameservers");
        Ok(Self::from_group(group, config))
    }

    /// Provider using the system resolver configuration.
    pub fn system(config: &NetConfig) -> Self {
        let mut builder = match TokioResolver::builder_tokio() {
            Ok(builder) => {
                tracing::debug!("Using system DNS configuration");
                builder
            }
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    "Failed to read system DNS config, using defaults"
                );
                TokioResolver::builder_with_config(
                    ResolverConfig::default(),
                    TokioConnectionProvider::default(),
                )
            }
        };
        apply_options(builder.options_mut(), config);

        Self {
            resolver: Arc::new(builder.build()),
        }
    }

    /// Provider that asks only the given nameservers, all on `port`.
    pub fn with_nameservers(ips: &[IpAddr], port: u16, config: &NetConfig) -> Self {
        tracing::debug!(nameservers = ?ips, port, "Using explicit DNS nameservers");
        Self::from_group(NameServerConfigGroup::from_ips_clear(ips, port, true), config)
    }

    fn from_group(group: NameServerConfigGroup, config: &NetConfig) -> Self {
        let resolver_config = ResolverConfig::from_parts(None, vec![], group);
        let mut builder = TokioResolver::builder_with_config(
            resolver_config,
            TokioConnectionProvider::default(),
        );
        apply_options(builder.options_mut(), config);

        Self {
            resolver: Arc::new(builder.build()),
        }
    }
}

fn apply_options(opts: &mut ResolverOpts, config: &NetConfig) {
    opts.timeout = config.query_timeout;
    opts.attempts = config.attempts;
    opts.cache_size = 0;
}

impl DnsProvider for HickoryProvider {
    fn query(&self, name: QueryName, record_type: RecordType) -> Answering {
        let resolver = self.resolver.clone();
        Box::pin(async move {
            // Reverse names are absolute; keep search domains off them
            let target = if record_type == RecordType::Ptr && !name.is_fqdn() {
                format!("{name}.")
            } else {
                name.to_string()
            };
            tracing::trace!(name = %target, %record_type, "hickory-dns query");

            match resolver.lookup(target.as_str(), wire_type(record_type)).await {
                Ok(lookup) => {
                    let records: Vec<RecordData> = lookup.iter().filter_map(decode).collect();
                    tracing::trace!(name = %target, count = records.len(), "hickory-dns answer");
                    Ok(records)
                }
                Err(e) => {
                    let status = status_of(&e);
                    tracing::debug!(name = %target, error = %e, %status, "hickory-dns lookup failed");
                    Err(status)
                }
            }
        })
    }
}

fn wire_type(record_type: RecordType) -> WireType {
    match record_type {
        RecordType::A => WireType::A,
        RecordType::Aaaa => WireType::AAAA,
        RecordType::Ptr => WireType::PTR,
    }
}

fn decode(rdata: &RData) -> Option<RecordData> {
    match rdata {
        RData::A(a) => Some(RecordData::A(a.0)),
        RData::AAAA(aaaa) => Some(RecordData::Aaaa(aaaa.0)),
        RData::PTR(ptr) => {
            let host = ptr.0.to_utf8();
            Some(RecordData::Ptr(host.trim_end_matches('.').to_string()))
        }
        _ => None,
    }
}

/// Maps a hickory error onto a provider status.
///
/// Server answers keep their RCODE, socket failures keep their OS error
/// code, and failures inside the resolver itself get
/// [`DnsStatus::LOCAL_FAILURE`]. Only undecodable replies are `BAD_PACKET`.
fn status_of(error: &ResolveError) -> DnsStatus {
    let proto = match error.kind() {
        ResolveErrorKind::Proto(proto) => proto,
        _ => return DnsStatus::LOCAL_FAILURE,
    };
    match proto.kind() {
        ProtoErrorKind::NoRecordsFound { response_code, .. } => {
            DnsStatus::from_rcode(u16::from(*response_code))
        }
        ProtoErrorKind::RequestRefused => DnsStatus::REFUSED,
        ProtoErrorKind::Timeout => DnsStatus::TIMEOUT,
        ProtoErrorKind::NoConnections => DnsStatus::NO_DNS_SERVERS,
        ProtoErrorKind::Io(e) => match e.raw_os_error() {
            Some(code) => DnsStatus::new(code),
            None if e.kind() == io::ErrorKind::TimedOut => DnsStatus::TIMEOUT,
            None => DnsStatus::LOCAL_FAILURE,
        },
        ProtoErrorKind::Message(_)
        | ProtoErrorKind::Msg(_)
        | ProtoErrorKind::Busy
        | ProtoErrorKind::Canceled(_)
        | ProtoErrorKind::Poisoned
        | ProtoErrorKind::Timer => DnsStatus::LOCAL_FAILURE,
        _ => DnsStatus::BAD_PACKET,
    }
}
