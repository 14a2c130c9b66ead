//! Core DNS resolution types and traits.
//!
//! This module defines the `DnsProvider` trait, the seam between query
//! construction/classification and whatever actually talks to a nameserver,
//! and the `DnsResolver` built on top of it.

use super::{
    name::QueryName,
    outcome::{classify, DnsStatus, ResolutionOutcome},
    record::{RecordList, RecordType},
    reverse::reverse_name,
};
use crate::base::{family::AddressFamily, neterror::NetError};
use std::{collections::HashMap, fmt, future::Future, net::IpAddr, pin::Pin, sync::Arc};

/// Alias for the `Future` type returned by a DNS provider.
///
/// `Err` carries a non-zero provider status.
pub type Answering = Pin<Box<dyn Future<Output = Result<RecordList, DnsStatus>> + Send>>;

/// Something that can answer a single DNS question.
///
/// Implementations must be thread-safe.
///
/// # Design Notes
///
/// - One call is one query; no retries, no caching.
/// - Uses `&self` for concurrent queries without mutable access.
/// - Returns boxed futures for trait object compatibility.
pub trait DnsProvider: Send + Sync {
    /// Queries `name` for records of `record_type`.
    fn query(&self, name: QueryName, record_type: RecordType) -> Answering;
}

/// Blanket implementation for Arc-wrapped providers.
impl<P: DnsProvider + ?Sized> DnsProvider for Arc<P> {
    fn query(&self, name: QueryName, record_type: RecordType) -> Answering {
        (**self).query(name, record_type)
    }
}

/// Provider wrapper that answers some questions from a fixed table.
///
/// Questions with an entry are answered locally; everything else is passed
/// to the inner provider. Useful for:
/// - Testing without real DNS
/// - Pinning specific answers for certain names
///
/// # Example
///
/// ```rust,ignore
/// use hostnet::dns::{OverrideProvider, HickoryProvider, QueryName, RecordData, RecordType};
/// use hostnet::NetConfig;
/// use std::collections::HashMap;
///
/// let mut overrides = HashMap::new();
/// overrides.insert(
///     (QueryName::new("api.local")?, RecordType::A),
///     vec![RecordData::A("127.0.0.1".parse()?)],
/// );
///
/// let system = HickoryProvider::system(&NetConfig::default());
/// let provider = OverrideProvider::new(Arc::new(system), overrides);
/// ```
pub struct OverrideProvider {
    inner: Arc<dyn DnsProvider>,
    overrides: Arc<HashMap<(QueryName, RecordType), RecordList>>,
}

impl OverrideProvider {
    /// Creates a new provider with the given overrides.
    ///
    /// # Arguments
    ///
    /// * `inner` - The provider for questions without an override.
    /// * `overrides` - Map of questions to their answers.
    pub fn new(
        inner: Arc<dyn DnsProvider>,
        overrides: HashMap<(QueryName, RecordType), RecordList>,
    ) -> Self {
        Self {
            inner,
            overrides: Arc::new(overrides),
        }
    }

    /// Returns the number of configured overrides.
    pub fn override_count(&self) -> usize {
        self.overrides.len()
    }
}

impl DnsProvider for OverrideProvider {
    fn query(&self, name: QueryName, record_type: RecordType) -> Answering {
        if let Some(records) = self.overrides.get(&(name.clone(), record_type)) {
            tracing::trace!(name = %name, %record_type, "answered from override table");
            let records = records.clone();
            return Box::pin(std::future::ready(Ok(records)));
        }
        self.inner.query(name, record_type)
    }
}

impl fmt::Debug for OverrideProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OverrideProvider")
            .field("override_count", &self.overrides.len())
            .finish_non_exhaustive()
    }
}

/// Forward and reverse lookups with outcome classification.
///
/// Each call issues at most one provider query and awaits it; there is no
/// caching and no retry. Callers that want a deadline or cancellation can
/// wrap individual calls in `tokio::time::timeout` or their own task.
#[derive(Clone)]
pub struct DnsResolver {
    provider: Arc<dyn DnsProvider>,
}

impl DnsResolver {
    /// Creates a resolver over the given provider.
    pub fn new(provider: impl DnsProvider + 'static) -> Self {
        Self {
            provider: Arc::new(provider),
        }
    }

    /// Creates a resolver over a shared provider.
    pub fn with_provider(provider: Arc<dyn DnsProvider>) -> Self {
        Self { provider }
    }

    /// Queries `name` for `record_type` and classifies the answer.
    ///
    /// The provider's record list is consumed here: the first matching record
    /// is decoded and the list is dropped before the outcome is returned.
    pub async fn resolve(&self, name: &QueryName, record_type: RecordType) -> ResolutionOutcome {
        tracing::debug!(name = %name, %record_type, "dns query");
        let answer = self.provider.query(name.clone(), record_type).await;

        let outcome = classify(answer, record_type);
        match &outcome {
            ResolutionOutcome::Found(value) => {
                tracing::debug!(name = %name, %record_type, value = %value, "dns query answered")
            }
            ResolutionOutcome::NotFound => {
                tracing::debug!(name = %name, %record_type, "dns record not found")
            }
            ResolutionOutcome::Error(code) => {
                tracing::warn!(name = %name, %record_type, status = %DnsStatus::new(*code), "dns query failed")
            }
        }
        outcome
    }

    /// Looks up the address of `host` in the requested family.
    ///
    /// A host that is already an address literal of that family is answered
    /// without a query.
    pub async fn lookup(
        &self,
        host: &str,
        family: AddressFamily,
    ) -> Result<ResolutionOutcome, NetError> {
        if let Some(addr) = literal(host, family) {
            return Ok(ResolutionOutcome::Found(addr.to_string()));
        }

        let name = QueryName::new(host)?;
        let record_type = match family {
            AddressFamily::Ipv4 => RecordType::A,
            AddressFamily::Ipv6 => RecordType::Aaaa,
        };
        Ok(self.resolve(&name, record_type).await)
    }

    /// Looks up the host name registered for an address literal.
    ///
    /// Fails with [`NetError::InvalidAddress`] before any query is made when
    /// `ip` does not parse.
    pub async fn reverse(&self, ip: &str) -> Result<ResolutionOutcome, NetError> {
        let name = reverse_name(ip)?;
        Ok(self.resolve(&name, RecordType::Ptr).await)
    }
}

impl fmt::Debug for DnsResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DnsResolver").finish_non_exhaustive()
    }
}

/// Parses `host` as an address literal of `family`.
///
/// Bracketed IPv6 literals (`[::1]`) are accepted.
pub fn literal(host: &str, family: AddressFamily) -> Option<IpAddr> {
    let bare = host
        .strip_prefix('[')
        .and_then(|h| h.strip_suffix(']'))
        .unwrap_or(host);
    bare.parse::<IpAddr>()
        .ok()
        .filter(|addr| family.matches(addr))
}
