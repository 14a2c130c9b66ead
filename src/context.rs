//! Process-wide network context.
//!
//! Owns the pieces that are expensive to set up and should be shared by
//! every lookup in the process (today: the system DNS provider). The shared
//! context is reference counted: the first [`NetworkContext::acquire`]
//! creates it, every later call while it is alive returns the same instance,
//! and dropping the last handle tears it down.

use crate::{
    base::neterror::NetError,
    config::NetConfig,
    dns::{Answering, DnsProvider, DnsResolver, HickoryProvider, QueryName, RecordType},
};
use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc, Mutex, Weak,
};

static SHARED: Mutex<Weak<NetworkContext>> = Mutex::new(Weak::new());
static GENERATION: AtomicU64 = AtomicU64::new(0);

/// Initialized network state with deterministic teardown.
#[derive(Debug)]
pub struct NetworkContext {
    config: NetConfig,
    provider: HickoryProvider,
    generation: u64,
}

impl NetworkContext {
    /// Returns the shared context, creating it with default settings if no
    /// handle to it is currently alive.
    pub fn acquire() -> Result<Arc<Self>, NetError> {
        let mut shared = SHARED.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(ctx) = shared.upgrade() {
            return Ok(ctx);
        }

        let ctx = Arc::new(Self::build(NetConfig::default())?);
        *shared = Arc::downgrade(&ctx);
        Ok(ctx)
    }

    /// Creates a private context that is not shared through [`acquire`](Self::acquire).
    pub fn new(config: NetConfig) -> Result<Arc<Self>, NetError> {
        Ok(Arc::new(Self::build(config)?))
    }

    fn build(config: NetConfig) -> Result<Self, NetError> {
        let provider = HickoryProvider::from_config(&config)?;
        let generation = GENERATION.fetch_add(1, Ordering::Relaxed) + 1;
        tracing::debug!(generation, "network context initialized");
        Ok(Self {
            config,
            provider,
            generation,
        })
    }

    pub fn config(&self) -> &NetConfig {
        &self.config
    }

    /// The DNS provider owned by this context.
    pub fn provider(&self) -> &HickoryProvider {
        &self.provider
    }

    /// A resolver that keeps this context alive while it is in use.
    pub fn resolver(self: &Arc<Self>) -> DnsResolver {
        DnsResolver::with_provider(self.clone())
    }

    /// Monotonic id of this context; a new one is issued after each teardown.
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

impl Drop for NetworkContext {
    fn drop(&mut self) {
        tracing::debug!(generation = self.generation, "network context torn down");
    }
}

impl DnsProvider for NetworkContext {
    fn query(&self, name: QueryName, record_type: RecordType) -> Answering {
        self.provider.query(name, record_type)
    }
}

impl DnsResolver {
    /// A resolver over the shared [`NetworkContext`].
    ///
    /// The resolver (and its clones) hold the context alive.
    pub fn system() -> Result<Self, NetError> {
        Ok(NetworkContext::acquire()?.resolver())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Both cases share the process-wide slot, so they run in one test.
    #[tokio::test]
    async fn test_shared_context_lifecycle() {
        let first = NetworkContext::acquire().unwrap();
        let again = NetworkContext::acquire().unwrap();
        assert!(Arc::ptr_eq(&first, &again));

        let resolver = DnsResolver::system().unwrap();
        let generation = first.generation();
        drop(first);
        drop(again);

        // The resolver still holds the context
        let held = NetworkContext::acquire().unwrap();
        assert_eq!(held.generation(), generation);
        drop(held);
        drop(resolver);

        let fresh = NetworkContext::acquire().unwrap();
        assert!(fresh.generation() > generation);
    }

    #[tokio::test]
    async fn test_private_context_is_not_shared() {
        let config = NetConfig::new().nameservers(vec!["192.0.2.53:53".parse().unwrap()]);
        let private = NetworkContext::new(config.clone()).unwrap();
        assert_eq!(private.config(), &config);
        assert!(!private.config().uses_system_nameservers());
    }
}
