//! Resolver and probe configuration.

use serde::Deserialize;
use std::{net::SocketAddr, time::Duration};

/// Configuration shared by the resolver and the host probes.
///
/// Every field has a default, so a partial JSON/TOML document deserializes
/// into a complete config.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct NetConfig {
    /// Explicit nameservers. Empty means "use the system configuration".
    pub nameservers: Vec<SocketAddr>,
    /// Per-attempt query timeout
    pub query_timeout: Duration,
    /// Attempts per nameserver before giving up
    pub attempts: usize,
    /// Host whose address is used as the public IP echo server
    pub public_ip_resolver: String,
    /// Name the echo server answers with the caller's public address
    pub public_ip_probe: String,
}

impl Default for NetConfig {
    fn default() -> Self {
        Self {
            nameservers: Vec::new(),
            query_timeout: Duration::from_secs(5),
            attempts: 2,
            public_ip_resolver: "resolver1.opendns.com".to_string(),
            public_ip_probe: "myip.opendns.com".to_string(),
        }
    }
}

impl NetConfig {
    /// Create a new config with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set explicit nameservers.
    pub fn nameservers(mut self, servers: Vec<SocketAddr>) -> Self {
        self.nameservers = servers;
        self
    }

    /// Set the per-attempt query timeout.
    pub fn query_timeout(mut self, timeout: Duration) -> Self {
        self.query_timeout = timeout;
        self
    }

    /// Set attempts per nameserver.
    pub fn attempts(mut self, attempts: usize) -> Self {
        self.attempts = attempts;
        self
    }

    /// Set the public IP echo server host.
    pub fn public_ip_resolver(mut self, host: impl Into<String>) -> Self {
        self.public_ip_resolver = host.into();
        self
    }

    /// Set the public IP probe name.
    pub fn public_ip_probe(mut self, name: impl Into<String>) -> Self {
        self.public_ip_probe = name.into();
        self
    }

    /// Whether the system resolver configuration is used.
    pub fn uses_system_nameservers(&self) -> bool {
        self.nameservers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = NetConfig::default();
        assert!(config.uses_system_nameservers());
        assert_eq!(config.query_timeout, Duration::from_secs(5));
        assert_eq!(config.public_ip_probe, "myip.opendns.com");
    }

    #[test]
    fn test_builder_pattern() {
        let server: SocketAddr = "192.0.2.53:53".parse().unwrap();
        let config = NetConfig::new()
            .nameservers(vec![server])
            .query_timeout(Duration::from_millis(750))
            .attempts(1);

        assert!(!config.uses_system_nameservers());
        assert_eq!(config.nameservers, vec![server]);
        assert_eq!(config.query_timeout, Duration::from_millis(750));
        assert_eq!(config.attempts, 1);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: NetConfig = serde_json::from_str(
            r#"{ "nameservers": ["198.51.100.1:53"], "attempts": 4 }"#,
        )
        .unwrap();

        assert_eq!(config.nameservers.len(), 1);
        assert_eq!(config.attempts, 4);
        assert_eq!(config.query_timeout, NetConfig::default().query_timeout);
        assert_eq!(config.public_ip_resolver, "resolver1.opendns.com");
    }
}
