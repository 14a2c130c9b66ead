//! DNS Module Tests
//!
//! Covers:
//! - `reverse_name` for both families
//! - `DnsResolver` classification using a MockProvider
//! - `OverrideProvider` hit and passthrough
//! - `HickoryProvider` against real DNS (ignored by default)

use hostnet::dns::{
    reverse_name, Answering, DnsProvider, DnsResolver, DnsStatus, HickoryProvider,
    OverrideProvider, QueryName, RecordData, RecordList, RecordType, ResolutionOutcome,
};
use hostnet::{AddressFamily, NetConfig, NetError};

use std::collections::HashMap;
use std::net::{Ipv4Addr, Ipv6Addr};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Answers every query with a fixed result and remembers what it was asked.
struct MockProvider {
    answer: Result<RecordList, DnsStatus>,
    calls: AtomicUsize,
    asked: Mutex<Vec<(String, RecordType)>>,
}

impl MockProvider {
    fn new(answer: Result<RecordList, DnsStatus>) -> Arc<Self> {
        Arc::new(Self {
            answer,
            calls: AtomicUsize::new(0),
            asked: Mutex::new(Vec::new()),
        })
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl DnsProvider for MockProvider {
    fn query(&self, name: QueryName, record_type: RecordType) -> Answering {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.asked
            .lock()
            .unwrap()
            .push((name.as_str().to_string(), record_type));
        let answer = self.answer.clone();
        Box::pin(async move { answer })
    }
}

#[test]
fn test_reverse_name_ipv4() {
    let name = reverse_name("192.0.2.5").unwrap();
    assert_eq!(name.as_str(), "5.2.0.192.IN-ADDR.ARPA");
}

#[test]
fn test_reverse_name_ipv6_shape() {
    let name = reverse_name("2001:db8::1").unwrap();
    let text = name.as_str();
    assert!(text.ends_with(".IP6.ARPA"));

    let nibbles: Vec<&str> = text.trim_end_matches(".IP6.ARPA").split('.').collect();
    assert_eq!(nibbles.len(), 32);
    assert!(nibbles
        .iter()
        .all(|n| n.len() == 1 && n.chars().all(|c| c.is_ascii_hexdigit())));
    assert!(text.starts_with("1.0.0.0."));
}

#[tokio::test]
async fn test_reverse_invalid_makes_no_query() {
    let mock = MockProvider::new(Ok(vec![]));
    let resolver = DnsResolver::new(mock.clone());

    let err = resolver.reverse("not-an-ip").await.unwrap_err();
    assert!(matches!(err, NetError::InvalidAddress { .. }));
    assert_eq!(mock.calls(), 0);
}

#[tokio::test]
async fn test_reverse_queries_ptr() {
    let mock = MockProvider::new(Ok(vec![RecordData::Ptr("host.example.net".into())]));
    let resolver = DnsResolver::new(mock.clone());

    let outcome = resolver.reverse("192.0.2.5").await.unwrap();
    assert_eq!(outcome, ResolutionOutcome::Found("host.example.net".into()));

    let asked = mock.asked.lock().unwrap();
    assert_eq!(
        asked.as_slice(),
        &[("5.2.0.192.IN-ADDR.ARPA".to_string(), RecordType::Ptr)]
    );
}

#[tokio::test]
async fn test_absent_name_is_not_found() {
    for status in [
        DnsStatus::NAME_ERROR,
        DnsStatus::RECORD_DOES_NOT_EXIST,
        DnsStatus::INFO_NO_RECORDS,
    ] {
        let resolver = DnsResolver::new(MockProvider::new(Err(status)));
        let name = QueryName::new("absent.example").unwrap();
        let outcome = resolver.resolve(&name, RecordType::A).await;
        assert_eq!(outcome, ResolutionOutcome::NotFound, "status {status}");
    }
}

#[tokio::test]
async fn test_failure_keeps_status_code() {
    let resolver = DnsResolver::new(MockProvider::new(Err(DnsStatus::SERVER_FAILURE)));
    let name = QueryName::new("example.com").unwrap();
    let outcome = resolver.resolve(&name, RecordType::A).await;
    assert_eq!(outcome, ResolutionOutcome::Error(9002));

    let resolver = DnsResolver::new(MockProvider::new(Err(DnsStatus::TIMEOUT)));
    assert_eq!(
        resolver.resolve(&name, RecordType::Aaaa).await.error_code(),
        Some(1460)
    );
}

#[tokio::test]
async fn test_formats_addresses() {
    let name = QueryName::new("example.com").unwrap();

    let resolver = DnsResolver::new(MockProvider::new(Ok(vec![RecordData::A(
        Ipv4Addr::new(192, 0, 2, 1),
    )])));
    assert_eq!(
        resolver.resolve(&name, RecordType::A).await.found(),
        Some("192.0.2.1")
    );

    let v6: Ipv6Addr = "2001:0db8:0000:0000:0000:0000:0000:0001".parse().unwrap();
    let resolver = DnsResolver::new(MockProvider::new(Ok(vec![RecordData::Aaaa(v6)])));
    assert_eq!(
        resolver.resolve(&name, RecordType::Aaaa).await.found(),
        Some("2001:db8::1")
    );
}

#[tokio::test]
async fn test_lookup_family_selects_record_type() {
    let mock = MockProvider::new(Err(DnsStatus::NAME_ERROR));
    let resolver = DnsResolver::new(mock.clone());

    resolver.lookup("example.com", AddressFamily::Ipv4).await.unwrap();
    resolver.lookup("example.com", AddressFamily::Ipv6).await.unwrap();

    let asked: Vec<RecordType> = mock.asked.lock().unwrap().iter().map(|(_, t)| *t).collect();
    assert_eq!(asked, vec![RecordType::A, RecordType::Aaaa]);
}

#[tokio::test]
async fn test_dns_overrides() {
    let mock = MockProvider::new(Ok(vec![RecordData::A(Ipv4Addr::new(8, 8, 8, 8))]));

    let mut overrides = HashMap::new();
    overrides.insert(
        (QueryName::new("local.override").unwrap(), RecordType::A),
        vec![RecordData::A(Ipv4Addr::new(127, 0, 0, 1))],
    );

    let resolver = DnsResolver::new(OverrideProvider::new(mock.clone(), overrides));

    // Test override hit
    let outcome = resolver
        .resolve(&QueryName::new("local.override").unwrap(), RecordType::A)
        .await;
    assert_eq!(outcome.found(), Some("127.0.0.1"));
    assert_eq!(mock.calls(), 0);

    // Test passthrough (miss)
    let outcome = resolver
        .resolve(&QueryName::new("other.com").unwrap(), RecordType::A)
        .await;
    assert_eq!(outcome.found(), Some("8.8.8.8"));
    assert_eq!(mock.calls(), 1);
}

#[tokio::test]
#[ignore = "requires network access"]
async fn test_hickory_nonexistent_domain_is_not_found() {
    let provider = HickoryProvider::system(&NetConfig::default());
    let resolver = DnsResolver::new(provider);
    let name = QueryName::new("this-domain-definitely-does-not-exist.invalid").unwrap();

    assert_eq!(
        resolver.resolve(&name, RecordType::A).await,
        ResolutionOutcome::NotFound
    );
}

#[tokio::test]
#[ignore = "requires network access"]
async fn test_hickory_reverse_public_resolver() {
    let provider = HickoryProvider::system(&NetConfig::default());
    let resolver = DnsResolver::new(provider);

    let outcome = resolver.reverse("8.8.8.8").await.unwrap();
    assert_eq!(outcome.found(), Some("dns.google"));
}
