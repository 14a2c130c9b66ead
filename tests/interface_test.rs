//! Adapter enumeration tests.

use hostnet::interface::{adapters, Adapters, InterfaceRecord};
use hostnet::AddressFamily;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

fn snapshot() -> Vec<InterfaceRecord> {
    vec![
        InterfaceRecord {
            name: "lo".into(),
            up: true,
            loopback: true,
            addresses: vec![IpAddr::V4(Ipv4Addr::LOCALHOST), IpAddr::V6(Ipv6Addr::LOCALHOST)],
            ..Default::default()
        },
        InterfaceRecord {
            name: "eth0".into(),
            description: Some("Onboard Ethernet".into()),
            up: true,
            addresses: vec![
                IpAddr::V4(Ipv4Addr::new(10, 0, 0, 2)),
                IpAddr::V4(Ipv4Addr::new(10, 0, 0, 3)),
            ],
            ..Default::default()
        },
        InterfaceRecord {
            name: "docker0".into(),
            up: false,
            addresses: vec![IpAddr::V4(Ipv4Addr::new(172, 17, 0, 1))],
            ..Default::default()
        },
    ]
}

#[test]
fn test_active_ipv4_adapters() {
    let found: Vec<_> = Adapters::from_records(snapshot(), AddressFamily::Ipv4).collect();

    assert_eq!(found.len(), 1);
    assert_eq!(found[0].display_name(), "Onboard Ethernet");
    assert_eq!(found[0].address_strings(), vec!["10.0.0.2", "10.0.0.3"]);
}

#[test]
fn test_no_ipv6_adapters_in_snapshot() {
    let iter = Adapters::from_records(snapshot(), AddressFamily::Ipv6);
    assert_eq!(iter.family(), AddressFamily::Ipv6);
    assert_eq!(iter.count(), 0);
}

#[test]
fn test_each_call_takes_fresh_snapshot() {
    let first: Vec<String> = adapters(AddressFamily::Ipv4).map(|a| a.name).collect();
    let second: Vec<String> = adapters(AddressFamily::Ipv4).map(|a| a.name).collect();
    assert_eq!(first, second);
}
