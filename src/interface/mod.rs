//! Local network adapter enumeration.
//!
//! [`adapters`] takes one snapshot of the OS interface table through
//! `netdev` and hands back an owned iterator over the adapters that are up,
//! not loopback, and carry at least one address of the requested family.
//! The snapshot lives inside the iterator; nothing refers back into OS
//! memory once it is taken.

use crate::base::family::AddressFamily;
use std::net::IpAddr;
use tracing::{debug, trace};

/// An active adapter and its addresses of one family.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Adapter {
    /// OS interface name (`eth0`, `en0`, a GUID on Windows).
    pub name: String,
    pub description: Option<String>,
    pub friendly_name: Option<String>,
    /// Unicast addresses in OS order. Never empty.
    pub addresses: Vec<IpAddr>,
}

impl Adapter {
    /// Friendly name, then description, then OS name.
    pub fn display_name(&self) -> &str {
        self.friendly_name
            .as_deref()
            .or(self.description.as_deref())
            .unwrap_or(&self.name)
    }

    pub fn address_strings(&self) -> Vec<String> {
        self.addresses.iter().map(ToString::to_string).collect()
    }
}

/// One row of the interface table before filtering.
#[derive(Debug, Clone, Default)]
pub struct InterfaceRecord {
    pub name: String,
    pub description: Option<String>,
    pub friendly_name: Option<String>,
    pub up: bool,
    pub loopback: bool,
    pub addresses: Vec<IpAddr>,
}

impl From<netdev::Interface> for InterfaceRecord {
    fn from(iface: netdev::Interface) -> Self {
        let addresses = iface
            .ipv4
            .iter()
            .map(|net| IpAddr::V4(net.addr()))
            .chain(iface.ipv6.iter().map(|net| IpAddr::V6(net.addr())))
            .collect();
        Self {
            up: iface.is_up(),
            loopback: iface.is_loopback(),
            name: iface.name,
            description: iface.description,
            friendly_name: iface.friendly_name,
            addresses,
        }
    }
}

/// Iterator over active adapters of one address family.
///
/// Single pass: once drained it stays empty. Call [`adapters`] again for a
/// fresh snapshot.
#[derive(Debug)]
pub struct Adapters {
    records: std::vec::IntoIter<InterfaceRecord>,
    family: AddressFamily,
}

impl Adapters {
    /// Builds the iterator over an existing snapshot.
    pub fn from_records(records: Vec<InterfaceRecord>, family: AddressFamily) -> Self {
        Self {
            records: records.into_iter(),
            family,
        }
    }

    pub fn family(&self) -> AddressFamily {
        self.family
    }
}

impl Iterator for Adapters {
    type Item = Adapter;

    fn next(&mut self) -> Option<Adapter> {
        for record in self.records.by_ref() {
            if !record.up || record.loopback {
                trace!(interface = %record.name, "skipping inactive or loopback interface");
                continue;
            }

            let family = self.family;
            let addresses: Vec<IpAddr> = record
                .addresses
                .into_iter()
                .filter(|addr| family.matches(addr))
                .collect();
            if addresses.is_empty() {
                trace!(interface = %record.name, %family, "no addresses of family");
                continue;
            }

            return Some(Adapter {
                name: record.name,
                description: record.description,
                friendly_name: record.friendly_name,
                addresses,
            });
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, self.records.size_hint().1)
    }
}

/// Snapshots the interface table and iterates its active `family` adapters.
pub fn adapters(family: AddressFamily) -> Adapters {
    let records: Vec<InterfaceRecord> = netdev::get_interfaces()
        .into_iter()
        .map(InterfaceRecord::from)
        .collect();
    debug!(count = records.len(), %family, "enumerated network interfaces");
    Adapters::from_records(records, family)
}
