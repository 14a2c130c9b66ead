//! Reverse-zone query names for PTR lookups (RFC 1035 §3.5, RFC 3596 §2.5).

use super::name::QueryName;
use crate::base::neterror::NetError;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

/// Zone label of the IPv4 reverse namespace.
pub const IPV4_ZONE: &str = "IN-ADDR.ARPA";

/// Zone label of the IPv6 reverse namespace.
pub const IPV6_ZONE: &str = "IP6.ARPA";

const HEX: &[u8; 16] = b"0123456789abcdef";

/// Builds the PTR query name for a textual IPv4 or IPv6 address.
///
/// Fails with [`NetError::InvalidAddress`] when `ip` is not an address
/// literal of either family.
///
/// ```
/// let name = hostnet::dns::reverse_name("192.0.2.5").unwrap();
/// assert_eq!(name.as_str(), "5.2.0.192.IN-ADDR.ARPA");
/// ```
pub fn reverse_name(ip: &str) -> Result<QueryName, NetError> {
    let addr: IpAddr = ip.parse().map_err(|_| NetError::invalid_address(ip))?;
    Ok(reverse_name_for(addr))
}

/// Builds the PTR query name for a parsed address.
pub fn reverse_name_for(addr: IpAddr) -> QueryName {
    let name = match addr {
        IpAddr::V4(v4) => reverse_v4(v4),
        IpAddr::V6(v6) => reverse_v6(v6),
    };
    QueryName::from_trusted(name)
}

fn reverse_v4(addr: Ipv4Addr) -> String {
    let [a, b, c, d] = addr.octets();
    format!("{d}.{c}.{b}.{a}.{IPV4_ZONE}")
}

fn reverse_v6(addr: Ipv6Addr) -> String {
    let bytes = addr.octets();
    // 32 nibbles, 32 dots, zone
    let mut name = String::with_capacity(64 + IPV6_ZONE.len());
    for nibble in 0..32 {
        let byte = bytes[15 - nibble / 2];
        let digit = if nibble % 2 == 0 { byte & 0x0f } else { byte >> 4 };
        name.push(char::from(HEX[usize::from(digit)]));
        name.push('.');
    }
    name.push_str(IPV6_ZONE);
    name
}

/// Recovers the address from a reverse-zone name, if it is one.
///
/// Accepts the zone label in any case and an optional trailing dot.
pub fn parse_reverse_name(name: &str) -> Option<IpAddr> {
    let name = name.strip_suffix('.').unwrap_or(name);

    if let Some(labels) = strip_zone(name, IPV4_ZONE) {
        let mut octets = [0u8; 4];
        let mut parts = labels.split('.');
        for slot in octets.iter_mut().rev() {
            *slot = parts.next()?.parse().ok()?;
        }
        if parts.next().is_some() {
            return None;
        }
        return Some(IpAddr::V4(Ipv4Addr::from(octets)));
    }

    let labels = strip_zone(name, IPV6_ZONE)?;
    let mut bytes = [0u8; 16];
    let mut count = 0;
    for (nibble, label) in labels.split('.').enumerate() {
        if nibble >= 32 || label.len() != 1 {
            return None;
        }
        let digit = u8::from_str_radix(label, 16).ok()?;
        let byte = &mut bytes[15 - nibble / 2];
        if nibble % 2 == 0 {
            *byte |= digit;
        } else {
            *byte |= digit << 4;
        }
        count += 1;
    }
    (count == 32).then(|| IpAddr::V6(Ipv6Addr::from(bytes)))
}

fn strip_zone<'a>(name: &'a str, zone: &str) -> Option<&'a str> {
    let split = name.len().checked_sub(zone.len() + 1)?;
    let suffix = name.get(split..)?.strip_prefix('.')?;
    suffix
        .eq_ignore_ascii_case(zone)
        .then(|| name.get(..split))
        .flatten()
}
