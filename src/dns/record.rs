//! Record types and decoded record payloads.

use std::{
    fmt,
    net::{Ipv4Addr, Ipv6Addr},
};

/// The record types this crate queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordType {
    /// IPv4 host address
    A,
    /// IPv6 host address
    Aaaa,
    /// Domain name pointer (reverse lookup)
    Ptr,
}

impl RecordType {
    /// The wire value of the type (RFC 1035 / RFC 3596).
    pub fn code(self) -> u16 {
        match self {
            RecordType::A => 1,
            RecordType::Ptr => 12,
            RecordType::Aaaa => 28,
        }
    }

    /// Maps a wire value back to a supported type.
    pub fn from_code(code: u16) -> Option<Self> {
        match code {
            1 => Some(RecordType::A),
            12 => Some(RecordType::Ptr),
            28 => Some(RecordType::Aaaa),
            _ => None,
        }
    }
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            RecordType::A => "A",
            RecordType::Aaaa => "AAAA",
            RecordType::Ptr => "PTR",
        })
    }
}

/// A record payload as handed back by a provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordData {
    A(Ipv4Addr),
    Aaaa(Ipv6Addr),
    Ptr(String),
}

impl RecordData {
    pub fn record_type(&self) -> RecordType {
        match self {
            RecordData::A(_) => RecordType::A,
            RecordData::Aaaa(_) => RecordType::Aaaa,
            RecordData::Ptr(_) => RecordType::Ptr,
        }
    }

    /// Textual form of the payload: dotted-decimal, RFC 5952 compressed
    /// IPv6, or the host name as given.
    pub fn into_text(self) -> String {
        match self {
            RecordData::A(ip) => ip.to_string(),
            RecordData::Aaaa(ip) => ip.to_string(),
            RecordData::Ptr(host) => host,
        }
    }
}

/// Records returned for a single query, owned by the caller.
pub type RecordList = Vec<RecordData>;
