//! Validated DNS query names.

use crate::base::neterror::NetError;
use std::fmt;

/// Longest name, in octets, a query may carry.
pub const MAX_NAME_LEN: usize = 255;

/// Longest single label, in octets.
pub const MAX_LABEL_LEN: usize = 63;

/// A domain name to query.
///
/// Construction checks the RFC 1035 size limits so a malformed name is
/// rejected locally instead of being sent to a nameserver.
#[derive(Clone, Hash, Eq, PartialEq)]
pub struct QueryName {
    host: Box<str>,
}

impl QueryName {
    /// Creates a new [`QueryName`], validating its length and labels.
    ///
    /// A single trailing dot (fully qualified form) is accepted and does not
    /// count toward [`MAX_NAME_LEN`], which limits the dotted text form.
    pub fn new(host: impl Into<Box<str>>) -> Result<Self, NetError> {
        let host = host.into();
        validate(&host)?;
        Ok(Self { host })
    }

    /// Builds a name the caller already knows is well formed.
    pub(crate) fn from_trusted(host: String) -> Self {
        debug_assert!(validate(&host).is_ok(), "invalid trusted name {host}");
        Self { host: host.into() }
    }

    /// View the name as a string slice.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.host
    }

    /// Iterates over the labels, ignoring a trailing dot.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.host.trim_end_matches('.').split('.')
    }

    /// Whether the name ends with a dot.
    pub fn is_fqdn(&self) -> bool {
        self.host.ends_with('.')
    }
}

fn validate(host: &str) -> Result<(), NetError> {
    let invalid = |reason| NetError::InvalidQueryName {
        name: host.to_string(),
        reason,
    };

    let relative = host.strip_suffix('.').unwrap_or(host);
    if relative.is_empty() {
        return Err(invalid("empty name"));
    }
    if relative.len() > MAX_NAME_LEN {
        return Err(invalid("name exceeds 255 octets"));
    }
    for label in relative.split('.') {
        if label.is_empty() {
            return Err(invalid("empty label"));
        }
        if label.len() > MAX_LABEL_LEN {
            return Err(invalid("label exceeds 63 octets"));
        }
    }
    Ok(())
}

impl TryFrom<&str> for QueryName {
    type Error = NetError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        QueryName::new(value)
    }
}

impl TryFrom<String> for QueryName {
    type Error = NetError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        QueryName::new(value)
    }
}

impl fmt::Debug for QueryName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.host, f)
    }
}

impl fmt::Display for QueryName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.host, f)
    }
}
