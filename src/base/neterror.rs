use std::{io, sync::Arc};
use thiserror::Error;

/// Errors raised by this crate.
///
/// Context variants carry the details of one failure. Codes shared by
/// several of them also have a bare unit variant, which is what
/// [`NetError::from`] an `i32` yields.
#[derive(Debug, Error, Clone)]
pub enum NetError {
    // Address and name errors
    #[error("Address invalid")]
    AddressInvalid,
    #[error("ip address '{input}' is not a valid IPv4/IPv6 address")]
    InvalidAddress { input: String },
    #[error("Name not resolved")]
    NameNotResolved,
    #[error("Name not resolved for {domain}: {source}")]
    NameNotResolvedFor {
        domain: String,
        #[source]
        source: Arc<io::Error>,
    },
    #[error("Name resolution failed")]
    NameResolutionFailed,
    #[error("Invalid query name '{name}': {reason}")]
    InvalidQueryName { name: String, reason: &'static str },
    #[error("Resolver configuration failed: {0}")]
    ResolverConfig(String),

    // Host errors
    #[error("{op} failed: {source}")]
    Os {
        op: &'static str,
        #[source]
        source: Arc<io::Error>,
    },

    // URL errors
    #[error("Invalid URL")]
    InvalidUrl,
    #[error("Invalid URL '{url}': {source}")]
    InvalidUrlFor {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("Unknown error: {0}")]
    Unknown(i32),
}

impl NetError {
    pub fn as_i32(&self) -> i32 {
        match self {
            NetError::NameNotResolved | NetError::NameNotResolvedFor { .. } => -105,
            NetError::AddressInvalid | NetError::InvalidAddress { .. } => -108,
            NetError::NameResolutionFailed | NetError::ResolverConfig(_) => -137,

            NetError::InvalidUrl | NetError::InvalidUrlFor { .. } => -300,

            // Custom codes start at -910, clear of the blob range (-900..=-906)
            NetError::InvalidQueryName { .. } => -910,
            NetError::Os { .. } => -911,
            NetError::Unknown(code) => *code,
        }
    }

    pub(crate) fn invalid_address(input: impl Into<String>) -> Self {
        NetError::InvalidAddress {
            input: input.into(),
        }
    }

    pub(crate) fn dns_failed(domain: &str, source: io::Error) -> Self {
        NetError::NameNotResolvedFor {
            domain: domain.to_string(),
            source: Arc::new(source),
        }
    }

    pub(crate) fn os_failed(op: &'static str, source: io::Error) -> Self {
        NetError::Os {
            op,
            source: Arc::new(source),
        }
    }

    /// True for errors raised by input validation, before any I/O.
    pub fn is_invalid_input(&self) -> bool {
        matches!(
            self,
            NetError::AddressInvalid
                | NetError::InvalidAddress { .. }
                | NetError::InvalidQueryName { .. }
                | NetError::InvalidUrl
                | NetError::InvalidUrlFor { .. }
        )
    }
}

impl From<i32> for NetError {
    fn from(code: i32) -> Self {
        match code {
            -105 => NetError::NameNotResolved,
            -108 => NetError::AddressInvalid,
            -137 => NetError::NameResolutionFailed,

            -300 => NetError::InvalidUrl,
            _ => NetError::Unknown(code),
        }
    }
}
