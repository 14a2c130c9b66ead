//! Provider status codes and the classification of answers into outcomes.

use super::record::{RecordList, RecordType};
use std::fmt;

/// Status reported by a DNS provider for one query.
///
/// Uses the host resolver `DNS_STATUS` numbering: `0` is success, server
/// RCODEs are reported as `9000 + rcode`, local conditions have their own
/// codes, and socket failures carry the OS error code unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DnsStatus(i32);

impl DnsStatus {
    pub const SUCCESS: DnsStatus = DnsStatus(0);
    pub const TIMEOUT: DnsStatus = DnsStatus(1460);
    pub const FORMAT_ERROR: DnsStatus = DnsStatus(9001);
    pub const SERVER_FAILURE: DnsStatus = DnsStatus(9002);
    pub const NAME_ERROR: DnsStatus = DnsStatus(9003);
    pub const NOT_IMPLEMENTED: DnsStatus = DnsStatus(9004);
    pub const REFUSED: DnsStatus = DnsStatus(9005);
    pub const INFO_NO_RECORDS: DnsStatus = DnsStatus(9501);
    pub const BAD_PACKET: DnsStatus = DnsStatus(9502);
    pub const RECORD_DOES_NOT_EXIST: DnsStatus = DnsStatus(9701);
    pub const NO_DNS_SERVERS: DnsStatus = DnsStatus(9852);
    /// Failure inside the local resolver; no server was involved.
    pub const LOCAL_FAILURE: DnsStatus = DnsStatus(9999);

    const RCODE_BASE: i32 = 9000;

    pub const fn new(code: i32) -> Self {
        DnsStatus(code)
    }

    /// Status for a server response code. `NOERROR` with nothing to show
    /// for it is NODATA.
    pub fn from_rcode(rcode: u16) -> Self {
        match rcode {
            0 => DnsStatus::INFO_NO_RECORDS,
            code => DnsStatus(Self::RCODE_BASE + i32::from(code)),
        }
    }

    pub fn code(self) -> i32 {
        self.0
    }

    pub fn is_success(self) -> bool {
        self.0 == 0
    }

    /// Whether the status says the record authoritatively does not exist.
    pub fn is_not_found(self) -> bool {
        matches!(
            self,
            DnsStatus::INFO_NO_RECORDS | DnsStatus::RECORD_DOES_NOT_EXIST | DnsStatus::NAME_ERROR
        )
    }
}

impl fmt::Display for DnsStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match *self {
            DnsStatus::SUCCESS => "success",
            DnsStatus::TIMEOUT => "timeout",
            DnsStatus::FORMAT_ERROR => "format error",
            DnsStatus::SERVER_FAILURE => "server failure",
            DnsStatus::NAME_ERROR => "name does not exist",
            DnsStatus::NOT_IMPLEMENTED => "not implemented",
            DnsStatus::REFUSED => "refused",
            DnsStatus::INFO_NO_RECORDS => "no records",
            DnsStatus::BAD_PACKET => "bad packet",
            DnsStatus::RECORD_DOES_NOT_EXIST => "record does not exist",
            DnsStatus::NO_DNS_SERVERS => "no dns servers",
            DnsStatus::LOCAL_FAILURE => "local resolver failure",
            _ => return write!(f, "dns status {}", self.0),
        };
        write!(f, "{label} ({})", self.0)
    }
}

/// The result of one lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolutionOutcome {
    /// Decoded address or host name.
    Found(String),
    /// The provider authoritatively reports no such record.
    NotFound,
    /// Any other failure, with the provider's status code.
    Error(i32),
}

impl ResolutionOutcome {
    pub fn is_found(&self) -> bool {
        matches!(self, ResolutionOutcome::Found(_))
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ResolutionOutcome::NotFound)
    }

    pub fn found(&self) -> Option<&str> {
        match self {
            ResolutionOutcome::Found(value) => Some(value),
            _ => None,
        }
    }

    pub fn into_found(self) -> Option<String> {
        match self {
            ResolutionOutcome::Found(value) => Some(value),
            _ => None,
        }
    }

    pub fn error_code(&self) -> Option<i32> {
        match self {
            ResolutionOutcome::Error(code) => Some(*code),
            _ => None,
        }
    }
}

/// Turns a provider answer into an outcome.
///
/// Consumes the record list: the first record of the requested type is
/// decoded and the rest of the list is dropped before this returns.
pub fn classify(answer: Result<RecordList, DnsStatus>, record_type: RecordType) -> ResolutionOutcome {
    match answer {
        Ok(records) => match records
            .into_iter()
            .find(|record| record.record_type() == record_type)
        {
            Some(record) => ResolutionOutcome::Found(record.into_text()),
            None => ResolutionOutcome::NotFound,
        },
        Err(status) if status.is_success() => ResolutionOutcome::NotFound,
        Err(status) if status.is_not_found() => ResolutionOutcome::NotFound,
        Err(status) => ResolutionOutcome::Error(status.code()),
    }
}
