//! Readiness multiplexing over a set of sockets.
//!
//! Semantics follow POSIX `select`: every handle is watched for read,
//! write and exceptional conditions at once, the wait is bounded, and the
//! call reports one of three things: some handles became ready, the wait
//! elapsed with nothing ready, or the wait itself failed. It is implemented
//! with `poll(2)`, which has no descriptor-number ceiling.

use super::handle::{Pollable, Readiness, SocketHandle};
use std::{collections::HashSet, io};

/// Interest registered for every handle.
const INTEREST: libc::c_short = libc::POLLIN | libc::POLLOUT | libc::POLLPRI;

/// Readiness of every polled handle, in input order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReadinessSet {
    entries: Vec<(SocketHandle, Readiness)>,
}

impl ReadinessSet {
    /// Readiness of `handle`, if it was part of the poll.
    pub fn get(&self, handle: SocketHandle) -> Option<Readiness> {
        self.entries
            .iter()
            .find(|(h, _)| *h == handle)
            .map(|(_, r)| *r)
    }

    pub fn iter(&self) -> impl Iterator<Item = (SocketHandle, Readiness)> + '_ {
        self.entries.iter().copied()
    }

    /// Handles with at least one condition set.
    pub fn ready(&self) -> impl Iterator<Item = SocketHandle> + '_ {
        self.entries
            .iter()
            .filter(|(_, r)| r.is_ready())
            .map(|(h, _)| *h)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Result of one bounded wait.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollResult {
    /// At least one handle is ready; every input handle has an entry.
    EventsOccurred(ReadinessSet),
    /// The wait elapsed with nothing ready.
    Timeout,
    /// The wait failed; carries the OS error code.
    PollError(i32),
}

impl PollResult {
    pub fn is_timeout(&self) -> bool {
        matches!(self, PollResult::Timeout)
    }

    pub fn events(&self) -> Option<&ReadinessSet> {
        match self {
            PollResult::EventsOccurred(set) => Some(set),
            _ => None,
        }
    }
}

/// Waits up to `timeout_micros` for any of `handles` to become readable,
/// writable or errored.
///
/// A timeout of zero checks once and returns immediately. Timeouts are
/// rounded up to whole milliseconds. Duplicate handles are polled once.
/// Handles are only inspected; nothing is closed or consumed.
pub fn poll(handles: &[SocketHandle], timeout_micros: u64) -> PollResult {
    let mut seen = HashSet::with_capacity(handles.len());
    let unique: Vec<SocketHandle> = handles
        .iter()
        .copied()
        .filter(|handle| seen.insert(*handle))
        .collect();

    if let Some(bad) = unique.iter().find(|h| h.as_raw() < 0) {
        tracing::debug!(handle = ?bad, "refusing to poll negative descriptor");
        return PollResult::PollError(libc::EBADF);
    }

    let mut fds: Vec<libc::pollfd> = unique
        .iter()
        .map(|handle| libc::pollfd {
            fd: handle.as_raw(),
            events: INTEREST,
            revents: 0,
        })
        .collect();

    let timeout_ms = timeout_millis(timeout_micros);
    tracing::trace!(count = fds.len(), timeout_ms, "polling sockets");

    // SAFETY: `fds` is a live, exclusively borrowed buffer of `fds.len()`
    // initialized pollfd entries for the duration of the call.
    let rc = unsafe { libc::poll(fds.as_mut_ptr(), fds.len() as libc::nfds_t, timeout_ms) };

    if rc < 0 {
        let err = io::Error::last_os_error();
        tracing::debug!(error = %err, "poll failed");
        return PollResult::PollError(err.raw_os_error().unwrap_or(libc::EIO));
    }

    if let Some(stale) = fds.iter().find(|p| p.revents & libc::POLLNVAL != 0) {
        tracing::debug!(fd = stale.fd, "poll reported closed descriptor");
        return PollResult::PollError(libc::EBADF);
    }

    if rc == 0 {
        return PollResult::Timeout;
    }

    let entries = unique
        .into_iter()
        .zip(&fds)
        .map(|(handle, pfd)| (handle, readiness_of(pfd.revents)))
        .collect();
    tracing::trace!(ready = rc, "poll reported events");
    PollResult::EventsOccurred(ReadinessSet { entries })
}

/// Polls caller-held socket objects and mirrors the readiness back onto them.
///
/// Behaves exactly like [`poll`]. When events occur, each socket's
/// [`Pollable::mirror_readiness`] is called with its entry; on timeout or
/// error the sockets are left untouched.
pub fn poll_sockets(sockets: &[&dyn Pollable], timeout_micros: u64) -> PollResult {
    let handles: Vec<SocketHandle> = sockets.iter().map(|s| s.socket_handle()).collect();
    let result = poll(&handles, timeout_micros);

    if let PollResult::EventsOccurred(set) = &result {
        for socket in sockets {
            if let Some(readiness) = set.get(socket.socket_handle()) {
                socket.mirror_readiness(readiness);
            }
        }
    }
    result
}

fn readiness_of(revents: libc::c_short) -> Readiness {
    Readiness {
        // select reports hang-up as readable (the read returns EOF)
        readable: revents & (libc::POLLIN | libc::POLLHUP) != 0,
        writable: revents & libc::POLLOUT != 0,
        errored: revents & (libc::POLLERR | libc::POLLPRI) != 0,
    }
}

fn timeout_millis(timeout_micros: u64) -> libc::c_int {
    libc::c_int::try_from(timeout_micros.div_ceil(1000)).unwrap_or(libc::c_int::MAX)
}
