//! Socket handles and readiness state.
//!
//! A [`SocketHandle`] names an OS socket without owning it. The
//! [`Pollable`] trait lets the multiplexer accept any socket object the
//! caller holds, and lets that object receive the polled readiness back.

use std::{
    cell::Cell,
    fmt,
    net::{TcpListener, TcpStream, UdpSocket},
    os::fd::{AsRawFd, RawFd},
};

/// Opaque identifier of an open OS socket.
///
/// Copying a handle does not duplicate the socket, and dropping it does
/// not close anything.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct SocketHandle(RawFd);

impl SocketHandle {
    /// Wraps a raw descriptor.
    pub fn from_raw(fd: RawFd) -> Self {
        Self(fd)
    }

    /// Handle of a socket the caller holds.
    pub fn of(socket: &impl AsRawFd) -> Self {
        Self(socket.as_raw_fd())
    }

    pub fn as_raw(self) -> RawFd {
        self.0
    }
}

impl fmt::Debug for SocketHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SocketHandle({})", self.0)
    }
}

/// Readiness of one socket after a poll.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Readiness {
    pub readable: bool,
    pub writable: bool,
    pub errored: bool,
}

impl Readiness {
    /// Whether any of the three conditions is set.
    pub fn is_ready(&self) -> bool {
        self.readable || self.writable || self.errored
    }
}

/// A socket object the multiplexer can poll.
pub trait Pollable {
    /// The handle to poll.
    fn socket_handle(&self) -> SocketHandle;

    /// Receives the readiness the last successful poll observed.
    ///
    /// Called only when a poll reports events. The default ignores it.
    fn mirror_readiness(&self, _readiness: Readiness) {}
}

macro_rules! impl_pollable {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Pollable for $ty {
                fn socket_handle(&self) -> SocketHandle {
                    SocketHandle::of(self)
                }
            }
        )*
    };
}

impl_pollable!(TcpStream, TcpListener, UdpSocket);
impl_pollable!(tokio::net::TcpStream, tokio::net::TcpListener, tokio::net::UdpSocket);

impl Pollable for SocketHandle {
    fn socket_handle(&self) -> SocketHandle {
        *self
    }
}

/// A socket paired with the readiness flags of its last poll.
///
/// The flags live in a `Cell`, so a `TrackedSocket` is not `Sync`: sharing
/// one across threads needs external synchronization.
#[derive(Debug)]
pub struct TrackedSocket<S> {
    socket: S,
    readiness: Cell<Readiness>,
}

impl<S: AsRawFd> TrackedSocket<S> {
    pub fn new(socket: S) -> Self {
        Self {
            socket,
            readiness: Cell::new(Readiness::default()),
        }
    }

    pub fn get_ref(&self) -> &S {
        &self.socket
    }

    pub fn get_mut(&mut self) -> &mut S {
        &mut self.socket
    }

    pub fn into_inner(self) -> S {
        self.socket
    }

    /// Readiness recorded by the last poll that reported events.
    pub fn readiness(&self) -> Readiness {
        self.readiness.get()
    }

    pub fn readable(&self) -> bool {
        self.readiness.get().readable
    }

    pub fn writable(&self) -> bool {
        self.readiness.get().writable
    }

    pub fn errored(&self) -> bool {
        self.readiness.get().errored
    }
}

impl<S: AsRawFd> Pollable for TrackedSocket<S> {
    fn socket_handle(&self) -> SocketHandle {
        SocketHandle::of(&self.socket)
    }

    fn mirror_readiness(&self, readiness: Readiness) {
        self.readiness.set(readiness);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handle_identity() {
        let socket = UdpSocket::bind("127.0.0.1:0").unwrap();
        let handle = SocketHandle::of(&socket);
        assert_eq!(handle, socket.socket_handle());
        assert_eq!(handle.as_raw(), socket.as_raw_fd());
        assert_eq!(SocketHandle::from_raw(handle.as_raw()), handle);
    }

    #[test]
    fn test_tracked_socket_mirror() {
        let tracked = TrackedSocket::new(UdpSocket::bind("127.0.0.1:0").unwrap());
        assert_eq!(tracked.readiness(), Readiness::default());

        tracked.mirror_readiness(Readiness {
            readable: true,
            writable: false,
            errored: true,
        });
        assert!(tracked.readable());
        assert!(!tracked.writable());
        assert!(tracked.errored());
        assert_eq!(tracked.socket_handle(), SocketHandle::of(tracked.get_ref()));
    }

    #[test]
    fn test_readiness_is_ready() {
        assert!(!Readiness::default().is_ready());
        assert!(Readiness {
            writable: true,
            ..Default::default()
        }
        .is_ready());
    }
}
