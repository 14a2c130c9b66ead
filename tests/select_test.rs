//! Readiness polling tests over real loopback sockets.
#![cfg(unix)]

use hostnet::socket::{poll, poll_sockets, Pollable, PollResult, SocketHandle, TrackedSocket};
use std::io::Write;
use std::net::{TcpListener, TcpStream, UdpSocket};
use std::time::{Duration, Instant};

#[test]
fn test_idle_listener_times_out_immediately() {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();

    let start = Instant::now();
    let result = poll(&[SocketHandle::of(&listener)], 0);
    assert_eq!(result, PollResult::Timeout);
    assert!(start.elapsed() < Duration::from_millis(500));
}

#[test]
fn test_bounded_wait_elapses() {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();

    let start = Instant::now();
    let result = poll(&[SocketHandle::of(&listener)], 20_000);
    assert!(result.is_timeout());
    assert!(start.elapsed() >= Duration::from_millis(15));
}

#[test]
fn test_pending_datagram_is_readable_and_mirrored() {
    let receiver = TrackedSocket::new(UdpSocket::bind("127.0.0.1:0").unwrap());
    let sender = UdpSocket::bind("127.0.0.1:0").unwrap();
    sender
        .send_to(b"ping", receiver.get_ref().local_addr().unwrap())
        .unwrap();

    let result = poll_sockets(&[&receiver], 1_000_000);
    let set = result.events().expect("events");
    let readiness = set.get(receiver.socket_handle()).unwrap();

    assert!(readiness.readable);
    assert!(!readiness.errored);
    assert_eq!(receiver.readiness(), readiness);
    assert!(receiver.readable());
}

#[test]
fn test_mirroring_skipped_on_timeout() {
    let listener = TrackedSocket::new(TcpListener::bind("127.0.0.1:0").unwrap());
    let result = poll_sockets(&[&listener], 0);

    assert!(result.is_timeout());
    assert!(!listener.readable());
    assert!(!listener.writable());
}

#[test]
fn test_every_handle_reported() {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    let mut client = TcpStream::connect(addr).unwrap();
    client.write_all(b"hello").unwrap();
    let (server, _) = listener.accept().unwrap();
    // Block until the bytes have landed
    server.peek(&mut [0u8; 1]).unwrap();

    let idle = TcpListener::bind("127.0.0.1:0").unwrap();
    let handles = [
        SocketHandle::of(&idle),
        SocketHandle::of(&server),
        SocketHandle::of(&client),
        SocketHandle::of(&server),
    ];

    let result = poll(&handles, 0);
    let set = result.events().expect("events");

    // Duplicate collapsed, input order kept
    assert_eq!(set.len(), 3);
    let order: Vec<SocketHandle> = set.iter().map(|(h, _)| h).collect();
    assert_eq!(order, handles[..3].to_vec());

    assert!(!set.get(SocketHandle::of(&idle)).unwrap().is_ready());
    assert!(set.get(SocketHandle::of(&server)).unwrap().readable);
    assert!(set.get(SocketHandle::of(&client)).unwrap().writable);
}

#[test]
fn test_peer_hangup_is_readable() {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let client = TcpStream::connect(listener.local_addr().unwrap()).unwrap();
    let (server, _) = listener.accept().unwrap();
    drop(client);

    let result = poll(&[SocketHandle::of(&server)], 1_000_000);
    let readiness = result.events().unwrap().get(SocketHandle::of(&server)).unwrap();
    assert!(readiness.readable);
}

#[test]
fn test_invalid_handle_is_poll_error() {
    let result = poll(&[SocketHandle::from_raw(-1)], 0);
    assert_eq!(result, PollResult::PollError(libc::EBADF));
}
