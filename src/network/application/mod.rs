//! # Application Layer Network Protocols
//!
//! Protocol engines built on the [`Transport`](crate::network::Transport)
//! and [`SecureSession`](crate::network::SecureSession) traits. They never
//! allocate on the heap: all payload bytes live in
//! [`Packet`](crate::network::packet::Packet) chains drawn from a pool
//! supplied by the application.

/// HTTP/1.1 client implementation.
///
/// Provides a streaming HTTP/1.1 client suitable for embedded systems,
/// supporting GET, PUT, POST, HEAD and DELETE, chunked transfer encoding and
/// persistent connections.
pub mod http;
