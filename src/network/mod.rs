//! A network abstraction layer for embedded systems
//!
//! This module defines the seams between the HTTP client and the platform:
//! a [`Transport`] trait for the underlying reliable byte stream (a TCP socket
//! on most targets), a [`SecureSession`] trait for an optional TLS layer on
//! top of it, and the pooled [`Packet`](packet::Packet) chains both of them
//! exchange with the protocol code.
//!
//! Every blocking call takes a [`Wait`] option. A call that runs out of time
//! reports a transient error ([`Error::NoPacket`], [`Error::Timeout`] or
//! [`Error::InProgress`]) and can simply be repeated.

#![deny(unsafe_code)]

use crate::network::error::Error;
use crate::network::packet::{Packet, Pool};
use core::net::IpAddr;

/// Common error types for network operations
pub mod error;

/// Pooled, chained network packets.
pub mod packet;

/// Application layer protocols.
pub mod application;

/// Re-exports of common traits
pub mod prelude {
    pub use super::packet::Pool;
    pub use super::{SecureSession, Transport};
}

/// How long a blocking call may wait.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Wait {
    /// Return immediately.
    NoWait,
    /// Wait up to the given number of milliseconds.
    Millis(u32),
    /// Wait until the operation completes.
    Forever,
}

/// Connection state reported by a [`Transport`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SocketState {
    /// No connection.
    Closed,
    /// A connect is in progress.
    Connecting,
    /// The connection is up.
    Established,
    /// A disconnect is in progress or the peer closed its side.
    Closing,
}

/// A reliable, connection-oriented transport.
///
/// Implementations move whole [`Packet`]s: `send` takes ownership of the
/// packet (it is released once transmitted or on failure) and `receive` hands
/// a freshly filled packet to the caller. Errors are reported with the
/// crate's [`Error`] so the client can return them to the application
/// unchanged.
pub trait Transport<'p> {
    /// Bind a local port, or an ephemeral one when `local_port` is `None`.
    fn bind(&mut self, local_port: Option<u16>, wait: Wait) -> Result<(), Error>;

    /// Connect to `address:port`.
    ///
    /// A non-blocking implementation may return [`Error::InProgress`].
    fn connect(&mut self, address: IpAddr, port: u16, wait: Wait) -> Result<(), Error>;

    /// Send `packet`, taking ownership of it.
    fn send(&mut self, packet: Packet<'p>, wait: Wait) -> Result<(), Error>;

    /// Receive the next packet.
    fn receive(&mut self, wait: Wait) -> Result<Packet<'p>, Error>;

    /// Close the connection.
    fn disconnect(&mut self, wait: Wait) -> Result<(), Error>;

    /// Release the local port.
    fn unbind(&mut self) -> Result<(), Error>;

    /// Current connection state.
    fn state(&self) -> SocketState;
}

/// A record layer (TLS or similar) wrapping a [`Transport`].
///
/// The session does not own the transport; every call borrows it, so the
/// plain transport stays available for teardown.
pub trait SecureSession<'p, T: Transport<'p>> {
    /// Run the handshake over an already connected transport.
    fn start(&mut self, transport: &mut T, wait: Wait) -> Result<(), Error>;

    /// Send the closing alert.
    fn end(&mut self, transport: &mut T, wait: Wait) -> Result<(), Error>;

    /// Forget all session state so the session can be started again.
    fn delete(&mut self);

    /// Encrypt and send `packet`, taking ownership of it.
    fn send(&mut self, transport: &mut T, packet: Packet<'p>, wait: Wait) -> Result<(), Error>;

    /// Receive and decrypt the next record.
    fn receive(&mut self, transport: &mut T, wait: Wait) -> Result<Packet<'p>, Error>;

    /// Allocate a packet with room reserved in front for the record header.
    fn packet_allocate(&mut self, pool: &'p dyn Pool, wait: Wait) -> Result<Packet<'p>, Error>;
}

/// Session type of clients that only speak plain HTTP.
///
/// `Plaintext` has no values, so a client using it can never hold an active
/// secure session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Plaintext {}

impl<'p, T: Transport<'p>> SecureSession<'p, T> for Plaintext {
    fn start(&mut self, _transport: &mut T, _wait: Wait) -> Result<(), Error> {
        match *self {}
    }

    fn end(&mut self, _transport: &mut T, _wait: Wait) -> Result<(), Error> {
        match *self {}
    }

    fn delete(&mut self) {
        match *self {}
    }

    fn send(&mut self, _transport: &mut T, _packet: Packet<'p>, _wait: Wait) -> Result<(), Error> {
        match *self {}
    }

    fn receive(&mut self, _transport: &mut T, _wait: Wait) -> Result<Packet<'p>, Error> {
        match *self {}
    }

    fn packet_allocate(&mut self, _pool: &'p dyn Pool, _wait: Wait) -> Result<Packet<'p>, Error> {
        match *self {}
    }
}
