//! Common error types for network operations

use crate::network::application::http::StatusCode;

/// A common error type for network operations.
///
/// This enum carries every failure the transport, the packet pool and the
/// HTTP client can report. It is designed to be simple and portable for
/// `no_std` environments: it is `Copy`, carries no heap data, and transport
/// implementations return it verbatim so the client can pass their codes
/// straight through to the application.
///
/// A completed response body is *not* an error; see
/// [`Body::Done`](crate::network::application::http::Body::Done).
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Error {
    // Argument errors, reported before any I/O takes place.
    /// A parameter was empty, zero where a size is required, or otherwise invalid.
    InvalidParameter,
    /// The client is not in a state that allows the operation.
    NotReady,
    /// The username does not fit the basic-auth scratch buffer.
    UsernameTooLong,
    /// The password does not fit the basic-auth scratch buffer.
    PasswordTooLong,
    /// Data does not fit the space left in a buffer.
    BufferOverflow,
    /// The operation needs a feature that was not configured (e.g. no secure session).
    NotEnabled,
    /// The packet pool cannot carry the client (payload size too small).
    PoolError,

    // Transport errors, propagated unchanged from the transport or secure session.
    /// The socket is already bound to a local port.
    AlreadyBound,
    /// The socket is not bound.
    NotBound,
    /// A non-blocking connect has started but not completed yet.
    InProgress,
    /// The socket is not connected.
    NotConnected,
    /// A connection attempt was refused.
    ConnectionRefused,
    /// The connection was closed by the peer.
    ConnectionClosed,
    /// A timeout occurred.
    Timeout,
    /// No data arrived within the wait option.
    NoPacket,
    /// An error occurred during a write operation.
    WriteError,
    /// An error occurred during a read operation.
    ReadError,
    /// An invalid address was provided.
    InvalidAddress,
    /// The secure session failed to start, encrypt or decrypt.
    SecureSession,

    // Resource exhaustion.
    /// The packet pool has no free buffers.
    PoolExhausted,

    // Framing errors, always fatal to the current request.
    /// The response does not start with a usable status line.
    InvalidPacket,
    /// A packet length does not fit the content-length window.
    BadPacketLength,
    /// A chunk-size line or chunk delimiter is malformed.
    InvalidChunk,
    /// A response header line exceeds the parser's line buffer.
    HeaderTooLarge,
    /// The status code is not one the client knows.
    UnsuccessfulCode,
    /// The server answered before the request body was complete.
    IncompleteTransfer,
    /// The server rejected the credentials before the request body was complete.
    AuthenticationError,

    // Protocol-level server errors.
    /// The server answered with a non-2xx status.
    Status(StatusCode),
}

impl Error {
    /// Whether the error only reports an expired wait option.
    ///
    /// Transient errors leave the client state untouched; the caller can
    /// repeat the same call later.
    pub fn is_transient(&self) -> bool {
        matches!(self, Error::NoPacket | Error::Timeout | Error::InProgress)
    }

    /// Whether the error is a framing error, which always ends the request.
    pub fn is_framing(&self) -> bool {
        matches!(
            self,
            Error::InvalidPacket
                | Error::BadPacketLength
                | Error::InvalidChunk
                | Error::HeaderTooLarge
                | Error::UnsuccessfulCode
                | Error::IncompleteTransfer
                | Error::AuthenticationError
        )
    }

    fn as_str(&self) -> &'static str {
        match self {
            Error::InvalidParameter => "invalid parameter",
            Error::NotReady => "client not ready",
            Error::UsernameTooLong => "username too long",
            Error::PasswordTooLong => "password too long",
            Error::BufferOverflow => "buffer overflow",
            Error::NotEnabled => "feature not enabled",
            Error::PoolError => "packet pool payload too small",
            Error::AlreadyBound => "socket already bound",
            Error::NotBound => "socket not bound",
            Error::InProgress => "connect in progress",
            Error::NotConnected => "socket not connected",
            Error::ConnectionRefused => "connection refused",
            Error::ConnectionClosed => "connection closed",
            Error::Timeout => "timeout",
            Error::NoPacket => "no packet received",
            Error::WriteError => "write error",
            Error::ReadError => "read error",
            Error::InvalidAddress => "invalid address",
            Error::SecureSession => "secure session error",
            Error::PoolExhausted => "packet pool exhausted",
            Error::InvalidPacket => "invalid response packet",
            Error::BadPacketLength => "bad packet length",
            Error::InvalidChunk => "invalid chunk",
            Error::HeaderTooLarge => "response header line too large",
            Error::UnsuccessfulCode => "unrecognized status code",
            Error::IncompleteTransfer => "server responded before the body was complete",
            Error::AuthenticationError => "authentication error",
            Error::Status(_) => "server error status",
        }
    }
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Error::Status(code) => write!(f, "server error status {}", code.as_u16()),
            other => f.write_str(other.as_str()),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

#[cfg(feature = "defmt")]
impl defmt::Format for Error {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Error::Status(code) => defmt::write!(f, "Status({})", code.as_u16()),
            other => defmt::write!(f, "{=str}", other.as_str()),
        }
    }
}
