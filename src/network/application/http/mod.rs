//! HTTP/1.1 protocol implementation for embedded systems.
//!
//! This module provides a streaming HTTP client designed for `no_std`
//! targets. Requests and responses travel in pooled
//! [`Packet`](crate::network::packet::Packet) chains, so the memory the
//! client uses is fixed by the pool the application hands it.
//!
//! # Features
//!
//! - GET, PUT, POST, HEAD and DELETE over plain or secure transports
//! - Content-Length and chunked response bodies, delivered packet by packet
//! - Chunked request bodies
//! - Basic authentication
//! - Persistent connections (the `keep-alive` feature, on by default)
//! - A per-header callback for application-defined response headers
//!
//! # Usage
//!
//! A request is started with one of the `*_start` calls, after which the
//! application polls [`Client::response_body_get`] until it returns
//! [`Body::Done`]. PUT and POST bodies are sent with [`Client::put_packet`]
//! or [`Client::request_packet_send`] before polling for the response.
//!
//! ```rust,ignore
//! let mut client = Client::new("sensor", transport, &pool, Config::default())?;
//! client.get_start(server, 80, "/status", "example.com", None, Wait::Millis(1000))?;
//! loop {
//!     match client.response_body_get(Wait::Millis(1000))? {
//!         Body::More(packet) => consume(&packet),
//!         Body::Done(last) => {
//!             if let Some(packet) = last {
//!                 consume(&packet);
//!             }
//!             break;
//!         }
//!     }
//! }
//! ```

mod chunked;
mod client;
mod config;
mod header;
mod request;
mod status;

pub use chunked::{CRLF, LAST_CHUNK, SIZE_LINE_MAX, size_line};
pub use client::Client;
pub use config::Config;
pub use request::content_type;
pub use status::{STATUS_MAP, StatusCode};

use crate::network::packet::Packet;

/// Longest username accepted for basic authentication.
pub const MAX_USERNAME: usize = 20;
/// Longest password accepted for basic authentication.
pub const MAX_PASSWORD: usize = 20;
/// Longest response header line the parser accepts.
pub const MAX_HEADER_LINE: usize = 512;
/// Longest chunk-size line, including any extension.
pub const MAX_CHUNK_LINE: usize = 64;
/// Default smallest pool payload size a client accepts.
pub const MIN_PACKET_SIZE: u16 = 600;
/// Shortest response that can hold a status line (`HTTP/1.1 200`).
pub const MIN_STATUS_LINE: usize = 12;
/// Default wait for disconnects the client performs on its own.
pub const DEFAULT_TEARDOWN_TIMEOUT_MS: u32 = 1000;

/// Request methods.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Method {
    /// GET
    Get,
    /// PUT
    Put,
    /// POST
    Post,
    /// HEAD
    Head,
    /// DELETE
    Delete,
}

impl Method {
    /// Method token as sent on the request line.
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Put => "PUT",
            Method::Post => "POST",
            Method::Head => "HEAD",
            Method::Delete => "DELETE",
        }
    }

    /// Whether requests with this method carry a body.
    pub fn has_body(&self) -> bool {
        matches!(self, Method::Put | Method::Post)
    }
}

/// Client state. `Ready` between requests, otherwise the method in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum State {
    /// No request in flight.
    Ready,
    /// GET in flight.
    Get,
    /// PUT in flight.
    Put,
    /// POST in flight.
    Post,
    /// HEAD in flight.
    Head,
    /// DELETE in flight.
    Delete,
}

impl State {
    /// Whether a request is in flight.
    pub fn is_transfer(&self) -> bool {
        !matches!(self, State::Ready)
    }

    /// Method in flight, if any.
    pub fn method(&self) -> Option<Method> {
        match self {
            State::Ready => None,
            State::Get => Some(Method::Get),
            State::Put => Some(Method::Put),
            State::Post => Some(Method::Post),
            State::Head => Some(Method::Head),
            State::Delete => Some(Method::Delete),
        }
    }
}

impl From<Method> for State {
    fn from(method: Method) -> Self {
        match method {
            Method::Get => State::Get,
            Method::Put => State::Put,
            Method::Post => State::Post,
            Method::Head => State::Head,
            Method::Delete => State::Delete,
        }
    }
}

/// Basic-auth credentials.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Credentials<'a> {
    /// At most [`MAX_USERNAME`] bytes.
    pub username: &'a str,
    /// At most [`MAX_PASSWORD`] bytes.
    pub password: &'a str,
}

/// Size of a PUT or POST body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BodyLength {
    /// Exactly this many bytes, announced with `Content-Length`.
    Fixed(usize),
    /// Unknown up front, sent with `Transfer-Encoding: chunked`.
    Chunked,
}

/// One step of a response body.
#[derive(Debug)]
pub enum Body<'p> {
    /// Body data; more follows.
    More(Packet<'p>),
    /// The response is complete. Carries the last data, if any arrived with the end.
    Done(Option<Packet<'p>>),
}

impl<'p> Body<'p> {
    /// Whether this is the final step.
    pub fn is_done(&self) -> bool {
        matches!(self, Body::Done(_))
    }

    /// The data carried by this step.
    pub fn into_packet(self) -> Option<Packet<'p>> {
        match self {
            Body::More(packet) => Some(packet),
            Body::Done(packet) => packet,
        }
    }
}

/// Called once per response header line with the field name and value.
///
/// Only invoked for 2xx responses. Neither slice is NUL-terminated and both
/// are only valid for the duration of the call.
pub type HeaderCallback = fn(name: &[u8], value: &[u8]);
