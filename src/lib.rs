//! # libiot-web - HTTP client engine for IoT devices
//!
//! A streaming HTTP/1.1 client for embedded systems. It runs over any
//! reliable transport the firmware provides (and optionally a TLS session on
//! top of it), keeps every byte in a fixed pool of chained packet buffers and
//! supports `no_std` environments.
//!
//! ## Features
//!
//! ### HTTP Client
//! - GET, PUT, POST, HEAD and DELETE requests, plain or secure
//! - Content-Length and chunked transfer encoding, in both directions
//! - Persistent (keep-alive) connections
//! - Basic authentication and custom request headers
//! - Response header callbacks
//!
//! ### Packet Pool
//! - Fixed arena of equally sized buffers, no heap
//! - Chained packets with zero-copy split and append
//!
//! ## Usage
//!
//! Add this to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! libiot-web = "0.1.0"
//! ```
//!
//! ### Basic HTTP Client Example
//!
//! ```rust,no_run
//! use core::net::{IpAddr, Ipv4Addr};
//! use libiot_web::network::application::http::{Body, Client, Config};
//! use libiot_web::network::packet::{Packet, PacketPool};
//! use libiot_web::network::{SocketState, Transport, Wait};
//! # use libiot_web::network::error::Error;
//! # struct Socket;
//! # impl<'p> Transport<'p> for Socket {
//! #     fn bind(&mut self, _: Option<u16>, _: Wait) -> Result<(), Error> { Ok(()) }
//! #     fn connect(&mut self, _: IpAddr, _: u16, _: Wait) -> Result<(), Error> { Ok(()) }
//! #     fn send(&mut self, _: Packet<'p>, _: Wait) -> Result<(), Error> { Ok(()) }
//! #     fn receive(&mut self, _: Wait) -> Result<Packet<'p>, Error> { Err(Error::NoPacket) }
//! #     fn disconnect(&mut self, _: Wait) -> Result<(), Error> { Ok(()) }
//! #     fn unbind(&mut self) -> Result<(), Error> { Ok(()) }
//! #     fn state(&self) -> SocketState { SocketState::Established }
//! # }
//!
//! # fn run() -> Result<(), Error> {
//! let pool: PacketPool<8, 1536> = PacketPool::new();
//! let server = IpAddr::V4(Ipv4Addr::new(192, 168, 1, 10));
//! let mut client: Client<'_, Socket> = Client::new("sensor", Socket, &pool, Config::default())?;
//!
//! client.get_start(server, 80, "/status", "192.168.1.10", None, Wait::Millis(1000))?;
//! loop {
//!     match client.response_body_get(Wait::Millis(1000))? {
//!         Body::More(_packet) => { /* consume the data */ }
//!         Body::Done(_) => break,
//!     }
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Platform Support
//!
//! This library is designed to work on:
//! - Embedded microcontrollers (ARM Cortex-M, RISC-V, etc.)
//! - Linux-based IoT devices (Raspberry Pi, etc.)
//! - Any platform supporting Rust's `core` library
//!
//! ## Optional Features
//!
//! - `std`: Enable standard library support (default: disabled)
//! - `defmt`: Enable defmt logging support for embedded debugging
//! - `keep-alive`: Persistent connection support (default: enabled)

#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![doc(html_root_url = "https://shishir-dey.github.io/libiot/")]

#[macro_use]
mod fmt;

/// Network abstraction layer: transports, packet pools and the HTTP client.
///
/// This module contains the traits the firmware implements for its network
/// stack and the protocol engine built on top of them.
pub mod network;
