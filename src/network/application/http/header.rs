//! Response status line and header parsing.
//!
//! The parser works directly on the received [`Packet`] chain. It never
//! copies the whole header block; each header line is staged in a bounded
//! line buffer of [`MAX_HEADER_LINE`] bytes while it is examined.

use super::status::StatusCode;
use super::{HeaderCallback, MAX_HEADER_LINE, MIN_STATUS_LINE};
use crate::network::error::Error;
use crate::network::packet::Packet;
use heapless::Vec;

/// Everything the client needs to know about a response head.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ResponseHead {
    pub status: StatusCode,
    /// Offset of the first body byte within the received chain.
    pub body_offset: usize,
    /// Declared `Content-Length`, 0 when absent or malformed.
    pub content_length: usize,
    pub chunked: bool,
    pub keep_alive: bool,
}

/// Offset of the `\r\n\r\n` that ends the header block, if it has arrived.
pub(crate) fn header_end(packet: &Packet<'_>) -> Option<usize> {
    packet.find(b"\r\n\r\n")
}

/// Read the status code from the fixed offsets of the status line.
///
/// Also reports whether the protocol version defaults to persistent
/// connections (HTTP/1.1 and later).
pub(crate) fn parse_status(packet: &Packet<'_>) -> Result<(StatusCode, bool), Error> {
    if packet.len() < MIN_STATUS_LINE {
        return Err(Error::InvalidPacket);
    }
    match packet.find(b"\r\n") {
        Some(end) if end >= MIN_STATUS_LINE => {}
        _ => return Err(Error::InvalidPacket),
    }
    let mut line = [0u8; MIN_STATUS_LINE];
    packet.copy_to(0, &mut line);
    if !line.starts_with(b"HTTP/") {
        return Err(Error::InvalidPacket);
    }

    // "HTTP/1.1 200"
    //  0123456789..
    let major = line[5];
    let minor = line[7];
    let persistent = major > b'1' || (major == b'1' && minor >= b'1');

    let status = StatusCode::from_digits([line[9], line[10], line[11]]).ok_or(Error::UnsuccessfulCode)?;
    Ok((status, persistent))
}

/// Parse the head of a response whose header block ends at `end`.
///
/// `end` is the offset returned by [`header_end`]. The callback, if any, is
/// invoked once per header line for 2xx responses only.
pub(crate) fn parse_head(
    packet: &Packet<'_>,
    end: usize,
    callback: Option<HeaderCallback>,
) -> Result<ResponseHead, Error> {
    let (status, persistent) = parse_status(packet)?;
    let mut head = ResponseHead {
        status,
        body_offset: end + 4,
        content_length: 0,
        chunked: false,
        keep_alive: cfg!(feature = "keep-alive") && persistent,
    };
    let callback = callback.filter(|_| status.is_success());

    let mut line: Vec<u8, MAX_HEADER_LINE> = Vec::new();
    let mut in_status_line = true;
    for byte in packet.bytes().take(end + 2) {
        if byte == b'\n' {
            if in_status_line {
                in_status_line = false;
            } else {
                head.apply(strip_cr(&line), callback);
            }
            line.clear();
        } else if !in_status_line {
            line.push(byte).map_err(|_| Error::HeaderTooLarge)?;
        }
    }
    Ok(head)
}

impl ResponseHead {
    fn apply(&mut self, line: &[u8], callback: Option<HeaderCallback>) {
        let Some(colon) = line.iter().position(|&b| b == b':') else {
            return;
        };
        let name = line[..colon].trim_ascii();
        let value = line[colon + 1..].trim_ascii();

        if name.eq_ignore_ascii_case(b"Content-Length") {
            self.content_length = parse_decimal(value).unwrap_or(0);
        } else if name.eq_ignore_ascii_case(b"Transfer-Encoding") {
            self.chunked = value.eq_ignore_ascii_case(b"chunked");
        } else if cfg!(feature = "keep-alive") && name.eq_ignore_ascii_case(b"Connection") {
            if value.eq_ignore_ascii_case(b"keep-alive") {
                self.keep_alive = true;
            } else if value.eq_ignore_ascii_case(b"close") {
                self.keep_alive = false;
            }
        }

        if let Some(callback) = callback {
            callback(name, value);
        }
    }
}

fn strip_cr(line: &[u8]) -> &[u8] {
    line.strip_suffix(b"\r").unwrap_or(line)
}

fn parse_decimal(text: &[u8]) -> Option<usize> {
    if text.is_empty() {
        return None;
    }
    text.iter().try_fold(0usize, |acc, &b| {
        if !b.is_ascii_digit() {
            return None;
        }
        acc.checked_mul(10)?.checked_add((b - b'0') as usize)
    })
}
