//! Chunked transfer coding.
//!
//! Decoding is a byte-driven phase machine so that framing state survives
//! across receives: a chunk-size line, a chunk delimiter or the final blank
//! line may be split over any number of packets.

use super::{MAX_CHUNK_LINE, MAX_HEADER_LINE};
use crate::network::error::Error;
use core::fmt::Write;
use heapless::String;

/// The zero-size chunk and the blank line that end a chunked body.
pub const LAST_CHUNK: &[u8] = b"0\r\n\r\n";

/// Line terminator after each chunk's data.
pub const CRLF: &[u8] = b"\r\n";

/// Longest size line produced by [`size_line`]: eight hex digits plus CRLF.
pub const SIZE_LINE_MAX: usize = 10;

/// Encode a chunk-size line, lowercase hex without leading zeros.
pub fn size_line(size: u32) -> Result<String<SIZE_LINE_MAX>, Error> {
    let mut line = String::new();
    write!(line, "{:x}\r\n", size).map_err(|_| Error::BufferOverflow)?;
    Ok(line)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum SizeState {
    #[default]
    Digits,
    Extension,
    LineFeed,
}

/// Incremental parser for one chunk-size line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) struct SizeLine {
    size: u32,
    digits: usize,
    length: usize,
    state: SizeState,
}

impl SizeLine {
    /// Feed one byte; yields the chunk size once the line is complete.
    pub fn feed(&mut self, byte: u8) -> Result<Option<u32>, Error> {
        self.length += 1;
        if self.length > MAX_CHUNK_LINE {
            return Err(Error::InvalidChunk);
        }
        match self.state {
            SizeState::Digits => match byte {
                b';' | b'\r' if self.digits == 0 => Err(Error::InvalidChunk),
                b';' => {
                    self.state = SizeState::Extension;
                    Ok(None)
                }
                b'\r' => {
                    self.state = SizeState::LineFeed;
                    Ok(None)
                }
                _ => {
                    let digit = (byte as char).to_digit(16).ok_or(Error::InvalidChunk)?;
                    self.size = self
                        .size
                        .checked_mul(16)
                        .and_then(|size| size.checked_add(digit))
                        .ok_or(Error::InvalidChunk)?;
                    self.digits += 1;
                    Ok(None)
                }
            },
            SizeState::Extension => {
                if byte == b'\r' {
                    self.state = SizeState::LineFeed;
                }
                Ok(None)
            }
            SizeState::LineFeed if byte == b'\n' => Ok(Some(self.size)),
            SizeState::LineFeed => Err(Error::InvalidChunk),
        }
    }
}

/// Where the decoder stands within a chunked body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Phase {
    /// Reading a chunk-size line.
    Size(SizeLine),
    /// This many data bytes of the current chunk are still to be delivered.
    Data(u32),
    /// Expecting the CRLF that closes a chunk's data.
    DataEnd { seen_cr: bool },
    /// After the zero-size chunk: skipping trailer fields up to the blank line.
    Trailer { line: usize },
}

/// Outcome of feeding one framing byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Framing {
    /// More framing bytes are needed.
    Pending,
    /// A data chunk starts with the next byte.
    Data,
    /// The body is complete.
    End,
}

impl Default for Phase {
    fn default() -> Self {
        Phase::Size(SizeLine::default())
    }
}

impl Phase {
    /// Feed one framing byte. Must not be called in the [`Phase::Data`] phase.
    pub fn feed(&mut self, byte: u8) -> Result<Framing, Error> {
        match self {
            Phase::Size(line) => match line.feed(byte)? {
                None => Ok(Framing::Pending),
                Some(0) => {
                    debug!("http: last chunk");
                    *self = Phase::Trailer { line: 0 };
                    Ok(Framing::Pending)
                }
                Some(size) => {
                    trace!("http: chunk of {=u32} bytes", size);
                    *self = Phase::Data(size);
                    Ok(Framing::Data)
                }
            },
            Phase::Data(_) => Ok(Framing::Data),
            Phase::DataEnd { seen_cr } => match (byte, *seen_cr) {
                (b'\r', false) => {
                    *seen_cr = true;
                    Ok(Framing::Pending)
                }
                (b'\n', true) => {
                    *self = Phase::default();
                    Ok(Framing::Pending)
                }
                _ => Err(Error::InvalidChunk),
            },
            Phase::Trailer { line } => match byte {
                b'\n' if *line == 0 => Ok(Framing::End),
                b'\n' => {
                    *line = 0;
                    Ok(Framing::Pending)
                }
                b'\r' => Ok(Framing::Pending),
                _ => {
                    *line += 1;
                    if *line > MAX_HEADER_LINE {
                        return Err(Error::InvalidChunk);
                    }
                    Ok(Framing::Pending)
                }
            },
        }
    }

    /// Record that `count` data bytes were delivered.
    pub fn consume_data(&mut self, count: u32) {
        if let Phase::Data(remaining) = self {
            *remaining = remaining.saturating_sub(count);
            if *remaining == 0 {
                *self = Phase::DataEnd { seen_cr: false };
            }
        }
    }
}
