//! Request header assembly.

use super::{Credentials, MAX_PASSWORD, MAX_USERNAME, Method};
use crate::network::error::Error;
use crate::network::packet::Packet;
use base64ct::{Base64, Encoding};
use core::fmt::Write;
use heapless::{String, Vec};

/// Room for `user:pass` at the longest accepted credentials.
const PLAIN_CREDENTIALS: usize = MAX_USERNAME + 1 + MAX_PASSWORD;

/// Base64 output size for [`PLAIN_CREDENTIALS`] bytes.
const ENCODED_CREDENTIALS: usize = PLAIN_CREDENTIALS.div_ceil(3) * 4;

/// Reject credentials that do not fit the encoding buffers.
pub(crate) fn check_credentials(credentials: &Credentials<'_>) -> Result<(), Error> {
    if credentials.username.len() > MAX_USERNAME {
        return Err(Error::UsernameTooLong);
    }
    if credentials.password.len() > MAX_PASSWORD {
        return Err(Error::PasswordTooLong);
    }
    Ok(())
}

/// Whether the request target needs a `/` in front of it.
pub(crate) fn needs_leading_slash(resource: &str) -> bool {
    !(resource.starts_with('/') || resource.starts_with("http://") || resource.starts_with("https://"))
}

/// MIME type guessed from the resource's extension.
///
/// Only the first three characters of the extension are compared, ignoring
/// case, so `.htm` and `.html` both map to `text/html`.
pub fn content_type(resource: &str) -> &'static str {
    let Some(dot) = resource.rfind('.') else {
        return "text/plain";
    };
    let extension = resource[dot + 1..].as_bytes();
    let Some(prefix) = extension.get(..3) else {
        return "text/plain";
    };
    if prefix.eq_ignore_ascii_case(b"htm") {
        "text/html"
    } else if prefix.eq_ignore_ascii_case(b"gif") {
        "image/gif"
    } else if prefix.eq_ignore_ascii_case(b"xbm") {
        "image/x-xbitmap"
    } else {
        "text/plain"
    }
}

/// Append `name: value\r\n`.
pub(crate) fn append_header(packet: &mut Packet<'_>, name: &[u8], value: &[u8]) -> Result<(), Error> {
    packet.append(name)?;
    packet.append(b": ")?;
    packet.append(value)?;
    packet.append(b"\r\n")
}

/// Append `METHOD target HTTP/1.1\r\n`.
pub(crate) fn append_request_line(packet: &mut Packet<'_>, method: Method, resource: &str) -> Result<(), Error> {
    packet.append(method.as_str().as_bytes())?;
    packet.append(b" ")?;
    if needs_leading_slash(resource) {
        packet.append(b"/")?;
    }
    packet.append(resource.as_bytes())?;
    packet.append(b" HTTP/1.1\r\n")
}

/// Append `Authorization: Basic base64(user:pass)\r\n`.
pub(crate) fn append_authorization(packet: &mut Packet<'_>, credentials: &Credentials<'_>) -> Result<(), Error> {
    check_credentials(credentials)?;
    let mut plain: Vec<u8, PLAIN_CREDENTIALS> = Vec::new();
    plain
        .extend_from_slice(credentials.username.as_bytes())
        .map_err(|_| Error::BufferOverflow)?;
    plain.push(b':').map_err(|_| Error::BufferOverflow)?;
    plain
        .extend_from_slice(credentials.password.as_bytes())
        .map_err(|_| Error::BufferOverflow)?;

    let mut encoded = [0u8; ENCODED_CREDENTIALS];
    let encoded = Base64::encode(&plain, &mut encoded).map_err(|_| Error::BufferOverflow)?;

    packet.append(b"Authorization: Basic ")?;
    packet.append(encoded.as_bytes())?;
    packet.append(b"\r\n")
}

/// Append `Content-Length: n\r\n`.
pub(crate) fn append_content_length(packet: &mut Packet<'_>, length: usize) -> Result<(), Error> {
    let mut digits: String<20> = String::new();
    write!(digits, "{}", length).map_err(|_| Error::BufferOverflow)?;
    append_header(packet, b"Content-Length", digits.as_bytes())
}
