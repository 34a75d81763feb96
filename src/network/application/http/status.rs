//! HTTP status codes and the table used to recognise them.

/// A status code the client recognises.
///
/// The discriminant is the numeric code, so `code as u16` and
/// [`as_u16`](Self::as_u16) agree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u16)]
#[allow(missing_docs)]
pub enum StatusCode {
    Continue = 100,
    SwitchingProtocols = 101,

    Ok = 200,
    Created = 201,
    Accepted = 202,
    NonAuthoritativeInformation = 203,
    NoContent = 204,
    ResetContent = 205,
    PartialContent = 206,

    MultipleChoices = 300,
    MovedPermanently = 301,
    Found = 302,
    SeeOther = 303,
    NotModified = 304,
    UseProxy = 305,
    TemporaryRedirect = 307,

    BadRequest = 400,
    Unauthorized = 401,
    PaymentRequired = 402,
    Forbidden = 403,
    NotFound = 404,
    MethodNotAllowed = 405,
    NotAcceptable = 406,
    ProxyAuthenticationRequired = 407,
    RequestTimeout = 408,
    Conflict = 409,
    Gone = 410,
    LengthRequired = 411,
    PreconditionFailed = 412,
    PayloadTooLarge = 413,
    UriTooLong = 414,
    UnsupportedMediaType = 415,
    RangeNotSatisfiable = 416,
    ExpectationFailed = 417,

    InternalServerError = 500,
    NotImplemented = 501,
    BadGateway = 502,
    ServiceUnavailable = 503,
    GatewayTimeout = 504,
    HttpVersionNotSupported = 505,
}

/// Three-digit code text to [`StatusCode`], in ascending order.
pub static STATUS_MAP: [([u8; 3], StatusCode); 40] = [
    (*b"100", StatusCode::Continue),
    (*b"101", StatusCode::SwitchingProtocols),
    (*b"200", StatusCode::Ok),
    (*b"201", StatusCode::Created),
    (*b"202", StatusCode::Accepted),
    (*b"203", StatusCode::NonAuthoritativeInformation),
    (*b"204", StatusCode::NoContent),
    (*b"205", StatusCode::ResetContent),
    (*b"206", StatusCode::PartialContent),
    (*b"300", StatusCode::MultipleChoices),
    (*b"301", StatusCode::MovedPermanently),
    (*b"302", StatusCode::Found),
    (*b"303", StatusCode::SeeOther),
    (*b"304", StatusCode::NotModified),
    (*b"305", StatusCode::UseProxy),
    (*b"307", StatusCode::TemporaryRedirect),
    (*b"400", StatusCode::BadRequest),
    (*b"401", StatusCode::Unauthorized),
    (*b"402", StatusCode::PaymentRequired),
    (*b"403", StatusCode::Forbidden),
    (*b"404", StatusCode::NotFound),
    (*b"405", StatusCode::MethodNotAllowed),
    (*b"406", StatusCode::NotAcceptable),
    (*b"407", StatusCode::ProxyAuthenticationRequired),
    (*b"408", StatusCode::RequestTimeout),
    (*b"409", StatusCode::Conflict),
    (*b"410", StatusCode::Gone),
    (*b"411", StatusCode::LengthRequired),
    (*b"412", StatusCode::PreconditionFailed),
    (*b"413", StatusCode::PayloadTooLarge),
    (*b"414", StatusCode::UriTooLong),
    (*b"415", StatusCode::UnsupportedMediaType),
    (*b"416", StatusCode::RangeNotSatisfiable),
    (*b"417", StatusCode::ExpectationFailed),
    (*b"500", StatusCode::InternalServerError),
    (*b"501", StatusCode::NotImplemented),
    (*b"502", StatusCode::BadGateway),
    (*b"503", StatusCode::ServiceUnavailable),
    (*b"504", StatusCode::GatewayTimeout),
    (*b"505", StatusCode::HttpVersionNotSupported),
];

impl StatusCode {
    /// Look up the three ASCII digits of a status line.
    pub fn from_digits(digits: [u8; 3]) -> Option<Self> {
        STATUS_MAP
            .binary_search_by(|(text, _)| text.cmp(&digits))
            .ok()
            .map(|index| STATUS_MAP[index].1)
    }

    /// Numeric value of the code.
    pub fn as_u16(self) -> u16 {
        self as u16
    }

    /// Whether the code is in the 2xx class.
    pub fn is_success(self) -> bool {
        (200..300).contains(&self.as_u16())
    }
}

impl core::fmt::Display for StatusCode {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.as_u16())
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for StatusCode {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "{=u16}", self.as_u16())
    }
}
