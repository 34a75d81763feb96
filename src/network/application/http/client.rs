use super::chunked::{self, Framing, Phase};
use super::header;
use super::request;
use super::{Body, BodyLength, Config, Credentials, HeaderCallback, Method, State};
use crate::network::error::Error;
use crate::network::packet::{Packet, Pool};
use crate::network::{Plaintext, SecureSession, SocketState, Transport, Wait};
use core::net::IpAddr;

/// A streaming HTTP/1.1 client bound to one transport.
///
/// The client runs one request at a time. A request starts with one of the
/// `*_start` calls (or the low-level `request_*` sequence), optionally sends
/// a body with [`put_packet`](Self::put_packet) /
/// [`request_packet_send`](Self::request_packet_send), and is then driven by
/// [`response_body_get`](Self::response_body_get) until it yields
/// [`Body::Done`]. On completion or on any fatal error the client is back in
/// [`State::Ready`].
///
/// `S` is the secure session used by the `*_secure_*` calls; clients that
/// only speak plain HTTP keep the default [`Plaintext`].
pub struct Client<'p, T, S = Plaintext> {
    name: &'static str,
    config: Config,
    transport: T,
    pool: &'p dyn Pool,
    state: State,
    method: Option<Method>,
    server: Option<(IpAddr, u16)>,
    secure: Option<S>,
    secure_active: bool,
    connect_pending: bool,

    total_transfer_bytes: usize,
    actual_bytes_transferred: usize,
    total_receive_bytes: usize,
    actual_bytes_received: usize,

    keep_alive: bool,
    response_header_received: bool,
    request_chunked: bool,
    response_chunked: bool,
    chunk: Phase,

    request: Option<Packet<'p>>,
    response: Option<Packet<'p>>,
    header_callback: Option<HeaderCallback>,
}

impl<'p, T, S> Client<'p, T, S>
where
    T: Transport<'p>,
    S: SecureSession<'p, T>,
{
    /// Create a client over `transport`, drawing packets from `pool`.
    ///
    /// Fails with [`Error::PoolError`] when the pool's payload size is below
    /// `config.min_packet_size`.
    pub fn new(name: &'static str, transport: T, pool: &'p dyn Pool, config: Config) -> Result<Self, Error> {
        if pool.payload_size() < config.min_packet_size as usize {
            warn!("http: pool payload {=usize} below minimum", pool.payload_size());
            return Err(Error::PoolError);
        }
        info!("http: client {=str} created", name);
        Ok(Self {
            name,
            config,
            transport,
            pool,
            state: State::Ready,
            method: None,
            server: None,
            secure: None,
            secure_active: false,
            connect_pending: false,
            total_transfer_bytes: 0,
            actual_bytes_transferred: 0,
            total_receive_bytes: 0,
            actual_bytes_received: 0,
            keep_alive: false,
            response_header_received: false,
            request_chunked: false,
            response_chunked: false,
            chunk: Phase::default(),
            request: None,
            response: None,
            header_callback: None,
        })
    }

    /// Attach the secure session used by the `*_secure_*` calls.
    pub fn with_secure_session(mut self, session: S) -> Self {
        self.secure = Some(session);
        self
    }

    /// Tear the client down and hand the transport back.
    ///
    /// Held packets are released, an active secure session is ended and
    /// deleted, and the socket is disconnected and unbound.
    pub fn delete(mut self) -> T {
        self.reset();
        self.teardown();
        info!("http: client {=str} deleted", self.name);
        let Self { transport, .. } = self;
        transport
    }

    /// Client name given at creation.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Configuration in effect.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Current state.
    pub fn state(&self) -> State {
        self.state
    }

    /// The underlying transport.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// The underlying transport, mutably.
    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    /// Whether the connection will be kept open after the current response.
    pub fn keep_alive(&self) -> bool {
        self.keep_alive
    }

    /// `Content-Length` of the current response, 0 if none was announced.
    pub fn content_length(&self) -> usize {
        self.total_receive_bytes
    }

    /// Register a callback invoked for every header line of 2xx responses.
    pub fn response_header_callback_set(&mut self, callback: HeaderCallback) {
        self.header_callback = Some(callback);
    }

    /// Connect to `address:port` over the plain transport.
    ///
    /// An open keep-alive connection to the same server is reused; any stray
    /// data still queued on it is discarded. Otherwise the socket is closed if
    /// needed, bound and connected. Transport errors are returned unchanged,
    /// including [`Error::InProgress`] from a non-blocking connect; calling
    /// `connect` again with the same target picks the pending connect up.
    pub fn connect(&mut self, address: IpAddr, port: u16, wait: Wait) -> Result<(), Error> {
        self.open(address, port, false, wait)
    }

    /// Connect to `address:port` and start the secure session.
    pub fn secure_connect(&mut self, address: IpAddr, port: u16, wait: Wait) -> Result<(), Error> {
        if self.secure.is_none() {
            return Err(Error::NotEnabled);
        }
        self.open(address, port, true, wait)
    }

    /// Start a GET request.
    pub fn get_start(
        &mut self,
        address: IpAddr,
        port: u16,
        resource: &str,
        host: &str,
        credentials: Option<Credentials<'_>>,
        wait: Wait,
    ) -> Result<(), Error> {
        self.start(Method::Get, false, (address, port), resource, host, credentials, None, wait)
    }

    /// Start a PUT request whose body is sent afterwards.
    #[allow(clippy::too_many_arguments)]
    pub fn put_start(
        &mut self,
        address: IpAddr,
        port: u16,
        resource: &str,
        host: &str,
        credentials: Option<Credentials<'_>>,
        body: BodyLength,
        wait: Wait,
    ) -> Result<(), Error> {
        self.start(Method::Put, false, (address, port), resource, host, credentials, Some(body), wait)
    }

    /// Start a POST request whose body is sent afterwards.
    #[allow(clippy::too_many_arguments)]
    pub fn post_start(
        &mut self,
        address: IpAddr,
        port: u16,
        resource: &str,
        host: &str,
        credentials: Option<Credentials<'_>>,
        body: BodyLength,
        wait: Wait,
    ) -> Result<(), Error> {
        self.start(Method::Post, false, (address, port), resource, host, credentials, Some(body), wait)
    }

    /// Start a HEAD request.
    pub fn head_start(
        &mut self,
        address: IpAddr,
        port: u16,
        resource: &str,
        host: &str,
        credentials: Option<Credentials<'_>>,
        wait: Wait,
    ) -> Result<(), Error> {
        self.start(Method::Head, false, (address, port), resource, host, credentials, None, wait)
    }

    /// Start a DELETE request.
    pub fn delete_start(
        &mut self,
        address: IpAddr,
        port: u16,
        resource: &str,
        host: &str,
        credentials: Option<Credentials<'_>>,
        wait: Wait,
    ) -> Result<(), Error> {
        self.start(Method::Delete, false, (address, port), resource, host, credentials, None, wait)
    }

    /// Start a GET request over the secure session.
    pub fn get_secure_start(
        &mut self,
        address: IpAddr,
        port: u16,
        resource: &str,
        host: &str,
        credentials: Option<Credentials<'_>>,
        wait: Wait,
    ) -> Result<(), Error> {
        self.start(Method::Get, true, (address, port), resource, host, credentials, None, wait)
    }

    /// Start a PUT request over the secure session.
    #[allow(clippy::too_many_arguments)]
    pub fn put_secure_start(
        &mut self,
        address: IpAddr,
        port: u16,
        resource: &str,
        host: &str,
        credentials: Option<Credentials<'_>>,
        body: BodyLength,
        wait: Wait,
    ) -> Result<(), Error> {
        self.start(Method::Put, true, (address, port), resource, host, credentials, Some(body), wait)
    }

    /// Start a POST request over the secure session.
    #[allow(clippy::too_many_arguments)]
    pub fn post_secure_start(
        &mut self,
        address: IpAddr,
        port: u16,
        resource: &str,
        host: &str,
        credentials: Option<Credentials<'_>>,
        body: BodyLength,
        wait: Wait,
    ) -> Result<(), Error> {
        self.start(Method::Post, true, (address, port), resource, host, credentials, Some(body), wait)
    }

    /// Start a HEAD request over the secure session.
    pub fn head_secure_start(
        &mut self,
        address: IpAddr,
        port: u16,
        resource: &str,
        host: &str,
        credentials: Option<Credentials<'_>>,
        wait: Wait,
    ) -> Result<(), Error> {
        self.start(Method::Head, true, (address, port), resource, host, credentials, None, wait)
    }

    /// Start a DELETE request over the secure session.
    pub fn delete_secure_start(
        &mut self,
        address: IpAddr,
        port: u16,
        resource: &str,
        host: &str,
        credentials: Option<Credentials<'_>>,
        wait: Wait,
    ) -> Result<(), Error> {
        self.start(Method::Delete, true, (address, port), resource, host, credentials, None, wait)
    }

    /// Build the request head for `method` into a held packet.
    ///
    /// Writes the request line, `Host`, `Authorization` when credentials are
    /// given, and for PUT/POST `Content-Type` plus either `Content-Length` or
    /// `Transfer-Encoding: chunked`. More headers can be added with
    /// [`request_header_add`](Self::request_header_add) before
    /// [`request_send`](Self::request_send). The client must be connected.
    pub fn request_initialize(
        &mut self,
        method: Method,
        resource: &str,
        host: &str,
        credentials: Option<Credentials<'_>>,
        body: Option<BodyLength>,
        wait: Wait,
    ) -> Result<(), Error> {
        let body = validate(method, resource, host, credentials.as_ref(), body)?;
        if self.state.is_transfer() {
            return Err(Error::NotReady);
        }
        self.request = None;

        let mut packet = self.request_packet_allocate(wait)?;
        request::append_request_line(&mut packet, method, resource)?;
        request::append_header(&mut packet, b"Host", host.as_bytes())?;
        if let Some(credentials) = credentials.as_ref() {
            request::append_authorization(&mut packet, credentials)?;
        }
        if let Some(body) = body {
            request::append_header(&mut packet, b"Content-Type", request::content_type(resource).as_bytes())?;
            match body {
                BodyLength::Fixed(length) => request::append_content_length(&mut packet, length)?,
                BodyLength::Chunked => request::append_header(&mut packet, b"Transfer-Encoding", b"chunked")?,
            }
        }

        self.method = Some(method);
        self.request_chunked = body == Some(BodyLength::Chunked);
        self.total_transfer_bytes = match body {
            Some(BodyLength::Fixed(length)) => length,
            _ => 0,
        };
        self.actual_bytes_transferred = 0;
        self.request = Some(packet);
        Ok(())
    }

    /// Append a `name: value` header to the request being built.
    pub fn request_header_add(&mut self, name: &str, value: &str, _wait: Wait) -> Result<(), Error> {
        if name.is_empty() {
            return Err(Error::InvalidParameter);
        }
        let packet = self.request.as_mut().ok_or(Error::NotReady)?;
        request::append_header(packet, name.as_bytes(), value.as_bytes())
    }

    /// Terminate the header block and send the request.
    ///
    /// On success the client enters the state of the request's method. A
    /// send failure tears the connection down and returns to
    /// [`State::Ready`].
    pub fn request_send(&mut self, wait: Wait) -> Result<(), Error> {
        let mut packet = self.request.take().ok_or(Error::NotReady)?;
        let method = self.method.ok_or(Error::NotReady)?;
        packet.append(b"\r\n")?;

        debug!("http: sending {=str} request", method.as_str());
        if let Err(error) = self.transmit(packet, wait) {
            warn!("http: request send failed: {}", error);
            self.teardown();
            self.reset();
            return Err(error);
        }

        self.state = State::from(method);
        self.response_header_received = false;
        self.response_chunked = false;
        self.chunk = Phase::default();
        self.total_receive_bytes = 0;
        self.actual_bytes_received = 0;
        self.response = None;
        Ok(())
    }

    /// Allocate a packet for request data, with room for the secure record header when needed.
    pub fn request_packet_allocate(&mut self, wait: Wait) -> Result<Packet<'p>, Error> {
        if self.secure_active {
            let session = self.secure.as_mut().ok_or(Error::NotEnabled)?;
            session.packet_allocate(self.pool, wait)
        } else {
            Packet::allocate(self.pool)
        }
    }

    /// Write the chunk-size line for a `size`-byte chunk into an empty `packet`.
    ///
    /// The chunk data is appended to `packet` by the caller afterwards; the
    /// chunk's closing CRLF is added by
    /// [`request_packet_send`](Self::request_packet_send).
    pub fn request_chunked_set(&mut self, size: u32, packet: &mut Packet<'p>) -> Result<(), Error> {
        if !self.state.method().is_some_and(|method| method.has_body()) {
            return Err(Error::NotReady);
        }
        if !packet.is_empty() {
            return Err(Error::InvalidParameter);
        }
        let line = chunked::size_line(size)?;
        packet.append(line.as_bytes())?;

        self.request_chunked = true;
        self.total_transfer_bytes = (size as usize)
            .checked_add(line.len() + chunked::CRLF.len())
            .ok_or(Error::BufferOverflow)?;
        self.actual_bytes_transferred = 0;
        Ok(())
    }

    /// Send one packet of a PUT or POST body.
    ///
    /// In chunked mode the chunk's CRLF is appended, and when `more_data` is
    /// false the terminating zero chunk follows. A packet larger than what is
    /// left of the announced body is rejected with
    /// [`Error::BadPacketLength`] and nothing is sent.
    ///
    /// If the server has already answered, the request is abandoned: a `401`
    /// reports [`Error::AuthenticationError`], anything else
    /// [`Error::IncompleteTransfer`].
    pub fn request_packet_send(&mut self, mut packet: Packet<'p>, more_data: bool, wait: Wait) -> Result<(), Error> {
        if !self.state.method().is_some_and(|method| method.has_body()) {
            return Err(Error::NotReady);
        }

        match self.receive(Wait::NoWait) {
            Ok(early) => {
                let mut code = [0u8; 3];
                early.copy_to(9, &mut code);
                let error = if &code == b"401" {
                    Error::AuthenticationError
                } else {
                    Error::IncompleteTransfer
                };
                warn!("http: server answered before the body was sent: {}", error);
                drop(early);
                self.teardown();
                self.reset();
                return Err(error);
            }
            // A broken socket surfaces from the send below.
            Err(error) => trace!("http: no early response: {}", error),
        }

        if self.request_chunked {
            packet.append(chunked::CRLF)?;
        }
        let length = packet.len();
        if length > self.total_transfer_bytes - self.actual_bytes_transferred {
            return Err(Error::BadPacketLength);
        }
        if self.request_chunked && !more_data {
            packet.append(chunked::LAST_CHUNK)?;
            self.request_chunked = false;
        }

        if let Err(error) = self.transmit(packet, wait) {
            self.teardown();
            self.reset();
            return Err(error);
        }
        self.actual_bytes_transferred += length;
        trace!("http: sent {=usize} body bytes", length);
        Ok(())
    }

    /// Send one body packet with more data to follow.
    pub fn put_packet(&mut self, packet: Packet<'p>, wait: Wait) -> Result<(), Error> {
        self.request_packet_send(packet, true, wait)
    }

    /// Fetch the next piece of the response body.
    ///
    /// The first call receives and parses the response head. Each call then
    /// yields [`Body::More`] with data, until [`Body::Done`] marks the end of
    /// the response (HEAD responses and empty bodies complete right after the
    /// head). A non-2xx response yields [`Error::Status`].
    ///
    /// Wait expiries ([`Error::is_transient`]) leave the request in place, so
    /// the call can simply be repeated. Every other error, and completion,
    /// returns the client to [`State::Ready`]; the connection is kept only
    /// when keep-alive is in effect.
    pub fn response_body_get(&mut self, wait: Wait) -> Result<Body<'p>, Error> {
        if !self.state.is_transfer() {
            return Err(Error::NotReady);
        }
        if self.state.method().is_some_and(|method| method.has_body())
            && (self.request_chunked || self.actual_bytes_transferred < self.total_transfer_bytes)
        {
            return Err(Error::NotReady);
        }

        let result = self.next_body(wait);
        match &result {
            Ok(Body::Done(_)) => {
                debug!("http: response complete");
                if !self.keep_alive {
                    self.teardown();
                }
                self.reset();
            }
            Ok(Body::More(_)) | Err(Error::Status(_)) => {}
            Err(error) if error.is_transient() => {}
            Err(error) => {
                if error.is_framing() {
                    warn!("http: malformed response: {}", error);
                } else {
                    warn!("http: response failed: {}", error);
                }
                self.teardown();
                self.reset();
            }
        }
        result
    }

    /// Discard queued server data and reset the client to [`State::Ready`].
    ///
    /// Per-request counters and flags are cleared and held packets are
    /// released. The connection itself is left as it is.
    pub fn cleanup(&mut self) {
        if self.transport.state() == SocketState::Established {
            while let Ok(stray) = self.receive(Wait::NoWait) {
                trace!("http: dropping {=usize} stray bytes", stray.len());
            }
        }
        self.reset();
    }

    #[allow(clippy::too_many_arguments)]
    fn start(
        &mut self,
        method: Method,
        secure: bool,
        (address, port): (IpAddr, u16),
        resource: &str,
        host: &str,
        credentials: Option<Credentials<'_>>,
        body: Option<BodyLength>,
        wait: Wait,
    ) -> Result<(), Error> {
        validate(method, resource, host, credentials.as_ref(), body)?;
        if secure && self.secure.is_none() {
            return Err(Error::NotEnabled);
        }
        if self.state.is_transfer() {
            // An abandoned response may still be arriving; never reuse that socket.
            self.keep_alive = false;
            self.cleanup();
        }

        self.open(address, port, secure, wait)?;

        if let Err(error) = self.request_initialize(method, resource, host, credentials, body, wait) {
            self.teardown();
            self.reset();
            return Err(error);
        }
        self.request_send(wait)
    }

    fn open(&mut self, address: IpAddr, port: u16, secure: bool, wait: Wait) -> Result<(), Error> {
        let same_server = self.server == Some((address, port));

        if self.connect_pending {
            self.connect_pending = false;
            if same_server {
                match self.transport.state() {
                    SocketState::Connecting => {
                        self.connect_pending = true;
                        return Err(Error::InProgress);
                    }
                    SocketState::Established => return self.finish_connect(secure, wait),
                    _ => {}
                }
            }
        }

        if self.keep_alive
            && same_server
            && self.secure_active == secure
            && self.transport.state() == SocketState::Established
        {
            debug!("http: reusing kept-alive connection");
            self.cleanup();
            return Ok(());
        }

        if self.transport.state() != SocketState::Closed {
            self.teardown();
        }
        match self.transport.bind(self.config.local_port, wait) {
            Ok(()) | Err(Error::AlreadyBound) => {}
            Err(error) => return Err(error),
        }
        self.server = Some((address, port));

        match self.transport.connect(address, port, wait) {
            Ok(()) => self.finish_connect(secure, wait),
            Err(Error::InProgress) => {
                self.connect_pending = true;
                Err(Error::InProgress)
            }
            Err(error) => {
                warn!("http: connect failed: {}", error);
                self.teardown();
                Err(error)
            }
        }
    }

    fn finish_connect(&mut self, secure: bool, wait: Wait) -> Result<(), Error> {
        if secure {
            let session = self.secure.as_mut().ok_or(Error::NotEnabled)?;
            if let Err(error) = session.start(&mut self.transport, wait) {
                warn!("http: secure session failed to start: {}", error);
                self.teardown();
                return Err(error);
            }
            self.secure_active = true;
        }
        info!("http: {=str} connected", self.name);
        Ok(())
    }

    /// Close the connection: end the secure session, disconnect and unbind.
    ///
    /// Logical request state is left to the caller.
    fn teardown(&mut self) {
        let wait = Wait::Millis(self.config.teardown_timeout_ms);
        if self.secure_active {
            if let Some(session) = self.secure.as_mut() {
                let _ = session.end(&mut self.transport, wait);
                session.delete();
            }
            self.secure_active = false;
        }
        let _ = self.transport.disconnect(wait);
        let _ = self.transport.unbind();
        self.keep_alive = false;
        self.connect_pending = false;
        debug!("http: {=str} disconnected", self.name);
    }

    fn reset(&mut self) {
        self.state = State::Ready;
        self.method = None;
        self.total_transfer_bytes = 0;
        self.actual_bytes_transferred = 0;
        self.total_receive_bytes = 0;
        self.actual_bytes_received = 0;
        self.response_header_received = false;
        self.request_chunked = false;
        self.response_chunked = false;
        self.chunk = Phase::default();
        self.request = None;
        self.response = None;
    }

    fn transmit(&mut self, packet: Packet<'p>, wait: Wait) -> Result<(), Error> {
        if self.secure_active {
            let session = self.secure.as_mut().ok_or(Error::NotEnabled)?;
            session.send(&mut self.transport, packet, wait)
        } else {
            self.transport.send(packet, wait)
        }
    }

    fn receive(&mut self, wait: Wait) -> Result<Packet<'p>, Error> {
        if self.secure_active {
            let session = self.secure.as_mut().ok_or(Error::NotEnabled)?;
            session.receive(&mut self.transport, wait)
        } else {
            self.transport.receive(wait)
        }
    }

    /// The held remainder if it has data, otherwise a fresh packet.
    fn next_packet(&mut self, wait: Wait) -> Result<Packet<'p>, Error> {
        match self.response.take() {
            Some(packet) if !packet.is_empty() => Ok(packet),
            _ => self.receive(wait),
        }
    }

    fn next_body(&mut self, wait: Wait) -> Result<Body<'p>, Error> {
        if !self.response_header_received {
            self.receive_head(wait)?;
            if self.state == State::Head || (!self.response_chunked && self.total_receive_bytes == 0) {
                return Ok(Body::Done(None));
            }
        }
        if self.response_chunked {
            self.next_chunk(wait)
        } else {
            self.next_length_delimited(wait)
        }
    }

    /// Collect the response head, parse it and keep the body remainder.
    fn receive_head(&mut self, wait: Wait) -> Result<(), Error> {
        let end = loop {
            if let Some(end) = self.response.as_ref().and_then(header::header_end) {
                break end;
            }
            let packet = self.receive(wait)?;
            match self.response.as_mut() {
                Some(held) => held.append_chain(packet)?,
                None => self.response = Some(packet),
            }
        };

        let mut held = self.response.take().ok_or(Error::InvalidPacket)?;
        let head = header::parse_head(&held, end, self.header_callback)?;
        if !head.chunked && held.len().saturating_sub(head.body_offset) > head.content_length {
            return Err(Error::BadPacketLength);
        }
        held.advance(head.body_offset);

        self.response_header_received = true;
        self.response_chunked = head.chunked;
        self.total_receive_bytes = head.content_length;
        self.actual_bytes_received = 0;
        self.keep_alive = self.config.keep_alive_enabled() && head.keep_alive;
        info!("http: status {=u16}, keep-alive {=bool}", head.status.as_u16(), self.keep_alive);

        if !head.status.is_success() {
            let complete = !head.chunked && held.len() == head.content_length;
            if !(self.keep_alive && complete) {
                self.teardown();
            }
            self.reset();
            return Err(Error::Status(head.status));
        }

        self.response = Some(held);
        Ok(())
    }

    fn next_length_delimited(&mut self, wait: Wait) -> Result<Body<'p>, Error> {
        let packet = self.next_packet(wait)?;
        let received = self.actual_bytes_received + packet.len();
        if received > self.total_receive_bytes {
            return Err(Error::BadPacketLength);
        }
        self.actual_bytes_received = received;
        if received == self.total_receive_bytes {
            Ok(Body::Done(Some(packet)))
        } else {
            Ok(Body::More(packet))
        }
    }

    fn next_chunk(&mut self, wait: Wait) -> Result<Body<'p>, Error> {
        loop {
            let mut packet = self.next_packet(wait)?;

            if let Phase::Data(remaining) = self.chunk {
                let take = packet.len().min(remaining as usize);
                self.response = packet.split_off(take)?;
                self.chunk.consume_data(take as u32);
                self.actual_bytes_received += take;
                return Ok(Body::More(packet));
            }

            let mut consumed = 0;
            let mut framing = Framing::Pending;
            for byte in packet.bytes() {
                consumed += 1;
                framing = self.chunk.feed(byte)?;
                if framing != Framing::Pending {
                    break;
                }
            }
            packet.advance(consumed);
            self.response = Some(packet);
            if framing == Framing::End {
                return Ok(Body::Done(None));
            }
        }
    }
}

fn validate(
    method: Method,
    resource: &str,
    host: &str,
    credentials: Option<&Credentials<'_>>,
    body: Option<BodyLength>,
) -> Result<Option<BodyLength>, Error> {
    if resource.is_empty() || host.is_empty() {
        return Err(Error::InvalidParameter);
    }
    if let Some(credentials) = credentials {
        request::check_credentials(credentials)?;
    }
    if !method.has_body() {
        return Ok(None);
    }
    match body {
        None | Some(BodyLength::Fixed(0)) => Err(Error::InvalidParameter),
        body => Ok(body),
    }
}

impl<'p, T, S> core::fmt::Debug for Client<'p, T, S> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Client")
            .field("name", &self.name)
            .field("state", &self.state)
            .field("server", &self.server)
            .field("secure_active", &self.secure_active)
            .field("keep_alive", &self.keep_alive)
            .field("total_transfer_bytes", &self.total_transfer_bytes)
            .field("actual_bytes_transferred", &self.actual_bytes_transferred)
            .field("total_receive_bytes", &self.total_receive_bytes)
            .field("actual_bytes_received", &self.actual_bytes_received)
            .field("response_chunked", &self.response_chunked)
            .finish()
    }
}
