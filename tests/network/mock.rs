use core::net::IpAddr;
use libiot_web::network::error::Error;
use libiot_web::network::packet::{Packet, Pool};
use libiot_web::network::{SecureSession, SocketState, Transport, Wait};
use std::collections::VecDeque;

/// In-memory transport: inbound data is queued by the test, outbound data is
/// captured in `sent`.
pub struct MockTransport<'p> {
    pool: &'p dyn Pool,
    pub inbound: VecDeque<Vec<u8>>,
    pub sent: Vec<u8>,
    pub state: SocketState,
    pub bound: bool,
    pub remote: Option<(IpAddr, u16)>,
    pub binds: usize,
    pub connects: usize,
    pub sends: usize,
    pub disconnects: usize,
    pub unbinds: usize,
    /// Next connect returns `InProgress` and leaves the socket connecting.
    pub connect_in_progress: bool,
    /// Next connect is refused.
    pub refuse: bool,
}

impl<'p> MockTransport<'p> {
    pub fn new(pool: &'p dyn Pool) -> Self {
        Self {
            pool,
            inbound: VecDeque::new(),
            sent: Vec::new(),
            state: SocketState::Closed,
            bound: false,
            remote: None,
            binds: 0,
            connects: 0,
            sends: 0,
            disconnects: 0,
            unbinds: 0,
            connect_in_progress: false,
            refuse: false,
        }
    }

    /// Queue one inbound packet.
    pub fn queue(&mut self, bytes: &[u8]) {
        self.inbound.push_back(bytes.to_vec());
    }

    /// Everything sent so far, as text.
    pub fn sent_text(&self) -> String {
        String::from_utf8_lossy(&self.sent).into_owned()
    }
}

impl<'p> Transport<'p> for MockTransport<'p> {
    fn bind(&mut self, _local_port: Option<u16>, _wait: Wait) -> Result<(), Error> {
        if self.bound {
            return Err(Error::AlreadyBound);
        }
        self.bound = true;
        self.binds += 1;
        Ok(())
    }

    fn connect(&mut self, address: IpAddr, port: u16, _wait: Wait) -> Result<(), Error> {
        if !self.bound {
            return Err(Error::NotBound);
        }
        self.connects += 1;
        self.remote = Some((address, port));
        if self.refuse {
            self.refuse = false;
            return Err(Error::ConnectionRefused);
        }
        if self.connect_in_progress {
            self.connect_in_progress = false;
            self.state = SocketState::Connecting;
            return Err(Error::InProgress);
        }
        self.state = SocketState::Established;
        Ok(())
    }

    fn send(&mut self, packet: Packet<'p>, _wait: Wait) -> Result<(), Error> {
        if self.state != SocketState::Established {
            return Err(Error::NotConnected);
        }
        self.sends += 1;
        self.sent.extend(packet.bytes());
        Ok(())
    }

    fn receive(&mut self, _wait: Wait) -> Result<Packet<'p>, Error> {
        if self.state != SocketState::Established {
            return Err(Error::NotConnected);
        }
        let bytes = self.inbound.pop_front().ok_or(Error::NoPacket)?;
        let mut packet = Packet::allocate(self.pool)?;
        packet.append(&bytes)?;
        Ok(packet)
    }

    fn disconnect(&mut self, _wait: Wait) -> Result<(), Error> {
        self.disconnects += 1;
        self.state = SocketState::Closed;
        Ok(())
    }

    fn unbind(&mut self) -> Result<(), Error> {
        if !self.bound {
            return Err(Error::NotBound);
        }
        self.bound = false;
        self.unbinds += 1;
        Ok(())
    }

    fn state(&self) -> SocketState {
        self.state
    }
}

/// Record header used by [`MockTls`]: type, version, 16-bit length.
pub const RECORD_HEADER: usize = 5;

/// Wrap `payload` in a mock TLS record.
pub fn record(payload: &[u8]) -> Vec<u8> {
    let len = payload.len() as u16;
    let mut out = vec![0x17, 0x03, 0x03, (len >> 8) as u8, len as u8];
    out.extend_from_slice(payload);
    out
}

/// A record layer that frames data without encrypting it.
#[derive(Debug, Default)]
pub struct MockTls {
    pub active: bool,
    pub fail_start: bool,
}

impl<'p> SecureSession<'p, MockTransport<'p>> for MockTls {
    fn start(&mut self, transport: &mut MockTransport<'p>, _wait: Wait) -> Result<(), Error> {
        if self.fail_start || transport.state() != SocketState::Established {
            return Err(Error::SecureSession);
        }
        self.active = true;
        Ok(())
    }

    fn end(&mut self, _transport: &mut MockTransport<'p>, _wait: Wait) -> Result<(), Error> {
        self.active = false;
        Ok(())
    }

    fn delete(&mut self) {
        self.active = false;
    }

    fn send(&mut self, transport: &mut MockTransport<'p>, mut packet: Packet<'p>, wait: Wait) -> Result<(), Error> {
        if !self.active {
            return Err(Error::SecureSession);
        }
        let len = packet.len() as u16;
        let header = [0x17, 0x03, 0x03, (len >> 8) as u8, len as u8];
        let record = match packet.prepend(&header) {
            Ok(()) => packet,
            Err(_) => {
                let mut framed = Packet::allocate(packet.pool())?;
                framed.append(&header)?;
                framed.append_chain(packet)?;
                framed
            }
        };
        transport.send(record, wait)
    }

    fn receive(&mut self, transport: &mut MockTransport<'p>, wait: Wait) -> Result<Packet<'p>, Error> {
        if !self.active {
            return Err(Error::SecureSession);
        }
        let mut packet = transport.receive(wait)?;
        if packet.len() < RECORD_HEADER {
            return Err(Error::SecureSession);
        }
        packet.advance(RECORD_HEADER);
        Ok(packet)
    }

    fn packet_allocate(&mut self, pool: &'p dyn Pool, _wait: Wait) -> Result<Packet<'p>, Error> {
        Packet::allocate_with_headroom(pool, RECORD_HEADER)
    }
}
