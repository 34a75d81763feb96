//! Pooled, chained network packets.
//!
//! A [`Packet`] is one logical message stored in a chain of fixed-size
//! buffers taken from a [`Pool`]. The chain grows by linking further buffers
//! when data is appended, and shrinks by releasing buffers when data is
//! consumed from the front or cut from the back. No heap is involved: every
//! byte lives in the pool's arena.
//!
//! ```text
//!  Packet { head, tail, len = 9 }
//!     │
//!     ▼
//!  ┌──────────┐   ┌──────────┐   ┌──────────┐
//!  │ "HTT"    │──▶│ "P/1"    │──▶│ ".1 "    │──▶ None
//!  └──────────┘   └──────────┘   └──────────┘
//! ```
//!
//! Ownership is plain Rust ownership: a packet has exactly one owner, handing
//! it to [`Transport::send`](crate::network::Transport::send) moves it, and
//! dropping it returns every buffer in the chain to the pool.
//!
//! # Examples
//!
//! ```rust
//! use libiot_web::network::packet::{PacketPool, Pool};
//!
//! let pool: PacketPool<4, 8> = PacketPool::new();
//! let mut packet = pool.allocate().unwrap();
//! packet.append(b"HTTP/1.1 200 OK").unwrap();
//!
//! assert_eq!(packet.len(), 15);
//! assert_eq!(pool.available(), 2);
//!
//! let tail = packet.split_off(8).unwrap().unwrap();
//! assert_eq!(packet, *b"HTTP/1.1");
//! assert_eq!(tail, *b" 200 OK");
//!
//! drop(packet);
//! drop(tail);
//! assert_eq!(pool.available(), 4);
//! ```

use crate::network::error::Error;
use core::cell::RefCell;
use heapless::Vec;

/// Index of one buffer inside a [`Pool`].
pub type NodeId = u16;

/// Scratch size used when bytes are moved between buffers.
const COPY_STEP: usize = 64;

/// Longest needle accepted by [`Packet::find`].
pub const MAX_NEEDLE: usize = 8;

/// Buffer storage backing [`Packet`] chains.
///
/// The trait is object safe so a packet can refer to its pool as
/// `&dyn Pool` regardless of the pool's dimensions. [`PacketPool`] is the
/// stock implementation; firmware with its own allocator can implement the
/// trait directly.
///
/// Every node has a payload area with a *start* and an *end* cursor: bytes
/// in `start..end` are the node's data, bytes before `start` are headroom
/// that [`node_prepend`](Pool::node_prepend) can fill, and bytes after `end`
/// are tailroom that [`node_append`](Pool::node_append) can fill.
pub trait Pool {
    /// Payload bytes per node.
    fn payload_size(&self) -> usize;

    /// Total number of nodes.
    fn capacity(&self) -> usize;

    /// Number of nodes currently free.
    fn available(&self) -> usize;

    /// Take a free node with `headroom` bytes reserved in front of its data.
    fn alloc_node(&self, headroom: usize) -> Option<NodeId>;

    /// Return a node to the free list.
    fn free_node(&self, node: NodeId);

    /// Number of data bytes held by `node`.
    fn node_len(&self, node: NodeId) -> usize;

    /// Next node in the chain.
    fn node_next(&self, node: NodeId) -> Option<NodeId>;

    /// Link `node` to `next`.
    fn set_node_next(&self, node: NodeId, next: Option<NodeId>);

    /// Copy data bytes starting at `offset` into `out`, returning the count copied.
    fn node_read(&self, node: NodeId, offset: usize, out: &mut [u8]) -> usize;

    /// Copy as much of `data` as fits into the tailroom, returning the count copied.
    fn node_append(&self, node: NodeId, data: &[u8]) -> usize;

    /// Copy all of `data` into the headroom, or nothing if it does not fit.
    fn node_prepend(&self, node: NodeId, data: &[u8]) -> bool;

    /// Drop `count` bytes from the front of the node's data.
    fn node_advance(&self, node: NodeId, count: usize);

    /// Keep only the first `len` bytes of the node's data.
    fn node_truncate(&self, node: NodeId, len: usize);
}

#[derive(Debug, Clone, Copy)]
struct Slot {
    start: usize,
    end: usize,
    next: Option<NodeId>,
    in_use: bool,
}

impl Slot {
    const FREE: Slot = Slot {
        start: 0,
        end: 0,
        next: None,
        in_use: false,
    };
}

struct Arena<const NODES: usize, const PAYLOAD: usize> {
    data: [[u8; PAYLOAD]; NODES],
    slots: [Slot; NODES],
    free: Vec<NodeId, NODES>,
    /// Nodes never handed out so far; they are not on the free list yet.
    fresh: usize,
}

/// A fixed arena of `NODES` buffers of `PAYLOAD` bytes each.
///
/// The pool is meant for a single thread of control: buffers are handed out
/// and returned through a `RefCell`, so it is neither `Sync` nor shared
/// between interrupt contexts.
///
/// # Examples
///
/// ```rust
/// use libiot_web::network::packet::{Pool, PacketPool};
///
/// let pool: PacketPool<8, 1536> = PacketPool::new();
/// assert_eq!(pool.capacity(), 8);
/// assert_eq!(pool.payload_size(), 1536);
/// ```
pub struct PacketPool<const NODES: usize, const PAYLOAD: usize> {
    arena: RefCell<Arena<NODES, PAYLOAD>>,
}

impl<const NODES: usize, const PAYLOAD: usize> PacketPool<NODES, PAYLOAD> {
    const FITS_NODE_ID: () = assert!(NODES <= NodeId::MAX as usize);

    /// Create an empty pool with every node free.
    pub const fn new() -> Self {
        let () = Self::FITS_NODE_ID;
        Self {
            arena: RefCell::new(Arena {
                data: [[0; PAYLOAD]; NODES],
                slots: [Slot::FREE; NODES],
                free: Vec::new(),
                fresh: 0,
            }),
        }
    }

    /// Allocate an empty packet from this pool.
    pub fn allocate(&self) -> Result<Packet<'_>, Error> {
        Packet::allocate(self)
    }

    /// Allocate an empty packet with `headroom` bytes reserved for prepending.
    pub fn allocate_with_headroom(&self, headroom: usize) -> Result<Packet<'_>, Error> {
        Packet::allocate_with_headroom(self, headroom)
    }

    fn with_slot<R>(&self, node: NodeId, f: impl FnOnce(&mut Slot, &mut [u8; PAYLOAD]) -> R) -> R {
        let mut arena = self.arena.borrow_mut();
        let arena = &mut *arena;
        let index = node as usize;
        f(&mut arena.slots[index], &mut arena.data[index])
    }
}

impl<const NODES: usize, const PAYLOAD: usize> Default for PacketPool<NODES, PAYLOAD> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const NODES: usize, const PAYLOAD: usize> core::fmt::Debug for PacketPool<NODES, PAYLOAD> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("PacketPool")
            .field("nodes", &NODES)
            .field("payload_size", &PAYLOAD)
            .field("available", &self.available())
            .finish()
    }
}

impl<const NODES: usize, const PAYLOAD: usize> Pool for PacketPool<NODES, PAYLOAD> {
    fn payload_size(&self) -> usize {
        PAYLOAD
    }

    fn capacity(&self) -> usize {
        NODES
    }

    fn available(&self) -> usize {
        let arena = self.arena.borrow();
        arena.free.len() + (NODES - arena.fresh)
    }

    fn alloc_node(&self, headroom: usize) -> Option<NodeId> {
        let mut arena = self.arena.borrow_mut();
        let node = match arena.free.pop() {
            Some(node) => node,
            None if arena.fresh < NODES => {
                let node = arena.fresh as NodeId;
                arena.fresh += 1;
                node
            }
            None => return None,
        };
        let start = headroom.min(PAYLOAD);
        arena.slots[node as usize] = Slot {
            start,
            end: start,
            next: None,
            in_use: true,
        };
        Some(node)
    }

    fn free_node(&self, node: NodeId) {
        let mut arena = self.arena.borrow_mut();
        let slot = &mut arena.slots[node as usize];
        if !slot.in_use {
            debug_assert!(false, "node released twice");
            return;
        }
        *slot = Slot::FREE;
        // Cannot overflow: a node is only pushed back after it was handed out.
        let _ = arena.free.push(node);
    }

    fn node_len(&self, node: NodeId) -> usize {
        let arena = self.arena.borrow();
        let slot = &arena.slots[node as usize];
        slot.end - slot.start
    }

    fn node_next(&self, node: NodeId) -> Option<NodeId> {
        self.arena.borrow().slots[node as usize].next
    }

    fn set_node_next(&self, node: NodeId, next: Option<NodeId>) {
        self.with_slot(node, |slot, _| slot.next = next);
    }

    fn node_read(&self, node: NodeId, offset: usize, out: &mut [u8]) -> usize {
        self.with_slot(node, |slot, data| {
            let from = slot.start + offset;
            if from >= slot.end {
                return 0;
            }
            let count = out.len().min(slot.end - from);
            out[..count].copy_from_slice(&data[from..from + count]);
            count
        })
    }

    fn node_append(&self, node: NodeId, bytes: &[u8]) -> usize {
        self.with_slot(node, |slot, data| {
            let count = bytes.len().min(PAYLOAD - slot.end);
            data[slot.end..slot.end + count].copy_from_slice(&bytes[..count]);
            slot.end += count;
            count
        })
    }

    fn node_prepend(&self, node: NodeId, bytes: &[u8]) -> bool {
        self.with_slot(node, |slot, data| {
            if bytes.len() > slot.start {
                return false;
            }
            slot.start -= bytes.len();
            data[slot.start..slot.start + bytes.len()].copy_from_slice(bytes);
            true
        })
    }

    fn node_advance(&self, node: NodeId, count: usize) {
        self.with_slot(node, |slot, _| slot.start = (slot.start + count).min(slot.end));
    }

    fn node_truncate(&self, node: NodeId, len: usize) {
        self.with_slot(node, |slot, _| slot.end = slot.start + len.min(slot.end - slot.start));
    }
}

/// One logical message held in a chain of pool buffers.
///
/// The packet records the chain's head and tail plus the logical length,
/// which always equals the sum of the node lengths along the chain. A packet
/// always owns at least one node while it is alive.
pub struct Packet<'p> {
    pool: &'p dyn Pool,
    head: Option<NodeId>,
    tail: Option<NodeId>,
    len: usize,
}

impl<'p> Packet<'p> {
    /// Allocate an empty single-node packet.
    pub fn allocate(pool: &'p dyn Pool) -> Result<Self, Error> {
        Self::allocate_with_headroom(pool, 0)
    }

    /// Allocate an empty packet with `headroom` bytes reserved for [`prepend`](Self::prepend).
    pub fn allocate_with_headroom(pool: &'p dyn Pool, headroom: usize) -> Result<Self, Error> {
        let node = pool.alloc_node(headroom).ok_or(Error::PoolExhausted)?;
        Ok(Self {
            pool,
            head: Some(node),
            tail: Some(node),
            len: 0,
        })
    }

    /// Total number of data bytes in the chain.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the packet carries no data.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The pool this packet's buffers come from.
    pub fn pool(&self) -> &'p dyn Pool {
        self.pool
    }

    /// Number of buffers in the chain.
    pub fn node_count(&self) -> usize {
        let mut count = 0;
        let mut node = self.head;
        while let Some(id) = node {
            count += 1;
            node = self.pool.node_next(id);
        }
        count
    }

    /// Append `data`, linking fresh buffers when the tail is full.
    ///
    /// Either all of `data` is appended or, when the pool runs dry, the packet
    /// is restored to its previous length and [`Error::PoolExhausted`] is
    /// returned.
    pub fn append(&mut self, data: &[u8]) -> Result<(), Error> {
        let original = self.len;
        let mut rest = data;
        while !rest.is_empty() {
            let tail = self.tail.ok_or(Error::InvalidParameter)?;
            let written = self.pool.node_append(tail, rest);
            self.len += written;
            rest = &rest[written..];
            if rest.is_empty() {
                break;
            }
            match self.pool.alloc_node(0) {
                Some(node) => {
                    self.pool.set_node_next(tail, Some(node));
                    self.tail = Some(node);
                }
                None => {
                    self.truncate(original);
                    return Err(Error::PoolExhausted);
                }
            }
        }
        Ok(())
    }

    /// Write `data` into the headroom of the first buffer.
    pub fn prepend(&mut self, data: &[u8]) -> Result<(), Error> {
        let head = self.head.ok_or(Error::InvalidParameter)?;
        if !self.pool.node_prepend(head, data) {
            return Err(Error::BufferOverflow);
        }
        self.len += data.len();
        Ok(())
    }

    /// Link `other` behind this packet's tail.
    ///
    /// Packets from the same pool are linked without copying; a packet from
    /// another pool is copied in.
    pub fn append_chain(&mut self, mut other: Packet<'p>) -> Result<(), Error> {
        if !core::ptr::addr_eq(self.pool as *const dyn Pool, other.pool as *const dyn Pool) {
            let mut scratch = [0u8; COPY_STEP];
            let mut offset = 0;
            while offset < other.len {
                let count = other.copy_to(offset, &mut scratch);
                self.append(&scratch[..count])?;
                offset += count;
            }
            return Ok(());
        }
        let (Some(tail), Some(other_head)) = (self.tail, other.head.take()) else {
            return Ok(());
        };
        self.pool.set_node_next(tail, Some(other_head));
        self.tail = other.tail.take();
        self.len += other.len;
        other.len = 0;
        Ok(())
    }

    /// Drop `count` bytes from the front, releasing buffers that empty out.
    ///
    /// The last buffer is kept even when it empties so the packet stays valid.
    pub fn advance(&mut self, count: usize) {
        let mut count = count.min(self.len);
        self.len -= count;
        while count > 0 {
            let Some(id) = self.head else { break };
            let node_len = self.pool.node_len(id);
            if count < node_len {
                self.pool.node_advance(id, count);
                break;
            }
            count -= node_len;
            match self.pool.node_next(id) {
                Some(next) => {
                    self.pool.free_node(id);
                    self.head = Some(next);
                }
                None => {
                    self.pool.node_advance(id, node_len);
                    break;
                }
            }
        }
    }

    /// Shorten the packet to `len` bytes, releasing buffers past the cut.
    pub fn truncate(&mut self, len: usize) {
        if len >= self.len {
            return;
        }
        let mut remaining = len;
        let mut node = self.head;
        while let Some(id) = node {
            let node_len = self.pool.node_len(id);
            if remaining <= node_len {
                self.pool.node_truncate(id, remaining);
                let rest = self.pool.node_next(id);
                self.pool.set_node_next(id, None);
                release_chain(self.pool, rest);
                self.tail = Some(id);
                break;
            }
            remaining -= node_len;
            node = self.pool.node_next(id);
        }
        self.len = len;
    }

    /// Split the packet at byte `at`, returning the bytes from `at` onwards.
    ///
    /// The packet keeps `[0, at)`. When the split point falls inside a buffer,
    /// the remainder of that buffer is copied into a fresh one; whole buffers
    /// past the split point move over without copying. Returns `Ok(None)`
    /// when there is nothing past `at`.
    pub fn split_off(&mut self, at: usize) -> Result<Option<Packet<'p>>, Error> {
        if at >= self.len {
            return Ok(None);
        }
        if at == 0 {
            let empty = Packet::allocate(self.pool)?;
            return Ok(Some(core::mem::replace(self, empty)));
        }

        let mut remaining = at;
        let mut prev: Option<NodeId> = None;
        let mut node = self.head;
        while let Some(id) = node {
            let node_len = self.pool.node_len(id);
            if remaining == 0 {
                // Clean cut between `prev` and `id`.
                let Some(prev) = prev else { break };
                self.pool.set_node_next(prev, None);
                let tail = Packet {
                    pool: self.pool,
                    head: Some(id),
                    tail: self.tail,
                    len: self.len - at,
                };
                self.tail = Some(prev);
                self.len = at;
                return Ok(Some(tail));
            }
            if remaining < node_len {
                let fresh = self.pool.alloc_node(0).ok_or(Error::PoolExhausted)?;
                let mut scratch = [0u8; COPY_STEP];
                let mut offset = remaining;
                while offset < node_len {
                    let count = self.pool.node_read(id, offset, &mut scratch);
                    self.pool.node_append(fresh, &scratch[..count]);
                    offset += count;
                }
                let next = self.pool.node_next(id);
                self.pool.set_node_next(fresh, next);
                self.pool.node_truncate(id, remaining);
                self.pool.set_node_next(id, None);
                let tail = Packet {
                    pool: self.pool,
                    head: Some(fresh),
                    tail: if next.is_some() { self.tail } else { Some(fresh) },
                    len: self.len - at,
                };
                self.tail = Some(id);
                self.len = at;
                return Ok(Some(tail));
            }
            remaining -= node_len;
            prev = Some(id);
            node = self.pool.node_next(id);
        }
        Ok(None)
    }

    /// Copy bytes starting at `offset` into `out`, returning the count copied.
    pub fn copy_to(&self, offset: usize, out: &mut [u8]) -> usize {
        let mut skip = offset;
        let mut copied = 0;
        let mut node = self.head;
        while let Some(id) = node {
            if copied == out.len() {
                break;
            }
            let node_len = self.pool.node_len(id);
            if skip >= node_len {
                skip -= node_len;
            } else {
                copied += self.pool.node_read(id, skip, &mut out[copied..]);
                skip = 0;
            }
            node = self.pool.node_next(id);
        }
        copied
    }

    /// Iterate over the data bytes, crossing buffer boundaries transparently.
    pub fn bytes(&self) -> Bytes<'_, 'p> {
        Bytes {
            packet: self,
            node: self.head,
            offset: 0,
        }
    }

    /// Byte offset of the first occurrence of `needle` (at most [`MAX_NEEDLE`] bytes).
    pub fn find(&self, needle: &[u8]) -> Option<usize> {
        if needle.is_empty() || needle.len() > MAX_NEEDLE {
            return None;
        }
        let mut window = [0u8; MAX_NEEDLE];
        let width = needle.len();
        for (index, byte) in self.bytes().enumerate() {
            window.copy_within(1..width, 0);
            window[width - 1] = byte;
            if index + 1 >= width && &window[..width] == needle {
                return Some(index + 1 - width);
            }
        }
        None
    }

    /// Sum of the node lengths, walked along the chain.
    #[cfg(test)]
    pub(crate) fn chain_len(&self) -> usize {
        let mut total = 0;
        let mut node = self.head;
        while let Some(id) = node {
            total += self.pool.node_len(id);
            node = self.pool.node_next(id);
        }
        total
    }
}

fn release_chain(pool: &dyn Pool, mut node: Option<NodeId>) {
    while let Some(id) = node {
        node = pool.node_next(id);
        pool.free_node(id);
    }
}

impl Drop for Packet<'_> {
    fn drop(&mut self) {
        release_chain(self.pool, self.head.take());
    }
}

impl core::fmt::Debug for Packet<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Packet")
            .field("len", &self.len)
            .field("nodes", &self.node_count())
            .finish()
    }
}

impl PartialEq<[u8]> for Packet<'_> {
    fn eq(&self, other: &[u8]) -> bool {
        self.len == other.len() && self.bytes().eq(other.iter().copied())
    }
}

impl<const N: usize> PartialEq<[u8; N]> for Packet<'_> {
    fn eq(&self, other: &[u8; N]) -> bool {
        *self == other[..]
    }
}

/// Byte cursor over a [`Packet`] chain.
#[derive(Debug)]
pub struct Bytes<'a, 'p> {
    packet: &'a Packet<'p>,
    node: Option<NodeId>,
    offset: usize,
}

impl Iterator for Bytes<'_, '_> {
    type Item = u8;

    fn next(&mut self) -> Option<u8> {
        let pool = self.packet.pool;
        loop {
            let id = self.node?;
            if self.offset < pool.node_len(id) {
                let mut byte = [0u8; 1];
                pool.node_read(id, self.offset, &mut byte);
                self.offset += 1;
                return Some(byte[0]);
            }
            self.node = pool.node_next(id);
            self.offset = 0;
        }
    }
}
