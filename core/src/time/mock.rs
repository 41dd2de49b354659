//! Host test doubles for the uptime clock, delay and time service link
//!
//! All three share one [`VirtualClock`]; only delays advance it, unless a
//! test moves it explicitly.

#![allow(dead_code)]

use core::cell::Cell;
use std::collections::VecDeque;
use std::vec::Vec;

use embedded_hal::delay::DelayNs;
use embedded_io::{ErrorKind, ErrorType, Read, ReadReady};
use hal_abstractions::{TimeServiceLink, UptimeClock};

pub struct VirtualClock {
    now: Cell<u64>,
}

impl VirtualClock {
    pub fn new(start_ms: u64) -> Self {
        Self {
            now: Cell::new(start_ms),
        }
    }

    pub fn advance(&self, ms: u64) {
        self.now.set(self.now.get() + ms);
    }
}

impl UptimeClock for VirtualClock {
    fn uptime_ms(&self) -> u64 {
        self.now.get()
    }
}

pub struct VirtualDelay<'a> {
    clock: &'a VirtualClock,
    nanos: u64,
}

impl<'a> VirtualDelay<'a> {
    pub fn new(clock: &'a VirtualClock) -> Self {
        Self { clock, nanos: 0 }
    }
}

impl DelayNs for VirtualDelay<'_> {
    fn delay_ns(&mut self, ns: u32) {
        self.nanos += u64::from(ns);
        self.clock.advance(self.nanos / 1_000_000);
        self.nanos %= 1_000_000;
    }

    fn delay_ms(&mut self, ms: u32) {
        self.clock.advance(u64::from(ms));
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MockError(pub ErrorKind);

impl core::fmt::Display for MockError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "mock transport error: {:?}", self.0)
    }
}

impl core::error::Error for MockError {}

impl embedded_io::Error for MockError {
    fn kind(&self) -> ErrorKind {
        self.0
    }
}

/// Scripted server behaviour for one connection
pub enum Reply {
    /// Connection is refused
    Refuse,
    /// Bytes become readable `latency_ms` after connect, `chunk` at a time
    Bytes {
        bytes: Vec<u8>,
        latency_ms: u64,
        chunk: usize,
        hang_up: bool,
    },
    /// Connection opens but nothing ever arrives
    Silent,
    /// Connection opens and every poll fails
    Broken,
}

impl Reply {
    pub fn payload(server_ms: u64, latency_ms: u64) -> Self {
        Self::raw(Vec::from(server_ms.to_le_bytes()), latency_ms)
    }

    pub fn raw(bytes: Vec<u8>, latency_ms: u64) -> Self {
        Self::Bytes {
            bytes,
            latency_ms,
            chunk: usize::MAX,
            hang_up: false,
        }
    }

    pub fn hang_up(bytes: Vec<u8>, latency_ms: u64) -> Self {
        Self::Bytes {
            bytes,
            latency_ms,
            chunk: usize::MAX,
            hang_up: true,
        }
    }

    pub fn in_chunks(self, size: usize) -> Self {
        match self {
            Self::Bytes {
                bytes,
                latency_ms,
                hang_up,
                ..
            } => Self::Bytes {
                bytes,
                latency_ms,
                chunk: size,
                hang_up,
            },
            other => other,
        }
    }
}

/// Link that serves one scripted [`Reply`] per connect
///
/// Connecting after the script is exhausted is refused.
pub struct VirtualLink<'a> {
    clock: &'a VirtualClock,
    replies: VecDeque<Reply>,
    pub connects: usize,
}

impl<'a> VirtualLink<'a> {
    pub fn new(clock: &'a VirtualClock, replies: impl IntoIterator<Item = Reply>) -> Self {
        Self {
            clock,
            replies: replies.into_iter().collect(),
            connects: 0,
        }
    }

    pub fn push(&mut self, reply: Reply) {
        self.replies.push_back(reply);
    }
}

pub struct VirtualConnection<'a> {
    clock: &'a VirtualClock,
    bytes: Vec<u8>,
    pos: usize,
    available_at: u64,
    chunk: usize,
    hang_up: bool,
    broken: bool,
}

impl ErrorType for VirtualConnection<'_> {
    type Error = MockError;
}

impl ReadReady for VirtualConnection<'_> {
    fn read_ready(&mut self) -> Result<bool, Self::Error> {
        if self.broken {
            return Err(MockError(ErrorKind::ConnectionReset));
        }
        if self.clock.uptime_ms() < self.available_at {
            return Ok(false);
        }
        Ok(self.pos < self.bytes.len() || self.hang_up)
    }
}

impl Read for VirtualConnection<'_> {
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
        if self.broken {
            return Err(MockError(ErrorKind::ConnectionReset));
        }
        let remaining = &self.bytes[self.pos..];
        let n = remaining.len().min(buf.len()).min(self.chunk);
        buf[..n].copy_from_slice(&remaining[..n]);
        self.pos += n;
        Ok(n)
    }
}

impl TimeServiceLink for VirtualLink<'_> {
    type Error = MockError;
    type Connection<'c>
        = VirtualConnection<'c>
    where
        Self: 'c;

    fn connect(&mut self) -> Result<Self::Connection<'_>, Self::Error> {
        self.connects += 1;
        let now = self.clock.uptime_ms();
        let closed = VirtualConnection {
            clock: self.clock,
            bytes: Vec::new(),
            pos: 0,
            available_at: now,
            chunk: usize::MAX,
            hang_up: false,
            broken: false,
        };

        match self.replies.pop_front() {
            None | Some(Reply::Refuse) => Err(MockError(ErrorKind::ConnectionRefused)),
            Some(Reply::Silent) => Ok(closed),
            Some(Reply::Broken) => Ok(VirtualConnection {
                broken: true,
                ..closed
            }),
            Some(Reply::Bytes {
                bytes,
                latency_ms,
                chunk,
                hang_up,
            }) => Ok(VirtualConnection {
                bytes,
                available_at: now + latency_ms,
                chunk,
                hang_up,
                ..closed
            }),
        }
    }
}
