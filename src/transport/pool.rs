//! Fixed set of slot connections.
//!
//! Slot `i` connects to `host:base_port + i`. The slot count is fixed when
//! the pool is created.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │           ConnectionPool                │
//! │  ┌─────────────────────────────────┐    │
//! │  │ slot 0 → host:base_port         │    │
//! │  │ slot 1 → host:base_port + 1     │    │
//! │  │ slot 2 → (unconnected)          │    │
//! │  └─────────────────────────────────┘    │
//! │  last_message, server_version           │
//! └─────────────────────────────────────────┘
//! ```

// ============================================================================
// Imports
// ============================================================================

use std::net::{TcpStream, ToSocketAddrs};
use std::time::Duration;

use tracing::{debug, info, trace, warn};

use crate::error::{Error, Result};
use crate::protocol::parse_version;

use super::{Connection, Transport};

// ============================================================================
// ConnectionPool
// ============================================================================

/// Owns one optional connection per slot.
///
/// Not internally synchronized: callers issue one operation at a time per
/// pool. Every receive overwrites [`last_message`](Self::last_message).
pub struct ConnectionPool {
    /// Server host name or address.
    host: String,

    /// Port of slot 0.
    base_port: u16,

    /// Connection per slot, `None` when unconnected.
    slots: Vec<Option<Connection>>,

    /// Deadline for each connect attempt.
    connect_timeout: Option<Duration>,

    /// Read/write deadline for every send and receive.
    response_timeout: Option<Duration>,

    /// Log wire traffic at debug instead of trace level.
    debug: bool,

    /// Version from the most recent handshake.
    server_version: Option<f64>,

    /// Most recently received text from any slot.
    last_message: String,
}

// ============================================================================
// ConnectionPool - Constructor
// ============================================================================

impl ConnectionPool {
    /// Creates a pool with `slot_count` unconnected slots.
    ///
    /// No socket is opened until [`connect_all`](Self::connect_all).
    #[must_use]
    pub fn new(host: impl Into<String>, base_port: u16, slot_count: usize) -> Self {
        Self {
            host: host.into(),
            base_port,
            slots: (0..slot_count).map(|_| None).collect(),
            connect_timeout: None,
            response_timeout: None,
            debug: false,
            server_version: None,
            last_message: String::new(),
        }
    }

    /// Sets the deadline for each connect attempt.
    #[inline]
    #[must_use]
    pub fn with_connect_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Sets the read/write deadline applied to every socket.
    #[inline]
    #[must_use]
    pub fn with_response_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.response_timeout = timeout;
        self
    }

    /// Logs wire traffic at debug level.
    #[inline]
    #[must_use]
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }
}

// ============================================================================
// ConnectionPool - Accessors
// ============================================================================

impl ConnectionPool {
    /// Returns the server host.
    #[inline]
    #[must_use]
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Returns the port of slot 0.
    #[inline]
    #[must_use]
    pub fn base_port(&self) -> u16 {
        self.base_port
    }

    /// Returns the fixed number of slots.
    #[inline]
    #[must_use]
    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    /// Returns the number of connected slots.
    #[must_use]
    pub fn connected_count(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    /// Returns `true` if `slot` holds a live connection.
    #[inline]
    #[must_use]
    pub fn is_connected(&self, slot: usize) -> bool {
        matches!(self.slots.get(slot), Some(Some(_)))
    }

    /// Returns the connection of `slot`, if connected.
    #[inline]
    #[must_use]
    pub fn connection(&self, slot: usize) -> Option<&Connection> {
        self.slots.get(slot).and_then(Option::as_ref)
    }

    /// Returns the version read at the most recent handshake.
    #[inline]
    #[must_use]
    pub fn server_version(&self) -> Option<f64> {
        self.server_version
    }

    /// Returns the most recently received text from any slot.
    #[inline]
    #[must_use]
    pub fn last_message(&self) -> &str {
        &self.last_message
    }

    /// Returns the TCP port of `slot`.
    ///
    /// # Errors
    ///
    /// - [`Error::SlotOutOfRange`] if `slot` is not below the slot count
    /// - [`Error::Config`] if the port would exceed 65535
    pub fn port_for(&self, slot: usize) -> Result<u16> {
        self.check_slot(slot)?;
        u16::try_from(slot)
            .ok()
            .and_then(|offset| self.base_port.checked_add(offset))
            .ok_or_else(|| {
                Error::config(format!(
                    "slot {slot} maps past the last TCP port (base port {})",
                    self.base_port
                ))
            })
    }
}

// ============================================================================
// ConnectionPool - Lifecycle
// ============================================================================

impl ConnectionPool {
    /// Connects every slot in index order and reads each handshake.
    ///
    /// Stops at the first failure. Slots connected before the failure stay
    /// connected; [`disconnect_all`](Self::disconnect_all) closes them.
    ///
    /// # Errors
    ///
    /// - [`Error::Connection`] if a socket cannot be connected
    /// - [`Error::Handshake`] if a peer does not greet with its version
    /// - any receive error raised while reading the greeting
    pub fn connect_all(&mut self) -> Result<()> {
        for slot in 0..self.slot_count() {
            self.connect(slot)?;
        }

        info!(
            host = %self.host,
            base_port = self.base_port,
            slots = self.slot_count(),
            "All slots connected"
        );
        Ok(())
    }

    /// Connects one slot and reads its handshake.
    ///
    /// # Errors
    ///
    /// See [`connect_all`](Self::connect_all).
    pub fn connect(&mut self, slot: usize) -> Result<f64> {
        let port = self.port_for(slot)?;
        let stream = self.open_stream(port)?;
        self.attach(slot, Box::new(stream))
    }

    /// Installs an established stream on `slot` and reads its handshake.
    ///
    /// A connection already on the slot is closed first. The stream stays
    /// installed even if the handshake fails.
    ///
    /// # Errors
    ///
    /// - [`Error::SlotOutOfRange`] if `slot` is out of range
    /// - [`Error::Handshake`] if the first message is not a version greeting
    /// - any receive error raised while reading the greeting
    pub fn attach(&mut self, slot: usize, stream: Box<dyn Transport>) -> Result<f64> {
        let port = self.port_for(slot)?;

        let connection = Connection::new(stream, self.response_timeout);
        if let Some(previous) = self.slots[slot].replace(connection) {
            debug!(slot, "Replacing existing connection");
            previous.close();
        }

        let greeting = self.receive(slot)?;
        let version = parse_version(&greeting).ok_or_else(|| {
            Error::handshake(
                format!("{}:{port}", self.host),
                greeting.trim_end_matches(['\r', '\n']),
            )
        })?;

        self.server_version = Some(version);
        debug!(slot, port, version, "Handshake completed");
        Ok(version)
    }

    /// Closes every connected slot.
    ///
    /// Never fails; calling it again is a no-op.
    pub fn disconnect_all(&mut self) {
        let mut closed = 0usize;

        for (slot, entry) in self.slots.iter_mut().enumerate() {
            if let Some(connection) = entry.take() {
                connection.close();
                closed += 1;
                debug!(slot, "Slot disconnected");
            }
        }

        if closed > 0 {
            info!(closed, "Disconnected from netplot server");
        }
    }

    /// Opens a TCP stream to `host:port`, trying every resolved address.
    fn open_stream(&self, port: u16) -> Result<TcpStream> {
        let address = format!("{}:{port}", self.host);
        let candidates = (self.host.as_str(), port)
            .to_socket_addrs()
            .map_err(|e| Error::connection(format!("Failed to resolve {address}: {e}")))?;

        let mut last_error = None;
        for addr in candidates {
            let attempt = match self.connect_timeout {
                Some(timeout) => TcpStream::connect_timeout(&addr, timeout),
                None => TcpStream::connect(addr),
            };

            match attempt {
                Ok(stream) => {
                    self.configure(&stream)?;
                    debug!(%addr, "Connected");
                    return Ok(stream);
                }
                Err(e) => {
                    debug!(%addr, error = %e, "Connect attempt failed");
                    last_error = Some(e);
                }
            }
        }

        let message = match last_error {
            Some(e) => format!("Failed to connect to {address}: {e}"),
            None => format!("No addresses resolved for {address}"),
        };
        warn!(%address, "{message}");
        Err(Error::connection(message))
    }

    /// Disables send coalescing and applies the response deadline.
    fn configure(&self, stream: &TcpStream) -> Result<()> {
        stream.set_nodelay(true)?;
        stream.set_read_timeout(self.response_timeout)?;
        stream.set_write_timeout(self.response_timeout)?;
        Ok(())
    }
}

// ============================================================================
// ConnectionPool - I/O
// ============================================================================

impl ConnectionPool {
    /// Sends text on `slot` in one write.
    ///
    /// # Errors
    ///
    /// - [`Error::SlotOutOfRange`] if `slot` is out of range
    /// - [`Error::NotConnected`] if the slot has no connection
    /// - [`Error::PartialWrite`], [`Error::Timeout`], [`Error::Io`] from the write
    pub fn send(&mut self, slot: usize, text: &str) -> Result<()> {
        self.log_wire(slot, "TX", text);
        self.connection_mut(slot)?.send(text)
    }

    /// Receives the complete lines available on `slot`.
    ///
    /// The text is kept as [`last_message`](Self::last_message).
    ///
    /// # Errors
    ///
    /// - [`Error::SlotOutOfRange`] if `slot` is out of range
    /// - [`Error::NotConnected`] if the slot has no connection
    /// - [`Error::ConnectionClosed`], [`Error::Timeout`], [`Error::Protocol`],
    ///   [`Error::Io`] from the read
    pub fn receive(&mut self, slot: usize) -> Result<String> {
        let text = self.connection_mut(slot)?.receive()?;
        self.log_wire(slot, "RX", &text);
        self.last_message.clone_from(&text);
        Ok(text)
    }

    fn check_slot(&self, slot: usize) -> Result<()> {
        if slot < self.slots.len() {
            Ok(())
        } else {
            Err(Error::slot_out_of_range(slot, self.slots.len()))
        }
    }

    fn connection_mut(&mut self, slot: usize) -> Result<&mut Connection> {
        self.check_slot(slot)?;
        self.slots[slot]
            .as_mut()
            .ok_or_else(|| Error::not_connected(slot))
    }

    fn log_wire(&self, slot: usize, direction: &'static str, text: &str) {
        if self.debug {
            debug!(slot, direction, text = %text.escape_debug(), "Wire traffic");
        } else {
            trace!(slot, direction, text = %text.escape_debug(), "Wire traffic");
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
