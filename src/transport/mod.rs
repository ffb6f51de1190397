//! TCP transport layer.
//!
//! This module owns the sockets: one stream per slot, each connected to
//! `host:base_port + slot`.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────┐                      ┌──────────────────────┐
//! │  ConnectionPool      │   TCP base_port + 0  │  Netplot GUI         │
//! │   slot 0 Connection  │◄────────────────────►│   plot area 0        │
//! │   slot 1 Connection  │◄────────────────────►│   plot area 1        │
//! │   ...                │   TCP base_port + n  │   ...                │
//! └──────────────────────┘                      └──────────────────────┘
//! ```
//!
//! # Connection Lifecycle
//!
//! 1. `ConnectionPool::connect_all` - Connect slots in index order
//! 2. Handshake - Read `netplot_version=<float>` once per slot
//! 3. `Connection::send` / `Connection::receive` - Blocking command/ack
//! 4. `ConnectionPool::disconnect_all` - Close every slot
//!
//! # Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | `connection` | One slot's stream and framer |
//! | `framer` | Line framing over partial reads |
//! | `pool` | Fixed set of slot connections |

// ============================================================================
// Imports
// ============================================================================

use std::io::{self, Read, Write};
use std::net::{Shutdown, TcpStream};

// ============================================================================
// Submodules
// ============================================================================

/// Single slot connection.
pub mod connection;

/// Line framing.
pub mod framer;

/// Slot connection pool.
pub mod pool;

#[cfg(test)]
pub(crate) mod mock;

// ============================================================================
// Re-exports
// ============================================================================

pub use connection::Connection;
pub use framer::{LineFramer, MAX_FRAME_BYTES};
pub use pool::ConnectionPool;

// ============================================================================
// Transport
// ============================================================================

/// Byte stream carrying one slot's traffic.
///
/// Implemented for [`TcpStream`]. Other streams (tunnels, test doubles) can
/// be installed with [`ConnectionPool::attach`].
pub trait Transport: Read + Write + Send {
    /// Closes both directions of the stream.
    fn close(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Transport for TcpStream {
    fn close(&mut self) -> io::Result<()> {
        TcpStream::shutdown(self, Shutdown::Both)
    }
}
