//! Error types for the netplot client.
//!
//! This module defines all error types used throughout the crate.
//!
//! # Usage
//!
//! All fallible operations return [`Result<T>`] which uses [`Error`]:
//!
//! ```ignore
//! use netplot_client::{Result, Session};
//!
//! fn example(session: &mut Session) -> Result<()> {
//!     session.set_grid(2, 2)?;
//!     session.set_window_title("Telemetry")?;
//!     Ok(())
//! }
//! ```
//!
//! # Error Categories
//!
//! | Category | Variants |
//! |----------|----------|
//! | Configuration | [`Error::Config`] |
//! | Connection | [`Error::Connection`], [`Error::Handshake`], [`Error::NotConnected`], [`Error::ConnectionClosed`] |
//! | Transport | [`Error::PartialWrite`], [`Error::Timeout`], [`Error::Io`] |
//! | Protocol | [`Error::ServerError`], [`Error::Protocol`] |
//! | Arguments | [`Error::InvalidArgument`], [`Error::SlotOutOfRange`] |
//! | Resources | [`Error::Allocation`] |

// ============================================================================
// Imports
// ============================================================================

use std::io::Error as IoError;
use std::result::Result as StdResult;

use thiserror::Error;

// ============================================================================
// Result Alias
// ============================================================================

/// Result type alias using crate [`enum@Error`].
///
/// All fallible operations in this crate return this type.
pub type Result<T> = StdResult<T, Error>;

// ============================================================================
// Error Enum
// ============================================================================

/// Main error type for the crate.
///
/// Nothing is retried internally; every variant reaches the immediate caller.
#[derive(Error, Debug)]
pub enum Error {
    // ========================================================================
    // Configuration Errors
    // ========================================================================
    /// Configuration error.
    ///
    /// Returned when session options fail validation.
    #[error("Configuration error: {message}")]
    Config {
        /// Description of the configuration error.
        message: String,
    },

    // ========================================================================
    // Connection Errors
    // ========================================================================
    /// TCP connection could not be established.
    #[error("Connection failed: {message}")]
    Connection {
        /// Description of the connection error.
        message: String,
    },

    /// Peer did not greet with a `netplot_version=` line.
    #[error("{address} is not a netplot server. Received: {received}")]
    Handshake {
        /// Address of the peer.
        address: String,
        /// Text received instead of the version line.
        received: String,
    },

    /// Write attempted on a slot with no live connection.
    #[error("Slot {slot} is not connected")]
    NotConnected {
        /// Slot index.
        slot: usize,
    },

    /// Peer closed the connection (zero-byte read).
    #[error("Connection closed")]
    ConnectionClosed,

    // ========================================================================
    // Transport Errors
    // ========================================================================
    /// Socket accepted fewer bytes than the command length.
    #[error("Partial write: {written} of {expected} bytes sent")]
    PartialWrite {
        /// Bytes accepted by the socket.
        written: usize,
        /// Bytes that should have been sent.
        expected: usize,
    },

    /// Send or receive deadline expired.
    #[error("Timeout after {timeout_ms}ms: {operation}")]
    Timeout {
        /// Description of the operation that timed out.
        operation: String,
        /// Milliseconds waited before timeout.
        timeout_ms: u64,
    },

    // ========================================================================
    // Protocol Errors
    // ========================================================================
    /// Server answered with an error response.
    ///
    /// `message` is the raw response text with line terminators trimmed.
    #[error("Server error: {message}")]
    ServerError {
        /// Response text reported by the server.
        message: String,
    },

    /// Response could not be interpreted.
    #[error("Protocol error: {message}")]
    Protocol {
        /// Description of the protocol violation.
        message: String,
    },

    // ========================================================================
    // Argument Errors
    // ========================================================================
    /// Invalid argument supplied by the caller.
    #[error("Invalid argument: {message}")]
    InvalidArgument {
        /// Description of the invalid argument.
        message: String,
    },

    /// Slot index outside the session's fixed slot range.
    #[error("Slot {slot} out of range (session has {slot_count} slots)")]
    SlotOutOfRange {
        /// Requested slot index.
        slot: usize,
        /// Number of slots in the session.
        slot_count: usize,
    },

    // ========================================================================
    // Resource Errors
    // ========================================================================
    /// Batch buffer could not grow.
    #[error("Failed to allocate {requested} bytes for the batch buffer")]
    Allocation {
        /// Bytes requested.
        requested: usize,
    },

    // ========================================================================
    // External Errors
    // ========================================================================
    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] IoError),
}

// ============================================================================
// Error Constructors
// ============================================================================

impl Error {
    /// Creates a configuration error.
    #[inline]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Creates a connection error.
    #[inline]
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Creates a handshake error.
    #[inline]
    pub fn handshake(address: impl Into<String>, received: impl Into<String>) -> Self {
        Self::Handshake {
            address: address.into(),
            received: received.into(),
        }
    }

    /// Creates a not connected error.
    #[inline]
    pub fn not_connected(slot: usize) -> Self {
        Self::NotConnected { slot }
    }

    /// Creates a partial write error.
    #[inline]
    pub fn partial_write(written: usize, expected: usize) -> Self {
        Self::PartialWrite { written, expected }
    }

    /// Creates a timeout error.
    #[inline]
    pub fn timeout(operation: impl Into<String>, timeout_ms: u64) -> Self {
        Self::Timeout {
            operation: operation.into(),
            timeout_ms,
        }
    }

    /// Creates a server error from the raw response text.
    #[inline]
    pub fn server_error(response: &str) -> Self {
        Self::ServerError {
            message: response.trim_end_matches(['\r', '\n']).to_string(),
        }
    }

    /// Creates a protocol error.
    #[inline]
    pub fn protocol(message: impl Into<String>) -> Self {
        Self::Protocol {
            message: message.into(),
        }
    }

    /// Creates an invalid argument error.
    #[inline]
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Creates a slot out of range error.
    #[inline]
    pub fn slot_out_of_range(slot: usize, slot_count: usize) -> Self {
        Self::SlotOutOfRange { slot, slot_count }
    }

    /// Creates an allocation error.
    #[inline]
    pub fn allocation(requested: usize) -> Self {
        Self::Allocation { requested }
    }
}

// ============================================================================
// Error Predicates
// ============================================================================

impl Error {
    /// Returns `true` if this is a timeout error.
    #[inline]
    #[must_use]
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }

    /// Returns `true` if this is a connection or transport error.
    #[inline]
    #[must_use]
    pub fn is_connection_error(&self) -> bool {
        matches!(
            self,
            Self::Connection { .. }
                | Self::Handshake { .. }
                | Self::NotConnected { .. }
                | Self::ConnectionClosed
                | Self::PartialWrite { .. }
                | Self::Timeout { .. }
                | Self::Io(_)
        )
    }

    /// Returns `true` if the server reported the failure.
    #[inline]
    #[must_use]
    pub fn is_server_error(&self) -> bool {
        matches!(self, Self::ServerError { .. })
    }
}

// ============================================================================
// Tests
// ============================================================================
