//! Netplot text protocol.
//!
//! Pure encode/decode, no I/O.
//!
//! # Protocol Overview
//!
//! | Direction | Format | Notes |
//! |-----------|--------|-------|
//! | Server → Client | `netplot_version=<float>` | Once, right after connect |
//! | Client → Server | [`Command`] line | `\n`-terminated ASCII |
//! | Server → Client | text containing `OK` | Success |
//! | Server → Client | text containing `ERROR` | Application error |
//!
//! # Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | `command` | Command definitions and number formatting |
//! | `response` | Response classification and handshake parsing |

// ============================================================================
// Submodules
// ============================================================================

/// Command definitions and encoding.
pub mod command;

/// Response classification.
pub mod response;

// ============================================================================
// Re-exports
// ============================================================================

pub use command::{Command, fixed, keys, scientific};
pub use response::{ACK_TOKEN, ERROR_TOKEN, Response, count_acks, parse_version};
