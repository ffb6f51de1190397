//! Netplot client - drive a remote plotting GUI over TCP.
//!
//! This library speaks the netplot text protocol: newline-terminated ASCII
//! commands, each answered by a short acknowledgement.
//!
//! # Architecture
//!
//! The client follows a slot model:
//!
//! - **Session**: Plotting API, batch buffer, one connection per slot
//! - **Server (GUI)**: One plot area per slot, listening on `base_port + slot`
//!
//! Key design principles:
//!
//! - Every call blocks until acknowledged, failed, or timed out
//! - Slot count is fixed when the session is created
//! - Value pushes can be batched and flushed in one write
//! - Responses are framed by line, however the stream splits them
//!
//! # Quick Start
//!
//! ```no_run
//! use netplot_client::{PlotConfig, PlotType, Result, Session};
//!
//! fn main() -> Result<()> {
//!     let mut session = Session::builder()
//!         .host("127.0.0.1")
//!         .slots(1)
//!         .build()?;
//!     session.connect()?;
//!
//!     session.set_plot_type(0, PlotType::Time, "Temperature")?;
//!     session.add_plot(0, &PlotConfig::new("sensor A"))?;
//!
//!     session.enable_cache(true);
//!     for value in [20.5, 20.7, 21.0] {
//!         session.add_plot_values(0, &[value])?;
//!     }
//!     session.update(0)?;
//!
//!     session.disconnect();
//!     Ok(())
//! }
//! ```
//!
//! # Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`error`] | Error types and [`Result`] alias |
//! | [`plot`] | Plot value objects: [`PlotConfig`], [`PlotType`], [`TimeSeriesPoint`] |
//! | [`protocol`] | Command encoding and response classification |
//! | [`session`] | [`Session`] plotting API and configuration |
//! | [`transport`] | TCP slot connections and line framing |

// ============================================================================
// Modules
// ============================================================================

/// Error types and result aliases.
///
/// All fallible operations return [`Result<T>`] which uses [`Error`].
pub mod error;

/// Plot value objects.
pub mod plot;

/// Netplot text protocol.
///
/// Pure encode/decode of commands and responses.
pub mod protocol;

/// Plotting session.
///
/// Use [`Session::builder()`] to create a configured session.
pub mod session;

/// TCP transport layer.
///
/// Slot connections, line framing and the [`Transport`] seam.
pub mod transport;

// ============================================================================
// Re-exports
// ============================================================================

// Error types
pub use error::{Error, Result};

// Plot types
pub use plot::{PlotConfig, PlotType, TimeSeriesPoint};

// Protocol types
pub use protocol::{Command, Response};

// Session types
pub use session::{BatchBuffer, Session, SessionBuilder, SessionOptions};

// Transport types
pub use transport::Transport;
