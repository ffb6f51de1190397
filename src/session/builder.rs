//! Builder pattern for session configuration.
//!
//! Provides a fluent API for configuring and creating [`Session`] instances.
//!
//! # Example
//!
//! ```no_run
//! use std::time::Duration;
//!
//! use netplot_client::Session;
//!
//! # fn example() -> netplot_client::Result<()> {
//! let mut session = Session::builder()
//!     .host("192.168.1.20")
//!     .slots(4)
//!     .response_timeout(Some(Duration::from_secs(5)))
//!     .build()?;
//!
//! session.connect()?;
//! # Ok(())
//! # }
//! ```

// ============================================================================
// Imports
// ============================================================================

use std::time::Duration;

use crate::error::Result;

use super::core::Session;
use super::options::SessionOptions;

// ============================================================================
// SessionBuilder
// ============================================================================

/// Builder for configuring a [`Session`] instance.
///
/// Use [`Session::builder()`] to create a new builder.
#[derive(Debug, Default, Clone)]
pub struct SessionBuilder {
    options: SessionOptions,
}

// ============================================================================
// SessionBuilder Implementation
// ============================================================================

impl SessionBuilder {
    /// Creates a builder with default options.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces all options at once, e.g. after loading them from a file.
    #[inline]
    #[must_use]
    pub fn options(mut self, options: SessionOptions) -> Self {
        self.options = options;
        self
    }

    /// Sets the server host name or address.
    #[inline]
    #[must_use]
    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.options.host = host.into();
        self
    }

    /// Sets the TCP port of slot 0.
    #[inline]
    #[must_use]
    pub fn base_port(mut self, port: u16) -> Self {
        self.options.base_port = port;
        self
    }

    /// Sets the number of slots.
    ///
    /// # Arguments
    ///
    /// * `count` - Number of plot areas, one TCP connection each
    #[inline]
    #[must_use]
    pub fn slots(mut self, count: usize) -> Self {
        self.options.slot_count = count;
        self
    }

    /// Logs wire traffic at debug level.
    #[inline]
    #[must_use]
    pub fn debug(mut self, enabled: bool) -> Self {
        self.options.debug = enabled;
        self
    }

    /// Bounds each connect attempt.
    #[inline]
    #[must_use]
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.options = self.options.with_connect_timeout(timeout);
        self
    }

    /// Sets the send/receive deadline. `None` blocks indefinitely.
    #[inline]
    #[must_use]
    pub fn response_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.options = self.options.with_response_timeout(timeout);
        self
    }

    /// Flushes batched values automatically above `commands` commands.
    #[inline]
    #[must_use]
    pub fn cache_flush_threshold(mut self, commands: usize) -> Self {
        self.options.cache_flush_threshold = Some(commands);
        self
    }

    /// Builds the session with validation.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`](crate::Error::Config) if the options are
    /// invalid.
    pub fn build(self) -> Result<Session> {
        Session::new(self.options)
    }
}

// ============================================================================
// Tests
// ============================================================================
