//! Session configuration.
//!
//! # Example
//!
//! ```
//! use netplot_client::SessionOptions;
//!
//! let options = SessionOptions::new()
//!     .with_host("192.168.1.20")
//!     .with_slot_count(4)
//!     .with_debug();
//!
//! assert!(options.validate().is_ok());
//! ```
//!
//! # Defaults
//!
//! | Field | Default |
//! |-------|---------|
//! | `host` | `127.0.0.1` |
//! | `base_port` | `9600` |
//! | `slot_count` | `100` |
//! | `debug` | `false` |
//! | `connect_timeout_ms` | none |
//! | `response_timeout_ms` | `30000` |
//! | `cache_flush_threshold` | none |

// ============================================================================
// Imports
// ============================================================================

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

// ============================================================================
// Constants
// ============================================================================

/// Default server host.
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Default port of slot 0.
pub const DEFAULT_BASE_PORT: u16 = 9600;

/// Default number of slots.
pub const DEFAULT_SLOT_COUNT: usize = 100;

/// Default send/receive deadline in milliseconds.
pub const DEFAULT_RESPONSE_TIMEOUT_MS: u64 = 30_000;

// ============================================================================
// SessionOptions
// ============================================================================

/// Connection and behavior settings for a [`Session`](super::Session).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionOptions {
    /// Server host name or address.
    pub host: String,

    /// TCP port of slot 0; slot `i` uses `base_port + i`.
    pub base_port: u16,

    /// Number of slots, fixed for the session's lifetime.
    pub slot_count: usize,

    /// Log wire traffic at debug level.
    pub debug: bool,

    /// Deadline for each connect attempt. `None` uses the OS default.
    pub connect_timeout_ms: Option<u64>,

    /// Read/write deadline per call. `None` blocks indefinitely.
    pub response_timeout_ms: Option<u64>,

    /// Flush automatically once more than this many commands are batched.
    pub cache_flush_threshold: Option<usize>,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Constructors
// ============================================================================

impl SessionOptions {
    /// Creates options with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            base_port: DEFAULT_BASE_PORT,
            slot_count: DEFAULT_SLOT_COUNT,
            debug: false,
            connect_timeout_ms: None,
            response_timeout_ms: Some(DEFAULT_RESPONSE_TIMEOUT_MS),
            cache_flush_threshold: None,
        }
    }
}

// ============================================================================
// Builder Methods
// ============================================================================

impl SessionOptions {
    /// Sets the server host.
    #[inline]
    #[must_use]
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    /// Sets the port of slot 0.
    #[inline]
    #[must_use]
    pub fn with_base_port(mut self, port: u16) -> Self {
        self.base_port = port;
        self
    }

    /// Sets the number of slots.
    #[inline]
    #[must_use]
    pub fn with_slot_count(mut self, slots: usize) -> Self {
        self.slot_count = slots;
        self
    }

    /// Enables wire logging at debug level.
    #[inline]
    #[must_use]
    pub fn with_debug(mut self) -> Self {
        self.debug = true;
        self
    }

    /// Sets the connect deadline.
    #[inline]
    #[must_use]
    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout_ms = Some(duration_ms(timeout));
        self
    }

    /// Sets the send/receive deadline. `None` blocks indefinitely.
    #[inline]
    #[must_use]
    pub fn with_response_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.response_timeout_ms = timeout.map(duration_ms);
        self
    }

    /// Enables automatic flushing above `commands` batched commands.
    #[inline]
    #[must_use]
    pub fn with_cache_flush_threshold(mut self, commands: usize) -> Self {
        self.cache_flush_threshold = Some(commands);
        self
    }
}

// ============================================================================
// Accessors
// ============================================================================

impl SessionOptions {
    /// Returns the connect deadline as a [`Duration`].
    #[inline]
    #[must_use]
    pub fn connect_timeout(&self) -> Option<Duration> {
        self.connect_timeout_ms.map(Duration::from_millis)
    }

    /// Returns the send/receive deadline as a [`Duration`].
    #[inline]
    #[must_use]
    pub fn response_timeout(&self) -> Option<Duration> {
        self.response_timeout_ms.map(Duration::from_millis)
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if:
    /// - the host is empty
    /// - the slot count is zero
    /// - the last slot's port would exceed 65535
    /// - a timeout is zero
    /// - the flush threshold is zero
    pub fn validate(&self) -> Result<()> {
        if self.host.trim().is_empty() {
            return Err(Error::config("Host must not be empty"));
        }

        if self.slot_count == 0 {
            return Err(Error::config("Slot count must be at least 1"));
        }

        let last_offset = self.slot_count - 1;
        let last_port = u16::try_from(last_offset)
            .ok()
            .and_then(|offset| self.base_port.checked_add(offset));
        if last_port.is_none() {
            return Err(Error::config(format!(
                "{} slots starting at port {} exceed the TCP port range",
                self.slot_count, self.base_port
            )));
        }

        if self.connect_timeout_ms == Some(0) {
            return Err(Error::config("Connect timeout must be greater than zero"));
        }

        if self.response_timeout_ms == Some(0) {
            return Err(Error::config("Response timeout must be greater than zero"));
        }

        if self.cache_flush_threshold == Some(0) {
            return Err(Error::config(
                "Cache flush threshold must be greater than zero",
            ));
        }

        Ok(())
    }
}

fn duration_ms(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = SessionOptions::default();
        assert_eq!(options.host, "127.0.0.1");
        assert_eq!(options.base_port, 9600);
        assert_eq!(options.slot_count, 100);
        assert!(!options.debug);
        assert_eq!(options.connect_timeout(), None);
        assert_eq!(options.response_timeout(), Some(Duration::from_secs(30)));
        assert_eq!(options.cache_flush_threshold, None);
        assert!(options.validate().is_ok());
    }

    #[test]
    fn test_builder_methods() {
        let options = SessionOptions::new()
            .with_host("plotter.local")
            .with_base_port(10_000)
            .with_slot_count(4)
            .with_debug()
            .with_connect_timeout(Duration::from_secs(2))
            .with_response_timeout(None)
            .with_cache_flush_threshold(50);

        assert_eq!(options.host, "plotter.local");
        assert_eq!(options.base_port, 10_000);
        assert_eq!(options.slot_count, 4);
        assert!(options.debug);
        assert_eq!(options.connect_timeout_ms, Some(2000));
        assert_eq!(options.response_timeout(), None);
        assert_eq!(options.cache_flush_threshold, Some(50));
    }

    #[test]
    fn test_validate_rejects_empty_host() {
        let options = SessionOptions::new().with_host("  ");
        assert!(matches!(options.validate(), Err(Error::Config { .. })));
    }

    #[test]
    fn test_validate_rejects_zero_slots() {
        let options = SessionOptions::new().with_slot_count(0);
        assert!(matches!(options.validate(), Err(Error::Config { .. })));
    }

    #[test]
    fn test_validate_port_range() {
        let fits = SessionOptions::new()
            .with_base_port(65_500)
            .with_slot_count(36);
        assert!(fits.validate().is_ok());

        let overflows = SessionOptions::new()
            .with_base_port(65_500)
            .with_slot_count(37);
        assert!(matches!(overflows.validate(), Err(Error::Config { .. })));
    }

    #[test]
    fn test_validate_rejects_zero_values() {
        let mut options = SessionOptions::new();
        options.response_timeout_ms = Some(0);
        assert!(options.validate().is_err());

        let mut options = SessionOptions::new();
        options.connect_timeout_ms = Some(0);
        assert!(options.validate().is_err());

        let options = SessionOptions::new().with_cache_flush_threshold(0);
        assert!(options.validate().is_err());
    }

    #[test]
    fn test_deserialize_partial_json() {
        let options: SessionOptions =
            serde_json::from_str(r#"{"host":"10.0.0.5","slot_count":2}"#).unwrap();
        assert_eq!(options.host, "10.0.0.5");
        assert_eq!(options.slot_count, 2);
        assert_eq!(options.base_port, DEFAULT_BASE_PORT);
        assert_eq!(
            options.response_timeout_ms,
            Some(DEFAULT_RESPONSE_TIMEOUT_MS)
        );
    }
}
