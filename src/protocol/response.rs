//! Response classification.
//!
//! The server answers every command with a line containing `OK`, or a line
//! containing `ERROR` (usually `ERROR: <reason>`). Right after a connection
//! is accepted it sends `netplot_version=<float>` once.
//!
//! The error token is tested before the success token. A response carrying
//! both (for example an echoed plot title) classifies as an error.

// ============================================================================
// Imports
// ============================================================================

use std::sync::LazyLock;

use regex::Regex;

use crate::error::{Error, Result};

// ============================================================================
// Constants
// ============================================================================

/// Success token.
pub const ACK_TOKEN: &str = "OK";

/// Error token.
pub const ERROR_TOKEN: &str = "ERROR";

/// Version greeting, e.g. `netplot_version=2.3`.
///
/// `None` only if the constant pattern fails to compile, in which case no
/// greeting is recognized.
static VERSION_RE: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(r"netplot_version=\s*([+-]?(?:\d+(?:\.\d*)?|\.\d+)(?:[eE][+-]?\d+)?)").ok()
});

// ============================================================================
// Response
// ============================================================================

/// Classification of one received chunk of text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Response {
    /// Contains the success token.
    Ack,
    /// Contains the error token; holds the raw text.
    Error(String),
    /// Contains neither token; holds the raw text.
    Unrecognized(String),
}

impl Response {
    /// Classifies raw response text.
    #[must_use]
    pub fn classify(text: &str) -> Self {
        if text.contains(ERROR_TOKEN) {
            Self::Error(text.to_string())
        } else if text.contains(ACK_TOKEN) {
            Self::Ack
        } else {
            Self::Unrecognized(text.to_string())
        }
    }

    /// Returns `true` if this is a success acknowledgement.
    #[inline]
    #[must_use]
    pub fn is_ack(&self) -> bool {
        matches!(self, Self::Ack)
    }

    /// Converts the classification into a result.
    ///
    /// # Errors
    ///
    /// - [`Error::ServerError`] if the server reported an error
    /// - [`Error::Protocol`] if the text carried neither token
    pub fn into_result(self) -> Result<()> {
        match self {
            Self::Ack => Ok(()),
            Self::Error(text) => Err(Error::server_error(&text)),
            Self::Unrecognized(text) => Err(Error::protocol(format!(
                "unexpected response: {}",
                text.trim_end_matches(['\r', '\n'])
            ))),
        }
    }
}

// ============================================================================
// Helpers
// ============================================================================

/// Counts every occurrence of the success token.
///
/// A batched send is answered with one acknowledgement per command, and
/// several may arrive in a single read.
#[inline]
#[must_use]
pub fn count_acks(text: &str) -> usize {
    text.matches(ACK_TOKEN).count()
}

/// Parses the server version from the greeting line.
///
/// Returns `None` if the text carries no `netplot_version=<float>`.
#[must_use]
pub fn parse_version(text: &str) -> Option<f64> {
    VERSION_RE
        .as_ref()?
        .captures(text)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse::<f64>().ok())
}

// ============================================================================
// Tests
// ============================================================================
