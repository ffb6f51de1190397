//! Batch buffer for deferred value pushes.
//!
//! Holds zero or more encoded commands, each ending in `\n`, that have not
//! been sent yet. The content is always a concatenation of whole commands,
//! so the number of commands equals the number of `\n` bytes.

// ============================================================================
// Imports
// ============================================================================

use crate::error::{Error, Result};
use crate::protocol::Command;

// ============================================================================
// BatchBuffer
// ============================================================================

/// Append-only accumulator of encoded commands.
///
/// Storage is allocated on the first append and released by
/// [`take`](Self::take) or [`clear`](Self::clear).
#[derive(Debug, Default)]
pub struct BatchBuffer {
    data: String,
    commands: usize,
}

impl BatchBuffer {
    /// Creates an empty buffer without allocating.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends one or more encoded commands.
    ///
    /// On failure the buffer keeps its previous content.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidArgument`] if `text` is empty or does not end in `\n`
    /// - [`Error::Allocation`] if the buffer cannot grow
    pub fn append(&mut self, text: &str) -> Result<()> {
        if !text.ends_with('\n') {
            return Err(Error::invalid_argument(
                "batched command must end with a line terminator",
            ));
        }

        self.data
            .try_reserve(text.len())
            .map_err(|_| Error::allocation(self.data.len().saturating_add(text.len())))?;
        self.data.push_str(text);
        self.commands += text.bytes().filter(|&b| b == b'\n').count();
        Ok(())
    }

    /// Encodes and appends a command.
    ///
    /// # Errors
    ///
    /// See [`append`](Self::append).
    pub fn append_command(&mut self, command: &Command) -> Result<()> {
        self.append(&command.encode())
    }

    /// Appends a value list as a single command.
    ///
    /// # Errors
    ///
    /// See [`append`](Self::append).
    pub fn append_values(&mut self, values: &[f64]) -> Result<()> {
        self.append_command(&Command::Values(values.to_vec()))
    }

    /// Returns `true` if nothing is buffered.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns the buffered text.
    #[inline]
    #[must_use]
    pub fn contents(&self) -> &str {
        &self.data
    }

    /// Returns the buffered length in bytes.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns the number of buffered commands.
    #[inline]
    #[must_use]
    pub fn command_count(&self) -> usize {
        self.commands
    }

    /// Discards the content and releases the storage.
    pub fn clear(&mut self) {
        self.data = String::new();
        self.commands = 0;
    }

    /// Removes and returns the content, leaving the buffer empty.
    #[must_use]
    pub fn take(&mut self) -> String {
        self.commands = 0;
        std::mem::take(&mut self.data)
    }
}

// ============================================================================
// Tests
// ============================================================================
