//! Line framing over a byte stream.
//!
//! TCP does not preserve write boundaries, so one acknowledgement can arrive
//! split over two reads and several can arrive in one. The framer buffers
//! bytes and releases them only up to the last complete line.

// ============================================================================
// Constants
// ============================================================================

/// Upper bound for buffered bytes without a line terminator (64 KiB).
pub const MAX_FRAME_BYTES: usize = 65536;

// ============================================================================
// LineFramer
// ============================================================================

/// Accumulates received bytes and yields complete `\n`-terminated lines.
#[derive(Debug, Default)]
pub struct LineFramer {
    buffer: Vec<u8>,
}

impl LineFramer {
    /// Creates an empty framer.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends received bytes.
    #[inline]
    pub fn push(&mut self, bytes: &[u8]) {
        self.buffer.extend_from_slice(bytes);
    }

    /// Takes every complete line currently buffered.
    ///
    /// Returns `None` until at least one `\n` has been received. The text
    /// after the last terminator stays buffered.
    pub fn take_lines(&mut self) -> Option<String> {
        let end = self.buffer.iter().rposition(|&b| b == b'\n')?;
        let lines: Vec<u8> = self.buffer.drain(..=end).collect();
        Some(String::from_utf8_lossy(&lines).into_owned())
    }

    /// Number of buffered bytes not yet released.
    #[inline]
    #[must_use]
    pub fn pending(&self) -> usize {
        self.buffer.len()
    }

    /// Returns `true` if an unterminated frame has outgrown [`MAX_FRAME_BYTES`].
    #[inline]
    #[must_use]
    pub fn is_overflowing(&self) -> bool {
        self.buffer.len() >= MAX_FRAME_BYTES
    }

    /// Drops all buffered bytes.
    #[inline]
    pub fn clear(&mut self) {
        self.buffer.clear();
    }
}

// ============================================================================
// Tests
// ============================================================================
