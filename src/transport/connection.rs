//! A single slot connection.
//!
//! Blocking request/response over one stream. Each send is a single write
//! that must be accepted whole; each receive returns the complete lines
//! available, reading as often as needed to see a terminator.

// ============================================================================
// Imports
// ============================================================================

use std::io::{Error as IoError, ErrorKind};
use std::time::Duration;

use tracing::debug;

use crate::error::{Error, Result};

use super::Transport;
use super::framer::{LineFramer, MAX_FRAME_BYTES};

// ============================================================================
// Constants
// ============================================================================

/// Size of the buffer handed to each read call.
const READ_CHUNK_BYTES: usize = MAX_FRAME_BYTES;

// ============================================================================
// Connection
// ============================================================================

/// One live stream to the server plus its receive framer.
pub struct Connection {
    /// Underlying byte stream.
    stream: Box<dyn Transport>,
    /// Buffers partial responses between reads.
    framer: LineFramer,
    /// Scratch space for read calls.
    scratch: Vec<u8>,
    /// Deadline configured on the stream, for error reporting.
    timeout: Option<Duration>,
    /// Number of read calls issued.
    reads: usize,
}

impl Connection {
    /// Wraps an established stream.
    ///
    /// `timeout` must match the deadline already configured on the stream;
    /// it is only used to describe timeout errors.
    #[must_use]
    pub fn new(stream: Box<dyn Transport>, timeout: Option<Duration>) -> Self {
        Self {
            stream,
            framer: LineFramer::new(),
            scratch: vec![0; READ_CHUNK_BYTES],
            timeout,
            reads: 0,
        }
    }

    /// Sends text in one write call.
    ///
    /// # Errors
    ///
    /// - [`Error::PartialWrite`] if the stream accepted fewer bytes than given
    /// - [`Error::Timeout`] if the write deadline expired
    /// - [`Error::Io`] for any other write failure
    pub fn send(&mut self, text: &str) -> Result<()> {
        let bytes = text.as_bytes();

        let written = loop {
            match self.stream.write(bytes) {
                Ok(n) => break n,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(io_error("send", self.timeout, e)),
            }
        };

        if written != bytes.len() {
            return Err(Error::partial_write(written, bytes.len()));
        }

        self.stream
            .flush()
            .map_err(|e| io_error("send", self.timeout, e))
    }

    /// Receives every complete line available.
    ///
    /// Blocks until at least one `\n` has arrived.
    ///
    /// # Errors
    ///
    /// - [`Error::ConnectionClosed`] if the peer closed the stream
    /// - [`Error::Protocol`] if a frame exceeds 64 KiB without a terminator
    /// - [`Error::Timeout`] if the read deadline expired
    /// - [`Error::Io`] for any other read failure
    pub fn receive(&mut self) -> Result<String> {
        loop {
            if let Some(text) = self.framer.take_lines() {
                return Ok(text);
            }

            if self.framer.is_overflowing() {
                self.framer.clear();
                return Err(Error::protocol(format!(
                    "response exceeds {MAX_FRAME_BYTES} bytes without a line terminator"
                )));
            }

            // Never buffer more than one frame's worth of unterminated bytes.
            let room = MAX_FRAME_BYTES - self.framer.pending();
            let n = match self.stream.read(&mut self.scratch[..room]) {
                Ok(n) => n,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(io_error("receive", self.timeout, e)),
            };
            self.reads += 1;

            if n == 0 {
                return Err(Error::ConnectionClosed);
            }
            self.framer.push(&self.scratch[..n]);
        }
    }

    /// Number of read calls issued on the stream so far.
    #[inline]
    #[must_use]
    pub fn read_count(&self) -> usize {
        self.reads
    }

    /// Bytes received but not yet released as a complete line.
    #[inline]
    #[must_use]
    pub fn pending_bytes(&self) -> usize {
        self.framer.pending()
    }

    /// Closes the stream.
    pub fn close(mut self) {
        if let Err(e) = self.stream.close() {
            debug!(error = %e, "Stream close failed");
        }
    }
}

/// Maps a stream error, turning expired deadlines into [`Error::Timeout`].
fn io_error(operation: &str, timeout: Option<Duration>, err: IoError) -> Error {
    match err.kind() {
        ErrorKind::WouldBlock | ErrorKind::TimedOut => Error::timeout(
            operation,
            timeout.map_or(0, |t| u64::try_from(t.as_millis()).unwrap_or(u64::MAX)),
        ),
        _ => Error::Io(err),
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    use crate::transport::mock::MockTransport;

    fn connection(mock: &MockTransport) -> Connection {
        Connection::new(mock.boxed(), Some(Duration::from_millis(250)))
    }

    #[test]
    fn test_send_writes_once() {
        let mock = MockTransport::new();
        let mut conn = connection(&mock);

        conn.send("init\n").unwrap();
        assert_eq!(mock.written(), "init\n");
        assert_eq!(mock.write_calls(), 1);
    }

    #[test]
    fn test_partial_write_fails() {
        let mock = MockTransport::new();
        mock.limit_writes(3);
        let mut conn = connection(&mock);

        let err = conn.send("add_plot\n").unwrap_err();
        assert!(matches!(
            err,
            Error::PartialWrite {
                written: 3,
                expected: 9
            }
        ));
    }

    #[test]
    fn test_receive_assembles_split_line() {
        let mock = MockTransport::new();
        mock.push_read("O");
        mock.push_read("K\n");
        let mut conn = connection(&mock);

        assert_eq!(conn.receive().unwrap(), "OK\n");
        assert_eq!(conn.read_count(), 2);
        assert_eq!(mock.read_calls(), 2);
        assert_eq!(conn.pending_bytes(), 0);
    }

    #[test]
    fn test_receive_keeps_tail_for_next_call() {
        let mock = MockTransport::new();
        mock.push_read("OK\nO");
        mock.push_read("K\n");
        let mut conn = connection(&mock);

        assert_eq!(conn.receive().unwrap(), "OK\n");
        assert_eq!(conn.pending_bytes(), 1);
        assert_eq!(conn.receive().unwrap(), "OK\n");
        assert_eq!(conn.read_count(), 2);
    }

    #[test]
    fn test_zero_byte_read_is_closed() {
        let mock = MockTransport::new();
        let mut conn = connection(&mock);

        assert!(matches!(conn.receive(), Err(Error::ConnectionClosed)));
    }

    #[test]
    fn test_expired_deadline_is_timeout() {
        let mock = MockTransport::new();
        mock.push_error(ErrorKind::WouldBlock);
        let mut conn = connection(&mock);

        let err = conn.receive().unwrap_err();
        assert!(err.is_timeout());
        assert_eq!(err.to_string(), "Timeout after 250ms: receive");
    }

    #[test]
    fn test_interrupted_read_is_retried() {
        let mock = MockTransport::new();
        mock.push_error(ErrorKind::Interrupted);
        mock.push_read("OK\n");
        let mut conn = connection(&mock);

        assert_eq!(conn.receive().unwrap(), "OK\n");
    }

    #[test]
    fn test_unterminated_frame_stops_at_limit() {
        let mock = MockTransport::new();
        let chunk = "x".repeat(40_000);
        mock.push_read(&chunk);
        mock.push_read(&chunk);
        let mut conn = connection(&mock);

        let err = conn.receive().unwrap_err();
        assert!(matches!(err, Error::Protocol { .. }));
        assert_eq!(conn.read_count(), 2);
        assert_eq!(mock.unread_bytes(), 80_000 - MAX_FRAME_BYTES);
        assert_eq!(conn.pending_bytes(), 0);
    }

    #[test]
    fn test_full_frame_with_terminator_is_accepted() {
        let mock = MockTransport::new();
        let line = format!("{}\n", "O".repeat(MAX_FRAME_BYTES - 1));
        mock.push_read(&line);
        let mut conn = connection(&mock);

        assert_eq!(conn.receive().unwrap().len(), MAX_FRAME_BYTES);
    }

    #[test]
    fn test_close_shuts_stream() {
        let mock = MockTransport::new();
        connection(&mock).close();
        assert!(mock.is_closed());
    }
}
