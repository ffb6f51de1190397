//! Scripted in-memory transport for tests.

use std::collections::VecDeque;
use std::io::{self, ErrorKind, Read, Write};
use std::sync::Arc;

use parking_lot::Mutex;

use super::Transport;

/// One scripted read result.
enum ScriptedRead {
    Data(Vec<u8>),
    Fail(ErrorKind),
}

#[derive(Default)]
struct State {
    reads: VecDeque<ScriptedRead>,
    written: Vec<u8>,
    read_calls: usize,
    write_calls: usize,
    write_limit: Option<usize>,
    closed: bool,
}

/// Transport that replays queued reads and records writes.
///
/// Clones share state, so a test keeps one handle while the connection owns
/// another. An exhausted read queue behaves like a closed peer.
#[derive(Clone, Default)]
pub(crate) struct MockTransport {
    state: Arc<Mutex<State>>,
}

impl MockTransport {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Mock whose first read is a version greeting.
    pub(crate) fn greeting(version: &str) -> Self {
        let mock = Self::new();
        mock.push_read(&format!("netplot_version={version}\n"));
        mock
    }

    /// Queues data returned by exactly one read call.
    pub(crate) fn push_read(&self, data: &str) {
        self.state
            .lock()
            .reads
            .push_back(ScriptedRead::Data(data.as_bytes().to_vec()));
    }

    /// Queues `n` acknowledgements, one per read call.
    pub(crate) fn push_acks(&self, n: usize) {
        for _ in 0..n {
            self.push_read("OK\n");
        }
    }

    pub(crate) fn push_error(&self, kind: ErrorKind) {
        self.state.lock().reads.push_back(ScriptedRead::Fail(kind));
    }

    /// Makes every write accept at most `n` bytes.
    pub(crate) fn limit_writes(&self, n: usize) {
        self.state.lock().write_limit = Some(n);
    }

    pub(crate) fn written(&self) -> String {
        String::from_utf8_lossy(&self.state.lock().written).into_owned()
    }

    pub(crate) fn written_lines(&self) -> Vec<String> {
        self.written().lines().map(str::to_string).collect()
    }

    /// Bytes queued for reads not yet issued.
    pub(crate) fn unread_bytes(&self) -> usize {
        self.state
            .lock()
            .reads
            .iter()
            .map(|read| match read {
                ScriptedRead::Data(data) => data.len(),
                ScriptedRead::Fail(_) => 0,
            })
            .sum()
    }

    pub(crate) fn read_calls(&self) -> usize {
        self.state.lock().read_calls
    }

    pub(crate) fn write_calls(&self) -> usize {
        self.state.lock().write_calls
    }

    pub(crate) fn is_closed(&self) -> bool {
        self.state.lock().closed
    }

    pub(crate) fn boxed(&self) -> Box<dyn Transport> {
        Box::new(self.clone())
    }
}

impl Read for MockTransport {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let mut state = self.state.lock();
        state.read_calls += 1;

        match state.reads.pop_front() {
            Some(ScriptedRead::Data(mut data)) => {
                if data.len() > buf.len() {
                    let rest = data.split_off(buf.len());
                    state.reads.push_front(ScriptedRead::Data(rest));
                }
                buf[..data.len()].copy_from_slice(&data);
                Ok(data.len())
            }
            Some(ScriptedRead::Fail(kind)) => Err(io::Error::from(kind)),
            None => Ok(0),
        }
    }
}

impl Write for MockTransport {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut state = self.state.lock();
        state.write_calls += 1;

        let n = state.write_limit.map_or(buf.len(), |limit| limit.min(buf.len()));
        state.written.extend_from_slice(&buf[..n]);
        Ok(n)
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Transport for MockTransport {
    fn close(&mut self) -> io::Result<()> {
        self.state.lock().closed = true;
        Ok(())
    }
}
