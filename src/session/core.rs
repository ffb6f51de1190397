//! Plotting session.
//!
//! The [`Session`] owns the slot connections and the batch buffer and
//! exposes the plotting operations.
//!
//! # Example
//!
//! ```no_run
//! use netplot_client::{PlotConfig, PlotType, Session};
//!
//! # fn example() -> netplot_client::Result<()> {
//! let mut session = Session::builder().slots(1).build()?;
//! session.connect()?;
//!
//! session.set_plot_type(0, PlotType::Time, "CPU")?;
//! session.add_plot(0, &PlotConfig::new("load"))?;
//! session.add_plot_values(0, &[0.42])?;
//!
//! session.disconnect();
//! # Ok(())
//! # }
//! ```

// ============================================================================
// Imports
// ============================================================================

use std::fmt;

use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::plot::{PlotConfig, PlotType, TimeSeriesPoint};
use crate::protocol::{Command, Response, count_acks};
use crate::transport::{ConnectionPool, Transport};

use super::builder::SessionBuilder;
use super::cache::BatchBuffer;
use super::options::SessionOptions;

// ============================================================================
// Session
// ============================================================================

/// Client session against one netplot server.
///
/// Every call blocks until the server acknowledges it, fails, or the
/// response deadline expires. A session is not synchronized; callers that
/// share one across threads must serialize access.
///
/// # Batching
///
/// With [`enable_cache`](Self::enable_cache) set, value lists and XY values
/// are buffered instead of sent. [`update`](Self::update) sends the whole
/// buffer in one write and waits for one acknowledgement per command.
/// Time series values are always sent immediately.
pub struct Session {
    /// Settings the session was created with.
    options: SessionOptions,

    /// One connection per slot.
    pool: ConnectionPool,

    /// Commands waiting for [`update`](Self::update).
    cache: BatchBuffer,

    /// Buffer value pushes instead of sending them.
    cache_enabled: bool,

    /// Slot named by the first push into the empty buffer.
    cache_slot: Option<usize>,
}

// ============================================================================
// Session - Display
// ============================================================================

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("host", &self.options.host)
            .field("base_port", &self.options.base_port)
            .field("slot_count", &self.slot_count())
            .field("connected", &self.connected_count())
            .field("cache_enabled", &self.cache_enabled)
            .field("pending_commands", &self.pending_commands())
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Session - Lifecycle
// ============================================================================

impl Session {
    /// Creates a configuration builder.
    #[inline]
    #[must_use]
    pub fn builder() -> SessionBuilder {
        SessionBuilder::new()
    }

    /// Creates an unconnected session.
    ///
    /// Does not touch the network.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the options fail validation.
    pub fn new(options: SessionOptions) -> Result<Self> {
        options.validate()?;

        let pool = ConnectionPool::new(options.host.clone(), options.base_port, options.slot_count)
            .with_connect_timeout(options.connect_timeout())
            .with_response_timeout(options.response_timeout())
            .with_debug(options.debug);

        debug!(
            host = %options.host,
            base_port = options.base_port,
            slots = options.slot_count,
            "Session created"
        );

        Ok(Self {
            options,
            pool,
            cache: BatchBuffer::new(),
            cache_enabled: false,
            cache_slot: None,
        })
    }

    /// Connects every slot in order and reads each version handshake.
    ///
    /// On failure the slots connected so far stay connected;
    /// [`disconnect`](Self::disconnect) closes them.
    ///
    /// # Errors
    ///
    /// - [`Error::Connection`] if a slot cannot be connected
    /// - [`Error::Handshake`] if a peer is not a netplot server
    /// - [`Error::Timeout`] if a greeting does not arrive in time
    pub fn connect(&mut self) -> Result<()> {
        self.pool.connect_all()
    }

    /// Closes every slot. Safe to call repeatedly.
    pub fn disconnect(&mut self) {
        self.pool.disconnect_all();
    }

    /// Installs an already connected stream on `slot` and reads its handshake.
    ///
    /// Returns the server version.
    ///
    /// # Errors
    ///
    /// - [`Error::SlotOutOfRange`] if `slot` is out of range
    /// - [`Error::Handshake`] if the first message is not a version greeting
    pub fn attach(&mut self, slot: usize, stream: Box<dyn Transport>) -> Result<f64> {
        self.pool.attach(slot, stream)
    }
}

// ============================================================================
// Session - Accessors
// ============================================================================

impl Session {
    /// Returns the options the session was created with.
    #[inline]
    #[must_use]
    pub fn options(&self) -> &SessionOptions {
        &self.options
    }

    /// Returns the most recently received text from any slot.
    #[inline]
    #[must_use]
    pub fn last_message(&self) -> &str {
        self.pool.last_message()
    }

    /// Returns the server version read at the most recent handshake.
    #[inline]
    #[must_use]
    pub fn server_version(&self) -> Option<f64> {
        self.pool.server_version()
    }

    /// Returns the fixed number of slots.
    #[inline]
    #[must_use]
    pub fn slot_count(&self) -> usize {
        self.pool.slot_count()
    }

    /// Returns `true` if `slot` is connected.
    #[inline]
    #[must_use]
    pub fn is_connected(&self, slot: usize) -> bool {
        self.pool.is_connected(slot)
    }

    /// Returns the number of connected slots.
    #[inline]
    #[must_use]
    pub fn connected_count(&self) -> usize {
        self.pool.connected_count()
    }

    /// Returns `true` if value pushes are being batched.
    #[inline]
    #[must_use]
    pub fn is_cache_enabled(&self) -> bool {
        self.cache_enabled
    }

    /// Returns the number of batched commands not yet sent.
    #[inline]
    #[must_use]
    pub fn pending_commands(&self) -> usize {
        self.cache.command_count()
    }

    /// Logs a snapshot of the session state at info level.
    pub fn log_state(&self) {
        info!(
            host = %self.options.host,
            base_port = self.options.base_port,
            slot_count = self.slot_count(),
            connected = self.connected_count(),
            server_version = ?self.server_version(),
            debug = self.options.debug,
            cache_enabled = self.cache_enabled,
            pending_commands = self.pending_commands(),
            pending_bytes = self.cache.len(),
            cache_slot = ?self.cache_slot,
            "Netplot session state"
        );

        for slot in 0..self.slot_count() {
            if let Some(connection) = self.pool.connection(slot) {
                debug!(
                    slot,
                    port = self.options.base_port as usize + slot,
                    reads = connection.read_count(),
                    "Connected slot"
                );
            }
        }

        if !self.cache.is_empty() {
            debug!(contents = %self.cache.contents().escape_debug(), "Batched commands");
        }
    }
}

// ============================================================================
// Session - Frame
// ============================================================================

impl Session {
    /// Lays the GUI out as `rows` x `columns` plot areas. Uses slot 0.
    ///
    /// # Errors
    ///
    /// Any send/receive error, or [`Error::ServerError`] if rejected.
    pub fn set_grid(&mut self, rows: u32, columns: u32) -> Result<()> {
        self.send_command(0, &Command::Grid { rows, columns })
    }

    /// Sets the GUI window title. Uses slot 0.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidArgument`] if `title` contains a line break, otherwise
    /// as [`set_grid`](Self::set_grid).
    pub fn set_window_title(&mut self, title: &str) -> Result<()> {
        self.send_command(0, &Command::FrameTitle(title.to_string()))
    }

    /// Shows or hides the chart legend of `slot`.
    ///
    /// # Errors
    ///
    /// As [`set_grid`](Self::set_grid).
    pub fn set_chart_legend_enabled(&mut self, slot: usize, enabled: bool) -> Result<()> {
        self.send_command(slot, &Command::EnableLegend(enabled))
    }
}

// ============================================================================
// Session - Slot Setup
// ============================================================================

impl Session {
    /// Initializes (or clears) the plot area of `slot`.
    ///
    /// # Errors
    ///
    /// As [`set_grid`](Self::set_grid).
    pub fn init(&mut self, slot: usize) -> Result<()> {
        self.send_command(slot, &Command::Init)
    }

    /// Sets the chart kind of `slot`, then re-initializes it.
    ///
    /// Sends the graph type, the title when `title` is not empty, `init`,
    /// and finally enables status messages. Stops at the first failure.
    ///
    /// # Errors
    ///
    /// As [`set_grid`](Self::set_grid); [`Error::InvalidArgument`] if
    /// `title` contains a line break.
    pub fn set_plot_type(&mut self, slot: usize, kind: PlotType, title: &str) -> Result<()> {
        let title = (!title.is_empty()).then(|| Command::PlotTitle(title.to_string()));
        if let Some(command) = &title {
            command.validate()?;
        }

        self.send_command(slot, &Command::Graph(kind))?;
        if let Some(command) = &title {
            self.send_command(slot, command)?;
        }
        self.init(slot)?;
        self.enable_status_messages(slot, true)
    }

    /// Enables or disables the GUI status message history.
    ///
    /// # Errors
    ///
    /// As [`set_grid`](Self::set_grid).
    pub fn enable_status_messages(&mut self, slot: usize, enabled: bool) -> Result<()> {
        self.send_command(slot, &Command::EnableStatus(enabled))
    }

    /// Adds a plot to `slot`.
    ///
    /// Every attribute is sent and acknowledged one at a time, then
    /// `add_plot`. The server numbers plots per slot in call order. The
    /// first failure aborts the sequence; attributes already applied stay
    /// applied.
    ///
    /// # Errors
    ///
    /// As [`set_grid`](Self::set_grid); [`Error::InvalidArgument`] if a name
    /// contains a line break.
    pub fn add_plot(&mut self, slot: usize, config: &PlotConfig) -> Result<()> {
        let commands = config.commands();
        for command in &commands {
            command.validate()?;
        }

        for command in &commands {
            self.send_command(slot, command)?;
        }

        debug!(slot, name = %config.name, "Plot added");
        Ok(())
    }

    /// Erases every plot point of `slot`.
    ///
    /// # Errors
    ///
    /// As [`set_grid`](Self::set_grid).
    pub fn clear(&mut self, slot: usize) -> Result<()> {
        self.send_command(slot, &Command::Clear(slot))
    }

    /// Makes new values of a plot overwrite its previous ones.
    ///
    /// # Errors
    ///
    /// As [`set_grid`](Self::set_grid).
    pub fn replot(&mut self, slot: usize, plot_index: usize) -> Result<()> {
        self.send_command(slot, &Command::Replot(plot_index))
    }
}

// ============================================================================
// Session - Values
// ============================================================================

impl Session {
    /// Pushes one value per plot of `slot`, in `add_plot` order.
    ///
    /// Batched when the cache is enabled. An empty slice does nothing.
    ///
    /// # Errors
    ///
    /// - [`Error::SlotOutOfRange`] if `slot` is out of range
    /// - [`Error::Allocation`] if the batch buffer cannot grow
    /// - any send/receive error when sent immediately or auto flushed
    pub fn add_plot_values(&mut self, slot: usize, values: &[f64]) -> Result<()> {
        if values.is_empty() {
            return Ok(());
        }
        self.push_value(slot, Command::Values(values.to_vec()))
    }

    /// Pushes one point to an XY plot.
    ///
    /// Batched when the cache is enabled.
    ///
    /// # Errors
    ///
    /// As [`add_plot_values`](Self::add_plot_values).
    pub fn add_xy_plot_values(
        &mut self,
        slot: usize,
        plot_index: usize,
        x: f64,
        y: f64,
    ) -> Result<()> {
        self.push_value(slot, Command::XyValue { plot_index, x, y })
    }

    /// Pushes a timestamped value. Never batched.
    ///
    /// # Errors
    ///
    /// As [`set_grid`](Self::set_grid).
    pub fn add_time_series_plot_value(
        &mut self,
        slot: usize,
        plot_index: usize,
        point: &TimeSeriesPoint,
    ) -> Result<()> {
        self.send_command(
            slot,
            &Command::TimeSeriesValue {
                plot_index,
                point: *point,
            },
        )
    }
}

// ============================================================================
// Session - Batching
// ============================================================================

impl Session {
    /// Turns batching of value pushes on or off.
    ///
    /// Already batched commands stay buffered until [`update`](Self::update).
    #[inline]
    pub fn enable_cache(&mut self, enabled: bool) {
        self.cache_enabled = enabled;
    }

    /// Sends every batched command to `slot` in one write.
    ///
    /// Waits until one acknowledgement per command has been counted,
    /// however the acknowledgements are split across reads. The buffer is
    /// emptied before sending, so a failed flush is not retried. Does
    /// nothing if the buffer is empty.
    ///
    /// # Errors
    ///
    /// - [`Error::SlotOutOfRange`] or [`Error::NotConnected`] for `slot`
    /// - [`Error::ServerError`] if a response carries the error token
    /// - any send/receive error
    pub fn update(&mut self, slot: usize) -> Result<()> {
        if self.cache.is_empty() {
            return Ok(());
        }

        let expected = self.cache.command_count();
        let batch = self.cache.take();
        self.cache_slot = None;
        debug!(slot, commands = expected, bytes = batch.len(), "Flushing batch");

        self.pool.send(slot, &batch)?;

        let mut acked = 0;
        while acked < expected {
            let text = self.pool.receive(slot)?;
            if let Response::Error(text) = Response::classify(&text) {
                return Err(Error::server_error(&text));
            }
            acked += count_acks(&text);
        }

        debug!(slot, acked, "Batch acknowledged");
        Ok(())
    }

    /// Buffers or sends a value push.
    ///
    /// With a flush threshold set, a batch only ever holds pushes for one
    /// slot: a push for another slot first flushes the pending batch to the
    /// slot it was queued for.
    fn push_value(&mut self, slot: usize, command: Command) -> Result<()> {
        if !(self.cache_enabled && command.is_batchable()) {
            return self.send_command(slot, &command);
        }

        self.ensure_slot(slot)?;

        let threshold = self.options.cache_flush_threshold;
        if threshold.is_some()
            && let Some(pending) = self.cache_slot
            && pending != slot
        {
            debug!(pending, slot, "Flushing batch queued for another slot");
            self.update(pending)?;
        }

        let was_empty = self.cache.is_empty();
        self.cache.append_command(&command)?;
        if was_empty {
            self.cache_slot = Some(slot);
        }

        if let Some(threshold) = threshold
            && self.cache.command_count() > threshold
        {
            let target = self.cache_slot.unwrap_or(slot);
            debug!(slot = target, threshold, "Batch threshold reached");
            return self.update(target);
        }
        Ok(())
    }
}

// ============================================================================
// Session - Internal
// ============================================================================

impl Session {
    /// Sends one command and waits for its acknowledgement.
    fn send_command(&mut self, slot: usize, command: &Command) -> Result<()> {
        command.validate()?;
        self.pool.send(slot, &command.encode())?;
        let text = self.pool.receive(slot)?;
        Response::classify(&text).into_result()
    }

    fn ensure_slot(&self, slot: usize) -> Result<()> {
        if slot < self.slot_count() {
            Ok(())
        } else {
            Err(Error::slot_out_of_range(slot, self.slot_count()))
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    use crate::transport::mock::MockTransport;

    /// Session with every slot attached to a greeting mock.
    fn session(slots: usize) -> (Session, Vec<MockTransport>) {
        session_with(SessionOptions::new().with_slot_count(slots))
    }

    fn session_with(options: SessionOptions) -> (Session, Vec<MockTransport>) {
        let mut session = Session::new(options).unwrap();
        let mocks: Vec<_> = (0..session.slot_count())
            .map(|_| MockTransport::greeting("1.0"))
            .collect();
        for (slot, mock) in mocks.iter().enumerate() {
            session.attach(slot, mock.boxed()).unwrap();
        }
        (session, mocks)
    }

    fn reads(session: &Session, slot: usize) -> usize {
        session.pool.connection(slot).map_or(0, |c| c.read_count())
    }

    #[test]
    fn test_new_rejects_invalid_options() {
        let result = Session::new(SessionOptions::new().with_slot_count(0));
        assert!(matches!(result, Err(Error::Config { .. })));
    }

    #[test]
    fn test_new_session_is_unconnected() {
        let mut session = Session::new(SessionOptions::new().with_slot_count(2)).unwrap();
        assert_eq!(session.connected_count(), 0);
        assert!(matches!(
            session.set_grid(1, 1),
            Err(Error::NotConnected { slot: 0 })
        ));
    }

    #[test]
    fn test_attach_records_version() {
        let (session, _mocks) = session(2);
        assert_eq!(session.server_version(), Some(1.0));
        assert_eq!(session.connected_count(), 2);
    }

    #[test]
    fn test_set_grid_uses_slot_zero() {
        let (mut session, mocks) = session(2);
        mocks[0].push_acks(2);

        session.set_grid(2, 3).unwrap();
        session.set_window_title("Telemetry").unwrap();

        assert_eq!(
            mocks[0].written_lines(),
            vec!["set grid=2,3", "set frame_title=Telemetry"]
        );
        assert_eq!(mocks[1].write_calls(), 0);
    }

    #[test]
    fn test_sequential_acks_leave_nothing_buffered() {
        let (mut session, mocks) = session(1);
        mocks[0].push_read("OK\n");
        mocks[0].push_read("OK\n");

        session.set_chart_legend_enabled(0, true).unwrap();
        session.init(0).unwrap();

        let connection = session.pool.connection(0).unwrap();
        assert_eq!(connection.pending_bytes(), 0);
        assert_eq!(session.last_message(), "OK\n");
    }

    #[test]
    fn test_error_response_is_kept() {
        let (mut session, mocks) = session(1);
        mocks[0].push_read("ERROR: bad value\n");

        let err = session.replot(0, 0).unwrap_err();
        assert!(err.is_server_error());
        assert_eq!(session.last_message(), "ERROR: bad value\n");
    }

    #[test]
    fn test_add_plot_sends_every_attribute() {
        let (mut session, mocks) = session(1);
        mocks[0].push_acks(14);

        session.add_plot(0, &PlotConfig::new("load")).unwrap();

        let lines = mocks[0].written_lines();
        assert_eq!(lines.len(), 14);
        assert_eq!(lines[0], "set plot_name=load");
        assert_eq!(lines[6], "set min_scale_value=0.000000E+00");
        assert_eq!(lines[13], "add_plot");
        assert_eq!(mocks[0].write_calls(), 14);
    }

    #[test]
    fn test_add_plot_stops_at_first_error() {
        let (mut session, mocks) = session(1);
        mocks[0].push_acks(2);
        mocks[0].push_read("ERROR: unknown axis\n");

        let err = session.add_plot(0, &PlotConfig::new("load")).unwrap_err();
        assert!(matches!(err, Error::ServerError { ref message } if message == "ERROR: unknown axis"));
        assert_eq!(mocks[0].written_lines().len(), 3);
    }

    #[test]
    fn test_line_break_rejected_before_io() {
        let (mut session, mocks) = session(1);

        let config = PlotConfig::new("load").with_y_axis_name("a\nb");
        assert!(matches!(
            session.add_plot(0, &config),
            Err(Error::InvalidArgument { .. })
        ));
        assert!(session.set_plot_type(0, PlotType::Bar, "x\r").is_err());
        assert_eq!(mocks[0].write_calls(), 0);
    }

    #[test]
    fn test_set_plot_type_with_title() {
        let (mut session, mocks) = session(1);
        mocks[0].push_acks(4);

        session.set_plot_type(0, PlotType::Dial, "Pressure").unwrap();

        assert_eq!(
            mocks[0].written_lines(),
            vec![
                "set graph=dial",
                "set plot_title=Pressure",
                "init",
                "enable_status 1"
            ]
        );
    }

    #[test]
    fn test_set_plot_type_without_title() {
        let (mut session, mocks) = session(1);
        mocks[0].push_acks(3);

        session.set_plot_type(0, PlotType::Xy, "").unwrap();
        assert_eq!(
            mocks[0].written_lines(),
            vec!["set graph=xy", "init", "enable_status 1"]
        );
    }

    #[test]
    fn test_unknown_plot_code_rejected() {
        assert!(matches!(
            PlotType::try_from(7),
            Err(Error::InvalidArgument { .. })
        ));
    }

    #[test]
    fn test_clear_names_slot() {
        let (mut session, mocks) = session(2);
        mocks[1].push_acks(1);

        session.clear(1).unwrap();
        assert_eq!(mocks[1].written(), "clear 1\n");
    }

    #[test]
    fn test_values_sent_immediately_without_cache() {
        let (mut session, mocks) = session(1);
        mocks[0].push_acks(2);

        session.add_plot_values(0, &[1.0, 2.5]).unwrap();
        session.add_xy_plot_values(0, 1, 10.0, -0.5).unwrap();

        assert_eq!(
            mocks[0].written_lines(),
            vec!["1.000000,2.500000", "1:1.000000E+01:-5.000000E-01"]
        );
    }

    #[test]
    fn test_empty_values_do_nothing() {
        let (mut session, mocks) = session(1);
        session.add_plot_values(0, &[]).unwrap();
        assert_eq!(mocks[0].write_calls(), 0);
    }

    #[test]
    fn test_cached_values_wait_for_update() {
        let (mut session, mocks) = session(1);
        session.enable_cache(true);

        for i in 0..5 {
            session.add_plot_values(0, &[f64::from(i)]).unwrap();
        }
        assert_eq!(mocks[0].write_calls(), 0);
        assert_eq!(session.pending_commands(), 5);

        mocks[0].push_read("OK\nOK\nOK\n");
        mocks[0].push_read("OK\nOK\n");
        let before = reads(&session, 0);

        session.update(0).unwrap();

        assert_eq!(mocks[0].write_calls(), 1);
        assert_eq!(reads(&session, 0) - before, 2);
        assert_eq!(mocks[0].written_lines().len(), 5);
        assert_eq!(session.pending_commands(), 0);
    }

    #[test]
    fn test_acks_split_mid_token() {
        let (mut session, mocks) = session(1);
        session.enable_cache(true);
        session.add_xy_plot_values(0, 0, 1.0, 1.0).unwrap();
        session.add_xy_plot_values(0, 0, 2.0, 4.0).unwrap();

        mocks[0].push_read("OK\nO");
        mocks[0].push_read("K\n");

        session.update(0).unwrap();
        assert_eq!(session.pool.connection(0).unwrap().pending_bytes(), 0);
    }

    #[test]
    fn test_failed_update_clears_buffer() {
        let (mut session, mocks) = session(1);
        session.enable_cache(true);
        session.add_plot_values(0, &[1.0]).unwrap();
        session.add_plot_values(0, &[2.0]).unwrap();

        mocks[0].push_read("OK\n");

        assert!(matches!(session.update(0), Err(Error::ConnectionClosed)));
        assert_eq!(session.pending_commands(), 0);
        assert_eq!(mocks[0].write_calls(), 1);
    }

    #[test]
    fn test_update_stops_on_error_token() {
        let (mut session, mocks) = session(1);
        session.enable_cache(true);
        session.add_plot_values(0, &[1.0]).unwrap();
        session.add_plot_values(0, &[2.0]).unwrap();

        mocks[0].push_read("OK\nERROR: plot 0 missing\n");

        assert!(session.update(0).unwrap_err().is_server_error());
        assert_eq!(session.pending_commands(), 0);
    }

    #[test]
    fn test_update_with_empty_buffer_is_noop() {
        let (mut session, mocks) = session(1);
        session.enable_cache(true);
        session.update(0).unwrap();
        assert_eq!(mocks[0].write_calls(), 0);
    }

    #[test]
    fn test_time_series_never_batched() {
        let (mut session, mocks) = session(1);
        session.enable_cache(true);
        mocks[0].push_acks(1);

        let point = TimeSeriesPoint::new(3.0, 2024, 1, 31).at(12, 0, 0, 500);
        session.add_time_series_plot_value(0, 0, &point).unwrap();

        assert_eq!(mocks[0].written(), "0:2024;1;31;12;0;0;500:3.000000\n");
        assert_eq!(session.pending_commands(), 0);
    }

    #[test]
    fn test_cached_push_checks_slot() {
        let (mut session, _mocks) = session(1);
        session.enable_cache(true);
        assert!(matches!(
            session.add_plot_values(3, &[1.0]),
            Err(Error::SlotOutOfRange { slot: 3, .. })
        ));
        assert_eq!(session.pending_commands(), 0);
    }

    #[test]
    fn test_threshold_triggers_flush() {
        let (mut session, mocks) =
            session_with(SessionOptions::new().with_slot_count(1).with_cache_flush_threshold(2));
        session.enable_cache(true);

        session.add_plot_values(0, &[1.0]).unwrap();
        session.add_plot_values(0, &[2.0]).unwrap();
        assert_eq!(mocks[0].write_calls(), 0);

        mocks[0].push_read("OK\nOK\nOK\n");
        session.add_plot_values(0, &[3.0]).unwrap();

        assert_eq!(mocks[0].write_calls(), 1);
        assert_eq!(session.pending_commands(), 0);
    }

    #[test]
    fn test_threshold_flush_keeps_points_on_their_slot() {
        let (mut session, mocks) =
            session_with(SessionOptions::new().with_slot_count(2).with_cache_flush_threshold(2));
        session.enable_cache(true);

        session.add_xy_plot_values(0, 0, 1.0, 1.0).unwrap();
        session.add_xy_plot_values(0, 0, 2.0, 2.0).unwrap();

        mocks[0].push_read("OK\nOK\n");
        session.add_xy_plot_values(1, 0, 9.0, 9.0).unwrap();

        assert_eq!(
            mocks[0].written_lines(),
            vec!["0:1.000000E+00:1.000000E+00", "0:2.000000E+00:2.000000E+00"]
        );
        assert_eq!(mocks[1].write_calls(), 0);
        assert_eq!(session.pending_commands(), 1);

        session.add_xy_plot_values(1, 0, 10.0, 10.0).unwrap();
        mocks[1].push_read("OK\nOK\nOK\n");
        session.add_xy_plot_values(1, 0, 11.0, 11.0).unwrap();

        assert_eq!(mocks[0].write_calls(), 1);
        assert_eq!(mocks[1].write_calls(), 1);
        assert_eq!(
            mocks[1].written_lines(),
            vec![
                "0:9.000000E+00:9.000000E+00",
                "0:1.000000E+01:1.000000E+01",
                "0:1.100000E+01:1.100000E+01"
            ]
        );
        assert_eq!(session.pending_commands(), 0);
    }

    #[test]
    fn test_mixed_slots_without_threshold_stay_buffered() {
        let (mut session, mocks) = session(2);
        session.enable_cache(true);

        session.add_plot_values(0, &[1.0]).unwrap();
        session.add_plot_values(1, &[2.0]).unwrap();

        assert_eq!(mocks[0].write_calls() + mocks[1].write_calls(), 0);
        assert_eq!(session.pending_commands(), 2);
    }

    #[test]
    fn test_disconnect_then_reattach() {
        let (mut session, mocks) = session(1);
        session.disconnect();
        assert!(mocks[0].is_closed());
        assert!(!session.is_connected(0));

        let fresh = MockTransport::greeting("2.0");
        session.attach(0, fresh.boxed()).unwrap();
        assert_eq!(session.server_version(), Some(2.0));
    }
}
