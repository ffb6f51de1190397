//! Command encoding.
//!
//! Every command is one ASCII line terminated by `\n`:
//!
//! | Form | Example |
//! |------|---------|
//! | Assignment | `set grid=2,2` |
//! | Bare verb | `init`, `add_plot` |
//! | Positional | `clear 0`, `replot 1`, `enable_status 1` |
//! | Value list | `1.000000,2.500000` |
//! | XY value | `0:1.000000E+00:2.000000E+00` |
//! | Time series value | `0:2024;1;31;12;0;0;500:3.000000` |
//!
//! Booleans are sent as `true`/`false`. Plain values use six fixed decimals
//! and scale bounds/XY coordinates use `E` notation with a signed two-digit
//! exponent, matching what existing servers already parse.

// ============================================================================
// Imports
// ============================================================================

use std::fmt::{self, Write};

use crate::error::{Error, Result};
use crate::plot::{PlotType, TimeSeriesPoint};

// ============================================================================
// Keys
// ============================================================================

/// Variable names used in `set <key>=<value>` commands.
pub mod keys {
    /// Grid layout (`rows,cols`).
    pub const GRID: &str = "grid";
    /// Window title.
    pub const FRAME_TITLE: &str = "frame_title";
    /// Chart legend toggle.
    pub const ENABLE_LEGEND: &str = "enable_legend";
    /// Chart kind.
    pub const GRAPH: &str = "graph";
    /// Chart title.
    pub const PLOT_TITLE: &str = "plot_title";
    /// Plot name.
    pub const PLOT_NAME: &str = "plot_name";
    /// X axis label.
    pub const X_AXIS_NAME: &str = "x_axis_name";
    /// Y axis label.
    pub const Y_AXIS_NAME: &str = "y_axis_name";
    /// Line toggle.
    pub const ENABLE_LINES: &str = "enable_lines";
    /// Marker toggle.
    pub const ENABLE_SHAPES: &str = "enable_shapes";
    /// Autoscale toggle.
    pub const ENABLE_AUTOSCALE: &str = "enable_autoscale";
    /// Lower scale bound.
    pub const MIN_SCALE_VALUE: &str = "min_scale_value";
    /// Upper scale bound.
    pub const MAX_SCALE_VALUE: &str = "max_scale_value";
    /// Retention in seconds.
    pub const MAX_AGE_SECONDS: &str = "max_age_seconds";
    /// Logarithmic Y axis toggle.
    pub const ENABLE_LOG_Y_AXIS: &str = "enable_log_y_axis";
    /// Zero on X axis toggle.
    pub const ENABLE_ZERO_ON_X_SCALE: &str = "enable_zero_on_x_scale";
    /// Zero on Y axis toggle.
    pub const ENABLE_ZERO_ON_Y_SCALE: &str = "enable_zero_on_y_scale";
    /// Tick count.
    pub const TICK_COUNT: &str = "tick_count";
}

// ============================================================================
// Command
// ============================================================================

/// A single protocol command.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    // ========================================================================
    // Frame
    // ========================================================================
    /// `set grid=<rows>,<cols>`
    Grid {
        /// Grid rows.
        rows: u32,
        /// Grid columns.
        columns: u32,
    },
    /// `set frame_title=<text>`
    FrameTitle(String),
    /// `set enable_legend=<bool>`
    EnableLegend(bool),

    // ========================================================================
    // Slot
    // ========================================================================
    /// `init`
    Init,
    /// `set graph=<kind>`
    Graph(PlotType),
    /// `set plot_title=<text>`
    PlotTitle(String),
    /// `enable_status 1|0`
    EnableStatus(bool),
    /// `clear <slot>`
    Clear(usize),
    /// `replot <plot_index>`
    Replot(usize),

    // ========================================================================
    // Plot Attributes
    // ========================================================================
    /// `set plot_name=<text>`
    PlotName(String),
    /// `set x_axis_name=<text>`
    XAxisName(String),
    /// `set y_axis_name=<text>`
    YAxisName(String),
    /// `set enable_lines=<bool>`
    EnableLines(bool),
    /// `set enable_shapes=<bool>`
    EnableShapes(bool),
    /// `set enable_autoscale=<bool>`
    EnableAutoscale(bool),
    /// `set min_scale_value=<sci>`
    MinScaleValue(f64),
    /// `set max_scale_value=<sci>`
    MaxScaleValue(f64),
    /// `set max_age_seconds=<int>`
    MaxAgeSeconds(u32),
    /// `set enable_log_y_axis=<bool>`
    EnableLogYAxis(bool),
    /// `set enable_zero_on_x_scale=<bool>`
    EnableZeroOnXScale(bool),
    /// `set enable_zero_on_y_scale=<bool>`
    EnableZeroOnYScale(bool),
    /// `set tick_count=<int>`
    TickCount(u32),
    /// `add_plot`
    AddPlot,

    // ========================================================================
    // Values
    // ========================================================================
    /// `<v1>,<v2>,...`, one value per plot in `add_plot` order.
    Values(Vec<f64>),
    /// `<plot_index>:<x>:<y>`
    XyValue {
        /// Target plot.
        plot_index: usize,
        /// X coordinate.
        x: f64,
        /// Y coordinate.
        y: f64,
    },
    /// `<plot_index>:<y>;<mo>;<d>;<h>;<mi>;<s>;<ms>:<value>`
    TimeSeriesValue {
        /// Target plot.
        plot_index: usize,
        /// Timestamped value.
        point: TimeSeriesPoint,
    },
}

// ============================================================================
// Encoding
// ============================================================================

impl Command {
    /// Encodes the command as a `\n`-terminated line.
    #[must_use]
    pub fn encode(&self) -> String {
        format!("{self}\n")
    }

    /// Returns `true` for value pushes that may be batched.
    #[inline]
    #[must_use]
    pub fn is_batchable(&self) -> bool {
        matches!(self, Self::Values(_) | Self::XyValue { .. })
    }

    /// Checks that free-text fields cannot split the command.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if a text field contains `\r` or `\n`.
    pub fn validate(&self) -> Result<()> {
        let (key, text) = match self {
            Self::FrameTitle(text) => (keys::FRAME_TITLE, text),
            Self::PlotTitle(text) => (keys::PLOT_TITLE, text),
            Self::PlotName(text) => (keys::PLOT_NAME, text),
            Self::XAxisName(text) => (keys::X_AXIS_NAME, text),
            Self::YAxisName(text) => (keys::Y_AXIS_NAME, text),
            _ => return Ok(()),
        };

        if text.contains(['\r', '\n']) {
            return Err(Error::invalid_argument(format!(
                "{key} must not contain line breaks"
            )));
        }
        Ok(())
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Grid { rows, columns } => write!(f, "set {}={rows},{columns}", keys::GRID),
            Self::FrameTitle(text) => set(f, keys::FRAME_TITLE, text),
            Self::EnableLegend(on) => set(f, keys::ENABLE_LEGEND, on),
            Self::Init => f.write_str("init"),
            Self::Graph(kind) => set(f, keys::GRAPH, kind),
            Self::PlotTitle(text) => set(f, keys::PLOT_TITLE, text),
            Self::EnableStatus(on) => write!(f, "enable_status {}", u8::from(*on)),
            Self::Clear(slot) => write!(f, "clear {slot}"),
            Self::Replot(plot_index) => write!(f, "replot {plot_index}"),
            Self::PlotName(text) => set(f, keys::PLOT_NAME, text),
            Self::XAxisName(text) => set(f, keys::X_AXIS_NAME, text),
            Self::YAxisName(text) => set(f, keys::Y_AXIS_NAME, text),
            Self::EnableLines(on) => set(f, keys::ENABLE_LINES, on),
            Self::EnableShapes(on) => set(f, keys::ENABLE_SHAPES, on),
            Self::EnableAutoscale(on) => set(f, keys::ENABLE_AUTOSCALE, on),
            Self::MinScaleValue(v) => set(f, keys::MIN_SCALE_VALUE, scientific(*v)),
            Self::MaxScaleValue(v) => set(f, keys::MAX_SCALE_VALUE, scientific(*v)),
            Self::MaxAgeSeconds(secs) => set(f, keys::MAX_AGE_SECONDS, secs),
            Self::EnableLogYAxis(on) => set(f, keys::ENABLE_LOG_Y_AXIS, on),
            Self::EnableZeroOnXScale(on) => set(f, keys::ENABLE_ZERO_ON_X_SCALE, on),
            Self::EnableZeroOnYScale(on) => set(f, keys::ENABLE_ZERO_ON_Y_SCALE, on),
            Self::TickCount(count) => set(f, keys::TICK_COUNT, count),
            Self::AddPlot => f.write_str("add_plot"),
            Self::Values(values) => {
                for (i, value) in values.iter().enumerate() {
                    if i > 0 {
                        f.write_char(',')?;
                    }
                    f.write_str(&fixed(*value))?;
                }
                Ok(())
            }
            Self::XyValue { plot_index, x, y } => {
                write!(f, "{plot_index}:{}:{}", scientific(*x), scientific(*y))
            }
            Self::TimeSeriesValue { plot_index, point } => write!(
                f,
                "{plot_index}:{};{};{};{};{};{};{}:{}",
                point.year,
                point.month,
                point.day,
                point.hour,
                point.minute,
                point.second,
                point.millisecond,
                fixed(point.value)
            ),
        }
    }
}

/// Writes `set <key>=<value>`.
fn set(f: &mut fmt::Formatter<'_>, key: &str, value: impl fmt::Display) -> fmt::Result {
    write!(f, "set {key}={value}")
}

// ============================================================================
// Number Formatting
// ============================================================================

/// Formats with six fixed decimals (`%f`).
#[must_use]
pub fn fixed(value: f64) -> String {
    if !value.is_finite() {
        return non_finite(value).to_string();
    }
    format!("{value:.6}")
}

/// Formats in `E` notation with a signed, at least two-digit exponent (`%E`).
#[must_use]
pub fn scientific(value: f64) -> String {
    if !value.is_finite() {
        return non_finite(value).to_string();
    }

    // Rust renders `1.000000E6`; the server expects `1.000000E+06`.
    let raw = format!("{value:.6E}");
    match raw.split_once('E') {
        Some((mantissa, exponent)) => match exponent.parse::<i32>() {
            Ok(exp) => {
                let sign = if exp < 0 { '-' } else { '+' };
                format!("{mantissa}E{sign}{:02}", exp.unsigned_abs())
            }
            Err(_) => raw,
        },
        None => raw,
    }
}

/// Spelling of NaN and infinities accepted by the server's number parser.
fn non_finite(value: f64) -> &'static str {
    if value.is_nan() {
        "NaN"
    } else if value.is_sign_negative() {
        "-Infinity"
    } else {
        "Infinity"
    }
}

// ============================================================================
// Tests
// ============================================================================
