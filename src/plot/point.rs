//! Timestamped values for time-indexed pushes.

// ============================================================================
// Imports
// ============================================================================

use serde::{Deserialize, Serialize};

// ============================================================================
// TimeSeriesPoint
// ============================================================================

/// A single value stamped with a client-side wall-clock time.
///
/// The fields are sent verbatim; the server interprets them as local time.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct TimeSeriesPoint {
    /// The Y axis value.
    pub value: f64,
    /// Calendar year.
    pub year: i32,
    /// Month, 1-12.
    pub month: u32,
    /// Day of month, 1-31.
    pub day: u32,
    /// Hour, 0-23.
    pub hour: u32,
    /// Minute, 0-59.
    pub minute: u32,
    /// Second, 0-59.
    pub second: u32,
    /// Millisecond, 0-999.
    pub millisecond: u32,
}

impl TimeSeriesPoint {
    /// Creates a point at the given date with a zero time of day.
    #[inline]
    #[must_use]
    pub fn new(value: f64, year: i32, month: u32, day: u32) -> Self {
        Self {
            value,
            year,
            month,
            day,
            ..Default::default()
        }
    }

    /// Sets the time of day.
    #[inline]
    #[must_use]
    pub fn at(mut self, hour: u32, minute: u32, second: u32, millisecond: u32) -> Self {
        self.hour = hour;
        self.minute = minute;
        self.second = second;
        self.millisecond = millisecond;
        self
    }
}
