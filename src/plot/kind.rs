//! Chart kinds accepted by `set graph=`.

// ============================================================================
// Imports
// ============================================================================

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

// ============================================================================
// PlotType
// ============================================================================

/// Chart kind of a slot.
///
/// Parsing from a name or a numeric code rejects anything outside the four
/// known kinds, so an invalid type never reaches the network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlotType {
    /// Time series chart.
    Time,
    /// Bar chart.
    Bar,
    /// XY scatter/line chart.
    Xy,
    /// Dial gauge.
    Dial,
}

impl PlotType {
    /// All known kinds, in code order.
    pub const ALL: [PlotType; 4] = [Self::Time, Self::Bar, Self::Xy, Self::Dial];

    /// Returns the wire name used in `set graph=<name>`.
    #[inline]
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Time => "time",
            Self::Bar => "bar",
            Self::Xy => "xy",
            Self::Dial => "dial",
        }
    }

    /// Returns the numeric code (1 = time, 2 = bar, 3 = xy, 4 = dial).
    #[inline]
    #[must_use]
    pub const fn code(self) -> u8 {
        match self {
            Self::Time => 1,
            Self::Bar => 2,
            Self::Xy => 3,
            Self::Dial => 4,
        }
    }
}

impl fmt::Display for PlotType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PlotType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| Error::invalid_argument(format!("{s} is an invalid plot type")))
    }
}

impl TryFrom<u8> for PlotType {
    type Error = Error;

    fn try_from(code: u8) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.code() == code)
            .ok_or_else(|| Error::invalid_argument(format!("{code} is an invalid plot type code")))
    }
}

// ============================================================================
// Tests
// ============================================================================
