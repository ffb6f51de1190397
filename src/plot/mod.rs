//! Plot value objects.
//!
//! These types describe what to draw; they carry no identity once sent.
//! The server numbers plots implicitly by `add_plot` call order within a
//! slot, so plot indices used by value pushes are tracked by the caller and
//! are not validated here.
//!
//! # Components
//!
//! | Type | Description |
//! |------|-------------|
//! | [`PlotConfig`] | Rendering attributes for one plot |
//! | [`PlotType`] | Chart kind of a slot (time, bar, xy, dial) |
//! | [`TimeSeriesPoint`] | Timestamped value for time-indexed pushes |

// ============================================================================
// Submodules
// ============================================================================

/// Plot rendering attributes.
pub mod config;

/// Chart kinds.
pub mod kind;

/// Timestamped values.
pub mod point;

// ============================================================================
// Re-exports
// ============================================================================

pub use config::PlotConfig;
pub use kind::PlotType;
pub use point::TimeSeriesPoint;
