//! Plot rendering attributes.
//!
//! # Example
//!
//! ```ignore
//! use netplot_client::PlotConfig;
//!
//! let config = PlotConfig::new("CPU")
//!     .with_y_axis_name("percent")
//!     .with_autoscale(false)
//!     .with_scale(0.0, 100.0);
//! session.add_plot(0, &config)?;
//! ```

// ============================================================================
// Imports
// ============================================================================

use serde::{Deserialize, Serialize};

use crate::protocol::Command;

// ============================================================================
// Constants
// ============================================================================

/// Default retention for plotted values, in seconds.
pub const DEFAULT_MAX_AGE_SECONDS: u32 = 3600;

/// Default upper scale bound.
pub const DEFAULT_MAX_SCALE: f64 = 1e6;

// ============================================================================
// PlotConfig
// ============================================================================

/// Rendering attributes for one plot.
///
/// Immutable input to `add_plot`; every field is sent as its own command.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlotConfig {
    /// Display name of the plot (legend entry).
    pub name: String,
    /// X axis label.
    pub x_axis_name: String,
    /// Y axis label.
    pub y_axis_name: String,
    /// Draw lines between points.
    pub enable_lines: bool,
    /// Draw a marker at each point.
    pub enable_shapes: bool,
    /// Scale the Y axis to the data.
    pub enable_autoscale: bool,
    /// Lower Y scale bound (used when autoscale is off).
    pub min_scale: f64,
    /// Upper Y scale bound (used when autoscale is off).
    pub max_scale: f64,
    /// Values older than this are dropped.
    pub max_age_seconds: u32,
    /// Logarithmic Y axis.
    pub enable_log_y_axis: bool,
    /// Include zero on the X axis.
    pub enable_zero_on_x_axis: bool,
    /// Include zero on the Y axis.
    pub enable_zero_on_y_axis: bool,
    /// Tick count, 0 lets the server decide.
    pub tick_count: u32,
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            name: String::new(),
            x_axis_name: String::new(),
            y_axis_name: String::new(),
            enable_lines: true,
            enable_shapes: true,
            enable_autoscale: true,
            min_scale: 0.0,
            max_scale: DEFAULT_MAX_SCALE,
            max_age_seconds: DEFAULT_MAX_AGE_SECONDS,
            enable_log_y_axis: false,
            enable_zero_on_x_axis: true,
            enable_zero_on_y_axis: true,
            tick_count: 0,
        }
    }
}

// ============================================================================
// Builder Methods
// ============================================================================

impl PlotConfig {
    /// Creates a default configuration with the given plot name.
    #[inline]
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Sets the X axis label.
    #[inline]
    #[must_use]
    pub fn with_x_axis_name(mut self, name: impl Into<String>) -> Self {
        self.x_axis_name = name.into();
        self
    }

    /// Sets the Y axis label.
    #[inline]
    #[must_use]
    pub fn with_y_axis_name(mut self, name: impl Into<String>) -> Self {
        self.y_axis_name = name.into();
        self
    }

    /// Enables or disables lines.
    #[inline]
    #[must_use]
    pub fn with_lines(mut self, enabled: bool) -> Self {
        self.enable_lines = enabled;
        self
    }

    /// Enables or disables point markers.
    #[inline]
    #[must_use]
    pub fn with_shapes(mut self, enabled: bool) -> Self {
        self.enable_shapes = enabled;
        self
    }

    /// Enables or disables autoscale.
    #[inline]
    #[must_use]
    pub fn with_autoscale(mut self, enabled: bool) -> Self {
        self.enable_autoscale = enabled;
        self
    }

    /// Sets the fixed scale bounds.
    #[inline]
    #[must_use]
    pub fn with_scale(mut self, min: f64, max: f64) -> Self {
        self.min_scale = min;
        self.max_scale = max;
        self
    }

    /// Sets the maximum age of retained values.
    #[inline]
    #[must_use]
    pub fn with_max_age_seconds(mut self, seconds: u32) -> Self {
        self.max_age_seconds = seconds;
        self
    }

    /// Enables or disables the logarithmic Y axis.
    #[inline]
    #[must_use]
    pub fn with_log_y_axis(mut self, enabled: bool) -> Self {
        self.enable_log_y_axis = enabled;
        self
    }

    /// Sets whether zero is forced onto the X and Y axes.
    #[inline]
    #[must_use]
    pub fn with_zero_on_axes(mut self, x: bool, y: bool) -> Self {
        self.enable_zero_on_x_axis = x;
        self.enable_zero_on_y_axis = y;
        self
    }

    /// Sets the tick count.
    #[inline]
    #[must_use]
    pub fn with_tick_count(mut self, count: u32) -> Self {
        self.tick_count = count;
        self
    }
}

// ============================================================================
// Encoding
// ============================================================================

impl PlotConfig {
    /// Returns the command sequence that creates this plot.
    ///
    /// The order is fixed by the server: name, axis names, lines, shapes,
    /// autoscale, scale bounds, max age, log Y, zero on X, zero on Y, tick
    /// count, then the `add_plot` verb.
    #[must_use]
    pub fn commands(&self) -> Vec<Command> {
        vec![
            Command::PlotName(self.name.clone()),
            Command::XAxisName(self.x_axis_name.clone()),
            Command::YAxisName(self.y_axis_name.clone()),
            Command::EnableLines(self.enable_lines),
            Command::EnableShapes(self.enable_shapes),
            Command::EnableAutoscale(self.enable_autoscale),
            Command::MinScaleValue(self.min_scale),
            Command::MaxScaleValue(self.max_scale),
            Command::MaxAgeSeconds(self.max_age_seconds),
            Command::EnableLogYAxis(self.enable_log_y_axis),
            Command::EnableZeroOnXScale(self.enable_zero_on_x_axis),
            Command::EnableZeroOnYScale(self.enable_zero_on_y_axis),
            Command::TickCount(self.tick_count),
            Command::AddPlot,
        ]
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_matches_server_defaults() {
        let config = PlotConfig::default();
        assert!(config.name.is_empty());
        assert!(config.x_axis_name.is_empty());
        assert!(config.y_axis_name.is_empty());
        assert!(config.enable_autoscale);
        assert!(config.enable_lines);
        assert!(config.enable_shapes);
        assert!(!config.enable_log_y_axis);
        assert!(config.enable_zero_on_x_axis);
        assert!(config.enable_zero_on_y_axis);
        assert_eq!(config.max_age_seconds, 3600);
        assert_eq!(config.min_scale, 0.0);
        assert_eq!(config.max_scale, 1_000_000.0);
        assert_eq!(config.tick_count, 0);
    }

    #[test]
    fn test_default_encodes_expected_lines() {
        let lines: Vec<String> = PlotConfig::default()
            .commands()
            .iter()
            .map(Command::encode)
            .collect();

        assert_eq!(
            lines,
            vec![
                "set plot_name=\n",
                "set x_axis_name=\n",
                "set y_axis_name=\n",
                "set enable_lines=true\n",
                "set enable_shapes=true\n",
                "set enable_autoscale=true\n",
                "set min_scale_value=0.000000E+00\n",
                "set max_scale_value=1.000000E+06\n",
                "set max_age_seconds=3600\n",
                "set enable_log_y_axis=false\n",
                "set enable_zero_on_x_scale=true\n",
                "set enable_zero_on_y_scale=true\n",
                "set tick_count=0\n",
                "add_plot\n",
            ]
        );
    }

    #[test]
    fn test_builder_methods() {
        let config = PlotConfig::new("Sine")
            .with_x_axis_name("t")
            .with_y_axis_name("amplitude")
            .with_autoscale(false)
            .with_scale(-5.0, 5.0)
            .with_max_age_seconds(5)
            .with_tick_count(1000)
            .with_zero_on_axes(false, true);

        assert_eq!(config.name, "Sine");
        assert_eq!(config.y_axis_name, "amplitude");
        assert!(!config.enable_autoscale);
        assert_eq!(config.min_scale, -5.0);
        assert_eq!(config.max_age_seconds, 5);
        assert_eq!(config.tick_count, 1000);
        assert!(!config.enable_zero_on_x_axis);
        assert!(config.enable_zero_on_y_axis);
    }

    #[test]
    fn test_command_sequence_ends_with_add_plot() {
        let commands = PlotConfig::new("p").commands();
        assert_eq!(commands.len(), 14);
        assert!(matches!(commands.last(), Some(Command::AddPlot)));
    }

    #[test]
    fn test_deserialize_partial_uses_defaults() {
        let config: PlotConfig =
            serde_json::from_str(r#"{"name":"Temp","enable_log_y_axis":true}"#).unwrap();
        assert_eq!(config.name, "Temp");
        assert!(config.enable_log_y_axis);
        assert_eq!(config.max_age_seconds, DEFAULT_MAX_AGE_SECONDS);
    }
}
