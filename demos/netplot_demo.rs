//! Netplot client demo.
//!
//! Demonstrates:
//! - Connecting a six slot session
//! - Time, bar, XY and dial charts
//! - Timestamped values
//! - Cached (batched) XY updates
//!
//! Usage:
//!   cargo run --example netplot_demo
//!   cargo run --example netplot_demo -- --host 192.168.1.20
//!   cargo run --example netplot_demo -- --debug

// ============================================================================
// Imports
// ============================================================================

use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};
use netplot_client::{PlotConfig, PlotType, Session, TimeSeriesPoint};
use tracing_subscriber::EnvFilter;

// ============================================================================
// Constants
// ============================================================================

const SLOTS: usize = 6;
const CACHE_ROUNDS: usize = 20;

// ============================================================================
// Args
// ============================================================================

/// Command-line arguments.
#[derive(Debug, Clone)]
struct Args {
    host: String,
    debug: bool,
}

impl Args {
    fn parse() -> Self {
        let args: Vec<String> = std::env::args().skip(1).collect();
        let host = args
            .iter()
            .position(|a| a == "--host")
            .and_then(|i| args.get(i + 1))
            .cloned()
            .unwrap_or_else(|| "127.0.0.1".to_string());

        Self {
            host,
            debug: args.iter().any(|a| a == "--debug" || a == "-d"),
        }
    }
}

fn init_logging(debug: bool) {
    let filter = if debug {
        "netplot_client=debug,netplot_demo=debug"
    } else {
        "netplot_client=info,netplot_demo=info"
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(false)
        .init();
}

// ============================================================================
// Values
// ============================================================================

/// Deterministic pseudo-random values in a range.
struct Wave {
    state: u64,
}

impl Wave {
    fn new(seed: u64) -> Self {
        Self { state: seed | 1 }
    }

    fn next_in(&mut self, min: f64, max: f64) -> f64 {
        // xorshift64
        self.state ^= self.state << 13;
        self.state ^= self.state >> 7;
        self.state ^= self.state << 17;
        let unit = (self.state >> 11) as f64 / (1u64 << 53) as f64;
        min + unit * (max - min)
    }
}

// ============================================================================
// Main
// ============================================================================

fn main() {
    let args = Args::parse();
    init_logging(args.debug);

    if let Err(e) = run(&args) {
        eprintln!("\n[ERROR] {e:#}");
        std::process::exit(1);
    }
}

fn run(args: &Args) -> Result<()> {
    println!("=== netplot client demo ===\n");

    let mut session = Session::builder()
        .host(&args.host)
        .slots(SLOTS)
        .debug(args.debug)
        .connect_timeout(Duration::from_secs(5))
        .build()?;

    session
        .connect()
        .with_context(|| format!("Failed to connect to netplot server @ {}", args.host))?;

    if let Some(version) = session.server_version() {
        println!("Netplot server version = {version:.2}");
    }

    session.set_grid(2, 3)?;
    session.set_window_title("Rust netplot client demo")?;

    let mut wave = Wave::new(0x5eed);

    time_example(&mut session, 0, &mut wave)?;
    timestamped_example(&mut session, 1, &mut wave)?;
    bar_example(&mut session, 2, &mut wave)?;
    xy_example(&mut session, 3, &mut wave)?;
    dial_example(&mut session, 4, &mut wave)?;
    cache_example(&mut session, 5, &mut wave)?;

    session.log_state();
    session.disconnect();
    println!("\nDone.");
    Ok(())
}

// ============================================================================
// Examples
// ============================================================================

/// Single plot on a time series chart.
fn time_example(session: &mut Session, slot: usize, wave: &mut Wave) -> Result<()> {
    println!("[{slot}] Time chart");

    let config = PlotConfig::new("Plot 0")
        .with_x_axis_name("The X axis")
        .with_y_axis_name("The Y axis (Plot0)")
        .with_autoscale(false)
        .with_scale(0.0, 10_000.0)
        .with_max_age_seconds(5)
        .with_tick_count(1000);

    session.set_plot_type(slot, PlotType::Time, "TIME chart, single plot")?;
    session.add_plot(slot, &config)?;

    for _ in 0..10 {
        session.add_plot_values(slot, &[wave.next_in(0.0, 10_000.0)])?;
    }
    Ok(())
}

/// Time series chart with client supplied timestamps.
fn timestamped_example(session: &mut Session, slot: usize, wave: &mut Wave) -> Result<()> {
    println!("[{slot}] Time chart, client timestamps");

    session.set_plot_type(slot, PlotType::Time, "TIME chart, client timestamps")?;
    session.add_plot(slot, &PlotConfig::new("Sensor").with_y_axis_name("Level"))?;

    for second in 0..30 {
        let point = TimeSeriesPoint::new(wave.next_in(0.0, 100.0), 2024, 6, 1).at(12, 0, second, 0);
        session.add_time_series_plot_value(slot, 0, &point)?;
    }
    Ok(())
}

fn bar_example(session: &mut Session, slot: usize, wave: &mut Wave) -> Result<()> {
    println!("[{slot}] Bar chart");

    session.set_plot_type(slot, PlotType::Bar, "BAR chart")?;
    session.add_plot(
        slot,
        &PlotConfig::new("Plot 0")
            .with_x_axis_name("The X axis")
            .with_y_axis_name("The Y axis"),
    )?;

    for _ in 0..10 {
        session.add_plot_values(slot, &[wave.next_in(1000.0, 10_000.0)])?;
    }
    Ok(())
}

/// Two XY traces with different linear Y scales.
fn xy_example(session: &mut Session, slot: usize, wave: &mut Wave) -> Result<()> {
    println!("[{slot}] XY chart");

    session.set_plot_type(
        slot,
        PlotType::Xy,
        "XY chart, two traces with different linear Y scales",
    )?;

    for (index, name) in ["Plot 0", "Plot 1"].into_iter().enumerate() {
        let config = PlotConfig::new(name)
            .with_x_axis_name("The X axis name")
            .with_y_axis_name(format!("The Y axis (Plot{index})"))
            .with_zero_on_axes(false, false);
        session.add_plot(slot, &config)?;
    }

    for _ in 0..10 {
        session.add_xy_plot_values(slot, 0, wave.next_in(-90.0, -70.0), wave.next_in(130.0, 150.0))?;
        session.add_xy_plot_values(slot, 1, wave.next_in(-60.0, -50.0), wave.next_in(75.0, 80.0))?;
    }
    Ok(())
}

/// Dial showing a value and its running maximum.
fn dial_example(session: &mut Session, slot: usize, wave: &mut Wave) -> Result<()> {
    println!("[{slot}] Dial chart");

    session.set_plot_type(slot, PlotType::Dial, "Number and MAX")?;

    let config = PlotConfig::new("Number")
        .with_scale(0.0, 200.0)
        .with_tick_count(10);
    session.add_plot(slot, &config)?;
    session.add_plot(slot, &PlotConfig { name: "MAX".to_string(), ..config })?;

    let mut value: f64 = 0.0;
    let mut max_value: f64 = 0.0;
    while value < 200.0 {
        value = (value + wave.next_in(-10.0, 20.0).trunc()).clamp(0.0, 200.0);
        max_value = max_value.max(value);
        session.add_plot_values(slot, &[value, max_value])?;
        thread::sleep(Duration::from_millis(100));
    }
    Ok(())
}

/// Batched XY updates, flushed once per round.
fn cache_example(session: &mut Session, slot: usize, wave: &mut Wave) -> Result<()> {
    println!("[{slot}] Cached XY chart");

    let config = PlotConfig::new("Plot 0")
        .with_x_axis_name("The X axis name")
        .with_y_axis_name("Y axis")
        .with_shapes(false)
        .with_autoscale(false)
        .with_scale(0.0, 1.0);

    session.set_plot_type(slot, PlotType::Xy, "Cached, fast XY chart")?;
    session.add_plot(slot, &config)?;

    // Must follow the plot setup, which needs synchronous acknowledgements.
    session.enable_cache(true);
    session.enable_status_messages(slot, false)?;

    for _ in 0..CACHE_ROUNDS {
        session.replot(slot, 0)?;
        for x in 0..100 {
            session.add_xy_plot_values(slot, 0, f64::from(x), wave.next_in(0.0, 1.0))?;
        }
        session.update(slot)?;
    }

    session.enable_cache(false);
    Ok(())
}
