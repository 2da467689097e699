//! # Fiftyeight Application Entry Point
//!
//! Drives the clock face from the wall clock: loads the configuration, samples
//! the local time once per second and prints each composed frame either as an
//! ASCII preview or as JSON draw lists.

// Test modules
#[cfg(test)]
mod tests;

use anyhow::Context;
use chrono::Local;
use clap::Parser;
use fiftyeight_lib::atlas::SheetCatalog;
use fiftyeight_lib::config::{Config, CONFIG_FILE};
use fiftyeight_lib::face::{ClockFace, Frame, TickInput};
use fiftyeight_lib::renderer::draw_ascii;
use fiftyeight_lib::{DateSample, SensorSample, TimeSample};
use log::{debug, info};
use std::path::PathBuf;
use std::time::Duration;

const TICK_PERIOD: Duration = Duration::from_secs(1);

/// Clear the terminal and move the cursor home before each preview.
const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";

/// fiftyeight - a clock face with context-sized digits, radial marks and corner widgets
#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(name = "fiftyeight")]
#[command(author, version, about, long_about = None)]
pub struct Options {
    /// Render a single frame and exit
    #[arg(long)]
    pub once: bool,

    /// Print draw lists as JSON instead of the ASCII preview
    #[arg(long)]
    pub json: bool,

    /// Force debug cycling regardless of the config file
    #[arg(short = 'd', long)]
    pub debug: bool,

    /// Configuration file to load
    #[arg(short = 'c', long = "config", value_name = "PATH", default_value = CONFIG_FILE)]
    pub config_path: PathBuf,

    /// Write the effective configuration to the config path and exit
    #[arg(long)]
    pub write_config: bool,

    /// Battery charge reported to the face
    #[arg(long = "battery", value_name = "PERCENT", default_value_t = 100,
          value_parser = clap::value_parser!(u8).range(0..=100))]
    pub battery_percent: u8,

    /// Steps taken today, reported to the face
    #[arg(long = "steps", value_name = "COUNT", default_value_t = 0)]
    pub step_count: u32,
}

impl Options {
    fn sensors(&self) -> SensorSample {
        SensorSample {
            battery_percent: self.battery_percent,
            step_count: self.step_count,
        }
    }
}

/// Sample the local clock for one tick.
fn sample_now(sensors: SensorSample) -> TickInput {
    let now = Local::now();
    TickInput {
        time: TimeSample::from_time(&now),
        date: DateSample::from_date(&now),
        sensors,
    }
}

fn print_frame(frame: &Frame, options: &Options) -> anyhow::Result<()> {
    if options.json {
        println!("{}", serde_json::to_string(frame)?);
    } else {
        if !options.once {
            print!("{}", CLEAR_SCREEN);
        }
        print!("{}", draw_ascii(frame));
    }
    Ok(())
}

/// Main application entry point.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let options = Options::parse();

    // Read the file before the logger so debug_logging can pick the filter
    let loaded = Config::try_load_from_path(&options.config_path);
    let debug_logging = loaded.as_ref().is_ok_and(|c| c.face.debug_logging);
    let log_level = if debug_logging { "debug" } else { "info" };
    // Allow RUST_LOG to override the config setting
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let mut config = Config::or_default(loaded);
    if options.debug {
        config.face.debug_mode = true;
    }

    if options.write_config {
        config
            .save_to_path(&options.config_path)
            .with_context(|| format!("writing {}", options.config_path.display()))?;
        return Ok(());
    }

    let screen = config.display.screen();
    info!(
        "Starting fiftyeight on a {}x{} surface{}",
        screen.width,
        screen.height,
        if config.face.debug_mode { " in debug mode" } else { "" }
    );

    let mut face = ClockFace::new(config.face, screen, SheetCatalog::complete());
    let sensors = options.sensors();

    if options.once {
        let frame = face.tick(sample_now(sensors));
        return print_frame(&frame, &options);
    }

    let mut interval = tokio::time::interval(TICK_PERIOD);
    loop {
        tokio::select! {
            _ = interval.tick() => {
                let frame = face.tick(sample_now(sensors));
                print_frame(&frame, &options)?;
            }
            result = tokio::signal::ctrl_c() => {
                result.context("listening for Ctrl+C")?;
                debug!("Interrupted after debug entry {}", face.debug_cycle().counter());
                info!("Stopping");
                return Ok(());
            }
        }
    }
}
