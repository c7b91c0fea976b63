//! TiltDrift CLI — Command-line interface for live tracking, simulation,
//! and trace analysis.
//!
//! Usage:
//!   tiltdrift run [OPTIONS]        Run a live tracking session
//!   tiltdrift simulate [OPTIONS]   Run a synthetic waveform offline
//!   tiltdrift replay <TRACE>       Replay a recorded trace
//!   tiltdrift analyze <TRACE>      Show trace statistics
//!   tiltdrift check                Check sensor availability

use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(
    name = "tiltdrift",
    about = "Tilt-driven avatar motion: smoothed, clamped, animated",
    version,
    author
)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a live tracking session
    Run {
        /// Sensor backend: auto, iio, or synthetic
        #[arg(long, default_value = "auto")]
        backend: String,

        /// Session duration in seconds (Ctrl+C stops earlier)
        #[arg(long, default_value = "10.0")]
        duration_secs: f64,

        /// Sensor delivery rate in Hz
        #[arg(long, default_value = "50")]
        rate: u32,

        /// Container width in pixels
        #[arg(long, default_value = "1000")]
        container_width: f64,

        /// Container height in pixels
        #[arg(long, default_value = "2000")]
        container_height: f64,

        /// Avatar width in pixels
        #[arg(long, default_value = "100")]
        avatar_width: f64,

        /// Avatar height in pixels
        #[arg(long, default_value = "100")]
        avatar_height: f64,

        /// Record delivered events to a JSONL trace
        #[arg(long)]
        trace: Option<PathBuf>,
    },

    /// Generate a synthetic tilt waveform and run it through the tracker
    Simulate {
        /// Waveform: hold, step, circle, or shake
        #[arg(long, default_value = "circle")]
        wave: String,

        /// Waveform amplitude in g
        #[arg(long, default_value = "0.8")]
        amplitude: f64,

        /// Duration in seconds
        #[arg(long, default_value = "10.0")]
        duration_secs: f64,

        /// Sample rate in Hz
        #[arg(long, default_value = "50")]
        rate: u32,

        /// Container width in pixels
        #[arg(long, default_value = "1000")]
        container_width: f64,

        /// Container height in pixels
        #[arg(long, default_value = "2000")]
        container_height: f64,

        /// Avatar width in pixels
        #[arg(long, default_value = "100")]
        avatar_width: f64,

        /// Avatar height in pixels
        #[arg(long, default_value = "100")]
        avatar_height: f64,

        /// Write the generated events to a JSONL trace
        #[arg(long)]
        trace: Option<PathBuf>,

        /// Write the resulting offsets as JSONL
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Replay a recorded trace through the tracker
    Replay {
        /// Path to the JSONL trace
        trace: PathBuf,

        /// Container width in pixels
        #[arg(long, default_value = "1000")]
        container_width: f64,

        /// Container height in pixels
        #[arg(long, default_value = "2000")]
        container_height: f64,

        /// Avatar width in pixels
        #[arg(long, default_value = "100")]
        avatar_width: f64,

        /// Avatar height in pixels
        #[arg(long, default_value = "100")]
        avatar_height: f64,

        /// Write the resulting offsets as JSONL
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show statistics for a recorded trace
    Analyze {
        /// Path to the JSONL trace
        trace: PathBuf,

        /// Smoothing factor used for the settling estimate
        #[arg(long, default_value = "0.15")]
        alpha: f64,

        /// Tilt window used for the clipped-sample count
        #[arg(long, default_value = "1.8")]
        max_tilt: f64,
    },

    /// Check sensor availability
    Check,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    tiltdrift_common::logging::init_logging(&tiltdrift_common::config::LoggingConfig {
        level: log_level.to_string(),
        json: false,
        file: None,
    });

    match cli.command {
        Commands::Run {
            backend,
            duration_secs,
            rate,
            container_width,
            container_height,
            avatar_width,
            avatar_height,
            trace,
        } => {
            commands::run::run(
                backend,
                duration_secs,
                rate,
                container_width,
                container_height,
                avatar_width,
                avatar_height,
                trace,
            )
            .await
        }
        Commands::Simulate {
            wave,
            amplitude,
            duration_secs,
            rate,
            container_width,
            container_height,
            avatar_width,
            avatar_height,
            trace,
            output,
        } => commands::simulate::run(
            wave,
            amplitude,
            duration_secs,
            rate,
            container_width,
            container_height,
            avatar_width,
            avatar_height,
            trace,
            output,
        ),
        Commands::Replay {
            trace,
            container_width,
            container_height,
            avatar_width,
            avatar_height,
            output,
        } => commands::replay::run(
            trace,
            container_width,
            container_height,
            avatar_width,
            avatar_height,
            output,
        ),
        Commands::Analyze {
            trace,
            alpha,
            max_tilt,
        } => commands::analyze::run(trace, alpha, max_tilt),
        Commands::Check => commands::check::run(),
    }
}
