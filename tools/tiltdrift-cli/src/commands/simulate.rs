//! Run a synthetic tilt waveform through the tracker offline.

use std::io::Write;
use std::path::PathBuf;

use tiltdrift_motion_model::geometry::StageLayout;
use tiltdrift_motion_model::sample::TraceHeader;
use tiltdrift_sensor_feed::backends::{SyntheticBackend, TiltWave};
use tiltdrift_sensor_feed::writer::TraceWriter;
use tiltdrift_tracker_core::tracker::TrackerConfig;
use tiltdrift_tracker_core::trajectory::{replay_trace, TrajectoryStats};

#[allow(clippy::too_many_arguments)]
pub fn run(
    wave: String,
    amplitude: f64,
    duration_secs: f64,
    rate: u32,
    container_width: f64,
    container_height: f64,
    avatar_width: f64,
    avatar_height: f64,
    trace: Option<PathBuf>,
    output: Option<PathBuf>,
) -> anyhow::Result<()> {
    let wave = parse_wave(&wave, amplitude)?;
    println!("Simulating {wave:?} for {duration_secs}s at {rate} Hz");

    let mut backend = SyntheticBackend::new(wave);
    let events = backend.generate_trace(duration_secs, rate);
    println!("  Generated {} events", events.len());

    let layout = StageLayout::new(
        container_width,
        container_height,
        avatar_width,
        avatar_height,
    );
    let config = TrackerConfig::default().validated()?;
    let stats = TrajectoryStats::from_events(&events, config, &layout);

    println!("  Offsets emitted: {}", stats.samples);
    println!(
        "  Final offset: ({:.2}, {:.2}) px",
        stats.final_offset.x, stats.final_offset.y
    );
    println!("  Peak |x|: {:.2} px, peak |y|: {:.2} px", stats.peak_x, stats.peak_y);
    println!(
        "  Clipped samples: {:.1}%",
        stats.clipped_fraction * 100.0
    );

    if let Some(path) = trace {
        let header = TraceHeader {
            schema_version: "1.0".to_string(),
            epoch_wall: wall_clock_epoch(),
            sample_rate_hz: rate,
            source: "synthetic".to_string(),
        };
        let mut writer = TraceWriter::new(path.clone(), header)?;
        for event in &events {
            writer.write_event(event)?;
        }
        writer.flush()?;
        println!("  Trace written to: {}", path.display());
    }

    if let Some(path) = output {
        let points = replay_trace(&events, config, &layout);
        let mut file = std::fs::File::create(&path)?;
        for point in &points {
            writeln!(file, "{}", serde_json::to_string(point)?)?;
        }
        println!("  Offsets written to: {}", path.display());
    }

    println!("\nSimulation complete.");
    Ok(())
}

fn parse_wave(name: &str, amplitude: f64) -> anyhow::Result<TiltWave> {
    match name {
        "hold" => Ok(TiltWave::Hold {
            x: amplitude,
            y: amplitude / 2.0,
        }),
        "step" => Ok(TiltWave::Step {
            x: amplitude,
            y: amplitude / 2.0,
            at_secs: 1.0,
        }),
        "circle" => Ok(TiltWave::Circle {
            amplitude,
            period_secs: 4.0,
        }),
        "shake" => Ok(TiltWave::Shake {
            amplitude,
            frequency_hz: 6.0,
        }),
        other => anyhow::bail!("Unknown wave '{other}' (expected hold, step, circle, or shake)"),
    }
}

// Simulations are not anchored to a live session clock; stamp the header
// with the process wall clock.
fn wall_clock_epoch() -> String {
    tiltdrift_common::clock::SessionClock::start()
        .epoch_wall()
        .to_string()
}
