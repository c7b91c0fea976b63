//! Show statistics for a recorded trace.

use std::path::PathBuf;

use tiltdrift_motion_model::sample::{parse_trace, EventKind, SensorKind};
use tiltdrift_tracker_core::filter::samples_to_settle;

pub fn run(trace: PathBuf, alpha: f64, max_tilt: f64) -> anyhow::Result<()> {
    println!("Analyzing trace: {}", trace.display());

    let content = std::fs::read_to_string(&trace)
        .map_err(|_| anyhow::anyhow!("Trace file not found: {}", trace.display()))?;
    let events =
        parse_trace(&content).map_err(|e| anyhow::anyhow!("Failed to parse trace: {e}"))?;

    if events.is_empty() {
        println!("  Trace is empty.");
        return Ok(());
    }

    let first_ns = events.iter().map(|e| e.timestamp_ns).min().unwrap_or(0);
    let last_ns = events.iter().map(|e| e.timestamp_ns).max().unwrap_or(0);
    let duration_secs = (last_ns - first_ns) as f64 / 1_000_000_000.0;

    let mut accel = 0usize;
    let mut gyro = 0usize;
    let mut magnetic = 0usize;
    let mut accuracy_changes = 0usize;
    let mut clipped = 0usize;
    let mut x_range = (f64::INFINITY, f64::NEG_INFINITY);
    let mut y_range = (f64::INFINITY, f64::NEG_INFINITY);

    for event in &events {
        match &event.kind {
            EventKind::Reading { sensor, x, y, .. } => {
                match sensor {
                    SensorKind::Accelerometer => {
                        accel += 1;
                        x_range = (x_range.0.min(*x), x_range.1.max(*x));
                        y_range = (y_range.0.min(*y), y_range.1.max(*y));
                        if x.abs() > max_tilt || y.abs() > max_tilt {
                            clipped += 1;
                        }
                    }
                    SensorKind::Gyroscope => gyro += 1,
                    SensorKind::MagneticField => magnetic += 1,
                }
            }
            EventKind::AccuracyChange { .. } => accuracy_changes += 1,
        }
    }

    println!("  Events: {} over {duration_secs:.2}s", events.len());
    println!("  Accelerometer readings: {accel}");
    println!("  Gyroscope readings: {gyro}");
    println!("  Magnetic field readings: {magnetic}");
    println!("  Accuracy changes: {accuracy_changes}");

    if accel > 0 {
        println!(
            "  Accel x range: [{:.3}, {:.3}] g, y range: [{:.3}, {:.3}] g",
            x_range.0, x_range.1, y_range.0, y_range.1
        );
        println!(
            "  Clipped vs +/-{max_tilt} g window: {} ({:.1}%)",
            clipped,
            clipped as f64 / accel as f64 * 100.0
        );
    }

    if alpha > 0.0 && alpha < 1.0 {
        let settle = samples_to_settle(alpha, 0.99);
        println!("  Filter settling (alpha={alpha}): {settle} samples to 99%");
    } else {
        println!("  Filter settling: alpha {alpha} outside (0, 1), skipped");
    }

    println!("\nAnalysis complete.");
    Ok(())
}
