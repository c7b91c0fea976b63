//! Replay a recorded trace through the tracker.

use std::io::Write;
use std::path::PathBuf;

use tiltdrift_motion_model::geometry::StageLayout;
use tiltdrift_motion_model::sample::parse_trace;
use tiltdrift_tracker_core::tracker::TrackerConfig;
use tiltdrift_tracker_core::trajectory::{replay_trace, TrajectoryStats};

pub fn run(
    trace: PathBuf,
    container_width: f64,
    container_height: f64,
    avatar_width: f64,
    avatar_height: f64,
    output: Option<PathBuf>,
) -> anyhow::Result<()> {
    println!("Replaying trace: {}", trace.display());

    let content = std::fs::read_to_string(&trace)
        .map_err(|_| anyhow::anyhow!("Trace file not found: {}", trace.display()))?;
    let events =
        parse_trace(&content).map_err(|e| anyhow::anyhow!("Failed to parse trace: {e}"))?;
    println!("  Loaded {} events", events.len());

    if events.is_empty() {
        println!("  Nothing to replay.");
        return Ok(());
    }

    let layout = StageLayout::new(
        container_width,
        container_height,
        avatar_width,
        avatar_height,
    );
    let config = TrackerConfig::default().validated()?;
    let points = replay_trace(&events, config, &layout);
    let stats = TrajectoryStats::from_events(&events, config, &layout);

    println!("  Offsets emitted: {}", points.len());
    println!(
        "  Final offset: ({:.2}, {:.2}) px",
        stats.final_offset.x, stats.final_offset.y
    );
    println!("  Peak |x|: {:.2} px, peak |y|: {:.2} px", stats.peak_x, stats.peak_y);

    if let Some(path) = output {
        let mut file = std::fs::File::create(&path)?;
        for point in &points {
            writeln!(file, "{}", serde_json::to_string(point)?)?;
        }
        println!("  Offsets written to: {}", path.display());
    }

    println!("\nReplay complete.");
    Ok(())
}
