//! Run a live tracking session.

use std::path::PathBuf;

use tiltdrift_animator::TweenAnimator;
use tiltdrift_common::config::AppConfig;
use tiltdrift_motion_model::animation::{AnimationSpec, Easing};
use tiltdrift_motion_model::geometry::StageLayout;
use tiltdrift_sensor_feed::backends::{detect_best_backend, IioBackend, SyntheticBackend, TiltWave};
use tiltdrift_sensor_feed::SensorBackend;
use tiltdrift_session_engine::{FixedLayout, SessionConfig, TrackingSession};
use tiltdrift_tracker_core::tracker::TrackerConfig;

#[allow(clippy::too_many_arguments)]
pub async fn run(
    backend: String,
    duration_secs: f64,
    rate: u32,
    container_width: f64,
    container_height: f64,
    avatar_width: f64,
    avatar_height: f64,
    trace: Option<PathBuf>,
) -> anyhow::Result<()> {
    let backend = select_backend(&backend)?;

    println!("Starting tracking session");
    println!("  Backend: {}", backend.name());
    println!("  Rate: {rate} Hz");
    println!("  Container: {container_width}x{container_height}");
    println!("  Avatar: {avatar_width}x{avatar_height}");
    if let Some(ref path) = trace {
        println!("  Trace: {}", path.display());
    }
    println!();

    // Tuning comes from the user config file; geometry and rate from flags.
    let app = AppConfig::load();
    let config = SessionConfig {
        tracker: TrackerConfig {
            alpha: app.tracking.alpha,
            sensitivity: app.tracking.sensitivity,
            max_tilt: app.tracking.max_tilt,
        },
        animation: AnimationSpec::new(
            app.tracking.animation_duration_ms,
            Easing::Overshoot {
                tension: app.tracking.overshoot_tension,
            },
        ),
        sample_rate_hz: rate,
        reset_filter_on_start: false,
        trace_path: trace,
    };
    let layout = StageLayout::new(
        container_width,
        container_height,
        avatar_width,
        avatar_height,
    );
    let mut session = TrackingSession::new(config, Box::new(FixedLayout(layout)), TweenAnimator::new())?;

    session.start(backend)?;
    tracing::info!(rate_hz = rate, duration_secs, "Live tracking session started");
    println!("Tracking for {duration_secs}s (Ctrl+C to stop early)...");

    tokio::select! {
        result = session.run_for(std::time::Duration::from_secs_f64(duration_secs)) => result?,
        _ = tokio::signal::ctrl_c() => {
            println!("\nInterrupted.");
        }
    }

    session.stop().await?;
    tracing::info!(
        samples = session.samples_processed(),
        offsets = session.offsets_emitted(),
        "Live tracking session finished"
    );

    println!();
    println!("Session finished");
    println!("  Samples processed: {}", session.samples_processed());
    println!("  Offsets emitted: {}", session.offsets_emitted());
    println!("  Events ignored: {}", session.events_ignored());
    match session.last_offset() {
        Some(offset) => println!("  Final offset: ({:.2}, {:.2}) px", offset.x, offset.y),
        None => println!("  Final offset: none (no samples reached the tracker)"),
    }

    Ok(())
}

fn select_backend(name: &str) -> anyhow::Result<Box<dyn SensorBackend>> {
    match name {
        "auto" => Ok(detect_best_backend()),
        "iio" => Ok(Box::new(IioBackend::new()?)),
        "synthetic" => Ok(Box::new(SyntheticBackend::new(TiltWave::Circle {
            amplitude: 0.6,
            period_secs: 4.0,
        }))),
        other => anyhow::bail!("Unknown backend '{other}' (expected auto, iio, or synthetic)"),
    }
}
