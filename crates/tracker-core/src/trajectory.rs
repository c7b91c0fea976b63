//! Offline trace replay: the non-live analog of a tracking session.
//!
//! A recorded sensor trace run through [`replay_trace`] produces exactly the
//! offset sequence a live session would have emitted for the same layout and
//! tuning — the kind-filtering and accuracy-change handling are the same, the
//! only difference is that time comes from the trace instead of a clock.

use serde::{Deserialize, Serialize};
use tiltdrift_motion_model::geometry::{Offset, StageLayout};
use tiltdrift_motion_model::sample::{SensorEvent, TimestampNs};

use crate::filter::{samples_to_settle, FilterState};
use crate::tracker::{TiltTracker, TrackerConfig};

/// One emitted offset along a replayed trajectory.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrajectoryPoint {
    /// Timestamp of the sample that produced this offset.
    #[serde(rename = "t")]
    pub timestamp_ns: TimestampNs,

    /// The clamped translation target.
    #[serde(flatten)]
    pub offset: Offset,
}

impl TrajectoryPoint {
    /// Timestamp as fractional seconds since trace start.
    pub fn timestamp_secs(&self) -> f64 {
        self.timestamp_ns as f64 / 1_000_000_000.0
    }
}

/// Replay a recorded trace through a fresh tracker.
///
/// Non-accelerometer readings and accuracy changes are skipped, matching the
/// live filtering path. Each accelerometer reading yields one point; the
/// layout is treated as constant for the whole replay.
pub fn replay_trace(
    events: &[SensorEvent],
    config: TrackerConfig,
    layout: &StageLayout,
) -> Vec<TrajectoryPoint> {
    let tracker = TiltTracker::new(config);
    let mut state = FilterState::default();
    let mut points = Vec::new();

    for event in events {
        let Some((ax, ay)) = event.accel_axes() else {
            continue;
        };
        if let Some(offset) = tracker.update(&mut state, ax, ay, layout) {
            points.push(TrajectoryPoint {
                timestamp_ns: event.timestamp_ns,
                offset,
            });
        }
    }

    tracing::debug!(
        events = events.len(),
        points = points.len(),
        "Trace replay complete"
    );

    points
}

/// Summary statistics over a replayed trace.
#[derive(Debug, Clone, Serialize)]
pub struct TrajectoryStats {
    /// Number of accelerometer samples that produced an offset.
    pub samples: usize,

    /// The last emitted offset, or the resting position for an empty trace.
    pub final_offset: Offset,

    /// Largest |x| displacement seen.
    pub peak_x: f64,

    /// Largest |y| displacement seen.
    pub peak_y: f64,

    /// Fraction of accelerometer readings with at least one axis outside
    /// the tilt window before clamping.
    pub clipped_fraction: f64,

    /// Samples until the filter reaches 99% of a constant input at the
    /// replayed alpha.
    pub settle_samples_99: u32,
}

impl TrajectoryStats {
    /// Replay a trace and collect statistics in one pass.
    pub fn from_events(
        events: &[SensorEvent],
        config: TrackerConfig,
        layout: &StageLayout,
    ) -> Self {
        let points = replay_trace(events, config, layout);

        let mut clipped = 0usize;
        let mut readings = 0usize;
        for event in events {
            if let Some((ax, ay)) = event.accel_axes() {
                readings += 1;
                if ax.abs() > config.max_tilt || ay.abs() > config.max_tilt {
                    clipped += 1;
                }
            }
        }

        let mut peak_x = 0.0f64;
        let mut peak_y = 0.0f64;
        for point in &points {
            peak_x = peak_x.max(point.offset.x.abs());
            peak_y = peak_y.max(point.offset.y.abs());
        }

        Self {
            samples: points.len(),
            final_offset: points.last().map(|p| p.offset).unwrap_or(Offset::ZERO),
            peak_x,
            peak_y,
            clipped_fraction: if readings == 0 {
                0.0
            } else {
                clipped as f64 / readings as f64
            },
            settle_samples_99: samples_to_settle(config.alpha, 0.99),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tiltdrift_motion_model::sample::{SensorAccuracy, SensorKind};

    fn layout() -> StageLayout {
        StageLayout::new(1000.0, 2000.0, 100.0, 100.0)
    }

    #[test]
    fn test_replay_skips_foreign_kinds_and_accuracy_changes() {
        let events = vec![
            SensorEvent::accel(0, 1.0, 0.5, 9.8),
            SensorEvent::reading(20_000_000, SensorKind::Gyroscope, 5.0, 5.0, 5.0),
            SensorEvent::accuracy_change(
                40_000_000,
                SensorKind::Accelerometer,
                SensorAccuracy::Low,
            ),
            SensorEvent::accel(60_000_000, 1.0, 0.5, 9.8),
        ];

        let points = replay_trace(&events, TrackerConfig::default(), &layout());
        assert_eq!(points.len(), 2);
        assert_eq!(points[0].timestamp_ns, 0);
        assert_eq!(points[1].timestamp_ns, 60_000_000);
    }

    #[test]
    fn test_replay_matches_live_update_sequence() {
        let events: Vec<SensorEvent> = (0..10)
            .map(|i| SensorEvent::accel(i * 20_000_000, 0.8, -0.4, 9.8))
            .collect();

        let points = replay_trace(&events, TrackerConfig::default(), &layout());

        let tracker = TiltTracker::with_defaults();
        let mut state = FilterState::default();
        for (i, event) in events.iter().enumerate() {
            let (ax, ay) = event.accel_axes().unwrap();
            let expected = tracker.update(&mut state, ax, ay, &layout()).unwrap();
            assert_eq!(points[i].offset, expected);
        }
    }

    #[test]
    fn test_stats_over_constant_trace() {
        // Raw (-1.0, 1.0) converges toward offset (18, 18); after 300
        // samples the final offset is the peak on both axes.
        let events: Vec<SensorEvent> = (0..300)
            .map(|i| SensorEvent::accel(i * 20_000_000, -1.0, 1.0, 9.8))
            .collect();

        let stats = TrajectoryStats::from_events(&events, TrackerConfig::default(), &layout());
        assert_eq!(stats.samples, 300);
        assert!((stats.final_offset.x - 18.0).abs() < 1e-6);
        assert!((stats.final_offset.y - 18.0).abs() < 1e-6);
        assert!((stats.peak_x - stats.final_offset.x).abs() < 1e-12);
        assert_eq!(stats.clipped_fraction, 0.0);
        assert_eq!(stats.settle_samples_99, 29);
    }

    #[test]
    fn test_stats_count_clipped_readings() {
        let events = vec![
            SensorEvent::accel(0, 100.0, 0.0, 9.8),
            SensorEvent::accel(20_000_000, 0.5, 0.5, 9.8),
            SensorEvent::accel(40_000_000, 0.0, -2.5, 9.8),
            SensorEvent::accel(60_000_000, 1.0, 1.0, 9.8),
        ];

        let stats = TrajectoryStats::from_events(&events, TrackerConfig::default(), &layout());
        assert!((stats.clipped_fraction - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_empty_trace_yields_resting_stats() {
        let stats = TrajectoryStats::from_events(&[], TrackerConfig::default(), &layout());
        assert_eq!(stats.samples, 0);
        assert_eq!(stats.final_offset, Offset::ZERO);
        assert_eq!(stats.clipped_fraction, 0.0);
    }
}
