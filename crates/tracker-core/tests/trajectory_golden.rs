use std::path::PathBuf;

use tiltdrift_motion_model::geometry::StageLayout;
use tiltdrift_motion_model::sample::{parse_trace, SensorEvent};
use tiltdrift_tracker_core::tracker::TrackerConfig;
use tiltdrift_tracker_core::trajectory::{replay_trace, TrajectoryStats};

fn load_fixture_events() -> Vec<SensorEvent> {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..")
        .join("fixtures")
        .join("traces")
        .join("figure8.jsonl");

    let content = std::fs::read_to_string(path).expect("fixture trace should be readable");
    parse_trace(&content).expect("fixture trace should parse")
}

fn fnv1a_64(input: &str) -> u64 {
    let mut hash: u64 = 0xcbf29ce484222325;
    for byte in input.as_bytes() {
        hash ^= *byte as u64;
        hash = hash.wrapping_mul(0x100000001b3);
    }
    hash
}

#[test]
fn figure8_default_trajectory_signature_is_stable() {
    let events = load_fixture_events();
    assert_eq!(events.len(), 240);

    let layout = StageLayout::new(1000.0, 2000.0, 100.0, 100.0);
    let points = replay_trace(&events, TrackerConfig::default(), &layout);

    let signature = points
        .iter()
        .map(|p| {
            format!(
                "{:.3}|{:.6}|{:.6}",
                p.timestamp_secs(),
                p.offset.x,
                p.offset.y
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    assert_eq!(points.len(), 212);
    assert_eq!(fnv1a_64(&signature), 0x3ddd84622b385479);
}

#[test]
fn figure8_offsets_stay_inside_bounds() {
    let events = load_fixture_events();
    let layout = StageLayout::new(1000.0, 2000.0, 100.0, 100.0);
    let bounds = layout.bounds();

    for point in replay_trace(&events, TrackerConfig::default(), &layout) {
        assert!(bounds.contains(point.offset), "{point:?} escaped bounds");
    }
}

#[test]
fn figure8_stats_skip_foreign_events() {
    let events = load_fixture_events();
    let layout = StageLayout::new(1000.0, 2000.0, 100.0, 100.0);
    let stats = TrajectoryStats::from_events(&events, TrackerConfig::default(), &layout);

    // 240 fixture events: 212 accelerometer readings, 24 gyroscope
    // readings, 4 accuracy changes. Only the accelerometer readings count.
    assert_eq!(stats.samples, 212);
    assert_eq!(stats.clipped_fraction, 0.0);
}
