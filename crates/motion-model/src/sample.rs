//! Sensor event types for the TiltDrift sample stream.
//!
//! Traces are recorded in append-only JSONL format for crash safety. Axis
//! values are raw device units; the accelerometer reports approximately
//! gravities per axis.

use serde::{Deserialize, Serialize};

/// Monotonic timestamp in nanoseconds since session start.
pub type TimestampNs = u64;

/// Which hardware sensor produced an event.
///
/// Only [`SensorKind::Accelerometer`] drives motion; the other kinds exist
/// so that kind-filtering in consumers is observable behavior rather than
/// an assumption.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SensorKind {
    Accelerometer,
    Gyroscope,
    MagneticField,
}

/// Reported accuracy of a sensor stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SensorAccuracy {
    Unreliable,
    Low,
    Medium,
    High,
}

/// A single timestamped sensor event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensorEvent {
    /// Monotonic nanoseconds since session start.
    #[serde(rename = "t")]
    pub timestamp_ns: TimestampNs,

    /// The event payload.
    #[serde(flatten)]
    pub kind: EventKind,
}

/// Discriminated union of event types.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EventKind {
    /// Axis readings from one sensor, in device units.
    Reading {
        /// Which sensor produced the reading.
        sensor: SensorKind,
        /// X-axis value (left/right tilt for the accelerometer).
        x: f64,
        /// Y-axis value (forward/back tilt for the accelerometer).
        y: f64,
        /// Z-axis value (toward/away from the screen).
        z: f64,
    },

    /// Accuracy-change notification for a sensor stream.
    ///
    /// Consumers treat this as a no-op; it is carried in traces so replays
    /// exercise the same ignore path as live sessions.
    AccuracyChange {
        /// Which sensor changed accuracy.
        sensor: SensorKind,
        /// The new accuracy level.
        accuracy: SensorAccuracy,
    },
}

/// Trace metadata written as the first line of a JSONL trace file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TraceHeader {
    /// Schema version for forward compatibility.
    pub schema_version: String,

    /// Wall-clock time at session start (ISO 8601).
    pub epoch_wall: String,

    /// Nominal delivery rate for sensor events (Hz).
    pub sample_rate_hz: u32,

    /// Name of the backend that produced the trace.
    pub source: String,
}

impl SensorEvent {
    /// Create an accelerometer reading.
    pub fn accel(timestamp_ns: TimestampNs, x: f64, y: f64, z: f64) -> Self {
        Self::reading(timestamp_ns, SensorKind::Accelerometer, x, y, z)
    }

    /// Create a reading for an arbitrary sensor kind.
    pub fn reading(timestamp_ns: TimestampNs, sensor: SensorKind, x: f64, y: f64, z: f64) -> Self {
        Self {
            timestamp_ns,
            kind: EventKind::Reading { sensor, x, y, z },
        }
    }

    /// Create an accuracy-change event.
    pub fn accuracy_change(
        timestamp_ns: TimestampNs,
        sensor: SensorKind,
        accuracy: SensorAccuracy,
    ) -> Self {
        Self {
            timestamp_ns,
            kind: EventKind::AccuracyChange { sensor, accuracy },
        }
    }

    /// Timestamp as fractional seconds since session start.
    pub fn timestamp_secs(&self) -> f64 {
        self.timestamp_ns as f64 / 1_000_000_000.0
    }

    /// Extract the (x, y) accelerometer axes if this event carries them.
    ///
    /// Returns `None` for any other sensor kind and for accuracy changes;
    /// this is the filter point that keeps foreign sensors away from the
    /// tracker.
    pub fn accel_axes(&self) -> Option<(f64, f64)> {
        match &self.kind {
            EventKind::Reading {
                sensor: SensorKind::Accelerometer,
                x,
                y,
                ..
            } => Some((*x, *y)),
            _ => None,
        }
    }

    /// The sensor this event belongs to.
    pub fn sensor(&self) -> SensorKind {
        match &self.kind {
            EventKind::Reading { sensor, .. } => *sensor,
            EventKind::AccuracyChange { sensor, .. } => *sensor,
        }
    }
}

/// Parse events from JSONL content (one JSON object per line).
///
/// Lines starting with `#` (the trace header) and blank lines are skipped.
pub fn parse_trace(jsonl: &str) -> Result<Vec<SensorEvent>, serde_json::Error> {
    jsonl
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(serde_json::from_str)
        .collect()
}

/// Serialize events to JSONL format.
pub fn serialize_trace(events: &[SensorEvent]) -> Result<String, serde_json::Error> {
    let mut output = String::new();
    for event in events {
        output.push_str(&serde_json::to_string(event)?);
        output.push('\n');
    }
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accel_event_roundtrip() {
        let event = SensorEvent::accel(1_000_000_000, 0.5, -0.3, 9.8);
        let json = serde_json::to_string(&event).unwrap();
        let parsed: SensorEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(event, parsed);
    }

    #[test]
    fn test_accuracy_change_roundtrip() {
        let event = SensorEvent::accuracy_change(
            2_000_000_000,
            SensorKind::Accelerometer,
            SensorAccuracy::Medium,
        );
        let json = serde_json::to_string(&event).unwrap();
        let parsed: SensorEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(event, parsed);
    }

    #[test]
    fn test_jsonl_roundtrip() {
        let events = vec![
            SensorEvent::accel(0, 0.0, 0.0, 9.8),
            SensorEvent::reading(20_000_000, SensorKind::Gyroscope, 0.1, 0.2, 0.3),
            SensorEvent::accel(40_000_000, 1.0, 0.5, 9.7),
        ];
        let jsonl = serialize_trace(&events).unwrap();
        let parsed = parse_trace(&jsonl).unwrap();
        assert_eq!(events, parsed);
    }

    #[test]
    fn test_parse_trace_skips_header_comment() {
        let jsonl = "# {\"schema_version\":\"1.0\"}\n{\"t\":0,\"type\":\"reading\",\"sensor\":\"accelerometer\",\"x\":1.0,\"y\":0.5,\"z\":9.8}\n";
        let parsed = parse_trace(jsonl).unwrap();
        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed[0].timestamp_ns, 0);
    }

    #[test]
    fn test_accel_axes_extraction() {
        let accel = SensorEvent::accel(0, 0.3, 0.7, 9.8);
        assert_eq!(accel.accel_axes(), Some((0.3, 0.7)));

        let gyro = SensorEvent::reading(0, SensorKind::Gyroscope, 0.3, 0.7, 0.0);
        assert_eq!(gyro.accel_axes(), None);

        let accuracy = SensorEvent::accuracy_change(
            0,
            SensorKind::Accelerometer,
            SensorAccuracy::High,
        );
        assert_eq!(accuracy.accel_axes(), None);
    }

    #[test]
    fn test_timestamp_secs() {
        let event = SensorEvent::accel(1_500_000_000, 0.0, 0.0, 0.0);
        assert!((event.timestamp_secs() - 1.5).abs() < 1e-9);
    }

    #[test]
    fn test_json_wire_format() {
        let event = SensorEvent::accel(1234567890123, 0.5, 0.3, 9.8);
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("\"t\":1234567890123"));
        assert!(json.contains("\"type\":\"reading\""));
        assert!(json.contains("\"sensor\":\"accelerometer\""));
        assert!(json.contains("\"x\":0.5"));
        assert!(json.contains("\"y\":0.3"));
    }

    #[test]
    fn test_header_roundtrip() {
        let header = TraceHeader {
            schema_version: "1.0".to_string(),
            epoch_wall: "2026-01-01T00:00:00Z".to_string(),
            sample_rate_hz: 50,
            source: "synthetic".to_string(),
        };
        let json = serde_json::to_string(&header).unwrap();
        let parsed: TraceHeader = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.sample_rate_hz, 50);
        assert_eq!(parsed.source, "synthetic");
    }
}
