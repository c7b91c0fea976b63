//! Sensor backend implementations.
//!
//! Each backend provides a different source of accelerometer readings.

use std::path::{Path, PathBuf};

use tiltdrift_common::error::{TiltdriftError, TiltdriftResult};
use tiltdrift_motion_model::sample::{SensorAccuracy, SensorEvent, SensorKind};

use crate::SensorBackend;

/// Polls between accuracy-change notifications from the synthetic backend.
const ACCURACY_EVENT_PERIOD: u64 = 200;

/// Standard gravity, for converting IIO m/s^2 readings to g.
const STANDARD_GRAVITY: f64 = 9.80665;

/// Deterministic tilt waveforms, in device units (g).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TiltWave {
    /// Constant tilt on both axes.
    Hold { x: f64, y: f64 },

    /// Flat until `at_secs`, then constant tilt. Exercises filter step
    /// response.
    Step { x: f64, y: f64, at_secs: f64 },

    /// Circular tilt of the given amplitude and period.
    Circle { amplitude: f64, period_secs: f64 },

    /// Fast alternating tilt, the jitter case smoothing exists for.
    Shake { amplitude: f64, frequency_hz: f64 },
}

impl TiltWave {
    /// Evaluate the waveform's (x, y) tilt at a session time.
    pub fn sample(&self, t_secs: f64) -> (f64, f64) {
        match *self {
            TiltWave::Hold { x, y } => (x, y),
            TiltWave::Step { x, y, at_secs } => {
                if t_secs >= at_secs {
                    (x, y)
                } else {
                    (0.0, 0.0)
                }
            }
            TiltWave::Circle {
                amplitude,
                period_secs,
            } => {
                let phase = t_secs / period_secs.max(1e-9) * std::f64::consts::TAU;
                (amplitude * phase.cos(), amplitude * phase.sin())
            }
            TiltWave::Shake {
                amplitude,
                frequency_hz,
            } => {
                let phase = t_secs * frequency_hz * std::f64::consts::TAU;
                (amplitude * phase.sin(), -amplitude * phase.sin())
            }
        }
    }
}

/// Synthetic backend — a pure function of session time plus a poll counter.
///
/// Every [`ACCURACY_EVENT_PERIOD`]th poll yields an accuracy-change
/// notification instead of a reading, so consumers demonstrably exercise
/// the ignore path a real sensor stack would send them down.
pub struct SyntheticBackend {
    wave: TiltWave,
    polls: u64,
}

impl SyntheticBackend {
    pub fn new(wave: TiltWave) -> Self {
        Self { wave, polls: 0 }
    }

    /// Generate an offline trace at a fixed rate, as the live feed would
    /// deliver it.
    pub fn generate_trace(&mut self, duration_secs: f64, rate_hz: u32) -> Vec<SensorEvent> {
        let interval_ns = 1_000_000_000 / rate_hz.max(1) as u64;
        let total = (duration_secs.max(0.0) * rate_hz.max(1) as f64) as u64;

        let mut events = Vec::with_capacity(total as usize);
        for i in 0..total {
            let now_ns = i * interval_ns;
            if let Ok(Some(mut event)) = self.poll(now_ns) {
                event.timestamp_ns = now_ns;
                events.push(event);
            }
        }
        events
    }
}

impl SensorBackend for SyntheticBackend {
    fn poll(&mut self, now_ns: u64) -> TiltdriftResult<Option<SensorEvent>> {
        self.polls += 1;
        if self.polls % ACCURACY_EVENT_PERIOD == 0 {
            return Ok(Some(SensorEvent::accuracy_change(
                now_ns,
                SensorKind::Accelerometer,
                SensorAccuracy::High,
            )));
        }

        let t_secs = now_ns as f64 / 1_000_000_000.0;
        let (x, y) = self.wave.sample(t_secs);
        Ok(Some(SensorEvent::accel(now_ns, x, y, 1.0)))
    }

    fn name(&self) -> &str {
        "synthetic"
    }

    fn is_available(&self) -> bool {
        true
    }
}

/// Linux industrial-I/O accelerometer backend.
///
/// Reads `in_accel_{x,y}_raw` and `in_accel_scale` from a sysfs device
/// directory. The scale converts raw counts to m/s^2 per the IIO ABI;
/// readings are reported to the session in g.
pub struct IioBackend {
    device_dir: PathBuf,
    scale: f64,
}

impl IioBackend {
    /// Open the first available IIO accelerometer.
    pub fn new() -> TiltdriftResult<Self> {
        let device_dir = Self::probe().ok_or_else(|| {
            TiltdriftError::sensor("No IIO accelerometer found under /sys/bus/iio/devices")
        })?;
        Self::open(&device_dir)
    }

    /// Open a specific IIO device directory.
    pub fn open(device_dir: &Path) -> TiltdriftResult<Self> {
        let scale = read_sysfs_f64(&device_dir.join("in_accel_scale")).unwrap_or(1.0);
        Ok(Self {
            device_dir: device_dir.to_path_buf(),
            scale,
        })
    }

    /// Find a sysfs device directory exposing accelerometer channels.
    pub fn probe() -> Option<PathBuf> {
        let devices = std::fs::read_dir("/sys/bus/iio/devices").ok()?;
        for entry in devices.flatten() {
            let dir = entry.path();
            if dir.join("in_accel_x_raw").exists() && dir.join("in_accel_y_raw").exists() {
                return Some(dir);
            }
        }
        None
    }

    /// Whether any IIO accelerometer is present on this system.
    pub fn is_supported() -> bool {
        Self::probe().is_some()
    }

    fn read_axis_g(&self, channel: &str) -> TiltdriftResult<f64> {
        let raw = read_sysfs_f64(&self.device_dir.join(channel)).map_err(|e| {
            TiltdriftError::sensor(format!(
                "Failed reading {}/{channel}: {e}",
                self.device_dir.display()
            ))
        })?;
        Ok(raw * self.scale / STANDARD_GRAVITY)
    }
}

impl SensorBackend for IioBackend {
    fn poll(&mut self, now_ns: u64) -> TiltdriftResult<Option<SensorEvent>> {
        let x = self.read_axis_g("in_accel_x_raw")?;
        let y = self.read_axis_g("in_accel_y_raw")?;
        let z = read_sysfs_f64(&self.device_dir.join("in_accel_z_raw"))
            .map(|raw| raw * self.scale / STANDARD_GRAVITY)
            .unwrap_or(0.0);
        Ok(Some(SensorEvent::accel(now_ns, x, y, z)))
    }

    fn name(&self) -> &str {
        "iio"
    }

    fn is_available(&self) -> bool {
        self.device_dir.join("in_accel_x_raw").exists()
    }
}

fn read_sysfs_f64(path: &Path) -> std::io::Result<f64> {
    let content = std::fs::read_to_string(path)?;
    content
        .trim()
        .parse::<f64>()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))
}

/// Detect the best available sensor backend for the current system.
///
/// Prefers real hardware; falls back to a gentle synthetic circle so the
/// pipeline stays demonstrable on machines without an accelerometer.
pub fn detect_best_backend() -> Box<dyn SensorBackend> {
    if IioBackend::is_supported() {
        match IioBackend::new() {
            Ok(backend) => {
                tracing::info!(device = %backend.device_dir.display(), "Using IIO backend");
                return Box::new(backend);
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to initialize IIO backend, using synthetic");
            }
        }
    }

    tracing::warn!("No accelerometer hardware found — using synthetic tilt waveform");
    Box::new(SyntheticBackend::new(TiltWave::Circle {
        amplitude: 0.6,
        period_secs: 4.0,
    }))
}
