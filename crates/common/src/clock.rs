//! Clock and pacing utilities for sensor delivery.
//!
//! Every sample in a tracking session is stamped against a monotonic clock
//! epoch captured when the session starts. This module provides:
//! - The session clock (epoch capture, elapsed queries)
//! - Conversion between monotonic nanoseconds and seconds
//! - A pacer that gates sensor delivery at a target rate

use std::time::Instant;

/// The conventional "game-speed" sensor delivery rate: one sample every
/// 20 ms. High enough for responsive motion, low enough to stay cheap.
pub const GAME_RATE_HZ: u32 = 50;

/// A session clock that provides monotonic timestamps relative to a fixed
/// epoch (the moment tracking started).
#[derive(Debug, Clone)]
pub struct SessionClock {
    /// The instant tracking started.
    epoch: Instant,

    /// Wall-clock time at epoch (ISO 8601 string).
    epoch_wall: String,
}

impl SessionClock {
    /// Create a new session clock anchored to now.
    pub fn start() -> Self {
        Self {
            epoch: Instant::now(),
            epoch_wall: chrono::Utc::now().to_rfc3339(),
        }
    }

    /// Create a clock from a known epoch (for replaying saved traces).
    pub fn from_epoch(epoch: Instant, wall: String) -> Self {
        Self {
            epoch,
            epoch_wall: wall,
        }
    }

    /// Get nanoseconds elapsed since tracking start.
    pub fn elapsed_ns(&self) -> u64 {
        self.epoch.elapsed().as_nanos() as u64
    }

    /// Get seconds elapsed since tracking start.
    pub fn elapsed_secs(&self) -> f64 {
        self.epoch.elapsed().as_secs_f64()
    }

    /// Wall-clock time at tracking start.
    pub fn epoch_wall(&self) -> &str {
        &self.epoch_wall
    }

    /// The underlying epoch instant.
    pub fn epoch(&self) -> Instant {
        self.epoch
    }

    /// Convert an elapsed nanosecond value to seconds.
    pub fn ns_to_secs(ns: u64) -> f64 {
        ns as f64 / 1_000_000_000.0
    }

    /// Convert seconds to nanoseconds.
    pub fn secs_to_ns(secs: f64) -> u64 {
        (secs * 1_000_000_000.0) as u64
    }
}

/// Delivery pacer for sensor sampling.
///
/// Hardware and synthetic backends can produce readings far faster than the
/// session wants them; the pacer throttles delivery to the configured rate.
#[derive(Debug)]
pub struct SamplePacer {
    target_interval_ns: u64,
    last_sample_ns: Option<u64>,
}

impl SamplePacer {
    /// Create a pacer targeting the given Hz rate.
    pub fn new(target_hz: u32) -> Self {
        Self {
            target_interval_ns: 1_000_000_000 / target_hz.max(1) as u64,
            last_sample_ns: None,
        }
    }

    /// Check if enough time has passed for the next sample.
    /// Returns true and updates internal state if ready.
    /// The first call always returns true.
    pub fn should_sample(&mut self, current_ns: u64) -> bool {
        match self.last_sample_ns {
            None => {
                self.last_sample_ns = Some(current_ns);
                true
            }
            Some(last) if current_ns >= last + self.target_interval_ns => {
                self.last_sample_ns = Some(current_ns);
                true
            }
            _ => false,
        }
    }

    /// Target interval in nanoseconds.
    pub fn interval_ns(&self) -> u64 {
        self.target_interval_ns
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clock_elapsed() {
        let clock = SessionClock::start();
        // Should be very small but non-negative
        assert!(clock.elapsed_ns() < 1_000_000_000); // less than 1 second
    }

    #[test]
    fn test_ns_to_secs_conversion() {
        assert!((SessionClock::ns_to_secs(1_500_000_000) - 1.5).abs() < 1e-9);
        assert_eq!(SessionClock::secs_to_ns(2.0), 2_000_000_000);
    }

    #[test]
    fn test_pacer_gates_at_game_rate() {
        let mut pacer = SamplePacer::new(GAME_RATE_HZ);
        assert!(pacer.should_sample(0)); // first sample always fires
        assert!(!pacer.should_sample(1_000_000)); // 1ms later, too soon
        assert!(!pacer.should_sample(19_000_000)); // 19ms, still inside the 20ms period
        assert!(pacer.should_sample(20_000_000)); // exactly one period later
    }

    #[test]
    fn test_pacer_interval() {
        let pacer = SamplePacer::new(50);
        assert_eq!(pacer.interval_ns(), 20_000_000);
    }
}
