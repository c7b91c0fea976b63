//! Application configuration.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Global application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Directory where recorded sensor traces are stored.
    pub traces_dir: PathBuf,

    /// Default tracking settings.
    pub tracking: TrackingDefaults,

    /// Logging configuration.
    pub logging: LoggingConfig,
}

/// Default tracking parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackingDefaults {
    /// Sensor delivery rate (Hz).
    pub sample_rate_hz: u32,

    /// Low-pass smoothing factor in (0, 1).
    pub alpha: f64,

    /// Displacement pixels per unit of filtered acceleration.
    pub sensitivity: f64,

    /// Symmetric clamp applied to raw axis readings (device units).
    pub max_tilt: f64,

    /// Animation duration handed to the driver (milliseconds).
    pub animation_duration_ms: u64,

    /// Overshoot easing tension.
    pub overshoot_tension: f64,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "tiltdrift=debug,warn").
    pub level: String,

    /// Whether to output structured JSON logs.
    pub json: bool,

    /// Optional log file path.
    pub file: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            traces_dir: dirs_default_traces(),
            tracking: TrackingDefaults::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for TrackingDefaults {
    fn default() -> Self {
        Self {
            sample_rate_hz: crate::clock::GAME_RATE_HZ,
            alpha: 0.15,
            sensitivity: 18.0,
            max_tilt: 1.8,
            animation_duration_ms: 120,
            overshoot_tension: 0.6,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
            file: None,
        }
    }
}

impl AppConfig {
    /// Load config from the standard location, falling back to defaults.
    pub fn load() -> Self {
        let config_path = config_file_path();
        if config_path.exists() {
            match std::fs::read_to_string(&config_path) {
                Ok(content) => match serde_json::from_str(&content) {
                    Ok(config) => return config,
                    Err(e) => {
                        tracing::warn!("Failed to parse config at {:?}: {}", config_path, e);
                    }
                },
                Err(e) => {
                    tracing::warn!("Failed to read config at {:?}: {}", config_path, e);
                }
            }
        }
        Self::default()
    }

    /// Save config to the standard location.
    pub fn save(&self) -> Result<(), std::io::Error> {
        let config_path = config_file_path();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self).map_err(std::io::Error::other)?;
        std::fs::write(config_path, json)
    }
}

/// Standard config file location.
fn config_file_path() -> PathBuf {
    let base = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string());
            PathBuf::from(home).join(".config")
        });
    base.join("tiltdrift").join("config.json")
}

/// Default traces directory.
fn dirs_default_traces() -> PathBuf {
    let base = std::env::var("XDG_DATA_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string());
            PathBuf::from(home).join(".local").join("share")
        });
    base.join("tiltdrift").join("traces")
}
