//! Configuration loading — TOML file with environment variable overrides.
//!
//! Looks for `homebus.toml` in the working directory. Every field has a
//! sensible default so the file is optional. Environment variables take
//! precedence over file values.

use std::time::Duration;

use homebus_adapter_virtual::{DEFAULT_RESERVOIR, Latency};
use serde::Deserialize;

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Logging settings.
    pub logging: LoggingConfig,
    /// Simulated device latency.
    pub latency: LatencyConfig,
    /// Speaker settings.
    pub speaker: SpeakerConfig,
    /// Toilet settings.
    pub toilet: ToiletConfig,
}

/// Logging configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive (`RUST_LOG` syntax).
    pub filter: String,
}

/// Bounds of the simulated response latency, in milliseconds.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LatencyConfig {
    pub min_ms: u64,
    pub max_ms: u64,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct SpeakerConfig {
    /// Song played by the wake up routine.
    pub song: String,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ToiletConfig {
    /// Flushes available before the reservoir runs dry.
    pub reservoir: u32,
}

impl Config {
    /// Load configuration from `homebus.toml` (if present) then apply
    /// environment-variable overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML file exists but is malformed, or if the
    /// resulting configuration is invalid.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = Self::from_file("homebus.toml")?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(ConfigError::Parse),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(ConfigError::Io(err)),
        }
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(val) = std::env::var("HOMEBUS_LOG") {
            self.logging.filter = val;
        }
        if let Ok(val) = std::env::var("RUST_LOG") {
            self.logging.filter = val;
        }
        if let Some(ms) = env_parse("HOMEBUS_LATENCY_MIN_MS") {
            self.latency.min_ms = ms;
        }
        if let Some(ms) = env_parse("HOMEBUS_LATENCY_MAX_MS") {
            self.latency.max_ms = ms;
        }
        if let Some(reservoir) = env_parse("HOMEBUS_TOILET_RESERVOIR") {
            self.toilet.reservoir = reservoir;
        }
        if let Ok(val) = std::env::var("HOMEBUS_SONG") {
            self.speaker.song = val;
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.latency.min_ms > self.latency.max_ms {
            return Err(ConfigError::Validation(
                "latency.min_ms must not exceed latency.max_ms".to_string(),
            ));
        }
        if self.speaker.song.trim().is_empty() {
            return Err(ConfigError::Validation(
                "speaker.song must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|val| val.parse().ok())
}

impl LatencyConfig {
    /// The latency model virtual devices are built with.
    #[must_use]
    pub fn latency(&self) -> Latency {
        match (self.min_ms, self.max_ms) {
            (0, 0) => Latency::None,
            (min, max) if min == max => Latency::Fixed(Duration::from_millis(min)),
            (min, max) => Latency::uniform(Duration::from_millis(min), Duration::from_millis(max)),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "homebusd=info,homebus_app=info".to_string(),
        }
    }
}

impl Default for LatencyConfig {
    fn default() -> Self {
        Self {
            min_ms: 200,
            max_ms: 800,
        }
    }
}

impl Default for SpeakerConfig {
    fn default() -> Self {
        Self {
            song: "Rick Astley - Never Gonna Give You Up".to_string(),
        }
    }
}

impl Default for ToiletConfig {
    fn default() -> Self {
        Self {
            reservoir: DEFAULT_RESERVOIR,
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// TOML parse failure.
    #[error("failed to parse config file")]
    Parse(#[from] toml::de::Error),
    /// File I/O failure.
    #[error("failed to read config file")]
    Io(#[from] std::io::Error),
    /// Semantic validation failure.
    #[error("invalid configuration: {0}")]
    Validation(String),
}
