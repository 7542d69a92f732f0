//! System configuration parameters.
//!
//! All tunable parameters for the simulated machine. Defaults reproduce the
//! reference appliance (1 s per brew tick, 5 ticks per pot); tests shrink
//! the tick to run full cycles in tens of milliseconds.

use core::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// Core system configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemConfig {
    /// Brew cycle tick period (milliseconds).
    pub brew_tick_interval_ms: u64,
    /// Consecutive closed-valve ticks required to finish a pot.
    pub brew_ticks_to_complete: u32,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            brew_tick_interval_ms: 1000, // 1 simulated second per tick
            brew_ticks_to_complete: 5,
        }
    }
}

impl SystemConfig {
    /// Range-check every field. Invalid values are rejected, not clamped.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.brew_tick_interval_ms == 0 {
            return Err(ConfigError::ValidationFailed(
                "brew_tick_interval_ms must be non-zero",
            ));
        }
        if self.brew_ticks_to_complete == 0 {
            return Err(ConfigError::ValidationFailed(
                "brew_ticks_to_complete must be non-zero",
            ));
        }
        Ok(())
    }

    /// Load and validate configuration from a JSON file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ConfigError::NotFound
            } else {
                ConfigError::IoError
            }
        })?;
        let config: Self = serde_json::from_str(&raw).map_err(|_| ConfigError::Corrupted)?;
        config.validate()?;
        Ok(config)
    }
}

// ───────────────────────────────────────────────────────────────
// Error type
// ───────────────────────────────────────────────────────────────

/// Errors from configuration loading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// No config file at the given path.
    NotFound,
    /// File exists but is not valid JSON for [`SystemConfig`].
    Corrupted,
    /// A field failed range validation; the message names which and why.
    ValidationFailed(&'static str),
    /// Generic I/O error reading the file.
    IoError,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound => write!(f, "config not found"),
            Self::Corrupted => write!(f, "config corrupted"),
            Self::ValidationFailed(msg) => write!(f, "validation failed: {}", msg),
            Self::IoError => write!(f, "I/O error"),
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_sane() {
        let c = SystemConfig::default();
        assert_eq!(c.brew_tick_interval_ms, 1000);
        assert_eq!(c.brew_ticks_to_complete, 5);
        assert!(c.validate().is_ok());
    }

    #[test]
    fn serde_roundtrip() {
        let c = SystemConfig::default();
        let json = serde_json::to_string(&c).unwrap();
        let c2: SystemConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(c.brew_tick_interval_ms, c2.brew_tick_interval_ms);
        assert_eq!(c.brew_ticks_to_complete, c2.brew_ticks_to_complete);
    }

    #[test]
    fn zero_tick_interval_rejected() {
        let c = SystemConfig {
            brew_tick_interval_ms: 0,
            ..SystemConfig::default()
        };
        assert!(matches!(c.validate(), Err(ConfigError::ValidationFailed(_))));
    }

    #[test]
    fn zero_tick_count_rejected() {
        let c = SystemConfig {
            brew_ticks_to_complete: 0,
            ..SystemConfig::default()
        };
        assert!(matches!(c.validate(), Err(ConfigError::ValidationFailed(_))));
    }

    #[test]
    fn load_missing_file_is_not_found() {
        let err = SystemConfig::load(Path::new("/nonexistent/percolator.json")).unwrap_err();
        assert_eq!(err, ConfigError::NotFound);
    }
}
