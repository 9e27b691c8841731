//! Headless driver settings
//!
//! Read from an optional JSON file; gameplay tuning is compile-time and
//! never appears here.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::{FRAME_INTERVAL_MS, WAVE_COUNT, WAVE_DURATION};

/// Default frame budget: every wave at the default cadence plus 5 s of slack
pub const DEFAULT_MAX_FRAMES: u64 =
    (WAVE_COUNT as u64 * WAVE_DURATION as u64 + 5) * 1000 / FRAME_INTERVAL_MS;

/// Errors raised while loading settings
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid settings JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid setting `{field}`: {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

/// Runtime settings for the tick driver
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Session seed; random when absent
    pub seed: Option<u64>,
    /// Milliseconds between frames
    pub frame_interval_ms: u64,
    /// Stop after this many frames even if the game is still running
    pub max_frames: u64,
    /// Let the built-in pilot steer and shoot
    pub autopilot: bool,
    /// Frames between status prints (0 = never)
    pub status_every: u64,
    /// Sleep between frames instead of running as fast as possible
    pub realtime: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            seed: None,
            frame_interval_ms: FRAME_INTERVAL_MS,
            max_frames: DEFAULT_MAX_FRAMES,
            autopilot: true,
            status_every: 60,
            realtime: false,
        }
    }
}

impl Settings {
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a JSON file
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.frame_interval_ms == 0 {
            return Err(SettingsError::Invalid {
                field: "frame_interval_ms",
                reason: "must be greater than zero",
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_object_gives_defaults() {
        let settings = Settings::from_json("{}").unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.frame_interval_ms, 16);
        assert_eq!(settings.max_frames, 7812);
        assert!(settings.autopilot);
    }

    #[test]
    fn test_default_budget_covers_every_wave() {
        let settings = Settings::default();
        // The first frame only sets the clock reference
        let simulated_ms = (settings.max_frames - 1) * settings.frame_interval_ms;
        assert!(simulated_ms >= u64::from(WAVE_COUNT) * WAVE_DURATION as u64 * 1000);
    }

    #[test]
    fn test_partial_override() {
        let settings = Settings::from_json(r#"{"seed": 42, "realtime": true}"#).unwrap();
        assert_eq!(settings.seed, Some(42));
        assert!(settings.realtime);
        assert_eq!(settings.status_every, 60);
    }

    #[test]
    fn test_unknown_field_rejected() {
        let err = Settings::from_json(r#"{"difficulty": "hard"}"#).unwrap_err();
        assert!(matches!(err, SettingsError::Parse(_)));
    }

    #[test]
    fn test_zero_interval_rejected() {
        let err = Settings::from_json(r#"{"frame_interval_ms": 0}"#).unwrap_err();
        assert!(matches!(
            err,
            SettingsError::Invalid {
                field: "frame_interval_ms",
                ..
            }
        ));
    }

    #[test]
    fn test_load_from_file() {
        let path = std::env::temp_dir().join(format!(
            "semester-siege-settings-{}.json",
            std::process::id()
        ));
        std::fs::write(&path, r#"{"max_frames": 10, "autopilot": false}"#).unwrap();
        let settings = Settings::load(&path).unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(settings.max_frames, 10);
        assert!(!settings.autopilot);
    }

    #[test]
    fn test_missing_file() {
        let err = Settings::load(Path::new("/nonexistent/semester-siege.json")).unwrap_err();
        assert!(matches!(err, SettingsError::Io { .. }));
        assert!(err.to_string().contains("/nonexistent/semester-siege.json"));
    }
}
