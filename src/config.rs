//! Playback configuration.
//!
//! [`PlaybackConfig`] is deserialized from JSON; every field defaults so an
//! empty `{}` file is valid. `validate()` returns non-fatal warnings rather
//! than failing, since a bad tuning value should not keep video from playing.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{Error, Result};

/// Default drag-to-seek conversion: milliseconds of media per pixel dragged.
const DEFAULT_SEEK_SCALE_MS_PER_PX: i64 = 200;

/// Default capacity of the player-state broadcast channel.
const DEFAULT_STATE_CHANNEL_CAPACITY: usize = 64;

/// Default User-Agent handed to engine factories for HTTP sources. Some
/// hosts reject unfamiliar agents with 403, so we present a desktop browser.
const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36";

/// Tuning knobs for a playback session.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaybackConfig {
    /// Start playback as soon as the source is loaded.
    pub autoplay: bool,
    /// Milliseconds of media seeked per pixel of horizontal drag.
    pub seek_scale_ms_per_px: i64,
    /// Buffer size of the broadcast channel carrying state transitions.
    pub state_channel_capacity: usize,
    /// User-Agent for engine factories that fetch remote sources.
    pub user_agent: String,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            autoplay: true,
            seek_scale_ms_per_px: DEFAULT_SEEK_SCALE_MS_PER_PX,
            state_channel_capacity: DEFAULT_STATE_CHANNEL_CAPACITY,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl PlaybackConfig {
    /// Deserialize a `PlaybackConfig` from a JSON string.
    pub fn from_json(json_str: &str) -> Result<Self> {
        serde_json::from_str(json_str)
            .map_err(|e| Error::Validation(format!("config parse error: {e}")))
    }

    /// Load configuration from a file path, falling back to defaults if the
    /// path is `None` or the file does not exist.
    pub fn load_or_default(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            return Self::default();
        };

        match std::fs::read_to_string(path) {
            Ok(contents) => Self::from_json(&contents).unwrap_or_else(|e| {
                tracing::warn!("Failed to parse config file {}: {e}", path.display());
                Self::default()
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!("No config file at {}; using defaults", path.display());
                Self::default()
            }
            Err(e) => {
                tracing::warn!("Failed to read config file {}: {e}", path.display());
                Self::default()
            }
        }
    }

    /// Return a list of validation warnings (non-fatal issues).
    pub fn validate(&self) -> Vec<String> {
        let mut warnings = Vec::new();

        if self.seek_scale_ms_per_px <= 0 {
            warnings.push(format!(
                "seek_scale_ms_per_px is {}; drag gestures will not move the playhead",
                self.seek_scale_ms_per_px
            ));
        }

        if self.state_channel_capacity == 0 {
            warnings.push("state_channel_capacity is 0; observers would see no transitions".into());
        }

        if self.user_agent.is_empty() {
            warnings.push("user_agent is empty; some remote hosts may reject requests".into());
        }

        warnings
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = PlaybackConfig::default();
        assert!(config.autoplay);
        assert_eq!(config.seek_scale_ms_per_px, 200);
        assert_eq!(config.state_channel_capacity, 64);
        assert!(config.validate().is_empty());
    }

    #[test]
    fn empty_json_uses_defaults() {
        let config = PlaybackConfig::from_json("{}").unwrap();
        assert!(config.autoplay);
        assert_eq!(config.seek_scale_ms_per_px, 200);
    }

    #[test]
    fn partial_json_overrides_one_field() {
        let config = PlaybackConfig::from_json(r#"{"seek_scale_ms_per_px": 50}"#).unwrap();
        assert_eq!(config.seek_scale_ms_per_px, 50);
        assert!(config.autoplay);
    }

    #[test]
    fn malformed_json_is_a_validation_error() {
        let err = PlaybackConfig::from_json("{not json").unwrap_err();
        assert!(err.to_string().contains("config parse error"));
    }

    #[test]
    fn load_or_default_missing_file() {
        let config = PlaybackConfig::load_or_default(Some(Path::new("/nonexistent/fv.json")));
        assert_eq!(config.seek_scale_ms_per_px, 200);
    }

    #[test]
    fn load_or_default_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("playback.json");
        std::fs::write(&path, r#"{"autoplay": false}"#).unwrap();

        let config = PlaybackConfig::load_or_default(Some(&path));
        assert!(!config.autoplay);
    }

    #[test]
    fn validate_flags_bad_tuning() {
        let config = PlaybackConfig {
            seek_scale_ms_per_px: 0,
            state_channel_capacity: 0,
            user_agent: String::new(),
            ..PlaybackConfig::default()
        };
        assert_eq!(config.validate().len(), 3);
    }
}
