//! Application configuration.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{StackError, StackResult};

/// Global application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StackConfig {
    /// Encoder and stacking defaults.
    pub encoder: EncoderDefaults,

    /// Logging configuration.
    pub logging: LoggingConfig,
}

/// Defaults for the external encoder invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EncoderDefaults {
    /// Encoder binary, resolved through `PATH` unless absolute.
    pub binary: String,

    /// Video codec passed to `-c:v`.
    pub video_codec: String,

    /// Output container extension, without the dot.
    pub extension: String,

    /// Default scale-down divisor.
    pub scale: u32,

    /// Default speed-up multiplier.
    pub speed: u32,

    /// Default CRF quality. Higher means smaller files.
    pub quality: u32,

    /// Native width of one camera clip, used to size blank grid slots.
    pub camera_width: u32,

    /// Native height of one camera clip.
    pub camera_height: u32,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "sentry_stack=debug,warn").
    pub level: String,

    /// Whether to output structured JSON logs.
    pub json: bool,
}

impl Default for EncoderDefaults {
    fn default() -> Self {
        Self {
            binary: "ffmpeg".to_string(),
            video_codec: "libx264".to_string(),
            extension: "mp4".to_string(),
            scale: 4,
            speed: 1,
            quality: 23,
            camera_width: 1280,
            camera_height: 960,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

impl StackConfig {
    /// Load config from `path`. A missing file yields the defaults.
    ///
    /// Unreadable or malformed files are errors. Callers usually log them
    /// and carry on with [`StackConfig::default`], but only once a
    /// subscriber is installed, since the logging setup itself comes
    /// from this file.
    pub fn load_from(path: &Path) -> StackResult<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path).map_err(|e| {
            StackError::config(format!("Failed to read config at {}: {e}", path.display()))
        })?;
        serde_json::from_str(&content).map_err(|e| {
            StackError::config(format!("Failed to parse config at {}: {e}", path.display()))
        })
    }

    /// Save config to `path`, creating parent directories.
    pub fn save_to(&self, path: &Path) -> StackResult<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Reject values the encoder cannot work with.
    pub fn validate(&self) -> StackResult<()> {
        let e = &self.encoder;
        if e.binary.trim().is_empty() {
            return Err(StackError::config("encoder.binary must not be empty"));
        }
        if e.scale == 0 || e.speed == 0 {
            return Err(StackError::config(
                "encoder.scale and encoder.speed must be at least 1",
            ));
        }
        if e.quality > 51 {
            return Err(StackError::config(format!(
                "encoder.quality must be 0..=51, got {}",
                e.quality
            )));
        }
        if e.camera_width == 0 || e.camera_height == 0 {
            return Err(StackError::config("camera dimensions must be non-zero"));
        }
        Ok(())
    }
}

/// Standard config file location.
pub fn config_file_path() -> PathBuf {
    let base = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string());
            PathBuf::from(home).join(".config")
        });
    base.join("sentry-stack").join("config.json")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = StackConfig::load_from(&dir.path().join("nope.json")).unwrap();
        assert_eq!(config.encoder, EncoderDefaults::default());
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(
            &path,
            r#"{"encoder": {"binary": "/opt/ffmpeg/bin/ffmpeg", "quality": 28}}"#,
        )
        .unwrap();

        let config = StackConfig::load_from(&path).unwrap();
        assert_eq!(config.encoder.binary, "/opt/ffmpeg/bin/ffmpeg");
        assert_eq!(config.encoder.quality, 28);
        assert_eq!(config.encoder.scale, 4);
        assert_eq!(config.encoder.camera_height, 960);
    }

    #[test]
    fn test_malformed_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{ not json").unwrap();

        let err = StackConfig::load_from(&path).unwrap_err();
        assert!(matches!(err, StackError::Config { .. }));
        assert!(err.to_string().contains("Failed to parse config"));
    }

    #[test]
    fn test_validate() {
        assert!(StackConfig::default().validate().is_ok());

        let mut config = StackConfig::default();
        config.encoder.scale = 0;
        assert!(config.validate().is_err());

        let mut config = StackConfig::default();
        config.encoder.quality = 60;
        assert!(matches!(config.validate(), Err(StackError::Config { .. })));
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");
        let mut config = StackConfig::default();
        config.encoder.speed = 8;
        config.logging.json = true;
        config.save_to(&path).unwrap();

        let loaded = StackConfig::load_from(&path).unwrap();
        assert_eq!(loaded.encoder.speed, 8);
        assert!(loaded.logging.json);
    }
}
