//! Persisted ruler settings stored as TOML in the application directory.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::app_dirs;
use crate::timecode::FrameRate;
use crate::timeline::scale::{DEFAULT_SCALE, DEFAULT_TICK_PIXELS, MAX_RENDER_WIDTH};

/// Default filename used to store the settings.
pub const CONFIG_FILE_NAME: &str = "config.toml";

const MIN_TICK_PIXELS: f32 = 10.0;
const MAX_TICK_PIXELS: f32 = 1000.0;
const MIN_SCALE: f64 = 0.01;
const MAX_SCALE: f64 = 3600.0;
const MAX_ANIMATION_MS: u64 = 2000;

/// Errors that may occur while loading or saving settings.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to create the config directory.
    #[error("Unable to create config directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Failed to read the config file.
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Failed to write the config file.
    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Failed to parse TOML.
    #[error("Invalid config at {path}: {source}")]
    ParseToml {
        path: PathBuf,
        source: toml::de::Error,
    },
    /// Failed to serialize settings to TOML.
    #[error("Failed to serialize config to TOML at {path}: {source}")]
    SerializeToml {
        path: PathBuf,
        source: toml::ser::Error,
    },
    /// No usable config directory found.
    #[error("No suitable config directory found")]
    NoConfigDir,
}

impl From<app_dirs::AppDirError> for ConfigError {
    fn from(error: app_dirs::AppDirError) -> Self {
        match error {
            app_dirs::AppDirError::NoBaseDir => ConfigError::NoConfigDir,
            app_dirs::AppDirError::CreateDir { path, source } => {
                ConfigError::CreateDir { path, source }
            }
        }
    }
}

/// User-tunable ruler and timeline settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RulerSettings {
    /// Pixel width of one long-tick interval.
    pub tick_pixels: f32,
    /// Seconds covered by one long-tick interval (zoom level).
    pub scale: f64,
    /// Narrowest the ruler and track area are laid out.
    pub min_ruler_width: f32,
    /// Length of the click-to-place playhead animation.
    pub playhead_animation_ms: u64,
    pub frame_rate: FrameRate,
    /// Project length used by the demo timeline.
    pub duration_seconds: f64,
    /// Emit scrollbar reports for an embedding host.
    pub host_bridge: bool,
}

impl Default for RulerSettings {
    fn default() -> Self {
        Self {
            tick_pixels: DEFAULT_TICK_PIXELS,
            scale: DEFAULT_SCALE,
            min_ruler_width: 1024.0,
            playhead_animation_ms: 200,
            frame_rate: FrameRate::DEFAULT,
            duration_seconds: 300.0,
            host_bridge: false,
        }
    }
}

impl RulerSettings {
    /// Clamp every field into its usable range.
    pub fn normalized(mut self) -> Self {
        let defaults = Self::default();
        self.tick_pixels = finite_or(self.tick_pixels, defaults.tick_pixels)
            .clamp(MIN_TICK_PIXELS, MAX_TICK_PIXELS);
        self.scale = finite_or_f64(self.scale, defaults.scale).clamp(MIN_SCALE, MAX_SCALE);
        self.min_ruler_width =
            finite_or(self.min_ruler_width, defaults.min_ruler_width).clamp(0.0, MAX_RENDER_WIDTH);
        self.playhead_animation_ms = self.playhead_animation_ms.min(MAX_ANIMATION_MS);
        if let Err(err) = self.frame_rate.validate() {
            tracing::warn!("Invalid frame rate in settings ({err}); using default");
            self.frame_rate = defaults.frame_rate;
        }
        self.duration_seconds = finite_or_f64(self.duration_seconds, defaults.duration_seconds).max(0.0);
        self
    }

    pub fn playhead_animation(&self) -> Duration {
        Duration::from_millis(self.playhead_animation_ms)
    }
}

fn finite_or(value: f32, fallback: f32) -> f32 {
    if value.is_finite() { value } else { fallback }
}

fn finite_or_f64(value: f64, fallback: f64) -> f64 {
    if value.is_finite() { value } else { fallback }
}

/// Resolve the config file path, ensuring the parent directory exists.
pub fn config_path() -> Result<PathBuf, ConfigError> {
    let dir = app_dirs::app_root_dir()?;
    Ok(dir.join(CONFIG_FILE_NAME))
}

/// Load settings from the application directory, returning defaults if missing.
pub fn load_or_default() -> Result<RulerSettings, ConfigError> {
    load_from(&config_path()?)
}

/// Load settings from `path`, returning defaults if the file does not exist.
pub fn load_from(path: &Path) -> Result<RulerSettings, ConfigError> {
    if !path.exists() {
        tracing::debug!("No config at {}; using defaults", path.display());
        return Ok(RulerSettings::default());
    }
    let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let settings: RulerSettings = toml::from_str(&text).map_err(|source| ConfigError::ParseToml {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(settings.normalized())
}

/// Persist settings to the application directory.
pub fn save(settings: &RulerSettings) -> Result<(), ConfigError> {
    save_to_path(settings, &config_path()?)
}

/// Write settings to `path` through a sibling temp file so a crash never leaves a partial file.
pub fn save_to_path(settings: &RulerSettings, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|source| ConfigError::CreateDir {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    let data = toml::to_string_pretty(settings).map_err(|source| ConfigError::SerializeToml {
        path: path.to_path_buf(),
        source,
    })?;
    let tmp = path.with_extension("toml.tmp");
    if let Err(err) = std::fs::write(&tmp, data) {
        let _ = std::fs::remove_file(&tmp);
        return Err(ConfigError::Write {
            path: tmp,
            source: err,
        });
    }
    if let Err(err) = std::fs::rename(&tmp, path) {
        let _ = std::fs::remove_file(&tmp);
        return Err(ConfigError::Write {
            path: path.to_path_buf(),
            source: err,
        });
    }
    tracing::info!("Saved settings to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app_dirs::{APP_DIR_NAME, OverrideGuard};
    use tempfile::tempdir;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempdir().unwrap();
        let settings = load_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(settings, RulerSettings::default());
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "scale = 30.0\n[frame_rate]\nnum = 24\nden = 1\n").unwrap();
        let settings = load_from(&path).unwrap();
        assert_eq!(settings.scale, 30.0);
        assert_eq!(settings.frame_rate, FrameRate { num: 24, den: 1 });
        assert_eq!(settings.tick_pixels, DEFAULT_TICK_PIXELS);
    }

    #[test]
    fn out_of_range_values_are_normalized() {
        let settings = RulerSettings {
            tick_pixels: 2.0,
            scale: 0.0,
            min_ruler_width: 1e9,
            playhead_animation_ms: 60_000,
            frame_rate: FrameRate { num: 30, den: 0 },
            duration_seconds: f64::NAN,
            host_bridge: true,
        }
        .normalized();
        assert_eq!(settings.tick_pixels, MIN_TICK_PIXELS);
        assert_eq!(settings.scale, MIN_SCALE);
        assert_eq!(settings.min_ruler_width, MAX_RENDER_WIDTH);
        assert_eq!(settings.playhead_animation_ms, MAX_ANIMATION_MS);
        assert_eq!(settings.frame_rate, FrameRate::DEFAULT);
        assert_eq!(settings.duration_seconds, 300.0);
    }

    #[test]
    fn malformed_toml_reports_path() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "scale = [").unwrap();
        let err = load_from(&path).unwrap_err();
        assert!(matches!(err, ConfigError::ParseToml { .. }));
        assert!(err.to_string().contains(CONFIG_FILE_NAME));
    }

    #[test]
    fn save_then_load_through_app_dir() {
        let base = tempdir().unwrap();
        let _guard = OverrideGuard::set(base.path().to_path_buf());
        let settings = RulerSettings {
            scale: 8.0,
            host_bridge: true,
            ..RulerSettings::default()
        };
        save(&settings).unwrap();
        let path = base.path().join(APP_DIR_NAME).join(CONFIG_FILE_NAME);
        assert!(path.is_file());
        assert!(!path.with_extension("toml.tmp").exists());
        assert_eq!(load_or_default().unwrap(), settings);
    }

    #[test]
    fn failed_replace_removes_temp_file() {
        let dir = tempdir().unwrap();
        // A non-empty directory in the target's place makes the final rename fail.
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::create_dir(&path).unwrap();
        std::fs::write(path.join("keep"), "x").unwrap();

        let err = save_to_path(&RulerSettings::default(), &path).unwrap_err();
        assert!(matches!(err, ConfigError::Write { .. }));
        assert!(!path.with_extension("toml.tmp").exists());
        assert!(path.join("keep").is_file());
    }
}
