//! Application configuration
//!
//! Loaded from a TOML file (path in `PHYSICS_LAB_CONFIG`, otherwise
//! `physics_lab.toml` in the working directory). Every field has a default,
//! so a missing file or a partial file is fine.
//!
//! ```toml
//! window_title = "Physics Lab"
//! canvas_width = 800
//! canvas_height = 500
//! results_dir = "lab-results"
//! user = "student-42"
//! locale = "uz"
//! vsync = true
//! ```

use std::path::{Path, PathBuf};

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Environment variable naming the configuration file
pub const CONFIG_ENV: &str = "PHYSICS_LAB_CONFIG";

/// Configuration file looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "physics_lab.toml";

/// Smallest accepted logical canvas, in pixels per side
pub const MIN_CANVAS_SIDE: u32 = 200;

/// UI language for parameter and column labels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    Uz,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub window_title: String,
    pub window_width: u32,
    pub window_height: u32,
    /// Logical simulation canvas, independent of the window size
    pub canvas_width: u32,
    pub canvas_height: u32,
    /// Directory of the JSON results store; `None` keeps results in memory
    pub results_dir: Option<PathBuf>,
    /// Signed-in user. Without one, worksheet persistence is unavailable.
    pub user: Option<String>,
    pub locale: Locale,
    /// Lifetime of transient notifications, in seconds
    pub notification_seconds: f32,
    pub vsync: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            window_title: "Physics Lab".to_string(),
            window_width: 1280,
            window_height: 760,
            canvas_width: 800,
            canvas_height: 500,
            results_dir: None,
            user: None,
            locale: Locale::En,
            notification_seconds: 4.0,
            vsync: true,
        }
    }
}

/// Configuration error
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Canvas must be at least {min}x{min} pixels, got {width}x{height}")]
    CanvasTooSmall { width: u32, height: u32, min: u32 },
}

impl AppConfig {
    pub fn from_toml_str(text: &str, origin: &Path) -> Result<Self, ConfigError> {
        let config: AppConfig = toml::from_str(text).map_err(|source| ConfigError::Parse {
            path: origin.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Read a config file. A missing file yields the defaults.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(text) => Self::from_toml_str(&text, path),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                log::debug!("No config file at {}, using defaults", path.display());
                Ok(Self::default())
            }
            Err(source) => Err(ConfigError::Io {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    /// Resolve the config path from the environment and load it
    pub fn load() -> Result<Self, ConfigError> {
        let path = std::env::var_os(CONFIG_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));
        Self::from_file(&path)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.canvas_width < MIN_CANVAS_SIDE || self.canvas_height < MIN_CANVAS_SIDE {
            return Err(ConfigError::CanvasTooSmall {
                width: self.canvas_width,
                height: self.canvas_height,
                min: MIN_CANVAS_SIDE,
            });
        }
        Ok(())
    }

    pub fn canvas_size(&self) -> Vec2 {
        Vec2::new(self.canvas_width as f32, self.canvas_height as f32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_have_no_persistence() {
        let config = AppConfig::default();
        assert!(config.user.is_none());
        assert!(config.results_dir.is_none());
        assert_eq!(config.locale, Locale::En);
        assert_eq!(config.canvas_size(), Vec2::new(800.0, 500.0));
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let config = AppConfig::from_toml_str(
            "user = \"student-42\"\nlocale = \"uz\"\n",
            Path::new("inline.toml"),
        )
        .unwrap();
        assert_eq!(config.user.as_deref(), Some("student-42"));
        assert_eq!(config.locale, Locale::Uz);
        assert_eq!(config.window_width, 1280);
    }

    #[test]
    fn malformed_file_is_an_error() {
        let err = AppConfig::from_toml_str("canvas_width = \"wide\"", Path::new("bad.toml"))
            .unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn small_canvas_is_rejected() {
        let err = AppConfig::from_toml_str("canvas_height = 0", Path::new("zero.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::CanvasTooSmall { .. }));

        let err = AppConfig::from_toml_str("canvas_width = 60\ncanvas_height = 60", Path::new("tiny.toml"))
            .unwrap_err();
        assert!(matches!(err, ConfigError::CanvasTooSmall { width: 60, height: 60, .. }));

        let config = AppConfig::from_toml_str("canvas_width = 200\ncanvas_height = 200", Path::new("min.toml"));
        assert!(config.is_ok());
    }

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::from_file(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn reads_file_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("physics_lab.toml");
        std::fs::write(&path, "results_dir = \"results\"\nnotification_seconds = 2.5\nvsync = false\n").unwrap();
        let config = AppConfig::from_file(&path).unwrap();
        assert_eq!(config.results_dir, Some(PathBuf::from("results")));
        assert_eq!(config.notification_seconds, 2.5);
        assert!(!config.vsync);
    }
}
