//! Configuration loading for Ward.
//!
//! The config lives at `~/.ward/config.toml`. Every section and key is
//! optional; a missing file means defaults.

use std::{
    fs,
    path::{Path, PathBuf},
};

use serde::Deserialize;
use thiserror::Error;

use ward_types::UiOptions;

#[derive(Debug, Default, Deserialize)]
pub struct WardConfig {
    pub app: Option<AppConfig>,
}

#[derive(Debug, Default, Deserialize)]
pub struct AppConfig {
    /// Use ASCII-only glyphs for icons and controls.
    #[serde(default)]
    pub ascii_only: bool,
    /// Enable a high-contrast color palette.
    #[serde(default)]
    pub high_contrast: bool,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config at {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config at {}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

impl ConfigError {
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            ConfigError::Read { path, .. } | ConfigError::Parse { path, .. } => path,
        }
    }
}

impl WardConfig {
    /// Load the config from its default location.
    ///
    /// Returns `Ok(None)` when no home directory is known or the file does not exist.
    pub fn load() -> Result<Option<Self>, ConfigError> {
        match config_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(None),
        }
    }

    /// Load the config from `path`.
    ///
    /// Errors are returned, not logged; the caller decides how to report them.
    pub fn load_from(path: &Path) -> Result<Option<Self>, ConfigError> {
        if !path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let config = toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Some(config))
    }

    #[must_use]
    pub fn path() -> Option<PathBuf> {
        config_path()
    }

    #[must_use]
    pub fn ui_options(&self) -> UiOptions {
        self.app
            .as_ref()
            .map(|app| UiOptions {
                ascii_only: app.ascii_only,
                high_contrast: app.high_contrast,
            })
            .unwrap_or_default()
    }
}

#[must_use]
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".ward").join("config.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_config(dir: &tempfile::TempDir, body: &str) -> PathBuf {
        let path = dir.path().join("config.toml");
        fs::write(&path, body).expect("write config");
        path
    }

    #[test]
    fn missing_file_is_not_an_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let loaded = WardConfig::load_from(&dir.path().join("absent.toml")).expect("load");
        assert!(loaded.is_none());
    }

    #[test]
    fn empty_file_yields_default_options() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = write_config(&dir, "");
        let config = WardConfig::load_from(&path).expect("load").expect("some");
        assert_eq!(config.ui_options(), UiOptions::default());
    }

    #[test]
    fn app_section_maps_to_ui_options() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = write_config(&dir, "[app]\nascii_only = true\nhigh_contrast = true\n");
        let config = WardConfig::load_from(&path).expect("load").expect("some");
        assert_eq!(
            config.ui_options(),
            UiOptions {
                ascii_only: true,
                high_contrast: true,
            }
        );
    }

    #[test]
    fn partial_app_section_defaults_missing_keys() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = write_config(&dir, "[app]\nhigh_contrast = true\n");
        let options = WardConfig::load_from(&path)
            .expect("load")
            .expect("some")
            .ui_options();
        assert!(options.high_contrast);
        assert!(!options.ascii_only);
    }

    #[test]
    fn invalid_toml_reports_parse_error_with_path() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = write_config(&dir, "[app\nascii_only = maybe");
        let err = WardConfig::load_from(&path).expect_err("parse error");
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert_eq!(err.path(), path.as_path());
    }

    #[test]
    fn config_path_lives_under_dot_ward() {
        if let Some(path) = config_path() {
            assert!(path.ends_with(".ward/config.toml"));
        }
    }
}
