//! Application settings and paths.
//!
//! Manages XDG-compliant paths for configuration, data, and cache, and the
//! typed settings record stored in `settings.json`.

use crate::cli::OutputFormat;
use crate::error::{ConfigError, ConfigResult};
use crate::scoring::ThresholdTable;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Application directory paths following XDG Base Directory Specification.
#[derive(Debug, Clone)]
pub struct Paths {
    /// Configuration directory (~/.config/a11y-reports)
    pub config_dir: PathBuf,
    /// Data directory (~/.local/share/a11y-reports)
    pub data_dir: PathBuf,
    /// Cache directory (~/.cache/a11y-reports)
    pub cache_dir: PathBuf,
}

impl Paths {
    /// Resolve paths using XDG directories. Nothing is created on disk.
    pub fn discover() -> ConfigResult<Self> {
        let project = ProjectDirs::from("com", "a11y-reports", "a11y-reports")
            .ok_or(ConfigError::DirectoryNotFound)?;

        Ok(Self {
            config_dir: project.config_dir().to_path_buf(),
            data_dir: project.data_dir().to_path_buf(),
            cache_dir: project.cache_dir().to_path_buf(),
        })
    }

    /// Paths rooted under a single directory. Used for tests and portable
    /// installs.
    pub fn under(root: impl AsRef<Path>) -> Self {
        let root = root.as_ref();
        Self {
            config_dir: root.join("config"),
            data_dir: root.join("data"),
            cache_dir: root.join("cache"),
        }
    }

    /// Get the path to the settings file.
    pub fn settings_file(&self) -> PathBuf {
        self.config_dir.join("settings.json")
    }

    /// Get the path to the issue store directory.
    pub fn issues_dir(&self) -> PathBuf {
        self.data_dir.join("issues")
    }

    /// Get the path to the cached report snapshot.
    pub fn report_cache_file(&self) -> PathBuf {
        self.cache_dir.join("report.json")
    }
}

/// Application-wide settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    /// Issue store directory, overriding the XDG data location.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub store_dir: Option<PathBuf>,
    /// Score-to-tier threshold table.
    pub thresholds: ThresholdTable,
    /// Default output format for reports.
    pub default_output_format: OutputFormat,
    /// How long a cached report stays fresh, in seconds.
    pub cache_ttl_secs: u64,
    /// Serve reports from the snapshot cache when fresh.
    pub use_cache: bool,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            store_dir: None,
            thresholds: ThresholdTable::Standard,
            default_output_format: OutputFormat::Plain,
            cache_ttl_secs: 3600,
            use_cache: true,
        }
    }
}

impl AppSettings {
    /// Load settings from the default location, falling back to defaults
    /// when no file exists.
    pub fn load(paths: &Paths) -> ConfigResult<Self> {
        let file = paths.settings_file();

        if !file.exists() {
            debug!(path = %file.display(), "no settings file, using defaults");
            return Ok(Self::default());
        }

        Self::load_from(&file)
    }

    /// Load settings from a specific file.
    pub fn load_from(path: &Path) -> ConfigResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadFailed {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        serde_json::from_str(&content).map_err(|e| ConfigError::InvalidFormat(e.to_string()))
    }

    /// Save settings to the default location.
    pub fn save(&self, paths: &Paths) -> ConfigResult<()> {
        fs::create_dir_all(&paths.config_dir)?;
        let file = paths.settings_file();

        let content = serde_json::to_string_pretty(self)?;
        fs::write(&file, content).map_err(|e| ConfigError::WriteFailed {
            path: file,
            reason: e.to_string(),
        })
    }

    /// Issue store directory, honouring the override.
    pub fn store_dir(&self, paths: &Paths) -> PathBuf {
        self.store_dir.clone().unwrap_or_else(|| paths.issues_dir())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_settings() {
        let settings = AppSettings::default();
        assert_eq!(settings.thresholds, ThresholdTable::Standard);
        assert_eq!(settings.cache_ttl_secs, 3600);
        assert!(settings.use_cache);
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let tmp = TempDir::new().unwrap();
        let paths = Paths::under(tmp.path());
        assert_eq!(AppSettings::load(&paths).unwrap(), AppSettings::default());
    }

    #[test]
    fn test_save_and_load() {
        let tmp = TempDir::new().unwrap();
        let paths = Paths::under(tmp.path());
        let settings = AppSettings {
            thresholds: ThresholdTable::Display,
            cache_ttl_secs: 60,
            ..AppSettings::default()
        };
        settings.save(&paths).unwrap();
        assert_eq!(AppSettings::load(&paths).unwrap(), settings);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let settings: AppSettings = serde_json::from_str(r#"{"use_cache": false}"#).unwrap();
        assert!(!settings.use_cache);
        assert_eq!(settings.thresholds, ThresholdTable::Standard);
    }

    #[test]
    fn test_invalid_file_is_reported() {
        let tmp = TempDir::new().unwrap();
        let paths = Paths::under(tmp.path());
        fs::create_dir_all(&paths.config_dir).unwrap();
        fs::write(paths.settings_file(), "[]").unwrap();
        assert!(matches!(
            AppSettings::load(&paths),
            Err(ConfigError::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_store_dir_override() {
        let paths = Paths::under("/tmp/a11y");
        let settings = AppSettings {
            store_dir: Some(PathBuf::from("/srv/issues")),
            ..AppSettings::default()
        };
        assert_eq!(settings.store_dir(&paths), PathBuf::from("/srv/issues"));
        assert_eq!(AppSettings::default().store_dir(&paths), paths.issues_dir());
    }
}
