//! Backend configuration.
//!
//! All values have working defaults; a TOML file only needs the keys it
//! changes:
//!
//! ```toml
//! [unix]
//! candidates = ["qarma", "zenity"]
//!
//! [windows]
//! notification_timeout_secs = 5
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{DialogError, Result};
use crate::logging::targets;

/// Configuration of every backend.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DialogConfig {
    pub unix: UnixConfig,
    pub macos: MacConfig,
    pub windows: WindowsConfig,
}

/// Locating the zenity-compatible tool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UnixConfig {
    /// Tools searched on `PATH`, first found wins.
    pub candidates: Vec<String>,
    /// Use this executable and skip the search.
    pub executable: Option<PathBuf>,
}

impl Default for UnixConfig {
    fn default() -> Self {
        Self {
            candidates: vec!["zenity".into(), "qarma".into(), "matedialog".into()],
            executable: None,
        }
    }
}

/// Running automation scripts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MacConfig {
    /// Script interpreter.
    pub interpreter: PathBuf,
    /// Value of the interpreter's `-l` flag.
    pub language: String,
    /// Directory holding the system alert `.icns` files.
    pub icon_directory: PathBuf,
}

impl Default for MacConfig {
    fn default() -> Self {
        Self {
            interpreter: PathBuf::from("osascript"),
            language: "JavaScript".into(),
            icon_directory: PathBuf::from(
                "/System/Library/CoreServices/CoreTypes.bundle/Contents/Resources",
            ),
        }
    }
}

/// Native Windows dialogs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowsConfig {
    /// Display time of the broadcast-message notification fallback.
    pub notification_timeout_secs: u64,
    /// Result buffer size of a single-path file dialog, in UTF-16 units.
    pub max_path_chars: usize,
    /// Additional buffer for multi-select file dialogs, in UTF-16 units.
    pub multi_select_chars: usize,
}

impl Default for WindowsConfig {
    fn default() -> Self {
        Self {
            notification_timeout_secs: 10,
            max_path_chars: 260,
            multi_select_chars: 256 * 1024,
        }
    }
}

impl WindowsConfig {
    pub fn notification_timeout(&self) -> Duration {
        Duration::from_secs(self.notification_timeout_secs)
    }
}

impl DialogConfig {
    /// Parse a TOML document.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|err| DialogError::Config(err.to_string()))
    }

    /// Load a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|err| DialogError::Config(format!("{}: {err}", path.display())))?;
        let config = Self::from_toml_str(&content)?;
        tracing::debug!(target: targets::CONFIG, path = %path.display(), "loaded dialog configuration");
        Ok(config)
    }

    /// Serialize to TOML.
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|err| DialogError::Config(err.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = DialogConfig::default();
        assert_eq!(config.unix.candidates, vec!["zenity", "qarma", "matedialog"]);
        assert_eq!(config.macos.language, "JavaScript");
        assert_eq!(config.windows.notification_timeout(), Duration::from_secs(10));
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = DialogConfig::from_toml_str(
            r#"
            [unix]
            executable = "/opt/bin/qarma"

            [windows]
            notification_timeout_secs = 3
            "#,
        )
        .unwrap();
        assert_eq!(config.unix.executable, Some(PathBuf::from("/opt/bin/qarma")));
        assert_eq!(config.unix.candidates.len(), 3);
        assert_eq!(config.windows.notification_timeout_secs, 3);
        assert_eq!(config.windows.max_path_chars, 260);
        assert_eq!(config.macos, MacConfig::default());
    }

    #[test]
    fn test_invalid_toml() {
        let err = DialogConfig::from_toml_str("unix = 5").unwrap_err();
        assert!(matches!(err, DialogError::Config(_)));
    }

    #[test]
    fn test_toml_round_trip() {
        let mut config = DialogConfig::default();
        config.unix.candidates = vec!["qarma".into()];
        let text = config.to_toml_string().unwrap();
        assert_eq!(DialogConfig::from_toml_str(&text).unwrap(), config);
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dialog.toml");
        std::fs::write(&path, "[macos]\nlanguage = \"AppleScript\"\n").unwrap();
        let config = DialogConfig::load(&path).unwrap();
        assert_eq!(config.macos.language, "AppleScript");
        assert!(DialogConfig::load(dir.path().join("missing.toml")).is_err());
    }
}
