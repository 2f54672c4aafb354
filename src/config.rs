//! Application configuration.

use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument};
use unbeatable_tictactoe::{Player, SearchConfig};

/// Settings for the terminal game, read from a TOML file.
///
/// ```toml
/// first_player = "ai"
/// log_filter = "info"
/// log_file = "unbeatable_tui.log"
///
/// [search]
/// pruning = true
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct AppConfig {
    /// Who opens a freshly started game.
    #[serde(default = "default_first_player")]
    first_player: Player,

    /// Search engine settings.
    #[serde(default)]
    search: SearchConfig,

    /// Tracing filter used when `RUST_LOG` is unset.
    #[serde(default = "default_log_filter")]
    log_filter: String,

    /// File the TUI writes its log to.
    #[serde(default = "default_log_file")]
    log_file: PathBuf,
}

fn default_first_player() -> Player {
    Player::Ai
}

fn default_log_filter() -> String {
    "info".to_string()
}

fn default_log_file() -> PathBuf {
    PathBuf::from("unbeatable_tui.log")
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            first_player: default_first_player(),
            search: SearchConfig::default(),
            log_filter: default_log_filter(),
            log_file: default_log_file(),
        }
    }
}

impl AppConfig {
    /// Loads configuration from TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;

        info!(first_player = %config.first_player, "Config loaded successfully");
        Ok(config)
    }

    /// Loads `path` if it exists, otherwise falls back to defaults.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        if path.as_ref().exists() {
            Self::from_file(path)
        } else {
            debug!("No config file, using defaults");
            Ok(Self::default())
        }
    }

    /// Overrides who opens the game.
    pub fn with_first_player(mut self, first_player: Player) -> Self {
        self.first_player = first_player;
        self
    }
}

/// Configuration error with location tracking.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error with caller location tracking.
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(*config.first_player(), Player::Ai);
        assert!(*config.search().pruning());
        assert_eq!(config.log_filter(), "info");
    }

    #[test]
    fn test_from_file_partial() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "first_player = \"human\"\n\n[search]\npruning = false").unwrap();

        let config = AppConfig::from_file(file.path()).unwrap();
        assert_eq!(*config.first_player(), Player::Human);
        assert!(!*config.search().pruning());
        assert_eq!(config.log_file(), &PathBuf::from("unbeatable_tui.log"));
    }

    #[test]
    fn test_from_file_rejects_unknown_player() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "first_player = \"nobody\"").unwrap();

        let err = AppConfig::from_file(file.path()).unwrap_err();
        assert!(err.message.starts_with("Failed to parse config"));
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::load_or_default(dir.path().join("absent.toml")).unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_with_first_player() {
        let config = AppConfig::default().with_first_player(Player::Human);
        assert_eq!(*config.first_player(), Player::Human);
    }
}
