//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::api::{ClientConfig, DEFAULT_BASE_URL};

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub session: SessionConfig,

    #[serde(default)]
    pub notify: NotifyConfig,

    #[serde(default)]
    pub sound: SoundConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Remote reminder service configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_request_timeout() -> u64 {
    30
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            request_timeout_secs: default_request_timeout(),
        }
    }
}

impl ApiConfig {
    /// HTTP client settings derived from this section
    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            base_url: self.base_url.clone(),
            request_timeout_ms: self.request_timeout_secs.saturating_mul(1000),
        }
    }
}

/// Where the session file lives
#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: String,
}

fn default_data_dir() -> String {
    dirs::data_local_dir()
        .map(|p| p.join("chime").to_string_lossy().to_string())
        .unwrap_or_else(|| "./chime_data".to_string())
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
        }
    }
}

/// Due-time notification settings
#[derive(Debug, Clone, Deserialize)]
pub struct NotifyConfig {
    #[serde(default = "default_window")]
    pub window_secs: u64,

    #[serde(default = "default_poll_interval")]
    pub poll_interval_secs: u64,
}

fn default_window() -> u64 {
    60
}

fn default_poll_interval() -> u64 {
    30
}

impl Default for NotifyConfig {
    fn default() -> Self {
        Self {
            window_secs: default_window(),
            poll_interval_secs: default_poll_interval(),
        }
    }
}

impl NotifyConfig {
    pub fn window(&self) -> Duration {
        Duration::from_secs(self.window_secs)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs.max(1))
    }
}

/// Which sound player to use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlayerKind {
    Bell,
    Command,
    Silent,
}

impl std::str::FromStr for PlayerKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "bell" => Ok(PlayerKind::Bell),
            "command" => Ok(PlayerKind::Command),
            "silent" | "off" | "none" => Ok(PlayerKind::Silent),
            other => Err(format!("unknown sound player: {}", other)),
        }
    }
}

/// Sound playback configuration
#[derive(Debug, Clone, Deserialize)]
pub struct SoundConfig {
    #[serde(default = "default_player")]
    pub player: PlayerKind,

    #[serde(default = "default_command")]
    pub command: String,

    #[serde(default = "default_assets_dir")]
    pub assets_dir: String,
}

fn default_player() -> PlayerKind {
    PlayerKind::Bell
}

fn default_command() -> String {
    "paplay".to_string()
}

fn default_assets_dir() -> String {
    "./sounds".to_string()
}

impl Default for SoundConfig {
    fn default() -> Self {
        Self {
            player: default_player(),
            command: default_command(),
            assets_dir: default_assets_dir(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,

    pub file: Option<String>,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            file: None,
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Self::parse(&content).map_err(|error| ConfigError::Parse {
            path: path.to_path_buf(),
            error,
        })
    }

    /// Parse configuration from TOML text
    pub fn parse(content: &str) -> Result<Self, String> {
        toml::from_str(content).map_err(|e| e.to_string())
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Self {
        let mut config = Config::default();
        config.apply_env_overrides();
        config
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load from default locations or environment
    pub fn load_default() -> Self {
        // Try default config locations
        let config_paths = [
            dirs::config_dir().map(|p| p.join("chime").join("config.toml")),
            Some(PathBuf::from("/etc/chime/config.toml")),
            Some(PathBuf::from("./config.toml")),
        ];

        for path_opt in config_paths.iter().flatten() {
            if path_opt.exists() {
                match Self::load_with_env(path_opt) {
                    Ok(config) => {
                        tracing::info!("Loaded config from {:?}", path_opt);
                        return config;
                    }
                    Err(e) => {
                        tracing::warn!("Failed to load config from {:?}: {}", path_opt, e);
                    }
                }
            }
        }

        // Fall back to environment-only config
        tracing::debug!("Using default config with environment overrides");
        Self::from_env()
    }

    /// Apply environment variable overrides to an existing config
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    fn apply_overrides(&mut self, var: impl Fn(&str) -> Option<String>) {
        // API overrides
        if let Some(url) = var("CHIME_API_URL") {
            self.api.base_url = url;
        }
        if let Some(timeout) = var("CHIME_REQUEST_TIMEOUT").and_then(|v| v.parse().ok()) {
            self.api.request_timeout_secs = timeout;
        }

        // Session overrides
        if let Some(data_dir) = var("CHIME_DATA_DIR") {
            self.session.data_dir = data_dir;
        }

        // Notification overrides
        if let Some(window) = var("CHIME_NOTIFY_WINDOW").and_then(|v| v.parse().ok()) {
            self.notify.window_secs = window;
        }
        if let Some(interval) = var("CHIME_POLL_INTERVAL").and_then(|v| v.parse().ok()) {
            self.notify.poll_interval_secs = interval;
        }

        // Sound overrides
        if let Some(player) = var("CHIME_SOUND_PLAYER") {
            match player.parse() {
                Ok(kind) => self.sound.player = kind,
                Err(e) => tracing::warn!("Ignoring CHIME_SOUND_PLAYER: {}", e),
            }
        }

        // Logging overrides
        if let Some(level) = var("CHIME_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(format) = var("CHIME_LOG_FORMAT") {
            self.logging.format = format;
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# Chime Configuration
#
# Environment variables override these settings:
# - CHIME_API_URL
# - CHIME_REQUEST_TIMEOUT
# - CHIME_DATA_DIR
# - CHIME_NOTIFY_WINDOW
# - CHIME_POLL_INTERVAL
# - CHIME_SOUND_PLAYER
# - CHIME_LOG_LEVEL
# - CHIME_LOG_FORMAT

[api]
# Reminder service base URL
base_url = "https://reminder-kfwt.onrender.com"

# Request timeout in seconds
request_timeout_secs = 30

[session]
# Directory holding session.json (token + cached profile)
data_dir = "~/.local/share/chime"

[notify]
# A reminder rings when it is due within this many seconds, before or after now
window_secs = 60

# How often chime-watch re-fetches reminders (seconds)
poll_interval_secs = 30

[sound]
# Player: bell (terminal bell), command (external program), silent
player = "bell"

# Program used by the command player; receives the asset path
command = "paplay"

# Directory containing fulfillment.mp3 and sad.mp3
assets_dir = "./sounds"

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log format: pretty (for development) or json (for production)
format = "pretty"

# Optional log file path
# file = "/var/log/chime/chime.log"
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::tempdir;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.api.base_url, "https://reminder-kfwt.onrender.com");
        assert_eq!(config.notify.window(), Duration::from_secs(60));
        assert_eq!(config.sound.player, PlayerKind::Bell);
        assert_eq!(config.logging.format, "pretty");
        assert_eq!(config.api.client_config().request_timeout_ms, 30_000);
    }

    #[test]
    fn test_generated_config_parses() {
        let config = Config::parse(&generate_default_config()).unwrap();
        assert_eq!(config.notify.poll_interval_secs, 30);
        assert_eq!(config.sound.command, "paplay");
        assert!(config.logging.file.is_none());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "[api]\nbase_url = \"http://localhost:5000\"\n\n[sound]\nplayer = \"silent\"\n",
        )
        .unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.api.base_url, "http://localhost:5000");
        assert_eq!(config.api.request_timeout_secs, 30);
        assert_eq!(config.sound.player, PlayerKind::Silent);
        assert_eq!(config.notify.window_secs, 60);
    }

    #[test]
    fn test_bad_file_reports_path() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[sound]\nplayer = \"trumpet\"\n").unwrap();

        let err = Config::load(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));

        let err = Config::load(&dir.path().join("missing.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn test_overrides() {
        let vars: HashMap<&str, &str> = [
            ("CHIME_API_URL", "http://127.0.0.1:5000"),
            ("CHIME_NOTIFY_WINDOW", "120"),
            ("CHIME_POLL_INTERVAL", "not-a-number"),
            ("CHIME_SOUND_PLAYER", "command"),
            ("CHIME_LOG_FORMAT", "json"),
        ]
        .into_iter()
        .collect();

        let mut config = Config::default();
        config.apply_overrides(|key| vars.get(key).map(|v| v.to_string()));

        assert_eq!(config.api.base_url, "http://127.0.0.1:5000");
        assert_eq!(config.notify.window_secs, 120);
        assert_eq!(config.notify.poll_interval_secs, 30);
        assert_eq!(config.sound.player, PlayerKind::Command);
        assert_eq!(config.logging.format, "json");
    }

    #[test]
    fn test_huge_timeout_saturates() {
        let huge = u64::MAX.to_string();
        let mut config = Config::default();
        config.apply_overrides(|key| (key == "CHIME_REQUEST_TIMEOUT").then(|| huge.clone()));

        assert_eq!(config.api.request_timeout_secs, u64::MAX);
        assert_eq!(config.api.client_config().request_timeout_ms, u64::MAX);
    }

    #[test]
    fn test_player_kind_from_str() {
        assert_eq!("Bell".parse::<PlayerKind>().unwrap(), PlayerKind::Bell);
        assert_eq!("off".parse::<PlayerKind>().unwrap(), PlayerKind::Silent);
        assert!("kazoo".parse::<PlayerKind>().is_err());
    }
}
