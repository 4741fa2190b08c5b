use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct JournalConfig {
    pub server: ServerConfig,
    pub api: ApiConfig,
    pub display: DisplayConfig,
    pub editor: EditorConfig,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub log_level: String,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL of the journal backend, e.g. `http://127.0.0.1:5000`.
    pub base_url: String,
    pub per_page: u32,
    pub timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct DisplayConfig {
    /// chrono format string used for every `Created At` field.
    pub date_format: String,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct EditorConfig {
    pub language: String,
}

impl Default for JournalConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            api: ApiConfig::default(),
            display: DisplayConfig::default(),
            editor: EditorConfig::default(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".into(),
            port: 8080,
            log_level: "info".into(),
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:5000".into(),
            per_page: 10,
            timeout_secs: 30,
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            date_format: crate::render::DEFAULT_DATE_FORMAT.into(),
        }
    }
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            language: "python".into(),
        }
    }
}

/// Returns `~/.lifejournal/`
pub fn default_journal_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".lifejournal")
}

/// Returns the default config file path: `~/.lifejournal/config.toml`
pub fn default_config_path() -> PathBuf {
    default_journal_dir().join("config.toml")
}

impl JournalConfig {
    /// Load config from TOML file (if it exists) then apply env var overrides.
    pub fn load() -> Result<Self> {
        Self::load_from(default_config_path())
    }

    /// Load from a specific path, then apply env var overrides.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let mut config = if path.exists() {
            let contents =
                std::fs::read_to_string(path).context("failed to read config file")?;
            toml::from_str(&contents).context("failed to parse config TOML")?
        } else {
            info!("no config file at {}, using defaults", path.display());
            JournalConfig::default()
        };

        config.apply_env_overrides();
        Ok(config)
    }

    /// Apply environment variable overrides
    /// (LIFEJOURNAL_API_URL, LIFEJOURNAL_PER_PAGE, LIFEJOURNAL_LOG_LEVEL).
    fn apply_env_overrides(&mut self) {
        if let Ok(val) = std::env::var("LIFEJOURNAL_API_URL") {
            self.api.base_url = val;
        }
        if let Ok(val) = std::env::var("LIFEJOURNAL_PER_PAGE") {
            match val.parse::<u32>() {
                Ok(n) if n > 0 => self.api.per_page = n,
                _ => tracing::warn!(value = %val, "ignoring invalid LIFEJOURNAL_PER_PAGE"),
            }
        }
        if let Ok(val) = std::env::var("LIFEJOURNAL_LOG_LEVEL") {
            self.server.log_level = val;
        }
    }

    /// `host:port` for the dashboard server.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = JournalConfig::default();
        assert_eq!(config.server.log_level, "info");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.api.per_page, 10);
        assert_eq!(config.editor.language, "python");
        assert_eq!(config.bind_addr(), "127.0.0.1:8080");
    }

    #[test]
    fn parse_toml_config() {
        let toml_str = r#"
[server]
log_level = "debug"

[api]
base_url = "http://journal.local:5000"
per_page = 25
"#;
        let config: JournalConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.server.log_level, "debug");
        assert_eq!(config.api.base_url, "http://journal.local:5000");
        assert_eq!(config.api.per_page, 25);
        // defaults still apply for unset fields
        assert_eq!(config.api.timeout_secs, 30);
        assert_eq!(config.display.date_format, crate::render::DEFAULT_DATE_FORMAT);
    }

    #[test]
    fn load_from_file_and_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[editor]\nlanguage = \"javascript\"\n").unwrap();

        let config = JournalConfig::load_from(&path).unwrap();
        assert_eq!(config.editor.language, "javascript");

        let missing = JournalConfig::load_from(dir.path().join("nope.toml")).unwrap();
        assert_eq!(missing.editor.language, "python");
    }

    #[test]
    fn env_overrides_apply() {
        let mut config = JournalConfig::default();
        std::env::set_var("LIFEJOURNAL_API_URL", "http://override:9000");
        std::env::set_var("LIFEJOURNAL_PER_PAGE", "50");
        std::env::set_var("LIFEJOURNAL_LOG_LEVEL", "trace");

        config.apply_env_overrides();

        assert_eq!(config.api.base_url, "http://override:9000");
        assert_eq!(config.api.per_page, 50);
        assert_eq!(config.server.log_level, "trace");

        // Clean up
        std::env::remove_var("LIFEJOURNAL_API_URL");
        std::env::remove_var("LIFEJOURNAL_PER_PAGE");
        std::env::remove_var("LIFEJOURNAL_LOG_LEVEL");
    }

    #[test]
    fn default_path_lives_in_journal_dir() {
        let path = default_config_path();
        assert!(path.ends_with(".lifejournal/config.toml"));
        assert_eq!(path.parent(), Some(default_journal_dir().as_path()));
    }
}
