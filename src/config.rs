//! Configuration management for the HAMS dashboard client

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::env;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ApiConfig {
    /// Backend base URL
    pub url: String,
    /// Global request timeout
    pub timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct SessionConfig {
    /// File holding the bearer token between runs
    pub file: PathBuf,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    /// `pretty` or `json`
    pub format: String,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub session: SessionConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from `./config` and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from("config")
    }

    /// Load configuration from files in `dir` and environment variables
    pub fn load_from(dir: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let dir = dir.as_ref();
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let config = Config::builder()
            // Start with default configuration
            .add_source(File::with_name(&dir.join("default").to_string_lossy()).required(false))
            // Layer on the environment-specific file
            .add_source(File::with_name(&dir.join(&run_mode).to_string_lossy()).required(false))
            // Add environment variables (HAMS_API__URL, HAMS_LOGGING__LEVEL, ...)
            .add_source(
                Environment::with_prefix("HAMS")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            // The dashboard's historical API URL variable wins when set
            .set_override_option("api.url", env::var("VITE_API_URL").ok())?
            .set_override_option("session.file", env::var("HAMS_SESSION_FILE").ok())?
            .build()?;

        config.try_deserialize()
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            url: "http://localhost:8000".to_string(),
            timeout_secs: 40,
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        let home = env::var_os("HOME").map(PathBuf::from).unwrap_or_default();
        Self {
            file: home.join(".hams").join("session"),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            format: "pretty".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.api.url, "http://localhost:8000");
        assert_eq!(config.api.timeout_secs, 40);
        assert_eq!(config.logging.format, "pretty");
        assert!(config.session.file.ends_with(".hams/session"));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("default.toml"),
            "[api]\nurl = \"https://hams.example.org\"\n\n[logging]\nlevel = \"debug\"\n",
        )
        .unwrap();

        let config = AppConfig::load_from(dir.path()).unwrap();
        // VITE_API_URL may override in a developer shell
        if env::var("VITE_API_URL").is_err() {
            assert_eq!(config.api.url, "https://hams.example.org");
        }
        assert_eq!(config.api.timeout_secs, 40);
        assert_eq!(config.logging.level, "debug");
    }
}
