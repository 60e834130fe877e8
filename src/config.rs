//! Configuration handling for the TUI

use anyhow::Result;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

/// User configuration for the TUI
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct TuiConfig {
    /// Consultation endpoint used when `BACKEND_API_URL` is unset
    pub backend_api_url: Option<String>,
    /// Delay of the simulated sign-in/sign-up, in milliseconds
    pub submission_delay_ms: Option<u64>,
}

impl TuiConfig {
    fn project_dirs() -> Option<ProjectDirs> {
        ProjectDirs::from("id", "konsultasi", "konsultasi-tui")
    }

    /// Get the config file path
    pub fn config_path() -> Option<PathBuf> {
        Self::project_dirs().map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Directory for the log file
    pub fn data_dir() -> Option<PathBuf> {
        Self::project_dirs().map(|dirs| dirs.data_dir().to_path_buf())
    }

    /// Load configuration from file
    pub fn load() -> Result<Self> {
        match Self::config_path() {
            Some(path) if path.exists() => Self::load_from(&path),
            _ => Ok(Self::default()),
        }
    }

    pub fn load_from(path: &std::path::Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: TuiConfig = serde_json::from_str(&content)?;
        Ok(config)
    }

    pub fn submission_delay(&self) -> Option<Duration> {
        self.submission_delay_ms.map(Duration::from_millis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = TuiConfig::default();
        assert!(config.backend_api_url.is_none());
        assert!(config.submission_delay_ms.is_none());
        assert!(config.submission_delay().is_none());
    }

    #[test]
    fn test_serialization() {
        let config = TuiConfig {
            backend_api_url: Some("http://localhost:8000/konsultasi".to_string()),
            submission_delay_ms: Some(250),
        };

        let json = serde_json::to_string(&config).unwrap();
        let parsed: TuiConfig = serde_json::from_str(&json).unwrap();

        assert_eq!(
            parsed.backend_api_url,
            Some("http://localhost:8000/konsultasi".to_string())
        );
        assert_eq!(parsed.submission_delay(), Some(Duration::from_millis(250)));
    }

    #[test]
    fn test_deserialize_from_empty_json() {
        let parsed: TuiConfig = serde_json::from_str("{}").unwrap();
        assert!(parsed.backend_api_url.is_none());
    }

    #[test]
    fn test_deserialize_with_extra_fields() {
        // Should ignore unknown fields
        let json = r#"{"backend_api_url": "http://x.test", "unknown_field": "value"}"#;
        let parsed: TuiConfig = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.backend_api_url, Some("http://x.test".to_string()));
    }

    #[test]
    fn test_load_from_file() {
        let dir = std::env::temp_dir().join(format!("konsultasi-cfg-{}", uuid::Uuid::new_v4()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.json");
        fs::write(&path, r#"{"submission_delay_ms": 10}"#).unwrap();

        let config = TuiConfig::load_from(&path).unwrap();
        assert_eq!(config.submission_delay_ms, Some(10));
    }

    #[test]
    fn test_load_from_malformed_file_fails() {
        let dir = std::env::temp_dir().join(format!("konsultasi-cfg-{}", uuid::Uuid::new_v4()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.json");
        fs::write(&path, "not json").unwrap();

        assert!(TuiConfig::load_from(&path).is_err());
    }

    #[test]
    fn test_config_path_returns_option() {
        // Just test that the function doesn't panic
        let _path = TuiConfig::config_path();
    }
}
