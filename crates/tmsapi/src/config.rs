//! `TmsConfig` struct and TOML loading.

use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::Deserialize;
use url::Url;

use crate::client::HttpClient;

/// Environment variable holding the API key.
pub const API_KEY_ENV: &str = "TMS_API_KEY";

/// Client configuration.
///
/// ```toml
/// api_key = "xxxxxxxx"
/// base_url = "http://data.tmsapi.com/"
/// asset_base_url = "http://developer.tmsimg.com/"
/// timeout_secs = 30
/// ```
#[derive(Debug, Deserialize, Default, PartialEq, Eq, Clone)]
#[allow(clippy::module_name_repetitions)]
pub struct TmsConfig {
    /// API key.
    #[serde(default)]
    pub api_key: Option<String>,
    /// Metadata base URL override.
    #[serde(default)]
    pub base_url: Option<String>,
    /// Asset base URL override.
    #[serde(default)]
    pub asset_base_url: Option<String>,
    /// User-Agent override.
    #[serde(default)]
    pub user_agent: Option<String>,
    /// Total request timeout in seconds.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl TmsConfig {
    /// Loads config from a TOML file. Returns default if file does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        toml::from_str(&content).with_context(|| format!("failed to parse {}", path.display()))
    }

    /// Overrides `api_key` from `TMS_API_KEY` when that variable is set.
    #[must_use]
    pub fn with_env(self) -> Self {
        self.with_api_key_from(std::env::var(API_KEY_ENV).ok())
    }

    fn with_api_key_from(mut self, value: Option<String>) -> Self {
        if let Some(key) = value.filter(|k| !k.trim().is_empty()) {
            self.api_key = Some(key);
        }
        self
    }

    /// Builds an `HttpClient` from this configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if a URL is invalid, the API key is missing, or the
    /// HTTP client fails to build.
    pub fn into_client(self) -> Result<HttpClient> {
        let mut builder = HttpClient::builder();
        if let Some(key) = self.api_key {
            builder = builder.api_key(key);
        }
        if let Some(ref url) = self.base_url {
            let url = Url::parse(url).with_context(|| format!("invalid base_url: {url}"))?;
            builder = builder.base_url(url);
        }
        if let Some(ref url) = self.asset_base_url {
            let url = Url::parse(url).with_context(|| format!("invalid asset_base_url: {url}"))?;
            builder = builder.asset_base_url(url);
        }
        if let Some(ua) = self.user_agent {
            builder = builder.user_agent(ua);
        }
        if let Some(secs) = self.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        builder.build().context("failed to build TMS client")
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn test_load_missing_file_returns_default() {
        // Arrange
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");

        // Act
        let config = TmsConfig::load(&path).unwrap();

        // Assert
        assert_eq!(config, TmsConfig::default());
    }

    #[test]
    fn test_load_parses_file() {
        // Arrange
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tms.toml");
        std::fs::write(
            &path,
            "api_key = \"abc\"\nbase_url = \"http://localhost:9000/\"\ntimeout_secs = 5\n",
        )
        .unwrap();

        // Act
        let config = TmsConfig::load(&path).unwrap();

        // Assert
        assert_eq!(config.api_key.as_deref(), Some("abc"));
        assert_eq!(config.base_url.as_deref(), Some("http://localhost:9000/"));
        assert_eq!(config.timeout_secs, Some(5));
        assert!(config.asset_base_url.is_none());
    }

    #[test]
    fn test_load_invalid_toml() {
        // Arrange
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tms.toml");
        std::fs::write(&path, "api_key = [").unwrap();

        // Act
        let result = TmsConfig::load(&path);

        // Assert
        assert!(result.unwrap_err().to_string().contains("failed to parse"));
    }

    #[test]
    fn test_env_value_overrides_file_key() {
        // Arrange
        let config = TmsConfig {
            api_key: Some(String::from("from-file")),
            ..TmsConfig::default()
        };

        // Act
        let overridden = config.clone().with_api_key_from(Some(String::from("from-env")));
        let kept = config.with_api_key_from(Some(String::new()));

        // Assert
        assert_eq!(overridden.api_key.as_deref(), Some("from-env"));
        assert_eq!(kept.api_key.as_deref(), Some("from-file"));
    }

    #[test]
    fn test_into_client_applies_urls() {
        // Arrange
        let config = TmsConfig {
            api_key: Some(String::from("abc")),
            base_url: Some(String::from("http://localhost:9000/")),
            asset_base_url: Some(String::from("http://localhost:9001/")),
            ..TmsConfig::default()
        };

        // Act
        let client = config.into_client().unwrap();

        // Assert
        assert_eq!(client.base_url().as_str(), "http://localhost:9000/");
        assert_eq!(client.asset_base_url().as_str(), "http://localhost:9001/");
    }

    #[test]
    fn test_into_client_without_key_fails() {
        // Arrange & Act
        let result = TmsConfig::default().into_client();

        // Assert
        let message = format!("{:#}", result.unwrap_err());
        assert!(message.contains("api_key is a required parameter"));
    }

    #[test]
    fn test_into_client_invalid_url() {
        // Arrange
        let config = TmsConfig {
            api_key: Some(String::from("abc")),
            base_url: Some(String::from("not a url")),
            ..TmsConfig::default()
        };

        // Act
        let result = config.into_client();

        // Assert
        assert!(result.unwrap_err().to_string().contains("invalid base_url"));
    }
}
