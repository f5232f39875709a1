//! Application configuration module
//!
//! `AppConfig` holds the settings every consumer of the crate agrees on; it is
//! assembled through [`AppConfigBuilder`] or parsed from a TOML document:
//!
//! ```toml
//! server_url = "https://api.bookworm.example"
//! credential_path = "/home/reader/.config/bookworm/token"
//! role_mismatch = "forbidden"
//! page_size = 6
//! ```

use serde::Deserialize;
use std::path::PathBuf;
use thiserror::Error;

/// Base URL used when nothing else is configured
pub const DEFAULT_SERVER_URL: &str = "http://localhost:5000";

/// Books per page on the browse screen
pub const DEFAULT_PAGE_SIZE: usize = 6;

/// Where an authenticated visitor with the wrong role is sent
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoleMismatchPolicy {
    /// Back to the login screen, the same place as an anonymous visitor
    #[default]
    Login,
    /// To a dedicated forbidden screen
    Forbidden,
}

/// Application configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Backend base URL, without a trailing slash
    pub server_url: String,
    /// Override for the persisted credential file
    pub credential_path: Option<PathBuf>,
    pub role_mismatch: RoleMismatchPolicy,
    pub page_size: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server_url: DEFAULT_SERVER_URL.to_string(),
            credential_path: None,
            role_mismatch: RoleMismatchPolicy::default(),
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawAppConfig {
    server_url: Option<String>,
    credential_path: Option<PathBuf>,
    role_mismatch: Option<RoleMismatchPolicy>,
    page_size: Option<usize>,
}

impl AppConfig {
    /// Create a new AppConfigBuilder
    pub fn builder() -> AppConfigBuilder {
        AppConfigBuilder::default()
    }

    /// Parse a TOML document; absent keys keep their defaults
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let raw: RawAppConfig =
            toml::from_str(source).map_err(|e| ConfigError::Parse(e.to_string()))?;

        let mut builder = Self::builder();
        if let Some(url) = raw.server_url {
            builder = builder.server_url(url);
        }
        if let Some(path) = raw.credential_path {
            builder = builder.credential_path(path);
        }
        if let Some(policy) = raw.role_mismatch {
            builder = builder.role_mismatch(policy);
        }
        if let Some(size) = raw.page_size {
            builder = builder.page_size(size);
        }
        builder.build()
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.server_url.starts_with("http://") || self.server_url.starts_with("https://")) {
            return Err(ConfigError::InvalidUrl(self.server_url.clone()));
        }
        if self.page_size == 0 {
            return Err(ConfigError::MissingValue("page_size"));
        }
        Ok(())
    }
}

/// Builder for AppConfig
#[derive(Debug, Default)]
pub struct AppConfigBuilder {
    server_url: Option<String>,
    credential_path: Option<PathBuf>,
    role_mismatch: Option<RoleMismatchPolicy>,
    page_size: Option<usize>,
}

impl AppConfigBuilder {
    /// Set the server URL
    pub fn server_url(mut self, url: impl Into<String>) -> Self {
        self.server_url = Some(url.into());
        self
    }

    pub fn credential_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.credential_path = Some(path.into());
        self
    }

    pub fn role_mismatch(mut self, policy: RoleMismatchPolicy) -> Self {
        self.role_mismatch = Some(policy);
        self
    }

    pub fn page_size(mut self, size: usize) -> Self {
        self.page_size = Some(size);
        self
    }

    /// Build and validate the configuration
    pub fn build(self) -> Result<AppConfig, ConfigError> {
        let server_url = self
            .server_url
            .map(|url| url.trim().trim_end_matches('/').to_string())
            .unwrap_or_else(|| DEFAULT_SERVER_URL.to_string());

        let config = AppConfig {
            server_url,
            credential_path: self.credential_path,
            role_mismatch: self.role_mismatch.unwrap_or_default(),
            page_size: self.page_size.unwrap_or(DEFAULT_PAGE_SIZE),
        };
        config.validate()?;
        Ok(config)
    }
}

/// Configuration errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid URL: {0}")]
    InvalidUrl(String),
    #[error("missing value: {0}")]
    MissingValue(&'static str),
    #[error("invalid config file: {0}")]
    Parse(String),
    #[error("cannot read config file: {0}")]
    Io(String),
}
