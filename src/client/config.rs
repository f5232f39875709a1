use std::path::{Path, PathBuf};

use crate::shared::config::{AppConfig, AppConfigBuilder, ConfigError, RoleMismatchPolicy};

/// Environment variable overriding the backend base URL
pub const API_URL_ENV: &str = "BOOKWORM_API_URL";
/// Environment variable overriding the persisted credential location
pub const CREDENTIAL_PATH_ENV: &str = "BOOKWORM_CREDENTIAL_PATH";

/// Directory under the platform config dir holding client state
const APP_DIR: &str = "bookworm";
/// Storage key of the persisted bearer credential
pub const CREDENTIAL_KEY: &str = "token";

/// Client configuration wrapper.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    app: AppConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            app: AppConfig::default(),
        }
    }
}

impl Config {
    pub fn new(app: AppConfig) -> Self {
        Self { app }
    }

    pub fn with_builder(builder: AppConfigBuilder) -> Result<Self, ConfigError> {
        Ok(Self::new(builder.build()?))
    }

    /// Defaults, overridden by `BOOKWORM_API_URL` and `BOOKWORM_CREDENTIAL_PATH`
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::with_builder(Self::env_overrides(AppConfig::builder()))
    }

    /// Read a TOML file, then apply the environment overrides on top
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let source = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(format!("{}: {}", path.display(), e)))?;
        let file = AppConfig::from_toml_str(&source)?;

        let mut builder = AppConfig::builder()
            .server_url(file.server_url)
            .role_mismatch(file.role_mismatch)
            .page_size(file.page_size);
        if let Some(credential_path) = file.credential_path {
            builder = builder.credential_path(credential_path);
        }
        Self::with_builder(Self::env_overrides(builder))
    }

    fn env_overrides(mut builder: AppConfigBuilder) -> AppConfigBuilder {
        if let Ok(url) = std::env::var(API_URL_ENV) {
            builder = builder.server_url(url);
        }
        if let Ok(path) = std::env::var(CREDENTIAL_PATH_ENV) {
            builder = builder.credential_path(path);
        }
        builder
    }

    /// Get the full URL for an API endpoint
    pub fn api_url(&self, path: &str) -> String {
        format!("{}{}", self.server_url(), path)
    }

    pub fn server_url(&self) -> &str {
        &self.app.server_url
    }

    pub fn role_mismatch(&self) -> RoleMismatchPolicy {
        self.app.role_mismatch
    }

    pub fn page_size(&self) -> usize {
        self.app.page_size
    }

    /// Location of the persisted credential, `None` when no config dir exists
    pub fn credential_path(&self) -> Option<PathBuf> {
        if let Some(path) = &self.app.credential_path {
            return Some(path.clone());
        }
        dirs::config_dir().map(|mut path| {
            path.push(APP_DIR);
            path.push(CREDENTIAL_KEY);
            path
        })
    }
}
