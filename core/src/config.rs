//! Controller connection settings, loaded from TOML.

use std::fmt;
use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

use crate::error::ApiError;

/// Where the controller lives and how to authenticate against it.
///
/// The controller authenticates REST calls with HTTP basic auth where the
/// user name is `user@account`.
#[derive(Clone, Deserialize, PartialEq, Eq)]
pub struct ControllerConfig {
    /// e.g. `https://example.saas.appdynamics.com`
    pub base_url: String,

    pub username: String,

    /// Tenant account; on-premise controllers use `customer1`.
    #[serde(default = "default_account")]
    pub account: String,

    pub password: String,

    /// Whole-request timeout in seconds. `0` disables it.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_account() -> String {
    "customer1".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

impl ControllerConfig {
    /// Read configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ApiError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ApiError::Config(format!("failed to read {}: {e}", path.display())))?;
        let config = Self::parse(&contents)?;
        tracing::debug!(path = %path.display(), base_url = %config.base_url, "loaded controller config");
        Ok(config)
    }

    /// Parse configuration from a TOML document.
    pub fn parse(contents: &str) -> Result<Self, ApiError> {
        toml::from_str(contents).map_err(|e| ApiError::Config(e.to_string()))
    }

    pub fn timeout(&self) -> Option<Duration> {
        (self.timeout_secs > 0).then(|| Duration::from_secs(self.timeout_secs))
    }
}

impl fmt::Debug for ControllerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ControllerConfig")
            .field("base_url", &self.base_url)
            .field("username", &self.username)
            .field("account", &self.account)
            .field("password", &"<redacted>")
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}
