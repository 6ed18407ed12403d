//! Application configuration.

use std::time::Duration;

use deepguard_client::DetectClientConfig;

use crate::logging::LogFormat;

/// Settings resolved once at startup.
#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    /// Detection service connection
    pub client: DetectClientConfig,
    /// Log line format
    pub log_format: LogFormat,
}

impl AppConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        Self {
            client: DetectClientConfig::from_env(),
            log_format: LogFormat::from_env(),
        }
    }

    /// Apply command-line overrides on top of the environment.
    ///
    /// A timeout of zero seconds disables the timeout.
    pub fn with_overrides(mut self, api_url: Option<String>, timeout_secs: Option<u64>) -> Self {
        if let Some(url) = api_url {
            self.client.base_url = url;
        }
        if let Some(secs) = timeout_secs {
            self.client.timeout = (secs > 0).then(|| Duration::from_secs(secs));
        }
        self
    }
}
