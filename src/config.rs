//! Host configuration parsed from environment variables.

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_PREDICT_API_URL: &str = "http://127.0.0.1:5000";
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid PORT: {0}")]
    InvalidPort(String),
    #[error("PREDICT_API_URL must start with http:// or https://, got '{0}'")]
    InvalidUpstream(String),
    #[error("invalid PROXY_CONNECT_TIMEOUT_SECS: {0}")]
    InvalidTimeout(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostConfig {
    pub port: u16,
    /// Base URL of the prediction backend, without a trailing slash.
    pub predict_api_url: String,
    pub connect_timeout_secs: u64,
}

impl HostConfig {
    /// Build typed host config from environment variables.
    ///
    /// Optional:
    /// - `PORT`: default 3000
    /// - `PREDICT_API_URL`: default `http://127.0.0.1:5000`
    /// - `PROXY_CONNECT_TIMEOUT_SECS`: default 10
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`HostConfig::from_env`] but reading values through `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = match lookup("PORT") {
            Some(raw) => raw.trim().parse::<u16>().map_err(|_| ConfigError::InvalidPort(raw))?,
            None => DEFAULT_PORT,
        };

        let predict_api_url = lookup("PREDICT_API_URL")
            .unwrap_or_else(|| DEFAULT_PREDICT_API_URL.to_owned())
            .trim()
            .trim_end_matches('/')
            .to_owned();
        if !(predict_api_url.starts_with("http://") || predict_api_url.starts_with("https://")) {
            return Err(ConfigError::InvalidUpstream(predict_api_url));
        }

        let connect_timeout_secs = match lookup("PROXY_CONNECT_TIMEOUT_SECS") {
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .map_err(|_| ConfigError::InvalidTimeout(raw))?,
            None => DEFAULT_CONNECT_TIMEOUT_SECS,
        };

        Ok(Self { port, predict_api_url, connect_timeout_secs })
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
