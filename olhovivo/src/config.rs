//! Client configuration.

use std::fmt;
use std::time::Duration;

/// Production API root.
pub const DEFAULT_BASE_URL: &str = "http://api.olhovivo.sptrans.com.br/v0";

/// Per-request deadline.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(2);

/// Re-logins allowed per call when the session expires.
pub const DEFAULT_MAX_RETRIES: u32 = 1;

const TOKEN_VAR: &str = "OLHOVIVO_TOKEN";
const BASE_URL_VAR: &str = "OLHOVIVO_BASE_URL";
const TIMEOUT_VAR: &str = "OLHOVIVO_TIMEOUT_SECS";
const MAX_RETRIES_VAR: &str = "OLHOVIVO_MAX_RETRIES";

/// Configuration could not be read from the environment.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} is not set")]
    Missing(&'static str),

    #[error("{var} has an invalid value {value:?}: {reason}")]
    Invalid {
        var: &'static str,
        value: String,
        reason: String,
    },
}

/// Configuration for the Olho Vivo client.
#[derive(Clone)]
pub struct OlhoVivoConfig {
    /// API token issued by SPTrans
    pub token: String,
    /// Base URL for the API (defaults to production)
    pub base_url: String,
    /// Per-request timeout
    pub timeout: Duration,
    /// Re-logins allowed per call
    pub max_retries: u32,
}

impl OlhoVivoConfig {
    /// Create a new config with the given token.
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            max_retries: DEFAULT_MAX_RETRIES,
        }
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_max_retries(mut self, n: u32) -> Self {
        self.max_retries = n;
        self
    }

    /// Read the configuration from `OLHOVIVO_*` environment variables.
    ///
    /// `OLHOVIVO_TOKEN` is required. `OLHOVIVO_BASE_URL`,
    /// `OLHOVIVO_TIMEOUT_SECS` and `OLHOVIVO_MAX_RETRIES` override the
    /// defaults when set.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Like [`from_env`](Self::from_env), reading variables through `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let token = lookup(TOKEN_VAR)
            .filter(|t| !t.trim().is_empty())
            .ok_or(ConfigError::Missing(TOKEN_VAR))?;

        let mut config = Self::new(token);

        if let Some(url) = lookup(BASE_URL_VAR) {
            config = config.with_base_url(url);
        }

        if let Some(value) = lookup(TIMEOUT_VAR) {
            let secs = parse_number::<u64>(TIMEOUT_VAR, &value)?;
            if secs == 0 {
                return Err(ConfigError::Invalid {
                    var: TIMEOUT_VAR,
                    value,
                    reason: "must be at least 1 second".into(),
                });
            }
            config = config.with_timeout(Duration::from_secs(secs));
        }

        if let Some(value) = lookup(MAX_RETRIES_VAR) {
            config = config.with_max_retries(parse_number(MAX_RETRIES_VAR, &value)?);
        }

        Ok(config)
    }
}

fn parse_number<N>(var: &'static str, value: &str) -> Result<N, ConfigError>
where
    N: std::str::FromStr,
    N::Err: fmt::Display,
{
    value.trim().parse().map_err(|e: N::Err| ConfigError::Invalid {
        var,
        value: value.to_string(),
        reason: e.to_string(),
    })
}

impl fmt::Debug for OlhoVivoConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OlhoVivoConfig")
            .field("token", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .field("max_retries", &self.max_retries)
            .finish()
    }
}
