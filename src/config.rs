//! Configuration types.

use std::time::Duration;

use secrecy::SecretString;

use crate::error::ConfigError;

/// Remote API configuration.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// GraphQL endpoint URL.
    pub endpoint: String,
    /// Sent as the `Api-Key` header when present.
    pub api_key: Option<SecretString>,
    /// Per-request timeout.
    pub timeout: Duration,
    /// Height requested for avatar image URLs.
    pub image_height: u32,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://localhost:3060/graphql/v1".to_string(),
            api_key: None,
            timeout: Duration::from_secs(30),
            image_height: 64,
        }
    }
}

impl ApiConfig {
    /// Load from `COLLECTIVES_*` environment variables, defaulting anything unset.
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let endpoint = std::env::var("COLLECTIVES_API_URL").unwrap_or(defaults.endpoint);

        let api_key = std::env::var("COLLECTIVES_API_KEY")
            .ok()
            .filter(|k| !k.is_empty())
            .map(SecretString::from);

        let timeout = match std::env::var("COLLECTIVES_API_TIMEOUT_SECS") {
            Ok(raw) => Duration::from_secs(parse_number("COLLECTIVES_API_TIMEOUT_SECS", &raw)?),
            Err(_) => defaults.timeout,
        };

        let image_height = match std::env::var("COLLECTIVES_IMAGE_HEIGHT") {
            Ok(raw) => parse_number("COLLECTIVES_IMAGE_HEIGHT", &raw)?,
            Err(_) => defaults.image_height,
        };

        Ok(Self {
            endpoint,
            api_key,
            timeout,
            image_height,
        })
    }
}

fn parse_number<T: std::str::FromStr>(key: &str, raw: &str) -> Result<T, ConfigError>
where
    T::Err: std::fmt::Display,
{
    raw.trim().parse().map_err(|e: T::Err| ConfigError::InvalidValue {
        key: key.to_string(),
        message: format!("{raw:?}: {e}"),
    })
}
