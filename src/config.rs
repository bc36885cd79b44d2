//! Environment-driven configuration.

use thiserror::Error;
use url::Url;

/// Local proxy assumed when `FLIBUSTA_PROXY_URL` is unset. The port
/// matches the Tor proxy container suggested in the all-mirrors-failed
/// error message.
pub const DEFAULT_PROXY_URL: &str = "http://localhost:8118";

const HOST_VAR: &str = "FLIBUSTA_HOST";
const PROXY_URL_VAR: &str = "FLIBUSTA_PROXY_URL";

/// Proxy schemes `reqwest` can route through.
const SUPPORTED_PROXY_SCHEMES: [&str; 4] = ["http", "https", "socks5", "socks5h"];

/// Errors raised while reading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid proxy url {url:?}: {reason}")]
    InvalidProxyUrl { url: String, reason: String },
}

impl ConfigError {
    fn invalid_proxy_url(url: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidProxyUrl {
            url: url.into(),
            reason: reason.into(),
        }
    }
}

/// Settings the client is constructed from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    /// Extra mirror host raced alongside the built-in ones.
    pub extra_host: Option<String>,
    /// Proxy URL for outbound traffic; `None` connects directly.
    pub proxy_url: Option<String>,
}

impl Config {
    /// Reads configuration from `FLIBUSTA_HOST` and `FLIBUSTA_PROXY_URL`.
    ///
    /// The proxy defaults to [`DEFAULT_PROXY_URL`] when the variable is
    /// unset or blank; the mirrors are blocked on many networks and a
    /// local Tor proxy is the expected setup.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidProxyUrl`] when the proxy URL does
    /// not parse or uses a scheme `reqwest` cannot route through.
    pub fn from_env() -> Result<Self, ConfigError> {
        let extra_host = non_empty_var(HOST_VAR);
        let proxy_url =
            non_empty_var(PROXY_URL_VAR).unwrap_or_else(|| DEFAULT_PROXY_URL.to_string());
        validate_proxy_url(&proxy_url)?;
        Ok(Self {
            extra_host,
            proxy_url: Some(proxy_url),
        })
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn validate_proxy_url(url: &str) -> Result<(), ConfigError> {
    let parsed =
        Url::parse(url).map_err(|error| ConfigError::invalid_proxy_url(url, error.to_string()))?;
    if !SUPPORTED_PROXY_SCHEMES.contains(&parsed.scheme()) {
        return Err(ConfigError::invalid_proxy_url(
            url,
            format!("unsupported scheme {:?}", parsed.scheme()),
        ));
    }
    Ok(())
}
