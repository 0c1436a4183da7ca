//! Traceability service client configuration.
//!
//! Defaults point at a locally running traceability service. Override via
//! environment variables or explicit construction for shared environments
//! and tests.

use url::Url;
use zeroize::Zeroizing;

/// Default traceability service root.
const DEFAULT_BASE_URL: &str = "http://localhost:8085";

/// Configuration for connecting to the traceability service.
///
/// Custom `Debug` implementation redacts the `cookie` field to prevent
/// session leakage in log output.
#[derive(Clone)]
pub struct TraceabilityConfig {
    /// Service root, without the `traceability-service` context path.
    pub base_url: Url,
    /// Value sent verbatim in the `Cookie` header of every request.
    pub cookie: Zeroizing<String>,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
    /// Retries after the first attempt when the transport fails.
    pub max_retries: u32,
}

impl std::fmt::Debug for TraceabilityConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TraceabilityConfig")
            .field("base_url", &self.base_url)
            .field("cookie", &"[REDACTED]")
            .field("timeout_secs", &self.timeout_secs)
            .field("max_retries", &self.max_retries)
            .finish()
    }
}

impl TraceabilityConfig {
    /// Load configuration from environment variables.
    ///
    /// Variables:
    /// - `TRACEABILITY_URL` (default: `http://localhost:8085`)
    /// - `TRACEABILITY_COOKIE` (required)
    /// - `TRACEABILITY_TIMEOUT_SECS` (default: 30)
    /// - `TRACEABILITY_MAX_RETRIES` (default: 3)
    pub fn from_env() -> Result<Self, ConfigError> {
        let cookie = std::env::var("TRACEABILITY_COOKIE").map_err(|_| ConfigError::MissingCookie)?;
        Self::with_cookie(cookie)
    }

    /// Like [`from_env`](Self::from_env), but with an explicit cookie.
    pub fn with_cookie(cookie: impl Into<String>) -> Result<Self, ConfigError> {
        let cookie = cookie.into();
        if cookie.trim().is_empty() {
            return Err(ConfigError::MissingCookie);
        }

        Ok(Self {
            base_url: env_url("TRACEABILITY_URL", DEFAULT_BASE_URL)?,
            cookie: Zeroizing::new(cookie),
            timeout_secs: env_number("TRACEABILITY_TIMEOUT_SECS", 30),
            max_retries: env_number("TRACEABILITY_MAX_RETRIES", 3),
        })
    }

    /// Create a configuration pointing to a local mock server (for testing).
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidUrl` if the localhost URL cannot be parsed.
    pub fn local_mock(port: u16, cookie: &str) -> Result<Self, ConfigError> {
        let base_url = Url::parse(&format!("http://127.0.0.1:{port}"))
            .map_err(|e| ConfigError::InvalidUrl("localhost".to_string(), e.to_string()))?;
        Ok(Self {
            base_url,
            cookie: Zeroizing::new(cookie.to_string()),
            timeout_secs: 5,
            max_retries: 0,
        })
    }
}

fn env_url(var: &str, default: &str) -> Result<Url, ConfigError> {
    let raw = std::env::var(var).unwrap_or_else(|_| default.to_string());
    Url::parse(&raw).map_err(|e| ConfigError::InvalidUrl(var.to_string(), e.to_string()))
}

fn env_number<T: std::str::FromStr>(var: &str, default: T) -> T {
    std::env::var(var)
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}

/// Bad configuration: the client cannot be built from what it was given.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// No session cookie was supplied.
    #[error("TRACEABILITY_COOKIE environment variable is required")]
    MissingCookie,
    /// A URL variable did not parse.
    #[error("invalid URL for {0}: {1}")]
    InvalidUrl(String, String),
    /// The cookie cannot be sent as a header value.
    #[error("cookie contains characters not allowed in an HTTP header")]
    InvalidCookie,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn local_mock_builds_valid_config() {
        let cfg = TraceabilityConfig::local_mock(9100, "JSESSIONID=abc").unwrap();
        assert_eq!(cfg.cookie.as_str(), "JSESSIONID=abc");
        assert_eq!(cfg.timeout_secs, 5);
        assert_eq!(cfg.max_retries, 0);
        assert_eq!(cfg.base_url.as_str(), "http://127.0.0.1:9100/");
    }

    #[test]
    fn debug_redacts_cookie() {
        let cfg = TraceabilityConfig::local_mock(9100, "dev-ims-ihtsdo=secret").unwrap();
        let out = format!("{cfg:?}");
        assert!(out.contains("[REDACTED]"));
        assert!(!out.contains("secret"));
    }

    #[test]
    fn with_cookie_rejects_blank() {
        assert!(matches!(
            TraceabilityConfig::with_cookie("  "),
            Err(ConfigError::MissingCookie)
        ));
    }

    #[test]
    fn env_url_uses_default_when_var_absent() {
        let url = env_url("NONEXISTENT_VAR_SCT_12345", "https://example.com").unwrap();
        assert_eq!(url.as_str(), "https://example.com/");
    }

    #[test]
    fn env_url_rejects_invalid_url() {
        std::env::set_var("TEST_BAD_URL_SCT", "not a url");
        let result = env_url("TEST_BAD_URL_SCT", "https://example.com");
        std::env::remove_var("TEST_BAD_URL_SCT");
        assert!(matches!(result, Err(ConfigError::InvalidUrl(var, _)) if var == "TEST_BAD_URL_SCT"));
    }

    #[test]
    fn env_number_falls_back_on_garbage() {
        std::env::set_var("TEST_BAD_NUMBER_SCT", "thirty");
        let n: u64 = env_number("TEST_BAD_NUMBER_SCT", 30);
        std::env::remove_var("TEST_BAD_NUMBER_SCT");
        assert_eq!(n, 30);
    }
}
