//! Redis settings for the session store

use serde::{Deserialize, Serialize};

use super::env_number;

const DEFAULT_REDIS_URL: &str = "redis://localhost:6379";

/// Session hashes live one day unless `REDIS_SESSION_TTL` says otherwise
const DEFAULT_SESSION_TTL_SECS: u64 = 86_400;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CacheConfig {
    pub url: String,

    /// Seconds allowed for the initial connection
    pub connection_timeout: u64,

    /// Expiry refreshed on every session write, in seconds
    #[serde(default = "default_session_ttl")]
    pub session_ttl: u64,

    /// Namespace prepended to every key, e.g. `otpgate:session:<id>`
    #[serde(default)]
    pub key_prefix: Option<String>,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self::new(DEFAULT_REDIS_URL)
    }
}

impl CacheConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            connection_timeout: 5,
            session_ttl: DEFAULT_SESSION_TTL_SECS,
            key_prefix: None,
        }
    }

    pub fn from_env() -> Self {
        let defaults = Self::new(
            std::env::var("REDIS_URL").unwrap_or_else(|_| DEFAULT_REDIS_URL.to_string()),
        );

        Self {
            connection_timeout: env_number("REDIS_CONNECT_TIMEOUT", defaults.connection_timeout),
            session_ttl: env_number("REDIS_SESSION_TTL", defaults.session_ttl),
            key_prefix: std::env::var("REDIS_KEY_PREFIX")
                .ok()
                .map(|p| p.trim().trim_end_matches(':').to_string())
                .filter(|p| !p.is_empty()),
            ..defaults
        }
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.key_prefix = Some(prefix.into());
        self
    }

    pub fn make_key(&self, key: &str) -> String {
        match self.key_prefix.as_deref() {
            Some(prefix) => format!("{}:{}", prefix, key),
            None => key.to_owned(),
        }
    }
}

fn default_session_ttl() -> u64 {
    DEFAULT_SESSION_TTL_SECS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_make_key_with_and_without_prefix() {
        let plain = CacheConfig::default();
        assert_eq!(plain.make_key("session:abc"), "session:abc");

        let prefixed = CacheConfig::new("redis://cache:6379").with_prefix("otpgate");
        assert_eq!(prefixed.make_key("session:abc"), "otpgate:session:abc");
    }

    #[test]
    fn test_from_env_normalizes_prefix() {
        temp_env::with_vars(
            [
                ("REDIS_URL", Some("redis://cache:6380")),
                ("REDIS_SESSION_TTL", Some("900")),
                ("REDIS_CONNECT_TIMEOUT", None),
                ("REDIS_KEY_PREFIX", Some("otpgate:")),
            ],
            || {
                let config = CacheConfig::from_env();
                assert_eq!(config.url, "redis://cache:6380");
                assert_eq!(config.session_ttl, 900);
                assert_eq!(config.connection_timeout, 5);
                assert_eq!(config.make_key("session:1"), "otpgate:session:1");
            },
        );
    }

    #[test]
    fn test_blank_prefix_is_ignored() {
        temp_env::with_var("REDIS_KEY_PREFIX", Some("  "), || {
            assert!(CacheConfig::from_env().key_prefix.is_none());
        });
    }
}
