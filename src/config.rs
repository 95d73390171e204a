//! Configuration management for the DexScreener gateway.
//!
//! This module handles loading and validating configuration from environment variables.
//! Nothing is printed to stdout, which the tool server uses for protocol traffic.

use crate::error::{ConfigError, ConfigResult};
use std::env;
use std::str::FromStr;

/// Default DexScreener API base URL.
pub const DEFAULT_DEXSCREENER_API_URL: &str = "https://api.dexscreener.com/latest/dex";

/// Default Redis connection URL.
pub const DEFAULT_REDIS_URL: &str = "redis://localhost:6379";

/// Default cache TTL in seconds.
pub const DEFAULT_CACHE_TTL_SECONDS: u64 = 300;

/// Hard upper bound on the number of tokens returned by one listing.
pub const MAX_PAGE_SIZE: usize = 100;

/// Which key-value store backs the cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheBackend {
    /// Shared Redis instance (default)
    Redis,
    /// In-process store, lost on restart
    Memory,
}

impl FromStr for CacheBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "redis" => Ok(CacheBackend::Redis),
            "memory" => Ok(CacheBackend::Memory),
            other => Err(format!("Must be 'redis' or 'memory', got: {}", other)),
        }
    }
}

/// Configuration for the DexScreener gateway.
#[derive(Debug, Clone)]
pub struct Config {
    /// DexScreener API base URL
    pub dexscreener_api_url: String,

    /// Redis connection URL
    pub redis_url: String,

    /// Cache backend selection (default: redis)
    pub cache_backend: CacheBackend,

    /// Cache TTL in seconds (default: 300)
    pub cache_ttl_seconds: u64,

    /// HTTP request timeout in seconds (default: 10)
    pub request_timeout: u64,

    /// Default page size for token listings (default: 50)
    pub max_token_results: usize,

    /// Log level (default: "error")
    pub log_level: String,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// All variables are optional:
    /// - `DEXSCREENER_API_URL`: Base URL for the DexScreener API
    /// - `REDIS_URL`: Redis connection URL (default: redis://localhost:6379)
    /// - `CACHE_BACKEND`: `redis` or `memory` (default: redis)
    /// - `CACHE_TTL_SECONDS`: Cache TTL in seconds (default: 300)
    /// - `REQUEST_TIMEOUT`: HTTP timeout in seconds (default: 10)
    /// - `MAX_TOKEN_RESULTS`: Default page size for listings (default: 50)
    /// - `LOG_LEVEL`: Logging level (default: "error")
    pub fn from_env() -> ConfigResult<Self> {
        // dotenvy::dotenv() doesn't print to stdout
        let _ = dotenvy::dotenv();

        let dexscreener_api_url = env::var("DEXSCREENER_API_URL")
            .unwrap_or_else(|_| DEFAULT_DEXSCREENER_API_URL.to_string());

        if !dexscreener_api_url.starts_with("http://")
            && !dexscreener_api_url.starts_with("https://")
        {
            return Err(ConfigError::InvalidValue {
                var: "DEXSCREENER_API_URL".to_string(),
                reason: "Must start with http:// or https://".to_string(),
            });
        }

        let redis_url = env::var("REDIS_URL").unwrap_or_else(|_| DEFAULT_REDIS_URL.to_string());

        if !redis_url.starts_with("redis://") && !redis_url.starts_with("rediss://") {
            return Err(ConfigError::InvalidValue {
                var: "REDIS_URL".to_string(),
                reason: "Must start with redis:// or rediss://".to_string(),
            });
        }

        let cache_backend = match env::var("CACHE_BACKEND") {
            Ok(val) => val
                .parse::<CacheBackend>()
                .map_err(|reason| ConfigError::InvalidValue {
                    var: "CACHE_BACKEND".to_string(),
                    reason,
                })?,
            Err(_) => CacheBackend::Redis,
        };

        let cache_ttl_seconds = Self::parse_env_u64("CACHE_TTL_SECONDS", DEFAULT_CACHE_TTL_SECONDS)?;
        if cache_ttl_seconds == 0 {
            return Err(ConfigError::InvalidValue {
                var: "CACHE_TTL_SECONDS".to_string(),
                reason: "Must be greater than zero".to_string(),
            });
        }

        let request_timeout = Self::parse_env_u64("REQUEST_TIMEOUT", 10)?;

        let max_token_results = Self::parse_env_usize("MAX_TOKEN_RESULTS", 50)?;
        if max_token_results == 0 || max_token_results > MAX_PAGE_SIZE {
            return Err(ConfigError::InvalidValue {
                var: "MAX_TOKEN_RESULTS".to_string(),
                reason: format!("Must be between 1 and {}", MAX_PAGE_SIZE),
            });
        }

        let log_level = env::var("LOG_LEVEL").unwrap_or_else(|_| "error".to_string());

        Ok(Config {
            dexscreener_api_url,
            redis_url,
            cache_backend,
            cache_ttl_seconds,
            request_timeout,
            max_token_results,
            log_level,
        })
    }

    /// Parse an environment variable as u64 with a default value.
    fn parse_env_u64(var_name: &str, default: u64) -> ConfigResult<u64> {
        match env::var(var_name) {
            Ok(val) => val.parse::<u64>().map_err(|_| ConfigError::InvalidValue {
                var: var_name.to_string(),
                reason: format!("Must be a positive number, got: {}", val),
            }),
            Err(_) => Ok(default),
        }
    }

    /// Parse an environment variable as usize with a default value.
    fn parse_env_usize(var_name: &str, default: usize) -> ConfigResult<usize> {
        match env::var(var_name) {
            Ok(val) => val.parse::<usize>().map_err(|_| ConfigError::InvalidValue {
                var: var_name.to_string(),
                reason: format!("Must be a positive number, got: {}", val),
            }),
            Err(_) => Ok(default),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            dexscreener_api_url: DEFAULT_DEXSCREENER_API_URL.to_string(),
            redis_url: DEFAULT_REDIS_URL.to_string(),
            cache_backend: CacheBackend::Redis,
            cache_ttl_seconds: DEFAULT_CACHE_TTL_SECONDS,
            request_timeout: 10,
            max_token_results: 50,
            log_level: "error".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::env;

    const ALL_VARS: [&str; 7] = [
        "DEXSCREENER_API_URL",
        "REDIS_URL",
        "CACHE_BACKEND",
        "CACHE_TTL_SECONDS",
        "REQUEST_TIMEOUT",
        "MAX_TOKEN_RESULTS",
        "LOG_LEVEL",
    ];

    // Helper to set and unset env vars for testing
    struct EnvGuard {
        vars: Vec<String>,
    }

    impl EnvGuard {
        fn new() -> Self {
            // Start every test from a clean slate, including values a .env file may have set
            let _ = dotenvy::dotenv();
            for var in ALL_VARS {
                env::remove_var(var);
            }
            EnvGuard { vars: Vec::new() }
        }

        fn set(&mut self, key: &str, value: &str) {
            env::set_var(key, value);
            self.vars.push(key.to_string());
        }
    }

    impl Drop for EnvGuard {
        fn drop(&mut self) {
            for var in &self.vars {
                env::remove_var(var);
            }
        }
    }

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.cache_ttl_seconds, 300);
        assert_eq!(config.request_timeout, 10);
        assert_eq!(config.max_token_results, 50);
        assert_eq!(config.cache_backend, CacheBackend::Redis);
        assert_eq!(config.redis_url, "redis://localhost:6379");
    }

    #[test]
    #[serial]
    fn test_config_from_env_defaults() {
        let _guard = EnvGuard::new();

        let config = Config::from_env().unwrap();
        assert_eq!(config.dexscreener_api_url, DEFAULT_DEXSCREENER_API_URL);
        assert_eq!(config.redis_url, DEFAULT_REDIS_URL);
        assert_eq!(config.cache_ttl_seconds, DEFAULT_CACHE_TTL_SECONDS);
    }

    #[test]
    #[serial]
    fn test_config_from_env_invalid_url() {
        let mut guard = EnvGuard::new();
        guard.set("DEXSCREENER_API_URL", "not-a-url");

        let result = Config::from_env();
        match result {
            Err(ConfigError::InvalidValue { var, .. }) => assert_eq!(var, "DEXSCREENER_API_URL"),
            other => panic!("Expected InvalidValue error, got: {:?}", other),
        }
    }

    #[test]
    #[serial]
    fn test_config_from_env_invalid_redis_url() {
        let mut guard = EnvGuard::new();
        guard.set("REDIS_URL", "http://localhost:6379");

        match Config::from_env() {
            Err(ConfigError::InvalidValue { var, .. }) => assert_eq!(var, "REDIS_URL"),
            other => panic!("Expected InvalidValue error, got: {:?}", other),
        }
    }

    #[test]
    #[serial]
    fn test_config_zero_ttl_rejected() {
        let mut guard = EnvGuard::new();
        guard.set("CACHE_TTL_SECONDS", "0");

        match Config::from_env() {
            Err(ConfigError::InvalidValue { var, .. }) => assert_eq!(var, "CACHE_TTL_SECONDS"),
            other => panic!("Expected InvalidValue error, got: {:?}", other),
        }
    }

    #[test]
    #[serial]
    fn test_config_from_env_valid() {
        let mut guard = EnvGuard::new();
        guard.set("DEXSCREENER_API_URL", "http://127.0.0.1:9000/latest/dex");
        guard.set("REDIS_URL", "rediss://cache.internal:6380");
        guard.set("CACHE_BACKEND", "Memory");
        guard.set("CACHE_TTL_SECONDS", "60");
        guard.set("MAX_TOKEN_RESULTS", "10");

        let config = Config::from_env().unwrap();
        assert_eq!(config.dexscreener_api_url, "http://127.0.0.1:9000/latest/dex");
        assert_eq!(config.redis_url, "rediss://cache.internal:6380");
        assert_eq!(config.cache_backend, CacheBackend::Memory);
        assert_eq!(config.cache_ttl_seconds, 60);
        assert_eq!(config.max_token_results, 10);
    }

    #[test]
    #[serial]
    fn test_config_invalid_backend() {
        let mut guard = EnvGuard::new();
        guard.set("CACHE_BACKEND", "memcached");

        match Config::from_env() {
            Err(ConfigError::InvalidValue { var, .. }) => assert_eq!(var, "CACHE_BACKEND"),
            other => panic!("Expected InvalidValue error, got: {:?}", other),
        }
    }

    #[test]
    #[serial]
    fn test_config_page_size_out_of_range() {
        let mut guard = EnvGuard::new();
        guard.set("MAX_TOKEN_RESULTS", "500");

        assert!(Config::from_env().is_err());
    }

    #[test]
    #[serial]
    fn test_parse_env_u64() {
        let mut guard = EnvGuard::new();
        guard.set("TEST_U64", "42");

        let result = Config::parse_env_u64("TEST_U64", 10);
        assert_eq!(result.unwrap(), 42);

        let result = Config::parse_env_u64("NONEXISTENT", 10);
        assert_eq!(result.unwrap(), 10);
    }

    #[test]
    #[serial]
    fn test_parse_env_u64_invalid() {
        let mut guard = EnvGuard::new();
        guard.set("TEST_U64_INVALID", "not-a-number");

        let result = Config::parse_env_u64("TEST_U64_INVALID", 10);
        assert!(result.is_err());
    }
}
