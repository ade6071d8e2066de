//! Configuration Module
//!
//! Handles loading and managing pipeline and demo server configuration from
//! environment variables.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use crate::error::{PipelineError, Result};

const SECONDS_PER_DAY: u64 = 24 * 60 * 60;

/// Settings consumed by the caching stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheSettings {
    /// Sliding expiration applied when a request supplies none
    pub sliding_expiration: Duration,
    /// Collapse concurrent misses for the same key into one computation
    pub single_flight: bool,
}

impl CacheSettings {
    /// Builds settings with a default sliding expiration expressed in days.
    pub fn from_days(days: u64) -> Result<Self> {
        let seconds = days.checked_mul(SECONDS_PER_DAY).ok_or_else(|| {
            PipelineError::Configuration(format!(
                "sliding expiration of {} days is too large",
                days
            ))
        })?;

        Ok(Self {
            sliding_expiration: Duration::from_secs(seconds),
            single_flight: false,
        })
    }
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            sliding_expiration: Duration::from_secs(2 * SECONDS_PER_DAY),
            single_flight: false,
        }
    }
}

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Maximum number of entries the in-memory store can hold
    pub max_entries: usize,
    /// HTTP server port
    pub server_port: u16,
    /// Background cleanup task interval in seconds
    pub cleanup_interval: u64,
    /// Caching stage settings
    pub cache: CacheSettings,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `MAX_ENTRIES` - Maximum store entries (default: 1000)
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `CLEANUP_INTERVAL` - Cleanup frequency in seconds (default: 1)
    /// - `CACHE_SLIDING_EXPIRATION_DAYS` - Default sliding expiration (default: 2)
    /// - `CACHE_SINGLE_FLIGHT` - Deduplicate concurrent misses (default: false)
    ///
    /// A variable that is present but malformed is a configuration error.
    pub fn from_env() -> Result<Self> {
        let days: u64 = parse_var(
            "CACHE_SLIDING_EXPIRATION_DAYS",
            env::var("CACHE_SLIDING_EXPIRATION_DAYS").ok(),
            2,
        )?;

        let mut cache = CacheSettings::from_days(days)?;
        cache.single_flight = parse_var(
            "CACHE_SINGLE_FLIGHT",
            env::var("CACHE_SINGLE_FLIGHT").ok(),
            false,
        )?;

        Ok(Self {
            max_entries: parse_var("MAX_ENTRIES", env::var("MAX_ENTRIES").ok(), 1000)?,
            server_port: parse_var("SERVER_PORT", env::var("SERVER_PORT").ok(), 3000)?,
            cleanup_interval: parse_var(
                "CLEANUP_INTERVAL",
                env::var("CLEANUP_INTERVAL").ok(),
                1,
            )?,
            cache,
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_entries: 1000,
            server_port: 3000,
            cleanup_interval: 1,
            cache: CacheSettings::default(),
        }
    }
}

/// Parses an optional raw value, falling back to `default` when absent.
fn parse_var<T: FromStr>(name: &str, raw: Option<String>, default: T) -> Result<T> {
    match raw {
        None => Ok(default),
        Some(value) => value.trim().parse().map_err(|_| {
            PipelineError::Configuration(format!("{} has invalid value '{}'", name, value))
        }),
    }
}
