//! Configuration management for the uscout scanner
//!
//! This module handles loading and validating configuration from
//! environment variables, files, and command-line arguments.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Scanner configuration
    pub scanner: ScannerConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Scanner-specific configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScannerConfig {
    /// Maximum number of concurrent probes
    pub concurrency: usize,

    /// Per-attempt request timeout in seconds
    pub request_timeout_secs: u64,

    /// Total fetch attempts per probe (first try included)
    pub max_attempts: u32,

    /// Fixed delay between attempts in milliseconds
    pub retry_backoff_ms: u64,

    /// Path to the platform registry file
    pub registry_path: PathBuf,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,

    /// Log format (text, json)
    pub format: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let concurrency = std::env::var("USCOUT_CONCURRENCY")
            .ok()
            .and_then(|v| v.parse::<usize>().ok())
            .unwrap_or(50);

        let request_timeout_secs = std::env::var("USCOUT_REQUEST_TIMEOUT")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(20);

        let max_attempts = std::env::var("USCOUT_MAX_ATTEMPTS")
            .ok()
            .and_then(|v| v.parse::<u32>().ok())
            .unwrap_or(2);

        let retry_backoff_ms = std::env::var("USCOUT_RETRY_BACKOFF_MS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(1000);

        let registry_path = std::env::var("USCOUT_REGISTRY")
            .unwrap_or_else(|_| String::from("platforms.json"))
            .into();

        let log_level = std::env::var("USCOUT_LOG_LEVEL").unwrap_or_else(|_| String::from("info"));

        let log_format =
            std::env::var("USCOUT_LOG_FORMAT").unwrap_or_else(|_| String::from("text"));

        Ok(Self {
            scanner: ScannerConfig {
                concurrency,
                request_timeout_secs,
                max_attempts,
                retry_backoff_ms,
                registry_path,
            },
            logging: LoggingConfig {
                level: log_level,
                format: log_format,
            },
        })
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse TOML config file: {}", path.display()))?;

        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.scanner.concurrency == 0 {
            anyhow::bail!("concurrency must be greater than 0");
        }

        if self.scanner.max_attempts == 0 {
            anyhow::bail!("max_attempts must be greater than 0");
        }

        if self.scanner.request_timeout_secs == 0 {
            anyhow::bail!("request_timeout_secs must be greater than 0");
        }

        Ok(())
    }
}

impl ScannerConfig {
    /// Get per-attempt timeout as Duration
    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Get inter-attempt backoff as Duration
    #[must_use]
    pub fn retry_backoff(&self) -> Duration {
        Duration::from_millis(self.retry_backoff_ms)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            scanner: ScannerConfig {
                concurrency: 50,
                request_timeout_secs: 20,
                max_attempts: 2,
                retry_backoff_ms: 1000,
                registry_path: PathBuf::from("platforms.json"),
            },
            logging: LoggingConfig {
                level: String::from("info"),
                format: String::from("text"),
            },
        }
    }
}
