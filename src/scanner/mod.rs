//! Concurrent presence scanning engine
//!
//! The engine expands platforms × identifiers into independent probe
//! tasks, runs them under a bounded-concurrency admission gate, and
//! streams completions in whatever order the probes finish. One task's
//! failure, slowness, or malformed response never affects another: all
//! per-task failure is absorbed into a not-found result plus one error
//! observer call.

pub mod classifier;
pub mod fetcher;
pub mod headers;

use std::sync::Arc;

use futures::stream::{FuturesUnordered, StreamExt};
use tokio::sync::Semaphore;

use crate::config::ScannerConfig;
use crate::error::{Result, ScanError};
use crate::models::{FetchOutcome, Platform, ScanResult};
use crate::scanner::fetcher::ProbeFetcher;

/// Observer callbacks for scan completion events
///
/// Both callbacks run on the completion path of scan tasks and must
/// neither block nor panic.
#[derive(Default)]
pub struct ScanObservers {
    on_progress: Option<Box<dyn Fn() + Send + Sync>>,
    on_error: Option<Box<dyn Fn(&str) + Send + Sync>>,
}

impl ScanObservers {
    /// Create observers that ignore all events
    pub fn new() -> Self {
        Self::default()
    }

    /// Invoke the callback once per completed task
    pub fn on_progress(mut self, f: impl Fn() + Send + Sync + 'static) -> Self {
        self.on_progress = Some(Box::new(f));
        self
    }

    /// Invoke the callback with a message whenever a per-task error is
    /// absorbed
    pub fn on_error(mut self, f: impl Fn(&str) + Send + Sync + 'static) -> Self {
        self.on_error = Some(Box::new(f));
        self
    }

    fn progress(&self) {
        if let Some(f) = &self.on_progress {
            f();
        }
    }

    fn error(&self, message: &str) {
        if let Some(f) = &self.on_error {
            f(message);
        }
    }
}

/// Scan engine coordinating the limiter, fetcher, and classifier
pub struct Scanner {
    fetcher: ProbeFetcher,
    semaphore: Arc<Semaphore>,
    concurrency: usize,
}

impl Scanner {
    /// Create a scanner from validated configuration
    ///
    /// # Errors
    ///
    /// Returns `ScanError::InvalidConcurrency` for a zero bound, or
    /// `ScanError::Client` if the HTTP client cannot be created.
    pub fn new(config: &ScannerConfig) -> Result<Self> {
        if config.concurrency == 0 {
            return Err(ScanError::InvalidConcurrency.into());
        }

        let fetcher = ProbeFetcher::new(
            config.request_timeout(),
            config.max_attempts,
            config.retry_backoff(),
        )?;

        Ok(Self {
            fetcher,
            semaphore: Arc::new(Semaphore::new(config.concurrency)),
            concurrency: config.concurrency,
        })
    }

    /// Probe every (platform, identifier) pair
    ///
    /// Results arrive in completion order, not submission order;
    /// consumers needing a stable order must sort downstream. Under
    /// normal termination exactly |platforms| × |identifiers| results
    /// are returned, with one progress tick each.
    ///
    /// # Errors
    ///
    /// Only precondition failures cross this boundary: empty
    /// identifiers or empty platforms. Every per-task failure is
    /// expressed as `found = false` in the returned data.
    pub async fn scan(
        &self,
        identifiers: &[String],
        platforms: &[Platform],
        observers: &ScanObservers,
    ) -> Result<Vec<ScanResult>> {
        if identifiers.is_empty() {
            return Err(ScanError::NoIdentifiers.into());
        }
        if platforms.is_empty() {
            return Err(ScanError::NoPlatforms.into());
        }

        let total = platforms.len() * identifiers.len();
        tracing::info!(
            platforms = platforms.len(),
            identifiers = identifiers.len(),
            total,
            concurrency = self.concurrency,
            "starting scan"
        );

        let mut tasks = FuturesUnordered::new();
        for platform in platforms {
            for identifier in identifiers {
                tasks.push(self.run_task(platform, identifier, observers));
            }
        }

        let mut results = Vec::with_capacity(total);
        while let Some(result) = tasks.next().await {
            observers.progress();
            results.push(result);
        }

        tracing::info!(
            total = results.len(),
            found = results.iter().filter(|r| r.found).count(),
            "scan completed"
        );

        Ok(results)
    }

    /// Run one probe: admit, fetch with retry, classify, emit
    ///
    /// Always produces a result; there is no error path out of a task.
    async fn run_task(
        &self,
        platform: &Platform,
        identifier: &str,
        observers: &ScanObservers,
    ) -> ScanResult {
        let url = platform.resolve_url(identifier);

        let outcome = match self.semaphore.acquire().await {
            Ok(_permit) => self.fetcher.fetch(&url).await,
            // The semaphore is never closed while a scan is running
            Err(_) => FetchOutcome::failed(),
        };

        if outcome.status.is_none() {
            observers.error(&format!("probe failed after retries: {url}"));
        }

        let found = classifier::classify(&outcome, platform.validation.as_ref());

        tracing::debug!(
            platform = %platform.name,
            identifier,
            status = ?outcome.status,
            found,
            "probe completed"
        );

        ScanResult {
            platform: platform.name.clone(),
            username: identifier.to_string(),
            found,
            url,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    #[test]
    fn test_scanner_creation() {
        let config = Config::default();
        assert!(Scanner::new(&config.scanner).is_ok());
    }

    #[test]
    fn test_zero_concurrency_rejected() {
        let mut config = Config::default();
        config.scanner.concurrency = 0;
        assert!(Scanner::new(&config.scanner).is_err());
    }

    #[tokio::test]
    async fn test_empty_identifiers_rejected() {
        let config = Config::default();
        let scanner = Scanner::new(&config.scanner).unwrap();
        let platforms = vec![Platform {
            name: "x".to_string(),
            url_template: "http://x/{}".to_string(),
            validation: None,
        }];
        let result = scanner.scan(&[], &platforms, &ScanObservers::new()).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_empty_platforms_rejected() {
        let config = Config::default();
        let scanner = Scanner::new(&config.scanner).unwrap();
        let result = scanner
            .scan(&["bob".to_string()], &[], &ScanObservers::new())
            .await;
        assert!(result.is_err());
    }
}
