//! HTTP probe fetcher with bounded retry
//!
//! One fetch call performs up to `max_attempts` GET requests with a
//! fixed backoff between them. Errors never escape to the caller: a
//! probe that exhausts its attempts returns [`FetchOutcome::failed`],
//! and the task runner absorbs that into a not-found result.

use reqwest::Client;
use std::time::Duration;

use crate::error::ScanError;
use crate::models::FetchOutcome;
use crate::scanner::headers::{build_probe_headers, random_user_agent};

/// Profile probe fetcher shared by all concurrent scan tasks
///
/// Wraps a pooled `reqwest::Client`, which owns its own internal
/// synchronization and is safe for concurrent use.
pub struct ProbeFetcher {
    client: Client,
    max_attempts: u32,
    retry_backoff: Duration,
}

impl ProbeFetcher {
    /// Create a new fetcher
    ///
    /// Certificate validation is intentionally disabled: scan targets
    /// are arbitrary third-party sites and TLS trust is not a security
    /// boundary for this best-effort reconnaissance.
    ///
    /// # Errors
    ///
    /// Returns `ScanError::Client` if the HTTP client cannot be created
    pub fn new(
        timeout: Duration,
        max_attempts: u32,
        retry_backoff: Duration,
    ) -> Result<Self, ScanError> {
        let client = Client::builder()
            .timeout(timeout)
            .gzip(true)
            .danger_accept_invalid_certs(true)
            .build()
            .map_err(ScanError::Client)?;

        Ok(Self {
            client,
            max_attempts: max_attempts.max(1),
            retry_backoff,
        })
    }

    /// Fetch a profile URL, absorbing all failure into the outcome
    ///
    /// Each attempt sends a GET with a freshly drawn User-Agent. Any
    /// attempt failure (connect error, timeout, TLS error, body read
    /// error) triggers the fixed backoff and one more try until the
    /// attempt budget is spent.
    pub async fn fetch(&self, url: &str) -> FetchOutcome {
        for attempt in 1..=self.max_attempts {
            if attempt > 1 {
                tokio::time::sleep(self.retry_backoff).await;
            }

            let headers = build_probe_headers(random_user_agent());

            match self.client.get(url).headers(headers).send().await {
                Ok(response) => {
                    let status = response.status().as_u16();
                    match response.text().await {
                        Ok(body) => {
                            return FetchOutcome {
                                status: Some(status),
                                body: Some(body),
                            };
                        }
                        Err(e) => {
                            // A body that cannot be read counts as an
                            // attempt failure, same as a transport error
                            tracing::debug!(url, attempt, error = %e, "body read failed");
                        }
                    }
                }
                Err(e) => {
                    tracing::debug!(url, attempt, error = %e, "probe attempt failed");
                }
            }
        }

        FetchOutcome::failed()
    }
}
