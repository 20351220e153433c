// src/api/fetcher.rs
//! Resilient GET execution: one overall deadline, bounded attempts,
//! exponential backoff and failure classification.
//!
//! Failure classes:
//! - status < 500: terminal, returned as is
//! - deadline elapsed before any response: terminal `TIMEOUT`
//! - 5xx, network failure, unparsable body: retried until attempts run out,
//!   then `MAX_RETRIES_EXCEEDED`

use super::{Timer, Transport, TransportResponse};
use crate::error::ClientError;
use crate::error_recovery::RetryPolicy;
use reqwest::header::{self, HeaderMap, HeaderValue};
use serde_json::Value;
use std::sync::Arc;

/// Per-call request options.
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    /// Extra headers; they win over the default `Content-Type`.
    pub headers: HeaderMap,
}

impl RequestOptions {
    pub fn with_header(mut self, name: header::HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    /// Default headers overlaid with the caller's.
    fn merged_headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/json"),
        );
        for (name, value) in &self.headers {
            headers.insert(name.clone(), value.clone());
        }
        headers
    }
}

/// What went wrong in one attempt, already classified.
#[derive(Debug)]
enum AttemptFailure {
    /// Retrying cannot help; hand the error to the caller.
    Terminal(ClientError),
    /// Worth another attempt; the message feeds the final error.
    Retryable(String),
}

/// Executes GET requests under a [`RetryPolicy`].
#[derive(Clone)]
pub struct ResilientFetcher {
    transport: Arc<dyn Transport>,
    timer: Arc<dyn Timer>,
    policy: RetryPolicy,
}

impl ResilientFetcher {
    pub fn new(transport: Arc<dyn Transport>, timer: Arc<dyn Timer>, policy: RetryPolicy) -> Self {
        Self {
            transport,
            timer,
            policy,
        }
    }

    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    /// Fetches `url` and returns its body as untyped JSON.
    ///
    /// The deadline is armed once, before the first attempt, and bounds the
    /// network round-trips only. It is disarmed as soon as any response
    /// arrives, so backoff waits after a 5xx never end in `TIMEOUT`.
    pub async fn execute(&self, url: &str, options: &RequestOptions) -> Result<Value, ClientError> {
        let headers = options.merged_headers();
        let max_attempts = self.policy.max_attempts.max(1);
        let mut deadline = Some(self.timer.deadline(self.policy.timeout));
        let mut last_failure = String::from("Unknown error");

        for attempt in 1..=max_attempts {
            log::debug!("Fetch attempt {}/{} for {}", attempt, max_attempts, url);

            let received = match deadline.as_mut() {
                Some(timer) => tokio::select! {
                    biased;
                    received = self.transport.get(url, &headers) => received,
                    _ = timer => return Err(self.timed_out(url, attempt)),
                },
                None => self.transport.get(url, &headers).await,
            };

            let outcome = match received {
                Ok(response) => {
                    if deadline.take().is_some() {
                        log::debug!("Response received from {}, deadline disarmed", url);
                    }
                    classify(response)
                }
                Err(e) => Err(AttemptFailure::Retryable(e.to_string())),
            };

            match outcome {
                Ok(value) => return Ok(value),
                Err(AttemptFailure::Terminal(err)) => {
                    log::debug!("Attempt {} for {} failed terminally: {}", attempt, url, err);
                    return Err(err);
                }
                Err(AttemptFailure::Retryable(message)) => last_failure = message,
            }

            if self.policy.has_attempts_after(attempt) {
                let delay = self.policy.backoff_delay(attempt);
                log::warn!(
                    "Attempt {} for {} failed ({}), retrying after {:?}",
                    attempt,
                    url,
                    last_failure,
                    delay
                );
                self.timer.sleep(delay).await;
            }
        }

        log::warn!(
            "Giving up on {} after {} attempts: {}",
            url,
            max_attempts,
            last_failure
        );
        Err(ClientError::max_retries_exceeded(max_attempts, &last_failure))
    }

    fn timed_out(&self, url: &str, attempt: u32) -> ClientError {
        log::warn!(
            "Request to {} timed out after {:?} (attempt {})",
            url,
            self.policy.timeout,
            attempt
        );
        ClientError::timeout()
    }
}

/// Sorts a received response into success, terminal or retryable.
fn classify(response: TransportResponse) -> Result<Value, AttemptFailure> {
    if !response.is_success() {
        let err = ClientError::http(response.status, &response.reason, &response.body);
        return Err(if err.is_retryable() {
            AttemptFailure::Retryable(err.to_string())
        } else {
            AttemptFailure::Terminal(err)
        });
    }

    serde_json::from_str(&response.body)
        .map_err(|e| AttemptFailure::Retryable(format!("Invalid JSON body: {}", e)))
}

impl std::fmt::Debug for ResilientFetcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResilientFetcher")
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}
