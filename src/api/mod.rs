// src/api/mod.rs
//! Leafpad API interaction: the ability to retrieve content for an organization.
//!
//! The network and the clock are capabilities handed to the fetcher, so the
//! retry and timeout policy can run against scripted fakes in tests.

pub mod client;
pub mod fetcher;
pub mod parser;
pub mod request;
pub mod service;

use crate::error::TransportError;
use reqwest::header::HeaderMap;
use std::time::Duration;

/// A received HTTP response, body already read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    pub status: u16,
    /// Canonical reason phrase for the status, empty when unknown.
    pub reason: String,
    pub body: String,
}

impl TransportResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        let reason = reqwest::StatusCode::from_u16(status)
            .ok()
            .and_then(|code| code.canonical_reason())
            .unwrap_or_default()
            .to_string();
        Self {
            status,
            reason,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// The ability to perform one HTTP GET round-trip.
///
/// Implementations report non-2xx statuses as ordinary responses; only
/// failures to get a response at all are errors.
#[async_trait::async_trait]
pub trait Transport: Send + Sync {
    async fn get(&self, url: &str, headers: &HeaderMap)
        -> Result<TransportResponse, TransportError>;
}

/// The ability to wait. Dropping the returned future cancels the wait.
#[async_trait::async_trait]
pub trait Timer: Send + Sync {
    /// A backoff wait between attempts.
    async fn sleep(&self, duration: Duration);

    /// The request deadline. Armed once per call; a plain sleep by default.
    async fn deadline(&self, duration: Duration) {
        self.sleep(duration).await
    }
}

// Re-export the public interface
pub use client::{ReqwestTransport, TokioTimer};
pub use fetcher::{RequestOptions, ResilientFetcher};
pub use request::{ItemOptions, ListOptions};
pub use service::ContentService;
