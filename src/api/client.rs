// src/api/client.rs
//! Default capabilities backed by reqwest and the tokio clock.
//!
//! The transport is a thin wrapper around a reqwest `Client`: it performs
//! the round-trip and reads the body, without retries or parsing.

use super::{Timer, Transport, TransportResponse};
use crate::error::{ConfigError, TransportError};
use reqwest::{header::HeaderMap, Client};
use std::time::Duration;

/// A thin wrapper around reqwest Client for Leafpad API requests.
#[derive(Clone, Debug)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    pub fn new() -> Result<Self, ConfigError> {
        let client = Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client })
    }

    /// Wraps an already configured client (proxies, TLS roots, ...).
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait::async_trait]
impl Transport for ReqwestTransport {
    /// Makes a GET request and reads the body.
    ///
    /// A body that cannot be read is fatal for a 2xx response and swallowed
    /// (empty body) for any other status.
    async fn get(
        &self,
        url: &str,
        headers: &HeaderMap,
    ) -> Result<TransportResponse, TransportError> {
        log::debug!("GET {}", url);

        let response = self.client.get(url).headers(headers.clone()).send().await?;
        let status = response.status();

        log::debug!("Response from {} (status: {})", url, status);

        let body = match response.text().await {
            Ok(body) => body,
            Err(e) if status.is_success() => return Err(TransportError::Body(e.to_string())),
            Err(e) => {
                log::debug!("Ignoring unreadable error body from {}: {}", url, e);
                String::new()
            }
        };

        Ok(TransportResponse::new(status.as_u16(), body))
    }
}

/// Waits on the tokio clock.
#[derive(Clone, Copy, Debug, Default)]
pub struct TokioTimer;

#[async_trait::async_trait]
impl Timer for TokioTimer {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}
