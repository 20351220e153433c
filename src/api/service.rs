// src/api/service.rs
//! Public content operations for one organization.
//!
//! Each operation builds a URL, runs it through the resilient fetcher and
//! validates the JSON it gets back. Errors pass through unchanged, except a
//! single-item 404 which becomes `Ok(None)`.

use super::client::{ReqwestTransport, TokioTimer};
use super::fetcher::{RequestOptions, ResilientFetcher};
use super::parser;
use super::request::{ItemOptions, ListOptions, RequestBuilder};
use super::{Timer, Transport};
use crate::config::{ClientConfig, ConfigOverrides};
use crate::doc_tree::build_tree;
use crate::error::{ClientError, ConfigError};
use crate::model::{DocsPage, Item, ItemPage};
use serde_json::Value;
use std::sync::Arc;

/// Retrieves items, single items and doc trees for one organization.
///
/// Cheap to clone; clones share the underlying HTTP connection pool.
#[derive(Clone, Debug)]
pub struct ContentService {
    config: Arc<ClientConfig>,
    requests: RequestBuilder,
    fetcher: ResilientFetcher,
}

impl ContentService {
    /// A service on the default reqwest transport and tokio clock.
    pub fn new(
        organization_slug: impl Into<String>,
        overrides: ConfigOverrides,
    ) -> Result<Self, ConfigError> {
        let config = ClientConfig::resolve(organization_slug, overrides)?;
        Self::with_capabilities(
            config,
            Arc::new(ReqwestTransport::new()?),
            Arc::new(TokioTimer),
        )
    }

    /// A service on caller-provided network and clock capabilities.
    pub fn with_capabilities(
        config: ClientConfig,
        transport: Arc<dyn Transport>,
        timer: Arc<dyn Timer>,
    ) -> Result<Self, ConfigError> {
        let requests = RequestBuilder::new(&config)?;
        let fetcher = ResilientFetcher::new(transport, timer, config.retry_policy());
        Ok(Self {
            config: Arc::new(config),
            requests,
            fetcher,
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Runs a raw GET through the retry/timeout policy.
    pub async fn execute(&self, url: &str, options: &RequestOptions) -> Result<Value, ClientError> {
        self.fetcher.execute(url, options).await
    }

    /// Fetches one page of items.
    pub async fn fetch_items(&self, options: &ListOptions) -> Result<ItemPage, ClientError> {
        let url = self.requests.list_url(options);
        log::debug!(
            "Fetching items for '{}' (page {})",
            self.config.organization_slug,
            options.page
        );
        let value = self.execute(&url, &RequestOptions::default()).await?;
        parser::parse_item_page(value)
    }

    /// Blog-flavoured name for [`ContentService::fetch_items`].
    pub async fn fetch_posts(&self, options: &ListOptions) -> Result<ItemPage, ClientError> {
        self.fetch_items(options).await
    }

    /// Fetches one item by slug; `Ok(None)` when the server answers 404.
    pub async fn fetch_one(
        &self,
        slug: &str,
        options: &ItemOptions,
    ) -> Result<Option<Item>, ClientError> {
        let url = self.requests.item_url(slug, options);
        match self.execute(&url, &RequestOptions::default()).await {
            Ok(value) => parser::parse_item(value).map(Some),
            Err(err) if err.is_not_found() => {
                log::debug!("Item '{}' not found", slug);
                Ok(None)
            }
            Err(err) => Err(err),
        }
    }

    /// Fetches one page of items and nests it into a navigation forest.
    pub async fn fetch_as_tree(&self, options: &ListOptions) -> Result<DocsPage, ClientError> {
        let page = self.fetch_items(options).await?;
        let tree = build_tree(&page.items, &self.config.docs_path_prefix)?;
        Ok(DocsPage {
            tree,
            pagination: page.pagination,
            organization: page.organization,
        })
    }
}
