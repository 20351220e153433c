// src/lib.rs
//! leafpad library: retrieves blog posts and documentation pages from the
//! Leafpad public API.
//!
//! # Public API
//!
//! The library exposes types organized by concern:
//! - **Error handling**: `ClientError`, `ErrorCode`, `ConfigError`, `TreeError`
//! - **Configuration**: `ClientConfig`, `ConfigOverrides`, `RetryPolicy`
//! - **Domain model**: `Item`, `ItemPage`, `Pagination`, `Organization`, ...
//! - **API client**: `ContentService`, `ResilientFetcher`, `Transport`, `Timer`
//! - **Doc trees**: `build_tree`, `DocTreeNode`, `DocsPage`
//!
//! ```no_run
//! use leafpad::{ConfigOverrides, ContentService, ItemOptions, ListOptions};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let service = ContentService::new("acme", ConfigOverrides::default())?;
//!
//! let page = service.fetch_items(&ListOptions::default().tag("rust")).await?;
//! println!("{} of {} posts", page.items.len(), page.pagination.total_count);
//!
//! if let Some(post) = service.fetch_one("hello-world", &ItemOptions::default()).await? {
//!     println!("{}", post.name);
//! }
//!
//! let docs = service.fetch_as_tree(&ListOptions::default().limit(50)).await?;
//! for node in &docs.tree {
//!     println!("{} -> {}", node.label, node.path);
//! }
//! # Ok(())
//! # }
//! ```

pub mod api;
mod config;
mod constants;
mod doc_tree;
mod error;
mod error_recovery;
mod model;

// --- Error Handling ---
pub use crate::error::{ClientError, ConfigError, ErrorCode, TransportError, TreeError};

// --- Configuration ---
pub use crate::config::{ClientConfig, ConfigOverrides};
pub use crate::error_recovery::RetryPolicy;

// --- Domain Model ---
pub use crate::model::{
    Author, DocTreeNode, DocsPage, Item, ItemPage, Organization, Pagination, Seo, Tag,
};

// --- API Client ---
pub use crate::api::{
    parser::{parse_item, parse_item_page},
    request::RequestBuilder,
    ContentService, ItemOptions, ListOptions, ReqwestTransport, RequestOptions,
    ResilientFetcher, Timer, TokioTimer, Transport, TransportResponse,
};

// --- Doc Trees ---
pub use crate::doc_tree::build_tree;
