// src/model/mod.rs
//! Domain model for Leafpad content.
//!
//! Everything here is read-only data owned by the remote API, plus the
//! client-side document tree derived from it.

mod common;
mod docs;
mod item;

pub use common::{Author, Organization, Pagination, Seo, Tag};
pub use docs::{DocTreeNode, DocsPage};
pub use item::{Item, ItemPage};
