// src/model/item.rs
use super::{Author, Organization, Pagination, Seo, Tag};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A content unit: a blog post or a documentation page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub id: u64,
    pub name: String,
    pub slug: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub published: bool,
    /// Parent page, for documentation hierarchies.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<u64>,
    #[serde(default)]
    pub has_children: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seo: Option<Seo>,
    #[serde(default)]
    pub tags: Vec<Tag>,
    pub organization: Organization,
    pub created_by_user: Author,
    /// Structured editor content, kept as raw JSON.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<serde_json::Value>,
    /// Rendered body, present when HTML was requested.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub html_content: Option<String>,
}

impl Item {
    /// Tag names in the order the API returned them.
    pub fn tag_names(&self) -> impl Iterator<Item = &str> {
        self.tags.iter().map(|tag| tag.name.as_str())
    }
}

/// One page of a listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemPage {
    #[serde(rename = "posts", alias = "items")]
    pub items: Vec<Item>,
    pub pagination: Pagination,
    pub organization: Organization,
}
