// src/api/parser.rs
//! Validation of untyped API responses into the domain model.
//!
//! The fetcher hands back whatever JSON the server sent. Nothing reaches
//! callers until it has been checked against the expected shape here.

use crate::error::ClientError;
use crate::model::{Item, ItemPage};
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Parse a listing response (`posts`/`items` + `pagination` + `organization`).
pub fn parse_item_page(value: Value) -> Result<ItemPage, ClientError> {
    parse_response(value, "item listing")
}

/// Parse a bare item response.
pub fn parse_item(value: Value) -> Result<Item, ClientError> {
    parse_response(value, "item")
}

fn parse_response<T>(value: Value, expected: &str) -> Result<T, ClientError>
where
    T: DeserializeOwned,
{
    serde_json::from_value(value).map_err(|e| {
        log::error!("Response did not match the {} shape: {}", expected, e);
        ClientError::invalid_response(format!("expected {}: {}", expected, e))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use serde_json::json;

    fn item_json(id: u64) -> Value {
        json!({
            "id": id,
            "name": "Getting started",
            "slug": "getting-started",
            "createdAt": "2024-05-01T10:00:00.000Z",
            "updatedAt": "2024-05-02T08:30:00Z",
            "published": true,
            "parentId": null,
            "hasChildren": false,
            "seo": { "title": "Start here", "keywords": ["intro"] },
            "tags": [{ "id": 1, "name": "guide" }],
            "organization": { "id": "org_1", "name": "Acme", "slug": "acme" },
            "createdByUser": { "name": "Ada" },
            "htmlContent": "<p>Hello</p>"
        })
    }

    #[test]
    fn parses_a_full_item() {
        let item = parse_item(item_json(42)).unwrap();
        assert_eq!(item.id, 42);
        assert_eq!(item.slug, "getting-started");
        assert_eq!(item.parent_id, None);
        assert_eq!(item.tag_names().collect::<Vec<_>>(), vec!["guide"]);
        assert_eq!(item.seo.unwrap().title.as_deref(), Some("Start here"));
        assert_eq!(item.created_by_user.image, None);
        assert_eq!(item.html_content.as_deref(), Some("<p>Hello</p>"));
    }

    #[test]
    fn optional_fields_may_be_absent() {
        let mut raw = item_json(1);
        let object = raw.as_object_mut().unwrap();
        object.remove("seo");
        object.remove("tags");
        object.remove("hasChildren");
        object.remove("htmlContent");
        object.remove("parentId");

        let item = parse_item(raw).unwrap();
        assert!(item.tags.is_empty());
        assert!(!item.has_children);
        assert!(item.seo.is_none());
    }

    #[test]
    fn listing_accepts_posts_or_items() {
        let envelope = |key: &str| {
            json!({
                key: [item_json(1), item_json(2)],
                "pagination": {
                    "page": 1, "limit": 10, "totalCount": 2,
                    "totalPages": 1, "hasNext": false, "hasPrev": false
                },
                "organization": { "id": "org_1", "name": "Acme", "slug": "acme" }
            })
        };

        assert_eq!(parse_item_page(envelope("posts")).unwrap().items.len(), 2);
        assert_eq!(parse_item_page(envelope("items")).unwrap().items.len(), 2);
    }

    #[test]
    fn shape_mismatch_is_an_invalid_response() {
        let err = parse_item(json!({ "id": "not-a-number" })).unwrap_err();
        assert_eq!(err.code(), ErrorCode::InvalidResponse);
        assert_eq!(err.status(), None);
        assert!(err.message().starts_with("Malformed response: expected item"));
    }
}
