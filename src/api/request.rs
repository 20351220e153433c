// src/api/request.rs
//! Request construction: target URLs and query parameters.
//!
//! URLs have the shape
//! `{baseUrl}{apiPath}/{organizationSlug}[/{slug}]?{query}` and only carry
//! the parameters that differ from "no filter".

use crate::config::ClientConfig;
use crate::constants::FIRST_PAGE;
use crate::error::ConfigError;
use url::Url;

/// Options for a listing request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListOptions {
    /// 1-based page number.
    pub page: u32,
    /// Page size; `None` uses the configured default.
    pub limit: Option<u32>,
    /// Ask the API to include rendered HTML bodies.
    pub include_html: bool,
    /// Tag filter, sent comma-joined in this order.
    pub tags: Vec<String>,
    /// Free-text search, trimmed before use.
    pub search: String,
}

impl Default for ListOptions {
    fn default() -> Self {
        Self {
            page: FIRST_PAGE,
            limit: None,
            include_html: true,
            tags: Vec::new(),
            search: String::new(),
        }
    }
}

impl ListOptions {
    /// Selects a page. Page 0 is treated as the first page.
    pub fn page(mut self, page: u32) -> Self {
        self.page = page.max(FIRST_PAGE);
        self
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn include_html(mut self, include_html: bool) -> Self {
        self.include_html = include_html;
        self
    }

    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    pub fn tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags.extend(tags.into_iter().map(Into::into));
        self
    }

    pub fn search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }
}

/// Options for a single-item request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ItemOptions {
    pub include_html: bool,
}

impl Default for ItemOptions {
    fn default() -> Self {
        Self { include_html: true }
    }
}

/// Builds request URLs for one organization.
#[derive(Debug, Clone)]
pub struct RequestBuilder {
    /// `{baseUrl}{apiPath}`, parsed once
    endpoint: Url,
    organization_slug: String,
    default_limit: u32,
}

impl RequestBuilder {
    pub fn new(config: &ClientConfig) -> Result<Self, ConfigError> {
        let raw = format!("{}{}", config.base_url, config.api_path);
        let endpoint = Url::parse(&raw).map_err(|e| ConfigError::InvalidBaseUrl {
            url: raw.clone(),
            reason: e.to_string(),
        })?;

        if endpoint.cannot_be_a_base() {
            return Err(ConfigError::InvalidBaseUrl {
                url: raw,
                reason: "URL cannot carry path segments".to_string(),
            });
        }

        Ok(Self {
            endpoint,
            organization_slug: config.organization_slug.clone(),
            default_limit: config.default_limit,
        })
    }

    /// Query parameters of a listing, in wire order.
    pub fn list_query(&self, options: &ListOptions) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("page", options.page.max(FIRST_PAGE).to_string()),
            (
                "limit",
                options.limit.unwrap_or(self.default_limit).to_string(),
            ),
        ];

        if options.include_html {
            params.push(("html", "true".to_string()));
        }

        if !options.tags.is_empty() {
            params.push(("tags", options.tags.join(",")));
        }

        let search = options.search.trim();
        if !search.is_empty() {
            params.push(("search", search.to_string()));
        }

        params
    }

    /// Query parameters of a single-item request.
    pub fn item_query(&self, options: &ItemOptions) -> Vec<(&'static str, String)> {
        if options.include_html {
            vec![("html", "true".to_string())]
        } else {
            Vec::new()
        }
    }

    pub fn list_url(&self, options: &ListOptions) -> String {
        self.build_url(None, &self.list_query(options))
    }

    pub fn item_url(&self, slug: &str, options: &ItemOptions) -> String {
        self.build_url(Some(slug), &self.item_query(options))
    }

    /// Joins the organization (and slug) as path segments, then the query.
    fn build_url(&self, slug: Option<&str>, query: &[(&'static str, String)]) -> String {
        let mut url = self.endpoint.clone();

        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push(&self.organization_slug);
            if let Some(slug) = slug {
                segments.push(slug);
            }
        }

        if !query.is_empty() {
            url.query_pairs_mut()
                .extend_pairs(query.iter().map(|(key, value)| (*key, value.as_str())));
        }

        url.into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn builder() -> RequestBuilder {
        RequestBuilder::new(&ClientConfig::new("acme").unwrap()).unwrap()
    }

    #[test]
    fn default_listing_url() {
        assert_eq!(
            builder().list_url(&ListOptions::default()),
            "https://leafpad.io/api/public/v1/post/acme?page=1&limit=10&html=true"
        );
    }

    #[test]
    fn page_and_limit_are_always_present() {
        let builder = builder();
        for (page, limit) in [(1, 1), (2, 10), (7, 50), (4_294_967_295, 100)] {
            let query = builder.list_query(&ListOptions::default().page(page).limit(limit));
            assert!(query.contains(&("page", page.to_string())));
            assert!(query.contains(&("limit", limit.to_string())));
        }
    }

    #[test]
    fn page_zero_becomes_first_page() {
        let query = builder().list_query(&ListOptions::default().page(0));
        assert_eq!(query[0], ("page", "1".to_string()));
    }

    #[test]
    fn empty_tags_are_omitted() {
        let query = builder().list_query(&ListOptions::default().tags(Vec::<String>::new()));
        assert!(query.iter().all(|(key, _)| *key != "tags"));
    }

    #[test]
    fn tags_are_comma_joined_in_order() {
        let url = builder().list_url(
            &ListOptions::default()
                .include_html(false)
                .tags(["rust", "async"])
                .tag("http"),
        );
        assert_eq!(
            url,
            "https://leafpad.io/api/public/v1/post/acme?page=1&limit=10&tags=rust%2Casync%2Chttp"
        );
    }

    #[test]
    fn blank_search_is_omitted_and_search_is_trimmed() {
        let builder = builder();

        let blank = builder.list_query(&ListOptions::default().search("   \t"));
        assert!(blank.iter().all(|(key, _)| *key != "search"));

        let padded = builder.list_query(&ListOptions::default().search("  retry policy "));
        assert!(padded.contains(&("search", "retry policy".to_string())));

        let url = builder.list_url(
            &ListOptions::default()
                .include_html(false)
                .search("  retry policy "),
        );
        assert!(url.ends_with("&search=retry+policy"));
    }

    #[test]
    fn item_url_is_scoped_to_the_slug() {
        let builder = builder();
        assert_eq!(
            builder.item_url("getting-started", &ItemOptions::default()),
            "https://leafpad.io/api/public/v1/post/acme/getting-started?html=true"
        );
        assert_eq!(
            builder.item_url("getting-started", &ItemOptions { include_html: false }),
            "https://leafpad.io/api/public/v1/post/acme/getting-started"
        );
    }

    #[test]
    fn slug_is_encoded_as_one_segment() {
        let url = builder().item_url("a b/c", &ItemOptions { include_html: false });
        assert_eq!(url, "https://leafpad.io/api/public/v1/post/acme/a%20b%2Fc");
    }
}
