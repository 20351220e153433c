// src/config.rs
//! Client configuration: static defaults merged with caller overrides.
//!
//! Overrides always win over the defaults. Validation happens once, in
//! [`ClientConfig::resolve`], so every other component can trust the values.

use crate::constants::*;
use crate::error::ConfigError;
use crate::error_recovery::RetryPolicy;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use url::Url;

/// Optional per-client settings. Every field left `None` falls back to the
/// built-in default.
///
/// Deserializes from camelCase JSON, e.g. `{"baseUrl": "...", "timeout": 5000}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigOverrides {
    pub base_url: Option<String>,
    pub api_path: Option<String>,
    pub default_limit: Option<u32>,
    pub max_posts_for_filtering: Option<u32>,
    /// Seconds.
    pub cache_revalidate_interval: Option<u64>,
    /// Seconds.
    pub static_params_revalidate_interval: Option<u64>,
    pub words_per_minute: Option<u32>,
    /// Overall request timeout in milliseconds.
    pub timeout: Option<u64>,
    /// Attempts per logical request.
    pub retries: Option<u32>,
    /// Backoff unit in milliseconds.
    pub backoff_base_ms: Option<u64>,
    pub docs_path_prefix: Option<String>,
}

impl ConfigOverrides {
    /// Reads overrides from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::ConfigFile {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&raw).map_err(|source| ConfigError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Layers `self` on top of `lower`: any field set here wins.
    pub fn layered_over(self, lower: ConfigOverrides) -> ConfigOverrides {
        ConfigOverrides {
            base_url: self.base_url.or(lower.base_url),
            api_path: self.api_path.or(lower.api_path),
            default_limit: self.default_limit.or(lower.default_limit),
            max_posts_for_filtering: self
                .max_posts_for_filtering
                .or(lower.max_posts_for_filtering),
            cache_revalidate_interval: self
                .cache_revalidate_interval
                .or(lower.cache_revalidate_interval),
            static_params_revalidate_interval: self
                .static_params_revalidate_interval
                .or(lower.static_params_revalidate_interval),
            words_per_minute: self.words_per_minute.or(lower.words_per_minute),
            timeout: self.timeout.or(lower.timeout),
            retries: self.retries.or(lower.retries),
            backoff_base_ms: self.backoff_base_ms.or(lower.backoff_base_ms),
            docs_path_prefix: self.docs_path_prefix.or(lower.docs_path_prefix),
        }
    }
}

/// Resolved client configuration, validated and ready to drive requests.
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    pub organization_slug: String,
    /// Origin without a trailing slash.
    pub base_url: String,
    pub api_path: String,
    pub default_limit: u32,
    pub max_posts_for_filtering: u32,
    pub cache_revalidate_interval: Duration,
    pub static_params_revalidate_interval: Duration,
    pub words_per_minute: u32,
    pub timeout: Duration,
    pub max_attempts: u32,
    pub backoff_base: Duration,
    pub docs_path_prefix: String,
}

impl ClientConfig {
    /// Configuration with every default in place.
    pub fn new(organization_slug: impl Into<String>) -> Result<Self, ConfigError> {
        Self::resolve(organization_slug, ConfigOverrides::default())
    }

    /// Merges `overrides` over the defaults and validates the result.
    pub fn resolve(
        organization_slug: impl Into<String>,
        overrides: ConfigOverrides,
    ) -> Result<Self, ConfigError> {
        let organization_slug = organization_slug.into().trim().to_string();
        if organization_slug.is_empty() {
            return Err(ConfigError::EmptyOrganization);
        }

        let base_url = validate_base_url(
            overrides
                .base_url
                .as_deref()
                .unwrap_or(DEFAULT_BASE_URL),
        )?;

        let timeout_ms = overrides.timeout.unwrap_or(DEFAULT_TIMEOUT_MS);
        if timeout_ms == 0 {
            return Err(ConfigError::ZeroTimeout);
        }

        let max_attempts = overrides.retries.unwrap_or(DEFAULT_MAX_ATTEMPTS);
        if max_attempts == 0 {
            return Err(ConfigError::ZeroAttempts);
        }

        let config = ClientConfig {
            organization_slug,
            base_url,
            api_path: overrides
                .api_path
                .map(|path| path.trim_end_matches('/').to_string())
                .unwrap_or_else(|| DEFAULT_API_PATH.to_string()),
            default_limit: overrides.default_limit.unwrap_or(DEFAULT_PAGE_SIZE),
            max_posts_for_filtering: overrides
                .max_posts_for_filtering
                .unwrap_or(MAX_POSTS_FOR_FILTERING),
            cache_revalidate_interval: Duration::from_secs(
                overrides
                    .cache_revalidate_interval
                    .unwrap_or(CACHE_REVALIDATE_SECS),
            ),
            static_params_revalidate_interval: Duration::from_secs(
                overrides
                    .static_params_revalidate_interval
                    .unwrap_or(STATIC_PARAMS_REVALIDATE_SECS),
            ),
            words_per_minute: overrides.words_per_minute.unwrap_or(WORDS_PER_MINUTE),
            timeout: Duration::from_millis(timeout_ms),
            max_attempts,
            backoff_base: Duration::from_millis(
                overrides.backoff_base_ms.unwrap_or(DEFAULT_BACKOFF_BASE_MS),
            ),
            docs_path_prefix: overrides
                .docs_path_prefix
                .map(|prefix| prefix.trim_end_matches('/').to_string())
                .unwrap_or_else(|| DEFAULT_DOCS_PATH_PREFIX.to_string()),
        };

        log::debug!(
            "Resolved config for '{}': {}{} (timeout {:?}, {} attempts)",
            config.organization_slug,
            config.base_url,
            config.api_path,
            config.timeout,
            config.max_attempts
        );

        Ok(config)
    }

    /// The retry/timeout policy the fetcher runs under.
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy {
            max_attempts: self.max_attempts,
            timeout: self.timeout,
            backoff_base: self.backoff_base,
        }
    }
}

/// Accepts absolute http(s) URLs and strips trailing slashes.
fn validate_base_url(raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim().trim_end_matches('/');
    let parsed = Url::parse(trimmed).map_err(|e| ConfigError::InvalidBaseUrl {
        url: raw.to_string(),
        reason: e.to_string(),
    })?;

    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(ConfigError::InvalidBaseUrl {
            url: raw.to_string(),
            reason: format!("unsupported scheme '{}'", parsed.scheme()),
        });
    }

    Ok(trimmed.to_string())
}
