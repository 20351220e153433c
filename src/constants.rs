// src/constants.rs
//! Domain constants that define the operational boundaries of the client.
//!
//! Each constant is named for the domain concept it constrains. Reading
//! these constants should tell you where the client talks to, how long it
//! waits, and how often it tries again.

// ---------------------------------------------------------------------------
// Leafpad API boundaries
// ---------------------------------------------------------------------------

/// Origin of the public Leafpad API.
pub const DEFAULT_BASE_URL: &str = "https://leafpad.io";

/// Path prefix of the public post endpoints, appended to the base URL.
pub const DEFAULT_API_PATH: &str = "/api/public/v1/post";

/// How many items one page of results holds when the caller does not say.
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Upper bound of items a consumer should pull before filtering locally.
///
/// Informational: the client carries it but never enforces it.
pub const MAX_POSTS_FOR_FILTERING: u32 = 50;

/// First page of a listing. Pages are 1-based.
pub const FIRST_PAGE: u32 = 1;

// ---------------------------------------------------------------------------
// Request boundaries
// ---------------------------------------------------------------------------

/// Overall time budget of one logical request, retries and waits included.
pub const DEFAULT_TIMEOUT_MS: u64 = 10_000;

/// How many attempts one logical request gets before giving up.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;

/// Unit of the exponential backoff: attempt `n` waits `base * 2^n`.
pub const DEFAULT_BACKOFF_BASE_MS: u64 = 1_000;

// ---------------------------------------------------------------------------
// Consumer hints (carried, not enforced)
// ---------------------------------------------------------------------------

/// Revalidation interval for cached listings, in seconds.
pub const CACHE_REVALIDATE_SECS: u64 = 300;

/// Revalidation interval for statically generated route params, in seconds.
pub const STATIC_PARAMS_REVALIDATE_SECS: u64 = 3_600;

/// Reading speed used by presentation layers to estimate read time.
pub const WORDS_PER_MINUTE: u32 = 200;

/// Route prefix of documentation pages built from the item tree.
pub const DEFAULT_DOCS_PATH_PREFIX: &str = "/docs";

// ---------------------------------------------------------------------------
// Error display
// ---------------------------------------------------------------------------

/// Maximum characters of a response body kept in error messages.
pub const ERROR_BODY_PREVIEW_LENGTH: usize = 200;
