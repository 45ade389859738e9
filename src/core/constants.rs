/// Application-wide constants to avoid magic values throughout the codebase.
///
/// This module centralizes the literal values used by the prober, the engine
/// and the configuration layer.
/// Output format constants
pub mod output_formats {
    /// Text output format - one line per URL
    pub const TEXT: &str = "text";
    /// JSON output format - an object keyed by URL
    pub const JSON: &str = "json";

    /// Default output format
    pub const DEFAULT: &str = TEXT;

    /// All valid output formats
    pub const ALL: [&str; 2] = [TEXT, JSON];
}

/// HTTP status code constants
pub mod http_status {
    /// HTTP 200 OK - successful response
    pub const OK: u16 = 200;
    /// HTTP 404 Not Found - resource not found
    pub const NOT_FOUND: u16 = 404;
    /// HTTP 405 Method Not Allowed - typical answer to HEAD on some servers
    pub const METHOD_NOT_ALLOWED: u16 = 405;
    /// HTTP 500 Internal Server Error - server error
    pub const INTERNAL_SERVER_ERROR: u16 = 500;
    /// Lowest and highest client error codes; a response in this range is
    /// definitive and never retried
    pub const CLIENT_ERROR_MIN: u16 = 400;
    pub const CLIENT_ERROR_MAX: u16 = 499;
    /// Statuses the HTTP client retries on its own when given a retry limit
    pub const RETRIABLE: [u16; 10] = [408, 413, 429, 500, 502, 503, 504, 521, 522, 524];

    /// Whether `code` is a 4xx client error
    pub fn is_client_error(code: u16) -> bool {
        (CLIENT_ERROR_MIN..=CLIENT_ERROR_MAX).contains(&code)
    }
}

/// Timeout and duration constants
pub mod timeouts {
    /// Default per-request timeout in seconds
    pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;
    /// Maximum reasonable timeout in seconds (1 hour)
    pub const MAX_TIMEOUT_SECONDS: u64 = 3600;
    /// Default base delay between engine retries in milliseconds
    pub const DEFAULT_RETRY_DELAY_MS: u64 = 1000;
    /// Multiplier applied to the retry delay after every failed attempt
    pub const BACKOFF_FACTOR: u32 = 2;
    /// How long a memoized probe outcome stays fresh
    pub const MEMO_TTL_SECONDS: u64 = 60;
}

/// Default configuration values
pub mod defaults {
    /// Default number of simultaneously running probes
    pub const CONCURRENCY: usize = 8;
    /// Default number of engine-level retries after the first attempt
    pub const RETRIES: u32 = 2;
    /// Default per-request retry limit handed to the HTTP client for GET
    pub const REQUEST_RETRY_LIMIT: u32 = 0;
    /// Protocols accepted when none are configured
    pub const PROTOCOLS: [&str; 2] = ["http:", "https:"];
    /// Maximum number of redirects followed by the HTTP client
    pub const MAX_REDIRECTS: usize = 10;
    /// Config file looked up in the working directory and its parents
    pub const CONFIG_FILE_NAME: &str = ".urlalive.toml";
}

/// Default request headers sent with every probe
pub mod headers {
    /// User agent of a common desktop browser
    pub const USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_13_6) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/67.0.3396.99 Safari/537.36";

    /// Name/value pairs in the order they are applied
    pub const DEFAULTS: [(&str, &str); 7] = [
        ("user-agent", USER_AGENT),
        ("upgrade-insecure-requests", "1"),
        ("connection", "keep-alive"),
        (
            "accept",
            "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,image/apng,*/*;q=0.8",
        ),
        ("accept-encoding", "gzip, deflate, br"),
        ("cache-control", "max-age=0"),
        ("accept-language", "en-US,en;q=0.9"),
    ];
}

/// Validation limits for configuration values
pub mod limits {
    /// Maximum concurrency accepted by the configuration layer
    pub const MAX_CONCURRENCY: usize = 1000;
    /// Maximum engine retries accepted by the configuration layer
    pub const MAX_RETRIES: u32 = 20;
}
