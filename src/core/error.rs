use std::fmt;

/// Error types for urlalive operations
///
/// Only configuration and structurally invalid input surface as errors.
/// Per-URL failures are folded into a [`LivenessResult`](crate::LivenessResult).
#[derive(Debug)]
pub enum LivenessError {
    /// IO error (reading input or config files)
    Io(std::io::Error),

    /// Configuration error
    Config(String),

    /// Structurally invalid input or options
    Validation(String),

    /// HTTP client construction error
    Http(reqwest::Error),

    /// TOML parsing error
    TomlParsing(toml::de::Error),

    /// JSON (de)serialization error
    Json(serde_json::Error),

    /// Invalid argument error
    InvalidArgument(String),
}

impl fmt::Display for LivenessError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LivenessError::Io(err) => write!(f, "IO error: {err}"),
            LivenessError::Config(msg) => write!(f, "Configuration error: {msg}"),
            LivenessError::Validation(msg) => write!(f, "Validation error: {msg}"),
            LivenessError::Http(err) => write!(f, "HTTP error: {err}"),
            LivenessError::TomlParsing(err) => write!(f, "TOML parsing error: {err}"),
            LivenessError::Json(err) => write!(f, "JSON error: {err}"),
            LivenessError::InvalidArgument(msg) => write!(f, "Invalid argument: {msg}"),
        }
    }
}

impl std::error::Error for LivenessError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LivenessError::Io(err) => Some(err),
            LivenessError::Http(err) => Some(err),
            LivenessError::TomlParsing(err) => Some(err),
            LivenessError::Json(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for LivenessError {
    fn from(err: std::io::Error) -> Self {
        LivenessError::Io(err)
    }
}

impl From<reqwest::Error> for LivenessError {
    fn from(err: reqwest::Error) -> Self {
        LivenessError::Http(err)
    }
}

impl From<toml::de::Error> for LivenessError {
    fn from(err: toml::de::Error) -> Self {
        LivenessError::TomlParsing(err)
    }
}

impl From<serde_json::Error> for LivenessError {
    fn from(err: serde_json::Error) -> Self {
        LivenessError::Json(err)
    }
}

/// Type alias for Results using LivenessError
pub type Result<T> = std::result::Result<T, LivenessError>;

/// Why a single probe did not end in an `alive` result.
///
/// These never escape the engine; they are converted into a
/// [`LivenessResult`](crate::LivenessResult) and kept around for logging.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeFailure {
    /// Malformed URL, disallowed protocol, or relative URL without a base
    InvalidUrl,
    /// No response was obtained (DNS, connect, TLS, timeout)
    Transport(String),
    /// A response with a non-2xx status was received
    HttpStatus(u16),
    /// Every attempt failed; carries the last observed status if any
    RetryExhausted { attempts: u32, last_status: Option<u16> },
}

impl fmt::Display for ProbeFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProbeFailure::InvalidUrl => write!(f, "invalid URL"),
            ProbeFailure::Transport(msg) => write!(f, "transport failure: {msg}"),
            ProbeFailure::HttpStatus(code) => write!(f, "HTTP status {code}"),
            ProbeFailure::RetryExhausted {
                attempts,
                last_status: Some(code),
            } => write!(f, "gave up after {attempts} attempt(s), last status {code}"),
            ProbeFailure::RetryExhausted {
                attempts,
                last_status: None,
            } => write!(f, "gave up after {attempts} attempt(s) without a response"),
        }
    }
}

/// Failure reported by an [`HttpClient`](crate::validation::HttpClient)
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HttpError {
    /// The server answered with a non-2xx status
    Status(u16),
    /// The request did not finish within its timeout
    Timeout,
    /// Any other failure before a response was obtained
    Transport(String),
}

impl HttpError {
    /// Status code of the response, when one was obtained
    pub fn status_code(&self) -> Option<u16> {
        match self {
            HttpError::Status(code) => Some(*code),
            _ => None,
        }
    }
}

impl fmt::Display for HttpError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HttpError::Status(code) => write!(f, "HTTP status {code}"),
            HttpError::Timeout => write!(f, "operation timed out"),
            HttpError::Transport(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for HttpError {}

impl From<HttpError> for ProbeFailure {
    fn from(err: HttpError) -> Self {
        match err {
            HttpError::Status(code) => ProbeFailure::HttpStatus(code),
            other => ProbeFailure::Transport(other.to_string()),
        }
    }
}
