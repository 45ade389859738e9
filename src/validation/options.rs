//! Explicit option structures for the prober and the engine.

use std::collections::{BTreeMap, BTreeSet};
use std::time::Duration;

use crate::core::constants::{defaults, timeouts};
use crate::core::error::{LivenessError, Result};

/// The protocols accepted when nothing else is configured.
pub fn default_protocols() -> BTreeSet<String> {
    defaults::PROTOCOLS.iter().map(|p| p.to_string()).collect()
}

/// Per-probe request options.
///
/// Caller `headers` are merged over the default browser-like header set:
/// a caller header replaces the default of the same (case-insensitive) name
/// and leaves every other default in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeOptions {
    /// Base URL used to resolve relative URLs
    pub base_url: Option<String>,
    /// Extra or overriding request headers
    pub headers: BTreeMap<String, String>,
    /// Timeout of a single HTTP request
    pub timeout: Duration,
    /// Verify TLS certificates. Turning this off accepts self-signed and
    /// otherwise invalid certificates.
    pub reject_unauthorized_tls: bool,
    /// Retries the HTTP client may perform for the GET fallback
    pub retry_limit: u32,
    /// Protocols (`"https:"` form) a URL may use
    pub protocols: BTreeSet<String>,
}

impl Default for ProbeOptions {
    fn default() -> Self {
        Self {
            base_url: None,
            headers: BTreeMap::new(),
            timeout: Duration::from_secs(timeouts::DEFAULT_TIMEOUT_SECONDS),
            reject_unauthorized_tls: true,
            retry_limit: defaults::REQUEST_RETRY_LIMIT,
            protocols: default_protocols(),
        }
    }
}

impl ProbeOptions {
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_retry_limit(mut self, retry_limit: u32) -> Self {
        self.retry_limit = retry_limit;
        self
    }
}

/// Batch-level options for [`LivenessEngine::check_links`](super::LivenessEngine::check_links).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineOptions {
    /// Base URL used to resolve relative URLs
    pub base_url: Option<String>,
    /// Maximum number of probes in flight at once
    pub concurrency: usize,
    /// Retries after the first attempt of a probe
    pub retries: u32,
    /// Protocols (`"https:"` form) a URL may use
    pub protocols: BTreeSet<String>,
    /// Delay before the first retry; doubled after each further attempt
    pub retry_delay: Duration,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            base_url: None,
            concurrency: defaults::CONCURRENCY,
            retries: defaults::RETRIES,
            protocols: default_protocols(),
            retry_delay: Duration::from_millis(timeouts::DEFAULT_RETRY_DELAY_MS),
        }
    }
}

impl EngineOptions {
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency;
        self
    }

    pub fn with_retries(mut self, retries: u32) -> Self {
        self.retries = retries;
        self
    }

    pub fn with_protocols<I, S>(mut self, protocols: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.protocols = protocols.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_retry_delay(mut self, retry_delay: Duration) -> Self {
        self.retry_delay = retry_delay;
        self
    }

    /// Reject options that cannot drive a batch.
    pub fn validate(&self) -> Result<()> {
        if self.concurrency == 0 {
            return Err(LivenessError::Validation(
                "Concurrency cannot be 0. Expected a positive integer.".to_string(),
            ));
        }

        if let Some(protocol) = self.protocols.iter().find(|p| !p.ends_with(':')) {
            return Err(LivenessError::Validation(format!(
                "Protocol '{protocol}' must end with ':' (e.g. \"https:\")."
            )));
        }

        Ok(())
    }

    /// Base URL, treating an empty string as absent.
    pub fn base_url(&self) -> Option<&str> {
        self.base_url.as_deref().filter(|base| !base.is_empty())
    }
}
