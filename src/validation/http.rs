//! HTTP collaborator used by the prober.
//!
//! [`HttpClient`] is the seam between probing logic and the network. The
//! production implementation, [`ReqwestClient`], keeps one connection pool per
//! TLS verification mode and performs the per-request retries asked for in
//! [`HttpRequest::retry_limit`].

use async_trait::async_trait;
use log::debug;
use reqwest::Url;
use reqwest::header::HeaderMap;
use reqwest::redirect::Policy;
use std::fmt;
use tokio::time::{Duration, sleep};

use crate::core::constants::{defaults, http_status, timeouts};
use crate::core::error::{HttpError, LivenessError, Result};
use crate::validation::url_filter::is_relative_url;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Head,
    Get,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Method::Head => f.write_str("HEAD"),
            Method::Get => f.write_str("GET"),
        }
    }
}

/// A single request as issued by the prober.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: Method,
    /// URL exactly as supplied by the caller; may be relative
    pub url: String,
    /// Base URL relative URLs are resolved against
    pub base_url: Option<String>,
    pub headers: HeaderMap,
    pub timeout: Duration,
    pub reject_unauthorized_tls: bool,
    /// Extra attempts the client may make on retriable failures
    pub retry_limit: u32,
}

#[async_trait]
pub trait HttpClient: Send + Sync {
    /// Issue `request`, returning the status code of a 2xx response.
    ///
    /// A non-2xx response is reported as [`HttpError::Status`]; anything that
    /// prevents a response from arriving is a transport-level error.
    async fn send(&self, request: HttpRequest) -> std::result::Result<u16, HttpError>;
}

/// Builder for [`ReqwestClient`].
#[derive(Debug, Clone)]
pub struct ReqwestClientBuilder {
    proxy: Option<String>,
    max_redirects: usize,
    retry_backoff: Duration,
    pool_max_idle_per_host: usize,
}

impl Default for ReqwestClientBuilder {
    fn default() -> Self {
        Self {
            proxy: None,
            max_redirects: defaults::MAX_REDIRECTS,
            retry_backoff: Duration::from_millis(timeouts::DEFAULT_RETRY_DELAY_MS),
            pool_max_idle_per_host: defaults::CONCURRENCY,
        }
    }
}

impl ReqwestClientBuilder {
    /// Route every request through this HTTP/HTTPS proxy.
    pub fn proxy(mut self, proxy: impl Into<String>) -> Self {
        self.proxy = Some(proxy.into());
        self
    }

    pub fn max_redirects(mut self, max_redirects: usize) -> Self {
        self.max_redirects = max_redirects;
        self
    }

    /// Delay before the first client-level retry; doubled after each one.
    pub fn retry_backoff(mut self, retry_backoff: Duration) -> Self {
        self.retry_backoff = retry_backoff;
        self
    }

    pub fn pool_max_idle_per_host(mut self, idle: usize) -> Self {
        self.pool_max_idle_per_host = idle;
        self
    }

    pub fn build(self) -> Result<ReqwestClient> {
        let proxy = match self.proxy {
            Some(ref url) => Some(reqwest::Proxy::all(url).map_err(|e| {
                LivenessError::Config(format!("Invalid proxy URL '{url}': {e}"))
            })?),
            None => None,
        };

        let build = |accept_invalid_certs: bool| -> Result<reqwest::Client> {
            let mut builder = reqwest::Client::builder()
                .redirect(Policy::limited(self.max_redirects))
                .pool_max_idle_per_host(self.pool_max_idle_per_host)
                .pool_idle_timeout(Duration::from_secs(30))
                .tcp_keepalive(Duration::from_secs(60))
                .danger_accept_invalid_certs(accept_invalid_certs);

            if let Some(ref proxy) = proxy {
                builder = builder.proxy(proxy.clone());
            }

            Ok(builder.build()?)
        };

        Ok(ReqwestClient {
            verified: build(false)?,
            unverified: build(true)?,
            retry_backoff: self.retry_backoff,
        })
    }
}

/// [`HttpClient`] backed by `reqwest`.
#[derive(Debug, Clone)]
pub struct ReqwestClient {
    verified: reqwest::Client,
    unverified: reqwest::Client,
    retry_backoff: Duration,
}

impl ReqwestClient {
    pub fn new() -> Result<Self> {
        Self::builder().build()
    }

    pub fn builder() -> ReqwestClientBuilder {
        ReqwestClientBuilder::default()
    }

    fn client_for(&self, request: &HttpRequest) -> &reqwest::Client {
        if request.reject_unauthorized_tls {
            &self.verified
        } else {
            &self.unverified
        }
    }

    async fn send_once(
        &self,
        request: &HttpRequest,
        target: &Url,
    ) -> std::result::Result<u16, HttpError> {
        let client = self.client_for(request);
        let builder = match request.method {
            Method::Head => client.head(target.clone()),
            Method::Get => client.get(target.clone()),
        };

        match builder
            .headers(request.headers.clone())
            .timeout(request.timeout)
            .send()
            .await
        {
            Ok(response) if response.status().is_success() => Ok(response.status().as_u16()),
            Ok(response) => Err(HttpError::Status(response.status().as_u16())),
            Err(err) => Err(classify_reqwest_error(&err)),
        }
    }
}

#[async_trait]
impl HttpClient for ReqwestClient {
    async fn send(&self, request: HttpRequest) -> std::result::Result<u16, HttpError> {
        let target = resolve_url(&request.url, request.base_url.as_deref())?;
        let mut attempt = 0;

        loop {
            let outcome = self.send_once(&request, &target).await;
            match outcome {
                Err(ref err) if attempt < request.retry_limit && is_retriable(err) => {
                    let delay = self.retry_backoff * 2u32.saturating_pow(attempt);
                    debug!(
                        "{} {} failed ({err}), retrying in {}ms",
                        request.method,
                        target,
                        delay.as_millis()
                    );
                    sleep(delay).await;
                    attempt += 1;
                }
                other => return other,
            }
        }
    }
}

/// Resolve `url` against `base_url` when it is relative.
pub fn resolve_url(url: &str, base_url: Option<&str>) -> std::result::Result<Url, HttpError> {
    let resolved = if is_relative_url(url) {
        let base = base_url.ok_or_else(|| {
            HttpError::Transport(format!("relative URL '{url}' without a base URL"))
        })?;
        Url::parse(base).and_then(|base| base.join(url))
    } else {
        Url::parse(url)
    };

    resolved.map_err(|e| HttpError::Transport(format!("cannot parse URL '{url}': {e}")))
}

fn is_retriable(err: &HttpError) -> bool {
    match err {
        HttpError::Status(code) => http_status::RETRIABLE.contains(code),
        HttpError::Timeout | HttpError::Transport(_) => true,
    }
}

fn classify_reqwest_error(err: &reqwest::Error) -> HttpError {
    if err.is_timeout() {
        return HttpError::Timeout;
    }

    let description = std::error::Error::source(err)
        .map(|e| e.to_string())
        .unwrap_or_else(|| err.to_string());
    HttpError::Transport(description)
}
