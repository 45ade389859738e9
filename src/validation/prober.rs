use log::{debug, warn};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use std::sync::Arc;

use crate::core::constants::headers;
use crate::core::error::{HttpError, ProbeFailure};
use crate::core::types::LivenessResult;
use crate::validation::http::{HttpClient, HttpRequest, Method};
use crate::validation::options::ProbeOptions;
use crate::validation::url_filter::{DefaultUrlValidator, UrlValidator};

/// Checks a single URL: HEAD first, GET when HEAD fails.
///
/// The prober holds no per-call state, so one instance can serve any number of
/// concurrent probes.
#[derive(Clone)]
pub struct LinkProber {
    client: Arc<dyn HttpClient>,
    validator: Arc<dyn UrlValidator>,
}

impl LinkProber {
    pub fn new(client: Arc<dyn HttpClient>) -> Self {
        Self::with_validator(client, Arc::new(DefaultUrlValidator))
    }

    pub fn with_validator(client: Arc<dyn HttpClient>, validator: Arc<dyn UrlValidator>) -> Self {
        Self { client, validator }
    }

    pub fn validator(&self) -> &Arc<dyn UrlValidator> {
        &self.validator
    }

    /// Probe `url`. Never fails: every failure is encoded in the result.
    pub async fn probe(&self, url: &str, options: &ProbeOptions) -> LivenessResult {
        match self.try_probe(url, options).await {
            Ok(status_code) => LivenessResult::alive(status_code),
            Err(ProbeFailure::InvalidUrl) => LivenessResult::invalid(),
            Err(ProbeFailure::HttpStatus(code)) => LivenessResult::dead(Some(code)),
            // No response at all
            Err(failure) => LivenessResult::dead(None).with_description(failure.to_string()),
        }
    }

    async fn try_probe(&self, url: &str, options: &ProbeOptions) -> Result<u16, ProbeFailure> {
        let headers = merge_headers(&options.headers);

        if !self
            .validator
            .is_valid(url, options.base_url.as_deref(), &options.protocols)
        {
            debug!("{url} is not a valid URL, skipping");
            return Err(ProbeFailure::InvalidUrl);
        }

        // HEAD never retries; a failing HEAD goes straight to GET
        let head = self.request(Method::Head, url, headers.clone(), options, 0);
        match self.client.send(head).await {
            Ok(status_code) => return Ok(status_code),
            Err(err) => debug!("HEAD {url} failed ({err}), falling back to GET"),
        }

        let get = self.request(Method::Get, url, headers, options, options.retry_limit);
        self.client.send(get).await.map_err(|err: HttpError| {
            debug!("GET {url} failed ({err})");
            ProbeFailure::from(err)
        })
    }

    fn request(
        &self,
        method: Method,
        url: &str,
        headers: HeaderMap,
        options: &ProbeOptions,
        retry_limit: u32,
    ) -> HttpRequest {
        HttpRequest {
            method,
            url: url.to_string(),
            base_url: options.base_url.clone(),
            headers,
            timeout: options.timeout,
            reject_unauthorized_tls: options.reject_unauthorized_tls,
            retry_limit,
        }
    }
}

/// Default headers with `overrides` applied on top.
///
/// Header names are case-insensitive, so an override replaces the default of
/// the same name regardless of spelling. Overrides that are not valid header
/// names or values are dropped.
pub fn merge_headers<'a, I>(overrides: I) -> HeaderMap
where
    I: IntoIterator<Item = (&'a String, &'a String)>,
{
    let mut merged = HeaderMap::with_capacity(headers::DEFAULTS.len());
    for (name, value) in headers::DEFAULTS {
        merged.insert(name, HeaderValue::from_static(value));
    }

    for (name, value) in overrides {
        match (
            HeaderName::from_bytes(name.as_bytes()),
            HeaderValue::from_str(value),
        ) {
            (Ok(name), Ok(value)) => {
                merged.insert(name, value);
            }
            _ => warn!("Ignoring invalid header '{name}: {value}'"),
        }
    }

    merged
}
