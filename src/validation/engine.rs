use futures::{StreamExt, stream};
use log::debug;
use rustc_hash::FxHashSet;
use std::sync::Arc;
use std::time::Instant;

use crate::core::error::Result;
use crate::core::types::{LivenessResult, ResultMap};
use crate::reporting::logging;
use crate::validation::http::HttpClient;
use crate::validation::memo::{MemoCache, MemoKey};
use crate::validation::options::{EngineOptions, ProbeOptions};
use crate::validation::prober::LinkProber;
use crate::validation::retry::RetryPolicy;
use crate::validation::url_filter::{DefaultUrlValidator, UrlValidator};

/// Checks batches of URLs with bounded concurrency, retries and a short-lived
/// memo of recent outcomes.
///
/// The memo belongs to the engine instance: two engines never share results,
/// while repeated batches on one engine reuse fresh entries.
pub struct LivenessEngine {
    prober: LinkProber,
    cache: MemoCache,
    probe_options: ProbeOptions,
}

impl LivenessEngine {
    pub fn new(client: Arc<dyn HttpClient>) -> Self {
        Self::with_validator(client, Arc::new(DefaultUrlValidator))
    }

    pub fn with_validator(client: Arc<dyn HttpClient>, validator: Arc<dyn UrlValidator>) -> Self {
        Self {
            prober: LinkProber::with_validator(client, validator),
            cache: MemoCache::default(),
            probe_options: ProbeOptions::default(),
        }
    }

    /// Replace the memo cache, e.g. to use a different time-to-live.
    pub fn with_cache(mut self, cache: MemoCache) -> Self {
        self.cache = cache;
        self
    }

    /// Request options used for every probe. `base_url` and `protocols` are
    /// taken from the [`EngineOptions`] of each batch instead.
    pub fn with_probe_options(mut self, probe_options: ProbeOptions) -> Self {
        self.probe_options = probe_options;
        self
    }

    pub fn cache(&self) -> &MemoCache {
        &self.cache
    }

    pub fn probe_options(&self) -> &ProbeOptions {
        &self.probe_options
    }

    /// Check every URL in `urls`.
    ///
    /// The returned map holds exactly one entry per distinct input URL, keyed
    /// by the literal input string. Failing URLs are reported inside the map;
    /// the only error is an options value that cannot drive a batch, which is
    /// detected before any request is made.
    pub async fn check_links<I, S>(&self, urls: I, options: &EngineOptions) -> Result<ResultMap>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        options.validate()?;
        self.cache.purge_expired();

        let start = Instant::now();
        let base_url = options.base_url();
        let validator = self.prober.validator();

        let mut results = ResultMap::default();
        let mut seen = FxHashSet::default();
        let mut valid = Vec::new();
        for url in urls.into_iter().map(Into::into) {
            if !seen.insert(url.clone()) {
                continue;
            }
            if validator.is_valid(&url, base_url, &options.protocols) {
                valid.push(url);
            } else {
                debug!("{url} is not a valid URL");
                results.insert(url, LivenessResult::invalid());
            }
        }

        logging::log_check_start(valid.len(), results.len());

        let probe_options = ProbeOptions {
            base_url: base_url.map(str::to_string),
            protocols: options.protocols.clone(),
            ..self.probe_options.clone()
        };
        let policy = RetryPolicy::new(options.retries, options.retry_delay);

        let mut outcomes = stream::iter(valid)
            .map(|url| {
                let probe_options = &probe_options;
                let policy = &policy;
                async move {
                    let result = self.check_one(&url, probe_options, policy).await;
                    (url, result)
                }
            })
            .buffer_unordered(options.concurrency);

        while let Some((url, result)) = outcomes.next().await {
            logging::log_url_result(&url, &result);
            results.insert(url, result);
        }

        let issues = results.values().filter(|r| r.is_not_alive()).count();
        logging::log_check_complete(results.len(), issues, start.elapsed().as_millis());

        Ok(results)
    }

    /// Memoized, retried probe of a single valid URL.
    async fn check_one(
        &self,
        url: &str,
        probe_options: &ProbeOptions,
        policy: &RetryPolicy,
    ) -> LivenessResult {
        let key = MemoKey::new(url, probe_options.base_url.as_deref(), policy.retries());

        self.cache
            .get_or_compute(key, || async move {
                debug!("Probing {url}");
                policy
                    .run(url, || self.prober.probe(url, probe_options))
                    .await
            })
            .await
    }
}
