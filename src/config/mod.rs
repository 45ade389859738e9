//! Configuration management
//!
//! This module handles loading configuration from TOML files, merging it with
//! CLI arguments, and turning the result into engine and probe options.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::Path;
use std::time::Duration;

use crate::core::constants::{defaults, limits, output_formats, timeouts};
use crate::core::error::{LivenessError, Result};
use crate::validation::http::ReqwestClient;
use crate::validation::options::{EngineOptions, ProbeOptions, default_protocols};
use crate::validation::url_filter::normalize_protocol;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Base URL for resolving relative URLs
    pub base_url: Option<String>,

    /// Maximum number of URLs probed at the same time
    pub concurrency: Option<usize>,

    /// Engine retries after the first attempt
    pub retries: Option<u32>,

    /// Delay before the first retry in milliseconds
    pub retry_delay: Option<u64>,

    /// Accepted protocols, e.g. ["https:"]
    pub protocols: Option<Vec<String>>,

    /// Timeout in seconds for a single HTTP request
    pub timeout: Option<u64>,

    /// Retries the HTTP client performs for the GET fallback
    pub request_retry_limit: Option<u32>,

    /// Extra request headers; same-named defaults are replaced
    pub headers: Option<BTreeMap<String, String>>,

    /// Custom User-Agent header
    pub user_agent: Option<String>,

    /// Skip TLS certificate verification
    pub skip_ssl_verification: Option<bool>,

    /// HTTP/HTTPS proxy URL
    pub proxy: Option<String>,

    /// Output format (text, json)
    pub output_format: Option<String>,

    /// Enable verbose logging
    pub verbose: Option<bool>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: None,
            concurrency: Some(defaults::CONCURRENCY),
            retries: Some(defaults::RETRIES),
            retry_delay: Some(timeouts::DEFAULT_RETRY_DELAY_MS),
            protocols: None,
            timeout: Some(timeouts::DEFAULT_TIMEOUT_SECONDS),
            request_retry_limit: Some(defaults::REQUEST_RETRY_LIMIT),
            headers: None,
            user_agent: None,
            skip_ssl_verification: Some(false),
            proxy: None,
            output_format: Some(output_formats::DEFAULT.to_string()),
            verbose: Some(false),
        }
    }
}

impl Config {
    /// Load configuration from file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            LivenessError::Config(format!(
                "Could not read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| {
            LivenessError::Config(format!(
                "Invalid TOML in config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Try to find and load a config file in standard locations
    pub fn load_from_standard_locations() -> Self {
        if let Ok(config) = Self::load_from_file(defaults::CONFIG_FILE_NAME) {
            return config;
        }

        // Parent directories, up to 3 levels
        for i in 1..=3 {
            let path = format!("{}{}", "../".repeat(i), defaults::CONFIG_FILE_NAME);
            if let Ok(config) = Self::load_from_file(&path) {
                return config;
            }
        }

        Self::default()
    }

    /// Merge this config with CLI arguments (CLI takes precedence)
    pub fn merge_with_cli(&mut self, cli_config: &CliConfig) {
        // Engine options
        if let Some(ref base_url) = cli_config.base_url {
            self.base_url = Some(base_url.clone());
        }
        if let Some(concurrency) = cli_config.concurrency {
            self.concurrency = Some(concurrency);
        }
        if let Some(retries) = cli_config.retries {
            self.retries = Some(retries);
        }
        if let Some(retry_delay) = cli_config.retry_delay {
            self.retry_delay = Some(retry_delay);
        }
        if let Some(ref protocols) = cli_config.protocols {
            self.protocols = Some(protocols.clone());
        }

        // Request options
        if let Some(timeout) = cli_config.timeout {
            self.timeout = Some(timeout);
        }
        if let Some(limit) = cli_config.request_retry_limit {
            self.request_retry_limit = Some(limit);
        }
        if let Some(ref headers) = cli_config.headers {
            let merged = self.headers.get_or_insert_with(BTreeMap::new);
            for (name, value) in headers {
                merged.insert(name.clone(), value.clone());
            }
        }

        // Network & security
        if let Some(ref user_agent) = cli_config.user_agent {
            self.user_agent = Some(user_agent.clone());
        }
        if let Some(ref proxy) = cli_config.proxy {
            self.proxy = Some(proxy.clone());
        }
        if cli_config.skip_ssl_verification {
            self.skip_ssl_verification = Some(true);
        }

        // Output & format
        if cli_config.verbose {
            self.verbose = Some(true);
        }
        if let Some(ref output_format) = cli_config.output_format {
            self.output_format = Some(output_format.clone());
        }
    }

    /// Get timeout as Duration
    pub fn timeout_duration(&self) -> Duration {
        Duration::from_secs(self.timeout.unwrap_or(timeouts::DEFAULT_TIMEOUT_SECONDS))
    }

    /// Get retry delay as Duration
    pub fn retry_delay_duration(&self) -> Duration {
        Duration::from_millis(self.retry_delay.unwrap_or(timeouts::DEFAULT_RETRY_DELAY_MS))
    }

    pub fn concurrency_or_default(&self) -> usize {
        self.concurrency.unwrap_or(defaults::CONCURRENCY)
    }

    pub fn retries_or_default(&self) -> u32 {
        self.retries.unwrap_or(defaults::RETRIES)
    }

    /// Configured protocols in `"scheme:"` form
    pub fn protocols_set(&self) -> BTreeSet<String> {
        match self.protocols {
            Some(ref protocols) => protocols.iter().map(|p| normalize_protocol(p)).collect(),
            None => default_protocols(),
        }
    }

    /// Options for a batch run
    pub fn engine_options(&self) -> EngineOptions {
        EngineOptions {
            base_url: self.base_url.clone(),
            concurrency: self.concurrency_or_default(),
            retries: self.retries_or_default(),
            protocols: self.protocols_set(),
            retry_delay: self.retry_delay_duration(),
        }
    }

    /// Request options used by every probe
    pub fn probe_options(&self) -> ProbeOptions {
        let mut headers = self.headers.clone().unwrap_or_default();
        if let Some(ref user_agent) = self.user_agent {
            headers.insert("user-agent".to_string(), user_agent.clone());
        }

        ProbeOptions {
            base_url: self.base_url.clone(),
            headers,
            timeout: self.timeout_duration(),
            reject_unauthorized_tls: !self.skip_ssl_verification.unwrap_or(false),
            retry_limit: self.request_retry_limit.unwrap_or(defaults::REQUEST_RETRY_LIMIT),
            protocols: self.protocols_set(),
        }
    }

    /// Build the HTTP client described by this configuration
    pub fn build_client(&self) -> Result<ReqwestClient> {
        let mut builder = ReqwestClient::builder()
            .retry_backoff(self.retry_delay_duration())
            .pool_max_idle_per_host(self.concurrency_or_default().min(20));

        if let Some(ref proxy) = self.proxy {
            builder = builder.proxy(proxy.clone());
        }

        builder.build()
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if let Some(timeout) = self.timeout {
            if timeout == 0 {
                return Err(LivenessError::Config(
                    "Timeout cannot be 0. Expected a positive integer representing seconds."
                        .to_string(),
                ));
            }
            if timeout > timeouts::MAX_TIMEOUT_SECONDS {
                return Err(LivenessError::Config(format!(
                    "Timeout of {timeout} seconds is extremely large (>1 hour). Consider using a smaller value."
                )));
            }
        }

        if let Some(concurrency) = self.concurrency {
            if concurrency == 0 {
                return Err(LivenessError::Config(
                    "Concurrency cannot be 0. Expected a positive integer.".to_string(),
                ));
            }
            if concurrency > limits::MAX_CONCURRENCY {
                return Err(LivenessError::Config(format!(
                    "Concurrency of {concurrency} is extremely high and may cause system instability. Consider using a smaller value."
                )));
            }
        }

        if let Some(retries) = self.retries
            && retries > limits::MAX_RETRIES
        {
            return Err(LivenessError::Config(format!(
                "Retries of {retries} is very high and may cause long delays. Consider using a smaller value."
            )));
        }

        if let Some(limit) = self.request_retry_limit
            && limit > limits::MAX_RETRIES
        {
            return Err(LivenessError::Config(format!(
                "Request retry limit of {limit} is very high and may cause long delays. Consider using a smaller value."
            )));
        }

        if let Some(ref protocols) = self.protocols
            && let Some(bad) = protocols.iter().find(|p| {
                let name = normalize_protocol(p);
                name.len() < 2 || !name[..name.len() - 1].chars().all(is_scheme_char)
            })
        {
            return Err(LivenessError::Config(format!(
                "Protocol '{bad}' is not a valid URL scheme."
            )));
        }

        if let Some(ref base_url) = self.base_url
            && reqwest::Url::parse(base_url).is_err()
        {
            return Err(LivenessError::Config(format!(
                "Base URL '{base_url}' is not an absolute URL."
            )));
        }

        if let Some(ref format) = self.output_format
            && !output_formats::ALL.contains(&format.as_str())
        {
            return Err(LivenessError::Config(format!(
                "Invalid output format '{format}'. Expected one of: {}.",
                output_formats::ALL.join(", ")
            )));
        }

        Ok(())
    }
}

fn is_scheme_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.')
}

/// Configuration options that can come from CLI
#[derive(Debug, Default)]
pub struct CliConfig {
    // Engine options
    pub base_url: Option<String>,       // --base-url
    pub concurrency: Option<usize>,     // --concurrency
    pub retries: Option<u32>,           // --retry
    pub retry_delay: Option<u64>,       // --retry-delay
    pub protocols: Option<Vec<String>>, // --protocol

    // Request options
    pub timeout: Option<u64>,                         // --timeout
    pub request_retry_limit: Option<u32>,             // --request-retry
    pub headers: Option<BTreeMap<String, String>>,    // --header

    // Output & format
    pub quiet: bool,                   // --quiet
    pub verbose: bool,                 // --verbose
    pub output_format: Option<String>, // --format

    // Network & security
    pub user_agent: Option<String>,  // --user-agent
    pub proxy: Option<String>,       // --proxy
    pub skip_ssl_verification: bool, // --insecure

    // Configuration
    pub config_file: Option<String>, // --config
    pub no_config: bool,             // --no-config
}
