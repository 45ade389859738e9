// Command-line interface definitions and parsing for urlalive

use std::collections::BTreeMap;

use crate::config::CliConfig;
use crate::core::constants::output_formats;
use crate::core::error::{LivenessError, Result};
use clap::Parser;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// URLs to check
    pub urls: Vec<String>,

    /// Read URLs from a file (one per line, or a JSON array of strings)
    #[arg(short = 'i', long, value_name = "FILE", help_heading = "Input")]
    pub input: Option<String>,

    /// Base URL for resolving relative URLs
    #[arg(short = 'b', long, value_name = "URL", help_heading = "Input")]
    pub base_url: Option<String>,

    // Core Options
    /// Concurrent probes (default: 8)
    #[arg(short = 'c', long, value_name = "COUNT", help_heading = "Core Options")]
    pub concurrency: Option<usize>,

    /// Request timeout in seconds (default: 30)
    #[arg(
        short = 't',
        long,
        value_name = "SECONDS",
        help_heading = "Core Options"
    )]
    pub timeout: Option<u64>,

    /// Accepted protocol, repeatable (default: http, https)
    #[arg(long = "protocol", value_name = "SCHEME", help_heading = "Core Options")]
    pub protocols: Vec<String>,

    /// Extra request header as NAME:VALUE, repeatable
    #[arg(short = 'H', long = "header", value_name = "NAME:VALUE", help_heading = "Core Options")]
    pub headers: Vec<String>,

    // Retry
    /// Retries after the first attempt (default: 2)
    #[arg(long, value_name = "COUNT", help_heading = "Retry")]
    pub retry: Option<u32>,

    /// Delay before the first retry in ms, doubled each time (default: 1000)
    #[arg(long, value_name = "MS", help_heading = "Retry")]
    pub retry_delay: Option<u64>,

    /// Retries the HTTP client performs on the GET fallback (default: 0)
    #[arg(long, value_name = "COUNT", help_heading = "Retry")]
    pub request_retry: Option<u32>,

    // Output & Verbosity
    /// Suppress log output
    #[arg(short = 'q', long, help_heading = "Output & Verbosity")]
    pub quiet: bool,

    /// Enable verbose logging
    #[arg(short = 'v', long, help_heading = "Output & Verbosity")]
    pub verbose: bool,

    /// Output format
    #[arg(long, value_name = "FORMAT", value_parser = output_formats::ALL, help_heading = "Output & Verbosity")]
    pub format: Option<String>,

    // Network & Security
    /// Custom User-Agent header
    #[arg(long, value_name = "AGENT", help_heading = "Network & Security")]
    pub user_agent: Option<String>,

    /// HTTP/HTTPS proxy URL
    #[arg(long, value_name = "URL", help_heading = "Network & Security")]
    pub proxy: Option<String>,

    /// Skip TLS certificate verification
    #[arg(long, help_heading = "Network & Security")]
    pub insecure: bool,

    // Configuration
    /// Use specific config file
    #[arg(long, value_name = "FILE", help_heading = "Configuration")]
    pub config: Option<String>,

    /// Ignore config files
    #[arg(long, help_heading = "Configuration")]
    pub no_config: bool,
}

/// Convert derive-based CLI arguments to a CliConfig structure
pub fn cli_to_config(cli: &Cli) -> Result<CliConfig> {
    let mut cli_config = CliConfig::default();

    // Engine options
    cli_config.base_url = cli.base_url.clone();
    cli_config.concurrency = cli.concurrency;
    cli_config.retries = cli.retry;
    cli_config.retry_delay = cli.retry_delay;
    if !cli.protocols.is_empty() {
        cli_config.protocols = Some(cli.protocols.clone());
    }

    // Request options
    cli_config.timeout = cli.timeout;
    cli_config.request_retry_limit = cli.request_retry;
    if !cli.headers.is_empty() {
        cli_config.headers = Some(parse_headers(&cli.headers)?);
    }

    // Output & format
    cli_config.quiet = cli.quiet;
    cli_config.verbose = cli.verbose;
    cli_config.output_format = cli.format.clone();

    // Network & security
    cli_config.user_agent = cli.user_agent.clone();
    cli_config.proxy = cli.proxy.clone();
    cli_config.skip_ssl_verification = cli.insecure;

    // Configuration
    cli_config.config_file = cli.config.clone();
    cli_config.no_config = cli.no_config;

    Ok(cli_config)
}

/// Parse `NAME:VALUE` header arguments
pub fn parse_headers(raw: &[String]) -> Result<BTreeMap<String, String>> {
    raw.iter()
        .map(|header| match header.split_once(':') {
            Some((name, value)) if !name.trim().is_empty() => {
                Ok((name.trim().to_string(), value.trim().to_string()))
            }
            _ => Err(LivenessError::InvalidArgument(format!(
                "Header '{header}' is not in NAME:VALUE form"
            ))),
        })
        .collect()
}
