use log::{debug, info, warn};

use crate::config::Config;
use crate::core::types::{LinkStatus, LivenessResult};

/// Initialize the logger with appropriate level based on verbosity
pub fn init_logger(verbose: bool, quiet: bool) {
    let level = if quiet {
        log::LevelFilter::Off
    } else if verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Warn
    };

    env_logger::Builder::from_default_env()
        .filter_level(level)
        .format_timestamp(None)
        .format_module_path(false)
        .format_target(false)
        .init();

    debug!("Logger initialized with level: {level:?}");
}

/// Log configuration information
pub fn log_config_info(config: &Config) {
    let timeout = config.timeout_duration().as_secs();
    let concurrency = config.concurrency_or_default();
    let retries = config.retries_or_default();
    let retry_delay = config.retry_delay_duration().as_millis();
    let request_retries = config.request_retry_limit.unwrap_or(0);
    let skip_ssl_verification = config.skip_ssl_verification.unwrap_or(false);

    info!("Configuration: concurrency={concurrency}, timeout={timeout}s");
    info!("Retry: attempts={retries}, delay={retry_delay}ms, per-request={request_retries}");
    info!("HTTP: skip_ssl={skip_ssl_verification}");
    if skip_ssl_verification {
        warn!("TLS certificate verification is disabled");
    }
}

/// Log the start of a batch
pub fn log_check_start(valid: usize, invalid: usize) {
    info!("Checking {valid} URL(s), {invalid} rejected as invalid");
}

/// Log batch completion
pub fn log_check_complete(url_count: usize, issues: usize, duration_ms: u128) {
    if issues == 0 {
        info!("All {url_count} URL(s) alive ({duration_ms}ms)");
    } else {
        warn!(
            "{}/{} URL(s) alive, {} issue(s) found ({}ms)",
            url_count - issues,
            url_count,
            issues,
            duration_ms
        );
    }
}

/// Log individual URL results for debugging
pub fn log_url_result(url: &str, result: &LivenessResult) {
    match (result.status, result.status_code, result.description.as_deref()) {
        (LinkStatus::Alive, Some(code), _) => debug!("✓ {url} -> {code}"),
        (status, Some(code), _) => debug!("✗ {url} -> {status} ({code})"),
        (status, None, Some(desc)) => debug!("✗ {url} -> {status} ({desc})"),
        (status, None, None) => debug!("✗ {url} -> {status}"),
    }
}
