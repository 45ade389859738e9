use clap::Parser;
use std::sync::Arc;

use urlalive::config::{CliConfig, Config};
use urlalive::core::constants::output_formats;
use urlalive::core::error::{LivenessError, Result};
use urlalive::reporting::logging;
use urlalive::ui::{Cli, Summary, cli_to_config, display_results, read_url_file};
use urlalive::validation::LivenessEngine;

/// Every URL is alive
const EXIT_OK: i32 = 0;
/// At least one URL is not alive
const EXIT_ISSUES: i32 = 1;
/// Configuration or input could not be used
const EXIT_USAGE: i32 = 2;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    match run(&cli).await {
        Ok(exit_code) => std::process::exit(exit_code),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(EXIT_USAGE);
        }
    }
}

async fn run(cli: &Cli) -> Result<i32> {
    let cli_config = cli_to_config(cli)?;
    let config = load_and_merge_config(&cli_config)?;

    logging::init_logger(config.verbose.unwrap_or(false), cli_config.quiet);
    logging::log_config_info(&config);

    let urls = collect_urls(cli)?;
    if urls.is_empty() {
        return Err(LivenessError::InvalidArgument(
            "No URLs provided. Pass URLs as arguments or use --input.".to_string(),
        ));
    }

    let client = config.build_client()?;
    let engine = LivenessEngine::new(Arc::new(client)).with_probe_options(config.probe_options());
    let results = engine.check_links(urls, &config.engine_options()).await?;

    let output_format = config
        .output_format
        .as_deref()
        .unwrap_or(output_formats::DEFAULT);
    display_results(&results, output_format)?;

    if Summary::from_results(&results).issues() == 0 {
        Ok(EXIT_OK)
    } else {
        Ok(EXIT_ISSUES)
    }
}

/// Load configuration from file or standard locations and merge with CLI config
fn load_and_merge_config(cli_config: &CliConfig) -> Result<Config> {
    let mut config = if cli_config.no_config {
        Config::default()
    } else if let Some(ref config_file) = cli_config.config_file {
        Config::load_from_file(config_file)?
    } else {
        Config::load_from_standard_locations()
    };

    // CLI takes precedence
    config.merge_with_cli(cli_config);
    config.validate()?;
    Ok(config)
}

/// Positional URLs followed by the contents of `--input`
fn collect_urls(cli: &Cli) -> Result<Vec<String>> {
    let mut urls = cli.urls.clone();
    if let Some(ref input) = cli.input {
        urls.extend(read_url_file(input)?);
    }
    Ok(urls)
}
