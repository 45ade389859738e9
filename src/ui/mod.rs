//! User interface
//!
//! This module contains the command-line parsing, input file parsing and
//! result rendering used by the `urlalive` binary.

pub mod cli;
pub mod color;
pub mod output;

// Re-export commonly used items
pub use cli::{Cli, cli_to_config};
pub use output::{Summary, display_results, parse_url_list, read_url_file};
