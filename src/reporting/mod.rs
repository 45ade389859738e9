//! Structured logging
//!
//! This module wires up `env_logger` and holds the log helpers used by the
//! engine and the command-line wrapper.

pub mod logging;
