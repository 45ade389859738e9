//! urlalive - concurrent URL liveness checking
//!
//! Give the engine a list of URLs and it reports, per URL, whether it is
//! alive, dead, invalid or errored. Each admissible URL is probed with HEAD
//! and falls back to GET, failed probes are retried with exponential backoff,
//! and results are memoized per engine for a short time.
//!
//! ```no_run
//! use std::sync::Arc;
//! use urlalive::{EngineOptions, LivenessEngine, ReqwestClient};
//!
//! # async fn run() -> urlalive::Result<()> {
//! let engine = LivenessEngine::new(Arc::new(ReqwestClient::new()?));
//! let results = engine
//!     .check_links(["https://example.com", "/docs"], &EngineOptions::default())
//!     .await?;
//! for (url, result) in &results {
//!     println!("{url}: {result}");
//! }
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod core;
pub mod reporting;
pub mod ui;
pub mod validation;

// Re-export commonly used items for convenience
pub use config::{CliConfig, Config};
pub use crate::core::{HttpError, LinkStatus, LivenessError, LivenessResult, ProbeFailure, Result, ResultMap};
pub use validation::{
    DefaultUrlValidator, EngineOptions, HttpClient, HttpRequest, LinkProber, LivenessEngine,
    MemoCache, Method, ProbeOptions, ReqwestClient, UrlValidator,
};
