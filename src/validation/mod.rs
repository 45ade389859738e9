//! URL liveness checking
//!
//! This module holds the probing pipeline: admissibility checks, the HTTP
//! seam, the single-URL prober, and the batch engine with its retry policy
//! and memo cache.

pub mod engine;
pub mod http;
pub mod memo;
pub mod options;
pub mod prober;
pub mod retry;
pub mod url_filter;

#[cfg(test)]
pub(crate) mod testing;

// Re-export commonly used items
pub use engine::LivenessEngine;
pub use http::{HttpClient, HttpRequest, Method, ReqwestClient, ReqwestClientBuilder};
pub use memo::{MemoCache, MemoKey};
pub use options::{EngineOptions, ProbeOptions, default_protocols};
pub use prober::{LinkProber, merge_headers};
pub use retry::{RetryPolicy, RetryState};
pub use url_filter::{DefaultUrlValidator, UrlValidator, is_relative_url, normalize_protocol};
