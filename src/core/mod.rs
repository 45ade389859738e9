//! Core types and foundational components
//!
//! This module contains the result types, error handling,
//! and constants used throughout the crate.

pub mod constants;
pub mod error;
pub mod types;

// Re-export commonly used items for convenience
pub use error::{HttpError, LivenessError, ProbeFailure, Result};
pub use types::{LinkStatus, LivenessResult, ResultMap};
