//! CLI application facade
//!
//! This module ties a validated command tree to an executable name and an
//! output sink.

pub mod app;

// Re-export main types
pub use app::*;
