//! Dispatch of argument vectors
//!
//! This module routes an argument vector down the command tree to exactly
//! one leaf, resolving options and positional arguments on the way.

pub mod args;
pub mod dispatcher;
pub mod scope;
pub mod tokens;

// Re-export main types
pub use args::*;
pub use dispatcher::*;
pub use scope::*;
pub use tokens::*;
