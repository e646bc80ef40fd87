//! Command tree configuration
//!
//! This module holds the declarative description of a command tree, its
//! YAML representation, and the structural validation run before a tree is
//! built.

pub mod parse;
pub mod schema;
pub mod types;

// Re-export main types
pub use parse::*;
pub use schema::*;
pub use types::*;
