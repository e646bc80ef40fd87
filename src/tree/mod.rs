//! The command tree
//!
//! A tree of [`CommandNode`]s is built once from a [`CommandConfig`] and is
//! never modified afterwards.
//!
//! [`CommandConfig`]: crate::config::CommandConfig

pub mod node;

// Re-export main types
pub use node::*;
