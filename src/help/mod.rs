//! Contextual help
//!
//! Help is assembled as a nested [`HelpEntry`] and rendered with indentation
//! that doubles per nesting level.

pub mod entry;
pub mod generate;

// Re-export main types
pub use entry::*;
pub use generate::*;
