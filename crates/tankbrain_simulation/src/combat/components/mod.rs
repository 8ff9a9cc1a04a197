//! Combat components

pub mod cannon;

// Re-export all components
pub use cannon::*;
