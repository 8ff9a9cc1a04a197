//! Combat systems

pub mod cannon;


// Re-export all systems
pub use cannon::*;
