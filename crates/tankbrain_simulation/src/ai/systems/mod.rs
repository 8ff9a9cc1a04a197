//! AI systems (target resolution, brain tick)

pub mod controller;
pub mod targeting;

// Re-export all systems
pub use controller::*;
pub use targeting::*;
