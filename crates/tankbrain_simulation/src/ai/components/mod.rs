//! AI components

pub mod config;
pub mod fsm;
pub mod target;

#[cfg(test)]
mod fsm_tests;

// Re-export all components
pub use config::*;
pub use fsm::*;
pub use target::*;
