//! Centralized mocks and fixtures for testing
//!
//! This module provides reusable settings, addresses and a wired form
//! to reduce duplication across test files.

pub mod configs;
pub mod entities;

// Re-export commonly used items for convenience
#[allow(unused_imports)]
pub use configs::MockConfigs;
#[allow(unused_imports)]
pub use entities::{MockEntities, TestForm};
