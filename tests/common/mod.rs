//! Common test utilities and helpers
//!
//! This module provides shared functionality for integration tests:
//! - Assertion helpers for float comparisons
//! - Log fixture creation utilities

pub mod assertions;
pub mod fixtures;
