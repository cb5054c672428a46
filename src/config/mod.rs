//! Configuration for node-iter-compare
//!
//! An optional `.node-iter-compare.toml` selects which metric to compare and
//! which metrics struct marks a line. Command-line flags override it.

pub mod file;
pub mod loader;

pub use file::{CompareConfig, CONFIG_FILE_NAME};
pub use loader::ConfigLoader;
