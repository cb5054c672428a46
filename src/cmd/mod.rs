//! Command handlers for the node-iter-compare CLI

pub mod compare;
pub mod completions;

pub use compare::{cmd_compare, CompareOptions};
pub use completions::cmd_completions;
