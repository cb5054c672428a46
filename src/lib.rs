#![warn(missing_docs)]
#![warn(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

//! node-iter-compare library
//!
//! Compares one metric carried by `final_metrics=TrieNodeIterMetrics { ... }`
//! log lines between an original and a new run, line by line, and reports the
//! improvement percentage and speedup multiplier per line and in total.
//! It can be used programmatically in addition to the CLI interface.
//!
//! # Basic Example
//!
//! Extracting metrics from one line:
//!
//! ```
//! use node_iter_compare::metrics::MetricExtractor;
//!
//! let extractor = MetricExtractor::new();
//! let extraction = extractor
//!     .extract("final_metrics=TrieNodeIterMetrics { hashed_cursor_seek_count: 100, leaf_nodes: 4 }")
//!     .unwrap();
//!
//! let metrics = extraction.metrics().unwrap();
//! assert_eq!(metrics.get("hashed_cursor_seek_count"), Some(100));
//! assert_eq!(metrics.get("leaf_nodes"), Some(4));
//! ```
//!
//! # Advanced Example: Comparing Two Logs
//!
//! ```
//! use node_iter_compare::compare::{LogComparator, LogInput};
//! use std::io::Cursor;
//!
//! let original = "final_metrics=TrieNodeIterMetrics { hashed_cursor_seek_count: 100 }\n";
//! let new = "final_metrics=TrieNodeIterMetrics { hashed_cursor_seek_count: 25 }\n";
//!
//! let summary = LogComparator::default()
//!     .compare_readers(
//!         LogInput::new("original.log", Cursor::new(original)),
//!         LogInput::new("new.log", Cursor::new(new)),
//!     )
//!     .unwrap();
//!
//! assert_eq!(summary.records[0].improvement_percent, 75.0);
//! assert_eq!(summary.records[0].multiplier, 4.0);
//! ```

/// Command handlers for CLI operations
pub mod cmd;
/// Line pairing, ratio computation and reporting
pub mod compare;
/// Configuration file support
pub mod config;
/// Error types with contextual suggestions
pub mod error;
/// Shared formatting utilities
pub mod fmt;
/// Infrastructure traits for filesystem access
pub mod infra;
/// Metric extraction from log lines
pub mod metrics;
