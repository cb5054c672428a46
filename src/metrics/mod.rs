//! Metric extraction from trie node iterator log lines
//!
//! A metrics-bearing line carries a marker such as
//! `final_metrics=TrieNodeIterMetrics { hashed_cursor_seek_count: 100, ... }`.
//! [`MetricExtractor`] finds the marker and parses its body into a [`MetricSet`].

mod parser;

pub use parser::{MetricExtractor, Token, Tokenizer, DEFAULT_MARKER};

use serde::Serialize;
use std::collections::BTreeMap;

/// Metric the comparison reads when none is configured
pub const DEFAULT_METRIC: &str = "hashed_cursor_seek_count";

/// Metrics parsed from one marker body
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MetricSet {
    values: BTreeMap<String, u64>,
    skipped: Vec<String>,
}

impl MetricSet {
    /// Create an empty metric set
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a metric, replacing any earlier value under the same name
    pub fn insert(&mut self, name: impl Into<String>, value: u64) {
        self.values.insert(name.into(), value);
    }

    /// Look up a metric by name
    pub fn get(&self, name: &str) -> Option<u64> {
        self.values.get(name).copied()
    }

    /// Number of metrics parsed
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// True if no metric was parsed
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterate metrics in name order
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.values.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// Segments of the body that were not a single `key: value` pair
    pub fn skipped(&self) -> &[String] {
        &self.skipped
    }

    pub(crate) fn record_skipped(&mut self, segment: String) {
        self.skipped.push(segment);
    }
}

/// Result of scanning one line for the metrics marker
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Extraction {
    /// The line has no marker
    NotFound,
    /// The marker was present; the set may still be empty
    Found(MetricSet),
}

impl Extraction {
    /// True if the marker was present
    pub fn is_found(&self) -> bool {
        matches!(self, Self::Found(_))
    }

    /// Parsed metrics, if the marker was present
    pub fn metrics(&self) -> Option<&MetricSet> {
        match self {
            Self::Found(set) => Some(set),
            Self::NotFound => None,
        }
    }

    /// Parsed metrics if the marker was present and at least one pair parsed
    pub fn non_empty(&self) -> Option<&MetricSet> {
        self.metrics().filter(|set| !set.is_empty())
    }
}
