//! Log comparison: pairing, ratio computation and reporting
//!
//! [`LogComparison`] opens two logs through a [`FileSystem`], compares the
//! configured metric line by line and renders the result.

mod comparator;
mod reporter;

pub use comparator::{
    improvement_percent, speedup_multiplier, ComparisonRecord, ComparisonSummary,
    ComparisonTotals, LogComparator, LogInput, PairingStats,
};
pub use reporter::ComparisonReporter;

use crate::config::CompareConfig;
use crate::error::CompareError;
use crate::infra::{FileSystem, RealFileSystem};
use crate::metrics::MetricExtractor;
use anyhow::Result;
use std::path::Path;

/// Comparison manager
pub struct LogComparison<FS: FileSystem = RealFileSystem> {
    fs: FS,
    comparator: LogComparator,
    reporter: ComparisonReporter,
}

impl LogComparison<RealFileSystem> {
    /// Compare `hashed_cursor_seek_count` in `TrieNodeIterMetrics` lines on the real filesystem
    pub fn new() -> Self {
        Self::with_fs(RealFileSystem, LogComparator::default())
    }

    /// Create a comparison from a validated config, on the real filesystem
    pub fn from_config(config: &CompareConfig) -> Result<Self, CompareError> {
        Self::from_config_with_fs(config, RealFileSystem)
    }
}

impl Default for LogComparison<RealFileSystem> {
    fn default() -> Self {
        Self::new()
    }
}

impl<FS: FileSystem> LogComparison<FS> {
    /// Create a comparison with a custom filesystem implementation
    pub fn with_fs(fs: FS, comparator: LogComparator) -> Self {
        Self {
            fs,
            comparator,
            reporter: ComparisonReporter::new(),
        }
    }

    /// Create a comparison from a config with a custom filesystem implementation
    pub fn from_config_with_fs(config: &CompareConfig, fs: FS) -> Result<Self, CompareError> {
        config.validate()?;
        let extractor = MetricExtractor::with_marker(&config.marker)?;
        Ok(Self::with_fs(
            fs,
            LogComparator::new(extractor, config.metric.trim()),
        ))
    }

    /// Compare two log files line by line
    ///
    /// Both files are opened before reading starts and are closed when the
    /// comparison returns.
    pub fn compare_files(&self, original: &Path, new: &Path) -> Result<ComparisonSummary> {
        let original_reader = self
            .fs
            .open(original)
            .map_err(|e| CompareError::from_open(original, e))?;
        let new_reader = self
            .fs
            .open(new)
            .map_err(|e| CompareError::from_open(new, e))?;

        log::debug!(
            "comparing '{}' between {} and {}",
            self.comparator.metric(),
            original.display(),
            new.display()
        );

        self.comparator.compare_readers(
            LogInput::new(original.display().to_string(), original_reader),
            LogInput::new(new.display().to_string(), new_reader),
        )
    }

    /// Render the comparison table
    pub fn render_table(&self, summary: &ComparisonSummary) -> String {
        self.reporter.render_table(summary)
    }

    /// Render the comparison as JSON
    pub fn render_json(&self, summary: &ComparisonSummary) -> Result<String> {
        self.reporter.render_json(summary)
    }
}
