//! Line-by-line metric comparison logic

use crate::error::CompareError;
use crate::infra::LogLines;
use crate::metrics::{MetricExtractor, DEFAULT_METRIC};
use anyhow::{Context, Result};
use serde::Serialize;
use std::io::BufRead;

/// Percentage of the original count removed in the new run.
///
/// Zero when `original` is zero; negative when the new run is worse.
pub fn improvement_percent(original: u64, new: u64) -> f64 {
    if original == 0 {
        return 0.0;
    }
    (original as f64 - new as f64) / original as f64 * 100.0
}

/// How many times fewer operations the new run performed.
///
/// `1.0` when `original` is zero, regardless of `new`; positive infinity when
/// only `new` is zero.
pub fn speedup_multiplier(original: u64, new: u64) -> f64 {
    if original == 0 {
        1.0
    } else if new == 0 {
        f64::INFINITY
    } else {
        original as f64 / new as f64
    }
}

/// Comparison of one matched line pair
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonRecord {
    /// 1-based line number shared by both inputs
    pub line: usize,
    /// Metric value in the original log
    pub original: u64,
    /// Metric value in the new log
    pub new: u64,
    /// See [`improvement_percent`]
    pub improvement_percent: f64,
    /// See [`speedup_multiplier`]
    pub multiplier: f64,
}

impl ComparisonRecord {
    /// Build a record, deriving both ratios from the counts
    pub fn new(line: usize, original: u64, new: u64) -> Self {
        Self {
            line,
            original,
            new,
            improvement_percent: improvement_percent(original, new),
            multiplier: speedup_multiplier(original, new),
        }
    }
}

/// Aggregate over all records, recomputed from summed counts
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonTotals {
    /// Sum of original counts
    pub original: u64,
    /// Sum of new counts
    pub new: u64,
    /// Improvement of the sums
    pub improvement_percent: f64,
    /// Multiplier of the sums
    pub multiplier: f64,
}

impl ComparisonTotals {
    /// Sum the counts of `records` and derive the ratios from the sums
    pub fn from_records(records: &[ComparisonRecord]) -> Self {
        let (original, new) = records.iter().fold((0u64, 0u64), |(o, n), r| {
            (o.saturating_add(r.original), n.saturating_add(r.new))
        });

        Self {
            original,
            new,
            improvement_percent: improvement_percent(original, new),
            multiplier: speedup_multiplier(original, new),
        }
    }
}

/// Bookkeeping about how the two inputs lined up
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PairingStats {
    /// Line pairs read from both inputs
    pub lines_paired: usize,
    /// Pairs dropped because either side carried no metrics
    pub pairs_skipped: usize,
    /// True if one input still had lines when the other ran out
    pub length_mismatch: bool,
}

/// Everything produced by one comparison run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonSummary {
    /// Metric that was compared
    pub metric: String,
    /// Per-line records in input order
    pub records: Vec<ComparisonRecord>,
    /// Aggregate row
    pub totals: ComparisonTotals,
    /// Pairing statistics
    pub stats: PairingStats,
}

/// A named line source
pub struct LogInput<R> {
    name: String,
    reader: R,
}

impl<R: BufRead> LogInput<R> {
    /// Wrap `reader`; `name` is used in error messages
    pub fn new(name: impl Into<String>, reader: R) -> Self {
        Self {
            name: name.into(),
            reader,
        }
    }
}

/// Compares one metric across two logs, line by line
#[derive(Debug, Clone)]
pub struct LogComparator {
    extractor: MetricExtractor,
    metric: String,
}

impl LogComparator {
    /// Create a comparator reading `metric` out of lines matched by `extractor`
    pub fn new(extractor: MetricExtractor, metric: impl Into<String>) -> Self {
        Self {
            extractor,
            metric: metric.into(),
        }
    }

    /// Metric this comparator reads
    pub fn metric(&self) -> &str {
        &self.metric
    }

    /// Read both inputs in lockstep and compare every line pair that carries metrics
    ///
    /// Reading stops at the end of the shorter input. A pair is skipped when
    /// either line lacks the marker or its body held no pairs; a present set
    /// without the compared metric counts it as zero. Read failures and
    /// non-integer metric values abort the comparison.
    pub fn compare_readers<A, B>(
        &self,
        original: LogInput<A>,
        new: LogInput<B>,
    ) -> Result<ComparisonSummary>
    where
        A: BufRead,
        B: BufRead,
    {
        let mut original_lines = LogLines::new(original.reader);
        let mut new_lines = LogLines::new(new.reader);
        let mut records = Vec::new();
        let mut stats = PairingStats::default();

        loop {
            let (original_line, new_line) = match (original_lines.next(), new_lines.next()) {
                (Some(a), Some(b)) => (a, b),
                (None, None) => break,
                (Some(_), None) | (None, Some(_)) => {
                    stats.length_mismatch = true;
                    log::warn!(
                        "{} and {} have different line counts; comparing the first {} lines",
                        original.name,
                        new.name,
                        stats.lines_paired
                    );
                    break;
                }
            };
            stats.lines_paired += 1;
            let line = stats.lines_paired;

            let original_line = original_line.map_err(|source| CompareError::Io {
                context: format!("reading line {} of {}", line, original.name),
                source,
            })?;
            let new_line = new_line.map_err(|source| CompareError::Io {
                context: format!("reading line {} of {}", line, new.name),
                source,
            })?;

            let original_metrics = self
                .extractor
                .extract(&original_line)
                .with_context(|| format!("Failed to parse line {} of {}", line, original.name))?;
            let new_metrics = self
                .extractor
                .extract(&new_line)
                .with_context(|| format!("Failed to parse line {} of {}", line, new.name))?;

            let (Some(original_set), Some(new_set)) =
                (original_metrics.non_empty(), new_metrics.non_empty())
            else {
                log::debug!(
                    "line {}: skipped (original has metrics: {}, new has metrics: {})",
                    line,
                    original_metrics.non_empty().is_some(),
                    new_metrics.non_empty().is_some()
                );
                stats.pairs_skipped += 1;
                continue;
            };

            records.push(ComparisonRecord::new(
                line,
                original_set.get(&self.metric).unwrap_or(0),
                new_set.get(&self.metric).unwrap_or(0),
            ));
        }

        if stats.pairs_skipped > 0 {
            log::warn!(
                "{} of {} line pairs had no metrics on at least one side",
                stats.pairs_skipped,
                stats.lines_paired
            );
        }

        let totals = ComparisonTotals::from_records(&records);
        Ok(ComparisonSummary {
            metric: self.metric.clone(),
            records,
            totals,
            stats,
        })
    }
}

impl Default for LogComparator {
    fn default() -> Self {
        Self::new(MetricExtractor::new(), DEFAULT_METRIC)
    }
}
