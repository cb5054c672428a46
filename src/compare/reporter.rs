//! Comparison table and JSON rendering

use super::comparator::{ComparisonSummary, PairingStats};
use crate::fmt::{format_multiplier, format_percent, separator};
use anyhow::{Context, Result};
use serde::Serialize;

/// Handles comparison output
pub struct ComparisonReporter;

impl ComparisonReporter {
    /// Create a new comparison reporter
    pub fn new() -> Self {
        Self
    }

    /// Render the fixed-width table: header, one row per record, totals
    pub fn render_table(&self, summary: &ComparisonSummary) -> String {
        let mut out = String::new();

        out.push_str(&format!(
            "{:^10} | {:^15} | {:^15} | {:^15} | {:^15}\n",
            "Line", "Original", "New", "Improvement", "Multiplier"
        ));
        out.push_str(&separator());
        out.push('\n');

        for (index, record) in summary.records.iter().enumerate() {
            out.push_str(&row(
                &(index + 1).to_string(),
                record.original,
                record.new,
                record.improvement_percent,
                record.multiplier,
            ));
        }

        out.push_str(&separator());
        out.push('\n');
        out.push_str(&row(
            "Total",
            summary.totals.original,
            summary.totals.new,
            summary.totals.improvement_percent,
            summary.totals.multiplier,
        ));

        out
    }

    /// Render the summary as pretty-printed JSON
    pub fn render_json(&self, summary: &ComparisonSummary) -> Result<String> {
        let report = JsonReport {
            metric: &summary.metric,
            records: summary
                .records
                .iter()
                .enumerate()
                .map(|(index, r)| JsonRow {
                    row: Some(index + 1),
                    line: Some(r.line),
                    original: r.original,
                    new: r.new,
                    improvement_percent: r.improvement_percent,
                    multiplier: finite(r.multiplier),
                    infinite: r.multiplier.is_infinite(),
                })
                .collect(),
            totals: JsonRow {
                row: None,
                line: None,
                original: summary.totals.original,
                new: summary.totals.new,
                improvement_percent: summary.totals.improvement_percent,
                multiplier: finite(summary.totals.multiplier),
                infinite: summary.totals.multiplier.is_infinite(),
            },
            stats: &summary.stats,
        };

        serde_json::to_string_pretty(&report).context("Failed to serialize comparison")
    }
}

impl Default for ComparisonReporter {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Serialize)]
struct JsonReport<'a> {
    metric: &'a str,
    records: Vec<JsonRow>,
    totals: JsonRow,
    stats: &'a PairingStats,
}

#[derive(Serialize)]
struct JsonRow {
    #[serde(skip_serializing_if = "Option::is_none")]
    row: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    line: Option<usize>,
    original: u64,
    new: u64,
    improvement_percent: f64,
    multiplier: Option<f64>,
    infinite: bool,
}

fn finite(value: f64) -> Option<f64> {
    value.is_finite().then_some(value)
}

fn row(label: &str, original: u64, new: u64, improvement: f64, multiplier: f64) -> String {
    format!(
        "{:^10} | {:^15} | {:^15} | {} | {:^15}\n",
        label,
        original,
        new,
        format_percent(improvement),
        format_multiplier(multiplier)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compare::comparator::{ComparisonRecord, ComparisonTotals};

    fn summary(records: Vec<ComparisonRecord>) -> ComparisonSummary {
        let totals = ComparisonTotals::from_records(&records);
        ComparisonSummary {
            metric: "hashed_cursor_seek_count".to_string(),
            records,
            totals,
            stats: PairingStats::default(),
        }
    }

    #[test]
    fn test_render_table_layout() {
        let table = ComparisonReporter::new().render_table(&summary(vec![
            ComparisonRecord::new(1, 100, 25),
            ComparisonRecord::new(3, 10, 0),
        ]));
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(
            lines[0],
            "   Line    |    Original     |       New       |   Improvement   |   Multiplier   "
        );
        assert_eq!(lines[1], "-".repeat(80));
        assert_eq!(
            lines[2],
            "    1      |       100       |       25        | 75.00% |      4.00x     "
        );
        assert_eq!(
            lines[3],
            "    2      |       10        |        0        | 100.00% |        ∞       "
        );
        assert_eq!(lines[4], "-".repeat(80));
        assert_eq!(
            lines[5],
            "  Total    |       110       |       25        | 77.27% |      4.40x     "
        );
        assert_eq!(lines.len(), 6);
    }

    #[test]
    fn test_render_table_without_records_has_zero_totals() {
        let table = ComparisonReporter::new().render_table(&summary(vec![]));
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines.len(), 4);
        assert_eq!(
            lines[3],
            "  Total    |        0        |        0        | 0.00% |      1.00x     "
        );
    }

    #[test]
    fn test_render_json_marks_infinite_multiplier() {
        let json = ComparisonReporter::new()
            .render_json(&summary(vec![ComparisonRecord::new(7, 10, 0)]))
            .unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["metric"], "hashed_cursor_seek_count");
        assert_eq!(value["records"][0]["row"], 1);
        assert_eq!(value["records"][0]["line"], 7);
        assert!(value["records"][0]["multiplier"].is_null());
        assert_eq!(value["records"][0]["infinite"], true);
        assert_eq!(value["totals"]["original"], 10);
        assert!(value["totals"].get("row").is_none());
        assert_eq!(value["stats"]["pairs_skipped"], 0);
    }
}
