//! Configuration file data structures

use crate::error::CompareError;
use crate::metrics::{DEFAULT_MARKER, DEFAULT_METRIC};
use serde::{Deserialize, Serialize};

/// Configuration file name
pub const CONFIG_FILE_NAME: &str = ".node-iter-compare.toml";

/// node-iter-compare configuration file structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompareConfig {
    /// Metric to compare between the two logs
    #[serde(default = "default_metric")]
    pub metric: String,

    /// Metrics struct name following `final_metrics=`
    #[serde(default = "default_marker")]
    pub marker: String,
}

fn default_metric() -> String {
    DEFAULT_METRIC.to_string()
}

fn default_marker() -> String {
    DEFAULT_MARKER.to_string()
}

impl CompareConfig {
    /// Apply command-line overrides on top of file values
    pub fn with_overrides(mut self, metric: Option<&str>, marker: Option<&str>) -> Self {
        if let Some(metric) = metric {
            self.metric = metric.to_string();
        }
        if let Some(marker) = marker {
            self.marker = marker.to_string();
        }
        self
    }

    /// Reject blank names and names containing marker delimiters
    pub fn validate(&self) -> Result<(), CompareError> {
        let metric = self.metric.trim();
        if metric.is_empty() {
            return Err(CompareError::InvalidConfig {
                reason: "metric name must not be empty".to_string(),
            });
        }
        if metric.contains([':', ',', '{', '}']) {
            return Err(CompareError::InvalidConfig {
                reason: format!("metric name '{}' cannot contain ':', ',', '{{' or '}}'", metric),
            });
        }

        let marker = self.marker.trim();
        if marker.is_empty() {
            return Err(CompareError::InvalidConfig {
                reason: "marker struct name must not be empty".to_string(),
            });
        }
        if marker.contains(char::is_whitespace) || marker.contains(['{', '}']) {
            return Err(CompareError::InvalidConfig {
                reason: format!(
                    "marker '{}' must be a single struct name without braces",
                    marker
                ),
            });
        }

        Ok(())
    }
}

impl Default for CompareConfig {
    fn default() -> Self {
        Self {
            metric: default_metric(),
            marker: default_marker(),
        }
    }
}
