//! Error types with contextual suggestions
//!
//! Provides structured error types that include:
//! - Actionable error messages
//! - Suggested fixes
//! - Exit codes following sysexits.h conventions
//!
//! # Examples
//!
//! ```no_run
//! use node_iter_compare::compare::LogComparison;
//! use std::path::Path;
//!
//! let comparison = LogComparison::new();
//!
//! match comparison.compare_files(Path::new("before.log"), Path::new("after.log")) {
//!     Ok(summary) => println!("{} matched lines", summary.records.len()),
//!     Err(e) => {
//!         eprintln!("Comparison failed: {}", e);
//!         std::process::exit(1);
//!     }
//! }
//! ```

use std::num::ParseIntError;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while comparing metric logs
#[derive(Error, Debug)]
pub enum CompareError {
    /// Wrong number of positional arguments
    #[error("Usage: {program} file1.log file2.log")]
    Usage {
        /// Name the program was invoked as
        program: String,
    },

    /// Input log file does not exist
    #[error("Log file not found: {path}")]
    FileNotFound {
        /// Path to missing file
        path: PathBuf,
        #[source]
        /// IO error source
        source: std::io::Error,
    },

    /// Generic I/O error with context
    #[error("I/O error: {context}")]
    Io {
        /// Context about where the error occurred
        context: String,
        #[source]
        /// IO error source
        source: std::io::Error,
    },

    /// A `key: value` pair inside the marker carried a non-integer value
    #[error("Invalid value for metric '{key}': '{value}'")]
    InvalidMetricValue {
        /// Metric name
        key: String,
        /// Raw value text
        value: String,
        #[source]
        /// Integer parse error
        source: ParseIntError,
    },

    /// Configuration file given explicitly but missing
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// Path to config file
        path: PathBuf,
        #[source]
        /// IO error source
        source: std::io::Error,
    },

    /// Configuration values failed validation
    #[error("Invalid configuration: {reason}")]
    InvalidConfig {
        /// What was wrong
        reason: String,
    },
}

impl CompareError {
    /// Get actionable suggestion for resolving this error.
    ///
    /// # Examples
    ///
    /// ```
    /// use node_iter_compare::error::CompareError;
    /// use std::path::PathBuf;
    ///
    /// let error = CompareError::FileNotFound {
    ///     path: PathBuf::from("run.log"),
    ///     source: std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
    /// };
    ///
    /// assert!(error.suggestion().unwrap().contains("run.log"));
    /// ```
    pub fn suggestion(&self) -> Option<String> {
        match self {
            Self::Usage { .. } => None,
            Self::FileNotFound { path, .. } => Some(format!(
                "Check that {} exists and is spelled correctly",
                path.display()
            )),
            Self::Io { context, .. } => Some(format!(
                "Check file permissions and that {} is accessible",
                context
            )),
            Self::InvalidMetricValue { key, .. } => Some(format!(
                "Metric '{}' must be a non-negative base-10 integer",
                key
            )),
            Self::ConfigNotFound { .. } => {
                Some("Pass an existing file to --config or omit the flag".to_string())
            }
            Self::InvalidConfig { .. } => {
                Some("Fix the value in .node-iter-compare.toml".to_string())
            }
        }
    }

    /// Get appropriate exit code for this error.
    ///
    /// # Examples
    ///
    /// ```
    /// use node_iter_compare::error::CompareError;
    ///
    /// let error = CompareError::Usage { program: "node-iter-compare".to_string() };
    /// assert_eq!(error.exit_code(), 1);
    /// ```
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Usage { .. } => 1,
            Self::FileNotFound { .. } => 66, // EX_NOINPUT (sysexits.h)
            Self::Io { .. } => 74,           // EX_IOERR
            Self::InvalidMetricValue { .. } => 65, // EX_DATAERR
            Self::ConfigNotFound { .. } => 66, // EX_NOINPUT
            Self::InvalidConfig { .. } => 65,  // EX_DATAERR
        }
    }

    /// Wrap an I/O error raised while opening `path`.
    pub fn from_open(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        if source.kind() == std::io::ErrorKind::NotFound {
            Self::FileNotFound { path, source }
        } else {
            Self::Io {
                context: format!("opening {}", path.display()),
                source,
            }
        }
    }
}

/// Error formatter with colors and structured output
pub struct ErrorFormatter;

impl ErrorFormatter {
    /// Format error with its cause chain and suggestion
    pub fn format(error: &anyhow::Error) -> String {
        use console::style;

        let mut output = String::new();

        output.push_str(&format!("{} {}\n", style("error:").red().bold(), error));

        let mut source = error.source();
        let mut indent = 1;
        while let Some(err) = source {
            output.push_str(&format!(
                "{}{} {}\n",
                "  ".repeat(indent),
                style("caused by:").yellow(),
                err
            ));
            source = err.source();
            indent += 1;
        }

        if let Some(suggestion) = error
            .downcast_ref::<CompareError>()
            .and_then(CompareError::suggestion)
        {
            output.push_str(&format!(
                "\n{} {}\n",
                style("help:").cyan().bold(),
                suggestion
            ));
        }

        output
    }

    /// Get exit code from error
    pub fn exit_code(error: &anyhow::Error) -> i32 {
        if let Some(err) = error.downcast_ref::<CompareError>() {
            err.exit_code()
        } else {
            1 // Generic error
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;

    fn parse_error() -> ParseIntError {
        "abc".parse::<u64>().unwrap_err()
    }

    #[test]
    fn test_usage_message_names_program() {
        let err = CompareError::Usage {
            program: "node-iter-compare".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Usage: node-iter-compare file1.log file2.log"
        );
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn test_exit_codes_follow_conventions() {
        let not_found = CompareError::FileNotFound {
            path: PathBuf::from("a.log"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "test"),
        };
        assert_eq!(not_found.exit_code(), 66);

        let invalid = CompareError::InvalidMetricValue {
            key: "hashed_cursor_seek_count".to_string(),
            value: "abc".to_string(),
            source: parse_error(),
        };
        assert_eq!(invalid.exit_code(), 65);

        let io = CompareError::Io {
            context: "reading a.log".to_string(),
            source: std::io::Error::other("test"),
        };
        assert_eq!(io.exit_code(), 74);
    }

    #[test]
    fn test_from_open_distinguishes_missing_files() {
        let missing = CompareError::from_open(
            "a.log",
            std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        );
        assert!(matches!(missing, CompareError::FileNotFound { .. }));

        let denied = CompareError::from_open(
            "a.log",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        match denied {
            CompareError::Io { context, .. } => assert!(context.contains("a.log")),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_invalid_metric_value_has_suggestion() {
        let err = CompareError::InvalidMetricValue {
            key: "hashed_cursor_seek_count".to_string(),
            value: "abc".to_string(),
            source: parse_error(),
        };

        let suggestion = err
            .suggestion()
            .expect("InvalidMetricValue should have suggestion");
        assert!(suggestion.contains("hashed_cursor_seek_count"));
        assert!(err.to_string().contains("'abc'"));
    }

    #[test]
    fn test_formatter_includes_cause_chain_and_help() {
        let err = anyhow::Error::new(CompareError::InvalidMetricValue {
            key: "hashed_cursor_seek_count".to_string(),
            value: "x1".to_string(),
            source: parse_error(),
        })
        .context("Failed to parse before.log line 3");

        let output = ErrorFormatter::format(&err);
        assert!(output.contains("Failed to parse before.log line 3"));
        assert!(output.contains("caused by:"));
        assert!(output.contains("'x1'"));
        assert!(output.contains("help:"));
        assert_eq!(ErrorFormatter::exit_code(&err), 65);
    }

    #[test]
    fn test_formatter_generic_error_exit_code() {
        let err = anyhow::anyhow!("something else");
        assert_eq!(ErrorFormatter::exit_code(&err), 1);
        assert!(!ErrorFormatter::format(&err).contains("help:"));
    }

    #[test]
    fn test_all_error_variants_have_nonzero_exit_codes() {
        let errors = vec![
            CompareError::Usage {
                program: "p".to_string(),
            },
            CompareError::FileNotFound {
                path: PathBuf::from("a"),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "test"),
            },
            CompareError::Io {
                context: "test".to_string(),
                source: std::io::Error::other("test"),
            },
            CompareError::InvalidMetricValue {
                key: "k".to_string(),
                value: "v".to_string(),
                source: parse_error(),
            },
            CompareError::ConfigNotFound {
                path: PathBuf::from("c.toml"),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "test"),
            },
            CompareError::InvalidConfig {
                reason: "test".to_string(),
            },
        ];

        for err in errors {
            let exit_code = err.exit_code();
            assert!(
                exit_code > 0,
                "Error {:?} should have non-zero exit code",
                err
            );
            assert!(exit_code < 256, "Exit code should fit in a byte");
        }
    }

    #[test]
    fn test_context_preserves_downcast() {
        let result: Result<(), CompareError> = Err(CompareError::InvalidConfig {
            reason: "empty metric".to_string(),
        });
        let err = result.context("Failed to load config").unwrap_err();
        assert!(err.downcast_ref::<CompareError>().is_some());
    }
}
