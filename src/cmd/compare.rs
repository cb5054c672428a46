//! Compare command implementation
//!
//! Loads configuration, compares the metric across two log files and writes
//! the table (or JSON) to stdout.

use anyhow::{Context, Result};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::compare::LogComparison;
use crate::config::{CompareConfig, ConfigLoader};
use crate::infra::{FileSystem, RealFileSystem};

/// Options accepted by the compare command
#[derive(Debug, Clone, Default)]
pub struct CompareOptions {
    /// Metric name overriding the config file
    pub metric: Option<String>,
    /// Metrics struct name overriding the config file
    pub marker: Option<String>,
    /// Explicit config file; otherwise `.node-iter-compare.toml` in the working directory
    pub config: Option<PathBuf>,
    /// Emit JSON instead of the table
    pub json: bool,
}

/// Compare two log files and print the result to stdout
///
/// # Examples
///
/// ```no_run
/// use node_iter_compare::cmd::compare::{cmd_compare, CompareOptions};
/// use std::path::Path;
///
/// cmd_compare(Path::new("before.log"), Path::new("after.log"), &CompareOptions::default())?;
/// # Ok::<(), anyhow::Error>(())
/// ```
///
/// # Errors
///
/// Returns an error if:
/// - Either file cannot be opened or read
/// - A metric value is not an integer
/// - The configuration is missing or invalid
pub fn cmd_compare(original: &Path, new: &Path, options: &CompareOptions) -> Result<()> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    cmd_compare_impl(
        original,
        new,
        options,
        Path::new("."),
        RealFileSystem,
        &mut out,
    )
}

/// Resolve the effective configuration from file and flag values
pub fn resolve_config<FS: FileSystem>(
    options: &CompareOptions,
    config_dir: &Path,
    fs: &FS,
) -> Result<CompareConfig> {
    let config = match &options.config {
        Some(path) => ConfigLoader::load_path_with_fs(path, fs)?,
        None => ConfigLoader::load_with_fs(config_dir, fs)?,
    };

    Ok(config.with_overrides(options.metric.as_deref(), options.marker.as_deref()))
}

/// Internal implementation with injectable filesystem and output
pub(crate) fn cmd_compare_impl<FS: FileSystem, W: Write>(
    original: &Path,
    new: &Path,
    options: &CompareOptions,
    config_dir: &Path,
    fs: FS,
    out: &mut W,
) -> Result<()> {
    let config = resolve_config(options, config_dir, &fs)?;
    let comparison = LogComparison::from_config_with_fs(&config, fs)?;

    let summary = comparison.compare_files(original, new)?;

    let rendered = if options.json {
        let mut json = comparison.render_json(&summary)?;
        json.push('\n');
        json
    } else {
        comparison.render_table(&summary)
    };

    out.write_all(rendered.as_bytes())
        .context("Failed to write comparison report")?;

    Ok(())
}
