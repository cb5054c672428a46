//! Test fixture helpers for creating log files

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A metrics-bearing log line in the format the trie walker emits
pub fn metrics_line(seek_count: u64) -> String {
    format!(
        "2024-05-01T12:00:00.000000Z  INFO reth::trie: Calculated state root \
         final_metrics=TrieNodeIterMetrics {{ branch_nodes_returned: 12, leaf_nodes_returned: 40, hashed_cursor_seek_count: {} }}",
        seek_count
    )
}

/// A log line with no metrics marker
pub fn plain_line(message: &str) -> String {
    format!("2024-05-01T12:00:00.000000Z  INFO reth::trie: {}", message)
}

/// Write `lines` (newline-terminated) to `name` inside `dir`
pub fn write_log(dir: &Path, name: &str, lines: &[String]) -> anyhow::Result<PathBuf> {
    let path = dir.join(name);
    let mut contents = lines.join("\n");
    contents.push('\n');
    fs::write(&path, contents)?;
    Ok(path)
}

/// Creates an original/new log pair in a fresh temp directory
///
/// # Returns
///
/// `(TempDir, original path, new path)` - the TempDir must be kept alive
pub fn create_log_pair(
    original: &[String],
    new: &[String],
) -> anyhow::Result<(TempDir, PathBuf, PathBuf)> {
    let temp_dir = TempDir::new()?;
    let original_path = write_log(temp_dir.path(), "original.log", original)?;
    let new_path = write_log(temp_dir.path(), "new.log", new)?;
    Ok((temp_dir, original_path, new_path))
}
