//! Completions implementation
//!
//! Generates shell completion scripts for bash, zsh, fish, etc.

use clap::Command;
use clap_complete::{generate, Shell};
use std::io::Write;

/// Write a completion script for `cmd` to `out`
///
/// Users can redirect the output to their shell's completion directory.
///
/// # Examples
///
/// ```bash
/// # Bash
/// node-iter-compare --completions bash > /etc/bash_completion.d/node-iter-compare
///
/// # Zsh
/// node-iter-compare --completions zsh > ~/.zfunc/_node-iter-compare
/// ```
pub fn cmd_completions(shell: Shell, cmd: &mut Command, out: &mut dyn Write) {
    let bin_name = cmd.get_name().to_string();
    generate(shell, cmd, bin_name, out);
}
