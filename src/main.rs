use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use clap_complete::Shell;
use node_iter_compare::cmd::{self, CompareOptions};
use node_iter_compare::error::{CompareError, ErrorFormatter};
use std::path::PathBuf;
use std::process;

/// Compare trie node iterator metrics between two log files
///
/// Reads both logs line by line, extracts the metric from
/// `final_metrics=TrieNodeIterMetrics { ... }` markers and prints per-line and
/// total improvement with speedup multipliers.
#[derive(Parser)]
#[command(name = "node-iter-compare", author, version, about, long_about = None)]
pub struct Cli {
    /// Original and new log files
    #[arg(value_name = "FILE")]
    files: Vec<PathBuf>,

    /// Metric to compare (default: hashed_cursor_seek_count)
    #[arg(short, long)]
    metric: Option<String>,

    /// Metrics struct name after `final_metrics=` (default: TrieNodeIterMetrics)
    #[arg(long)]
    marker: Option<String>,

    /// Config file (default: .node-iter-compare.toml in the working directory)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output as JSON
    #[arg(long)]
    json: bool,

    /// Print shell completions and exit
    #[arg(long, value_enum, value_name = "SHELL")]
    completions: Option<Shell>,
}

fn program_name() -> String {
    std::env::args_os()
        .next()
        .map(|arg| arg.to_string_lossy().into_owned())
        .unwrap_or_else(|| env!("CARGO_PKG_NAME").to_string())
}

fn exit_with_usage() -> ! {
    let usage = CompareError::Usage {
        program: program_name(),
    };
    println!("{}", usage);
    process::exit(usage.exit_code());
}

fn main() {
    // Initialize logger (use RUST_LOG env var to control verbosity)
    env_logger::init();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            e.exit()
        }
        Err(e) => {
            log::debug!("rejected arguments: {}", e);
            exit_with_usage()
        }
    };

    if let Some(shell) = cli.completions {
        cmd::cmd_completions(shell, &mut Cli::command(), &mut std::io::stdout());
        return;
    }

    let [original, new] = cli.files.as_slice() else {
        exit_with_usage()
    };

    let options = CompareOptions {
        metric: cli.metric,
        marker: cli.marker,
        config: cli.config,
        json: cli.json,
    };

    if let Err(e) = cmd::cmd_compare(original, new, &options) {
        eprintln!("{}", ErrorFormatter::format(&e));
        process::exit(ErrorFormatter::exit_code(&e));
    }
}
