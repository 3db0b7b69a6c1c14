use std::path::PathBuf;

use clap::Parser;

/// Gardener - keeps filegroup source rules in BUILD files current
#[derive(Parser, Debug)]
#[command(name = "gardener")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Root of the source tree (defaults to the current directory)
    pub root: Option<PathBuf>,

    /// Output NDJSON events for CI
    #[arg(long)]
    pub json: bool,

    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, conflicts_with = "quiet")]
    pub verbose: u8,

    /// Only print warnings and errors
    #[arg(short, long)]
    pub quiet: bool,

    /// Config file to use instead of .gardener.toml / the user config
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}
