use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use diffcheck_engine::Algorithm;

#[derive(Parser)]
#[command(
    name = "diffcheck",
    about = "diffcheck — compare two texts line by line",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,

    /// Settings file (TOML)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Disable coloured output
    #[arg(long, global = true)]
    pub no_color: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Show a unified diff
    Diff(DiffArgs),
    /// Show both texts side by side
    Side(SideArgs),
    /// Show line counts and similarity
    Stats(StatsArgs),
}

#[derive(Args)]
pub struct InputArgs {
    /// Left text file, or "-" for stdin
    pub left: PathBuf,
    /// Right text file, or "-" for stdin
    pub right: PathBuf,
    /// Ignore leading spaces and tabs
    #[arg(short = 'w', long)]
    pub ignore_leading_ws: bool,
    /// Ignore these characters at the start of each line
    #[arg(long, value_name = "CHARS", conflicts_with = "ignore_leading_ws")]
    pub strip_chars: Option<String>,
    /// Matching algorithm: greedy, myers or patience
    #[arg(long)]
    pub algorithm: Option<Algorithm>,
    /// Give up refining the diff after this many milliseconds (0 for no limit)
    #[arg(long, value_name = "MS")]
    pub timeout_ms: Option<u64>,
}

#[derive(Args)]
pub struct DiffArgs {
    #[command(flatten)]
    pub input: InputArgs,
    /// Lines of context around each change
    #[arg(short = 'U', long)]
    pub context: Option<usize>,
    #[arg(long)]
    pub left_label: Option<String>,
    #[arg(long)]
    pub right_label: Option<String>,
}

#[derive(Args)]
pub struct SideArgs {
    #[command(flatten)]
    pub input: InputArgs,
    /// Lines of context around each change
    #[arg(short = 'U', long, conflicts_with = "full")]
    pub context: Option<usize>,
    /// Show every line
    #[arg(long)]
    pub full: bool,
    /// Column width for each side
    #[arg(long)]
    pub width: Option<usize>,
    /// Do not highlight changed characters
    #[arg(long)]
    pub no_intraline: bool,
}

#[derive(Args)]
pub struct StatsArgs {
    #[command(flatten)]
    pub input: InputArgs,
}
