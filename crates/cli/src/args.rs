//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use mdxblog_site::{DEFAULT_CONFIG_FILE, HistoryMode};

/// Build and preview the mdxblog site.
#[derive(Parser, Debug)]
#[command(name = "mdxblog", author, version, about)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,

    /// Site config file; a missing file means defaults.
    #[arg(long, global = true, default_value = DEFAULT_CONFIG_FILE, env = "MDXBLOG_CONFIG")]
    pub config: PathBuf,

    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all non-error output.
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

/// Top-level subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Render every route to static HTML files.
    Build(BuildArgs),

    /// Render one location to stdout.
    Render(RenderArgs),

    /// List the site's routes.
    Routes,
}

/// Arguments for `build`.
#[derive(Args, Debug)]
pub struct BuildArgs {
    /// Output directory (overrides `outDir`).
    #[arg(short, long)]
    pub out: Option<PathBuf>,

    /// History mode (overrides `history`).
    #[arg(long)]
    pub history: Option<HistoryArg>,

    /// Number of render threads (defaults to one per core).
    #[arg(short, long)]
    pub jobs: Option<usize>,
}

/// Arguments for `render`.
#[derive(Args, Debug)]
pub struct RenderArgs {
    /// Location to render: a path, or a URL/fragment with hash history.
    pub location: String,

    /// History mode (overrides `history`).
    #[arg(long)]
    pub history: Option<HistoryArg>,
}

/// History mode as a command-line value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum HistoryArg {
    /// In-memory history, plain path links.
    Memory,
    /// Hash-fragment history, `#/path` links.
    Hash,
}

impl From<HistoryArg> for HistoryMode {
    fn from(arg: HistoryArg) -> Self {
        match arg {
            HistoryArg::Memory => HistoryMode::Memory,
            HistoryArg::Hash => HistoryMode::Hash,
        }
    }
}
