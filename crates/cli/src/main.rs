//! `mdxblog`: build and preview the blog.

use clap::Parser;

use mdxblog_cli::args::Cli;
use mdxblog_cli::commands;
use mdxblog_cli::logging::init_logging;

fn main() {
    let cli = Cli::parse();

    if !cli.quiet {
        init_logging(cli.verbose);
    }

    if let Err(e) = commands::dispatch(cli) {
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}
