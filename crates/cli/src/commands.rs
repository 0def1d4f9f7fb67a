//! Subcommand dispatch.

use std::io::Write;

use anyhow::{Context, Result};
use mdxblog_site::{SiteConfig, render_location, site_routes};

use crate::args::{BuildArgs, Cli, Commands, RenderArgs};
use crate::export::export_site;

/// Runs the parsed command line.
pub fn dispatch(cli: Cli) -> Result<()> {
    let config = SiteConfig::load_or_default(&cli.config)
        .with_context(|| format!("loading {}", cli.config.display()))?;

    match cli.command {
        Commands::Build(args) => build(config, args, cli.quiet),
        Commands::Render(args) => render(config, args),
        Commands::Routes => routes(),
    }
}

fn build(mut config: SiteConfig, args: BuildArgs, quiet: bool) -> Result<()> {
    if let Some(out) = args.out {
        config.out_dir = out;
    }
    if let Some(history) = args.history {
        config.history = history.into();
    }

    let summary = export_site(&config, &config.out_dir, args.jobs)?;
    if !quiet {
        println!(
            "Built {} pages ({} history) into {} in {:.2?}",
            summary.pages.len(),
            config.history,
            config.out_dir.display(),
            summary.elapsed
        );
    }
    Ok(())
}

fn render(mut config: SiteConfig, args: RenderArgs) -> Result<()> {
    if let Some(history) = args.history {
        config.history = history.into();
    }
    let (page, html) = render_location(&args.location, &config)?;
    if !page.matched() {
        log::warn!("no route matches {}", args.location);
    }
    let mut stdout = std::io::stdout().lock();
    stdout.write_all(html.as_bytes())?;
    stdout.flush()?;
    Ok(())
}

fn routes() -> Result<()> {
    let mut stdout = std::io::stdout().lock();
    for route in site_routes()?.iter() {
        writeln!(stdout, "{:<40} {}", route.path, route.label)?;
    }
    Ok(())
}
