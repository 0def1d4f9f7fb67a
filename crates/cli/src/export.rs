//! Static export.
//!
//! Memory history writes every route to `<out>/<path>/index.html` next to
//! its stylesheets. Hash history writes a single `<out>/index.html` holding
//! every view, switched by the URL fragment.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use mdxblog_site::{
    HistoryMode, PRISM_CSS, SiteConfig, Stylesheet, render_hash_bundle, render_location,
    site_routes,
};
use rayon::prelude::*;

/// What an export wrote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportSummary {
    /// HTML files written, in route order.
    pub pages: Vec<PathBuf>,
    /// Stylesheets written.
    pub assets: Vec<PathBuf>,
    /// Wall-clock time of the export.
    pub elapsed: Duration,
}

/// File a route path is written to: `/blog/jeremy/` → `<out>/blog/jeremy/index.html`.
pub fn page_file(out: &Path, route_path: &str) -> PathBuf {
    let mut file = out.to_path_buf();
    file.extend(route_path.split('/').filter(|segment| !segment.is_empty()));
    file.push("index.html");
    file
}

fn asset_file(out: &Path, href: &str) -> PathBuf {
    let mut file = out.to_path_buf();
    file.extend(href.split('/').filter(|segment| !segment.is_empty()));
    file
}

fn write_file(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("cannot create directory {}", parent.display()))?;
    }
    fs::write(path, contents).with_context(|| format!("cannot write {}", path.display()))
}

/// Renders the site into `out` for the configured history.
///
/// Memory history renders `jobs` pages at a time (all cores when `None`);
/// the hash bundle is a single render and ignores `jobs`.
pub fn export_site(config: &SiteConfig, out: &Path, jobs: Option<usize>) -> Result<ExportSummary> {
    let start = Instant::now();
    let (pages, assets) = match config.history {
        HistoryMode::Memory => export_pages(config, out, jobs)?,
        HistoryMode::Hash => export_bundle(config, out)?,
    };

    let summary = ExportSummary {
        pages,
        assets,
        elapsed: start.elapsed(),
    };
    log::info!(
        "exported {} pages and {} stylesheets to {} in {:?}",
        summary.pages.len(),
        summary.assets.len(),
        out.display(),
        summary.elapsed
    );
    Ok(summary)
}

fn export_bundle(config: &SiteConfig, out: &Path) -> Result<(Vec<PathBuf>, Vec<PathBuf>)> {
    let html = render_hash_bundle(config)?;
    let file = page_file(out, "/");
    write_file(&file, &html)?;
    Ok((vec![file], Vec::new()))
}

fn export_pages(
    config: &SiteConfig,
    out: &Path,
    jobs: Option<usize>,
) -> Result<(Vec<PathBuf>, Vec<PathBuf>)> {
    let routes = site_routes()?;

    let render_page = |path: &'static str| -> Result<PathBuf> {
        let (page, html) = render_location(path, config)?;
        let file = page_file(out, path);
        write_file(&file, &html)?;
        log::debug!("wrote {} ({} headings)", file.display(), page.headings.len());
        Ok(file)
    };

    let paths = routes.paths();
    let pool = match jobs {
        Some(threads) => Some(
            rayon::ThreadPoolBuilder::new()
                .num_threads(threads)
                .build()
                .context("cannot start render threads")?,
        ),
        None => None,
    };
    let pages: Result<Vec<PathBuf>> = match pool {
        Some(pool) => pool.install(|| paths.into_par_iter().map(render_page).collect()),
        None => paths.into_par_iter().map(render_page).collect(),
    };
    let pages = pages?;

    let mut stylesheets: Vec<&Stylesheet> = vec![&PRISM_CSS];
    for route in routes.iter() {
        for sheet in route.stylesheets() {
            if !stylesheets.iter().any(|seen| seen.href == sheet.href) {
                stylesheets.push(sheet);
            }
        }
    }
    let mut assets = Vec::with_capacity(stylesheets.len());
    for sheet in stylesheets {
        let file = asset_file(out, sheet.href);
        write_file(&file, sheet.contents)?;
        assets.push(file);
    }
    Ok((pages, assets))
}
