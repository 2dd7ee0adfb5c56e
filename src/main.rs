//! directivesgen: generate SecLang directive pages from annotated Go sources.
//!
//! Every documented `func directiveXxx` in the directives file becomes
//! `Xxx.md` in the output directory:
//!
//! - `directivesgen` (paths default to a Coraza checkout beside the docs site)
//! - `directivesgen -o content/docs/seclang/directives coraza/internal/seclang/*.go`

mod config;
mod error;
mod generate;
mod model;
mod parser;
mod render;

use anyhow::{Context, Result};
use clap::Parser;
use config::{Config, TemplateSource};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "directivesgen",
    version,
    about = "Generate directive documentation from annotated Go sources"
)]
struct Cli {
    /// Go source files (glob patterns and directories supported)
    #[arg(default_value = config::DEFAULT_SOURCE)]
    sources: Vec<String>,

    /// Output directory for generated pages
    #[arg(short = 'o', long, default_value = config::DEFAULT_OUTPUT_DIR)]
    output: PathBuf,

    /// Page template file. Defaults to the built-in template.
    #[arg(short = 't', long)]
    template: Option<PathBuf>,

    /// Function name prefix marking directive handlers
    #[arg(long, default_value = config::DEFAULT_PREFIX)]
    prefix: String,

    /// Parse and render, print target paths, write nothing
    #[arg(long)]
    dry_run: bool,

    /// Log every page written
    #[arg(short = 'v', long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // --verbose enables INFO, otherwise RUST_LOG or WARN
    let filter = if cli.verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    if cli.prefix.is_empty() {
        anyhow::bail!("--prefix must not be empty");
    }

    let sources = resolve_sources(&cli.sources)?;
    if sources.is_empty() {
        anyhow::bail!("no source files matched: {}", cli.sources.join(", "));
    }

    let config = Config {
        sources,
        output_dir: cli.output,
        template: cli.template.map_or(TemplateSource::Embedded, TemplateSource::File),
        prefix: cli.prefix,
        dry_run: cli.dry_run,
    };

    let pages = generate::run(&config).context("directive generation failed")?;
    if config.dry_run {
        for page in &pages {
            println!("{}", page.display());
        }
    }
    tracing::info!(count = pages.len(), "done");
    Ok(())
}

/// File extension of Go sources.
const GO_EXTENSION: &str = "go";

/// Resolve command-line sources into a sorted, duplicate-free file list.
///
/// Files are taken as given, a directory stands for its `.go` files
/// (non-recursive) and anything else is a glob pattern.
fn resolve_sources(args: &[String]) -> Result<Vec<PathBuf>> {
    let mut files = BTreeSet::new();
    for arg in args {
        let path = Path::new(arg);
        if path.is_file() {
            files.insert(path.to_path_buf());
            continue;
        }
        let pattern = if path.is_dir() {
            format!("{}/*.{GO_EXTENSION}", glob::Pattern::escape(arg))
        } else {
            arg.clone()
        };
        let mut found = 0;
        for file in glob::glob(&pattern)
            .with_context(|| format!("invalid source pattern: {arg}"))?
            .flatten()
            .filter(|p| p.is_file())
        {
            found += 1;
            files.insert(file);
        }
        if found == 0 {
            tracing::warn!(source = %arg, "no Go sources found");
        }
    }
    Ok(files.into_iter().collect())
}
