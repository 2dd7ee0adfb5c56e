//! Generation pipeline: parse sources, extract directives, render, write.

use crate::config::Config;
use crate::error::{Error, Result};
use crate::parser::{self, directive};
use crate::render;
use chrono::{Local, SecondsFormat};
use std::collections::HashSet;
use std::fs;
use std::path::PathBuf;

/// Current local time as RFC 3339 with second precision.
pub fn timestamp() -> String {
    Local::now().to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Run the generator and return the pages written (or, in dry-run mode,
/// the pages that would be written), in processing order.
pub fn run(config: &Config) -> Result<Vec<PathBuf>> {
    run_with_clock(config, timestamp)
}

/// Like [`run`] with a custom source for `LastModification`.
///
/// Every source is parsed before the first page is written, so a syntax
/// error leaves the output directory untouched. Doc comment errors abort at
/// the offending directive; pages already written stay.
pub fn run_with_clock(config: &Config, now: impl Fn() -> String) -> Result<Vec<PathBuf>> {
    let template = render::load(&config.template)?;

    let mut files = Vec::with_capacity(config.sources.len());
    for path in &config.sources {
        let file = parser::parse_file(path)?;
        tracing::debug!(
            path = %path.display(),
            package = %file.package,
            decls = file.decls.len(),
            documented = file.decls.iter().filter(|d| d.doc().is_some()).count(),
            "parsed source"
        );
        files.push((path, file));
    }

    if !config.dry_run {
        fs::create_dir_all(&config.output_dir).map_err(|e| Error::io(&config.output_dir, e))?;
    }

    let mut seen = HashSet::new();
    let mut pages = Vec::new();
    for (path, file) in &files {
        for candidate in directive::select(file, &config.prefix) {
            let record = directive::parse(candidate.name, &candidate.doc, &config.prefix, &now())?;
            let page = render::render(&template, &record);
            let out_path = config
                .output_dir
                .join(format!("{}.{}", record.name, render::FILE_EXTENSION));

            if !seen.insert(record.name.clone()) {
                tracing::warn!(
                    directive = %record.name,
                    source = %path.display(),
                    line = candidate.decl.line,
                    "directive documented twice, overwriting previous page"
                );
            }

            if config.dry_run {
                tracing::info!(page = %out_path.display(), "would write");
            } else {
                fs::write(&out_path, page).map_err(|e| Error::io(&out_path, e))?;
                tracing::info!(page = %out_path.display(), "wrote");
            }
            pages.push(out_path);
        }
    }
    Ok(pages)
}
