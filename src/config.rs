//! Generator configuration.

use std::path::PathBuf;

/// Directives file of a Coraza checkout next to the docs site.
pub const DEFAULT_SOURCE: &str = "./coraza/internal/seclang/directives.go";

/// Hugo content directory for directive pages.
pub const DEFAULT_OUTPUT_DIR: &str = "./content/docs/seclang/directives";

/// Name prefix marking a function as a directive handler.
pub const DEFAULT_PREFIX: &str = "directive";

/// Where the page template comes from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TemplateSource {
    #[default]
    Embedded,
    File(PathBuf),
}

/// Everything the pipeline needs; built by the CLI or directly in tests.
#[derive(Debug, Clone)]
pub struct Config {
    /// Go source files, processed in order
    pub sources: Vec<PathBuf>,
    pub output_dir: PathBuf,
    pub template: TemplateSource,
    pub prefix: String,
    /// Parse and render without writing files
    pub dry_run: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            sources: vec![PathBuf::from(DEFAULT_SOURCE)],
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            template: TemplateSource::Embedded,
            prefix: DEFAULT_PREFIX.to_string(),
            dry_run: false,
        }
    }
}
