//! Renderer module: template loading and page rendering.

pub mod entities;
pub mod template;

use crate::config::TemplateSource;
use crate::error::{Error, Result};
use crate::model::Directive;
use std::fs;

pub use template::Template;

/// Page layout compiled into the binary.
pub const DEFAULT_TEMPLATE: &str = include_str!("../../templates/directive.md");

/// Extension of generated pages.
pub const FILE_EXTENSION: &str = "md";

/// Load and parse the configured template.
pub fn load(source: &TemplateSource) -> Result<Template> {
    match source {
        TemplateSource::Embedded => Template::parse(DEFAULT_TEMPLATE),
        TemplateSource::File(path) => {
            let text = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
            Template::parse(&text)
        }
    }
}

/// Render a directive page.
///
/// Entities produced by value escaping are decoded again so the Markdown
/// contains literal quotes and angle brackets.
pub fn render(template: &Template, directive: &Directive) -> String {
    entities::unescape(&template.execute(directive))
}
