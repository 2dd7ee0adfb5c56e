//! Parser module: Go source scanning and directive doc comments.

pub mod ast;
pub mod directive;
pub mod go;
pub mod lexer;

use crate::error::{Error, Result};
use ast::SourceFile;
use std::fs;
use std::path::Path;

/// Read and parse a Go source file.
pub fn parse_file(path: &Path) -> Result<SourceFile> {
    let content = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
    go::parse(path, &content)
}
