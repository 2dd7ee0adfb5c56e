//! Error taxonomy for the generator. Every variant is fatal.

use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The Go source could not be parsed.
    #[error("{}:{line}: {message}", path.display())]
    SourceParse {
        path: PathBuf,
        line: usize,
        message: String,
    },

    /// A doc comment line carried a key outside Description/Syntax/Default
    /// before any field was established.
    #[error("directive {directive}: unknown field {key:?}")]
    UnknownField { directive: String, key: String },

    #[error("template line {line}: {message}")]
    Template { line: usize, message: String },

    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }
}
