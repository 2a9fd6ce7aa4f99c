//! Error type shared by the vault passes.

use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, OntologyError>;

#[derive(Debug, thiserror::Error)]
pub enum OntologyError {
    #[error("IO error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("directory walk failed: {0}")]
    Walk(#[from] walkdir::Error),
}

impl OntologyError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        OntologyError::Io {
            path: path.into(),
            source,
        }
    }
}
