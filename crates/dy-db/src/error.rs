use std::path::PathBuf;

use thiserror::Error;

/// Database-layer failure during projection. The first error aborts the
/// run; a partially written target file is considered corrupt and the
/// caller discards it.
#[derive(Debug, Error)]
pub enum ProjectError {
    #[error("database error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("{path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ProjectError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ProjectError::Io { path: path.into(), source }
    }
}
