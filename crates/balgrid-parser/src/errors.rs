use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("file did not contain a header row")]
    EmptyHeader,

    #[error("required column '{column}' not found; header was {header:?}")]
    MissingColumn { column: String, header: Vec<String> },
}
