use mt_core::{ArchiveError, CodecError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Codec(#[from] CodecError),
    #[error(transparent)]
    Archive(#[from] ArchiveError),
    #[error("{action} {path}: {source}")]
    Io {
        action: &'static str,
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("preferences: {0}")]
    Prefs(String),
    #[error("{0}")]
    State(&'static str),
    #[error("{0}")]
    InvalidInput(String),
}

impl AppError {
    pub(crate) fn io(action: &'static str, path: &std::path::Path, source: std::io::Error) -> Self {
        AppError::Io {
            action,
            path: path.display().to_string(),
            source,
        }
    }
}
