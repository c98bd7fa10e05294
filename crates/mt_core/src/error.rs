use mt_archive::ContainerError;
use thiserror::Error;

use crate::model::FileFormat;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    #[error("failed to parse {format} file: {message}")]
    Parse { format: FileFormat, message: String },
    #[error("unsupported file format {0:?}, use a .json or .lang file")]
    UnsupportedFormat(String),
    #[error("file is not valid UTF-8 text")]
    InvalidUtf8,
}

#[derive(Debug, Error)]
pub enum ArchiveError {
    #[error("project files must have the .mcta extension: {0}")]
    InvalidExtension(String),
    #[error("invalid project archive: {0}")]
    Container(#[from] ContainerError),
    #[error("project archive does not contain {0}")]
    MissingEntry(String),
    #[error("invalid project manifest: {0}")]
    InvalidManifest(String),
    #[error("failed to load {entry} from project archive: {source}")]
    Decode {
        entry: String,
        #[source]
        source: CodecError,
    },
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
