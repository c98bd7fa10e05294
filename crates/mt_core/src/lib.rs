pub mod encoding;
pub mod error;
pub mod filter;
pub mod formats;
pub mod highlight;
pub mod model;
pub mod project;
pub mod session;

pub use error::{ArchiveError, CodecError};
pub use model::{FileFormat, LanguageMap};
