use std::io::{Cursor, Read, Write};

use thiserror::Error;
use zip::result::ZipError;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

pub type ContainerResult<T> = Result<T, ContainerError>;

pub const MAX_ENTRY_SIZE: u64 = 64 * 1024 * 1024;

// Declared sizes are untrusted, so preallocation never goes beyond this.
const READ_BUFFER_HINT: u64 = 64 * 1024;

#[derive(Debug, Error)]
pub enum ContainerError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("corrupt container: {0}")]
    Zip(#[from] ZipError),
    #[error("duplicate entry: {0}")]
    DuplicateEntry(String),
    #[error("entry too large: {0}")]
    EntryTooLarge(String),
    #[error("entry {name} declares {declared} bytes but holds {actual}")]
    SizeMismatch {
        name: String,
        declared: u64,
        actual: u64,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerEntry {
    pub name: String,
    pub data: Vec<u8>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Container {
    entries: Vec<ContainerEntry>,
}

impl Container {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, name: impl Into<String>, data: impl Into<Vec<u8>>) -> ContainerResult<()> {
        let name = name.into();
        if self.contains(&name) {
            return Err(ContainerError::DuplicateEntry(name));
        }
        self.entries.push(ContainerEntry {
            name,
            data: data.into(),
        });
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&[u8]> {
        self.entries
            .iter()
            .find(|entry| entry.name == name)
            .map(|entry| entry.data.as_slice())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|entry| entry.name == name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|entry| entry.name.as_str())
    }

    pub fn entries(&self) -> &[ContainerEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    // Later entries with the same name shadow earlier ones.
    fn insert_or_replace(&mut self, name: String, data: Vec<u8>) {
        if let Some(existing) = self.entries.iter_mut().find(|entry| entry.name == name) {
            tracing::warn!(entry = %name, "duplicate container entry, keeping the last one");
            existing.data = data;
        } else {
            self.entries.push(ContainerEntry { name, data });
        }
    }
}

fn entry_options() -> SimpleFileOptions {
    SimpleFileOptions::default().compression_method(CompressionMethod::Deflated)
}

pub fn write_container(container: &Container) -> ContainerResult<Vec<u8>> {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    for entry in container.entries() {
        writer.start_file(entry.name.as_str(), entry_options())?;
        writer.write_all(&entry.data)?;
    }
    let bytes = writer.finish()?.into_inner();
    tracing::debug!(
        entries = container.len(),
        bytes = bytes.len(),
        "container written"
    );
    Ok(bytes)
}

pub fn read_container(bytes: &[u8]) -> ContainerResult<Container> {
    let mut archive = ZipArchive::new(Cursor::new(bytes))?;
    let mut container = Container::new();
    for index in 0..archive.len() {
        let file = archive.by_index(index)?;
        if file.is_dir() {
            continue;
        }
        let name = file.name().to_string();
        if file.size() > MAX_ENTRY_SIZE {
            return Err(ContainerError::EntryTooLarge(name));
        }
        let declared = file.size();
        let mut data = Vec::with_capacity(declared.min(READ_BUFFER_HINT) as usize);
        file.take(MAX_ENTRY_SIZE + 1).read_to_end(&mut data)?;
        let actual = data.len() as u64;
        if actual > MAX_ENTRY_SIZE {
            return Err(ContainerError::EntryTooLarge(name));
        }
        if actual != declared {
            return Err(ContainerError::SizeMismatch {
                name,
                declared,
                actual,
            });
        }
        container.insert_or_replace(name, data);
    }
    tracing::debug!(entries = container.len(), "container read");
    Ok(container)
}
