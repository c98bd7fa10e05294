use std::path::{Path, PathBuf};

use chrono::{SecondsFormat, Utc};
use mt_archive::{read_container, write_container, Container};
use serde::{Deserialize, Serialize};

use crate::encoding::decode_text;
use crate::error::ArchiveError;
use crate::formats::{decode, encode};
use crate::model::{FileFormat, LanguageMap};

pub const PROJECT_EXTENSION: &str = "mcta";
pub const MANIFEST_ENTRY: &str = "meta.json";
pub const MANIFEST_VERSION: &str = "1.0";
pub const DEFAULT_PROJECT_NAME: &str = "minecraft_translation_project";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Manifest {
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub created: String,
    pub source_format: FileFormat,
    pub target_format: FileFormat,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectContents {
    pub source: LanguageMap,
    pub target: LanguageMap,
    pub source_format: FileFormat,
    pub target_format: FileFormat,
    pub manifest: Option<Manifest>,
}

pub fn source_entry_name(format: FileFormat) -> String {
    format!("source.{}", format.extension())
}

pub fn target_entry_name(format: FileFormat) -> String {
    format!("target.{}", format.extension())
}

pub fn project_file_name(base_name: &str) -> String {
    let suffix = format!(".{PROJECT_EXTENSION}");
    if base_name.ends_with(&suffix) {
        base_name.to_string()
    } else {
        format!("{base_name}{suffix}")
    }
}

pub fn ensure_project_extension(file_name: &str) -> Result<(), ArchiveError> {
    let is_project = file_name
        .rsplit_once('.')
        .is_some_and(|(_, ext)| ext.eq_ignore_ascii_case(PROJECT_EXTENSION));
    if is_project {
        Ok(())
    } else {
        Err(ArchiveError::InvalidExtension(file_name.to_string()))
    }
}

/// Builds the archive bytes. The file name comes from [`project_file_name`].
pub fn pack(
    source: &LanguageMap,
    target: &LanguageMap,
    source_format: FileFormat,
    target_format: FileFormat,
) -> Result<Vec<u8>, ArchiveError> {
    let manifest = Manifest {
        version: MANIFEST_VERSION.to_string(),
        created: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        source_format,
        target_format,
    };
    let manifest_json = serde_json::to_string_pretty(&manifest)
        .map_err(|err| ArchiveError::InvalidManifest(err.to_string()))?;

    let mut container = Container::new();
    container.push(source_entry_name(source_format), encode(source, source_format))?;
    container.push(target_entry_name(target_format), encode(target, target_format))?;
    container.push(MANIFEST_ENTRY, manifest_json)?;
    let bytes = write_container(&container)?;

    tracing::info!(
        source_entries = source.len(),
        target_entries = target.len(),
        %source_format,
        %target_format,
        bytes = bytes.len(),
        "packed project"
    );
    Ok(bytes)
}

pub fn unpack(bytes: &[u8]) -> Result<ProjectContents, ArchiveError> {
    let container = read_container(bytes)?;
    let manifest = match container.get(MANIFEST_ENTRY) {
        Some(raw) => Some(parse_manifest(raw)?),
        // Without a manifest both documents are read as json.
        None => {
            tracing::warn!("project archive has no {MANIFEST_ENTRY}, reading json documents");
            None
        }
    };
    let (source_format, target_format) = manifest
        .as_ref()
        .map_or((FileFormat::Json, FileFormat::Json), |m| {
            (m.source_format, m.target_format)
        });

    let source = decode_entry(&container, &source_entry_name(source_format), source_format)?;
    let target = decode_entry(&container, &target_entry_name(target_format), target_format)?;

    tracing::info!(
        source_entries = source.len(),
        target_entries = target.len(),
        %source_format,
        %target_format,
        "unpacked project"
    );
    Ok(ProjectContents {
        source,
        target,
        source_format,
        target_format,
        manifest,
    })
}

pub fn write_project_file(
    dir: &Path,
    base_name: &str,
    source: &LanguageMap,
    target: &LanguageMap,
    source_format: FileFormat,
    target_format: FileFormat,
) -> Result<PathBuf, ArchiveError> {
    let bytes = pack(source, target, source_format, target_format)?;
    let path = dir.join(project_file_name(base_name));
    std::fs::write(&path, bytes)?;
    tracing::info!(path = %path.display(), "wrote project file");
    Ok(path)
}

pub fn read_project_file(path: &Path) -> Result<ProjectContents, ArchiveError> {
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    ensure_project_extension(&file_name)?;
    let bytes = std::fs::read(path)?;
    unpack(&bytes)
}

fn parse_manifest(raw: &[u8]) -> Result<Manifest, ArchiveError> {
    serde_json::from_slice(raw).map_err(|err| ArchiveError::InvalidManifest(err.to_string()))
}

fn decode_entry(
    container: &Container,
    name: &str,
    format: FileFormat,
) -> Result<LanguageMap, ArchiveError> {
    let raw = container
        .get(name)
        .ok_or_else(|| ArchiveError::MissingEntry(name.to_string()))?;
    decode_text(raw)
        .and_then(|text| decode(&text, format))
        .map_err(|source| ArchiveError::Decode {
            entry: name.to_string(),
            source,
        })
}
