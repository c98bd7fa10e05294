pub mod json;
pub mod lang;

use crate::encoding::decode_text;
use crate::error::CodecError;
use crate::model::{FileFormat, LanguageMap};

pub fn decode(text: &str, format: FileFormat) -> Result<LanguageMap, CodecError> {
    let map = match format {
        FileFormat::Json => json::read_json(text)?,
        FileFormat::Lang => lang::read_lang(text),
    };
    tracing::debug!(%format, entries = map.len(), "decoded language file");
    Ok(map)
}

pub fn encode(map: &LanguageMap, format: FileFormat) -> String {
    match format {
        FileFormat::Json => json::write_json(map),
        FileFormat::Lang => lang::write_lang(map),
    }
}

pub fn decode_file(file_name: &str, bytes: &[u8]) -> Result<(LanguageMap, FileFormat), CodecError> {
    let format = FileFormat::from_file_name(file_name)?;
    let text = decode_text(bytes)?;
    let map = decode(&text, format)?;
    Ok((map, format))
}
