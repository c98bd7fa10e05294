use crate::error::CodecError;

const UTF8_BOM: &str = "\u{feff}";

pub fn decode_text(bytes: &[u8]) -> Result<String, CodecError> {
    let text = std::str::from_utf8(bytes).map_err(|_| CodecError::InvalidUtf8)?;
    Ok(text.strip_prefix(UTF8_BOM).unwrap_or(text).to_string())
}
