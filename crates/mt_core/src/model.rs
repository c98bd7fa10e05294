use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::CodecError;

pub type LanguageMap = IndexMap<String, String>;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileFormat {
    #[default]
    Json,
    Lang,
}

impl FileFormat {
    pub fn extension(self) -> &'static str {
        match self {
            FileFormat::Json => "json",
            FileFormat::Lang => "lang",
        }
    }

    pub fn from_extension(ext: &str) -> Option<Self> {
        if ext.eq_ignore_ascii_case("json") {
            Some(Self::Json)
        } else if ext.eq_ignore_ascii_case("lang") {
            Some(Self::Lang)
        } else {
            None
        }
    }

    pub fn from_file_name(name: &str) -> Result<Self, CodecError> {
        let ext = name.rsplit_once('.').map(|(_, ext)| ext).unwrap_or("");
        Self::from_extension(ext).ok_or_else(|| CodecError::UnsupportedFormat(ext.to_string()))
    }
}

impl fmt::Display for FileFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

pub fn translation_progress(source: &LanguageMap, target: &LanguageMap) -> u8 {
    let total = source.len();
    if total == 0 {
        return 0;
    }
    let translated = source.keys().filter(|key| target.contains_key(*key)).count();
    ((translated * 200 + total) / (total * 2)) as u8
}
