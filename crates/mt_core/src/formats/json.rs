use serde_json::{Map, Value};

use crate::error::CodecError;
use crate::model::{FileFormat, LanguageMap};

pub fn read_json(text: &str) -> Result<LanguageMap, CodecError> {
    serde_json::from_str::<LanguageMap>(text).map_err(|err| CodecError::Parse {
        format: FileFormat::Json,
        message: err.to_string(),
    })
}

pub fn write_json(map: &LanguageMap) -> String {
    let object = map
        .iter()
        .map(|(key, value)| (key.clone(), Value::String(value.clone())))
        .collect::<Map<String, Value>>();
    format!("{:#}", Value::Object(object))
}
