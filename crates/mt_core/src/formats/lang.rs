use crate::model::LanguageMap;

pub fn read_lang(text: &str) -> LanguageMap {
    let mut map = LanguageMap::new();
    let mut skipped = 0usize;
    for line in text.lines() {
        let Some((key, value)) = split_entry(line) else {
            skipped += 1;
            continue;
        };
        map.insert(key.to_string(), value.to_string());
    }
    tracing::trace!(entries = map.len(), skipped, "read lang text");
    map
}

pub fn write_lang(map: &LanguageMap) -> String {
    map.iter()
        .map(|(key, value)| format!("{key}={value}"))
        .collect::<Vec<_>>()
        .join("\n")
}

fn split_entry(line: &str) -> Option<(&str, &str)> {
    if line.trim().is_empty() {
        return None;
    }
    let (key, value) = line.split_once('=')?;
    let key = key.trim();
    if key.is_empty() {
        return None;
    }
    Some((key, value.trim()))
}
