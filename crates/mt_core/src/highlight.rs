use regex::Regex;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub text: String,
    pub highlighted: bool,
}

impl Segment {
    fn plain(text: &str) -> Self {
        Self {
            text: text.to_string(),
            highlighted: false,
        }
    }

    fn hit(text: &str) -> Self {
        Self {
            text: text.to_string(),
            highlighted: true,
        }
    }
}

pub fn highlight_literal(text: &str, term: &str) -> Vec<Segment> {
    if text.is_empty() {
        return Vec::new();
    }
    if term.trim().is_empty() {
        return vec![Segment::plain(text)];
    }
    let needle = term.chars().flat_map(char::to_lowercase).collect::<Vec<_>>();

    let mut segments = Vec::new();
    let mut plain_start = 0usize;
    let mut pos = 0usize;
    while let Some(ch) = text[pos..].chars().next() {
        match caseless_prefix_len(&text[pos..], &needle) {
            Some(len) => {
                push_plain(&mut segments, &text[plain_start..pos]);
                segments.push(Segment::hit(&text[pos..pos + len]));
                pos += len;
                plain_start = pos;
            }
            None => pos += ch.len_utf8(),
        }
    }
    push_plain(&mut segments, &text[plain_start..]);
    segments
}

pub fn highlight_regex(text: &str, pattern: &str) -> Vec<Segment> {
    if text.is_empty() {
        return Vec::new();
    }
    if pattern.trim().is_empty() {
        return vec![Segment::plain(text)];
    }
    let Ok(regex) = Regex::new(pattern) else {
        return vec![Segment::plain(text)];
    };

    let mut segments = Vec::new();
    let mut last = 0usize;
    for found in regex.find_iter(text).filter(|found| !found.is_empty()) {
        push_plain(&mut segments, &text[last..found.start()]);
        segments.push(Segment::hit(found.as_str()));
        last = found.end();
    }
    push_plain(&mut segments, &text[last..]);
    segments
}

fn push_plain(segments: &mut Vec<Segment>, text: &str) {
    if !text.is_empty() {
        segments.push(Segment::plain(text));
    }
}

// Byte length of the prefix of `text` whose lowercase form equals `needle`.
fn caseless_prefix_len(text: &str, needle: &[char]) -> Option<usize> {
    let mut matched = 0usize;
    for (offset, ch) in text.char_indices() {
        for lower in ch.to_lowercase() {
            if needle.get(matched) != Some(&lower) {
                return None;
            }
            matched += 1;
        }
        if matched == needle.len() {
            return Some(offset + ch.len_utf8());
        }
    }
    None
}
