use std::cmp::Ordering;

use icu_collator::{Collator, CollatorOptions, Strength};
use regex::Regex;

use crate::model::LanguageMap;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum StatusFilter {
    #[default]
    All,
    Translated,
    Untranslated,
}

impl StatusFilter {
    fn keeps(self, translated: bool) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Translated => translated,
            StatusFilter::Untranslated => !translated,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SortOrder {
    #[default]
    None,
    KeyAsc,
    KeyDesc,
    SourceAsc,
    SourceDesc,
    TargetAsc,
    TargetDesc,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    pub search_term: String,
    pub is_regex: bool,
    pub status: StatusFilter,
    pub sort_order: SortOrder,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VisibleKeys {
    pub keys: Vec<String>,
    pub regex_error: Option<String>,
}

pub fn compute_visible_keys(
    source: &LanguageMap,
    target: &LanguageMap,
    criteria: &FilterCriteria,
) -> VisibleKeys {
    let mut keys = source
        .keys()
        .filter(|key| criteria.status.keeps(target.contains_key(key.as_str())))
        .map(String::as_str)
        .collect::<Vec<_>>();

    let mut regex_error = None;
    let term = criteria.search_term.as_str();
    if !term.trim().is_empty() {
        if criteria.is_regex {
            match Regex::new(term) {
                Ok(regex) => {
                    keys.retain(|key| entry_matches(key, source, target, |text| regex.is_match(text)))
                }
                Err(err) => {
                    tracing::warn!(pattern = term, "invalid search regex: {err}");
                    regex_error = Some(regex_error_message(&err));
                    keys.clear();
                }
            }
        } else {
            let needle = term.to_lowercase();
            keys.retain(|key| {
                entry_matches(key, source, target, |text| {
                    text.to_lowercase().contains(&needle)
                })
            });
        }
    }

    sort_keys(&mut keys, source, target, criteria.sort_order);

    VisibleKeys {
        keys: keys.into_iter().map(str::to_string).collect(),
        regex_error,
    }
}

pub fn validate_regex(pattern: &str) -> Option<String> {
    if pattern.is_empty() {
        return None;
    }
    Regex::new(pattern)
        .err()
        .map(|err| regex_error_message(&err))
}

fn regex_error_message(err: &regex::Error) -> String {
    format!("regex error: {err}")
}

fn entry_matches(
    key: &str,
    source: &LanguageMap,
    target: &LanguageMap,
    matches: impl Fn(&str) -> bool,
) -> bool {
    matches(key)
        || source.get(key).is_some_and(|text| matches(text))
        || target.get(key).is_some_and(|text| matches(text))
}

fn sort_keys(keys: &mut [&str], source: &LanguageMap, target: &LanguageMap, order: SortOrder) {
    let source_text = |key: &str| source.get(key).map(String::as_str).unwrap_or("");
    match order {
        SortOrder::None => {}
        SortOrder::KeyAsc => keys.sort_by(|a, b| locale_cmp(a, b)),
        SortOrder::KeyDesc => keys.sort_by(|a, b| locale_cmp(b, a)),
        SortOrder::SourceAsc => keys.sort_by(|a, b| locale_cmp(source_text(*a), source_text(*b))),
        SortOrder::SourceDesc => keys.sort_by(|a, b| locale_cmp(source_text(*b), source_text(*a))),
        SortOrder::TargetAsc => keys.sort_by(|a, b| target_cmp(target, a, b, false)),
        SortOrder::TargetDesc => keys.sort_by(|a, b| target_cmp(target, a, b, true)),
    }
}

// Untranslated keys trail in both directions.
fn target_cmp(target: &LanguageMap, a: &str, b: &str, descending: bool) -> Ordering {
    match (target.get(a), target.get(b)) {
        (Some(a), Some(b)) if descending => locale_cmp(b, a),
        (Some(a), Some(b)) => locale_cmp(a, b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

thread_local! {
    static ROOT_COLLATOR: Option<Collator> = root_collator();
}

fn root_collator() -> Option<Collator> {
    let mut options = CollatorOptions::new();
    options.strength = Some(Strength::Tertiary);
    match Collator::try_new(&Default::default(), options) {
        Ok(collator) => Some(collator),
        Err(err) => {
            tracing::warn!("root collator unavailable, sorting by code point: {err}");
            None
        }
    }
}

/// Root-locale collation at tertiary strength. Strings the collator ranks
/// equal fall back to code point order.
pub fn locale_cmp(a: &str, b: &str) -> Ordering {
    ROOT_COLLATOR.with(|collator| match collator {
        Some(collator) => collator.compare(a, b).then_with(|| a.cmp(b)),
        None => a.cmp(b),
    })
}
