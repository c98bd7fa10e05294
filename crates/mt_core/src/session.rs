use crate::filter::{compute_visible_keys, FilterCriteria, SortOrder, StatusFilter, VisibleKeys};
use crate::model::{translation_progress, FileFormat, LanguageMap};
use crate::project::ProjectContents;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetChange {
    pub key: String,
    pub before: Option<String>,
    pub after: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditorSession {
    source: Option<LanguageMap>,
    target: Option<LanguageMap>,
    source_format: FileFormat,
    target_format: FileFormat,
    selected_key: Option<String>,
    criteria: FilterCriteria,
}

impl EditorSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn source(&self) -> Option<&LanguageMap> {
        self.source.as_ref()
    }

    pub fn target(&self) -> Option<&LanguageMap> {
        self.target.as_ref()
    }

    pub fn source_format(&self) -> FileFormat {
        self.source_format
    }

    pub fn target_format(&self) -> FileFormat {
        self.target_format
    }

    pub fn set_source(&mut self, source: LanguageMap, format: FileFormat) {
        self.source = Some(source);
        self.source_format = format;
        self.drop_stale_selection();
    }

    pub fn set_target(&mut self, target: LanguageMap, format: FileFormat) {
        self.target = Some(target);
        self.target_format = format;
    }

    pub fn set_target_format(&mut self, format: FileFormat) {
        self.target_format = format;
    }

    pub fn load_project(&mut self, project: ProjectContents) {
        self.source = Some(project.source);
        self.target = Some(project.target);
        self.source_format = project.source_format;
        self.target_format = project.target_format;
        self.drop_stale_selection();
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    pub fn set_search_term(&mut self, term: &str) {
        self.criteria.search_term.clear();
        self.criteria.search_term.push_str(term);
    }

    pub fn set_regex_search(&mut self, enabled: bool) {
        self.criteria.is_regex = enabled;
    }

    pub fn set_status_filter(&mut self, status: StatusFilter) {
        self.criteria.status = status;
    }

    pub fn set_sort_order(&mut self, order: SortOrder) {
        self.criteria.sort_order = order;
    }

    pub fn selected_key(&self) -> Option<&str> {
        self.selected_key.as_deref()
    }

    pub fn select(&mut self, key: &str) -> bool {
        if self.is_source_key(key) {
            self.selected_key = Some(key.to_string());
            true
        } else {
            false
        }
    }

    pub fn source_value(&self, key: &str) -> Option<&str> {
        self.source.as_ref()?.get(key).map(String::as_str)
    }

    pub fn target_value(&self, key: &str) -> Option<&str> {
        self.target.as_ref()?.get(key).map(String::as_str)
    }

    pub fn update_translation(&mut self, key: &str, value: &str) -> Option<TargetChange> {
        if !self.is_source_key(key) {
            return None;
        }
        let target = self.target.as_mut()?;
        let before = target.get(key).cloned();
        if before.as_deref() == Some(value) {
            return None;
        }
        target.insert(key.to_string(), value.to_string());
        Some(TargetChange {
            key: key.to_string(),
            before,
            after: Some(value.to_string()),
        })
    }

    pub fn copy_source_to_target(&mut self, key: &str) -> Option<TargetChange> {
        let value = self.source_value(key)?.to_string();
        self.update_translation(key, &value)
    }

    pub fn copy_all_source(&mut self) -> Vec<TargetChange> {
        let (Some(source), Some(target)) = (self.source.as_ref(), self.target.as_mut()) else {
            return Vec::new();
        };
        let mut changes = Vec::new();
        for (key, value) in source {
            let before = target.insert(key.clone(), value.clone());
            if before.as_ref() != Some(value) {
                changes.push(TargetChange {
                    key: key.clone(),
                    before,
                    after: Some(value.clone()),
                });
            }
        }
        changes
    }

    /// Writes a raw target value; `None` removes the key. Used to replay
    /// recorded changes.
    pub fn put_target_value(&mut self, key: &str, value: Option<&str>) -> bool {
        let Some(target) = self.target.as_mut() else {
            return false;
        };
        match value {
            Some(value) => {
                target.insert(key.to_string(), value.to_string());
            }
            None => {
                target.shift_remove(key);
            }
        }
        true
    }

    pub fn visible_keys(&self) -> VisibleKeys {
        match (self.source.as_ref(), self.target.as_ref()) {
            (Some(source), Some(target)) => compute_visible_keys(source, target, &self.criteria),
            _ => VisibleKeys::default(),
        }
    }

    pub fn progress(&self) -> u8 {
        match (self.source.as_ref(), self.target.as_ref()) {
            (Some(source), Some(target)) => translation_progress(source, target),
            _ => 0,
        }
    }

    fn is_source_key(&self, key: &str) -> bool {
        self.source
            .as_ref()
            .is_some_and(|source| source.contains_key(key))
    }

    fn drop_stale_selection(&mut self) {
        if let Some(selected) = self.selected_key.as_deref() {
            if !self.is_source_key(selected) {
                self.selected_key = None;
            }
        }
    }
}
