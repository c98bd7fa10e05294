use std::path::PathBuf;

use mt_core::filter::{validate_regex, SortOrder, StatusFilter};
use mt_core::model::{FileFormat, LanguageMap};
use mt_core::project::{ProjectContents, DEFAULT_PROJECT_NAME};
use mt_core::session::EditorSession;

use crate::error::AppError;
use crate::history::EditHistory;
use crate::prefs::{load_ui_prefs_from, save_ui_prefs_to, ui_prefs_path, ListPosition, Theme, UiPrefs};

pub const DEFAULT_TARGET_BASE_NAME: &str = "ja_jp";

pub struct EditorState {
    pub session: EditorSession,
    pub history: EditHistory,

    pub edited_value: String,
    pub target_file_name: Option<String>,
    pub status: String,
    pub regex_error: Option<String>,

    pub prefs: UiPrefs,
    pub prefs_error: Option<String>,
    prefs_path: Option<PathBuf>,

    visible_cache: Option<Vec<String>>,
}

impl Default for EditorState {
    fn default() -> Self {
        Self::new()
    }
}

impl EditorState {
    pub fn new() -> Self {
        Self::with_prefs_path(ui_prefs_path())
    }

    /// Creates a state that reads and writes preferences at `prefs_path`.
    /// `None` keeps preferences in memory only.
    pub fn with_prefs_path(prefs_path: Option<PathBuf>) -> Self {
        let (prefs, prefs_error) = match prefs_path.as_deref().map(load_ui_prefs_from) {
            Some(Ok(prefs)) => (prefs, None),
            Some(Err(err)) => {
                tracing::warn!("falling back to default preferences: {err}");
                (UiPrefs::default(), Some(err.to_string()))
            }
            None => (UiPrefs::default(), None),
        };

        Self {
            session: EditorSession::new(),
            history: EditHistory::default(),
            edited_value: String::new(),
            target_file_name: None,
            status: String::new(),
            regex_error: None,
            prefs,
            prefs_error,
            prefs_path,
            visible_cache: None,
        }
    }

    pub fn selected_key(&self) -> Option<String> {
        self.session.selected_key().map(ToString::to_string)
    }

    pub fn visible_keys(&mut self) -> &[String] {
        let session = &self.session;
        self.visible_cache
            .get_or_insert_with(|| session.visible_keys().keys)
    }

    pub fn translated_count(&self) -> usize {
        match (self.session.source(), self.session.target()) {
            (Some(source), Some(target)) => source
                .keys()
                .filter(|key| target.contains_key(key.as_str()))
                .count(),
            _ => 0,
        }
    }

    pub fn load_source(&mut self, source: LanguageMap, format: FileFormat) {
        self.session.set_source(source, format);
        self.history.clear();
        self.sync_edited_value();
        self.invalidate_visible_cache();
    }

    pub fn load_target(&mut self, target: LanguageMap, format: FileFormat, file_name: &str) {
        self.session.set_target(target, format);
        self.target_file_name = Some(file_name.to_string());
        self.history.clear();
        self.sync_edited_value();
        self.invalidate_visible_cache();
    }

    pub fn create_new_target(&mut self, format: FileFormat) {
        let file_name = format!("{DEFAULT_TARGET_BASE_NAME}.{}", format.extension());
        self.load_target(LanguageMap::new(), format, &file_name);
    }

    pub fn load_project(&mut self, project: ProjectContents, archive_file_name: &str) {
        let target_format = project.target_format;
        self.session.load_project(project);
        self.target_file_name = Some(format!(
            "{}.{}",
            first_segment(archive_file_name),
            target_format.extension()
        ));
        self.history.clear();
        self.sync_edited_value();
        self.invalidate_visible_cache();
    }

    pub fn set_target_format(&mut self, format: FileFormat) {
        self.session.set_target_format(format);
        if let Some(name) = self.target_file_name.as_deref() {
            self.target_file_name = Some(format!("{}.{}", first_segment(name), format.extension()));
        }
    }

    pub fn select(&mut self, key: &str) -> bool {
        if !self.session.select(key) {
            return false;
        }
        self.sync_edited_value();
        true
    }

    pub fn apply_edit(&mut self) -> bool {
        let Some(key) = self.selected_key() else {
            return false;
        };
        let Some(change) = self.session.update_translation(&key, &self.edited_value) else {
            return false;
        };
        self.history.record_single(change);
        self.invalidate_visible_cache();
        true
    }

    pub fn copy_current_source(&mut self) -> bool {
        let Some(key) = self.selected_key() else {
            return false;
        };
        let changed = match self.session.copy_source_to_target(&key) {
            Some(change) => self.history.record_single(change),
            None => false,
        };
        self.sync_edited_value();
        if changed {
            self.invalidate_visible_cache();
        }
        changed
    }

    pub fn copy_all_source(&mut self) -> usize {
        let changes = self.session.copy_all_source();
        let updated = changes.len();
        self.history.record_batch(changes);
        self.sync_edited_value();
        if updated > 0 {
            self.invalidate_visible_cache();
        }
        updated
    }

    pub fn undo(&mut self) -> bool {
        let undone = self.history.undo(&mut self.session);
        if undone {
            self.sync_edited_value();
            self.invalidate_visible_cache();
        }
        undone
    }

    pub fn redo(&mut self) -> bool {
        let redone = self.history.redo(&mut self.session);
        if redone {
            self.sync_edited_value();
            self.invalidate_visible_cache();
        }
        redone
    }

    pub fn set_search_term(&mut self, term: &str) {
        self.session.set_search_term(term);
        self.refresh_regex_error();
        self.invalidate_visible_cache();
    }

    pub fn set_regex_search(&mut self, enabled: bool) {
        self.session.set_regex_search(enabled);
        self.refresh_regex_error();
        self.invalidate_visible_cache();
    }

    pub fn set_status_filter(&mut self, status: StatusFilter) {
        self.session.set_status_filter(status);
        self.invalidate_visible_cache();
    }

    pub fn set_sort_order(&mut self, order: SortOrder) {
        self.session.set_sort_order(order);
        self.invalidate_visible_cache();
    }

    pub fn export_base_name(&self) -> String {
        self.target_file_name
            .as_deref()
            .map(first_segment)
            .unwrap_or(DEFAULT_TARGET_BASE_NAME)
            .to_string()
    }

    pub fn default_project_name(&self) -> String {
        self.target_file_name
            .as_deref()
            .map(first_segment)
            .unwrap_or(DEFAULT_PROJECT_NAME)
            .to_string()
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.prefs.theme = theme;
        self.persist_prefs();
    }

    pub fn set_list_position(&mut self, position: ListPosition) {
        self.prefs.list_position = position;
        self.persist_prefs();
    }

    fn persist_prefs(&mut self) {
        let Some(path) = self.prefs_path.as_deref() else {
            return;
        };
        match save_ui_prefs_to(path, &self.prefs) {
            Ok(()) => self.prefs_error = None,
            Err(err) => {
                tracing::warn!("failed to save preferences: {err}");
                self.prefs_error = Some(err.to_string());
            }
        }
    }

    pub(crate) fn require_target(&self) -> Result<&LanguageMap, AppError> {
        self.session
            .target()
            .ok_or(AppError::State("no target document is loaded"))
    }

    fn refresh_regex_error(&mut self) {
        let criteria = self.session.criteria();
        self.regex_error = if criteria.is_regex {
            validate_regex(&criteria.search_term)
        } else {
            None
        };
    }

    fn sync_edited_value(&mut self) {
        self.edited_value = self
            .session
            .selected_key()
            .and_then(|key| self.session.target_value(key))
            .unwrap_or_default()
            .to_string();
    }

    fn invalidate_visible_cache(&mut self) {
        self.visible_cache = None;
    }
}

fn first_segment(name: &str) -> &str {
    name.split('.').next().unwrap_or(name)
}
