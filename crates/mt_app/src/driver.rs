use std::path::PathBuf;

use mt_core::model::FileFormat;

use crate::actions::{dispatch, EditorAction};
use crate::error::AppError;
use crate::prefs::{ListPosition, Theme};
use crate::state::EditorState;

pub struct EditorDriver {
    state: EditorState,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EditorSnapshot {
    pub total_keys: usize,
    pub translated_keys: usize,
    pub progress: u8,
    pub visible_keys: Vec<String>,
    pub selected_key: Option<String>,
    pub edited_value: String,
    pub regex_error: Option<String>,
    pub status: String,
    pub target_file_name: Option<String>,
    pub target_format: FileFormat,
    pub theme: Theme,
    pub list_position: ListPosition,
    pub can_undo: bool,
    pub can_redo: bool,
}

impl Default for EditorDriver {
    fn default() -> Self {
        Self::new()
    }
}

impl EditorDriver {
    pub fn new() -> Self {
        Self {
            state: EditorState::new(),
        }
    }

    pub fn with_prefs_path(prefs_path: Option<PathBuf>) -> Self {
        Self {
            state: EditorState::with_prefs_path(prefs_path),
        }
    }

    pub fn state(&self) -> &EditorState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut EditorState {
        &mut self.state
    }

    pub fn dispatch(&mut self, action: EditorAction) -> Result<(), AppError> {
        dispatch(&mut self.state, action)
    }

    pub fn snapshot(&mut self) -> EditorSnapshot {
        let visible_keys = self.state.visible_keys().to_vec();
        let state = &self.state;

        EditorSnapshot {
            total_keys: state.session.source().map_or(0, |source| source.len()),
            translated_keys: state.translated_count(),
            progress: state.session.progress(),
            visible_keys,
            selected_key: state.selected_key(),
            edited_value: state.edited_value.clone(),
            regex_error: state.regex_error.clone(),
            status: state.status.clone(),
            target_file_name: state.target_file_name.clone(),
            target_format: state.session.target_format(),
            theme: state.prefs.theme,
            list_position: state.prefs.list_position,
            can_undo: state.history.can_undo(),
            can_redo: state.history.can_redo(),
        }
    }
}
