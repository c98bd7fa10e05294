use std::path::{Path, PathBuf};

use mt_core::filter::{SortOrder, StatusFilter};
use mt_core::formats::{decode_file, encode};
use mt_core::model::FileFormat;
use mt_core::project::{read_project_file, write_project_file};

use crate::error::AppError;
use crate::prefs::{ListPosition, Theme};
use crate::state::EditorState;

pub enum EditorAction {
    LoadSource(PathBuf),
    LoadTarget(PathBuf),
    CreateNewTarget(FileFormat),
    SetTargetFormat(FileFormat),
    SelectKey(String),
    SetEditedValue(String),
    ApplyEdit,
    CopyCurrentSource,
    CopyAllSource,
    SetSearchTerm(String),
    SetRegexSearch(bool),
    SetStatusFilter(StatusFilter),
    SetSortOrder(SortOrder),
    ExportTarget(PathBuf),
    ExportProject { dir: PathBuf, name: String },
    ImportProject(PathBuf),
    Undo,
    Redo,
    SetTheme(Theme),
    SetListPosition(ListPosition),
}

pub fn dispatch(state: &mut EditorState, action: EditorAction) -> Result<(), AppError> {
    match action {
        EditorAction::LoadSource(path) => {
            let (map, format) = report(state, "load", &path, read_language_file(&path))?;
            let count = map.len();
            state.load_source(map, format);
            state.status = format!("Loaded source {} ({count} keys)", file_name_of(&path));
        }
        EditorAction::LoadTarget(path) => {
            let (map, format) = report(state, "load", &path, read_language_file(&path))?;
            let count = map.len();
            let name = file_name_of(&path);
            state.load_target(map, format, &name);
            state.status = format!("Loaded target {name} ({count} keys)");
        }
        EditorAction::CreateNewTarget(format) => {
            state.create_new_target(format);
            state.status = "Created an empty target".to_string();
        }
        EditorAction::SetTargetFormat(format) => {
            state.set_target_format(format);
        }
        EditorAction::SelectKey(key) => {
            if !state.select(&key) {
                let err = AppError::InvalidInput(format!("unknown key: {key}"));
                state.status = format!("Failed to select {key}: {err}");
                return Err(err);
            }
        }
        EditorAction::SetEditedValue(value) => {
            state.edited_value = value;
        }
        EditorAction::ApplyEdit => {
            if state.apply_edit() {
                state.status = "Translation updated".to_string();
            }
        }
        EditorAction::CopyCurrentSource => {
            if state.copy_current_source() {
                state.status = "Copied source text".to_string();
            }
        }
        EditorAction::CopyAllSource => {
            let updated = state.copy_all_source();
            state.status = format!("Copied source text for {updated} keys");
        }
        EditorAction::SetSearchTerm(term) => {
            state.set_search_term(&term);
        }
        EditorAction::SetRegexSearch(enabled) => {
            state.set_regex_search(enabled);
        }
        EditorAction::SetStatusFilter(status) => {
            state.set_status_filter(status);
        }
        EditorAction::SetSortOrder(order) => {
            state.set_sort_order(order);
        }
        EditorAction::ExportTarget(dir) => {
            let result = export_target(state, &dir);
            let path = report(state, "export to", &dir, result)?;
            state.status = format!("Exported {}", path.display());
        }
        EditorAction::ExportProject { dir, name } => {
            let result = export_project(state, &dir, &name);
            let path = report(state, "save project in", &dir, result)?;
            state.status = format!("Saved project {}", path.display());
        }
        EditorAction::ImportProject(path) => {
            let result = read_project_file(&path).map_err(AppError::from);
            let project = report(state, "open project", &path, result)?;
            state.load_project(project, &file_name_of(&path));
            state.status = format!("Opened project {}", file_name_of(&path));
        }
        EditorAction::Undo => {
            if state.undo() {
                state.status = "Undo".to_string();
            }
        }
        EditorAction::Redo => {
            if state.redo() {
                state.status = "Redo".to_string();
            }
        }
        EditorAction::SetTheme(theme) => {
            state.set_theme(theme);
        }
        EditorAction::SetListPosition(position) => {
            state.set_list_position(position);
        }
    }

    Ok(())
}

fn report<T>(
    state: &mut EditorState,
    action: &str,
    path: &Path,
    result: Result<T, AppError>,
) -> Result<T, AppError> {
    if let Err(err) = &result {
        tracing::warn!(path = %path.display(), "failed to {action}: {err}");
        state.status = format!("Failed to {action} {}: {err}", display_name(path));
    }
    result
}

fn read_language_file(path: &Path) -> Result<(mt_core::LanguageMap, FileFormat), AppError> {
    let bytes = std::fs::read(path).map_err(|err| AppError::io("read", path, err))?;
    Ok(decode_file(&file_name_of(path), &bytes)?)
}

fn export_target(state: &EditorState, dir: &Path) -> Result<PathBuf, AppError> {
    let target = state.require_target()?;
    let format = state.session.target_format();
    let path = dir.join(format!("{}.{}", state.export_base_name(), format.extension()));
    std::fs::write(&path, encode(target, format)).map_err(|err| AppError::io("write", &path, err))?;
    tracing::info!(path = %path.display(), keys = target.len(), "exported target");
    Ok(path)
}

fn export_project(state: &EditorState, dir: &Path, name: &str) -> Result<PathBuf, AppError> {
    let (Some(source), Some(target)) = (state.session.source(), state.session.target()) else {
        return Err(AppError::State(
            "a project needs both a source and a target document",
        ));
    };
    let name = name.trim();
    if name.is_empty() {
        return Err(AppError::InvalidInput("project name is empty".to_string()));
    }
    let format = state.session.target_format();
    Ok(write_project_file(dir, name, source, target, format, format)?)
}

fn display_name(path: &Path) -> String {
    match path.file_name() {
        Some(name) => name.to_string_lossy().into_owned(),
        None => path.display().to_string(),
    }
}

fn file_name_of(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}
