use std::path::{Path, PathBuf};

use crate::error::AppError;

pub const THEME_KEY: &str = "theme-preference";
pub const LIST_POSITION_KEY: &str = "list-position";
const APP_CONFIG_DIR: &str = "mc-lang-editor";
const UI_PREFS_FILE: &str = "ui_prefs.v1";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Theme {
    #[default]
    System,
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::System => "system",
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "system" => Some(Theme::System),
            "light" => Some(Theme::Light),
            "dark" => Some(Theme::Dark),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ListPosition {
    Left,
    #[default]
    Right,
}

impl ListPosition {
    pub fn as_str(self) -> &'static str {
        match self {
            ListPosition::Left => "left",
            ListPosition::Right => "right",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "left" => Some(ListPosition::Left),
            "right" => Some(ListPosition::Right),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct UiPrefs {
    pub theme: Theme,
    pub list_position: ListPosition,
}

pub fn ui_prefs_path() -> Option<PathBuf> {
    if let Ok(dir) = std::env::var("XDG_CONFIG_HOME") {
        return Some(PathBuf::from(dir).join(APP_CONFIG_DIR).join(UI_PREFS_FILE));
    }
    if let Ok(home) = std::env::var("HOME") {
        return Some(
            PathBuf::from(home)
                .join(".config")
                .join(APP_CONFIG_DIR)
                .join(UI_PREFS_FILE),
        );
    }
    #[cfg(target_os = "windows")]
    {
        if let Ok(appdata) = std::env::var("APPDATA") {
            return Some(PathBuf::from(appdata).join(APP_CONFIG_DIR).join(UI_PREFS_FILE));
        }
    }
    None
}

pub fn load_ui_prefs_from(path: &Path) -> Result<UiPrefs, AppError> {
    if !path.exists() {
        return Ok(UiPrefs::default());
    }
    let content =
        std::fs::read_to_string(path).map_err(|err| AppError::io("read", path, err))?;
    parse_ui_prefs(&content)
}

pub fn save_ui_prefs_to(path: &Path, prefs: &UiPrefs) -> Result<(), AppError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|err| AppError::io("create", parent, err))?;
    }
    std::fs::write(path, serialize_ui_prefs(prefs)).map_err(|err| AppError::io("write", path, err))
}

pub fn serialize_ui_prefs(prefs: &UiPrefs) -> String {
    let lines = [
        "version=1".to_string(),
        format!("{THEME_KEY}={}", escape_pref_value(prefs.theme.as_str())),
        format!(
            "{LIST_POSITION_KEY}={}",
            escape_pref_value(prefs.list_position.as_str())
        ),
    ];
    lines.join("\n")
}

pub fn parse_ui_prefs(content: &str) -> Result<UiPrefs, AppError> {
    let mut out = UiPrefs::default();
    let mut version = None::<u32>;
    for line in content.lines() {
        if line.trim().is_empty() {
            continue;
        }
        let Some((key, value)) = line.split_once('=') else {
            return Err(AppError::Prefs(format!("malformed line {line:?}")));
        };
        let value = value.trim();
        match key.trim() {
            "version" => {
                let v = value
                    .parse::<u32>()
                    .map_err(|_| AppError::Prefs(format!("invalid version {value:?}")))?;
                version = Some(v);
            }
            THEME_KEY => {
                out.theme = Theme::parse(&unescape_pref_value(value)?).unwrap_or_default()
            }
            LIST_POSITION_KEY => {
                out.list_position =
                    ListPosition::parse(&unescape_pref_value(value)?).unwrap_or_default()
            }
            _ => {}
        }
    }
    match version {
        Some(1) => Ok(out),
        Some(v) => Err(AppError::Prefs(format!("unsupported version {v}"))),
        None => Err(AppError::Prefs("missing version".to_string())),
    }
}

fn escape_pref_value(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '%' => out.push_str("%25"),
            '=' => out.push_str("%3D"),
            '\n' => out.push_str("%0A"),
            '\r' => out.push_str("%0D"),
            _ => out.push(ch),
        }
    }
    out
}

fn unescape_pref_value(input: &str) -> Result<String, AppError> {
    let invalid = || AppError::Prefs(format!("invalid escape in {input:?}"));
    let bytes = input.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0usize;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            let hex = bytes.get(i + 1..i + 3).ok_or_else(invalid)?;
            let hi = (hex[0] as char).to_digit(16).ok_or_else(invalid)?;
            let lo = (hex[1] as char).to_digit(16).ok_or_else(invalid)?;
            out.push((hi * 16 + lo) as u8);
            i += 3;
        } else {
            out.push(bytes[i]);
            i += 1;
        }
    }
    String::from_utf8(out).map_err(|_| invalid())
}
