use std::path::Path;

use mt_app::actions::EditorAction;
use mt_app::driver::EditorDriver;
use mt_app::error::AppError;
use mt_app::prefs::{ListPosition, Theme};
use mt_core::filter::{SortOrder, StatusFilter};
use mt_core::formats::{decode, decode_file};
use mt_core::model::FileFormat;
use mt_core::project::read_project_file;

const SOURCE_JSON: &str = r#"{
  "menu.singleplayer": "Singleplayer",
  "menu.multiplayer": "Multiplayer",
  "gui.done": "Done",
  "gui.cancel": "Cancel"
}"#;

const TARGET_LANG: &str = "# partial translation\nmenu.singleplayer=シングルプレイ\ngui.done=完了\n";

fn write_file(path: &Path, contents: &str) {
    std::fs::write(path, contents).expect("write fixture");
}

fn loaded_driver(root: &Path) -> EditorDriver {
    let source = root.join("en_us.json");
    let target = root.join("ja_jp.lang");
    write_file(&source, SOURCE_JSON);
    write_file(&target, TARGET_LANG);

    let mut driver = EditorDriver::with_prefs_path(None);
    driver
        .dispatch(EditorAction::LoadSource(source))
        .expect("load source");
    driver
        .dispatch(EditorAction::LoadTarget(target))
        .expect("load target");
    driver
}

#[test]
fn e2e_io_lang_001_load_edit_export_round_trip() {
    let root = tempfile::tempdir().expect("temp dir");
    let mut driver = loaded_driver(root.path());

    let snapshot = driver.snapshot();
    assert_eq!(snapshot.total_keys, 4);
    assert_eq!(snapshot.translated_keys, 2);
    assert_eq!(snapshot.progress, 50);
    assert_eq!(snapshot.target_format, FileFormat::Lang);
    assert_eq!(snapshot.target_file_name.as_deref(), Some("ja_jp.lang"));

    driver
        .dispatch(EditorAction::SelectKey("gui.cancel".to_string()))
        .expect("select");
    assert_eq!(driver.snapshot().edited_value, "");
    driver
        .dispatch(EditorAction::SetEditedValue("キャンセル".to_string()))
        .expect("set value");
    driver.dispatch(EditorAction::ApplyEdit).expect("apply");

    let out_dir = root.path().join("out");
    std::fs::create_dir(&out_dir).expect("out dir");
    driver
        .dispatch(EditorAction::ExportTarget(out_dir.clone()))
        .expect("export");

    let written = std::fs::read_to_string(out_dir.join("ja_jp.lang")).expect("read export");
    let exported = decode(&written, FileFormat::Lang).expect("decode export");
    assert_eq!(exported.len(), 3);
    assert_eq!(exported["gui.cancel"], "キャンセル");
    assert_eq!(exported["menu.singleplayer"], "シングルプレイ");
    assert_eq!(driver.snapshot().progress, 75);
}

#[test]
fn e2e_io_json_001_format_switch_exports_json() {
    let root = tempfile::tempdir().expect("temp dir");
    let mut driver = loaded_driver(root.path());

    driver
        .dispatch(EditorAction::SetTargetFormat(FileFormat::Json))
        .expect("switch format");
    assert_eq!(
        driver.snapshot().target_file_name.as_deref(),
        Some("ja_jp.json")
    );
    driver
        .dispatch(EditorAction::ExportTarget(root.path().to_path_buf()))
        .expect("export");

    let bytes = std::fs::read(root.path().join("ja_jp.json")).expect("read export");
    let (map, format) = decode_file("ja_jp.json", &bytes).expect("decode export");
    assert_eq!(format, FileFormat::Json);
    assert_eq!(map["gui.done"], "完了");
}

#[test]
fn e2e_io_err_001_unsupported_and_malformed_files() {
    let root = tempfile::tempdir().expect("temp dir");
    let text = root.path().join("notes.txt");
    let broken = root.path().join("broken.json");
    write_file(&text, "a=b");
    write_file(&broken, "{ not json");

    let mut driver = EditorDriver::with_prefs_path(None);
    let err = driver
        .dispatch(EditorAction::LoadSource(text))
        .expect_err("txt rejected");
    assert!(matches!(err, AppError::Codec(_)));

    let err = driver
        .dispatch(EditorAction::LoadSource(broken))
        .expect_err("bad json rejected");
    assert!(matches!(err, AppError::Codec(_)));
    assert!(driver.snapshot().status.starts_with("Failed to load broken.json"));
    assert_eq!(driver.snapshot().total_keys, 0);

    let err = driver
        .dispatch(EditorAction::ExportTarget(root.path().to_path_buf()))
        .expect_err("nothing to export");
    assert!(matches!(err, AppError::State(_)));
}

#[test]
fn e2e_io_err_002_every_failed_action_reports_status() {
    let root = tempfile::tempdir().expect("temp dir");
    let mut driver = EditorDriver::with_prefs_path(None);

    driver
        .dispatch(EditorAction::LoadSource(root.path().join("missing.json")))
        .expect_err("missing file");
    assert!(driver.snapshot().status.starts_with("Failed to load missing.json"));

    driver
        .dispatch(EditorAction::ExportTarget(root.path().to_path_buf()))
        .expect_err("no target");
    assert!(driver.snapshot().status.starts_with("Failed to export to"));

    let mut driver = loaded_driver(root.path());
    driver
        .dispatch(EditorAction::ExportProject {
            dir: root.path().to_path_buf(),
            name: String::new(),
        })
        .expect_err("empty name");
    assert!(driver
        .snapshot()
        .status
        .starts_with("Failed to save project in"));

    driver
        .dispatch(EditorAction::ExportTarget(root.path().join("no_such_dir")))
        .expect_err("missing output dir");
    assert!(driver.snapshot().status.starts_with("Failed to export to no_such_dir"));

    driver
        .dispatch(EditorAction::SelectKey("nope".to_string()))
        .expect_err("unknown key");
    assert!(driver.snapshot().status.starts_with("Failed to select nope"));
}

#[test]
fn e2e_proj_001_export_then_import_restores_documents() {
    let root = tempfile::tempdir().expect("temp dir");
    let mut driver = loaded_driver(root.path());

    let err = driver
        .dispatch(EditorAction::ExportProject {
            dir: root.path().to_path_buf(),
            name: "   ".to_string(),
        })
        .expect_err("blank name rejected");
    assert!(matches!(err, AppError::InvalidInput(_)));

    driver
        .dispatch(EditorAction::ExportProject {
            dir: root.path().to_path_buf(),
            name: "my_pack".to_string(),
        })
        .expect("export project");
    let archive = root.path().join("my_pack.mcta");
    let contents = read_project_file(&archive).expect("read archive");
    assert_eq!(contents.source_format, FileFormat::Lang);
    assert_eq!(contents.target_format, FileFormat::Lang);
    assert_eq!(contents.source.len(), 4);

    let mut fresh = EditorDriver::with_prefs_path(None);
    fresh
        .dispatch(EditorAction::ImportProject(archive))
        .expect("import project");
    let snapshot = fresh.snapshot();
    assert_eq!(snapshot.total_keys, 4);
    assert_eq!(snapshot.translated_keys, 2);
    assert_eq!(snapshot.target_format, FileFormat::Lang);
    assert_eq!(snapshot.target_file_name.as_deref(), Some("my_pack.lang"));
    assert!(!snapshot.can_undo);
}

#[test]
fn e2e_proj_002_import_rejects_wrong_extension() {
    let root = tempfile::tempdir().expect("temp dir");
    let path = root.path().join("project.zip");
    write_file(&path, "not an archive");

    let mut driver = EditorDriver::with_prefs_path(None);
    let err = driver
        .dispatch(EditorAction::ImportProject(path))
        .expect_err("zip extension rejected");
    assert!(matches!(err, AppError::Archive(_)));
    assert!(driver.snapshot().status.starts_with("Failed to open project"));
}

#[test]
fn e2e_filter_001_search_status_and_sort() {
    let root = tempfile::tempdir().expect("temp dir");
    let mut driver = loaded_driver(root.path());

    driver
        .dispatch(EditorAction::SetStatusFilter(StatusFilter::Untranslated))
        .expect("status");
    assert_eq!(
        driver.snapshot().visible_keys,
        vec!["menu.multiplayer".to_string(), "gui.cancel".to_string()]
    );

    driver
        .dispatch(EditorAction::SetStatusFilter(StatusFilter::All))
        .expect("status");
    driver
        .dispatch(EditorAction::SetSortOrder(SortOrder::KeyAsc))
        .expect("sort");
    driver
        .dispatch(EditorAction::SetSearchTerm("GUI".to_string()))
        .expect("search");
    assert_eq!(
        driver.snapshot().visible_keys,
        vec!["gui.cancel".to_string(), "gui.done".to_string()]
    );

    driver
        .dispatch(EditorAction::SetRegexSearch(true))
        .expect("regex mode");
    driver
        .dispatch(EditorAction::SetSearchTerm("[unclosed".to_string()))
        .expect("bad regex is not an action error");
    let snapshot = driver.snapshot();
    assert!(snapshot.visible_keys.is_empty());
    assert!(snapshot
        .regex_error
        .as_deref()
        .is_some_and(|message| message.starts_with("regex error: ")));

    driver
        .dispatch(EditorAction::SetSearchTerm("^menu\\.".to_string()))
        .expect("search");
    let snapshot = driver.snapshot();
    assert!(snapshot.regex_error.is_none());
    assert_eq!(
        snapshot.visible_keys,
        vec!["menu.multiplayer".to_string(), "menu.singleplayer".to_string()]
    );
}

#[test]
fn e2e_edit_001_copy_all_undo_redo() {
    let root = tempfile::tempdir().expect("temp dir");
    let mut driver = loaded_driver(root.path());

    driver
        .dispatch(EditorAction::SelectKey("gui.done".to_string()))
        .expect("select");
    driver
        .dispatch(EditorAction::CopyAllSource)
        .expect("copy all");
    let snapshot = driver.snapshot();
    assert_eq!(snapshot.translated_keys, 4);
    assert_eq!(snapshot.edited_value, "Done");
    assert!(snapshot.can_undo);

    driver.dispatch(EditorAction::Undo).expect("undo");
    let snapshot = driver.snapshot();
    assert_eq!(snapshot.translated_keys, 2);
    assert_eq!(snapshot.edited_value, "完了");
    assert!(snapshot.can_redo);

    driver.dispatch(EditorAction::Redo).expect("redo");
    assert_eq!(driver.snapshot().progress, 100);
}

#[test]
fn e2e_edit_002_new_target_and_copy_current() {
    let root = tempfile::tempdir().expect("temp dir");
    let source = root.path().join("en_us.json");
    write_file(&source, SOURCE_JSON);

    let mut driver = EditorDriver::with_prefs_path(None);
    driver
        .dispatch(EditorAction::LoadSource(source))
        .expect("load source");
    driver
        .dispatch(EditorAction::CreateNewTarget(FileFormat::Lang))
        .expect("new target");
    assert_eq!(
        driver.snapshot().target_file_name.as_deref(),
        Some("ja_jp.lang")
    );

    driver
        .dispatch(EditorAction::SelectKey("gui.done".to_string()))
        .expect("select");
    driver
        .dispatch(EditorAction::CopyCurrentSource)
        .expect("copy current");
    let snapshot = driver.snapshot();
    assert_eq!(snapshot.edited_value, "Done");
    assert_eq!(snapshot.translated_keys, 1);
    assert_eq!(snapshot.progress, 25);

    let err = driver
        .dispatch(EditorAction::SelectKey("missing.key".to_string()))
        .expect_err("unknown key");
    assert!(matches!(err, AppError::InvalidInput(_)));
}

#[test]
fn e2e_prefs_001_theme_and_layout_persist() {
    let root = tempfile::tempdir().expect("temp dir");
    let prefs = root.path().join("config").join("ui_prefs.v1");

    let mut driver = EditorDriver::with_prefs_path(Some(prefs.clone()));
    driver
        .dispatch(EditorAction::SetTheme(Theme::Light))
        .expect("theme");
    driver
        .dispatch(EditorAction::SetListPosition(ListPosition::Left))
        .expect("layout");
    assert!(prefs.exists());

    let mut reopened = EditorDriver::with_prefs_path(Some(prefs));
    let snapshot = reopened.snapshot();
    assert_eq!(snapshot.theme, Theme::Light);
    assert_eq!(snapshot.list_position, ListPosition::Left);
}
