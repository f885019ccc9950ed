use put::{App, Editor};
use std::fs;
use tempfile::tempdir;

type TestResult = Result<(), Box<dyn std::error::Error>>;

fn app_with_files(names: &[&str]) -> Result<(tempfile::TempDir, App), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    for name in names {
        fs::write(dir.path().join(name), name.as_bytes())?;
    }
    let app = App::new(dir.path(), Editor::new("true"))?;
    Ok((dir, app))
}

#[test]
fn test_focus_starts_on_first_entry() -> TestResult {
    let (_dir, app) = app_with_files(&["a", "b"])?;
    assert_eq!(app.focused(), Some(0));

    let empty = tempdir()?;
    let app = App::new(empty.path(), Editor::new("true"))?;
    assert_eq!(app.focused(), None);
    assert_eq!(app.focused_path(), None);
    Ok(())
}

#[test]
fn test_select_focused_advances_and_wraps() -> TestResult {
    let (_dir, mut app) = app_with_files(&["a", "bb", "ccc"])?;

    app.select_focused();
    assert!(app.model.is_selected(0));
    assert_eq!(app.focused(), Some(1));

    app.go_to_last();
    app.select_focused();
    assert!(app.model.is_selected(2));
    assert_eq!(app.focused(), Some(0));
    assert_eq!(app.model.selected_size(), 1 + 3);
    Ok(())
}

#[test]
fn test_unselect_focused_skips_unselected_rows() -> TestResult {
    let (_dir, mut app) = app_with_files(&["a", "b"])?;

    app.unselect_focused();
    assert_eq!(app.focused(), Some(0));

    app.select_focused();
    app.previous();
    app.unselect_focused();
    assert!(!app.model.is_selected(0));
    assert_eq!(app.focused(), Some(1));
    assert_eq!(app.model.selected_size(), 0);
    Ok(())
}

#[test]
fn test_navigation_bounds() -> TestResult {
    let (_dir, mut app) = app_with_files(&["a", "b", "c"])?;

    app.previous();
    assert_eq!(app.focused(), Some(2));
    app.next();
    assert_eq!(app.focused(), Some(0));
    app.page_down();
    assert_eq!(app.focused(), Some(2));
    app.page_up();
    assert_eq!(app.focused(), Some(0));
    Ok(())
}

#[test]
fn test_enter_and_leave_directory() -> TestResult {
    let dir = tempdir()?;
    fs::write(dir.path().join("a"), b"x")?;
    fs::create_dir(dir.path().join("sub"))?;
    fs::write(dir.path().join("sub").join("inner"), b"xyz")?;
    let mut app = App::new(dir.path(), Editor::new("true"))?;

    // Files are not entered
    app.enter_dir();
    assert_eq!(app.model.working_dir(), fs::canonicalize(dir.path())?);

    app.select_focused();
    assert_eq!(app.focused(), Some(1));
    app.enter_dir();
    assert_eq!(app.model.working_dir(), fs::canonicalize(dir.path().join("sub"))?);
    assert_eq!(app.model.selected_count(), 0);
    assert_eq!(app.focused(), Some(0));

    app.go_up();
    assert_eq!(app.model.working_dir(), fs::canonicalize(dir.path())?);
    assert_eq!(app.focused(), Some(1));
    Ok(())
}

#[test]
fn test_delete_selected_reports_status() -> TestResult {
    let (dir, mut app) = app_with_files(&["a", "b", "c"])?;

    app.delete_selected();
    assert_eq!(app.status_message.as_deref(), Some("Nothing selected"));

    app.select_focused();
    app.select_focused();
    app.delete_selected();
    assert_eq!(app.model.file_count(), 1);
    assert_eq!(app.focused(), Some(0));
    assert!(dir.path().join("c").exists());
    assert_eq!(app.status_message.as_deref(), Some("Deleted 2 entries"));
    Ok(())
}
