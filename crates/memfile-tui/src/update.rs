//! Form reducer (update function).
//!
//! All state mutations happen here. The runtime calls `update(app, event)`
//! and executes the returned effects.
//!
//! Every action issues at most one store operation and reports the outcome on
//! the status line. The field that submitted a successful action is cleared;
//! a rejected action leaves its field untouched so the user can fix it.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use memfile_core::session::{Notice, StoreError};
use tracing::{debug, info, warn};

use crate::common::sanitize_paste;
use crate::effects::UiEffect;
use crate::events::UiEvent;
use crate::state::{AppState, Focus};
use crate::status::StatusMessage;

/// The main reducer function.
pub fn update(app: &mut AppState, event: UiEvent) -> Vec<UiEffect> {
    match event {
        UiEvent::Terminal(Event::Key(key)) if key.kind != KeyEventKind::Release => {
            handle_key(app, key)
        }
        UiEvent::Terminal(Event::Paste(text)) => {
            handle_paste(app, &text);
            vec![]
        }
        UiEvent::Terminal(_) => vec![],
        UiEvent::Exported { name, result } => {
            app.status = Some(match result {
                Ok(path) => {
                    info!(name = %name, path = %path.display(), "download written");
                    StatusMessage::success(format!("Downloaded '{name}' to {}", path.display()))
                }
                Err(error) => {
                    warn!(name = %name, %error, "download failed");
                    StatusMessage::warning(format!("Download failed: {error}"))
                }
            });
            vec![]
        }
    }
}

fn handle_key(app: &mut AppState, key: KeyEvent) -> Vec<UiEffect> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    if ctrl {
        match key.code {
            KeyCode::Char('q' | 'c') => return vec![UiEffect::Quit],
            KeyCode::Char('s') => {
                submit_body(app);
                return vec![];
            }
            KeyCode::Char('t') => {
                toggle_view(app);
                return vec![];
            }
            KeyCode::Char('e') => return export(app),
            KeyCode::Char('d') => {
                delete(app);
                return vec![];
            }
            KeyCode::Char('r') => {
                clear_all(app);
                return vec![];
            }
            _ => {}
        }
    }

    match key.code {
        KeyCode::Tab => {
            app.focus = app.focus.next();
            return vec![];
        }
        KeyCode::BackTab => {
            app.focus = app.focus.prev();
            return vec![];
        }
        KeyCode::PageUp => {
            app.viewer.page_up();
            return vec![];
        }
        KeyCode::PageDown => {
            app.viewer.page_down(app.session.displayed_content());
            return vec![];
        }
        _ => {}
    }

    match app.focus {
        Focus::Sidebar => handle_sidebar_key(app, key),
        Focus::Name => {
            if key.code == KeyCode::Enter {
                create(app);
            } else {
                app.name_input.input(key);
            }
        }
        Focus::Data => {
            app.data_input.input(key);
        }
        Focus::Append => {
            app.append_input.input(key);
        }
    }
    vec![]
}

fn handle_sidebar_key(app: &mut AppState, key: KeyEvent) {
    let len = app.session.len();
    match key.code {
        KeyCode::Up | KeyCode::Char('k') => app.sidebar.select_prev(),
        KeyCode::Down | KeyCode::Char('j') => app.sidebar.select_next(len),
        KeyCode::Home => app.sidebar.selected = 0,
        KeyCode::End => app.sidebar.select_last(len),
        KeyCode::Enter => open_selected(app),
        _ => {}
    }
}

fn handle_paste(app: &mut AppState, text: &str) {
    let text = sanitize_paste(text);
    match app.focus {
        Focus::Sidebar => {}
        Focus::Name => app.name_input.insert_str(&text),
        Focus::Data => app.data_input.insert_str(&text),
        Focus::Append => app.append_input.insert_str(&text),
    }
}

// ============================================================================
// Actions
// ============================================================================

fn create(app: &mut AppState) {
    let result = app.session.create_file(&app.name_input.text());
    if report(app, result) {
        app.name_input.clear();
        follow_current(app);
    }
}

/// Ctrl+S: saves from the data field or appends from the update field.
fn submit_body(app: &mut AppState) {
    match app.focus {
        Focus::Data => {
            let result = app.session.save_data(&app.data_input.text());
            if report(app, result) {
                app.data_input.clear();
            }
        }
        Focus::Append => {
            let result = app.session.append_data(&app.append_input.text());
            if report(app, result) {
                app.append_input.clear();
            }
        }
        Focus::Name => create(app),
        Focus::Sidebar => open_selected(app),
    }
}

fn open_selected(app: &mut AppState) {
    let Some(name) = app.selected_name().map(str::to_string) else {
        app.status = Some(StatusMessage::info("No files created yet."));
        return;
    };
    let result = app.session.open_file(&name);
    if report(app, result) {
        app.viewer.reset();
    }
}

fn toggle_view(app: &mut AppState) {
    let notice = app.session.toggle_view();
    if notice != Notice::NothingSaved {
        app.viewer.reset();
    }
    app.status = Some(notice.into());
}

fn delete(app: &mut AppState) {
    let result = app.session.delete_file();
    if report(app, result) {
        app.sidebar.clamp(app.session.len());
    }
}

fn clear_all(app: &mut AppState) {
    let notice = app.session.clear_all();
    app.name_input.clear();
    app.data_input.clear();
    app.append_input.clear();
    app.sidebar.selected = 0;
    app.viewer.reset();
    app.status = Some(notice.into());
}

fn export(app: &mut AppState) -> Vec<UiEffect> {
    match app.session.export_file() {
        Ok(Some(artifact)) => {
            debug!(name = artifact.file_name(), "download requested");
            vec![UiEffect::WriteExport {
                artifact,
                dir: app.export.dir.clone(),
                overwrite: app.export.overwrite,
            }]
        }
        Ok(None) => {
            app.status = Some(Notice::NothingSaved.into());
            vec![]
        }
        Err(err) => {
            app.status = Some(err.into());
            vec![]
        }
    }
}

// ============================================================================
// Helpers
// ============================================================================

/// Puts the outcome on the status line. Returns true on success.
fn report(app: &mut AppState, result: Result<Notice, StoreError>) -> bool {
    match result {
        Ok(notice) => {
            app.status = Some(notice.into());
            true
        }
        Err(err) => {
            app.status = Some(err.into());
            false
        }
    }
}

fn follow_current(app: &mut AppState) {
    if let Some(current) = app.session.current().map(str::to_string) {
        app.sidebar.follow(app.session.names(), &current);
    }
    app.viewer.reset();
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use memfile_core::session::NoticeLevel;

    use super::*;
    use crate::state::ExportSettings;

    fn app() -> AppState {
        AppState::new(ExportSettings {
            dir: PathBuf::from("/tmp/out"),
            overwrite: false,
        })
    }

    fn press(app: &mut AppState, code: KeyCode) -> Vec<UiEffect> {
        update(
            app,
            UiEvent::Terminal(Event::Key(KeyEvent::new(code, KeyModifiers::NONE))),
        )
    }

    fn ctrl(app: &mut AppState, ch: char) -> Vec<UiEffect> {
        update(
            app,
            UiEvent::Terminal(Event::Key(KeyEvent::new(
                KeyCode::Char(ch),
                KeyModifiers::CONTROL,
            ))),
        )
    }

    fn type_text(app: &mut AppState, text: &str) {
        for ch in text.chars() {
            if ch == '\n' {
                press(app, KeyCode::Enter);
            } else {
                press(app, KeyCode::Char(ch));
            }
        }
    }

    fn create(app: &mut AppState, name: &str) {
        app.focus = Focus::Name;
        type_text(app, name);
        press(app, KeyCode::Enter);
    }

    fn save(app: &mut AppState, body: &str) {
        app.focus = Focus::Data;
        type_text(app, body);
        ctrl(app, 's');
    }

    fn append(app: &mut AppState, body: &str) {
        app.focus = Focus::Append;
        type_text(app, body);
        ctrl(app, 's');
    }

    fn level(app: &AppState) -> Option<NoticeLevel> {
        app.status.as_ref().map(|s| s.level)
    }

    #[test]
    fn test_create_clears_field_and_selects_file() {
        let mut app = app();
        create(&mut app, "b.txt");
        create(&mut app, "a.txt");

        assert!(app.name_input.is_empty());
        assert_eq!(app.session.current(), Some("a.txt"));
        assert_eq!(app.selected_name(), Some("a.txt"));
        assert_eq!(level(&app), Some(NoticeLevel::Success));
    }

    #[test]
    fn test_duplicate_name_warns_and_keeps_field() {
        let mut app = app();
        create(&mut app, "a.txt");
        create(&mut app, "a.txt");

        assert_eq!(level(&app), Some(NoticeLevel::Warning));
        assert_eq!(app.name_input.text(), "a.txt");
        assert_eq!(app.file_names(), vec!["a.txt"]);
        assert_eq!(app.session.content("a.txt"), Some(""));
    }

    #[test]
    fn test_save_without_file_warns() {
        let mut app = app();
        save(&mut app, "text");

        assert_eq!(
            app.status,
            Some(StatusMessage::warning("Please create a file first."))
        );
        assert!(app.session.is_empty());
        assert_eq!(app.data_input.text(), "text");
    }

    #[test]
    fn test_multiline_save_and_append() {
        let mut app = app();
        create(&mut app, "notes.txt");
        save(&mut app, "Hello\nthere ");
        append(&mut app, "World");

        assert_eq!(app.session.current_content(), Some("Hello\nthere\nWorld"));
        assert!(app.data_input.is_empty());
        assert!(app.append_input.is_empty());
    }

    #[test]
    fn test_export_emits_write_effect() {
        let mut app = app();
        create(&mut app, "notes.txt");
        save(&mut app, "Hello");
        append(&mut app, "World");

        let effects = ctrl(&mut app, 'e');

        let [UiEffect::WriteExport {
            artifact,
            dir,
            overwrite,
        }] = effects.as_slice()
        else {
            panic!("expected one export effect, got {effects:?}");
        };
        assert_eq!(artifact.bytes(), b"Hello\nWorld");
        assert_eq!(artifact.file_name(), "notes.txt");
        assert_eq!(dir, &PathBuf::from("/tmp/out"));
        assert!(!overwrite);
    }

    #[test]
    fn test_export_before_save_is_info() {
        let mut app = app();
        create(&mut app, "a");

        assert!(ctrl(&mut app, 'e').is_empty());
        assert_eq!(level(&app), Some(NoticeLevel::Info));
    }

    #[test]
    fn test_export_result_reported() {
        let mut app = app();
        update(
            &mut app,
            UiEvent::Exported {
                name: "a".to_string(),
                result: Err("disk full".to_string()),
            },
        );
        assert_eq!(
            app.status,
            Some(StatusMessage::warning("Download failed: disk full"))
        );
    }

    #[test]
    fn test_toggle_view_flow() {
        let mut app = app();
        ctrl(&mut app, 't');
        assert_eq!(level(&app), Some(NoticeLevel::Info));

        create(&mut app, "a");
        save(&mut app, "body");
        ctrl(&mut app, 't');
        assert_eq!(app.session.displayed_content(), Some("body"));

        ctrl(&mut app, 't');
        assert!(app.session.displayed_content().is_none());
    }

    #[test]
    fn test_open_from_sidebar() {
        let mut app = app();
        create(&mut app, "a");
        save(&mut app, "first");
        create(&mut app, "b");

        app.focus = Focus::Sidebar;
        press(&mut app, KeyCode::Up);
        press(&mut app, KeyCode::Enter);

        assert_eq!(app.session.current(), Some("a"));
        assert_eq!(app.session.displayed_content(), Some("first"));
    }

    #[test]
    fn test_open_with_empty_sidebar_is_info() {
        let mut app = app();
        app.focus = Focus::Sidebar;
        press(&mut app, KeyCode::Enter);

        assert_eq!(level(&app), Some(NoticeLevel::Info));
    }

    #[test]
    fn test_delete_keeps_name_retired() {
        let mut app = app();
        create(&mut app, "a");
        ctrl(&mut app, 'd');

        assert!(app.session.is_empty());
        assert!(app.session.current().is_none());

        create(&mut app, "a");
        assert_eq!(level(&app), Some(NoticeLevel::Warning));

        ctrl(&mut app, 'd');
        assert_eq!(
            app.status,
            Some(StatusMessage::warning("Please create a file first."))
        );
    }

    #[test]
    fn test_clear_all_resets_fields() {
        let mut app = app();
        create(&mut app, "a");
        app.focus = Focus::Data;
        type_text(&mut app, "draft");

        ctrl(&mut app, 'r');

        assert!(app.session.is_empty());
        assert!(app.data_input.is_empty());
        assert_eq!(app.status, Some(StatusMessage::success("Cleared 1 file(s).")));
    }

    #[test]
    fn test_paste_goes_to_focused_field() {
        let mut app = app();
        app.focus = Focus::Data;
        update(
            &mut app,
            UiEvent::Terminal(Event::Paste("one\r\ntwo".to_string())),
        );
        assert_eq!(app.data_input.text(), "one\ntwo");

        app.focus = Focus::Name;
        update(&mut app, UiEvent::Terminal(Event::Paste("x\ny".to_string())));
        assert_eq!(app.name_input.text(), "x y");
    }

    #[test]
    fn test_tab_cycles_focus() {
        let mut app = app();
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.focus, Focus::Data);
        press(&mut app, KeyCode::BackTab);
        press(&mut app, KeyCode::BackTab);
        assert_eq!(app.focus, Focus::Sidebar);
    }

    #[test]
    fn test_quit_keys() {
        let mut app = app();
        assert_eq!(ctrl(&mut app, 'q'), vec![UiEffect::Quit]);
        assert_eq!(ctrl(&mut app, 'c'), vec![UiEffect::Quit]);
    }

    #[test]
    fn test_key_release_is_ignored() {
        let mut app = app();
        let mut key = KeyEvent::new(KeyCode::Char('x'), KeyModifiers::NONE);
        key.kind = KeyEventKind::Release;
        update(&mut app, UiEvent::Terminal(Event::Key(key)));
        assert!(app.name_input.is_empty());
    }
}
