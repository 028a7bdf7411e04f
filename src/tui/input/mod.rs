mod config;
mod edit;
mod label;
mod navigate;

use std::time::Instant;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::app::{App, Mode};

use config::handle_config;
use edit::handle_edit;
use label::handle_label;
use navigate::handle_navigate;

/// Handle a key event in the current mode
pub fn handle_key(app: &mut App, key: KeyEvent, now: Instant) {
    // Ignore bare modifier key presses (Shift, Ctrl, Alt, etc.)
    if matches!(key.code, KeyCode::Modifier(_)) {
        return;
    }

    // Help overlay intercepts everything
    if app.show_help {
        if matches!(key.code, KeyCode::Char('?') | KeyCode::Char('q') | KeyCode::Esc) {
            app.show_help = false;
        }
        return;
    }

    match app.mode {
        Mode::Navigate => handle_navigate(app, key, now),
        Mode::Edit => handle_edit(app, key, now),
        Mode::Config => handle_config(app, key, now),
        Mode::Check => handle_check(app, key),
        Mode::Label => handle_label(app, key, now),
    }
}

fn handle_check(app: &mut App, key: KeyEvent) {
    if matches!(
        key.code,
        KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q') | KeyCode::Char('c')
    ) {
        app.mode = Mode::Navigate;
    }
}

/// Ctrl+`c`
fn is_ctrl(key: &KeyEvent, c: char) -> bool {
    key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char(c)
}

/// A printable character typed without Ctrl or Alt
fn typed_char(key: &KeyEvent) -> Option<char> {
    match key.code {
        KeyCode::Char(c)
            if !key
                .modifiers
                .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
        {
            Some(c)
        }
        _ => None,
    }
}

/// Step a picker index through `len` entries, wrapping
fn cycle(index: usize, len: usize, forward: bool) -> usize {
    if len == 0 {
        return 0;
    }
    let index = index.min(len - 1);
    if forward {
        (index + 1) % len
    } else {
        (index + len - 1) % len
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ColorTag, SlotId};
    use crate::ops::resolve::resolve_day;
    use crate::tui::app::test_app;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn press(app: &mut App, code: KeyCode) {
        handle_key(app, KeyEvent::new(code, KeyModifiers::NONE), Instant::now());
    }

    fn ctrl(app: &mut App, c: char) {
        handle_key(
            app,
            KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL),
            Instant::now(),
        );
    }

    fn type_str(app: &mut App, s: &str) {
        for c in s.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    #[test]
    fn type_and_save_a_day_slot() {
        let tmp = TempDir::new().unwrap();
        let mut app = test_app(tmp.path());
        press(&mut app, KeyCode::Right); // Monday the 2nd
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.mode, Mode::Edit);

        type_str(&mut app, "Smith");
        press(&mut app, KeyCode::Enter);
        type_str(&mut app, "Lee");
        ctrl(&mut app, 'k'); // pink -> blue
        ctrl(&mut app, 's');

        assert_eq!(app.mode, Mode::Navigate);
        let date = NaiveDate::from_ymd_opt(2026, 3, 2).unwrap();
        let slot = resolve_day(app.workspace.layers(), date, SlotId::Slot1);
        assert_eq!(slot.text, "Smith<br>Lee");
        assert_eq!(slot.color, ColorTag::Blue);
    }

    #[test]
    fn escape_discards_editor() {
        let tmp = TempDir::new().unwrap();
        let mut app = test_app(tmp.path());
        press(&mut app, KeyCode::Enter);
        type_str(&mut app, "nope");
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.mode, Mode::Navigate);
        assert!(app.workspace.layers().overrides.is_empty());
    }

    #[test]
    fn editor_undo_flushes_typing_first() {
        let tmp = TempDir::new().unwrap();
        let mut app = test_app(tmp.path());
        press(&mut app, KeyCode::Enter);
        type_str(&mut app, "ab");
        ctrl(&mut app, 'z');
        // The pending text was recorded, then undone back to the empty start
        assert_eq!(app.editor.as_ref().unwrap().buffer, "");
        ctrl(&mut app, 'y');
        assert_eq!(app.editor.as_ref().unwrap().buffer, "ab");
    }

    #[test]
    fn bold_wraps_last_line() {
        let tmp = TempDir::new().unwrap();
        let mut app = test_app(tmp.path());
        press(&mut app, KeyCode::Enter);
        type_str(&mut app, "Smith");
        ctrl(&mut app, 'b');
        assert_eq!(app.editor.as_ref().unwrap().buffer, "<b>Smith</b>");
    }

    #[test]
    fn navigate_moves_through_slots_and_footer() {
        let tmp = TempDir::new().unwrap();
        let mut app = test_app(tmp.path());
        for _ in 0..3 {
            press(&mut app, KeyCode::Down);
        }
        assert_eq!(app.cursor.part, crate::tui::app::CellPart::Footer);
        press(&mut app, KeyCode::Down);
        assert_eq!(app.cursor.row, 1);
        assert_eq!(app.cursor.part, crate::tui::app::CellPart::Slot(SlotId::Slot1));
        press(&mut app, KeyCode::Up);
        assert_eq!(app.cursor.row, 0);
        assert_eq!(app.cursor.part, crate::tui::app::CellPart::Footer);
    }

    #[test]
    fn month_keys_and_help() {
        let tmp = TempDir::new().unwrap();
        let mut app = test_app(tmp.path());
        press(&mut app, KeyCode::Char(']'));
        assert_eq!(app.month.to_string(), "2026-04");
        press(&mut app, KeyCode::Char('['));
        press(&mut app, KeyCode::Char('['));
        assert_eq!(app.month.to_string(), "2026-02");

        press(&mut app, KeyCode::Char('?'));
        assert!(app.show_help);
        // Keys go to the overlay while it is open
        press(&mut app, KeyCode::Char(']'));
        assert_eq!(app.month.to_string(), "2026-02");
        press(&mut app, KeyCode::Esc);
        assert!(!app.show_help);
    }

    #[test]
    fn check_overlay_opens_and_closes() {
        let tmp = TempDir::new().unwrap();
        let mut app = test_app(tmp.path());
        press(&mut app, KeyCode::Char('c'));
        assert_eq!(app.mode, Mode::Check);
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.mode, Mode::Navigate);
    }

    #[test]
    fn config_edit_and_save() {
        let tmp = TempDir::new().unwrap();
        let mut app = test_app(tmp.path());
        press(&mut app, KeyCode::Char('m'));
        assert_eq!(app.mode, Mode::Config);

        // Add a resident
        press(&mut app, KeyCode::Char('n'));
        type_str(&mut app, "Smith");
        press(&mut app, KeyCode::Enter);

        // First field is the week 1 footer
        press(&mut app, KeyCode::Enter);
        type_str(&mut app, "Nails");
        press(&mut app, KeyCode::Esc);
        press(&mut app, KeyCode::Char('s'));

        assert_eq!(app.mode, Mode::Navigate);
        let master = &app.workspace.layers().master_schedule;
        assert_eq!(master.weekly_footer_at(0).unwrap().text, "Nails");
        assert_eq!(app.workspace.residents().len(), 1);
    }

    #[test]
    fn config_escape_discards() {
        let tmp = TempDir::new().unwrap();
        let mut app = test_app(tmp.path());
        press(&mut app, KeyCode::Char('m'));
        press(&mut app, KeyCode::Char('c'));
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.mode, Mode::Navigate);
        assert!(app.workspace.layers().master_schedule.weekly_footer_at(0).is_none());
    }

    #[test]
    fn header_labels_edit_in_place() {
        let tmp = TempDir::new().unwrap();
        let mut app = test_app(tmp.path());

        press(&mut app, KeyCode::Char('F'));
        assert_eq!(app.mode, Mode::Label);
        for _ in 0.."2F South Wing".len() {
            press(&mut app, KeyCode::Backspace);
        }
        type_str(&mut app, "Annex?");
        press(&mut app, KeyCode::Backspace);
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.mode, Mode::Navigate);
        assert_eq!(app.workspace.board().facility_name, "Annex");

        press(&mut app, KeyCode::Char('L'));
        press(&mut app, KeyCode::Backspace);
        type_str(&mut app, "10");
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.workspace.board().update_label, "3/10");

        // Esc leaves the stored label alone
        press(&mut app, KeyCode::Char('L'));
        type_str(&mut app, "x");
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.mode, Mode::Navigate);
        assert_eq!(app.workspace.board().update_label, "3/10");
    }

    #[test]
    fn picker_cycles() {
        assert_eq!(cycle(0, 3, true), 1);
        assert_eq!(cycle(2, 3, true), 0);
        assert_eq!(cycle(0, 3, false), 2);
        assert_eq!(cycle(5, 0, true), 0);
    }
}
