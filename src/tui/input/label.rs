use std::time::Instant;

use crossterm::event::{KeyCode, KeyEvent};

use crate::tui::app::App;

use super::typed_char;

pub(super) fn handle_label(app: &mut App, key: KeyEvent, now: Instant) {
    match key.code {
        KeyCode::Enter => app.save_label(now),
        KeyCode::Esc => app.cancel_label(),
        KeyCode::Backspace => {
            if let Some(edit) = &mut app.label {
                edit.buffer.pop();
            }
        }
        _ => {
            if let (Some(c), Some(edit)) = (typed_char(&key), &mut app.label) {
                edit.buffer.push(c);
            }
        }
    }
}
