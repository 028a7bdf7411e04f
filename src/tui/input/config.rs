use std::time::Instant;

use crossterm::event::{KeyCode, KeyEvent};

use crate::model::ColorTag;
use crate::tui::app::{App, ConfigState};

use super::*;

pub(super) fn handle_config(app: &mut App, key: KeyEvent, now: Instant) {
    let Some(state) = app.config.as_mut() else {
        return;
    };

    if state.new_resident.is_some() {
        let notice = handle_new_resident(state, key);
        if let Some(message) = notice {
            app.notify(message, now);
        }
        return;
    }
    if state.editing.is_some() {
        handle_field_text(state, key);
        return;
    }

    let field = state.field();
    let residents = state.session.residents().len();
    let mut notice = None;
    match key.code {
        KeyCode::Esc => {
            app.discard_config();
            return;
        }
        // s or Ctrl+S
        KeyCode::Char('s') => {
            app.save_config(now);
            return;
        }
        _ if is_ctrl(&key, 'z') => {
            state.session.undo();
        }
        _ if is_ctrl(&key, 'y') => {
            state.session.redo();
        }
        KeyCode::Char('u') => {
            state.session.undo();
        }
        KeyCode::Char('U') => {
            state.session.redo();
        }
        KeyCode::Up | KeyCode::Char('k') => {
            state.selected = state.selected.saturating_sub(1);
        }
        KeyCode::Down | KeyCode::Char('j') => {
            state.selected = (state.selected + 1).min(state.fields.len() - 1);
        }
        KeyCode::Enter | KeyCode::Char('e') => {
            state.editing = Some(state.session.field_text(field));
        }
        KeyCode::Char('c') => {
            let next = state
                .session
                .field(field)
                .map_or(ColorTag::Yellow, |slot| slot.color)
                .next();
            state.session.set_color(field, next);
        }
        KeyCode::Tab => state.picked = cycle(state.picked, residents, true),
        KeyCode::BackTab => state.picked = cycle(state.picked, residents, false),
        KeyCode::Char('a') => match picked_name(state) {
            Some(name) => state.session.append_resident(field, &name),
            None => notice = Some("no residents yet: press n to add one"),
        },
        KeyCode::Char('n') => state.new_resident = Some(String::new()),
        KeyCode::Char('d') => {
            if let Some(name) = picked_name(state) {
                state.session.remove_resident(&name);
                let len = state.session.residents().len();
                state.picked = state.picked.min(len.saturating_sub(1));
            }
        }
        _ => {}
    }

    if let Some(message) = notice {
        app.notify(message, now);
    }
}

fn picked_name(state: &ConfigState) -> Option<String> {
    state
        .session
        .residents()
        .get(state.picked)
        .map(str::to_string)
}

/// Typing into the selected field. Changes are live; leaving the field records them.
fn handle_field_text(state: &mut ConfigState, key: KeyEvent) {
    let field = state.field();
    let Some(buffer) = state.editing.as_mut() else {
        return;
    };
    match key.code {
        KeyCode::Esc | KeyCode::Tab => {
            state.editing = None;
            state.session.blur();
            return;
        }
        KeyCode::Enter => buffer.push('\n'),
        KeyCode::Backspace => {
            buffer.pop();
        }
        _ => match typed_char(&key) {
            Some(c) => buffer.push(c),
            None => return,
        },
    }
    let text = buffer.clone();
    state.session.edit_text(field, &text);
}

fn handle_new_resident(state: &mut ConfigState, key: KeyEvent) -> Option<String> {
    let buffer = state.new_resident.as_mut()?;
    match key.code {
        KeyCode::Esc => state.new_resident = None,
        KeyCode::Enter => {
            let name = buffer.trim().to_string();
            state.new_resident = None;
            if !state.session.add_resident(&name) {
                return Some(format!("'{}' is blank or already listed", name));
            }
            state.picked = state.session.residents().len() - 1;
        }
        KeyCode::Backspace => {
            buffer.pop();
        }
        _ => {
            if let Some(c) = typed_char(&key) {
                buffer.push(c);
            }
        }
    }
    None
}
