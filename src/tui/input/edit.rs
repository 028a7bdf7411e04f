use std::time::Instant;

use crossterm::event::{KeyCode, KeyEvent};

use crate::ops::editor::{FormatCommand, MarkupFormatter};
use crate::tui::app::{App, EditorState};
use crate::util::markup::plain_to_markup;

use super::*;

pub(super) fn handle_edit(app: &mut App, key: KeyEvent, now: Instant) {
    if key.code == KeyCode::Esc {
        app.cancel_editor();
        return;
    }
    if is_ctrl(&key, 's') {
        app.save_editor(now);
        return;
    }

    let residents = app.workspace.residents();
    let Some(state) = app.editor.as_mut() else {
        return;
    };

    let mut notice = None;
    if is_ctrl(&key, 'b') {
        format(state, &FormatCommand::Bold);
    } else if is_ctrl(&key, 't') {
        let color = state.next_text_color();
        format(state, &FormatCommand::ForeColor(color));
    } else if is_ctrl(&key, 'e') {
        match residents.get(state.picked) {
            Some(name) => format(state, &FormatCommand::InsertResident(name.to_string())),
            None => notice = Some("no residents to insert".to_string()),
        }
    } else if is_ctrl(&key, 'k') {
        state.session.cycle_color();
    } else if is_ctrl(&key, 'w') {
        if !state.session.target().is_week() {
            notice = Some("only week footers can repeat every month".to_string());
        }
        state.session.toggle_propagate();
    } else if is_ctrl(&key, 'z') {
        if state.session.undo() {
            state.sync_from_session();
        }
    } else if is_ctrl(&key, 'y') {
        if state.session.redo() {
            state.sync_from_session();
        }
    } else {
        match key.code {
            KeyCode::Tab => state.picked = cycle(state.picked, residents.len(), true),
            KeyCode::BackTab => state.picked = cycle(state.picked, residents.len(), false),
            KeyCode::Enter => insert(state, "\n", now),
            KeyCode::Backspace => backspace(state, now),
            KeyCode::Left => state.cursor = prev_boundary(&state.buffer, state.cursor),
            KeyCode::Right => state.cursor = next_boundary(&state.buffer, state.cursor),
            KeyCode::Home => state.cursor = line_start(&state.buffer, state.cursor),
            KeyCode::End => state.cursor = line_end(&state.buffer, state.cursor),
            _ => {
                if let Some(c) = typed_char(&key) {
                    insert(state, c.encode_utf8(&mut [0; 4]), now);
                }
            }
        }
    }

    if let Some(message) = notice {
        app.notify(message, now);
    }
}

/// Run a formatting command; the session records it at once
fn format(state: &mut EditorState, command: &FormatCommand) {
    let mut formatter = MarkupFormatter;
    state.session.format(&mut formatter, command);
    state.sync_from_session();
}

fn insert(state: &mut EditorState, text: &str, now: Instant) {
    state.buffer.insert_str(state.cursor, text);
    state.cursor += text.len();
    typed(state, now);
}

fn backspace(state: &mut EditorState, now: Instant) {
    if state.cursor == 0 {
        return;
    }
    let start = prev_boundary(&state.buffer, state.cursor);
    state.buffer.replace_range(start..state.cursor, "");
    state.cursor = start;
    typed(state, now);
}

/// The edit box changed by typing; the session debounces the history entry
fn typed(state: &mut EditorState, now: Instant) {
    state.session.input(plain_to_markup(&state.buffer), now);
}

fn prev_boundary(s: &str, pos: usize) -> usize {
    s[..pos].char_indices().next_back().map_or(0, |(i, _)| i)
}

fn next_boundary(s: &str, pos: usize) -> usize {
    s[pos..].chars().next().map_or(pos, |c| pos + c.len_utf8())
}

fn line_start(s: &str, pos: usize) -> usize {
    s[..pos].rfind('\n').map_or(0, |i| i + 1)
}

fn line_end(s: &str, pos: usize) -> usize {
    s[pos..].find('\n').map_or(s.len(), |i| pos + i)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boundaries_respect_multibyte_chars() {
        let s = "a\u{00e9}b";
        assert_eq!(next_boundary(s, 1), 3);
        assert_eq!(prev_boundary(s, 3), 1);
        assert_eq!(prev_boundary(s, 0), 0);
        assert_eq!(next_boundary(s, s.len()), s.len());
    }

    #[test]
    fn line_bounds() {
        let s = "Smith\nLee";
        assert_eq!(line_start(s, 8), 6);
        assert_eq!(line_end(s, 2), 5);
        assert_eq!(line_end(s, 7), 9);
        assert_eq!(line_start(s, 3), 0);
    }
}
