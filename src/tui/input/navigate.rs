use std::time::Instant;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::model::SlotId;
use crate::tui::app::{App, CellPart, LabelKind};

pub(super) fn handle_navigate(app: &mut App, key: KeyEvent, now: Instant) {
    match (key.modifiers, key.code) {
        // Quit: Ctrl+Q or q
        (m, KeyCode::Char('q')) if m.contains(KeyModifiers::CONTROL) => {
            app.should_quit = true;
        }
        (_, KeyCode::Char('q')) => app.should_quit = true,

        // Redo: Ctrl+R or U
        (m, KeyCode::Char('r')) if m.contains(KeyModifiers::CONTROL) => app.redo(now),
        (_, KeyCode::Char('U')) => app.redo(now),
        (_, KeyCode::Char('u')) => app.undo(now),

        // Grid movement
        (_, KeyCode::Left | KeyCode::Char('h')) => {
            app.cursor.col = app.cursor.col.saturating_sub(1);
        }
        (_, KeyCode::Right | KeyCode::Char('l')) => {
            app.cursor.col = (app.cursor.col + 1).min(6);
        }
        (_, KeyCode::Up | KeyCode::Char('k')) => move_up(app),
        (_, KeyCode::Down | KeyCode::Char('j')) => move_down(app),

        // Months
        (_, KeyCode::Char('[') | KeyCode::PageUp) => app.set_month(app.month.prev()),
        (_, KeyCode::Char(']') | KeyCode::PageDown) => app.set_month(app.month.next()),
        (_, KeyCode::Char('t')) => app.jump_to_today(),

        (_, KeyCode::Enter | KeyCode::Char('e')) => app.open_editor(now),
        (_, KeyCode::Char('m')) => app.open_config(),
        (_, KeyCode::Char('c')) => app.run_check(),
        (_, KeyCode::Char('x')) => app.export_backup(now),
        (_, KeyCode::Char('F')) => app.open_label(LabelKind::Facility),
        (_, KeyCode::Char('L')) => app.open_label(LabelKind::Updated),
        (_, KeyCode::Char('?')) => app.show_help = true,
        _ => {}
    }
}

/// Down walks upper, middle, lower, footer, then the next week's upper slot
fn move_down(app: &mut App) {
    let rows = app.weeks().len();
    let cursor = &mut app.cursor;
    cursor.part = match cursor.part {
        CellPart::Slot(SlotId::Slot1) => CellPart::Slot(SlotId::Slot2),
        CellPart::Slot(SlotId::Slot2) => CellPart::Slot(SlotId::Slot3),
        CellPart::Slot(SlotId::Slot3) => CellPart::Footer,
        CellPart::Footer if cursor.row + 1 < rows => {
            cursor.row += 1;
            CellPart::Slot(SlotId::Slot1)
        }
        CellPart::Footer => CellPart::Footer,
    };
}

fn move_up(app: &mut App) {
    let cursor = &mut app.cursor;
    cursor.part = match cursor.part {
        CellPart::Footer => CellPart::Slot(SlotId::Slot3),
        CellPart::Slot(SlotId::Slot3) => CellPart::Slot(SlotId::Slot2),
        CellPart::Slot(SlotId::Slot2) => CellPart::Slot(SlotId::Slot1),
        CellPart::Slot(SlotId::Slot1) if cursor.row > 0 => {
            cursor.row -= 1;
            CellPart::Footer
        }
        CellPart::Slot(SlotId::Slot1) => CellPart::Slot(SlotId::Slot1),
    };
}
