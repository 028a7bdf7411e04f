use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::text::Span;

use crate::model::ScheduleSlot;
use crate::util::markup::display_lines;
use crate::util::unicode;

/// Create a centered rectangle of the given percentage of the parent
pub(super) fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

/// Compute total display width of a slice of spans
pub(super) fn spans_width(spans: &[Span]) -> usize {
    spans
        .iter()
        .map(|s| unicode::display_width(&s.content))
        .sum()
}

/// Slot content on one line, lines separated by `sep`
pub(super) fn one_line(slot: &ScheduleSlot, sep: &str) -> String {
    display_lines(&slot.text).join(sep)
}

/// Text with a block cursor drawn at byte offset `cursor`
pub(super) fn with_cursor(text: &str, cursor: usize) -> String {
    let cursor = cursor.min(text.len());
    format!("{}\u{258C}{}", &text[..cursor], &text[cursor..])
}
