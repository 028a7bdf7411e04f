pub mod calendar_view;
pub mod check_overlay;
pub mod config_panel;
pub mod editor_modal;
pub mod help_overlay;
mod helpers;
pub mod status_row;
#[cfg(test)]
pub mod test_helpers;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph};

use super::app::{App, LabelKind, Mode};
use helpers::with_cursor;

/// Draw the whole screen
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();

    // Background fill
    let bg_style = Style::default().bg(app.theme.background);
    frame.render_widget(Block::default().style(bg_style), area);

    // Layout: title (1 row) | calendar | status row (1 row)
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .split(area);

    render_title(frame, app, chunks[0]);
    calendar_view::render_calendar(frame, app, chunks[1]);

    // Modal layers
    match app.mode {
        Mode::Navigate => {}
        Mode::Edit => editor_modal::render_editor_modal(frame, app, area),
        Mode::Config => config_panel::render_config_panel(frame, app, area),
        Mode::Check => check_overlay::render_check_overlay(frame, app, area),
        Mode::Label => {}
    }

    // Help overlay (rendered on top of everything)
    if app.show_help {
        help_overlay::render_help_overlay(frame, app, area);
    }

    status_row::render_status_row(frame, app, chunks[2]);
}

/// Facility, month and the "updated" label, as printed on the sheet header.
/// A label being edited is drawn as its edit box.
fn render_title(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let board = app.workspace.board();
    let editing = app
        .label
        .as_ref()
        .map(|edit| (edit.kind, with_cursor(&edit.buffer, edit.buffer.len())));
    let label = |kind: LabelKind, stored: &str| match &editing {
        Some((k, buffer)) if *k == kind => buffer.clone(),
        _ => stored.to_string(),
    };
    let line = Line::from(vec![
        Span::styled(
            format!(" {}", label(LabelKind::Facility, &board.facility_name)),
            Style::default()
                .fg(app.theme.text_bright)
                .bg(bg)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("  {}", app.month.first_day().format("%B %Y")),
            Style::default().fg(app.theme.highlight).bg(bg),
        ),
        Span::styled(
            format!("  updated {}", label(LabelKind::Updated, &board.update_label)),
            Style::default().fg(app.theme.dim).bg(bg),
        ),
    ]);
    frame.render_widget(Paragraph::new(line).style(Style::default().bg(bg)), area);
}
