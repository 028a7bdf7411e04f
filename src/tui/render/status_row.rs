use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::app::{App, Mode};
use crate::util::unicode::display_width;

use super::helpers::spans_width;

/// Render the status row (bottom of screen)
pub fn render_status_row(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let width = area.width as usize;

    let mut spans = match &app.notice {
        Some((message, _)) => vec![Span::styled(
            format!(" {}", message),
            Style::default().fg(app.theme.yellow).bg(bg),
        )],
        None => vec![Span::styled(
            format!(" {}", mode_hint(app.mode)),
            Style::default().fg(app.theme.dim).bg(bg),
        )],
    };

    // History position, right-aligned
    let history = app.workspace.history();
    let position = format!("{}/{} ", history.cursor() + 1, history.len());
    let used = spans_width(&spans);
    let pos_width = display_width(&position);
    if used + pos_width < width {
        spans.push(Span::styled(
            " ".repeat(width - used - pos_width),
            Style::default().bg(bg),
        ));
        spans.push(Span::styled(
            position,
            Style::default().fg(app.theme.dim).bg(bg),
        ));
    }

    let paragraph = Paragraph::new(Line::from(spans)).style(Style::default().bg(bg));
    frame.render_widget(paragraph, area);
}

fn mode_hint(mode: Mode) -> &'static str {
    match mode {
        Mode::Navigate => "Enter edit  m master  c check  u/U undo/redo  ? help",
        Mode::Edit => "Ctrl+S save  Esc cancel  ? help",
        Mode::Config => "s save  Esc discard  ? help",
        Mode::Check => "Esc close",
        Mode::Label => "Enter save  Esc cancel",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::app::test_app;
    use crate::tui::render::test_helpers::*;
    use std::time::Instant;
    use tempfile::TempDir;

    #[test]
    fn hint_and_history_position() {
        let tmp = TempDir::new().unwrap();
        let app = test_app(tmp.path());
        let out = render_to_string(TERM_W, 1, |frame, area| {
            render_status_row(frame, &app, area)
        });
        assert!(out.starts_with(" Enter edit"));
        assert!(out.ends_with("1/1"));
    }

    #[test]
    fn notice_replaces_hint() {
        let tmp = TempDir::new().unwrap();
        let mut app = test_app(tmp.path());
        app.notify("exported", Instant::now());
        let out = render_to_string(TERM_W, 1, |frame, area| {
            render_status_row(frame, &app, area)
        });
        assert!(out.starts_with(" exported"));
        assert!(!out.contains("? help"));
    }
}
