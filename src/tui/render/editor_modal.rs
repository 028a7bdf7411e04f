use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use crate::tui::app::App;
use crate::tui::theme::Theme;

use super::helpers::{centered_rect, with_cursor};

/// The slot editor: edit box, color and repeat state, resident picker
pub fn render_editor_modal(frame: &mut Frame, app: &App, area: Rect) {
    let Some(editor) = &app.editor else {
        return;
    };
    let session = &editor.session;
    let popup = centered_rect(70, 70, area);
    frame.render_widget(Clear, popup);

    let bg = app.theme.background;
    let text_style = Style::default().fg(app.theme.text_bright).bg(bg);
    let dim_style = Style::default().fg(app.theme.dim).bg(bg);

    let mut lines: Vec<Line> = with_cursor(&editor.buffer, editor.cursor)
        .split('\n')
        .map(|l| Line::from(Span::styled(l.to_string(), text_style)))
        .collect();
    lines.push(Line::from(""));

    let mut status = vec![
        Span::styled(" color ", dim_style),
        Span::styled(
            format!(" {} ", Theme::color_label(session.color())),
            Style::default()
                .fg(app.theme.cell_text)
                .bg(app.theme.slot_bg(session.color()))
                .add_modifier(Modifier::BOLD),
        ),
    ];
    if session.target().is_week() {
        let repeat = if session.propagate() { "on" } else { "off" };
        status.push(Span::styled(format!("  repeat for row: {}", repeat), dim_style));
    }
    lines.push(Line::from(status));

    let residents = app.workspace.residents();
    if residents.is_empty() {
        lines.push(Line::from(Span::styled(" (no residents)", dim_style)));
    } else {
        let mut picker = vec![Span::styled(" ", dim_style)];
        for (i, name) in residents.iter().enumerate() {
            let style = if i == editor.picked % residents.len() {
                Style::default()
                    .fg(app.theme.highlight)
                    .bg(bg)
                    .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
            } else {
                Style::default().fg(app.theme.text).bg(bg)
            };
            picker.push(Span::styled(name.to_string(), style));
            picker.push(Span::styled(" ", dim_style));
        }
        lines.push(Line::from(picker));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        " Ctrl+S save  Esc cancel  ? help",
        dim_style,
    )));

    let block = Block::default()
        .title(format!(" {} ", session.target()))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.highlight).bg(bg))
        .style(Style::default().bg(bg));
    frame.render_widget(
        Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: false })
            .style(Style::default().bg(bg)),
        popup,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::app::{CellPart, test_app};
    use crate::tui::render::test_helpers::*;
    use std::time::Instant;
    use tempfile::TempDir;

    #[test]
    fn shows_target_buffer_and_color() {
        let tmp = TempDir::new().unwrap();
        let mut app = test_app(tmp.path());
        app.open_editor(Instant::now());
        let editor = app.editor.as_mut().unwrap();
        editor.buffer = "Smith\nLee".into();
        editor.cursor = editor.buffer.len();

        let out = render_to_string(TERM_W, TERM_H, |frame, area| {
            render_editor_modal(frame, &app, area)
        });
        assert!(out.contains("2026-03-01 upper"));
        assert!(out.contains("Smith"));
        assert!(out.contains("Lee\u{258C}"));
        assert!(out.contains("PNK"));
        assert!(out.contains("(no residents)"));
        assert!(!out.contains("repeat for row"));
    }

    #[test]
    fn footer_editor_shows_repeat_state() {
        let tmp = TempDir::new().unwrap();
        let mut app = test_app(tmp.path());
        app.cursor.part = CellPart::Footer;
        app.open_editor(Instant::now());
        let out = render_to_string(TERM_W, TERM_H, |frame, area| {
            render_editor_modal(frame, &app, area)
        });
        assert!(out.contains("week 1 (from 2026-03-01)"));
        assert!(out.contains("repeat for row: off"));
        assert!(out.contains("YEL"));
    }

    #[test]
    fn nothing_without_editor() {
        let tmp = TempDir::new().unwrap();
        let app = test_app(tmp.path());
        let out = render_to_string(TERM_W, TERM_H, |frame, area| {
            render_editor_modal(frame, &app, area)
        });
        assert!(out.is_empty());
    }
}
