use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::tui::app::{App, Mode};

use super::helpers::centered_rect;

const CALENDAR_KEYS: &[(&str, &str)] = &[
    (" \u{2190}\u{2193}\u{2191}\u{2192}/hjkl", "Move between slots and days"),
    (" [ ]", "Previous / next month"),
    (" t", "Jump to today"),
    (" Enter/e", "Edit slot or footer"),
    (" u / U", "Undo / redo"),
    (" m", "Master schedule"),
    (" c", "Weekly check"),
    (" x", "Export backup"),
    (" F / L", "Edit facility name / updated label"),
    (" q", "Quit"),
];

const EDITOR_KEYS: &[(&str, &str)] = &[
    (" Ctrl+S", "Save and close"),
    (" Esc", "Close without saving"),
    (" Ctrl+B", "Bold"),
    (" Ctrl+T", "Text color"),
    (" Ctrl+K", "Slot color"),
    (" Ctrl+W", "Repeat for the row"),
    (" Tab/Ctrl+E", "Pick / insert resident"),
    (" Ctrl+Z/Y", "Undo / redo"),
];

const CONFIG_KEYS: &[(&str, &str)] = &[
    (" \u{2191}\u{2193}", "Select field"),
    (" Enter/e", "Edit field text"),
    (" c", "Cycle field color"),
    (" Tab / a", "Pick / append resident"),
    (" n / d", "Add / delete resident"),
    (" u / U", "Undo / redo"),
    (" s", "Save"),
    (" Esc", "Close without saving"),
];

const CHECK_KEYS: &[(&str, &str)] = &[(" Esc/Enter", "Close the report")];

const LABEL_KEYS: &[(&str, &str)] = &[(" Enter", "Save label"), (" Esc", "Cancel")];

/// Render the help overlay (toggled with ?)
pub fn render_help_overlay(frame: &mut Frame, app: &App, area: Rect) {
    let overlay_area = centered_rect(60, 80, area);
    frame.render_widget(Clear, overlay_area);

    let bg = app.theme.background;
    let key_style = Style::default()
        .fg(app.theme.highlight)
        .bg(bg)
        .add_modifier(Modifier::BOLD);
    let desc_style = Style::default().fg(app.theme.text).bg(bg);
    let header_style = Style::default()
        .fg(app.theme.text_bright)
        .bg(bg)
        .add_modifier(Modifier::BOLD);

    let (title, keys) = match app.mode {
        Mode::Navigate => (" Calendar", CALENDAR_KEYS),
        Mode::Edit => (" Editor", EDITOR_KEYS),
        Mode::Config => (" Master Schedule", CONFIG_KEYS),
        Mode::Check => (" Weekly Check", CHECK_KEYS),
        Mode::Label => (" Label", LABEL_KEYS),
    };

    let mut lines: Vec<Line> = vec![
        Line::from(Span::styled(" Key Bindings", header_style)),
        Line::from(""),
        Line::from(Span::styled(title, header_style)),
    ];
    for (key, desc) in keys {
        lines.push(Line::from(vec![
            Span::styled(format!("{:<16}", key), key_style),
            Span::styled(*desc, desc_style),
        ]));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(" ?/Esc  close help", desc_style)));

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.dim).bg(bg))
        .style(Style::default().bg(bg));
    frame.render_widget(
        Paragraph::new(lines).block(block).style(Style::default().bg(bg)),
        overlay_area,
    );
}
