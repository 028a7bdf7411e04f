use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::tui::app::App;

use super::helpers::centered_rect;

/// Weekly compliance report for the displayed month
pub fn render_check_overlay(frame: &mut Frame, app: &App, area: Rect) {
    let popup = centered_rect(60, 70, area);
    frame.render_widget(Clear, popup);

    let bg = app.theme.background;
    let month = app.month.month();
    let minimum = app.workspace.settings().check.min_visits_per_week;
    let mut lines: Vec<Line> = Vec::new();

    if app.reports.is_empty() {
        lines.push(Line::from(Span::styled(
            " Every resident meets the weekly minimum.",
            Style::default().fg(app.theme.green).bg(bg),
        )));
    }
    for report in &app.reports {
        lines.push(Line::from(Span::styled(
            format!(
                " Week {} ({}/{}-{}/{})",
                report.week, month, report.start, month, report.end
            ),
            Style::default()
                .fg(app.theme.text_bright)
                .bg(bg)
                .add_modifier(Modifier::BOLD),
        )));
        for shortfall in &report.missing {
            lines.push(Line::from(vec![
                Span::styled(
                    format!("   {}", shortfall.name),
                    Style::default().fg(app.theme.text).bg(bg),
                ),
                Span::styled(
                    format!("  {} of {}", shortfall.count, minimum),
                    Style::default().fg(app.theme.red).bg(bg),
                ),
            ]));
        }
    }

    let block = Block::default()
        .title(format!(" Weekly check {} ", app.month))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.dim).bg(bg))
        .style(Style::default().bg(bg));
    frame.render_widget(
        Paragraph::new(lines).block(block).style(Style::default().bg(bg)),
        popup,
    );
}
