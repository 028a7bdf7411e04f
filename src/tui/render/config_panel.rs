use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::tui::app::{App, ConfigState};
use crate::tui::theme::Theme;
use crate::util::unicode::fit_to_width;

use super::helpers::{centered_rect, one_line, with_cursor};

const LABEL_W: usize = 18;

/// Master schedule panel: field list on the left, residents on the right
pub fn render_config_panel(frame: &mut Frame, app: &App, area: Rect) {
    let Some(config) = &app.config else {
        return;
    };
    let popup = centered_rect(90, 90, area);
    frame.render_widget(Clear, popup);

    let bg = app.theme.background;
    let block = Block::default()
        .title(" Master Schedule ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.highlight).bg(bg))
        .style(Style::default().bg(bg));
    let inner = block.inner(popup);
    frame.render_widget(block, popup);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .split(inner);
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(20), Constraint::Length(22)])
        .split(rows[0]);

    render_fields(frame, app, config, cols[0]);
    render_residents(frame, app, config, cols[1]);

    let hint = " Enter edit  c color  a append  n/d resident  s save  Esc discard";
    frame.render_widget(
        Paragraph::new(Span::styled(hint, Style::default().fg(app.theme.dim).bg(bg))),
        rows[1],
    );
}

fn render_fields(frame: &mut Frame, app: &App, config: &ConfigState, area: Rect) {
    let bg = app.theme.background;
    let height = usize::from(area.height).max(1);
    let first = first_visible(config.selected, height);
    let value_w = usize::from(area.width).saturating_sub(LABEL_W + 6);

    let lines: Vec<Line> = config
        .fields
        .iter()
        .enumerate()
        .skip(first)
        .take(height)
        .map(|(i, field)| {
            let selected = i == config.selected;
            let label_style = if selected {
                Style::default()
                    .fg(app.theme.highlight)
                    .bg(bg)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(app.theme.text).bg(bg)
            };
            let mut spans = vec![Span::styled(
                format!(
                    "{}{}",
                    if selected { "\u{25B8}" } else { " " },
                    fit_to_width(&field.to_string(), LABEL_W)
                ),
                label_style,
            )];
            match config.session.field(*field) {
                Some(slot) => {
                    spans.push(Span::styled(
                        format!(" {} ", Theme::color_label(slot.color)),
                        Style::default()
                            .fg(app.theme.cell_text)
                            .bg(app.theme.slot_bg(slot.color)),
                    ));
                    let text = match (&config.editing, selected) {
                        (Some(buffer), true) => {
                            with_cursor(buffer, buffer.len()).replace('\n', " / ")
                        }
                        _ => one_line(slot, " / "),
                    };
                    spans.push(Span::styled(
                        fit_to_width(&text, value_w),
                        Style::default().fg(app.theme.text_bright).bg(bg),
                    ));
                }
                None => spans.push(Span::styled(
                    " (not set)",
                    Style::default().fg(app.theme.dim).bg(bg),
                )),
            }
            Line::from(spans)
        })
        .collect();

    frame.render_widget(Paragraph::new(lines).style(Style::default().bg(bg)), area);
}

fn render_residents(frame: &mut Frame, app: &App, config: &ConfigState, area: Rect) {
    let bg = app.theme.background;
    let residents = config.session.residents();
    let header = Style::default()
        .fg(app.theme.text_bright)
        .bg(bg)
        .add_modifier(Modifier::BOLD);

    let mut lines = vec![Line::from(Span::styled(" Residents", header))];
    if residents.is_empty() {
        lines.push(Line::from(Span::styled(
            "  (none)",
            Style::default().fg(app.theme.dim).bg(bg),
        )));
    }
    for (i, name) in residents.iter().enumerate() {
        let style = if i == config.picked % residents.len() {
            Style::default()
                .fg(app.theme.highlight)
                .bg(bg)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(app.theme.text).bg(bg)
        };
        lines.push(Line::from(Span::styled(format!("  {}", name), style)));
    }
    if let Some(name) = &config.new_resident {
        lines.push(Line::from(Span::styled(
            format!("  + {}", with_cursor(name, name.len())),
            Style::default().fg(app.theme.yellow).bg(bg),
        )));
    }

    frame.render_widget(Paragraph::new(lines).style(Style::default().bg(bg)), area);
}

/// First list row shown so that `selected` stays on screen
fn first_visible(selected: usize, height: usize) -> usize {
    (selected + 1).saturating_sub(height)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ColorTag, SlotId};
    use crate::ops::config_panel::ConfigField;
    use crate::tui::app::test_app;
    use crate::tui::render::test_helpers::*;
    use chrono::Weekday;
    use tempfile::TempDir;

    #[test]
    fn lists_fields_and_residents() {
        let tmp = TempDir::new().unwrap();
        let mut app = test_app(tmp.path());
        app.open_config();
        let config = app.config.as_mut().unwrap();
        config.session.add_resident("Smith");
        config.session.edit_text(ConfigField::DefaultFooter, "Nails");
        config.session.set_color(ConfigField::DefaultFooter, ColorTag::Gray);
        config.new_resident = Some("Le".into());

        let out = render_to_string(TERM_W, TERM_H, |frame, area| {
            render_config_panel(frame, &app, area)
        });
        assert!(out.contains("Master Schedule"));
        assert!(out.contains("week 1 footer"));
        assert!(out.contains("(not set)"));
        assert!(out.contains("default footer"));
        assert!(out.contains("GRY Nails"));
        assert!(out.contains("Smith"));
        assert!(out.contains("+ Le\u{258C}"));
    }

    #[test]
    fn list_scrolls_to_selection() {
        assert_eq!(first_visible(3, 10), 0);
        assert_eq!(first_visible(33, 10), 24);
    }

    #[test]
    fn selected_weekday_slot_is_drawn() {
        let tmp = TempDir::new().unwrap();
        let mut app = test_app(tmp.path());
        app.open_config();
        let config = app.config.as_mut().unwrap();
        config.selected = config.fields.len() - 1;
        assert_eq!(
            config.field(),
            ConfigField::Slot {
                weekday: Weekday::Sat,
                slot: SlotId::Slot3
            }
        );
        let out = render_to_string(TERM_W, TERM_H, |frame, area| {
            render_config_panel(frame, &app, area)
        });
        assert!(out.contains("\u{25B8}Sat lower"));
        assert!(!out.contains("week 1 footer"));
    }
}
