use chrono::{Datelike, Weekday};
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::model::{ScheduleSlot, SlotId};
use crate::ops::calendar::MonthWeek;
use crate::ops::resolve::{resolve_day, resolve_week};
use crate::tui::app::{App, CellPart, Mode};
use crate::util::unicode::{center_in_width, fit_to_width};

use super::helpers::one_line;

const WEEKDAYS: [Weekday; 7] = [
    Weekday::Sun,
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
];

/// Screen lines per week: day numbers, three slots, footer
const WEEK_LINES: usize = 5;

/// Width of one day column for an area `width` cells wide (one-cell gaps between columns)
pub fn cell_width(width: u16) -> usize {
    (usize::from(width).saturating_sub(6) / 7).max(3)
}

/// Render the month grid
pub fn render_calendar(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let cell_w = cell_width(area.width);
    let row_w = cell_w * 7 + 6;
    let weeks = app.weeks();
    let layers = app.workspace.layers();
    let show_cursor = app.mode == Mode::Navigate;
    let gap = || Span::styled(" ", Style::default().bg(bg));

    let mut lines: Vec<Line> = Vec::new();

    // Weekday header
    let header_style = Style::default()
        .fg(app.theme.text_bright)
        .bg(bg)
        .add_modifier(Modifier::BOLD);
    let mut header = Vec::new();
    for (i, wd) in WEEKDAYS.iter().enumerate() {
        if i > 0 {
            header.push(gap());
        }
        header.push(Span::styled(
            center_in_width(&wd.to_string(), cell_w),
            header_style,
        ));
    }
    lines.push(Line::from(header));

    // Keep the cursor's week on screen
    let visible = (usize::from(area.height).saturating_sub(1) / WEEK_LINES).max(1);
    let first = (app.cursor.row + 1).saturating_sub(visible);

    for week in weeks.iter().skip(first).take(visible) {
        let dates: Vec<_> = week
            .days
            .iter()
            .map(|d| d.and_then(|d| app.month.date(d)))
            .collect();

        // Day numbers
        let mut spans = Vec::new();
        for (col, date) in dates.iter().enumerate() {
            if col > 0 {
                spans.push(gap());
            }
            let (text, style) = match date {
                Some(date) if *date == app.today => (
                    format!("{} today", date.day()),
                    Style::default()
                        .fg(app.theme.highlight)
                        .bg(bg)
                        .add_modifier(Modifier::BOLD),
                ),
                Some(date) => (
                    date.day().to_string(),
                    Style::default().fg(app.theme.text).bg(bg),
                ),
                None => (String::new(), Style::default().bg(bg)),
            };
            spans.push(Span::styled(fit_to_width(&text, cell_w), style));
        }
        lines.push(Line::from(spans));

        // Slots
        for slot_id in SlotId::ALL {
            let mut spans = Vec::new();
            for (col, date) in dates.iter().enumerate() {
                if col > 0 {
                    spans.push(gap());
                }
                let Some(date) = date else {
                    spans.push(Span::styled(" ".repeat(cell_w), Style::default().bg(bg)));
                    continue;
                };
                let slot = resolve_day(layers, *date, slot_id);
                let selected = show_cursor
                    && app.cursor.row == week.index
                    && app.cursor.col == col
                    && app.cursor.part == CellPart::Slot(slot_id);
                spans.push(slot_span(app, slot, cell_w, selected));
            }
            lines.push(Line::from(spans));
        }

        // Footer
        let footer = resolve_week(layers, week.sunday, week.index);
        let selected =
            show_cursor && app.cursor.row == week.index && app.cursor.part == CellPart::Footer;
        lines.push(Line::from(footer_span(app, week, &footer, row_w, selected)));
    }

    frame.render_widget(Paragraph::new(lines).style(Style::default().bg(bg)), area);
}

fn cell_style(app: &App, slot: &ScheduleSlot, selected: bool) -> Style {
    let style = Style::default()
        .fg(app.theme.cell_text)
        .bg(app.theme.slot_bg(slot.color));
    if selected {
        style
            .bg(app.theme.selection_bg)
            .fg(app.theme.text_bright)
            .add_modifier(Modifier::BOLD)
    } else {
        style
    }
}

fn slot_span(app: &App, slot: &ScheduleSlot, width: usize, selected: bool) -> Span<'static> {
    Span::styled(
        fit_to_width(&one_line(slot, ", "), width),
        cell_style(app, slot, selected),
    )
}

fn footer_span(
    app: &App,
    week: &MonthWeek,
    footer: &ScheduleSlot,
    width: usize,
    selected: bool,
) -> Span<'static> {
    let text = format!("Week {}: {}", week.index + 1, one_line(footer, " / "));
    Span::styled(fit_to_width(&text, width), cell_style(app, footer, selected))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ColorTag;
    use crate::ops::apply::{Edit, EditTarget};
    use crate::tui::app::{GridCursor, test_app};
    use crate::tui::render::test_helpers::*;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    #[test]
    fn column_width_fits_terminal() {
        assert_eq!(cell_width(80), 10);
        assert_eq!(cell_width(10), 3);
    }

    #[test]
    fn grid_shows_resolved_slots_and_footer() {
        let tmp = TempDir::new().unwrap();
        let mut app = test_app(tmp.path());
        app.workspace
            .apply_edit(&Edit {
                target: EditTarget::Day {
                    date: NaiveDate::from_ymd_opt(2026, 3, 2).unwrap(),
                    slot: SlotId::Slot1,
                },
                content: "Smith<br>Lee".into(),
                color: ColorTag::Pink,
                propagate: false,
            })
            .unwrap();
        let out = render_to_string(TERM_W, TERM_H, |frame, area| {
            render_calendar(frame, &app, area)
        });
        let lines: Vec<&str> = out.lines().collect();
        assert!(lines[0].starts_with("   Sun    "));
        assert!(lines[1].starts_with("1          2"));
        assert!(lines[2].contains("Smith, Lee"));
        assert!(lines[5].starts_with("Week 1: Hygiene check (  )"));
    }

    #[test]
    fn today_is_marked() {
        let tmp = TempDir::new().unwrap();
        let app = test_app(tmp.path());
        let out = render_to_string(TERM_W, TERM_H, |frame, area| {
            render_calendar(frame, &app, area)
        });
        assert!(out.contains("9 today"));
    }

    #[test]
    fn scrolls_to_cursor_week() {
        let tmp = TempDir::new().unwrap();
        let mut app = test_app(tmp.path());
        app.cursor = GridCursor {
            row: 4,
            col: 0,
            part: CellPart::Footer,
        };
        // Room for two weeks only
        let out = render_to_string(TERM_W, 11, |frame, area| render_calendar(frame, &app, area));
        assert!(out.contains("Week 5"));
        assert!(out.contains("Week 4"));
        assert!(!out.contains("Week 3"));
    }
}
