use chrono::{Datelike, NaiveDate, Weekday};
use serde::Serialize;

use crate::model::{Board, ColorTag, DaySchedule, Layers, MasterSchedule, ScheduleSlot, SlotId};
use crate::ops::calendar::{MonthWeek, YearMonth, month_weeks};
use crate::ops::check::WeekReport;
use crate::ops::resolve::{resolve_day_schedule, resolve_week_with_source};
use crate::util::markup::display_lines;
use crate::util::unicode::{center_in_width, fit_to_width};

/// Width of one day column in text output
const CELL_W: usize = 14;

const WEEKDAYS: [Weekday; 7] = [
    Weekday::Sun,
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
];

// ---------------------------------------------------------------------------
// JSON output structs
// ---------------------------------------------------------------------------

#[derive(Serialize)]
pub struct SlotJson {
    /// Content with tags removed, lines joined by `\n`
    pub text: String,
    pub markup: String,
    pub color: ColorTag,
}

impl From<&ScheduleSlot> for SlotJson {
    fn from(slot: &ScheduleSlot) -> Self {
        SlotJson {
            text: display_lines(&slot.text).join("\n"),
            markup: slot.text.clone(),
            color: slot.color,
        }
    }
}

#[derive(Serialize)]
pub struct DayJson {
    pub date: NaiveDate,
    pub slot1: SlotJson,
    pub slot2: SlotJson,
    pub slot3: SlotJson,
}

impl DayJson {
    pub fn new(date: NaiveDate, day: &DaySchedule) -> Self {
        DayJson {
            date,
            slot1: (&day.slot1).into(),
            slot2: (&day.slot2).into(),
            slot3: (&day.slot3).into(),
        }
    }
}

#[derive(Serialize)]
pub struct FooterJson {
    #[serde(flatten)]
    pub slot: SlotJson,
    /// Which layer supplied the footer
    pub source: &'static str,
}

#[derive(Serialize)]
pub struct WeekJson {
    /// Zero-based row within the month
    pub index: usize,
    pub sunday: NaiveDate,
    pub days: Vec<DayJson>,
    pub footer: FooterJson,
}

#[derive(Serialize)]
pub struct MonthJson {
    pub month: String,
    pub facility: String,
    pub updated: String,
    pub weeks: Vec<WeekJson>,
}

#[derive(Serialize)]
pub struct CheckJson<'a> {
    pub month: String,
    pub weeks: &'a [WeekReport],
}

#[derive(Serialize)]
pub struct MasterDayJson {
    pub weekday: String,
    pub slot1: SlotJson,
    pub slot2: SlotJson,
    pub slot3: SlotJson,
}

#[derive(Serialize)]
pub struct MasterJson {
    pub days: Vec<MasterDayJson>,
    pub footers: Vec<(u8, SlotJson)>,
    pub default_footer: Option<SlotJson>,
}

pub fn footer_json(layers: &Layers, week: &MonthWeek) -> FooterJson {
    let (slot, source) = resolve_week_with_source(layers, week.sunday, week.index);
    FooterJson {
        slot: slot.as_ref().into(),
        source: source.as_str(),
    }
}

pub fn month_json(board: &Board, month: YearMonth) -> MonthJson {
    let layers = &board.layers;
    let weeks = month_weeks(month)
        .iter()
        .map(|week| WeekJson {
            index: week.index,
            sunday: week.sunday,
            days: week
                .days
                .iter()
                .flatten()
                .filter_map(|d| month.date(*d))
                .map(|date| DayJson::new(date, &resolve_day_schedule(layers, date)))
                .collect(),
            footer: footer_json(layers, week),
        })
        .collect();
    MonthJson {
        month: month.to_string(),
        facility: board.facility_name.clone(),
        updated: board.update_label.clone(),
        weeks,
    }
}

pub fn master_json(master: &MasterSchedule) -> MasterJson {
    MasterJson {
        days: WEEKDAYS
            .iter()
            .map(|wd| {
                let day = master.day(*wd);
                MasterDayJson {
                    weekday: wd.to_string(),
                    slot1: (&day.slot1).into(),
                    slot2: (&day.slot2).into(),
                    slot3: (&day.slot3).into(),
                }
            })
            .collect(),
        footers: master
            .weekly_footers()
            .map(|(row, slot)| (row, slot.into()))
            .collect(),
        default_footer: master.global_footer().map(SlotJson::from),
    }
}

// ---------------------------------------------------------------------------
// Text formatting
// ---------------------------------------------------------------------------

/// One-line summary of a slot: lines joined with " / ", color tag suffix
pub fn slot_summary(slot: &ScheduleSlot) -> String {
    let lines = display_lines(&slot.text);
    if lines.is_empty() {
        format!("(empty) [{}]", slot.color)
    } else {
        format!("{} [{}]", lines.join(" / "), slot.color)
    }
}

fn slot_cell(slot: &ScheduleSlot) -> String {
    fit_to_width(&display_lines(&slot.text).join(", "), CELL_W)
}

/// The resolved month as a text grid: day numbers, three slot lines per week, and the
/// week footer underneath.
pub fn format_month_text(board: &Board, month: YearMonth) -> String {
    let layers = &board.layers;
    let mut out = String::new();
    out.push_str(&format!(
        "{}  {}  (updated {})\n",
        board.facility_name, month, board.update_label
    ));
    let header: Vec<String> = WEEKDAYS
        .iter()
        .map(|wd| center_in_width(&wd.to_string(), CELL_W))
        .collect();
    out.push_str(&header.join("|"));
    out.push('\n');
    let rule = "-".repeat(CELL_W * 7 + 6);

    for week in month_weeks(month) {
        out.push_str(&rule);
        out.push('\n');
        let days: Vec<Option<DaySchedule>> = week
            .days
            .iter()
            .map(|d| {
                d.and_then(|d| month.date(d))
                    .map(|date| resolve_day_schedule(layers, date))
            })
            .collect();

        let numbers: Vec<String> = week
            .days
            .iter()
            .map(|d| fit_to_width(&d.map(|d| d.to_string()).unwrap_or_default(), CELL_W))
            .collect();
        out.push_str(numbers.join("|").trim_end());
        out.push('\n');

        for slot in SlotId::ALL {
            let cells: Vec<String> = days
                .iter()
                .map(|day| match day {
                    Some(day) => slot_cell(day.get(slot)),
                    None => " ".repeat(CELL_W),
                })
                .collect();
            out.push_str(cells.join("|").trim_end());
            out.push('\n');
        }

        let (footer, _) = resolve_week_with_source(layers, week.sunday, week.index);
        out.push_str(&format!("  week {}: {}\n", week.index + 1, slot_summary(&footer)));
    }
    out
}

pub fn format_day_text(date: NaiveDate, day: &DaySchedule) -> String {
    let mut out = format!("{} ({})\n", date, date.weekday());
    for slot in SlotId::ALL {
        out.push_str(&format!(
            "  {:<6} {}\n",
            slot.label(),
            slot_summary(day.get(slot))
        ));
    }
    out
}

pub fn format_master_text(master: &MasterSchedule) -> String {
    let mut out = String::new();
    for wd in WEEKDAYS {
        out.push_str(&format!("{}\n", wd));
        for slot in SlotId::ALL {
            out.push_str(&format!(
                "  {:<6} {}\n",
                slot.label(),
                slot_summary(master.slot(wd, slot))
            ));
        }
    }
    let mut footers = master.weekly_footers().peekable();
    if footers.peek().is_some() {
        out.push_str("Week footers\n");
        for (row, slot) in footers {
            out.push_str(&format!("  week {}: {}\n", row + 1, slot_summary(slot)));
        }
    }
    if let Some(slot) = master.global_footer() {
        out.push_str(&format!("Default footer: {}\n", slot_summary(slot)));
    }
    out
}

pub fn format_check_text(month: YearMonth, reports: &[WeekReport]) -> String {
    if reports.is_empty() {
        return format!("{}: every resident meets the weekly minimum\n", month);
    }
    let mut out = String::new();
    for report in reports {
        out.push_str(&format!(
            "Week {} ({}/{}-{}/{})\n",
            report.week,
            month.month(),
            report.start,
            month.month(),
            report.end
        ));
        for m in &report.missing {
            out.push_str(&format!("  {}: {}\n", m.name, m.count));
        }
    }
    out
}
