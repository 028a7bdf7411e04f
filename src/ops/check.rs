use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::model::{Layers, ResidentList, SlotId};
use crate::ops::calendar::YearMonth;
use crate::ops::resolve::resolve_day;
use crate::util::markup::strip_tags;

/// Minimum bathing visits per resident per week unless configured otherwise
pub const DEFAULT_MIN_VISITS: usize = 2;

/// A resident scheduled fewer times than required in one week
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Shortfall {
    pub name: String,
    pub count: usize,
}

/// One week of the month with at least one shortfall
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WeekReport {
    /// 1-based week ordinal within the month
    pub week: usize,
    /// First and last day of month covered by this week
    pub start: u32,
    pub end: u32,
    /// Residents below the minimum, in resident-list order
    pub missing: Vec<Shortfall>,
}

/// Count scheduled visits per resident for every week of a month.
///
/// Weeks run from day 1 to the first Saturday, then Sunday through Saturday, the last one
/// clipped to the end of the month. A visit is any day whose upper or middle slot text
/// contains the resident's name. Only weeks with shortfalls are returned.
pub fn check_month(
    layers: &Layers,
    month: YearMonth,
    residents: &ResidentList,
    min_visits: usize,
) -> Vec<WeekReport> {
    let last = month.days_in_month();
    let mut reports = Vec::new();
    let mut start = 1;
    let mut week = 1;

    while start <= last {
        let Some(start_date) = month.date(start) else {
            break;
        };
        let end = (start + 6 - start_date.weekday().num_days_from_sunday()).min(last);

        let mut counts = vec![0usize; residents.len()];
        for day in start..=end {
            let Some(date) = month.date(day) else {
                continue;
            };
            let text = visit_text(layers, date);
            for (count, name) in counts.iter_mut().zip(residents.iter()) {
                if text.contains(name) {
                    *count += 1;
                }
            }
        }

        let missing: Vec<Shortfall> = residents
            .iter()
            .zip(counts)
            .filter(|(_, count)| *count < min_visits)
            .map(|(name, count)| Shortfall {
                name: name.to_string(),
                count,
            })
            .collect();
        if !missing.is_empty() {
            reports.push(WeekReport {
                week,
                start,
                end,
                missing,
            });
        }

        start = end + 1;
        week += 1;
    }
    reports
}

/// Plain text of the two bathing slots of a day; the lower slot is not a visit
fn visit_text(layers: &Layers, date: NaiveDate) -> String {
    let upper = &resolve_day(layers, date, SlotId::Slot1).text;
    let middle = &resolve_day(layers, date, SlotId::Slot2).text;
    strip_tags(&format!("{} {}", upper, middle))
}
