use std::fmt;

use chrono::{Datelike, Days, Months, NaiveDate};

/// Most rows a month grid can have
pub const MAX_GRID_ROWS: u8 = 6;

/// One calendar row: day-of-month numbers, Sunday first, blanks as `None`
pub type WeekRow = [Option<u32>; 7];

/// A calendar month, always valid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct YearMonth {
    first: NaiveDate,
}

impl YearMonth {
    pub fn new(year: i32, month: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, 1).map(|first| YearMonth { first })
    }

    /// The month containing `date`
    pub fn of(date: NaiveDate) -> Self {
        YearMonth {
            first: date - Days::new(u64::from(date.day0())),
        }
    }

    /// Parse `YYYY-MM`
    pub fn parse(s: &str) -> Option<Self> {
        let (y, m) = s.trim().split_once('-')?;
        YearMonth::new(y.parse().ok()?, m.parse().ok()?)
    }

    pub fn year(&self) -> i32 {
        self.first.year()
    }

    pub fn month(&self) -> u32 {
        self.first.month()
    }

    pub fn first_day(&self) -> NaiveDate {
        self.first
    }

    pub fn days_in_month(&self) -> u32 {
        match self.month() {
            4 | 6 | 9 | 11 => 30,
            2 if self.first.leap_year() => 29,
            2 => 28,
            _ => 31,
        }
    }

    pub fn last_day(&self) -> NaiveDate {
        self.first + Days::new(u64::from(self.days_in_month() - 1))
    }

    pub fn date(&self, day: u32) -> Option<NaiveDate> {
        self.first.with_day(day)
    }

    /// Following month (saturates at the end of the supported range)
    pub fn next(self) -> Self {
        self.first
            .checked_add_months(Months::new(1))
            .map_or(self, |first| YearMonth { first })
    }

    pub fn prev(self) -> Self {
        self.first
            .checked_sub_months(Months::new(1))
            .map_or(self, |first| YearMonth { first })
    }

    /// Blank cells before day 1 in a Sunday-first grid
    fn leading_blanks(&self) -> u32 {
        self.first.weekday().num_days_from_sunday()
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year(), self.month())
    }
}

/// Sunday-first grid rows for a month, padded with blanks front and back
pub fn month_grid(ym: YearMonth) -> Vec<WeekRow> {
    let mut rows = Vec::new();
    let mut row: WeekRow = [None; 7];
    let mut col = ym.leading_blanks() as usize;
    for day in 1..=ym.days_in_month() {
        row[col] = Some(day);
        col += 1;
        if col == 7 {
            rows.push(row);
            row = [None; 7];
            col = 0;
        }
    }
    if col > 0 {
        rows.push(row);
    }
    rows
}

/// Zero-based grid row of a day of the month
pub fn row_of_day(ym: YearMonth, day: u32) -> usize {
    ((ym.leading_blanks() + day.saturating_sub(1)) / 7) as usize
}

/// The Sunday that starts grid row `row`; may fall in the previous month for row 0
pub fn row_sunday(ym: YearMonth, row: usize) -> NaiveDate {
    let grid_start = ym.first - Days::new(u64::from(ym.leading_blanks()));
    grid_start + Days::new(7 * row as u64)
}

/// A rendered week row with the keys needed to resolve its footer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthWeek {
    /// Row position within this month's grid (the footer week index)
    pub index: usize,
    /// Sunday that keys the week's one-off footer exception
    pub sunday: NaiveDate,
    pub days: WeekRow,
}

impl MonthWeek {
    /// First and last day of the month shown in this row
    pub fn day_range(&self) -> (u32, u32) {
        let mut present = self.days.iter().flatten();
        let first = present.next().copied().unwrap_or(0);
        let last = present.last().copied().unwrap_or(first);
        (first, last)
    }
}

pub fn month_weeks(ym: YearMonth) -> Vec<MonthWeek> {
    month_grid(ym)
        .into_iter()
        .enumerate()
        .map(|(index, days)| MonthWeek {
            index,
            sunday: row_sunday(ym, index),
            days,
        })
        .collect()
}
