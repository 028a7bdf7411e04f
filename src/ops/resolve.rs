use std::borrow::Cow;

use chrono::{Datelike, NaiveDate};

use crate::model::{ColorTag, DaySchedule, Layers, ScheduleSlot, SlotId};

/// Footer text shown when no layer defines one
pub const DEFAULT_FOOTER_TEXT: &str = "Hygiene check (  )";

pub fn default_footer() -> ScheduleSlot {
    ScheduleSlot::new(DEFAULT_FOOTER_TEXT, ColorTag::Yellow)
}

/// Which layer a resolved footer came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FooterSource {
    /// One-off exception for this specific week
    Week,
    /// Recurring default for this row position
    Row,
    /// The master's single global footer
    Global,
    BuiltIn,
}

impl FooterSource {
    pub fn as_str(self) -> &'static str {
        match self {
            FooterSource::Week => "week",
            FooterSource::Row => "row",
            FooterSource::Global => "global",
            FooterSource::BuiltIn => "built-in",
        }
    }
}

/// Effective content of one slot on one date: the override if present, else the master pattern
pub fn resolve_day(layers: &Layers, date: NaiveDate, slot: SlotId) -> &ScheduleSlot {
    layers
        .overrides
        .get(date, slot)
        .unwrap_or_else(|| layers.master_schedule.slot(date.weekday(), slot))
}

/// All three effective slots of a date
pub fn resolve_day_schedule(layers: &Layers, date: NaiveDate) -> DaySchedule {
    DaySchedule {
        slot1: resolve_day(layers, date, SlotId::Slot1).clone(),
        slot2: resolve_day(layers, date, SlotId::Slot2).clone(),
        slot3: resolve_day(layers, date, SlotId::Slot3).clone(),
    }
}

/// Effective footer of a week row.
///
/// `week_index` is the row position in the month being displayed, not a calendar week number.
pub fn resolve_week(layers: &Layers, sunday: NaiveDate, week_index: usize) -> Cow<'_, ScheduleSlot> {
    resolve_week_with_source(layers, sunday, week_index).0
}

pub fn resolve_week_with_source(
    layers: &Layers,
    sunday: NaiveDate,
    week_index: usize,
) -> (Cow<'_, ScheduleSlot>, FooterSource) {
    if let Some(slot) = layers.weekly_data.get(sunday) {
        return (Cow::Borrowed(slot), FooterSource::Week);
    }
    let master = &layers.master_schedule;
    if let Some(slot) = master.weekly_footer_at(week_index) {
        return (Cow::Borrowed(slot), FooterSource::Row);
    }
    if let Some(slot) = master.global_footer() {
        return (Cow::Borrowed(slot), FooterSource::Global);
    }
    (Cow::Owned(default_footer()), FooterSource::BuiltIn)
}
