use std::fmt;

use chrono::NaiveDate;

use crate::model::{ColorTag, Layers, ScheduleSlot, SlotId};
use crate::ops::resolve::{resolve_day, resolve_week};
use crate::util::markup::normalize_markup;

/// What an edit writes to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditTarget {
    /// One slot of one calendar date
    Day { date: NaiveDate, slot: SlotId },
    /// The footer of one week row of the displayed month
    Week { sunday: NaiveDate, week_index: usize },
}

impl EditTarget {
    /// The content currently shown for this target
    pub fn resolve(&self, layers: &Layers) -> ScheduleSlot {
        match *self {
            EditTarget::Day { date, slot } => resolve_day(layers, date, slot).clone(),
            EditTarget::Week { sunday, week_index } => {
                resolve_week(layers, sunday, week_index).into_owned()
            }
        }
    }

    pub fn is_week(&self) -> bool {
        matches!(self, EditTarget::Week { .. })
    }
}

impl fmt::Display for EditTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EditTarget::Day { date, slot } => write!(f, "{} {}", date, slot.label()),
            EditTarget::Week { sunday, week_index } => {
                write!(f, "week {} (from {})", week_index + 1, sunday)
            }
        }
    }
}

/// A confirmed edit ready to be applied
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edit {
    pub target: EditTarget,
    /// Raw editor markup; normalized when applied
    pub content: String,
    pub color: ColorTag,
    /// For week targets: also make this the recurring default for the row position
    pub propagate: bool,
}

/// Which layers an edit touched
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Touched {
    pub overrides: bool,
    pub weekly_data: bool,
    pub master_schedule: bool,
}

/// Apply an edit to a copy of the layers.
///
/// Day targets replace a single override slot. Week targets write a one-off exception
/// for that week; with `propagate` they also set the master's footer for the row
/// position, so every month's row at that index picks it up.
pub fn apply_edit(layers: &Layers, edit: &Edit) -> (Layers, Touched) {
    let mut next = layers.clone();
    let value = ScheduleSlot::new(normalize_markup(&edit.content), edit.color);
    let mut touched = Touched::default();

    match edit.target {
        EditTarget::Day { date, slot } => {
            next.overrides.set(date, slot, value);
            touched.overrides = true;
        }
        EditTarget::Week { sunday, week_index } => {
            if edit.propagate
                && let Ok(row) = u8::try_from(week_index)
            {
                next.master_schedule.set_weekly_footer_at(row, value.clone());
                touched.master_schedule = true;
            }
            next.weekly_data.set(sunday, value);
            touched.weekly_data = true;
        }
    }

    (next, touched)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ops::calendar::{YearMonth, row_sunday};
    use crate::ops::resolve::resolve_week;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn day_edit_replaces_only_that_slot() {
        let mut layers = Layers::default();
        let d = date("2026-03-04");
        layers
            .overrides
            .set(d, SlotId::Slot1, ScheduleSlot::new("keep", ColorTag::Pink));
        let edit = Edit {
            target: EditTarget::Day {
                date: d,
                slot: SlotId::Slot2,
            },
            content: "<div>Smith</div><div>Lee</div>".into(),
            color: ColorTag::Blue,
            propagate: false,
        };
        let (next, touched) = apply_edit(&layers, &edit);
        assert_eq!(next.overrides.get(d, SlotId::Slot1).unwrap().text, "keep");
        assert_eq!(
            next.overrides.get(d, SlotId::Slot2).unwrap(),
            &ScheduleSlot::new("Smith<br>Lee", ColorTag::Blue)
        );
        assert!(touched.overrides && !touched.weekly_data && !touched.master_schedule);
        // input untouched
        assert!(layers.overrides.get(d, SlotId::Slot2).is_none());
    }

    #[test]
    fn week_edit_without_propagate_is_one_off() {
        let layers = Layers::default();
        let sunday = date("2026-03-15");
        let edit = Edit {
            target: EditTarget::Week {
                sunday,
                week_index: 2,
            },
            content: "Nails".into(),
            color: ColorTag::Gray,
            propagate: false,
        };
        let (next, touched) = apply_edit(&layers, &edit);
        assert_eq!(next.weekly_data.get(sunday).unwrap().text, "Nails");
        assert!(next.master_schedule.weekly_footer_at(2).is_none());
        assert!(!touched.master_schedule);
    }

    #[test]
    fn propagate_updates_row_default_for_other_months() {
        let march = YearMonth::new(2026, 3).unwrap();
        let april = YearMonth::new(2026, 4).unwrap();
        let march_row2 = row_sunday(march, 2);
        assert_eq!(march_row2, date("2026-03-15"));

        let edit = Edit {
            target: EditTarget::Week {
                sunday: march_row2,
                week_index: 2,
            },
            content: "Towels".into(),
            color: ColorTag::Pink,
            propagate: true,
        };
        let (mut next, touched) = apply_edit(&Layers::default(), &edit);
        assert!(touched.master_schedule && touched.weekly_data);
        assert_eq!(next.master_schedule.weekly_footer_at(2).unwrap().text, "Towels");
        assert_eq!(next.weekly_data.get(march_row2).unwrap().text, "Towels");

        let april_row2 = row_sunday(april, 2);
        assert_eq!(resolve_week(&next, april_row2, 2).text, "Towels");

        // April's own exception still wins
        next.weekly_data
            .set(april_row2, ScheduleSlot::new("April only", ColorTag::Blue));
        assert_eq!(resolve_week(&next, april_row2, 2).text, "April only");
    }

    #[test]
    fn target_resolves_current_content() {
        let layers = Layers::default();
        let t = EditTarget::Week {
            sunday: date("2026-03-01"),
            week_index: 0,
        };
        assert_eq!(t.resolve(&layers).color, ColorTag::Yellow);
        assert!(t.is_week());
    }
}
