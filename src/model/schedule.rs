use std::collections::BTreeMap;

use chrono::Weekday;
use serde::{Deserialize, Serialize};

use super::slot::{ColorTag, ScheduleSlot, SlotId};

/// The three fixed rows of one weekday pattern (or one date)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DaySchedule {
    pub slot1: ScheduleSlot,
    pub slot2: ScheduleSlot,
    pub slot3: ScheduleSlot,
}

impl Default for DaySchedule {
    fn default() -> Self {
        DaySchedule {
            slot1: ScheduleSlot::blank(ColorTag::Pink),
            slot2: ScheduleSlot::blank(ColorTag::Blue),
            slot3: ScheduleSlot::blank(ColorTag::White),
        }
    }
}

impl DaySchedule {
    pub fn get(&self, slot: SlotId) -> &ScheduleSlot {
        match slot {
            SlotId::Slot1 => &self.slot1,
            SlotId::Slot2 => &self.slot2,
            SlotId::Slot3 => &self.slot3,
        }
    }

    pub fn get_mut(&mut self, slot: SlotId) -> &mut ScheduleSlot {
        match slot {
            SlotId::Slot1 => &mut self.slot1,
            SlotId::Slot2 => &mut self.slot2,
            SlotId::Slot3 => &mut self.slot3,
        }
    }

    pub fn set(&mut self, slot: SlotId, value: ScheduleSlot) {
        *self.get_mut(slot) = value;
    }
}

/// Any subset of a day's slots, used for date-specific overrides
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PartialDaySchedule {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slot1: Option<ScheduleSlot>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slot2: Option<ScheduleSlot>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slot3: Option<ScheduleSlot>,
}

impl PartialDaySchedule {
    pub fn get(&self, slot: SlotId) -> Option<&ScheduleSlot> {
        match slot {
            SlotId::Slot1 => self.slot1.as_ref(),
            SlotId::Slot2 => self.slot2.as_ref(),
            SlotId::Slot3 => self.slot3.as_ref(),
        }
    }

    fn entry(&mut self, slot: SlotId) -> &mut Option<ScheduleSlot> {
        match slot {
            SlotId::Slot1 => &mut self.slot1,
            SlotId::Slot2 => &mut self.slot2,
            SlotId::Slot3 => &mut self.slot3,
        }
    }

    /// Replace one slot, leaving the others untouched
    pub fn set(&mut self, slot: SlotId, value: ScheduleSlot) {
        *self.entry(slot) = Some(value);
    }

    pub fn clear(&mut self, slot: SlotId) -> Option<ScheduleSlot> {
        self.entry(slot).take()
    }

    pub fn is_empty(&self) -> bool {
        self.slot1.is_none() && self.slot2.is_none() && self.slot3.is_none()
    }
}

/// Number of weekday patterns in a master schedule
pub const WEEKDAY_COUNT: usize = 7;

/// Index of a weekday in the master pattern (0 = Sunday … 6 = Saturday)
pub fn weekday_code(weekday: Weekday) -> usize {
    weekday.num_days_from_sunday() as usize
}

/// Parse a weekday code (0 = Sunday) or an English day name
pub fn parse_weekday(s: &str) -> Option<Weekday> {
    let s = s.trim();
    if let Ok(code) = s.parse::<u8>() {
        return match code {
            0 => Some(Weekday::Sun),
            1 => Some(Weekday::Mon),
            2 => Some(Weekday::Tue),
            3 => Some(Weekday::Wed),
            4 => Some(Weekday::Thu),
            5 => Some(Weekday::Fri),
            6 => Some(Weekday::Sat),
            _ => None,
        };
    }
    s.parse::<Weekday>().ok()
}

/// The recurring, date-independent template.
///
/// Always total: seven weekday patterns of three slots each. A persisted document
/// missing any weekday fails to deserialize rather than producing a hole.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "MasterScheduleRepr", into = "MasterScheduleRepr")]
pub struct MasterSchedule {
    days: [DaySchedule; WEEKDAY_COUNT],
    /// Per-row footer defaults, keyed by zero-based row within a month grid
    weekly_footers: BTreeMap<u8, ScheduleSlot>,
    /// Footer used when neither a week exception nor a row default exists
    weekly_footer: Option<ScheduleSlot>,
}

impl MasterSchedule {
    pub fn day(&self, weekday: Weekday) -> &DaySchedule {
        &self.days[weekday_code(weekday)]
    }

    pub fn day_mut(&mut self, weekday: Weekday) -> &mut DaySchedule {
        &mut self.days[weekday_code(weekday)]
    }

    pub fn slot(&self, weekday: Weekday, slot: SlotId) -> &ScheduleSlot {
        self.day(weekday).get(slot)
    }

    pub fn slot_mut(&mut self, weekday: Weekday, slot: SlotId) -> &mut ScheduleSlot {
        self.day_mut(weekday).get_mut(slot)
    }

    pub fn set_slot(&mut self, weekday: Weekday, slot: SlotId, value: ScheduleSlot) {
        self.day_mut(weekday).set(slot, value);
    }

    pub fn weekly_footer_at(&self, row: usize) -> Option<&ScheduleSlot> {
        let key = u8::try_from(row).ok()?;
        self.weekly_footers.get(&key)
    }

    /// Mutable access to a row footer, creating an empty yellow one if absent
    pub fn weekly_footer_at_mut(&mut self, row: u8) -> &mut ScheduleSlot {
        self.weekly_footers
            .entry(row)
            .or_insert_with(|| ScheduleSlot::blank(ColorTag::Yellow))
    }

    pub fn set_weekly_footer_at(&mut self, row: u8, value: ScheduleSlot) {
        self.weekly_footers.insert(row, value);
    }

    pub fn clear_weekly_footer_at(&mut self, row: u8) -> Option<ScheduleSlot> {
        self.weekly_footers.remove(&row)
    }

    pub fn weekly_footers(&self) -> impl Iterator<Item = (u8, &ScheduleSlot)> {
        self.weekly_footers.iter().map(|(k, v)| (*k, v))
    }

    pub fn global_footer(&self) -> Option<&ScheduleSlot> {
        self.weekly_footer.as_ref()
    }

    /// Mutable access to the global footer, creating an empty yellow one if absent
    pub fn global_footer_mut(&mut self) -> &mut ScheduleSlot {
        self.weekly_footer
            .get_or_insert_with(|| ScheduleSlot::blank(ColorTag::Yellow))
    }

    pub fn set_global_footer(&mut self, value: Option<ScheduleSlot>) {
        self.weekly_footer = value;
    }
}

/// Wire shape of the master schedule: weekday codes as keys, footers alongside.
#[derive(Serialize, Deserialize)]
struct MasterScheduleRepr {
    #[serde(rename = "0")]
    sunday: DaySchedule,
    #[serde(rename = "1")]
    monday: DaySchedule,
    #[serde(rename = "2")]
    tuesday: DaySchedule,
    #[serde(rename = "3")]
    wednesday: DaySchedule,
    #[serde(rename = "4")]
    thursday: DaySchedule,
    #[serde(rename = "5")]
    friday: DaySchedule,
    #[serde(rename = "6")]
    saturday: DaySchedule,
    #[serde(
        rename = "weeklyFooters",
        default,
        skip_serializing_if = "BTreeMap::is_empty"
    )]
    weekly_footers: BTreeMap<u8, ScheduleSlot>,
    #[serde(
        rename = "weeklyFooter",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    weekly_footer: Option<ScheduleSlot>,
}

impl From<MasterScheduleRepr> for MasterSchedule {
    fn from(r: MasterScheduleRepr) -> Self {
        MasterSchedule {
            days: [
                r.sunday,
                r.monday,
                r.tuesday,
                r.wednesday,
                r.thursday,
                r.friday,
                r.saturday,
            ],
            weekly_footers: r.weekly_footers,
            weekly_footer: r.weekly_footer,
        }
    }
}

impl From<MasterSchedule> for MasterScheduleRepr {
    fn from(m: MasterSchedule) -> Self {
        let [sunday, monday, tuesday, wednesday, thursday, friday, saturday] = m.days;
        MasterScheduleRepr {
            sunday,
            monday,
            tuesday,
            wednesday,
            thursday,
            friday,
            saturday,
            weekly_footers: m.weekly_footers,
            weekly_footer: m.weekly_footer,
        }
    }
}
