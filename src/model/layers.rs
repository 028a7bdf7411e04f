use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::schedule::{MasterSchedule, PartialDaySchedule};
use super::slot::{ScheduleSlot, SlotId};

/// Date-specific exceptions to the master pattern, keyed by ISO date.
///
/// Never pruned automatically.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MonthlyOverrides(BTreeMap<NaiveDate, PartialDaySchedule>);

impl MonthlyOverrides {
    pub fn get(&self, date: NaiveDate, slot: SlotId) -> Option<&ScheduleSlot> {
        self.0.get(&date).and_then(|day| day.get(slot))
    }

    pub fn day(&self, date: NaiveDate) -> Option<&PartialDaySchedule> {
        self.0.get(&date)
    }

    /// Replace one slot of one date; other slots of that date are untouched
    pub fn set(&mut self, date: NaiveDate, slot: SlotId, value: ScheduleSlot) {
        self.0.entry(date).or_default().set(slot, value);
    }

    /// Remove one slot override, dropping the date entry once it is empty
    pub fn clear(&mut self, date: NaiveDate, slot: SlotId) -> Option<ScheduleSlot> {
        let day = self.0.get_mut(&date)?;
        let removed = day.clear(slot);
        if day.is_empty() {
            self.0.remove(&date);
        }
        removed
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&NaiveDate, &PartialDaySchedule)> {
        self.0.iter()
    }
}

/// One-off footer exceptions, keyed by the Sunday that starts the week
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WeeklySchedule(BTreeMap<NaiveDate, ScheduleSlot>);

impl WeeklySchedule {
    pub fn get(&self, sunday: NaiveDate) -> Option<&ScheduleSlot> {
        self.0.get(&sunday)
    }

    pub fn set(&mut self, sunday: NaiveDate, value: ScheduleSlot) {
        self.0.insert(sunday, value);
    }

    pub fn remove(&mut self, sunday: NaiveDate) -> Option<ScheduleSlot> {
        self.0.remove(&sunday)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&NaiveDate, &ScheduleSlot)> {
        self.0.iter()
    }
}

/// The three layers the resolver reads, snapshotted as one unit by the global history
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Layers {
    pub overrides: MonthlyOverrides,
    pub weekly_data: WeeklySchedule,
    pub master_schedule: MasterSchedule,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::slot::ColorTag;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn overrides_keyed_by_iso_date() {
        let mut o = MonthlyOverrides::default();
        o.set(
            date("2026-03-04"),
            SlotId::Slot1,
            ScheduleSlot::new("Smith", ColorTag::Pink),
        );
        let json = serde_json::to_string(&o).unwrap();
        assert_eq!(
            json,
            r#"{"2026-03-04":{"slot1":{"text":"Smith","color":"pink"}}}"#
        );
        let back: MonthlyOverrides = serde_json::from_str(&json).unwrap();
        assert_eq!(back, o);
    }

    #[test]
    fn clearing_last_slot_drops_date() {
        let mut o = MonthlyOverrides::default();
        let d = date("2026-03-04");
        o.set(d, SlotId::Slot1, ScheduleSlot::new("a", ColorTag::Pink));
        o.set(d, SlotId::Slot2, ScheduleSlot::new("b", ColorTag::Blue));
        o.clear(d, SlotId::Slot1);
        assert_eq!(o.len(), 1);
        o.clear(d, SlotId::Slot2);
        assert!(o.is_empty());
        assert!(o.clear(d, SlotId::Slot3).is_none());
    }

    #[test]
    fn layers_use_camel_case_keys() {
        let value = serde_json::to_value(Layers::default()).unwrap();
        assert!(value.get("weeklyData").is_some());
        assert!(value.get("masterSchedule").is_some());
        assert!(value.get("overrides").is_some());
    }
}
