use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::warn;

use crate::io::store::{Store, StoreError, StoreKey};
use crate::model::{Board, Layers, Settings};

/// Default "updated on" label: month/day without padding
pub fn default_update_label(today: NaiveDate) -> String {
    format!("{}/{}", today.month(), today.day())
}

/// Load one value, falling back to its default when it is missing or unreadable
pub fn load_or_default<T, S>(store: &S, key: StoreKey) -> T
where
    T: DeserializeOwned + Default,
    S: Store + ?Sized,
{
    load_value(store, key).unwrap_or_default()
}

fn load_value<T, S>(store: &S, key: StoreKey) -> Option<T>
where
    T: DeserializeOwned,
    S: Store + ?Sized,
{
    let raw = match store.load(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return None,
        Err(e) => {
            warn!(key = %key, error = %e, "could not read stored value, using default");
            return None;
        }
    };
    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(e) => {
            warn!(key = %key, error = %e, "malformed stored value, using default");
            None
        }
    }
}

/// Load the whole board. Each key falls back independently, so one bad file never
/// takes the others down with it.
pub fn load_board<S: Store + ?Sized>(store: &S, settings: &Settings, today: NaiveDate) -> Board {
    Board {
        layers: Layers {
            overrides: load_or_default(store, StoreKey::Overrides),
            weekly_data: load_or_default(store, StoreKey::WeeklyData),
            master_schedule: load_or_default(store, StoreKey::MasterSchedule),
        },
        residents: load_or_default(store, StoreKey::ResidentList),
        update_label: load_value::<String, _>(store, StoreKey::UpdateDateLabel)
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| default_update_label(today)),
        facility_name: load_value::<String, _>(store, StoreKey::FacilityName)
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| settings.facility.name.clone()),
    }
}

pub fn save_value<T, S>(store: &mut S, key: StoreKey, value: &T) -> Result<(), StoreError>
where
    T: Serialize + ?Sized,
    S: Store + ?Sized,
{
    let json = serde_json::to_string_pretty(value)
        .map_err(|source| StoreError::Serialize { key, source })?;
    store.save(key, &json)
}

/// Serialized values written together. If any write fails, the keys already written
/// are put back to what the store held before, so a failed commit leaves it unchanged.
#[derive(Debug, Default)]
pub struct WriteBatch {
    writes: Vec<(StoreKey, String)>,
}

impl WriteBatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// All three schedule layers
    pub fn layers(layers: &Layers) -> Result<Self, StoreError> {
        let mut batch = WriteBatch::new();
        batch.put(StoreKey::MasterSchedule, &layers.master_schedule)?;
        batch.put(StoreKey::Overrides, &layers.overrides)?;
        batch.put(StoreKey::WeeklyData, &layers.weekly_data)?;
        Ok(batch)
    }

    pub fn put<T: Serialize + ?Sized>(&mut self, key: StoreKey, value: &T) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(value)
            .map_err(|source| StoreError::Serialize { key, source })?;
        self.writes.push((key, json));
        Ok(())
    }

    pub fn keys(&self) -> impl Iterator<Item = StoreKey> + '_ {
        self.writes.iter().map(|(key, _)| *key)
    }

    pub fn commit<S: Store + ?Sized>(self, store: &mut S) -> Result<(), StoreError> {
        let mut previous = Vec::with_capacity(self.writes.len());
        for (key, _) in &self.writes {
            previous.push((*key, store.load(*key)?));
        }
        for (written, (key, json)) in self.writes.iter().enumerate() {
            if let Err(e) = store.save(*key, json) {
                restore(store, &previous[..written]);
                return Err(e);
            }
        }
        Ok(())
    }
}

fn restore<S: Store + ?Sized>(store: &mut S, previous: &[(StoreKey, Option<String>)]) {
    for (key, raw) in previous.iter().rev() {
        let result = match raw {
            Some(raw) => store.save(*key, raw),
            None => store.remove(*key),
        };
        match result {
            Ok(()) => warn!(key = %key, "write failed, restored previous value"),
            Err(e) => warn!(key = %key, error = %e, "could not restore previous value"),
        }
    }
}
