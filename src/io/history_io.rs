use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::io::store::atomic_write;
use crate::model::Layers;
use crate::ops::history::History;

const HISTORY_FILE: &str = ".history.json";

/// On-disk shape of the global undo history
#[derive(Serialize, Deserialize)]
struct HistoryFile {
    cursor: usize,
    entries: Vec<Layers>,
}

/// Read the persisted global history, if there is a usable one
pub fn read_history(data_dir: &Path, limit: usize) -> Option<History<Layers>> {
    let path = data_dir.join(HISTORY_FILE);
    let content = fs::read_to_string(&path).ok()?;
    let file: HistoryFile = match serde_json::from_str(&content) {
        Ok(file) => file,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "ignoring malformed history");
            return None;
        }
    };
    let history = History::from_parts(file.entries, file.cursor);
    if history.is_none() {
        warn!(path = %path.display(), "ignoring history with out-of-range cursor");
    }
    history.map(|h| h.with_limit(limit))
}

/// Write the global history next to the data files
pub fn write_history(data_dir: &Path, history: &History<Layers>) -> Result<(), std::io::Error> {
    let file = HistoryFile {
        cursor: history.cursor(),
        entries: history.entries().to_vec(),
    };
    let content = serde_json::to_string(&file)?;
    atomic_write(&data_dir.join(HISTORY_FILE), content.as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ColorTag, ScheduleSlot};
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn layers_with_week(text: &str) -> Layers {
        let mut layers = Layers::default();
        layers.weekly_data.set(
            NaiveDate::from_ymd_opt(2026, 3, 1).unwrap(),
            ScheduleSlot::new(text, ColorTag::Gray),
        );
        layers
    }

    #[test]
    fn write_and_read_round_trip() {
        let dir = TempDir::new().unwrap();
        let mut history = History::new(Layers::default());
        history.commit(layers_with_week("a"));
        history.commit(layers_with_week("b"));
        history.undo();

        write_history(dir.path(), &history).unwrap();
        let loaded = read_history(dir.path(), 50).unwrap();
        assert_eq!(loaded.len(), 3);
        assert_eq!(loaded.cursor(), 1);
        assert_eq!(loaded.current(), &layers_with_week("a"));
        assert!(loaded.can_redo());
    }

    #[test]
    fn read_missing_file_returns_none() {
        let dir = TempDir::new().unwrap();
        assert!(read_history(dir.path(), 50).is_none());
    }

    #[test]
    fn read_malformed_or_inconsistent_returns_none() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(HISTORY_FILE), "not json {{{").unwrap();
        assert!(read_history(dir.path(), 50).is_none());

        fs::write(dir.path().join(HISTORY_FILE), r#"{"cursor": 0, "entries": []}"#).unwrap();
        assert!(read_history(dir.path(), 50).is_none());
    }

    #[test]
    fn smaller_limit_trims_oldest() {
        let dir = TempDir::new().unwrap();
        let mut history = History::new(Layers::default());
        for i in 0..5 {
            history.commit(layers_with_week(&i.to_string()));
        }
        write_history(dir.path(), &history).unwrap();
        let loaded = read_history(dir.path(), 3).unwrap();
        assert_eq!(loaded.len(), 3);
        assert_eq!(loaded.current(), &layers_with_week("4"));
    }
}
