use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::debug;

/// Error type for persistence operations
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("could not read {path}: {source}")]
    Read { path: PathBuf, source: io::Error },
    #[error("could not write {path}: {source}")]
    Write { path: PathBuf, source: io::Error },
    #[error("could not serialize {key}: {source}")]
    Serialize {
        key: StoreKey,
        source: serde_json::Error,
    },
}

/// The fixed set of persisted values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreKey {
    MasterSchedule,
    Overrides,
    WeeklyData,
    ResidentList,
    UpdateDateLabel,
    FacilityName,
}

impl StoreKey {
    pub const ALL: [StoreKey; 6] = [
        StoreKey::MasterSchedule,
        StoreKey::Overrides,
        StoreKey::WeeklyData,
        StoreKey::ResidentList,
        StoreKey::UpdateDateLabel,
        StoreKey::FacilityName,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            StoreKey::MasterSchedule => "master-schedule",
            StoreKey::Overrides => "overrides",
            StoreKey::WeeklyData => "weekly-data",
            StoreKey::ResidentList => "resident-list",
            StoreKey::UpdateDateLabel => "update-date-label",
            StoreKey::FacilityName => "facility-name-label",
        }
    }

    /// File a [`DirStore`] keeps this value in
    pub fn file_name(self) -> &'static str {
        match self {
            StoreKey::MasterSchedule => "master.json",
            StoreKey::Overrides => "overrides.json",
            StoreKey::WeeklyData => "weekly.json",
            StoreKey::ResidentList => "residents.json",
            StoreKey::UpdateDateLabel => "update_label.json",
            StoreKey::FacilityName => "facility_name.json",
        }
    }
}

impl fmt::Display for StoreKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Key-value persistence for the schedule. A missing key means "use the built-in default".
pub trait Store {
    fn load(&self, key: StoreKey) -> Result<Option<String>, StoreError>;
    fn save(&mut self, key: StoreKey, value: &str) -> Result<(), StoreError>;
    /// Drop a key so the next load sees its default. Removing a missing key is not an error.
    fn remove(&mut self, key: StoreKey) -> Result<(), StoreError>;
}

/// Write a file atomically: temp file in the same directory, then rename over the target
pub fn atomic_write(path: &Path, content: &[u8]) -> io::Result<()> {
    let dir = path.parent().unwrap_or(Path::new("."));
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(content)?;
    tmp.flush()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

/// One JSON file per key inside a data directory
#[derive(Debug, Clone)]
pub struct DirStore {
    dir: PathBuf,
}

impl DirStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        DirStore { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, key: StoreKey) -> PathBuf {
        self.dir.join(key.file_name())
    }
}

impl Store for DirStore {
    fn load(&self, key: StoreKey) -> Result<Option<String>, StoreError> {
        let path = self.path_for(key);
        match fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StoreError::Read { path, source }),
        }
    }

    fn save(&mut self, key: StoreKey, value: &str) -> Result<(), StoreError> {
        let path = self.path_for(key);
        fs::create_dir_all(&self.dir).map_err(|source| StoreError::Write {
            path: self.dir.clone(),
            source,
        })?;
        atomic_write(&path, value.as_bytes()).map_err(|source| StoreError::Write {
            path: path.clone(),
            source,
        })?;
        debug!(key = %key, path = %path.display(), "saved");
        Ok(())
    }

    fn remove(&mut self, key: StoreKey) -> Result<(), StoreError> {
        let path = self.path_for(key);
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(StoreError::Write { path, source }),
        }
    }
}

/// In-memory store, for tests and throwaway sessions
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: HashMap<StoreKey, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: StoreKey) -> Option<&str> {
        self.values.get(&key).map(|s| s.as_str())
    }
}

impl Store for MemoryStore {
    fn load(&self, key: StoreKey) -> Result<Option<String>, StoreError> {
        Ok(self.values.get(&key).cloned())
    }

    fn save(&mut self, key: StoreKey, value: &str) -> Result<(), StoreError> {
        self.values.insert(key, value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: StoreKey) -> Result<(), StoreError> {
        self.values.remove(&key);
        Ok(())
    }
}
