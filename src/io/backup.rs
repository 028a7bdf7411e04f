use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::io::store::StoreError;
use crate::model::{Board, MasterSchedule, MonthlyOverrides, ResidentList, WeeklySchedule};

/// Backup document version written by this build
pub const BACKUP_VERSION: u32 = 2;

/// Error type for backup import
#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    #[error("could not parse backup: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("unsupported backup version {0} (newest supported is {BACKUP_VERSION})")]
    UnsupportedVersion(u32),
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Full backup of a facility's schedule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportDocument {
    pub version: u32,
    pub exported_at: DateTime<Utc>,
    pub master_schedule: MasterSchedule,
    pub overrides: MonthlyOverrides,
    pub weekly_data: WeeklySchedule,
    pub resident_list: ResidentList,
    pub manual_update_date: String,
    pub facility_name: String,
}

impl ExportDocument {
    pub fn from_board(board: &Board, exported_at: DateTime<Utc>) -> Self {
        ExportDocument {
            version: BACKUP_VERSION,
            exported_at,
            master_schedule: board.layers.master_schedule.clone(),
            overrides: board.layers.overrides.clone(),
            weekly_data: board.layers.weekly_data.clone(),
            resident_list: board.residents.clone(),
            manual_update_date: board.update_label.clone(),
            facility_name: board.facility_name.clone(),
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Suggested file name for a backup taken at `exported_at`
    pub fn file_name(&self) -> String {
        format!(
            "bathing_schedule_backup_{}.json",
            self.exported_at.format("%Y-%m-%d")
        )
    }
}

/// A backup as read for import: every field optional
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportDocument {
    #[serde(default)]
    pub version: Option<u32>,
    #[serde(default)]
    pub exported_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub master_schedule: Option<MasterSchedule>,
    #[serde(default)]
    pub overrides: Option<MonthlyOverrides>,
    #[serde(default)]
    pub weekly_data: Option<WeeklySchedule>,
    #[serde(default)]
    pub resident_list: Option<ResidentList>,
    #[serde(default)]
    pub manual_update_date: Option<String>,
    #[serde(default)]
    pub facility_name: Option<String>,
}

impl ImportDocument {
    /// Parse and validate a whole document before anything is applied
    pub fn parse(json: &str) -> Result<Self, ImportError> {
        let doc: ImportDocument = serde_json::from_str(json)?;
        if let Some(version) = doc.version
            && version > BACKUP_VERSION
        {
            return Err(ImportError::UnsupportedVersion(version));
        }
        Ok(doc)
    }
}
