use serde::{Deserialize, Serialize};

/// Configuration from bathsched.toml
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub facility: FacilitySettings,
    #[serde(default)]
    pub history: HistorySettings,
    #[serde(default)]
    pub editor: EditorSettings,
    #[serde(default)]
    pub check: CheckSettings,
    #[serde(default)]
    pub ui: UiSettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FacilitySettings {
    /// Facility label used until one is stored
    #[serde(default = "default_facility_name")]
    pub name: String,
}

impl Default for FacilitySettings {
    fn default() -> Self {
        FacilitySettings {
            name: default_facility_name(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistorySettings {
    /// Maximum retained entries per undo stack
    #[serde(default = "default_history_limit")]
    pub limit: usize,
}

impl Default for HistorySettings {
    fn default() -> Self {
        HistorySettings {
            limit: default_history_limit(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EditorSettings {
    /// Quiet period before typed input becomes an undo step
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
}

impl Default for EditorSettings {
    fn default() -> Self {
        EditorSettings {
            debounce_ms: default_debounce_ms(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckSettings {
    /// A resident bathed fewer times than this in a week is reported
    #[serde(default = "default_min_visits")]
    pub min_visits_per_week: usize,
}

impl Default for CheckSettings {
    fn default() -> Self {
        CheckSettings {
            min_visits_per_week: default_min_visits(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UiSettings {
    /// First month shown when no UI state exists (`YYYY-MM`)
    #[serde(default)]
    pub start_month: Option<String>,
}

fn default_facility_name() -> String {
    "2F South Wing".to_string()
}

fn default_history_limit() -> usize {
    50
}

fn default_debounce_ms() -> u64 {
    500
}

fn default_min_visits() -> usize {
    2
}
