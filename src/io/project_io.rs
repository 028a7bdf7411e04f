use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

/// Directory holding a facility's schedule data and settings
pub const DATA_DIR: &str = "schedule";
/// Settings file inside the data directory
pub const SETTINGS_FILE: &str = "bathsched.toml";

/// Error type for project discovery and settings
#[derive(Debug, thiserror::Error)]
pub enum ProjectError {
    #[error("not a bathsched project: no schedule/bathsched.toml found (run `bathsched init`)")]
    NotAProject,
    #[error("already initialized: {0}")]
    AlreadyInitialized(PathBuf),
    #[error("could not read {path}: {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not write {path}: {source}")]
    WriteError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not parse bathsched.toml: {0}")]
    SettingsParseError(#[from] toml::de::Error),
    #[error("could not edit bathsched.toml: {0}")]
    SettingsEditError(#[from] toml_edit::TomlError),
    #[error("unknown setting: {0}")]
    UnknownSetting(String),
    #[error("invalid value for {key}: {value}")]
    InvalidSetting { key: String, value: String },
    #[error("io error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Locations of a discovered project
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectPaths {
    pub root: PathBuf,
    pub data_dir: PathBuf,
}

impl ProjectPaths {
    pub fn new(root: &Path) -> Self {
        ProjectPaths {
            root: root.to_path_buf(),
            data_dir: root.join(DATA_DIR),
        }
    }

    pub fn settings_file(&self) -> PathBuf {
        self.data_dir.join(SETTINGS_FILE)
    }

    pub fn log_dir(&self) -> PathBuf {
        self.data_dir.join("logs")
    }
}

/// Discover the project by walking up from the given directory,
/// looking for `schedule/bathsched.toml`.
pub fn discover_project(start: &Path) -> Result<ProjectPaths, ProjectError> {
    let mut current = start.to_path_buf();
    loop {
        let paths = ProjectPaths::new(&current);
        if paths.settings_file().is_file() {
            return Ok(paths);
        }
        if !current.pop() {
            return Err(ProjectError::NotAProject);
        }
    }
}

/// Settings written by `init`
fn settings_template(facility_name: &str) -> String {
    format!(
        "\
# bathsched settings

[facility]
# Label shown until one is set with `bathsched label facility`
name = {}

[history]
# Undo steps kept per history
limit = 50

[editor]
# Quiet period (ms) before typing becomes an undo step
debounce_ms = 500

[check]
min_visits_per_week = 2
",
        toml_edit::Value::from(facility_name).to_string().trim()
    )
}

/// Create `schedule/` with a default settings file under `root`
pub fn init_project(root: &Path, facility_name: &str) -> Result<ProjectPaths, ProjectError> {
    let paths = ProjectPaths::new(root);
    if paths.settings_file().exists() {
        return Err(ProjectError::AlreadyInitialized(paths.settings_file()));
    }
    fs::create_dir_all(&paths.data_dir)?;
    fs::write(paths.settings_file(), settings_template(facility_name))?;
    info!(path = %paths.data_dir.display(), "initialized project");
    Ok(paths)
}
