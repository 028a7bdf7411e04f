use std::fs;
use std::path::Path;

use crate::io::project_io::{ProjectError, SETTINGS_FILE};
use crate::model::Settings;
use crate::ops::calendar::YearMonth;

/// Read the settings, returning both the parsed values and the raw
/// toml_edit document for round-trip-safe editing.
pub fn read_settings(data_dir: &Path) -> Result<(Settings, toml_edit::DocumentMut), ProjectError> {
    let path = data_dir.join(SETTINGS_FILE);
    let text = fs::read_to_string(&path).map_err(|e| ProjectError::ReadError {
        path: path.clone(),
        source: e,
    })?;
    let settings: Settings = toml::from_str(&text)?;
    let doc: toml_edit::DocumentMut = text.parse()?;
    Ok((settings, doc))
}

/// Parsed settings only; a missing file yields defaults
pub fn load_settings(data_dir: &Path) -> Result<Settings, ProjectError> {
    if !data_dir.join(SETTINGS_FILE).exists() {
        return Ok(Settings::default());
    }
    read_settings(data_dir).map(|(settings, _)| settings)
}

/// Write the settings document back to disk, preserving formatting.
pub fn write_settings(data_dir: &Path, doc: &toml_edit::DocumentMut) -> Result<(), ProjectError> {
    let path = data_dir.join(SETTINGS_FILE);
    fs::write(&path, doc.to_string()).map_err(|e| ProjectError::WriteError {
        path: path.clone(),
        source: e,
    })?;
    Ok(())
}

/// Keys accepted by `settings set`
pub const SETTING_KEYS: [&str; 5] = [
    "facility.name",
    "history.limit",
    "editor.debounce_ms",
    "check.min_visits_per_week",
    "ui.start_month",
];

/// Set one `section.field` key, validating the value for its type
pub fn set_setting(
    doc: &mut toml_edit::DocumentMut,
    key: &str,
    value: &str,
) -> Result<(), ProjectError> {
    let invalid = || ProjectError::InvalidSetting {
        key: key.to_string(),
        value: value.to_string(),
    };
    let (section, field) = key
        .split_once('.')
        .filter(|_| SETTING_KEYS.contains(&key))
        .ok_or_else(|| ProjectError::UnknownSetting(key.to_string()))?;

    let item = match key {
        "history.limit" | "editor.debounce_ms" | "check.min_visits_per_week" => {
            let n: i64 = value.trim().parse().map_err(|_| invalid())?;
            if n < 1 {
                return Err(invalid());
            }
            toml_edit::value(n)
        }
        "ui.start_month" => {
            let month = YearMonth::parse(value).ok_or_else(invalid)?;
            toml_edit::value(month.to_string())
        }
        _ => toml_edit::value(value),
    };

    if !doc.contains_key(section) {
        doc[section] = toml_edit::Item::Table(toml_edit::Table::new());
    }
    doc[section][field] = item;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn sample_settings() -> &'static str {
        r#"# facility settings
[facility]
name = "2F South Wing" # shown on the sheet

[history]
limit = 50
"#
    }

    #[test]
    fn test_round_trip_settings() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(SETTINGS_FILE), sample_settings()).unwrap();

        let (settings, doc) = read_settings(tmp.path()).unwrap();
        assert_eq!(settings.facility.name, "2F South Wing");
        write_settings(tmp.path(), &doc).unwrap();

        let written = fs::read_to_string(tmp.path().join(SETTINGS_FILE)).unwrap();
        assert_eq!(written, sample_settings());
    }

    #[test]
    fn test_write_failure_is_reported_as_write() {
        let tmp = TempDir::new().unwrap();
        let doc: toml_edit::DocumentMut = sample_settings().parse().unwrap();
        let err = write_settings(&tmp.path().join("missing"), &doc).unwrap_err();
        assert!(matches!(err, ProjectError::WriteError { .. }));
        assert!(err.to_string().starts_with("could not write"));
    }

    #[test]
    fn test_set_keeps_comments() {
        let mut doc: toml_edit::DocumentMut = sample_settings().parse().unwrap();
        set_setting(&mut doc, "history.limit", "20").unwrap();
        set_setting(&mut doc, "ui.start_month", "2026-3").unwrap();
        let result = doc.to_string();
        assert!(result.contains("# facility settings"));
        assert!(result.contains("limit = 20"));
        let settings: Settings = toml::from_str(&result).unwrap();
        assert_eq!(settings.history.limit, 20);
        assert_eq!(settings.ui.start_month.as_deref(), Some("2026-03"));
    }

    #[test]
    fn test_set_rejects_bad_input() {
        let mut doc: toml_edit::DocumentMut = sample_settings().parse().unwrap();
        assert!(matches!(
            set_setting(&mut doc, "history.depth", "3"),
            Err(ProjectError::UnknownSetting(_))
        ));
        assert!(matches!(
            set_setting(&mut doc, "editor.debounce_ms", "soon"),
            Err(ProjectError::InvalidSetting { .. })
        ));
        assert!(matches!(
            set_setting(&mut doc, "history.limit", "0"),
            Err(ProjectError::InvalidSetting { .. })
        ));
        assert!(set_setting(&mut doc, "ui.start_month", "March").is_err());
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let tmp = TempDir::new().unwrap();
        assert_eq!(load_settings(tmp.path()).unwrap(), Settings::default());
    }
}
