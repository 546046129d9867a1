//! Persisted settings for the converter.
//!
//! Stored as pretty-printed JSON. On first run the file does not exist and
//! the defaults are written back so the user has something to edit.

use std::collections::BTreeMap;
use std::path::Path;

use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::error::{TermineError, TermineResult};

/// Google's alias for the user's main calendar
pub const DEFAULT_CALENDAR_ID: &str = "primary";

const DEFAULT_TIME_ZONE: &str = "Europe/Berlin";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Address lines of the practice, used as event location
    pub therapy_practice_address: Vec<String>,

    /// Treatment code (e.g. "KG ZNS") -> display name used as event title
    pub therapy_kind_mapping: BTreeMap<String, String>,

    pub appointment_duration_minutes: u32,

    pub google_calendar_id: String,

    pub google_calendar_enabled: bool,

    /// IANA name of the practice's time zone
    pub time_zone: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            therapy_practice_address: vec![
                "Therapiezentrum am Stadtpark".to_string(),
                "Stadtpark 1".to_string(),
                "12345 Musterstadt".to_string(),
            ],
            therapy_kind_mapping: BTreeMap::from([
                ("KG ZNS".to_string(), "Krankengymnastik".to_string()),
                ("O60".to_string(), "Osteopathie".to_string()),
            ]),
            appointment_duration_minutes: 30,
            google_calendar_id: DEFAULT_CALENDAR_ID.to_string(),
            google_calendar_enabled: false,
            time_zone: DEFAULT_TIME_ZONE.to_string(),
        }
    }
}

impl Config {
    /// Load the config at `path`, or write the defaults there if it does not exist yet.
    ///
    /// An existing file is never rewritten, and any problem with it is an error.
    pub fn load_or_init(path: &Path) -> TermineResult<Self> {
        if path.exists() {
            return Self::load(path);
        }

        let config = Config::default();
        config.save(path)?;
        tracing::info!(path = %path.display(), "wrote default config");

        Ok(config)
    }

    pub fn load(path: &Path) -> TermineResult<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&content).map_err(|e| {
            TermineError::Config(format!("Failed to parse {}: {}", path.display(), e))
        })?;

        config.validate()?;

        Ok(config)
    }

    pub fn save(&self, path: &Path) -> TermineResult<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;

        Ok(())
    }

    fn validate(&self) -> TermineResult<()> {
        if self.appointment_duration_minutes == 0 {
            return Err(TermineError::Config(
                "appointment_duration_minutes must be positive".into(),
            ));
        }

        self.tz()?;

        Ok(())
    }

    /// Display name for a treatment code, falling back to the code itself.
    pub fn display_name<'a>(&'a self, therapy_kind: &'a str) -> &'a str {
        self.therapy_kind_mapping
            .get(therapy_kind)
            .map(String::as_str)
            .unwrap_or(therapy_kind)
    }

    /// Address lines joined into a single multi-line location string.
    pub fn location(&self) -> String {
        self.therapy_practice_address.join("\n")
    }

    pub fn duration(&self) -> chrono::Duration {
        chrono::Duration::minutes(i64::from(self.appointment_duration_minutes))
    }

    pub fn tz(&self) -> TermineResult<Tz> {
        self.time_zone
            .parse::<Tz>()
            .map_err(|_| TermineError::InvalidTimeZone(self.time_zone.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_load_or_init_writes_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");

        let config = Config::load_or_init(&path).unwrap();

        assert_eq!(config, Config::default());
        assert!(path.exists());

        let written: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(written["appointment_duration_minutes"], 30);
        assert_eq!(written["therapy_kind_mapping"]["KG ZNS"], "Krankengymnastik");
    }

    #[test]
    fn test_load_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        Config::load_or_init(&path).unwrap();

        let first = Config::load_or_init(&path).unwrap();
        let second = Config::load_or_init(&path).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_existing_file_is_loaded_verbatim() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(
            &path,
            r#"{
                "therapy_practice_address": ["Praxis Nord", "Hauptstr. 5"],
                "therapy_kind_mapping": {"MT": "Manuelle Therapie"},
                "appointment_duration_minutes": 45,
                "google_calendar_id": "abc@group.calendar.google.com",
                "google_calendar_enabled": true,
                "time_zone": "Europe/Vienna"
            }"#,
        )
        .unwrap();

        let config = Config::load_or_init(&path).unwrap();

        assert_eq!(config.therapy_practice_address, vec!["Praxis Nord", "Hauptstr. 5"]);
        assert_eq!(config.display_name("MT"), "Manuelle Therapie");
        assert_eq!(config.appointment_duration_minutes, 45);
        assert_eq!(config.google_calendar_id, "abc@group.calendar.google.com");
        assert!(config.google_calendar_enabled);
        assert_eq!(config.tz().unwrap(), chrono_tz::Europe::Vienna);
    }

    #[test]
    fn test_missing_fields_take_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"appointment_duration_minutes": 60}"#).unwrap();

        let config = Config::load(&path).unwrap();

        assert_eq!(config.appointment_duration_minutes, 60);
        assert_eq!(config.google_calendar_id, DEFAULT_CALENDAR_ID);
        assert_eq!(config.time_zone, "Europe/Berlin");
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{ not json").unwrap();

        let err = Config::load_or_init(&path).unwrap_err();
        assert!(matches!(err, TermineError::Config(_)), "got {:?}", err);

        // The broken file must not be replaced with defaults
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "{ not json");
    }

    #[test]
    fn test_zero_duration_is_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"appointment_duration_minutes": 0}"#).unwrap();

        assert!(matches!(
            Config::load(&path),
            Err(TermineError::Config(_))
        ));
    }

    #[test]
    fn test_unknown_time_zone_is_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"time_zone": "Mars/Olympus"}"#).unwrap();

        assert!(matches!(
            Config::load(&path),
            Err(TermineError::InvalidTimeZone(_))
        ));
    }

    #[test]
    fn test_display_name_falls_back_to_code() {
        let config = Config::default();
        assert_eq!(config.display_name("KG ZNS"), "Krankengymnastik");
        assert_eq!(config.display_name("O60"), "Osteopathie");
        assert_eq!(config.display_name("Massage"), "Massage");
    }

    #[test]
    fn test_location_joins_lines() {
        let config = Config::default();
        assert_eq!(
            config.location(),
            "Therapiezentrum am Stadtpark\nStadtpark 1\n12345 Musterstadt"
        );
    }
}
