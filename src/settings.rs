//! Game settings and balance knobs
//!
//! Loaded from JSON so a host can tweak a run without recompiling. Every field
//! falls back to its default when missing from the document.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::SimError;

/// Tunables for one run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Money in the bank when the run starts
    pub starting_balance: u32,
    /// Life points when the run starts
    pub starting_lives: i32,
    /// Ticks between balloon releases
    pub spawn_interval_ticks: u32,
    /// Path positions a teleport hit pushes a balloon back
    pub teleport_back_track: usize,
    /// Seed for procedurally generated waves
    pub seed: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            starting_balance: STARTING_BALANCE,
            starting_lives: STARTING_LIVES,
            spawn_interval_ticks: SPAWN_INTERVAL_TICKS,
            teleport_back_track: DEFAULT_BACK_TRACK,
            seed: 0,
        }
    }
}

impl Settings {
    /// Parse settings from a JSON document
    pub fn from_json(json: &str) -> Result<Self, SimError> {
        let value: serde_json::Value = serde_json::from_str(json)?;
        if !value.is_object() {
            return Err(SimError::Config(
                "settings must be a JSON object".to_string(),
            ));
        }
        let settings: Settings = serde_json::from_value(value)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String, SimError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load settings from a JSON file on disk
    pub fn load_from(path: impl AsRef<std::path::Path>) -> Result<Self, SimError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .map_err(|e| SimError::Config(format!("{}: {e}", path.display())))?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    fn validate(&self) -> Result<(), SimError> {
        if self.spawn_interval_ticks == 0 {
            return Err(SimError::Config(
                "spawn_interval_ticks must be at least 1".to_string(),
            ));
        }
        if self.starting_lives <= 0 {
            return Err(SimError::Config(format!(
                "starting_lives must be positive, got {}",
                self.starting_lives
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.starting_lives, 20);
        assert_eq!(settings.spawn_interval_ticks, 10);
        assert_eq!(settings.teleport_back_track, 20);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let settings = Settings::from_json(r#"{ "starting_balance": 500 }"#).unwrap();
        assert_eq!(settings.starting_balance, 500);
        assert_eq!(settings.starting_lives, STARTING_LIVES);
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(matches!(
            Settings::from_json(r#"{ "spawn_interval_ticks": 0 }"#),
            Err(SimError::Config(_))
        ));
        assert!(Settings::from_json(r#"{ "starting_lives": -3 }"#).is_err());
        assert!(Settings::from_json("[1, 2]").is_err());
    }

    #[test]
    fn test_rejects_non_object_documents() {
        for json in ["[100, 20, 10, 20, 0]", "42", "\"settings\"", "null"] {
            assert!(
                matches!(Settings::from_json(json), Err(SimError::Config(_))),
                "accepted {json}"
            );
        }
    }

    #[test]
    fn test_json_round_trip() {
        let settings = Settings {
            seed: 42,
            ..Default::default()
        };
        let json = settings.to_json().unwrap();
        assert_eq!(Settings::from_json(&json).unwrap(), settings);
    }

    #[test]
    fn test_load_missing_file() {
        let err = Settings::load_from("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, SimError::Config(_)));
    }
}
