//! Game settings
//!
//! Read once at startup from a JSON file.  A missing file means defaults;
//! a malformed one is an error.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::entities::ScoringRule;

/// Environment variable naming an explicit settings file.
pub const CONFIG_ENV: &str = "SPACE_GAME_CONFIG";

/// Largest accepted cell size, in logical pixels.
pub const MAX_CELL_SIZE: i32 = 1000;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse settings file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid setting: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Milliseconds between simulation ticks.
    pub tick_interval_ms: u64,
    /// How long a key stays held without a press/repeat event, on terminals
    /// that never report key releases.  Longer than the OS auto-repeat delay.
    pub hold_window_ms: u64,
    /// Logical pixels covered by one terminal column.
    pub cell_width: i32,
    /// Logical pixels covered by one terminal row.
    pub cell_height: i32,
    pub scoring: ScoringRule,
    /// Ring the terminal bell on launch.
    pub bell: bool,
    /// Where log output goes.  Logging is off without it.
    pub log_file: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            tick_interval_ms: 20,
            hold_window_ms: 700,
            cell_width: 10,
            cell_height: 20,
            scoring: ScoringRule::PerOverlapTick,
            bell: true,
            log_file: None,
        }
    }
}

impl Settings {
    /// `$SPACE_GAME_CONFIG`, falling back to `~/.space_game.json`.
    pub fn default_path() -> PathBuf {
        if let Ok(path) = std::env::var(CONFIG_ENV) {
            return PathBuf::from(path);
        }
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
        PathBuf::from(home).join(".space_game.json")
    }

    pub fn from_json(json: &str, path: &Path) -> Result<Self, SettingsError> {
        let settings: Settings =
            serde_json::from_str(json).map_err(|source| SettingsError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load from `path`; defaults if the file does not exist.
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        match std::fs::read_to_string(path) {
            Ok(json) => Self::from_json(&json, path),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(source) => Err(SettingsError::Read {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.tick_interval_ms == 0 {
            return Err(SettingsError::Invalid("tick_interval_ms must be positive".into()));
        }
        let cell_range = 1..=MAX_CELL_SIZE;
        if !cell_range.contains(&self.cell_width) || !cell_range.contains(&self.cell_height) {
            return Err(SettingsError::Invalid(format!(
                "cell size must be between 1 and {}, got {}x{}",
                MAX_CELL_SIZE, self.cell_width, self.cell_height
            )));
        }
        Ok(())
    }

    /// Hold window expressed in ticks, at least one.
    pub fn hold_window_ticks(&self) -> u64 {
        (self.hold_window_ms / self.tick_interval_ms.max(1)).max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_file_keeps_defaults() {
        let s = Settings::from_json(r#"{ "scoring": "per_shot" }"#, Path::new("t.json")).unwrap();
        assert_eq!(s.scoring, ScoringRule::PerShot);
        assert_eq!(s.tick_interval_ms, Settings::default().tick_interval_ms);
    }

    #[test]
    fn test_zero_interval_rejected() {
        let err = Settings::from_json(r#"{ "tick_interval_ms": 0 }"#, Path::new("t.json"));
        assert!(matches!(err, Err(SettingsError::Invalid(_))));
    }

    #[test]
    fn test_oversized_cell_rejected() {
        let err = Settings::from_json(r#"{ "cell_width": 2000000000 }"#, Path::new("t.json"));
        assert!(matches!(err, Err(SettingsError::Invalid(_))));
        let err = Settings::from_json(r#"{ "cell_height": 1001 }"#, Path::new("t.json"));
        assert!(matches!(err, Err(SettingsError::Invalid(_))));
        assert!(Settings::from_json(r#"{ "cell_width": 1000 }"#, Path::new("t.json")).is_ok());
    }

    #[test]
    fn test_default_hold_window_outlasts_repeat_delay() {
        let s = Settings::default();
        assert!(s.hold_window_ms > 660);
        assert!(s.hold_window_ticks() > 25);
    }

    #[test]
    fn test_bad_json_is_parse_error() {
        let err = Settings::from_json("{ nope", Path::new("t.json"));
        assert!(matches!(err, Err(SettingsError::Parse { .. })));
    }

    #[test]
    fn test_hold_window_ticks() {
        let s = Settings {
            tick_interval_ms: 20,
            hold_window_ms: 150,
            ..Settings::default()
        };
        assert_eq!(s.hold_window_ticks(), 7);
    }
}
