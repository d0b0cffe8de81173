//! Persisted user settings (lives in the OS config directory).

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::ConfigError;
use crate::model::TimelineScale;
use crate::scheduler::grid::ColumnWidths;
use crate::scheduler::position::MIN_BAR_WIDTH_PCT;

const SETTINGS_FILE: &str = "settings.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Scale the timeline opens with.
    pub scale: TimelineScale,
    pub column_widths: ColumnWidths,
    /// Minimum bar width in percent of the timeline.
    pub min_bar_width_pct: f64,
    /// Plan reopened on launch.
    pub last_plan: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            scale: TimelineScale::Weeks,
            column_widths: ColumnWidths::default(),
            min_bar_width_pct: MIN_BAR_WIDTH_PCT,
            last_plan: None,
        }
    }
}

impl Settings {
    /// `<config dir>/KaizenTimeline/settings.json`, or `./settings.json` when
    /// the platform has no config directory.
    pub fn default_path() -> PathBuf {
        if let Some(proj_dirs) = directories::ProjectDirs::from("", "", "KaizenTimeline") {
            proj_dirs.config_dir().join(SETTINGS_FILE)
        } else {
            PathBuf::from(".").join(SETTINGS_FILE)
        }
    }

    /// Load settings, falling back to defaults if the file is missing or unreadable.
    pub fn load(path: &Path) -> Self {
        let contents = match std::fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) => {
                debug!("No settings at {}: {}", path.display(), e);
                return Self::default();
            }
        };
        match serde_json::from_str::<Settings>(&contents) {
            Ok(settings) => settings.sanitized(),
            Err(e) => {
                warn!("Ignoring malformed settings {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let json = serde_json::to_string_pretty(self)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|source| ConfigError::Write {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        std::fs::write(path, json).map_err(|source| ConfigError::Write {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Replace nonsensical numbers from a hand-edited file with defaults.
    fn sanitized(mut self) -> Self {
        let defaults = ColumnWidths::default();
        let fix = |value: f32, default: f32| {
            if value.is_finite() && value >= 1.0 {
                value
            } else {
                default
            }
        };
        self.column_widths.day = fix(self.column_widths.day, defaults.day);
        self.column_widths.week = fix(self.column_widths.week, defaults.week);
        self.column_widths.month = fix(self.column_widths.month, defaults.month);
        if !(self.min_bar_width_pct.is_finite() && (0.0..=100.0).contains(&self.min_bar_width_pct))
        {
            self.min_bar_width_pct = MIN_BAR_WIDTH_PCT;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("kaizen-timeline-config-{}", std::process::id()))
            .join(name)
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let settings = Settings::load(&temp_path("missing.json"));
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.scale, TimelineScale::Weeks);
    }

    #[test]
    fn test_save_and_load() {
        let path = temp_path("saved.json");
        let settings = Settings {
            scale: TimelineScale::Months,
            last_plan: Some(PathBuf::from("/plans/line3.kaizen.json")),
            ..Default::default()
        };
        settings.save(&path).unwrap();
        let loaded = Settings::load(&path);
        let _ = std::fs::remove_file(&path);
        assert_eq!(loaded, settings);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let path = temp_path("partial.json");
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, r#"{ "scale": "Days", "column_widths": { "day": 32.0 } }"#).unwrap();
        let loaded = Settings::load(&path);
        let _ = std::fs::remove_file(&path);
        assert_eq!(loaded.scale, TimelineScale::Days);
        assert_eq!(loaded.column_widths.day, 32.0);
        assert_eq!(loaded.column_widths.month, 150.0);
        assert_eq!(loaded.min_bar_width_pct, MIN_BAR_WIDTH_PCT);
    }

    #[test]
    fn test_bad_numbers_are_replaced() {
        let path = temp_path("bad.json");
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(
            &path,
            r#"{ "column_widths": { "week": -5.0 }, "min_bar_width_pct": 400.0 }"#,
        )
        .unwrap();
        let loaded = Settings::load(&path);
        let _ = std::fs::remove_file(&path);
        assert_eq!(loaded.column_widths.week, 80.0);
        assert_eq!(loaded.min_bar_width_pct, MIN_BAR_WIDTH_PCT);
    }

    #[test]
    fn test_malformed_file_gives_defaults() {
        let path = temp_path("malformed.json");
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, "scale = weeks").unwrap();
        let loaded = Settings::load(&path);
        let _ = std::fs::remove_file(&path);
        assert_eq!(loaded, Settings::default());
    }
}
