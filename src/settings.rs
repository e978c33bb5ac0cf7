//! Game settings and preferences
//!
//! Read from a JSON file next to the binary; every field is optional.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::tuning::{Stage, Tuning};

/// Environment variable naming the settings file
pub const SETTINGS_ENV: &str = "PIPE_RUNNER_SETTINGS";
/// Settings file used when the environment variable is unset
pub const DEFAULT_SETTINGS_FILE: &str = "pipe_runner.json";

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Tutorial stage to play
    pub stage: Stage,
    /// Fixed RNG seed; a clock-derived seed is used when absent
    pub seed: Option<u64>,
    /// JSON file with tuning overrides applied on top of the stage preset
    pub tuning_path: Option<PathBuf>,

    // === HUD ===
    /// Show FPS counter
    pub show_fps: bool,

    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    pub muted: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            stage: Stage::default(),
            seed: None,
            tuning_path: None,
            show_fps: false,
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
        }
    }
}

impl Settings {
    /// Settings file location: `$PIPE_RUNNER_SETTINGS` or the default file name
    pub fn path() -> PathBuf {
        std::env::var_os(SETTINGS_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_SETTINGS_FILE))
    }

    /// Load settings from the default location
    pub fn load() -> Self {
        let path = Self::path();
        if !path.exists() {
            log::info!("Using default settings");
            return Self::default();
        }
        Self::load_from(&path)
    }

    /// Load settings from a JSON file, defaults on any failure
    pub fn load_from(path: &Path) -> Self {
        let json = match std::fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) => {
                log::warn!("Cannot read settings {}: {}", path.display(), e);
                return Self::default();
            }
        };
        match serde_json::from_str(&json) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("Ignoring malformed settings {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Save settings to the default location, logging any failure
    pub fn save(&self) {
        let path = Self::path();
        if let Err(e) = self.save_to(&path) {
            log::warn!("Cannot save settings {}: {}", path.display(), e);
        }
    }

    /// Save settings as pretty JSON
    pub fn save_to(&self, path: &Path) -> std::io::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        log::info!("Settings saved to {}", path.display());
        Ok(())
    }

    /// Stage preset, with the overrides file applied when configured
    pub fn tuning(&self) -> Tuning {
        let preset = Tuning::from_stage(self.stage);
        match &self.tuning_path {
            Some(path) => Tuning::load_from(path, preset),
            None => preset,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("pipe_runner_{}_{}", std::process::id(), name))
    }

    #[test]
    fn test_partial_json() {
        let settings: Settings =
            serde_json::from_str(r#"{ "stage": "Bounce", "seed": 7 }"#).expect("valid json");
        assert_eq!(settings.stage, Stage::Bounce);
        assert_eq!(settings.seed, Some(7));
        assert_eq!(settings.master_volume, 0.8);
        assert!(!settings.tuning().sound);
    }

    #[test]
    fn test_save_then_load() {
        let path = temp_path("settings.json");
        let settings = Settings {
            stage: Stage::GameOn,
            muted: true,
            ..Settings::default()
        };
        settings.save_to(&path).expect("write settings");
        let loaded = Settings::load_from(&path);
        std::fs::remove_file(&path).ok();
        assert_eq!(loaded, settings);
    }

    #[test]
    fn test_malformed_falls_back() {
        let path = temp_path("broken.json");
        std::fs::write(&path, "{ not json").expect("write file");
        let loaded = Settings::load_from(&path);
        std::fs::remove_file(&path).ok();
        assert_eq!(loaded, Settings::default());
    }

    #[test]
    fn test_tuning_overrides_apply_on_stage() {
        let path = temp_path("tuning.json");
        std::fs::write(&path, r#"{ "gravity": 0.9 }"#).expect("write file");
        let settings = Settings {
            stage: Stage::GameOff,
            tuning_path: Some(path.clone()),
            ..Settings::default()
        };
        let tuning = settings.tuning();
        std::fs::remove_file(&path).ok();
        assert_eq!(
            tuning,
            Tuning {
                gravity: 0.9,
                ..Tuning::from_stage(Stage::GameOff)
            }
        );
    }
}
