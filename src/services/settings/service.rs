use crate::models::settings::Settings;
use anyhow::{anyhow, Context, Result};
use directories::ProjectDirs;
use std::fs;
use std::path::PathBuf;

const SETTINGS_FILE_NAME: &str = "settings.toml";

/// Loads and stores `Settings` as a TOML file.
pub struct SettingsService {
    path: PathBuf,
}

impl SettingsService {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Service backed by the platform config directory
    pub fn from_project_dirs() -> Result<Self> {
        let dirs = ProjectDirs::from("com", "KenBoyle", "CapsuleCalendar")
            .ok_or_else(|| anyhow!("No home directory available for settings"))?;
        Ok(Self::new(dirs.config_dir().join(SETTINGS_FILE_NAME)))
    }

    /// Get the current settings; a missing file yields defaults
    pub fn get(&self) -> Result<Settings> {
        if !self.path.exists() {
            log::info!("No settings at {:?}, using defaults", self.path);
            return Ok(Settings::default());
        }

        let raw = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read settings from {:?}", self.path))?;
        let mut settings: Settings = toml::from_str(&raw)
            .with_context(|| format!("Failed to parse settings in {:?}", self.path))?;

        for field in settings.sanitize() {
            log::warn!("Invalid '{}' in settings, reset to default", field);
        }

        Ok(settings)
    }

    /// Update settings
    pub fn update(&self, settings: &Settings) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create settings directory {:?}", parent))?;
        }

        let raw = toml::to_string_pretty(settings).context("Failed to serialize settings")?;
        fs::write(&self.path, raw)
            .with_context(|| format!("Failed to write settings to {:?}", self.path))?;

        log::debug!("Saved settings to {:?}", self.path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::event::EventColor;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_returns_defaults() {
        let dir = TempDir::new().unwrap();
        let service = SettingsService::new(dir.path().join("settings.toml"));

        assert_eq!(service.get().unwrap(), Settings::default());
    }

    #[test]
    fn test_settings_persistence() {
        let dir = TempDir::new().unwrap();
        let service = SettingsService::new(dir.path().join("nested").join("settings.toml"));

        let settings = Settings {
            theme: "dark".to_string(),
            first_day_of_week: 1,
            long_press_ms: 650,
            default_color: EventColor::Pink,
            ..Settings::default()
        };
        service.update(&settings).unwrap();

        assert_eq!(service.get().unwrap(), settings);
    }

    #[test]
    fn test_partial_file_fills_defaults_and_sanitizes() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.toml");
        fs::write(&path, "first_day_of_week = 12\ndefault_color = \"green\"\n").unwrap();

        let settings = SettingsService::new(&path).get().unwrap();

        assert_eq!(settings.first_day_of_week, 0);
        assert_eq!(settings.default_color, EventColor::Green);
        assert_eq!(settings.long_press_ms, 500);
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.toml");
        fs::write(&path, "theme = [not toml").unwrap();

        let err = SettingsService::new(&path).get().unwrap_err();
        assert!(err.to_string().contains("Failed to parse settings"));
    }
}
