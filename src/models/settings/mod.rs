// Settings module
// User preferences persisted as TOML

use serde::{Deserialize, Serialize};

use crate::models::event::EventColor;

pub const DEFAULT_LONG_PRESS_MS: u64 = 500;
pub const DEFAULT_SHARE_CAPTION: &str = "Check out my calendar this month!";
pub const DEFAULT_SNAPSHOT_FILE_NAME: &str = "calendar.png";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub theme: String,
    pub use_system_theme: bool,
    pub first_day_of_week: u8,
    /// Hold time before a press on a capsule turns into a reposition drag
    pub long_press_ms: u64,
    pub default_color: EventColor,
    pub share_caption: String,
    pub snapshot_file_name: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            theme: "light".to_string(),
            use_system_theme: false,
            first_day_of_week: 0, // Sunday
            long_press_ms: DEFAULT_LONG_PRESS_MS,
            default_color: EventColor::Blue,
            share_caption: DEFAULT_SHARE_CAPTION.to_string(),
            snapshot_file_name: DEFAULT_SNAPSHOT_FILE_NAME.to_string(),
        }
    }
}

impl Settings {
    /// Replace out-of-range values with defaults, returning the names of the
    /// fields that were changed.
    pub fn sanitize(&mut self) -> Vec<&'static str> {
        let defaults = Settings::default();
        let mut fixed = Vec::new();

        if self.first_day_of_week > 6 {
            self.first_day_of_week = defaults.first_day_of_week;
            fixed.push("first_day_of_week");
        }
        if self.long_press_ms == 0 {
            self.long_press_ms = defaults.long_press_ms;
            fixed.push("long_press_ms");
        }
        if !matches!(self.theme.to_lowercase().as_str(), "light" | "dark") {
            self.theme = defaults.theme;
            fixed.push("theme");
        }
        if self.snapshot_file_name.trim().is_empty() {
            self.snapshot_file_name = defaults.snapshot_file_name;
            fixed.push("snapshot_file_name");
        }
        fixed
    }

    pub fn is_dark_theme(&self) -> bool {
        self.theme.eq_ignore_ascii_case("dark")
    }
}
