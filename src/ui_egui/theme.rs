//! Theme module for the calendar UI
//!
//! Defines the CalendarTheme structure and the fill colors of each event
//! color in light and dark mode.

use egui::Color32;

use crate::models::event::EventColor;
use crate::models::settings::Settings;

/// Colors used to draw the calendar surface and its chrome
#[derive(Debug, Clone, PartialEq)]
pub struct CalendarTheme {
    /// Whether this is a dark theme (affects base egui::Visuals)
    pub is_dark: bool,

    /// Application background color
    pub app_background: Color32,

    /// Calendar card background (the captured snapshot area)
    pub calendar_background: Color32,

    /// Border around the calendar card and above the legend
    pub calendar_border: Color32,

    /// Fill of cells in the live drag selection
    pub selection_background: Color32,

    /// Ring drawn around today's day number
    pub today_border: Color32,

    /// Day numbers of the displayed month and headings
    pub text_primary: Color32,

    /// Day numbers of leading/trailing days and weekday initials
    pub text_muted: Color32,

    /// Text drawn on top of capsules and label pills
    pub capsule_text: Color32,
}

impl CalendarTheme {
    /// Create the default Light theme
    pub fn light() -> Self {
        Self {
            is_dark: false,
            app_background: Color32::from_rgb(245, 245, 245),
            calendar_background: Color32::WHITE,
            calendar_border: Color32::from_rgb(228, 228, 231),
            selection_background: Color32::from_rgba_unmultiplied(24, 24, 27, 51),
            today_border: Color32::from_rgb(100, 150, 255),
            text_primary: Color32::from_rgb(40, 40, 40),
            text_muted: Color32::from_rgb(150, 150, 155),
            capsule_text: Color32::from_rgb(40, 40, 40),
        }
    }

    /// Create the default Dark theme
    pub fn dark() -> Self {
        Self {
            is_dark: true,
            app_background: Color32::from_rgb(30, 30, 30),
            calendar_background: Color32::from_rgb(40, 40, 40),
            calendar_border: Color32::from_rgb(63, 63, 70),
            selection_background: Color32::from_rgba_unmultiplied(250, 250, 250, 46),
            today_border: Color32::from_rgb(100, 150, 255),
            text_primary: Color32::from_rgb(240, 240, 240),
            text_muted: Color32::from_rgb(120, 120, 125),
            capsule_text: Color32::from_rgb(30, 30, 30),
        }
    }

    /// Pick the theme from settings. `system_dark` is the detected OS mode,
    /// only consulted when the user follows the system theme.
    pub fn from_settings(settings: &Settings, system_dark: Option<bool>) -> Self {
        let dark = match (settings.use_system_theme, system_dark) {
            (true, Some(dark)) => dark,
            _ => settings.is_dark_theme(),
        };
        if dark {
            Self::dark()
        } else {
            Self::light()
        }
    }

    /// Capsule, label pill and legend swatch fill for `color`
    pub fn event_fill(&self, color: EventColor) -> Color32 {
        let light = match color {
            EventColor::Red => Color32::from_rgb(254, 202, 202),
            EventColor::Yellow => Color32::from_rgb(254, 240, 138),
            EventColor::Green => Color32::from_rgb(187, 247, 208),
            EventColor::Blue => Color32::from_rgb(191, 219, 254),
            EventColor::Purple => Color32::from_rgb(233, 213, 255),
            EventColor::Pink => Color32::from_rgb(251, 207, 232),
        };
        if self.is_dark {
            // Slightly dimmed so pastel pills don't glare on the dark card
            let dim = |c: u8| (c as f32 * 0.85).round() as u8;
            Color32::from_rgb(dim(light.r()), dim(light.g()), dim(light.b()))
        } else {
            light
        }
    }

    /// Saturated variant of `color` for leader lines and swatch borders
    pub fn event_accent(&self, color: EventColor) -> Color32 {
        match color {
            EventColor::Red => Color32::from_rgb(239, 68, 68),
            EventColor::Yellow => Color32::from_rgb(234, 179, 8),
            EventColor::Green => Color32::from_rgb(34, 197, 94),
            EventColor::Blue => Color32::from_rgb(59, 130, 246),
            EventColor::Purple => Color32::from_rgb(168, 85, 247),
            EventColor::Pink => Color32::from_rgb(236, 72, 153),
        }
    }

    /// Apply this theme to an egui context
    pub fn apply_to_context(&self, ctx: &egui::Context) {
        let mut visuals = if self.is_dark {
            egui::Visuals::dark()
        } else {
            egui::Visuals::light()
        };

        visuals.window_fill = self.calendar_background;
        visuals.panel_fill = self.app_background;
        visuals.selection.bg_fill = self.today_border;
        visuals.override_text_color = Some(self.text_primary);

        ctx.set_visuals(visuals);
    }
}
