use crate::models::event::EventColor;
use crate::ui_egui::theme::CalendarTheme;
use egui::Color32;

fn with_alpha(color: Color32, alpha: u8) -> Color32 {
    Color32::from_rgba_unmultiplied(color.r(), color.g(), color.b(), alpha)
}

pub(crate) fn blend(a: Color32, b: Color32, t: f32) -> Color32 {
    let t = t.clamp(0.0, 1.0);
    let lerp = |c1: u8, c2: u8| -> u8 { ((c1 as f32 * (1.0 - t)) + (c2 as f32 * t)).round() as u8 };
    Color32::from_rgb(lerp(a.r(), b.r()), lerp(a.g(), b.g()), lerp(a.b(), b.b()))
}

#[derive(Clone, Copy)]
pub(crate) struct MonthGridPalette {
    pub header_text: Color32,
    pub day_text: Color32,
    pub outside_day_text: Color32,
    pub selection_bg: Color32,
    pub today_ring: Color32,
}

impl MonthGridPalette {
    pub fn from_theme(theme: &CalendarTheme) -> Self {
        Self {
            header_text: theme.text_primary,
            day_text: theme.text_primary,
            outside_day_text: theme.text_muted,
            selection_bg: theme.selection_background,
            today_ring: theme.today_border,
        }
    }
}

/// Colors for one event's capsules, label pill and leader line
#[derive(Clone, Copy)]
pub(crate) struct CapsulePalette {
    pub fill: Color32,
    /// Fill while the legend entry of the event is hovered
    pub pulse_fill: Color32,
    /// Fill of the floating preview during a reposition drag
    pub ghost_fill: Color32,
    pub accent: Color32,
    pub text: Color32,
}

impl CapsulePalette {
    pub fn for_event(theme: &CalendarTheme, color: EventColor) -> Self {
        let fill = theme.event_fill(color);
        let accent = theme.event_accent(color);
        Self {
            fill,
            pulse_fill: blend(fill, accent, 0.35),
            ghost_fill: with_alpha(fill, 150),
            accent,
            text: theme.capsule_text,
        }
    }
}
