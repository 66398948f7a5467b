//! Brief feedback after an event is saved or a snapshot is delivered.
//!
//! Toasts never block input and fade out on their own.

use crate::ui_egui::theme::CalendarTheme;
use egui::{Align2, Color32, Context, RichText};
use std::time::{Duration, Instant};

const TOAST_WIDTH: f32 = 320.0;
const FADE_OUT: Duration = Duration::from_millis(500);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Success,
    Info,
    Error,
}

impl ToastLevel {
    fn icon(self) -> &'static str {
        match self {
            ToastLevel::Success => "✓",
            ToastLevel::Info => "ℹ",
            ToastLevel::Error => "✗",
        }
    }

    /// How long a toast of this level stays up. Errors usually carry a path
    /// or reason worth reading.
    fn lifetime(self) -> Duration {
        match self {
            ToastLevel::Error => Duration::from_secs(6),
            ToastLevel::Success | ToastLevel::Info => Duration::from_secs(3),
        }
    }

    /// Accent used for the icon and border
    fn accent(self, theme: &CalendarTheme) -> Color32 {
        match (self, theme.is_dark) {
            (ToastLevel::Success, false) => Color32::from_rgb(22, 128, 61),
            (ToastLevel::Success, true) => Color32::from_rgb(74, 222, 128),
            (ToastLevel::Info, _) => theme.today_border,
            (ToastLevel::Error, false) => Color32::from_rgb(185, 28, 28),
            (ToastLevel::Error, true) => Color32::from_rgb(248, 113, 113),
        }
    }
}

#[derive(Debug, Clone)]
struct Toast {
    message: String,
    level: ToastLevel,
    shown_at: Instant,
}

impl Toast {
    fn expires_at(&self) -> Instant {
        self.shown_at + self.level.lifetime()
    }

    fn is_expired_at(&self, now: Instant) -> bool {
        now >= self.expires_at()
    }

    /// 1.0 until the last half second, then linear down to 0.0
    fn opacity_at(&self, now: Instant) -> f32 {
        let left = self.expires_at().saturating_duration_since(now);
        (left.as_secs_f32() / FADE_OUT.as_secs_f32()).clamp(0.0, 1.0)
    }
}

#[derive(Debug, Default)]
pub struct ToastManager {
    toasts: Vec<Toast>,
}

impl ToastManager {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&mut self, level: ToastLevel, message: impl Into<String>, now: Instant) {
        self.toasts.push(Toast {
            message: message.into(),
            level,
            shown_at: now,
        });
    }

    pub fn success(&mut self, message: impl Into<String>) {
        self.push(ToastLevel::Success, message, Instant::now());
    }

    pub fn info(&mut self, message: impl Into<String>) {
        self.push(ToastLevel::Info, message, Instant::now());
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.push(ToastLevel::Error, message, Instant::now());
    }

    pub fn cleanup(&mut self, now: Instant) {
        self.toasts.retain(|toast| !toast.is_expired_at(now));
    }

    /// Draw the live toasts centered above the bottom edge, newest lowest.
    pub fn render(&mut self, ctx: &Context, theme: &CalendarTheme, now: Instant) {
        self.cleanup(now);
        let Some(next_expiry) = self.toasts.iter().map(Toast::expires_at).min() else {
            return;
        };
        // Keep animating while a toast is fading, otherwise wake at the next change
        let fading = self.toasts.iter().any(|toast| toast.opacity_at(now) < 1.0);
        if fading {
            ctx.request_repaint();
        } else {
            let until_fade = next_expiry.saturating_duration_since(now).saturating_sub(FADE_OUT);
            ctx.request_repaint_after(until_fade);
        }

        let mut offset = -16.0;
        for (i, toast) in self.toasts.iter().enumerate().rev() {
            let opacity = toast.opacity_at(now);
            let accent = toast.level.accent(theme);

            let area = egui::Area::new(egui::Id::new(("toast", i)))
                .anchor(Align2::CENTER_BOTTOM, egui::vec2(0.0, offset))
                .order(egui::Order::Foreground)
                .interactable(false)
                .show(ctx, |ui| {
                    ui.set_opacity(opacity);
                    egui::Frame::none()
                        .fill(theme.calendar_background)
                        .stroke(egui::Stroke::new(1.5, accent))
                        .rounding(8.0)
                        .inner_margin(egui::Margin::symmetric(14.0, 10.0))
                        .show(ui, |ui| {
                            ui.set_width(TOAST_WIDTH);
                            ui.horizontal(|ui| {
                                ui.label(RichText::new(toast.level.icon()).color(accent).strong());
                                ui.label(RichText::new(&toast.message).color(theme.text_primary));
                            });
                        });
                });
            offset -= area.response.rect.height() + 6.0;
        }
    }
}
