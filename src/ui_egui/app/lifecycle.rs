use super::state::AppState;
use super::toast::ToastManager;
use super::CalendarApp;
use crate::models::settings::Settings;
use crate::services::event::EventStore;
use crate::services::layout::GridLayoutEngine;
use crate::services::settings::SettingsService;
use crate::services::snapshot::SnapshotExporter;
use crate::ui_egui::interaction::Interaction;
use crate::ui_egui::theme::CalendarTheme;
use crate::utils::date::first_of_month;
use chrono::Local;
use std::time::{Duration, Instant};

impl CalendarApp {
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let settings_service = match SettingsService::from_project_dirs() {
            Ok(service) => Some(service),
            Err(e) => {
                log::warn!("Settings will not be saved: {:#}", e);
                None
            }
        };
        let settings = settings_service
            .as_ref()
            .map(load_settings_or_default)
            .unwrap_or_default();
        log::info!(
            "Loaded settings: theme={}, first_day_of_week={}, long_press_ms={}",
            settings.theme,
            settings.first_day_of_week,
            settings.long_press_ms
        );

        let engine = GridLayoutEngine::new(settings.first_day_of_week);
        let current_month = first_of_month(Local::now().date_naive());
        let interaction = Interaction::new(Duration::from_millis(settings.long_press_ms));

        let mut app = Self {
            grid: engine.month_grid(current_month),
            engine,
            current_month,
            store: EventStore::new(),
            interaction,
            active_theme: CalendarTheme::light(),
            exporter: SnapshotExporter::with_default_target(),
            settings_service,
            settings,
            toast_manager: ToastManager::new(),
            state: AppState::default(),
        };

        app.apply_theme(&cc.egui_ctx);
        app
    }

    pub(super) fn apply_theme(&mut self, ctx: &egui::Context) {
        // If use_system_theme is enabled, detect and use system preference
        let system_dark = if self.settings.use_system_theme {
            match dark_light::detect() {
                dark_light::Mode::Dark => Some(true),
                dark_light::Mode::Light => Some(false),
                dark_light::Mode::Default => None,
            }
        } else {
            None
        };

        let theme = CalendarTheme::from_settings(&self.settings, system_dark);
        theme.apply_to_context(ctx);
        self.active_theme = theme;
    }

    pub(super) fn save_settings(&mut self) {
        let Some(service) = &self.settings_service else {
            return;
        };
        if let Err(e) = service.update(&self.settings) {
            log::error!("Failed to save settings: {:#}", e);
            self.toast_manager.error("Failed to save settings");
        }
    }

    pub(super) fn handle_update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = Instant::now();

        self.handle_keyboard_shortcuts(ctx);

        // Promote a held press to a drag even when the pointer is still
        if self.interaction.tick(now) {
            ctx.request_repaint();
        } else if let Some(remaining) = self.interaction.long_press_remaining(now) {
            ctx.request_repaint_after(remaining);
        }

        self.handle_screenshot_events(ctx, now);

        self.render_main_panel(ctx, now);
        self.render_dialog(ctx);

        // Last, so they appear on top
        self.toast_manager.render(ctx, &self.active_theme, now);
    }
}

fn load_settings_or_default(settings_service: &SettingsService) -> Settings {
    match settings_service.get() {
        Ok(settings) => settings,
        Err(e) => {
            log::warn!("Failed to load settings: {:#}, using defaults", e);
            Settings::default()
        }
    }
}
