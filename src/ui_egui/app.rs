mod dialogs;
mod lifecycle;
mod navigation;
mod shortcuts;
mod snapshot;
mod state;
mod toast;
mod views;

use self::state::AppState;
use self::toast::ToastManager;
use crate::models::grid::MonthGrid;
use crate::models::settings::Settings;
use crate::services::event::EventStore;
use crate::services::layout::GridLayoutEngine;
use crate::services::settings::SettingsService;
use crate::services::snapshot::SnapshotExporter;
use crate::ui_egui::interaction::Interaction;
use crate::ui_egui::theme::CalendarTheme;
use chrono::NaiveDate;

pub struct CalendarApp {
    /// User preferences; `None` service means they are not persisted
    settings: Settings,
    settings_service: Option<SettingsService>,
    /// Events of this session
    store: EventStore,
    engine: GridLayoutEngine,
    /// First day of the displayed month
    current_month: NaiveDate,
    grid: MonthGrid,
    interaction: Interaction,
    /// Currently applied theme colors
    active_theme: CalendarTheme,
    exporter: SnapshotExporter,
    toast_manager: ToastManager,
    state: AppState,
}

impl eframe::App for CalendarApp {
    fn update(&mut self, ctx: &egui::Context, frame: &mut eframe::Frame) {
        self.handle_update(ctx, frame);
    }
}
