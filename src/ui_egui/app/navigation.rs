use super::CalendarApp;
use crate::services::layout::GridLayoutEngine;
use crate::utils::date::{first_of_month, shift_month};
use chrono::{Local, NaiveDate};

impl CalendarApp {
    pub(super) fn navigate_previous(&mut self) {
        self.show_month(shift_month(self.current_month, -1));
    }

    pub(super) fn navigate_next(&mut self) {
        self.show_month(shift_month(self.current_month, 1));
    }

    pub(super) fn jump_to_today(&mut self) {
        self.show_month(Local::now().date_naive());
    }

    /// Switch the grid to the month of `date`. Any drag in progress is
    /// abandoned; an open dialog stays.
    fn show_month(&mut self, date: NaiveDate) {
        if self.interaction.cancel() {
            log::debug!("Navigation cancelled an in-progress drag");
        }
        self.current_month = first_of_month(date);
        self.refresh_grid();
    }

    pub(super) fn set_first_day_of_week(&mut self, first_day_of_week: u8) {
        if self.settings.first_day_of_week == first_day_of_week {
            return;
        }
        self.interaction.cancel();
        self.settings.first_day_of_week = first_day_of_week;
        self.refresh_grid();
        self.save_settings();
    }

    pub(super) fn refresh_grid(&mut self) {
        self.engine = GridLayoutEngine::new(self.settings.first_day_of_week);
        self.grid = self.engine.month_grid(self.current_month);
    }
}
