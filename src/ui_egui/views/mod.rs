pub mod grid_geometry;
pub mod month_view;
mod palette;

pub use month_view::{MonthView, MonthViewInput, MonthViewResponse};
