// Capsule Calendar
// Main entry point

use capsule_calendar::ui_egui::CalendarApp;

fn main() -> eframe::Result<()> {
    // Initialize logging
    env_logger::init();

    log::info!("Starting Capsule Calendar");

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Capsule Calendar")
            .with_inner_size([900.0, 780.0])
            .with_min_inner_size([640.0, 560.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Capsule Calendar",
        options,
        Box::new(|cc| Ok(Box::new(CalendarApp::new(cc)))),
    )
}
