use super::state::{PendingSnapshot, SnapshotRequest};
use super::CalendarApp;
use crate::services::snapshot::SnapshotImage;
use anyhow::Result;
use egui::{ColorImage, Rect, ViewportCommand};
use std::sync::Arc;
use std::time::Instant;

/// Download and share of the calendar card as a PNG.
///
/// The capture is a viewport screenshot that arrives on a later frame, then
/// gets cropped to the card.
impl CalendarApp {
    pub(super) fn request_snapshot(&mut self, ctx: &egui::Context, request: SnapshotRequest) {
        if self.state.pending_snapshot.is_some() {
            log::debug!("Snapshot already pending, ignoring {}", request.label());
            return;
        }
        log::info!("Capturing calendar for {}", request.label());
        self.state.pending_snapshot = Some(PendingSnapshot::new(request, Instant::now()));
        ctx.send_viewport_cmd(ViewportCommand::Screenshot);
    }

    pub(super) fn handle_screenshot_events(&mut self, ctx: &egui::Context, now: Instant) {
        let Some(pending) = self.state.pending_snapshot else {
            return;
        };
        let request = pending.request;
        let screenshot: Option<Arc<ColorImage>> = ctx.input(|i| {
            i.raw.events.iter().find_map(|event| match event {
                egui::Event::Screenshot { image, .. } => Some(image.clone()),
                _ => None,
            })
        });
        let Some(screenshot) = screenshot else {
            match pending.remaining(now) {
                Some(left) => ctx.request_repaint_after(left),
                None => {
                    log::warn!("No screenshot arrived for {}, giving up", request.label());
                    self.state.pending_snapshot = None;
                    self.toast_manager
                        .error("Could not capture the calendar, please try again");
                }
            }
            return;
        };
        self.state.pending_snapshot = None;

        let crop = self
            .state
            .calendar_rect
            .unwrap_or_else(|| ctx.screen_rect());
        let image = crop_snapshot(&screenshot, crop, ctx.pixels_per_point());

        match request {
            SnapshotRequest::Download => self.deliver_download(image),
            SnapshotRequest::Share => self.deliver_share(image),
        }
    }

    fn deliver_download(&mut self, image: Result<SnapshotImage>) {
        let image = match image {
            Ok(image) => image,
            Err(e) => {
                log::error!("Failed to capture calendar: {:#}", e);
                self.toast_manager.error("Failed to capture calendar");
                return;
            }
        };

        let Some(path) = rfd::FileDialog::new()
            .set_title("Download Calendar")
            .set_file_name(self.settings.snapshot_file_name.as_str())
            .add_filter("PNG image", &["png"])
            .save_file()
        else {
            log::debug!("Snapshot download cancelled");
            return;
        };

        match self.exporter.download(&image, &path) {
            Ok(()) => self.toast_manager.success("Calendar saved"),
            Err(e) => {
                log::error!("Failed to save snapshot: {:#}", e);
                self.toast_manager.error(format!("Failed to save: {}", e));
            }
        }
    }

    fn deliver_share(&mut self, image: Result<SnapshotImage>) {
        let result = image.and_then(|image| self.exporter.share(&image, &self.settings.share_caption));
        match result {
            Ok(path) => self
                .toast_manager
                .info(format!("Image saved to {} for your post", path.display())),
            Err(e) => {
                log::error!("Failed to share snapshot: {:#}", e);
                self.toast_manager.error(format!("Failed to share: {}", e));
            }
        }
    }
}

/// Cut `area` (in points) out of a full-viewport screenshot.
pub(crate) fn crop_snapshot(
    screenshot: &ColorImage,
    area: Rect,
    pixels_per_point: f32,
) -> Result<SnapshotImage> {
    let [width, height] = screenshot.size;
    let bounds = Rect::from_min_size(
        egui::Pos2::ZERO,
        egui::vec2(width as f32, height as f32) / pixels_per_point,
    );
    let area = area.intersect(bounds);
    if !area.is_positive() {
        anyhow::bail!("Calendar is not on screen");
    }

    let region = screenshot.region(&area, Some(pixels_per_point));
    let rgba: Vec<u8> = region
        .pixels
        .iter()
        .flat_map(|pixel| pixel.to_srgba_unmultiplied())
        .collect();
    SnapshotImage::from_rgba(region.size[0] as u32, region.size[1] as u32, rgba)
}
