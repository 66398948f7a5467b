use crate::models::event::EventId;
use std::time::{Duration, Instant};

/// How long to wait for the viewport to deliver a requested screenshot
pub const SNAPSHOT_TIMEOUT: Duration = Duration::from_secs(5);

/// What to do with the next viewport screenshot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapshotRequest {
    /// Ask for a path and save the PNG there
    Download,
    /// Save to the share folder and open the share composer
    Share,
}

impl SnapshotRequest {
    pub fn label(&self) -> &'static str {
        match self {
            SnapshotRequest::Download => "download",
            SnapshotRequest::Share => "share",
        }
    }
}

/// Screenshot requested and not yet received
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingSnapshot {
    pub request: SnapshotRequest,
    pub requested_at: Instant,
}

impl PendingSnapshot {
    pub fn new(request: SnapshotRequest, now: Instant) -> Self {
        Self {
            request,
            requested_at: now,
        }
    }

    /// Time left before the request is given up; `None` once overdue
    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        SNAPSHOT_TIMEOUT
            .checked_sub(now.saturating_duration_since(self.requested_at))
            .filter(|left| !left.is_zero())
    }
}

#[derive(Debug, Default)]
pub struct AppState {
    pub pending_snapshot: Option<PendingSnapshot>,
    /// Screen area of the calendar card from the last frame, in points
    pub calendar_rect: Option<egui::Rect>,
    /// Legend entry under the pointer last frame
    pub hovered_legend: Option<EventId>,
}
