//! Screen-space geometry of the 6x7 day grid.

use egui::{Pos2, Rect, Vec2};

use crate::models::grid::{column_of, row_of, CapsuleSegment, GRID_CELLS, GRID_COLUMNS, GRID_ROWS};

/// Capsule lanes drawn per row before extra events share the last lane
pub const MAX_VISIBLE_LANES: usize = 3;

/// Gap between a capsule and its cell edges
const CAPSULE_INSET: f32 = 3.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridGeometry {
    rect: Rect,
    cell_size: Vec2,
}

impl GridGeometry {
    /// Geometry filling `rect` with the day cells (weekday header excluded)
    pub fn new(rect: Rect) -> Self {
        Self {
            rect,
            cell_size: Vec2::new(
                rect.width() / GRID_COLUMNS as f32,
                rect.height() / GRID_ROWS as f32,
            ),
        }
    }

    pub fn rect(&self) -> Rect {
        self.rect
    }

    pub fn cell_rect(&self, index: usize) -> Rect {
        let min = self.rect.min
            + Vec2::new(
                column_of(index) as f32 * self.cell_size.x,
                row_of(index) as f32 * self.cell_size.y,
            );
        Rect::from_min_size(min, self.cell_size)
    }

    pub fn cell_center(&self, row: usize, column: usize) -> Pos2 {
        self.cell_rect(row * GRID_COLUMNS + column).center()
    }

    /// Grid index under `pos`, if any
    pub fn hit_index(&self, pos: Pos2) -> Option<usize> {
        if !self.rect.contains(pos) || self.cell_size.x <= 0.0 || self.cell_size.y <= 0.0 {
            return None;
        }
        let offset = pos - self.rect.min;
        let column = ((offset.x / self.cell_size.x) as usize).min(GRID_COLUMNS - 1);
        let row = ((offset.y / self.cell_size.y) as usize).min(GRID_ROWS - 1);
        let index = row * GRID_COLUMNS + column;
        (index < GRID_CELLS).then_some(index)
    }

    /// Rect of a capsule piece. A row with one lane fills the whole cell
    /// height; more lanes split it evenly.
    pub fn capsule_rect(&self, segment: &CapsuleSegment, lane: usize, lanes_in_row: usize) -> Rect {
        let lanes = lanes_in_row.clamp(1, MAX_VISIBLE_LANES);
        let lane = lane.min(lanes - 1);

        let start = self.cell_rect(segment.start_index());
        let end = self.cell_rect(segment.end_index());
        let band = Rect::from_min_max(start.min, end.max).shrink(CAPSULE_INSET);
        let lane_height = band.height() / lanes as f32;

        let top = band.top() + lane as f32 * lane_height;
        Rect::from_min_max(
            Pos2::new(band.left(), top),
            Pos2::new(band.right(), top + lane_height),
        )
        .shrink2(Vec2::new(0.0, if lanes > 1 { 1.0 } else { 0.0 }))
    }
}
