//! Scrolling camera: maps world coordinates to screen coordinates.

use crate::capabilities::Collidable;
use crate::entities::Rect;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Camera {
    pub offset_x: i32,
    pub offset_y: i32,
    pub viewport_width: i32,
    pub viewport_height: i32,
}

impl Camera {
    pub fn new(viewport_width: i32, viewport_height: i32) -> Self {
        Self {
            offset_x: 0,
            offset_y: 0,
            viewport_width,
            viewport_height,
        }
    }

    /// Snap so the target's box center lands on the viewport center.
    /// No smoothing and no clamping to the level's extents.
    pub fn follow<T: Collidable + ?Sized>(&mut self, target: &T) {
        let (cx, cy) = target.bbox().center();
        self.offset_x = self.viewport_width / 2 - cx;
        self.offset_y = self.viewport_height / 2 - cy;
    }

    /// Screen-space rectangle for an entity.
    pub fn apply<T: Collidable + ?Sized>(&self, entity: &T) -> Rect {
        self.apply_rect(entity.bbox())
    }

    pub fn apply_rect(&self, rect: Rect) -> Rect {
        rect.translated(self.offset_x, self.offset_y)
    }
}
