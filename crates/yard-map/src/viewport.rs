//! Pan/zoom transform between screen and world coordinates.
//!
//! `screen = world * zoom + offset`. The renderer applies it as
//! `translate(offset)` followed by `scale(zoom)`.

use serde::{Deserialize, Serialize};

use crate::ZoomLimits;

/// Drawing surface size in screen pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CanvasSize {
    pub width: f64,
    pub height: f64,
}

impl CanvasSize {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Current pan and zoom.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewportState {
    pub zoom: f64,
    pub offset_x: f64,
    pub offset_y: f64,
}

impl Default for ViewportState {
    fn default() -> Self {
        Self {
            zoom: 1.0,
            offset_x: 0.0,
            offset_y: 0.0,
        }
    }
}

impl ViewportState {
    pub fn new(zoom: f64, offset_x: f64, offset_y: f64) -> Self {
        Self {
            zoom,
            offset_x,
            offset_y,
        }
    }

    /// A viewport at `zoom` with world point `(wx, wy)` in the middle of
    /// `size`.
    pub fn centered_on(wx: f64, wy: f64, zoom: f64, size: CanvasSize) -> Self {
        Self {
            zoom,
            offset_x: size.width / 2.0 - wx * zoom,
            offset_y: size.height / 2.0 - wy * zoom,
        }
    }

    pub fn screen_to_world(&self, sx: f64, sy: f64) -> (f64, f64) {
        (
            (sx - self.offset_x) / self.zoom,
            (sy - self.offset_y) / self.zoom,
        )
    }

    pub fn world_to_screen(&self, wx: f64, wy: f64) -> (f64, f64) {
        (
            wx * self.zoom + self.offset_x,
            wy * self.zoom + self.offset_y,
        )
    }

    /// Changes zoom by `delta`, clamped to `limits`, keeping the world
    /// point under `(sx, sy)` fixed on screen.
    ///
    /// If the clamp swallows the whole step the offset is left alone.
    pub fn zoom_at(&mut self, sx: f64, sy: f64, delta: f64, limits: &ZoomLimits) {
        let new_zoom = limits.clamp(self.zoom + delta);
        let ratio = new_zoom / self.zoom;
        self.offset_x -= (sx - self.offset_x) * (ratio - 1.0);
        self.offset_y -= (sy - self.offset_y) * (ratio - 1.0);
        self.zoom = new_zoom;
    }

    pub fn set_offset(&mut self, x: f64, y: f64) {
        self.offset_x = x;
        self.offset_y = y;
    }
}
