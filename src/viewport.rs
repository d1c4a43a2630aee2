#[cfg(test)]
#[path = "viewport_test.rs"]
mod viewport_test;

use serde::{Deserialize, Serialize};

/// A point in either screen (surface pixels) or world (pitch units) space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub fn offset(self, delta: Point) -> Self {
        Self { x: self.x + delta.x, y: self.y + delta.y }
    }

    #[must_use]
    pub fn distance(self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    #[must_use]
    pub fn midpoint(self, other: Point) -> Self {
        Self { x: (self.x + other.x) * 0.5, y: (self.y + other.y) * 0.5 }
    }
}

/// Pan/zoom state mapping pitch units to surface pixels.
///
/// `offset_x` / `offset_y` are in surface pixels.
/// `scale` is a uniform zoom factor (1.0 = one pixel per pitch unit).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub scale: f64,
    pub offset_x: f64,
    pub offset_y: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self { scale: 1.0, offset_x: 0.0, offset_y: 0.0 }
    }
}

impl Viewport {
    /// Convert a world-space point to surface pixels.
    #[must_use]
    pub fn to_screen(&self, world: Point) -> Point {
        Point {
            x: world.x * self.scale + self.offset_x,
            y: world.y * self.scale + self.offset_y,
        }
    }

    /// Convert a surface-pixel point to world coordinates.
    #[must_use]
    pub fn to_world(&self, screen: Point) -> Point {
        Point {
            x: (screen.x - self.offset_x) / self.scale,
            y: (screen.y - self.offset_y) / self.scale,
        }
    }

    /// Convert a pixel delta to a world-space delta. Offsets cancel out.
    #[must_use]
    pub fn screen_delta_to_world(&self, delta: Point) -> Point {
        Point { x: delta.x / self.scale, y: delta.y / self.scale }
    }

    /// Translate by a pixel delta, independent of scale.
    pub fn pan(&mut self, delta: Point) {
        self.offset_x += delta.x;
        self.offset_y += delta.y;
    }

    /// Add `step` to the scale and clamp to `[min, max]`.
    ///
    /// Zoom is anchored at the surface origin, not the pointer: offsets are
    /// left as they are.
    pub fn zoom_by(&mut self, step: f64, min: f64, max: f64) {
        self.scale = (self.scale + step).clamp(min, max);
    }

    /// Restore identity scale and zero offset.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Set the offset so `world` is drawn at `anchor` (surface pixels) at the current scale.
    pub fn focus(&mut self, world: Point, anchor: Point) {
        self.offset_x = anchor.x - world.x * self.scale;
        self.offset_y = anchor.y - world.y * self.scale;
    }
}
