//! World-to-device coordinate mapping.
//!
//! A window without a [`Transform`] uses device pixels directly. Installing one
//! (see `Window::set_coords`) maps a world rectangle onto the window so that
//! `(x1, y1)` lands in the lower-left pixel and `(x2, y2)` in the upper-right
//! one. World y grows upward, device y grows downward.

use std::fmt;

/// A location in world space.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Returns this position shifted by `(dx, dy)`.
    pub fn offset(self, dx: f64, dy: f64) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Point({:?}, {:?})", self.x, self.y)
    }
}

/// Immutable mapping between world coordinates and device pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    xbase: f64,
    ybase: f64,
    xscale: f64,
    yscale: f64,
}

impl Transform {
    /// Builds the mapping for a `width` x `height` pixel window showing the
    /// world rectangle `(x1, y1)`-`(x2, y2)`.
    ///
    /// Both dimensions must be greater than one pixel; a one-pixel axis has no
    /// span to divide by.
    pub fn new(width: u32, height: u32, x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        debug_assert!(width > 1 && height > 1, "transform needs at least 2x2 pixels");
        Self {
            xbase: x1,
            ybase: y2,
            xscale: (x2 - x1) / f64::from(width.saturating_sub(1)),
            yscale: (y2 - y1) / f64::from(height.saturating_sub(1)),
        }
    }

    /// World units per device pixel along x.
    pub fn xscale(&self) -> f64 {
        self.xscale
    }

    /// World units per device pixel along y.
    pub fn yscale(&self) -> f64 {
        self.yscale
    }

    /// Maps a world coordinate to the nearest device pixel.
    pub fn screen(&self, x: f64, y: f64) -> (i32, i32) {
        let xs = (x - self.xbase) / self.xscale;
        let ys = (self.ybase - y) / self.yscale;
        ((xs + 0.5).floor() as i32, (ys + 0.5).floor() as i32)
    }

    /// Maps a device pixel back to world coordinates.
    pub fn world(&self, xs: f64, ys: f64) -> (f64, f64) {
        (xs * self.xscale + self.xbase, self.ybase - ys * self.yscale)
    }

    /// Converts a world-space displacement into device units.
    pub fn device_delta(&self, dx: f64, dy: f64) -> (f64, f64) {
        (dx / self.xscale, -dy / self.yscale)
    }
}

/// Projects a world position to device coordinates, treating a missing
/// transform as the identity.
pub(crate) fn project(transform: Option<&Transform>, pos: Position) -> (f64, f64) {
    match transform {
        Some(t) => {
            let (xs, ys) = t.screen(pos.x, pos.y);
            (f64::from(xs), f64::from(ys))
        }
        None => (pos.x, pos.y),
    }
}
