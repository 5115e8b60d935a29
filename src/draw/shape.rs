//! Device-space primitives handed to a rendering backend.

use image::RgbImage;
use std::cell::RefCell;
use std::rc::{Rc, Weak};

/// Pixel storage shared between an image object and the primitives showing it.
pub type PixelBuffer = Rc<RefCell<RgbImage>>;

/// Live state of an editable text field.
///
/// The buffer is shared with the owning `Entry`, so reads and writes bypass
/// the backend entirely.
#[derive(Debug, Clone)]
pub struct EntryWidget {
    /// Visible width in characters.
    pub chars: u32,
    pub buffer: Rc<RefCell<String>>,
}

/// A drawable primitive in device coordinates.
///
/// Paint attributes (fill, outline, width, font, ...) travel separately as
/// [`Options`](super::options::Options) so they can be reconfigured in place.
#[derive(Debug, Clone)]
pub enum Primitive {
    /// Axis-aligned rectangle between two opposite corners
    Rectangle { x1: f64, y1: f64, x2: f64, y2: f64 },
    /// Ellipse inscribed in the box between two opposite corners
    Oval { x1: f64, y1: f64, x2: f64, y2: f64 },
    /// Straight segment
    Line { x1: f64, y1: f64, x2: f64, y2: f64 },
    /// Closed polygon through the given vertices
    Polygon { points: Vec<(f64, f64)> },
    /// Text label centered on the anchor
    Text { x: f64, y: f64 },
    /// Editable single-line field centered on the anchor
    Entry { x: f64, y: f64, widget: EntryWidget },
    /// Bitmap centered on the anchor. The pixels are only borrowed; whoever
    /// drew the image keeps them alive.
    Image {
        x: f64,
        y: f64,
        pixels: Weak<RefCell<RgbImage>>,
    },
}

impl Primitive {
    /// Shifts the primitive by a device-space delta.
    pub fn translate(&mut self, dx: f64, dy: f64) {
        match self {
            Primitive::Rectangle { x1, y1, x2, y2 }
            | Primitive::Oval { x1, y1, x2, y2 }
            | Primitive::Line { x1, y1, x2, y2 } => {
                *x1 += dx;
                *y1 += dy;
                *x2 += dx;
                *y2 += dy;
            }
            Primitive::Polygon { points } => {
                for (x, y) in points.iter_mut() {
                    *x += dx;
                    *y += dy;
                }
            }
            Primitive::Text { x, y }
            | Primitive::Entry { x, y, .. }
            | Primitive::Image { x, y, .. } => {
                *x += dx;
                *y += dy;
            }
        }
    }

    /// Reference point of the primitive: first corner, first vertex or anchor.
    pub fn origin(&self) -> (f64, f64) {
        match self {
            Primitive::Rectangle { x1, y1, .. }
            | Primitive::Oval { x1, y1, .. }
            | Primitive::Line { x1, y1, .. } => (*x1, *y1),
            Primitive::Polygon { points } => points.first().copied().unwrap_or((0.0, 0.0)),
            Primitive::Text { x, y } | Primitive::Entry { x, y, .. } | Primitive::Image { x, y, .. } => {
                (*x, *y)
            }
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Primitive::Rectangle { .. } => "rectangle",
            Primitive::Oval { .. } => "oval",
            Primitive::Line { .. } => "line",
            Primitive::Polygon { .. } => "polygon",
            Primitive::Text { .. } => "text",
            Primitive::Entry { .. } => "entry",
            Primitive::Image { .. } => "image",
        }
    }
}
