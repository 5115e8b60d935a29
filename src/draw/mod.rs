//! Rendering vocabulary and the Cairo rasteriser.
//!
//! This module defines the device-space side of drawing:
//! - [`Color`]: resolution of textual color specifiers, plus [`color_rgb`]
//! - [`FontDescriptor`]: the (face, size, style) triple used by text objects
//! - [`Options`]: per-object configuration and the per-variant capability table
//! - [`Primitive`]: what a backend is asked to put on a surface
//! - [`Frame`]: ordered display list of a surface
//! - Rendering functions for Cairo-based output

pub mod color;
pub mod font;
pub mod frame;
pub mod options;
pub mod render;
pub mod shape;

pub use color::{Color, color_rgb};
pub use font::{FontDescriptor, FontFace, FontStyle};
pub use frame::{CanvasItem, Frame};
pub use options::{ArrowMode, Justify, Kind, OptionKey, OptionValue, Options};
pub use render::{render_frame, render_item};
pub use shape::{EntryWidget, PixelBuffer, Primitive};
