//! Rendering backend capability interface.
//!
//! Windows and scene objects never touch a platform toolkit directly; they
//! go through the narrow [`Backend`] trait. [`HeadlessBackend`] is the
//! bundled implementation: an off-screen Cairo surface per window with a
//! scripted input feed.

use crate::draw::{Options, Primitive};
use crate::error::Result;
use crate::input::InputEvent;

pub mod headless;

pub use headless::HeadlessBackend;

/// Identifier of a top-level drawing surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SurfaceId(pub u64);

/// Identifier of a primitive placed on a surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ItemId(pub u64);

/// Operations a rendering backend provides.
///
/// All calls happen on the thread that owns the `Graphics` context.
pub trait Backend {
    /// Creates a top-level surface of the given pixel size.
    fn create_surface(&mut self, title: &str, width: u32, height: u32) -> Result<SurfaceId>;

    /// Destroys a surface and everything on it. Unknown ids are ignored.
    fn destroy_surface(&mut self, surface: SurfaceId);

    fn set_background(&mut self, surface: SurfaceId, color: &str) -> Result<()>;

    /// Places a primitive on top of the surface's existing items.
    fn create_item(
        &mut self,
        surface: SurfaceId,
        primitive: Primitive,
        options: &Options,
    ) -> Result<ItemId>;

    fn delete_item(&mut self, surface: SurfaceId, item: ItemId);

    /// Translates an item by a device-space delta.
    fn move_item(&mut self, surface: SurfaceId, item: ItemId, dx: f64, dy: f64);

    /// Replaces an item's paint options.
    fn configure_item(&mut self, surface: SurfaceId, item: ItemId, options: &Options);

    /// Realises pending drawing on the surface without processing input.
    fn flush(&mut self, surface: SurfaceId) -> Result<()>;

    /// Processes pending platform events and returns the input for the caller
    /// to route.
    fn dispatch(&mut self) -> Vec<InputEvent>;
}
