//! Retained-mode 2D drawing with world coordinates and polled input.
//!
//! Open a [`Window`] on a [`Graphics`] context, optionally install world
//! coordinates with [`Window::set_coords`], then construct scene objects and
//! [`Drawable::draw`] them. Input is polled: [`Window::get_mouse`] and
//! [`Window::get_key`] block until something arrives, their `check_*`
//! counterparts return immediately.
//!
//! ```no_run
//! use easel::{Circle, Drawable, Graphics, HeadlessBackend, Point, Window};
//!
//! # fn main() -> easel::Result<()> {
//! let ctx = Graphics::new(HeadlessBackend::new());
//! let win = Window::open(&ctx, "My Circle", 100, 100)?;
//! let c = Circle::new(&Point::new(50.0, 50.0), 10.0);
//! c.set_fill("red")?;
//! c.draw(&win)?;
//! let click = win.get_mouse()?;
//! println!("clicked at {click}");
//! win.close();
//! # Ok(())
//! # }
//! ```

pub mod backend;
pub mod config;
pub mod context;
pub mod draw;
pub mod error;
pub mod input;
pub mod scene;
pub mod transform;
pub mod util;
pub mod window;

pub use backend::{Backend, HeadlessBackend, ItemId, SurfaceId};
pub use config::Config;
pub use context::{Graphics, update};
pub use draw::color_rgb;
pub use error::{GraphicsError, Result};
pub use scene::{
    Circle, Drawable, Entry, Graphic, Image, Line, Oval, Point, Polygon, Rectangle, Text,
};
pub use transform::{Position, Transform};
pub use window::Window;
