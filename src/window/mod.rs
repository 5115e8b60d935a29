//! Top-level drawing windows.
//!
//! A [`Window`] owns one backend surface, the optional world-coordinate
//! [`Transform`], the list of objects currently drawn on it (in z-order) and
//! the input state consumed by the polling queries in [`input`].
//!
//! Windows move one way from open to closed. Every mutating operation on a
//! closed window fails with [`GraphicsError::ClosedWindow`]; closing twice is
//! harmless.

pub mod input;

#[cfg(test)]
mod tests;

use crate::Graphics;
use crate::backend::{ItemId, SurfaceId};
use crate::draw::{Options, Primitive};
use crate::error::{GraphicsError, Result};
use crate::scene::{Graphic, Point};
use crate::transform::Transform;
use log::{debug, info, warn};
use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

pub(crate) struct WindowState {
    closed: bool,
    /// Drawn objects, bottom to top.
    items: Vec<Graphic>,
    transform: Option<Transform>,
    /// Last unconsumed left click, device coordinates.
    mouse: Option<(i32, i32)>,
    /// Last unconsumed key, as a keysym.
    last_key: Option<String>,
    mouse_handler: Option<Box<dyn FnMut(Point)>>,
}

pub(crate) struct WindowInner {
    ctx: Graphics,
    surface: SurfaceId,
    title: String,
    width: u32,
    height: u32,
    autoflush: bool,
    state: RefCell<WindowState>,
}

impl Drop for WindowInner {
    fn drop(&mut self) {
        if !self.state.get_mut().closed {
            debug!("Window '{}' dropped while open; releasing surface", self.title);
            self.ctx.release_surface(self.surface);
        }
    }
}

/// A top-level drawing window.
///
/// `Window` is a handle: clones refer to the same window.
#[derive(Clone)]
pub struct Window {
    inner: Rc<WindowInner>,
}

impl Window {
    /// Opens a window using the context's configured autoflush setting.
    pub fn open(ctx: &Graphics, title: &str, width: u32, height: u32) -> Result<Self> {
        Self::open_with(ctx, title, width, height, ctx.config().window.autoflush)
    }

    /// Opens a window with explicit autoflush behaviour.
    ///
    /// With autoflush enabled every drawing change pumps the frame loop once.
    pub fn open_with(
        ctx: &Graphics,
        title: &str,
        width: u32,
        height: u32,
        autoflush: bool,
    ) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(GraphicsError::InvalidSize { width, height });
        }

        let surface = ctx.with_backend(|backend| backend.create_surface(title, width, height))?;
        let background = ctx.config().window.background.clone();
        if background != "white" {
            ctx.with_backend(|backend| backend.set_background(surface, &background))?;
        }

        let window = Window {
            inner: Rc::new(WindowInner {
                ctx: ctx.clone(),
                surface,
                title: title.to_string(),
                width,
                height,
                autoflush,
                state: RefCell::new(WindowState {
                    closed: false,
                    items: Vec::new(),
                    transform: None,
                    mouse: None,
                    last_key: None,
                    mouse_handler: None,
                }),
            }),
        };
        ctx.register_window(surface, Rc::downgrade(&window.inner));
        info!("Opened window '{}' ({}x{})", title, width, height);

        window.autoflush();
        Ok(window)
    }

    /// Opens a window with the title, size and autoflush from the context's
    /// configuration.
    pub fn from_config(ctx: &Graphics) -> Result<Self> {
        let config = &ctx.config().window;
        Self::open_with(
            ctx,
            &config.title,
            config.width,
            config.height,
            config.autoflush,
        )
    }

    pub(crate) fn from_inner(inner: Rc<WindowInner>) -> Self {
        Self { inner }
    }

    pub(crate) fn downgrade(&self) -> Weak<WindowInner> {
        Rc::downgrade(&self.inner)
    }

    /// Closes the window. Closing an already closed window does nothing.
    pub fn close(&self) {
        if self.shut() && self.inner.autoflush {
            self.inner.ctx.update(None);
        }
    }

    /// Transitions to closed and releases the surface without pumping.
    /// Returns false if the window was already closed.
    pub(crate) fn shut(&self) -> bool {
        {
            let mut state = self.inner.state.borrow_mut();
            if state.closed {
                return false;
            }
            state.closed = true;
        }
        self.inner.ctx.release_surface(self.inner.surface);
        info!("Closed window '{}'", self.inner.title);
        true
    }

    pub fn is_closed(&self) -> bool {
        self.inner.state.borrow().closed
    }

    pub fn is_open(&self) -> bool {
        !self.is_closed()
    }

    fn check_open(&self) -> Result<()> {
        if self.is_closed() {
            Err(GraphicsError::ClosedWindow("window is closed"))
        } else {
            Ok(())
        }
    }

    pub fn set_background(&self, color: &str) -> Result<()> {
        self.check_open()?;
        let surface = self.inner.surface;
        self.inner
            .ctx
            .with_backend(|backend| backend.set_background(surface, color))?;
        self.autoflush();
        Ok(())
    }

    /// Installs world coordinates: `(x1, y1)` is the lower-left corner and
    /// `(x2, y2)` the upper-right. Every drawn object is redrawn under the
    /// new mapping.
    pub fn set_coords(&self, x1: f64, y1: f64, x2: f64, y2: f64) -> Result<()> {
        self.check_open()?;
        let (width, height) = (self.inner.width, self.inner.height);
        if width < 2 || height < 2 {
            return Err(GraphicsError::InvalidSize { width, height });
        }
        let transform = Transform::new(width, height, x1, y1, x2, y2);
        self.inner.state.borrow_mut().transform = Some(transform);
        self.redraw()
    }

    fn redraw(&self) -> Result<()> {
        let items: Vec<Graphic> = self
            .inner
            .state
            .borrow()
            .items
            .iter()
            .map(Graphic::share)
            .collect();
        debug!("Redrawing {} item(s) in '{}'", items.len(), self.inner.title);
        for item in &items {
            item.undraw();
            item.draw(self)?;
        }
        self.inner.ctx.update(None);
        Ok(())
    }

    /// Plots a single pixel at world coordinates.
    pub fn plot(&self, x: f64, y: f64, color: &str) -> Result<()> {
        self.check_open()?;
        let (xs, ys) = self.to_screen(x, y);
        self.plot_device(xs, ys, color)
    }

    /// Plots a single pixel at device coordinates, ignoring any transform.
    pub fn plot_pixel(&self, x: f64, y: f64, color: &str) -> Result<()> {
        self.check_open()?;
        self.plot_device(x, y, color)
    }

    fn plot_device(&self, x: f64, y: f64, color: &str) -> Result<()> {
        let color = if color.is_empty() { "black" } else { color };
        self.create_item(
            Primitive::Line {
                x1: x,
                y1: y,
                x2: x + 1.0,
                y2: y,
            },
            &Options::stroke(color),
        )?;
        self.autoflush();
        Ok(())
    }

    /// Realises pending drawing without processing input.
    pub fn flush(&self) -> Result<()> {
        self.check_open()?;
        let surface = self.inner.surface;
        self.inner.ctx.with_backend(|backend| backend.flush(surface))
    }

    pub fn get_width(&self) -> u32 {
        self.inner.width
    }

    pub fn get_height(&self) -> u32 {
        self.inner.height
    }

    pub fn title(&self) -> &str {
        &self.inner.title
    }

    pub fn autoflush_enabled(&self) -> bool {
        self.inner.autoflush
    }

    pub fn surface(&self) -> SurfaceId {
        self.inner.surface
    }

    pub fn context(&self) -> &Graphics {
        &self.inner.ctx
    }

    pub fn transform(&self) -> Option<Transform> {
        self.inner.state.borrow().transform
    }

    /// World to device coordinates (identity without a transform).
    pub fn to_screen(&self, x: f64, y: f64) -> (f64, f64) {
        match self.transform() {
            Some(t) => {
                let (xs, ys) = t.screen(x, y);
                (f64::from(xs), f64::from(ys))
            }
            None => (x, y),
        }
    }

    /// Device to world coordinates (identity without a transform).
    pub fn to_world(&self, x: f64, y: f64) -> (f64, f64) {
        match self.transform() {
            Some(t) => t.world(x, y),
            None => (x, y),
        }
    }

    /// Number of objects currently drawn in this window.
    pub fn item_count(&self) -> usize {
        self.inner.state.borrow().items.len()
    }

    /// Whether `graphic` is registered as drawn in this window.
    pub fn contains(&self, graphic: &Graphic) -> bool {
        self.inner
            .state
            .borrow()
            .items
            .iter()
            .any(|g| g.same(graphic))
    }

    pub(crate) fn add_item(&self, graphic: Graphic) {
        self.inner.state.borrow_mut().items.push(graphic);
    }

    pub(crate) fn del_item(&self, graphic: &Graphic) {
        let mut state = self.inner.state.borrow_mut();
        if let Some(index) = state.items.iter().position(|g| g.same(graphic)) {
            state.items.remove(index);
        } else {
            warn!("Undrawn object was not registered with '{}'", self.inner.title);
        }
    }

    /// Pumps the frame loop once if autoflush is on.
    pub(crate) fn autoflush(&self) {
        if self.inner.autoflush {
            self.inner.ctx.update(None);
        }
    }

    pub(crate) fn create_item(&self, primitive: Primitive, options: &Options) -> Result<ItemId> {
        let surface = self.inner.surface;
        self.inner
            .ctx
            .with_backend(|backend| backend.create_item(surface, primitive, options))
    }

    pub(crate) fn delete_item(&self, item: ItemId) {
        let surface = self.inner.surface;
        self.inner
            .ctx
            .with_backend(|backend| backend.delete_item(surface, item));
    }

    pub(crate) fn move_item(&self, item: ItemId, dx: f64, dy: f64) {
        let surface = self.inner.surface;
        self.inner
            .ctx
            .with_backend(|backend| backend.move_item(surface, item, dx, dy));
    }

    pub(crate) fn configure_item(&self, item: ItemId, options: &Options) {
        let surface = self.inner.surface;
        self.inner
            .ctx
            .with_backend(|backend| backend.configure_item(surface, item, options));
    }
}

impl PartialEq for Window {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl fmt::Display for Window {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_closed() {
            write!(f, "<Closed Window>")
        } else {
            write!(
                f,
                "Window('{}', {}, {})",
                self.inner.title, self.inner.width, self.inner.height
            )
        }
    }
}

impl fmt::Debug for Window {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}
