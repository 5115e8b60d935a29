//! Drawable scene objects.
//!
//! Every object wraps a shared [`Graphic`]: its world-space geometry, its
//! option map and an explicit drawn/undrawn state. The per-variant types in
//! [`shapes`], [`text`] and [`image`] add constructors and accessors; the
//! lifecycle (draw, undraw, move, configure) lives here and is exposed
//! through the [`Drawable`] trait.
//!
//! Geometry is stored once in world coordinates. Drawing projects it through
//! the window's transform; moving a drawn object shifts the stored geometry
//! and nudges the backend item by the equivalent device delta.

pub mod image;
pub mod shapes;
pub mod text;

pub use self::image::Image;
pub use shapes::{Circle, Line, Oval, Point, Polygon, Rectangle};
pub use text::{Entry, Text};

use crate::backend::ItemId;
use crate::draw::{EntryWidget, Kind, OptionKey, OptionValue, Options, PixelBuffer, Primitive};
use crate::error::{GraphicsError, Result};
use crate::transform::{Position, Transform, project};
use crate::window::{Window, WindowInner};
use crate::Graphics;
use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

/// Pixel payload of an image object, plus what is needed to pin it while drawn.
#[derive(Clone)]
pub(crate) struct ImageHandle {
    pub(crate) id: u64,
    pub(crate) pixels: PixelBuffer,
    pub(crate) ctx: Graphics,
}

impl ImageHandle {
    fn pin(&self) {
        self.ctx.pin_image(self.id, Rc::clone(&self.pixels));
    }

    fn unpin(&self) {
        self.ctx.unpin_image(self.id);
    }
}

/// World-space geometry of a scene object.
#[derive(Clone)]
pub(crate) enum Figure {
    Point(Position),
    Line(Position, Position),
    Rectangle(Position, Position),
    Oval(Position, Position),
    Circle {
        p1: Position,
        p2: Position,
        radius: f64,
    },
    Polygon(Vec<Position>),
    Text(Position),
    Entry {
        anchor: Position,
        chars: u32,
        buffer: Rc<RefCell<String>>,
    },
    Image {
        anchor: Position,
        image: ImageHandle,
    },
}

impl Figure {
    pub(crate) fn kind(&self) -> Kind {
        match self {
            Figure::Point(_) => Kind::Point,
            Figure::Line(..) => Kind::Line,
            Figure::Rectangle(..) => Kind::Rectangle,
            Figure::Oval(..) => Kind::Oval,
            Figure::Circle { .. } => Kind::Circle,
            Figure::Polygon(_) => Kind::Polygon,
            Figure::Text(_) => Kind::Text,
            Figure::Entry { .. } => Kind::Entry,
            Figure::Image { .. } => Kind::Image,
        }
    }

    fn translate(&mut self, dx: f64, dy: f64) {
        match self {
            Figure::Point(p)
            | Figure::Text(p)
            | Figure::Entry { anchor: p, .. }
            | Figure::Image { anchor: p, .. } => *p = p.offset(dx, dy),
            Figure::Line(p1, p2)
            | Figure::Rectangle(p1, p2)
            | Figure::Oval(p1, p2)
            | Figure::Circle { p1, p2, .. } => {
                *p1 = p1.offset(dx, dy);
                *p2 = p2.offset(dx, dy);
            }
            Figure::Polygon(points) => {
                for p in points.iter_mut() {
                    *p = p.offset(dx, dy);
                }
            }
        }
    }

    /// Device-space primitive for this geometry under `transform`.
    fn primitive(&self, transform: Option<&Transform>) -> Primitive {
        let corners = |a: Position, b: Position| {
            let (x1, y1) = project(transform, a);
            let (x2, y2) = project(transform, b);
            (x1, y1, x2, y2)
        };
        match self {
            Figure::Point(p) => {
                let (x, y) = project(transform, *p);
                Primitive::Rectangle {
                    x1: x,
                    y1: y,
                    x2: x + 1.0,
                    y2: y + 1.0,
                }
            }
            Figure::Line(a, b) => {
                let (x1, y1, x2, y2) = corners(*a, *b);
                Primitive::Line { x1, y1, x2, y2 }
            }
            Figure::Rectangle(a, b) => {
                let (x1, y1, x2, y2) = corners(*a, *b);
                Primitive::Rectangle { x1, y1, x2, y2 }
            }
            Figure::Oval(a, b) | Figure::Circle { p1: a, p2: b, .. } => {
                let (x1, y1, x2, y2) = corners(*a, *b);
                Primitive::Oval { x1, y1, x2, y2 }
            }
            Figure::Polygon(points) => Primitive::Polygon {
                points: points.iter().map(|p| project(transform, *p)).collect(),
            },
            Figure::Text(anchor) => {
                let (x, y) = project(transform, *anchor);
                Primitive::Text { x, y }
            }
            Figure::Entry {
                anchor,
                chars,
                buffer,
            } => {
                let (x, y) = project(transform, *anchor);
                Primitive::Entry {
                    x,
                    y,
                    widget: EntryWidget {
                        chars: *chars,
                        buffer: Rc::clone(buffer),
                    },
                }
            }
            Figure::Image { anchor, image } => {
                let (x, y) = project(transform, *anchor);
                Primitive::Image {
                    x,
                    y,
                    pixels: Rc::downgrade(&image.pixels),
                }
            }
        }
    }

    fn image(&self) -> Option<&ImageHandle> {
        match self {
            Figure::Image { image, .. } => Some(image),
            _ => None,
        }
    }
}

/// Whether an object is currently on a window, and under which backend item.
pub(crate) enum DrawState {
    Undrawn,
    Drawn {
        window: Weak<WindowInner>,
        item: ItemId,
    },
}

struct Object {
    figure: Figure,
    options: Options,
    state: DrawState,
}

/// Shared core of every scene object.
///
/// Cloning a `Graphic` handle is not public: variant types implement
/// `Clone` as a deep copy that starts undrawn.
pub struct Graphic {
    cell: Rc<RefCell<Object>>,
}

impl Graphic {
    pub(crate) fn new(figure: Figure, options: Options) -> Self {
        Self {
            cell: Rc::new(RefCell::new(Object {
                figure,
                options,
                state: DrawState::Undrawn,
            })),
        }
    }

    /// Another handle to the same object, used by windows to track drawn items.
    pub(crate) fn share(&self) -> Graphic {
        Graphic {
            cell: Rc::clone(&self.cell),
        }
    }

    pub(crate) fn same(&self, other: &Graphic) -> bool {
        Rc::ptr_eq(&self.cell, &other.cell)
    }

    /// Fresh undrawn object with copied geometry and options.
    ///
    /// Entry and image payloads are shared by `Figure::clone`, so those
    /// variants build their copies themselves.
    pub(crate) fn duplicate(&self) -> Graphic {
        let obj = self.cell.borrow();
        Graphic::new(obj.figure.clone(), obj.options.clone())
    }

    pub(crate) fn copy_options_from(&self, other: &Graphic) {
        let options = other.cell.borrow().options.clone();
        self.cell.borrow_mut().options = options;
    }

    pub(crate) fn figure<R>(&self, f: impl FnOnce(&Figure) -> R) -> R {
        f(&self.cell.borrow().figure)
    }

    pub fn kind(&self) -> Kind {
        self.cell.borrow().figure.kind()
    }

    /// Snapshot of the object's option map.
    pub fn options(&self) -> Options {
        self.cell.borrow().options.clone()
    }

    /// Window the object is attached to, if that window still exists.
    pub fn window(&self) -> Option<Window> {
        match &self.cell.borrow().state {
            DrawState::Drawn { window, .. } => window.upgrade().map(Window::from_inner),
            DrawState::Undrawn => None,
        }
    }

    /// Backend item showing the object, while drawn.
    pub fn item(&self) -> Option<ItemId> {
        match &self.cell.borrow().state {
            DrawState::Drawn { item, .. } => Some(*item),
            DrawState::Undrawn => None,
        }
    }

    /// True while the object is shown in an open window.
    pub fn is_drawn(&self) -> bool {
        self.window().is_some_and(|w| !w.is_closed())
    }

    pub fn draw(&self, window: &Window) -> Result<()> {
        if self.is_drawn() {
            return Err(GraphicsError::AlreadyDrawn);
        }
        if window.is_closed() {
            return Err(GraphicsError::ClosedWindow("Can't draw to closed window"));
        }

        let (primitive, options, image) = {
            let obj = self.cell.borrow();
            (
                obj.figure.primitive(window.transform().as_ref()),
                obj.options.clone(),
                obj.figure.image().cloned(),
            )
        };
        let item = window.create_item(primitive, &options)?;
        if let Some(image) = image {
            image.pin();
        }

        self.cell.borrow_mut().state = DrawState::Drawn {
            window: window.downgrade(),
            item,
        };
        window.add_item(self.share());
        window.autoflush();
        Ok(())
    }

    pub fn undraw(&self) {
        let previous = {
            let mut obj = self.cell.borrow_mut();
            if let Some(image) = obj.figure.image() {
                image.unpin();
            }
            std::mem::replace(&mut obj.state, DrawState::Undrawn)
        };
        let DrawState::Drawn { window, item } = previous else {
            return;
        };
        let Some(window) = window.upgrade().map(Window::from_inner) else {
            return;
        };
        if window.is_closed() {
            return;
        }
        window.delete_item(item);
        window.del_item(self);
        window.autoflush();
    }

    /// Moves the object by a world-space delta.
    pub fn move_by(&self, dx: f64, dy: f64) {
        let drawn = {
            let mut obj = self.cell.borrow_mut();
            obj.figure.translate(dx, dy);
            match &obj.state {
                DrawState::Drawn { window, item } => window.upgrade().map(|w| (w, *item)),
                DrawState::Undrawn => None,
            }
        };
        let Some((inner, item)) = drawn else {
            return;
        };
        let window = Window::from_inner(inner);
        if window.is_closed() {
            return;
        }
        let (ddx, ddy) = match window.transform() {
            Some(transform) => transform.device_delta(dx, dy),
            None => (dx, dy),
        };
        window.move_item(item, ddx, ddy);
        window.autoflush();
    }

    /// Sets an option, resolving aliases through the variant's capability table.
    pub fn configure(&self, requested: OptionKey, value: OptionValue) -> Result<()> {
        let key = self
            .kind()
            .resolve(requested)
            .ok_or(GraphicsError::UnsupportedOption(requested.name()))?;
        if let OptionValue::Width(width) = value
            && !(width.is_finite() && width >= 0.0)
        {
            return Err(GraphicsError::bad_value("width", width));
        }

        let drawn = {
            let mut obj = self.cell.borrow_mut();
            obj.options.insert(key, value);
            match &obj.state {
                DrawState::Drawn { window, item } => window
                    .upgrade()
                    .map(|w| (w, *item, obj.options.clone())),
                DrawState::Undrawn => None,
            }
        };
        if let Some((inner, item, options)) = drawn {
            let window = Window::from_inner(inner);
            if !window.is_closed() {
                window.configure_item(item, &options);
                window.autoflush();
            }
        }
        Ok(())
    }
}

impl fmt::Debug for Graphic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Graphic")
            .field("kind", &self.kind())
            .field("item", &self.item())
            .finish()
    }
}

/// Lifecycle shared by every scene object.
pub trait Drawable {
    fn graphic(&self) -> &Graphic;

    /// Draws the object into `window`.
    ///
    /// Fails with [`GraphicsError::AlreadyDrawn`] while the object is shown in
    /// an open window, and with [`GraphicsError::ClosedWindow`] if `window`
    /// is closed.
    fn draw(&self, window: &Window) -> Result<&Self>
    where
        Self: Sized,
    {
        self.graphic().draw(window)?;
        Ok(self)
    }

    /// Removes the object from its window. Does nothing when not drawn.
    fn undraw(&self) {
        self.graphic().undraw();
    }

    /// Moves the object by a world-space delta, keeping any drawn item in sync.
    fn move_by(&self, dx: f64, dy: f64) {
        self.graphic().move_by(dx, dy);
    }

    fn set_fill(&self, color: &str) -> Result<()> {
        self.graphic()
            .configure(OptionKey::Fill, OptionValue::Color(color.to_string()))
    }

    fn set_outline(&self, color: &str) -> Result<()> {
        self.graphic()
            .configure(OptionKey::Outline, OptionValue::Color(color.to_string()))
    }

    fn set_width(&self, width: f64) -> Result<()> {
        self.graphic()
            .configure(OptionKey::Width, OptionValue::Width(width))
    }

    fn is_drawn(&self) -> bool {
        self.graphic().is_drawn()
    }

    fn kind(&self) -> Kind {
        self.graphic().kind()
    }

    fn options(&self) -> Options {
        self.graphic().options()
    }
}

/// Implements [`Drawable`] and `Debug` (via `Display`) for wrappers around a
/// `graphic` field.
macro_rules! drawable {
    ($($ty:ident),+ $(,)?) => {$(
        impl $crate::scene::Drawable for $ty {
            fn graphic(&self) -> &$crate::scene::Graphic {
                &self.graphic
            }
        }

        impl std::fmt::Debug for $ty {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                std::fmt::Display::fmt(self, f)
            }
        }
    )+};
}

pub(crate) use drawable;
