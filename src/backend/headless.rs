//! Off-screen backend rendering with Cairo.
//!
//! Every surface keeps an ordered [`Frame`] and is rasterised into an
//! in-memory Cairo image on [`Backend::flush`]. Input comes from a script:
//! events are queued up front and released one dispatch at a time, which
//! lets blocking waits such as `Window::get_mouse` be driven
//! deterministically.
//!
//! The backend is a cheap handle; clone it before handing it to a
//! `Graphics` context to keep an inspection/scripting handle.

use super::{Backend, ItemId, SurfaceId};
use crate::draw::{CanvasItem, Frame, Options, Primitive, render_frame};
use crate::error::{GraphicsError, Result};
use crate::input::{InputEvent, Key, MouseButton};
use log::{debug, info};
use std::cell::RefCell;
use std::collections::{BTreeMap, VecDeque};
use std::fs::File;
use std::path::Path;
use std::rc::Rc;

/// Something the input script does when its turn comes.
#[derive(Debug, Clone)]
enum Scripted {
    Event(InputEvent),
    /// Characters typed into the focused entry of a surface.
    Text { surface: SurfaceId, text: String },
}

#[derive(Debug)]
struct Scheduled {
    /// Dispatches to skip before this action fires.
    remaining: u64,
    action: Scripted,
}

struct SurfaceState {
    title: String,
    width: u32,
    height: u32,
    background: String,
    frame: Frame,
    open: bool,
    /// Entry widget holding keyboard focus (the most recently drawn one).
    focus: Option<ItemId>,
    /// Result of the last flush.
    canvas: Option<cairo::ImageSurface>,
}

struct HeadlessState {
    next_surface: u64,
    next_item: u64,
    surfaces: BTreeMap<SurfaceId, SurfaceState>,
    script: VecDeque<Scheduled>,
    dispatches: u64,
    flushes: u64,
    antialias: bool,
}

impl Default for HeadlessState {
    fn default() -> Self {
        Self {
            next_surface: 1,
            next_item: 1,
            surfaces: BTreeMap::new(),
            script: VecDeque::new(),
            dispatches: 0,
            flushes: 0,
            antialias: true,
        }
    }
}

impl HeadlessState {
    fn open_surface(&mut self, surface: SurfaceId) -> Result<&mut SurfaceState> {
        match self.surfaces.get_mut(&surface) {
            Some(state) if state.open => Ok(state),
            _ => Err(GraphicsError::Backend(format!(
                "surface {} is not open",
                surface.0
            ))),
        }
    }

    fn item_mut(&mut self, surface: SurfaceId, item: ItemId) -> Option<&mut CanvasItem> {
        let state = self.surfaces.get_mut(&surface)?;
        if !state.open {
            return None;
        }
        state.frame.get_mut(item)
    }

    fn type_into_focus(&mut self, surface: SurfaceId, text: &str) {
        let Some(state) = self.surfaces.get(&surface).filter(|s| s.open) else {
            return;
        };
        let Some(focus) = state.focus else {
            debug!("Typed text on surface {} with no focused entry", surface.0);
            return;
        };
        if let Some(CanvasItem {
            primitive: Primitive::Entry { widget, .. },
            ..
        }) = state.frame.get(focus)
        {
            widget.buffer.borrow_mut().push_str(text);
        }
    }
}

/// Off-screen rendering backend with scripted input.
#[derive(Clone, Default)]
pub struct HeadlessBackend {
    shared: Rc<RefCell<HeadlessState>>,
}

impl HeadlessBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enables or disables antialiasing for subsequent renders.
    pub fn set_antialias(&self, antialias: bool) {
        self.shared.borrow_mut().antialias = antialias;
    }

    // ------------------------------------------------------------------
    // Input script
    // ------------------------------------------------------------------

    /// Queues an event for the next dispatch.
    pub fn push_event(&self, event: InputEvent) {
        self.push_event_after(0, event);
    }

    /// Queues an event that is held back for `dispatches` dispatches and
    /// delivered on the one after.
    pub fn push_event_after(&self, dispatches: u64, event: InputEvent) {
        self.schedule(dispatches, Scripted::Event(event));
    }

    /// Queues a left click at device coordinates.
    pub fn click(&self, surface: SurfaceId, x: i32, y: i32) {
        self.push_event(InputEvent::Click {
            surface,
            button: MouseButton::Left,
            x,
            y,
        });
    }

    pub fn press_key(&self, surface: SurfaceId, key: Key) {
        self.push_event(InputEvent::Key { surface, key });
    }

    /// Simulates the user clicking the surface's close button.
    pub fn request_close(&self, surface: SurfaceId) {
        self.push_event(InputEvent::CloseRequested { surface });
    }

    /// Types text into the surface's focused entry on the next dispatch.
    pub fn type_text(&self, surface: SurfaceId, text: &str) {
        self.schedule(
            0,
            Scripted::Text {
                surface,
                text: text.to_string(),
            },
        );
    }

    fn schedule(&self, remaining: u64, action: Scripted) {
        self.shared
            .borrow_mut()
            .script
            .push_back(Scheduled { remaining, action });
    }

    /// Number of scripted actions not yet delivered.
    pub fn pending_input(&self) -> usize {
        self.shared.borrow().script.len()
    }

    // ------------------------------------------------------------------
    // Inspection
    // ------------------------------------------------------------------

    /// Snapshot of a surface's display list, bottom to top.
    pub fn items(&self, surface: SurfaceId) -> Vec<CanvasItem> {
        self.shared
            .borrow()
            .surfaces
            .get(&surface)
            .map(|s| s.frame.items().to_vec())
            .unwrap_or_default()
    }

    pub fn item(&self, surface: SurfaceId, item: ItemId) -> Option<CanvasItem> {
        let state = self.shared.borrow();
        state.surfaces.get(&surface)?.frame.get(item).cloned()
    }

    pub fn is_open(&self, surface: SurfaceId) -> bool {
        self.shared
            .borrow()
            .surfaces
            .get(&surface)
            .is_some_and(|s| s.open)
    }

    pub fn title(&self, surface: SurfaceId) -> Option<String> {
        let state = self.shared.borrow();
        state.surfaces.get(&surface).map(|s| s.title.clone())
    }

    pub fn background(&self, surface: SurfaceId) -> Option<String> {
        let state = self.shared.borrow();
        state.surfaces.get(&surface).map(|s| s.background.clone())
    }

    /// Number of `dispatch` calls so far.
    pub fn dispatch_count(&self) -> u64 {
        self.shared.borrow().dispatches
    }

    /// Number of `flush` calls so far.
    pub fn flush_count(&self) -> u64 {
        self.shared.borrow().flushes
    }

    /// Whether the surface has been flushed at least once since it was created.
    pub fn has_canvas(&self, surface: SurfaceId) -> bool {
        self.shared
            .borrow()
            .surfaces
            .get(&surface)
            .is_some_and(|s| s.canvas.is_some())
    }

    /// Rasterises the current display list of a surface.
    pub fn render(&self, surface: SurfaceId) -> Result<cairo::ImageSurface> {
        let state = self.shared.borrow();
        let target = state
            .surfaces
            .get(&surface)
            .ok_or_else(|| GraphicsError::Backend(format!("unknown surface {}", surface.0)))?;
        rasterise(target, state.antialias)
    }

    /// Renders a surface and writes it as PNG.
    pub fn save_png(&self, surface: SurfaceId, path: &Path) -> Result<()> {
        let canvas = self.render(surface)?;
        let mut file = File::create(path)?;
        canvas
            .write_to_png(&mut file)
            .map_err(|e| GraphicsError::Backend(format!("PNG export failed: {e}")))?;
        info!("Saved surface {} to {}", surface.0, path.display());
        Ok(())
    }
}

fn rasterise(target: &SurfaceState, antialias: bool) -> Result<cairo::ImageSurface> {
    let canvas = cairo::ImageSurface::create(
        cairo::Format::ARgb32,
        target.width as i32,
        target.height as i32,
    )?;
    let ctx = cairo::Context::new(&canvas)?;
    render_frame(&ctx, &target.background, &target.frame, antialias);
    drop(ctx);
    canvas.flush();
    Ok(canvas)
}

impl Backend for HeadlessBackend {
    fn create_surface(&mut self, title: &str, width: u32, height: u32) -> Result<SurfaceId> {
        let mut state = self.shared.borrow_mut();
        let id = SurfaceId(state.next_surface);
        state.next_surface += 1;
        state.surfaces.insert(
            id,
            SurfaceState {
                title: title.to_string(),
                width,
                height,
                background: "white".to_string(),
                frame: Frame::new(),
                open: true,
                focus: None,
                canvas: None,
            },
        );
        debug!("Created headless surface {} ({}x{})", id.0, width, height);
        Ok(id)
    }

    fn destroy_surface(&mut self, surface: SurfaceId) {
        let mut state = self.shared.borrow_mut();
        if let Some(target) = state.surfaces.get_mut(&surface) {
            target.open = false;
            target.frame.clear();
            target.focus = None;
            target.canvas = None;
            debug!("Destroyed headless surface {}", surface.0);
        }
    }

    fn set_background(&mut self, surface: SurfaceId, color: &str) -> Result<()> {
        let mut state = self.shared.borrow_mut();
        state.open_surface(surface)?.background = color.to_string();
        Ok(())
    }

    fn create_item(
        &mut self,
        surface: SurfaceId,
        primitive: Primitive,
        options: &Options,
    ) -> Result<ItemId> {
        let mut state = self.shared.borrow_mut();
        let id = ItemId(state.next_item);
        let target = state.open_surface(surface)?;
        if matches!(primitive, Primitive::Entry { .. }) {
            target.focus = Some(id);
        }
        target.frame.push(CanvasItem {
            id,
            primitive,
            options: options.clone(),
        });
        state.next_item += 1;
        Ok(id)
    }

    fn delete_item(&mut self, surface: SurfaceId, item: ItemId) {
        let mut state = self.shared.borrow_mut();
        if let Some(target) = state.surfaces.get_mut(&surface) {
            if target.frame.remove(item).is_none() {
                debug!("delete_item: no item {} on surface {}", item.0, surface.0);
            }
            if target.focus == Some(item) {
                target.focus = None;
            }
        }
    }

    fn move_item(&mut self, surface: SurfaceId, item: ItemId, dx: f64, dy: f64) {
        let mut state = self.shared.borrow_mut();
        if let Some(target) = state.item_mut(surface, item) {
            target.primitive.translate(dx, dy);
        }
    }

    fn configure_item(&mut self, surface: SurfaceId, item: ItemId, options: &Options) {
        let mut state = self.shared.borrow_mut();
        if let Some(target) = state.item_mut(surface, item) {
            target.options = options.clone();
        }
    }

    fn flush(&mut self, surface: SurfaceId) -> Result<()> {
        let mut state = self.shared.borrow_mut();
        let antialias = state.antialias;
        let target = state.open_surface(surface)?;
        let canvas = rasterise(target, antialias)?;
        target.canvas = Some(canvas);
        state.flushes += 1;
        Ok(())
    }

    fn dispatch(&mut self) -> Vec<InputEvent> {
        let mut state = self.shared.borrow_mut();
        state.dispatches += 1;

        let mut due = Vec::new();
        let mut waiting = VecDeque::with_capacity(state.script.len());
        while let Some(mut scheduled) = state.script.pop_front() {
            if scheduled.remaining == 0 {
                due.push(scheduled.action);
            } else {
                scheduled.remaining -= 1;
                waiting.push_back(scheduled);
            }
        }
        state.script = waiting;

        let mut events = Vec::new();
        for action in due {
            match action {
                Scripted::Event(event) => {
                    if state
                        .surfaces
                        .get(&event.surface())
                        .is_some_and(|s| s.open)
                    {
                        events.push(event);
                    } else {
                        debug!("Dropping {:?} for closed surface", event);
                    }
                }
                Scripted::Text { surface, text } => state.type_into_focus(surface, &text),
            }
        }
        events
    }
}
