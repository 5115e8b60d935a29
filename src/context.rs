//! Process-wide drawing state made explicit.
//!
//! A [`Graphics`] context owns the rendering backend shared by every window,
//! the frame pump's throttle timestamp, the registry pinning pixel buffers of
//! drawn images, and the routing table from surfaces to windows.
//!
//! The context is `Rc`-based and therefore neither `Send` nor `Sync`: all
//! windows and scene objects created from it stay on the thread that created
//! it. Create it once with [`Graphics::new`] and tear it down with
//! [`Graphics::shutdown`].

use crate::backend::{Backend, SurfaceId};
use crate::config::Config;
use crate::draw::PixelBuffer;
use crate::input::InputEvent;
use crate::window::{Window, WindowInner};
use log::{debug, info, warn};
use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::rc::{Rc, Weak};
use std::thread;
use std::time::{Duration, Instant};

struct ContextInner {
    backend: RefCell<Box<dyn Backend>>,
    config: Config,
    /// When the last throttled pump finished (or is scheduled to).
    last_update: Cell<Instant>,
    /// Pixel buffers of currently drawn images, keyed by image id.
    live_images: RefCell<HashMap<u64, PixelBuffer>>,
    next_image_id: Cell<u64>,
    windows: RefCell<BTreeMap<SurfaceId, Weak<WindowInner>>>,
}

/// Shared drawing context: the rendering root every window hangs off.
#[derive(Clone)]
pub struct Graphics {
    inner: Rc<ContextInner>,
}

impl Graphics {
    /// Initialises a context over `backend` with default configuration.
    pub fn new(backend: impl Backend + 'static) -> Self {
        Self::with_config(backend, Config::default())
    }

    pub fn with_config(backend: impl Backend + 'static, config: Config) -> Self {
        debug!("Initialising graphics context");
        Self {
            inner: Rc::new(ContextInner {
                backend: RefCell::new(Box::new(backend)),
                config,
                last_update: Cell::new(Instant::now()),
                live_images: RefCell::new(HashMap::new()),
                next_image_id: Cell::new(0),
                windows: RefCell::new(BTreeMap::new()),
            }),
        }
    }

    pub fn config(&self) -> &Config {
        &self.inner.config
    }

    /// Runs one frame pump tick: optionally throttles to `rate` ticks per
    /// second, then dispatches pending backend events to their windows.
    ///
    /// The throttle is shared by every window of this context.
    pub fn update(&self, rate: Option<f64>) {
        if let Some(rate) = rate.filter(|r| r.is_finite() && *r > 0.0) {
            self.throttle(rate);
        }

        let events = self.with_backend(|backend| backend.dispatch());
        for event in events {
            self.route(event);
        }
    }

    fn throttle(&self, rate: f64) {
        let now = Instant::now();
        let period = Duration::from_secs_f64(1.0 / rate);
        let elapsed = now.saturating_duration_since(self.inner.last_update.get());
        match period.checked_sub(elapsed).filter(|pause| !pause.is_zero()) {
            Some(pause) => {
                thread::sleep(pause);
                self.inner.last_update.set(now + pause);
            }
            None => self.inner.last_update.set(now),
        }
    }

    fn route(&self, event: InputEvent) {
        let surface = event.surface();
        let target = self
            .inner
            .windows
            .borrow()
            .get(&surface)
            .and_then(Weak::upgrade);
        match target {
            Some(inner) => Window::from_inner(inner).handle_event(event),
            None => debug!("No window for surface {}; dropping {:?}", surface.0, event),
        }
    }

    /// Closes every open window and releases all pinned image buffers.
    pub fn shutdown(&self) {
        let windows: Vec<_> = self
            .inner
            .windows
            .borrow()
            .values()
            .filter_map(Weak::upgrade)
            .collect();
        let count = windows.len();
        for inner in windows {
            Window::from_inner(inner).close();
        }
        self.inner.live_images.borrow_mut().clear();
        info!("Graphics context shut down ({} window(s) closed)", count);
    }

    /// Number of windows currently open in this context.
    pub fn open_windows(&self) -> usize {
        self.inner
            .windows
            .borrow()
            .values()
            .filter(|w| w.strong_count() > 0)
            .count()
    }

    /// Number of image buffers pinned by drawn images.
    pub fn live_images(&self) -> usize {
        self.inner.live_images.borrow().len()
    }

    pub fn is_image_pinned(&self, id: u64) -> bool {
        self.inner.live_images.borrow().contains_key(&id)
    }

    /// Sleep between polls of the blocking input waits.
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.inner.config.input.poll_interval_ms)
    }

    pub(crate) fn with_backend<R>(&self, f: impl FnOnce(&mut dyn Backend) -> R) -> R {
        let mut backend = self.inner.backend.borrow_mut();
        f(backend.as_mut())
    }

    pub(crate) fn register_window(&self, surface: SurfaceId, window: Weak<WindowInner>) {
        self.inner.windows.borrow_mut().insert(surface, window);
    }

    /// Destroys a window's surface and forgets its routing entry.
    ///
    /// Also runs from `Drop`, so it must not panic if the backend or routing
    /// table is already borrowed further up the stack.
    pub(crate) fn release_surface(&self, surface: SurfaceId) {
        match self.inner.backend.try_borrow_mut() {
            Ok(mut backend) => backend.destroy_surface(surface),
            Err(_) => warn!("Backend busy; surface {} left for teardown", surface.0),
        }
        if let Ok(mut windows) = self.inner.windows.try_borrow_mut() {
            windows.remove(&surface);
        }
    }

    pub(crate) fn next_image_id(&self) -> u64 {
        let id = self.inner.next_image_id.get();
        self.inner.next_image_id.set(id + 1);
        id
    }

    pub(crate) fn pin_image(&self, id: u64, pixels: PixelBuffer) {
        self.inner.live_images.borrow_mut().insert(id, pixels);
    }

    pub(crate) fn unpin_image(&self, id: u64) {
        self.inner.live_images.borrow_mut().remove(&id);
    }
}

impl fmt::Debug for Graphics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Graphics")
            .field("open_windows", &self.open_windows())
            .field("live_images", &self.live_images())
            .finish()
    }
}

/// Frame pump entry point: see [`Graphics::update`].
pub fn update(ctx: &Graphics, rate: Option<f64>) {
    ctx.update(rate);
}
