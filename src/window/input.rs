//! Polled mouse and keyboard input.
//!
//! The blocking waits are plain poll loops: pump the frame loop, check the
//! window's pending input, sleep for the configured poll interval, repeat.
//! Closing the window is the only way out other than the awaited input and
//! turns into a [`GraphicsError::ClosedWindow`] error.

use super::Window;
use crate::error::{GraphicsError, Result};
use crate::input::{InputEvent, MouseButton};
use crate::scene::Point;
use log::debug;
use std::thread;

impl Window {
    /// Waits for a left click and returns it in world coordinates.
    ///
    /// Any click recorded before the call is discarded.
    pub fn get_mouse(&self) -> Result<Point> {
        self.inner.ctx.update(None);
        self.inner.state.borrow_mut().mouse = None;
        loop {
            self.inner.ctx.update(None);
            if self.is_closed() {
                return Err(GraphicsError::ClosedWindow("getMouse in closed window"));
            }
            if let Some(point) = self.take_click() {
                return Ok(point);
            }
            thread::sleep(self.inner.ctx.poll_interval());
        }
    }

    /// Returns the last unconsumed click, if any, without blocking.
    pub fn check_mouse(&self) -> Result<Option<Point>> {
        if self.is_closed() {
            return Err(GraphicsError::ClosedWindow("checkMouse in closed window"));
        }
        self.inner.ctx.update(None);
        Ok(self.take_click())
    }

    /// Waits for a key press and returns its keysym (`"a"`, `"Return"`, ...).
    pub fn get_key(&self) -> Result<String> {
        self.inner.state.borrow_mut().last_key = None;
        loop {
            self.inner.ctx.update(None);
            if self.is_closed() {
                return Err(GraphicsError::ClosedWindow("getKey in closed window"));
            }
            if let Some(key) = self.inner.state.borrow_mut().last_key.take() {
                return Ok(key);
            }
            thread::sleep(self.inner.ctx.poll_interval());
        }
    }

    /// Returns the last unconsumed key, if any, without blocking.
    pub fn check_key(&self) -> Result<Option<String>> {
        if self.is_closed() {
            return Err(GraphicsError::ClosedWindow("checkKey in closed window"));
        }
        self.inner.ctx.update(None);
        Ok(self.inner.state.borrow_mut().last_key.take())
    }

    /// Registers a callback run on every left click with the device-space
    /// position. The click is still recorded for `get_mouse`/`check_mouse`.
    pub fn set_mouse_handler(&self, handler: impl FnMut(Point) + 'static) {
        self.inner.state.borrow_mut().mouse_handler = Some(Box::new(handler));
    }

    pub fn clear_mouse_handler(&self) {
        self.inner.state.borrow_mut().mouse_handler = None;
    }

    fn take_click(&self) -> Option<Point> {
        let (x, y) = self.inner.state.borrow_mut().mouse.take()?;
        let (wx, wy) = self.to_world(f64::from(x), f64::from(y));
        Some(Point::new(wx, wy))
    }

    /// Applies one routed backend event.
    pub(crate) fn handle_event(&self, event: InputEvent) {
        match event {
            InputEvent::Click {
                button: MouseButton::Left,
                x,
                y,
                ..
            } => {
                let handler = {
                    let mut state = self.inner.state.borrow_mut();
                    state.mouse = Some((x, y));
                    state.mouse_handler.take()
                };
                // The handler runs unborrowed so it may use this window freely.
                if let Some(mut handler) = handler {
                    handler(Point::new(f64::from(x), f64::from(y)));
                    let mut state = self.inner.state.borrow_mut();
                    if state.mouse_handler.is_none() {
                        state.mouse_handler = Some(handler);
                    }
                }
            }
            InputEvent::Click { button, .. } => {
                debug!("Ignoring {:?} click in '{}'", button, self.inner.title);
            }
            InputEvent::Key { key, .. } => {
                self.inner.state.borrow_mut().last_key = Some(key.keysym());
            }
            InputEvent::CloseRequested { .. } => {
                debug!("Close requested for '{}'", self.inner.title);
                self.shut();
            }
        }
    }
}
