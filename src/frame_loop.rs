//! `requestAnimationFrame` driver.
//!
//! [`FrameClock`] is the pure part: it turns the browser's frame timestamps
//! into bounded frame intervals. [`FrameLoop`] owns the scheduled callback
//! and its pending handle so the loop can be torn down deterministically;
//! dropping it cancels the next frame and releases the closure.

#[cfg(test)]
#[path = "frame_loop_test.rs"]
mod frame_loop_test;

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use tracing::{error, info, warn};
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::Window;

use crate::consts::MAX_FRAME_INTERVAL_MS;
use crate::engine::{Action, Engine};
use crate::error::BoardError;

type FrameCallback = Closure<dyn FnMut(f64)>;

/// Converts frame timestamps (ms) into frame intervals.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameClock {
    last_ts: Option<f64>,
    nominal_ms: f64,
}

impl FrameClock {
    #[must_use]
    pub fn new(nominal_ms: f64) -> Self {
        Self { last_ts: None, nominal_ms }
    }

    /// Interval since the previous timestamp.
    ///
    /// The first frame, and any frame whose timestamp does not move forward,
    /// reports the nominal interval. Long gaps (a backgrounded tab) are capped
    /// at [`MAX_FRAME_INTERVAL_MS`].
    pub fn tick(&mut self, ts: f64) -> f64 {
        let dt = match self.last_ts {
            Some(prev) if ts.is_finite() && ts > prev => (ts - prev).min(MAX_FRAME_INTERVAL_MS),
            _ => self.nominal_ms,
        };
        if ts.is_finite() {
            self.last_ts = Some(ts);
        }
        dt
    }
}

/// A running animation loop bound to an [`Engine`].
///
/// Not to be dropped from inside `on_actions`: that would free the closure
/// while it is executing.
pub struct FrameLoop {
    window: Window,
    handle: Rc<Cell<Option<i32>>>,
    callback: Rc<RefCell<Option<FrameCallback>>>,
}

impl FrameLoop {
    /// Start driving `engine` once per animation frame. Actions produced by
    /// each frame are passed to `on_actions`.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::Js`] if there is no window or the first frame
    /// cannot be scheduled.
    pub fn start(
        engine: Rc<RefCell<Engine>>,
        mut on_actions: impl FnMut(Vec<Action>) + 'static,
    ) -> Result<Self, BoardError> {
        let window = web_sys::window().ok_or_else(|| BoardError::Js("no global window".into()))?;
        let handle: Rc<Cell<Option<i32>>> = Rc::new(Cell::new(None));
        let callback: Rc<RefCell<Option<FrameCallback>>> = Rc::new(RefCell::new(None));
        let mut clock = FrameClock::new(engine.borrow().core.config.frame_interval_ms);

        let handle_for_cb = Rc::clone(&handle);
        let callback_for_cb = Rc::clone(&callback);
        let window_for_cb = window.clone();
        let cb = Closure::wrap(Box::new(move |ts: f64| {
            handle_for_cb.set(None);
            let dt = clock.tick(ts);
            let actions = match engine.try_borrow_mut() {
                Ok(mut engine) => engine.frame(dt),
                Err(_) => {
                    warn!("engine busy; skipping frame");
                    Vec::new()
                }
            };
            if !actions.is_empty() {
                on_actions(actions);
            }

            // Reschedule unless stopped while this frame ran.
            if let Some(cb) = callback_for_cb.borrow().as_ref() {
                match window_for_cb.request_animation_frame(cb.as_ref().unchecked_ref()) {
                    Ok(id) => handle_for_cb.set(Some(id)),
                    Err(e) => error!(?e, "failed to schedule animation frame"),
                }
            }
        }) as Box<dyn FnMut(f64)>);

        let id = window.request_animation_frame(cb.as_ref().unchecked_ref())?;
        handle.set(Some(id));
        *callback.borrow_mut() = Some(cb);
        info!("frame loop started");
        Ok(Self { window, handle, callback })
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.callback.borrow().is_some()
    }

    /// Cancel the pending frame and release the callback. Idempotent.
    pub fn stop(&mut self) {
        if let Some(id) = self.handle.take() {
            if let Err(e) = self.window.cancel_animation_frame(id) {
                warn!(?e, "failed to cancel animation frame");
            }
        }
        if self.callback.borrow_mut().take().is_some() {
            info!("frame loop stopped");
        }
    }
}

impl Drop for FrameLoop {
    fn drop(&mut self) {
        self.stop();
    }
}
