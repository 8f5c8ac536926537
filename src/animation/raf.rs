//! Browser binding for the entrance animation.
//!
//! `EntranceAnimation` drives an [`AnimationDriver`] from
//! `requestAnimationFrame` and reports each new progress value to a
//! JavaScript callback. Freeing the object cancels the pending frame.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

use super::driver::{AnimationConfig, AnimationDriver, FrameScheduler, DEFAULT_DURATION_MS};

type FrameCallback = Closure<dyn FnMut(f64)>;

/// Schedules frames through `window.requestAnimationFrame`.
///
/// A handle of 0 means the request failed; browsers never hand out 0.
#[derive(Default)]
pub struct RafScheduler {
    callback: Option<Rc<FrameCallback>>,
}

impl FrameScheduler for RafScheduler {
    type Handle = i32;

    fn request_frame(&mut self) -> i32 {
        let (Some(window), Some(callback)) = (web_sys::window(), self.callback.as_ref()) else {
            tracing::warn!("no window or frame callback; animation frame not scheduled");
            return 0;
        };
        match window.request_animation_frame((**callback).as_ref().unchecked_ref()) {
            Ok(handle) => handle,
            Err(err) => {
                tracing::warn!(?err, "requestAnimationFrame failed");
                0
            }
        }
    }

    fn cancel_frame(&mut self, handle: i32) {
        if handle == 0 {
            return;
        }
        if let Some(window) = web_sys::window() {
            if let Err(err) = window.cancel_animation_frame(handle) {
                tracing::warn!(?err, "cancelAnimationFrame failed");
            }
        }
    }
}

struct Inner {
    driver: AnimationDriver<RafScheduler>,
    on_tick: Option<js_sys::Function>,
}

/// Entrance animation exposed to JavaScript.
#[wasm_bindgen]
pub struct EntranceAnimation {
    inner: Rc<RefCell<Inner>>,
}

#[wasm_bindgen]
impl EntranceAnimation {
    /// Create an idle animation. `duration_ms` defaults to 1500.
    #[wasm_bindgen(constructor)]
    pub fn new(duration_ms: Option<f64>) -> Self {
        let config = AnimationConfig {
            duration_ms: duration_ms.unwrap_or(DEFAULT_DURATION_MS),
            ..Default::default()
        };
        let inner = Rc::new(RefCell::new(Inner {
            driver: AnimationDriver::new(config, RafScheduler::default()),
            on_tick: None,
        }));

        // The closure only holds a weak reference, so dropping the animation
        // drops the driver (which cancels its frame) and then the closure.
        let weak = Rc::downgrade(&inner);
        let callback: FrameCallback = Closure::new(move |now: f64| on_frame(&weak, now));
        inner.borrow_mut().driver.scheduler_mut().callback = Some(Rc::new(callback));

        Self { inner }
    }

    /// Start a fresh 0→1 run, calling `on_tick(progress)` once per frame.
    pub fn start(&self, on_tick: js_sys::Function) {
        let now = now_ms();
        let Ok(mut inner) = self.inner.try_borrow_mut() else {
            tracing::warn!("start called re-entrantly; ignoring");
            return;
        };
        inner.on_tick = Some(on_tick);
        inner.driver.start(now);
    }

    /// Cancel the pending frame and return to idle.
    pub fn reset(&self) {
        match self.inner.try_borrow_mut() {
            Ok(mut inner) => inner.driver.reset(),
            Err(_) => tracing::warn!("reset called re-entrantly; ignoring"),
        }
    }

    #[wasm_bindgen(getter)]
    pub fn progress(&self) -> f32 {
        self.inner.try_borrow().map(|i| i.driver.progress()).unwrap_or(0.0)
    }

    #[wasm_bindgen(getter)]
    pub fn state(&self) -> String {
        self.inner
            .try_borrow()
            .map(|i| i.driver.state().as_str())
            .unwrap_or("running")
            .to_string()
    }
}

fn on_frame(weak: &Weak<RefCell<Inner>>, now: f64) {
    let Some(inner) = weak.upgrade() else {
        return;
    };

    let (progress, on_tick) = {
        let Ok(mut guard) = inner.try_borrow_mut() else {
            return;
        };
        let progress = guard.driver.tick(now);
        (progress, guard.on_tick.clone())
    };

    // The borrow is released first: the callback may call `reset` or `start`.
    if let Some(on_tick) = on_tick {
        if let Err(err) = on_tick.call1(&JsValue::NULL, &JsValue::from_f64(progress as f64)) {
            tracing::warn!(?err, "onTick callback threw");
        }
    }
}

/// Milliseconds on the same clock as `requestAnimationFrame` timestamps.
fn now_ms() -> f64 {
    web_sys::window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or(0.0)
}
