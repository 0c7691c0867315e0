//! Single-slot debounce timer.
//!
//! Scheduling replaces whatever was armed before, so only the most recent
//! action for the slot ever fires. The clock is abstracted behind
//! [`Scheduler`]: the browser uses `setTimeout`, tests use a virtual clock.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tracing::debug;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

/// Something that can run an action once after a delay and cancel it.
pub trait Scheduler {
    type Handle;

    /// Arm `action` to run once after `delay_ms`. `None` if no timer could be armed.
    fn schedule(&self, delay_ms: u32, action: Box<dyn FnOnce()>) -> Option<Self::Handle>;

    fn cancel(&self, handle: Self::Handle);
}

/// An armed timer. `fired` flips once the action has run, after which the
/// handle no longer names a live timer.
struct Armed<H> {
    handle: H,
    fired: Arc<AtomicBool>,
}

pub struct Debouncer<S: Scheduler> {
    scheduler: S,
    delay_ms: u32,
    pending: Option<Armed<S::Handle>>,
}

impl<S: Scheduler> Debouncer<S> {
    pub fn new(scheduler: S, delay_ms: u32) -> Self {
        Self {
            scheduler,
            delay_ms,
            pending: None,
        }
    }

    /// Cancel the armed action, if any, and arm `action` in its place.
    pub fn schedule(&mut self, action: impl FnOnce() + 'static) {
        self.cancel();
        let fired = Arc::new(AtomicBool::new(false));
        let flag = fired.clone();
        let wrapped = Box::new(move || {
            flag.store(true, Ordering::Relaxed);
            action();
        });
        self.pending = self
            .scheduler
            .schedule(self.delay_ms, wrapped)
            .map(|handle| Armed { handle, fired });
    }

    /// Disarm the pending action. A timer that already fired is only forgotten.
    pub fn cancel(&mut self) {
        let Some(armed) = self.pending.take() else {
            return;
        };
        if !armed.fired.load(Ordering::Relaxed) {
            debug!("Cancelling debounced action");
            self.scheduler.cancel(armed.handle);
        }
    }
}

/// `window.setTimeout` backed scheduler.
#[derive(Debug, Clone, Copy, Default)]
pub struct WindowScheduler;

impl Scheduler for WindowScheduler {
    type Handle = i32;

    fn schedule(&self, delay_ms: u32, action: Box<dyn FnOnce()>) -> Option<i32> {
        let window = web_sys::window()?;
        // Freed by wasm-bindgen after the single invocation.
        let callback = Closure::once_into_js(move || action());
        window
            .set_timeout_with_callback_and_timeout_and_arguments_0(
                callback.unchecked_ref(),
                delay_ms.min(i32::MAX as u32) as i32,
            )
            .ok()
    }

    fn cancel(&self, handle: i32) {
        if let Some(window) = web_sys::window() {
            window.clear_timeout_with_handle(handle);
        }
    }
}
