//! [`Scheduler`] backed by the window timers.

use std::time::Duration;

use domkit_core::timer::{Scheduler, Task, TimerId};
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::Window;

/// Schedules tasks with `setTimeout` and cancels them with `clearTimeout`.
#[derive(Debug, Clone)]
pub struct BrowserScheduler {
    window: Window,
}

impl BrowserScheduler {
    pub fn new(window: Window) -> Self {
        Self { window }
    }
}

impl Scheduler for BrowserScheduler {
    fn schedule(&self, delay: Duration, task: Task) -> Option<TimerId> {
        // The JS function frees the closure after its single call
        let callback = Closure::once_into_js(move || task());
        let millis = i32::try_from(delay.as_millis()).unwrap_or(i32::MAX);
        match self
            .window
            .set_timeout_with_callback_and_timeout_and_arguments_0(callback.unchecked_ref(), millis)
        {
            Ok(handle) => Some(TimerId(handle as u64)),
            Err(err) => {
                log::error!("setTimeout failed: {:?}", err);
                None
            }
        }
    }

    fn cancel(&self, id: TimerId) {
        self.window.clear_timeout_with_handle(id.0 as i32);
    }
}
