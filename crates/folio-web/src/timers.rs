#![forbid(unsafe_code)]

//! Browser timers for the one-shot delays and the debounced scroll hook.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use folio_core::FolioError;
use folio_core::debounce::Debouncer;
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::Window;
use web_time::Instant;

use crate::dom::host_error;

/// Whole milliseconds, rounded up so a timer never fires before `delay`.
fn timeout_ms(delay: Duration) -> i32 {
    i32::try_from(delay.as_nanos().div_ceil(1_000_000)).unwrap_or(i32::MAX)
}

/// Run `callback` once after `delay`. The closure frees itself after running.
pub(crate) fn set_timeout<F>(window: &Window, delay: Duration, callback: F) -> Result<i32, FolioError>
where
    F: FnOnce() + 'static,
{
    let closure = Closure::once_into_js(callback);
    window
        .set_timeout_with_callback_and_timeout_and_arguments_0(
            closure.unchecked_ref(),
            timeout_ms(delay),
        )
        .map_err(|e| host_error("setTimeout", &e))
}

/// A [`Debouncer`] driven by `setTimeout`.
///
/// One browser timer is outstanding at a time; each trigger clears it and
/// schedules a fresh one for the new deadline.
pub(crate) struct BrowserDebounce<A: 'static> {
    window: Window,
    origin: Instant,
    debouncer: Debouncer<A>,
    handle: Option<i32>,
    fire: Option<Closure<dyn FnMut()>>,
}

impl<A: 'static> BrowserDebounce<A> {
    /// Build the debouncer; `callback` receives the arguments of the final
    /// trigger in each quiet period.
    pub(crate) fn new<F>(window: Window, wait: Duration, callback: F) -> Rc<RefCell<Self>>
    where
        F: FnMut(A) + 'static,
    {
        let this = Rc::new(RefCell::new(Self {
            window,
            origin: Instant::now(),
            debouncer: Debouncer::new(wait),
            handle: None,
            fire: None,
        }));

        let weak = Rc::downgrade(&this);
        let mut callback = callback;
        let fire = Closure::<dyn FnMut()>::new(move || {
            let Some(this) = weak.upgrade() else {
                return;
            };
            let due = {
                let mut state = this.borrow_mut();
                state.handle = None;
                let now = state.origin.elapsed();
                let due = state.debouncer.poll(now);
                if due.is_none() {
                    state.schedule(now);
                }
                due
            };
            if let Some(args) = due {
                callback(args);
            }
        });
        this.borrow_mut().fire = Some(fire);
        this
    }

    pub(crate) fn trigger(&mut self, args: A) {
        let now = self.origin.elapsed();
        self.debouncer.trigger(now, args);
        self.schedule(now);
    }

    /// Replace the outstanding browser timer with one for the current
    /// deadline, if a call is pending.
    fn schedule(&mut self, now: Duration) {
        if let Some(handle) = self.handle.take() {
            self.window.clear_timeout_with_handle(handle);
        }
        let Some(deadline) = self.debouncer.deadline() else {
            return;
        };
        let Some(fire) = &self.fire else {
            return;
        };
        match self
            .window
            .set_timeout_with_callback_and_timeout_and_arguments_0(
                fire.as_ref().unchecked_ref(),
                timeout_ms(deadline.saturating_sub(now)),
            ) {
            Ok(handle) => self.handle = Some(handle),
            Err(err) => {
                tracing::warn!(error = %host_error("setTimeout", &err), "debounce timer not scheduled");
            }
        }
    }
}
