//! Sentinel Observer
//!
//! Watches an element at the bottom of a list with `IntersectionObserver`
//! and reports visibility after a quiet window, so a burst of scroll events
//! yields a single callback.

use std::rc::Rc;

use gloo_timers::callback::Timeout;
use leptos::html::Div;
use leptos::prelude::*;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{HtmlDivElement, IntersectionObserver, IntersectionObserverEntry};

use crate::scroll::SCROLL_DEBOUNCE_MS;

type ObserverCallback = Closure<dyn FnMut(js_sys::Array, IntersectionObserver)>;

struct Observed {
    observer: IntersectionObserver,
    element: HtmlDivElement,
    _callback: ObserverCallback,
}

/// Handle returned by [`use_sentinel`]
#[derive(Clone, Copy)]
pub struct SentinelHandle {
    observed: StoredValue<Option<Observed>, LocalStorage>,
}

impl SentinelHandle {
    /// Re-arm the observer. `IntersectionObserver` only reports changes, so a
    /// sentinel that is still on screen after a page was appended would
    /// otherwise never fire again.
    pub fn recheck(&self) {
        self.observed.with_value(|slot| {
            if let Some(o) = slot {
                o.observer.unobserve(&o.element);
                o.observer.observe(&o.element);
            }
        });
    }
}

/// Call `on_visible` when `sentinel` scrolls into view, debounced by
/// [`SCROLL_DEBOUNCE_MS`]. The observer is disconnected on cleanup.
pub fn use_sentinel(sentinel: NodeRef<Div>, on_visible: impl Fn() + 'static) -> SentinelHandle {
    let on_visible = Rc::new(on_visible);
    let pending = StoredValue::new_local(None::<Timeout>);
    let observed = StoredValue::new_local(None::<Observed>);

    Effect::new(move |_| {
        let Some(element) = sentinel.get() else {
            return;
        };

        observed.update_value(|slot| {
            if let Some(old) = slot.take() {
                old.observer.disconnect();
            }
        });

        let fire = Rc::clone(&on_visible);
        let callback = ObserverCallback::new(move |entries: js_sys::Array, _: IntersectionObserver| {
            let visible = entries
                .iter()
                .any(|entry| entry.unchecked_into::<IntersectionObserverEntry>().is_intersecting());
            if !visible {
                return;
            }
            let fire = Rc::clone(&fire);
            // Replacing the timeout drops, and so cancels, the previous one
            pending.set_value(Some(Timeout::new(SCROLL_DEBOUNCE_MS, move || fire())));
        });

        match IntersectionObserver::new(callback.as_ref().unchecked_ref()) {
            Ok(observer) => {
                observer.observe(&element);
                observed.set_value(Some(Observed {
                    observer,
                    element,
                    _callback: callback,
                }));
            }
            Err(e) => log::error!("[sentinel] IntersectionObserver unavailable: {:?}", e),
        }
    });

    on_cleanup(move || {
        observed.try_update_value(|slot| {
            if let Some(o) = slot.take() {
                o.observer.disconnect();
            }
        });
        pending.try_update_value(|timeout| {
            timeout.take();
        });
    });

    SentinelHandle { observed }
}
