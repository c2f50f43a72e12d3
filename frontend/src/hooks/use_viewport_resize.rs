use std::cell::RefCell;
use std::rc::Rc;

use gloo::timers::future::TimeoutFuture;
use shared::Debouncer;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::services::logging::Logger;

/// Whether `query` (a CSS media query) currently matches.
///
/// Environments without `matchMedia` count as wide.
pub fn is_narrow_viewport(query: &str) -> bool {
    web_sys::window()
        .and_then(|window| window.match_media(query).ok().flatten())
        .map(|list| list.matches())
        .unwrap_or(false)
}

/// Hook that reports viewport changes once a resize burst has settled.
///
/// `on_settle` receives the evaluation of `narrow_query` after no `resize`
/// event has arrived for `debounce_ms`.
#[hook]
pub fn use_viewport_resize(debounce_ms: u32, narrow_query: String, on_settle: Callback<bool>) {
    use_effect_with((debounce_ms, narrow_query), move |(debounce_ms, narrow_query)| {
        let debouncer = Rc::new(RefCell::new(Debouncer::new()));
        let debounce_ms = *debounce_ms;

        let handle_resize = {
            let debouncer = debouncer.clone();
            let narrow_query = narrow_query.clone();
            Closure::wrap(Box::new(move |_event: web_sys::Event| {
                let ticket = debouncer.borrow_mut().trigger();
                let debouncer = debouncer.clone();
                let narrow_query = narrow_query.clone();
                let on_settle = on_settle.clone();

                spawn_local(async move {
                    TimeoutFuture::new(debounce_ms).await;
                    if debouncer.borrow().is_latest(ticket) {
                        on_settle.emit(is_narrow_viewport(&narrow_query));
                    }
                });
            }) as Box<dyn FnMut(_)>)
        };

        let window = web_sys::window();
        if let Some(window) = &window {
            if window
                .add_event_listener_with_callback("resize", handle_resize.as_ref().unchecked_ref())
                .is_err()
            {
                Logger::error_with_component("viewport-resize-hook", "Failed to listen for resize events");
            }
        }

        move || {
            if let Some(window) = window {
                let _ = window
                    .remove_event_listener_with_callback("resize", handle_resize.as_ref().unchecked_ref());
            }
            // Invalidate any debounce still sleeping
            debouncer.borrow_mut().trigger();
            drop(handle_resize);
        }
    });
}
