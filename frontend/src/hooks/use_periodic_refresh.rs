use std::cell::Cell;
use std::rc::Rc;

use gloo::timers::future::TimeoutFuture;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::services::logging::Logger;

/// Hook that emits `refresh_fn` once on mount and then every `interval_ms`.
///
/// `refresh_fn` is fire-and-forget: the timer never waits for the work it
/// starts, so a slow refresh can overlap the next tick. Callers that need
/// ordering sequence the results themselves.
#[hook]
pub fn use_periodic_refresh(interval_ms: u32, refresh_fn: Callback<()>) {
    use_effect_with(interval_ms, move |interval_ms| {
        let active = Rc::new(Cell::new(true));
        let interval_ms = *interval_ms;

        Logger::info_with_component(
            "periodic-refresh-hook",
            &format!("Starting refresh timer ({}ms)", interval_ms),
        );

        {
            let active = active.clone();
            spawn_local(async move {
                while active.get() {
                    refresh_fn.emit(());
                    TimeoutFuture::new(interval_ms).await;
                }

                Logger::debug_with_component("periodic-refresh-hook", "Refresh timer stopped");
            });
        }

        move || active.set(false)
    });
}
