use std::cell::RefCell;
use std::rc::Rc;

use gloo::timers::future::TimeoutFuture;
use shared::{
    OdometerWidget, PollOutcome, RenderOutcome, Renderer, SnapshotSource, SpinTicket, WidgetConfig,
};
use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlElement;
use yew::prelude::*;

use crate::hooks::{is_narrow_viewport, use_periodic_refresh, use_viewport_resize};
use crate::services::{DomRenderer, Logger, SignatureApi};

type SharedWidget<R = DomRenderer> = Rc<RefCell<Option<OdometerWidget<R>>>>;

/// Run `f` against the mounted widget, if any.
fn with_widget<R: Renderer, T>(
    widget: &SharedWidget<R>,
    f: impl FnOnce(&mut OdometerWidget<R>) -> T,
) -> Option<T> {
    widget.borrow_mut().as_mut().map(f)
}

/// Spin rebuilt wheels once the zeroed row has had time to paint.
fn schedule_spin<R: Renderer + 'static>(widget: SharedWidget<R>, ticket: SpinTicket, delay_ms: u32) {
    spawn_local(async move {
        TimeoutFuture::new(delay_ms).await;
        with_widget(&widget, |widget| widget.settle(ticket));
    });
}

/// One poll: fetch, hand the result to the widget, schedule the spin after a
/// rebuild. Failures end up as the widget's fallback text, never as an error
/// here, so the timer keeps ticking.
async fn poll_once<R: Renderer + 'static>(
    widget: &SharedWidget<R>,
    source: &dyn SnapshotSource,
    rebuild_delay_ms: u32,
) -> Option<PollOutcome> {
    let Some(ticket) = with_widget(widget, |widget| widget.begin_poll()) else {
        Logger::warn_with_component("odometer", "Skipping poll, widget not mounted");
        return None;
    };

    let result = source.fetch().await;
    let outcome = with_widget(widget, |widget| widget.finish_poll(ticket, result));

    if let Some(PollOutcome::Rendered(RenderOutcome::Rebuilt(spin))) = outcome {
        schedule_spin(widget.clone(), spin, rebuild_delay_ms);
    }
    outcome
}

#[derive(Properties, PartialEq)]
pub struct OdometerProps {
    pub config: WidgetConfig,
}

#[function_component(Odometer)]
pub fn odometer(props: &OdometerProps) -> Html {
    let counter_ref = use_node_ref();
    let bar_ref = use_node_ref();
    let text_ref = use_node_ref();
    let widget: SharedWidget = use_mut_ref(|| None);
    let source = use_memo(props.config.endpoint.clone(), |endpoint| SignatureApi::new(endpoint.clone()));

    // Attach the widget to the rendered elements before the first poll
    {
        let widget = widget.clone();
        let counter_ref = counter_ref.clone();
        let bar_ref = bar_ref.clone();
        let text_ref = text_ref.clone();
        let source = source.clone();
        let config = props.config.clone();

        use_effect_with((), move |_| {
            let renderer = match (
                counter_ref.cast::<HtmlElement>(),
                bar_ref.cast::<HtmlElement>(),
                text_ref.cast::<HtmlElement>(),
            ) {
                (Some(counter), Some(bar), Some(text)) => {
                    DomRenderer::new(counter, bar, text, config.transition.clone())
                }
                _ => None,
            };

            match renderer {
                Some(renderer) => {
                    let narrow = is_narrow_viewport(&config.narrow_viewport_query);
                    let mut odometer = OdometerWidget::new(renderer, config);
                    odometer.resize(narrow);
                    odometer.mount();
                    *widget.borrow_mut() = Some(odometer);
                    Logger::info_with_component(
                        "odometer",
                        &format!("Odometer mounted, polling {}", source.endpoint()),
                    );
                }
                None => Logger::error_with_component("odometer", "Odometer render targets are missing"),
            }
            || ()
        });
    }

    let refresh = {
        let widget = widget.clone();
        let source = source.clone();
        let rebuild_delay_ms = props.config.rebuild_delay_ms;

        Callback::from(move |_: ()| {
            let widget = widget.clone();
            let source = source.clone();
            spawn_local(async move {
                poll_once(&widget, &*source, rebuild_delay_ms).await;
            });
        })
    };

    let on_viewport_settle = {
        let widget = widget.clone();
        let rebuild_delay_ms = props.config.rebuild_delay_ms;

        Callback::from(move |narrow: bool| {
            if let Some(RenderOutcome::Rebuilt(spin)) = with_widget(&widget, |widget| widget.resize(narrow)) {
                schedule_spin(widget.clone(), spin, rebuild_delay_ms);
            }
        })
    };

    use_periodic_refresh(props.config.poll_interval_ms, refresh);

    use_viewport_resize(
        props.config.resize_debounce_ms,
        props.config.narrow_viewport_query.clone(),
        on_viewport_settle,
    );

    // Children of the counter, bar and text are owned by DomRenderer, not by Yew
    html! {
        <div class="odometer-widget">
            <div id="counter" class="counter" ref={counter_ref}></div>
            <div class="progress-track">
                <div id="progress-bar" class="progress-bar" ref={bar_ref}></div>
            </div>
            <p id="progress-text" class="progress-text" ref={text_ref}></p>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use shared::{DataUnavailable, ProgressSnapshot};
    use std::collections::VecDeque;
    use wasm_bindgen::JsCast;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    struct ScriptedSource {
        responses: RefCell<VecDeque<Result<ProgressSnapshot, DataUnavailable>>>,
    }

    impl ScriptedSource {
        fn new(responses: Vec<Result<ProgressSnapshot, DataUnavailable>>) -> Self {
            Self {
                responses: RefCell::new(responses.into()),
            }
        }
    }

    #[async_trait(?Send)]
    impl SnapshotSource for ScriptedSource {
        async fn fetch(&self) -> Result<ProgressSnapshot, DataUnavailable> {
            self.responses
                .borrow_mut()
                .pop_front()
                .unwrap_or_else(|| Err(DataUnavailable::Network("script exhausted".to_string())))
        }
    }

    fn element() -> HtmlElement {
        web_sys::window()
            .and_then(|window| window.document())
            .and_then(|document| document.create_element("div").ok())
            .and_then(|element| element.dyn_into::<HtmlElement>().ok())
            .expect("browser test needs a document")
    }

    #[wasm_bindgen_test]
    async fn test_poll_recovers_after_failure() {
        let (counter, bar, text) = (element(), element(), element());
        let renderer = DomRenderer::new(counter.clone(), bar.clone(), text.clone(), "none").unwrap();
        let mut odometer = OdometerWidget::new(renderer, WidgetConfig::default());
        odometer.mount();
        let widget: SharedWidget = Rc::new(RefCell::new(Some(odometer)));

        let source = ScriptedSource::new(vec![
            Err(DataUnavailable::Network("connection refused".to_string())),
            Ok(ProgressSnapshot { count: 53_118, goal: 1_000_000 }),
        ]);

        let outcome = poll_once(&widget, &source, 0).await;
        assert_eq!(outcome, Some(PollOutcome::Unavailable));
        assert_eq!(text.text_content().as_deref(), Some("Could not load progress data."));

        let outcome = poll_once(&widget, &source, 0).await;
        assert!(matches!(outcome, Some(PollOutcome::Rendered(RenderOutcome::Rebuilt(_)))));
        assert_eq!(
            text.text_content().as_deref(),
            Some("53,118 / 1,000,000 signatures (5.31%)")
        );
        assert_eq!(counter.child_element_count(), 6);
    }

    #[wasm_bindgen_test]
    async fn test_poll_without_mounted_widget_is_skipped() {
        let widget: SharedWidget = Rc::new(RefCell::new(None));
        let source = ScriptedSource::new(vec![Ok(ProgressSnapshot { count: 1, goal: 10 })]);

        assert_eq!(poll_once(&widget, &source, 0).await, None);
        // The fetch never ran
        assert_eq!(source.responses.borrow().len(), 1);
    }
}
