//! [`Renderer`] backed by real DOM elements.
//!
//! Markup produced for a digit slot:
//!
//! ```html
//! <div class="digit-slot">
//!   <div class="digit-reel" style="transform: translateY(-45rem)">
//!     <div class="digit">0</div> ... <div class="digit">9</div>
//!   </div>
//! </div>
//! ```
//!
//! Separators become `<div class="comma">,</div>`. Clipping to one glyph is
//! done by the stylesheet (`.digit-slot { overflow: hidden }`).

use shared::{Renderer, SlotSpec, WHEEL_GLYPHS};
use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlElement};

use crate::services::logging::Logger;

const COMPONENT: &str = "dom-renderer";

pub struct DomRenderer {
    document: Document,
    counter: HtmlElement,
    progress_bar: HtmlElement,
    progress_text: HtmlElement,
    transition: String,
    /// Reel element per slot; `None` for separators
    reels: Vec<Option<HtmlElement>>,
}

impl DomRenderer {
    /// Returns `None` when the counter is not attached to a document.
    pub fn new(
        counter: HtmlElement,
        progress_bar: HtmlElement,
        progress_text: HtmlElement,
        transition: impl Into<String>,
    ) -> Option<Self> {
        let document = counter.owner_document()?;
        Some(Self {
            document,
            counter,
            progress_bar,
            progress_text,
            transition: transition.into(),
            reels: Vec::new(),
        })
    }

    fn create_div(&self, class: &str) -> Option<HtmlElement> {
        match self
            .document
            .create_element("div")
            .ok()
            .and_then(|element| element.dyn_into::<HtmlElement>().ok())
        {
            Some(div) => {
                div.set_class_name(class);
                Some(div)
            }
            None => {
                Logger::error_with_component(COMPONENT, &format!("Failed to create .{} element", class));
                None
            }
        }
    }

    fn build_wheel(&self) -> Option<(HtmlElement, HtmlElement)> {
        let slot = self.create_div("digit-slot")?;
        let reel = self.create_div("digit-reel")?;

        for glyph in WHEEL_GLYPHS {
            let digit = self.create_div("digit")?;
            digit.set_text_content(Some(&glyph.to_string()));
            reel.append_child(&digit).ok()?;
        }

        set_style(&reel, "transition", "none");
        set_style(&reel, "transform", &translate(0.0));
        slot.append_child(&reel).ok()?;
        Some((slot, reel))
    }

    fn build_separator(&self, ch: char) -> Option<HtmlElement> {
        let separator = self.create_div("comma")?;
        separator.set_text_content(Some(&ch.to_string()));
        Some(separator)
    }
}

impl Renderer for DomRenderer {
    fn set_slots(&mut self, slots: &[SlotSpec]) {
        self.counter.set_inner_html("");
        self.reels.clear();

        for slot in slots {
            let (node, reel) = match slot {
                SlotSpec::Digit(_) => match self.build_wheel() {
                    Some((node, reel)) => (Some(node), Some(reel)),
                    None => (None, None),
                },
                SlotSpec::Separator(ch) => (self.build_separator(*ch), None),
            };

            if let Some(node) = node {
                if self.counter.append_child(&node).is_err() {
                    Logger::error_with_component(COMPONENT, "Failed to attach slot to counter");
                }
            }
            self.reels.push(reel);
        }
    }

    fn set_offset(&mut self, slot_index: usize, offset: f64, animated: bool) {
        let Some(Some(reel)) = self.reels.get(slot_index) else {
            Logger::warn_with_component(COMPONENT, &format!("No wheel at slot {}", slot_index));
            return;
        };

        let transition = if animated { self.transition.as_str() } else { "none" };
        set_style(reel, "transition", transition);
        set_style(reel, "transform", &translate(offset));
    }

    fn set_progress(&mut self, percentage: f64, text: &str) {
        set_style(&self.progress_bar, "width", &format!("{}%", percentage));
        self.progress_text.set_text_content(Some(text));
    }

    fn set_status_text(&mut self, text: &str) {
        self.progress_text.set_text_content(Some(text));
    }

    fn set_counter_text(&mut self, text: &str) {
        self.reels.clear();
        self.counter.set_text_content(Some(text));
    }
}

fn translate(offset: f64) -> String {
    format!("translateY({}rem)", offset)
}

fn set_style(element: &HtmlElement, property: &str, value: &str) {
    if element.style().set_property(property, value).is_err() {
        Logger::warn_with_component(COMPONENT, &format!("Could not set {} to {}", property, value));
    }
}
