//! Odometer widget core.
//!
//! Owns everything the original page kept in globals (initialisation flag,
//! last formatted count, element handles) and talks to the page only through
//! the [`Renderer`] capability, so it runs identically against the DOM and
//! against a recording double in tests.
//!
//! ## Render kinds
//!
//! - **Rebuild**: first render, or the slot structure changed (`9,999` ->
//!   `10,000`). All slots are recreated at offset zero without animation and a
//!   [`SpinTicket`] is returned; the host waits `rebuild_delay_ms` and calls
//!   [`OdometerWidget::settle`] to spin the wheels to their targets.
//! - **In-place update**: same structure. Only wheels whose target moved get a
//!   new (animated) offset.

use log::{debug, error, warn};

use crate::config::WidgetConfig;
use crate::error::DataUnavailable;
use crate::format::format_grouped;
use crate::progress::ProgressSnapshot;
use crate::sequencing::{PollSequencer, PollTicket};
use crate::slots::{slots_for, SlotSpec};

/// Presentation capability implemented by the host page.
pub trait Renderer {
    /// Replace the whole counter row. New wheels start unanimated at zero.
    fn set_slots(&mut self, slots: &[SlotSpec]);
    /// Move the wheel at `slot_index` (an index into the last `set_slots` row).
    fn set_offset(&mut self, slot_index: usize, offset: f64, animated: bool);
    /// Bar width in percent plus the status line.
    fn set_progress(&mut self, percentage: f64, text: &str);
    /// Replace the status line only (fallback path).
    fn set_status_text(&mut self, text: &str);
    /// Replace the counter row with plain text.
    fn set_counter_text(&mut self, _text: &str) {}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WidgetPhase {
    /// Placeholder shown, no poll resolved yet
    Uninitialized,
    /// At least one poll resolved, successfully or not
    Initialized,
}

/// Identifies the rebuild whose deferred spin is pending.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpinTicket(u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderOutcome {
    /// Slots were recreated; call `settle` with the ticket after the rebuild delay
    Rebuilt(SpinTicket),
    /// `changed` wheels received a new target
    Updated { changed: usize },
    Unchanged,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollOutcome {
    Rendered(RenderOutcome),
    /// Fallback message shown
    Unavailable,
    /// A newer poll already resolved; result dropped
    Stale,
}

#[derive(Debug)]
struct PendingSpin {
    ticket: SpinTicket,
    targets: Vec<(usize, f64)>,
}

pub struct OdometerWidget<R: Renderer> {
    renderer: R,
    config: WidgetConfig,
    phase: WidgetPhase,
    slots: Vec<SlotSpec>,
    /// Current offset per slot, `None` for separators
    offsets: Vec<Option<f64>>,
    last_known: Option<String>,
    digit_height: f64,
    pending_spin: Option<PendingSpin>,
    spins_issued: u64,
    sequencer: PollSequencer,
}

impl<R: Renderer> OdometerWidget<R> {
    pub fn new(renderer: R, config: WidgetConfig) -> Self {
        let digit_height = config.digit_height;
        Self {
            renderer,
            config,
            phase: WidgetPhase::Uninitialized,
            slots: Vec::new(),
            offsets: Vec::new(),
            last_known: None,
            digit_height,
            pending_spin: None,
            spins_issued: 0,
            sequencer: PollSequencer::new(),
        }
    }

    /// Show a single `0` wheel until the first poll resolves.
    pub fn mount(&mut self) {
        let placeholder = [SlotSpec::Digit(0)];
        self.renderer.set_slots(&placeholder);
        self.renderer.set_offset(0, 0.0, false);
        self.slots = placeholder.to_vec();
        self.offsets = vec![Some(0.0)];
        self.pending_spin = None;
    }

    pub fn begin_poll(&mut self) -> PollTicket {
        let ticket = self.sequencer.begin();
        debug!("Starting poll #{} ({} in flight)", ticket.sequence(), self.sequencer.in_flight());
        ticket
    }

    /// Apply the result of the poll identified by `ticket`.
    ///
    /// Never fails: errors are logged and turned into the fallback message.
    pub fn finish_poll(
        &mut self,
        ticket: PollTicket,
        result: Result<ProgressSnapshot, DataUnavailable>,
    ) -> PollOutcome {
        if !self.sequencer.accept(ticket) {
            warn!("Discarding stale result of poll #{}", ticket.sequence());
            return PollOutcome::Stale;
        }

        match result {
            Ok(snapshot) => PollOutcome::Rendered(self.render(snapshot)),
            Err(e) => {
                error!("Could not fetch data: {}", e);
                self.show_unavailable();
                PollOutcome::Unavailable
            }
        }
    }

    /// Render a snapshot: counter row, bar width and status line.
    pub fn render(&mut self, snapshot: ProgressSnapshot) -> RenderOutcome {
        let separator = self.config.group_separator;
        let formatted = format_grouped(snapshot.count, separator);

        let outcome = self.render_count(&formatted);
        self.renderer
            .set_progress(snapshot.percentage(), &snapshot.status_text(separator));

        self.last_known = Some(formatted);
        self.phase = WidgetPhase::Initialized;
        outcome
    }

    /// Spin freshly rebuilt wheels to their targets.
    ///
    /// Returns `false` when `ticket` belongs to a rebuild that has since been
    /// replaced, or the spin already ran.
    pub fn settle(&mut self, ticket: SpinTicket) -> bool {
        match self.pending_spin.take() {
            Some(pending) if pending.ticket == ticket => {
                for (index, target) in pending.targets {
                    self.renderer.set_offset(index, target, true);
                    self.offsets[index] = Some(target);
                }
                true
            }
            other => {
                debug!("Ignoring superseded spin {:?}", ticket);
                self.pending_spin = other;
                false
            }
        }
    }

    /// React to a settled viewport change.
    pub fn resize(&mut self, narrow: bool) -> RenderOutcome {
        let digit_height = self.config.digit_height_for(narrow);
        if digit_height != self.digit_height {
            debug!("Digit height {} -> {} (narrow: {})", self.digit_height, digit_height, narrow);
            self.digit_height = digit_height;
        }

        if self.phase == WidgetPhase::Uninitialized {
            return RenderOutcome::Unchanged;
        }

        match self.last_known.clone() {
            Some(formatted) => self.render_count(&formatted),
            None => RenderOutcome::Unchanged,
        }
    }

    fn render_count(&mut self, formatted: &str) -> RenderOutcome {
        let slots = slots_for(formatted);

        if self.phase == WidgetPhase::Uninitialized || !self.same_structure(&slots) {
            self.rebuild(slots)
        } else {
            self.update_in_place(slots)
        }
    }

    fn same_structure(&self, slots: &[SlotSpec]) -> bool {
        slots.len() == self.slots.len()
            && slots
                .iter()
                .zip(&self.slots)
                .all(|(new, old)| new.is_digit() == old.is_digit())
    }

    fn rebuild(&mut self, slots: Vec<SlotSpec>) -> RenderOutcome {
        debug!("Rebuilding odometer: {} -> {} slots", self.slots.len(), slots.len());

        self.renderer.set_slots(&slots);

        let mut targets = Vec::new();
        let mut offsets = Vec::with_capacity(slots.len());
        for (index, slot) in slots.iter().enumerate() {
            match slot.offset(self.digit_height) {
                Some(target) => {
                    self.renderer.set_offset(index, 0.0, false);
                    targets.push((index, target));
                    offsets.push(Some(0.0));
                }
                None => offsets.push(None),
            }
        }

        self.spins_issued += 1;
        let ticket = SpinTicket(self.spins_issued);
        self.pending_spin = Some(PendingSpin { ticket, targets });
        self.slots = slots;
        self.offsets = offsets;

        RenderOutcome::Rebuilt(ticket)
    }

    fn update_in_place(&mut self, slots: Vec<SlotSpec>) -> RenderOutcome {
        let targets: Vec<(usize, f64)> = slots
            .iter()
            .enumerate()
            .filter_map(|(index, slot)| slot.offset(self.digit_height).map(|target| (index, target)))
            .collect();
        self.slots = slots;

        // Wheels are still parked at zero; move the spin's destination instead.
        if let Some(pending) = self.pending_spin.as_mut() {
            let changed = targets
                .iter()
                .zip(&pending.targets)
                .filter(|(new, old)| new != old)
                .count();
            pending.targets = targets;
            return if changed == 0 {
                RenderOutcome::Unchanged
            } else {
                RenderOutcome::Updated { changed }
            };
        }

        let mut changed = 0;
        for (index, target) in targets {
            if self.offsets[index] != Some(target) {
                self.renderer.set_offset(index, target, true);
                self.offsets[index] = Some(target);
                changed += 1;
            }
        }

        if changed == 0 {
            RenderOutcome::Unchanged
        } else {
            debug!("Updated {} wheel(s) in place", changed);
            RenderOutcome::Updated { changed }
        }
    }

    fn show_unavailable(&mut self) {
        self.renderer.set_status_text(&self.config.fallback_message);

        if let Some(text) = &self.config.counter_error_text {
            self.renderer.set_counter_text(text);
            self.slots.clear();
            self.offsets.clear();
            self.pending_spin = None;
        }

        self.phase = WidgetPhase::Initialized;
    }

    pub fn phase(&self) -> WidgetPhase {
        self.phase
    }

    pub fn slots(&self) -> &[SlotSpec] {
        &self.slots
    }

    /// Current offset of every slot; separators are `None`.
    pub fn offsets(&self) -> &[Option<f64>] {
        &self.offsets
    }

    pub fn last_known(&self) -> Option<&str> {
        self.last_known.as_deref()
    }

    pub fn digit_height(&self) -> f64 {
        self.digit_height
    }

    pub fn has_pending_spin(&self) -> bool {
        self.pending_spin.is_some()
    }

    pub fn config(&self) -> &WidgetConfig {
        &self.config
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }
}
