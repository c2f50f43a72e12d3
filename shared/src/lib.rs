//! Platform-independent core of the signature odometer.
//!
//! Everything here builds and tests natively; the browser host in the
//! `frontend` crate only supplies a [`Renderer`], a [`SnapshotSource`] and the
//! timers that drive them.

pub mod config;
pub mod error;
pub mod format;
pub mod progress;
pub mod sequencing;
pub mod slots;
pub mod source;
pub mod widget;

pub use config::WidgetConfig;
pub use error::{ConfigError, DataUnavailable};
pub use format::{format_grouped, format_percentage};
pub use progress::{parse_snapshot, ProgressSnapshot, ProgressionResponse};
pub use sequencing::{DebounceTicket, Debouncer, PollSequencer, PollTicket};
pub use slots::{digit_count, slots_for, wheel_offset, SlotSpec, WHEEL_GLYPHS};
pub use source::SnapshotSource;
pub use widget::{OdometerWidget, PollOutcome, RenderOutcome, Renderer, SpinTicket, WidgetPhase};
