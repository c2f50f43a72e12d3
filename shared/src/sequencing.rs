//! Ordering helpers for overlapping asynchronous work.
//!
//! Fetches may overlap when a response is slower than the poll interval, and
//! resize events arrive in bursts. Both are resolved with monotonically
//! increasing tickets instead of cancellation.

/// Issued when a poll starts; carried back with its result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct PollTicket(u64);

impl PollTicket {
    pub fn sequence(&self) -> u64 {
        self.0
    }
}

/// Gives overlapping polls last-request-wins semantics.
#[derive(Debug, Default)]
pub struct PollSequencer {
    issued: u64,
    accepted: u64,
}

impl PollSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin(&mut self) -> PollTicket {
        self.issued += 1;
        PollTicket(self.issued)
    }

    /// Accept a result iff it belongs to a newer request than any result
    /// already accepted.
    pub fn accept(&mut self, ticket: PollTicket) -> bool {
        if ticket.0 <= self.accepted {
            return false;
        }
        self.accepted = ticket.0;
        true
    }

    /// Number of polls started but not yet superseded or accepted.
    pub fn in_flight(&self) -> u64 {
        self.issued - self.accepted
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DebounceTicket(u64);

/// Trailing-edge debouncer: only the last trigger of a burst fires.
///
/// The host sleeps for the debounce window after each trigger and then asks
/// whether its ticket is still the latest.
#[derive(Debug, Default)]
pub struct Debouncer {
    latest: u64,
}

impl Debouncer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn trigger(&mut self) -> DebounceTicket {
        self.latest += 1;
        DebounceTicket(self.latest)
    }

    pub fn is_latest(&self, ticket: DebounceTicket) -> bool {
        ticket.0 == self.latest
    }
}
