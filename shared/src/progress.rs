//! Progress snapshot: the `(count, goal)` pair fetched on every poll.

use serde::Deserialize;

use crate::error::DataUnavailable;
use crate::format::{format_grouped, format_percentage};

/// Wire shape of the progression endpoint. Other fields are ignored.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressionResponse {
    pub signature_count: u64,
    pub goal: u64,
}

/// The most recently fetched signature count and its goal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressSnapshot {
    pub count: u64,
    /// Always positive
    pub goal: u64,
}

impl ProgressSnapshot {
    /// Build a snapshot, rejecting a zero goal.
    pub fn new(count: u64, goal: u64) -> Result<Self, DataUnavailable> {
        if goal == 0 {
            return Err(DataUnavailable::Malformed("goal must be positive".to_string()));
        }
        Ok(Self { count, goal })
    }

    /// Share of the goal reached, clamped to `[0, 100]`.
    pub fn percentage(&self) -> f64 {
        let percentage = self.count as f64 / self.goal as f64 * 100.0;
        percentage.min(100.0)
    }

    /// Status line, e.g. `"53,118 / 1,000,000 signatures (5.31%)"`.
    pub fn status_text(&self, separator: char) -> String {
        format!(
            "{} / {} signatures ({}%)",
            format_grouped(self.count, separator),
            format_grouped(self.goal, separator),
            format_percentage(self.percentage())
        )
    }
}

impl TryFrom<ProgressionResponse> for ProgressSnapshot {
    type Error = DataUnavailable;

    fn try_from(response: ProgressionResponse) -> Result<Self, Self::Error> {
        ProgressSnapshot::new(response.signature_count, response.goal)
    }
}

/// Turn an HTTP status and body into a snapshot.
///
/// Non-2xx statuses, undecodable bodies, missing/negative/fractional fields and
/// a zero goal all collapse into [`DataUnavailable`].
pub fn parse_snapshot(status: u16, body: &str) -> Result<ProgressSnapshot, DataUnavailable> {
    if !(200..300).contains(&status) {
        return Err(DataUnavailable::Status(status));
    }

    let response: ProgressionResponse = serde_json::from_str(body)
        .map_err(|e| DataUnavailable::Malformed(e.to_string()))?;

    response.try_into()
}
