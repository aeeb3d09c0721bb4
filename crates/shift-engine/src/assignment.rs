//! Staff assignments and the candidate snapshots built from them.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ShiftError;
use crate::window::TimeWindow;

/// Lifecycle state of an assignment in the booking store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AssignmentStatus {
    Requested,
    Accepted,
    Confirmed,
    InProgress,
    Completed,
    Cancelled,
    Declined,
}

impl AssignmentStatus {
    pub const ALL: [AssignmentStatus; 7] = [
        AssignmentStatus::Requested,
        AssignmentStatus::Accepted,
        AssignmentStatus::Confirmed,
        AssignmentStatus::InProgress,
        AssignmentStatus::Completed,
        AssignmentStatus::Cancelled,
        AssignmentStatus::Declined,
    ];

    /// Only accepted, confirmed and in-progress work prevents a new overlapping shift.
    pub fn is_blocking(self) -> bool {
        matches!(
            self,
            AssignmentStatus::Accepted | AssignmentStatus::Confirmed | AssignmentStatus::InProgress
        )
    }

    pub fn as_str(self) -> &'static str {
        match self {
            AssignmentStatus::Requested => "requested",
            AssignmentStatus::Accepted => "accepted",
            AssignmentStatus::Confirmed => "confirmed",
            AssignmentStatus::InProgress => "in-progress",
            AssignmentStatus::Completed => "completed",
            AssignmentStatus::Cancelled => "cancelled",
            AssignmentStatus::Declined => "declined",
        }
    }
}

impl fmt::Display for AssignmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AssignmentStatus {
    type Err = ShiftError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AssignmentStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| ShiftError::invalid("status", format!("unknown status '{}'", s)))
    }
}

/// One staff member committed to one shift.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignment {
    pub id: String,
    pub staff_id: String,
    /// Human-readable name of the booking, e.g. the event title.
    pub label: String,
    pub window: TimeWindow,
    pub status: AssignmentStatus,
}

impl Assignment {
    /// True when this assignment is blocking and booked on a calendar date
    /// the `requested` shift occupies.
    pub fn blocks(&self, requested: &TimeWindow) -> bool {
        self.status.is_blocking() && requested.covers_date(self.window.date)
    }
}

/// A staff member being considered for a shift.
///
/// `assignments` holds the blocking assignments on the dates the requested
/// shift occupies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    pub staff_id: String,
    /// Manual opt-out flag, independent of the calendar.
    pub available: bool,
    #[serde(default)]
    pub assignments: Vec<Assignment>,
}

impl Candidate {
    pub fn new(staff_id: impl Into<String>, available: bool) -> Self {
        Self {
            staff_id: staff_id.into(),
            available,
            assignments: Vec::new(),
        }
    }

    /// Build a candidate from a store snapshot, keeping only this staff
    /// member's assignments that block the `requested` shift. Snapshot order
    /// is preserved.
    pub fn from_snapshot<'a, I>(
        staff_id: &str,
        available: bool,
        assignments: I,
        requested: &TimeWindow,
    ) -> Self
    where
        I: IntoIterator<Item = &'a Assignment>,
    {
        Self {
            staff_id: staff_id.to_string(),
            available,
            assignments: assignments
                .into_iter()
                .filter(|a| a.staff_id == staff_id && a.blocks(requested))
                .cloned()
                .collect(),
        }
    }

    pub fn with_assignment(mut self, assignment: Assignment) -> Self {
        self.assignments.push(assignment);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blocking_statuses() {
        let blocking: Vec<_> = AssignmentStatus::ALL
            .into_iter()
            .filter(|s| s.is_blocking())
            .collect();
        assert_eq!(
            blocking,
            vec![
                AssignmentStatus::Accepted,
                AssignmentStatus::Confirmed,
                AssignmentStatus::InProgress
            ]
        );
    }

    #[test]
    fn status_wire_names_roundtrip_through_from_str() {
        for status in AssignmentStatus::ALL {
            let json = serde_json::to_string(&status).unwrap();
            assert_eq!(json, format!("\"{}\"", status.as_str()));
            assert_eq!(status.as_str().parse::<AssignmentStatus>().unwrap(), status);
        }
    }

    #[test]
    fn unknown_status_is_invalid_request() {
        let err = "pending".parse::<AssignmentStatus>().unwrap_err();
        assert!(matches!(err, ShiftError::InvalidRequest { ref field, .. } if field == "status"));
    }
}
