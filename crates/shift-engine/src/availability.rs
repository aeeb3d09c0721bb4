//! Availability resolution: can these candidates take this shift?
//!
//! This is a pure decision function. It reads caller-supplied snapshots, does
//! no I/O and never fails: "unavailable" is a valid answer, not an error.
//! Request validation happens before it runs (see [`crate::service`]).

use serde::{Deserialize, Serialize};

use crate::assignment::Candidate;
use crate::conflict::{self, ScheduleConflict};
use crate::window::{Span, TimeWindow};

/// Why a candidate cannot take the shift.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum UnavailableReason {
    /// The staff member has switched their availability flag off.
    NotOptedIn,
    /// The staff member already holds an overlapping blocking assignment.
    ScheduleConflict,
}

/// Outcome for a single candidate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "kebab-case")]
pub enum Verdict {
    Available,
    NotOptedIn,
    ScheduleConflict(ScheduleConflict),
}

impl Verdict {
    pub fn is_available(&self) -> bool {
        matches!(self, Verdict::Available)
    }

    /// `None` when the candidate is available.
    pub fn reason(&self) -> Option<UnavailableReason> {
        match self {
            Verdict::Available => None,
            Verdict::NotOptedIn => Some(UnavailableReason::NotOptedIn),
            Verdict::ScheduleConflict(_) => Some(UnavailableReason::ScheduleConflict),
        }
    }

    pub fn conflict(&self) -> Option<&ScheduleConflict> {
        match self {
            Verdict::ScheduleConflict(c) => Some(c),
            _ => None,
        }
    }
}

/// Per-candidate entry of an [`AvailabilitySummary`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConflictReport {
    pub staff_id: String,
    #[serde(flatten)]
    pub verdict: Verdict,
}

impl ConflictReport {
    pub fn is_available(&self) -> bool {
        self.verdict.is_available()
    }
}

/// Result of resolving a shift against a list of candidates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailabilitySummary {
    pub total_requested: usize,
    pub available_count: usize,
    pub unavailable_count: usize,
    /// True iff every candidate is available (vacuously true for no candidates).
    pub all_available: bool,
    /// One entry per candidate, in input order.
    pub reports: Vec<ConflictReport>,
}

impl AvailabilitySummary {
    /// Derive the counts from the reports so they can never disagree.
    pub fn from_reports(reports: Vec<ConflictReport>) -> Self {
        let total_requested = reports.len();
        let available_count = reports.iter().filter(|r| r.is_available()).count();
        Self {
            total_requested,
            available_count,
            unavailable_count: total_requested - available_count,
            all_available: available_count == total_requested,
            reports,
        }
    }
}

/// Decide, for each candidate, whether they can take the `requested` shift.
///
/// A candidate whose manual availability flag is off is `not-opted-in` without
/// looking at the calendar. Otherwise the first blocking assignment
/// that overlaps the requested shift makes them a `schedule-conflict`.
///
/// Output order matches `candidates`. The function is deterministic.
pub fn resolve_availability(
    requested: &TimeWindow,
    candidates: &[Candidate],
) -> AvailabilitySummary {
    let span = requested.span();
    let reports = candidates
        .iter()
        .map(|c| resolve_candidate(requested, &span, c))
        .collect();
    AvailabilitySummary::from_reports(reports)
}

/// Resolve one candidate; `span` is `requested` already normalized.
///
/// Assignments that do not block the requested shift (wrong status, or booked
/// on a date the shift does not occupy) are ignored, whatever the caller
/// passed in.
pub fn resolve_candidate(
    requested: &TimeWindow,
    span: &Span,
    candidate: &Candidate,
) -> ConflictReport {
    let verdict = if !candidate.available {
        Verdict::NotOptedIn
    } else {
        let blocking = candidate.assignments.iter().filter(|a| a.blocks(requested));
        match conflict::first_conflict(span, blocking) {
            Some(c) => Verdict::ScheduleConflict(c),
            None => Verdict::Available,
        }
    };

    ConflictReport {
        staff_id: candidate.staff_id.clone(),
        verdict,
    }
}
