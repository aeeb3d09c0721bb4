//! Request handling around the pure resolver.
//!
//! Validates the incoming window, looks the requested staff up in a booking
//! snapshot and hands the found candidates to
//! [`resolve_availability`](crate::availability::resolve_availability). The
//! bulk and single-candidate entry points share the same per-candidate step.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::assignment::{Assignment, Candidate};
use crate::availability::{self, AvailabilitySummary, ConflictReport};
use crate::error::{Result, ShiftError};
use crate::window::TimeWindow;

/// Read access to the booking store.
///
/// Implementations return the candidate's manual availability flag and the
/// blocking assignments on the dates `requested` occupies, or `None` for an
/// unknown id.
pub trait CandidateSource {
    fn candidate(&self, staff_id: &str, requested: &TimeWindow) -> Option<Candidate>;
}

/// A staff member as recorded in the roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaffRecord {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default = "default_available")]
    pub available: bool,
}

fn default_available() -> bool {
    true
}

/// An in-memory snapshot of staff and their assignments, all dates and statuses.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Roster {
    #[serde(default)]
    pub staff: Vec<StaffRecord>,
    #[serde(default)]
    pub assignments: Vec<Assignment>,
}

impl Roster {
    pub fn staff_member(&self, staff_id: &str) -> Option<&StaffRecord> {
        self.staff.iter().find(|s| s.id == staff_id)
    }
}

impl CandidateSource for Roster {
    fn candidate(&self, staff_id: &str, requested: &TimeWindow) -> Option<Candidate> {
        let record = self.staff_member(staff_id)?;
        Some(Candidate::from_snapshot(
            &record.id,
            record.available,
            &self.assignments,
            requested,
        ))
    }
}

/// Window fields exactly as received from the transport, not yet validated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowRequest {
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub start: Option<String>,
    #[serde(default)]
    pub end: Option<String>,
}

impl WindowRequest {
    pub fn new(date: &str, start: &str, end: &str) -> Self {
        Self {
            date: Some(date.to_string()),
            start: Some(start.to_string()),
            end: Some(end.to_string()),
        }
    }

    /// # Errors
    /// Returns `ShiftError::InvalidRequest` for a missing or malformed field.
    pub fn validate(&self) -> Result<TimeWindow> {
        TimeWindow::parse(
            self.date.as_deref(),
            self.start.as_deref(),
            self.end.as_deref(),
        )
    }
}

/// Bulk availability query: one shift, many staff.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailabilityRequest {
    pub window: WindowRequest,
    #[serde(default)]
    pub staff_ids: Vec<String>,
}

/// Answer to an [`AvailabilityRequest`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailabilityOutcome {
    #[serde(flatten)]
    pub summary: AvailabilitySummary,
    /// Requested ids absent from the snapshot, in request order. They are not
    /// counted in the summary.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub not_found: Vec<String>,
}

/// Check which of the requested staff can take the requested shift.
///
/// Duplicate ids are collapsed (first occurrence wins). Unknown ids are listed
/// in `not_found` and do not stop the others from being evaluated.
///
/// # Errors
/// Returns `ShiftError::InvalidRequest` if the window is malformed or no staff
/// ids were supplied, and `ShiftError::NotFound` if none of the ids are in the
/// snapshot.
pub fn check_availability<S>(
    source: &S,
    request: &AvailabilityRequest,
) -> Result<AvailabilityOutcome>
where
    S: CandidateSource + ?Sized,
{
    let window = request.window.validate().inspect_err(|e| {
        warn!(error = %e, "rejected availability request");
    })?;
    if request.staff_ids.is_empty() {
        warn!("rejected availability request with no staff ids");
        return Err(ShiftError::invalid("staff_ids", "at least one staff id is required"));
    }

    let mut seen = HashSet::new();
    let mut candidates = Vec::with_capacity(request.staff_ids.len());
    let mut not_found = Vec::new();
    for id in &request.staff_ids {
        if !seen.insert(id.as_str()) {
            continue;
        }
        match source.candidate(id, &window) {
            Some(candidate) => candidates.push(candidate),
            None => not_found.push(id.clone()),
        }
    }
    if !not_found.is_empty() {
        warn!(missing = ?not_found, "staff ids not found in snapshot");
    }
    // At least one resolved candidate, so `all_available` never holds vacuously.
    if candidates.is_empty() {
        return Err(ShiftError::NotFound(not_found.join(", ")));
    }

    let summary = availability::resolve_availability(&window, &candidates);
    debug!(
        window = %window,
        total = summary.total_requested,
        available = summary.available_count,
        "resolved availability"
    );

    Ok(AvailabilityOutcome { summary, not_found })
}

/// Check a single staff member against the requested shift.
///
/// # Errors
/// Returns `ShiftError::InvalidRequest` for a malformed window or blank id and
/// `ShiftError::NotFound` if the id is not in the snapshot.
pub fn check_staff<S>(
    source: &S,
    staff_id: &str,
    window: &WindowRequest,
) -> Result<ConflictReport>
where
    S: CandidateSource + ?Sized,
{
    let window = window.validate()?;
    if staff_id.trim().is_empty() {
        return Err(ShiftError::invalid("staff_id", "is required"));
    }
    let candidate = source.candidate(staff_id, &window).ok_or_else(|| {
        warn!(staff_id, "staff id not found in snapshot");
        ShiftError::NotFound(staff_id.to_string())
    })?;

    let report = availability::resolve_candidate(&window, &window.span(), &candidate);
    debug!(
        staff_id,
        window = %window,
        available = report.is_available(),
        "resolved staff availability"
    );
    Ok(report)
}
