//! Detect which existing assignments collide with a requested shift.
//!
//! Both sides are normalized to absolute spans first so overnight shifts
//! compare correctly. Adjacent shifts (where one ends exactly when another
//! starts) are NOT conflicts.

use serde::{Deserialize, Serialize};

use crate::assignment::Assignment;
use crate::window::{Span, TimeWindow};

/// An existing assignment that collides with the requested shift.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleConflict {
    pub assignment_id: String,
    pub label: String,
    pub window: TimeWindow,
    pub overlap_minutes: i64,
}

impl ScheduleConflict {
    fn new(assignment: &Assignment, overlap_minutes: i64) -> Self {
        Self {
            assignment_id: assignment.id.clone(),
            label: assignment.label.clone(),
            window: assignment.window,
            overlap_minutes,
        }
    }
}

/// Return the first assignment that overlaps `requested`.
///
/// Conflicts are not aggregated: the first colliding assignment in input
/// order is the one reported.
pub fn first_conflict<'a, I>(requested: &Span, assignments: I) -> Option<ScheduleConflict>
where
    I: IntoIterator<Item = &'a Assignment>,
{
    assignments.into_iter().find_map(|a| {
        let existing = a.window.span();
        requested
            .overlaps(&existing)
            .then(|| ScheduleConflict::new(a, requested.overlap_minutes(&existing)))
    })
}
