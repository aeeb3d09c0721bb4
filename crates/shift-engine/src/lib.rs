//! # shift-engine
//!
//! Deterministic shift conflict detection for a staff-hiring marketplace.
//!
//! Given a requested shift and a set of candidate staff, decides who is free,
//! who has switched themselves off, and who is already booked, naming the
//! colliding booking. Overnight shifts roll into the next day and shifts that
//! merely touch (one ends as the other starts) never conflict.
//!
//! ## Modules
//!
//! - [`window`] — Shift windows and their overnight normalization
//! - [`assignment`] — Assignment lifecycle states and candidate snapshots
//! - [`conflict`] — Find the booking that collides with a requested shift
//! - [`availability`] — The pure resolver and its summary report
//! - [`service`] — Request validation and booking-store lookups around the resolver
//! - [`error`] — Error types

pub mod assignment;
pub mod availability;
pub mod conflict;
pub mod error;
pub mod service;
pub mod window;

pub use assignment::{Assignment, AssignmentStatus, Candidate};
pub use availability::{
    resolve_availability, AvailabilitySummary, ConflictReport, UnavailableReason, Verdict,
};
pub use conflict::ScheduleConflict;
pub use error::ShiftError;
pub use service::{
    check_availability, check_staff, AvailabilityOutcome, AvailabilityRequest, CandidateSource,
    Roster, StaffRecord, WindowRequest,
};
pub use window::{Span, TimeWindow};
