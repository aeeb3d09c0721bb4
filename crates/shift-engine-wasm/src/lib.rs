//! WASM bindings for shift-engine.
//!
//! Exposes the availability resolver and the roster-backed checks to
//! JavaScript via `wasm-bindgen`. All complex types cross the boundary as JSON
//! strings using the same field names as the Rust types.
//!
//! ## Build process
//!
//! ```sh
//! cargo build -p shift-engine-wasm --target wasm32-unknown-unknown --release
//! wasm-bindgen --target nodejs --out-dir packages/shift-engine-js/wasm/ \
//!   target/wasm32-unknown-unknown/release/shift_engine_wasm.wasm
//! ```

use serde::{de::DeserializeOwned, Serialize};
use shift_engine::{AvailabilityRequest, Candidate, Roster, WindowRequest};
use wasm_bindgen::prelude::*;

// ---------------------------------------------------------------------------
// JSON helpers
// ---------------------------------------------------------------------------

fn from_json<T: DeserializeOwned>(what: &str, json: &str) -> Result<T, JsValue> {
    serde_json::from_str(json)
        .map_err(|e| JsValue::from_str(&format!("Invalid {} JSON: {}", what, e)))
}

fn to_json<T: Serialize>(value: &T) -> Result<String, JsValue> {
    serde_json::to_string(value)
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
}

fn to_js_error(e: shift_engine::ShiftError) -> JsValue {
    JsValue::from_str(&e.to_string())
}

// ---------------------------------------------------------------------------
// WASM exports
// ---------------------------------------------------------------------------

/// Resolve a shift against caller-supplied candidate snapshots.
///
/// `window_json` is `{date, start, end}` with `YYYY-MM-DD` and `HH:MM` strings.
/// `candidates_json` is an array of `{staff_id, available, assignments}`.
/// Returns the summary JSON: `total_requested`, `available_count`,
/// `unavailable_count`, `all_available` and `reports`.
#[wasm_bindgen(js_name = "resolveAvailability")]
pub fn resolve_availability(window_json: &str, candidates_json: &str) -> Result<String, JsValue> {
    let window: WindowRequest = from_json("window", window_json)?;
    let window = window.validate().map_err(to_js_error)?;
    let candidates: Vec<Candidate> = from_json("candidates", candidates_json)?;

    let summary = shift_engine::resolve_availability(&window, &candidates);
    to_json(&summary)
}

/// Check many staff against one shift using a roster snapshot.
///
/// `request_json` is `{window: {date, start, end}, staff_ids: [...]}` and
/// `roster_json` is `{staff: [...], assignments: [...]}`. Unknown ids are
/// returned in `not_found` rather than failing the call, unless none of the
/// requested ids are in the roster.
#[wasm_bindgen(js_name = "checkAvailability")]
pub fn check_availability(request_json: &str, roster_json: &str) -> Result<String, JsValue> {
    let request: AvailabilityRequest = from_json("request", request_json)?;
    let roster: Roster = from_json("roster", roster_json)?;

    let outcome = shift_engine::check_availability(&roster, &request).map_err(to_js_error)?;
    to_json(&outcome)
}

/// Check one staff member against one shift using a roster snapshot.
///
/// Fails with "Staff member not found" when `staff_id` is not in the roster.
#[wasm_bindgen(js_name = "checkStaff")]
pub fn check_staff(
    staff_id: &str,
    window_json: &str,
    roster_json: &str,
) -> Result<String, JsValue> {
    let window: WindowRequest = from_json("window", window_json)?;
    let roster: Roster = from_json("roster", roster_json)?;

    let report = shift_engine::check_staff(&roster, staff_id, &window).map_err(to_js_error)?;
    to_json(&report)
}
