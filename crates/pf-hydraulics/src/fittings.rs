//! Loss coefficients for common fittings.
//!
//! Values are the textbook K factors for threaded and flanged fittings at
//! nominal sizes; they are meant for quick sizing work, not vendor data.

use crate::HydraulicsError;

#[derive(Debug, Clone, Copy)]
pub struct FittingEntry {
    pub id: &'static str,
    pub k: f64,
}

const CATALOG: &[FittingEntry] = &[
    FittingEntry { id: "elbow_90_flanged", k: 0.3 },
    FittingEntry { id: "elbow_90_threaded", k: 1.5 },
    FittingEntry { id: "elbow_90_long_radius_flanged", k: 0.2 },
    FittingEntry { id: "elbow_90_long_radius_threaded", k: 0.7 },
    FittingEntry { id: "elbow_45_flanged", k: 0.2 },
    FittingEntry { id: "elbow_45_threaded", k: 0.4 },
    FittingEntry { id: "return_bend_180_flanged", k: 0.2 },
    FittingEntry { id: "return_bend_180_threaded", k: 1.5 },
    FittingEntry { id: "tee_line_flow_flanged", k: 0.2 },
    FittingEntry { id: "tee_line_flow_threaded", k: 0.9 },
    FittingEntry { id: "tee_branch_flow_flanged", k: 1.0 },
    FittingEntry { id: "tee_branch_flow_threaded", k: 2.0 },
    FittingEntry { id: "valve_globe_open", k: 10.0 },
    FittingEntry { id: "valve_globe_half_open", k: 20.0 },
    FittingEntry { id: "valve_angle_open", k: 2.0 },
    FittingEntry { id: "valve_gate_open", k: 0.15 },
    FittingEntry { id: "valve_gate_1/4_closed", k: 0.26 },
    FittingEntry { id: "valve_gate_1/2_closed", k: 2.1 },
    FittingEntry { id: "valve_gate_3/4_closed", k: 17.0 },
    FittingEntry { id: "valve_ball_open", k: 0.05 },
    FittingEntry { id: "valve_check_swing", k: 2.0 },
    FittingEntry { id: "entrance_square", k: 0.5 },
    FittingEntry { id: "entrance_rounded", k: 0.04 },
    FittingEntry { id: "entrance_reentrant", k: 0.8 },
    FittingEntry { id: "exit", k: 1.0 },
    FittingEntry { id: "union_threaded", k: 0.08 },
];

pub fn fitting_catalog() -> &'static [FittingEntry] {
    CATALOG
}

/// Looks up a fitting K by id, case-insensitively.
pub fn fitting_k(id: &str) -> Result<f64, HydraulicsError> {
    let wanted = id.trim();
    CATALOG
        .iter()
        .find(|e| e.id.eq_ignore_ascii_case(wanted))
        .map(|e| e.k)
        .ok_or_else(|| HydraulicsError::UnknownFitting { id: wanted.to_string() })
}
