//! Serializable outcome of one analysis.
//!
//! Every field carries its SI unit in the name so a reading client never
//! has to guess. Optional fields are omitted from the serialized form when
//! the mode that fills them did not run.

use serde::{Deserialize, Serialize};

/// Per-segment breakdown at the solved flow rate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SegmentResult {
    pub label: String,
    pub velocity_m_s: f64,
    pub reynolds: f64,
    pub friction_factor: f64,
    pub head_loss_friction_m: f64,
    pub head_loss_minor_m: f64,
}

/// One sample of a system or pump curve sweep.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CurvePoint {
    pub q_m3_s: f64,
    pub head_m: f64,
}

/// Full solution snapshot.
///
/// Reference scalars (`velocity_m_s`, `reynolds`, `friction_factor`,
/// `regime`) come from the first segment; `segments` has the rest. At zero
/// flow everything flow-derived is exactly zero and the regime reads
/// "laminar".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolveResult {
    pub mode: String,
    pub q_m3_s: f64,
    pub mdot_kg_s: f64,
    pub velocity_m_s: f64,
    pub reynolds: f64,
    pub friction_factor: f64,
    pub regime: String,
    pub head_loss_friction_m: f64,
    pub head_loss_minor_m: f64,
    pub head_loss_total_m: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pump_head_m: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hydraulic_power_w: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shaft_power_w: Option<f64>,
    pub p_inlet_pa: f64,
    pub p_outlet_pa: f64,
    pub delta_p_pa: f64,
    /// Solved pipe diameter, inverse sizing only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diameter_m: Option<f64>,
    /// Solved pipe length, inverse sizing only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub length_m: Option<f64>,
    pub converged: bool,
    pub iterations: u32,
    pub residual_m: f64,
    pub warnings: Vec<String>,
    pub segments: Vec<SegmentResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub curve: Option<Vec<CurvePoint>>,
}

impl SolveResult {
    /// Zero-flow skeleton for a mode. The defined terminal state when the
    /// path is blocked or nothing drives flow.
    pub fn at_rest(mode: &str, segment_labels: &[String]) -> Self {
        Self {
            mode: mode.to_string(),
            q_m3_s: 0.0,
            mdot_kg_s: 0.0,
            velocity_m_s: 0.0,
            reynolds: 0.0,
            friction_factor: 0.0,
            regime: "laminar".to_string(),
            head_loss_friction_m: 0.0,
            head_loss_minor_m: 0.0,
            head_loss_total_m: 0.0,
            pump_head_m: None,
            hydraulic_power_w: None,
            shaft_power_w: None,
            p_inlet_pa: 0.0,
            p_outlet_pa: 0.0,
            delta_p_pa: 0.0,
            diameter_m: None,
            length_m: None,
            converged: true,
            iterations: 0,
            residual_m: 0.0,
            warnings: Vec::new(),
            segments: segment_labels
                .iter()
                .map(|label| SegmentResult {
                    label: label.clone(),
                    velocity_m_s: 0.0,
                    reynolds: 0.0,
                    friction_factor: 0.0,
                    head_loss_friction_m: 0.0,
                    head_loss_minor_m: 0.0,
                })
                .collect(),
            curve: None,
        }
    }
}
