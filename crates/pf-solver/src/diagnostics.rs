//! Engineering sanity checks layered over a solved state.
//!
//! Warnings never affect the numbers; they are produced even when the
//! iteration did not converge, so a client always sees what the best
//! estimate implies.

use std::fmt;

use pf_core::units::constants::G_MPS2;
use pf_fluids::FluidProps;
use pf_graph::FlowPath;
use pf_hydraulics::friction::{RE_LAMINAR_MAX, RE_TURBULENT_MIN};

use crate::balance::{suction_loss_m, PathEval};

pub const V_HIGH_M_S: f64 = 3.0;
pub const V_LOW_M_S: f64 = 0.5;
pub const NPSH_MARGIN_M: f64 = 1.0;

#[derive(Debug, Clone, PartialEq)]
pub enum Warning {
    HighVelocity { v_m_s: f64 },
    LowVelocity { v_m_s: f64 },
    LaminarFlow { reynolds: f64 },
    TransitionalFlow { reynolds: f64 },
    CavitationRisk { npsh_a_m: f64 },
    Cavitation { npsh_a_m: f64 },
    NoDrivingHead,
    ValveClosed,
    PumpInsufficient,
    NotConverged { iterations: u32, residual_m: f64 },
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::HighVelocity { v_m_s } => write!(
                f,
                "velocity {v_m_s:.2} m/s exceeds {V_HIGH_M_S} m/s; erosion and noise risk"
            ),
            Self::LowVelocity { v_m_s } => write!(
                f,
                "velocity {v_m_s:.2} m/s is below {V_LOW_M_S} m/s; sediment may settle"
            ),
            Self::LaminarFlow { reynolds } => {
                write!(f, "flow is laminar (Re = {reynolds:.0})")
            }
            Self::TransitionalFlow { reynolds } => write!(
                f,
                "Re = {reynolds:.0} lies in the transitional band {RE_LAMINAR_MAX:.0}..{RE_TURBULENT_MIN:.0}; friction prediction is unreliable"
            ),
            Self::CavitationRisk { npsh_a_m } => write!(
                f,
                "available NPSH {npsh_a_m:.2} m is under the {NPSH_MARGIN_M} m margin; cavitation risk at the pump"
            ),
            Self::Cavitation { npsh_a_m } => write!(
                f,
                "available NPSH {npsh_a_m:.2} m is negative; cavitation will occur at the pump"
            ),
            Self::NoDrivingHead => {
                write!(f, "no net driving head; the system is at rest")
            }
            Self::ValveClosed => write!(f, "a closed valve blocks the path; flow is zero"),
            Self::PumpInsufficient => {
                write!(f, "pump cannot overcome the static head; no flow develops")
            }
            Self::NotConverged { iterations, residual_m } => write!(
                f,
                "iteration stopped after {iterations} steps with residual {residual_m:.3e} m"
            ),
        }
    }
}

/// Flow-dependent checks at the solved rate `q`.
pub fn diagnose(path: &FlowPath, props: &FluidProps, eval: &PathEval, q: f64) -> Vec<Warning> {
    let mut out = Vec::new();
    if q <= 0.0 || eval.segments.is_empty() {
        return out;
    }

    let v_max = eval
        .segments
        .iter()
        .map(|s| s.velocity_m_s)
        .fold(0.0f64, f64::max);
    let v_min = eval
        .segments
        .iter()
        .map(|s| s.velocity_m_s)
        .fold(f64::INFINITY, f64::min);
    if v_max > V_HIGH_M_S {
        out.push(Warning::HighVelocity { v_m_s: v_max });
    } else if v_min < V_LOW_M_S {
        out.push(Warning::LowVelocity { v_m_s: v_min });
    }

    let re_max = eval
        .segments
        .iter()
        .map(|s| s.reynolds)
        .fold(0.0f64, f64::max);
    if re_max > 0.0 && re_max <= RE_LAMINAR_MAX {
        out.push(Warning::LaminarFlow { reynolds: re_max });
    } else if re_max > RE_LAMINAR_MAX && re_max < RE_TURBULENT_MIN {
        out.push(Warning::TransitionalFlow { reynolds: re_max });
    }

    if path.pump.is_some() {
        let npsh_a = available_npsh_m(path, props, q);
        if npsh_a < 0.0 {
            out.push(Warning::Cavitation { npsh_a_m: npsh_a });
        } else if npsh_a < NPSH_MARGIN_M {
            out.push(Warning::CavitationRisk { npsh_a_m: npsh_a });
        }
    }

    out
}

/// NPSH available at the pump flange: absolute suction-side head above the
/// vapour pressure, after suction losses.
pub fn available_npsh_m(path: &FlowPath, props: &FluidProps, q: f64) -> f64 {
    let rho_g = props.rho.value * G_MPS2;
    (path.inlet.pressure.value - props.p_vap.value) / rho_g - suction_loss_m(path, props, q)
}

/// Convergence check for an iterative solve, folded into the warning list
/// so a non-converged answer explains itself.
pub fn convergence_warning(converged: bool, iterations: u32, residual_m: f64) -> Option<Warning> {
    if converged {
        None
    } else {
        Some(Warning::NotConverged { iterations, residual_m })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::balance::evaluate;
    use pf_core::units::{constants::P_ATM_PA, m, pa};
    use pf_graph::{PumpInstall, PumpSpec, Segment, TankBoundary};
    use pf_hydraulics::CrossSection;

    fn water() -> FluidProps {
        FluidProps::resolve("water").unwrap()
    }

    fn path(d: f64) -> FlowPath {
        FlowPath {
            inlet: TankBoundary { elevation: m(10.0), pressure: pa(P_ATM_PA), fluid: None },
            outlet: TankBoundary { elevation: m(0.0), pressure: pa(P_ATM_PA), fluid: None },
            segments: vec![Segment {
                label: "main".to_string(),
                length: m(50.0),
                section: CrossSection::circular(m(d)).unwrap(),
                roughness: m(4.5e-5),
                k_minor: 0.0,
            }],
            pump: None,
            blocked: false,
        }
    }

    #[test]
    fn fast_flow_flags_high_velocity() {
        let p = path(0.05);
        let w = water();
        // ~5 m/s in a 50 mm pipe.
        let q = 5.0 * std::f64::consts::PI * 0.05 * 0.05 / 4.0;
        let warnings = diagnose(&p, &w, &evaluate(&p, &w, q), q);
        assert!(warnings.iter().any(|w| matches!(w, Warning::HighVelocity { .. })));
    }

    #[test]
    fn creeping_flow_flags_low_velocity_and_laminar() {
        let p = path(0.1);
        let w = water();
        let q = 1e-6;
        let warnings = diagnose(&p, &w, &evaluate(&p, &w, q), q);
        assert!(warnings.iter().any(|w| matches!(w, Warning::LowVelocity { .. })));
        assert!(warnings.iter().any(|w| matches!(w, Warning::LaminarFlow { .. })));
    }

    #[test]
    fn zero_flow_produces_no_flow_warnings() {
        let p = path(0.1);
        let w = water();
        assert!(diagnose(&p, &w, &evaluate(&p, &w, 0.0), 0.0).is_empty());
    }

    #[test]
    fn near_vacuum_suction_tank_cavitates() {
        let mut p = path(0.1);
        p.inlet.pressure = pa(5_000.0);
        p.pump = Some(PumpInstall { spec: PumpSpec::Unspecified, suction_segments: 1 });
        let w = water();
        let q = 0.01;
        let warnings = diagnose(&p, &w, &evaluate(&p, &w, q), q);
        assert!(warnings.iter().any(|w| matches!(w, Warning::Cavitation { .. })));
    }

    #[test]
    fn marginal_suction_head_flags_cavitation_risk() {
        let mut p = path(0.1);
        // Positive NPSH but inside the 1 m margin.
        p.inlet.pressure = pa(12_000.0);
        p.pump = Some(PumpInstall { spec: PumpSpec::Unspecified, suction_segments: 1 });
        let w = water();
        let q = 0.01;
        let npsh = available_npsh_m(&p, &w, q);
        assert!(npsh > 0.0 && npsh < NPSH_MARGIN_M);
        let warnings = diagnose(&p, &w, &evaluate(&p, &w, q), q);
        assert!(warnings.iter().any(|w| matches!(w, Warning::CavitationRisk { .. })));
    }

    #[test]
    fn warning_text_is_human_readable() {
        let text = Warning::TransitionalFlow { reynolds: 3000.0 }.to_string();
        assert!(text.contains("3000"));
        assert!(text.contains("transitional"));
    }
}
