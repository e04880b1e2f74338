//! Mechanical energy balance between the two tank surfaces.
//!
//! Both reservoirs are treated as large, so kinetic-energy terms vanish and
//! the balance reduces to static head plus friction and minor losses. All
//! heads are metres of the working fluid.

use pf_core::units::constants::G_MPS2;
use pf_fluids::FluidProps;
use pf_graph::{FlowPath, Segment};
use pf_hydraulics::{
    flow_regime, friction_factor, friction_head_loss, minor_head_loss, reynolds_number,
    FlowRegime,
};

#[derive(Debug, Clone)]
pub struct SegmentEval {
    pub label: String,
    pub velocity_m_s: f64,
    pub reynolds: f64,
    pub friction_factor: f64,
    pub regime: FlowRegime,
    pub head_loss_friction_m: f64,
    pub head_loss_minor_m: f64,
}

#[derive(Debug, Clone)]
pub struct PathEval {
    pub segments: Vec<SegmentEval>,
    pub head_loss_friction_m: f64,
    pub head_loss_minor_m: f64,
}

impl PathEval {
    pub fn head_loss_total_m(&self) -> f64 {
        self.head_loss_friction_m + self.head_loss_minor_m
    }
}

/// Head the system must overcome before any fluid moves:
/// (P_out - P_in) / (rho g) + (z_out - z_in).
///
/// Negative values mean gravity (or tank pressure) drives flow on its own.
pub fn static_head_m(path: &FlowPath, props: &FluidProps) -> f64 {
    let rho_g = props.rho.value * G_MPS2;
    (path.outlet.pressure.value - path.inlet.pressure.value) / rho_g
        + (path.outlet.elevation.value - path.inlet.elevation.value)
}

fn eval_segment(seg: &Segment, props: &FluidProps, q: f64) -> SegmentEval {
    if q <= 0.0 {
        // Zero flow is a defined state: no velocity, no losses, and the
        // friction correlations are never consulted.
        return SegmentEval {
            label: seg.label.clone(),
            velocity_m_s: 0.0,
            reynolds: 0.0,
            friction_factor: 0.0,
            regime: FlowRegime::Laminar,
            head_loss_friction_m: 0.0,
            head_loss_minor_m: 0.0,
        };
    }

    let area = seg.section.area().value;
    let d_h = seg.section.hydraulic_diameter().value;
    let v = q / area;
    let re = reynolds_number(props.rho.value, v, d_h, props.mu.value);
    let f = friction_factor(re, seg.roughness.value / d_h);
    SegmentEval {
        label: seg.label.clone(),
        velocity_m_s: v,
        reynolds: re,
        friction_factor: f,
        regime: flow_regime(re),
        head_loss_friction_m: friction_head_loss(f, seg.length.value, d_h, v),
        head_loss_minor_m: minor_head_loss(seg.k_minor, v),
    }
}

/// Evaluates every segment at volumetric flow rate `q` (m^3/s).
pub fn evaluate(path: &FlowPath, props: &FluidProps, q: f64) -> PathEval {
    let segments: Vec<SegmentEval> = path
        .segments
        .iter()
        .map(|s| eval_segment(s, props, q))
        .collect();
    let head_loss_friction_m = segments.iter().map(|s| s.head_loss_friction_m).sum();
    let head_loss_minor_m = segments.iter().map(|s| s.head_loss_minor_m).sum();
    PathEval { segments, head_loss_friction_m, head_loss_minor_m }
}

/// System head curve: static head plus all losses at `q`.
pub fn system_head_m(path: &FlowPath, props: &FluidProps, q: f64) -> f64 {
    static_head_m(path, props) + evaluate(path, props, q).head_loss_total_m()
}

/// Losses on the pump's suction side, for available-NPSH estimates. Zero
/// when the path has no pump.
pub fn suction_loss_m(path: &FlowPath, props: &FluidProps, q: f64) -> f64 {
    let Some(pump) = &path.pump else { return 0.0 };
    path.segments[..pump.suction_segments]
        .iter()
        .map(|s| {
            let e = eval_segment(s, props, q);
            e.head_loss_friction_m + e.head_loss_minor_m
        })
        .sum()
}
