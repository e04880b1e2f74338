//! The eight analysis strategies.
//!
//! Every strategy reduces to the same mechanical energy balance; they
//! differ only in which quantity is unknown. Iterative modes share the
//! bracketing root finder and always return a result, converged or not.
//! Hard errors are reserved for problems no iteration could fix.

use tracing::debug;

use pf_core::units::constants::G_MPS2;
use pf_fluids::FluidProps;
use pf_graph::{FlowPath, Segment};
use pf_hydraulics::{friction_factor, reynolds_number, CrossSection};

use crate::balance::{evaluate, static_head_m, system_head_m};
use crate::bracket::{solve_decreasing, BracketConfig, RootFind};
use crate::diagnostics::{convergence_warning, diagnose, Warning};
use crate::error::SolveError;
use crate::mode::Mode;
use crate::result::{CurvePoint, SegmentResult, SolveResult};

/// Tuning knobs shared by every iterative mode.
#[derive(Debug, Clone, Copy)]
pub struct SolverConfig {
    pub root: BracketConfig,
    /// How far apart (in metres of head) a supplied flow/power pair may be
    /// before the consistency check reports it as unsatisfied.
    pub consistency_tol_m: f64,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self { root: BracketConfig::default(), consistency_tol_m: 1e-3 }
    }
}

const SEED_VELOCITY_M_S: f64 = 1.0;
const SWEEP_VELOCITY_MAX_M_S: f64 = 10.0;

/// Runs one analysis on a validated path.
pub fn solve(
    path: &FlowPath,
    props: &FluidProps,
    mode: &Mode,
    cfg: &SolverConfig,
) -> Result<SolveResult, SolveError> {
    debug!(mode = mode.name(), segments = path.segments.len(), "starting analysis");

    if path.blocked {
        let mut r = at_rest(mode, path);
        r.warnings.push(Warning::ValveClosed.to_string());
        return Ok(r);
    }

    match mode {
        Mode::Gravity => solve_gravity(path, props, mode, cfg),
        Mode::SystemCurve { points } => solve_system_curve(path, props, mode, *points),
        Mode::GivenPumpHead { head_m } => solve_given_head(path, props, mode, *head_m, cfg),
        Mode::GivenPumpPower { power_w, efficiency } => {
            solve_given_power(path, props, mode, *power_w, *efficiency, cfg)
        }
        Mode::GivenFlowAndPower { q_m3_s, power_w, efficiency } => {
            solve_flow_power_check(path, props, mode, *q_m3_s, *power_w, *efficiency, cfg)
        }
        Mode::OperatingPoint { curve } => {
            let h0 = curve.head_at(0.0);
            if h0 <= static_head_m(path, props) {
                let mut r = at_rest(mode, path);
                r.converged = false;
                r.pump_head_m = Some(h0);
                r.warnings.push(Warning::PumpInsufficient.to_string());
                return Ok(r);
            }
            let out = run_root(path, cfg, |q| {
                curve.head_at(q) - system_head_m(path, props, q)
            });
            let mut r = snapshot(path, props, mode, &out);
            let h = curve.head_at(out.x);
            r.pump_head_m = Some(h);
            r.hydraulic_power_w = Some(props.rho.value * G_MPS2 * out.x * h);
            Ok(r)
        }
        Mode::InverseDiameter { q_m3_s, head_m } => {
            solve_inverse_diameter(path, props, mode, *q_m3_s, *head_m, cfg)
        }
        Mode::InverseLength { q_m3_s, head_m } => {
            solve_inverse_length(path, props, mode, *q_m3_s, *head_m, cfg)
        }
    }
}

fn solve_gravity(
    path: &FlowPath,
    props: &FluidProps,
    mode: &Mode,
    cfg: &SolverConfig,
) -> Result<SolveResult, SolveError> {
    let driving = -static_head_m(path, props);
    if driving <= 0.0 {
        let mut r = at_rest(mode, path);
        r.warnings.push(Warning::NoDrivingHead.to_string());
        return Ok(r);
    }
    let out = run_root(path, cfg, |q| {
        driving - evaluate(path, props, q).head_loss_total_m()
    });
    Ok(snapshot(path, props, mode, &out))
}

fn solve_given_head(
    path: &FlowPath,
    props: &FluidProps,
    mode: &Mode,
    head_m: f64,
    cfg: &SolverConfig,
) -> Result<SolveResult, SolveError> {
    let net = head_m - static_head_m(path, props);
    if net <= 0.0 {
        let mut r = at_rest(mode, path);
        r.converged = false;
        r.pump_head_m = Some(head_m);
        r.warnings.push(Warning::PumpInsufficient.to_string());
        return Ok(r);
    }
    let out = run_root(path, cfg, |q| {
        net - evaluate(path, props, q).head_loss_total_m()
    });
    let mut r = snapshot(path, props, mode, &out);
    r.pump_head_m = Some(head_m);
    r.hydraulic_power_w = Some(props.rho.value * G_MPS2 * out.x * head_m);
    Ok(r)
}

fn solve_given_power(
    path: &FlowPath,
    props: &FluidProps,
    mode: &Mode,
    power_w: f64,
    efficiency: f64,
    cfg: &SolverConfig,
) -> Result<SolveResult, SolveError> {
    if power_w <= 0.0 {
        return Err(SolveError::Infeasible {
            what: "shaft power must be positive".to_string(),
        });
    }
    let rho_g = props.rho.value * G_MPS2;
    // h_pump(q) = eta W / (rho g q) diverges at rest, so the residual is
    // always positive near zero and a bracket exists whenever losses can
    // absorb the power.
    let out = run_root(path, cfg, |q| {
        efficiency * power_w / (rho_g * q) - system_head_m(path, props, q)
    });
    let mut r = snapshot(path, props, mode, &out);
    let h = efficiency * power_w / (rho_g * out.x);
    r.pump_head_m = Some(h);
    r.hydraulic_power_w = Some(efficiency * power_w);
    r.shaft_power_w = Some(power_w);
    Ok(r)
}

fn solve_flow_power_check(
    path: &FlowPath,
    props: &FluidProps,
    mode: &Mode,
    q_m3_s: f64,
    power_w: f64,
    efficiency: f64,
    cfg: &SolverConfig,
) -> Result<SolveResult, SolveError> {
    if q_m3_s <= 0.0 {
        return Err(SolveError::Infeasible {
            what: "flow rate must be positive".to_string(),
        });
    }
    let rho_g = props.rho.value * G_MPS2;
    let h_pump = efficiency * power_w / (rho_g * q_m3_s);
    let h_required = system_head_m(path, props, q_m3_s);
    let residual = h_pump - h_required;
    let converged = residual.abs() <= cfg.consistency_tol_m;

    let out = RootFind { x: q_m3_s, residual, iterations: 0, converged };
    let mut r = snapshot(path, props, mode, &out);
    r.pump_head_m = Some(h_pump);
    r.hydraulic_power_w = Some(rho_g * q_m3_s * h_pump);
    r.shaft_power_w = Some(power_w);
    Ok(r)
}

fn solve_system_curve(
    path: &FlowPath,
    props: &FluidProps,
    mode: &Mode,
    points: u32,
) -> Result<SolveResult, SolveError> {
    let points = points.max(2);
    let q_max = first_area(path) * SWEEP_VELOCITY_MAX_M_S;
    let curve = (0..points)
        .map(|i| {
            let q = q_max * f64::from(i) / f64::from(points - 1);
            CurvePoint { q_m3_s: q, head_m: system_head_m(path, props, q) }
        })
        .collect();

    // The sweep has no single operating state; scalars report the system
    // at rest and the curve carries the sweep.
    let mut r = at_rest(mode, path);
    r.curve = Some(curve);
    Ok(r)
}

fn solve_inverse_diameter(
    path: &FlowPath,
    props: &FluidProps,
    mode: &Mode,
    q_m3_s: f64,
    head_m: f64,
    cfg: &SolverConfig,
) -> Result<SolveResult, SolveError> {
    let seg = single_segment(path, "inverse diameter sizing")?;
    if q_m3_s <= 0.0 {
        return Err(SolveError::Infeasible {
            what: "flow rate must be positive".to_string(),
        });
    }
    let budget = head_m - static_head_m(path, props);

    // Losses fall as the bore grows, so loss-minus-budget is decreasing in
    // the diameter. An impossible budget never crosses zero and comes back
    // unconverged, which is the contract for infeasible sizing.
    let seed = seg.section.diameter().map(|d| d.value).unwrap_or(0.05);
    let f = |d: f64| {
        let trial = resized(path, d);
        evaluate(&trial, props, q_m3_s).head_loss_total_m() - budget
    };
    let out = solve_decreasing(f, seed, &cfg.root);
    debug!(
        diameter_m = out.x,
        iterations = out.iterations,
        converged = out.converged,
        "inverse diameter search finished"
    );

    let solved = resized(path, out.x);
    let state = RootFind { x: q_m3_s, ..out };
    let mut r = snapshot(&solved, props, mode, &state);
    r.diameter_m = Some(out.x);
    Ok(r)
}

fn solve_inverse_length(
    path: &FlowPath,
    props: &FluidProps,
    mode: &Mode,
    q_m3_s: f64,
    head_m: f64,
    cfg: &SolverConfig,
) -> Result<SolveResult, SolveError> {
    let seg = single_segment(path, "inverse length sizing")?;
    if q_m3_s <= 0.0 {
        return Err(SolveError::Infeasible {
            what: "flow rate must be positive".to_string(),
        });
    }

    let area = seg.section.area().value;
    let d_h = seg.section.hydraulic_diameter().value;
    let v = q_m3_s / area;
    let re = reynolds_number(props.rho.value, v, d_h, props.mu.value);
    let f = friction_factor(re, seg.roughness.value / d_h);
    let h_minor = pf_hydraulics::minor_head_loss(seg.k_minor, v);

    let target = head_m - static_head_m(path, props);
    let budget = target - h_minor;
    if budget < 0.0 {
        return Err(SolveError::Infeasible {
            what: format!(
                "available head {head_m} m cannot cover static head and minor losses at the requested flow"
            ),
        });
    }

    // h_f = f (L/D) v^2 / 2g solved for L directly; a single pass because f
    // does not depend on L at fixed Q and D.
    let length = budget * d_h * 2.0 * G_MPS2 / (f * v * v);

    let mut solved = path.clone();
    solved.segments[0].length = pf_core::units::m(length);
    // Residual measured at the sized length, not asserted.
    let residual = target - evaluate(&solved, props, q_m3_s).head_loss_total_m();
    let state = RootFind {
        x: q_m3_s,
        residual,
        iterations: 1,
        converged: residual.abs() <= cfg.root.tol,
    };
    let mut r = snapshot(&solved, props, mode, &state);
    r.length_m = Some(length);
    Ok(r)
}

/// Shared flow-rate root search with the standard 1 m/s velocity seed.
fn run_root<F: Fn(f64) -> f64>(path: &FlowPath, cfg: &SolverConfig, residual: F) -> RootFind {
    let seed = first_area(path) * SEED_VELOCITY_M_S;
    let out = solve_decreasing(residual, seed, &cfg.root);
    debug!(
        q_m3_s = out.x,
        iterations = out.iterations,
        residual_m = out.residual,
        converged = out.converged,
        "flow iteration finished"
    );
    out
}

fn first_area(path: &FlowPath) -> f64 {
    path.segments
        .first()
        .map(|s| s.section.area().value)
        .unwrap_or(0.0)
}

fn single_segment<'a>(path: &'a FlowPath, what: &str) -> Result<&'a Segment, SolveError> {
    match path.segments.as_slice() {
        [seg] => Ok(seg),
        _ => Err(SolveError::Unsupported {
            what: format!("{what} needs exactly one pipe segment, found {}", path.segments.len()),
        }),
    }
}

fn resized(path: &FlowPath, diameter_m: f64) -> FlowPath {
    let mut p = path.clone();
    p.segments[0].section = CrossSection::circular(pf_core::units::m(diameter_m))
        .unwrap_or(p.segments[0].section);
    p
}

/// Full snapshot at flow rate `out.x`, with diagnostics attached.
fn snapshot(path: &FlowPath, props: &FluidProps, mode: &Mode, out: &RootFind) -> SolveResult {
    let q = out.x;
    let eval = evaluate(path, props, q);
    let mut warnings: Vec<String> = diagnose(path, props, &eval, q)
        .into_iter()
        .map(|w| w.to_string())
        .collect();
    if let Some(w) = convergence_warning(out.converged, out.iterations, out.residual) {
        warnings.push(w.to_string());
    }

    let first = eval.segments.first();
    SolveResult {
        mode: mode.name().to_string(),
        q_m3_s: q,
        mdot_kg_s: props.rho.value * q,
        velocity_m_s: first.map_or(0.0, |s| s.velocity_m_s),
        reynolds: first.map_or(0.0, |s| s.reynolds),
        friction_factor: first.map_or(0.0, |s| s.friction_factor),
        regime: first.map_or("laminar", |s| s.regime.as_str()).to_string(),
        head_loss_friction_m: eval.head_loss_friction_m,
        head_loss_minor_m: eval.head_loss_minor_m,
        head_loss_total_m: eval.head_loss_total_m(),
        pump_head_m: None,
        hydraulic_power_w: None,
        shaft_power_w: None,
        p_inlet_pa: path.inlet.pressure.value,
        p_outlet_pa: path.outlet.pressure.value,
        delta_p_pa: path.inlet.pressure.value - path.outlet.pressure.value,
        diameter_m: None,
        length_m: None,
        converged: out.converged,
        iterations: out.iterations,
        residual_m: out.residual,
        warnings,
        segments: eval
            .segments
            .iter()
            .map(|s| SegmentResult {
                label: s.label.clone(),
                velocity_m_s: s.velocity_m_s,
                reynolds: s.reynolds,
                friction_factor: s.friction_factor,
                head_loss_friction_m: s.head_loss_friction_m,
                head_loss_minor_m: s.head_loss_minor_m,
            })
            .collect(),
        curve: None,
    }
}

fn at_rest(mode: &Mode, path: &FlowPath) -> SolveResult {
    let labels: Vec<String> = path.segments.iter().map(|s| s.label.clone()).collect();
    let mut r = SolveResult::at_rest(mode.name(), &labels);
    r.p_inlet_pa = path.inlet.pressure.value;
    r.p_outlet_pa = path.outlet.pressure.value;
    r.delta_p_pa = r.p_inlet_pa - r.p_outlet_pa;
    r
}
