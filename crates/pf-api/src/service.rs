//! Request handling: wire structs in, one of the three response shapes out.
//!
//! `handle_solve` never panics and never leaks an error type; everything a
//! backend crate can reject comes back as the error shape with a readable
//! message.

use tracing::debug;

use pf_core::numeric::ensure_finite;
use pf_core::units::{constants::P_ATM_PA, m, pa};
use pf_core::CoreError;
use pf_fluids::{FluidError, FluidProps};
use pf_graph::{
    FittingRef, FlowPath, Graph, GraphBuilder, GraphError, PipeSpec, PumpCurve, PumpSpec,
    TankSpec, ValveSpec,
};
use pf_hydraulics::{fitting_k, CrossSection, HydraulicsError};
use pf_solver::{resolve, solve, Extras, Mode, ModeTag, Resolution, SolveError, SolverConfig};

use crate::request::{
    CurveSpec, ModeId, NodeKindSpec, PipeData, PumpData, SolveRequest, ValveData,
};
use crate::response::SolveResponse;

/// Fallbacks applied when a request leaves a field out.
#[derive(Debug, Clone)]
pub struct NetworkDefaults {
    pub fluid: &'static str,
    /// Commercial steel, the catalog's reference surface.
    pub roughness_m: f64,
}

impl Default for NetworkDefaults {
    fn default() -> Self {
        Self { fluid: "water_20C", roughness_m: 4.5e-5 }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Graph(#[from] GraphError),
    #[error(transparent)]
    Fluid(#[from] FluidError),
    #[error(transparent)]
    Hydraulics(#[from] HydraulicsError),
    #[error(transparent)]
    Solve(#[from] SolveError),
    #[error(transparent)]
    Core(#[from] CoreError),
    #[error("{0}")]
    BadRequest(String),
}

/// Runs one request end to end. Infallible at the signature: failures come
/// back as [`SolveResponse::Error`].
pub fn handle_solve(req: &SolveRequest) -> SolveResponse {
    match run(req) {
        Ok(resp) => resp,
        Err(e) => {
            debug!(error = %e, "request rejected");
            SolveResponse::error(e.to_string())
        }
    }
}

fn run(req: &SolveRequest) -> Result<SolveResponse, ApiError> {
    let defaults = NetworkDefaults::default();
    let graph = build_graph(req, &defaults)?;
    let path = FlowPath::extract(&graph)?;
    let props = resolve_fluid(req, &path, &defaults)?;
    let extras = bind_extras(req, &props)?;
    let tag = req.mode.map_or(ModeTag::Auto, mode_tag);

    let mode: Mode = match resolve(tag, &extras, &path) {
        Resolution::Ready(mode) => mode,
        Resolution::Missing(fields) => {
            return Ok(SolveResponse::missing(fields));
        }
    };

    let result = solve(&path, &props, &mode, &SolverConfig::default())?;
    debug!(mode = %result.mode, q_m3_s = result.q_m3_s, converged = result.converged, "solved");
    Ok(SolveResponse::success(result))
}

fn build_graph(req: &SolveRequest, defaults: &NetworkDefaults) -> Result<Graph, ApiError> {
    let mut b = GraphBuilder::new();
    for node in &req.graph.nodes {
        match &node.kind {
            NodeKindSpec::Tank(t) => {
                b.add_tank(
                    &node.id,
                    TankSpec {
                        elevation: m(t.elevation_m),
                        pressure: pa(t.pressure_pa.unwrap_or(P_ATM_PA)),
                        fluid: t.fluid.clone(),
                    },
                )?;
            }
            NodeKindSpec::Pump(p) => {
                b.add_pump(&node.id, pump_spec(p))?;
            }
            NodeKindSpec::Valve(v) => {
                b.add_valve(&node.id, valve_spec(v)?)?;
            }
        }
    }
    for edge in &req.graph.edges {
        let section = section_of(&edge.data)?;
        b.add_pipe(
            &edge.source,
            &edge.target,
            PipeSpec {
                label: edge.data.label.clone(),
                length: m(edge.data.length_m),
                section,
                roughness: m(edge.data.roughness_m.unwrap_or(defaults.roughness_m)),
                fittings: edge
                    .data
                    .fittings
                    .iter()
                    .map(|f| FittingRef { id: f.id.clone(), count: f.quantity })
                    .collect(),
                k_total: edge.data.k_total,
            },
        )?;
    }
    Ok(b.build()?)
}

fn section_of(p: &PipeData) -> Result<CrossSection, ApiError> {
    let rect = p.width_m.zip(p.height_m);
    let annulus = p.d_outer_m.zip(p.d_inner_m);
    match (p.diameter_m, rect, annulus) {
        (Some(d), None, None) => Ok(CrossSection::circular(m(d))?),
        (None, Some((w, h)), None) => Ok(CrossSection::rectangular(m(w), m(h))?),
        (None, None, Some((outer, inner))) => Ok(CrossSection::annular(m(outer), m(inner))?),
        _ => Err(ApiError::BadRequest(
            "pipe needs exactly one cross-section: diameter_m, width_m + height_m, \
             or d_outer_m + d_inner_m"
                .to_string(),
        )),
    }
}

/// Open-state K comes from an explicit value, else the fitting catalog,
/// else zero (a valve that only throttles via its open fraction).
fn valve_spec(v: &ValveData) -> Result<ValveSpec, ApiError> {
    let k_open = match (v.k, v.k_type.as_deref()) {
        (Some(k), _) => k,
        (None, Some(kind)) => fitting_k(kind)?,
        (None, None) => 0.0,
    };
    Ok(ValveSpec { k_open, open_fraction: v.open_fraction })
}

fn pump_spec(d: &PumpData) -> PumpSpec {
    if let Some(curve) = &d.curve {
        PumpSpec::Curve(pump_curve(curve))
    } else if let Some(head_m) = d.head_m {
        PumpSpec::FixedHead { head_m }
    } else if let Some(power_w) = d.power_w {
        PumpSpec::FixedPower { power_w, efficiency: d.efficiency.unwrap_or(1.0) }
    } else {
        PumpSpec::Unspecified
    }
}

fn pump_curve(spec: &CurveSpec) -> PumpCurve {
    match spec {
        CurveSpec::Quadratic { a, b, c } => PumpCurve::Quadratic { a: *a, b: *b, c: *c },
        CurveSpec::Points(pts) => PumpCurve::Points(pts.clone()),
    }
}

/// Fluid precedence: request override id, then the inlet tank's fluid, then
/// water at 20 C. Raw property overrides apply last.
fn resolve_fluid(
    req: &SolveRequest,
    path: &FlowPath,
    defaults: &NetworkDefaults,
) -> Result<FluidProps, ApiError> {
    let id = req
        .fluid
        .as_deref()
        .or(path.inlet.fluid.as_deref())
        .unwrap_or(defaults.fluid);
    Ok(FluidProps::resolve(id)?.with_overrides(req.rho_kg_m3, req.mu_pa_s)?)
}

fn bind_extras(req: &SolveRequest, props: &FluidProps) -> Result<Extras, ApiError> {
    let e = &req.extras;
    let finite =
        |v: Option<f64>, what: &'static str| v.map(|x| ensure_finite(x, what)).transpose();
    let q_m3_s = match (finite(e.q_m3_s, "Q")?, finite(e.mdot, "mdot")?) {
        (Some(q), _) => Some(q),
        (None, Some(mdot)) => Some(mdot / props.rho.value),
        (None, None) => None,
    };
    // A curve from the extras skips the graph builder, so it gets the same
    // shape checks here before anything interpolates it.
    let curve = match &e.pump_curve {
        Some(spec) => {
            let c = pump_curve(spec);
            c.validate()
                .map_err(|why| ApiError::BadRequest(format!("pump_curve: {why}")))?;
            Some(c)
        }
        None => None,
    };
    Ok(Extras {
        q_m3_s,
        head_m: finite(e.head_m, "h_a")?,
        power_w: finite(e.power_w, "W_shaft")?,
        efficiency: finite(e.efficiency, "eta")?,
        curve,
        curve_points: e.curve_points,
    })
}

fn mode_tag(id: ModeId) -> ModeTag {
    match id {
        ModeId::Auto => ModeTag::Auto,
        ModeId::Gravity => ModeTag::Gravity,
        ModeId::SystemCurve => ModeTag::SystemCurve,
        ModeId::GivenPumpHead => ModeTag::GivenPumpHead,
        ModeId::GivenPumpPower => ModeTag::GivenPumpPower,
        ModeId::GivenQAndPower => ModeTag::GivenFlowAndPower,
        ModeId::OperatingPoint => ModeTag::OperatingPoint,
        ModeId::InverseDiameter => ModeTag::InverseDiameter,
        ModeId::InverseLength => ModeTag::InverseLength,
    }
}
