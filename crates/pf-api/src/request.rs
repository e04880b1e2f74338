//! Wire format of a solve request.
//!
//! The shape mirrors what a thin web client naturally produces: a node/edge
//! graph, a mode name, and a loose bag of extra numbers keyed by their
//! conventional symbols (`Q`, `h_a`, `W_shaft`).

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct SolveRequest {
    pub graph: GraphSpec,
    /// Omitted mode means auto-detection from the network.
    #[serde(default)]
    pub mode: Option<ModeId>,
    #[serde(default)]
    pub extras: ExtrasSpec,
    /// Working fluid id; falls back to the inlet tank's fluid, then water.
    #[serde(default)]
    pub fluid: Option<String>,
    /// Direct property overrides, applied after fluid resolution.
    #[serde(default)]
    pub rho_kg_m3: Option<f64>,
    #[serde(default)]
    pub mu_pa_s: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GraphSpec {
    pub nodes: Vec<NodeSpec>,
    pub edges: Vec<EdgeSpec>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NodeSpec {
    pub id: String,
    #[serde(flatten)]
    pub kind: NodeKindSpec,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum NodeKindSpec {
    Tank(TankData),
    Pump(PumpData),
    Valve(ValveData),
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TankData {
    #[serde(default)]
    pub elevation_m: f64,
    /// Absolute surface pressure; defaults to one atmosphere.
    #[serde(default)]
    pub pressure_pa: Option<f64>,
    #[serde(default)]
    pub fluid: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PumpData {
    #[serde(default)]
    pub head_m: Option<f64>,
    #[serde(default)]
    pub power_w: Option<f64>,
    #[serde(default)]
    pub efficiency: Option<f64>,
    #[serde(default)]
    pub curve: Option<CurveSpec>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ValveData {
    /// Catalog id (e.g. `valve_gate_open`) the open-state K is taken from.
    #[serde(default, rename = "K_type")]
    pub k_type: Option<String>,
    /// Explicit loss coefficient; wins over `K_type` when both are given.
    #[serde(default, rename = "K")]
    pub k: Option<f64>,
    #[serde(default = "default_open")]
    pub open_fraction: f64,
}

fn default_open() -> f64 {
    1.0
}

/// Pump characteristic, either sampled or quadratic.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum CurveSpec {
    Quadratic { a: f64, b: f64, c: f64 },
    Points(Vec<(f64, f64)>),
}

#[derive(Debug, Clone, Deserialize)]
pub struct EdgeSpec {
    pub source: String,
    pub target: String,
    pub data: PipeData,
}

/// Pipe geometry. Exactly one cross-section must be given: `diameter_m`,
/// `width_m` + `height_m`, or `d_outer_m` + `d_inner_m`.
#[derive(Debug, Clone, Deserialize)]
pub struct PipeData {
    #[serde(default)]
    pub label: Option<String>,
    pub length_m: f64,
    #[serde(default)]
    pub diameter_m: Option<f64>,
    #[serde(default)]
    pub width_m: Option<f64>,
    #[serde(default)]
    pub height_m: Option<f64>,
    #[serde(default)]
    pub d_outer_m: Option<f64>,
    #[serde(default)]
    pub d_inner_m: Option<f64>,
    /// Absolute roughness; omitted means the system-wide default.
    #[serde(default)]
    pub roughness_m: Option<f64>,
    #[serde(default)]
    pub fittings: Vec<FittingSpec>,
    #[serde(default)]
    pub k_total: Option<f64>,
}

/// One fitting entry on a pipe: catalog type plus how many are installed.
#[derive(Debug, Clone, Deserialize)]
pub struct FittingSpec {
    #[serde(rename = "type")]
    pub id: String,
    #[serde(default = "default_quantity")]
    pub quantity: u32,
}

fn default_quantity() -> u32 {
    1
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModeId {
    /// Explicit request for the same detection an omitted mode gets.
    Auto,
    Gravity,
    SystemCurve,
    GivenPumpHead,
    GivenPumpPower,
    #[serde(rename = "given_Q_and_power")]
    GivenQAndPower,
    OperatingPoint,
    InverseDiameter,
    InverseLength,
}

/// Loose numeric inputs, keyed by their conventional symbols.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExtrasSpec {
    #[serde(default, rename = "Q")]
    pub q_m3_s: Option<f64>,
    /// Mass flow alternative to `Q`; converted with the resolved density.
    #[serde(default)]
    pub mdot: Option<f64>,
    #[serde(default, rename = "h_a")]
    pub head_m: Option<f64>,
    #[serde(default, rename = "W_shaft")]
    pub power_w: Option<f64>,
    #[serde(default, rename = "eta")]
    pub efficiency: Option<f64>,
    #[serde(default)]
    pub pump_curve: Option<CurveSpec>,
    #[serde(default)]
    pub curve_points: Option<u32>,
}
