//! Node and edge payloads for a piping network.

use pf_core::ids::{EdgeId, NodeId};
use pf_core::units::{Length, Pressure};
use pf_hydraulics::CrossSection;

/// Open liquid surface at one end of the path.
#[derive(Debug, Clone)]
pub struct TankSpec {
    /// Free-surface elevation above the common datum.
    pub elevation: Length,
    /// Absolute pressure on the free surface.
    pub pressure: Pressure,
    /// Optional fluid id carried by this tank.
    pub fluid: Option<String>,
}

/// How a pump's behaviour was specified, if at all.
///
/// Modes that take pump data from the request extras accept `Unspecified`;
/// operating-point analysis needs a `Curve`.
#[derive(Debug, Clone)]
pub enum PumpSpec {
    FixedHead { head_m: f64 },
    FixedPower { power_w: f64, efficiency: f64 },
    Curve(PumpCurve),
    Unspecified,
}

/// Head-versus-flow characteristic.
#[derive(Debug, Clone)]
pub enum PumpCurve {
    /// (Q in m^3/s, H in m) samples, linearly interpolated. Outside the
    /// sampled range the end segments are extrapolated.
    Points(Vec<(f64, f64)>),
    /// H(Q) = a*Q^2 + b*Q + c.
    Quadratic { a: f64, b: f64, c: f64 },
}

impl PumpCurve {
    /// Checks the shape `head_at` relies on: at least two samples, finite
    /// values, flow rates strictly increasing.
    pub fn validate(&self) -> Result<(), &'static str> {
        match self {
            Self::Points(pts) => {
                if pts.len() < 2 {
                    return Err("curve needs at least 2 points");
                }
                if pts.iter().any(|&(q, h)| !q.is_finite() || !h.is_finite()) {
                    return Err("curve points must be finite");
                }
                if pts.windows(2).any(|w| w[1].0 <= w[0].0) {
                    return Err("curve flow rates must strictly increase");
                }
                Ok(())
            }
            Self::Quadratic { a, b, c } => {
                if [a, b, c].iter().all(|v| v.is_finite()) {
                    Ok(())
                } else {
                    Err("curve coefficients must be finite")
                }
            }
        }
    }

    /// Head delivered at flow rate `q` (m^3/s).
    pub fn head_at(&self, q: f64) -> f64 {
        match self {
            Self::Quadratic { a, b, c } => a * q * q + b * q + c,
            Self::Points(pts) => {
                debug_assert!(pts.len() >= 2);
                // Find the surrounding segment; clamp to end segments so the
                // curve stays defined past the sampled range.
                let last = pts.len() - 1;
                let i = match pts.iter().position(|&(qi, _)| qi >= q) {
                    Some(0) => 0,
                    Some(i) => i - 1,
                    None => last - 1,
                };
                let (q0, h0) = pts[i];
                let (q1, h1) = pts[i + 1];
                if (q1 - q0).abs() < f64::EPSILON {
                    return h0;
                }
                h0 + (h1 - h0) * (q - q0) / (q1 - q0)
            }
        }
    }
}

/// In-line throttling element. Fully open contributes `k_open`; partially
/// open the coefficient grows as 1/x^2 with the open fraction x.
#[derive(Debug, Clone)]
pub struct ValveSpec {
    pub k_open: f64,
    pub open_fraction: f64,
}

impl ValveSpec {
    /// Effective K at the current opening. `None` means shut.
    pub fn effective_k(&self) -> Option<f64> {
        if self.open_fraction <= 0.0 {
            None
        } else {
            let x = self.open_fraction.min(1.0);
            Some(self.k_open / (x * x))
        }
    }
}

#[derive(Debug, Clone)]
pub enum NodeKind {
    Tank(TankSpec),
    Pump(PumpSpec),
    Valve(ValveSpec),
}

#[derive(Debug, Clone)]
pub struct Node {
    pub id: NodeId,
    pub name: String,
    pub kind: NodeKind,
}

/// A catalog fitting attached to a pipe run some number of times.
#[derive(Debug, Clone)]
pub struct FittingRef {
    pub id: String,
    pub count: u32,
}

/// Pipe geometry and losses as supplied for one edge.
#[derive(Debug, Clone)]
pub struct PipeSpec {
    pub label: Option<String>,
    pub length: Length,
    pub section: CrossSection,
    pub roughness: Length,
    /// Fittings resolved against the loss-coefficient catalog, each
    /// contributing K * count.
    pub fittings: Vec<FittingRef>,
    /// When present, replaces the fitting list entirely.
    pub k_total: Option<f64>,
}

#[derive(Debug, Clone)]
pub struct Edge {
    pub id: EdgeId,
    pub source: NodeId,
    pub target: NodeId,
    pub label: String,
    pub length: Length,
    pub section: CrossSection,
    pub roughness: Length,
    /// Summed minor-loss coefficient for this pipe run.
    pub k_minor: f64,
}

/// Validated network. Construct through [`crate::GraphBuilder`].
#[derive(Debug, Clone)]
pub struct Graph {
    pub(crate) nodes: Vec<Node>,
    pub(crate) edges: Vec<Edge>,
}

impl Graph {
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    pub fn edge(&self, id: EdgeId) -> &Edge {
        &self.edges[id.index()]
    }
}
