//! Incremental construction of a [`Graph`].
//!
//! Nodes are registered by name, edges refer back to those names, and all
//! parameter validation happens at insertion time so `build` only has to
//! check shape-level consistency.

use std::collections::HashMap;

use pf_core::ids::{EdgeId, NodeId};
use pf_hydraulics::fitting_k;

use crate::error::{GraphError, GraphResult};
use crate::model::{Edge, Graph, Node, NodeKind, PipeSpec, PumpSpec, TankSpec, ValveSpec};

#[derive(Debug, Default)]
pub struct GraphBuilder {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
    by_name: HashMap<String, NodeId>,
}

impl GraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_tank(&mut self, name: &str, spec: TankSpec) -> GraphResult<NodeId> {
        if !spec.elevation.value.is_finite() {
            return Err(GraphError::InvalidParameter {
                what: format!("tank '{name}' elevation must be finite"),
            });
        }
        if !spec.pressure.value.is_finite() || spec.pressure.value < 0.0 {
            return Err(GraphError::InvalidParameter {
                what: format!("tank '{name}' surface pressure must be non-negative"),
            });
        }
        self.insert(name, NodeKind::Tank(spec))
    }

    pub fn add_pump(&mut self, name: &str, spec: PumpSpec) -> GraphResult<NodeId> {
        match &spec {
            PumpSpec::FixedHead { head_m } if !head_m.is_finite() || *head_m < 0.0 => {
                return Err(GraphError::InvalidParameter {
                    what: format!("pump '{name}' head must be non-negative"),
                });
            }
            PumpSpec::FixedPower { power_w, efficiency } => {
                if !power_w.is_finite() || *power_w < 0.0 {
                    return Err(GraphError::InvalidParameter {
                        what: format!("pump '{name}' power must be non-negative"),
                    });
                }
                if !(*efficiency > 0.0 && *efficiency <= 1.0) {
                    return Err(GraphError::InvalidParameter {
                        what: format!("pump '{name}' efficiency must be in (0, 1]"),
                    });
                }
            }
            PumpSpec::Curve(curve) => {
                if let Err(why) = curve.validate() {
                    return Err(GraphError::InvalidParameter {
                        what: format!("pump '{name}' {why}"),
                    });
                }
            }
            _ => {}
        }
        self.insert(name, NodeKind::Pump(spec))
    }

    pub fn add_valve(&mut self, name: &str, spec: ValveSpec) -> GraphResult<NodeId> {
        if !spec.k_open.is_finite() || spec.k_open < 0.0 {
            return Err(GraphError::InvalidParameter {
                what: format!("valve '{name}' loss coefficient must be non-negative"),
            });
        }
        if !spec.open_fraction.is_finite() || !(0.0..=1.0).contains(&spec.open_fraction) {
            return Err(GraphError::InvalidParameter {
                what: format!("valve '{name}' open fraction must be within [0, 1]"),
            });
        }
        self.insert(name, NodeKind::Valve(spec))
    }

    /// Connects two registered nodes with a pipe run.
    pub fn add_pipe(&mut self, source: &str, target: &str, pipe: PipeSpec) -> GraphResult<EdgeId> {
        let src = self.lookup(source)?;
        let dst = self.lookup(target)?;

        if !(pipe.length.value.is_finite() && pipe.length.value > 0.0) {
            return Err(GraphError::InvalidParameter {
                what: format!("pipe {source}->{target}: length must be positive"),
            });
        }
        if !(pipe.roughness.value.is_finite() && pipe.roughness.value >= 0.0) {
            return Err(GraphError::InvalidParameter {
                what: format!("pipe {source}->{target}: roughness must be non-negative"),
            });
        }

        // An explicit K total silences the fitting list entirely.
        let k_minor = match pipe.k_total {
            Some(k) => {
                if !k.is_finite() || k < 0.0 {
                    return Err(GraphError::InvalidParameter {
                        what: format!("pipe {source}->{target}: K total must be non-negative"),
                    });
                }
                k
            }
            None => {
                let mut sum = 0.0;
                for fitting in &pipe.fittings {
                    sum += fitting_k(&fitting.id)? * f64::from(fitting.count);
                }
                sum
            }
        };

        let id = EdgeId::from_index(self.edges.len());
        let label = pipe
            .label
            .unwrap_or_else(|| format!("{source}->{target}"));
        self.edges.push(Edge {
            id,
            source: src,
            target: dst,
            label,
            length: pipe.length,
            section: pipe.section,
            roughness: pipe.roughness,
            k_minor,
        });
        Ok(id)
    }

    /// Finalizes the network. Shape validation (path extraction) happens
    /// later, when a solve actually needs the series path.
    pub fn build(self) -> GraphResult<Graph> {
        if self.edges.is_empty() {
            return Err(GraphError::Empty);
        }
        Ok(Graph { nodes: self.nodes, edges: self.edges })
    }

    fn insert(&mut self, name: &str, kind: NodeKind) -> GraphResult<NodeId> {
        if self.by_name.contains_key(name) {
            return Err(GraphError::DuplicateNode { name: name.to_string() });
        }
        let id = NodeId::from_index(self.nodes.len());
        self.nodes.push(Node { id, name: name.to_string(), kind });
        self.by_name.insert(name.to_string(), id);
        Ok(id)
    }

    fn lookup(&self, name: &str) -> GraphResult<NodeId> {
        self.by_name
            .get(name)
            .copied()
            .ok_or_else(|| GraphError::UnknownNode { name: name.to_string() })
    }
}
