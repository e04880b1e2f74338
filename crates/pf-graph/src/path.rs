//! Reduction of a network to the single series flow path the solvers
//! operate on: inlet tank, pipe segments, optional pump, outlet tank.

use pf_core::units::{Length, Pressure};
use pf_hydraulics::CrossSection;

use crate::error::{GraphError, GraphResult};
use crate::model::{Graph, NodeKind, PumpSpec};

/// Free-surface boundary condition at one end of the path.
#[derive(Debug, Clone)]
pub struct TankBoundary {
    pub elevation: Length,
    pub pressure: Pressure,
    pub fluid: Option<String>,
}

/// One pipe run, with valve losses already folded into `k_minor`.
#[derive(Debug, Clone)]
pub struct Segment {
    pub label: String,
    pub length: Length,
    pub section: CrossSection,
    pub roughness: Length,
    pub k_minor: f64,
}

/// A pump and its position along the path, counted in segments upstream of
/// it. The count decides which losses lower the suction pressure.
#[derive(Debug, Clone)]
pub struct PumpInstall {
    pub spec: PumpSpec,
    pub suction_segments: usize,
}

/// Validated series path from inlet tank to outlet tank.
#[derive(Debug, Clone)]
pub struct FlowPath {
    pub inlet: TankBoundary,
    pub outlet: TankBoundary,
    pub segments: Vec<Segment>,
    pub pump: Option<PumpInstall>,
    /// A fully shut valve somewhere along the path. Flow is zero by
    /// construction and no iteration should run.
    pub blocked: bool,
}

impl FlowPath {
    /// Walks the graph from its source tank to its sink tank, checking that
    /// it forms exactly one series path with no branches or cycles.
    pub fn extract(graph: &Graph) -> GraphResult<Self> {
        let nodes = graph.nodes();
        let edges = graph.edges();

        let mut out_edges: Vec<Vec<usize>> = vec![Vec::new(); nodes.len()];
        let mut in_degree = vec![0usize; nodes.len()];
        for (ei, e) in edges.iter().enumerate() {
            out_edges[e.source.index()].push(ei);
            in_degree[e.target.index()] += 1;
        }

        let tanks: Vec<usize> = nodes
            .iter()
            .enumerate()
            .filter(|(_, n)| matches!(n.kind, NodeKind::Tank(_)))
            .map(|(i, _)| i)
            .collect();
        if tanks.len() != 2 {
            return Err(GraphError::TankCount { found: tanks.len() });
        }

        let source = tanks
            .iter()
            .copied()
            .find(|&i| out_edges[i].len() == 1 && in_degree[i] == 0)
            .ok_or(GraphError::NoSource)?;
        let sink = tanks
            .iter()
            .copied()
            .find(|&i| out_edges[i].is_empty() && in_degree[i] == 1)
            .ok_or(GraphError::NoSink)?;

        let boundary = |i: usize| match &nodes[i].kind {
            NodeKind::Tank(t) => TankBoundary {
                elevation: t.elevation,
                pressure: t.pressure,
                fluid: t.fluid.clone(),
            },
            _ => unreachable!("tank indices only"),
        };

        let mut segments = Vec::new();
        let mut pump: Option<PumpInstall> = None;
        let mut blocked = false;
        let mut visited = vec![false; nodes.len()];
        let mut current = source;

        loop {
            if visited[current] {
                return Err(GraphError::Cycle { name: nodes[current].name.clone() });
            }
            visited[current] = true;

            if current != source && in_degree[current] > 1 {
                return Err(GraphError::Branching { name: nodes[current].name.clone() });
            }

            match &nodes[current].kind {
                NodeKind::Tank(_) if current == source => {}
                NodeKind::Tank(_) if current == sink => break,
                NodeKind::Tank(_) => {
                    return Err(GraphError::InteriorTank { name: nodes[current].name.clone() });
                }
                NodeKind::Pump(spec) => {
                    if pump.is_some() {
                        return Err(GraphError::MultiplePumps);
                    }
                    pump = Some(PumpInstall {
                        spec: spec.clone(),
                        suction_segments: segments.len(),
                    });
                }
                NodeKind::Valve(spec) => match spec.effective_k() {
                    // The valve throttles the pipe run feeding it.
                    Some(k) => {
                        let seg: &mut Segment =
                            segments.last_mut().ok_or(GraphError::Disconnected)?;
                        seg.k_minor += k;
                    }
                    None => blocked = true,
                },
            }

            let outs = &out_edges[current];
            if outs.len() > 1 {
                return Err(GraphError::Branching { name: nodes[current].name.clone() });
            }
            let ei = *outs.first().ok_or(GraphError::Disconnected)?;
            let e = &edges[ei];
            segments.push(Segment {
                label: e.label.clone(),
                length: e.length,
                section: e.section,
                roughness: e.roughness,
                k_minor: e.k_minor,
            });
            current = e.target.index();
        }

        if segments.len() != edges.len() || visited.iter().any(|v| !v) {
            return Err(GraphError::Disconnected);
        }

        Ok(Self {
            inlet: boundary(source),
            outlet: boundary(sink),
            segments,
            pump,
            blocked,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::GraphBuilder;
    use crate::model::{PipeSpec, TankSpec, ValveSpec};
    use pf_core::units::{constants::P_ATM_PA, m, pa};

    fn tank(z: f64) -> TankSpec {
        TankSpec { elevation: m(z), pressure: pa(P_ATM_PA), fluid: None }
    }

    fn pipe(len: f64) -> PipeSpec {
        PipeSpec {
            label: None,
            length: m(len),
            section: CrossSection::circular(m(0.1)).unwrap(),
            roughness: m(4.5e-5),
            fittings: vec![],
            k_total: None,
        }
    }

    #[test]
    fn simple_two_tank_path() {
        let mut b = GraphBuilder::new();
        b.add_tank("upper", tank(10.0)).unwrap();
        b.add_tank("lower", tank(0.0)).unwrap();
        b.add_pipe("upper", "lower", pipe(100.0)).unwrap();
        let g = b.build().unwrap();
        let path = FlowPath::extract(&g).unwrap();
        assert_eq!(path.segments.len(), 1);
        assert!(path.pump.is_none());
        assert!(!path.blocked);
        assert!((path.inlet.elevation.value - 10.0).abs() < 1e-12);
    }

    #[test]
    fn pump_position_is_recorded() {
        let mut b = GraphBuilder::new();
        b.add_tank("a", tank(0.0)).unwrap();
        b.add_pump("p", PumpSpec::Unspecified).unwrap();
        b.add_tank("b", tank(20.0)).unwrap();
        b.add_pipe("a", "p", pipe(5.0)).unwrap();
        b.add_pipe("p", "b", pipe(50.0)).unwrap();
        let g = b.build().unwrap();
        let path = FlowPath::extract(&g).unwrap();
        assert_eq!(path.segments.len(), 2);
        assert_eq!(path.pump.as_ref().unwrap().suction_segments, 1);
    }

    #[test]
    fn shut_valve_blocks_the_path() {
        let mut b = GraphBuilder::new();
        b.add_tank("a", tank(10.0)).unwrap();
        b.add_valve("v", ValveSpec { k_open: 0.2, open_fraction: 0.0 }).unwrap();
        b.add_tank("b", tank(0.0)).unwrap();
        b.add_pipe("a", "v", pipe(10.0)).unwrap();
        b.add_pipe("v", "b", pipe(10.0)).unwrap();
        let g = b.build().unwrap();
        let path = FlowPath::extract(&g).unwrap();
        assert!(path.blocked);
    }

    #[test]
    fn open_valve_adds_k_to_upstream_segment() {
        let mut b = GraphBuilder::new();
        b.add_tank("a", tank(10.0)).unwrap();
        b.add_valve("v", ValveSpec { k_open: 0.2, open_fraction: 0.5 }).unwrap();
        b.add_tank("b", tank(0.0)).unwrap();
        b.add_pipe("a", "v", pipe(10.0)).unwrap();
        b.add_pipe("v", "b", pipe(10.0)).unwrap();
        let g = b.build().unwrap();
        let path = FlowPath::extract(&g).unwrap();
        assert!((path.segments[0].k_minor - 0.8).abs() < 1e-12);
        assert!((path.segments[1].k_minor - 0.0).abs() < 1e-12);
    }

    #[test]
    fn three_tanks_rejected() {
        let mut b = GraphBuilder::new();
        b.add_tank("a", tank(10.0)).unwrap();
        b.add_tank("b", tank(5.0)).unwrap();
        b.add_tank("c", tank(0.0)).unwrap();
        b.add_pipe("a", "b", pipe(10.0)).unwrap();
        b.add_pipe("b", "c", pipe(10.0)).unwrap();
        let g = b.build().unwrap();
        assert!(matches!(
            FlowPath::extract(&g),
            Err(GraphError::TankCount { found: 3 })
        ));
    }

    #[test]
    fn branch_rejected() {
        let mut b = GraphBuilder::new();
        b.add_tank("a", tank(10.0)).unwrap();
        b.add_pump("p", PumpSpec::Unspecified).unwrap();
        b.add_tank("b", tank(0.0)).unwrap();
        b.add_pipe("a", "p", pipe(10.0)).unwrap();
        b.add_pipe("p", "b", pipe(10.0)).unwrap();
        b.add_pipe("p", "b", pipe(20.0)).unwrap();
        let g = b.build().unwrap();
        assert!(matches!(FlowPath::extract(&g), Err(GraphError::Branching { .. })));
    }

    #[test]
    fn cycle_rejected() {
        let mut b = GraphBuilder::new();
        b.add_tank("a", tank(10.0)).unwrap();
        b.add_pump("p", PumpSpec::Unspecified).unwrap();
        b.add_valve("v", ValveSpec { k_open: 0.1, open_fraction: 1.0 }).unwrap();
        b.add_tank("b", tank(0.0)).unwrap();
        b.add_pipe("a", "p", pipe(10.0)).unwrap();
        b.add_pipe("p", "v", pipe(10.0)).unwrap();
        b.add_pipe("v", "p", pipe(10.0)).unwrap();
        let g = b.build().unwrap();
        let err = FlowPath::extract(&g).unwrap_err();
        assert!(matches!(err, GraphError::Cycle { .. } | GraphError::Branching { .. }));
    }

    #[test]
    fn two_pumps_rejected() {
        let mut b = GraphBuilder::new();
        b.add_tank("a", tank(0.0)).unwrap();
        b.add_pump("p1", PumpSpec::Unspecified).unwrap();
        b.add_pump("p2", PumpSpec::Unspecified).unwrap();
        b.add_tank("b", tank(10.0)).unwrap();
        b.add_pipe("a", "p1", pipe(10.0)).unwrap();
        b.add_pipe("p1", "p2", pipe(10.0)).unwrap();
        b.add_pipe("p2", "b", pipe(10.0)).unwrap();
        let g = b.build().unwrap();
        assert!(matches!(FlowPath::extract(&g), Err(GraphError::MultiplePumps)));
    }

    #[test]
    fn disconnected_extra_edge_rejected() {
        let mut b = GraphBuilder::new();
        b.add_tank("a", tank(10.0)).unwrap();
        b.add_tank("b", tank(0.0)).unwrap();
        b.add_pump("lonely", PumpSpec::Unspecified).unwrap();
        b.add_pipe("a", "b", pipe(10.0)).unwrap();
        let g = b.build().unwrap();
        assert!(matches!(FlowPath::extract(&g), Err(GraphError::Disconnected)));
    }
}
