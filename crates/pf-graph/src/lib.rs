//! Network model for single-path piping systems.
//!
//! A network is built incrementally with [`GraphBuilder`], validated into an
//! immutable [`Graph`], and reduced to the [`FlowPath`] the hydraulic
//! solvers consume: one inlet tank, a series of pipe segments, at most one
//! pump, one outlet tank.

pub mod builder;
pub mod error;
pub mod model;
pub mod path;

pub use builder::GraphBuilder;
pub use error::{GraphError, GraphResult};
pub use model::{
    Edge, FittingRef, Graph, Node, NodeKind, PipeSpec, PumpCurve, PumpSpec, TankSpec, ValveSpec,
};
pub use path::{FlowPath, PumpInstall, Segment, TankBoundary};
