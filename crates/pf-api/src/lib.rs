//! JSON surface of the pipeflow solver.
//!
//! One entry point, [`handle_solve`], takes a [`SolveRequest`] and returns
//! one of three shapes: `success` with a full solution snapshot,
//! `missing_inputs` naming what the chosen mode still needs, or `error`
//! with a message. Transports stay outside this crate; anything that can
//! deserialize the request type can drive it.

pub mod request;
pub mod response;
pub mod service;

pub use request::{
    CurveSpec, EdgeSpec, ExtrasSpec, FittingSpec, GraphSpec, ModeId, NodeKindSpec, NodeSpec,
    PipeData, PumpData, SolveRequest, TankData, ValveData,
};
pub use response::{MissingInputs, SolveResponse};
pub use service::{handle_solve, ApiError, NetworkDefaults};
