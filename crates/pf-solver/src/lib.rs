//! Steady-state solvers for single-path piping systems.
//!
//! The entry point is [`solve`]: give it a validated [`pf_graph::FlowPath`],
//! resolved fluid properties, and a bound [`Mode`], and it returns a
//! [`SolveResult`] snapshot. Iterative modes report non-convergence inside
//! the result; [`SolveError`] covers only problems no iteration could fix.

pub mod balance;
pub mod bracket;
pub mod diagnostics;
pub mod error;
pub mod mode;
pub mod result;
pub mod solve;

pub use bracket::{BracketConfig, RootFind};
pub use error::SolveError;
pub use mode::{resolve, Extras, Mode, ModeTag, Resolution};
pub use result::{CurvePoint, SegmentResult, SolveResult};
pub use solve::{solve, SolverConfig};
