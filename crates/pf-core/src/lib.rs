//! pf-core: stable foundation for the pipeflow workspace.
//!
//! Contains:
//! - units (uom SI types + constructors + hydraulic constants)
//! - numeric (tolerances + float helpers)
//! - ids (stable compact IDs for network objects)
//! - error (shared error types)

pub mod error;
pub mod ids;
pub mod numeric;
pub mod units;

// Re-exports: nice ergonomics for downstream crates
pub use error::{CoreError, CoreResult};
pub use ids::*;
pub use numeric::*;
pub use units::*;
