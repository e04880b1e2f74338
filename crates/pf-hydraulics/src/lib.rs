//! pf-hydraulics: pipe geometry, friction factor, and head-loss formulas.
//!
//! Everything here is a pure function of its inputs: geometry resolution
//! (cross-section -> area and hydraulic diameter), the Darcy friction factor
//! correlation, the Darcy-Weisbach head-loss terms, and the static table of
//! minor-loss coefficients for fittings and valves.

pub mod fittings;
pub mod friction;
pub mod geometry;
pub mod head_loss;

pub use fittings::{fitting_catalog, fitting_k, FittingEntry};
pub use friction::{flow_regime, friction_factor, reynolds_number, FlowRegime};
pub use geometry::CrossSection;
pub use head_loss::{friction_head_loss, minor_head_loss};

pub type HydraulicsResult<T> = Result<T, HydraulicsError>;

#[derive(thiserror::Error, Debug)]
pub enum HydraulicsError {
    #[error("Invalid {what}: {value} (must be {expected})")]
    InvalidDimension {
        what: &'static str,
        value: f64,
        expected: &'static str,
    },

    #[error("Unknown fitting type: {id}")]
    UnknownFitting { id: String },
}
