use pf_hydraulics::HydraulicsError;
use thiserror::Error;

/// Errors raised while building a network or reducing it to a flow path.
#[derive(Debug, Error)]
pub enum GraphError {
    #[error("duplicate node id '{name}'")]
    DuplicateNode { name: String },

    #[error("edge references unknown node '{name}'")]
    UnknownNode { name: String },

    #[error("network has no edges")]
    Empty,

    #[error("expected exactly 2 tanks, found {found}")]
    TankCount { found: usize },

    #[error("no tank with a single outgoing pipe to start from")]
    NoSource,

    #[error("no tank with a single incoming pipe to end at")]
    NoSink,

    #[error("node '{name}' branches; only a single series path is supported")]
    Branching { name: String },

    #[error("network contains a cycle through '{name}'")]
    Cycle { name: String },

    #[error("network is not a single connected path from source to sink")]
    Disconnected,

    #[error("tank '{name}' must sit at an end of the path, not inside it")]
    InteriorTank { name: String },

    #[error("at most one pump is supported, found more than one")]
    MultiplePumps,

    #[error("invalid parameter: {what}")]
    InvalidParameter { what: String },

    #[error(transparent)]
    Hydraulics(#[from] HydraulicsError),
}

pub type GraphResult<T> = Result<T, GraphError>;
