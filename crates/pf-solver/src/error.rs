use thiserror::Error;

/// Hard failures of an analysis. Non-convergence is not one of them; an
/// iteration that runs out of budget still produces a result with
/// `converged = false`.
#[derive(Debug, Error)]
pub enum SolveError {
    #[error("infeasible problem: {what}")]
    Infeasible { what: String },

    #[error("unsupported configuration: {what}")]
    Unsupported { what: String },
}
