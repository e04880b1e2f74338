//! Bracketing root finder for monotone residuals.
//!
//! The residuals solved here (driving head minus required head, as a
//! function of flow rate or diameter) are continuous and decrease in the
//! unknown, so an expand-then-bisect scheme is robust without derivatives.

/// Iteration budget and convergence tolerance, in the residual's own unit
/// (metres of head for every solver here).
#[derive(Debug, Clone, Copy)]
pub struct BracketConfig {
    pub max_iterations: u32,
    pub tol: f64,
}

impl Default for BracketConfig {
    fn default() -> Self {
        Self { max_iterations: 100, tol: 1e-6 }
    }
}

/// Outcome of a root search. `converged = false` is a valid outcome and
/// carries the best estimate found within the budget.
#[derive(Debug, Clone, Copy)]
pub struct RootFind {
    pub x: f64,
    pub residual: f64,
    pub iterations: u32,
    pub converged: bool,
}

/// Finds `x > 0` with `f(x) = 0` for a decreasing `f` with `f(0+) > 0`.
///
/// Starting from `seed`, the upper bound doubles until the residual changes
/// sign, then the bracket is bisected. Every function evaluation counts
/// against the iteration budget; exhausting it returns the current midpoint
/// unconverged rather than failing.
pub fn solve_decreasing<F: Fn(f64) -> f64>(f: F, seed: f64, cfg: &BracketConfig) -> RootFind {
    debug_assert!(seed > 0.0);
    let mut iterations = 0u32;

    let mut lo = 0.0;
    let mut hi = seed;
    let mut r_hi = f(hi);
    iterations += 1;

    // Expand until the root is bracketed.
    while r_hi > 0.0 {
        if iterations >= cfg.max_iterations {
            return RootFind { x: hi, residual: r_hi, iterations, converged: false };
        }
        lo = hi;
        hi *= 2.0;
        r_hi = f(hi);
        iterations += 1;
    }

    if r_hi.abs() <= cfg.tol {
        return RootFind { x: hi, residual: r_hi, iterations, converged: true };
    }

    // Bisect.
    let mut x = 0.5 * (lo + hi);
    let mut r = f(x);
    iterations += 1;
    while r.abs() > cfg.tol && iterations < cfg.max_iterations {
        if r > 0.0 {
            lo = x;
        } else {
            hi = x;
        }
        x = 0.5 * (lo + hi);
        r = f(x);
        iterations += 1;
    }

    RootFind { x, residual: r, iterations, converged: r.abs() <= cfg.tol }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_a_simple_root() {
        // f(x) = 4 - x^2, root at 2.
        let out = solve_decreasing(|x| 4.0 - x * x, 0.5, &BracketConfig::default());
        assert!(out.converged);
        assert!((out.x - 2.0).abs() < 1e-5, "x = {}", out.x);
        assert!(out.iterations > 0);
    }

    #[test]
    fn seed_past_the_root_still_works() {
        let out = solve_decreasing(|x| 4.0 - x * x, 100.0, &BracketConfig::default());
        assert!(out.converged);
        assert!((out.x - 2.0).abs() < 1e-5);
    }

    #[test]
    fn budget_exhaustion_reports_unconverged() {
        let cfg = BracketConfig { max_iterations: 5, tol: 1e-15 };
        let out = solve_decreasing(|x| 4.0 - x * x, 0.001, &cfg);
        assert!(!out.converged);
        assert!(out.iterations <= 5);
        assert!(out.x.is_finite());
    }

    #[test]
    fn residual_never_crossing_zero_is_unconverged() {
        // Always positive: no root to bracket.
        let out = solve_decreasing(|_| 1.0, 1.0, &BracketConfig::default());
        assert!(!out.converged);
        assert_eq!(out.iterations, BracketConfig::default().max_iterations);
    }
}
