//! Reynolds number, flow regime, and the Darcy friction factor.

/// Upper bound of the laminar branch.
///
/// Conventionally the transition band extends to ~4000; this engine keeps
/// the single 2300 switch of the source tables and lets diagnostics flag
/// the 2300..4000 band as transitional instead of changing the correlation.
pub const RE_LAMINAR_MAX: f64 = 2300.0;

/// Lower bound of fully turbulent flow; below this (and above laminar) the
/// regime is reported as transitional.
pub const RE_TURBULENT_MIN: f64 = 4000.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowRegime {
    Laminar,
    Transitional,
    Turbulent,
}

impl FlowRegime {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Laminar => "laminar",
            Self::Transitional => "transitional",
            Self::Turbulent => "turbulent",
        }
    }
}

/// Re = rho * v * D_h / mu. Zero flow gives Re = 0 by definition.
pub fn reynolds_number(rho: f64, velocity: f64, d_h: f64, mu: f64) -> f64 {
    if velocity == 0.0 {
        return 0.0;
    }
    rho * velocity * d_h / mu
}

pub fn flow_regime(reynolds: f64) -> FlowRegime {
    if reynolds <= RE_LAMINAR_MAX {
        FlowRegime::Laminar
    } else if reynolds < RE_TURBULENT_MIN {
        FlowRegime::Transitional
    } else {
        FlowRegime::Turbulent
    }
}

/// Darcy friction factor.
///
/// - Re <= 2300: laminar, f = 64/Re
/// - Re > 2300: Swamee-Jain explicit Colebrook approximation,
///   f = 0.25 / log10(e/(3.7 D) + 5.74/Re^0.9)^2
///
/// Callers must not invoke this at Re = 0; zero flow is a defined state in
/// which no friction factor exists and every head loss is exactly zero.
pub fn friction_factor(reynolds: f64, rel_roughness: f64) -> f64 {
    debug_assert!(reynolds > 0.0, "friction factor undefined at zero flow");
    if reynolds <= RE_LAMINAR_MAX {
        // Laminar
        64.0 / reynolds
    } else {
        // Turbulent: Swamee-Jain
        let a = rel_roughness / 3.7;
        let b = 5.74 / reynolds.powf(0.9);
        let f = 0.25 / (a + b).log10().powi(2);
        f.max(0.0001) // Clamp to avoid issues
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn laminar_is_64_over_re() {
        for re in [1.0, 100.0, 1500.0, 2300.0] {
            assert!((friction_factor(re, 0.001) - 64.0 / re).abs() < 1e-12);
        }
    }

    #[test]
    fn turbulent_smooth_pipe_reference_value() {
        // Smooth pipe at Re = 1e5: Swamee-Jain gives f ~ 0.0180
        let f = friction_factor(1e5, 0.0);
        assert!((f - 0.018).abs() < 5e-4, "f = {f}");
    }

    #[test]
    fn rougher_pipe_has_higher_friction() {
        let f_smooth = friction_factor(1e5, 1e-6);
        let f_rough = friction_factor(1e5, 1e-3);
        assert!(f_rough > f_smooth);
    }

    #[test]
    fn transition_band_uses_turbulent_branch() {
        let f = friction_factor(3000.0, 0.001);
        assert!((f - 64.0 / 3000.0).abs() > 1e-4, "must not be laminar");
        assert!(f > 0.0 && f < 1.0);
    }

    #[test]
    fn regime_boundaries() {
        assert_eq!(flow_regime(0.0), FlowRegime::Laminar);
        assert_eq!(flow_regime(2300.0), FlowRegime::Laminar);
        assert_eq!(flow_regime(2301.0), FlowRegime::Transitional);
        assert_eq!(flow_regime(3999.0), FlowRegime::Transitional);
        assert_eq!(flow_regime(4000.0), FlowRegime::Turbulent);
    }

    #[test]
    fn reynolds_zero_at_zero_velocity() {
        assert_eq!(reynolds_number(998.0, 0.0, 0.1, 0.001), 0.0);
        let re = reynolds_number(998.0, 1.0, 0.1, 0.001);
        assert!((re - 99_800.0).abs() < 1e-6);
    }
}
