//! pf-fluids: static fluid property table.
//!
//! Maps a fluid identifier (e.g. `water_20C`) to density, dynamic viscosity
//! and vapor pressure. Lookups are in-memory and synchronous; there is no
//! property backend behind this crate, the table is the model.

pub mod catalog;

use pf_core::units::{kgpm3, pa, pas, Density, DynVisc, Pressure};

pub use catalog::{catalog, lookup, FluidEntry};

pub type FluidResult<T> = Result<T, FluidError>;

#[derive(thiserror::Error, Debug)]
pub enum FluidError {
    #[error("Unknown fluid: {id}")]
    UnknownFluid { id: String },

    #[error("Non-physical fluid property: {what} = {value}")]
    NonPhysical { what: &'static str, value: f64 },
}

/// Resolved fluid properties for one solve call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FluidProps {
    pub rho: Density,
    pub mu: DynVisc,
    /// Vapor pressure at the table temperature; feeds the cavitation check.
    pub p_vap: Pressure,
}

impl FluidProps {
    /// Build from raw SI values, rejecting non-physical inputs.
    pub fn from_si(rho: f64, mu: f64, p_vap: f64) -> FluidResult<Self> {
        if !rho.is_finite() || rho <= 0.0 {
            return Err(FluidError::NonPhysical {
                what: "density",
                value: rho,
            });
        }
        if !mu.is_finite() || mu <= 0.0 {
            return Err(FluidError::NonPhysical {
                what: "viscosity",
                value: mu,
            });
        }
        if !p_vap.is_finite() || p_vap < 0.0 {
            return Err(FluidError::NonPhysical {
                what: "vapor pressure",
                value: p_vap,
            });
        }
        Ok(Self {
            rho: kgpm3(rho),
            mu: pas(mu),
            p_vap: pa(p_vap),
        })
    }

    /// Resolve a fluid identifier against the catalog.
    pub fn resolve(id: &str) -> FluidResult<Self> {
        lookup(id)
            .map(FluidEntry::props)
            .ok_or_else(|| FluidError::UnknownFluid { id: id.to_string() })
    }

    /// Apply explicit per-request overrides on top of the table values.
    pub fn with_overrides(self, rho: Option<f64>, mu: Option<f64>) -> FluidResult<Self> {
        Self::from_si(
            rho.unwrap_or(self.rho.value),
            mu.unwrap_or(self.mu.value),
            self.p_vap.value,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_known_fluid() {
        let props = FluidProps::resolve("water_20C").unwrap();
        assert!((props.rho.value - 998.0).abs() < 1e-9);
        assert!((props.mu.value - 0.001).abs() < 1e-12);
    }

    #[test]
    fn resolve_unknown_fluid_names_id() {
        let err = FluidProps::resolve("mercury_25C").unwrap_err();
        assert!(err.to_string().contains("mercury_25C"));
    }

    #[test]
    fn overrides_win_over_table() {
        let props = FluidProps::resolve("water_20C")
            .unwrap()
            .with_overrides(Some(999.7), None)
            .unwrap();
        assert!((props.rho.value - 999.7).abs() < 1e-9);
        assert!((props.mu.value - 0.001).abs() < 1e-12);
    }

    #[test]
    fn non_physical_density_rejected() {
        assert!(FluidProps::from_si(-1.0, 0.001, 0.0).is_err());
        assert!(FluidProps::from_si(998.0, 0.0, 0.0).is_err());
    }
}
