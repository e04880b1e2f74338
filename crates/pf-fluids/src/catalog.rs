//! Built-in fluid catalog.
//!
//! Properties are tabulated at the temperature encoded in the identifier
//! (SI: kg/m^3, Pa*s, Pa). Identifiers and values follow the course tables
//! this tool is built around; the catalog is deliberately small and closed.

use crate::FluidProps;
use pf_core::units::{kgpm3, pa, pas};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FluidEntry {
    pub canonical_id: &'static str,
    pub display_name: &'static str,
    pub aliases: &'static [&'static str],
    pub rho_kg_m3: f64,
    pub mu_pa_s: f64,
    pub p_vap_pa: f64,
}

impl FluidEntry {
    pub fn props(&self) -> FluidProps {
        FluidProps {
            rho: kgpm3(self.rho_kg_m3),
            mu: pas(self.mu_pa_s),
            p_vap: pa(self.p_vap_pa),
        }
    }

    fn matches(&self, query: &str) -> bool {
        self.canonical_id.eq_ignore_ascii_case(query)
            || self
                .aliases
                .iter()
                .any(|alias| alias.eq_ignore_ascii_case(query))
    }
}

const FLUID_CATALOG: [FluidEntry; 7] = [
    FluidEntry {
        canonical_id: "water_20C",
        display_name: "Water (20 \u{b0}C)",
        aliases: &["water"],
        rho_kg_m3: 998.0,
        mu_pa_s: 0.001,
        p_vap_pa: 2337.0,
    },
    FluidEntry {
        canonical_id: "water_10C",
        display_name: "Water (10 \u{b0}C)",
        aliases: &[],
        rho_kg_m3: 999.7,
        mu_pa_s: 0.00131,
        p_vap_pa: 1228.0,
    },
    FluidEntry {
        canonical_id: "water_60F",
        display_name: "Water (60 \u{b0}F)",
        aliases: &[],
        rho_kg_m3: 999.0,
        mu_pa_s: 0.00114,
        p_vap_pa: 1770.0,
    },
    FluidEntry {
        canonical_id: "water_100F",
        display_name: "Water (100 \u{b0}F)",
        aliases: &[],
        rho_kg_m3: 993.0,
        mu_pa_s: 0.00068,
        p_vap_pa: 6340.0,
    },
    FluidEntry {
        canonical_id: "air_20C",
        display_name: "Air (20 \u{b0}C)",
        aliases: &["air"],
        rho_kg_m3: 1.204,
        mu_pa_s: 1.82e-5,
        p_vap_pa: 0.0,
    },
    FluidEntry {
        canonical_id: "air_80C",
        display_name: "Air (80 \u{b0}C)",
        aliases: &[],
        rho_kg_m3: 1.0,
        mu_pa_s: 2.0e-5,
        p_vap_pa: 0.0,
    },
    FluidEntry {
        canonical_id: "toluene_114C",
        display_name: "Toluene (114 \u{b0}C)",
        aliases: &["toluene"],
        rho_kg_m3: 866.0,
        mu_pa_s: 0.0004,
        // 0.223 atm at the tabulated temperature
        p_vap_pa: 101_325.0 * 0.223,
    },
];

/// The full catalog, in declaration order.
pub fn catalog() -> &'static [FluidEntry] {
    &FLUID_CATALOG
}

/// Look up a fluid by canonical id or alias (case-insensitive).
pub fn lookup(id: &str) -> Option<&'static FluidEntry> {
    let query = id.trim();
    FLUID_CATALOG.iter().find(|entry| entry.matches(query))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_canonical_and_alias() {
        assert!(lookup("water_20C").is_some());
        assert!(lookup("water").is_some());
        assert_eq!(
            lookup("water").unwrap().canonical_id,
            lookup("water_20C").unwrap().canonical_id
        );
    }

    #[test]
    fn lookup_is_case_insensitive() {
        assert!(lookup("WATER_20c").is_some());
        assert!(lookup("  Air ").is_some());
    }

    #[test]
    fn lookup_unknown_is_none() {
        assert!(lookup("glycol_50C").is_none());
        assert!(lookup("").is_none());
    }

    #[test]
    fn catalog_entries_are_physical() {
        for entry in catalog() {
            assert!(entry.rho_kg_m3 > 0.0, "{}", entry.canonical_id);
            assert!(entry.mu_pa_s > 0.0, "{}", entry.canonical_id);
            assert!(entry.p_vap_pa >= 0.0, "{}", entry.canonical_id);
        }
    }
}
