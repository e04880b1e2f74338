//! Pipe cross-section geometry.

use crate::{HydraulicsError, HydraulicsResult};
use pf_core::units::{Area, Length};
use std::f64::consts::PI;

/// Flow cross-section of a pipe segment.
///
/// Dimensions are validated at construction; a `CrossSection` value is
/// always geometrically sound.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CrossSection {
    Circular { diameter: Length },
    Rectangular { width: Length, height: Length },
    Annular { outer: Length, inner: Length },
}

impl CrossSection {
    pub fn circular(diameter: Length) -> HydraulicsResult<Self> {
        require_positive("diameter", diameter)?;
        Ok(Self::Circular { diameter })
    }

    pub fn rectangular(width: Length, height: Length) -> HydraulicsResult<Self> {
        require_positive("width", width)?;
        require_positive("height", height)?;
        Ok(Self::Rectangular { width, height })
    }

    pub fn annular(outer: Length, inner: Length) -> HydraulicsResult<Self> {
        require_positive("outer diameter", outer)?;
        require_positive("inner diameter", inner)?;
        if inner.value >= outer.value {
            return Err(HydraulicsError::InvalidDimension {
                what: "inner diameter",
                value: inner.value,
                expected: "smaller than the outer diameter",
            });
        }
        Ok(Self::Annular { outer, inner })
    }

    /// Cross-sectional flow area.
    pub fn area(&self) -> Area {
        match *self {
            Self::Circular { diameter } => diameter * diameter * (PI / 4.0),
            Self::Rectangular { width, height } => width * height,
            Self::Annular { outer, inner } => (outer * outer - inner * inner) * (PI / 4.0),
        }
    }

    /// Hydraulic diameter D_h = 4A/P.
    ///
    /// Reduces to D for circular and D_o - D_i for annular sections.
    pub fn hydraulic_diameter(&self) -> Length {
        match *self {
            Self::Circular { diameter } => diameter,
            Self::Rectangular { width, height } => width * height * 4.0 / ((width + height) * 2.0),
            Self::Annular { outer, inner } => outer - inner,
        }
    }

    /// Diameter for sections that have one (used by inverse-diameter design).
    pub fn diameter(&self) -> Option<Length> {
        match *self {
            Self::Circular { diameter } => Some(diameter),
            _ => None,
        }
    }
}

fn require_positive(what: &'static str, dim: Length) -> HydraulicsResult<()> {
    if !dim.value.is_finite() || dim.value <= 0.0 {
        return Err(HydraulicsError::InvalidDimension {
            what,
            value: dim.value,
            expected: "a positive finite length",
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pf_core::units::m;

    #[test]
    fn circular_area_and_dh() {
        let section = CrossSection::circular(m(0.1)).unwrap();
        assert!((section.area().value - PI * 0.0025).abs() < 1e-12);
        assert!((section.hydraulic_diameter().value - 0.1).abs() < 1e-12);
    }

    #[test]
    fn rectangular_dh_is_2ab_over_a_plus_b() {
        let section = CrossSection::rectangular(m(0.3), m(0.6)).unwrap();
        assert!((section.area().value - 0.18).abs() < 1e-12);
        // 2ab/(a+b) = 2*0.18/0.9 = 0.4
        assert!((section.hydraulic_diameter().value - 0.4).abs() < 1e-12);
    }

    #[test]
    fn annular_dh_is_gap() {
        let section = CrossSection::annular(m(0.2), m(0.1)).unwrap();
        assert!((section.hydraulic_diameter().value - 0.1).abs() < 1e-12);
        assert!((section.area().value - PI / 4.0 * 0.03).abs() < 1e-12);
    }

    #[test]
    fn non_positive_dimensions_rejected() {
        assert!(CrossSection::circular(m(0.0)).is_err());
        assert!(CrossSection::circular(m(-0.1)).is_err());
        assert!(CrossSection::rectangular(m(0.0), m(0.5)).is_err());
        assert!(CrossSection::annular(m(0.1), m(0.1)).is_err());
        assert!(CrossSection::annular(m(0.1), m(0.2)).is_err());
    }

    #[test]
    fn error_names_the_field() {
        let err = CrossSection::circular(m(-1.0)).unwrap_err();
        assert!(err.to_string().contains("diameter"));
    }
}
