//! Analysis mode selection.
//!
//! A request names a mode tag (or leaves it to auto-detection) and supplies
//! loose extra inputs; resolution binds those into a fully-specified
//! [`Mode`] or reports exactly which inputs are missing, using the wire
//! names clients sent them under.

use pf_graph::{FlowPath, PumpCurve, PumpSpec};

/// Mode as named by a request, before inputs are bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ModeTag {
    /// Pick from the network: curve pump -> operating point, other pump ->
    /// head- or power-driven, no pump -> gravity.
    #[default]
    Auto,
    Gravity,
    SystemCurve,
    GivenPumpHead,
    GivenPumpPower,
    GivenFlowAndPower,
    OperatingPoint,
    InverseDiameter,
    InverseLength,
}

/// Loose numeric inputs accompanying a request.
#[derive(Debug, Clone, Default)]
pub struct Extras {
    pub q_m3_s: Option<f64>,
    pub head_m: Option<f64>,
    pub power_w: Option<f64>,
    pub efficiency: Option<f64>,
    pub curve: Option<PumpCurve>,
    /// Sample count for curve sweeps.
    pub curve_points: Option<u32>,
}

/// A fully-bound analysis, ready to run.
#[derive(Debug, Clone)]
pub enum Mode {
    Gravity,
    SystemCurve { points: u32 },
    GivenPumpHead { head_m: f64 },
    GivenPumpPower { power_w: f64, efficiency: f64 },
    GivenFlowAndPower { q_m3_s: f64, power_w: f64, efficiency: f64 },
    OperatingPoint { curve: PumpCurve },
    InverseDiameter { q_m3_s: f64, head_m: f64 },
    InverseLength { q_m3_s: f64, head_m: f64 },
}

impl Mode {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Gravity => "gravity",
            Self::SystemCurve { .. } => "system_curve",
            Self::GivenPumpHead { .. } => "given_pump_head",
            Self::GivenPumpPower { .. } => "given_pump_power",
            Self::GivenFlowAndPower { .. } => "given_Q_and_power",
            Self::OperatingPoint { .. } => "operating_point",
            Self::InverseDiameter { .. } => "inverse_diameter",
            Self::InverseLength { .. } => "inverse_length",
        }
    }
}

/// Either a runnable mode or the wire names of the inputs still needed.
#[derive(Debug, Clone)]
pub enum Resolution {
    Ready(Mode),
    Missing(Vec<&'static str>),
}

const DEFAULT_CURVE_POINTS: u32 = 20;
const DEFAULT_EFFICIENCY: f64 = 1.0;

fn pump_spec(path: &FlowPath) -> Option<&PumpSpec> {
    path.pump.as_ref().map(|p| &p.spec)
}

fn head_from(extras: &Extras, path: &FlowPath) -> Option<f64> {
    extras.head_m.or(match pump_spec(path) {
        Some(PumpSpec::FixedHead { head_m }) => Some(*head_m),
        _ => None,
    })
}

fn power_from(extras: &Extras, path: &FlowPath) -> Option<(f64, f64)> {
    if let Some(w) = extras.power_w {
        return Some((w, extras.efficiency.unwrap_or(DEFAULT_EFFICIENCY)));
    }
    match pump_spec(path) {
        Some(PumpSpec::FixedPower { power_w, efficiency }) => {
            Some((*power_w, extras.efficiency.unwrap_or(*efficiency)))
        }
        _ => None,
    }
}

fn curve_from<'a>(extras: &'a Extras, path: &'a FlowPath) -> Option<&'a PumpCurve> {
    extras.curve.as_ref().or(match pump_spec(path) {
        Some(PumpSpec::Curve(c)) => Some(c),
        _ => None,
    })
}

/// Binds a mode tag against the network and the extras.
pub fn resolve(tag: ModeTag, extras: &Extras, path: &FlowPath) -> Resolution {
    use Resolution::{Missing, Ready};

    match tag {
        ModeTag::Auto => resolve(auto_tag(extras, path), extras, path),

        ModeTag::Gravity => Ready(Mode::Gravity),

        ModeTag::SystemCurve => Ready(Mode::SystemCurve {
            points: extras.curve_points.unwrap_or(DEFAULT_CURVE_POINTS),
        }),

        ModeTag::GivenPumpHead => match head_from(extras, path) {
            Some(head_m) => Ready(Mode::GivenPumpHead { head_m }),
            None => Missing(vec!["h_a"]),
        },

        ModeTag::GivenPumpPower => match power_from(extras, path) {
            Some((power_w, efficiency)) => Ready(Mode::GivenPumpPower { power_w, efficiency }),
            None => Missing(vec!["W_shaft"]),
        },

        ModeTag::GivenFlowAndPower => {
            let mut missing = Vec::new();
            if extras.q_m3_s.is_none() {
                missing.push("Q");
            }
            let power = power_from(extras, path);
            if power.is_none() {
                missing.push("W_shaft");
            }
            if !missing.is_empty() {
                return Missing(missing);
            }
            let (power_w, efficiency) = power.unwrap_or((0.0, DEFAULT_EFFICIENCY));
            Ready(Mode::GivenFlowAndPower {
                q_m3_s: extras.q_m3_s.unwrap_or_default(),
                power_w,
                efficiency,
            })
        }

        ModeTag::OperatingPoint => match curve_from(extras, path) {
            Some(curve) => Ready(Mode::OperatingPoint { curve: curve.clone() }),
            None => Missing(vec!["pump_curve"]),
        },

        ModeTag::InverseDiameter | ModeTag::InverseLength => {
            let mut missing = Vec::new();
            if extras.q_m3_s.is_none() {
                missing.push("Q");
            }
            // Without a pump the driving head is purely hydrostatic, so a
            // missing h_a means zero added head rather than a missing input.
            let head = head_from(extras, path).or(if path.pump.is_none() {
                Some(0.0)
            } else {
                None
            });
            if head.is_none() {
                missing.push("h_a");
            }
            if !missing.is_empty() {
                return Missing(missing);
            }
            let q_m3_s = extras.q_m3_s.unwrap_or_default();
            let head_m = head.unwrap_or_default();
            if tag == ModeTag::InverseDiameter {
                Ready(Mode::InverseDiameter { q_m3_s, head_m })
            } else {
                Ready(Mode::InverseLength { q_m3_s, head_m })
            }
        }
    }
}

fn auto_tag(extras: &Extras, path: &FlowPath) -> ModeTag {
    match pump_spec(path) {
        None => ModeTag::Gravity,
        Some(PumpSpec::Curve(_)) => ModeTag::OperatingPoint,
        Some(PumpSpec::FixedHead { .. }) => ModeTag::GivenPumpHead,
        Some(PumpSpec::FixedPower { .. }) => ModeTag::GivenPumpPower,
        Some(PumpSpec::Unspecified) => {
            if extras.curve.is_some() {
                ModeTag::OperatingPoint
            } else if extras.power_w.is_some() {
                ModeTag::GivenPumpPower
            } else {
                // Head-driven is the least surprising reading of a bare
                // pump node; resolution reports h_a missing if none came.
                ModeTag::GivenPumpHead
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pf_core::units::{constants::P_ATM_PA, m, pa};
    use pf_graph::{PumpInstall, Segment, TankBoundary};
    use pf_hydraulics::CrossSection;

    fn bare_path(pump: Option<PumpSpec>) -> FlowPath {
        FlowPath {
            inlet: TankBoundary { elevation: m(10.0), pressure: pa(P_ATM_PA), fluid: None },
            outlet: TankBoundary { elevation: m(0.0), pressure: pa(P_ATM_PA), fluid: None },
            segments: vec![Segment {
                label: "main".to_string(),
                length: m(100.0),
                section: CrossSection::circular(m(0.1)).unwrap(),
                roughness: m(4.5e-5),
                k_minor: 0.0,
            }],
            pump: pump.map(|spec| PumpInstall { spec, suction_segments: 0 }),
            blocked: false,
        }
    }

    #[test]
    fn auto_without_pump_is_gravity() {
        let r = resolve(ModeTag::Auto, &Extras::default(), &bare_path(None));
        assert!(matches!(r, Resolution::Ready(Mode::Gravity)));
    }

    #[test]
    fn auto_with_curve_pump_is_operating_point() {
        let curve = PumpCurve::Quadratic { a: -100.0, b: 0.0, c: 5.0 };
        let path = bare_path(Some(PumpSpec::Curve(curve)));
        let r = resolve(ModeTag::Auto, &Extras::default(), &path);
        assert!(matches!(r, Resolution::Ready(Mode::OperatingPoint { .. })));
    }

    #[test]
    fn pump_head_missing_reports_h_a() {
        let path = bare_path(Some(PumpSpec::Unspecified));
        let r = resolve(ModeTag::GivenPumpHead, &Extras::default(), &path);
        match r {
            Resolution::Missing(fields) => assert_eq!(fields, vec!["h_a"]),
            other => panic!("expected missing inputs, got {other:?}"),
        }
    }

    #[test]
    fn flow_and_power_reports_both_missing() {
        let path = bare_path(Some(PumpSpec::Unspecified));
        let r = resolve(ModeTag::GivenFlowAndPower, &Extras::default(), &path);
        match r {
            Resolution::Missing(fields) => assert_eq!(fields, vec!["Q", "W_shaft"]),
            other => panic!("expected missing inputs, got {other:?}"),
        }
    }

    #[test]
    fn extras_override_pump_efficiency() {
        let path = bare_path(Some(PumpSpec::FixedPower { power_w: 500.0, efficiency: 0.7 }));
        let extras = Extras { efficiency: Some(0.9), ..Extras::default() };
        match resolve(ModeTag::GivenPumpPower, &extras, &path) {
            Resolution::Ready(Mode::GivenPumpPower { power_w, efficiency }) => {
                assert!((power_w - 500.0).abs() < 1e-12);
                assert!((efficiency - 0.9).abs() < 1e-12);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn inverse_diameter_accepts_pump_head() {
        let path = bare_path(Some(PumpSpec::FixedHead { head_m: 12.0 }));
        let extras = Extras { q_m3_s: Some(0.01), ..Extras::default() };
        match resolve(ModeTag::InverseDiameter, &extras, &path) {
            Resolution::Ready(Mode::InverseDiameter { q_m3_s, head_m }) => {
                assert!((q_m3_s - 0.01).abs() < 1e-12);
                assert!((head_m - 12.0).abs() < 1e-12);
            }
            other => panic!("unexpected {other:?}"),
        }
    }
}
