use pf_hydraulics::{friction_factor, friction_head_loss, reynolds_number, CrossSection};
use pf_core::units::m;
use proptest::prelude::*;

proptest! {
    // At fixed flow rate, a wider pipe always loses less head to friction.
    #[test]
    fn head_loss_decreases_with_diameter(
        d1 in 0.02f64..0.5,
        grow in 1.05f64..4.0,
        q in 1e-4f64..0.05,
    ) {
        let d2 = d1 * grow;
        let loss = |d: f64| {
            let area = std::f64::consts::PI * d * d / 4.0;
            let v = q / area;
            let re = reynolds_number(998.0, v, d, 0.001);
            let f = friction_factor(re, 4.5e-5 / d);
            friction_head_loss(f, 50.0, d, v)
        };
        prop_assert!(loss(d2) < loss(d1));
    }

    // Friction loss scales linearly with length, all else equal.
    #[test]
    fn head_loss_linear_in_length(
        f in 0.01f64..0.1,
        d in 0.02f64..0.5,
        v in 0.1f64..5.0,
        l in 1.0f64..500.0,
    ) {
        let h1 = friction_head_loss(f, l, d, v);
        let h2 = friction_head_loss(f, 2.0 * l, d, v);
        prop_assert!((h2 - 2.0 * h1).abs() < 1e-9 * h1.max(1.0));
    }

    // Friction factor stays in a physically sensible band for any realistic
    // Reynolds number and roughness.
    #[test]
    fn friction_factor_bounded(
        re in 1.0f64..1e8,
        rel in 0.0f64..0.05,
    ) {
        let f = friction_factor(re, rel);
        prop_assert!(f > 0.0);
        prop_assert!(f <= 64.0);
    }
}

#[test]
fn annular_hydraulic_diameter_is_gap() {
    let s = CrossSection::annular(m(0.2), m(0.1)).unwrap();
    assert!((s.hydraulic_diameter().value - 0.1).abs() < 1e-12);
}
