//! Darcy-Weisbach friction loss and K-factor minor losses, in metres of head.

use pf_core::units::constants::G_MPS2;

/// h_f = f * (L/D) * v^2 / (2 g), Darcy convention.
pub fn friction_head_loss(f: f64, length_m: f64, d_h_m: f64, velocity_m_s: f64) -> f64 {
    f * (length_m / d_h_m) * velocity_m_s * velocity_m_s / (2.0 * G_MPS2)
}

/// h_m = K * v^2 / (2 g).
pub fn minor_head_loss(k_total: f64, velocity_m_s: f64) -> f64 {
    k_total * velocity_m_s * velocity_m_s / (2.0 * G_MPS2)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn friction_loss_hand_check() {
        // f = 0.02, L = 100 m, D = 0.1 m, v = 2 m/s:
        // h_f = 0.02 * 1000 * 4 / 19.62 = 4.0775...
        let h = friction_head_loss(0.02, 100.0, 0.1, 2.0);
        assert!((h - 4.07747).abs() < 1e-4, "h = {h}");
    }

    #[test]
    fn minor_loss_hand_check() {
        // K = 1.5, v = 2 m/s: h = 1.5 * 4 / 19.62
        let h = minor_head_loss(1.5, 2.0);
        assert!((h - 0.30581).abs() < 1e-4, "h = {h}");
    }

    #[test]
    fn zero_velocity_gives_zero_loss() {
        assert_eq!(friction_head_loss(0.02, 100.0, 0.1, 0.0), 0.0);
        assert_eq!(minor_head_loss(25.0, 0.0), 0.0);
    }
}
