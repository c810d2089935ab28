use std::f32::consts::TAU;

use crate::random::RandomUtil;

/// Cosine-power weighted direction on the hemisphere around +Y.
/// `r0` picks the azimuth, `r1` the polar angle; both in [0, 1).
/// Larger `exponent` concentrates the lobe around the normal.
pub fn hemisphere_sample(r0: f32, r1: f32, exponent: f32) -> [f32; 3] {
    let (sin_phi, cos_phi) = (TAU * r0).sin_cos();

    let cos_theta = (1.0 - r1).powf(1.0 / (exponent + 1.0));
    let sin_theta = (1.0 - cos_theta * cos_theta).max(0.0).sqrt();

    [sin_theta * cos_phi, cos_theta, sin_theta * sin_phi]
}

/// Draw a bounce direction ("russian roulette" lobe) from the generator
pub fn russian_roulette(rng: &mut RandomUtil, exponent: f32) -> [f32; 3] {
    let r0 = rng.unit();
    let r1 = rng.unit();
    hemisphere_sample(r0, r1, exponent)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn length(v: [f32; 3]) -> f32 {
        (v[0] * v[0] + v[1] * v[1] + v[2] * v[2]).sqrt()
    }

    #[test]
    fn test_r1_zero_points_straight_up() {
        let v = hemisphere_sample(0.3, 0.0, 20.0);
        assert!((v[1] - 1.0).abs() < 1e-6);
        assert!(v[0].abs() < 1e-3 && v[2].abs() < 1e-3);
    }

    #[test]
    fn test_exponent_tightens_lobe() {
        let wide = hemisphere_sample(0.0, 0.5, 0.0);
        let tight = hemisphere_sample(0.0, 0.5, 20.0);
        assert!(tight[1] > wide[1]);
    }

    proptest! {
        #[test]
        fn prop_unit_length_upper_hemisphere(r0 in 0.0f32..1.0, r1 in 0.0f32..1.0, e in 0.0f32..64.0) {
            let v = hemisphere_sample(r0, r1, e);
            prop_assert!((length(v) - 1.0).abs() < 1e-4);
            prop_assert!(v[1] >= 0.0);
        }
    }
}
