/// Geometric dilution factor `W(r) = ½(1 − √(1 − 1/r²))` of a uniformly
/// bright sphere seen from `radius` stellar radii.
///
/// Points inside the sphere (and NaN radii) get exactly `0.0`.
pub fn dilute(radius: f64) -> f64 {
    if radius.is_nan() || radius < 1.0 {
        return 0.0;
    }
    0.5 * (1.0 - (1.0 - 1.0 / (radius * radius)).sqrt())
}

pub fn dilute_all(radii: &[f64]) -> Vec<f64> {
    radii.iter().copied().map(dilute).collect()
}

#[cfg(test)]
mod tests {
    use super::{dilute, dilute_all};

    #[test]
    fn two_stellar_radii_matches_closed_form() {
        let expected = 0.5 * (1.0 - 0.75_f64.sqrt());
        assert!((dilute(2.0) - expected).abs() < 1.0e-15);
        assert!((dilute(2.0) - 0.066_987_3).abs() < 1.0e-7);
    }

    #[test]
    fn surface_sees_half_the_sky_and_far_field_vanishes() {
        assert_eq!(dilute(1.0), 0.5);
        assert!(dilute(1.0e6) < 1.0e-12);
        assert_eq!(dilute(f64::INFINITY), 0.0);
    }

    #[test]
    fn points_inside_the_sphere_are_exactly_zero() {
        for radius in [0.999_999, 0.5, 0.0, -3.0, f64::NEG_INFINITY, f64::NAN] {
            assert_eq!(dilute(radius), 0.0, "radius={radius}");
        }
    }

    #[test]
    fn dilute_all_is_elementwise_and_monotone_outside() {
        let values = dilute_all(&[0.5, 1.0, 2.0, 4.0, 8.0]);
        assert_eq!(values.len(), 5);
        assert_eq!(values[0], 0.0);
        assert!(values[1..].windows(2).all(|pair| pair[0] > pair[1]));
    }
}
