//! Tests for single Hermite segment evaluation and integrals

#[cfg(test)]
mod tests {
    use splinedist::math::hermite::HermiteSegment;

    // y = x^3 on [1, 2] with exact end gradients
    fn cubic_segment() -> HermiteSegment {
        HermiteSegment::between((1.0, 1.0, 3.0), (2.0, 8.0, 12.0))
    }

    // Tests a cubic is reproduced exactly along with its derivatives
    // Verified by swapping the two gradient basis functions
    #[test]
    fn test_reproduces_cubic() {
        let segment = cubic_segment();

        for k in 0..=10 {
            let x = 1.0 + f64::from(k) / 10.0;
            assert!((segment.value(x) - x.powi(3)).abs() < 1e-12);
            assert!((segment.derivative(x) - 3.0 * x * x).abs() < 1e-12);
            assert!((segment.second_derivative(x) - 6.0 * x).abs() < 1e-10);
        }
    }

    // Tests geometry helpers
    // Verified by measuring position from the right end
    #[test]
    fn test_geometry() {
        let segment = cubic_segment();

        assert!((segment.h - 1.0).abs() < f64::EPSILON);
        assert!((segment.x_hi() - 2.0).abs() < f64::EPSILON);
        assert!((segment.position(1.25) - 0.25).abs() < f64::EPSILON);
    }

    // Tests derivative coefficients in the normalized coordinate
    // Verified by dropping the width factor from the b coefficient
    #[test]
    fn test_derivative_coefficients() {
        // 3 (1 + t)^2 = 3 t^2 + 6 t + 3
        let [a, b, c] = cubic_segment().derivative_coefficients();

        assert!((a - 3.0).abs() < 1e-12);
        assert!((b - 6.0).abs() < 1e-12);
        assert!((c - 3.0).abs() < 1e-12);
    }

    // Tests closed-form moment integrals against analytic values
    // Verified by integrating over [0, 1] without the shift g
    #[test]
    fn test_moment_integrals() {
        let segment = cubic_segment();

        // integral of x * 3x^2 and x^2 * 3x^2 over [1, 2]
        assert!((segment.first_moment() - 11.25).abs() < 1e-10);
        assert!((segment.second_moment() - 18.6).abs() < 1e-10);
    }

    // Tests a linear segment integrates to uniform moments
    // Verified by halving the width
    #[test]
    fn test_uniform_segment_moments() {
        let segment = HermiteSegment::between((0.0, 0.0, 1.0), (1.0, 1.0, 1.0));

        assert!((segment.first_moment() - 0.5).abs() < 1e-12);
        assert!((segment.second_moment() - 1.0 / 3.0).abs() < 1e-12);
    }
}
