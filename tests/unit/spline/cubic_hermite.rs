//! Tests for spline evaluation, lazy recompute and state management

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use splinedist::spline::gradient::GradientMethod;
    use splinedist::spline::monotone::MonotonicMode;
    use splinedist::{MonotoneHermiteSpline, SplineError, SplineOptions};
    use std::collections::HashMap;
    use std::f64::consts::PI;

    // Strictly decreasing, but finite differences overshoot between 0.4 and 0.5
    const TRICKSY: [(f64, f64); 9] = [
        (0.1, 3.0),
        (0.2, 2.9),
        (0.3, 2.5),
        (0.4, 1.0),
        (0.5, 0.9),
        (0.6, 0.8),
        (0.7, 0.5),
        (0.8, 0.2),
        (0.9, 0.1),
    ];

    fn spline_with(options: SplineOptions) -> MonotoneHermiteSpline {
        MonotoneHermiteSpline::with_options(options).expect("valid options")
    }

    fn dense_grid() -> impl Iterator<Item = f64> {
        (100..=900).map(|k| f64::from(k) / 1000.0)
    }

    // Tests monotone modes keep the slope non-positive over decreasing data
    // Verified by disabling monotonic correction
    #[test]
    fn test_tricksy_decreasing_stays_monotone() {
        for mode in [MonotonicMode::Strict, MonotonicMode::NonStrict] {
            let spline = spline_with(SplineOptions::new().data(TRICKSY).monotonic(mode));

            for x in dense_grid() {
                let slope = spline.derivative(x).expect("inside domain");
                assert!(slope <= 1e-12, "{mode:?}: q'({x}) = {slope}");
            }
        }
    }

    // Tests monotone modes keep the slope non-negative over increasing data
    // Verified by skipping the strict rescale
    #[test]
    fn test_tricksy_increasing_stays_monotone() {
        let increasing = TRICKSY.map(|(x, y)| (x, 3.1 - y));

        for mode in [MonotonicMode::Strict, MonotonicMode::NonStrict] {
            for method in [
                GradientMethod::FiniteDifference,
                GradientMethod::WeightedSecant,
                GradientMethod::TridiagonalSmooth,
            ] {
                let spline = spline_with(
                    SplineOptions::new()
                        .data(increasing)
                        .gradient_method(method)
                        .monotonic(mode),
                );

                for x in dense_grid() {
                    let slope = spline.derivative(x).expect("inside domain");
                    assert!(slope >= -1e-12, "{method:?}/{mode:?}: q'({x}) = {slope}");
                }
            }
        }
    }

    // Tests y = x^2 with exact end gradients is reproduced to 1e-7
    // Verified by omitting the fixed end gradients
    #[test]
    fn test_quadratic_with_smooth_gradients() {
        let knots: Vec<(f64, f64)> = (0..=10).map(f64::from).map(|x| (x, x * x)).collect();
        let spline = spline_with(
            SplineOptions::new()
                .data(knots)
                .gradient_method(GradientMethod::TridiagonalSmooth)
                .fixed_gradients([(0.0, 0.0), (10.0, 20.0)]),
        );

        for k in 0..=40 {
            let x = f64::from(k) / 4.0;
            let value = spline.evaluate(x).expect("inside domain");
            let slope = spline.derivative(x).expect("inside domain");
            let curvature = spline.second_derivative(x).expect("inside domain");

            assert!((value - x * x).abs() < 1e-7, "q({x}) = {value}");
            assert!((slope - 2.0 * x).abs() < 1e-7, "q'({x}) = {slope}");
            assert!((curvature - 2.0).abs() < 1e-7, "q''({x}) = {curvature}");
        }
    }

    // Tests finite differences track a sine wave between knots
    // Verified by using one-sided secants everywhere
    #[test]
    fn test_sine_with_finite_differences() {
        let step = PI / 16.0;
        let knots: Vec<(f64, f64)> = (0..=32)
            .map(|k| f64::from(k) * step)
            .map(|x| (x, x.sin()))
            .collect();
        let spline = spline_with(SplineOptions::new().data(knots));

        for k in 0..32 {
            let x = (f64::from(k) + 0.5) * step;
            let value = spline.evaluate(x).expect("inside domain");
            assert!((value - x.sin()).abs() < 2e-3, "q({x}) = {value}");
        }
    }

    // Tests a clamped smooth spline follows exp(x)
    // Verified by leaving the ends natural
    #[test]
    fn test_exponential_with_clamped_ends() {
        let knots: Vec<(f64, f64)> = (0..=8)
            .map(|k| f64::from(k) / 4.0)
            .map(|x| (x, x.exp()))
            .collect();
        let spline = spline_with(
            SplineOptions::new()
                .data(knots)
                .gradient_method(GradientMethod::TridiagonalSmooth)
                .fixed_gradients([(0.0, 1.0), (2.0, 2.0_f64.exp())]),
        );

        for k in 0..=20 {
            let x = f64::from(k) / 10.0;
            let value = spline.evaluate(x).expect("inside domain");
            let slope = spline.derivative(x).expect("inside domain");
            assert!((value - x.exp()).abs() < 1e-3, "q({x}) = {value}");
            assert!((slope - x.exp()).abs() < 1e-2, "q'({x}) = {slope}");
        }
    }

    // Tests strict domain rejects outside arguments and NaN
    // Verified by clamping instead of rejecting
    #[test]
    fn test_strict_domain() {
        let spline = spline_with(SplineOptions::new().data([(0.0, 1.0), (1.0, 3.0), (2.0, 5.0)]));

        assert_eq!(
            spline.evaluate(-0.5),
            Err(SplineError::OutOfDomain {
                x: -0.5,
                lower: 0.0,
                upper: 2.0
            })
        );
        assert!(spline.derivative(2.5).is_err());
        assert!(spline.second_derivative(f64::NAN).is_err());
        assert_eq!(spline.domain(), Ok((0.0, 2.0)));
    }

    // Tests the end cubics extrapolate when strict domain is off
    // Verified by extrapolating with the wrong end segment
    #[test]
    fn test_extrapolation() {
        let spline = spline_with(
            SplineOptions::new()
                .data([(0.0, 1.0), (1.0, 3.0), (2.0, 5.0)])
                .strict_domain(false),
        );

        assert!((spline.evaluate(-1.0).expect("extrapolates") + 1.0).abs() < 1e-12);
        assert!((spline.evaluate(3.0).expect("extrapolates") - 7.0).abs() < 1e-12);
        assert!((spline.derivative(10.0).expect("extrapolates") - 2.0).abs() < 1e-12);
    }

    // Tests fewer than two knots is reported at query time
    // Verified by allowing a single knot
    #[test]
    fn test_insufficient_data() {
        let mut spline = MonotoneHermiteSpline::new();
        assert_eq!(
            spline.evaluate(0.0),
            Err(SplineError::InsufficientData {
                required: 2,
                available: 0
            })
        );

        spline.put((1.0, 1.0)).expect("valid knot");
        spline.put((1.0, 2.0)).expect("valid knot");
        assert_eq!(
            spline.recompute(),
            Err(SplineError::InsufficientData {
                required: 2,
                available: 1
            })
        );
        assert!(spline.domain().is_err());
    }

    // Tests derived state is rebuilt only after mutation
    // Verified by never clearing the cached state
    #[test]
    fn test_lazy_recompute() {
        let mut spline = MonotoneHermiteSpline::new();
        assert!(spline.is_dirty());

        spline.put([[0.0, 0.0], [1.0, 1.0]]).expect("valid knots");
        assert!(spline.is_dirty());

        assert!((spline.evaluate(0.5).expect("inside domain") - 0.5).abs() < 1e-12);
        assert!(!spline.is_dirty());

        // replacing a value at an existing abscissa still invalidates
        spline.put((1.0, 3.0)).expect("valid knot");
        assert!(spline.is_dirty());
        assert!((spline.evaluate(1.0).expect("inside domain") - 3.0).abs() < 1e-12);

        spline
            .configure(SplineOptions::new().monotonic(MonotonicMode::Strict))
            .expect("valid options");
        assert!(spline.is_dirty());
    }

    // Tests configure touches knots only when data is given, and fails atomically
    // Verified by clearing knots on every configure
    #[test]
    fn test_configure_isolation() {
        let mut spline = MonotoneHermiteSpline::new();
        spline.put(vec![(0.0, 0.0), (1.0, 1.0)]).expect("valid knots");
        let knots = spline.data();

        spline
            .configure(SplineOptions::new().strict_domain(false))
            .expect("valid options");
        assert_eq!(spline.data(), knots);
        assert!(!spline.configuration().strict_domain);

        let before = spline.configuration();
        let rejected = spline.configure(
            SplineOptions::new()
                .gradient_method(GradientMethod::WeightedSecant)
                .data([(f64::NAN, 1.0)]),
        );
        assert!(matches!(rejected, Err(SplineError::InvalidFormat { .. })));
        assert_eq!(spline.configuration(), before);
        assert_eq!(spline.data(), knots);

        let rejected = spline.configure(SplineOptions::new().monotonic_epsilon(-1.0));
        assert!(matches!(rejected, Err(SplineError::InvalidArgument { .. })));
        assert_eq!(spline.configuration(), before);

        spline
            .configure(SplineOptions::new().data([(5.0, 5.0), (6.0, 7.0)]))
            .expect("valid options");
        assert_eq!(
            spline.data().iter().collect::<Vec<_>>(),
            vec![(5.0, 5.0), (6.0, 7.0)]
        );
    }

    // Tests clear keeps configuration and reset restores defaults
    // Verified by resetting configuration in clear
    #[test]
    fn test_clear_and_reset() {
        let mut spline = spline_with(
            SplineOptions::new()
                .data([(0.0, 0.0), (1.0, 1.0)])
                .monotonic(MonotonicMode::NonStrict),
        );

        spline.clear();
        assert!(spline.data().is_empty());
        assert_eq!(spline.configuration().monotonic, MonotonicMode::NonStrict);
        assert!(spline.is_dirty());

        spline.put((0.0, 1.0)).expect("valid knot");
        spline.reset();
        assert!(spline.data().is_empty());
        assert_eq!(spline.configuration(), MonotoneHermiteSpline::new().configuration());
    }

    // Tests accessors return sorted copies aligned with each other
    // Verified by returning knots in insertion order
    #[test]
    fn test_accessors() {
        let mut spline = MonotoneHermiteSpline::new();
        spline
            .put(vec![vec![2.0, 4.0], vec![0.0, 0.0], vec![1.0, 1.0]])
            .expect("valid knots");

        assert_eq!(spline.x(), Ok(vec![0.0, 1.0, 2.0]));
        assert_eq!(spline.y(), Ok(vec![0.0, 1.0, 4.0]));
        assert_eq!(spline.m(), Ok(vec![1.0, 2.0, 3.0]));

        let segments = spline.segments().expect("fitted");
        assert_eq!(segments.len(), 2);
        assert!((segments[1].x_lo - 1.0).abs() < f64::EPSILON);
        assert!((segments[1].x_hi() - 2.0).abs() < f64::EPSILON);
    }

    // Tests every ingestion shape and that rejected input changes nothing
    // Verified by inserting the valid prefix of bad input
    #[test]
    fn test_put_shapes() {
        let mut spline = MonotoneHermiteSpline::new();
        spline.put((1_i32, 2_i32)).expect("pair");
        spline.put([3.0, 4.0]).expect("row");
        spline.put([[5.0, 6.0], [7.0, 8.0]]).expect("rows");
        spline
            .put(&HashMap::from([("9".to_string(), 10.0)]))
            .expect("map");
        assert_eq!(spline.data().len(), 5);

        let rejected = spline.put(vec![vec![11.0, 12.0], vec![13.0]]);
        assert!(matches!(rejected, Err(SplineError::InvalidFormat { .. })));
        assert_eq!(spline.data().len(), 5);
        assert!(!spline.data().contains(11.0));
    }

    fn knot_sets() -> impl Strategy<Value = Vec<(f64, f64)>> {
        prop::collection::btree_map(-500_i32..500, -100.0_f64..100.0, 2..30).prop_map(|map| {
            map.into_iter()
                .map(|(x, y)| (f64::from(x) / 10.0, y))
                .collect()
        })
    }

    fn increasing_sets() -> impl Strategy<Value = Vec<(f64, f64)>> {
        prop::collection::vec((0.01_f64..5.0, 0.0_f64..10.0), 2..25).prop_map(|steps| {
            let (mut x, mut y) = (0.0, 0.0);
            steps
                .into_iter()
                .map(|(dx, dy)| {
                    x += dx;
                    y += dy;
                    (x, y)
                })
                .collect()
        })
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        // Every gradient policy interpolates the knots
        #[test]
        fn interpolates_knots(knots in knot_sets()) {
            for method in [
                GradientMethod::FiniteDifference,
                GradientMethod::WeightedSecant,
                GradientMethod::TridiagonalSmooth,
            ] {
                let spline = spline_with(
                    SplineOptions::new()
                        .data(knots.iter().copied())
                        .gradient_method(method)
                        .monotonic(MonotonicMode::Strict),
                );
                for &(x, y) in &knots {
                    let value = spline.evaluate(x).expect("knot inside domain");
                    prop_assert!((value - y).abs() < 1e-9, "{method:?}: q({x}) = {value}, want {y}");
                }
            }
        }

        // Monotone modes never overshoot non-decreasing data
        #[test]
        fn monotone_data_gives_monotone_curve(knots in increasing_sets()) {
            for mode in [MonotonicMode::Strict, MonotonicMode::NonStrict] {
                let spline = spline_with(
                    SplineOptions::new()
                        .data(knots.iter().copied())
                        .gradient_method(GradientMethod::WeightedSecant)
                        .monotonic(mode),
                );
                for pair in knots.windows(2) {
                    let [(x0, y0), (x1, y1)] = [pair[0], pair[1]];
                    for k in 0..=20 {
                        let x = x0 + (x1 - x0) * f64::from(k) / 20.0;
                        let x = x.min(x1);
                        let value = spline.evaluate(x).expect("inside domain");
                        let slope = spline.derivative(x).expect("inside domain");
                        prop_assert!(slope >= -1e-9, "{mode:?}: q'({x}) = {slope}");
                        prop_assert!(value >= y0 - 1e-9 && value <= y1 + 1e-9,
                            "{mode:?}: q({x}) = {value} outside [{y0}, {y1}]");
                    }
                }
            }
        }
    }
}
