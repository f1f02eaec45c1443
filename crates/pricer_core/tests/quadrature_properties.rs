//! Property tests for the composite integrator.

use approx::assert_relative_eq;
use pricer_core::math::quadrature::{CompositeIntegrator, QuadratureRule};
use proptest::prelude::*;

fn rules() -> impl Strategy<Value = QuadratureRule> {
    prop_oneof![
        Just(QuadratureRule::GaussLegendre4),
        Just(QuadratureRule::SimpsonThreeEighths),
    ]
}

proptest! {
    /// Any cubic is integrated exactly, whatever the panel count.
    #[test]
    fn cubic_is_exact(
        rule in rules(),
        panels in 1usize..50,
        c in prop::array::uniform4(-5.0f64..5.0),
        lower in -3.0f64..0.0,
        width in 0.1f64..4.0,
    ) {
        let upper = lower + width;
        let f = |x: f64| c[0] + c[1] * x + c[2] * x * x + c[3] * x * x * x;
        let anti = |x: f64| {
            c[0] * x + c[1] * x * x / 2.0 + c[2] * x.powi(3) / 3.0 + c[3] * x.powi(4) / 4.0
        };

        let integrator = CompositeIntegrator::new(rule, panels).unwrap();
        let value = integrator.integrate(f, lower, upper).unwrap();
        let exact = anti(upper) - anti(lower);
        prop_assert!((value - exact).abs() <= 1e-10 * (1.0 + exact.abs()));
    }

    /// Integration is linear in the integrand.
    #[test]
    fn integral_is_linear(
        rule in rules(),
        panels in 1usize..200,
        a in -10.0f64..10.0,
        b in -10.0f64..10.0,
    ) {
        let integrator = CompositeIntegrator::new(rule, panels).unwrap();
        let f = |x: f64| x.sin();
        let g = |x: f64| (-x).exp();

        let combined = integrator.integrate(|x: f64| a * f(x) + b * g(x), 0.0, 3.0).unwrap();
        let separate = a * integrator.integrate(f, 0.0, 3.0).unwrap()
            + b * integrator.integrate(g, 0.0, 3.0).unwrap();
        prop_assert!((combined - separate).abs() <= 1e-10 * (1.0 + separate.abs()));
    }
}

#[test]
fn ten_times_more_panels_agrees_on_smooth_integrand() {
    let f = |x: f64| (2.0 * x).cos() * (-0.1 * x).exp();
    let coarse = CompositeIntegrator::new(QuadratureRule::GaussLegendre4, 100)
        .unwrap()
        .integrate(f, 1e-4, 50.0)
        .unwrap();
    let fine = CompositeIntegrator::new(QuadratureRule::GaussLegendre4, 1000)
        .unwrap()
        .integrate(f, 1e-4, 50.0)
        .unwrap();
    assert_relative_eq!(coarse, fine, max_relative = 1e-8);
}
