//! Integration tests for module exports.
//!
//! Verify that all public modules and types are correctly exported
//! and accessible via absolute paths.

/// Test that quadrature types are accessible via absolute path.
#[test]
fn test_quadrature_module_exports() {
    use pricer_core::math::quadrature::CompositeIntegrator;
    use pricer_core::math::quadrature::QuadratureRule;
    use pricer_core::types::QuadratureError;

    let integrator = CompositeIntegrator::new(QuadratureRule::default(), 1).unwrap();
    assert_eq!(integrator.rule(), QuadratureRule::GaussLegendre4);
    assert_eq!(integrator.panel_count(), 1);

    let err: QuadratureError = CompositeIntegrator::new(QuadratureRule::default(), 0).unwrap_err();
    assert!(format!("{}", err).contains("panel count"));
}

/// Test that solver types are accessible via absolute path.
#[test]
fn test_solvers_module_exports() {
    use pricer_core::math::solvers::LbfgsMinimizer;
    use pricer_core::math::solvers::Minimizer;
    use pricer_core::math::solvers::MinimizerConfig;
    use pricer_core::math::solvers::MinimizerReport;
    use pricer_core::math::solvers::TerminationReason;
    use pricer_core::types::error::SolverError;

    let config = MinimizerConfig::default();
    let report: MinimizerReport =
        LbfgsMinimizer::new().minimize(|p: &[f64]| p[0] * p[0], &[0.0], &config);
    assert_eq!(report.termination, TerminationReason::GradientTolerance);

    let err: SolverError = config.with_max_iterations(0).validate().unwrap_err();
    assert!(matches!(err, SolverError::InvalidConfig(_)));
}

/// A custom minimizer can be plugged in through the trait.
#[test]
fn test_minimizer_trait_is_implementable() {
    use pricer_core::math::solvers::{
        Minimizer, MinimizerConfig, MinimizerReport, TerminationReason,
    };

    struct EvaluateOnce;

    impl Minimizer for EvaluateOnce {
        fn minimize<F>(
            &self,
            objective: F,
            initial: &[f64],
            _: &MinimizerConfig,
        ) -> MinimizerReport
        where
            F: Fn(&[f64]) -> f64,
        {
            let value = objective(initial);
            MinimizerReport::stopped_at_start(
                initial.to_vec(),
                value,
                TerminationReason::FunctionTolerance,
                1,
            )
        }
    }

    let report = EvaluateOnce.minimize(
        |p: &[f64]| p.iter().sum(),
        &[1.0, 2.0],
        &MinimizerConfig::default(),
    );
    assert_eq!(report.value, 3.0);
    assert_eq!(report.iterations, 0);
}
