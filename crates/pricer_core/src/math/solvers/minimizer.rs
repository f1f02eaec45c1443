//! Narrow contract between a calibration loop and a numerical minimizer.

use std::fmt;

use super::MinimizerConfig;

/// Why a minimizer stopped.
///
/// The first three variants are convergence, [`MaxIterations`] is a budget
/// stop, and the rest are failures.
///
/// [`MaxIterations`]: TerminationReason::MaxIterations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TerminationReason {
    /// Relative function improvement fell below `eps_function`.
    FunctionTolerance,
    /// Step length fell below `eps_step`, or the line search found no
    /// acceptable point before the step shrank to nothing.
    ///
    /// Both mean no further progress is possible from the current point, so
    /// this counts as convergence.
    StepTolerance,
    /// Gradient norm fell below `eps_gradient`.
    GradientTolerance,
    /// Iteration budget exhausted.
    MaxIterations,
    /// Objective or gradient was NaN or infinite at the current point.
    NonFiniteObjective,
    /// Starting point or configuration was unusable.
    InvalidInput,
}

impl TerminationReason {
    /// True for the three tolerance-based stops.
    pub fn is_converged(&self) -> bool {
        matches!(
            self,
            TerminationReason::FunctionTolerance
                | TerminationReason::StepTolerance
                | TerminationReason::GradientTolerance
        )
    }

    /// True for stops that are neither convergence nor budget exhaustion.
    pub fn is_failure(&self) -> bool {
        !self.is_converged() && *self != TerminationReason::MaxIterations
    }

    /// Numeric code in the conventional quasi-Newton numbering
    /// (positive for normal stops, negative for failures). Logging only.
    pub fn code(&self) -> i32 {
        match self {
            TerminationReason::FunctionTolerance => 1,
            TerminationReason::StepTolerance => 2,
            TerminationReason::GradientTolerance => 4,
            TerminationReason::MaxIterations => 5,
            TerminationReason::NonFiniteObjective => -8,
            TerminationReason::InvalidInput => -1,
        }
    }
}

impl fmt::Display for TerminationReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            TerminationReason::FunctionTolerance => "function improvement below tolerance",
            TerminationReason::StepTolerance => "step length below tolerance",
            TerminationReason::GradientTolerance => "gradient norm below tolerance",
            TerminationReason::MaxIterations => "iteration budget exhausted",
            TerminationReason::NonFiniteObjective => "non-finite objective value",
            TerminationReason::InvalidInput => "invalid input",
        };
        f.write_str(text)
    }
}

/// Outcome of a single minimizer run.
#[derive(Debug, Clone, PartialEq)]
pub struct MinimizerReport {
    /// Final point. Equal to the starting point when the run failed at once.
    pub params: Vec<f64>,
    /// Objective at `params`.
    pub value: f64,
    /// Why the run stopped.
    pub termination: TerminationReason,
    /// Completed iterations.
    pub iterations: usize,
    /// Objective evaluations, including those spent on gradients.
    pub evaluations: usize,
}

impl MinimizerReport {
    /// Report for a run that stopped before its first iteration.
    pub fn stopped_at_start(
        params: Vec<f64>,
        value: f64,
        termination: TerminationReason,
        evaluations: usize,
    ) -> Self {
        Self {
            params,
            value,
            termination,
            iterations: 0,
            evaluations,
        }
    }
}

/// Unconstrained minimizer of a scalar objective over `R^n`.
///
/// Implementations must call `objective` synchronously on the calling thread
/// and must not retain it after returning.
///
/// # Example
///
/// ```
/// use pricer_core::math::solvers::{LbfgsMinimizer, Minimizer, MinimizerConfig};
///
/// let config = MinimizerConfig::new(1e-8, 200).with_max_step_size(0.0);
/// let report = LbfgsMinimizer::new().minimize(
///     |p: &[f64]| (p[0] - 2.0).powi(2) + (p[1] + 1.0).powi(2),
///     &[0.0, 0.0],
///     &config,
/// );
/// assert!(report.termination.is_converged());
/// assert!((report.params[0] - 2.0).abs() < 1e-3);
/// ```
pub trait Minimizer {
    /// Minimize `objective` starting from `initial`.
    fn minimize<F>(
        &self,
        objective: F,
        initial: &[f64],
        config: &MinimizerConfig,
    ) -> MinimizerReport
    where
        F: Fn(&[f64]) -> f64;
}
