//! Limited-memory BFGS minimizer with a finite-difference gradient.
//!
//! # Algorithm
//!
//! ```text
//! d_k     = -H_k g_k                 (two-loop recursion over the last m pairs)
//! x_{k+1} = x_k + α_k d_k            (backtracking until the Armijo condition holds)
//! s_k     = x_{k+1} - x_k,  y_k = g_{k+1} - g_k
//! ```
//!
//! The gradient is estimated by central differences with step `diff_step`,
//! falling back to a one-sided difference when one probe is non-finite.
//! Trial points whose objective is non-finite are treated as rejected and the
//! step is halved, so the minimizer steps around invalid regions instead of
//! stopping.
//!
//! Each step is capped at `max_step_size` in Euclidean norm.
//!
//! A line search that finds no acceptable point after halving the step
//! `MAX_BACKTRACKS` times, along both the quasi-Newton and the steepest
//! descent direction, ends the run with [`TerminationReason::StepTolerance`].
//! The last rejected step is `2^-40` of its initial length, so the current
//! point is returned as the best one reachable.

use std::cell::Cell;
use std::collections::VecDeque;

use tracing::{debug, warn};

use super::{Minimizer, MinimizerConfig, MinimizerReport, TerminationReason};

/// Sufficient-decrease constant of the Armijo test.
const ARMIJO_C1: f64 = 1e-4;

/// Halvings tried before a line search gives up.
const MAX_BACKTRACKS: usize = 40;

/// Correction pairs with `s·y` at or below this are skipped.
const MIN_CURVATURE: f64 = 1e-12;

/// L-BFGS minimizer.
///
/// Stateless; the history length comes from
/// [`MinimizerConfig::history_size`].
#[derive(Debug, Clone, Copy, Default)]
pub struct LbfgsMinimizer;

impl LbfgsMinimizer {
    /// Create a minimizer.
    pub fn new() -> Self {
        Self
    }
}

impl Minimizer for LbfgsMinimizer {
    fn minimize<F>(
        &self,
        objective: F,
        initial: &[f64],
        config: &MinimizerConfig,
    ) -> MinimizerReport
    where
        F: Fn(&[f64]) -> f64,
    {
        let objective = CountingObjective::new(&objective);

        if initial.is_empty() {
            warn!("L-BFGS called with an empty parameter vector");
            return MinimizerReport::stopped_at_start(
                Vec::new(),
                f64::NAN,
                TerminationReason::InvalidInput,
                0,
            );
        }
        if let Err(e) = config.validate() {
            warn!(error = %e, "L-BFGS called with an invalid configuration");
            return MinimizerReport::stopped_at_start(
                initial.to_vec(),
                f64::NAN,
                TerminationReason::InvalidInput,
                0,
            );
        }

        let mut x = initial.to_vec();
        let mut fx = objective.eval(&x);
        if !fx.is_finite() {
            return MinimizerReport::stopped_at_start(
                x,
                fx,
                TerminationReason::NonFiniteObjective,
                objective.evaluations(),
            );
        }

        let Some(mut g) = gradient(&objective, &x, fx, config.diff_step) else {
            return MinimizerReport::stopped_at_start(
                x,
                fx,
                TerminationReason::NonFiniteObjective,
                objective.evaluations(),
            );
        };
        if norm(&g) <= config.eps_gradient {
            return MinimizerReport::stopped_at_start(
                x,
                fx,
                TerminationReason::GradientTolerance,
                objective.evaluations(),
            );
        }

        let mut history: VecDeque<Correction> = VecDeque::with_capacity(config.history_size);

        for iteration in 1..=config.max_iterations {
            let finish = |x: Vec<f64>, value: f64, termination, iterations| MinimizerReport {
                params: x,
                value,
                termination,
                iterations,
                evaluations: objective.evaluations(),
            };

            let mut direction = two_loop(&g, &history);
            let mut slope = dot(&g, &direction);
            if !(slope < 0.0) {
                history.clear();
                direction = g.iter().map(|v| -v).collect();
                slope = -dot(&g, &g);
            }

            let trial = match backtrack(&objective, &x, fx, &direction, slope, config) {
                Some(trial) => trial,
                None if !history.is_empty() => {
                    // Quasi-Newton direction failed; retry once along -g.
                    history.clear();
                    let steepest: Vec<f64> = g.iter().map(|v| -v).collect();
                    let steepest_slope = -dot(&g, &g);
                    match backtrack(&objective, &x, fx, &steepest, steepest_slope, config) {
                        Some(trial) => trial,
                        None => {
                            return finish(x, fx, TerminationReason::StepTolerance, iteration - 1)
                        }
                    }
                }
                None => return finish(x, fx, TerminationReason::StepTolerance, iteration - 1),
            };

            let Some(g_new) = gradient(&objective, &trial.x, trial.value, config.diff_step) else {
                return finish(
                    trial.x,
                    trial.value,
                    TerminationReason::NonFiniteObjective,
                    iteration,
                );
            };

            let s: Vec<f64> = trial.x.iter().zip(&x).map(|(a, b)| a - b).collect();
            let y: Vec<f64> = g_new.iter().zip(&g).map(|(a, b)| a - b).collect();
            let sy = dot(&s, &y);
            if sy > MIN_CURVATURE {
                if history.len() == config.history_size {
                    history.pop_front();
                }
                history.push_back(Correction { s, y, sy });
            }

            let improvement = (fx - trial.value).abs();
            let scale = fx.abs().max(trial.value.abs()).max(1.0);

            x = trial.x;
            fx = trial.value;
            g = g_new;
            let gradient_norm = norm(&g);

            debug!(
                iteration,
                value = fx,
                step = trial.step,
                gradient_norm,
                "L-BFGS iteration"
            );

            if gradient_norm <= config.eps_gradient {
                return finish(x, fx, TerminationReason::GradientTolerance, iteration);
            }
            if improvement <= config.eps_function * scale {
                return finish(x, fx, TerminationReason::FunctionTolerance, iteration);
            }
            if trial.step <= config.eps_step {
                return finish(x, fx, TerminationReason::StepTolerance, iteration);
            }
        }

        MinimizerReport {
            params: x,
            value: fx,
            termination: TerminationReason::MaxIterations,
            iterations: config.max_iterations,
            evaluations: objective.evaluations(),
        }
    }
}

/// Objective wrapper that counts calls.
struct CountingObjective<'a, F> {
    f: &'a F,
    evaluations: Cell<usize>,
}

impl<'a, F> CountingObjective<'a, F>
where
    F: Fn(&[f64]) -> f64,
{
    fn new(f: &'a F) -> Self {
        Self {
            f,
            evaluations: Cell::new(0),
        }
    }

    #[inline]
    fn eval(&self, x: &[f64]) -> f64 {
        self.evaluations.set(self.evaluations.get() + 1);
        (self.f)(x)
    }

    fn evaluations(&self) -> usize {
        self.evaluations.get()
    }
}

struct Correction {
    s: Vec<f64>,
    y: Vec<f64>,
    sy: f64,
}

struct Trial {
    x: Vec<f64>,
    value: f64,
    step: f64,
}

/// Compute `-H g` from the stored correction pairs.
fn two_loop(g: &[f64], history: &VecDeque<Correction>) -> Vec<f64> {
    let mut q = g.to_vec();
    let mut alphas = Vec::with_capacity(history.len());

    for c in history.iter().rev() {
        let alpha = dot(&c.s, &q) / c.sy;
        axpy(&mut q, -alpha, &c.y);
        alphas.push(alpha);
    }

    let gamma = history
        .back()
        .map_or(1.0, |c| c.sy / dot(&c.y, &c.y).max(f64::MIN_POSITIVE));
    q.iter_mut().for_each(|v| *v *= gamma);

    for (c, alpha) in history.iter().zip(alphas.iter().rev()) {
        let beta = dot(&c.y, &q) / c.sy;
        axpy(&mut q, alpha - beta, &c.s);
    }

    q.iter_mut().for_each(|v| *v = -*v);
    q
}

/// Backtracking line search on the Armijo condition.
fn backtrack<F>(
    objective: &CountingObjective<'_, F>,
    x: &[f64],
    fx: f64,
    direction: &[f64],
    slope: f64,
    config: &MinimizerConfig,
) -> Option<Trial>
where
    F: Fn(&[f64]) -> f64,
{
    let d_norm = norm(direction);
    if !(d_norm.is_finite() && d_norm > 0.0) {
        return None;
    }

    let mut alpha = if config.max_step_size > 0.0 && d_norm > config.max_step_size {
        config.max_step_size / d_norm
    } else {
        1.0
    };

    for _ in 0..MAX_BACKTRACKS {
        let candidate: Vec<f64> = x
            .iter()
            .zip(direction)
            .map(|(xi, di)| xi + alpha * di)
            .collect();
        let value = objective.eval(&candidate);
        if value.is_finite() && value <= fx + ARMIJO_C1 * alpha * slope {
            return Some(Trial {
                x: candidate,
                value,
                step: alpha * d_norm,
            });
        }
        alpha *= 0.5;
    }

    None
}

/// Central-difference gradient. `None` if a component cannot be estimated.
fn gradient<F>(objective: &CountingObjective<'_, F>, x: &[f64], fx: f64, h: f64) -> Option<Vec<f64>>
where
    F: Fn(&[f64]) -> f64,
{
    let mut g = Vec::with_capacity(x.len());
    let mut probe = x.to_vec();

    for i in 0..x.len() {
        probe[i] = x[i] + h;
        let f_plus = objective.eval(&probe);
        probe[i] = x[i] - h;
        let f_minus = objective.eval(&probe);
        probe[i] = x[i];

        let component = match (f_plus.is_finite(), f_minus.is_finite()) {
            (true, true) => (f_plus - f_minus) / (2.0 * h),
            (true, false) => (f_plus - fx) / h,
            (false, true) => (fx - f_minus) / h,
            (false, false) => return None,
        };
        if !component.is_finite() {
            return None;
        }
        g.push(component);
    }

    Some(g)
}

#[inline]
fn dot(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}

#[inline]
fn norm(a: &[f64]) -> f64 {
    dot(a, a).sqrt()
}

#[inline]
fn axpy(y: &mut [f64], a: f64, x: &[f64]) {
    for (yi, xi) in y.iter_mut().zip(x) {
        *yi += a * xi;
    }
}
