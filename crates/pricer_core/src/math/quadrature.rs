//! Composite fixed-rule quadrature.
//!
//! [`CompositeIntegrator`] splits `[lower, upper]` into `panel_count` equal
//! panels and applies the same local [`QuadratureRule`] on each one:
//!
//! ```text
//! ∫ f(x) dx ≈ Σ_k  h/2 · Σ_i w_i · f(m_k + h/2 · x_i)
//! ```
//!
//! where `h` is the panel width, `m_k` the midpoint of panel `k`, and
//! `(x_i, w_i)` the reference nodes and weights on `[-1, 1]`.
//!
//! There is no adaptive refinement. The caller fixes the panel count, which
//! keeps the cost of a single integral predictable inside an optimizer loop.
//!
//! # Example
//!
//! ```
//! use pricer_core::math::quadrature::{CompositeIntegrator, QuadratureRule};
//!
//! let integrator = CompositeIntegrator::new(QuadratureRule::GaussLegendre4, 10).unwrap();
//! let area = integrator.integrate(|x: f64| x * x * x, 0.0, 2.0).unwrap();
//! assert!((area - 4.0).abs() < 1e-12);
//! ```

use num_traits::Float;

use crate::types::QuadratureError;

/// Local rule applied on every panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum QuadratureRule {
    /// Four-point Gauss-Legendre. Exact for polynomials up to degree 7.
    #[default]
    GaussLegendre4,
    /// Simpson's 3/8 rule (closed four-point Newton-Cotes). Exact up to degree 3.
    SimpsonThreeEighths,
}

const GAUSS_LEGENDRE_4_NODES: [f64; 4] = [
    -0.861_136_311_594_052_6,
    -0.339_981_043_584_856_3,
    0.339_981_043_584_856_3,
    0.861_136_311_594_052_6,
];
const GAUSS_LEGENDRE_4_WEIGHTS: [f64; 4] = [
    0.347_854_845_137_453_8,
    0.652_145_154_862_546_1,
    0.652_145_154_862_546_1,
    0.347_854_845_137_453_8,
];

const SIMPSON_38_NODES: [f64; 4] = [-1.0, -1.0 / 3.0, 1.0 / 3.0, 1.0];
const SIMPSON_38_WEIGHTS: [f64; 4] = [0.25, 0.75, 0.75, 0.25];

impl QuadratureRule {
    /// Reference nodes on `[-1, 1]`, ascending.
    pub fn nodes(&self) -> &'static [f64] {
        match self {
            QuadratureRule::GaussLegendre4 => &GAUSS_LEGENDRE_4_NODES,
            QuadratureRule::SimpsonThreeEighths => &SIMPSON_38_NODES,
        }
    }

    /// Reference weights matching [`nodes`](Self::nodes). They sum to 2.
    pub fn weights(&self) -> &'static [f64] {
        match self {
            QuadratureRule::GaussLegendre4 => &GAUSS_LEGENDRE_4_WEIGHTS,
            QuadratureRule::SimpsonThreeEighths => &SIMPSON_38_WEIGHTS,
        }
    }

    /// Highest polynomial degree integrated exactly on a single panel.
    pub fn degree_of_exactness(&self) -> usize {
        match self {
            QuadratureRule::GaussLegendre4 => 7,
            QuadratureRule::SimpsonThreeEighths => 3,
        }
    }
}

/// Composite integrator with a fixed rule and panel count.
///
/// # Determinism
///
/// Panels are accumulated in ascending index order and nodes within a panel
/// in ascending order, so identical inputs always produce identical output.
///
/// # Non-finite values
///
/// A NaN or infinite integrand value at any node flows into the returned sum.
/// Callers are expected to check the result with `is_finite`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CompositeIntegrator {
    rule: QuadratureRule,
    panel_count: usize,
}

impl CompositeIntegrator {
    /// Create an integrator.
    ///
    /// # Errors
    ///
    /// Returns `QuadratureError::InvalidPanelCount` if `panel_count == 0`.
    pub fn new(rule: QuadratureRule, panel_count: usize) -> Result<Self, QuadratureError> {
        if panel_count == 0 {
            return Err(QuadratureError::InvalidPanelCount(panel_count));
        }
        Ok(Self { rule, panel_count })
    }

    /// Local rule.
    #[inline]
    pub fn rule(&self) -> QuadratureRule {
        self.rule
    }

    /// Number of equal panels.
    #[inline]
    pub fn panel_count(&self) -> usize {
        self.panel_count
    }

    /// Integrate `f` over `[lower, upper]`.
    ///
    /// # Errors
    ///
    /// Returns `QuadratureError::InvalidBounds` unless both bounds are finite
    /// and `lower < upper`.
    pub fn integrate<T, F>(&self, f: F, lower: T, upper: T) -> Result<T, QuadratureError>
    where
        T: Float,
        F: Fn(T) -> T,
    {
        if !(lower.is_finite() && upper.is_finite() && lower < upper) {
            return Err(QuadratureError::InvalidBounds {
                lower: lower.to_f64().unwrap_or(f64::NAN),
                upper: upper.to_f64().unwrap_or(f64::NAN),
            });
        }

        let panels: T = lit(self.panel_count as f64);
        let width = (upper - lower) / panels;
        let half_width = width * lit(0.5);
        let nodes = self.rule.nodes();
        let weights = self.rule.weights();

        let mut total = T::zero();
        for k in 0..self.panel_count {
            let mid = lower + width * (lit::<T>(k as f64) + lit(0.5));
            let mut panel = T::zero();
            for (&x, &w) in nodes.iter().zip(weights) {
                panel = panel + lit::<T>(w) * f(mid + half_width * lit(x));
            }
            total = total + panel * half_width;
        }

        Ok(total)
    }
}

#[inline]
fn lit<T: Float>(x: f64) -> T {
    T::from(x).unwrap_or_else(T::nan)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use std::f64::consts::PI;

    fn cubic(x: f64) -> f64 {
        2.0 * x * x * x - 3.0 * x * x + x - 5.0
    }

    // Antiderivative of `cubic`.
    fn cubic_integral(a: f64, b: f64) -> f64 {
        let anti = |x: f64| 0.5 * x.powi(4) - x.powi(3) + 0.5 * x * x - 5.0 * x;
        anti(b) - anti(a)
    }

    #[test]
    fn test_new_rejects_zero_panels() {
        let err = CompositeIntegrator::new(QuadratureRule::GaussLegendre4, 0).unwrap_err();
        assert_eq!(err, QuadratureError::InvalidPanelCount(0));
    }

    #[test]
    fn test_rule_weights_sum_to_two() {
        for rule in [QuadratureRule::GaussLegendre4, QuadratureRule::SimpsonThreeEighths] {
            let sum: f64 = rule.weights().iter().sum();
            assert_abs_diff_eq!(sum, 2.0, epsilon = 1e-15);
            assert_eq!(rule.nodes().len(), rule.weights().len());
        }
    }

    #[test]
    fn test_single_panel_cubic_is_exact() {
        for rule in [QuadratureRule::GaussLegendre4, QuadratureRule::SimpsonThreeEighths] {
            let integrator = CompositeIntegrator::new(rule, 1).unwrap();
            let value = integrator.integrate(cubic, -1.5, 2.5).unwrap();
            assert_abs_diff_eq!(value, cubic_integral(-1.5, 2.5), epsilon = 1e-12);
        }
    }

    #[test]
    fn test_gauss_legendre_degree_seven_single_panel() {
        let integrator = CompositeIntegrator::new(QuadratureRule::GaussLegendre4, 1).unwrap();
        let value = integrator.integrate(|x: f64| x.powi(7) + x.powi(6), 0.0, 1.0).unwrap();
        assert_abs_diff_eq!(value, 1.0 / 8.0 + 1.0 / 7.0, epsilon = 1e-14);
    }

    #[test]
    fn test_error_decreases_with_panel_count() {
        let exact = 2.0; // ∫_0^π sin(x) dx
        let mut previous = f64::INFINITY;
        for panels in [1, 2, 4, 8, 16] {
            let integrator =
                CompositeIntegrator::new(QuadratureRule::SimpsonThreeEighths, panels).unwrap();
            let err = (integrator.integrate(f64::sin, 0.0, PI).unwrap() - exact).abs();
            assert!(err < previous, "panels {}: {} !< {}", panels, err, previous);
            previous = err;
        }
        assert!(previous < 1e-5);
    }

    #[test]
    fn test_oscillatory_integrand() {
        // ∫_0^50 cos(3x) dx = sin(150)/3
        let integrator = CompositeIntegrator::new(QuadratureRule::GaussLegendre4, 1000).unwrap();
        let value = integrator.integrate(|x: f64| (3.0 * x).cos(), 0.0, 50.0).unwrap();
        assert_abs_diff_eq!(value, (150.0_f64).sin() / 3.0, epsilon = 1e-12);
    }

    #[test]
    fn test_nan_propagates() {
        let integrator = CompositeIntegrator::new(QuadratureRule::GaussLegendre4, 4).unwrap();
        let value = integrator
            .integrate(|x: f64| if x > 0.9 { f64::NAN } else { x }, 0.0, 1.0)
            .unwrap();
        assert!(value.is_nan());

        let value = integrator
            .integrate(|x: f64| if x < 0.1 { f64::INFINITY } else { x }, 0.0, 1.0)
            .unwrap();
        assert!(value.is_infinite());
    }

    #[test]
    fn test_invalid_bounds() {
        let integrator = CompositeIntegrator::new(QuadratureRule::GaussLegendre4, 4).unwrap();
        assert!(matches!(
            integrator.integrate(|x: f64| x, 1.0, 1.0),
            Err(QuadratureError::InvalidBounds { .. })
        ));
        assert!(integrator.integrate(|x: f64| x, 2.0, 1.0).is_err());
        assert!(integrator.integrate(|x: f64| x, 0.0, f64::INFINITY).is_err());
        assert!(integrator.integrate(|x: f64| x, f64::NAN, 1.0).is_err());
    }

    #[test]
    fn test_deterministic() {
        let integrator = CompositeIntegrator::new(QuadratureRule::GaussLegendre4, 333).unwrap();
        let f = |x: f64| (x * 1.7).sin() * (-x).exp();
        let a = integrator.integrate(f, 0.0, 10.0).unwrap();
        let b = integrator.integrate(f, 0.0, 10.0).unwrap();
        assert_eq!(a.to_bits(), b.to_bits());
    }

    #[test]
    fn test_f32_support() {
        let integrator = CompositeIntegrator::new(QuadratureRule::GaussLegendre4, 4).unwrap();
        let value = integrator.integrate(|x: f32| x * x, 0.0_f32, 3.0_f32).unwrap();
        assert!((value - 9.0).abs() < 1e-4);
    }
}
