//! One-dimensional Gaussian profile fitting.
//!
//! The focus detector refines its arg-max plane by fitting
//! `a * exp(-(x - c)^2 / (2 s^2))` to the windowed, normalized contrast
//! curve. The fit is a Levenberg–Marquardt loop on the normal equations:
//! accumulate `JᵀJ` and `Jᵀr`, damp the diagonal, solve the 3×3 system and
//! accept or reject the step by the residual sum of squares. The iteration
//! budget is a hard bound; running out is reported as non-convergence, never
//! a hang.
use log::debug;
use nalgebra::{Matrix3, Vector3};
use serde::{Deserialize, Serialize};

const MIN_SIGMA: f32 = 1e-3;
const MIN_LAMBDA: f32 = 1e-12;
const MAX_LAMBDA: f32 = 1e8;

/// Accepted Gaussian parameters and the cost at acceptance.
#[derive(Clone, Copy, Debug, Serialize)]
pub struct GaussianFit {
    pub amplitude: f32,
    pub center: f32,
    pub sigma: f32,
    /// Residual sum of squares at the accepted parameters.
    pub residual: f32,
    pub iterations: usize,
}

/// Iteration budget and step tolerance for the fit.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FitOptions {
    /// Maximum Levenberg–Marquardt iterations before giving up.
    pub max_iterations: usize,
    /// Step norm below which the fit is considered converged.
    pub tolerance: f32,
}

impl Default for FitOptions {
    fn default() -> Self {
        Self {
            max_iterations: 100,
            tolerance: 1e-6,
        }
    }
}

/// Fit a Gaussian profile to `(xs, ys)` samples.
///
/// Returns `None` when the system is degenerate or the iteration budget is
/// exhausted without convergence; the caller decides how to recover.
pub fn fit_gaussian(xs: &[f32], ys: &[f32], options: &FitOptions) -> Option<GaussianFit> {
    debug_assert_eq!(xs.len(), ys.len());
    if xs.len() < 3 {
        return None;
    }

    // Seed from the data: peak value and position, quarter-span width.
    let mut peak_idx = 0usize;
    let mut peak = f32::NEG_INFINITY;
    for (i, &y) in ys.iter().enumerate() {
        if y > peak {
            peak = y;
            peak_idx = i;
        }
    }
    let span = xs[xs.len() - 1] - xs[0];
    let mut amplitude = peak.max(MIN_SIGMA);
    let mut center = xs[peak_idx];
    let mut sigma = (0.25 * span).max(1.0);

    let mut lambda = 1e-3f32;
    let mut cost = residual_sum(xs, ys, amplitude, center, sigma);

    for iteration in 1..=options.max_iterations {
        let (jtj, jtr) = normal_equations(xs, ys, amplitude, center, sigma);
        let mut damped = jtj;
        for k in 0..3 {
            damped[(k, k)] = damped[(k, k)] * (1.0 + lambda) + MIN_LAMBDA;
        }
        let rhs = -jtr;
        let delta = damped.lu().solve(&rhs)?;

        let next_amplitude = amplitude + delta[0];
        let next_center = center + delta[1];
        let next_sigma = (sigma + delta[2]).abs().max(MIN_SIGMA);
        let next_cost = residual_sum(xs, ys, next_amplitude, next_center, next_sigma);

        if next_cost.is_finite() && next_cost <= cost {
            let improvement = cost - next_cost;
            amplitude = next_amplitude;
            center = next_center;
            sigma = next_sigma;
            cost = next_cost;
            lambda = (lambda * 0.5).max(MIN_LAMBDA);
            if delta.norm() < options.tolerance
                || improvement < options.tolerance * options.tolerance
            {
                return Some(GaussianFit {
                    amplitude,
                    center,
                    sigma,
                    residual: cost,
                    iterations: iteration,
                });
            }
        } else {
            lambda *= 4.0;
            if lambda > MAX_LAMBDA {
                debug!("fit_gaussian: damping exploded after {iteration} iterations");
                return None;
            }
        }
    }
    debug!(
        "fit_gaussian: no convergence within {} iterations",
        options.max_iterations
    );
    None
}

/// Evaluate the Gaussian model at `x`.
pub fn gaussian(x: f32, amplitude: f32, center: f32, sigma: f32) -> f32 {
    let d = x - center;
    amplitude * (-(d * d) / (2.0 * sigma * sigma)).exp()
}

fn residual_sum(xs: &[f32], ys: &[f32], amplitude: f32, center: f32, sigma: f32) -> f32 {
    xs.iter()
        .zip(ys.iter())
        .map(|(&x, &y)| {
            let r = gaussian(x, amplitude, center, sigma) - y;
            r * r
        })
        .sum()
}

fn normal_equations(
    xs: &[f32],
    ys: &[f32],
    amplitude: f32,
    center: f32,
    sigma: f32,
) -> (Matrix3<f32>, Vector3<f32>) {
    let mut jtj = Matrix3::zeros();
    let mut jtr = Vector3::zeros();
    let s2 = sigma * sigma;
    for (&x, &y) in xs.iter().zip(ys.iter()) {
        let d = x - center;
        let e = (-(d * d) / (2.0 * s2)).exp();
        let r = amplitude * e - y;
        let j = Vector3::new(e, amplitude * e * d / s2, amplitude * e * d * d / (s2 * sigma));
        jtj += j * j.transpose();
        jtr += j * r;
    }
    (jtj, jtr)
}
