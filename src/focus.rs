//! Focal-plane detection from per-plane contrast statistics.
//!
//! The detector picks the plane with the highest standard deviation and,
//! when that plane sits far enough from the stack edges, refines it by
//! fitting a Gaussian profile to the normalized contrast curve around the
//! peak. A fit that fails to converge degrades to the raw arg-max and
//! carries a [`FitWarning`] in the result instead of aborting.
use crate::errors::ProjectionError;
use crate::fit::{fit_gaussian, FitOptions, GaussianFit};
use crate::image::StackView;
use crate::stats::{arg_max, plane_statistics};
use log::{debug, warn};
use serde::Serialize;
use std::fmt;

/// Recoverable diagnostic: the Gaussian refinement did not converge and the
/// detector fell back to the unrefined arg-max plane.
#[derive(Clone, Debug, Serialize)]
pub struct FitWarning {
    pub max_iterations: usize,
}

impl fmt::Display for FitWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "gaussian refinement did not converge within {} iterations; using raw arg-max plane",
            self.max_iterations
        )
    }
}

/// Outcome of one focus detection over a contrast curve.
#[derive(Clone, Debug)]
pub struct FocusDetection {
    /// Selected plane index, refined when possible.
    pub plane: usize,
    /// Unrefined arg-max plane index.
    pub raw_plane: usize,
    /// Whether the Gaussian refinement was applied.
    pub refined: bool,
    pub fit: Option<GaussianFit>,
    pub warning: Option<FitWarning>,
}

/// Pick the focus plane of a contrast curve.
///
/// `security` is both the edge margin below which refinement is skipped and
/// the half-width of the fit window around the raw peak.
pub fn find_focus_plane(
    stds: &[f32],
    security: usize,
    refine: bool,
    options: &FitOptions,
) -> FocusDetection {
    assert!(
        !stds.is_empty(),
        "focus detection requires at least one plane statistic"
    );
    let n = stds.len();
    let raw_plane = arg_max(stds);
    let mut detection = FocusDetection {
        plane: raw_plane,
        raw_plane,
        refined: false,
        fit: None,
        warning: None,
    };
    if !refine {
        return detection;
    }
    if raw_plane < security || raw_plane + security > n {
        debug!(
            "find_focus_plane: raw plane {raw_plane} within security margin {security} of the stack edge, skipping refinement"
        );
        return detection;
    }

    let min = stds.iter().cloned().fold(f32::INFINITY, f32::min);
    let max = stds.iter().cloned().fold(f32::NEG_INFINITY, f32::max);
    let span = max - min;
    if span <= f32::EPSILON {
        debug!("find_focus_plane: flat contrast curve, skipping refinement");
        return detection;
    }

    let lo = raw_plane - security;
    let hi = (raw_plane + security + 1).min(n);
    if hi - lo < 3 {
        return detection;
    }
    let xs: Vec<f32> = (lo..hi).map(|i| i as f32).collect();
    let ys: Vec<f32> = stds[lo..hi].iter().map(|&v| (v - min) / span).collect();

    match fit_gaussian(&xs, &ys, options) {
        Some(fit) if fit.center.is_finite() => {
            let plane = fit.center.round().clamp(0.0, (n - 1) as f32) as usize;
            debug!(
                "find_focus_plane: refined {raw_plane} -> {plane} (center={:.3}, sigma={:.3})",
                fit.center, fit.sigma
            );
            detection.plane = plane;
            detection.refined = true;
            detection.fit = Some(fit);
        }
        _ => {
            let warning = FitWarning {
                max_iterations: options.max_iterations,
            };
            warn!("{warning}");
            detection.warning = Some(warning);
        }
    }
    detection
}

/// Detect the best-focused plane of `stack` within `[z_min, z_max)`.
///
/// Returns the absolute plane index together with the optional fit warning.
pub fn detect_focus(
    stack: &StackView<'_>,
    z_min: usize,
    z_max: usize,
    security: usize,
    refine: bool,
) -> Result<(usize, Option<FitWarning>), ProjectionError> {
    let statistics = plane_statistics(stack, z_min, z_max)?;
    let stds: Vec<f32> = statistics.iter().map(|s| s.std_dev).collect();
    let detection = find_focus_plane(&stds, security, refine, &FitOptions::default());
    Ok((z_min + detection.plane, detection.warning))
}
