//! Per-plane intensity statistics over a z-stack range.
//!
//! The focus detector consumes the standard-deviation curve produced here;
//! the mean is kept alongside for diagnostics. Statistics are computed fresh
//! per invocation and never cached.
use crate::errors::ProjectionError;
use crate::image::StackView;
use rayon::prelude::*;
use serde::Serialize;

/// Scalar summary of one plane.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct PlaneStatistic {
    /// Population standard deviation of the plane intensities.
    pub std_dev: f32,
    pub mean: f32,
}

/// Statistics for every plane in the half-open range `[z_min, z_max)`.
pub fn plane_statistics(
    stack: &StackView<'_>,
    z_min: usize,
    z_max: usize,
) -> Result<Vec<PlaneStatistic>, ProjectionError> {
    check_range(stack, z_min, z_max)?;
    Ok((z_min..z_max)
        .map(|z| plane_statistic(stack.plane_data(z)))
        .collect())
}

/// Parallel variant of [`plane_statistics`], bit-identical to the sequential
/// path. Used when the caller selects inner-loop parallelism.
pub fn plane_statistics_par(
    stack: &StackView<'_>,
    z_min: usize,
    z_max: usize,
) -> Result<Vec<PlaneStatistic>, ProjectionError> {
    check_range(stack, z_min, z_max)?;
    Ok((z_min..z_max)
        .into_par_iter()
        .map(|z| plane_statistic(stack.plane_data(z)))
        .collect())
}

pub(crate) fn check_range(
    stack: &StackView<'_>,
    z_min: usize,
    z_max: usize,
) -> Result<(), ProjectionError> {
    if z_min >= z_max || z_max > stack.depth {
        return Err(ProjectionError::InvalidRange {
            z_min,
            z_max,
            depth: stack.depth,
        });
    }
    Ok(())
}

fn plane_statistic(plane: &[f32]) -> PlaneStatistic {
    if plane.is_empty() {
        return PlaneStatistic {
            std_dev: 0.0,
            mean: 0.0,
        };
    }
    let n = plane.len() as f64;
    let mean = plane.iter().map(|&v| v as f64).sum::<f64>() / n;
    let variance = plane
        .iter()
        .map(|&v| {
            let d = v as f64 - mean;
            d * d
        })
        .sum::<f64>()
        / n;
    PlaneStatistic {
        std_dev: variance.sqrt() as f32,
        mean: mean as f32,
    }
}

/// Index of the first maximum of `values`.
pub(crate) fn arg_max(values: &[f32]) -> usize {
    let mut best = 0usize;
    let mut best_value = values[0];
    for (i, &v) in values.iter().enumerate().skip(1) {
        if v > best_value {
            best = i;
            best_value = v;
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_plane_statistics() {
        let data = [0.0f32, 0.0, 1.0, 1.0];
        let stack = StackView {
            w: 2,
            h: 2,
            depth: 1,
            data: &data,
        };
        let stats = plane_statistics(&stack, 0, 1).unwrap();
        assert_eq!(stats.len(), 1);
        assert!((stats[0].mean - 0.5).abs() < 1e-6);
        assert!((stats[0].std_dev - 0.5).abs() < 1e-6);
    }

    #[test]
    fn inverted_and_oversized_ranges_are_rejected() {
        let data = [0.0f32; 8];
        let stack = StackView {
            w: 2,
            h: 2,
            depth: 2,
            data: &data,
        };
        assert!(plane_statistics(&stack, 1, 1).is_err());
        assert!(plane_statistics(&stack, 0, 3).is_err());
    }

    #[test]
    fn arg_max_takes_the_first_tie() {
        assert_eq!(arg_max(&[1.0, 3.0, 3.0, 2.0]), 1);
        assert_eq!(arg_max(&[0.0, 0.0, 0.0]), 0);
    }
}
