//! Plane-range reductions: maximum-intensity and sum projections.
use crate::errors::ProjectionError;
use crate::image::{ImageF32, StackView};
use crate::types::{ProjectionMode, ZRange};

/// Reduce the inclusive plane range of `range` to one 2D image.
pub fn project(
    stack: &StackView<'_>,
    range: &ZRange,
    mode: ProjectionMode,
) -> Result<ImageF32, ProjectionError> {
    match mode {
        ProjectionMode::Mip => maximum_projection(stack, range.z_min, range.z_max),
        ProjectionMode::Sum => sum_projection(stack, range.z_min, range.z_max),
    }
}

/// Pixelwise maximum over the inclusive range `[z_min, z_max]`.
pub fn maximum_projection(
    stack: &StackView<'_>,
    z_min: usize,
    z_max: usize,
) -> Result<ImageF32, ProjectionError> {
    check_inclusive_range(stack, z_min, z_max)?;
    let mut out = plane_image(stack, z_min);
    for z in z_min + 1..=z_max {
        for (dst, &src) in out.data.iter_mut().zip(stack.plane_data(z).iter()) {
            if src > *dst {
                *dst = src;
            }
        }
    }
    Ok(out)
}

/// Pixelwise sum over the inclusive range `[z_min, z_max]`.
pub fn sum_projection(
    stack: &StackView<'_>,
    z_min: usize,
    z_max: usize,
) -> Result<ImageF32, ProjectionError> {
    check_inclusive_range(stack, z_min, z_max)?;
    let mut out = plane_image(stack, z_min);
    for z in z_min + 1..=z_max {
        for (dst, &src) in out.data.iter_mut().zip(stack.plane_data(z).iter()) {
            *dst += src;
        }
    }
    Ok(out)
}

fn plane_image(stack: &StackView<'_>, z: usize) -> ImageF32 {
    ImageF32::from_data(stack.w, stack.h, stack.plane_data(z).to_vec())
}

fn check_inclusive_range(
    stack: &StackView<'_>,
    z_min: usize,
    z_max: usize,
) -> Result<(), ProjectionError> {
    if z_min > z_max || z_max >= stack.depth {
        return Err(ProjectionError::InvalidRange {
            z_min,
            z_max,
            depth: stack.depth,
        });
    }
    Ok(())
}
