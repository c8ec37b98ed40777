//! Plane-range selection around a detected focus plane.
use crate::errors::ProjectionError;
use crate::types::ZRange;

/// Clamp a window around `focus_plane` against the stack bounds.
///
/// `z_min` is `max(security, focus_plane - window)`, `z_max` is
/// `min(depth - 1, focus_plane + window)`; the lower bound is additionally
/// clamped to the upper one so the range is never empty. A focus plane
/// outside the stack is the caller's error and is rejected, not corrected.
pub fn select_range(
    focus_plane: usize,
    depth: usize,
    window: usize,
    security: usize,
) -> Result<ZRange, ProjectionError> {
    if depth == 0 || focus_plane >= depth {
        return Err(ProjectionError::InvalidRange {
            z_min: focus_plane,
            z_max: focus_plane,
            depth,
        });
    }
    let z_max = (focus_plane + window).min(depth - 1);
    let z_min = focus_plane
        .saturating_sub(window)
        .max(security)
        .min(z_max);
    Ok(ZRange {
        focus_plane,
        z_min,
        z_max,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_is_clamped_to_security_and_depth() {
        let range = select_range(1, 10, 5, 3).unwrap();
        assert_eq!((range.z_min, range.z_max), (3, 6));

        let range = select_range(9, 10, 5, 0).unwrap();
        assert_eq!((range.z_min, range.z_max), (4, 9));
    }

    #[test]
    fn oversized_security_collapses_to_the_upper_bound() {
        let range = select_range(5, 8, 2, 20).unwrap();
        assert_eq!((range.z_min, range.z_max), (7, 7));
        assert_eq!(range.plane_count(), 1);
    }

    #[test]
    fn zero_window_selects_the_focus_plane_alone() {
        let range = select_range(4, 9, 0, 0).unwrap();
        assert_eq!((range.z_min, range.z_max), (4, 4));
        assert!(range.contains(4));
    }

    #[test]
    fn out_of_bounds_focus_is_an_error() {
        assert!(select_range(10, 10, 2, 1).is_err());
        assert!(select_range(0, 0, 0, 0).is_err());
    }
}
