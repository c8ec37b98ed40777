//! Seam-free reassembly of per-block focal sub-images.
//!
//! Blending rule: each block contributes its base tile expanded by `window`
//! pixels on every side (clipped to the footprint), sampled at the block's
//! focal plane — or the mean over the clamped z-window
//! `[plane - window, plane + window]` when `window > 0`. Contributions are
//! blended with separable tent weights peaking at the tile centre, and the
//! output is the weighted average, so overlapping regions transition
//! smoothly and the footprint always matches the input. With `window == 0`
//! the tiles do not overlap and the composite is an exact mosaic of the
//! per-block focal planes.
use super::FocalPlaneMap;
use crate::image::{ImageF32, StackView};

/// Weight floor so every covered pixel keeps support.
const MIN_WEIGHT: f32 = 1e-3;

/// Stitch the per-block focal sub-images of `map` into one composite.
pub fn reassemble(stack: &StackView<'_>, map: &FocalPlaneMap, window: usize) -> ImageF32 {
    let (w, h) = (stack.w, stack.h);
    let mut weighted = vec![0.0f32; w * h];
    let mut weights = vec![0.0f32; w * h];

    for by in 0..map.rows {
        for bx in 0..map.cols {
            let plane = map.plane(bx, by);
            let x0 = (bx * map.block_size).saturating_sub(window);
            let y0 = (by * map.block_size).saturating_sub(window);
            let x1 = ((bx + 1) * map.block_size + window).min(w);
            let y1 = ((by + 1) * map.block_size + window).min(h);

            let z_lo = plane.saturating_sub(window);
            let z_hi = (plane + window).min(stack.depth - 1);
            let z_count = (z_hi - z_lo + 1) as f32;

            for y in y0..y1 {
                let wy = tent(y, y0, y1);
                for x in x0..x1 {
                    let mut value = 0.0f32;
                    for z in z_lo..=z_hi {
                        value += stack.plane_data(z)[y * w + x];
                    }
                    value /= z_count;

                    let weight = tent(x, x0, x1) * wy;
                    let idx = y * w + x;
                    weighted[idx] += weight * value;
                    weights[idx] += weight;
                }
            }
        }
    }

    let mut out = ImageF32::new(w, h);
    for (dst, (&num, &den)) in out.data.iter_mut().zip(weighted.iter().zip(weights.iter())) {
        *dst = if den > 0.0 { num / den } else { 0.0 };
    }
    out
}

/// Linear weight rising from the tile edge to 1.0 at its centre.
fn tent(i: usize, lo: usize, hi: usize) -> f32 {
    let span = (hi - lo) as f32;
    let centre = lo as f32 + 0.5 * (span - 1.0);
    let half = (0.5 * span).max(1.0);
    (1.0 - (i as f32 - centre).abs() / half).max(MIN_WEIGHT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image::ImageStack;

    #[test]
    fn mosaic_without_overlap_copies_block_planes() {
        // two 4x4 blocks side by side, focused on planes 0 and 1
        let mut stack = ImageStack::new(8, 4, 2);
        for y in 0..4 {
            for x in 0..8 {
                stack.set(x, y, 0, 0.25);
                stack.set(x, y, 1, 0.75);
            }
        }
        let map = FocalPlaneMap {
            cols: 2,
            rows: 1,
            block_size: 4,
            planes: vec![0, 1],
        };
        let out = reassemble(&stack.as_view(), &map, 0);
        assert_eq!(out.get(0, 0), 0.25);
        assert_eq!(out.get(3, 3), 0.25);
        assert_eq!(out.get(4, 0), 0.75);
        assert_eq!(out.get(7, 3), 0.75);
    }

    #[test]
    fn tent_peaks_at_the_tile_centre() {
        let edge = tent(0, 0, 8);
        let centre = tent(3, 0, 8);
        assert!(centre > edge);
        assert!(edge >= MIN_WEIGHT);
    }
}
