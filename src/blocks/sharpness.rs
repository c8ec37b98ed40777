//! Laplacian-variance sharpness over block footprints.
//!
//! A focused tile carries strong high-frequency content, so the variance of
//! its 4-neighbour Laplacian response peaks at the in-focus plane. Neighbour
//! reads clamp at the footprint edges, so blocks touching the border stay in
//! bounds.
use super::Block;
use crate::image::{PlaneView, StackView};

/// Sharpness of `block` at every plane of the stack.
pub(crate) fn block_sharpness_curve(stack: &StackView<'_>, block: &Block) -> Vec<f32> {
    (0..stack.depth)
        .map(|z| laplacian_variance(&stack.plane(z), block))
        .collect()
}

/// Variance of the 4-neighbour Laplacian response over `block`.
pub(crate) fn laplacian_variance(plane: &PlaneView<'_>, block: &Block) -> f32 {
    let (w, h) = (plane.w, plane.h);
    let count = block.width * block.height;
    if count == 0 {
        return 0.0;
    }
    let mut sum = 0.0f64;
    let mut sum_sq = 0.0f64;
    for y in block.y0..block.y0 + block.height {
        let up = y.saturating_sub(1);
        let down = (y + 1).min(h - 1);
        for x in block.x0..block.x0 + block.width {
            let left = x.saturating_sub(1);
            let right = (x + 1).min(w - 1);
            let response = 4.0 * plane.get(x, y)
                - plane.get(x, up)
                - plane.get(x, down)
                - plane.get(left, y)
                - plane.get(right, y);
            let r = response as f64;
            sum += r;
            sum_sq += r * r;
        }
    }
    let n = count as f64;
    let mean = sum / n;
    ((sum_sq / n - mean * mean).max(0.0)) as f32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flat_planes_have_zero_sharpness() {
        let data = vec![0.7f32; 8 * 8];
        let plane = PlaneView {
            w: 8,
            h: 8,
            data: &data,
        };
        let block = Block {
            x0: 0,
            y0: 0,
            width: 8,
            height: 8,
            bx: 0,
            by: 0,
        };
        assert_eq!(laplacian_variance(&plane, &block), 0.0);
    }

    #[test]
    fn textured_planes_outscore_flat_ones() {
        let mut data = vec![0.5f32; 8 * 8];
        for y in 0..8 {
            for x in 0..8 {
                if (x + y) % 2 == 0 {
                    data[y * 8 + x] = 1.0;
                }
            }
        }
        let plane = PlaneView {
            w: 8,
            h: 8,
            data: &data,
        };
        let block = Block {
            x0: 2,
            y0: 2,
            width: 4,
            height: 4,
            bx: 0,
            by: 0,
        };
        assert!(laplacian_variance(&plane, &block) > 0.0);
    }
}
