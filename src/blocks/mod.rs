//! Blockwise focal-surface estimation and reassembly.
//!
//! Overview
//! - Tiles the XY footprint into fixed-size blocks; boundary blocks are
//!   clipped to the stack edges and never read out of bounds.
//! - Scores each block's sharpness per plane with the variance of its
//!   Laplacian response and keeps the arg-max plane ([`sharpness`]).
//! - Reassembles the per-block focal sub-images into one full-resolution
//!   composite with tent-weight blending over block overlaps
//!   ([`reassemble`]).
//!
//! The mapping is deterministic: identical stacks and parameters always
//! produce identical per-block indices, sequentially or under rayon.
mod reassemble;
mod sharpness;

pub use self::reassemble::reassemble;

use self::sharpness::block_sharpness_curve;
use crate::errors::ProjectionError;
use crate::image::{ImageF32, StackView};
use crate::stats::arg_max;
use rayon::prelude::*;
use serde::Serialize;

/// Rectangular XY tile of the footprint, clipped to the stack edges.
#[derive(Clone, Copy, Debug)]
pub struct Block {
    pub x0: usize,
    pub y0: usize,
    pub width: usize,
    pub height: usize,
    /// Block column index
    pub bx: usize,
    /// Block row index
    pub by: usize,
}

/// Tiling of a `width × height` footprint into `block_size` tiles.
#[derive(Clone, Copy, Debug)]
pub struct BlockGrid {
    pub width: usize,
    pub height: usize,
    pub block_size: usize,
    pub cols: usize,
    pub rows: usize,
}

impl BlockGrid {
    pub fn new(width: usize, height: usize, block_size: usize) -> Result<Self, ProjectionError> {
        if block_size == 0 {
            return Err(ProjectionError::Configuration(
                "block size must be positive".to_string(),
            ));
        }
        if width == 0 || height == 0 {
            return Err(ProjectionError::EmptyStack);
        }
        Ok(Self {
            width,
            height,
            block_size,
            cols: width.div_ceil(block_size),
            rows: height.div_ceil(block_size),
        })
    }

    /// Block at grid coordinate `(bx, by)`, clipped to the footprint.
    pub fn block(&self, bx: usize, by: usize) -> Block {
        let x0 = bx * self.block_size;
        let y0 = by * self.block_size;
        Block {
            x0,
            y0,
            width: self.block_size.min(self.width - x0),
            height: self.block_size.min(self.height - y0),
            bx,
            by,
        }
    }

    /// All blocks in row-major grid order.
    pub fn blocks(&self) -> Vec<Block> {
        let mut out = Vec::with_capacity(self.cols * self.rows);
        for by in 0..self.rows {
            for bx in 0..self.cols {
                out.push(self.block(bx, by));
            }
        }
        out
    }
}

/// Per-block focal-plane indices in row-major grid order.
#[derive(Clone, Debug, Serialize)]
pub struct FocalPlaneMap {
    pub cols: usize,
    pub rows: usize,
    pub block_size: usize,
    pub planes: Vec<usize>,
}

impl FocalPlaneMap {
    /// Focal plane of block `(bx, by)`.
    pub fn plane(&self, bx: usize, by: usize) -> usize {
        self.planes[by * self.cols + bx]
    }

    pub fn min_plane(&self) -> usize {
        self.planes.iter().copied().min().unwrap_or(0)
    }

    pub fn max_plane(&self) -> usize {
        self.planes.iter().copied().max().unwrap_or(0)
    }

    /// Upper median of the block planes, the representative focus plane of
    /// the whole surface.
    pub fn median_plane(&self) -> usize {
        let mut sorted = self.planes.clone();
        sorted.sort_unstable();
        sorted.get(sorted.len() / 2).copied().unwrap_or(0)
    }
}

/// Compute the focal-plane map of `stack` for the given block size.
pub fn map_focal_planes(
    stack: &StackView<'_>,
    block_size: usize,
) -> Result<FocalPlaneMap, ProjectionError> {
    let grid = prepare_grid(stack, block_size)?;
    let planes = grid
        .blocks()
        .iter()
        .map(|block| sharpest_plane(stack, block))
        .collect();
    Ok(finish_map(&grid, planes))
}

/// Parallel variant of [`map_focal_planes`] (one rayon task per block),
/// bit-identical to the sequential path.
pub fn map_focal_planes_par(
    stack: &StackView<'_>,
    block_size: usize,
) -> Result<FocalPlaneMap, ProjectionError> {
    let grid = prepare_grid(stack, block_size)?;
    let planes = grid
        .blocks()
        .par_iter()
        .map(|block| sharpest_plane(stack, block))
        .collect();
    Ok(finish_map(&grid, planes))
}

/// Blockwise focal surface plus seam-free composite: the public composition
/// of the mapper and the reassembler.
pub fn block_reassemble(
    stack: &StackView<'_>,
    block_size: usize,
    window: usize,
) -> Result<(ImageF32, FocalPlaneMap), ProjectionError> {
    let map = map_focal_planes(stack, block_size)?;
    let image = reassemble(stack, &map, window);
    Ok((image, map))
}

fn prepare_grid(stack: &StackView<'_>, block_size: usize) -> Result<BlockGrid, ProjectionError> {
    if stack.depth == 0 {
        return Err(ProjectionError::EmptyStack);
    }
    BlockGrid::new(stack.w, stack.h, block_size)
}

fn finish_map(grid: &BlockGrid, planes: Vec<usize>) -> FocalPlaneMap {
    FocalPlaneMap {
        cols: grid.cols,
        rows: grid.rows,
        block_size: grid.block_size,
        planes,
    }
}

fn sharpest_plane(stack: &StackView<'_>, block: &Block) -> usize {
    let curve = block_sharpness_curve(stack, block);
    arg_max(&curve)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boundary_blocks_are_clipped() {
        let grid = BlockGrid::new(50, 30, 16).unwrap();
        assert_eq!((grid.cols, grid.rows), (4, 2));
        let corner = grid.block(3, 1);
        assert_eq!((corner.x0, corner.y0), (48, 16));
        assert_eq!((corner.width, corner.height), (2, 14));
    }

    #[test]
    fn zero_block_size_is_a_configuration_error() {
        assert!(matches!(
            BlockGrid::new(64, 64, 0),
            Err(ProjectionError::Configuration(_))
        ));
    }

    #[test]
    fn map_lookup_matches_grid_order() {
        let map = FocalPlaneMap {
            cols: 3,
            rows: 2,
            block_size: 8,
            planes: vec![0, 1, 2, 3, 4, 5],
        };
        assert_eq!(map.plane(2, 0), 2);
        assert_eq!(map.plane(0, 1), 3);
        assert_eq!(map.min_plane(), 0);
        assert_eq!(map.max_plane(), 5);
        assert_eq!(map.median_plane(), 3);
    }
}
