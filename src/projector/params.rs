//! Parameter types configuring the projection pipeline.
//!
//! Serde names follow the historical `zProject` parameter block (`zmin`,
//! `zwindows`, `windowSecurity`, `zProjectOption`, …) so existing parameter
//! files keep loading; defaults match that block too.
use crate::fit::FitOptions;
use crate::types::{FocusMode, ParallelismMode, ProjectionMode};
use serde::{Deserialize, Serialize};

/// Pipeline-wide parameters controlling all four projection paths.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ZProjectParams {
    /// Top-level path: global detection or blockwise focal surface.
    pub mode: FocusMode,
    /// Reduction applied over the selected plane range.
    #[serde(rename = "zProjectOption")]
    pub projection: ProjectionMode,
    /// First plane (inclusive) considered by the manual/full/automatic paths.
    #[serde(rename = "zmin")]
    pub z_min: usize,
    /// Upper plane bound (exclusive). `None` spans the whole stack.
    #[serde(rename = "zmax")]
    pub z_max: Option<usize>,
    /// Half-width of the output range around the focus plane; also the
    /// block overlap and z-averaging half-width of the laplacian path.
    #[serde(rename = "zwindows")]
    pub z_window: usize,
    /// Minimum distance from the stack edges before refinement is attempted,
    /// and the half-width of the fit window.
    #[serde(rename = "windowSecurity")]
    pub security: usize,
    /// Edge length (pixels) of the XY tiles used by the blockwise path.
    pub block_size: usize,
    /// Enables Gaussian refinement of the arg-max focus plane.
    pub refine: bool,
    /// Iteration budget and step tolerance of the Gaussian fit.
    pub fit: FitOptions,
    /// Inner-loop (planes/blocks) vs outer-loop (whole stacks) parallelism.
    pub parallelism: ParallelismMode,
}

impl Default for ZProjectParams {
    fn default() -> Self {
        Self {
            mode: FocusMode::Full,
            projection: ProjectionMode::Mip,
            z_min: 0,
            z_max: None,
            z_window: 15,
            security: 2,
            block_size: 256,
            refine: true,
            fit: FitOptions::default(),
            parallelism: ParallelismMode::OuterLoops,
        }
    }
}

impl ZProjectParams {
    /// Exclusive upper plane bound, clamped to the stack depth.
    pub(crate) fn effective_z_max(&self, depth: usize) -> usize {
        self.z_max.unwrap_or(depth).min(depth)
    }

    pub(crate) fn inner_parallel(&self) -> bool {
        matches!(self.parallelism, ParallelismMode::InnerLoops)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parameter_files_use_the_historical_names() {
        let json = r#"{
            "mode": "automatic",
            "zProjectOption": "sum",
            "zmin": 1,
            "zmax": 59,
            "zwindows": 15,
            "windowSecurity": 2,
            "blockSize": 256
        }"#;
        let params: ZProjectParams = serde_json::from_str(json).unwrap();
        assert_eq!(params.mode, FocusMode::Automatic);
        assert_eq!(params.projection, ProjectionMode::Sum);
        assert_eq!((params.z_min, params.z_max), (1, Some(59)));
        assert_eq!(params.z_window, 15);
        assert_eq!(params.security, 2);
        assert_eq!(params.block_size, 256);
        // omitted fields keep their defaults
        assert!(params.refine);
        assert_eq!(params.parallelism, ParallelismMode::OuterLoops);
    }
}
